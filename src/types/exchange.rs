//! Supported exchange identifiers

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Exchanges with a public depth endpoint in the catalog.
///
/// Ordering follows declaration order and is used wherever results need a
/// deterministic exchange order (ties, rendering).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Exchange {
    Binance,
    Bitfinex,
    Kucoin,
    Okx,
    Gate,
    Huobi,
    Mexc,
}

impl Exchange {
    pub const ALL: [Exchange; 7] = [
        Exchange::Binance,
        Exchange::Bitfinex,
        Exchange::Kucoin,
        Exchange::Okx,
        Exchange::Gate,
        Exchange::Huobi,
        Exchange::Mexc,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Exchange::Binance => "binance",
            Exchange::Bitfinex => "bitfinex",
            Exchange::Kucoin => "kucoin",
            Exchange::Okx => "okx",
            Exchange::Gate => "gate",
            Exchange::Huobi => "huobi",
            Exchange::Mexc => "mexc",
        }
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Exchange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Exchange::ALL
            .into_iter()
            .find(|exchange| exchange.name() == wanted)
            .ok_or_else(|| format!("unsupported exchange: {}", s))
    }
}

/// Which side of the book a walk consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TradeSide {
    /// Spend quote currency against asks.
    Buy,
    /// Sell tokens into bids.
    Sell,
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeSide::Buy => f.write_str("buy"),
            TradeSide::Sell => f.write_str("sell"),
        }
    }
}
