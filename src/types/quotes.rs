//! Best-exchange quotes produced by the liquidity walker

use rust_decimal::Decimal;
use serde::Serialize;
use super::Exchange;

/// Largest token quantity a budget buys, and the exchange(s) offering it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuyQuote {
    pub exchanges: Vec<Exchange>,
    pub quantity: Decimal,
}

/// Largest USD proceeds for selling a quantity, and the exchange(s) offering it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SellQuote {
    pub exchanges: Vec<Exchange>,
    pub proceeds: Decimal,
}

pub(crate) fn join_exchanges(exchanges: &[Exchange]) -> String {
    exchanges
        .iter()
        .map(|exchange| exchange.name())
        .collect::<Vec<_>>()
        .join("/")
}
