//! Canonical order-book depth types

use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use super::{Exchange, Pair};

/// One rung of a book. Price and quantity are both strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceLevel {
    pub price: Decimal,
    pub quantity: Decimal,
}

impl PriceLevel {
    /// Returns `None` for non-positive prices or quantities.
    pub fn new(price: Decimal, quantity: Decimal) -> Option<Self> {
        if price > Decimal::ZERO && quantity > Decimal::ZERO {
            Some(Self { price, quantity })
        } else {
            None
        }
    }

    /// `price * quantity`, or `None` when the product overflows.
    pub fn notional(&self) -> Option<Decimal> {
        self.price.checked_mul(self.quantity)
    }
}

/// Bids sorted by descending price, asks by ascending price.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Depth {
    bids: Vec<PriceLevel>,
    asks: Vec<PriceLevel>,
}

impl Depth {
    /// Builds a depth from levels in any order. The sort is stable, so levels
    /// at an equal price keep the order the exchange sent them in.
    pub fn new(mut bids: Vec<PriceLevel>, mut asks: Vec<PriceLevel>) -> Self {
        bids.sort_by(|a, b| b.price.cmp(&a.price));
        asks.sort_by(|a, b| a.price.cmp(&b.price));
        Self { bids, asks }
    }

    /// Builds a depth from raw `(price, quantity)` tuples, dropping invalid levels.
    pub fn from_tuples(bids: &[(Decimal, Decimal)], asks: &[(Decimal, Decimal)]) -> Self {
        let levels = |side: &[(Decimal, Decimal)]| {
            side.iter()
                .filter_map(|(price, quantity)| PriceLevel::new(*price, *quantity))
                .collect()
        };
        Self::new(levels(bids), levels(asks))
    }

    pub fn bids(&self) -> &[PriceLevel] {
        &self.bids
    }

    pub fn asks(&self) -> &[PriceLevel] {
        &self.asks
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    pub fn best_bid(&self) -> Option<&PriceLevel> {
        self.bids.first()
    }

    pub fn best_ask(&self) -> Option<&PriceLevel> {
        self.asks.first()
    }
}

/// Normalized snapshot of every exchange that answered with usable depth.
///
/// Exchanges that failed are absent. Readers treat an absent exchange and one
/// with empty depth the same way: no liquidity.
#[derive(Debug, Clone, Serialize)]
pub struct CanonicalBook {
    pair: Pair,
    fetched_at: DateTime<Utc>,
    depths: BTreeMap<Exchange, Depth>,
}

impl CanonicalBook {
    pub fn new(pair: Pair, depths: BTreeMap<Exchange, Depth>) -> Self {
        Self {
            pair,
            fetched_at: Utc::now(),
            depths,
        }
    }

    pub fn pair(&self) -> &Pair {
        &self.pair
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Time elapsed since the snapshot was assembled.
    pub fn age(&self) -> TimeDelta {
        Utc::now() - self.fetched_at
    }

    pub fn depth(&self, exchange: Exchange) -> Option<&Depth> {
        self.depths.get(&exchange)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Exchange, &Depth)> {
        self.depths.iter().map(|(exchange, depth)| (*exchange, depth))
    }

    pub fn exchanges(&self) -> Vec<Exchange> {
        self.depths.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.depths.len()
    }

    /// True when no exchange holds any level.
    pub fn is_empty(&self) -> bool {
        self.depths.values().all(Depth::is_empty)
    }
}
