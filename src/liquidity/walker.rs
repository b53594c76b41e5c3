//! Slippage walks over canonical depth
//!
//! Both walks accumulate whole levels until the running total first exceeds
//! the target, then price the target at the volume-weighted average of every
//! level consumed so far, the crossing level included in full.

use rust_decimal::Decimal;
use std::collections::BTreeMap;
use crate::{
    errors::{DetectorError, DetectorResult},
    types::{BuyQuote, CanonicalBook, Depth, Exchange, SellQuote, TradeSide},
};

/// Token quantity `budget` buys on one exchange's asks, or `None` if the
/// asks run out before the spend exceeds the budget or the walk overflows.
pub fn buy_quantity(depth: &Depth, budget: Decimal) -> Option<Decimal> {
    if budget <= Decimal::ZERO {
        return None;
    }

    let mut spent = Decimal::ZERO;
    let mut bought = Decimal::ZERO;
    for level in depth.asks() {
        spent = spent.checked_add(level.notional()?)?;
        bought = bought.checked_add(level.quantity)?;
        if spent > budget {
            // budget / (spent / bought)
            return budget.checked_mul(bought)?.checked_div(spent);
        }
    }
    None
}

/// USD proceeds for selling `quantity` into one exchange's bids, or `None`
/// if the bids run out before the filled size exceeds the quantity or the
/// walk overflows.
pub fn sell_proceeds(depth: &Depth, quantity: Decimal) -> Option<Decimal> {
    if quantity <= Decimal::ZERO {
        return None;
    }

    let mut value = Decimal::ZERO;
    let mut filled = Decimal::ZERO;
    for level in depth.bids() {
        value = value.checked_add(level.notional()?)?;
        filled = filled.checked_add(level.quantity)?;
        if filled > quantity {
            // (value / filled) * quantity
            return value.checked_mul(quantity)?.checked_div(filled);
        }
    }
    None
}

/// Keeps only the exchange(s) with the largest amount. `None` when empty.
fn best_of(amounts: BTreeMap<Exchange, Decimal>) -> Option<(Vec<Exchange>, Decimal)> {
    let best = amounts.values().copied().max()?;
    let exchanges = amounts
        .into_iter()
        .filter(|(_, amount)| *amount == best)
        .map(|(exchange, _)| exchange)
        .collect();
    Some((exchanges, best))
}

/// The exchange(s) where `budget` buys the most tokens.
///
/// Fails with [`DetectorError::LiquidityExhausted`] when no exchange has
/// enough ask depth to absorb the budget.
pub fn max_buy_quantity(book: &CanonicalBook, budget: Decimal) -> DetectorResult<BuyQuote> {
    let quantities: BTreeMap<Exchange, Decimal> = book
        .iter()
        .filter_map(|(exchange, depth)| Some((exchange, buy_quantity(depth, budget)?)))
        .collect();

    let (exchanges, quantity) = best_of(quantities).ok_or(DetectorError::LiquidityExhausted {
        side: TradeSide::Buy,
        amount: budget,
    })?;
    Ok(BuyQuote { exchanges, quantity })
}

/// The exchange(s) where selling `quantity` yields the most USD.
///
/// Fails with [`DetectorError::LiquidityExhausted`] when no exchange has
/// enough bid depth to absorb the quantity.
pub fn max_sell_proceeds(book: &CanonicalBook, quantity: Decimal) -> DetectorResult<SellQuote> {
    let proceeds: BTreeMap<Exchange, Decimal> = book
        .iter()
        .filter_map(|(exchange, depth)| Some((exchange, sell_proceeds(depth, quantity)?)))
        .collect();

    let (exchanges, proceeds) = best_of(proceeds).ok_or(DetectorError::LiquidityExhausted {
        side: TradeSide::Sell,
        amount: quantity,
    })?;
    Ok(SellQuote { exchanges, proceeds })
}
