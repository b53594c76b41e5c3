//! Payload → canonical depth
//!
//! Each exchange answers with its own JSON shape. A [`DepthNormalizer`]
//! implementation per exchange validates the success indicator and extracts
//! the levels; [`normalize_all`] assembles the [`CanonicalBook`], dropping any
//! exchange whose payload is unusable without affecting the others.

use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::{debug, warn};
use crate::{
    errors::{DetectorError, DetectorResult},
    exchanges::{venues, RawBook},
    types::{CanonicalBook, Depth, Exchange, Pair, PriceLevel},
};

/// Converts one exchange's raw depth payload into a canonical [`Depth`].
pub trait DepthNormalizer: Send + Sync {
    fn exchange(&self) -> Exchange;

    fn normalize(&self, payload: &Value) -> DetectorResult<Depth>;
}

pub fn normalizer_for(exchange: Exchange) -> &'static dyn DepthNormalizer {
    match exchange {
        Exchange::Binance => &venues::BinanceDepth,
        Exchange::Bitfinex => &venues::BitfinexDepth,
        Exchange::Kucoin => &venues::KucoinDepth,
        Exchange::Okx => &venues::OkxDepth,
        Exchange::Gate => &venues::GateDepth,
        Exchange::Huobi => &venues::HuobiDepth,
        Exchange::Mexc => &venues::MexcDepth,
    }
}

/// Normalizes every fetched payload. Exchanges that fail validation or yield
/// no levels at all are left out of the book.
pub fn normalize_all(pair: &Pair, raw: &RawBook) -> CanonicalBook {
    let mut depths = BTreeMap::new();

    for (exchange, payload) in raw {
        match normalizer_for(*exchange).normalize(payload) {
            Ok(depth) if depth.is_empty() => {
                debug!(exchange = %exchange, "No usable levels, excluding exchange");
            }
            Ok(depth) => {
                debug!(
                    exchange = %exchange,
                    bids = depth.bids().len(),
                    asks = depth.asks().len(),
                    "Normalized depth"
                );
                depths.insert(*exchange, depth);
            }
            Err(e) => {
                warn!(exchange = %exchange, "Excluding exchange: {}", e);
            }
        }
    }

    CanonicalBook::new(pair.clone(), depths)
}

/// Parses a JSON string or number into an exact decimal.
pub(crate) fn decimal_from_value(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

/// Parses `[[price, quantity, ...], ...]` rows. Extra columns are ignored;
/// non-positive levels are dropped. Any unparseable row, or one whose
/// notional overflows, rejects the payload.
pub(crate) fn parse_levels(
    exchange: Exchange,
    side: &str,
    rows: &[Vec<Value>],
) -> DetectorResult<Vec<PriceLevel>> {
    let mut levels = Vec::with_capacity(rows.len());
    for row in rows {
        let (price, quantity) = match (row.first(), row.get(1)) {
            (Some(price), Some(quantity)) => (price, quantity),
            _ => {
                return Err(DetectorError::parsing(
                    exchange,
                    format!("{} row has fewer than two columns", side),
                ));
            }
        };
        let price = decimal_from_value(price).ok_or_else(|| {
            DetectorError::parsing(exchange, format!("invalid {} price: {}", side, price))
        })?;
        let quantity = decimal_from_value(quantity).ok_or_else(|| {
            DetectorError::parsing(exchange, format!("invalid {} quantity: {}", side, quantity))
        })?;
        if let Some(level) = PriceLevel::new(price, quantity) {
            if level.notional().is_none() {
                return Err(DetectorError::parsing(
                    exchange,
                    format!("{} level {} x {} overflows", side, price, quantity),
                ));
            }
            levels.push(level);
        }
    }
    Ok(levels)
}

/// Deserializes `payload` into an exchange response type, mapping failures
/// to a parsing error for that exchange.
pub(crate) fn decode<'a, T>(exchange: Exchange, payload: &'a Value) -> DetectorResult<T>
where
    T: serde::Deserialize<'a>,
{
    T::deserialize(payload).map_err(|e| DetectorError::parsing(exchange, e.to_string()))
}
