//! Bitfinex `/v2/book/{symbol}/P0`
//!
//! Rows are `[price, count, amount]`. The sign of `amount` tells the side:
//! positive for bids, negative for asks.

use serde_json::Value;
use crate::{
    errors::{DetectorError, DetectorResult},
    exchanges::normalizer::{decimal_from_value, decode, DepthNormalizer},
    types::{Depth, Exchange, PriceLevel},
};

pub struct BitfinexDepth;

impl DepthNormalizer for BitfinexDepth {
    fn exchange(&self) -> Exchange {
        Exchange::Bitfinex
    }

    fn normalize(&self, payload: &Value) -> DetectorResult<Depth> {
        let exchange = self.exchange();

        // Errors look like ["error", 10020, "symbol: invalid"]
        if payload.get(0).and_then(Value::as_str) == Some("error") {
            let message = payload.get(2).and_then(Value::as_str).unwrap_or("error response");
            return Err(DetectorError::parsing(exchange, message));
        }
        if payload.get("error").is_some() {
            return Err(DetectorError::parsing(exchange, "error response"));
        }

        let rows: Vec<Vec<Value>> = decode(exchange, payload)?;
        let mut bids = Vec::new();
        let mut asks = Vec::new();

        for row in &rows {
            let (price, amount) = match (row.first(), row.get(2)) {
                (Some(price), Some(amount)) => (
                    decimal_from_value(price),
                    decimal_from_value(amount),
                ),
                _ => {
                    return Err(DetectorError::parsing(exchange, "book row has fewer than three columns"));
                }
            };
            let (Some(price), Some(amount)) = (price, amount) else {
                return Err(DetectorError::parsing(exchange, format!("invalid book row: {:?}", row)));
            };

            if amount.is_sign_positive() {
                bids.extend(PriceLevel::new(price, amount));
            } else {
                asks.extend(PriceLevel::new(price, amount.abs()));
            }
        }

        Ok(Depth::new(bids, asks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn splits_sides_by_amount_sign() {
        let payload = json!([
            [64000.0, 3, 0.5],
            [63990.0, 1, 1.25],
            [64010.0, 2, -0.75],
            [64020.0, 1, -2.0],
            [64030.0, 1, 0.0]
        ]);

        let depth = BitfinexDepth.normalize(&payload).unwrap();

        assert_eq!(depth.bids().len(), 2);
        assert_eq!(depth.best_bid().map(|l| l.price), Some(dec!(64000)));
        assert_eq!(depth.asks().len(), 2);
        assert_eq!(depth.best_ask().map(|l| (l.price, l.quantity)), Some((dec!(64010), dec!(0.75))));
    }

    #[test]
    fn error_array_is_rejected() {
        let payload = json!(["error", 10020, "symbol: invalid"]);
        let err = BitfinexDepth.normalize(&payload).unwrap_err();
        assert!(err.to_string().contains("symbol: invalid"));
    }

    #[test]
    fn unknown_symbol_yields_empty_depth() {
        let depth = BitfinexDepth.normalize(&json!([])).unwrap();
        assert!(depth.is_empty());
    }
}
