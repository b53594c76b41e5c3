//! Binance `/api/v3/depth`

use serde_json::Value;
use super::{error_message, BookSides};
use crate::{
    errors::{DetectorError, DetectorResult},
    exchanges::normalizer::{decode, DepthNormalizer},
    types::{Depth, Exchange},
};

pub struct BinanceDepth;

impl DepthNormalizer for BinanceDepth {
    fn exchange(&self) -> Exchange {
        Exchange::Binance
    }

    fn normalize(&self, payload: &Value) -> DetectorResult<Depth> {
        if payload.get("bids").is_none() {
            return Err(DetectorError::parsing(
                self.exchange(),
                error_message(payload).unwrap_or_else(|| "missing bids".to_string()),
            ));
        }
        decode::<BookSides>(self.exchange(), payload)?.into_depth(self.exchange())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn extracts_string_levels() {
        let payload = json!({
            "lastUpdateId": 1027024,
            "bids": [["4.00000000", "431.00000000"], ["4.10000000", "12.00000000"]],
            "asks": [["4.00000200", "12.00000000"], ["5.00000000", "0.00000000"]]
        });

        let depth = BinanceDepth.normalize(&payload).unwrap();

        assert_eq!(depth.bids().len(), 2);
        assert_eq!(depth.bids()[0].price, dec!(4.1));
        assert_eq!(depth.asks().len(), 1);
        assert_eq!(depth.asks()[0].quantity, dec!(12));
    }

    #[test]
    fn error_body_is_rejected_with_its_message() {
        let payload = json!({"code": -1121, "msg": "Invalid symbol."});
        let err = BinanceDepth.normalize(&payload).unwrap_err();
        assert!(err.to_string().contains("Invalid symbol."));
    }
}
