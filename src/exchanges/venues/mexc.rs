//! MEXC `/api/v3/depth`

use serde_json::Value;
use super::{error_message, BookSides};
use crate::{
    errors::{DetectorError, DetectorResult},
    exchanges::normalizer::{decode, DepthNormalizer},
    types::{Depth, Exchange},
};

pub struct MexcDepth;

impl DepthNormalizer for MexcDepth {
    fn exchange(&self) -> Exchange {
        Exchange::Mexc
    }

    fn normalize(&self, payload: &Value) -> DetectorResult<Depth> {
        // Errors come back as {"code": ..., "msg": ...} without book sides
        if payload.get("bids").is_none() || payload.get("asks").is_none() {
            return Err(DetectorError::parsing(
                self.exchange(),
                error_message(payload).unwrap_or_else(|| "missing book sides".to_string()),
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
    fn extracts_levels() {
        let payload = json!({
            "lastUpdateId": 3823183412u64,
            "bids": [["64120.01", "0.25"], ["64119.5", "1.10"]],
            "asks": [["64120.5", "0.4"]],
            "timestamp": 1717000000000u64
        });

        let depth = MexcDepth.normalize(&payload).unwrap();

        assert_eq!(depth.best_bid().map(|l| l.price), Some(dec!(64120.01)));
        assert_eq!(depth.best_ask().map(|l| l.quantity), Some(dec!(0.4)));
    }

    #[test]
    fn missing_asks_is_rejected() {
        let payload = json!({"bids": [["1", "1"]]});
        assert!(MexcDepth.normalize(&payload).is_err());
    }
}
