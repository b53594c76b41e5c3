//! Gate.io `/api/v4/spot/order_book`

use serde_json::Value;
use super::{error_message, BookSides};
use crate::{
    errors::{DetectorError, DetectorResult},
    exchanges::normalizer::{decode, DepthNormalizer},
    types::{Depth, Exchange},
};

pub struct GateDepth;

impl DepthNormalizer for GateDepth {
    fn exchange(&self) -> Exchange {
        Exchange::Gate
    }

    fn normalize(&self, payload: &Value) -> DetectorResult<Depth> {
        if let Some(label) = payload.get("label").and_then(Value::as_str) {
            let detail = error_message(payload).unwrap_or_default();
            return Err(DetectorError::parsing(
                self.exchange(),
                format!("{} {}", label, detail).trim().to_string(),
            ));
        }
        if payload.get("asks").is_none() {
            return Err(DetectorError::parsing(self.exchange(), "missing asks"));
        }
        decode::<BookSides>(self.exchange(), payload)?.into_depth(self.exchange())
    }
}
