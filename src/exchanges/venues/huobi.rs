//! Huobi (HTX) `/market/depth`

use serde::Deserialize;
use serde_json::Value;
use super::{error_message, BookSides};
use crate::{
    errors::{DetectorError, DetectorResult},
    exchanges::normalizer::{decode, DepthNormalizer},
    types::{Depth, Exchange},
};

#[derive(Debug, Deserialize)]
struct HuobiResponse {
    status: String,
    tick: Option<BookSides>,
}

pub struct HuobiDepth;

impl DepthNormalizer for HuobiDepth {
    fn exchange(&self) -> Exchange {
        Exchange::Huobi
    }

    fn normalize(&self, payload: &Value) -> DetectorResult<Depth> {
        let exchange = self.exchange();
        let response: HuobiResponse = decode(exchange, payload)?;

        match response.tick {
            Some(tick) if response.status == "ok" => tick.into_depth(exchange),
            _ => Err(DetectorError::parsing(
                exchange,
                error_message(payload).unwrap_or_else(|| format!("status {}", response.status)),
            )),
        }
    }
}
