//! KuCoin `/api/v1/market/orderbook/level2_100`

use serde::Deserialize;
use serde_json::Value;
use super::BookSides;
use crate::{
    errors::{DetectorError, DetectorResult},
    exchanges::normalizer::{decode, DepthNormalizer},
    types::{Depth, Exchange},
};

const SUCCESS_CODE: &str = "200000";

#[derive(Debug, Deserialize)]
struct KucoinResponse {
    code: String,
    #[serde(default)]
    msg: Option<String>,
    data: Option<BookSides>,
}

pub struct KucoinDepth;

impl DepthNormalizer for KucoinDepth {
    fn exchange(&self) -> Exchange {
        Exchange::Kucoin
    }

    fn normalize(&self, payload: &Value) -> DetectorResult<Depth> {
        let exchange = self.exchange();
        let response: KucoinResponse = decode(exchange, payload)?;

        if response.code != SUCCESS_CODE {
            return Err(DetectorError::parsing(
                exchange,
                format!("code {} {}", response.code, response.msg.unwrap_or_default()).trim().to_string(),
            ));
        }
        // Unknown symbols answer 200000 with null or empty sides
        match response.data {
            Some(book) if !book.bids.is_empty() => book.into_depth(exchange),
            _ => Err(DetectorError::parsing(exchange, "empty data field")),
        }
    }
}
