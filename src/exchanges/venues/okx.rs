//! OKX `/api/v5/market/books`
//!
//! Rows are `[price, size, deprecated, order_count]`.

use serde::Deserialize;
use serde_json::Value;
use super::BookSides;
use crate::{
    errors::{DetectorError, DetectorResult},
    exchanges::normalizer::{decode, DepthNormalizer},
    types::{Depth, Exchange},
};

#[derive(Debug, Deserialize)]
struct OkxResponse {
    code: String,
    #[serde(default)]
    msg: String,
    #[serde(default)]
    data: Vec<BookSides>,
}

pub struct OkxDepth;

impl DepthNormalizer for OkxDepth {
    fn exchange(&self) -> Exchange {
        Exchange::Okx
    }

    fn normalize(&self, payload: &Value) -> DetectorResult<Depth> {
        let exchange = self.exchange();
        let response: OkxResponse = decode(exchange, payload)?;

        if response.code != "0" {
            return Err(DetectorError::parsing(
                exchange,
                format!("code {} {}", response.code, response.msg).trim().to_string(),
            ));
        }
        response
            .data
            .into_iter()
            .next()
            .ok_or_else(|| DetectorError::parsing(exchange, "empty data field"))?
            .into_depth(exchange)
    }
}
