//! Per-exchange depth normalizers

pub mod binance;
pub mod bitfinex;
pub mod gate;
pub mod huobi;
pub mod kucoin;
pub mod mexc;
pub mod okx;

pub use binance::BinanceDepth;
pub use bitfinex::BitfinexDepth;
pub use gate::GateDepth;
pub use huobi::HuobiDepth;
pub use kucoin::KucoinDepth;
pub use mexc::MexcDepth;
pub use okx::OkxDepth;

use serde::Deserialize;
use serde_json::Value;
use crate::{
    errors::DetectorResult,
    exchanges::normalizer::parse_levels,
    types::{Depth, Exchange},
};

/// `{"bids": [[price, qty, ...]], "asks": [...]}`, shared by several venues.
#[derive(Debug, Deserialize)]
pub(crate) struct BookSides {
    pub bids: Vec<Vec<Value>>,
    pub asks: Vec<Vec<Value>>,
}

impl BookSides {
    pub(crate) fn into_depth(self, exchange: Exchange) -> DetectorResult<Depth> {
        let bids = parse_levels(exchange, "bids", &self.bids)?;
        let asks = parse_levels(exchange, "asks", &self.asks)?;
        Ok(Depth::new(bids, asks))
    }
}

/// Error text from the common `msg` / `message` / `err-msg` fields.
pub(crate) fn error_message(payload: &Value) -> Option<String> {
    ["msg", "message", "err-msg"]
        .iter()
        .filter_map(|field| payload.get(*field))
        .filter_map(Value::as_str)
        .find(|text| !text.is_empty())
        .map(str::to_string)
}
