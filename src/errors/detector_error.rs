//! Custom error types for the detector

use rust_decimal::Decimal;
use thiserror::Error;
use crate::types::{Exchange, TradeSide};

#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("Invalid pair '{input}': pair must be two alphanumeric symbols separated by an underscore, i.e. 'BTC_USDT'")]
    InvalidPairFormat { input: String },

    #[error("Invalid capital ladder: {reason}")]
    InvalidLadder { reason: String },

    #[error("Exchange unavailable: {exchange} - {reason}")]
    ExchangeUnavailable { exchange: Exchange, reason: String },

    #[error("Data parsing error: {exchange} - {context}")]
    DataParsing { exchange: Exchange, context: String },

    #[error("Liquidity exhausted: no exchange can {side} {amount}")]
    LiquidityExhausted { side: TradeSide, amount: Decimal },

    #[error("{pair} not found on any exchange.")]
    NoDataAvailable { pair: String },

    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },
}

impl DetectorError {
    pub(crate) fn parsing(exchange: Exchange, context: impl Into<String>) -> Self {
        DetectorError::DataParsing {
            exchange,
            context: context.into(),
        }
    }

    /// Errors that only remove one exchange from the current run.
    pub fn is_exchange_local(&self) -> bool {
        matches!(
            self,
            DetectorError::ExchangeUnavailable { .. } | DetectorError::DataParsing { .. }
        )
    }
}

pub type DetectorResult<T> = Result<T, DetectorError>;
