//! Cross-exchange depth arbitrage detector
//!
//! Fetches order-book depth for one pair from several centralized exchanges,
//! normalizes it into a canonical book, and sweeps a capital ladder to find
//! the trade size that maximizes buy-here, sell-there profit after slippage.

pub mod config;
pub mod types;
pub mod errors;
pub mod exchanges;
pub mod liquidity;
pub mod arbitrage;
pub mod utils;

// Re-export commonly used items
pub use arbitrage::ArbitrageDetector;
pub use config::{Config, SweepConfig, CONFIG};
pub use errors::{DetectorError, DetectorResult};
pub use types::*;
