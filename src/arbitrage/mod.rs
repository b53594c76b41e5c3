//! Arbitrage search over a canonical book

pub mod detector;
pub mod sweep;

pub use detector::*;
pub use sweep::*;
