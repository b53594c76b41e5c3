//! Core data types and structures

pub mod arbitrage;
pub mod depth;
pub mod exchange;
pub mod ladder;
pub mod pair;
pub mod quotes;

pub use arbitrage::*;
pub use depth::*;
pub use exchange::*;
pub use ladder::*;
pub use pair::*;
pub use quotes::*;
