//! Liquidity walks over canonical depth

pub mod walker;

pub use walker::*;
