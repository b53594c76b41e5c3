//! Exchange catalog, depth fetching and payload normalization

pub mod catalog;
pub mod fetcher;
pub mod normalizer;
pub mod venues;

pub use catalog::*;
pub use fetcher::*;
pub use normalizer::{normalize_all, normalizer_for, DepthNormalizer};
