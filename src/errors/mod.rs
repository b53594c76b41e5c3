//! Error types shared across the detector

pub mod detector_error;

pub use detector_error::*;
