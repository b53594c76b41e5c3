//! Trading pair identifier

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use crate::errors::DetectorError;

/// Base/quote pair such as `BTC_USDT`. Both components are stored uppercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Pair {
    base: String,
    quote: String,
}

impl Pair {
    pub fn new(base: &str, quote: &str) -> Result<Self, DetectorError> {
        format!("{}_{}", base, quote).parse()
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn quote(&self) -> &str {
        &self.quote
    }
}

fn is_word_component(part: &str) -> bool {
    !part.is_empty() && part.chars().all(|c| c.is_alphanumeric())
}

impl FromStr for Pair {
    type Err = DetectorError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || DetectorError::InvalidPairFormat {
            input: input.to_string(),
        };

        let (base, quote) = input.split_once('_').ok_or_else(invalid)?;
        if !is_word_component(base) || !is_word_component(quote) {
            return Err(invalid());
        }

        Ok(Self {
            base: base.to_uppercase(),
            quote: quote.to_uppercase(),
        })
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.base, self.quote)
    }
}
