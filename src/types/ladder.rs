//! Capital ladder swept by the arbitrage search

use rust_decimal::Decimal;
use serde::Serialize;
use crate::errors::{DetectorError, DetectorResult};

/// `start, start + step, …` for `count` levels, all in USD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapitalLadder {
    start: u64,
    step: u64,
    count: u32,
}

impl CapitalLadder {
    pub fn new(start: u64, step: u64, count: u32) -> DetectorResult<Self> {
        if start == 0 || step == 0 || count == 0 {
            return Err(DetectorError::InvalidLadder {
                reason: format!(
                    "start, step and count must be positive (got {}, {}, {})",
                    start, step, count
                ),
            });
        }
        Ok(Self { start, step, count })
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn last(&self) -> u64 {
        self.start
            .saturating_add(self.step.saturating_mul(u64::from(self.count - 1)))
    }

    pub fn levels(&self) -> Vec<Decimal> {
        (0..u64::from(self.count))
            .map(|i| Decimal::from(self.start.saturating_add(self.step.saturating_mul(i))))
            .collect()
    }

    /// The next ladder of the same shape, starting one step past this one.
    pub fn advanced(&self) -> Self {
        Self {
            start: self.last().saturating_add(self.step),
            ..*self
        }
    }
}

impl Default for CapitalLadder {
    fn default() -> Self {
        Self {
            start: 100,
            step: 100,
            count: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn levels_are_evenly_spaced() {
        let ladder = CapitalLadder::new(100, 50, 4).unwrap();
        assert_eq!(ladder.levels(), vec![dec!(100), dec!(150), dec!(200), dec!(250)]);
        assert_eq!(ladder.last(), 250);
    }

    #[test]
    fn advanced_continues_past_the_last_level() {
        let ladder = CapitalLadder::new(100, 100, 3).unwrap().advanced();
        assert_eq!(ladder.levels(), vec![dec!(400), dec!(500), dec!(600)]);
    }

    #[test]
    fn zero_components_are_rejected() {
        assert!(CapitalLadder::new(0, 100, 10).is_err());
        assert!(CapitalLadder::new(100, 0, 10).is_err());
        assert!(CapitalLadder::new(100, 100, 0).is_err());
    }

    #[test]
    fn default_matches_hundred_by_hundred() {
        let ladder = CapitalLadder::default();
        assert_eq!(ladder.levels().len(), 100);
        assert_eq!(ladder.last(), 10_000);
    }
}
