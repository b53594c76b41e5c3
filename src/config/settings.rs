//! Detector configuration settings and environment variable handling

use std::env;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;
use crate::errors::DetectorResult;
use crate::types::{CapitalLadder, Exchange};

// Configuration constants
pub const DEFAULT_PAIR: &str = "BTC_USDT";
pub const DEFAULT_LADDER_START: u64 = 100;
pub const DEFAULT_LADDER_STEP: u64 = 100;
pub const DEFAULT_LADDER_STEPS: u32 = 100;
pub const MAX_LADDER_STEPS: u32 = 1_000;
pub const DEFAULT_SWEEP_ROUNDS: u32 = 10;
pub const MAX_SWEEP_ROUNDS: u32 = 100;
pub const DEFAULT_DEPTH_LIMIT: u32 = 100;
pub const MAX_DEPTH_LIMIT: u32 = 5_000;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
pub const MAX_FETCH_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub pair: String,
    // Sweep ladder
    pub ladder_start: u64,
    pub ladder_step: u64,
    pub ladder_steps: u32,
    pub max_sweep_rounds: u32,
    // Fetching
    pub depth_limit: u32,
    pub fetch_timeout_secs: u64,
    pub exchanges: Vec<Exchange>,
    // Logging
    pub log_dir: Option<String>,
}

/// Sweep parameters handed explicitly to the arbitrage sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepConfig {
    pub ladder: CapitalLadder,
    /// How many ladders to walk before giving up on finding a peak.
    pub max_rounds: u32,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            ladder: CapitalLadder::default(),
            max_rounds: DEFAULT_SWEEP_ROUNDS,
        }
    }
}

impl Config {
    pub fn load() -> Self {
        Self {
            pair: env::var("PAIR").unwrap_or_else(|_| DEFAULT_PAIR.to_string()),
            ladder_start: parse_var("LADDER_START")
                .unwrap_or(DEFAULT_LADDER_START)
                .max(1),
            ladder_step: parse_var("LADDER_STEP")
                .unwrap_or(DEFAULT_LADDER_STEP)
                .max(1),
            ladder_steps: parse_var("LADDER_STEPS")
                .unwrap_or(DEFAULT_LADDER_STEPS)
                .clamp(1, MAX_LADDER_STEPS),
            max_sweep_rounds: parse_var("MAX_SWEEP_ROUNDS")
                .unwrap_or(DEFAULT_SWEEP_ROUNDS)
                .clamp(1, MAX_SWEEP_ROUNDS),
            depth_limit: parse_var("DEPTH_LIMIT")
                .unwrap_or(DEFAULT_DEPTH_LIMIT)
                .clamp(1, MAX_DEPTH_LIMIT),
            fetch_timeout_secs: parse_var("FETCH_TIMEOUT_SECS")
                .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS)
                .clamp(1, MAX_FETCH_TIMEOUT_SECS),
            exchanges: env::var("EXCHANGES")
                .map(|list| parse_exchange_list(&list))
                .unwrap_or_else(|_| Exchange::ALL.to_vec()),
            log_dir: env::var("LOG_DIR").ok().filter(|dir| !dir.trim().is_empty()),
        }
    }

    pub fn sweep_config(&self) -> DetectorResult<SweepConfig> {
        Ok(SweepConfig {
            ladder: CapitalLadder::new(self.ladder_start, self.ladder_step, self.ladder_steps)?,
            max_rounds: self.max_sweep_rounds,
        })
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pair: DEFAULT_PAIR.to_string(),
            ladder_start: DEFAULT_LADDER_START,
            ladder_step: DEFAULT_LADDER_STEP,
            ladder_steps: DEFAULT_LADDER_STEPS,
            max_sweep_rounds: DEFAULT_SWEEP_ROUNDS,
            depth_limit: DEFAULT_DEPTH_LIMIT,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            exchanges: Exchange::ALL.to_vec(),
            log_dir: None,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|s| s.trim().parse().ok())
}

/// Parses a comma-separated exchange list. Unknown names are skipped; an
/// empty result falls back to every exchange.
pub fn parse_exchange_list(list: &str) -> Vec<Exchange> {
    let mut exchanges = Vec::new();
    for name in list.split(',').map(str::trim).filter(|name| !name.is_empty()) {
        match name.parse::<Exchange>() {
            Ok(exchange) if !exchanges.contains(&exchange) => exchanges.push(exchange),
            Ok(_) => {}
            Err(e) => warn!("Ignoring EXCHANGES entry: {}", e),
        }
    }
    if exchanges.is_empty() {
        return Exchange::ALL.to_vec();
    }
    exchanges
}
