//! One detection run: validate → fetch → normalize → sweep

use reqwest::Client;
use std::fmt;
use tracing::{debug, info, warn, Instrument};
use uuid::Uuid;
use crate::{
    arbitrage::sweep,
    config::{Config, SweepConfig},
    errors::{DetectorError, DetectorResult},
    exchanges::{build_http_client, fetch_all, normalize_all, EndpointCatalog},
    types::{DetectionOutcome, Exchange, Pair, SweepOutcome},
};

/// Run states, logged as they are entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Fetching,
    Normalizing,
    Sweeping,
    Resolved,
    Exhausted,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Fetching => "fetching",
            Phase::Normalizing => "normalizing",
            Phase::Sweeping => "sweeping",
            Phase::Resolved => "resolved",
            Phase::Exhausted => "exhausted",
        };
        f.write_str(name)
    }
}

fn enter(phase: Phase) {
    debug!(phase = %phase, "Detector phase");
}

pub struct ArbitrageDetector {
    client: Client,
    sweep: SweepConfig,
    exchanges: Vec<Exchange>,
    depth_limit: u32,
}

impl ArbitrageDetector {
    pub fn new(config: &Config) -> DetectorResult<Self> {
        Ok(Self {
            client: build_http_client(config.fetch_timeout())?,
            sweep: config.sweep_config()?,
            exchanges: config.exchanges.clone(),
            depth_limit: config.depth_limit,
        })
    }

    pub fn with_sweep_config(mut self, sweep: SweepConfig) -> Self {
        self.sweep = sweep;
        self
    }

    pub fn sweep_config(&self) -> &SweepConfig {
        &self.sweep
    }

    /// Validates `pair` and runs detection against every configured exchange.
    ///
    /// A malformed pair fails before any request is made.
    pub async fn run(&self, pair: &str) -> DetectorResult<DetectionOutcome> {
        let pair: Pair = pair.parse()?;
        let catalog = EndpointCatalog::for_pair(&pair, &self.exchanges, self.depth_limit);
        Ok(self.detect(&pair, &catalog).await)
    }

    /// Fetches every catalog endpoint once and sweeps the resulting snapshot.
    pub async fn detect(&self, pair: &Pair, catalog: &EndpointCatalog) -> DetectionOutcome {
        let span = tracing::info_span!("detect", run_id = %Uuid::new_v4(), pair = %pair);
        async move {
            enter(Phase::Idle);
            info!(exchanges = catalog.len(), "🔍 Scanning depth");

            enter(Phase::Fetching);
            let raw = fetch_all(&self.client, catalog).await;

            enter(Phase::Normalizing);
            let book = normalize_all(pair, &raw);
            if book.is_empty() {
                warn!(
                    "⚠️ {}",
                    DetectorError::NoDataAvailable {
                        pair: pair.to_string()
                    }
                );
                return DetectionOutcome::NoDataAvailable;
            }
            info!(
                exchanges = ?book.exchanges(),
                fetched_at = %book.fetched_at().to_rfc3339(),
                "📚 Canonical book assembled"
            );

            enter(Phase::Sweeping);
            let outcome = sweep(&book, &self.sweep);
            debug!(
                snapshot_age_ms = book.age().num_milliseconds(),
                "Sweep finished on snapshot"
            );
            match outcome {
                SweepOutcome::Exhausted { .. } => enter(Phase::Exhausted),
                _ => enter(Phase::Resolved),
            }
            DetectionOutcome::Swept(outcome)
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_err;

    #[tokio::test]
    async fn malformed_pair_fails_before_fetching() {
        let detector = ArbitrageDetector::new(&Config::default()).unwrap();

        for input in ["BTCUSDT", "BTC_", "_USDT", "BTC-USDT", ""] {
            let err = assert_err!(detector.run(input).await);
            assert!(
                matches!(err, DetectorError::InvalidPairFormat { .. }),
                "{}: {:?}",
                input,
                err
            );
        }
    }

    #[test]
    fn detector_takes_its_sweep_from_config() {
        let config = Config {
            ladder_start: 50,
            ladder_step: 25,
            ladder_steps: 4,
            max_sweep_rounds: 3,
            ..Config::default()
        };
        let detector = ArbitrageDetector::new(&config).unwrap();

        assert_eq!(detector.sweep_config().ladder.start(), 50);
        assert_eq!(detector.sweep_config().ladder.last(), 125);
        assert_eq!(detector.sweep_config().max_rounds, 3);
    }

    #[test]
    fn zero_ladder_is_rejected() {
        let config = Config {
            ladder_step: 0,
            ..Config::default()
        };
        assert!(matches!(
            ArbitrageDetector::new(&config),
            Err(DetectorError::InvalidLadder { .. })
        ));
    }
}
