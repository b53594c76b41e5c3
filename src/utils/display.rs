//! Display and printing utilities

use tracing::{info, warn};
use crate::{
    errors::DetectorError,
    types::{DetectionOutcome, Pair, SweepOutcome},
};

/// The human-readable statement for a detection outcome.
pub fn render_outcome(pair: &Pair, outcome: &DetectionOutcome) -> String {
    let sweep = match outcome {
        DetectionOutcome::NoDataAvailable => {
            return DetectorError::NoDataAvailable {
                pair: pair.to_string(),
            }
            .to_string();
        }
        DetectionOutcome::Swept(sweep) => sweep,
    };

    match sweep {
        SweepOutcome::Opportunity(result) => result.to_string(),
        SweepOutcome::NoOpportunity { peak } => format!(
            "No arbitrage opportunity for {}: the best trade uses ${} and earns ${:.2}.",
            pair,
            peak.capital.normalize(),
            peak.profit.round_dp(2),
        ),
        SweepOutcome::Exhausted { side, last } => {
            let reached = match last {
                Some(point) => format!(
                    " after ${} (profit ${:.2})",
                    point.capital.normalize(),
                    point.profit.round_dp(2)
                ),
                None => String::new(),
            };
            format!(
                "Liquidity exhausted for {}: no exchange has enough depth to {}{}.",
                pair, side, reached
            )
        }
        SweepOutcome::Inconclusive { last, rounds } => {
            let reached = last
                .as_ref()
                .map(|point| format!("${}", point.capital.normalize()))
                .unwrap_or_else(|| "no capital level".to_string());
            format!(
                "Inconclusive for {}: profit was still rising at {} after {} ladder rounds.",
                pair, reached, rounds
            )
        }
    }
}

pub fn print_detection_outcome(pair: &Pair, outcome: &DetectionOutcome) {
    let statement = render_outcome(pair, outcome);
    match outcome {
        DetectionOutcome::Swept(SweepOutcome::Opportunity(result)) => {
            warn!("\n🎯 ARBITRAGE OPPORTUNITY");
            warn!("📍 Pair: {}", pair);
            warn!("💰 Capital: ${}", result.capital.normalize());
            warn!("   Quantity: {} {}", result.quantity.round_dp(8).normalize(), result.token);
            warn!("   Profit: ${:.2}", result.profit.round_dp(2));
            warn!("{}", statement);
        }
        DetectionOutcome::Swept(SweepOutcome::NoOpportunity { .. }) => {
            info!("📉 {}", statement);
        }
        _ => {
            warn!("⚠️ {}", statement);
        }
    }
}
