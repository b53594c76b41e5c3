//! Depth arbitrage detector - Main Entry Point
//!
//! Usage: `depth-arb [PAIR]`, e.g. `depth-arb ETH_USDT`. Falls back to the
//! `PAIR` environment variable.

use anyhow::Result;
use depth_arb_detector::*;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = CONFIG.clone();
    let _logging_guard = utils::setup_logging(&config)?;

    let input = std::env::args().nth(1).unwrap_or_else(|| config.pair.clone());
    let pair: Pair = input.trim().parse()?;

    info!("📈 Depth Arbitrage Detector v{}", env!("CARGO_PKG_VERSION"));
    info!("📋 Configuration:");
    info!("   Pair: {}", pair);
    info!(
        "   Ladder: ${} + ${} x {} levels, up to {} rounds",
        config.ladder_start, config.ladder_step, config.ladder_steps, config.max_sweep_rounds
    );
    info!("   Exchanges: {:?}", config.exchanges);

    let detector = ArbitrageDetector::new(&config)?;
    let outcome = detector.run(&pair.to_string()).await?;

    utils::print_detection_outcome(&pair, &outcome);
    println!("{}", utils::render_outcome(&pair, &outcome));

    Ok(())
}
