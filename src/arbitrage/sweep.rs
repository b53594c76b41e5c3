//! Capital ladder sweep
//!
//! Samples the profit curve at every ladder level, buying on the exchange
//! that yields the most tokens and selling those tokens where they fetch the
//! most USD. The first local maximum of the curve is the answer.

use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;
use crate::{
    config::SweepConfig,
    errors::DetectorError,
    liquidity::{max_buy_quantity, max_sell_proceeds},
    types::{
        ArbitrageResult, BuyQuote, CanonicalBook, CapitalLadder, CurvePoint, SweepOutcome,
        TradeSide,
    },
};

/// Profit samples for one ladder, cut short at the first level that could
/// not be filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfitCurve {
    pub points: Vec<CurvePoint>,
    /// Side that ran out of depth, if the curve was truncated.
    pub exhausted_on: Option<TradeSide>,
}

pub fn build_profit_curve(book: &CanonicalBook, ladder: &CapitalLadder) -> ProfitCurve {
    let mut exhausted_on = None;

    let mut buys: Vec<(Decimal, BuyQuote)> = Vec::new();
    for capital in ladder.levels() {
        match max_buy_quantity(book, capital) {
            Ok(quote) => buys.push((capital, quote)),
            Err(e) => {
                debug!(capital = %capital, "{}", e);
                exhausted_on = Some(TradeSide::Buy);
                break;
            }
        }
    }

    // Walk each distinct quantity once, smallest first. Once one cannot be
    // absorbed no larger one can.
    let quantities: BTreeSet<Decimal> = buys.iter().map(|(_, quote)| quote.quantity).collect();
    let mut sells = BTreeMap::new();
    for quantity in quantities {
        match max_sell_proceeds(book, quantity) {
            Ok(quote) => {
                sells.insert(quantity, quote);
            }
            Err(e) => {
                debug!(quantity = %quantity, "{}", e);
                break;
            }
        }
    }

    let mut points = Vec::with_capacity(buys.len());
    for (capital, buy) in buys {
        let Some(sell) = sells.get(&buy.quantity).cloned() else {
            exhausted_on = Some(TradeSide::Sell);
            break;
        };
        let point = CurvePoint::new(capital, buy, sell);
        debug!(capital = %point.capital, profit = %point.profit, "Sweeping capital level");
        points.push(point);
    }

    ProfitCurve {
        points,
        exhausted_on,
    }
}

/// First point whose successor earns strictly less. `previous` is the last
/// point of the prior ladder, so a downturn across rounds is caught.
pub fn find_peak(previous: Option<&CurvePoint>, points: &[CurvePoint]) -> Option<CurvePoint> {
    let mut candidate = previous;
    for point in points {
        if let Some(best) = candidate {
            if point.profit < best.profit {
                return Some(best.clone());
            }
        }
        candidate = Some(point);
    }
    None
}

/// True when the curve has stopped rising without any point turning a
/// profit, e.g. a locked market where bids meet asks at one price.
pub fn has_flattened_at_a_loss(previous: Option<&CurvePoint>, points: &[CurvePoint]) -> bool {
    let chain: Vec<&CurvePoint> = previous.into_iter().chain(points).collect();
    let stalled = match chain.as_slice() {
        [.., before, last] => last.profit <= before.profit,
        _ => false,
    };
    stalled && chain.iter().all(|point| point.profit <= Decimal::ZERO)
}

fn resolve(token: &str, peak: CurvePoint) -> SweepOutcome {
    if peak.return_on_capital() > Decimal::ZERO {
        SweepOutcome::Opportunity(ArbitrageResult::from_peak(token, &peak))
    } else {
        SweepOutcome::NoOpportunity { peak }
    }
}

/// Sweeps `book` over the configured ladder, advancing it past its last
/// level until the curve turns down or flattens at a loss, a side runs dry,
/// or `max_rounds` ladders have been walked.
pub fn sweep(book: &CanonicalBook, config: &SweepConfig) -> SweepOutcome {
    let token = book.pair().base();
    let mut ladder = config.ladder;
    let mut carried: Option<CurvePoint> = None;
    // First point at the highest profit seen so far
    let mut best: Option<CurvePoint> = None;

    for round in 1..=config.max_rounds {
        debug!(
            round,
            start = ladder.start(),
            last = ladder.last(),
            "Sweeping capital ladder"
        );

        let curve = build_profit_curve(book, &ladder);
        if let Some(peak) = find_peak(carried.as_ref(), &curve.points) {
            debug!(capital = %peak.capital, profit = %peak.profit, "Sweep resolved");
            return resolve(token, peak);
        }

        for point in &curve.points {
            if best.as_ref().is_none_or(|b| point.profit > b.profit) {
                best = Some(point.clone());
            }
        }

        let last = curve.points.last().cloned().or(carried.clone());
        if let Some(side) = curve.exhausted_on {
            let amount = last.as_ref().map(|p| p.capital).unwrap_or_default();
            debug!("Sweep exhausted: {}", DetectorError::LiquidityExhausted { side, amount });
            return SweepOutcome::Exhausted { side, last };
        }

        if has_flattened_at_a_loss(carried.as_ref(), &curve.points) {
            if let Some(peak) = best {
                debug!(capital = %peak.capital, profit = %peak.profit, "Sweep flattened without profit");
                return SweepOutcome::NoOpportunity { peak };
            }
        }

        carried = last;
        ladder = ladder.advanced();
    }

    SweepOutcome::Inconclusive {
        last: carried,
        rounds: config.max_rounds,
    }
}
