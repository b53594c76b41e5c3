//! Arbitrage sweep results

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use super::quotes::join_exchanges;
use super::{BuyQuote, SellQuote, TradeSide};

/// One sample of the profit curve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurvePoint {
    pub capital: Decimal,
    pub buy: BuyQuote,
    pub sell: SellQuote,
    /// `sell.proceeds - capital`
    pub profit: Decimal,
}

impl CurvePoint {
    pub fn new(capital: Decimal, buy: BuyQuote, sell: SellQuote) -> Self {
        let profit = sell.proceeds - capital;
        Self {
            capital,
            buy,
            sell,
            profit,
        }
    }

    /// Profit relative to the capital spent.
    pub fn return_on_capital(&self) -> Decimal {
        if self.capital.is_zero() {
            Decimal::ZERO
        } else {
            self.profit / self.capital
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArbitrageResult {
    pub token: String,
    pub capital: Decimal,
    pub buy_exchanges: Vec<super::Exchange>,
    pub sell_exchanges: Vec<super::Exchange>,
    pub quantity: Decimal,
    pub profit: Decimal,
}

impl ArbitrageResult {
    pub fn from_peak(token: &str, peak: &CurvePoint) -> Self {
        Self {
            token: token.to_string(),
            capital: peak.capital,
            buy_exchanges: peak.buy.exchanges.clone(),
            sell_exchanges: peak.sell.exchanges.clone(),
            quantity: peak.buy.quantity,
            profit: peak.profit,
        }
    }
}

impl fmt::Display for ArbitrageResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Using ${} or less, buy {} from {} to {} for ${:.2} profit.",
            self.capital.normalize(),
            self.token,
            join_exchanges(&self.buy_exchanges),
            join_exchanges(&self.sell_exchanges),
            self.profit.round_dp(2),
        )
    }
}

/// Terminal state of one sweep over a canonical book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SweepOutcome {
    /// The first profit peak is positive.
    Opportunity(ArbitrageResult),
    /// The first profit peak is zero or negative.
    NoOpportunity { peak: CurvePoint },
    /// No exchange could fill the next step; `last` is the final computed point.
    Exhausted {
        side: TradeSide,
        last: Option<CurvePoint>,
    },
    /// The curve was still rising when the round limit was reached.
    Inconclusive {
        last: Option<CurvePoint>,
        rounds: u32,
    },
}

/// Result of a full detection run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DetectionOutcome {
    Swept(SweepOutcome),
    /// Every exchange failed or returned nothing usable.
    NoDataAvailable,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Exchange;
    use rust_decimal_macros::dec;

    fn point(capital: Decimal, proceeds: Decimal) -> CurvePoint {
        CurvePoint::new(
            capital,
            BuyQuote {
                exchanges: vec![Exchange::Binance],
                quantity: dec!(1),
            },
            SellQuote {
                exchanges: vec![Exchange::Okx, Exchange::Gate],
                proceeds,
            },
        )
    }

    #[test]
    fn curve_point_profit_is_proceeds_minus_capital() {
        let p = point(dec!(200), dec!(230));
        assert_eq!(p.profit, dec!(30));
        assert_eq!(p.return_on_capital(), dec!(0.15));
    }

    #[test]
    fn result_renders_arbitrage_statement() {
        let result = ArbitrageResult::from_peak("BTC", &point(dec!(300), dec!(312.3456)));
        assert_eq!(
            result.to_string(),
            "Using $300 or less, buy BTC from binance to okx/gate for $12.35 profit."
        );
    }
}
