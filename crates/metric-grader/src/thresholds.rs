use serde::{Deserialize, Serialize};

use crate::classifier::{Policy, ThresholdRange};

/// Fixed thresholds the grader classifies against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTable {
    /// Big Five growth rates, percent. Higher is better.
    pub big_five: ThresholdRange,
    /// Debt to equity ratio. Lower is better.
    pub debt_equity_ratio: ThresholdRange,
    /// Years to pay debt off from free cash flow. Lower is better.
    pub debt_payoff_time: ThresholdRange,
    pub payback_time: ThresholdRange,
    /// Current price bands as multiples of the margin of safety price.
    pub margin_multipliers: [f64; 3],
    /// Upstream marker for a value that could not be computed.
    pub not_computed: f64,
    /// At or below this price the stricter volume minimum applies.
    pub penny_stock_price: f64,
    pub penny_stock_min_volume: f64,
    pub min_volume: f64,
    /// Fraction of average daily volume one position may take.
    pub shares_to_hold_fraction: f64,
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self {
            big_five: ThresholdRange::new(0.0, 5.0, 10.0),
            debt_equity_ratio: ThresholdRange::new(1.0, 2.0, 3.0),
            debt_payoff_time: ThresholdRange::new(2.0, 3.0, 4.0),
            payback_time: ThresholdRange::new(6.0, 8.0, 10.0),
            margin_multipliers: [1.0, 1.25, 1.5],
            not_computed: -1.0,
            penny_stock_price: 1.0,
            penny_stock_min_volume: 1_000_000.0,
            min_volume: 500_000.0,
            shares_to_hold_fraction: 0.01,
        }
    }
}

impl ThresholdTable {
    pub fn big_five_policy(&self) -> Policy {
        Policy::Ascending(self.big_five)
    }

    pub fn debt_equity_policy(&self) -> Policy {
        Policy::Inverted {
            range: self.debt_equity_ratio,
            sentinel: Some(self.not_computed),
        }
    }

    pub fn debt_payoff_policy(&self) -> Policy {
        Policy::Inverted {
            range: self.debt_payoff_time,
            sentinel: Some(self.not_computed),
        }
    }

    pub fn payback_policy(&self) -> Policy {
        Policy::Ascending(self.payback_time)
    }

    /// Ascending bands `[margin, margin * 1.25, margin * 1.5]` for the current price.
    pub fn margin_policy(&self, margin_of_safety_price: f64) -> Policy {
        Policy::Ascending(ThresholdRange::scaled(
            margin_of_safety_price,
            self.margin_multipliers,
        ))
    }

    /// Minimum acceptable average volume for a stock trading at `current_price`.
    /// An unknown price gets the stricter penny-stock minimum.
    pub fn minimum_volume(&self, current_price: Option<f64>) -> f64 {
        match current_price {
            Some(price) if price > self.penny_stock_price => self.min_volume,
            _ => self.penny_stock_min_volume,
        }
    }

    pub fn liquidity_policy(&self, current_price: Option<f64>) -> Policy {
        Policy::Binary {
            minimum: self.minimum_volume(current_price),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use grading_core::Category;

    #[test]
    fn test_default_ranges() {
        let t = ThresholdTable::default();
        assert_eq!(t.big_five, ThresholdRange::new(0.0, 5.0, 10.0));
        assert_eq!(t.debt_equity_ratio, ThresholdRange::new(1.0, 2.0, 3.0));
        assert_eq!(t.debt_payoff_time, ThresholdRange::new(2.0, 3.0, 4.0));
        assert_eq!(t.payback_time, ThresholdRange::new(6.0, 8.0, 10.0));
    }

    #[test]
    fn test_margin_policy_bands() {
        let t = ThresholdTable::default();
        match t.margin_policy(33.0) {
            Policy::Ascending(r) => {
                assert_relative_eq!(r.low, 33.0);
                assert_relative_eq!(r.mid, 41.25);
                assert_relative_eq!(r.high, 49.5);
            }
            other => panic!("unexpected policy {:?}", other),
        }
    }

    #[test]
    fn test_minimum_volume() {
        let t = ThresholdTable::default();
        assert_eq!(t.minimum_volume(Some(0.5)), 1_000_000.0);
        assert_eq!(t.minimum_volume(Some(1.0)), 1_000_000.0);
        assert_eq!(t.minimum_volume(Some(1.01)), 500_000.0);
        assert_eq!(t.minimum_volume(None), 1_000_000.0);
    }

    #[test]
    fn test_sentinel_policies() {
        let t = ThresholdTable::default();
        assert_eq!(t.debt_equity_policy().classify(-1.0), Category::White);
        assert_eq!(t.debt_payoff_policy().classify(-1.0), Category::White);
        assert_eq!(t.payback_policy().classify(-1.0), Category::Red);
    }
}
