//! Cross-field rules: metrics whose category depends on a peer field, or
//! whose absence has a metric-specific rendering.

use grading_core::Category;

use crate::classifier::Policy;
use crate::normalizer::{BigFiveCell, FormattedValue, PLACEHOLDER, UNDEFINED};
use crate::thresholds::ThresholdTable;

pub const NEGATIVE_CASH_FLOW: &str = "Negative Cash Flow";

/// Text and (optional) category for one slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub color: Option<Category>,
}

impl Cell {
    fn new(text: impl Into<String>, color: Option<Category>) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }
}

/// A Big Five horizon. A missing 1-year value counts against the company;
/// missing longer horizons are just unavailable.
pub fn big_five_cell(index: usize, cell: BigFiveCell, table: &ThresholdTable) -> Category {
    match cell {
        BigFiveCell::Value(v) => table.big_five_policy().classify(v),
        BigFiveCell::Placeholder if index == 0 => Category::Red,
        BigFiveCell::Placeholder => Category::White,
    }
}

/// Debt to equity: lower is better, "not computed" renders as a neutral `-`.
pub fn debt_equity(value: &FormattedValue, table: &ThresholdTable) -> Cell {
    inverted_cell(value, table.debt_equity_policy())
}

/// Years to retire debt. Negative free cash flow means the debt is never
/// paid off, whatever the computed payoff time says.
pub fn debt_payoff(
    free_cash_flow: Option<f64>,
    payoff_time: &FormattedValue,
    table: &ThresholdTable,
) -> Cell {
    if free_cash_flow.map_or(false, |fcf| fcf < 0.0) {
        return Cell::new(NEGATIVE_CASH_FLOW, Some(Category::Red));
    }
    inverted_cell(payoff_time, table.debt_payoff_policy())
}

fn inverted_cell(value: &FormattedValue, policy: Policy) -> Cell {
    match value {
        FormattedValue::Undefined => Cell::new(UNDEFINED, None),
        FormattedValue::Value { raw, .. } if policy.is_sentinel(*raw) => {
            Cell::new(PLACEHOLDER, Some(Category::White))
        }
        FormattedValue::Value { raw, text } => Cell::new(text.clone(), Some(policy.classify(*raw))),
    }
}

/// Current price against the margin of safety price. Without a (non-zero)
/// margin of safety there is nothing to validate the price against.
pub fn current_price_vs_margin(
    margin_of_safety_price: Option<f64>,
    current_price: Option<f64>,
    table: &ThresholdTable,
) -> Category {
    match (margin_of_safety_price, current_price) {
        (Some(margin), Some(price)) if margin != 0.0 => table.margin_policy(margin).classify(price),
        _ => Category::Red,
    }
}

/// Ten cap price: green when the stock trades at or below it.
pub fn ten_cap(ten_cap_price: Option<f64>, current_price: Option<f64>) -> Category {
    match (ten_cap_price, current_price) {
        (Some(ten_cap), Some(price)) if price <= ten_cap => Category::Green,
        _ => Category::Red,
    }
}

/// Payback time is forced red when the upstream could not compute it.
pub fn payback_time(value: Option<f64>, table: &ThresholdTable) -> Category {
    match value {
        Some(v) => table.payback_policy().classify(v),
        None => Category::Red,
    }
}

/// Average volume must clear a price-dependent minimum.
pub fn liquidity(
    average_volume: Option<f64>,
    current_price: Option<f64>,
    table: &ThresholdTable,
) -> Category {
    match average_volume {
        Some(volume) => table.liquidity_policy(current_price).classify(volume),
        None => Category::Red,
    }
}

/// Shares one position may hold: 1% of average volume, rounded half up.
pub fn shares_to_hold(average_volume: Option<f64>, table: &ThresholdTable) -> Option<f64> {
    average_volume.map(|v| (v * table.shares_to_hold_fraction + 0.5).floor())
}
