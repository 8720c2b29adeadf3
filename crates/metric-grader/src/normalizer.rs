//! Metric normalization: payload field -> display text plus raw value.
//!
//! The text is display-only. Classification always runs on the raw number
//! carried next to it, never on the rendered string.

use grading_core::{BigFiveMetric, FundamentalsPayload, Horizon};

/// Text shown for a scalar metric the payload does not provide.
pub const UNDEFINED: &str = "Undefined";

/// Text shown for an unavailable Big Five horizon or a "not computed" value.
pub const PLACEHOLDER: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormat {
    /// `en` digit grouping, at most three fraction digits: `1,234,567.5`
    Grouped,
    /// Two fixed decimals: `45.50`
    Fixed2,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormattedValue {
    Undefined,
    Value { raw: f64, text: String },
}

impl FormattedValue {
    pub fn text(&self) -> &str {
        match self {
            FormattedValue::Undefined => UNDEFINED,
            FormattedValue::Value { text, .. } => text,
        }
    }

    pub fn raw(&self) -> Option<f64> {
        match self {
            FormattedValue::Undefined => None,
            FormattedValue::Value { raw, .. } => Some(*raw),
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, FormattedValue::Undefined)
    }
}

/// Extract `key` from the payload and format it for display.
pub fn normalize(payload: &FundamentalsPayload, key: &str, format: NumberFormat) -> FormattedValue {
    match payload.scalar(key) {
        Some(raw) => FormattedValue::Value {
            raw,
            text: format_number(raw, format),
        },
        None => FormattedValue::Undefined,
    }
}

/// One horizon of a Big Five metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BigFiveCell {
    Value(f64),
    /// Sequence too short (or entry not numeric) for this horizon.
    Placeholder,
}

impl BigFiveCell {
    pub fn text(&self) -> String {
        match self {
            BigFiveCell::Value(v) => format_plain(*v),
            BigFiveCell::Placeholder => PLACEHOLDER.to_string(),
        }
    }
}

/// The four horizon cells of a Big Five metric, `[1yr, 3yr, 5yr, max]`.
pub fn normalize_big_five(payload: &FundamentalsPayload, metric: BigFiveMetric) -> [BigFiveCell; 4] {
    let values = payload.sequence(metric.key());
    Horizon::ALL.map(|h| match values.get(h.index()).copied().flatten() {
        Some(v) => BigFiveCell::Value(v),
        None => BigFiveCell::Placeholder,
    })
}

pub fn format_number(value: f64, format: NumberFormat) -> String {
    match format {
        NumberFormat::Grouped => format_grouped(value),
        NumberFormat::Fixed2 => format!("{:.2}", value),
    }
}

/// `en`-locale grouping with up to three fraction digits, trailing zeros dropped.
pub fn format_grouped(value: f64) -> String {
    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    let rounds_to_zero = int_part.chars().all(|c| c == '0') && frac.is_empty();
    if value < 0.0 && !rounds_to_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Shortest round-trip form: `12`, `12.5`, `-3.25`. Magnitudes from
/// `1e21` up and below `1e-6` switch to exponent form (`1e+21`, `1e-7`).
pub fn format_plain(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let exp = format!("{:e}", value);
        return match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                format!("{}e+{}", mantissa, power)
            }
            _ => exp,
        };
    }
    format!("{}", value)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
