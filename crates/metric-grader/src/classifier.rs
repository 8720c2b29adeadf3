//! Threshold classification.
//!
//! A `ThresholdRange` `[low, mid, high]` splits the number line into four
//! buckets: below `low`, `[low, mid)`, `[mid, high)` and `>= high`. The
//! polarity decides which end of that line is good.

use grading_core::{Category, GradingError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRange {
    pub low: f64,
    pub mid: f64,
    pub high: f64,
}

impl ThresholdRange {
    pub const fn new(low: f64, mid: f64, high: f64) -> Self {
        Self { low, mid, high }
    }

    /// Build a range from loose bounds. Anything but exactly three bounds
    /// is a `MalformedRange`.
    pub fn from_slice(bounds: &[f64]) -> Result<Self, GradingError> {
        match bounds {
            [low, mid, high] => Ok(Self::new(*low, *mid, *high)),
            _ => Err(GradingError::MalformedRange(bounds.len())),
        }
    }

    /// `[base * m0, base * m1, base * m2]`
    pub fn scaled(base: f64, multipliers: [f64; 3]) -> Self {
        Self::new(base * multipliers[0], base * multipliers[1], base * multipliers[2])
    }

    /// 0 = below low, 1 = [low, mid), 2 = [mid, high), 3 = at or above high.
    fn bucket(&self, value: f64) -> usize {
        if value >= self.high {
            3
        } else if value >= self.mid {
            2
        } else if value >= self.low {
            1
        } else {
            0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Polarity {
    /// red / orange / yellow / green from low to high
    HigherIsBetter,
    /// green / yellow / orange / red from low to high
    LowerIsBetter,
}

/// Classify `value` against `range`. A value equal to `sentinel` means
/// "not computed" and is always `White`.
pub fn classify(
    value: f64,
    range: &ThresholdRange,
    polarity: Polarity,
    sentinel: Option<f64>,
) -> Category {
    if is_sentinel(value, sentinel) || !value.is_finite() {
        return Category::White;
    }

    const ASCENDING: [Category; 4] = [
        Category::Red,
        Category::Orange,
        Category::Yellow,
        Category::Green,
    ];
    const INVERTED: [Category; 4] = [
        Category::Green,
        Category::Yellow,
        Category::Orange,
        Category::Red,
    ];

    let bucket = range.bucket(value);
    match polarity {
        Polarity::HigherIsBetter => ASCENDING[bucket],
        Polarity::LowerIsBetter => INVERTED[bucket],
    }
}

/// `classify` over loose bounds. Returns `None` (leave the cell alone) when
/// the bounds are not a triple.
pub fn classify_slice(
    value: f64,
    bounds: &[f64],
    polarity: Polarity,
    sentinel: Option<f64>,
) -> Option<Category> {
    match ThresholdRange::from_slice(bounds) {
        Ok(range) => Some(classify(value, &range, polarity, sentinel)),
        Err(e) => {
            tracing::debug!("Skipping classification: {}", e);
            None
        }
    }
}

fn is_sentinel(value: f64, sentinel: Option<f64>) -> bool {
    sentinel.map_or(false, |s| (value - s).abs() < f64::EPSILON)
}

/// Classification policy for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Policy {
    /// Higher is better over a four-bucket range.
    Ascending(ThresholdRange),
    /// Lower is better; `sentinel` marks a value that was not computed.
    Inverted {
        range: ThresholdRange,
        sentinel: Option<f64>,
    },
    /// Two buckets: at or above `minimum` is green, below is red.
    Binary { minimum: f64 },
}

impl Policy {
    pub fn classify(&self, value: f64) -> Category {
        match self {
            Policy::Ascending(range) => classify(value, range, Polarity::HigherIsBetter, None),
            Policy::Inverted { range, sentinel } => {
                classify(value, range, Polarity::LowerIsBetter, *sentinel)
            }
            Policy::Binary { .. } if !value.is_finite() => Category::White,
            Policy::Binary { minimum } => {
                if value >= *minimum {
                    Category::Green
                } else {
                    Category::Red
                }
            }
        }
    }

    /// Whether `value` is this policy's "not computed" marker.
    pub fn is_sentinel(&self, value: f64) -> bool {
        match self {
            Policy::Inverted { sentinel, .. } => is_sentinel(value, *sentinel),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn ranges() -> Vec<ThresholdRange> {
        vec![
            ThresholdRange::new(0.0, 5.0, 10.0),
            ThresholdRange::new(1.0, 2.0, 3.0),
            ThresholdRange::new(2.0, 3.0, 4.0),
            ThresholdRange::new(6.0, 8.0, 10.0),
            ThresholdRange::new(40.0, 50.0, 60.0),
            ThresholdRange::new(-10.0, -2.5, 0.5),
        ]
    }

    #[test]
    fn test_ascending_boundaries() {
        for r in ranges() {
            let c = |v| classify(v, &r, Polarity::HigherIsBetter, None);
            assert_eq!(c(r.high), Category::Green);
            assert_eq!(c(r.high + 100.0), Category::Green);
            assert_eq!(c(r.mid), Category::Yellow);
            assert_eq!(c(r.high - EPS), Category::Yellow);
            assert_eq!(c(r.low), Category::Orange);
            assert_eq!(c(r.mid - EPS), Category::Orange);
            assert_eq!(c(r.low - EPS), Category::Red);
        }
    }

    #[test]
    fn test_non_finite_values_are_white() {
        let r = ThresholdRange::new(1.0, 2.0, 3.0);
        for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(classify(v, &r, Polarity::HigherIsBetter, None), Category::White);
            assert_eq!(classify(v, &r, Polarity::LowerIsBetter, Some(-1.0)), Category::White);
            assert_eq!(Policy::Binary { minimum: 1.0 }.classify(v), Category::White);
        }
    }

    #[test]
    fn test_inverted_boundaries() {
        for r in ranges() {
            let c = |v| classify(v, &r, Polarity::LowerIsBetter, Some(-1.0));
            assert_eq!(c(r.high), Category::Red);
            assert_eq!(c(r.mid), Category::Orange);
            assert_eq!(c(r.low), Category::Yellow);
            if (r.low - EPS - (-1.0)).abs() > f64::EPSILON {
                assert_eq!(c(r.low - EPS), Category::Green);
            }
        }
    }

    #[test]
    fn test_sentinel_is_white() {
        let r = ThresholdRange::new(1.0, 2.0, 3.0);
        assert_eq!(classify(-1.0, &r, Polarity::LowerIsBetter, Some(-1.0)), Category::White);
        // Without a sentinel, -1 is simply a low value.
        assert_eq!(classify(-1.0, &r, Polarity::LowerIsBetter, None), Category::Green);
    }

    #[test]
    fn test_classify_is_idempotent() {
        let r = ThresholdRange::new(0.0, 5.0, 10.0);
        for v in [-3.0, 0.0, 4.99, 5.0, 9.0, 10.0, 42.0] {
            let first = classify(v, &r, Polarity::HigherIsBetter, None);
            let second = classify(v, &r, Polarity::HigherIsBetter, None);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_malformed_range_is_noop() {
        assert_eq!(classify_slice(5.0, &[1.0, 2.0], Polarity::HigherIsBetter, None), None);
        assert_eq!(classify_slice(5.0, &[], Polarity::LowerIsBetter, None), None);
        assert_eq!(
            classify_slice(5.0, &[1.0, 2.0, 3.0, 4.0], Polarity::HigherIsBetter, None),
            None
        );
        assert_eq!(
            classify_slice(5.0, &[0.0, 5.0, 10.0], Polarity::HigherIsBetter, None),
            Some(Category::Yellow)
        );
        assert_eq!(
            ThresholdRange::from_slice(&[1.0]).unwrap_err(),
            GradingError::MalformedRange(1)
        );
    }

    #[test]
    fn test_scaled_range() {
        let r = ThresholdRange::scaled(40.0, [1.0, 1.25, 1.5]);
        assert_eq!(r, ThresholdRange::new(40.0, 50.0, 60.0));
    }

    #[test]
    fn test_binary_policy() {
        let p = Policy::Binary { minimum: 500_000.0 };
        assert_eq!(p.classify(500_000.0), Category::Green);
        assert_eq!(p.classify(499_999.0), Category::Red);
        assert!(!p.is_sentinel(-1.0));
    }

    #[test]
    fn test_policy_dispatch() {
        let r = ThresholdRange::new(2.0, 3.0, 4.0);
        let inverted = Policy::Inverted { range: r, sentinel: Some(-1.0) };
        assert_eq!(inverted.classify(1.0), Category::Green);
        assert_eq!(inverted.classify(3.5), Category::Orange);
        assert_eq!(inverted.classify(-1.0), Category::White);
        assert!(inverted.is_sentinel(-1.0));

        let ascending = Policy::Ascending(r);
        assert_eq!(ascending.classify(1.0), Category::Red);
        assert_eq!(ascending.classify(4.0), Category::Green);
    }
}
