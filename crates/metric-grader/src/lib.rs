//! Metric Grader
//!
//! Turns a fundamentals payload into display-slot writes: every metric is
//! normalized into display text, classified into a color category against
//! fixed thresholds, and replayed onto a `DisplaySurface`.

pub mod classifier;
pub mod grader;
pub mod normalizer;
pub mod rules;
pub mod surface;
pub mod thresholds;


pub use classifier::{classify, classify_slice, Polarity, Policy, ThresholdRange};
pub use grader::{GradeSheet, MetricGrader, SlotUpdate, TITLE_BASE};
pub use normalizer::{
    format_grouped, format_number, format_plain, normalize, normalize_big_five, BigFiveCell,
    FormattedValue, NumberFormat, PLACEHOLDER, UNDEFINED,
};
pub use surface::{SlotBoard, SlotState};
pub use thresholds::ThresholdTable;
