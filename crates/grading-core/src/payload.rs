use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::GradingError;

/// Fundamentals for one ticker, keyed by metric name.
///
/// Values are either scalars (number, `null`, or the upstream `"null"`
/// string) or, for the Big Five metrics, a short sequence of numbers ordered
/// `[1yr, 3yr, 5yr, max]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FundamentalsPayload {
    fields: Map<String, Value>,
}

impl FundamentalsPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_value(value: Value) -> Result<Self, GradingError> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(GradingError::InvalidPayload(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, GradingError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| GradingError::InvalidPayload(e.to_string()))?;
        Self::from_value(value)
    }

    /// Builder-style insert.
    pub fn with(mut self, key: &str, value: Value) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: Value) {
        self.fields.insert(key.to_string(), value);
    }

    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Numeric value of a scalar field. Absent, `null`, `"null"` and
    /// non-numeric values all read as `None`; non-numeric values are logged.
    pub fn scalar(&self, key: &str) -> Option<f64> {
        self.fields.get(key).and_then(|v| read_number(key, v).value())
    }

    /// Entries of a sequence field, in payload order. A missing or
    /// non-array field reads as an empty sequence; non-numeric entries are
    /// `None`.
    pub fn sequence(&self, key: &str) -> Vec<Option<f64>> {
        match self.fields.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| read_number(key, item).value())
                .collect(),
            Some(other) if !is_null_value(other) => {
                tracing::warn!(
                    "Ignoring {}: expected a sequence, got {}",
                    key,
                    json_kind(other)
                );
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    /// The payload-level error message, if the upstream reported one.
    ///
    /// Any truthy value counts: non-string errors are rendered as JSON.
    pub fn error(&self) -> Option<String> {
        match self.fields.get("error")? {
            Value::String(s) if is_null_marker(s) => None,
            Value::String(s) => Some(s.clone()),
            Value::Null | Value::Bool(false) => None,
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            other => Some(other.to_string()),
        }
    }

    pub fn ticker(&self) -> Option<&str> {
        self.text("ticker")
    }

    pub fn description(&self) -> Option<&str> {
        self.text("description")
    }

    fn text(&self, key: &str) -> Option<&str> {
        match self.fields.get(key) {
            Some(Value::String(s)) if !is_null_marker(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

fn is_null_marker(s: &str) -> bool {
    let trimmed = s.trim();
    trimmed.is_empty() || trimmed == "null"
}

fn is_null_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => is_null_marker(s),
        _ => false,
    }
}

/// Outcome of reading one JSON value as a number.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Reading {
    Missing,
    Number(f64),
    /// Present, but not something a number can be read from.
    Malformed,
}

impl Reading {
    fn value(self) -> Option<f64> {
        match self {
            Reading::Number(v) => Some(v),
            _ => None,
        }
    }
}

fn read_number(key: &str, value: &Value) -> Reading {
    let parsed = match value {
        _ if is_null_value(value) => return Reading::Missing,
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed.filter(|v| v.is_finite()) {
        Some(v) => Reading::Number(v),
        None => {
            tracing::warn!("Ignoring malformed value for {}: {}", key, value);
            Reading::Malformed
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_reads() {
        let payload = FundamentalsPayload::new()
            .with("current_price", json!(45.5))
            .with("sticker_price", json!("null"))
            .with("payback_time", Value::Null)
            .with("total_debt", json!("1234.5"));

        assert_eq!(payload.scalar("current_price"), Some(45.5));
        assert_eq!(payload.scalar("sticker_price"), None);
        assert_eq!(payload.scalar("payback_time"), None);
        assert_eq!(payload.scalar("ten_cap_price"), None);
        assert_eq!(payload.scalar("total_debt"), Some(1234.5));
    }

    #[test]
    fn test_sequence_reads() {
        let payload = FundamentalsPayload::new()
            .with("eps", json!([12.0, 8.5, null]))
            .with("roic", json!(3.0));

        assert_eq!(payload.sequence("eps"), vec![Some(12.0), Some(8.5), None]);
        assert!(payload.sequence("roic").is_empty());
        assert!(payload.sequence("cash").is_empty());
    }

    #[test]
    fn test_passthrough_fields() {
        let payload = FundamentalsPayload::from_json_str(
            r#"{"ticker": "aapl", "description": "null", "error": ""}"#,
        )
        .unwrap();
        assert_eq!(payload.ticker(), Some("aapl"));
        assert_eq!(payload.description(), None);
        assert_eq!(payload.error(), None);
    }

    #[test]
    fn test_error_field() {
        let payload = FundamentalsPayload::from_json_str(r#"{"error": "Ticker not found"}"#).unwrap();
        assert_eq!(payload.error().as_deref(), Some("Ticker not found"));
    }

    #[test]
    fn test_non_string_errors_are_reported() {
        let payload = FundamentalsPayload::new().with("error", json!({"code": 404}));
        assert_eq!(payload.error().as_deref(), Some(r#"{"code":404}"#));

        let payload = FundamentalsPayload::new().with("error", json!(true));
        assert_eq!(payload.error().as_deref(), Some("true"));

        let payload = FundamentalsPayload::new().with("error", json!(500));
        assert_eq!(payload.error().as_deref(), Some("500"));
    }

    #[test]
    fn test_falsy_errors_are_ignored() {
        for value in [json!(null), json!(false), json!(0), json!(""), json!("null")] {
            let payload = FundamentalsPayload::new().with("error", value.clone());
            assert_eq!(payload.error(), None, "error = {}", value);
        }
    }

    #[test]
    fn test_read_number_outcomes() {
        assert_eq!(read_number("k", &json!(12.5)), Reading::Number(12.5));
        assert_eq!(read_number("k", &json!(" 7 ")), Reading::Number(7.0));
        assert_eq!(read_number("k", &json!(null)), Reading::Missing);
        assert_eq!(read_number("k", &json!("null")), Reading::Missing);
        assert_eq!(read_number("k", &json!("")), Reading::Missing);
        assert_eq!(read_number("k", &json!("1,234")), Reading::Malformed);
        assert_eq!(read_number("k", &json!({"v": 1})), Reading::Malformed);
        assert_eq!(read_number("k", &json!([1])), Reading::Malformed);
        assert_eq!(read_number("k", &json!(true)), Reading::Malformed);
    }

    #[test]
    fn test_malformed_values_read_as_missing() {
        let payload = FundamentalsPayload::new()
            .with("total_debt", json!("1,234"))
            .with("eps", json!(12.5))
            .with("sales", json!([10.0, "n/a", {"x": 1}]));

        assert_eq!(payload.scalar("total_debt"), None);
        assert!(payload.sequence("eps").is_empty());
        assert_eq!(payload.sequence("sales"), vec![Some(10.0), None, None]);
    }

    #[test]
    fn test_rejects_non_object() {
        let err = FundamentalsPayload::from_json_str("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, GradingError::InvalidPayload(_)));

        let err = FundamentalsPayload::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, GradingError::InvalidPayload(_)));
    }
}
