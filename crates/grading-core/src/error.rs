use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradingError {
    /// The payload carried an `error` field. The message is shown verbatim.
    #[error("{0}")]
    Payload(String),

    #[error("Malformed threshold range: expected 3 bounds, got {0}")]
    MalformedRange(usize),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Payload source error: {0}")]
    Source(String),
}

impl GradingError {
    /// Only payload-level errors are meant to reach the user.
    pub fn is_user_visible(&self) -> bool {
        matches!(self, GradingError::Payload(_))
    }
}
