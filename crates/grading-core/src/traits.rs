use async_trait::async_trait;

use crate::{Category, FundamentalsPayload, GradingError};

/// Where graded values end up: named slots that accept text and a category.
pub trait DisplaySurface {
    fn write_text(&mut self, slot: &str, text: &str);

    fn write_color(&mut self, slot: &str, category: Category);

    /// Surface a payload-level error to the user.
    fn show_error(&mut self, message: &str);

    /// Page title update for the graded ticker.
    fn set_title(&mut self, _title: &str) {}
}

/// Source of fundamentals payloads (the HTTP collaborator in production).
#[async_trait]
pub trait PayloadSource: Send + Sync {
    async fn fetch(&self, ticker: &str) -> Result<FundamentalsPayload, GradingError>;
}
