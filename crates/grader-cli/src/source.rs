use async_trait::async_trait;
use grading_core::{FundamentalsPayload, GradingError, PayloadSource};
use std::path::{Path, PathBuf};

/// Reads payloads saved as `<dir>/<TICKER>.json`.
pub struct FileSource {
    dir: PathBuf,
}

impl FileSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, ticker: &str) -> PathBuf {
        self.dir.join(format!("{}.json", ticker.trim().to_uppercase()))
    }

    pub async fn read_path(path: &Path) -> Result<FundamentalsPayload, GradingError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GradingError::Source(format!("{}: {}", path.display(), e)))?;
        FundamentalsPayload::from_json_str(&raw)
    }
}

#[async_trait]
impl PayloadSource for FileSource {
    async fn fetch(&self, ticker: &str) -> Result<FundamentalsPayload, GradingError> {
        if ticker.trim().is_empty() {
            return Err(GradingError::Source("empty ticker symbol".to_string()));
        }
        let path = self.path_for(ticker);
        tracing::debug!("Loading payload for {} from {}", ticker, path.display());
        Self::read_path(&path).await
    }
}
