use anyhow::{bail, Context, Result};
use grading_core::Palette;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => bail!("unknown output format '{}' (expected table or json)", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GraderConfig {
    pub payload_dir: PathBuf,        // directory of <TICKER>.json files
    pub output: OutputFormat,        // table | json
    pub palette: Palette,            // classic | high-contrast
}

impl GraderConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let palette_name = lookup("GRADER_PALETTE").unwrap_or_else(|| "classic".to_string());
        let config = Self {
            payload_dir: PathBuf::from(
                lookup("GRADER_PAYLOAD_DIR").unwrap_or_else(|| ".".to_string()),
            ),
            output: lookup("GRADER_OUTPUT")
                .unwrap_or_else(|| "table".to_string())
                .parse()
                .context("GRADER_OUTPUT is invalid")?,
            palette: Palette::by_name(&palette_name)
                .with_context(|| format!("GRADER_PALETTE '{}' is not a known palette", palette_name))?,
        };

        Ok(config)
    }
}
