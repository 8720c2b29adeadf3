use anyhow::{bail, Context, Result};
use grading_core::PayloadSource;
use metric_grader::{MetricGrader, SlotBoard};
use std::path::PathBuf;

mod config;
mod output;
mod source;

use config::{GraderConfig, OutputFormat};
use source::FileSource;

const USAGE: &str = "usage: grade <TICKER> | grade --file <payload.json>";

enum Target {
    Ticker(String),
    File(PathBuf),
}

fn parse_args(args: &[String]) -> Result<Target> {
    match args {
        [flag, path] if flag == "--file" || flag == "-f" => Ok(Target::File(PathBuf::from(path))),
        [ticker] if !ticker.starts_with('-') => Ok(Target::Ticker(ticker.clone())),
        _ => bail!(USAGE),
    }
}

fn init_tracing() {
    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
    };
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter())
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = GraderConfig::from_env()?;
    tracing::debug!(
        "Configuration: payload_dir={}, output={:?}, palette={}",
        config.payload_dir.display(),
        config.output,
        config.palette.name
    );

    let args: Vec<String> = std::env::args().skip(1).collect();
    let payload = match parse_args(&args)? {
        Target::Ticker(ticker) => FileSource::new(&config.payload_dir)
            .fetch(&ticker)
            .await
            .with_context(|| format!("failed to load payload for {}", ticker))?,
        Target::File(path) => FileSource::read_path(&path)
            .await
            .with_context(|| format!("failed to load payload from {}", path.display()))?,
    };

    let mut board = SlotBoard::new();
    if let Err(e) = MetricGrader::new().present(&payload, &mut board) {
        for message in board.errors() {
            eprintln!("{}", message);
        }
        if e.is_user_visible() {
            std::process::exit(2);
        }
        return Err(e.into());
    }

    let rendered = match config.output {
        OutputFormat::Table => output::render_table(&board, &config.palette),
        OutputFormat::Json => output::render_json(&board, &config.palette, chrono::Utc::now())
            .context("failed to serialize report")?,
    };
    println!("{}", rendered);

    Ok(())
}
