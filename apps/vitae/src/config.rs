use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable is optional; defaults suit a local editing session.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the persisted document blob.
    pub storage_dir: PathBuf,
    /// Directory the demo binary writes exported artifacts into.
    pub output_dir: PathBuf,
    /// Quiet period after the most recent edit before an export render starts.
    pub debounce: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let debounce_ms = std::env::var("VITAE_DEBOUNCE_MS")
            .unwrap_or_else(|_| "300".to_string())
            .parse::<u64>()
            .context("VITAE_DEBOUNCE_MS must be a whole number of milliseconds")?;

        Ok(Config {
            storage_dir: std::env::var("VITAE_STORAGE_DIR")
                .unwrap_or_else(|_| ".".to_string())
                .into(),
            output_dir: std::env::var("VITAE_OUTPUT_DIR")
                .unwrap_or_else(|_| ".".to_string())
                .into(),
            debounce: Duration::from_millis(debounce_ms),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_defaults() {
        let config = Config::from_env().expect("defaults should always load");
        assert_eq!(config.debounce, Duration::from_millis(300));
        assert_eq!(config.rust_log, "info");
    }
}
