//! Tracing subscriber setup.

use anyhow::{Context, Result};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Sends logs to `path` so they do not corrupt the terminal UI.
pub fn init_file_logging(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized
    Ok(())
}

/// Sends logs to stderr, keeping stdout for command output.
pub fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_filter_is_info() {
        assert_eq!(EnvFilter::new(DEFAULT_FILTER).to_string(), "info");
    }

    #[test]
    fn test_file_logging_creates_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("game.log");
        init_file_logging(&path).expect("Logging init failed");
        assert!(path.exists());

        // Installing another subscriber does not panic.
        init_stderr_logging();
    }

    #[test]
    fn test_file_logging_reports_bad_path() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let err = init_file_logging(&dir.path().join("missing").join("game.log")).unwrap_err();
        assert!(err.to_string().contains("Failed to create log file"));
    }
}
