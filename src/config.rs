/// Configuration for history-lens
///
/// Figures out which history file to read and where the report goes.
/// CLI argument wins, then environment, then the built-in default.

use crate::error::{HistoryError, Result};
use std::env;
use std::path::{Path, PathBuf};

/// History file used when nothing else is configured
pub const DEFAULT_HISTORY_FILE: &str = "./fish-history-sample.txt";

/// Report file name, written next to the history file
pub const REPORT_FILE_NAME: &str = "fish-history-analysis.md";

/// Env var overriding the history file
pub const HISTORY_FILE_ENV: &str = "HISTORY_LENS_FILE";

/// Env var overriding the report path
pub const REPORT_FILE_ENV: &str = "HISTORY_LENS_REPORT";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub history_file: PathBuf,
    pub report_file: PathBuf,
}

impl Config {
    /// Resolve configuration from a CLI argument and the environment
    pub fn resolve(cli_history: Option<&str>) -> Result<Self> {
        let env_history = env::var(HISTORY_FILE_ENV).ok();
        let env_report = env::var(REPORT_FILE_ENV).ok();

        Self::resolve_with(cli_history, env_history.as_deref(), env_report.as_deref())
    }

    /// Same as `resolve`, with the environment passed in
    pub fn resolve_with(
        cli_history: Option<&str>,
        env_history: Option<&str>,
        env_report: Option<&str>,
    ) -> Result<Self> {
        let history = cli_history
            .or(env_history)
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(DEFAULT_HISTORY_FILE);
        let history_file = expand_home(history)?;

        let report_file = match env_report.filter(|p| !p.trim().is_empty()) {
            Some(report) => expand_home(report)?,
            None => default_report_path(&history_file),
        };

        Ok(Self {
            history_file,
            report_file,
        })
    }

    pub fn log_config(&self) {
        tracing::debug!("History file: {}", self.history_file.display());
        tracing::debug!("Report file: {}", self.report_file.display());
    }
}

/// Expand a leading `~` to the home directory
fn expand_home(path: &str) -> Result<PathBuf> {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return Ok(PathBuf::from(path)),
    };

    let home = dirs::home_dir().ok_or_else(|| {
        HistoryError::Config("Could not determine home directory".to_string())
    })?;

    Ok(if rest.is_empty() { home } else { home.join(rest) })
}

fn default_report_path(history_file: &Path) -> PathBuf {
    history_file
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(REPORT_FILE_NAME)
}
