/// Error types for history-lens
///
/// This module defines all possible errors that can occur while analyzing a history log.
/// Uses thiserror for ergonomic error handling.

use thiserror::Error;

/// Main error type for history-lens operations
#[derive(Error, Debug)]
pub enum HistoryError {
    /// The history log could not be read. Nothing is analyzed in that case.
    #[error("Failed to read history file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// I/O errors (writing the report, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Search pattern did not compile. Only the failing query is affected.
    #[error("Invalid search pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Query name not recognized by the query engine
    #[error("Unknown query type: {0}")]
    UnknownQuery(String),

    /// A required positional argument was not supplied
    #[error("Missing argument, usage: {0}")]
    MissingArgument(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for history-lens operations
pub type Result<T> = std::result::Result<T, HistoryError>;

/// Convert HistoryError to a user-friendly error message
impl HistoryError {
    pub fn user_message(&self) -> String {
        match self {
            HistoryError::Read { path, source } => {
                format!("History file '{}' could not be read. Details: {}", path, source)
            }
            HistoryError::Io(e) => {
                format!("File system error. Check permissions. Details: {}", e)
            }
            HistoryError::InvalidPattern(e) => {
                format!("That search pattern is not a valid regex. Details: {}", e)
            }
            HistoryError::UnknownQuery(name) => {
                format!("Unknown query type '{}'", name)
            }
            HistoryError::MissingArgument(usage) => {
                format!("Missing argument. Usage: {}", usage)
            }
            HistoryError::Config(msg) => {
                format!("Configuration issue: {}", msg)
            }
            HistoryError::Serialization(e) => {
                format!("Could not format the result. Details: {}", e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_user_messages() {
        let err = HistoryError::UnknownQuery("frobnicate".to_string());
        assert!(err.user_message().contains("frobnicate"));

        let err = HistoryError::MissingArgument("evolution <command>".to_string());
        assert!(err.user_message().contains("evolution <command>"));
    }

    #[test]
    fn test_read_error_display() {
        let err = HistoryError::Read {
            path: "/nope/history.txt".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        let display = format!("{}", err);
        assert!(display.contains("/nope/history.txt"));
        assert!(display.contains("Failed to read"));
    }

    #[test]
    fn test_invalid_pattern_from_regex() {
        let regex_err = regex::Regex::new("(unclosed").unwrap_err();
        let err: HistoryError = regex_err.into();
        assert!(matches!(err, HistoryError::InvalidPattern(_)));
        assert!(format!("{}", err).contains("Invalid search pattern"));
    }
}
