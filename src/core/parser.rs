// Turns a raw history log into records in the order they were actually typed
//
// The log lists the newest command first, so everything gets flipped at the end.

use crate::error::{HistoryError, Result};
use crate::models::CommandRecord;
use std::path::Path;

pub struct HistoryParser;

impl HistoryParser {
    /// Parse raw log text into chronological (oldest-first) records
    ///
    /// Blank lines are dropped but still count toward each record's ordinal.
    pub fn parse(content: &str) -> Vec<CommandRecord> {
        let mut records: Vec<CommandRecord> = content
            .split('\n')
            .enumerate()
            .filter_map(|(index, line)| CommandRecord::from_line(index + 1, line))
            .collect();

        // file is newest-first
        records.reverse();

        tracing::info!("Parsed {} commands", records.len());
        records
    }

    /// Read and parse a history file
    ///
    /// # Returns
    /// * `Ok(Vec<CommandRecord>)` - Chronological records
    /// * `Err(HistoryError::Read)` - If the file can't be read. No partial result.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Vec<CommandRecord>> {
        let path = path.as_ref();
        tracing::info!("Reading history file {}", path.display());

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| HistoryError::Read {
                path: path.display().to_string(),
                source,
            })?;

        Ok(Self::parse(&content))
    }
}
