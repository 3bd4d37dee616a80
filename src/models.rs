/// Data models for parsed history and analysis results
///
/// Everything here is plain data. The analysis passes build these once and never mutate them,
/// and the CLI serializes them straight to JSON.

use crate::core::Category;
use serde::Serialize;

/// Sentinel used when a session ended without a recognized terminator command
pub const UNKNOWN_END: &str = "unknown";

/// One non-blank line of the history log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandRecord {
    /// 1-based line number in the log as written (newest first), blank lines included
    pub ordinal: usize,
    pub raw_text: String,
    pub command: String,
    pub base_token: String,
}

impl CommandRecord {
    /// Build a record from an untrimmed line. Returns None for blank lines.
    pub fn from_line(ordinal: usize, line: &str) -> Option<Self> {
        let command = line.trim();
        let base_token = command.split_whitespace().next()?;

        Some(Self {
            ordinal,
            raw_text: line.to_string(),
            command: command.to_string(),
            base_token: base_token.to_string(),
        })
    }

    /// Second whitespace-delimited token, e.g. "status" for "git status"
    pub fn subcommand(&self) -> Option<&str> {
        self.command.split_whitespace().nth(1)
    }
}

/// A contiguous run of records between two boundary events
#[derive(Debug, Clone, PartialEq)]
pub struct Session<'a> {
    /// 1-based creation order
    pub id: usize,
    /// Chronological index of the first record
    pub start: usize,
    pub commands: &'a [CommandRecord],
    /// Command text of the terminator, None when the session ended for another reason
    pub ended_with: Option<&'a str>,
}

impl<'a> Session<'a> {
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Chronological index of the last record (inclusive)
    pub fn end(&self) -> usize {
        self.start + self.commands.len().saturating_sub(1)
    }

    pub fn ended_reason(&self) -> &'a str {
        self.ended_with.unwrap_or(UNKNOWN_END)
    }
}

/// One (key, count) row of a ranked aggregate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub key: String,
    pub count: usize,
}

impl RankedEntry {
    pub fn new(key: impl Into<String>, count: usize) -> Self {
        Self {
            key: key.into(),
            count,
        }
    }
}

/// Non-increasing by count, ties in order of first occurrence
pub type RankedAggregate = Vec<RankedEntry>;

/// Usage of one token within a tenth of the history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvolutionBucket {
    /// 1-based chunk number
    pub chunk: usize,
    pub chunks: usize,
    pub count: usize,
    /// count / chunk size * 100, 0.0 when the chunk size is zero
    pub percentage: f64,
}

impl EvolutionBucket {
    /// Period label such as "3/10"
    pub fn period(&self) -> String {
        format!("{}/{}", self.chunk, self.chunks)
    }
}

/// A record matched by a regex search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub line_number: usize,
    pub command: String,
    /// 1-based position in the chronological sequence
    pub chronological_position: usize,
}

/// A record matched by a fuzzy search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FuzzyHit {
    pub line_number: usize,
    pub command: String,
    pub chronological_position: usize,
    pub score: i64,
}

/// A directory the user keeps coming back to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectPattern {
    pub directory: String,
    pub visits: usize,
    /// Most frequent base commands run right after arriving
    pub common_commands: RankedAggregate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub id: usize,
    pub commands: usize,
    pub start_index: usize,
    pub end_index: usize,
    pub ended_with: String,
    pub top_commands: RankedAggregate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

/// First and last line numbers of the chronological sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistoryRange {
    pub first_line: usize,
    pub last_line: usize,
}

/// Overview numbers for the whole history
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_commands: usize,
    pub unique_commands: usize,
    pub sessions: usize,
    pub avg_commands_per_session: usize,
    pub history_range: Option<HistoryRange>,
}
