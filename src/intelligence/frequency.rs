/// Frequency analysis
///
/// What do you run the most? Counts base commands, full commands and git subcommands.

use crate::intelligence::CountAccumulator;
use crate::models::{CommandRecord, RankedAggregate};

/// Key used for a bare "git" with no subcommand
const UNKNOWN_SUBCOMMAND: &str = "unknown";

/// Ranked counts over the chronological history
pub struct FrequencyAnalyzer<'a> {
    records: &'a [CommandRecord],
}

impl<'a> FrequencyAnalyzer<'a> {
    pub fn new(records: &'a [CommandRecord]) -> Self {
        Self { records }
    }

    /// Most used base commands ("git", "ls", ...), at most `n` entries
    pub fn top_commands(&self, n: usize) -> RankedAggregate {
        self.records
            .iter()
            .map(|r| r.base_token.as_str())
            .collect::<CountAccumulator>()
            .top(n)
    }

    /// Most repeated full command lines, at most `n` entries
    pub fn full_command_frequency(&self, n: usize) -> RankedAggregate {
        self.records
            .iter()
            .map(|r| r.command.as_str())
            .collect::<CountAccumulator>()
            .top(n)
    }

    /// Number of distinct full command lines
    pub fn unique_commands(&self) -> usize {
        self.records
            .iter()
            .map(|r| r.command.as_str())
            .collect::<CountAccumulator>()
            .distinct()
    }

    /// Breakdown of git subcommands, not truncated
    pub fn git_subcommands(&self) -> RankedAggregate {
        self.records
            .iter()
            .filter(|r| r.base_token == "git")
            .map(|r| r.subcommand().unwrap_or(UNKNOWN_SUBCOMMAND))
            .collect::<CountAccumulator>()
            .into_ranked()
    }

    /// Total number of git invocations
    pub fn git_total(&self) -> usize {
        self.records.iter().filter(|r| r.base_token == "git").count()
    }
}
