/// Main analyzer orchestrator
///
/// Runs the session and category passes once over the parsed history and
/// hands out read-only analyzers for everything else.

use crate::core::{Categorized, Categorizer, Category, SessionSegmenter};
use crate::intelligence::{top_base_commands, FrequencyAnalyzer, PatternDetector, Searcher};
use crate::models::{CategoryCount, CommandRecord, HistoryRange, Session, SessionSummary, Summary};

// Top base commands listed per session
const COMMANDS_PER_SESSION: usize = 3;

/// Main analyzer
pub struct Analyzer;

impl Analyzer {
    /// Run the full pipeline over chronological records
    pub fn analyze(records: &[CommandRecord]) -> HistoryAnalysis<'_> {
        let sessions = SessionSegmenter::segment(records);
        let categories = Categorizer::categorize(records);

        HistoryAnalysis {
            records,
            sessions,
            categories,
        }
    }
}

/// Immutable result of the session and category passes
#[derive(Debug)]
pub struct HistoryAnalysis<'a> {
    records: &'a [CommandRecord],
    sessions: Vec<Session<'a>>,
    categories: Categorized<'a>,
}

impl<'a> HistoryAnalysis<'a> {
    pub fn records(&self) -> &'a [CommandRecord] {
        self.records
    }

    pub fn sessions(&self) -> &[Session<'a>] {
        &self.sessions
    }

    pub fn categories(&self) -> &Categorized<'a> {
        &self.categories
    }

    pub fn frequency(&self) -> FrequencyAnalyzer<'a> {
        FrequencyAnalyzer::new(self.records)
    }

    pub fn patterns(&self) -> PatternDetector<'a> {
        PatternDetector::new(self.records)
    }

    pub fn searcher(&self) -> Searcher<'a> {
        Searcher::new(self.records)
    }

    /// Overview numbers. Safe on an empty history.
    pub fn summary(&self) -> Summary {
        let total_commands = self.records.len();
        let sessions = self.sessions.len();

        let avg_commands_per_session = if sessions == 0 {
            0
        } else {
            (total_commands as f64 / sessions as f64).round() as usize
        };

        let history_range = match (self.records.first(), self.records.last()) {
            (Some(first), Some(last)) => Some(HistoryRange {
                first_line: first.ordinal,
                last_line: last.ordinal,
            }),
            _ => None,
        };

        Summary {
            total_commands,
            unique_commands: self.frequency().unique_commands(),
            sessions,
            avg_commands_per_session,
            history_range,
        }
    }

    /// One summary row per session
    pub fn session_summaries(&self) -> Vec<SessionSummary> {
        self.sessions
            .iter()
            .map(|session| {
                let commands: Vec<&str> = session.commands.iter().map(|r| r.command.as_str()).collect();

                SessionSummary {
                    id: session.id,
                    commands: session.len(),
                    start_index: session.start,
                    end_index: session.end(),
                    ended_with: session.ended_reason().to_string(),
                    top_commands: top_base_commands(&commands, COMMANDS_PER_SESSION),
                }
            })
            .collect()
    }

    /// Record count per category, every category listed
    pub fn category_counts(&self) -> Vec<CategoryCount> {
        Category::ALL
            .iter()
            .map(|category| CategoryCount {
                category: *category,
                count: self.categories.get(category).map_or(0, Vec::len),
            })
            .collect()
    }
}
