/// Command searcher with regex and fuzzy matching
///
/// Provides search capabilities for finding commands in the parsed history.

use crate::error::Result;
use crate::models::{CommandRecord, FuzzyHit, SearchHit};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use regex::RegexBuilder;

/// Maximum fuzzy results to return
pub const FUZZY_LIMIT: usize = 20;

/// Handles command searching over the chronological history
pub struct Searcher<'a> {
    records: &'a [CommandRecord],
    matcher: SkimMatcherV2,
}

impl<'a> Searcher<'a> {
    /// Create a new searcher instance
    pub fn new(records: &'a [CommandRecord]) -> Self {
        Self {
            records,
            matcher: SkimMatcherV2::default(),
        }
    }

    /// Search commands with a regular expression
    ///
    /// # Arguments
    /// * `pattern` - Regex to match against each command
    /// * `ignore_case` - Match case-insensitively
    ///
    /// # Returns
    /// * `Ok(Vec<SearchHit>)` - Matching records in chronological order
    /// * `Err(HistoryError::InvalidPattern)` - If the pattern doesn't compile
    pub fn search(&self, pattern: &str, ignore_case: bool) -> Result<Vec<SearchHit>> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(ignore_case)
            .build()
            .inspect_err(|e| tracing::warn!("Rejected search pattern '{}': {}", pattern, e))?;

        let hits: Vec<SearchHit> = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| regex.is_match(&record.command))
            .map(|(index, record)| SearchHit {
                line_number: record.ordinal,
                command: record.command.clone(),
                chronological_position: index + 1,
            })
            .collect();

        tracing::debug!("Pattern '{}' matched {} commands", pattern, hits.len());
        Ok(hits)
    }

    /// Search commands with fuzzy matching
    ///
    /// Results are sorted by score (highest first), ties in chronological order.
    pub fn fuzzy_search(&self, query: &str, limit: usize) -> Vec<FuzzyHit> {
        let mut results: Vec<FuzzyHit> = self
            .records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| {
                self.matcher
                    .fuzzy_match(&record.command, query)
                    .map(|score| FuzzyHit {
                        line_number: record.ordinal,
                        command: record.command.clone(),
                        chronological_position: index + 1,
                        score,
                    })
            })
            .collect();

        // Sort by score (highest first)
        results.sort_by(|a, b| b.score.cmp(&a.score));

        results.truncate(limit);
        results
    }
}
