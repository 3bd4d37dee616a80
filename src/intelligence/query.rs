/// Query engine
///
/// Maps a query name plus positional arguments onto one of the read-only analyses.
/// Results are plain data, the caller decides how to print them.

use crate::error::{HistoryError, Result};
use crate::intelligence::{HistoryAnalysis, FUZZY_LIMIT};
use crate::models::{
    CategoryCount, CommandRecord, EvolutionBucket, FuzzyHit, ProjectPattern, RankedAggregate,
    SearchHit, SessionSummary, Summary,
};
use serde::Serialize;

const DEFAULT_TOP: usize = 10;
const DEFAULT_WINDOW: usize = 5;
const DEFAULT_RECENT: usize = 20;
const DEFAULT_SLICE_START: f64 = 0.0;
const DEFAULT_SLICE_END: f64 = 10.0;

/// A parsed query
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Search { pattern: String },
    Find { query: String },
    Top { n: usize },
    FullCommands { n: usize },
    GitAnalysis,
    Projects,
    Evolution { token: String },
    Workflows { window: usize },
    Sessions,
    Recent { n: usize },
    TimeSlice { start: f64, end: f64 },
    Categories,
    Summary,
}

impl Query {
    /// Every query name with its usage line
    pub const USAGE: &'static [(&'static str, &'static str)] = &[
        ("search <pattern>", "Search for commands matching a regex (case-insensitive)"),
        ("find <query>", "Fuzzy search for commands"),
        ("top [n]", "Show top N base commands (default: 10)"),
        ("full [n]", "Show top N full commands (default: 10)"),
        ("git-analysis", "Analyze git subcommand usage"),
        ("projects", "Show project directories and common commands"),
        ("evolution <command>", "Show how command usage evolved over time"),
        ("workflows [window-size]", "Find common command sequences (default: 5)"),
        ("sessions", "Show session information"),
        ("recent [n]", "Show N most recent commands (default: 20)"),
        ("time-slice <start%> <end%>", "Get commands from a time period"),
        ("categories", "Count commands per category"),
        ("summary", "Show overview statistics"),
    ];

    /// Build a query from its name and positional arguments
    ///
    /// Numeric arguments that don't parse fall back to their defaults.
    pub fn parse(name: &str, args: &[String]) -> Result<Self> {
        let query = match name {
            "search" => Query::Search {
                pattern: required(args, 0, "search <pattern>")?,
            },
            "find" => {
                if args.is_empty() {
                    return Err(HistoryError::MissingArgument("find <query>".to_string()));
                }
                Query::Find {
                    query: args.join(" "),
                }
            }
            "top" => Query::Top {
                n: numeric(args, 0, DEFAULT_TOP),
            },
            "full" => Query::FullCommands {
                n: numeric(args, 0, DEFAULT_TOP),
            },
            "git-analysis" => Query::GitAnalysis,
            "projects" => Query::Projects,
            "evolution" => Query::Evolution {
                token: required(args, 0, "evolution <command>")?,
            },
            "workflows" => Query::Workflows {
                window: numeric(args, 0, DEFAULT_WINDOW),
            },
            "sessions" => Query::Sessions,
            "recent" => Query::Recent {
                n: numeric(args, 0, DEFAULT_RECENT),
            },
            "time-slice" => Query::TimeSlice {
                start: numeric(args, 0, DEFAULT_SLICE_START),
                end: numeric(args, 1, DEFAULT_SLICE_END),
            },
            "categories" => Query::Categories,
            "summary" => Query::Summary,
            other => return Err(HistoryError::UnknownQuery(other.to_string())),
        };

        Ok(query)
    }
}

fn required(args: &[String], index: usize, usage: &str) -> Result<String> {
    args.get(index)
        .cloned()
        .ok_or_else(|| HistoryError::MissingArgument(usage.to_string()))
}

fn numeric<T: std::str::FromStr>(args: &[String], index: usize, default: T) -> T {
    args.get(index)
        .and_then(|s| s.trim().parse::<T>().ok())
        .unwrap_or(default)
}

/// Result of a query. Serializes to the bare payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryResult {
    Hits(Vec<SearchHit>),
    FuzzyHits(Vec<FuzzyHit>),
    Ranked(RankedAggregate),
    Projects(Vec<ProjectPattern>),
    Evolution(Vec<EvolutionBucket>),
    Sessions(Vec<SessionSummary>),
    Records(Vec<CommandRecord>),
    Categories(Vec<CategoryCount>),
    Summary(Summary),
}

impl QueryResult {
    /// Number of rows, 1 for a summary
    pub fn len(&self) -> usize {
        match self {
            QueryResult::Hits(v) => v.len(),
            QueryResult::FuzzyHits(v) => v.len(),
            QueryResult::Ranked(v) => v.len(),
            QueryResult::Projects(v) => v.len(),
            QueryResult::Evolution(v) => v.len(),
            QueryResult::Sessions(v) => v.len(),
            QueryResult::Records(v) => v.len(),
            QueryResult::Categories(v) => v.len(),
            QueryResult::Summary(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pretty-printed JSON, as printed by the CLI
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Dispatches queries against one analyzed history
pub struct QueryEngine<'h, 'a> {
    analysis: &'h HistoryAnalysis<'a>,
}

impl<'h, 'a> QueryEngine<'h, 'a> {
    pub fn new(analysis: &'h HistoryAnalysis<'a>) -> Self {
        Self { analysis }
    }

    /// Parse and run in one go
    pub fn execute(&self, name: &str, args: &[String]) -> Result<QueryResult> {
        let query = Query::parse(name, args)?;
        self.run(&query)
    }

    /// Run a parsed query
    ///
    /// A failing query (bad regex, say) leaves the engine usable for the next one.
    pub fn run(&self, query: &Query) -> Result<QueryResult> {
        tracing::debug!("Running query {:?}", query);

        let result = match query {
            Query::Search { pattern } => {
                QueryResult::Hits(self.analysis.searcher().search(pattern, true)?)
            }
            Query::Find { query } => {
                QueryResult::FuzzyHits(self.analysis.searcher().fuzzy_search(query, FUZZY_LIMIT))
            }
            Query::Top { n } => QueryResult::Ranked(self.analysis.frequency().top_commands(*n)),
            Query::FullCommands { n } => {
                QueryResult::Ranked(self.analysis.frequency().full_command_frequency(*n))
            }
            Query::GitAnalysis => QueryResult::Ranked(self.analysis.frequency().git_subcommands()),
            Query::Projects => QueryResult::Projects(self.analysis.patterns().project_patterns()),
            Query::Evolution { token } => {
                QueryResult::Evolution(self.analysis.patterns().evolution(token))
            }
            Query::Workflows { window } => {
                QueryResult::Ranked(self.analysis.patterns().workflow_patterns(*window))
            }
            Query::Sessions => QueryResult::Sessions(self.analysis.session_summaries()),
            Query::Recent { n } => QueryResult::Records(
                self.analysis.patterns().recent(*n).into_iter().cloned().collect(),
            ),
            Query::TimeSlice { start, end } => {
                QueryResult::Records(self.analysis.patterns().time_slice(*start, *end).to_vec())
            }
            Query::Categories => QueryResult::Categories(self.analysis.category_counts()),
            Query::Summary => QueryResult::Summary(self.analysis.summary()),
        };

        Ok(result)
    }
}
