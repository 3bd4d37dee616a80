/// Intelligence module
///
/// Handles frequency rankings, pattern mining and ad hoc queries over the parsed history.

pub mod analyzer;
pub mod frequency;
pub mod pattern_detector;
pub mod query;
pub mod ranking;
pub mod searcher;

pub use analyzer::{Analyzer, HistoryAnalysis};
pub use frequency::FrequencyAnalyzer;
pub use pattern_detector::{top_base_commands, PatternDetector, WORKFLOW_SEPARATOR};
pub use query::{Query, QueryEngine, QueryResult};
pub use ranking::CountAccumulator;
pub use searcher::{Searcher, FUZZY_LIMIT};
