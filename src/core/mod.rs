/// Core functionality modules
///
/// Turns raw log text into chronological records, splits them into sessions,
/// and sorts them into categories.

pub mod categorizer;
pub mod parser;
pub mod segmenter;

pub use categorizer::{Categorized, Categorizer, Category};
pub use parser::HistoryParser;
pub use segmenter::{SessionSegmenter, RESTART_THRESHOLD, SESSION_TERMINATORS};
