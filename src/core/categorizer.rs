/// Command categorization
///
/// Sorts every record into one of a fixed set of categories based on its base command.

use crate::models::CommandRecord;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Command category, declared in lookup order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    VersionControl,
    FileOperations,
    TextProcessing,
    Development,
    PackageManagement,
    System,
    Network,
    Editors,
    TerminalSession,
    Archives,
    Docker,
    Other,
}

impl Category {
    /// All categories in declaration (= lookup) order
    pub const ALL: [Category; 12] = [
        Category::VersionControl,
        Category::FileOperations,
        Category::TextProcessing,
        Category::Development,
        Category::PackageManagement,
        Category::System,
        Category::Network,
        Category::Editors,
        Category::TerminalSession,
        Category::Archives,
        Category::Docker,
        Category::Other,
    ];

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Category::VersionControl => "Version Control",
            Category::FileOperations => "File Operations",
            Category::TextProcessing => "Text Processing",
            Category::Development => "Development",
            Category::PackageManagement => "Package Management",
            Category::System => "System",
            Category::Network => "Network",
            Category::Editors => "Editors",
            Category::TerminalSession => "Terminal/Session",
            Category::Archives => "Archives",
            Category::Docker => "Docker",
            Category::Other => "Other",
        }
    }

    /// Base commands belonging to this category
    pub fn tokens(&self) -> &'static [&'static str] {
        match self {
            Category::VersionControl => &["git", "hg", "svn"],
            Category::FileOperations => &[
                "ls", "cd", "cp", "mv", "rm", "mkdir", "rmdir", "find", "fd", "locate",
            ],
            Category::TextProcessing => &[
                "more", "less", "cat", "head", "tail", "grep", "sed", "awk", "sort", "uniq", "wc",
            ],
            Category::Development => &[
                "npm", "node", "python", "python3", "make", "cargo", "go", "javac", "gcc",
            ],
            Category::PackageManagement => &["brew", "apt", "yum", "pip", "gem"],
            Category::System => &[
                "ps", "top", "htop", "kill", "sudo", "chmod", "chown", "df", "du",
            ],
            Category::Network => &["curl", "wget", "ssh", "scp", "ping", "dig", "nslookup"],
            Category::Editors => &["vim", "nano", "emacs", "code", "bbedit", "subl"],
            Category::TerminalSession => &["tmux", "screen", "exit", "logout", "clear"],
            Category::Archives => &["tar", "zip", "unzip", "gzip", "gunzip"],
            Category::Docker => &["docker", "docker-compose"],
            Category::Other => &[],
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Records grouped by category. Every category is present, iteration follows declaration order.
pub type Categorized<'a> = BTreeMap<Category, Vec<&'a CommandRecord>>;

pub struct Categorizer;

impl Categorizer {
    /// Category of a single record. First matching category wins.
    pub fn categorize_record(record: &CommandRecord) -> Category {
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.tokens().contains(&record.base_token.as_str()))
            .unwrap_or(Category::Other)
    }

    /// Group all records by category, keeping chronological order inside each group
    pub fn categorize(records: &[CommandRecord]) -> Categorized<'_> {
        let mut categorized: Categorized<'_> =
            Category::ALL.iter().map(|c| (*c, Vec::new())).collect();

        for record in records {
            categorized
                .entry(Self::categorize_record(record))
                .or_default()
                .push(record);
        }

        tracing::info!("Commands categorized");
        categorized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(cmd: &str) -> CommandRecord {
        CommandRecord::from_line(1, cmd).unwrap()
    }

    #[test]
    fn test_categorize_record() {
        assert_eq!(Categorizer::categorize_record(&record("git push")), Category::VersionControl);
        assert_eq!(Categorizer::categorize_record(&record("cd ~/src")), Category::FileOperations);
        assert_eq!(Categorizer::categorize_record(&record("docker-compose up")), Category::Docker);
        assert_eq!(Categorizer::categorize_record(&record("exit")), Category::TerminalSession);
        assert_eq!(Categorizer::categorize_record(&record("kubectl get pods")), Category::Other);
    }

    #[test]
    fn test_matches_base_token_only() {
        // "gitk" is not "git"
        assert_eq!(Categorizer::categorize_record(&record("gitk --all")), Category::Other);
        assert_eq!(Categorizer::categorize_record(&record("sudo git pull")), Category::System);
    }

    #[test]
    fn test_categorize_partitions_records() {
        let records: Vec<CommandRecord> = ["git status", "ls", "vim a", "git push", "htop", "zz"]
            .iter()
            .map(|c| record(c))
            .collect();

        let categorized = Categorizer::categorize(&records);

        assert_eq!(categorized.len(), Category::ALL.len());
        let total: usize = categorized.values().map(|v| v.len()).sum();
        assert_eq!(total, records.len());

        let git: Vec<&str> = categorized[&Category::VersionControl]
            .iter()
            .map(|r| r.command.as_str())
            .collect();
        assert_eq!(git, vec!["git status", "git push"]);
        assert_eq!(categorized[&Category::Other].len(), 1);
        assert!(categorized[&Category::Archives].is_empty());
    }

    #[test]
    fn test_iteration_follows_declaration_order() {
        let categorized = Categorizer::categorize(&[]);
        let order: Vec<Category> = categorized.keys().copied().collect();
        assert_eq!(order, Category::ALL.to_vec());
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(Category::TerminalSession.to_string(), "Terminal/Session");
        assert_eq!(
            serde_json::to_string(&Category::PackageManagement).unwrap(),
            "\"Package Management\""
        );
    }
}
