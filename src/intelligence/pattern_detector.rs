// Finds patterns in your command history
//
// Like when you always run "cd" then "git" then "npm" then "git" again.
// Or how often you reached for docker in the first tenth of your history vs the last.

use crate::intelligence::CountAccumulator;
use crate::models::{CommandRecord, EvolutionBucket, ProjectPattern, RankedAggregate};
use std::collections::HashMap;

/// Joins base commands inside a workflow window
pub const WORKFLOW_SEPARATOR: &str = " → ";

// History gets split into this many equal chunks for evolution
const EVOLUTION_CHUNKS: usize = 10;

// Workflows and projects only report the best few
const MAX_PATTERNS: usize = 10;

// How many commands after a "cd" count as "what you did there"
const FOLLOW_ON_COMMANDS: usize = 5;

// Top base commands reported per project directory
const COMMANDS_PER_PROJECT: usize = 3;

/// Read-only pattern queries over the chronological history
pub struct PatternDetector<'a> {
    records: &'a [CommandRecord],
}

impl<'a> PatternDetector<'a> {
    pub fn new(records: &'a [CommandRecord]) -> Self {
        Self { records }
    }

    /// Most common sequences of `window_size` consecutive base commands
    ///
    /// Uses a stride-1 sliding window, so windows overlap. A window of zero finds nothing.
    pub fn workflow_patterns(&self, window_size: usize) -> RankedAggregate {
        if window_size == 0 {
            return Vec::new();
        }

        let mut counts = CountAccumulator::new();
        for window in self.records.windows(window_size) {
            let pattern = window
                .iter()
                .map(|r| r.base_token.as_str())
                .collect::<Vec<_>>()
                .join(WORKFLOW_SEPARATOR);
            counts.add(&pattern);
        }

        tracing::debug!(
            "Found {} distinct workflows of length {}",
            counts.distinct(),
            window_size
        );
        counts.top(MAX_PATTERNS)
    }

    /// How usage of `token` changed over time, in 10 equal chunks
    ///
    /// A record matches when its base command equals `token` or its text contains it.
    /// Records past the last full chunk are ignored. With fewer than 10 records every
    /// bucket reports zero.
    pub fn evolution(&self, token: &str) -> Vec<EvolutionBucket> {
        let chunk_size = self.records.len() / EVOLUTION_CHUNKS;

        (0..EVOLUTION_CHUNKS)
            .map(|i| {
                let start = i * chunk_size;
                let count = self.records[start..start + chunk_size]
                    .iter()
                    .filter(|r| Self::mentions(r, token))
                    .count();

                let percentage = if chunk_size == 0 {
                    0.0
                } else {
                    count as f64 / chunk_size as f64 * 100.0
                };

                EvolutionBucket {
                    chunk: i + 1,
                    chunks: EVOLUTION_CHUNKS,
                    count,
                    percentage,
                }
            })
            .collect()
    }

    fn mentions(record: &CommandRecord, token: &str) -> bool {
        record.base_token == token || record.command.contains(token)
    }

    /// Records between two percentages of the history, as a half-open range
    ///
    /// Bounds are floor(percent / 100 * total). A negative bound counts back from the
    /// end of the history, anything past the end stops at the end. An inverted range
    /// gives an empty slice.
    pub fn time_slice(&self, start_percent: f64, end_percent: f64) -> &'a [CommandRecord] {
        let total = self.records.len();
        let start = Self::percent_index(start_percent, total);
        let end = Self::percent_index(end_percent, total);

        if start >= end {
            return &[];
        }
        &self.records[start..end]
    }

    fn percent_index(percent: f64, total: usize) -> usize {
        let index = (percent / 100.0 * total as f64).floor();
        if index.is_nan() {
            0
        } else if index < 0.0 {
            total.saturating_sub((-index) as usize)
        } else {
            // `as` saturates, min() keeps it inside the history
            (index as usize).min(total)
        }
    }

    /// The `n` most recent commands, newest first
    pub fn recent(&self, n: usize) -> Vec<&'a CommandRecord> {
        self.records.iter().rev().take(n).collect()
    }

    /// Directories you "cd" into most, with what you usually run once there
    ///
    /// Follow-on commands from every visit are pooled per directory.
    pub fn project_patterns(&self) -> Vec<ProjectPattern> {
        struct Visits<'r> {
            directory: &'r str,
            count: usize,
            follow_on: Vec<&'r str>,
        }

        let mut projects: Vec<Visits<'a>> = Vec::new();
        let mut index_of: HashMap<&'a str, usize> = HashMap::new();

        for (index, record) in self.records.iter().enumerate() {
            // bare "cd" has no directory
            if record.base_token != "cd" || record.command.len() <= 2 {
                continue;
            }

            let directory = record
                .command
                .strip_prefix("cd")
                .unwrap_or(record.command.as_str())
                .trim();

            let position = *index_of.entry(directory).or_insert_with(|| {
                projects.push(Visits {
                    directory,
                    count: 0,
                    follow_on: Vec::new(),
                });
                projects.len() - 1
            });

            let end = (index + 1 + FOLLOW_ON_COMMANDS).min(self.records.len());
            let project = &mut projects[position];
            project.count += 1;
            project
                .follow_on
                .extend(self.records[index + 1..end].iter().map(|r| r.command.as_str()));
        }

        // stable: equal visit counts keep first-visit order
        projects.sort_by(|a, b| b.count.cmp(&a.count));

        projects
            .into_iter()
            .take(MAX_PATTERNS)
            .map(|project| ProjectPattern {
                directory: project.directory.to_string(),
                visits: project.count,
                common_commands: top_base_commands(&project.follow_on, COMMANDS_PER_PROJECT),
            })
            .collect()
    }
}

/// Top `n` base commands among a list of command lines
pub fn top_base_commands(commands: &[&str], n: usize) -> RankedAggregate {
    commands
        .iter()
        .filter_map(|cmd| cmd.split_whitespace().next())
        .collect::<CountAccumulator>()
        .top(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RankedEntry;

    fn records(chronological: &[&str]) -> Vec<CommandRecord> {
        chronological
            .iter()
            .enumerate()
            .filter_map(|(i, cmd)| CommandRecord::from_line(chronological.len() - i, cmd))
            .collect()
    }

    fn commands<'r>(records: impl IntoIterator<Item = &'r CommandRecord>) -> Vec<&'r str> {
        records.into_iter().map(|r| r.command.as_str()).collect()
    }

    #[test]
    fn test_workflow_patterns_inclusive_last_window() {
        let records = records(&["git add .", "git commit", "git push"]);
        let detector = PatternDetector::new(&records);

        // the only window of size 3 is the whole history
        assert_eq!(
            detector.workflow_patterns(3),
            vec![RankedEntry::new("git → git → git", 1)]
        );
        assert!(detector.workflow_patterns(4).is_empty());
        assert!(detector.workflow_patterns(0).is_empty());
    }

    #[test]
    fn test_workflow_patterns_counts_overlapping_windows() {
        let records = records(&["cd a", "ls", "cd b", "ls", "cd c", "ls", "vim x"]);
        let detector = PatternDetector::new(&records);

        let patterns = detector.workflow_patterns(2);
        assert_eq!(
            patterns,
            vec![
                RankedEntry::new("cd → ls", 3),
                RankedEntry::new("ls → cd", 2),
                RankedEntry::new("ls → vim", 1),
            ]
        );
    }

    #[test]
    fn test_workflow_patterns_top_ten() {
        let cmds: Vec<String> = (0..30).map(|i| format!("cmd{}", i)).collect();
        let refs: Vec<&str> = cmds.iter().map(|s| s.as_str()).collect();
        let records = records(&refs);
        let detector = PatternDetector::new(&records);

        let patterns = detector.workflow_patterns(1);
        assert_eq!(patterns.len(), 10);
        assert_eq!(patterns[0].key, "cmd0");
    }

    #[test]
    fn test_evolution_buckets() {
        // 23 records: chunk size 2, last 3 are dropped
        let mut cmds = vec!["ls"; 20];
        cmds[0] = "docker ps";
        cmds[1] = "docker build .";
        cmds[19] = "sudo docker images";
        cmds.extend(["docker run", "docker run", "docker run"]);
        let records = records(&cmds);
        let detector = PatternDetector::new(&records);

        let buckets = detector.evolution("docker");
        assert_eq!(buckets.len(), 10);
        assert_eq!(buckets[0].count, 2);
        assert_eq!(buckets[0].percentage, 100.0);
        assert_eq!(buckets[9].count, 1);
        assert_eq!(buckets[9].percentage, 50.0);
        assert_eq!(buckets[9].period(), "10/10");

        let total: usize = buckets.iter().map(|b| b.count).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_evolution_fewer_than_ten_records() {
        let records = records(&["git status", "git push"]);
        let detector = PatternDetector::new(&records);

        let buckets = detector.evolution("git");
        assert_eq!(buckets.len(), 10);
        assert!(buckets.iter().all(|b| b.count == 0 && b.percentage == 0.0));

        assert_eq!(PatternDetector::new(&[]).evolution("git").len(), 10);
    }

    #[test]
    fn test_time_slice() {
        let cmds: Vec<String> = (0..10).map(|i| format!("c{}", i)).collect();
        let refs: Vec<&str> = cmds.iter().map(|s| s.as_str()).collect();
        let records = records(&refs);
        let detector = PatternDetector::new(&records);

        assert_eq!(commands(detector.time_slice(0.0, 30.0)), vec!["c0", "c1", "c2"]);
        assert_eq!(commands(detector.time_slice(95.0, 100.0)), vec!["c9"]);
        assert!(detector.time_slice(50.0, 50.0).is_empty());
        assert!(detector.time_slice(80.0, 20.0).is_empty());
        assert_eq!(detector.time_slice(0.0, 500.0).len(), 10);
    }

    #[test]
    fn test_time_slice_negative_bounds_count_from_end() {
        let cmds: Vec<String> = (0..10).map(|i| format!("c{}", i)).collect();
        let refs: Vec<&str> = cmds.iter().map(|s| s.as_str()).collect();
        let records = records(&refs);
        let detector = PatternDetector::new(&records);

        assert_eq!(
            commands(detector.time_slice(-50.0, 100.0)),
            vec!["c5", "c6", "c7", "c8", "c9"]
        );
        assert_eq!(detector.time_slice(-50.0, 500.0).len(), 5);
        assert_eq!(commands(detector.time_slice(0.0, -80.0)), vec!["c0", "c1"]);
        assert_eq!(detector.time_slice(-500.0, 100.0).len(), 10);
        assert!(detector.time_slice(-20.0, -50.0).is_empty());
    }

    #[test]
    fn test_time_slice_floors() {
        let records = records(&["a", "b", "c"]);
        let detector = PatternDetector::new(&records);

        // floor(0.5 * 3) = 1, floor(0.99 * 3) = 2
        assert_eq!(commands(detector.time_slice(50.0, 99.0)), vec!["b"]);
        assert!(PatternDetector::new(&[]).time_slice(0.0, 100.0).is_empty());
    }

    #[test]
    fn test_recent() {
        let records = records(&["a", "b", "c"]);
        let detector = PatternDetector::new(&records);

        assert_eq!(commands(detector.recent(2)), vec!["c", "b"]);
        assert_eq!(detector.recent(20).len(), 3);
    }

    #[test]
    fn test_project_patterns_pools_visits() {
        let records = records(&[
            "cd app",
            "npm install",
            "npm test",
            "git status",
            "cd ..",
            "ls",
            "cd app",
            "npm run build",
            "git push",
        ]);
        let detector = PatternDetector::new(&records);

        let projects = detector.project_patterns();
        assert_eq!(projects[0].directory, "app");
        assert_eq!(projects[0].visits, 2);
        assert_eq!(
            projects[0].common_commands,
            vec![
                RankedEntry::new("npm", 3),
                RankedEntry::new("git", 2),
                RankedEntry::new("cd", 1),
            ]
        );

        assert_eq!(projects[1].directory, "..");
        assert_eq!(projects[1].visits, 1);
    }

    #[test]
    fn test_project_patterns_skips_bare_cd() {
        let records = records(&["cd", "ls", "cd ~/work", "make"]);
        let detector = PatternDetector::new(&records);

        let projects = detector.project_patterns();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].directory, "~/work");
        assert_eq!(projects[0].common_commands, vec![RankedEntry::new("make", 1)]);
    }

    #[test]
    fn test_project_patterns_at_end_of_history() {
        let records = records(&["ls", "cd last"]);
        let projects = PatternDetector::new(&records).project_patterns();

        assert_eq!(projects[0].visits, 1);
        assert!(projects[0].common_commands.is_empty());
    }
}
