/// Markdown report rendering
///
/// Turns an analyzed history into the "Fish History Analysis Report" document.
/// `render` is pure formatting, `write` puts the result on disk.

use crate::error::Result;
use crate::intelligence::HistoryAnalysis;
use chrono::{DateTime, Utc};
use std::fmt::Write;
use std::path::Path;

const TOP_COMMANDS: usize = 15;
const TOP_FULL_COMMANDS: usize = 10;
const TOP_GIT_SUBCOMMANDS: usize = 10;
const SESSIONS_SHOWN: usize = 5;
const MAX_COMMAND_WIDTH: usize = 60;

pub struct ReportRenderer;

impl ReportRenderer {
    /// Render the full report
    pub fn render(analysis: &HistoryAnalysis<'_>, generated_at: DateTime<Utc>) -> String {
        tracing::info!("Generating analysis report");

        let mut report = String::new();
        // writing to a String can't fail
        let _ = Self::write_report(&mut report, analysis, generated_at);
        report
    }

    /// Render the report and write it to `path`, replacing any previous report
    pub async fn write(
        analysis: &HistoryAnalysis<'_>,
        generated_at: DateTime<Utc>,
        path: &Path,
    ) -> Result<()> {
        let report = Self::render(analysis, generated_at);
        tokio::fs::write(path, report).await?;

        tracing::info!("Report written to {}", path.display());
        Ok(())
    }

    fn write_report(
        out: &mut String,
        analysis: &HistoryAnalysis<'_>,
        generated_at: DateTime<Utc>,
    ) -> std::fmt::Result {
        let summary = analysis.summary();
        let total = summary.total_commands;
        let frequency = analysis.frequency();
        let top_commands = frequency.top_commands(TOP_COMMANDS);

        writeln!(out, "# Fish History Analysis Report")?;
        writeln!(out, "Generated: {}", generated_at.to_rfc3339())?;
        writeln!(out)?;
        writeln!(out, "## Overview")?;
        writeln!(out, "- **Total Commands**: {}", group_thousands(total))?;
        writeln!(out, "- **Detected Sessions**: {}", summary.sessions)?;
        writeln!(
            out,
            "- **Average Commands per Session**: {}",
            summary.avg_commands_per_session
        )?;
        match summary.history_range {
            Some(range) => writeln!(
                out,
                "- **History Range**: Line {} to {}",
                range.first_line, range.last_line
            )?,
            None => writeln!(out, "- **History Range**: empty")?,
        }
        writeln!(out)?;

        writeln!(out, "## Top {} Commands by Frequency", top_commands.len())?;
        writeln!(out, "| Rank | Command | Count | Percentage |")?;
        writeln!(out, "|------|---------|-------|------------|")?;
        for (index, entry) in top_commands.iter().enumerate() {
            writeln!(
                out,
                "| {} | `{}` | {} | {:.1}% |",
                index + 1,
                entry.key,
                entry.count,
                percent(entry.count, total)
            )?;
        }
        writeln!(out)?;

        writeln!(out, "## Commands by Category")?;
        for category in analysis.category_counts() {
            if category.count > 0 {
                writeln!(
                    out,
                    "- **{}**: {} commands ({:.1}%)",
                    category.category,
                    category.count,
                    percent(category.count, total)
                )?;
            }
        }
        writeln!(out)?;

        writeln!(out, "## Git Usage Analysis")?;
        writeln!(
            out,
            "Git commands represent {:.1}% of all commands.",
            percent(frequency.git_total(), total)
        )?;
        writeln!(out)?;
        writeln!(out, "### Top Git Subcommands")?;
        writeln!(out, "| Subcommand | Count |")?;
        writeln!(out, "|------------|-------|")?;
        for entry in frequency.git_subcommands().iter().take(TOP_GIT_SUBCOMMANDS) {
            writeln!(out, "| `git {}` | {} |", entry.key, entry.count)?;
        }
        writeln!(out)?;

        writeln!(out, "## Most Repeated Full Commands")?;
        writeln!(out, "| Command | Count |")?;
        writeln!(out, "|---------|-------|")?;
        for entry in frequency.full_command_frequency(TOP_FULL_COMMANDS) {
            writeln!(out, "| `{}` | {} |", shorten(&entry.key), entry.count)?;
        }
        writeln!(out)?;

        writeln!(out, "## Session Analysis")?;
        for session in analysis.sessions().iter().take(SESSIONS_SHOWN) {
            writeln!(out, "### Session {} (Recent Activity)", session.id)?;
            writeln!(out, "- Commands: {}", session.len())?;
            if let (Some(first), Some(last)) = (session.commands.first(), session.commands.last()) {
                writeln!(out, "- Line range: {} - {}", first.ordinal, last.ordinal)?;
            }
            writeln!(out, "- Ended with: `{}`", session.ended_reason())?;
            writeln!(out)?;
        }

        Ok(())
    }

    /// Few-line console summary printed after the report is written
    pub fn quick_summary(analysis: &HistoryAnalysis<'_>) -> String {
        let summary = analysis.summary();
        let top = analysis
            .frequency()
            .top_commands(1)
            .first()
            .map(|entry| format!("{} ({} times)", entry.key, entry.count))
            .unwrap_or_else(|| "none".to_string());

        format!(
            "Total commands: {}\nSessions detected: {}\nTop command: {}",
            group_thousands(summary.total_commands),
            summary.sessions,
            top
        )
    }
}

/// count / total * 100, 0 for an empty history
fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

fn shorten(command: &str) -> String {
    if command.chars().count() > MAX_COMMAND_WIDTH {
        let cut: String = command.chars().take(MAX_COMMAND_WIDTH).collect();
        format!("{}...", cut)
    } else {
        command.to_string()
    }
}

/// 12345 -> "12,345"
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::HistoryParser;
    use crate::error::HistoryError;
    use crate::intelligence::Analyzer;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 25, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_render_sample() {
        let records =
            HistoryParser::parse("exit\ngit commit -m \"x\"\ngit status\ncd project\nls");
        let analysis = Analyzer::analyze(&records);

        let report = ReportRenderer::render(&analysis, generated_at());

        assert!(report.starts_with("# Fish History Analysis Report\n"));
        assert!(report.contains("Generated: 2025-11-25T12:00:00+00:00"));
        assert!(report.contains("- **Total Commands**: 5"));
        assert!(report.contains("- **History Range**: Line 5 to 1"));
        assert!(report.contains("## Top 4 Commands by Frequency"));
        assert!(report.contains("| 1 | `git` | 2 | 40.0% |"));
        assert!(report.contains("- **Version Control**: 2 commands (40.0%)"));
        assert!(!report.contains("**Docker**"));
        assert!(report.contains("Git commands represent 40.0% of all commands."));
        assert!(report.contains("| `git status` | 1 |"));
        assert!(report.contains("### Session 1 (Recent Activity)"));
        assert!(report.contains("- Ended with: `exit`"));
    }

    #[test]
    fn test_render_empty_history() {
        let records = HistoryParser::parse("");
        let analysis = Analyzer::analyze(&records);

        let report = ReportRenderer::render(&analysis, generated_at());
        assert!(report.contains("- **Total Commands**: 0"));
        assert!(report.contains("- **History Range**: empty"));
        assert!(report.contains("Git commands represent 0.0% of all commands."));
        assert!(!report.contains("### Session"));

        let quick = ReportRenderer::quick_summary(&analysis);
        assert!(quick.contains("Top command: none"));
    }

    #[tokio::test]
    async fn test_load_analyze_and_write_report() {
        let temp_dir = TempDir::new().unwrap();
        let history = temp_dir.path().join("fish-history.txt");
        std::fs::write(&history, "exit\ngit push\n\ngit status\ncd project\nls\n").unwrap();

        let records = HistoryParser::load(&history).await.unwrap();
        let analysis = Analyzer::analyze(&records);

        let report_path = temp_dir.path().join("fish-history-analysis.md");
        ReportRenderer::write(&analysis, generated_at(), &report_path)
            .await
            .unwrap();

        let written = std::fs::read_to_string(&report_path).unwrap();
        assert_eq!(written, ReportRenderer::render(&analysis, generated_at()));
        assert!(written.contains("- **Total Commands**: 5"));
        assert!(written.contains("- **History Range**: Line 6 to 1"));
        assert!(written.contains("| `git push` | 1 |"));
    }

    #[tokio::test]
    async fn test_write_report_to_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let records = HistoryParser::parse("ls");
        let analysis = Analyzer::analyze(&records);

        let path = temp_dir.path().join("no-such-dir").join("report.md");
        let err = ReportRenderer::write(&analysis, generated_at(), &path)
            .await
            .unwrap_err();

        assert!(matches!(err, HistoryError::Io(_)));
        assert!(err.user_message().contains("File system error"));
    }

    #[test]
    fn test_long_commands_are_shortened() {
        let long = format!("echo {}", "x".repeat(80));
        let shortened = shorten(&long);
        assert_eq!(shortened.chars().count(), MAX_COMMAND_WIDTH + 3);
        assert!(shortened.ends_with("..."));
        assert_eq!(shorten("ls -la"), "ls -la");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
