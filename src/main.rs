// history-lens - tells you what you actually do in your terminal
//
// This is the main entry point. Parses CLI args and dispatches to handlers.

use anyhow::{Context, Result};
use history_lens_lib::{
    core::HistoryParser, intelligence::Query, report::ReportRenderer, Analyzer, Config,
    QueryEngine,
};
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    // Grab whatever the user typed
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    let command = &args[1];

    match command.as_str() {
        "analyze" => handle_analyze(&args[2..]).await,
        "query" => handle_query(&args[2..]).await,
        "version" | "-v" | "--version" => {
            println!("history-lens v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "-h" | "--help" => {
            print_usage();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            anyhow::bail!("unknown command '{}'", command)
        }
    }
}

// Logs go to stderr so query JSON on stdout stays clean
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn handle_analyze(args: &[String]) -> Result<()> {
    let config = Config::resolve(args.first().map(String::as_str))?;
    config.log_config();

    let records = HistoryParser::load(&config.history_file).await?;
    let analysis = Analyzer::analyze(&records);

    ReportRenderer::write(&analysis, chrono::Utc::now(), &config.report_file)
        .await
        .with_context(|| format!("writing report to {}", config.report_file.display()))?;

    println!("\nAnalysis complete! Report saved to: {}", config.report_file.display());
    println!("\n=== QUICK SUMMARY ===");
    println!("{}", ReportRenderer::quick_summary(&analysis));

    Ok(())
}

async fn handle_query(args: &[String]) -> Result<()> {
    let config = Config::resolve(args.first().map(String::as_str))?;

    let Some(query_type) = args.get(1) else {
        print_query_usage();
        return Ok(());
    };

    let records = HistoryParser::load(&config.history_file).await?;
    let analysis = Analyzer::analyze(&records);
    let engine = QueryEngine::new(&analysis);

    let result = engine
        .execute(query_type, &args[2..])
        .with_context(|| format!("query '{}' failed", query_type))?;

    println!("{}", result.to_json()?);

    Ok(())
}

fn print_usage() {
    println!(
        r#"history-lens v{} - What do you actually do in your terminal?

USAGE:
    history-lens <COMMAND> [OPTIONS]

COMMANDS:
    analyze [history-file]                 Write a Markdown report next to the history file
    query <history-file> <type> [args...]  Run one query and print JSON
    version                                Show version
    help                                   Show this help

The history file is plain text, one command per line, newest first.
Without a path, $HISTORY_LENS_FILE or ./fish-history-sample.txt is used.
Set $HISTORY_LENS_REPORT to write the report somewhere else.
Set RUST_LOG=debug for more detail.

EXAMPLES:
    history-lens analyze ~/fish-history.txt
    history-lens query fish-history.txt top 15
    history-lens query fish-history.txt search "docker"
"#,
        env!("CARGO_PKG_VERSION")
    );
}

fn print_query_usage() {
    println!("\nUsage: history-lens query <history-file> <query-type> [args...]\n");
    println!("Query Types:");
    for (usage, description) in Query::USAGE {
        println!("  {:<28} - {}", usage, description);
    }
    println!(
        r#"
Examples:
  history-lens query fish-history.txt search "docker"
  history-lens query fish-history.txt top 15
  history-lens query fish-history.txt evolution git
  history-lens query fish-history.txt time-slice 0 10
"#
    );
}
