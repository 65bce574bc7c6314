//! sqlscope application binary - composition root.
//!
//! Ties the crates together into an interactive terminal client:
//! 1. Load configuration from TOML
//! 2. Initialize tracing
//! 3. Build the gateway (HTTP, or the canned demo backend)
//! 4. Drive the session from a line-based REPL

use std::path::PathBuf;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use sqlscope_chat::{CurrentView, Session};
use sqlscope_core::{MessageId, SqlscopeConfig};
use sqlscope_gateway::{DemoGateway, HttpGateway, QueryBackend};
use sqlscope_viz::{
    BindOptions, ChartSpec, ClipboardWrite, ExportError, HistoryEntry, HistoryPanel,
    TableProjection, NO_DATA_PLACEHOLDER,
};

/// Conversational SQL visualization client.
#[derive(Debug, Parser)]
#[command(name = "sqlscope", version)]
struct Args {
    /// Path to the configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Backend base URL, overriding the configuration.
    #[arg(long)]
    base_url: Option<String>,

    /// Use the canned demo backend instead of HTTP.
    #[arg(long)]
    demo: bool,
}

/// Default config location: `~/.sqlscope/config.toml`.
fn config_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".sqlscope").join("config.toml")
}

/// System clipboard behind the viz capability seam.
struct SystemClipboard(arboard::Clipboard);

impl SystemClipboard {
    fn new() -> Result<Self, ExportError> {
        arboard::Clipboard::new()
            .map(Self)
            .map_err(|e| ExportError::Clipboard(e.to_string()))
    }
}

impl ClipboardWrite for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ExportError> {
        self.0
            .set_text(text.to_string())
            .map_err(|e| ExportError::Clipboard(e.to_string()))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config_file = args.config.clone().unwrap_or_else(config_path);
    let mut config = SqlscopeConfig::load_or_default(&config_file);
    if let Some(base_url) = &args.base_url {
        config.backend.base_url = base_url.clone();
    }
    if args.demo {
        config.backend.demo_mode = true;
    }

    // Tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.general.log_level)),
        )
        .init();

    tracing::info!("Starting sqlscope v{}", env!("CARGO_PKG_VERSION"));

    let bind_options = BindOptions::from(&config.chart);
    if config.backend.demo_mode {
        tracing::info!("Demo backend active");
        let gateway = DemoGateway::new(config.backend.demo_delay_ms);
        repl(Session::with_bind_options(gateway, bind_options)).await?;
    } else {
        tracing::info!(base_url = %config.backend.base_url, "HTTP backend active");
        let gateway = HttpGateway::new(&config.backend.base_url);
        repl(Session::with_bind_options(gateway, bind_options)).await?;
    }

    Ok(())
}

const HELP: &str = "\
Type a question to translate it into SQL.
  /run <id> [sql]    run a draft (optionally with edited SQL)
  /edit <id> <sql>   edit a draft without running it
  /history           list archived results (folded by default)
  /show <n>          toggle one history entry open or closed
  /copy              copy the current SQL to the clipboard
  /health            probe the backend
  /help              this text
  /quit              exit";

async fn repl<G: QueryBackend>(mut session: Session<G>) -> std::io::Result<()> {
    let mut panel = HistoryPanel::new();
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout.write_all(b"sqlscope - ask a question, get a chart. /help for commands.\n> ").await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line.split_whitespace().next() {
            Some("/quit") | Some("/q") => break,
            Some("/help") => println!("{}", HELP),
            Some("/health") => {
                if session.health().await {
                    println!("backend is healthy");
                } else {
                    println!("backend unreachable (see logs)");
                }
            }
            Some("/run") => {
                let mut parts = line.splitn(3, char::is_whitespace);
                parts.next();
                match parts.next().and_then(parse_id) {
                    Some(id) => {
                        let text = match parts.next() {
                            Some(sql) => sql.to_string(),
                            None => match session.store().get(id) {
                                Some(message) => message.text.clone(),
                                None => String::new(),
                            },
                        };
                        if session.run(id, &text).await {
                            panel.sync(session.history().len());
                            if let Some(view) = session.current() {
                                print_current(view);
                            }
                        } else {
                            println!("run did not settle (see logs)");
                        }
                    }
                    None => println!("usage: /run <id> [sql]"),
                }
            }
            Some("/edit") => {
                let mut parts = line.splitn(3, char::is_whitespace);
                parts.next();
                match (parts.next().and_then(parse_id), parts.next()) {
                    (Some(id), Some(sql)) => {
                        session.edit_draft(id, sql);
                        println!("draft #{} updated", id);
                    }
                    _ => println!("usage: /edit <id> <sql>"),
                }
            }
            Some("/history") => {
                panel.sync(session.history().len());
                print_history(session.history().list(), &panel);
            }
            Some("/show") => {
                panel.sync(session.history().len());
                match line.split_whitespace().nth(1).and_then(|s| s.parse().ok()) {
                    Some(index) => {
                        panel.toggle(index);
                        match session.history().get(index) {
                            Some(entry) if !panel.is_folded(index) => print_entry(index, entry),
                            Some(_) => println!("[{}] folded", index),
                            None => println!("no history entry {}", index),
                        }
                    }
                    None => println!("usage: /show <n>"),
                }
            }
            Some("/copy") => match session.current() {
                Some(view) => match SystemClipboard::new()
                    .and_then(|mut clipboard| clipboard.write_text(&view.generated_sql))
                {
                    Ok(()) => println!("SQL copied to clipboard"),
                    Err(err) => tracing::warn!(error = %err, "Could not copy text"),
                },
                None => println!("nothing to copy yet"),
            },
            Some(cmd) if cmd.starts_with('/') => {
                println!("unknown command {}; try /help", cmd);
            }
            Some(_) => match session.submit(line).await {
                Some(draft) => {
                    if let Some(message) = session.store().get(draft) {
                        println!("draft #{}:\n{}\n(run with /run {})", draft, message.text, draft);
                    }
                }
                None => println!("no draft produced (see logs)"),
            },
            _ => {}
        }
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
    }
    Ok(())
}

fn parse_id(raw: &str) -> Option<MessageId> {
    raw.trim_start_matches('#').parse().ok().map(MessageId)
}

fn print_current(view: &CurrentView) {
    println!("SQL: {}", view.generated_sql);
    print_chart(&view.chart);
    if let Some(table) = &view.table {
        print_table(table);
    }
}

fn print_chart(chart: &ChartSpec) {
    if !chart.has_data() {
        println!("{}", NO_DATA_PLACEHOLDER);
        return;
    }
    let dataset = &chart.datasets[0];
    println!("chart [{:?}] {} points", chart.family, dataset.values.len());
    for (label, value) in chart.labels.iter().zip(&dataset.values) {
        println!("  {:<20} {}", label, value);
    }
}

fn print_table(table: &TableProjection) {
    println!("{}", table.columns.join(" | "));
    for row in &table.rows {
        let cells: Vec<String> = table
            .columns
            .iter()
            .map(|column| match row.get(column) {
                Some(serde_json::Value::String(s)) => s.clone(),
                Some(serde_json::Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            })
            .collect();
        println!("{}", cells.join(" | "));
    }
}

fn print_history(entries: &[HistoryEntry], panel: &HistoryPanel) {
    if entries.is_empty() {
        println!("no history yet");
        return;
    }
    for (index, entry) in entries.iter().enumerate() {
        if panel.is_folded(index) {
            let first_line = entry.generated_sql.lines().next().unwrap_or_default();
            println!("[{}] folded: {}", index, first_line);
        } else {
            print_entry(index, entry);
        }
    }
}

fn print_entry(index: usize, entry: &HistoryEntry) {
    println!("[{}] {} ({})", index, entry.chart_type.label(), entry.archived_at);
    println!("SQL: {}", entry.generated_sql);
    print_chart(&entry.chart);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_plain_and_hash_prefixed() {
        assert_eq!(parse_id("3"), Some(MessageId(3)));
        assert_eq!(parse_id("#12"), Some(MessageId(12)));
        assert_eq!(parse_id("abc"), None);
    }

    #[test]
    fn test_config_path_is_under_home() {
        let path = config_path();
        assert!(path.ends_with(".sqlscope/config.toml"));
    }
}
