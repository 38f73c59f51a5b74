//! `spendlog` — command-line client for the spendlog expense ledger.
//!
//! # Usage
//!
//! ```
//! spendlog add 12.50 "Food & Dining" --note lunch
//! spendlog list 2024-01-01 2024-01-31
//! spendlog summary 2024-01-01 2024-12-31 --category Travel
//! spendlog --url http://ledger.local:8000 debug
//! ```

mod client;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client::{AddExpense, ApiClient, ApiConfig};
use serde::{Deserialize, Serialize};
use spendlog_core::expense::DateRange;

const DEFAULT_URL: &str = "http://localhost:8000";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "spendlog", about = "Record and query personal expenses")]
struct Args {
  /// Path to a TOML config file (url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<std::path::PathBuf>,

  /// Base URL of the spendlog server (default: http://localhost:8000).
  #[arg(long, env = "SPENDLOG_URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Record a new expense.
  Add {
    #[arg(allow_negative_numbers = true)]
    amount:      f64,
    category:    String,
    /// Expense date; defaults to today.
    #[arg(long)]
    date:        Option<String>,
    #[arg(long, default_value = "")]
    subcategory: String,
    #[arg(long, default_value = "")]
    note:        String,
  },
  /// List expenses dated within [START, END], newest first.
  List { start: String, end: String },
  /// Per-category totals within [START, END].
  Summary {
    start:    String,
    end:      String,
    #[arg(long)]
    category: Option<String>,
  },
  /// Show database location and row count.
  Debug,
  /// Show the category catalog.
  Categories,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| DEFAULT_URL.to_string()),
  };
  tracing::debug!(url = %api_config.base_url, "using server");

  let client = ApiClient::new(api_config)?;
  run(&client, args.command).await
}

async fn run(client: &ApiClient, command: Command) -> Result<()> {
  match command {
    Command::Add { amount, category, date, subcategory, note } => {
      let body = AddExpense {
        date: date.unwrap_or_else(today),
        amount,
        category,
        subcategory,
        note,
      };
      print_json(&client.add_expense(&body).await?)
    }
    Command::List { start, end } => {
      print_json(&client.list_expenses(&DateRange::new(start, end)).await?)
    }
    Command::Summary { start, end, category } => {
      let range = DateRange::new(start, end);
      print_json(&client.summarize(&range, category.as_deref()).await?)
    }
    Command::Debug => print_json(&client.debug_info().await?),
    Command::Categories => print_json(&client.categories().await?),
  }
}

/// Today's local date as `YYYY-MM-DD`.
fn today() -> String { chrono::Local::now().date_naive().format("%Y-%m-%d").to_string() }

fn print_json<T: Serialize>(value: &T) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(value).context("formatting output")?);
  Ok(())
}
