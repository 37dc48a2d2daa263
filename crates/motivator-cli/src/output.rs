//! Rendering of command results as tables or JSON.

use serde::Serialize;
use tabled::{Table, Tabled};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Width of the label column in key-value listings.
const LABEL_WIDTH: usize = 22;

/// Print rows as a table, or as a JSON array.
pub fn print_list<T: Serialize + Tabled>(rows: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table if rows.is_empty() => println!("(no stored preferences)"),
        OutputFormat::Table => println!("{}", Table::new(rows)),
        OutputFormat::Json => println!("{}", to_json(rows, "[]")),
    }
}

/// Print one value: pretty debug form for tables, JSON otherwise.
pub fn print_item<T: Serialize + std::fmt::Debug>(item: &T, format: OutputFormat) {
    match format {
        OutputFormat::Table => println!("{:#?}", item),
        OutputFormat::Json => println!("{}", to_json(item, "null")),
    }
}

/// Report a completed change.
pub fn print_success(msg: &str) {
    println!("ok: {}", msg);
}

/// Report something the user should look at; the command still succeeds.
pub fn print_warning(msg: &str) {
    println!("note: {}", msg);
}

/// Report a failure on stderr.
pub fn print_error(msg: &str) {
    eprintln!("failed: {}", msg);
}

/// Print an aligned `label: value` line.
pub fn print_kv(key: &str, value: &str) {
    println!("{}", kv_line(key, value));
}

fn kv_line(key: &str, value: &str) -> String {
    format!("  {:<width$} {}", format!("{key}:"), value, width = LABEL_WIDTH)
}

fn to_json<T: Serialize + ?Sized>(value: &T, fallback: &str) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| fallback.to_string())
}
