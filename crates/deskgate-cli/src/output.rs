//! Table and JSON output formatting for CLI commands.

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

/// Print rows as a table, or as a JSON array
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table if items.is_empty() => println!("No grants."),
        OutputFormat::Table => println!("{}", Table::new(items)),
        OutputFormat::Json => println!("{}", to_json(items)),
    }
}

/// Print a record as JSON, or its labelled fields as aligned `label: value` lines
pub fn print_details<T: Serialize>(item: &T, fields: &[(&str, String)], format: OutputFormat) {
    match format {
        OutputFormat::Json => println!("{}", to_json(item)),
        OutputFormat::Table => {
            for (label, value) in fields {
                println!("  {:<18} {}", format!("{label}:"), value);
            }
        }
    }
}

/// Print a positive outcome
pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

/// Print a negative but non-error outcome, such as a denied check
pub fn print_warning(msg: &str) {
    println!("⚠ {msg}");
}

/// Print an error to stderr
pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

fn to_json<T: Serialize + ?Sized>(item: &T) -> String {
    serde_json::to_string_pretty(item).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
}
