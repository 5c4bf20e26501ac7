//! Output formatting for the CLI.

use chrono::{DateTime, Utc};
use console::style;
use serde::Serialize;

/// Prints human text by default, or one pretty JSON document with `--json`.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Prints `value` as JSON, or runs `text` to print it for humans.
    pub fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce(&T)) {
        if self.json {
            match serde_json::to_string_pretty(value) {
                Ok(json) => println!("{json}"),
                Err(err) => self.error(&format!("cannot encode output: {err}")),
            }
        } else {
            text(value);
        }
    }

    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold());
        println!("{}", style("=".repeat(msg.chars().count())).dim());
    }

    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{msg}");
    }

    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{}", success_line(msg));
    }

    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").cyan(), item);
    }

    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{}", error_line(msg));
    }
}

fn success_line(msg: &str) -> String {
    format!("{} {}", style("✓").green(), msg)
}

fn error_line(msg: &str) -> String {
    format!("{} {}", style("✗").red(), style(msg).red())
}

/// Formats epoch milliseconds as `YYYY-MM-DD HH:MM` UTC.
pub fn format_timestamp(epoch_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(epoch_ms)
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| epoch_ms.to_string())
}
