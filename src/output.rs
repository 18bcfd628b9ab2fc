//! Terminal rendering for storefront commands.
//!
//! Each `print_*` function writes one rendering to stdout. Error lines and
//! error toasts go to stderr.

use std::fmt::Debug;

use serde::Serialize;
use tabled::{Table, Tabled};

use kabphone_service::{Toast, ToastLevel};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Bordered tables and labelled fields.
    #[default]
    Table,
    /// Pretty-printed JSON, for scripts.
    Json,
}

const EMPTY_LISTING: &str = "Nothing to show.";

fn to_json<T: Serialize + ?Sized>(value: &T, fallback: &str) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| fallback.to_string())
}

fn render_list<T: Serialize + Tabled>(rows: &[T], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(rows, "[]"),
        OutputFormat::Table if rows.is_empty() => EMPTY_LISTING.to_string(),
        OutputFormat::Table => Table::new(rows).to_string(),
    }
}

pub fn print_list<T: Serialize + Tabled>(rows: &[T], format: OutputFormat) {
    println!("{}", render_list(rows, format));
}

/// Debug-formats `item` in table mode; there is no tabular form for a
/// single nested value.
pub fn print_item<T: Serialize + Debug>(item: &T, format: OutputFormat) {
    match format {
        OutputFormat::Table => println!("{item:#?}"),
        OutputFormat::Json => println!("{}", to_json(item, "{}")),
    }
}

/// Replays the notifications a command raised, in order.
pub fn print_toasts(toasts: &[Toast]) {
    toasts.iter().for_each(|toast| match toast.level {
        ToastLevel::Success => print_success(&toast.message),
        ToastLevel::Error => print_error(&toast.message),
    });
}

pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

pub fn print_warning(msg: &str) {
    println!("! {msg}");
}

pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

fn field_line(label: &str, value: &str) -> String {
    let label = format!("{label}:");
    format!("  {label:<20} {value}")
}

/// One labelled field of a detail view.
pub fn print_kv(label: &str, value: &str) {
    println!("{}", field_line(label, value));
}

/// `32900.0` renders as `฿32,900.00`.
pub fn baht(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}฿{grouped}.{cents}")
}
