//! Display helpers. Everything here degrades to a default instead of failing.

use chrono::{TimeZone, Utc};

pub const ANONYMOUS_USER: &str = "Anonymous User";

/// "Apr 2025" for a unix timestamp in seconds; the current month when absent or out of range.
pub fn month_year(created_at: Option<i64>) -> String {
    let date = created_at
        .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
        .unwrap_or_else(Utc::now);
    date.format("%b %Y").to_string()
}

/// Label shown as "Shared by ...": the local part of the submitter's email.
pub fn shared_by(email: Option<&str>) -> String {
    email
        .and_then(|e| e.split('@').next())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| ANONYMOUS_USER.to_string())
}

/// Non-empty, trimmed lines of a newline-delimited block.
pub fn lines(block: &str) -> Vec<String> {
    block
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Comma-separated categories, trimmed, empties dropped.
pub fn split_types(types: &str) -> Vec<String> {
    types
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn clip(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", cut.trim_end())
}
