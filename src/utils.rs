// src/utils.rs
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Location substrings treated as remote by the exploratory overview.
pub const REMOTE_INDICATORS: [&str; 6] = [
    "remote",
    "anywhere",
    "global",
    "worldwide",
    "work from home",
    "wfh",
];

/// Split a comma-separated keyword cell into lowercase, trimmed, non-empty tokens.
pub fn split_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

/// True iff the location mentions "remote", ignoring case.
pub fn is_remote_location(location: &str) -> bool {
    contains_ignore_case(location, "remote")
}

/// True iff the location matches any of [`REMOTE_INDICATORS`].
pub fn has_remote_indicator(location: &str) -> bool {
    let lowered = location.to_lowercase();
    REMOTE_INDICATORS.iter().any(|ind| lowered.contains(ind))
}

static SALARY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\d").expect("Invalid salary regex pattern"));

static SALARY_AMOUNT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$[0-9,]+").expect("Invalid salary amount regex pattern"));

/// True iff the text has a `$` immediately followed by a (Unicode) digit.
pub fn mentions_salary(text: &str) -> bool {
    SALARY_PATTERN.is_match(text)
}

/// Looser salary pattern used by the overview: `$` followed by a digit or comma.
pub fn mentions_salary_amount(text: &str) -> bool {
    SALARY_AMOUNT_PATTERN.is_match(text)
}

pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Parse the `date_posted` cell. Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS`,
/// RFC 3339 and `MM/DD/YYYY`.
pub fn parse_posted_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .or_else(|| NaiveDate::parse_from_str(value, "%m/%d/%Y").ok())
}

/// Trim a text cell, mapping blank values to `None`.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Share of `part` in `total` as a percentage; 0 for an empty total.
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Cut `text` to at most `max_chars` characters, appending `...` when cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}

/// Resolve a relative path against the current working directory.
pub fn resolve_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        let current_dir = std::env::current_dir().context("Failed to get current directory")?;
        Ok(current_dir.join(path))
    }
}

/// Read file content as string with proper error context
pub async fn read_file_content(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))
}
