use chrono::{DateTime, Local, NaiveDateTime};
use colored::*;

use crate::models::{IssueStatus, Severity};

/// Parses backend timestamps. The backend emits naive local times
/// (`2024-05-01T09:30:00.123456`); RFC 3339 values are converted to local.
pub fn parse_timestamp(timestamp: &str) -> Option<NaiveDateTime> {
    let timestamp = timestamp.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(parsed.with_timezone(&Local).naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(timestamp, fmt).ok())
}

pub fn time_ago(timestamp: &str) -> String {
    time_ago_from(timestamp, Local::now().naive_local())
}

pub fn time_ago_from(timestamp: &str, now: NaiveDateTime) -> String {
    let Some(parsed) = parse_timestamp(timestamp) else {
        return "unknown".to_string();
    };

    let seconds = now.signed_duration_since(parsed).num_seconds();
    if seconds < 60 {
        "just now".to_string()
    } else if seconds < 3_600 {
        format!("{}m ago", seconds / 60)
    } else if seconds < 86_400 {
        format!("{}h ago", seconds / 3_600)
    } else if seconds < 2_592_000 {
        format!("{}d ago", seconds / 86_400)
    } else {
        parsed.format("%Y-%m-%d").to_string()
    }
}

pub fn format_date(timestamp: &str) -> String {
    parse_timestamp(timestamp)
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// "N unit(s)" between creation and the last update.
pub fn resolution_time(created_at: &str, updated_at: &str) -> Option<String> {
    let created = parse_timestamp(created_at)?;
    let updated = parse_timestamp(updated_at)?;
    let seconds = updated.signed_duration_since(created).num_seconds().max(0);

    let (value, unit) = if seconds < 60 {
        (seconds, "second")
    } else if seconds < 3_600 {
        (seconds / 60, "minute")
    } else if seconds < 86_400 {
        (seconds / 3_600, "hour")
    } else {
        (seconds / 86_400, "day")
    };

    Some(format!("{} {}{}", value, unit, if value == 1 { "" } else { "s" }))
}

pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{:.2}", size);
    let rounded = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", rounded, UNITS[unit])
}

/// Cuts to at most `max_len` characters, ending in "..." when shortened.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// First `len` characters followed by "..." when the text is longer.
pub fn preview(s: &str, len: usize) -> String {
    if s.chars().count() <= len {
        s.to_string()
    } else {
        format!("{}...", s.chars().take(len).collect::<String>())
    }
}

pub fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or("-")
}

pub fn format_status(status: IssueStatus) -> ColoredString {
    let label = status.as_str().to_uppercase();
    match status {
        IssueStatus::Open => label.yellow(),
        IssueStatus::InProgress => label.blue(),
        IssueStatus::Resolved => label.green(),
        IssueStatus::Closed => label.dimmed(),
        IssueStatus::Ccr => label.cyan(),
    }
}

pub fn format_severity(severity: Severity) -> ColoredString {
    match severity {
        Severity::Critical => severity.as_str().red().bold(),
        Severity::High => severity.as_str().red(),
        Severity::Medium => severity.as_str().yellow(),
        Severity::Low => severity.as_str().normal(),
    }
}

pub fn format_score(score: i64) -> ColoredString {
    let text = format!("Score: {}", score);
    if score > 0 {
        text.green()
    } else if score < 0 {
        text.red()
    } else {
        text.dimmed()
    }
}
