pub mod detail;
pub mod filters;
pub mod header;
pub mod list;

use ratatui::style::Color;

use crate::models::{IssueStatus, Severity};

pub fn status_color(status: IssueStatus) -> Color {
    match status {
        IssueStatus::Open => Color::LightBlue,
        IssueStatus::InProgress => Color::Yellow,
        IssueStatus::Resolved => Color::Green,
        IssueStatus::Closed => Color::DarkGray,
        IssueStatus::Ccr => Color::Magenta,
    }
}

pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Low => Color::Blue,
        Severity::Medium => Color::Yellow,
        Severity::High => Color::Rgb(255, 165, 0),
        Severity::Critical => Color::Red,
    }
}

pub fn score_color(score: i64) -> Color {
    match score {
        s if s > 0 => Color::Green,
        s if s < 0 => Color::Red,
        _ => Color::Gray,
    }
}
