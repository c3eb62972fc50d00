use chrono::NaiveDateTime;
use serde_json::json;

use super::fixtures::issue_with;
use crate::formatting::issues::{ccr_badge, description_preview, resolved_indicator};
use crate::formatting::utils::{
    format_date, format_file_size, or_dash, parse_timestamp, preview, resolution_time,
    time_ago_from, truncate,
};

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

#[test]
fn test_parse_timestamp_formats() {
    let expected = at("2024-05-01 09:30:00");
    assert_eq!(parse_timestamp("2024-05-01T09:30:00"), Some(expected));
    assert_eq!(parse_timestamp("2024-05-01T09:30:00.123456").map(|t| t.date()), Some(expected.date()));
    assert_eq!(parse_timestamp("2024-05-01 09:30:00"), Some(expected));
    assert!(parse_timestamp("2024-05-01T09:30:00Z").is_some());
    assert_eq!(parse_timestamp("yesterday"), None);
}

#[test]
fn test_time_ago_buckets() {
    let now = at("2024-05-10 12:00:00");
    assert_eq!(time_ago_from("2024-05-10T11:59:30", now), "just now");
    assert_eq!(time_ago_from("2024-05-10T11:15:00", now), "45m ago");
    assert_eq!(time_ago_from("2024-05-10T07:00:00", now), "5h ago");
    assert_eq!(time_ago_from("2024-05-07T12:00:00", now), "3d ago");
    assert_eq!(time_ago_from("2024-01-02T12:00:00", now), "2024-01-02");
    assert_eq!(time_ago_from("garbage", now), "unknown");
}

#[test]
fn test_format_date() {
    assert_eq!(format_date("2024-05-01T09:30:12.5"), "2024-05-01 09:30");
    assert_eq!(format_date(""), "-");
}

#[test]
fn test_resolution_time_units() {
    assert_eq!(
        resolution_time("2024-05-01T09:00:00", "2024-05-01T12:00:00").as_deref(),
        Some("3 hours")
    );
    assert_eq!(
        resolution_time("2024-05-01T09:00:00", "2024-05-01T09:01:00").as_deref(),
        Some("1 minute")
    );
    assert_eq!(
        resolution_time("2024-05-01T09:00:00", "2024-05-03T09:00:00").as_deref(),
        Some("2 days")
    );
    // Clock skew never yields a negative duration
    assert_eq!(
        resolution_time("2024-05-01T09:00:10", "2024-05-01T09:00:00").as_deref(),
        Some("0 seconds")
    );
    assert_eq!(resolution_time("bad", "2024-05-01T09:00:00"), None);
}

#[test]
fn test_format_file_size() {
    assert_eq!(format_file_size(0), "0 Bytes");
    assert_eq!(format_file_size(512), "512 Bytes");
    assert_eq!(format_file_size(1024), "1 KB");
    assert_eq!(format_file_size(1536), "1.5 KB");
    assert_eq!(format_file_size(5 * 1024 * 1024), "5 MB");
    assert_eq!(format_file_size(1288490189), "1.2 GB");
}

#[test]
fn test_truncate_and_preview() {
    assert_eq!(truncate("short", 10), "short");
    let cut = truncate("a rather long test title", 10);
    assert_eq!(cut, "a rathe...");
    assert_eq!(cut.chars().count(), 10);

    assert_eq!(preview("abcdef", 3), "abc...");
    assert_eq!(preview("abc", 3), "abc");
    // Multi-byte characters are counted, not bytes
    assert_eq!(preview("ééééé", 2), "éé...");
}

#[test]
fn test_or_dash() {
    assert_eq!(or_dash(None), "-");
    assert_eq!(or_dash(Some("  ")), "-");
    assert_eq!(or_dash(Some("Daily")), "Daily");
}

#[test]
fn test_ccr_badge_prefers_ccr_number() {
    let issue = issue_with(1, json!({
        "status": "ccr",
        "ccr_number": "CCR-42",
        "test_case_ids": "TC-1",
    }));
    assert_eq!(ccr_badge(&issue).as_deref(), Some("CCR: CCR-42"));

    let fallback = issue_with(2, json!({ "status": "ccr", "test_case_ids": "TC-1" }));
    assert_eq!(ccr_badge(&fallback).as_deref(), Some("CCR: TC-1"));

    let open = issue_with(3, json!({ "status": "open", "ccr_number": "CCR-42" }));
    assert_eq!(ccr_badge(&open), None);
}

#[test]
fn test_resolved_indicator() {
    let resolved = issue_with(1, json!({
        "status": "resolved",
        "created_at": "2024-05-01T09:00:00",
        "updated_at": "2024-05-01T12:00:00",
    }));
    assert_eq!(resolved_indicator(&resolved).as_deref(), Some("Resolved in 3 hours"));

    let closed = issue_with(2, json!({
        "status": "closed",
        "created_at": "2024-05-01T09:00:00",
        "updated_at": "2024-05-01T12:00:00",
    }));
    assert_eq!(resolved_indicator(&closed), None);

    let undated = issue_with(3, json!({ "status": "resolved" }));
    assert_eq!(resolved_indicator(&undated), None);
}

#[test]
fn test_description_preview_is_bounded() {
    let long = "x".repeat(400);
    let issue = issue_with(1, json!({ "description": long }));
    let text = description_preview(&issue);
    assert!(text.ends_with("..."));
    assert!(text.chars().count() < 400);
}
