use clap::ArgMatches;
use colored::*;

use super::id_arg;
use crate::cli_context::CliContext;
use crate::error::{ErrorContext, TalkError, TalkResult};
use crate::filtering::{FilterField, FilterState};
use crate::formatting::{print_issues, print_single_issue};
use crate::models::{IssueStatus, Severity};

/// Builds the filter state from `--search`, `--status` and friends.
pub fn filters_from_matches(matches: &ArgMatches) -> TalkResult<FilterState> {
    let mut filters = FilterState::new();

    if let Some(status) = matches.get_one::<String>("status") {
        let status: IssueStatus = status.parse().map_err(TalkError::InvalidInput)?;
        filters.set_filter(FilterField::Status, status.as_str());
    }
    if let Some(severity) = matches.get_one::<String>("severity") {
        let severity: Severity = severity.parse().map_err(TalkError::InvalidInput)?;
        filters.set_filter(FilterField::Severity, severity.as_str());
    }

    // Release before target: the target is ignored without a release
    for (arg, field) in [
        ("search", FilterField::Search),
        ("build", FilterField::Build),
        ("platform", FilterField::Platform),
        ("release", FilterField::Release),
        ("target", FilterField::Target),
    ] {
        if let Some(value) = matches.get_one::<String>(arg) {
            filters.set_filter(field, value);
        }
    }

    Ok(filters)
}

pub async fn handle_issues(matches: &ArgMatches) -> TalkResult<()> {
    let mut context = CliContext::load().context("Failed to load CLI context")?;
    let client = context.client()?;

    let format = matches
        .get_one::<String>("format")
        .map(|s| s.as_str())
        .unwrap_or("simple");

    let filters = filters_from_matches(matches)?;
    if matches.get_one::<String>("target").is_some() && filters.release.is_empty() {
        eprintln!("{}", "Ignoring --target: it requires --release.".yellow());
    }

    let active = filters.active_filters();
    let result = client.search_issues(&active).await?;

    if format != "json" && !result.issues.is_empty() {
        println!("Found {} issues:", result.total.max(result.issues.len() as u64));
    }
    print_issues(&result.issues, format)
}

pub async fn handle_issue(matches: &ArgMatches) -> TalkResult<()> {
    let mut context = CliContext::load().context("Failed to load CLI context")?;
    let client = context.client()?;

    let id = id_arg(matches, "id")?;
    let issue = client.get_issue(id).await?;

    if matches.get_one::<String>("format").map(|s| s.as_str()) == Some("json") {
        println!("{}", serde_json::to_string_pretty(&issue)?);
    } else {
        print_single_issue(&issue);
    }
    Ok(())
}
