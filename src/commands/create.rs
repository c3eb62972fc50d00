use std::path::PathBuf;

use clap::ArgMatches;
use colored::*;

use super::string_arg;
use crate::cli_context::CliContext;
use crate::error::{ErrorContext, TalkResult};
use crate::forms::{submit_new_issue, NewIssueForm};
use crate::logging::log_error;
use crate::routing::Route;

pub fn form_from_matches(matches: &ArgMatches, default_reporter: Option<String>) -> NewIssueForm {
    let text = |name: &str| string_arg(matches, name).unwrap_or_default();

    NewIssueForm {
        testcase_title: text("title"),
        testcase_path: text("path"),
        severity: text("severity"),
        description: text("description"),
        reporter_name: string_arg(matches, "reporter")
            .or(default_reporter)
            .unwrap_or_default(),
        build: text("build"),
        platform: text("platform"),
        release: text("release"),
        target: text("target"),
        additional_comments: text("comments"),
        tags: text("tags"),
        files: matches
            .get_many::<String>("attach")
            .map(|files| files.map(PathBuf::from).collect())
            .unwrap_or_default(),
    }
}

pub async fn handle_create(matches: &ArgMatches) -> TalkResult<()> {
    let mut context = CliContext::load().context("Failed to load CLI context")?;
    let client = context.client()?;

    let mut form = form_from_matches(matches, context.default_reporter());

    match form.apply_path_info() {
        Some(info) => println!("{} {}", "Information:".bold(), info.summary().blue()),
        None if !form.testcase_path.trim().is_empty() => println!(
            "{} {}",
            "Information:".bold(),
            "Could not extract release/platform from path.".red()
        ),
        None => {}
    }

    if !form.target.is_empty() && !form.release.is_empty() {
        match client.get_targets(&form.release).await {
            Ok(targets) if !targets.contains(&form.target) => println!(
                "{} target '{}' is not listed for release {} ({})",
                "Warning:".yellow().bold(),
                form.target,
                form.release,
                targets.join(", ")
            ),
            Ok(_) => {}
            Err(e) => log_error(&format!("Could not check targets: {}", e)),
        }
    }

    let issue = submit_new_issue(client.as_ref(), &form).await?;

    println!(
        "{} {}",
        "✅".green(),
        "Issue created successfully!".green().bold()
    );
    println!("{}: {}", "ID".bold(), format!("#{}", issue.id).bright_blue().bold());
    println!("{}: {}", "Title".bold(), issue.testcase_title);
    if let Some(ids) = issue.test_case_ids.as_deref() {
        println!("{}: {}", "Test Case ID".bold(), ids);
    }
    println!(
        "{}: {}{}",
        "URL".bold(),
        context.server_url().trim_end_matches('/'),
        Route::Detail(issue.id).path().bright_black()
    );
    if !issue.attachments.is_empty() {
        println!("{}: {}", "Attachments".bold(), issue.attachments.len());
    }

    Ok(())
}
