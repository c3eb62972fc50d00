use colored::*;

use super::utils::*;
use crate::constants::DESCRIPTION_PREVIEW_LEN;
use crate::error::TalkResult;
use crate::models::{Attachment, Comment, Issue, IssueStatus, User};

/// "CCR: ..." badge for issues converted to a CCR.
pub fn ccr_badge(issue: &Issue) -> Option<String> {
    if !issue.is_ccr() {
        return None;
    }
    issue
        .ccr_number
        .as_deref()
        .or(issue.test_case_ids.as_deref())
        .filter(|v| !v.trim().is_empty())
        .map(|v| format!("CCR: {}", v))
}

/// "Resolved in 3 hours" for resolved issues with both timestamps.
pub fn resolved_indicator(issue: &Issue) -> Option<String> {
    if issue.status != IssueStatus::Resolved {
        return None;
    }
    let created = issue.created_at.as_deref()?;
    let updated = issue.updated_at.as_deref()?;
    resolution_time(created, updated).map(|t| format!("Resolved in {}", t))
}

pub fn description_preview(issue: &Issue) -> String {
    preview(&issue.description, DESCRIPTION_PREVIEW_LEN)
}

pub fn print_issues(issues: &[Issue], format: &str) -> TalkResult<()> {
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&issues)?);
        return Ok(());
    }

    if issues.is_empty() {
        println!("{}", "No issues found.".dimmed());
        return Ok(());
    }

    match format {
        "table" => {
            println!("{}", "─".repeat(110).dimmed());
            println!(
                "{:<6} {:<44} {:<12} {:<9} {:<8} {:<16} {:<8}",
                "ID".bold(),
                "Title".bold(),
                "Status".bold(),
                "Severity".bold(),
                "Release".bold(),
                "Reporter".bold(),
                "Score".bold()
            );
            println!("{}", "─".repeat(110).dimmed());

            for issue in issues {
                println!(
                    "{:<6} {:<44} {:<12} {:<9} {:<8} {:<16} {:<8}",
                    format!("#{}", issue.id).blue(),
                    truncate(&issue.testcase_title, 44),
                    format_status(issue.status),
                    format_severity(issue.severity),
                    or_dash(issue.release.as_deref()),
                    truncate(&issue.reporter_name, 16),
                    issue.score
                );
            }
            println!("{}", "─".repeat(110).dimmed());
        }
        _ => {
            for issue in issues {
                print_issue_card(issue);
            }
            println!();
        }
    }
    Ok(())
}

fn print_issue_card(issue: &Issue) {
    let mut tags = vec![
        format_status(issue.status).to_string(),
        format_severity(issue.severity).to_string(),
    ];
    if issue.has_verified_solution {
        tags.push("✔ Solved".green().to_string());
    }
    if let Some(badge) = ccr_badge(issue) {
        tags.push(badge.cyan().bold().to_string());
    }

    println!(
        "\n{} {} [{}]",
        format!("#{}", issue.id).blue(),
        issue.testcase_title.bold(),
        tags.join(" | ")
    );
    println!("    {}", issue.testcase_path.dimmed());
    println!(
        "    {}: {}  {}: {}  {}: {}  {}: {}  {}: {}",
        "Reporter".dimmed(),
        issue.reporter_name,
        "Release".dimmed(),
        or_dash(issue.release.as_deref()),
        "Platform".dimmed(),
        or_dash(issue.platform_label()),
        "Build".dimmed(),
        or_dash(issue.build.as_deref()),
        "Target".dimmed(),
        or_dash(issue.target.as_deref())
    );

    let desc = description_preview(issue);
    if !desc.trim().is_empty() {
        println!("    {}", desc);
    }
    if let Some(resolved) = resolved_indicator(issue) {
        println!("    {} {}", "✓".green(), resolved.green());
    }

    println!(
        "    {} · {} comments · {}",
        issue
            .created_at
            .as_deref()
            .map(time_ago)
            .unwrap_or_else(|| "unknown".to_string())
            .dimmed(),
        issue.comment_count,
        format_score(issue.score)
    );
}

pub fn print_single_issue(issue: &Issue) {
    println!("\n{}", "═".repeat(80).blue());
    println!(
        "{} {}",
        format!("#{}", issue.id).blue().bold(),
        issue.testcase_title.bold()
    );
    if let Some(resolved) = resolved_indicator(issue) {
        println!("{} {}", "✓".green(), resolved.green());
    }
    println!("{}", "─".repeat(80).dimmed());

    println!(
        "{}: {} | {}: {} | {}: {} | {}: {}",
        "Status".dimmed(),
        format_status(issue.status),
        "Severity".dimmed(),
        format_severity(issue.severity),
        "Score".dimmed(),
        issue.score,
        "Votes".dimmed(),
        format!("+{} / -{}", issue.upvotes, issue.downvotes)
    );
    println!(
        "{}: {} | {}: {}",
        "Created by".dimmed(),
        issue.reporter_name.green(),
        "Created at".dimmed(),
        issue
            .created_at
            .as_deref()
            .map(format_date)
            .unwrap_or_else(|| "-".to_string())
    );
    if let Some(ccr) = issue.ccr_number.as_deref().filter(|c| !c.is_empty()) {
        println!("{}: {}", "CCR".dimmed(), ccr.cyan().bold());
    }
    if !issue.tags.is_empty() {
        println!("{}: {}", "Tags".dimmed(), issue.tags.join(", ").cyan());
    }

    println!("{}: {}", "Test Case Path".dimmed(), issue.testcase_path);
    println!(
        "{}: {}",
        "Test Case IDs".dimmed(),
        or_dash(issue.test_case_ids.as_deref())
    );
    println!(
        "{}: {} | {}: {} | {}: {} | {}: {}",
        "Release".dimmed(),
        or_dash(issue.release.as_deref()),
        "Platform".dimmed(),
        or_dash(issue.platform_label()),
        "Build".dimmed(),
        or_dash(issue.build.as_deref()),
        "Target".dimmed(),
        or_dash(issue.target.as_deref())
    );

    println!("\n{}", "Description".bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}", issue.description);

    if let Some(extra) = issue.additional_comments.as_deref().filter(|c| !c.trim().is_empty()) {
        println!("\n{}", "Additional Comments".bold());
        println!("{}", "─".repeat(40).dimmed());
        println!("{}", extra);
    }

    if !issue.attachments.is_empty() {
        print_attachments(&issue.attachments);
    }

    println!("\n{} ({})", "Comments".bold(), issue.comments.len());
    println!("{}", "─".repeat(40).dimmed());
    print_comments(&issue.comments);

    println!("\n{}", "═".repeat(80).blue());
}

pub fn print_attachments(attachments: &[Attachment]) {
    println!("\n{}", "Attachments".bold());
    println!("{}", "─".repeat(40).dimmed());
    for attachment in attachments {
        println!(
            "  📎 {} ({})",
            attachment.filename,
            format_file_size(attachment.file_size.unwrap_or(0)).dimmed()
        );
    }
}

pub fn print_comments(comments: &[Comment]) {
    if comments.is_empty() {
        println!("{}", "No comments yet.".dimmed());
        return;
    }

    for comment in comments {
        let verified = if comment.is_verified_solution {
            format!(" {}", "✔ Verified solution".green().bold())
        } else {
            String::new()
        };
        println!(
            "\n{} {} {} {}{}",
            format!("[{}]", comment.id).dimmed(),
            comment.commenter_name.green().bold(),
            comment
                .created_at
                .as_deref()
                .map(time_ago)
                .unwrap_or_default()
                .dimmed(),
            format_score(comment.net_score()),
            verified
        );
        for line in comment.content.lines() {
            println!("  {}", line);
        }
        println!(
            "  {} {}  {} {}",
            "👍".dimmed(),
            comment.upvotes,
            "👎".dimmed(),
            comment.downvotes
        );
    }
}

pub fn print_users(users: &[User]) {
    if users.is_empty() {
        println!("{}", "No users found.".dimmed());
        return;
    }

    println!("{}", "─".repeat(96).dimmed());
    println!(
        "{:<6} {:<20} {:<30} {:<7} {:<9} {:<12}",
        "ID".bold(),
        "Username".bold(),
        "Email".bold(),
        "Role".bold(),
        "Status".bold(),
        "Created".bold()
    );
    println!("{}", "─".repeat(96).dimmed());
    for user in users {
        let role = if user.is_admin() {
            user.role.as_str().magenta().bold()
        } else {
            user.role.as_str().normal()
        };
        let status = if user.is_active {
            "Active".green()
        } else {
            "Inactive".red()
        };
        println!(
            "{:<6} {:<20} {:<30} {:<7} {:<9} {:<12}",
            user.id.to_string().blue(),
            truncate(&user.username, 20),
            truncate(&user.email, 30),
            role,
            status,
            user.created_at
                .as_deref()
                .and_then(parse_timestamp)
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string())
        );
    }
    println!("{}", "─".repeat(96).dimmed());
    println!("{}", "Administrator accounts cannot be modified.".dimmed());
}

pub fn print_admin_issues(issues: &[Issue]) {
    if issues.is_empty() {
        println!("{}", "No issues found.".dimmed());
        return;
    }

    println!("{}", "─".repeat(100).dimmed());
    println!(
        "{:<6} {:<52} {:<12} {:<9} {:<16}",
        "ID".bold(),
        "Title".bold(),
        "Status".bold(),
        "Severity".bold(),
        "Reporter".bold()
    );
    println!("{}", "─".repeat(100).dimmed());
    for issue in issues {
        println!(
            "{:<6} {:<52} {:<12} {:<9} {:<16}",
            issue.id.to_string().blue(),
            preview(&issue.testcase_title, 50),
            format_status(issue.status),
            format_severity(issue.severity),
            truncate(&issue.reporter_name, 16)
        );
    }
    println!("{}", "─".repeat(100).dimmed());
}
