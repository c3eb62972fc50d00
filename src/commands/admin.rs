use clap::ArgMatches;
use colored::*;

use super::{confirm, id_arg};
use crate::admin::{self, AdminIssuesView};
use crate::cli_context::CliContext;
use crate::error::{ErrorContext, TalkError, TalkResult};
use crate::formatting::{print_admin_issues, print_users};
use crate::models::api::UserUpdate;
use crate::models::{IssueStatus, Role, Severity};

fn status_filter(matches: &ArgMatches) -> TalkResult<Option<IssueStatus>> {
    matches
        .get_one::<String>("status")
        .map(|s| s.parse::<IssueStatus>().map_err(TalkError::InvalidInput))
        .transpose()
}

fn severity_filter(matches: &ArgMatches) -> TalkResult<Option<Severity>> {
    matches
        .get_one::<String>("severity")
        .map(|s| s.parse::<Severity>().map_err(TalkError::InvalidInput))
        .transpose()
}

pub async fn handle_admin(matches: &ArgMatches) -> TalkResult<()> {
    let mut context = CliContext::load().context("Failed to load CLI context")?;
    context.require_admin().await?;
    let client = context.client()?;
    let backend = client.as_ref();

    match matches.subcommand() {
        Some(("users", _)) => {
            let users = client.list_users().await?;
            print_users(&users);
        }
        Some(("set-role", sub)) => {
            let id = id_arg(sub, "id")?;
            let raw = sub
                .get_one::<String>("role")
                .ok_or_else(|| TalkError::InvalidInput("Role is required".to_string()))?;
            let role = Role::parse(raw)
                .ok_or_else(|| TalkError::InvalidInput(format!("Unknown role '{}'", raw)))?;
            let update = UserUpdate {
                role: Some(role),
                ..Default::default()
            };
            let user = admin::update_user(backend, id, update).await?;
            println!(
                "{} {} is now {}",
                "✅".green(),
                user.username.bold(),
                user.role.as_str()
            );
        }
        Some(("set-active", sub)) => {
            let id = id_arg(sub, "id")?;
            let active = sub.get_one::<bool>("active").copied().unwrap_or(true);
            let update = UserUpdate {
                is_active: Some(active),
                ..Default::default()
            };
            let user = admin::update_user(backend, id, update).await?;
            println!(
                "{} {} is now {}",
                "✅".green(),
                user.username.bold(),
                if user.is_active { "active" } else { "inactive" }
            );
        }
        Some(("issues", sub)) => {
            let mut view = AdminIssuesView::new(status_filter(sub)?, severity_filter(sub)?);
            view.reload(backend).await?;
            print_admin_issues(&view.issues);
        }
        Some(("set-status", sub)) => {
            let id = id_arg(sub, "id")?;
            let status = status_filter(sub)?
                .ok_or_else(|| TalkError::InvalidInput("Status is required".to_string()))?;
            let mut view = AdminIssuesView::default();
            admin::change_issue_status(backend, &mut view, id, status).await?;
            println!("{} Issue #{} set to {}", "✅".green(), id, status.label());
            print_admin_issues(&view.issues);
        }
        Some(("delete", sub)) => {
            let id = id_arg(sub, "id")?;
            let confirmed = confirm(
                "Are you sure you want to delete this issue?",
                sub.get_flag("yes"),
            )?;
            let mut view = AdminIssuesView::default();
            if admin::delete_issue(backend, &mut view, id, confirmed).await? {
                println!("{} Issue #{} deleted.", "✅".green(), id);
            } else {
                println!("{}", "Cancelled.".dimmed());
            }
        }
        Some(("bulk-delete", sub)) => {
            let status = status_filter(sub)?;
            let severity = severity_filter(sub)?;
            let confirmed = confirm(
                "Are you sure you want to delete all issues matching the selected filters?",
                sub.get_flag("yes"),
            )?;
            let mut view = AdminIssuesView::new(status, severity);
            let outcome = admin::bulk_delete(backend, &mut view, status, severity, confirmed).await?;
            println!("{}", outcome.message());
        }
        _ => println!("Usage: testertalk admin users|set-role|set-active|issues|set-status|delete|bulk-delete"),
    }

    Ok(())
}
