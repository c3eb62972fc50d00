use clap::ArgMatches;
use colored::*;

use crate::cli_context::CliContext;
use crate::error::{ErrorContext, TalkResult};

pub async fn handle_whoami(_matches: &ArgMatches) -> TalkResult<()> {
    let mut context = CliContext::load().context("Failed to load CLI context")?;
    let user = context.require_user().await?;

    println!("Logged in as: {} ({})", user.username.green().bold(), user.email);
    println!("User ID: {}", user.id);
    println!("Role: {}", user.role.as_str());
    println!("Server: {}", context.server_url().dimmed());

    Ok(())
}
