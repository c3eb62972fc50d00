use clap::ArgMatches;
use colored::*;

use crate::cli_context::CliContext;
use crate::constants::{PLATFORMS, RELEASES};
use crate::error::{ErrorContext, TalkError, TalkResult};
use crate::filtering::{load_builds, FilterOptions};

pub async fn handle_builds(_matches: &ArgMatches) -> TalkResult<()> {
    let mut context = CliContext::load().context("Failed to load CLI context")?;
    let client = context.client()?;

    let mut options = FilterOptions::new();
    load_builds(client.as_ref(), &mut options).await;

    println!("{}", "Builds:".bold());
    for build in &options.builds {
        println!("  {}", build);
    }
    println!("{}", "Releases:".bold());
    for release in RELEASES {
        println!("  {}", release);
    }
    println!("{}", "Platforms:".bold());
    for (code, display) in PLATFORMS {
        println!("  {} ({})", display, code.dimmed());
    }
    Ok(())
}

pub async fn handle_targets(matches: &ArgMatches) -> TalkResult<()> {
    let mut context = CliContext::load().context("Failed to load CLI context")?;
    let client = context.client()?;

    let release = matches
        .get_one::<String>("release")
        .ok_or_else(|| TalkError::InvalidInput("Release is required".to_string()))?;

    let targets = client.get_targets(release).await?;
    if targets.is_empty() {
        println!("{}", format!("No targets for release {}.", release).dimmed());
    } else {
        println!("{} {}:", "Targets for release".bold(), release.cyan());
        for target in targets {
            println!("  {}", target);
        }
    }
    Ok(())
}
