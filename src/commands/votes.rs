use clap::ArgMatches;
use colored::*;

use super::{arg_or_prompt, id_arg};
use crate::cli_context::CliContext;
use crate::error::{ErrorContext, TalkError, TalkResult};
use crate::forms::CcrForm;
use crate::models::VoteKind;

fn vote_arg(matches: &ArgMatches) -> TalkResult<VoteKind> {
    let raw = matches
        .get_one::<String>("direction")
        .map(|s| s.as_str())
        .unwrap_or("up");
    VoteKind::parse(raw)
        .ok_or_else(|| TalkError::InvalidInput(format!("Vote must be 'up' or 'down', got '{}'", raw)))
}

pub async fn handle_vote(matches: &ArgMatches) -> TalkResult<()> {
    let mut context = CliContext::load().context("Failed to load CLI context")?;
    let client = context.client()?;

    match matches.subcommand() {
        Some(("issue", sub)) => {
            let id = id_arg(sub, "id")?;
            let issue = client.vote_issue(id, vote_arg(sub)?).await?;
            println!(
                "{} Vote recorded for issue #{}: +{} / -{} (score {})",
                "✅".green(),
                issue.id,
                issue.upvotes,
                issue.downvotes,
                issue.score
            );
        }
        Some(("comment", sub)) => {
            let id = id_arg(sub, "id")?;
            let comment = client.vote_comment(id, vote_arg(sub)?).await?;
            println!(
                "{} Vote recorded for comment {}: +{} / -{} (score {})",
                "✅".green(),
                comment.id,
                comment.upvotes,
                comment.downvotes,
                comment.net_score()
            );
        }
        _ => println!("Usage: testertalk vote issue|comment <ID> up|down"),
    }
    Ok(())
}

pub async fn handle_verify(matches: &ArgMatches) -> TalkResult<()> {
    let mut context = CliContext::load().context("Failed to load CLI context")?;
    let client = context.client()?;

    let id = id_arg(matches, "id")?;
    let comment = client.verify_comment(id).await?;
    println!(
        "{} Comment {} by {} marked as the verified solution.",
        "✅".green(),
        comment.id,
        comment.commenter_name.green()
    );
    Ok(())
}

pub async fn handle_ccr(matches: &ArgMatches) -> TalkResult<()> {
    let mut context = CliContext::load().context("Failed to load CLI context")?;
    let client = context.client()?;

    let id = id_arg(matches, "id")?;
    let form = CcrForm {
        ccr_number: arg_or_prompt(matches, "number", "CCR number")?,
    };
    form.validate()?;

    let issue = client.move_to_ccr(id, form.ccr_number.trim()).await?;
    println!("{} {}", "✅".green(), "Issue moved to CCR successfully!".green().bold());
    println!(
        "Issue #{} is now {} ({})",
        issue.id,
        issue.status.label(),
        issue.ccr_number.as_deref().unwrap_or("-")
    );
    Ok(())
}
