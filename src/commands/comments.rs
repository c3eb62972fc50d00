use clap::ArgMatches;
use colored::*;

use super::{arg_or_prompt, id_arg, string_arg};
use crate::cli_context::CliContext;
use crate::error::{ErrorContext, TalkResult};
use crate::formatting::print_comments;
use crate::forms::CommentForm;

pub async fn handle_list_comments(matches: &ArgMatches) -> TalkResult<()> {
    let mut context = CliContext::load().context("Failed to load CLI context")?;
    let client = context.client()?;

    let issue_id = id_arg(matches, "id")?;
    let comments = client.get_comments(issue_id).await?;

    println!("Comments on issue #{} ({}):", issue_id, comments.len());
    println!("{}", "─".repeat(80));
    print_comments(&comments);
    Ok(())
}

pub async fn handle_add_comment(matches: &ArgMatches) -> TalkResult<()> {
    let mut context = CliContext::load().context("Failed to load CLI context")?;
    let client = context.client()?;

    let issue_id = id_arg(matches, "id")?;
    let name = match string_arg(matches, "name").or_else(|| context.default_reporter()) {
        Some(name) => name,
        None => super::prompt("Your name")?,
    };
    let form = CommentForm::new(name, arg_or_prompt(matches, "content", "Comment")?);
    form.validate()?;

    let comment = client
        .add_comment(issue_id, form.commenter_name.trim(), form.content.trim())
        .await?;

    println!("{} Comment added successfully!", "✅".green());
    println!("Issue: #{}", issue_id);
    println!("Comment by: {}", comment.commenter_name.green());
    Ok(())
}
