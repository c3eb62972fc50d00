pub mod admin;
pub mod auth;
pub mod comments;
pub mod config;
pub mod create;
pub mod issues;
pub mod options;
pub mod votes;
pub mod whoami;

use std::io::{self, BufRead, Write};

use clap::ArgMatches;

use crate::error::{TalkError, TalkResult};

/// Reads a numeric id argument.
pub(crate) fn id_arg(matches: &ArgMatches, name: &str) -> TalkResult<u64> {
    let raw = matches
        .get_one::<String>(name)
        .ok_or_else(|| TalkError::InvalidInput(format!("{} is required", name)))?;
    raw.trim()
        .trim_start_matches('#')
        .parse::<u64>()
        .map_err(|_| TalkError::InvalidInput(format!("'{}' is not a valid {}", raw, name)))
}

pub(crate) fn string_arg(matches: &ArgMatches, name: &str) -> Option<String> {
    matches.get_one::<String>(name).cloned()
}

/// Prints `label` and reads one line from stdin.
pub(crate) fn prompt(label: &str) -> TalkResult<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Value from the command line, or asked for interactively.
pub(crate) fn arg_or_prompt(matches: &ArgMatches, name: &str, label: &str) -> TalkResult<String> {
    match string_arg(matches, name) {
        Some(value) => Ok(value),
        None => prompt(label),
    }
}

/// y/N confirmation for destructive actions; `assume_yes` skips the question.
pub(crate) fn confirm(question: &str, assume_yes: bool) -> TalkResult<bool> {
    if assume_yes {
        return Ok(true);
    }
    let answer = prompt(&format!("{} [y/N]", question))?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
