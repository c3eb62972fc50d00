use clap::ArgMatches;
use colored::*;

use super::{arg_or_prompt, string_arg};
use crate::cli_context::CliContext;
use crate::error::{ErrorContext, TalkResult};
use crate::forms::{LoginForm, RegisterForm};
use crate::logging::{log_error, log_info};

pub async fn handle_login(matches: &ArgMatches) -> TalkResult<()> {
    let mut context = CliContext::load().context("Failed to load CLI context")?;

    let form = LoginForm {
        username: arg_or_prompt(matches, "username", "Username")?,
        password: arg_or_prompt(matches, "password", "Password")?,
    };
    form.validate()?;

    let client = context.client()?;
    let user = client.login(form.username.trim(), &form.password).await?;
    context.remember(Some(user.clone()))?;
    log_info(&format!("Logged in as {}", user.username));

    println!(
        "{} Logged in as {} ({})",
        "✅".green(),
        user.username.green().bold(),
        user.role.as_str()
    );
    if user.is_admin() {
        println!(
            "{}",
            "Administrator account: manage users and issues with 'testertalk admin'.".cyan()
        );
    }
    Ok(())
}

pub async fn handle_logout(_matches: &ArgMatches) -> TalkResult<()> {
    let mut context = CliContext::load().context("Failed to load CLI context")?;

    if context.session().cookie.is_some() {
        let client = context.client()?;
        if let Err(e) = client.logout().await {
            // The local session is dropped regardless
            log_error(&format!("Logout request failed: {}", e));
        }
    }

    context.forget()?;
    println!("{} Logged out.", "✅".green());
    Ok(())
}

pub async fn handle_register(matches: &ArgMatches) -> TalkResult<()> {
    let mut context = CliContext::load().context("Failed to load CLI context")?;

    let password = arg_or_prompt(matches, "password", "Password")?;
    let confirm_password = match string_arg(matches, "confirm-password") {
        Some(value) => value,
        None if matches.get_one::<String>("password").is_some() => password.clone(),
        None => super::prompt("Confirm password")?,
    };

    let form = RegisterForm {
        username: arg_or_prompt(matches, "username", "Username")?,
        email: arg_or_prompt(matches, "email", "Email")?,
        password,
        confirm_password,
    };
    form.validate()?;

    let client = context.client()?;
    let user = client
        .register(form.username.trim(), form.email.trim(), &form.password)
        .await?;

    println!(
        "{} {}",
        "✅".green(),
        "Registration successful! You can now log in.".green().bold()
    );
    println!("{}: {}", "Username".bold(), user.username);
    println!("{}: {}", "Email".bold(), user.email);
    Ok(())
}
