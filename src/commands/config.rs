use clap::ArgMatches;
use colored::*;

use crate::config::{config_path, get_server_url, load_config, save_config};
use crate::error::{TalkError, TalkResult};
use crate::logging::get_log_file_path;

pub async fn handle_config(matches: &ArgMatches) -> TalkResult<()> {
    let mut config = load_config();
    let mut changed = false;

    if let Some(server) = matches.get_one::<String>("server") {
        reqwest::Url::parse(server)
            .map_err(|e| TalkError::InvalidInput(format!("Invalid server URL '{}': {}", server, e)))?;
        config.server_url = Some(server.trim_end_matches('/').to_string());
        changed = true;
    }
    if let Some(reporter) = matches.get_one::<String>("reporter") {
        config.reporter_name = Some(reporter.clone());
        changed = true;
    }
    if let Some(ms) = matches.get_one::<u64>("debounce-ms") {
        config.debounce_ms = Some(*ms);
        changed = true;
    }

    if changed {
        save_config(&config)?;
        println!("{} {}", "✅".green(), "Configuration saved.".green().bold());
    }

    if matches.get_flag("show") || !changed {
        println!(
            "{}: {}",
            "Config file".bold(),
            config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "unavailable".to_string())
                .dimmed()
        );
        println!("{}: {}", "Server".bold(), get_server_url(&config).cyan());
        println!(
            "{}: {}",
            "Reporter".bold(),
            config.reporter_name.as_deref().unwrap_or("not set")
        );
        println!("{}: {} ms", "Search debounce".bold(), config.debounce().as_millis());
        if let Some(log) = get_log_file_path() {
            println!("{}: {}", "Log file".bold(), log.display().to_string().dimmed());
        }
    }

    Ok(())
}
