use std::io::{BufRead, Write};

use clap::{Args, Subcommand};

use crate::cmd::prompt::{Console, display_value};
use crate::config::{
    DEFAULT_API_BASE_URL, DEFAULT_LOG_FILTER, StoredConfig, config_file_path, normalize_base_url,
};
use crate::error::{AppError, AppResult};

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Run the interactive configuration wizard.
    Init,
    /// Show the stored configuration.
    Show,
}

pub fn run(command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Init => run_init(),
        ConfigCommand::Show => run_show(),
    }
}

fn run_init() -> AppResult<()> {
    let mut cfg = StoredConfig::load()?;
    let mut console = Console::stdio();

    prompt_config(&mut console, &mut cfg)?;
    cfg.save()?;

    let path = config_file_path()?;
    console.say(&format!("\nConfiguration saved to {}", path.display()))?;
    Ok(())
}

fn prompt_config<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    cfg: &mut StoredConfig,
) -> AppResult<()> {
    console.say("Configuring hospital-desk.")?;
    console.say("Press Enter to keep the current value, '-' to clear it.")?;
    console.say("")?;

    console.apply(
        &format!("Portal API base URL (default {DEFAULT_API_BASE_URL})"),
        &mut cfg.api_base_url,
    )?;
    if let Some(url) = &cfg.api_base_url {
        cfg.api_base_url = Some(normalize_base_url(url)?);
    }
    console.apply("Default username", &mut cfg.username)?;
    console.apply("Department (narrows department dashboards)", &mut cfg.department)?;

    let mut timeout = cfg.request_timeout_secs.map(|secs| secs.to_string());
    console.apply("Request timeout in seconds", &mut timeout)?;
    cfg.request_timeout_secs = match timeout {
        Some(value) => Some(parse_timeout(&value)?),
        None => None,
    };

    console.apply(
        &format!("Log filter (default {DEFAULT_LOG_FILTER})"),
        &mut cfg.log_filter,
    )?;
    Ok(())
}

fn parse_timeout(value: &str) -> AppResult<u64> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(AppError::Configuration(format!(
            "request timeout must be a positive number of seconds (got '{value}')"
        ))),
    }
}

fn run_show() -> AppResult<()> {
    let cfg = StoredConfig::load()?;
    let path = config_file_path()?;

    println!("Configuration file: {}", path.display());
    println!("API base URL: {}", display_value(&cfg.api_base_url));
    println!("Username: {}", display_value(&cfg.username));
    println!("Department: {}", display_value(&cfg.department));
    println!(
        "Request timeout: {}",
        display_value(&cfg.request_timeout_secs.map(|secs| format!("{secs}s")))
    );
    println!("Log filter: {}", display_value(&cfg.log_filter));

    Ok(())
}
