mod cache;
mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod logging;
mod services;
mod workflow;

use clap::{Args, Parser, Subcommand};

use crate::cache::TicketDraftCache;
use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::prompt::Console;
use crate::cmd::{dashboard, menu};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;

#[derive(Parser)]
#[command(
    name = "hospital-desk",
    author,
    version,
    about = "Role-based hospital maintenance ticketing client"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and work on your dashboard.
    Login(LoginArgs),
    /// Print the sidebar menu a role tag resolves to.
    Menu {
        /// Role tag as returned by the backend, e.g. `department`.
        role: String,
    },
    /// Manage CLI configuration.
    Config(ConfigArgs),
}

#[derive(Args)]
struct LoginArgs {
    /// Username to offer at the prompt.
    #[arg(short, long)]
    username: Option<String>,
    /// Override the configured portal API base URL.
    #[arg(long)]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Config(args) => {
            config_cmd::run(args.command)?;
            Ok(())
        }
        Commands::Menu { role } => {
            menu::run(&role);
            Ok(())
        }
        Commands::Login(args) => run_login(args).await,
    }
}

async fn run_login(args: LoginArgs) -> AppResult<()> {
    let mut config = AppConfig::load()?;
    logging::init(&config.log_filter);

    if let Some(url) = &args.api_url {
        config = config.with_api_base_url(url)?;
    }

    let mut drafts = TicketDraftCache::load(&config.config_dir)?;
    let context = AppContext::connect(config)?;
    let mut console = Console::stdio();

    dashboard::run(&context, &mut console, &mut drafts, args.username).await
}
