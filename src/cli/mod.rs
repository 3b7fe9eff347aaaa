pub mod commands;
pub mod config;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::client::{JoblyClient, Session};

#[derive(Parser)]
#[command(name = "jobly")]
#[command(about = "Jobly CLI - job board client")]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        help = "Server base URL (defaults to JOBLY_BASE_URL or http://localhost:3001)"
    )]
    pub base_url: Option<String>,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Authentication and session management")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Browse and manage companies")]
    Companies {
        #[command(subcommand)]
        cmd: commands::companies::CompanyCommands,
    },

    #[command(about = "Browse jobs and apply to them")]
    Jobs {
        #[command(subcommand)]
        cmd: commands::jobs::JobCommands,
    },

    #[command(about = "User accounts and profiles")]
    Users {
        #[command(subcommand)]
        cmd: commands::users::UserCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Build the API client for this invocation: base URL from the flag or
/// environment, session restored from the config dir.
fn build_client(cli: &Cli) -> anyhow::Result<JoblyClient> {
    let stored = config::load_session()?;
    let session = match stored.token {
        Some(token) => Session::with_token(token),
        None => Session::new(),
    };

    Ok(match &cli.base_url {
        Some(base_url) => JoblyClient::with_session(base_url.clone(), session),
        None => JoblyClient::from_env(session),
    })
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let mut client = build_client(&cli)?;

    match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, output_format, &mut client).await,
        Commands::Companies { cmd } => {
            commands::companies::handle(cmd, output_format, &client).await
        }
        Commands::Jobs { cmd } => commands::jobs::handle(cmd, output_format, &client).await,
        Commands::Users { cmd } => commands::users::handle(cmd, output_format, &client).await,
    }
}
