mod client;
mod commands;
mod config;
mod controller;
mod models;
mod web;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use client::ActivitiesClient;
use controller::Controller;

/// Mergington High activities — browse, sign up for, and manage
/// extracurricular activities from the terminal or a web dashboard.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print detailed API responses
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Path to config file
    #[arg(short = 'c', long, global = true, default_value = "config.toml")]
    config: PathBuf,

    /// Override the activities API base URL from config
    #[arg(long, global = true)]
    server: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show all activities with schedules, availability and rosters
    List,

    /// Sign a student up for an activity
    ///
    /// Example:
    ///   signup "Chess Club" michael@mergington.edu
    Signup {
        /// Activity name, exactly as listed
        activity: String,

        /// Student email address
        email: String,
    },

    /// Remove a participant from an activity (asks for confirmation)
    Unregister {
        /// Activity name, exactly as listed
        activity: String,

        /// Participant email address
        email: String,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Start the web dashboard server
    Serve {
        /// Listen address (e.g. "0.0.0.0:3000")
        #[arg(short = 'a', long, default_value = "0.0.0.0:3010")]
        addr: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let mut cfg = config::load_config(&cli.config)?;
    if let Some(server) = &cli.server {
        cfg.server.base_url = server.clone();
    }

    match &cli.command {
        Command::Serve { addr } => {
            web::serve(cfg, addr).await?;
        }
        Command::List => {
            let controller = Controller::new(ActivitiesClient::new(&cfg.server.base_url)?);
            commands::run_list(&controller).await?;
        }
        Command::Signup { activity, email } => {
            let controller = Controller::new(ActivitiesClient::new(&cfg.server.base_url)?);
            commands::run_signup(&controller, activity, email).await?;
        }
        Command::Unregister {
            activity,
            email,
            yes,
        } => {
            let controller = Controller::new(ActivitiesClient::new(&cfg.server.base_url)?);
            commands::run_unregister(&controller, activity, email, *yes).await?;
        }
    }

    Ok(())
}
