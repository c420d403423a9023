//! Load-test harness CLI for the wod-gen service
//!
//! This tool lists the preset scenarios, shows their load shape, runs them
//! through goose and mints bearer tokens for authenticated runs.

mod commands;
mod runner;
mod token;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{cmd_list, cmd_profile, cmd_run, cmd_token, ProfileOverride};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(clap::Args, Debug, Default)]
struct LoadShape {
    /// Run a constant number of virtual users (requires --duration)
    #[arg(long, requires = "duration", conflicts_with = "stages")]
    vus: Option<usize>,

    /// How long constant load runs, e.g. 30s, 5m (requires --vus)
    #[arg(long, requires = "vus", conflicts_with = "stages")]
    duration: Option<String>,

    /// Ramp stages as target:duration pairs, e.g. 10:30s,50:30s,0:30s
    #[arg(long)]
    stages: Option<String>,
}

impl From<LoadShape> for ProfileOverride {
    fn from(shape: LoadShape) -> Self {
        ProfileOverride {
            vus: shape.vus,
            duration: shape.duration,
            stages: shape.stages,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List available scenarios
    List,

    /// Print the runner options of a scenario as JSON
    Profile {
        /// Scenario name (smoke, list, load, stress, negative)
        scenario: String,

        #[command(flatten)]
        shape: LoadShape,
    },

    /// Run a scenario against the service
    Run {
        /// Scenario name (smoke, list, load, stress, negative)
        scenario: String,

        /// Service root URL, overrides BASE_URL
        #[arg(long)]
        base_url: Option<String>,

        /// Page size for the list scenario
        #[arg(long)]
        limit: Option<usize>,

        /// Page offset for the list scenario
        #[arg(long)]
        offset: Option<usize>,

        #[command(flatten)]
        shape: LoadShape,

        /// Write a goose report (.html, .json or .md)
        #[arg(long)]
        report_file: Option<String>,
    },

    /// Mint an HS256 bearer token signed with AUTH_JWT_SECRET
    Token {
        /// Token subject
        subject: Option<String>,

        /// Token lifetime in hours
        #[arg(long, default_value_t = token::DEFAULT_TTL_HOURS)]
        ttl_hours: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries command output. goose::config
    // reports at info that its own logger cannot replace this one.
    let default_directives = if cli.verbose {
        "debug"
    } else {
        "info,goose::config=warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::List => {
            cmd_list().await?;
        }
        Commands::Profile { scenario, shape } => {
            cmd_profile(scenario, shape.into()).await?;
        }
        Commands::Run {
            scenario,
            base_url,
            limit,
            offset,
            shape,
            report_file,
        } => {
            cmd_run(scenario, base_url, limit, offset, shape.into(), report_file).await?;
        }
        Commands::Token { subject, ttl_hours } => {
            cmd_token(subject, ttl_hours).await?;
        }
    }

    Ok(())
}
