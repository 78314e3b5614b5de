#![forbid(unsafe_code)]

//! Tankwatch CLI
//!
//! Runs the encroachment service and queries its store from the shell.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tankwatch_analysis::{DateRange, Dashboard};
use tankwatch_api::{Server, ServiceConfig};
use tankwatch_core::{Period, RecordFilter};
use tracing_subscriber::EnvFilter;

/// Tankwatch - irrigation tank encroachment reports
#[derive(Parser, Debug)]
#[command(name = "tankwatch", author, version, about, long_about = None)]
struct Args {
    /// Configuration file path (TOML)
    #[arg(short, long, env = "TANKWATCH_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Record store connection string (`sqlite:...` or `memory`)
    #[arg(long, env = "DATABASE_URL", global = true)]
    database_url: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT", global = true)]
    port: Option<u16>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Print matching reports as JSON
    List {
        /// Exact tank name
        #[arg(long)]
        tank: Option<String>,
        /// Observation year
        #[arg(long)]
        year: Option<i32>,
        /// Observation month (1-12), used with --year
        #[arg(long, requires = "year")]
        month: Option<u32>,
    },
    /// Print the analysis dashboard for one tank as JSON
    Analyze {
        /// Tank name
        #[arg(long)]
        tank: String,
        /// First observation date charted (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last observation date charted (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Print the resolved configuration as TOML
    Config,
}

impl Args {
    /// Defaults, then the config file, then the environment, then flags.
    fn resolve_config(&self) -> Result<ServiceConfig> {
        let mut config = ServiceConfig::load(self.config.as_deref())?.apply_env()?;
        if let Some(url) = &self.database_url {
            config.database_url = url.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        Ok(config)
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info,tankwatch=debug" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = args.resolve_config()?;
    tracing::debug!(?config, "Resolved configuration");

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let server = Server::connect(config)
                .await
                .context("failed to connect to the record store")?;
            server.run().await?;
        }
        Command::List { tank, year, month } => {
            let store = tankwatch_storage::connect(&config.database_url).await?;
            let mut filter = RecordFilter::all();
            if let Some(tank) = tank.filter(|t| !t.is_empty()) {
                filter = filter.with_tank(tank);
            }
            if let Some(period) = Period::from_parts(year, month)? {
                filter = filter.with_period(period);
            }
            let records = store.list(&filter).await?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Command::Analyze { tank, from, to } => {
            let store = tankwatch_storage::connect(&config.database_url).await?;
            let records = store.list(&RecordFilter::all().with_tank(tank.clone())).await?;
            let mut dashboard = Dashboard::new(tank, records);
            dashboard.set_range(DateRange {
                start: from,
                end: to,
            });
            println!("{}", serde_json::to_string_pretty(&dashboard.view())?);
        }
        Command::Config => {
            print!("{}", config.to_toml_string()?);
        }
    }

    Ok(())
}
