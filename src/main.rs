//! coffeeshop - management backend for a small coffeeshop

use anyhow::Context;
use clap::Parser;
use coffeeshop_rs::{Config, build_info, server};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "coffeeshop", version, about)]
struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, env = "COFFEESHOP_CONFIG", default_value = "config/coffeeshop.yaml")]
    config: PathBuf,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Validate the configuration and exit
    #[arg(long)]
    check: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn load_config(path: &PathBuf) -> anyhow::Result<Config> {
    let mut config = if path.exists() {
        Config::from_file(path)
            .await
            .with_context(|| format!("failed to load {}", path.display()))?
    } else {
        warn!(
            "Configuration file {} not found, using defaults",
            path.display()
        );
        Config::default()
    };

    config
        .apply_env_overrides()
        .context("invalid environment override")?;
    config.validate().context("invalid configuration")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    init_tracing(args.json_logs);

    let build = build_info();
    info!(
        "coffeeshop {} (git {}, built {})",
        build.version, build.git_hash, build.build_time
    );

    let config = match load_config(&args.config).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.check {
        info!("Configuration is valid");
        return ExitCode::SUCCESS;
    }

    match server::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Display keeps multi-line messages readable
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
