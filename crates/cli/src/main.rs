//! Fixture Bridge CLI - Main Entry Point
//!
//! Runs the drush test fixture commands from a shell, with the same encoding
//! and execution rules the e2e tests use.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod commands;
mod output;

use commands::{cleanup, entity, node, site, watchdog};
use fixture_bridge_e2e::{BridgeConfig, ExecMode, FixtureBridge};

/// Fixture Bridge - drush test fixtures for end-to-end tests
#[derive(Parser)]
#[command(name = "fixture-bridge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// TOML configuration file; the environment is used when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Command prefix that runs drush inside the backend container
    #[arg(long, global = true)]
    exec_target: Option<String>,

    /// How commands are passed to the execution target
    #[arg(long, global = true)]
    exec_mode: Option<ExecModeArg>,

    /// Output format
    #[arg(long, default_value = "plain", global = true)]
    format: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ExecModeArg {
    /// Single command string through sh -c
    Shell,
    /// Discrete process arguments
    Argv,
}

impl From<ExecModeArg> for ExecMode {
    fn from(arg: ExecModeArg) -> Self {
        match arg {
            ExecModeArg::Shell => ExecMode::Shell,
            ExecModeArg::Argv => ExecMode::Argv,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Look up and clone nodes
    #[command(subcommand)]
    Node(node::NodeCommands),

    /// Look up and translate entities
    #[command(subcommand)]
    Entity(entity::EntityCommands),

    /// Remove test fixtures
    #[command(subcommand)]
    Cleanup(cleanup::CleanupCommands),

    /// Check the error log; exits 1 when errors were logged
    Watchdog(watchdog::WatchdogArgs),

    /// Check site configuration
    #[command(subcommand)]
    Site(site::SiteCommands),

    /// Run any drush command with literal arguments
    Raw {
        /// drush command name
        subcommand: String,

        /// Arguments, passed literally
        args: Vec<String>,
    },

    /// Show the effective configuration
    Config,
}

fn load_config(cli: &Cli) -> anyhow::Result<BridgeConfig> {
    let mut config = match &cli.config {
        Some(path) => BridgeConfig::load(path)?,
        None => BridgeConfig::from_env()?,
    };
    if let Some(target) = &cli.exec_target {
        config.exec_target = Some(target.clone()).filter(|t| !t.trim().is_empty());
    }
    if let Some(mode) = cli.exec_mode {
        config.exec_mode = Some(mode.into());
    }
    Ok(config)
}

fn bridge(config: &BridgeConfig) -> anyhow::Result<FixtureBridge> {
    Ok(FixtureBridge::from_config(config)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&cli)?;
    tracing::debug!(?config, "Loaded configuration");

    let format = cli.format;
    match cli.command {
        Commands::Site(cmd) => {
            if !site::execute(cmd, &config, format)? {
                std::process::exit(1);
            }
        }
        Commands::Config => {
            println!("{:#?}", config);
            println!("effective exec mode: {}", config.effective_mode());
        }
        Commands::Node(cmd) => node::execute(cmd, &bridge(&config)?, format).await?,
        Commands::Entity(cmd) => entity::execute(cmd, &bridge(&config)?, format).await?,
        Commands::Cleanup(cmd) => cleanup::execute(cmd, &bridge(&config)?).await?,
        Commands::Watchdog(args) => {
            let errors = watchdog::execute(args, &bridge(&config)?, format).await?;
            if errors > 0 {
                output::print_error(&format!("{} error(s) logged", errors));
                std::process::exit(1);
            }
        }
        Commands::Raw { subcommand, args } => {
            let args: Vec<&str> = args.iter().map(String::as_str).collect();
            let raw = bridge(&config)?.run(subcommand.as_str(), &args).await?;
            output::print_raw(&raw.stdout, format);
            if !raw.stderr.is_empty() {
                output::print_warning(raw.stderr.trim_end());
            }
        }
    }

    Ok(())
}
