//! Site Commands
//!
//! Questions about the configured site that need no drush call.

use anyhow::Result;
use clap::Subcommand;
use fixture_bridge_e2e::BridgeConfig;

use crate::output::{print_value, OutputFormat};

#[derive(Subcommand)]
pub enum SiteCommands {
    /// Exit non-zero unless every extension is installed
    Extensions {
        /// Extension names
        #[arg(required = true)]
        extensions: Vec<String>,
    },

    /// Print the canonical URL the homepage should advertise
    Canonical {
        /// Frontend base URL
        frontend_url: String,
    },
}

/// Returns whether the check passed
pub fn execute(cmd: SiteCommands, config: &BridgeConfig, format: OutputFormat) -> Result<bool> {
    match cmd {
        SiteCommands::Extensions { extensions } => {
            let enabled = config.extensions_enabled(&extensions);
            print_value(&enabled, format);
            Ok(enabled)
        }
        SiteCommands::Canonical { frontend_url } => {
            let url = config.homepage_canonical_url(&frontend_url)?;
            print_value(&url, format);
            Ok(true)
        }
    }
}
