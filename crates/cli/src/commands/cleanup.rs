//! Cleanup Commands

use anyhow::Result;
use clap::Subcommand;
use fixture_bridge_e2e::FixtureBridge;

use crate::output::print_success;

#[derive(Subcommand)]
pub enum CleanupCommands {
    /// Remove content whose title starts with a keyword
    Content {
        /// Title prefix used by the test run
        keyword: String,
    },

    /// Remove translations whose title starts with a keyword
    Translation {
        /// Title prefix used by the test run
        keyword: String,

        /// Language of the translations to remove
        langcode: String,
    },
}

pub async fn execute(cmd: CleanupCommands, bridge: &FixtureBridge) -> Result<()> {
    match cmd {
        CleanupCommands::Content { keyword } => {
            bridge.clean_up_content(&keyword).await?;
            print_success(&format!("Removed content matching '{}'", keyword));
        }
        CleanupCommands::Translation { keyword, langcode } => {
            bridge.clean_up_translation(&keyword, &langcode).await?;
            print_success(&format!("Removed '{}' translations matching '{}'", langcode, keyword));
        }
    }

    Ok(())
}
