//! Node Commands

use anyhow::Result;
use clap::Subcommand;
use fixture_bridge_e2e::FixtureBridge;

use crate::output::{print_raw, print_value, OutputFormat};

#[derive(Subcommand)]
pub enum NodeCommands {
    /// Print the node ID for a title
    Id {
        /// Node title in the original language
        title: String,
    },

    /// Print the internal path for a title
    Path {
        /// Node title
        title: String,
    },

    /// Print the path alias for a title
    Alias {
        /// Node title in the original language
        title: String,

        /// Language of the translation; prefixes the alias with /<langcode>
        #[arg(short, long)]
        langcode: Option<String>,
    },

    /// Clone a node under a new title
    Clone {
        /// Node type (bundle)
        node_type: String,

        /// Title of the node to clone
        title: String,

        /// Title for the clone
        new_title: String,

        /// Moderation state of the clone
        #[arg(long, default_value = fixture_bridge_e2e::fixtures::DEFAULT_MODERATION_STATE)]
        moderation_state: String,
    },
}

pub async fn execute(cmd: NodeCommands, bridge: &FixtureBridge, format: OutputFormat) -> Result<()> {
    match cmd {
        NodeCommands::Id { title } => {
            let nid = bridge.node_id(&title).await?;
            print_value(&nid, format);
        }
        NodeCommands::Path { title } => {
            let path = bridge.node_path(&title).await?;
            print_value(&path, format);
        }
        NodeCommands::Alias { title, langcode } => {
            let alias = bridge.node_path_alias(&title, langcode.as_deref()).await?;
            print_value(&alias, format);
        }
        NodeCommands::Clone {
            node_type,
            title,
            new_title,
            moderation_state,
        } => {
            let output = bridge
                .clone_node(&node_type, &title, &new_title, Some(&moderation_state))
                .await?;
            print_raw(&output, format);
        }
    }

    Ok(())
}
