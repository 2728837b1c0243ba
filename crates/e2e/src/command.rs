//! drush sub-commands and command-line formatting

use fixture_bridge_common::EncodedArgument;
use std::fmt;

/// Sub-commands exposed by the backend's test-support drush extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subcommand {
    NodeGetId,
    EntityGetId,
    NodeGetPath,
    NodeGetPathAlias,
    NodeClone,
    EntityAddTranslation,
    TestsCleanUp,
    TranslationCleanUp,
    CheckWatchdog,
    /// Any other drush command, for callers that need the raw channel
    Custom(String),
}

impl Subcommand {
    pub fn as_str(&self) -> &str {
        match self {
            Subcommand::NodeGetId => "test:node-get-id",
            Subcommand::EntityGetId => "test:entity-get-id",
            Subcommand::NodeGetPath => "test:node-get-path",
            Subcommand::NodeGetPathAlias => "test:node-get-path-alias",
            Subcommand::NodeClone => "test:node-clone",
            Subcommand::EntityAddTranslation => "test:entity-add-translation",
            Subcommand::TestsCleanUp => "test:testsCleanUp",
            Subcommand::TranslationCleanUp => "test:translationCleanUp",
            Subcommand::CheckWatchdog => "test:checkWatchdog",
            Subcommand::Custom(name) => name,
        }
    }
}

impl From<&str> for Subcommand {
    fn from(name: &str) -> Self {
        match name {
            "test:node-get-id" => Subcommand::NodeGetId,
            "test:entity-get-id" => Subcommand::EntityGetId,
            "test:node-get-path" => Subcommand::NodeGetPath,
            "test:node-get-path-alias" => Subcommand::NodeGetPathAlias,
            "test:node-clone" => Subcommand::NodeClone,
            "test:entity-add-translation" => Subcommand::EntityAddTranslation,
            "test:testsCleanUp" => Subcommand::TestsCleanUp,
            "test:translationCleanUp" => Subcommand::TranslationCleanUp,
            "test:checkWatchdog" => Subcommand::CheckWatchdog,
            other => Subcommand::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for Subcommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sub-command with its ordered, already encoded arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub subcommand: Subcommand,
    pub args: Vec<EncodedArgument>,
}

impl CommandInvocation {
    pub fn new(subcommand: Subcommand, args: Vec<EncodedArgument>) -> Self {
        Self { subcommand, args }
    }

    /// Single-line form: `<subcommand> "<arg1>" "<arg2>" ...`.
    ///
    /// Arguments are quoted but never escaped; that is the encoder's job.
    pub fn command_line(&self) -> String {
        let mut line = self.subcommand.as_str().to_string();
        for arg in &self.args {
            line.push_str(" \"");
            line.push_str(arg.as_str());
            line.push('"');
        }
        line
    }

    /// Discrete arguments, sub-command first
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.subcommand.as_str().to_string())
            .chain(self.args.iter().map(|a| a.as_str().to_string()))
            .collect()
    }
}

impl fmt::Display for CommandInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}
