//! Fixture operations - the drush test commands available to e2e tests
//!
//! Every operation runs the same pipeline:
//!
//! ```text
//! fixture values -> encode -> CommandInvocation -> ExecutionChannel -> normalize
//! ```
//!
//! All encoding happens before the channel is touched, so an encoding fault
//! never launches a process. Faults from the channel are returned as-is.

use fixture_bridge_common::{encode, encode_transport, EncodedArgument, FixtureValue};
use serde_json::Value;
use tracing::{debug, info};

use crate::channel::{DrushChannel, ExecutionChannel, RawResult};
use crate::command::{CommandInvocation, Subcommand};
use crate::config::BridgeConfig;
use crate::error::E2eResult;
use crate::normalize::{self, ErrorLogCheck, ResultShape, ERROR_COUNT_FIELD};

/// Moderation state given to cloned nodes unless the caller picks one
pub const DEFAULT_MODERATION_STATE: &str = "published";

/// Entry point for fixture setup, lookup and cleanup
pub struct FixtureBridge<C = DrushChannel> {
    channel: C,
}

impl FixtureBridge<DrushChannel> {
    /// Bridge that runs drush as configured
    pub fn from_config(config: &BridgeConfig) -> E2eResult<Self> {
        Ok(Self::new(DrushChannel::new(config)?))
    }
}

impl<C: ExecutionChannel> FixtureBridge<C> {
    pub fn new(channel: C) -> Self {
        Self { channel }
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Run any sub-command with literal arguments
    pub async fn run(&self, subcommand: impl Into<Subcommand>, args: &[&str]) -> E2eResult<RawResult> {
        let args = args.iter().map(|a| EncodedArgument::literal(*a)).collect();
        self.execute(CommandInvocation::new(subcommand.into(), args)).await
    }

    async fn execute(&self, invocation: CommandInvocation) -> E2eResult<RawResult> {
        debug!(subcommand = %invocation.subcommand, args = invocation.args.len(), "Executing fixture command");
        Ok(self.channel.execute(&invocation).await?)
    }

    async fn execute_as(&self, invocation: CommandInvocation, shape: ResultShape) -> E2eResult<String> {
        let raw = self.execute(invocation).await?;
        Ok(normalize::normalize(&raw, shape)?.into_text()?)
    }

    /// Node ID of the node with the given title.
    ///
    /// The title is always sent literally.
    pub async fn node_id(&self, title: &str) -> E2eResult<String> {
        let invocation = CommandInvocation::new(Subcommand::NodeGetId, vec![EncodedArgument::literal(title)]);
        self.execute_as(invocation, ResultShape::Identifier).await
    }

    /// ID of the single entity of `entity_type` matching `spec`
    pub async fn entity_id(&self, entity_type: &str, spec: &FixtureValue) -> E2eResult<String> {
        let invocation = CommandInvocation::new(
            Subcommand::EntityGetId,
            vec![EncodedArgument::literal(entity_type), encode(spec)?],
        );
        self.execute_as(invocation, ResultShape::Identifier).await
    }

    /// Internal path of the node with the given title
    pub async fn node_path(&self, title: &str) -> E2eResult<String> {
        let invocation = CommandInvocation::new(Subcommand::NodeGetPath, vec![EncodedArgument::literal(title)]);
        self.execute_as(invocation, ResultShape::Path).await
    }

    /// Path alias of a node, prefixed with `/<langcode>` when a language is given.
    ///
    /// `title` must be the title in the original language.
    pub async fn node_path_alias(&self, title: &str, langcode: Option<&str>) -> E2eResult<String> {
        let langcode = langcode.unwrap_or("");
        let invocation = CommandInvocation::new(
            Subcommand::NodeGetPathAlias,
            vec![EncodedArgument::literal(title), EncodedArgument::literal(langcode)],
        );
        let alias = self.execute_as(invocation, ResultShape::Path).await?;
        if langcode.is_empty() {
            Ok(alias)
        } else {
            Ok(format!("/{}{}", langcode, alias))
        }
    }

    /// Clone a node under a new title, returning the command output
    pub async fn clone_node(
        &self,
        node_type: &str,
        title: &str,
        new_title: &str,
        moderation_state: Option<&str>,
    ) -> E2eResult<String> {
        let invocation = CommandInvocation::new(
            Subcommand::NodeClone,
            vec![
                EncodedArgument::literal(node_type),
                EncodedArgument::literal(title),
                EncodedArgument::literal(new_title),
                EncodedArgument::literal(moderation_state.unwrap_or(DEFAULT_MODERATION_STATE)),
            ],
        );
        info!(node_type, title, new_title, "Cloning node");
        Ok(self.execute(invocation).await?.stdout)
    }

    /// Add a translation to a content entity unless one exists already.
    ///
    /// The backend leaves an existing translation untouched, even if it
    /// differs from `translation`; only the backend can report that.
    pub async fn add_entity_translation(
        &self,
        entity_type: &str,
        spec: &FixtureValue,
        langcode: &str,
        translation: &FixtureValue,
    ) -> E2eResult<String> {
        let invocation = CommandInvocation::new(
            Subcommand::EntityAddTranslation,
            vec![
                EncodedArgument::literal(entity_type),
                encode(spec)?,
                EncodedArgument::literal(langcode),
                encode_transport(translation)?,
            ],
        );
        info!(entity_type, langcode, "Ensuring entity translation");
        Ok(self.execute(invocation).await?.stdout)
    }

    /// Remove content whose title starts with `keyword`
    pub async fn clean_up_content(&self, keyword: &str) -> E2eResult<()> {
        let invocation = CommandInvocation::new(Subcommand::TestsCleanUp, vec![EncodedArgument::literal(keyword)]);
        info!(keyword, "Cleaning up test content");
        self.execute(invocation).await?;
        Ok(())
    }

    /// Remove `langcode` translations whose title starts with `keyword`
    pub async fn clean_up_translation(&self, keyword: &str, langcode: &str) -> E2eResult<()> {
        let invocation = CommandInvocation::new(
            Subcommand::TranslationCleanUp,
            vec![EncodedArgument::literal(keyword), EncodedArgument::literal(langcode)],
        );
        info!(keyword, langcode, "Cleaning up test translations");
        self.execute(invocation).await?;
        Ok(())
    }

    /// Check the watchdog log for errors logged since `since` (unix seconds).
    ///
    /// `fail_on_notice` lowers the severity threshold to notices. Returns the
    /// full report when `verbose`, otherwise just the error count.
    pub async fn check_error_log(&self, since: i64, fail_on_notice: bool, verbose: bool) -> E2eResult<ErrorLogCheck> {
        let invocation = CommandInvocation::new(
            Subcommand::CheckWatchdog,
            vec![
                EncodedArgument::literal(since.to_string()),
                EncodedArgument::from(fail_on_notice),
                EncodedArgument::from(verbose),
            ],
        );
        let raw = self.execute(invocation).await?;
        let report = normalize::json(raw.text())?;
        if verbose {
            Ok(ErrorLogCheck::Report(report))
        } else {
            Ok(ErrorLogCheck::Count(normalize::number_of_errors(&report)?))
        }
    }

    pub async fn error_count(&self, since: i64, fail_on_notice: bool) -> E2eResult<u64> {
        let check = self.check_error_log(since, fail_on_notice, false).await?;
        Ok(check.error_count()?)
    }

    pub async fn error_report(&self, since: i64, fail_on_notice: bool) -> E2eResult<Value> {
        match self.check_error_log(since, fail_on_notice, true).await? {
            ErrorLogCheck::Report(report) => Ok(report),
            ErrorLogCheck::Count(n) => Ok(serde_json::json!({ ERROR_COUNT_FIELD: n })),
        }
    }
}
