//! Entity Commands

use anyhow::{Context, Result};
use clap::Subcommand;
use fixture_bridge_e2e::{FixtureBridge, FixtureValue};

use crate::output::{print_raw, print_value, OutputFormat};

#[derive(Subcommand)]
pub enum EntityCommands {
    /// Print the ID of the single entity matching a spec
    Id {
        /// Entity type, e.g. node or taxonomy_term
        entity_type: String,

        /// Entity label, or a JSON object of field values with --json
        spec: String,

        /// Treat the spec as a JSON object of field/property values
        #[arg(long)]
        json: bool,
    },

    /// Add a translation to an entity unless one exists already
    Translate {
        /// Entity type
        entity_type: String,

        /// Entity label, or a JSON object with --spec-json
        spec: String,

        /// Language to translate into
        langcode: String,

        /// Translated field values
        translation: String,

        /// Treat the spec as a JSON object of field/property values
        #[arg(long)]
        spec_json: bool,

        /// Treat the translation as a JSON object of field values
        #[arg(long)]
        translation_json: bool,
    },
}

/// Build a fixture value from command-line text
pub fn fixture_value(text: &str, as_json: bool) -> Result<FixtureValue> {
    if !as_json {
        return Ok(FixtureValue::label(text));
    }
    let value: serde_json::Value =
        serde_json::from_str(text).with_context(|| format!("Invalid JSON: {}", text))?;
    Ok(FixtureValue::structured(&value)?)
}

pub async fn execute(cmd: EntityCommands, bridge: &FixtureBridge, format: OutputFormat) -> Result<()> {
    match cmd {
        EntityCommands::Id { entity_type, spec, json } => {
            let spec = fixture_value(&spec, json)?;
            let id = bridge.entity_id(&entity_type, &spec).await?;
            print_value(&id, format);
        }
        EntityCommands::Translate {
            entity_type,
            spec,
            langcode,
            translation,
            spec_json,
            translation_json,
        } => {
            let spec = fixture_value(&spec, spec_json)?;
            let translation = fixture_value(&translation, translation_json)?;
            let output = bridge
                .add_entity_translation(&entity_type, &spec, &langcode, &translation)
                .await?;
            print_raw(&output, format);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_value_label() {
        assert_eq!(
            fixture_value(r#"{"title": "x"}"#, false).unwrap(),
            FixtureValue::label(r#"{"title": "x"}"#)
        );
    }

    #[test]
    fn test_fixture_value_json() {
        assert!(matches!(
            fixture_value(r#"{"title": "x"}"#, true).unwrap(),
            FixtureValue::Structured(_)
        ));
        assert!(fixture_value("[1, 2]", true).is_err());
        assert!(fixture_value("{broken", true).is_err());
    }
}
