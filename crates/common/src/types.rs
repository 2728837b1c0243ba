//! Fixture value types shared by the bridge crates

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

use crate::error::{Error, Result};

/// A fixture value supplied by a test.
///
/// A `Structured` value used as a lookup key must resolve to exactly one
/// entity on the backend. The bridge does not check this; the external tool
/// fails if it does not hold.
#[derive(Debug, Clone, PartialEq)]
pub enum FixtureValue {
    /// Plain text, typically an entity label or node title
    Label(String),

    /// Field/property name to value, kept in insertion order
    Structured(Map<String, Value>),
}

impl FixtureValue {
    /// Create a label value
    pub fn label(text: impl Into<String>) -> Self {
        Self::Label(text.into())
    }

    /// Create a structured value from anything that serializes to a JSON object
    pub fn structured<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let value = serde_json::to_value(value)
            .map_err(|e| Error::Encoding(format!("fixture value is not serializable: {}", e)))?;
        match value {
            Value::Object(map) => Ok(Self::Structured(map)),
            other => Err(Error::Encoding(format!(
                "structured fixture value must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }
}

impl From<&str> for FixtureValue {
    fn from(text: &str) -> Self {
        Self::Label(text.to_string())
    }
}

impl From<String> for FixtureValue {
    fn from(text: String) -> Self {
        Self::Label(text)
    }
}

impl From<Map<String, Value>> for FixtureValue {
    fn from(map: Map<String, Value>) -> Self {
        Self::Structured(map)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// How an argument was encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingForm {
    /// Passed through unchanged
    Literal,
    /// Base64 of (UTF-8 escaped) JSON or text
    Transport,
}

/// An argument ready to be handed to the command formatter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedArgument {
    text: String,
    form: EncodingForm,
}

impl EncodedArgument {
    /// Wrap text that is passed through as-is (titles, langcodes, keywords)
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            form: EncodingForm::Literal,
        }
    }

    pub(crate) fn transport(text: String) -> Self {
        Self {
            text,
            form: EncodingForm::Transport,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn form(&self) -> EncodingForm {
        self.form
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for EncodedArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<bool> for EncodedArgument {
    fn from(flag: bool) -> Self {
        Self::literal(if flag { "true" } else { "false" })
    }
}
