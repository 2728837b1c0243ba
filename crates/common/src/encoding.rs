//! Payload encoding for fixture command arguments
//!
//! drush test commands accept structured specs as base64 encoded JSON so the
//! payload survives one layer of shell quoting and one layer of argument
//! parsing. Plain labels are passed through literally.
//!
//! ```text
//!   Label("Simple Title")        -> Simple Title
//!   Structured({"field_ref":..}) -> JSON -> \uXXXX escape -> base64
//!   Label("{\"x\": 1}")          -> base64 (legacy shape heuristic)
//! ```

use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{Error, Result};
use crate::types::{EncodedArgument, FixtureValue};

/// Encode a fixture value for use as a command argument.
///
/// Labels stay literal unless they look like a JSON object, in which case
/// they are transport encoded as-is. Structured values are always transport
/// encoded.
pub fn encode(value: &FixtureValue) -> Result<EncodedArgument> {
    match value {
        FixtureValue::Label(text) => {
            if legacy::looks_like_json_object(text) {
                warn!(
                    label = %text,
                    "label is shaped like a JSON object; sending it as a structured spec"
                );
                Ok(transport_encode(text))
            } else {
                Ok(EncodedArgument::literal(text.as_str()))
            }
        }
        FixtureValue::Structured(map) => encode_structured(map),
    }
}

/// Encode a fixture value, transport encoding it regardless of shape.
///
/// Used for translation payloads, which the backend always base64 decodes.
pub fn encode_transport(value: &FixtureValue) -> Result<EncodedArgument> {
    match value {
        FixtureValue::Label(text) => Ok(transport_encode(text)),
        FixtureValue::Structured(map) => encode_structured(map),
    }
}

fn encode_structured(map: &Map<String, Value>) -> Result<EncodedArgument> {
    let json = serde_json::to_string(map)
        .map_err(|e| Error::Encoding(format!("failed to serialize structured value: {}", e)))?;
    Ok(transport_encode(&escape_non_ascii(&json)))
}

fn transport_encode(text: &str) -> EncodedArgument {
    EncodedArgument::transport(STANDARD.encode(text.as_bytes()))
}

/// Replace every UTF-16 code unit >= 0x7F with a `\uxxxx` escape.
///
/// Characters outside the BMP become a surrogate pair of escapes, which JSON
/// decoders reassemble.
pub fn escape_non_ascii(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut units = [0u16; 2];
    for ch in json.chars() {
        if (ch as u32) < 0x7F {
            out.push(ch);
            continue;
        }
        for unit in ch.encode_utf16(&mut units).iter() {
            out.push_str(&format!("\\u{:04x}", unit));
        }
    }
    out
}

/// Decode a transport encoded argument back to text.
///
/// This mirrors what the receiving drush command does and exists for tests
/// and diagnostics.
pub fn decode_transport(encoded: &str) -> Result<String> {
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| Error::Encoding(format!("invalid base64 argument: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| Error::Encoding(format!("decoded argument is not UTF-8: {}", e)))
}

/// Shape sniffing for untyped callers.
///
/// A label that happens to look like `{"key": value}` cannot be told apart
/// from a structured spec serialized by hand. It is treated as structured.
pub mod legacy {
    use once_cell::sync::Lazy;
    use regex::Regex;

    static JSON_OBJECT_SHAPE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r#"(?s)^\s*\{\s*".*"\s*:.*\}\s*$"#).expect("valid JSON shape pattern"));

    /// Whether text has the brace / quoted key / colon shape of a JSON object.
    pub fn looks_like_json_object(text: &str) -> bool {
        JSON_OBJECT_SHAPE.is_match(text)
    }
}
