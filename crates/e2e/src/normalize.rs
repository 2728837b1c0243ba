//! Result normalization for drush output

use fixture_bridge_common::{Error, Result};
use serde::Serialize;
use serde_json::Value;

use crate::channel::RawResult;

/// Field in the watchdog report holding the error count
pub const ERROR_COUNT_FIELD: &str = "numberOfErrors";

/// Shape a sub-command promises for its output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultShape {
    /// An id; all trailing whitespace is noise
    Identifier,
    /// A path; only trailing newlines are noise
    Path,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NormalizedResult {
    Identifier(String),
    Path(String),
    Json(Value),
}

impl NormalizedResult {
    /// Text of an identifier or path result
    pub fn as_str(&self) -> Option<&str> {
        match self {
            NormalizedResult::Identifier(s) | NormalizedResult::Path(s) => Some(s),
            NormalizedResult::Json(_) => None,
        }
    }

    /// Text of an identifier or path result. A JSON result is a parse fault.
    pub fn into_text(self) -> Result<String> {
        match self {
            NormalizedResult::Identifier(s) | NormalizedResult::Path(s) => Ok(s),
            NormalizedResult::Json(value) => Err(Error::Parse {
                message: "expected text output, got JSON".to_string(),
                raw: value.to_string(),
            }),
        }
    }

    pub fn into_json(self) -> Option<Value> {
        match self {
            NormalizedResult::Json(v) => Some(v),
            _ => None,
        }
    }
}

/// Outcome of an error log check
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ErrorLogCheck {
    /// Number of matching log entries
    Count(u64),
    /// The full report, when verbose output was requested
    Report(Value),
}

impl ErrorLogCheck {
    /// Error count, read from the report when verbose output was requested
    pub fn error_count(&self) -> Result<u64> {
        match self {
            ErrorLogCheck::Count(n) => Ok(*n),
            ErrorLogCheck::Report(report) => number_of_errors(report),
        }
    }
}

pub fn normalize(raw: &RawResult, shape: ResultShape) -> Result<NormalizedResult> {
    match shape {
        ResultShape::Identifier => Ok(NormalizedResult::Identifier(identifier(raw.text()))),
        ResultShape::Path => Ok(NormalizedResult::Path(path(raw.text()))),
        ResultShape::Json => json(raw.text()).map(NormalizedResult::Json),
    }
}

/// Strip all trailing whitespace, newlines included
pub fn identifier(text: &str) -> String {
    text.trim_end().to_string()
}

/// Strip trailing newlines only; trailing spaces are part of the path
pub fn path(text: &str) -> String {
    text.trim_end_matches('\n').to_string()
}

pub fn json(text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|e| Error::Parse {
        message: e.to_string(),
        raw: text.to_string(),
    })
}

/// Read the error count from a watchdog report.
///
/// The backend has emitted the count both as a number and as a numeric
/// string.
pub fn number_of_errors(report: &Value) -> Result<u64> {
    let field = report.get(ERROR_COUNT_FIELD);
    let count = match field {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    count.ok_or_else(|| Error::Parse {
        message: match field {
            Some(v) => format!("'{}' is not a non-negative integer: {}", ERROR_COUNT_FIELD, v),
            None => format!("report has no '{}' field", ERROR_COUNT_FIELD),
        },
        raw: report.to_string(),
    })
}
