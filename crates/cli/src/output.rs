//! Output formatting for CLI

use clap::ValueEnum;
use serde::Serialize;
use std::fmt::Display;

/// Output format
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Bare value, suitable for shell substitution
    #[default]
    Plain,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Render a single value
pub fn render_value<T: Serialize + Display + ?Sized>(value: &T, format: OutputFormat) -> String {
    match format {
        OutputFormat::Plain => value.to_string(),
        OutputFormat::Json => serde_json::to_string_pretty(value).unwrap_or_default(),
        OutputFormat::Yaml => serde_yaml::to_string(value)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// Print a single value
pub fn print_value<T: Serialize + Display + ?Sized>(value: &T, format: OutputFormat) {
    println!("{}", render_value(value, format));
}

/// Print raw command output unchanged in plain mode
pub fn print_raw(output: &str, format: OutputFormat) {
    match format {
        OutputFormat::Plain => print!("{}", output),
        _ => print_value(output, format),
    }
}

/// Print a JSON document
pub fn print_json(value: &serde_json::Value, format: OutputFormat) {
    match format {
        OutputFormat::Yaml => println!(
            "{}",
            serde_yaml::to_string(value)
                .map(|s| s.trim_end().to_string())
                .unwrap_or_default()
        ),
        _ => println!("{}", serde_json::to_string_pretty(value).unwrap_or_default()),
    }
}

/// Print success message
pub fn print_success(message: &str) {
    eprintln!("✅ {}", message);
}

/// Print error message
pub fn print_error(message: &str) {
    eprintln!("❌ {}", message);
}

/// Print warning message
pub fn print_warning(message: &str) {
    eprintln!("⚠️  {}", message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain_keeps_trailing_space() {
        assert_eq!(render_value("/my-node/ ", OutputFormat::Plain), "/my-node/ ");
    }

    #[test]
    fn test_render_json_and_yaml() {
        assert_eq!(render_value("42", OutputFormat::Json), "\"42\"");
        assert_eq!(render_value(&3u64, OutputFormat::Yaml), "3");
    }
}
