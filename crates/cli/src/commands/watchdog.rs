//! Watchdog Commands
//!
//! Checks the backend error log for entries logged since a point in time.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use colored::Colorize;
use fixture_bridge_e2e::{ErrorLogCheck, FixtureBridge};

use crate::output::{print_json, print_value, OutputFormat};

#[derive(Args)]
pub struct WatchdogArgs {
    /// Unix timestamp or RFC 3339 date to look for errors from
    #[arg(long)]
    pub since: String,

    /// Count notices as errors
    #[arg(long)]
    pub fail_on_notice: bool,

    /// Print the full report instead of the error count
    #[arg(long)]
    pub report: bool,
}

/// Parse `--since` as unix seconds or an RFC 3339 timestamp
pub fn parse_since(value: &str) -> Result<i64> {
    if let Ok(ts) = value.trim().parse::<i64>() {
        return Ok(ts);
    }
    let parsed: DateTime<Utc> = DateTime::parse_from_rfc3339(value.trim())
        .with_context(|| format!("Invalid --since value: {}", value))?
        .with_timezone(&Utc);
    Ok(parsed.timestamp())
}

/// Returns the number of errors found
pub async fn execute(args: WatchdogArgs, bridge: &FixtureBridge, format: OutputFormat) -> Result<u64> {
    let since = parse_since(&args.since)?;
    let check = bridge.check_error_log(since, args.fail_on_notice, args.report).await?;

    match &check {
        ErrorLogCheck::Count(n) => match format {
            OutputFormat::Plain if *n > 0 => println!("{}", n.to_string().red().bold()),
            OutputFormat::Plain => println!("{}", n.to_string().green()),
            _ => print_value(n, format),
        },
        ErrorLogCheck::Report(report) => print_json(report, format),
    }

    Ok(check.error_count()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixture_bridge_e2e::{BridgeConfig, ExecMode};

    #[test]
    fn test_parse_since_unix() {
        assert_eq!(parse_since("1700000000").unwrap(), 1_700_000_000);
    }

    #[test]
    fn test_parse_since_rfc3339() {
        assert_eq!(parse_since("2023-11-14T22:13:20Z").unwrap(), 1_700_000_000);
        assert_eq!(parse_since("2023-11-15T00:13:20+02:00").unwrap(), 1_700_000_000);
    }

    #[test]
    fn test_parse_since_rejects_garbage() {
        assert!(parse_since("yesterday").is_err());
    }

    /// Bridge whose drush prints `output` and ignores its arguments
    #[cfg(unix)]
    fn bridge_printing(output: &str) -> FixtureBridge {
        FixtureBridge::from_config(&BridgeConfig {
            exec_mode: Some(ExecMode::Shell),
            drush_binary: format!("echo '{}' #", output),
            ..Default::default()
        })
        .unwrap()
    }

    #[cfg(unix)]
    fn report_args() -> WatchdogArgs {
        WatchdogArgs {
            since: "1700000000".to_string(),
            fail_on_notice: false,
            report: true,
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_report_count_is_returned() {
        let bridge = bridge_printing(r#"{"numberOfErrors":"2","errors":["a","b"]}"#);
        let count = execute(report_args(), &bridge, OutputFormat::Json).await.unwrap();
        assert_eq!(count, 2);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_report_without_count_fails() {
        let bridge = bridge_printing(r#"{"errors":["a"]}"#);
        let err = execute(report_args(), &bridge, OutputFormat::Json).await.unwrap_err();
        assert!(err.to_string().contains("numberOfErrors"));
    }
}
