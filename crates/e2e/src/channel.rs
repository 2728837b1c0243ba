//! Execution channel - delivering drush commands to the execution target

use async_trait::async_trait;
use fixture_bridge_common::{Error, Result};
use std::process::{Output, Stdio};
use tokio::process::Command;
use tracing::{debug, warn};

use crate::command::CommandInvocation;
use crate::config::{BridgeConfig, ExecMode};
use crate::error::{E2eError, E2eResult};

/// Characters that are expanded or terminate a double-quoted shell word
const SHELL_UNSAFE: &[char] = &['"', '$', '`', '\\'];

/// Raw output of one external command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResult {
    pub stdout: String,
    pub stderr: String,
}

impl RawResult {
    pub fn new(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.stdout
    }
}

impl From<Output> for RawResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Something that can run a drush invocation and hand back its output.
///
/// Each call completes (or fails) before returning. Implementations do not
/// retry and impose no timeout.
#[async_trait]
pub trait ExecutionChannel: Send + Sync {
    async fn execute(&self, invocation: &CommandInvocation) -> Result<RawResult>;
}

#[async_trait]
impl<C: ExecutionChannel + ?Sized> ExecutionChannel for Box<C> {
    async fn execute(&self, invocation: &CommandInvocation) -> Result<RawResult> {
        (**self).execute(invocation).await
    }
}

#[async_trait]
impl<C: ExecutionChannel + ?Sized> ExecutionChannel for std::sync::Arc<C> {
    async fn execute(&self, invocation: &CommandInvocation) -> Result<RawResult> {
        (**self).execute(invocation).await
    }
}

/// Runs drush as a child process, optionally behind an execution target
#[derive(Debug, Clone)]
pub struct DrushChannel {
    mode: ExecMode,
    target: Option<String>,
    target_argv: Vec<String>,
    drush: String,
}

impl DrushChannel {
    pub fn new(config: &BridgeConfig) -> E2eResult<Self> {
        let target = config.exec_target.clone();
        let mode = config.effective_mode();
        let target_argv = match (&target, mode) {
            (Some(t), ExecMode::Argv) => shlex::split(t).ok_or_else(|| {
                E2eError::Config(format!("execution target is not valid shell syntax: {}", t))
            })?,
            _ => Vec::new(),
        };

        Ok(Self {
            mode,
            target,
            target_argv,
            drush: config.drush_binary.clone(),
        })
    }

    pub fn mode(&self) -> ExecMode {
        self.mode
    }

    /// The string handed to `sh -c` in shell mode.
    ///
    /// Fails on arguments the two quoting layers would mangle instead of
    /// letting the backend see a different value.
    pub fn shell_line(&self, invocation: &CommandInvocation) -> Result<String> {
        for arg in &invocation.args {
            if let Some(ch) = arg.as_str().chars().find(|c| SHELL_UNSAFE.contains(c)) {
                return Err(Error::UnsafeArgument {
                    argument: arg.as_str().to_string(),
                    reason: format!("contains {:?}, which does not survive double quoting", ch),
                });
            }
            if self.target.is_some() && arg.as_str().contains('\'') {
                return Err(Error::UnsafeArgument {
                    argument: arg.as_str().to_string(),
                    reason: "contains a single quote, which breaks the execution target wrapper".to_string(),
                });
            }
        }

        let drush_line = format!("{} {}", self.drush, invocation.command_line());
        Ok(match &self.target {
            Some(target) => format!("{} '{}'", target, drush_line),
            None => drush_line,
        })
    }

    /// Program and arguments for argv mode
    pub fn argv(&self, invocation: &CommandInvocation) -> (String, Vec<String>) {
        let mut parts: Vec<String> = self.target_argv.clone();
        parts.push(self.drush.clone());
        parts.extend(invocation.argv());
        let program = parts.remove(0);
        (program, parts)
    }

    async fn run(&self, program: &str, args: &[String], command_text: String) -> Result<RawResult> {
        debug!(command = %command_text, "Running drush command");

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| Error::Spawn {
                command: command_text.clone(),
                source,
            })?;

        let status = output.status;
        let raw = RawResult::from(output);

        if !status.success() {
            warn!(command = %command_text, %status, "drush command failed");
            return Err(Error::Execution {
                command: command_text,
                status: status.to_string(),
                stdout: raw.stdout,
                stderr: raw.stderr,
            });
        }

        debug!(command = %command_text, bytes = raw.stdout.len(), "drush command finished");
        Ok(raw)
    }
}

#[async_trait]
impl ExecutionChannel for DrushChannel {
    async fn execute(&self, invocation: &CommandInvocation) -> Result<RawResult> {
        match self.mode {
            ExecMode::Shell => {
                let line = self.shell_line(invocation)?;
                self.run("sh", &["-c".to_string(), line.clone()], line).await
            }
            ExecMode::Argv => {
                let (program, args) = self.argv(invocation);
                let command_text = std::iter::once(program.as_str())
                    .chain(args.iter().map(String::as_str))
                    .collect::<Vec<_>>()
                    .join(" ");
                self.run(&program, &args, command_text).await
            }
        }
    }
}
