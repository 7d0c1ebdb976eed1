//! # contract: the command-execution seam of the deploy workflow
//!
//! This module defines a single trait ([`CommandRunner`]) and the plain data
//! types flowing through it. The workflow in [`crate::deploy`] only ever talks
//! to the AWS CLI through this trait, so it can be driven by a real subprocess
//! runner, a dry-run printer, or a `mockall` mock in tests.
//!
//! ## Mocking & Testing
//! - The trait is annotated for `mockall`; `MockCommandRunner` is exported
//!   under `test` and the default `test-export-mocks` feature.
//!
//! ## Adding New Runners
//! - Implement [`CommandRunner`] for your type.
//! - Map launch failures and non-zero exits to [`DeployError::Execution`].
//! - Treat stderr output alone as success.

use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

use crate::error::DeployError;

/// One external invocation: program, argv, and an optional working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// True when `flag` appears immediately followed by `value`.
    pub fn has_flag_value(&self, flag: &str, value: &str) -> bool {
        self.args
            .windows(2)
            .any(|pair| pair[0] == flag && pair[1] == value)
    }

    /// All values passed after each occurrence of `flag`, in order.
    pub fn flag_values(&self, flag: &str) -> Vec<&str> {
        self.args
            .windows(2)
            .filter(|pair| pair[0] == flag)
            .map(|pair| pair[1].as_str())
            .collect()
    }
}

fn needs_quotes(arg: &str) -> bool {
    arg.is_empty()
        || arg
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '*' | '?' | '"' | '\'' | '$' | '&' | '|' | ';'))
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if needs_quotes(arg) {
                write!(f, " \"{}\"", arg.replace('"', "\\\""))?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Captured result of a successful invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn from_stdout(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }
}

/// Runs one external command to completion.
///
/// Implementations resolve with the captured output when the process exits
/// successfully, and fail with [`DeployError::Execution`] when it cannot be
/// launched or exits with a non-zero status. No retries.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, DeployError>;
}
