//! Concrete [`CommandRunner`] implementations.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, error, info};

use crate::contract::{CommandOutput, CommandRunner, CommandSpec};
use crate::error::DeployError;

/// Spawns the command as a child process and captures its output.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRunner;

impl ShellRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, DeployError> {
        println!("Executing: {spec}");
        info!(command = %spec, "[EXEC] Spawning command");

        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &spec.current_dir {
            cmd.current_dir(dir);
        }

        let output = match cmd.output().await {
            Ok(output) => output,
            Err(e) => {
                error!(command = %spec, error = ?e, "[EXEC][ERROR] Failed to launch command");
                eprintln!("Error: {e}");
                return Err(DeployError::execution(format!(
                    "failed to launch `{}`: {e}",
                    spec.program
                )));
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            error!(
                command = %spec,
                status = ?output.status.code(),
                stderr = %stderr.trim(),
                "[EXEC][ERROR] Command exited with failure status"
            );
            let message = match stderr.trim() {
                "" => format!("`{spec}` exited with {}", output.status),
                detail => format!("`{spec}` exited with {}: {detail}", output.status),
            };
            eprintln!("Error: {message}");
            return Err(DeployError::Execution(message));
        }

        if !stderr.is_empty() {
            println!("stderr: {stderr}");
        }
        println!("stdout: {stdout}");
        debug!(command = %spec, stdout_len = stdout.len(), stderr_len = stderr.len(), "[EXEC] Command succeeded");

        Ok(CommandOutput { stdout, stderr })
    }
}

/// Prints each command instead of running it.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunRunner;

#[async_trait]
impl CommandRunner for DryRunRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, DeployError> {
        println!("Would execute: {spec}");
        info!(command = %spec, "[EXEC][DRY-RUN] Skipping command");
        Ok(CommandOutput::default())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn captures_stdout_on_success() {
        let spec = CommandSpec::new("sh").args(["-c", "echo hello; echo warn 1>&2"]);
        let out = ShellRunner::new().run(&spec).await.expect("sh should succeed");
        assert_eq!(out.stdout.trim(), "hello");
        assert_eq!(out.stderr.trim(), "warn");
    }

    #[tokio::test]
    async fn non_zero_exit_is_execution_error() {
        let spec = CommandSpec::new("sh").args(["-c", "echo boom 1>&2; exit 3"]);
        let err = ShellRunner::new().run(&spec).await.unwrap_err();
        match err {
            DeployError::Execution(msg) => assert!(msg.contains("boom"), "got: {msg}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_program_is_execution_error() {
        let spec = CommandSpec::new("site-deploy-no-such-binary-xyz");
        let err = ShellRunner::new().run(&spec).await.unwrap_err();
        assert!(matches!(err, DeployError::Execution(_)));
    }

    #[tokio::test]
    async fn runs_in_current_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "x").unwrap();
        let spec = CommandSpec::new("ls").current_dir(dir.path());
        let out = ShellRunner::new().run(&spec).await.unwrap();
        assert!(out.stdout.contains("marker.txt"));
    }

    #[tokio::test]
    async fn dry_run_never_fails() {
        let spec = CommandSpec::new("site-deploy-no-such-binary-xyz");
        let out = DryRunRunner.run(&spec).await.unwrap();
        assert_eq!(out, CommandOutput::default());
    }
}
