//! High-level pipeline: preflight → sync → invalidate for one static site.
//!
//! The workflow is strictly sequential: every AWS CLI invocation is awaited
//! before the next one is built, and the first failure stops the run.
//!
//! # Steps
//! 1. Preflight: `aws --version`. A failure here is not an error for the
//!    caller; it yields [`DeployOutcome::ToolUnavailable`].
//! 2. Sync: `aws s3 sync` of the source directory into the bucket, skipping
//!    the fixed [`SYNC_EXCLUDES`](crate::commands::SYNC_EXCLUDES).
//! 3. Invalidate: only when a CloudFront distribution id is configured.
//!
//! Reporting the outcome to the user is left to the caller (see [`crate::cli`]).
//!
//! Nothing is retried and nothing is rolled back: a failed sync may leave the
//! bucket partially updated.

use std::path::Path;

use tracing::{error, info, warn};

use crate::commands;
use crate::config::DeployConfig;
use crate::contract::CommandRunner;
use crate::error::DeployError;

pub const TOOL_MISSING_MESSAGE: &str =
    "AWS CLI is not installed or not in PATH. Please install it first.";
pub const SKIP_INVALIDATION_MESSAGE: &str =
    "No CloudFront distribution ID provided. Skipping invalidation.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    Completed(DeployReport),
    /// Preflight failed; nothing was uploaded.
    ToolUnavailable { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployReport {
    pub bucket_name: String,
    pub region: String,
    pub tool_version: String,
    pub sync_output: String,
    pub invalidation: Invalidation,
    pub website_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invalidation {
    Invalidated {
        distribution_id: String,
        output: String,
    },
    Skipped,
}

/// Runs the deployment against `config`, issuing every command through `runner`
/// with `source_dir` as the directory uploaded to the bucket.
pub async fn deploy<R>(
    config: &DeployConfig,
    runner: &R,
    source_dir: &Path,
) -> Result<DeployOutcome, DeployError>
where
    R: CommandRunner + ?Sized,
{
    println!("Starting deployment to AWS S3...");
    info!(bucket = %config.bucket_name, region = %config.region, "[DEPLOY] Starting deployment");

    // Step 1: Preflight
    let tool_version = match preflight(runner).await {
        Ok(version) => version,
        Err(e) => {
            eprintln!("{TOOL_MISSING_MESSAGE}");
            warn!(error = %e, "[DEPLOY] Preflight failed, aborting without deploying");
            return Ok(DeployOutcome::ToolUnavailable {
                reason: e.to_string(),
            });
        }
    };

    // Step 2: Sync
    println!("Uploading files to S3 bucket: {}", config.bucket_name);
    let sync = commands::s3_sync(&config.bucket_name, &config.region, source_dir);
    let sync_output = match runner.run(&sync).await {
        Ok(out) => {
            info!(bucket = %config.bucket_name, "[DEPLOY] Sync succeeded");
            out.stdout
        }
        Err(e) => {
            error!(bucket = %config.bucket_name, error = %e, "[DEPLOY][ERROR] Sync failed");
            return Err(e);
        }
    };

    // Step 3: Invalidate
    let invalidation = match config.distribution_id() {
        Some(distribution_id) => {
            println!("Creating CloudFront invalidation...");
            let spec = commands::cloudfront_invalidation(distribution_id, &config.region);
            match runner.run(&spec).await {
                Ok(out) => {
                    info!(distribution_id, "[DEPLOY] Invalidation created");
                    Invalidation::Invalidated {
                        distribution_id: distribution_id.to_owned(),
                        output: out.stdout,
                    }
                }
                Err(e) => {
                    error!(distribution_id, error = %e, "[DEPLOY][ERROR] Invalidation failed");
                    return Err(e);
                }
            }
        }
        None => {
            println!("{SKIP_INVALIDATION_MESSAGE}");
            println!(
                "Once you have created a CloudFront distribution, add the distribution ID to {}",
                crate::load_config::DEFAULT_CONFIG_FILE
            );
            info!("[DEPLOY] {SKIP_INVALIDATION_MESSAGE}");
            Invalidation::Skipped
        }
    };

    Ok(DeployOutcome::Completed(DeployReport {
        bucket_name: config.bucket_name.clone(),
        region: config.region.clone(),
        tool_version,
        sync_output,
        invalidation,
        website_url: commands::website_url(&config.bucket_name, &config.region),
    }))
}

async fn preflight<R>(runner: &R) -> Result<String, DeployError>
where
    R: CommandRunner + ?Sized,
{
    let out = runner
        .run(&commands::version_check())
        .await
        .map_err(DeployError::into_tool_unavailable)?;
    // Older CLI releases print the version on stderr.
    let version = match out.stdout.trim() {
        "" => out.stderr.trim().to_owned(),
        v => v.to_owned(),
    };
    info!(version = %version, "[DEPLOY] AWS CLI available");
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CloudFrontConfig;
    use crate::contract::{CommandOutput, MockCommandRunner};
    use mockall::Sequence;

    fn config(distribution_id: Option<&str>) -> DeployConfig {
        DeployConfig {
            bucket_name: "my-site".into(),
            region: "us-east-1".into(),
            cloudfront: distribution_id.map(|id| CloudFrontConfig {
                distribution_id: Some(id.into()),
            }),
        }
    }

    #[tokio::test]
    async fn version_from_stderr_when_stdout_empty() {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().returning(|spec| {
            if spec.args == ["--version"] {
                Ok(CommandOutput {
                    stdout: String::new(),
                    stderr: "aws-cli/1.18.0\n".into(),
                })
            } else {
                Ok(CommandOutput::default())
            }
        });

        let outcome = deploy(&config(None), &runner, Path::new("."))
            .await
            .unwrap();
        match outcome {
            DeployOutcome::Completed(report) => assert_eq!(report.tool_version, "aws-cli/1.18.0"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn invalidation_failure_propagates() {
        let mut runner = MockCommandRunner::new();
        let mut seq = Sequence::new();
        runner
            .expect_run()
            .withf(|spec| spec.args == ["--version"])
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(CommandOutput::from_stdout("aws-cli/2.15.0")));
        runner
            .expect_run()
            .withf(|spec| spec.args.first().map(String::as_str) == Some("s3"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(CommandOutput::default()));
        runner
            .expect_run()
            .withf(|spec| spec.args.first().map(String::as_str) == Some("cloudfront"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(DeployError::execution("AccessDenied")));

        let err = deploy(&config(Some("E123")), &runner, Path::new("."))
            .await
            .unwrap_err();
        assert_eq!(err, DeployError::execution("AccessDenied"));
    }
}
