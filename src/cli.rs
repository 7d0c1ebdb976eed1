///
/// This module implements the CLI surface of site-deploy: argument parsing,
/// runner selection, and the user-visible report at the end of a run.
///
/// All workflow logic lives in [`crate::deploy`]; this module is glue.
///
/// ## How To Use
/// - From a shell: run `site-deploy` in the site directory, next to
///   `deploy-config.json`. No arguments are required.
/// - Programmatically: call [`run`] with a constructed [`Cli`].
use crate::contract::CommandRunner;
use crate::deploy::{deploy, DeployOutcome, Invalidation};
use crate::executor::{DryRunRunner, ShellRunner};
use crate::load_config::{load_config, DEFAULT_CONFIG_FILE};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// CLI for site-deploy: upload a static site to S3 and refresh CloudFront.
#[derive(Parser, Debug)]
#[clap(
    name = "site-deploy",
    version,
    about = "Upload a static website to S3 and invalidate its CloudFront cache using the AWS CLI"
)]
pub struct Cli {
    /// Path to the JSON deployment config
    #[clap(long, env = "DEPLOY_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Directory whose contents are synced to the bucket
    #[clap(long, env = "DEPLOY_SOURCE_DIR", default_value = ".")]
    pub source_dir: PathBuf,

    /// Print the AWS CLI commands instead of running them
    #[clap(long)]
    pub dry_run: bool,
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: PathBuf::from(DEFAULT_CONFIG_FILE),
            source_dir: PathBuf::from("."),
            dry_run: false,
        }
    }
}

/// Async entrypoint for main() and integration tests.
pub async fn run(cli: Cli) -> Result<()> {
    let runner: Box<dyn CommandRunner> = if cli.dry_run {
        Box::new(DryRunRunner)
    } else {
        Box::new(ShellRunner::new())
    };
    run_with_runner(cli, runner.as_ref()).await
}

/// Same as [`run`], with the command runner supplied by the caller.
pub async fn run_with_runner(cli: Cli, runner: &dyn CommandRunner) -> Result<()> {
    tracing::info!(config = ?cli.config, source_dir = ?cli.source_dir, dry_run = cli.dry_run, "deploy_invoked");

    let config = load_config(&cli.config)?;

    match deploy(&config, runner, &cli.source_dir).await {
        Ok(DeployOutcome::Completed(report)) => {
            println!("Deployment completed successfully!");
            println!("Your website should be available at {}", report.website_url);
            if matches!(report.invalidation, Invalidation::Skipped) {
                println!("Once CloudFront is set up, it will be available at your custom domain.");
            }
            tracing::info!(command = "deploy", ?report, "Deployment complete");
            Ok(())
        }
        Ok(DeployOutcome::ToolUnavailable { reason }) => {
            tracing::warn!(command = "deploy", %reason, "Deployment skipped: AWS CLI unavailable");
            Ok(())
        }
        Err(e) => {
            tracing::error!(command = "deploy", error = %e, "Deployment failed");
            Err(anyhow::Error::new(e).context("Deployment failed"))
        }
    }
}
