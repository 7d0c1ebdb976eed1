//! site-deploy: push a static website to S3 and refresh its CloudFront cache.
//!
//! The work is delegated to a pre-configured `aws` CLI; this crate only
//! decides which commands to run and in which order.

pub mod cli;
pub mod commands;
pub mod config;
pub mod contract;
pub mod deploy;
pub mod error;
pub mod executor;
pub mod load_config;

pub use cli::{run, Cli};
pub use config::{CloudFrontConfig, DeployConfig};
pub use deploy::{deploy, DeployOutcome, DeployReport, Invalidation};
pub use error::DeployError;
