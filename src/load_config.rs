/// `load_config` module: reads the JSON deployment file into a [`DeployConfig`].
///
/// This is the only place where the user-supplied file is parsed. Beyond
/// checking that `bucketName` and `region` are present and non-empty, no
/// validation is performed: bucket and region names are handed to the AWS CLI
/// as-is.
///
/// # Errors
/// All errors use `anyhow::Error` and are surfaced at the CLI boundary.
use anyhow::Result;
use std::fs;
use std::path::Path;
use tracing::{error, info};

use crate::config::DeployConfig;

/// Default file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "deploy-config.json";

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<DeployConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    parse_config(&config_content).map_err(|e| {
        error!(error = %e, config_path = ?path_ref, "Rejected config file");
        e
    })
}

/// Parses JSON text into a [`DeployConfig`] and applies the presence checks.
pub fn parse_config(content: &str) -> Result<DeployConfig> {
    let config: DeployConfig = match serde_json::from_str(content) {
        Ok(conf) => {
            info!("Parsed config JSON successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, "Failed to parse config JSON");
            return Err(anyhow::anyhow!("Failed to parse config JSON: {e}"));
        }
    };

    if config.bucket_name.trim().is_empty() {
        anyhow::bail!("Config field `bucketName` must not be empty");
    }
    if config.region.trim().is_empty() {
        anyhow::bail!("Config field `region` must not be empty");
    }

    config.trace_loaded();
    Ok(config)
}
