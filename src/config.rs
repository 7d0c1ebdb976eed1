// site-deploy/src/config.rs

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Deployment target, read once from `deploy-config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployConfig {
    pub bucket_name: String,
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloudfront: Option<CloudFrontConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudFrontConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution_id: Option<String>,
}

impl DeployConfig {
    /// The CloudFront distribution to invalidate, if one is configured.
    /// A blank id counts as not configured.
    pub fn distribution_id(&self) -> Option<&str> {
        self.cloudfront
            .as_ref()
            .and_then(|cf| cf.distribution_id.as_deref())
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    pub fn trace_loaded(&self) {
        info!(
            bucket = %self.bucket_name,
            region = %self.region,
            distribution_id = self.distribution_id().unwrap_or("<none>"),
            "Loaded DeployConfig"
        );
        debug!(?self, "DeployConfig loaded (full debug)");
    }
}
