//! Builders for the three AWS CLI invocations the deploy workflow issues.

use std::path::Path;

use crate::contract::CommandSpec;

pub const AWS_PROGRAM: &str = "aws";

/// Paths never uploaded, whatever the configuration says.
pub const SYNC_EXCLUDES: [&str; 4] = [
    "README.md",
    "deploy.js",
    "deploy-config.json",
    "node_modules/*",
];

/// Every cached object in the distribution.
pub const INVALIDATION_PATHS: &str = "/*";

/// `aws --version`
pub fn version_check() -> CommandSpec {
    CommandSpec::new(AWS_PROGRAM).arg("--version")
}

/// `aws s3 sync . s3://<bucket> --exclude ... --region <region>`, run from `source_dir`.
pub fn s3_sync(bucket: &str, region: &str, source_dir: &Path) -> CommandSpec {
    let mut spec = CommandSpec::new(AWS_PROGRAM)
        .args(["s3", "sync", "."])
        .arg(format!("s3://{bucket}"));
    for pattern in SYNC_EXCLUDES {
        spec = spec.arg("--exclude").arg(pattern);
    }
    spec.arg("--region").arg(region).current_dir(source_dir)
}

/// `aws cloudfront create-invalidation --distribution-id <id> --paths /* --region <region>`
pub fn cloudfront_invalidation(distribution_id: &str, region: &str) -> CommandSpec {
    CommandSpec::new(AWS_PROGRAM)
        .args(["cloudfront", "create-invalidation"])
        .arg("--distribution-id")
        .arg(distribution_id)
        .arg("--paths")
        .arg(INVALIDATION_PATHS)
        .arg("--region")
        .arg(region)
}

/// S3 static-website endpoint for the bucket. Best effort: buckets without
/// website hosting enabled will not answer on it.
pub fn website_url(bucket: &str, region: &str) -> String {
    format!("http://{bucket}.s3-website-{region}.amazonaws.com/")
}
