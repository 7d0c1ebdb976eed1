use thiserror::Error;

/// Failures of the deployment workflow.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeployError {
    /// The AWS CLI is missing or could not answer `aws --version`.
    #[error("AWS CLI unavailable: {0}")]
    ToolUnavailable(String),

    /// An invoked command could not be launched or exited with a failure status.
    #[error("Command execution failed: {0}")]
    Execution(String),
}

impl DeployError {
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }

    /// Re-labels any failure from the preflight check as a missing tool.
    pub fn into_tool_unavailable(self) -> Self {
        match self {
            Self::Execution(msg) => Self::ToolUnavailable(msg),
            other => other,
        }
    }
}
