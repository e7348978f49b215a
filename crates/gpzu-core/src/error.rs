use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum GpzuError {
    #[error("extraction failed: {0}")]
    Extraction(String),

    #[error("{tool} not found. {hint}")]
    ToolNotFound { tool: &'static str, hint: &'static str },

    #[error("{tool} failed with exit code {code}: {stderr}")]
    ToolFailed {
        tool: &'static str,
        code: i32,
        stderr: String,
    },

    #[error("failed to load rule set from {path}: {reason}")]
    RuleSetLoad { path: PathBuf, reason: String },

    #[error("invalid rule set: {0}")]
    RuleSetInvalid(String),

    #[error("source {0} cannot be read")]
    SourceUnreadable(String),

    #[error("cannot parse {source_id}: {reason}")]
    ContentUnparseable { source_id: String, reason: String },

    #[error("no parse result available for {0}")]
    ResultUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
