use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommitGenError {
   #[error("Git command failed: {0}")]
   GitError(String),

   #[error("Not a git repository: {path}")]
   NotARepository { path: String },

   #[error("Invalid argument: {0}")]
   InvalidArgument(String),

   #[error("API request failed (HTTP {status}): {body}")]
   ApiError { status: u16, body: String },

   #[error("API returned no choices")]
   EmptyResponse,

   #[error("Commit template not found: {path}")]
   TemplateNotFound { path: String },

   #[error("Template error: {0}")]
   TemplateError(String),

   #[error("Config error: {0}")]
   ConfigError(String),

   #[error("IO error: {0}")]
   IoError(#[from] std::io::Error),

   #[error("JSON error: {0}")]
   JsonError(#[from] serde_json::Error),

   #[error("HTTP error: {0}")]
   HttpError(#[from] reqwest::Error),

   #[error("{0}")]
   Other(String),
}

pub type Result<T> = std::result::Result<T, CommitGenError>;
