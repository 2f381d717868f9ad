//! AI-assisted git commit message generator library
//!
//! Stages local changes, asks an OpenAI-compatible text-generation service for
//! a commit message (retrying with exponential backoff), cleans the response
//! and lets the user accept, regenerate or edit it before committing.
pub mod api;
pub mod config;
pub mod error;
pub mod generator;
pub mod git;
pub mod interactive;
pub mod normalization;
pub mod rawlog;
pub mod session;
pub mod style;
pub mod templates;
pub mod types;

// Re-export commonly used types
pub use config::CommitConfig;
pub use error::{CommitGenError, Result};
pub use generator::MessageGenerator;
pub use types::Args;
