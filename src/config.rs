use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{CommitGenError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CommitConfig {
   /// OpenAI-compatible endpoint root (`/chat/completions` is appended)
   pub api_base_url: String,

   /// Optional API key for authentication (overridden by `AI_COMMIT_API_KEY`
   /// or `GEMINI_API_KEY` env vars)
   pub api_key: Option<String>,

   pub model:       String,
   pub temperature: Option<f32>,

   /// HTTP request timeout in seconds
   pub request_timeout_secs: u64,

   /// HTTP connection timeout in seconds
   pub connect_timeout_secs: u64,

   /// Total attempts per generation before giving up
   pub max_retries:   u32,
   pub base_delay_ms: u64,
   pub max_jitter_ms: u64,

   /// Commit template file. Falls back to `~/.ai-commit/commit_template.txt`,
   /// then to the embedded default.
   pub template_path: Option<PathBuf>,

   /// Append raw model responses to a log file
   pub raw_log:      bool,
   pub raw_log_path: Option<PathBuf>,
}

impl Default for CommitConfig {
   fn default() -> Self {
      Self {
         api_base_url:         "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
         api_key:              None,
         model:                "gemini-2.5-flash".to_string(),
         temperature:          None,
         request_timeout_secs: 120,
         connect_timeout_secs: 30,
         max_retries:          5,
         base_delay_ms:        1000,
         max_jitter_ms:        500,
         template_path:        None,
         raw_log:              true,
         raw_log_path:         None,
      }
   }
}

impl CommitConfig {
   /// Load config from default location (~/.config/ai-commit/config.toml)
   /// Falls back to Default if the file doesn't exist. Environment variables
   /// override config file values:
   /// - `AI_COMMIT_API_URL` overrides `api_base_url`
   /// - `AI_COMMIT_API_KEY` (or `GEMINI_API_KEY`) overrides `api_key`
   /// - `AI_COMMIT_MODEL` overrides `model`
   pub fn load() -> Result<Self> {
      let config_path = if let Ok(custom_path) = std::env::var("AI_COMMIT_CONFIG") {
         PathBuf::from(custom_path)
      } else {
         Self::default_config_path().unwrap_or_default()
      };

      if config_path.exists() {
         Self::from_file(&config_path)
      } else {
         let mut config = Self::default();
         config.apply_env_overrides();
         Ok(config)
      }
   }

   /// Load config from specific file
   pub fn from_file(path: &Path) -> Result<Self> {
      let contents = std::fs::read_to_string(path).map_err(|e| {
         CommitGenError::ConfigError(format!("Failed to read {}: {e}", path.display()))
      })?;
      let mut config = Self::parse(&contents)?;
      config.apply_env_overrides();
      Ok(config)
   }

   fn parse(contents: &str) -> Result<Self> {
      toml::from_str(contents)
         .map_err(|e| CommitGenError::ConfigError(format!("Failed to parse config: {e}")))
   }

   fn apply_env_overrides(&mut self) {
      if let Ok(api_url) = std::env::var("AI_COMMIT_API_URL") {
         self.api_base_url = api_url;
      }

      if let Ok(api_key) =
         std::env::var("AI_COMMIT_API_KEY").or_else(|_| std::env::var("GEMINI_API_KEY"))
      {
         self.api_key = Some(api_key);
      }

      if let Ok(model) = std::env::var("AI_COMMIT_MODEL") {
         self.model = model;
      }
   }

   /// Where raw responses are appended, or `None` when logging is disabled.
   pub fn resolved_raw_log_path(&self) -> Option<PathBuf> {
      if !self.raw_log {
         return None;
      }
      self
         .raw_log_path
         .clone()
         .or_else(|| data_dir().map(|dir| dir.join("ai_raw_response.log")))
   }

   /// Get default config path (platform-safe)
   /// Tries HOME (Unix/Linux/macOS) then USERPROFILE (Windows)
   pub fn default_config_path() -> Result<PathBuf> {
      home_dir()
         .map(|home| home.join(".config/ai-commit/config.toml"))
         .ok_or_else(|| {
            CommitGenError::ConfigError(
               "No home directory found (tried HOME and USERPROFILE)".to_string(),
            )
         })
   }
}

fn home_dir() -> Option<PathBuf> {
   std::env::var("HOME")
      .or_else(|_| std::env::var("USERPROFILE"))
      .ok()
      .map(PathBuf::from)
}

/// Per-user data directory (`~/.ai-commit`) for templates, prompts and logs.
pub fn data_dir() -> Option<PathBuf> {
   home_dir().map(|home| home.join(".ai-commit"))
}
