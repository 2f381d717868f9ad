use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
   config::CommitConfig,
   error::{CommitGenError, Result},
};

/// A remote text-generation capability: one prompt in, one text out.
///
/// Implementations perform a single attempt; retrying is the caller's job.
pub trait TextGenerator {
   fn generate_text(&self, prompt: &str) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct Message {
   role:    String,
   content: String,
}

#[derive(Debug, Serialize)]
struct ApiRequest {
   model:       String,
   #[serde(skip_serializing_if = "Option::is_none")]
   temperature: Option<f32>,
   messages:    Vec<Message>,
}

#[derive(Debug, Deserialize)]
struct Choice {
   message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
   #[serde(default)]
   content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
   choices: Vec<Choice>,
}

/// Blocking client for OpenAI-compatible `/chat/completions` endpoints.
pub struct ChatClient {
   http:        reqwest::blocking::Client,
   base_url:    String,
   api_key:     Option<String>,
   model:       String,
   temperature: Option<f32>,
}

impl ChatClient {
   /// Build HTTP client with timeouts from config
   pub fn new(config: &CommitConfig) -> Result<Self> {
      let http = reqwest::blocking::Client::builder()
         .timeout(Duration::from_secs(config.request_timeout_secs))
         .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
         .build()?;

      Ok(Self {
         http,
         base_url: config.api_base_url.trim_end_matches('/').to_string(),
         api_key: config.api_key.clone(),
         model: config.model.clone(),
         temperature: config.temperature,
      })
   }

   pub fn model(&self) -> &str {
      &self.model
   }

   fn chat_url(&self) -> String {
      format!("{}/chat/completions", self.base_url)
   }
}

impl TextGenerator for ChatClient {
   fn generate_text(&self, prompt: &str) -> Result<String> {
      let request = ApiRequest {
         model:       self.model.clone(),
         temperature: self.temperature,
         messages:    vec![Message { role: "user".to_string(), content: prompt.to_string() }],
      };

      let url = self.chat_url();
      debug!(model = %self.model, %url, prompt_chars = prompt.len(), "sending generation request");

      let mut request_builder = self
         .http
         .post(url)
         .header("content-type", "application/json");

      // Add Authorization header if API key is configured
      if let Some(ref api_key) = self.api_key {
         request_builder = request_builder.bearer_auth(api_key);
      }

      let response = request_builder.json(&request).send()?;
      let status = response.status();

      if !status.is_success() {
         let body = response
            .text()
            .unwrap_or_else(|_| "Unknown error".to_string());
         return Err(CommitGenError::ApiError { status: status.as_u16(), body });
      }

      let body = response.text()?;
      parse_response(&body)
   }
}

/// Extract the first choice's text. A choice without content yields an empty
/// string; a response without choices is an error.
fn parse_response(body: &str) -> Result<String> {
   let api_response: ApiResponse = serde_json::from_str(body)?;
   let choice = api_response
      .choices
      .into_iter()
      .next()
      .ok_or(CommitGenError::EmptyResponse)?;
   Ok(choice.message.content.unwrap_or_default())
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_parse_response_content() {
      let body = r#"{"choices":[{"message":{"role":"assistant","content":"feat: add x"}}]}"#;
      assert_eq!(parse_response(body).unwrap(), "feat: add x");
   }

   #[test]
   fn test_parse_response_null_content() {
      let body = r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#;
      assert_eq!(parse_response(body).unwrap(), "");
   }

   #[test]
   fn test_parse_response_no_choices() {
      assert!(matches!(parse_response(r#"{"choices":[]}"#), Err(CommitGenError::EmptyResponse)));
   }

   #[test]
   fn test_parse_response_malformed() {
      assert!(matches!(parse_response("<html>"), Err(CommitGenError::JsonError(_))));
   }

   #[test]
   fn test_request_serialization_skips_missing_temperature() {
      let request = ApiRequest {
         model:       "m".to_string(),
         temperature: None,
         messages:    vec![Message { role: "user".to_string(), content: "hi".to_string() }],
      };
      let json = serde_json::to_value(&request).unwrap();
      assert_eq!(
         json,
         serde_json::json!({ "model": "m", "messages": [{ "role": "user", "content": "hi" }] })
      );
   }

   #[test]
   fn test_chat_url_trims_trailing_slash() {
      let config =
         CommitConfig { api_base_url: "http://localhost:4000/v1/".to_string(), ..Default::default() };
      let client = ChatClient::new(&config).unwrap();
      assert_eq!(client.chat_url(), "http://localhost:4000/v1/chat/completions");
      assert_eq!(client.model(), "gemini-2.5-flash");
   }
}
