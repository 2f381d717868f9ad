//! Commit message generation with exponential backoff.

use std::time::Duration;

use rand::Rng;
use tracing::{debug, error, warn};

use crate::{
   api::TextGenerator,
   config::CommitConfig,
   error::Result,
   normalization::clean_message,
   rawlog::RawResponseLog,
   templates::{TemplateSource, render_commit_prompt},
};

/// Returned for an empty diff; no request is made.
pub const NO_CHANGES_MESSAGE: &str = "No changes to commit";

/// Returned once every attempt has failed.
pub const GENERATION_FAILED_MESSAGE: &str =
   "AI commit message generation failed due to network/model issues.";

/// Substituted when the service answers with empty text.
pub const EMPTY_RESPONSE_MESSAGE: &str = "No response from AI";

/// Waits between attempts.
pub trait Backoff {
   fn wait(&self, attempt: u32, delay: Duration);
}

/// Blocks the current thread for the full delay.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleep;

impl Backoff for ThreadSleep {
   fn wait(&self, _attempt: u32, delay: Duration) {
      std::thread::sleep(delay);
   }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
   pub max_attempts: u32,
   pub base_delay:   Duration,
   pub max_jitter:   Duration,
}

impl RetryPolicy {
   pub fn from_config(config: &CommitConfig) -> Self {
      Self {
         max_attempts: config.max_retries,
         base_delay:   Duration::from_millis(config.base_delay_ms),
         max_jitter:   Duration::from_millis(config.max_jitter_ms),
      }
   }

   /// `base * 2^(attempt-1)`, without jitter. `attempt` starts at 1.
   pub fn exponential_delay(&self, attempt: u32) -> Duration {
      let exponent = attempt.saturating_sub(1).min(31);
      self.base_delay.saturating_mul(1 << exponent)
   }

   /// Exponential delay plus uniform jitter in `[0, max_jitter)`.
   pub fn delay_for(&self, attempt: u32) -> Duration {
      let jitter_ms = self.max_jitter.as_millis() as u64;
      let jitter = if jitter_ms == 0 {
         Duration::ZERO
      } else {
         Duration::from_millis(rand::rng().random_range(0..jitter_ms))
      };
      self.exponential_delay(attempt) + jitter
   }
}

impl Default for RetryPolicy {
   fn default() -> Self {
      Self::from_config(&CommitConfig::default())
   }
}

/// Turns a staged diff into a cleaned commit message.
pub struct MessageGenerator<G, B = ThreadSleep> {
   client:   G,
   backoff:  B,
   policy:   RetryPolicy,
   template: TemplateSource,
   raw_log:  Option<RawResponseLog>,
}

impl<G: TextGenerator> MessageGenerator<G> {
   pub fn new(client: G, config: &CommitConfig) -> Self {
      Self {
         client,
         backoff: ThreadSleep,
         policy: RetryPolicy::from_config(config),
         template: TemplateSource::resolve(config),
         raw_log: config.resolved_raw_log_path().map(RawResponseLog::new),
      }
   }
}

impl<G: TextGenerator, B: Backoff> MessageGenerator<G, B> {
   pub fn with_backoff<B2: Backoff>(self, backoff: B2) -> MessageGenerator<G, B2> {
      MessageGenerator {
         client: self.client,
         backoff,
         policy: self.policy,
         template: self.template,
         raw_log: self.raw_log,
      }
   }

   pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
      self.policy = policy;
      self
   }

   pub fn with_template(mut self, template: TemplateSource) -> Self {
      self.template = template;
      self
   }

   pub fn with_raw_log(mut self, raw_log: Option<RawResponseLog>) -> Self {
      self.raw_log = raw_log;
      self
   }

   pub fn client(&self) -> &G {
      &self.client
   }

   /// Generate a commit message for `diff`.
   ///
   /// Network and model failures never surface here: after the last failed
   /// attempt the failure sentinel is returned instead. Only environment
   /// problems (unreadable template, broken prompt frame) are errors.
   pub fn generate(&self, diff: &str) -> Result<String> {
      if diff.trim().is_empty() {
         return Ok(NO_CHANGES_MESSAGE.to_string());
      }

      let template = self.template.load()?;
      let prompt = render_commit_prompt(diff, &template)?;
      debug!(prompt_chars = prompt.len(), "rendered commit prompt");

      let max = self.policy.max_attempts;
      let mut attempt = 0;
      while attempt < max {
         match self.client.generate_text(&prompt) {
            Ok(raw) => {
               self.record(&raw);
               let raw = if raw.is_empty() { EMPTY_RESPONSE_MESSAGE } else { raw.as_str() };
               return Ok(clean_message(raw));
            },
            Err(e) => {
               attempt += 1;
               let delay = self.policy.delay_for(attempt);
               warn!(
                  "AI request failed (attempt {attempt}/{max}): {e}; backoff {:.1}s",
                  delay.as_secs_f64()
               );
               // no wait once the last attempt has failed
               if attempt < max {
                  self.backoff.wait(attempt, delay);
               }
            },
         }
      }

      error!(attempts = max, "Failed to generate commit message after multiple attempts");
      Ok(GENERATION_FAILED_MESSAGE.to_string())
   }

   fn record(&self, raw: &str) {
      if let Some(log) = &self.raw_log
         && let Err(e) = log.append(raw)
      {
         warn!(path = %log.path().display(), "Failed to write raw response log: {e}");
      }
   }
}
