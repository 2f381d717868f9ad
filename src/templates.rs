use std::{
   path::{Path, PathBuf},
   sync::LazyLock,
};

use parking_lot::Mutex;
use rust_embed::RustEmbed;
use tera::{Context, Tera};

use crate::{
   config::{CommitConfig, data_dir},
   error::{CommitGenError, Result},
};

/// Embedded prompts folder (compiled into binary)
#[derive(RustEmbed)]
#[folder = "prompts/"]
struct Prompts;

const PROMPT_FRAME: &str = "commit.md";
const DEFAULT_TEMPLATE: &str = "commit_template.txt";

static TERA: LazyLock<Mutex<Tera>> = LazyLock::new(|| {
   let mut tera = Tera::default();
   // Prompts are plain text, never HTML
   tera.autoescape_on(vec![]);
   Mutex::new(tera)
});

/// User prompts directory (~/.ai-commit/prompts/) if a home dir exists.
fn user_prompts_dir() -> Option<PathBuf> {
   data_dir().map(|dir| dir.join("prompts"))
}

fn embedded(name: &str) -> Result<String> {
   let file = Prompts::get(name).ok_or_else(|| {
      CommitGenError::TemplateError(format!("Embedded file {name} missing from binary"))
   })?;
   std::str::from_utf8(file.data.as_ref())
      .map(|s| s.to_string())
      .map_err(|e| CommitGenError::TemplateError(format!("Embedded {name} is not valid UTF-8: {e}")))
}

/// Load the prompt frame, preferring a user override.
fn load_prompt_frame() -> Result<String> {
   if let Some(dir) = user_prompts_dir() {
      let path = dir.join(PROMPT_FRAME);
      if path.exists() {
         return std::fs::read_to_string(&path).map_err(|e| {
            CommitGenError::TemplateError(format!("Failed to read {}: {e}", path.display()))
         });
      }
   }
   embedded(PROMPT_FRAME)
}

/// Render the commit prompt. `template` is inserted as a value, so its text
/// reaches the model verbatim.
pub fn render_commit_prompt(diff: &str, template: &str) -> Result<String> {
   let frame = load_prompt_frame()?;

   let mut context = Context::new();
   context.insert("diff", diff);
   context.insert("template", template);

   let mut tera = TERA.lock();
   tera
      .render_str(&frame, &context)
      .map_err(|e| CommitGenError::TemplateError(format!("Failed to render commit prompt: {e}")))
}

/// Where the commit template text comes from. Read on every generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
   File(PathBuf),
   Embedded,
}

impl TemplateSource {
   /// Explicit config path first, then `~/.ai-commit/commit_template.txt`,
   /// then the built-in template.
   pub fn resolve(config: &CommitConfig) -> Self {
      if let Some(path) = &config.template_path {
         return Self::File(path.clone());
      }
      data_dir()
         .map(|dir| dir.join(DEFAULT_TEMPLATE))
         .filter(|path| path.exists())
         .map_or(Self::Embedded, Self::File)
   }

   pub fn load(&self) -> Result<String> {
      match self {
         Self::File(path) => read_template_file(path),
         Self::Embedded => embedded(DEFAULT_TEMPLATE),
      }
   }
}

fn read_template_file(path: &Path) -> Result<String> {
   if !path.is_file() {
      return Err(CommitGenError::TemplateNotFound { path: path.display().to_string() });
   }
   Ok(std::fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_render_embeds_diff_and_template() {
      let prompt = render_commit_prompt("+added line", "<type>: <summary>").unwrap();
      assert!(prompt.starts_with("You are a professional git commit assistant."));
      assert!(prompt.contains("+added line"));
      assert!(prompt.contains("Follow this template strictly:\n<type>: <summary>"));
      assert!(prompt.contains("- Return the commit message only, no explanations."));
   }

   #[test]
   fn test_render_does_not_interpret_template_syntax() {
      let template = "{{ not_a_var }} {% if x %}literal{% endif %}";
      let prompt = render_commit_prompt("diff", template).unwrap();
      assert!(prompt.contains(template));
   }

   #[test]
   fn test_embedded_template_loads() {
      let text = TemplateSource::Embedded.load().unwrap();
      assert!(text.contains("<type>"));
   }

   #[test]
   fn test_file_template_read_each_time() {
      let dir = tempfile::tempdir().unwrap();
      let path = dir.path().join("tpl.txt");
      std::fs::write(&path, "first").unwrap();

      let source = TemplateSource::File(path.clone());
      assert_eq!(source.load().unwrap(), "first");

      std::fs::write(&path, "second").unwrap();
      assert_eq!(source.load().unwrap(), "second");
   }

   #[test]
   fn test_missing_template_file() {
      let dir = tempfile::tempdir().unwrap();
      let source = TemplateSource::File(dir.path().join("missing.txt"));
      assert!(matches!(source.load(), Err(CommitGenError::TemplateNotFound { .. })));
   }

   #[test]
   fn test_resolve_prefers_config_path() {
      let config =
         CommitConfig { template_path: Some(PathBuf::from("/x/tpl.txt")), ..Default::default() };
      assert_eq!(TemplateSource::resolve(&config), TemplateSource::File(PathBuf::from("/x/tpl.txt")));
   }
}
