use std::path::PathBuf;

use clap::{ArgAction, Parser};

// CLI Args
#[derive(Parser, Debug, Default)]
#[command(
   author,
   version,
   about = "Stage all changes and draft a commit message with an LLM",
   long_about = None
)]
pub struct Args {
   /// Commit the accepted or edited message (otherwise it is only shown)
   #[arg(long)]
   pub commit: bool,

   /// Directory to run git commands in
   #[arg(long, default_value = ".")]
   pub dir: PathBuf,

   /// Path to config file (default: ~/.config/ai-commit/config.toml)
   #[arg(long)]
   pub config: Option<PathBuf>,

   /// Model to request (overrides config and `AI_COMMIT_MODEL`)
   #[arg(long, short = 'm')]
   pub model: Option<String>,

   /// Commit template file embedded in the prompt
   #[arg(long)]
   pub template: Option<PathBuf>,

   /// More log output (-v info, -vv debug, -vvv trace)
   #[arg(long, short = 'v', action = ArgAction::Count)]
   pub verbose: u8,
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_no_arguments() {
      let args = Args::try_parse_from(["ai-commit"]).unwrap();
      assert!(!args.commit);
      assert_eq!(args.dir, PathBuf::from("."));
      assert_eq!(args.verbose, 0);
   }

   #[test]
   fn test_commit_flag_and_overrides() {
      let args = Args::try_parse_from([
         "ai-commit",
         "--commit",
         "-m",
         "gpt-4o-mini",
         "--template",
         "tpl.txt",
         "-vv",
      ])
      .unwrap();
      assert!(args.commit);
      assert_eq!(args.model.as_deref(), Some("gpt-4o-mini"));
      assert_eq!(args.template, Some(PathBuf::from("tpl.txt")));
      assert_eq!(args.verbose, 2);
   }

   #[test]
   fn test_unknown_flag_rejected() {
      assert!(Args::try_parse_from(["ai-commit", "--push"]).is_err());
   }
}
