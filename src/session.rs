//! One interactive run: stage, generate, review, optionally commit.

use std::io::{BufRead, Write};

use crate::{
   api::TextGenerator,
   error::{CommitGenError, Result},
   generator::{Backoff, MessageGenerator},
   git::Repository,
   interactive::{Choice, prompt_choice, prompt_message},
   style,
};

const PANEL_TITLE: &str = "AI Suggested Commit Message";

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
   /// Nothing was staged after `stage_all`.
   NoChanges,
   Committed(String),
   /// Accepted or edited, but `--commit` was not given.
   NotCommitted(String),
   /// Input closed before a decision.
   Aborted,
}

pub struct Session<'a, R, G, B> {
   pub repo:        &'a R,
   pub generator:   &'a MessageGenerator<G, B>,
   pub auto_commit: bool,
}

impl<R, G, B> Session<'_, R, G, B>
where
   R: Repository,
   G: TextGenerator,
   B: Backoff,
{
   pub fn run<I: BufRead, W: Write>(&self, input: &mut I, out: &mut W) -> Result<Outcome> {
      self.repo.stage_all()?;

      let diff = self.repo.staged_diff()?;
      if diff.trim().is_empty() {
         writeln!(out, "{}", style::warning("No changes to commit."))?;
         return Ok(Outcome::NoChanges);
      }

      loop {
         writeln!(out, "{}", style::success("Generating AI commit message..."))?;
         let message = self.generator.generate(&diff)?;
         writeln!(out, "{}", style::boxed_message(PANEL_TITLE, &message, style::term_width()))?;

         loop {
            let Some(choice) = prompt_choice(input, out)? else {
               return Ok(Outcome::Aborted);
            };

            let chosen = match choice {
               Choice::Regenerate => {
                  writeln!(out, "{}\n", style::info("Regenerating commit message..."))?;
                  break;
               },
               Choice::Accept => message.clone(),
               Choice::Edit => match prompt_message(input, out)? {
                  Some(custom) => custom,
                  None => return Ok(Outcome::Aborted),
               },
            };

            match self.finish(chosen, choice, out) {
               Err(CommitGenError::InvalidArgument(reason)) => {
                  writeln!(out, "{} {reason}", style::error("Error:"))?;
               },
               other => return other,
            }
         }
      }
   }

   fn finish<W: Write>(&self, message: String, choice: Choice, out: &mut W) -> Result<Outcome> {
      if !self.auto_commit {
         writeln!(
            out,
            "{}",
            style::warning("Commit not executed. Use '--commit' flag to commit automatically.")
         )?;
         return Ok(Outcome::NotCommitted(message));
      }

      self.repo.commit(&message)?;
      let done = if choice == Choice::Edit {
         "Changes committed with custom message!"
      } else {
         "Changes committed automatically!"
      };
      writeln!(out, "{}", style::success(done))?;
      Ok(Outcome::Committed(message))
   }
}
