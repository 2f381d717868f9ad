use std::{
   path::{Path, PathBuf},
   process::{Command, Output},
};

use tracing::{debug, info};

use crate::error::{CommitGenError, Result};

/// The version-control operations the commit flow needs.
pub trait Repository {
   /// Stage every change in the working tree, deletions included.
   fn stage_all(&self) -> Result<()>;

   /// Diff of the index against `HEAD`; empty when nothing is staged.
   fn staged_diff(&self) -> Result<String>;

   /// Record a commit with exactly `message`. Called only with a non-blank
   /// message.
   fn write_commit(&self, message: &str) -> Result<()>;

   /// Commit the staged changes.
   fn commit(&self, message: &str) -> Result<()> {
      if message.trim().is_empty() {
         return Err(CommitGenError::InvalidArgument("Commit message is empty".to_string()));
      }
      self.write_commit(message)
   }
}

/// [`Repository`] backed by the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCli {
   dir: PathBuf,
}

impl GitCli {
   /// Open the repository containing `dir`.
   pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
      let dir = dir.as_ref();
      let not_a_repo = || CommitGenError::NotARepository { path: dir.display().to_string() };

      if !dir.is_dir() {
         return Err(not_a_repo());
      }

      let output = Command::new("git")
         .args(["rev-parse", "--is-inside-work-tree"])
         .current_dir(dir)
         .output()
         .map_err(|e| CommitGenError::GitError(format!("Failed to run git rev-parse: {e}")))?;

      if !output.status.success() || String::from_utf8_lossy(&output.stdout).trim() != "true" {
         return Err(not_a_repo());
      }

      Ok(Self { dir: dir.to_path_buf() })
   }

   pub fn dir(&self) -> &Path {
      &self.dir
   }

   fn run(&self, args: &[&str]) -> Result<Output> {
      debug!(?args, "running git");
      let output = Command::new("git")
         .args(args)
         .current_dir(&self.dir)
         .output()
         .map_err(|e| CommitGenError::GitError(format!("Failed to run git {}: {e}", args[0])))?;

      if !output.status.success() {
         let stderr = String::from_utf8_lossy(&output.stderr);
         let stdout = String::from_utf8_lossy(&output.stdout);
         return Err(CommitGenError::GitError(format!(
            "git {} failed:\nstderr: {stderr}\nstdout: {stdout}",
            args[0]
         )));
      }

      Ok(output)
   }
}

impl Repository for GitCli {
   fn stage_all(&self) -> Result<()> {
      self.run(&["add", "-A"])?;
      Ok(())
   }

   fn staged_diff(&self) -> Result<String> {
      let output = self.run(&["diff", "--cached"])?;
      Ok(String::from_utf8_lossy(&output.stdout).to_string())
   }

   fn write_commit(&self, message: &str) -> Result<()> {
      // verbatim: git's default cleanup would strip trailing spaces and blank runs
      let output = self.run(&["commit", "--cleanup=verbatim", "-m", message])?;
      info!("{}", String::from_utf8_lossy(&output.stdout).trim());
      Ok(())
   }
}
