//! Append-only log of raw model responses, kept for debugging prompts.

use std::{
   fs::OpenOptions,
   io::Write,
   path::{Path, PathBuf},
};

use chrono::Local;

use crate::error::Result;

const FOOTER: &str = "-----------------------";

#[derive(Debug, Clone)]
pub struct RawResponseLog {
   path: PathBuf,
}

impl RawResponseLog {
   pub fn new(path: impl Into<PathBuf>) -> Self {
      Self { path: path.into() }
   }

   pub fn path(&self) -> &Path {
      &self.path
   }

   /// Append one entry. The file is opened and closed per call.
   pub fn append(&self, raw: &str) -> Result<()> {
      if let Some(parent) = self.path.parent()
         && !parent.as_os_str().is_empty()
      {
         std::fs::create_dir_all(parent)?;
      }

      let mut file = OpenOptions::new()
         .create(true)
         .append(true)
         .open(&self.path)?;
      file.write_all(format_entry(raw, &Local::now().to_rfc3339()).as_bytes())?;
      Ok(())
   }
}

fn format_entry(raw: &str, timestamp: &str) -> String {
   format!("\n--- {timestamp} ---\n{raw:?}\n{FOOTER}\n")
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_format_entry_quotes_raw_text() {
      assert_eq!(
         format_entry("feat: x\n- y", "2025-01-01T00:00:00+00:00"),
         "\n--- 2025-01-01T00:00:00+00:00 ---\n\"feat: x\\n- y\"\n-----------------------\n"
      );
   }

   #[test]
   fn test_append_accumulates_entries() {
      let dir = tempfile::tempdir().unwrap();
      let log = RawResponseLog::new(dir.path().join("nested").join("raw.log"));

      log.append("first").unwrap();
      log.append("second").unwrap();

      let contents = std::fs::read_to_string(log.path()).unwrap();
      assert_eq!(contents.matches("\n--- ").count(), 2);
      assert_eq!(contents.matches(FOOTER).count(), 2);
      let first = contents.find("\"first\"").unwrap();
      let second = contents.find("\"second\"").unwrap();
      assert!(first < second);
   }
}
