//! Terminal styling utilities for consistent CLI output.
//!
//! Respects `NO_COLOR` environment variable and terminal capabilities.

use std::sync::OnceLock;

use owo_colors::OwoColorize;

/// Whether color output is enabled (cached on first call).
static COLOR_ENABLED: OnceLock<bool> = OnceLock::new();

/// Check if colors should be used.
pub fn colors_enabled() -> bool {
   *COLOR_ENABLED.get_or_init(|| {
      // NO_COLOR takes precedence (https://no-color.org/)
      if std::env::var("NO_COLOR").is_ok() {
         return false;
      }
      supports_color::on(supports_color::Stream::Stdout).is_some_and(|level| level.has_basic)
   })
}

// === Color Palette ===

/// Success: commits, completed actions (green + bold).
pub fn success(s: &str) -> String {
   if colors_enabled() {
      s.green().bold().to_string()
   } else {
      s.to_string()
   }
}

/// Warning: skipped commits, empty diffs (yellow).
pub fn warning(s: &str) -> String {
   if colors_enabled() {
      s.yellow().to_string()
   } else {
      s.to_string()
   }
}

/// Error: failures, invalid input (red + bold).
pub fn error(s: &str) -> String {
   if colors_enabled() {
      s.red().bold().to_string()
   } else {
      s.to_string()
   }
}

/// Info: progress and instructions (blue).
pub fn info(s: &str) -> String {
   if colors_enabled() {
      s.blue().to_string()
   } else {
      s.to_string()
   }
}

/// Menu prompt (yellow + bold).
pub fn prompt(s: &str) -> String {
   if colors_enabled() {
      s.yellow().bold().to_string()
   } else {
      s.to_string()
   }
}

/// Bold: headers, key values.
pub fn bold(s: &str) -> String {
   if colors_enabled() {
      s.bold().to_string()
   } else {
      s.to_string()
   }
}

/// Frame color for the suggested message panel (cyan).
fn frame(s: &str) -> String {
   if colors_enabled() {
      s.cyan().to_string()
   } else {
      s.to_string()
   }
}

/// Get terminal width, capped at 120 columns.
pub fn term_width() -> usize {
   terminal_size::terminal_size()
      .map_or(80, |(w, _)| w.0 as usize)
      .min(120)
}

/// Box drawing characters.
pub mod box_chars {
   pub const TOP_LEFT: char = '\u{256D}';
   pub const TOP_RIGHT: char = '\u{256E}';
   pub const BOTTOM_LEFT: char = '\u{2570}';
   pub const BOTTOM_RIGHT: char = '\u{256F}';
   pub const HORIZONTAL: char = '\u{2500}';
   pub const VERTICAL: char = '\u{2502}';
}

/// Wrap text to fit within a given width, preserving words.
fn wrap_line(line: &str, max_width: usize) -> Vec<String> {
   if line.trim().is_empty() {
      return vec![String::new()];
   }

   let mut lines = Vec::new();
   let mut current = String::new();

   for word in line.split_whitespace() {
      let word_len = word.chars().count();
      let current_len = current.chars().count();

      if current.is_empty() {
         // First word on line - take it even if too long
         current = word.to_string();
      } else if current_len + 1 + word_len <= max_width {
         current.push(' ');
         current.push_str(word);
      } else {
         lines.push(current);
         current = word.to_string();
      }
   }

   lines.push(current);
   lines
}

/// Render a box-framed message with word wrapping.
pub fn boxed_message(title: &str, content: &str, width: usize) -> String {
   use box_chars::*;

   let inner_width = width.saturating_sub(4); // "│ " and " │"
   let border_width = width.saturating_sub(2);
   let padding = border_width.saturating_sub(title.chars().count() + 2);
   let left_pad = padding / 2;
   let right_pad = padding - left_pad;

   let horizontal = |n: usize| HORIZONTAL.to_string().repeat(n);

   let mut out = frame(&format!("{TOP_LEFT}{} ", horizontal(left_pad)));
   out.push_str(&bold(title));
   out.push_str(&frame(&format!(" {}{TOP_RIGHT}", horizontal(right_pad))));
   out.push('\n');

   let side = frame(&VERTICAL.to_string());
   for line in content.lines() {
      for wrapped in wrap_line(line, inner_width) {
         let pad = inner_width.saturating_sub(wrapped.chars().count());
         out.push_str(&format!("{side} {wrapped}{} {side}\n", " ".repeat(pad)));
      }
   }

   out.push_str(&frame(&format!("{BOTTOM_LEFT}{}{BOTTOM_RIGHT}", horizontal(border_width))));
   out
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_wrap_line_respects_width() {
      assert_eq!(wrap_line("one two three four", 9), vec!["one two", "three", "four"]);
   }

   #[test]
   fn test_wrap_line_long_word_kept_whole() {
      assert_eq!(wrap_line("supercalifragilistic x", 5), vec!["supercalifragilistic", "x"]);
   }

   #[test]
   fn test_wrap_line_blank() {
      assert_eq!(wrap_line("", 10), vec![String::new()]);
      assert_eq!(wrap_line("   ", 10), vec![String::new()]);
   }

   #[test]
   fn test_boxed_message_shape() {
      if colors_enabled() {
         return;
      }
      let boxed = boxed_message("Title", "feat: add x\n\n- detail", 30);
      let lines: Vec<&str> = boxed.lines().collect();
      assert_eq!(lines.len(), 5);
      assert!(lines[0].contains(" Title "));
      assert!(lines[1].starts_with("\u{2502} feat: add x"));
      assert!(lines[2].trim_end().ends_with('\u{2502}'));
      for line in &lines {
         assert_eq!(line.chars().count(), 30, "line: {line:?}");
      }
   }
}
