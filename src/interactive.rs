//! Accept / regenerate / edit prompt shown after each generated message.

use std::io::{BufRead, Write};

use crate::{error::Result, style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
   Accept,
   Regenerate,
   Edit,
}

impl Choice {
   /// Parse a menu answer; surrounding whitespace and case are ignored.
   pub fn parse(input: &str) -> Option<Self> {
      match input.trim().to_ascii_lowercase().as_str() {
         "a" => Some(Self::Accept),
         "r" => Some(Self::Regenerate),
         "e" => Some(Self::Edit),
         _ => None,
      }
   }
}

/// Read one line; `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
   let mut buf = String::new();
   if input.read_line(&mut buf)? == 0 {
      return Ok(None);
   }
   Ok(Some(buf.trim_end_matches(['\n', '\r']).to_string()))
}

/// Ask until a valid choice is given. `None` when input is exhausted.
pub fn prompt_choice<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Option<Choice>> {
   loop {
      writeln!(out, "\n{}", style::prompt("[A]ccept | [R]egenerate | [E]dit manually"))?;
      write!(out, "Your choice: ")?;
      out.flush()?;

      let Some(line) = read_line(input)? else {
         return Ok(None);
      };
      if let Some(choice) = Choice::parse(&line) {
         return Ok(Some(choice));
      }
      writeln!(out, "{}", style::error("Invalid choice. Please select A, R, or E."))?;
   }
}

/// Read a hand-written commit message (a single line).
pub fn prompt_message<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Option<String>> {
   writeln!(out, "{}", style::info("Enter your custom commit message (finish with Enter):"))?;
   out.flush()?;
   read_line(input)
}

#[cfg(test)]
mod tests {
   use std::io::Cursor;

   use super::*;

   #[test]
   fn test_parse_choices() {
      assert_eq!(Choice::parse("a"), Some(Choice::Accept));
      assert_eq!(Choice::parse(" A \n"), Some(Choice::Accept));
      assert_eq!(Choice::parse("r"), Some(Choice::Regenerate));
      assert_eq!(Choice::parse("E"), Some(Choice::Edit));
      assert_eq!(Choice::parse("accept"), None);
      assert_eq!(Choice::parse(""), None);
   }

   #[test]
   fn test_prompt_choice_loops_on_invalid_input() {
      let mut input = Cursor::new("x\n\nR\n");
      let mut out = Vec::new();

      let choice = prompt_choice(&mut input, &mut out).unwrap();
      assert_eq!(choice, Some(Choice::Regenerate));

      let printed = String::from_utf8(out).unwrap();
      assert_eq!(printed.matches("Invalid choice").count(), 2);
      assert_eq!(printed.matches("Your choice: ").count(), 3);
   }

   #[test]
   fn test_prompt_choice_eof() {
      let mut input = Cursor::new("zzz\n");
      let mut out = Vec::new();
      assert_eq!(prompt_choice(&mut input, &mut out).unwrap(), None);
   }

   #[test]
   fn test_prompt_message_keeps_text() {
      let mut input = Cursor::new("  fix: typo in readme  \r\nignored\n");
      let mut out = Vec::new();
      assert_eq!(
         prompt_message(&mut input, &mut out).unwrap(),
         Some("  fix: typo in readme  ".to_string())
      );
   }
}
