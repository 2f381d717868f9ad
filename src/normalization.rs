/// Normalization utilities for generated commit messages

const FENCE: &str = "```";

fn is_fence(line: &str) -> bool {
   line.trim().starts_with(FENCE)
}

/// Remove a wrapping code fence (```` ``` ```` or ```` ```lang ````) from a
/// model response.
///
/// Only the first and last non-empty lines are inspected. When just the
/// closing fence is present and a single unmatched opening fence sits inside
/// the text (summary line first, then the fenced body), that opener goes too.
pub fn strip_code_fences(message: &str) -> String {
   let mut lines: Vec<&str> = message.trim().lines().collect();

   let leading = lines.first().is_some_and(|line| is_fence(line));
   if leading {
      lines.remove(0);
   }

   let trailing = lines.last().is_some_and(|line| is_fence(line));
   if trailing {
      lines.pop();
   }

   if trailing && !leading {
      let mut openers = lines.iter().enumerate().filter(|(_, line)| is_fence(line));
      if let (Some((idx, _)), None) = (openers.next(), openers.next()) {
         lines.remove(idx);
      }
   }

   lines.join("\n").trim().to_string()
}

/// Keep the summary on the first line and join wrapped body text back
/// together, one line per bullet.
///
/// Bullet lines (`- `) start a new line; any other text is appended to the
/// previous line so mid-sentence breaks disappear. Blank lines are dropped.
pub fn reflow_body(message: &str) -> String {
   let mut lines = message.lines();
   let Some(first) = lines.next() else {
      return message.trim().to_string();
   };
   let summary = first.trim();

   let mut body: Vec<String> = Vec::new();
   for line in lines {
      let stripped = line.trim();
      if stripped.starts_with("- ") {
         body.push(stripped.to_string());
      } else if !stripped.is_empty() {
         match body.last_mut() {
            Some(prev) => {
               prev.push(' ');
               prev.push_str(stripped);
            },
            None => body.push(stripped.to_string()),
         }
      }
   }

   if body.is_empty() {
      summary.to_string()
   } else {
      format!("{summary}\n\n{}", body.join("\n"))
   }
}

/// Full cleanup applied to every successful model response.
pub fn clean_message(raw: &str) -> String {
   reflow_body(&strip_code_fences(raw)).trim().to_string()
}
