use ratatui::prelude::Color;

/// Truncate a string to a maximum number of chars, adding "..." if truncated.
///
/// Counts chars, not bytes: titles are arbitrary user text, and a byte
/// slice could land inside a multi-byte char.
pub fn truncate(s: &str, max_len: usize) -> String {
  if s.chars().count() <= max_len {
    s.to_string()
  } else {
    let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", cut)
  }
}

/// List marker and color for a todo's done state.
///
/// Mirrors the filled/teal vs hollow/gray check icons of the web client.
pub fn done_mark(done: bool) -> (&'static str, Color) {
  if done {
    ("✔", Color::Green)
  } else {
    ("○", Color::DarkGray)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
  }

  #[test]
  fn test_truncate_exact_length() {
    assert_eq!(truncate("hello", 5), "hello");
  }

  #[test]
  fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 8), "hello...");
  }

  #[test]
  fn test_truncate_counts_chars_not_bytes() {
    // 40 chars but 80 bytes; must not panic and must fit untouched
    let title = "é".repeat(40);
    assert_eq!(truncate(&title, 60), title);
  }

  #[test]
  fn test_truncate_multibyte_on_char_boundary() {
    let title = "café au lait égaré";
    assert_eq!(truncate(title, 10), "café au...");
  }

  #[test]
  fn test_done_mark() {
    assert_eq!(done_mark(true), ("✔", Color::Green));
    assert_eq!(done_mark(false), ("○", Color::DarkGray));
  }
}
