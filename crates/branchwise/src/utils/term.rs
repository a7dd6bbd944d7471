use std::sync::OnceLock;

use owo_colors::OwoColorize as _;
use regex::Regex;

fn ansi_regex() -> &'static Regex {
  static ANSI_RE: OnceLock<Regex> = OnceLock::new();
  ANSI_RE.get_or_init(|| {
    Regex::new(
      r"(?x)
      \x1B\[[0-?]*[ -/]*[@-~]    # CSI sequence
      |                            # or
      \x1B\][^\x07\x1B]*(?:\x07|\x1B\\)  # OSC sequence terminated by BEL or ST
    ",
    )
    .expect("valid ANSI regex")
  })
}

pub fn strip_ansi_control_codes(input: &str) -> String {
  ansi_regex().replace_all(input, "").into_owned()
}

fn visible_len(s: &str) -> usize {
  strip_ansi_control_codes(s).chars().count()
}

/// Lay out rows under headers, padding each column to its widest visible cell.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> Vec<String> {
  let cols = headers.len();
  let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
  for row in rows {
    for (i, cell) in row.iter().enumerate().take(cols) {
      widths[i] = widths[i].max(visible_len(cell));
    }
  }

  let render_row = |cells: Vec<&str>| {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
      line.push_str(cell);
      if i + 1 < cols {
        let spaces = widths[i].saturating_sub(visible_len(cell)) + 1;
        line.push_str(&" ".repeat(spaces));
      }
    }
    line
  };

  let mut lines = Vec::with_capacity(rows.len() + 1);
  lines.push(format!("{}", render_row(headers.to_vec()).dimmed()));
  for row in rows {
    lines.push(render_row(row.iter().take(cols).map(String::as_str).collect()));
  }
  lines
}

pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
  for line in render_table(headers, rows) {
    anstream::println!("{}", line);
  }
}
