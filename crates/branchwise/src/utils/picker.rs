use std::io::{self, IsTerminal as _, Read, Write};

use inquire::{Confirm, MultiSelect, Select};
use owo_colors::OwoColorize as _;

use crate::error::{BranchError, Result};
use crate::{log_info, log_warn};

/// Interactive choices the workflows need from the user.
pub trait Picker {
  /// Pick exactly one of `options`. Fails with `NoBranchesAvailable` when empty.
  fn select(&self, prompt: &str, options: &[String], starting_cursor: usize) -> Result<String>;

  /// Pick any subset of `options`; an empty result is valid.
  fn multi_select(&self, prompt: &str, options: &[String]) -> Result<Vec<String>>;

  fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;

  /// Ask a yes/no question whose "no" stops the caller.
  fn require_permission(&self, prompt: &str) -> Result<()> {
    if self.confirm(prompt, false)? {
      Ok(())
    } else {
      Err(BranchError::PermissionDenied(prompt.to_string()))
    }
  }
}

/// Prompts via `inquire` when attached to a TTY, or via plain numbered lines
/// read from stdin otherwise (tests, piped input).
#[derive(Clone, Debug)]
pub struct TerminalPicker {
  is_tty: bool,
}

impl Default for TerminalPicker {
  fn default() -> Self {
    Self::new()
  }
}

impl TerminalPicker {
  #[must_use]
  pub fn new() -> Self {
    let interactive = io::stdin().is_terminal() && io::stdout().is_terminal();
    Self {
      is_tty: interactive,
    }
  }

  fn print_options(options: &[String], suggested: Option<usize>) {
    for (idx, opt) in options.iter().enumerate() {
      if suggested == Some(idx) {
        log_info!("  {}. {} {}", idx + 1, opt, "(suggested)".dimmed());
      } else {
        log_info!("  {}. {}", idx + 1, opt);
      }
    }
  }

  fn prompt_arrow() {
    anstream::print!("{}", "-> ".bright_cyan());
    io::stdout().flush().ok();
  }

  fn fallback_select(prompt: &str, options: &[String], starting_cursor: usize) -> Result<String> {
    log_info!("{} (number or name)", prompt);
    Self::print_options(options, Some(starting_cursor));
    Self::prompt_arrow();
    let input = read_answer()?;
    let trimmed = input.trim();
    if trimmed.is_empty() {
      log_warn!("A choice is required");
      return Err(BranchError::InvalidSelection("empty answer".to_string()));
    }
    resolve_choice(trimmed, options).ok_or_else(|| {
      log_warn!("Invalid selection: {}", trimmed);
      BranchError::InvalidSelection(trimmed.to_string())
    })
  }

  fn fallback_multi_select(prompt: &str, options: &[String]) -> Result<Vec<String>> {
    log_info!("{} (comma separated, empty for none)", prompt);
    Self::print_options(options, None);
    Self::prompt_arrow();
    let input = read_answer()?;
    let mut picked: Vec<String> = Vec::new();
    for token in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
      let Some(choice) = resolve_choice(token, options) else {
        log_warn!("Invalid selection: {}", token);
        return Err(BranchError::InvalidSelection(token.to_string()));
      };
      if !picked.contains(&choice) {
        picked.push(choice);
      }
    }
    Ok(picked)
  }

  fn fallback_confirm(prompt: &str, default: bool) -> Result<bool> {
    let suffix = if default { "[Y/n]" } else { "[y/N]" };
    log_info!("{} {}", prompt, suffix);
    Self::prompt_arrow();
    let input = read_answer()?;
    let trimmed = input.trim();
    if trimmed.is_empty() {
      return Ok(default);
    }
    Ok(matches!(trimmed.chars().next(), Some('y' | 'Y')))
  }
}

impl Picker for TerminalPicker {
  fn select(&self, prompt: &str, options: &[String], starting_cursor: usize) -> Result<String> {
    if options.is_empty() {
      return Err(BranchError::NoBranchesAvailable {
        action: "select".to_string(),
      });
    }
    if self.is_tty {
      return Ok(
        Select::new(prompt, options.to_vec())
          .with_starting_cursor(starting_cursor.min(options.len() - 1))
          .prompt()?,
      );
    }
    Self::fallback_select(prompt, options, starting_cursor)
  }

  fn multi_select(&self, prompt: &str, options: &[String]) -> Result<Vec<String>> {
    if options.is_empty() {
      return Ok(Vec::new());
    }
    if self.is_tty {
      return Ok(MultiSelect::new(prompt, options.to_vec()).prompt()?);
    }
    Self::fallback_multi_select(prompt, options)
  }

  fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
    if self.is_tty {
      return Ok(Confirm::new(prompt).with_default(default).prompt()?);
    }
    Self::fallback_confirm(prompt, default)
  }
}

/// Interpret a typed answer as a 1-based index or an option name.
fn resolve_choice(token: &str, options: &[String]) -> Option<String> {
  if let Ok(idx) = token.parse::<usize>()
    && (1..=options.len()).contains(&idx)
  {
    return Some(options[idx - 1].clone());
  }
  options
    .iter()
    .find(|opt| opt.eq_ignore_ascii_case(token))
    .cloned()
}

/// Read one answer from stdin. Closed stdin means nobody can answer.
fn read_answer() -> Result<String> {
  let mut stdin = io::stdin().lock();
  read_line(&mut stdin)
    .map_err(|err| BranchError::Prompt(format!("failed to read from stdin: {err}")))?
    .ok_or(BranchError::Cancelled)
}

/// Read up to the next newline, `None` at end of input.
///
/// Byte-wise so several prompts can share one piped stdin.
fn read_line(reader: &mut impl Read) -> io::Result<Option<String>> {
  let mut bytes = Vec::new();
  let mut saw_any = false;
  loop {
    let mut buf = [0u8; 1];
    if reader.read(&mut buf)? == 0 {
      break;
    }
    saw_any = true;
    if buf[0] == b'\n' {
      break;
    }
    if buf[0] != b'\r' {
      bytes.push(buf[0]);
    }
    if bytes.len() > 1024 {
      break;
    }
  }
  if !saw_any {
    return Ok(None);
  }
  String::from_utf8(bytes)
    .map(Some)
    .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}
