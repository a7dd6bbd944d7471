/// Token styling helpers.
///
/// `t` stands for "tokens": style branch names, remotes and statuses inside
/// info messages the same way everywhere.
pub mod t {
  use std::fmt::Display;

  use owo_colors::OwoColorize as _;

  use crate::git::SyncStatus;

  pub fn branch(value: impl Display) -> String {
    format!("{}", value.to_string().magenta())
  }

  pub fn remote(value: impl Display) -> String {
    format!("{}", value.to_string().cyan())
  }

  pub fn count(value: usize) -> String {
    format!("{}", value.to_string().blue())
  }

  pub fn status(status: SyncStatus) -> String {
    match status {
      SyncStatus::InSync => format!("{}", status.green()),
      SyncStatus::Ahead | SyncStatus::Behind => format!("{}", status.yellow()),
      SyncStatus::Diverged => format!("{}", status.red()),
      SyncStatus::Undetermined | SyncStatus::NoRemoteCounterpart => {
        format!("{}", status.dimmed())
      }
    }
  }

  pub fn ok(s: impl Display) -> String {
    format!("{}", s.to_string().green())
  }

  pub fn warn(s: impl Display) -> String {
    format!("{}", s.to_string().yellow())
  }

  pub fn err(s: impl Display) -> String {
    format!("{}", s.to_string().red())
  }
}

// Progress lines for the user. info = neutral, success/warn/error = full-line tint.
// When a sink is registered (tests), lines go there instead of the terminal.

use crossbeam_channel::Sender;
use parking_lot::Mutex;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
  Info,
  Success,
  Warn,
  Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogLine {
  pub level: LogLevel,
  pub text: String,
}

static SINK: Mutex<Option<Sender<LogLine>>> = Mutex::new(None);

pub fn set_log_sink(sender: Sender<LogLine>) {
  *SINK.lock() = Some(sender);
}

pub fn clear_log_sink() {
  *SINK.lock() = None;
}

pub fn emit(level: LogLevel, text: String) {
  if let Some(tx) = SINK.lock().clone() {
    let _ = tx.send(LogLine { level, text });
    return;
  }
  match level {
    LogLevel::Info | LogLevel::Success | LogLevel::Warn => anstream::println!("{}", text),
    LogLevel::Error => anstream::eprintln!("{}", text),
  }
}

#[macro_export]
macro_rules! log_info {
  ($fmt:literal $(, $args:expr )* $(,)?) => {{
    $crate::utils::log::emit(
      $crate::utils::log::LogLevel::Info,
      format!($fmt $(, $args )*)
    );
  }};
}

#[macro_export]
macro_rules! log_success {
  ($fmt:literal $(, $args:expr )* $(,)?) => {{
    $crate::utils::log::emit(
      $crate::utils::log::LogLevel::Success,
      $crate::utils::log::t::ok(format!($fmt $(, $args )*))
    );
  }};
}

#[macro_export]
macro_rules! log_warn {
  ($fmt:literal $(, $args:expr )* $(,)?) => {{
    $crate::utils::log::emit(
      $crate::utils::log::LogLevel::Warn,
      $crate::utils::log::t::warn(format!($fmt $(, $args )*))
    );
  }};
}

#[macro_export]
macro_rules! log_error {
  ($fmt:literal $(, $args:expr )* $(,)?) => {{
    $crate::utils::log::emit(
      $crate::utils::log::LogLevel::Error,
      $crate::utils::log::t::err(format!($fmt $(, $args )*))
    );
  }};
}
