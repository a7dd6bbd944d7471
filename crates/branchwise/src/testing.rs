//! Scripted collaborators for unit tests.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use crate::error::{BranchError, Result};
use crate::git::Shell;
use crate::utils::log::{clear_log_sink, set_log_sink};
use crate::utils::picker::Picker;
use crate::utils::term::strip_ansi_control_codes;

/// Run `f` with user-facing log lines captured instead of printed.
///
/// Lines come back without colors. Callers must be `#[serial(log_sink)]`;
/// lines from unrelated tests running at the same time may still show up.
pub fn capture_log<R>(f: impl FnOnce() -> R) -> (R, Vec<String>) {
  let (tx, rx) = crossbeam_channel::unbounded();
  set_log_sink(tx);
  let out = f();
  clear_log_sink();
  let lines = rx
    .try_iter()
    .map(|line| strip_ansi_control_codes(&line.text))
    .collect();
  (out, lines)
}

#[derive(Debug, Clone)]
enum Reply {
  Output(String),
  Exit(i32),
  SpawnError,
}

/// Shell that answers from a table keyed by the space-joined argv.
///
/// Unscripted commands succeed with empty output. Every call is recorded.
#[derive(Debug, Default)]
pub struct FakeShell {
  replies: HashMap<String, Reply>,
  calls: RefCell<Vec<String>>,
}

impl FakeShell {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn respond(mut self, command: &str, output: &str) -> Self {
    self
      .replies
      .insert(command.to_string(), Reply::Output(output.to_string()));
    self
  }

  pub fn fail(mut self, command: &str, exit_code: i32) -> Self {
    self
      .replies
      .insert(command.to_string(), Reply::Exit(exit_code));
    self
  }

  pub fn spawn_error(mut self, command: &str) -> Self {
    self.replies.insert(command.to_string(), Reply::SpawnError);
    self
  }

  pub fn calls(&self) -> Vec<String> {
    self.calls.borrow().clone()
  }

  pub fn count_of(&self, command: &str) -> usize {
    self.calls.borrow().iter().filter(|c| *c == command).count()
  }

  /// Calls that change repository state.
  pub fn mutations(&self) -> Vec<String> {
    const MUTATING: &[&str] = &[
      "checkout ",
      "branch -d ",
      "branch -D ",
      "remote prune",
      "push",
      "pull",
    ];
    self
      .calls
      .borrow()
      .iter()
      .filter(|c| MUTATING.iter().any(|m| c.starts_with(m)))
      .cloned()
      .collect()
  }
}

impl Shell for FakeShell {
  fn git(&self, args: &[&str]) -> Result<String> {
    let key = args.join(" ");
    self.calls.borrow_mut().push(key.clone());
    match self.replies.get(&key) {
      None => Ok(String::new()),
      Some(Reply::Output(out)) => Ok(out.clone()),
      Some(Reply::Exit(code)) => Err(BranchError::ExternalCommandFailed {
        exit_code: Some(*code),
        command: format!("git {key}"),
        output: "scripted failure".to_string(),
      }),
      Some(Reply::SpawnError) => Err(BranchError::Spawn {
        command: format!("git {key}"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "git not found"),
      }),
    }
  }
}

#[derive(Debug, Clone)]
pub enum Answer {
  Pick(String),
  PickMany(Vec<String>),
  Yes,
  No,
}

/// Picker that replays queued answers and records every prompt it sees.
///
/// Panics when asked something it has no answer for, so tests fail loudly on
/// unexpected prompts.
#[derive(Debug, Default)]
pub struct FakePicker {
  answers: RefCell<VecDeque<Answer>>,
  prompts: RefCell<Vec<String>>,
  offered: RefCell<Vec<Vec<String>>>,
  starts: RefCell<Vec<usize>>,
}

impl FakePicker {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn answer(self, answer: Answer) -> Self {
    self.answers.borrow_mut().push_back(answer);
    self
  }

  pub fn prompts(&self) -> Vec<String> {
    self.prompts.borrow().clone()
  }

  /// Options shown by each select / multi-select, in order.
  pub fn offered(&self) -> Vec<Vec<String>> {
    self.offered.borrow().clone()
  }

  pub fn starting_cursors(&self) -> Vec<usize> {
    self.starts.borrow().clone()
  }

  fn next(&self, prompt: &str) -> Answer {
    self.prompts.borrow_mut().push(prompt.to_string());
    self
      .answers
      .borrow_mut()
      .pop_front()
      .unwrap_or_else(|| panic!("unexpected prompt: {prompt}"))
  }
}

impl Picker for FakePicker {
  fn select(&self, prompt: &str, options: &[String], starting_cursor: usize) -> Result<String> {
    if options.is_empty() {
      return Err(BranchError::NoBranchesAvailable {
        action: "select".to_string(),
      });
    }
    self.offered.borrow_mut().push(options.to_vec());
    self.starts.borrow_mut().push(starting_cursor);
    match self.next(prompt) {
      Answer::Pick(choice) => Ok(choice),
      other => panic!("expected a pick for {prompt}, got {other:?}"),
    }
  }

  fn multi_select(&self, prompt: &str, options: &[String]) -> Result<Vec<String>> {
    self.offered.borrow_mut().push(options.to_vec());
    match self.next(prompt) {
      Answer::PickMany(choices) => Ok(choices),
      other => panic!("expected a multi pick for {prompt}, got {other:?}"),
    }
  }

  fn confirm(&self, prompt: &str, _default: bool) -> Result<bool> {
    match self.next(prompt) {
      Answer::Yes => Ok(true),
      Answer::No => Ok(false),
      other => panic!("expected yes/no for {prompt}, got {other:?}"),
    }
  }
}
