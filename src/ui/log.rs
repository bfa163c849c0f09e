//! Leveled, colored log lines
//!
//! Every line is `<LEVEL> <message>` with the level rendered through an
//! `anstyle` style. INFO and WARNING go to stdout, ERROR to stderr.

use crate::core::error::ReleaseError;
use anstyle::{AnsiColor, Color, Style};

/// Log severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
  Info,
  Warning,
  Error,
}

impl Level {
  pub fn as_str(self) -> &'static str {
    match self {
      Level::Info => "INFO",
      Level::Warning => "WARNING",
      Level::Error => "ERROR",
    }
  }

  fn style(self) -> Style {
    match self {
      Level::Info => Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))),
      Level::Warning => Style::new().bold().fg_color(Some(Color::Ansi(AnsiColor::Yellow))),
      Level::Error => Style::new().bold().fg_color(Some(Color::Ansi(AnsiColor::Red))),
    }
  }
}

/// Format a log line without printing it
pub fn format_line(level: Level, msg: &str) -> String {
  let style = level.style();
  format!("{}{}{} {}", style.render(), level.as_str(), style.render_reset(), msg)
}

pub fn log(level: Level, msg: &str) {
  let line = format_line(level, msg);
  match level {
    Level::Error => eprintln!("{}", line),
    Level::Info | Level::Warning => println!("{}", line),
  }
}

pub fn info(msg: impl AsRef<str>) {
  log(Level::Info, msg.as_ref());
}

pub fn warning(msg: impl AsRef<str>) {
  log(Level::Warning, msg.as_ref());
}

pub fn error(msg: impl AsRef<str>) {
  log(Level::Error, msg.as_ref());
}

/// Log a fatal error and its help text, if any
pub fn print_error(err: &ReleaseError) {
  error(err.to_string());
  if let Some(help) = err.help_message() {
    eprintln!("      help: {}", help);
  }
}
