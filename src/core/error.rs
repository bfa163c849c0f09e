//! Error types for releaser with contextual messages
//!
//! Every failure in the pipeline is terminal: the error is logged once with
//! severity ERROR and the process exits with status 1. Variants exist so the
//! log line tells the user which kind of failure stopped the release.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Main error type for releaser
#[derive(Debug)]
pub enum ReleaseError {
  /// Release version does not have the `vX.Y.Z` shape
  InvalidVersion { input: String },

  /// release.toml could not be read, parsed or validated
  Config { path: PathBuf, reason: String },

  /// External tool exited with a non-zero status
  Tool {
    step: String,
    command: String,
    stderr: String,
  },

  /// No API token on the command line nor in the environment
  MissingToken { env_var: String },

  /// Gitea answered with a non-success status
  Http {
    action: String,
    status: u16,
    body: String,
  },

  /// Request never got a response (DNS, TLS, connection refused...)
  Transport { action: String, reason: String },

  /// Gitea answered with success but the body is not what we expect
  MalformedResponse { action: String, reason: String },

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message { message: String, context: Option<String> },
}

impl ReleaseError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
    }
  }

  /// Add context to an existing error
  ///
  /// Only generic messages and I/O errors carry context; typed variants
  /// already name what failed.
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ReleaseError::Message { message, context } => ReleaseError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
      },
      ReleaseError::Io(err) => ReleaseError::Message {
        message: ctx_str,
        context: Some(err.to_string()),
      },
      _ => self,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ReleaseError::InvalidVersion { .. } => Some("Use a version such as v1.4.0".to_string()),
      ReleaseError::MissingToken { env_var } => Some(format!(
        "Pass the Gitea API token as the last argument or export {}",
        env_var
      )),
      ReleaseError::Http { status: 401 | 403, .. } => {
        Some("Check that the API token is valid and has write access to the repository".to_string())
      }
      ReleaseError::Tool { command, stderr, .. } if stderr.starts_with("could not start") => {
        Some(format!("Make sure `{}` is installed and on PATH", command))
      }
      _ => None,
    }
  }
}

impl fmt::Display for ReleaseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReleaseError::InvalidVersion { input } => {
        write!(f, "invalid release version '{}': expected vX.Y.Z", input)
      }
      ReleaseError::Config { path, reason } => {
        write!(f, "invalid configuration in {}: {}", path.display(), reason)
      }
      ReleaseError::Tool { step, stderr, .. } => {
        write!(f, "failed to {}: {}", step, stderr.trim_end())
      }
      ReleaseError::MissingToken { .. } => {
        write!(f, "no gitea api token found in CLI params nor in ENV")
      }
      ReleaseError::Http { action, status, body } => {
        write!(f, "failed to {} (status {}): {}", action, status, body.trim_end())
      }
      ReleaseError::Transport { action, reason } => {
        write!(f, "failed to {}: {}", action, reason)
      }
      ReleaseError::MalformedResponse { action, reason } => {
        write!(f, "unexpected response while trying to {}: {}", action, reason)
      }
      ReleaseError::Io(e) => write!(f, "I/O error: {}", e),
      ReleaseError::Message { message, context } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, ": {}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ReleaseError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ReleaseError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for ReleaseError {
  fn from(err: io::Error) -> Self {
    ReleaseError::Io(err)
  }
}

impl From<regex::Error> for ReleaseError {
  fn from(err: regex::Error) -> Self {
    ReleaseError::message(format!("Regex error: {}", err))
  }
}

/// Result type alias for releaser
pub type ReleaseResult<T> = Result<T, ReleaseError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ReleaseError>,
{
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}
