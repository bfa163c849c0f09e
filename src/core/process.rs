//! External tool execution
//!
//! Every child runs to completion with stdout/stderr captured; a non-zero
//! status becomes `ReleaseError::Tool` carrying the captured stderr.

use crate::core::error::{ReleaseError, ReleaseResult};
use std::process::{Command, Output};

/// Run a command and fail on non-zero exit
///
/// `step` reads as the tail of "failed to ..." in the error message.
pub fn run_checked(step: &str, cmd: &mut Command) -> ReleaseResult<Output> {
  let program = cmd.get_program().to_string_lossy().into_owned();

  let output = cmd.output().map_err(|e| ReleaseError::Tool {
    step: step.to_string(),
    command: program.clone(),
    stderr: format!("could not start `{}`: {}", program, e),
  })?;

  if !output.status.success() {
    return Err(ReleaseError::Tool {
      step: step.to_string(),
      command: program,
      stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    });
  }

  Ok(output)
}
