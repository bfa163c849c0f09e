//! Release version input
//!
//! The version is read once from stdin and drives the source patch, the
//! commit message, the tag and the Gitea release name.

use crate::core::error::{ReleaseError, ReleaseResult};
use semver::Version;
use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

pub const PROMPT: &str = "Enter a release version (vX.Y.Z): ";

/// A `vX.Y.Z` release version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersion {
  tag: String,
}

impl ReleaseVersion {
  /// The literal `vX.Y.Z` string used for tags, commits and release names
  pub fn as_str(&self) -> &str {
    &self.tag
  }
}

impl FromStr for ReleaseVersion {
  type Err = ReleaseError;

  fn from_str(input: &str) -> ReleaseResult<Self> {
    let invalid = || ReleaseError::InvalidVersion {
      input: input.to_string(),
    };

    let numbers = input.strip_prefix('v').ok_or_else(invalid)?;
    // No pre-release or build metadata
    if !numbers.chars().all(|c| c.is_ascii_digit() || c == '.') {
      return Err(invalid());
    }
    Version::parse(numbers).map_err(|_| invalid())?;

    Ok(Self {
      tag: input.to_string(),
    })
  }
}

impl fmt::Display for ReleaseVersion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.tag)
  }
}

/// Prompt for the release version and parse the answer
pub fn prompt_release_version<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> ReleaseResult<ReleaseVersion> {
  write!(output, "{}", PROMPT)?;
  output.flush()?;

  let mut line = String::new();
  input.read_line(&mut line)?;

  line.trim().parse()
}
