//! In-place version bump of the `Version: "vX.Y.Z"` declaration

use crate::core::error::{ReleaseResult, ResultExt};
use crate::core::version::ReleaseVersion;
use regex::Regex;
use std::fs;
use std::path::Path;

const VERSION_DECLARATION: &str = r#"Version: "v\d+\.\d+\.\d+""#;

/// Replace every version declaration in `content`
///
/// Returns the new content and the number of declarations replaced. Bytes
/// outside the matches are left untouched.
pub fn patch_version_declaration(content: &str, version: &ReleaseVersion) -> ReleaseResult<(String, usize)> {
  let pattern = Regex::new(VERSION_DECLARATION)?;
  let count = pattern.find_iter(content).count();
  if count == 0 {
    return Ok((content.to_string(), 0));
  }

  let replacement = format!(r#"Version: "{}""#, version);
  let patched = pattern.replace_all(content, regex::NoExpand(&replacement));
  Ok((patched.into_owned(), count))
}

/// Rewrite the version declaration(s) in `path`
///
/// A file without any declaration is not rewritten; the caller decides how
/// loud to be about it.
pub fn update_version_file(path: &Path, version: &ReleaseVersion) -> ReleaseResult<usize> {
  let content = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

  let (patched, count) = patch_version_declaration(&content, version)?;
  if count > 0 {
    fs::write(path, patched).with_context(|| format!("failed to write {}", path.display()))?;
  }

  Ok(count)
}
