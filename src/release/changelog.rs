//! Changelog generation through git-chglog
//!
//! Two modes:
//! - `--next-tag <version> --output <file>` rewrites the cumulative changelog
//!   before the release commit
//! - `-t <template>` renders the release body once the tag exists; the
//!   rendered Markdown is read from stdout

use crate::core::config::ChangelogConfig;
use crate::core::error::ReleaseResult;
use crate::core::process::run_checked;
use crate::core::version::ReleaseVersion;
use std::path::Path;
use std::process::{Command, Stdio};

fn chglog(root: &Path, config: &ChangelogConfig) -> Command {
  let mut cmd = Command::new(&config.command);
  cmd.current_dir(root).stdin(Stdio::null());
  cmd
}

/// Regenerate the cumulative changelog for the upcoming tag
pub fn update_changelog(root: &Path, config: &ChangelogConfig, version: &ReleaseVersion) -> ReleaseResult<()> {
  let mut cmd = chglog(root, config);
  cmd
    .arg("--next-tag")
    .arg(version.as_str())
    .arg("--output")
    .arg(&config.output);

  run_checked("generate changelog", &mut cmd)?;
  Ok(())
}

/// Render the release-scoped body from the release template
pub fn render_release_notes(root: &Path, config: &ChangelogConfig) -> ReleaseResult<String> {
  let mut cmd = chglog(root, config);
  cmd.arg("-t").arg(&config.release_template);

  let output = run_checked("generate release body", &mut cmd)?;
  Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
