//! Cross-compilation, one build per target OS

use crate::core::config::BuildConfig;
use crate::core::error::{ReleaseError, ReleaseResult};
use crate::core::process::run_checked;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Build the binary for one target OS
///
/// The ambient environment is inherited; only `config.target_env` is
/// overridden. Returns the artifact path relative to `root`.
pub fn build_target(root: &Path, config: &BuildConfig, target: &str) -> ReleaseResult<PathBuf> {
  let (program, args) = config
    .command
    .split_first()
    .ok_or_else(|| ReleaseError::message("build command is empty"))?;
  let artifact = config.artifact_path(target);

  let mut cmd = Command::new(program);
  cmd
    .current_dir(root)
    .args(args)
    .arg("-o")
    .arg(&artifact)
    .env(&config.target_env, target)
    .stdin(Stdio::null());

  run_checked(&format!("build {} binary", target), &mut cmd)?;
  Ok(artifact)
}
