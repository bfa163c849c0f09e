//! System git backend
//!
//! Every operation is one `git` subprocess run against the project root.
//! The ambient environment is inherited so the user's identity, signing
//! setup and credential helpers apply to the release commit and push.

use crate::core::error::ReleaseResult;
use crate::core::process::run_checked;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Git backend using system git (zero crate dependencies)
pub struct SystemGit {
  /// Repository working directory
  repo_path: PathBuf,
}

impl SystemGit {
  /// Open a git repository
  ///
  /// Fails when `path` is not inside a work tree.
  pub fn open(path: &Path) -> ReleaseResult<Self> {
    let git = Self {
      repo_path: path.to_path_buf(),
    };
    git.run("open git repository", &["rev-parse", "--show-toplevel"])?;
    Ok(git)
  }

  /// Stage every working-tree change (`git add .`)
  pub fn stage_all(&self) -> ReleaseResult<()> {
    self.run("stage changes", &["add", "."])
  }

  /// Commit the index with a literal message
  pub fn commit(&self, message: &str) -> ReleaseResult<()> {
    self.run("commit changes", &["commit", "-m", message])
  }

  /// Create an annotated tag whose message is the tag name
  pub fn create_annotated_tag(&self, tag: &str) -> ReleaseResult<()> {
    self.run("create tag", &["tag", "-a", tag, "-m", tag])
  }

  /// Push the current branch together with reachable annotated tags
  pub fn push_with_tags(&self) -> ReleaseResult<()> {
    self.run("push changes", &["push", "--follow-tags"])
  }

  fn run(&self, step: &str, args: &[&str]) -> ReleaseResult<()> {
    run_checked(step, self.git_cmd().args(args))?;
    Ok(())
  }

  /// Create a git command rooted at the repository
  ///
  /// - Sets working directory to repo path
  /// - Never prompts on the terminal
  /// - Adds safe configuration overrides
  pub(crate) fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(&self.repo_path);
    cmd.stdin(Stdio::null());
    cmd.env("GIT_TERMINAL_PROMPT", "0");

    cmd.arg("-c").arg("advice.detachedHead=false");
    cmd.arg("-c").arg("core.quotePath=false"); // Don't escape non-ASCII

    cmd
  }
}
