//! Integration tests for fail-fast behaviour
//!
//! Every failure must exit with status 1 and leave later steps unexecuted.

use crate::helpers::{FakeGitea, INITIAL_SOURCE, TestWorkspace, stderr};
use anyhow::Result;

#[test]
fn test_missing_token_exits_before_any_step() -> Result<()> {
  let gitea = FakeGitea::start(vec![(201, r#"{"id": 1}"#)])?;
  let ws = TestWorkspace::new(&gitea.api_url())?;

  let output = ws.run_releaser(&[], "v1.4.0\n", &[])?;

  assert_eq!(output.status.code(), Some(1));
  let err = stderr(&output);
  assert!(err.contains("ERROR"));
  assert!(err.contains("no gitea api token found in CLI params nor in ENV"));

  assert!(gitea.requests().is_empty(), "no HTTP request may be sent");
  assert_eq!(ws.read_file("cmd/cli.go")?, INITIAL_SOURCE);
  assert_eq!(ws.head_subject()?, "Initial project setup");
  assert!(ws.tags()?.is_empty());

  Ok(())
}

#[test]
fn test_empty_token_in_environment_counts_as_missing() -> Result<()> {
  let gitea = FakeGitea::start(vec![])?;
  let ws = TestWorkspace::new(&gitea.api_url())?;

  let output = ws.run_releaser(&[], "v1.4.0\n", &[("GIT_CFG_MAPPER_TOKEN", "")])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("no gitea api token"));
  assert_eq!(ws.read_file("cmd/cli.go")?, INITIAL_SOURCE);

  Ok(())
}

#[test]
fn test_malformed_version_is_rejected() -> Result<()> {
  let gitea = FakeGitea::start(vec![])?;
  let ws = TestWorkspace::new(&gitea.api_url())?;

  let output = ws.run_releaser(&["secret"], "1.4\n", &[])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("invalid release version '1.4'"));
  assert_eq!(ws.read_file("cmd/cli.go")?, INITIAL_SOURCE);

  Ok(())
}

#[test]
fn test_changelog_failure_halts_before_commit() -> Result<()> {
  let gitea = FakeGitea::start(vec![(201, r#"{"id": 1}"#)])?;
  let ws = TestWorkspace::new(&gitea.api_url())?;

  let output = ws.run_releaser(&["secret"], "v1.4.0\n", &[("FAKE_CHGLOG_FAIL", "1")])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("failed to generate changelog: chglog exploded"));

  assert_eq!(ws.head_subject()?, "Initial project setup");
  assert!(ws.tags()?.is_empty());
  assert!(!ws.file_exists("build"));
  assert!(gitea.requests().is_empty());

  Ok(())
}

#[test]
fn test_build_failure_halts_before_release() -> Result<()> {
  let gitea = FakeGitea::start(vec![(201, r#"{"id": 1}"#)])?;
  let ws = TestWorkspace::new(&gitea.api_url())?;

  let output = ws.run_releaser(&["secret"], "v1.4.0\n", &[("FAKE_GO_FAIL_OS", "darwin")])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("failed to build darwin binary: build failed for darwin"));

  // Earlier steps stay done; nothing is rolled back
  assert_eq!(ws.remote_tags()?, vec!["v1.4.0"]);
  assert!(ws.file_exists("build/x86-x64_linux_config-mapper"));
  assert!(!ws.file_exists("build/x86-x64_darwin_config-mapper"));
  assert!(gitea.requests().is_empty());

  Ok(())
}

#[test]
fn test_push_failure_halts_before_build() -> Result<()> {
  let gitea = FakeGitea::start(vec![(201, r#"{"id": 1}"#)])?;
  let ws = TestWorkspace::new(&gitea.api_url())?;
  std::fs::remove_dir_all(&ws.remote)?;

  let output = ws.run_releaser(&["secret"], "v1.4.0\n", &[])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("failed to push changes"));

  // Commit and tag stay local
  assert_eq!(ws.head_subject()?, "v1.4.0");
  assert_eq!(ws.tags()?, vec!["v1.4.0"]);
  assert!(!ws.file_exists("build"));
  assert!(gitea.requests().is_empty());

  Ok(())
}

#[test]
fn test_release_body_failure_creates_no_release() -> Result<()> {
  let gitea = FakeGitea::start(vec![(201, r#"{"id": 1}"#)])?;
  let ws = TestWorkspace::new(&gitea.api_url())?;

  let output = ws.run_releaser(&["secret"], "v1.4.0\n", &[("FAKE_CHGLOG_FAIL_TEMPLATE", "1")])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("failed to generate release body: template not found"));

  assert_eq!(ws.remote_tags()?, vec!["v1.4.0"]);
  assert!(ws.file_exists("build/x86-x64_linux_config-mapper"));
  assert!(ws.file_exists("build/x86-x64_darwin_config-mapper"));
  assert!(gitea.requests().is_empty());

  Ok(())
}

#[test]
fn test_zero_release_id_skips_uploads() -> Result<()> {
  let gitea = FakeGitea::start(vec![(201, r#"{"id": 0}"#), (201, "{}"), (201, "{}")])?;
  let ws = TestWorkspace::new(&gitea.api_url())?;

  let output = ws.run_releaser(&["secret"], "v1.4.0\n", &[])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("no release id found in response body"));
  assert_eq!(gitea.requests().len(), 1);

  Ok(())
}

#[test]
fn test_missing_release_id_skips_uploads() -> Result<()> {
  let gitea = FakeGitea::start(vec![(201, r#"{"name": "v1.4.0"}"#), (201, "{}"), (201, "{}")])?;
  let ws = TestWorkspace::new(&gitea.api_url())?;

  let output = ws.run_releaser(&["secret"], "v1.4.0\n", &[])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("no release id found in response body"));

  let requests = gitea.requests();
  assert_eq!(requests.len(), 1);
  assert_eq!(requests[0].path, "/api/v1/repos/me/tool/releases");

  Ok(())
}

#[test]
fn test_release_creation_rejected() -> Result<()> {
  let gitea = FakeGitea::start(vec![(401, r#"{"message": "token is required"}"#)])?;
  let ws = TestWorkspace::new(&gitea.api_url())?;

  let output = ws.run_releaser(&["bad-token"], "v1.4.0\n", &[])?;

  assert_eq!(output.status.code(), Some(1));
  let err = stderr(&output);
  assert!(err.contains("failed to generate release (status 401)"));
  assert!(err.contains("token is required"));
  assert_eq!(gitea.requests().len(), 1);

  Ok(())
}

#[test]
fn test_failed_upload_aborts_remaining_uploads() -> Result<()> {
  let gitea = FakeGitea::start(vec![
    (201, r#"{"id": 3}"#),
    (500, r#"{"message": "disk full"}"#),
    (201, "{}"),
  ])?;
  let ws = TestWorkspace::new(&gitea.api_url())?;

  let output = ws.run_releaser(&["secret"], "v1.4.0\n", &[])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("failed to upload x86-x64_linux_config-mapper (status 500)"));

  let requests = gitea.requests();
  assert_eq!(requests.len(), 2, "darwin upload must not be attempted");
  assert_eq!(requests[1].path, "/api/v1/repos/me/tool/releases/3/assets");

  Ok(())
}
