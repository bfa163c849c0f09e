//! The release pipeline
//!
//! ```text
//! Start → VersionPatched → ChangelogUpdated → Committed → TaggedAndPushed
//!       → Built(target)... → ReleaseCreated → AssetsUploaded → Done
//! ```
//!
//! Steps run strictly in order and the first failure stops the run. Nothing
//! is rolled back: a failed upload leaves the release created with the
//! assets uploaded so far.

use crate::core::config::ReleaseConfig;
use crate::core::error::ReleaseResult;
use crate::core::vcs::SystemGit;
use crate::core::version::ReleaseVersion;
use crate::release::gitea::{GiteaClient, NewRelease};
use crate::release::{build, changelog, version_file};
use crate::ui::log;
use std::fmt;
use std::path::{Path, PathBuf};

/// Last stage the pipeline completed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
  Start,
  VersionPatched,
  ChangelogUpdated,
  Committed,
  TaggedAndPushed,
  Built(String),
  ReleaseCreated(u64),
  AssetsUploaded,
  Done,
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Stage::Start => write!(f, "start"),
      Stage::VersionPatched => write!(f, "version patched"),
      Stage::ChangelogUpdated => write!(f, "changelog updated"),
      Stage::Committed => write!(f, "committed"),
      Stage::TaggedAndPushed => write!(f, "tagged and pushed"),
      Stage::Built(target) => write!(f, "{} binary built", target),
      Stage::ReleaseCreated(id) => write!(f, "release {} created", id),
      Stage::AssetsUploaded => write!(f, "assets uploaded"),
      Stage::Done => write!(f, "done"),
    }
  }
}

pub struct ReleasePipeline<'a> {
  root: PathBuf,
  config: &'a ReleaseConfig,
  gitea: GiteaClient,
  stage: Stage,
}

impl<'a> ReleasePipeline<'a> {
  pub fn new(root: &Path, config: &'a ReleaseConfig, gitea: GiteaClient) -> Self {
    Self {
      root: root.to_path_buf(),
      config,
      gitea,
      stage: Stage::Start,
    }
  }

  pub fn stage(&self) -> &Stage {
    &self.stage
  }

  fn advance(&mut self, stage: Stage) {
    self.stage = stage;
  }

  /// Run every step for `version`
  pub fn run(&mut self, version: &ReleaseVersion) -> ReleaseResult<()> {
    self.patch_version(version)?;
    self.update_changelog(version)?;
    self.commit_tag_and_push(version)?;
    let artifacts = self.build_targets()?;
    self.publish(version, &artifacts)?;

    self.advance(Stage::Done);
    log::info("Done !");
    Ok(())
  }

  fn patch_version(&mut self, version: &ReleaseVersion) -> ReleaseResult<()> {
    log::info("updating release version in files");
    let path = self.root.join(&self.config.version_file);
    let replaced = version_file::update_version_file(&path, version)?;
    if replaced == 0 {
      log::warning(format!(
        "no `Version: \"vX.Y.Z\"` declaration found in {}, file left unchanged",
        self.config.version_file.display()
      ));
    }

    self.advance(Stage::VersionPatched);
    Ok(())
  }

  fn update_changelog(&mut self, version: &ReleaseVersion) -> ReleaseResult<()> {
    log::info(format!("generating {}", self.config.changelog.output.display()));
    changelog::update_changelog(&self.root, &self.config.changelog, version)?;

    self.advance(Stage::ChangelogUpdated);
    Ok(())
  }

  fn commit_tag_and_push(&mut self, version: &ReleaseVersion) -> ReleaseResult<()> {
    log::info("commit & push changes");
    let git = SystemGit::open(&self.root)?;

    git.stage_all()?;
    git.commit(version.as_str())?;
    self.advance(Stage::Committed);

    git.create_annotated_tag(version.as_str())?;
    git.push_with_tags()?;
    self.advance(Stage::TaggedAndPushed);
    Ok(())
  }

  /// Build every target; returns `(asset name, absolute path)` pairs
  fn build_targets(&mut self) -> ReleaseResult<Vec<(String, PathBuf)>> {
    let config = self.config;
    let build_config = &config.build;
    let mut artifacts = Vec::with_capacity(build_config.targets.len());

    for target in &build_config.targets {
      log::info(format!("building {} binary", target));
      let artifact = build::build_target(&self.root, build_config, target)?;
      artifacts.push((build_config.artifact_name(target), self.root.join(artifact)));
      self.advance(Stage::Built(target.clone()));
    }

    Ok(artifacts)
  }

  fn publish(&mut self, version: &ReleaseVersion, artifacts: &[(String, PathBuf)]) -> ReleaseResult<()> {
    log::info("creating gitea release");
    let body = changelog::render_release_notes(&self.root, &self.config.changelog)?;

    let created = self.gitea.create_release(&NewRelease::published(version, body))?;
    self.advance(Stage::ReleaseCreated(created.id));

    for (name, path) in artifacts {
      log::info(format!("uploading {}", name));
      self.gitea.upload_asset(created.id, name, path)?;
    }
    self.advance(Stage::AssetsUploaded);

    if let Some(url) = &created.html_url {
      log::info(format!("release published at {}", url));
    }
    Ok(())
  }
}
