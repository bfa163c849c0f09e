use crate::core::error::{ReleaseError, ReleaseResult, ResultExt};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for releaser
/// Searched in order: release.toml, .release.toml, .config/release.toml
///
/// Every field is optional; an absent file yields the built-in defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReleaseConfig {
  /// Source file holding the `Version: "vX.Y.Z"` declaration
  #[serde(default = "default_version_file")]
  pub version_file: PathBuf,
  #[serde(default)]
  pub changelog: ChangelogConfig,
  #[serde(default)]
  pub build: BuildConfig,
  #[serde(default)]
  pub gitea: GiteaConfig,
}

/// git-chglog invocation settings
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChangelogConfig {
  #[serde(default = "default_changelog_command")]
  pub command: String,

  /// Cumulative changelog rewritten on every release
  #[serde(default = "default_changelog_output")]
  pub output: PathBuf,

  /// Template used to render the Gitea release body
  #[serde(default = "default_release_template")]
  pub release_template: PathBuf,
}

/// Cross-compilation settings
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
  /// Program and leading arguments; `-o <artifact>` is appended
  #[serde(default = "default_build_command")]
  pub command: Vec<String>,

  /// Environment variable carrying the target OS
  #[serde(default = "default_target_env")]
  pub target_env: String,

  #[serde(default = "default_targets")]
  pub targets: Vec<String>,

  #[serde(default = "default_output_dir")]
  pub output_dir: PathBuf,

  #[serde(default = "default_arch")]
  pub arch: String,

  #[serde(default = "default_binary")]
  pub binary: String,
}

/// Gitea API settings
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GiteaConfig {
  /// Repository API base, e.g. `https://host/api/v1/repos/owner/name`
  #[serde(default = "default_api_url")]
  pub api_url: String,

  /// Fallback source for the API token
  #[serde(default = "default_token_env")]
  pub token_env: String,
}

fn default_version_file() -> PathBuf {
  PathBuf::from("cmd/cli.go")
}

fn default_changelog_command() -> String {
  "git-chglog".to_string()
}

fn default_changelog_output() -> PathBuf {
  PathBuf::from("CHANGELOG.md")
}

fn default_release_template() -> PathBuf {
  PathBuf::from(".chglog/RELEASE_CHANGELOG.tpl.md")
}

fn default_build_command() -> Vec<String> {
  vec!["go".to_string(), "build".to_string()]
}

fn default_target_env() -> String {
  "GOOS".to_string()
}

fn default_targets() -> Vec<String> {
  vec!["linux".to_string(), "darwin".to_string()]
}

fn default_output_dir() -> PathBuf {
  PathBuf::from("build")
}

fn default_arch() -> String {
  "x86-x64".to_string()
}

fn default_binary() -> String {
  "config-mapper".to_string()
}

fn default_api_url() -> String {
  "https://gitea.antoine-langlois.net/api/v1/repos/DataHearth/config-mapper".to_string()
}

fn default_token_env() -> String {
  "GIT_CFG_MAPPER_TOKEN".to_string()
}

impl Default for ReleaseConfig {
  fn default() -> Self {
    Self {
      version_file: default_version_file(),
      changelog: ChangelogConfig::default(),
      build: BuildConfig::default(),
      gitea: GiteaConfig::default(),
    }
  }
}

impl Default for ChangelogConfig {
  fn default() -> Self {
    Self {
      command: default_changelog_command(),
      output: default_changelog_output(),
      release_template: default_release_template(),
    }
  }
}

impl Default for BuildConfig {
  fn default() -> Self {
    Self {
      command: default_build_command(),
      target_env: default_target_env(),
      targets: default_targets(),
      output_dir: default_output_dir(),
      arch: default_arch(),
      binary: default_binary(),
    }
  }
}

impl Default for GiteaConfig {
  fn default() -> Self {
    Self {
      api_url: default_api_url(),
      token_env: default_token_env(),
    }
  }
}

impl BuildConfig {
  /// Artifact file name for a target OS, e.g. `x86-x64_linux_config-mapper`
  pub fn artifact_name(&self, target: &str) -> String {
    format!("{}_{}_{}", self.arch, target, self.binary)
  }

  /// Artifact path relative to the project root
  pub fn artifact_path(&self, target: &str) -> PathBuf {
    self.output_dir.join(self.artifact_name(target))
  }
}

impl ReleaseConfig {
  /// Find config file in search order: release.toml, .release.toml, .config/release.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = [
      path.join("release.toml"),
      path.join(".release.toml"),
      path.join(".config").join("release.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config from the first file found, or defaults when there is none
  pub fn load(path: &Path) -> ReleaseResult<Self> {
    let Some(config_path) = Self::find_config_path(path) else {
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

    Self::parse(&content).map_err(|reason| ReleaseError::Config {
      path: config_path,
      reason,
    })
  }

  fn parse(content: &str) -> Result<Self, String> {
    let config: ReleaseConfig = toml_edit::de::from_str(content).map_err(|e| e.to_string())?;
    config.validate()?;
    Ok(config)
  }

  /// Validate configuration
  pub fn validate(&self) -> Result<(), String> {
    if self.build.command.is_empty() {
      return Err("build.command must name a program".to_string());
    }
    if self.build.targets.is_empty() {
      return Err("build.targets must list at least one target".to_string());
    }
    if !(self.gitea.api_url.starts_with("http://") || self.gitea.api_url.starts_with("https://")) {
      return Err(format!(
        "gitea.api_url must be an http(s) URL, got '{}'",
        self.gitea.api_url
      ));
    }
    Ok(())
  }
}
