//! Release orchestration
//!
//! One run takes a `vX.Y.Z` version through every step of a release:
//!
//! - **version_file**: patch the `Version: "vX.Y.Z"` declaration in source
//! - **changelog**: regenerate CHANGELOG.md and render the release body (git-chglog)
//! - **build**: cross-compile one binary per target OS
//! - **token**: resolve the Gitea API token (CLI argument, then environment)
//! - **gitea**: create the release and upload the binaries as assets
//! - **pipeline**: run the steps in order, stopping at the first failure
//!
//! Committing, tagging and pushing go through `core::vcs::SystemGit`.

pub mod build;
pub mod changelog;
pub mod gitea;
pub mod pipeline;
pub mod token;
pub mod version_file;

pub use pipeline::ReleasePipeline;
pub use token::resolve_token;
