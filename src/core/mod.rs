//! Core building blocks shared by the release steps
//!
//! - **config**: release.toml parsing and defaults
//! - **error**: error types with contextual help messages
//! - **process**: external tool execution with status checks
//! - **vcs**: git operations (SystemGit)
//! - **version**: the `vX.Y.Z` release version and its prompt

pub mod config;
pub mod error;
pub mod process;
pub mod vcs;
pub mod version;
