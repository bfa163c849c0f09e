//! API token resolution

/// Pick the API token: CLI argument first, then the environment
///
/// Empty or whitespace-only values are treated as absent.
pub fn resolve_token(cli: Option<String>, env: Option<String>) -> Option<String> {
  [cli, env]
    .into_iter()
    .flatten()
    .map(|token| token.trim().to_string())
    .find(|token| !token.is_empty())
}
