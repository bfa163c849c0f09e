//! Gitea release creation and asset upload
//!
//! Talks to the repository API (`{api_url}/releases`) with the blocking
//! reqwest client. Every request carries `Authorization: token <value>`.
//! There are no retries and no timeouts.

use crate::core::error::{ReleaseError, ReleaseResult, ResultExt};
use crate::core::version::ReleaseVersion;
use reqwest::blocking::{Client, Response, multipart};
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Body of `POST /releases`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NewRelease {
  pub name: String,
  pub tag_name: String,
  pub body: String,
  pub draft: bool,
  pub prerelease: bool,
}

impl NewRelease {
  /// Published (non-draft, non-prerelease) release named after its tag
  pub fn published(version: &ReleaseVersion, body: String) -> Self {
    Self {
      name: version.to_string(),
      tag_name: version.to_string(),
      body,
      draft: false,
      prerelease: false,
    }
  }
}

/// The part of Gitea's release object we rely on
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedRelease {
  pub id: u64,
  #[serde(default)]
  pub html_url: Option<String>,
}

pub struct GiteaClient {
  http: Client,
  api_url: String,
  token: String,
}

impl GiteaClient {
  pub fn new(api_url: &str, token: impl Into<String>) -> ReleaseResult<Self> {
    let http = Client::builder()
      .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
      .timeout(None::<Duration>)
      .build()
      .map_err(|e| ReleaseError::message(format!("failed to build HTTP client: {}", e)))?;

    Ok(Self {
      http,
      api_url: api_url.trim_end_matches('/').to_string(),
      token: token.into(),
    })
  }

  fn auth_header(&self) -> String {
    format!("token {}", self.token)
  }

  /// Create the release record and return its identifier
  pub fn create_release(&self, release: &NewRelease) -> ReleaseResult<CreatedRelease> {
    let action = "generate release";
    let response = self
      .http
      .post(format!("{}/releases", self.api_url))
      .header(AUTHORIZATION, self.auth_header())
      .json(release)
      .send()
      .map_err(|e| transport(action, e))?;

    let body = success_body(action, response)?;
    parse_created_release(&body)
  }

  /// Attach one file to an existing release
  ///
  /// The file is sent as the multipart field `attachment` under `name`.
  pub fn upload_asset(&self, release_id: u64, name: &str, path: &Path) -> ReleaseResult<()> {
    let action = format!("upload {}", name);
    let data = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;

    let part = multipart::Part::bytes(data)
      .file_name(name.to_string())
      .mime_str("application/octet-stream")
      .map_err(|e| transport(&action, e))?;
    let form = multipart::Form::new().part("attachment", part);

    let response = self
      .http
      .post(format!("{}/releases/{}/assets", self.api_url, release_id))
      .header(AUTHORIZATION, self.auth_header())
      .multipart(form)
      .send()
      .map_err(|e| transport(&action, e))?;

    success_body(&action, response)?;
    Ok(())
  }
}

fn transport(action: &str, err: reqwest::Error) -> ReleaseError {
  ReleaseError::Transport {
    action: action.to_string(),
    reason: err.to_string(),
  }
}

/// Read the body, failing on any non-2xx status
fn success_body(action: &str, response: Response) -> ReleaseResult<String> {
  let status = response.status();
  let body = response.text().map_err(|e| transport(action, e))?;

  if !status.is_success() {
    return Err(ReleaseError::Http {
      action: action.to_string(),
      status: status.as_u16(),
      body,
    });
  }

  Ok(body)
}

/// Extract the release identifier from a creation response
///
/// A 2xx answer without a usable `id` is a malformed response, not a
/// request failure.
pub fn parse_created_release(body: &str) -> ReleaseResult<CreatedRelease> {
  let malformed = |reason: String| ReleaseError::MalformedResponse {
    action: "generate release".to_string(),
    reason,
  };

  let value: serde_json::Value =
    serde_json::from_str(body).map_err(|e| malformed(format!("response is not JSON: {}", e)))?;

  let missing = || malformed("no release id found in response body".to_string());
  match value.get("id") {
    None | Some(serde_json::Value::Null) => Err(missing()),
    Some(_) => {
      let release: CreatedRelease =
        serde_json::from_value(value).map_err(|e| malformed(format!("invalid release id: {}", e)))?;
      // Gitea never hands out id 0
      if release.id == 0 {
        return Err(missing());
      }
      Ok(release)
    }
  }
}
