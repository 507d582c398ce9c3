use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShipitError};
use crate::publish::{ReleasePublisher, RepoSlug};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Serialize)]
struct CreateReleaseRequest<'a> {
    tag_name: &'a str,
    name: &'a str,
    body: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreateReleaseResponse {
    html_url: String,
}

/// Publishes releases through the GitHub REST API
pub struct GitHubPublisher {
    slug: RepoSlug,
    token: String,
    api_url: String,
    http_client: reqwest::blocking::Client,
}

impl GitHubPublisher {
    /// Create a publisher for `slug` authenticating with `token`.
    ///
    /// Requests time out after 60 seconds (15 seconds to connect); a
    /// timeout is reported like any other failed publish.
    pub fn new(slug: RepoSlug, token: impl Into<String>, api_url: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ShipitError::config("GitHub token must not be empty"));
        }

        let http_client = reqwest::blocking::Client::builder()
            .connect_timeout(Duration::from_secs(15))
            .timeout(Duration::from_secs(60))
            .user_agent(concat!("shipit/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(GitHubPublisher {
            slug,
            token,
            api_url: api_url.into(),
            http_client,
        })
    }

    fn releases_endpoint(&self) -> String {
        format!(
            "{}/repos/{}/{}/releases",
            self.api_url.trim_end_matches('/'),
            self.slug.owner,
            self.slug.repo
        )
    }
}

impl ReleasePublisher for GitHubPublisher {
    fn publish_release(&self, tag: &str, title: &str, body: &str) -> Result<String> {
        let payload = CreateReleaseRequest {
            tag_name: tag,
            name: title,
            body,
        };

        let response = self
            .http_client
            .post(self.releases_endpoint())
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .bearer_auth(&self.token)
            .json(&payload)
            .send()
            .map_err(|e| ShipitError::remote_release(None, e.to_string()))?;

        let status = response.status();
        if status != StatusCode::CREATED {
            let message = response
                .text()
                .unwrap_or_else(|_| "unable to read release response body".to_string());
            return Err(ShipitError::remote_release(Some(status.as_u16()), message));
        }

        let created: CreateReleaseResponse = response
            .json()
            .map_err(|e| ShipitError::remote_release(Some(status.as_u16()), e.to_string()))?;

        Ok(created.html_url)
    }
}
