//! Release client implementation
//!
//! Lists ESP-IDF releases from the GitHub releases API.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::defaults::RELEASE_LIST_LIMIT;
use crate::config::urls;
use crate::error::ReleaseError;

/// A published ESP-IDF release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Git tag, used as the version identifier
    pub tag_name: String,
    /// Human-readable release title
    #[serde(default)]
    pub name: String,
    /// RFC 3339 publication timestamp
    #[serde(default)]
    pub published_at: String,
    /// Whether this is a pre-release
    #[serde(default)]
    pub prerelease: bool,
}

impl Release {
    /// `stable` or `prerelease`
    pub fn kind(&self) -> &'static str {
        if self.prerelease {
            "prerelease"
        } else {
            "stable"
        }
    }

    /// Publication date without the time of day
    pub fn published_date(&self) -> &str {
        self.published_at
            .get(..10)
            .unwrap_or(self.published_at.as_str())
    }
}

/// Client for the ESP-IDF releases API
#[derive(Debug)]
pub struct ReleaseClient {
    /// HTTP client
    client: reqwest::Client,
    /// Repository API base URL
    base_url: String,
}

impl ReleaseClient {
    /// Create a release client for the upstream repository
    pub fn new() -> Self {
        Self::with_base_url(urls::RELEASES_API)
    }

    /// Create a release client with a custom API base URL
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .user_agent(concat!("idfmgr/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ReleaseError> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .await
            .map_err(|e| ReleaseError::Unavailable {
                url: url.clone(),
                error: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(ReleaseError::BadStatus {
                url,
                status: response.status().as_u16(),
            });
        }

        response.json().await.map_err(|e| ReleaseError::Parse {
            url,
            error: e.to_string(),
        })
    }

    /// The newest releases, most recently published first
    pub async fn list_releases(&self) -> Result<Vec<Release>, ReleaseError> {
        let mut releases: Vec<Release> = self.get("/releases").await?;
        releases.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        releases.truncate(RELEASE_LIST_LIMIT);
        Ok(releases)
    }

    /// Tag of the release GitHub marks as latest
    pub async fn latest_tag(&self) -> Result<String, ReleaseError> {
        let release: Release = self.get("/releases/latest").await?;
        Ok(release.tag_name)
    }
}

impl Default for ReleaseClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn release(tag: &str, published_at: &str, prerelease: bool) -> serde_json::Value {
        serde_json::json!({
            "tag_name": tag,
            "name": format!("ESP-IDF {tag}"),
            "published_at": published_at,
            "prerelease": prerelease,
            "assets": []
        })
    }

    #[test]
    fn test_release_kind_and_date() {
        let r = Release {
            tag_name: "v5.2-beta1".to_string(),
            name: String::new(),
            published_at: "2023-11-30T08:12:44Z".to_string(),
            prerelease: true,
        };
        assert_eq!(r.kind(), "prerelease");
        assert_eq!(r.published_date(), "2023-11-30");
    }

    #[tokio::test]
    async fn test_list_sorts_newest_first() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/releases"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                release("v4.4.6", "2023-09-01T00:00:00Z", false),
                release("v5.1.2", "2023-11-09T00:00:00Z", false),
                release("v5.2-beta1", "2023-11-30T00:00:00Z", true),
            ])))
            .mount(&server)
            .await;

        let client = ReleaseClient::with_base_url(&server.uri());
        let releases = client.list_releases().await.unwrap();

        let tags: Vec<_> = releases.iter().map(|r| r.tag_name.as_str()).collect();
        assert_eq!(tags, vec!["v5.2-beta1", "v5.1.2", "v4.4.6"]);
    }

    #[tokio::test]
    async fn test_list_is_capped() {
        let server = MockServer::start().await;
        let body: Vec<_> = (0..30)
            .map(|i| release(&format!("v5.0.{i}"), &format!("2023-01-{:02}T00:00:00Z", i % 28 + 1), false))
            .collect();
        Mock::given(method("GET"))
            .and(path("/releases"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let releases = ReleaseClient::with_base_url(&server.uri())
            .list_releases()
            .await
            .unwrap();
        assert_eq!(releases.len(), RELEASE_LIST_LIMIT);
    }

    #[tokio::test]
    async fn test_latest_tag() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/releases/latest"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(release("v5.1.2", "2023-11-09T00:00:00Z", false)),
            )
            .mount(&server)
            .await;

        let tag = ReleaseClient::with_base_url(&server.uri())
            .latest_tag()
            .await
            .unwrap();
        assert_eq!(tag, "v5.1.2");
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/releases"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let err = ReleaseClient::with_base_url(&server.uri())
            .list_releases()
            .await
            .unwrap_err();
        assert!(matches!(err, ReleaseError::BadStatus { status: 403, .. }));
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/releases"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = ReleaseClient::with_base_url(&server.uri())
            .list_releases()
            .await
            .unwrap_err();
        assert!(matches!(err, ReleaseError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_unavailable() {
        let err = ReleaseClient::with_base_url("http://127.0.0.1:1")
            .latest_tag()
            .await
            .unwrap_err();
        assert!(matches!(err, ReleaseError::Unavailable { .. }));
    }
}
