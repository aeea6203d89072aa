// src/services/kaggle.rs

//! Kaggle competition listing client.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::{CompetitionRecord, KaggleCredentials, SourceConfig, display_deadline};
use crate::services::ListingSource;
use crate::utils::{http, page_url};

/// Number of listing pages fetched per run (about 20 competitions each).
///
/// Listings beyond this window are not seen.
pub const MAX_PAGES: usize = 3;

const LIST_PATH: &str = "competitions/list";
const SERVICE: &str = "Kaggle API";

/// Competition as returned by the listing endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteCompetition {
    title: String,
    #[serde(default)]
    deadline: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    reward: Option<String>,
    #[serde(default)]
    team_count: Option<u64>,
    #[serde(default)]
    user_has_entered: Option<bool>,
    #[serde(default)]
    tags: Option<Vec<RemoteTag>>,
}

#[derive(Debug, Deserialize)]
struct RemoteTag {
    #[serde(default)]
    name: String,
}

impl From<RemoteCompetition> for CompetitionRecord {
    fn from(remote: RemoteCompetition) -> Self {
        Self {
            title: remote.title,
            deadline: remote
                .deadline
                .as_deref()
                .map(display_deadline)
                .unwrap_or_default(),
            category: remote.category.unwrap_or_default(),
            reward: remote.reward.unwrap_or_default(),
            team_count: remote.team_count.unwrap_or(0),
            user_has_entered: remote.user_has_entered.unwrap_or(false),
            tags: remote
                .tags
                .unwrap_or_default()
                .into_iter()
                .map(|tag| tag.name)
                .collect(),
        }
    }
}

/// Listing client for the Kaggle public API.
pub struct KaggleClient {
    client: reqwest::Client,
    base_url: String,
    credentials: Option<KaggleCredentials>,
}

impl KaggleClient {
    /// Create a client. Missing credentials are reported on first fetch.
    pub fn new(config: &SourceConfig, credentials: Option<KaggleCredentials>) -> Result<Self> {
        Ok(Self {
            client: http::create_async_client(config)?,
            base_url: config.base_url.clone(),
            credentials,
        })
    }

    fn credentials(&self) -> Result<&KaggleCredentials> {
        self.credentials.as_ref().ok_or_else(|| {
            AppError::auth(
                SERVICE,
                "no credentials found; set KAGGLE_USERNAME and KAGGLE_KEY \
                 or place kaggle.json in ~/.kaggle (or $KAGGLE_CONFIG_DIR)",
            )
        })
    }

    /// Fetch a single listing page.
    async fn fetch_page(
        &self,
        creds: &KaggleCredentials,
        page: usize,
    ) -> Result<Vec<RemoteCompetition>> {
        let url = page_url(&self.base_url, LIST_PATH, page)?;
        log::debug!("Requesting listing page {}: {}", page, url);

        let response = self
            .client
            .get(url)
            .basic_auth(&creds.username, Some(&creds.key))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AppError::auth(
                SERVICE,
                format!("listing request rejected with {status}; check the API username and key"),
            ));
        }
        if !status.is_success() {
            return Err(AppError::upstream(format!(
                "listing page {page} returned {status}"
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            AppError::upstream(format!("listing page {page} is not a competition list: {e}"))
        })
    }
}

#[async_trait]
impl ListingSource for KaggleClient {
    async fn fetch_all(&self) -> Result<Vec<CompetitionRecord>> {
        let creds = self.credentials()?;
        let mut records = Vec::new();

        for page in 1..=MAX_PAGES {
            let competitions = self.fetch_page(creds, page).await?;
            if competitions.is_empty() {
                log::debug!("Listing page {} is empty, stopping", page);
                break;
            }

            log::debug!("Listing page {}: {} competitions", page, competitions.len());
            records.extend(competitions.into_iter().map(CompetitionRecord::from));
        }

        log::info!("Fetched {} competitions", records.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server, ServerGuard};

    const AUTH_HEADER: &str = "Basic YWxpY2U6YWJj";

    fn creds() -> Option<KaggleCredentials> {
        Some(KaggleCredentials {
            username: "alice".to_string(),
            key: "abc".to_string(),
        })
    }

    fn client_for(server: &ServerGuard, credentials: Option<KaggleCredentials>) -> KaggleClient {
        let config = SourceConfig {
            base_url: server.url(),
            ..SourceConfig::default()
        };
        KaggleClient::new(&config, credentials).unwrap()
    }

    fn page_body(titles: &[&str]) -> String {
        let items: Vec<serde_json::Value> = titles
            .iter()
            .map(|t| {
                serde_json::json!({
                    "ref": format!("https://www.kaggle.com/competitions/{}", t.to_lowercase()),
                    "title": t,
                    "deadline": "2030-06-30T23:59:00Z",
                    "category": "Featured",
                    "reward": "$10,000",
                    "teamCount": 42,
                    "userHasEntered": false,
                    "tags": [{"ref": "tabular", "name": "tabular"}]
                })
            })
            .collect();
        serde_json::Value::Array(items).to_string()
    }

    async fn mock_page(
        server: &mut ServerGuard,
        page: usize,
        body: String,
        hits: usize,
    ) -> mockito::Mock {
        server
            .mock("GET", "/competitions/list")
            .match_query(Matcher::UrlEncoded("page".into(), page.to_string()))
            .match_header("authorization", AUTH_HEADER)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(hits)
            .create_async()
            .await
    }

    #[test]
    fn test_remote_mapping() {
        let remote: RemoteCompetition = serde_json::from_str(
            r#"{
                "title": "Titanic",
                "deadline": "2030-01-07T00:00:00Z",
                "category": "Getting Started",
                "reward": "Knowledge",
                "teamCount": 15000,
                "userHasEntered": true,
                "tags": null
            }"#,
        )
        .unwrap();

        let record = CompetitionRecord::from(remote);
        assert_eq!(record.title, "Titanic");
        assert_eq!(record.deadline, "2030-01-07 00:00:00");
        assert_eq!(record.category, "Getting Started");
        assert_eq!(record.reward, "Knowledge");
        assert_eq!(record.team_count, 15000);
        assert!(record.user_has_entered);
        assert!(record.tags.is_empty());
    }

    #[test]
    fn test_remote_mapping_missing_fields() {
        let remote: RemoteCompetition = serde_json::from_str(r#"{"title": "Bare"}"#).unwrap();
        let record = CompetitionRecord::from(remote);
        assert_eq!(record.deadline, "");
        assert_eq!(record.team_count, 0);
        assert!(record.tags.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_stops_on_empty_page() {
        let mut server = Server::new_async().await;
        let p1 = mock_page(&mut server, 1, page_body(&["A", "B"]), 1).await;
        let p2 = mock_page(&mut server, 2, "[]".to_string(), 1).await;
        let p3 = mock_page(&mut server, 3, page_body(&["C"]), 0).await;

        let records = client_for(&server, creds()).fetch_all().await.unwrap();
        let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
        assert_eq!(records[0].tags, vec!["tabular"]);

        p1.assert_async().await;
        p2.assert_async().await;
        p3.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_caps_at_max_pages() {
        let mut server = Server::new_async().await;
        let _p1 = mock_page(&mut server, 1, page_body(&["A"]), 1).await;
        let _p2 = mock_page(&mut server, 2, page_body(&["B"]), 1).await;
        let _p3 = mock_page(&mut server, 3, page_body(&["C"]), 1).await;
        let p4 = mock_page(&mut server, 4, page_body(&["D"]), 0).await;

        let records = client_for(&server, creds()).fetch_all().await.unwrap();
        let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
        p4.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_unauthorized() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/competitions/list")
            .match_query(Matcher::Any)
            .with_status(401)
            .create_async()
            .await;

        let err = client_for(&server, creds()).fetch_all().await.unwrap_err();
        assert!(err.is_auth());
    }

    #[tokio::test]
    async fn test_fetch_server_error_is_fatal() {
        let mut server = Server::new_async().await;
        let _p1 = mock_page(&mut server, 1, page_body(&["A"]), 1).await;
        let _p2 = server
            .mock("GET", "/competitions/list")
            .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
            .with_status(500)
            .create_async()
            .await;

        let err = client_for(&server, creds()).fetch_all().await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_fetch_malformed_body() {
        let mut server = Server::new_async().await;
        let _p1 = mock_page(&mut server, 1, "{\"error\": true}".to_string(), 1).await;

        let err = client_for(&server, creds()).fetch_all().await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_fetch_without_credentials() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/competitions/list")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let err = client_for(&server, None).fetch_all().await.unwrap_err();
        assert!(err.is_auth());
        m.assert_async().await;
    }
}
