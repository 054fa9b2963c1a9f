// src/catalog_api.rs
use crate::errors::ApiError;
use crate::podcast::{PodcastDetail, PodcastId, PodcastSummary};
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{Client, Response};
use serde_json::Value;

/// Base URL of the hosted catalog service. The constructor takes the base
/// explicitly so tests can point at something else.
pub const API_BASE_URL: &str = "https://podcast-api.netlify.app";

// ===== fetcher
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// One GET against the list endpoint. Invoked once at startup; no retry.
    async fn fetch_catalog(&self) -> Result<Vec<PodcastSummary>, ApiError>;

    /// One GET against the per-item endpoint, once per selection event.
    async fn fetch_detail(&self, id: &PodcastId) -> Result<PodcastDetail, ApiError>;
}

// ===== Live http client
pub struct HttpCatalogApi {
    client: Client,
    base_url: String,
}

impl HttpCatalogApi {
    pub fn new(base_url: &str) -> Self {
        const APP_USER_AGENT: &str =
            "podgrid/0.1 (+https://github.com/your-project/podgrid)";

        let client: Client = reqwest::Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to create request client.");

        Self { client, base_url: base_url.trim_end_matches('/').to_string() }
    }

    async fn get_body(&self, url: &str) -> Result<String, ApiError> {
        let response: Response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::BadStatus(response.status()));
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn fetch_catalog(&self) -> Result<Vec<PodcastSummary>, ApiError> {
        let url = format!("{}/", self.base_url);
        info!("HttpCatalogApi: fetching catalog from {}", url);
        let body = self.get_body(&url).await?;
        debug!("HttpCatalogApi: catalog body length {}", body.len());
        decode_catalog(&body)
    }

    async fn fetch_detail(&self, id: &PodcastId) -> Result<PodcastDetail, ApiError> {
        let url = format!("{}/id/{}", self.base_url, id);
        info!("HttpCatalogApi: fetching detail from {}", url);
        let body = self.get_body(&url).await?;
        decode_detail(&body)
    }
}

/// Decodes the list payload. The body must be a JSON array; anything else is
/// a shape error. Records that fail to decode are skipped rather than
/// failing the whole catalog.
pub fn decode_catalog(body: &str) -> Result<Vec<PodcastSummary>, ApiError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| ApiError::ShapeError(format!("not valid JSON ({})", e)))?;

    let Value::Array(entries) = value else {
        return Err(ApiError::ShapeError("expected a JSON array".to_string()));
    };

    let mut catalog: Vec<PodcastSummary> = Vec::with_capacity(entries.len());
    for entry in entries {
        match serde_json::from_value::<PodcastSummary>(entry) {
            Ok(summary) => catalog.push(summary),
            Err(e) => warn!("decode_catalog: skipping undecodable record: {}", e),
        }
    }
    Ok(catalog)
}

pub fn decode_detail(body: &str) -> Result<PodcastDetail, ApiError> {
    serde_json::from_str(body)
        .map_err(|e| ApiError::ShapeError(format!("bad detail payload ({})", e)))
}

// ===== Fake client for testing
#[cfg(test)]
pub struct FakeCatalogApi {
    pub catalog_body: String,
    pub detail_bodies: std::collections::HashMap<String, String>,
}

#[cfg(test)]
#[async_trait]
impl CatalogApi for FakeCatalogApi {
    async fn fetch_catalog(&self) -> Result<Vec<PodcastSummary>, ApiError> {
        decode_catalog(&self.catalog_body)
    }

    async fn fetch_detail(&self, id: &PodcastId) -> Result<PodcastDetail, ApiError> {
        match self.detail_bodies.get(id.as_str()) {
            Some(body) => decode_detail(body),
            None => Err(ApiError::BadStatus(reqwest::StatusCode::NOT_FOUND)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn summary_json(id: &str, title: &str) -> String {
        format!(
            r#"{{
                "id": "{id}",
                "title": "{title}",
                "image": "https://example.com/{id}.jpg",
                "seasons": 2,
                "genres": [1, 4],
                "updated": "2022-11-03T07:00:00.000Z"
            }}"#
        )
    }

    #[test]
    fn catalog_decodes_every_well_formed_record() {
        let body = format!("[{},{}]", summary_json("10", "A"), summary_json("11", "B"));
        let catalog = decode_catalog(&body).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].id().as_str(), "10");
        assert_eq!(catalog[1].title(), "B");
    }

    #[test]
    fn non_array_body_is_a_shape_error() {
        let result = decode_catalog(r#"{"message": "maintenance"}"#);
        assert!(matches!(result, Err(ApiError::ShapeError(_))));
    }

    #[test]
    fn garbage_body_is_a_shape_error() {
        assert!(matches!(decode_catalog("<html>"), Err(ApiError::ShapeError(_))));
    }

    #[test]
    fn undecodable_records_are_skipped_not_fatal() {
        let body = format!(r#"[{}, {{"id": 7}}]"#, summary_json("10", "A"));
        let catalog = decode_catalog(&body).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].id().as_str(), "10");
    }

    #[tokio::test]
    async fn fake_api_round_trips_a_detail() {
        let detail_body = r#"{
            "id": "10",
            "title": "Something Was Wrong",
            "image": "https://example.com/10.jpg",
            "description": "An award-winning docuseries.",
            "seasons": [{"title": "Season 1", "episodes": 10}],
            "genres": [1],
            "updated": "2022-11-03T07:00:00.000Z"
        }"#;
        let api = FakeCatalogApi {
            catalog_body: "[]".to_string(),
            detail_bodies: HashMap::from([("10".to_string(), detail_body.to_string())]),
        };

        let detail = api.fetch_detail(&PodcastId::new("10")).await.unwrap();
        assert_eq!(detail.title(), "Something Was Wrong");
        assert_eq!(detail.seasons().len(), 1);
    }

    #[tokio::test]
    async fn fake_api_reports_missing_details_as_status_errors() {
        let api = FakeCatalogApi { catalog_body: "[]".to_string(), detail_bodies: HashMap::new() };
        let result = api.fetch_detail(&PodcastId::new("99")).await;
        assert!(matches!(result, Err(ApiError::BadStatus(_))));
    }
}
