//! HTTP client for the college directory.

use reqwest::Url;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;

use vmc_model::{CollegeQuery, CollegeRecord};

use crate::config::ClientConfig;
use crate::directory::CollegeDirectory;
use crate::error::{ClientError, Result};
use crate::types::{CityItem, Envelope, SpecializationItem};

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("college-finder/", env!("CARGO_PKG_VERSION"));

/// Endpoints of the directory API, relative to the base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `specializations?stream=`
    Specializations,
    /// `cities?stream=`
    Cities,
    /// `colleges?stream=&specialization=[&city=]`
    Colleges,
    /// `search-college?q=`
    Search,
}

impl Endpoint {
    /// Path relative to the base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Specializations => "specializations",
            Endpoint::Cities => "cities",
            Endpoint::Colleges => "colleges",
            Endpoint::Search => "search-college",
        }
    }
}

/// Directory client backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    client: reqwest::Client,
    base: Url,
}

impl DirectoryClient {
    /// Creates a client for the configured directory.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base = parse_base_url(&config.base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, base })
    }

    /// Base URL the endpoints are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Builds the URL of `endpoint` with percent-encoded query parameters.
    pub fn endpoint_url(&self, endpoint: Endpoint, params: &[(&str, &str)]) -> Result<Url> {
        let mut url = self
            .base
            .join(endpoint.path())
            .map_err(|e| ClientError::InvalidBaseUrl {
                url: self.base.to_string(),
                reason: e.to_string(),
            })?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>> {
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let envelope: Envelope<T> = serde_json::from_slice(&bytes)?;
        Ok(envelope.data)
    }
}

impl CollegeDirectory for DirectoryClient {
    async fn specializations(&self, stream: &str) -> Result<Vec<String>> {
        let url = self.endpoint_url(Endpoint::Specializations, &[("stream", stream)])?;
        let items: Vec<SpecializationItem> = self.fetch(url).await?;
        tracing::debug!(stream, count = items.len(), "Fetched specializations");
        Ok(items.into_iter().map(|item| item.course).collect())
    }

    async fn cities(&self, stream: &str) -> Result<Vec<String>> {
        let url = self.endpoint_url(Endpoint::Cities, &[("stream", stream)])?;
        let items: Vec<CityItem> = self.fetch(url).await?;
        tracing::debug!(stream, count = items.len(), "Fetched cities");
        Ok(items.into_iter().map(|item| item.city).collect())
    }

    async fn colleges(&self, query: &CollegeQuery) -> Result<Vec<CollegeRecord>> {
        let url = self.endpoint_url(Endpoint::Colleges, &college_params(query))?;
        let colleges: Vec<CollegeRecord> = self.fetch(url).await?;
        tracing::debug!(count = colleges.len(), "Fetched colleges");
        Ok(colleges)
    }

    async fn search(&self, query: &str) -> Result<Vec<CollegeRecord>> {
        let url = self.endpoint_url(Endpoint::Search, &[("q", query)])?;
        let colleges: Vec<CollegeRecord> = self.fetch(url).await?;
        tracing::debug!(count = colleges.len(), "Colleges fetched by search");
        Ok(colleges)
    }
}

/// Query parameters of a colleges lookup, in the order the backend documents.
pub fn college_params(query: &CollegeQuery) -> Vec<(&str, &str)> {
    let mut params = vec![
        ("stream", query.stream.as_str()),
        ("specialization", query.specialization.as_str()),
    ];
    if let Some(city) = &query.city {
        params.push(("city", city.as_str()));
    }
    params
}

/// Parses the base URL and makes sure relative joins keep its last segment.
fn parse_base_url(raw: &str) -> Result<Url> {
    let invalid = |reason: String| ClientError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };
    let mut url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("expected an http(s) URL".to_string()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> DirectoryClient {
        DirectoryClient::new(&ClientConfig::default().with_base_url(base)).unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = DirectoryClient::new(&ClientConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_rejects_non_http_base() {
        let result = DirectoryClient::new(&ClientConfig::default().with_base_url("mailto:a@b"));
        assert!(matches!(result, Err(ClientError::InvalidBaseUrl { .. })));

        let result = DirectoryClient::new(&ClientConfig::default().with_base_url("not a url"));
        assert!(matches!(result, Err(ClientError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn test_base_without_trailing_slash_keeps_last_segment() {
        let client = client("http://localhost:5000/api/students");
        let url = client
            .endpoint_url(Endpoint::Cities, &[("stream", "Science")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/api/students/cities?stream=Science"
        );
    }

    #[test]
    fn test_query_values_are_encoded() {
        let client = client("http://localhost:5000/api/students/");
        let url = client
            .endpoint_url(Endpoint::Search, &[("q", "St. Xavier's & Co")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/api/students/search-college?q=St.+Xavier%27s+%26+Co"
        );
    }

    #[test]
    fn test_college_params_with_city() {
        let query = CollegeQuery {
            stream: "Science".to_string(),
            specialization: "Physics".to_string(),
            city: Some("All".to_string()),
        };
        let client = client("http://localhost:5000/api/students/");
        let url = client
            .endpoint_url(Endpoint::Colleges, &college_params(&query))
            .unwrap();
        assert_eq!(
            url.query(),
            Some("stream=Science&specialization=Physics&city=All")
        );
    }

    #[test]
    fn test_college_params_without_city() {
        let query = CollegeQuery {
            stream: "Master of Arts".to_string(),
            specialization: "History".to_string(),
            city: None,
        };
        let params = college_params(&query);
        assert_eq!(params.len(), 2);
        assert!(params.iter().all(|(key, _)| *key != "city"));
    }

    #[tokio::test]
    async fn test_unreachable_directory_is_a_network_error() {
        let client = client("http://127.0.0.1:9/api/students/");
        let result = client.specializations("Science").await;
        assert!(matches!(
            result,
            Err(ClientError::Network(_) | ClientError::Timeout)
        ));
    }
}
