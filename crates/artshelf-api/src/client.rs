use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, error};

use crate::records::{FavoriteRecord, ProductRecord};
use crate::retry::{is_retryable_status, with_retry, RetryConfig};

/// Requests that take longer than this fail with [`ApiError::Timeout`]
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const PRODUCTS_PATH: &str = "/api/product";
const FAVORITES_PATH: &str = "/api/favorite";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request failed with status {status}: {body}")]
    RequestFailed {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    NetworkError(reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl ApiError {
    /// Whether sending the same request again could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::RequestFailed { status, .. } => is_retryable_status(*status),
            ApiError::Timeout | ApiError::NetworkError(_) => true,
            ApiError::ParseError(_) | ApiError::ClientBuild(_) => false,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::NetworkError(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// HTTP client for the catalog service.
///
/// Reads are retried with backoff, writes are sent exactly once. Every
/// failure is logged before it reaches the caller.
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
    retry_config: RetryConfig,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("artshelf/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            retry_config: RetryConfig::default(),
        })
    }

    /// Replace the retry policy used for read requests
    pub fn with_retry_config(mut self, retry_config: RetryConfig) -> Self {
        self.retry_config = retry_config;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_products(&self) -> Result<Vec<ProductRecord>> {
        let url = self.url(PRODUCTS_PATH);
        self.get_json(&url).await
    }

    pub async fn fetch_favorites(&self) -> Result<Vec<FavoriteRecord>> {
        let url = self.url(FAVORITES_PATH);
        self.get_json(&url).await
    }

    pub async fn add_favorite(&self, favorite: &FavoriteRecord) -> Result<FavoriteRecord> {
        let url = self.favorite_url(&favorite.id);
        let result = async {
            let body = read_text(self.client.post(&url).json(favorite).send().await?).await?;
            Ok::<_, ApiError>(serde_json::from_str(&body)?)
        }
        .await;
        log_failure("POST", &url, result)
    }

    /// Delete one favorite. The service may answer with an empty body when
    /// nothing was stored under `id`.
    pub async fn delete_favorite(&self, id: &str) -> Result<Option<FavoriteRecord>> {
        let url = self.favorite_url(id);
        let result = async {
            let body = read_text(self.client.delete(&url).send().await?).await?;
            if body.trim().is_empty() {
                return Ok(None);
            }
            Ok::<_, ApiError>(serde_json::from_str::<Option<FavoriteRecord>>(&body)?)
        }
        .await;
        log_failure("DELETE", &url, result)
    }

    pub async fn delete_all_favorites(&self) -> Result<Vec<FavoriteRecord>> {
        let url = self.url(FAVORITES_PATH);
        let result = async {
            let body = read_text(self.client.delete(&url).send().await?).await?;
            if body.trim().is_empty() {
                return Ok(Vec::new());
            }
            Ok::<_, ApiError>(serde_json::from_str(&body)?)
        }
        .await;
        log_failure("DELETE", &url, result)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let result = with_retry(&self.retry_config, ApiError::is_retryable, || async {
            debug!("GET {}", url);
            let body = read_text(self.client.get(url).send().await?).await?;
            Ok::<_, ApiError>(serde_json::from_str(&body)?)
        })
        .await;
        log_failure("GET", url, result)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn favorite_url(&self, id: &str) -> String {
        format!("{}{}/{}", self.base_url, FAVORITES_PATH, urlencoding::encode(id))
    }
}

async fn read_text(response: reqwest::Response) -> Result<String> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::RequestFailed { status, body });
    }
    Ok(response.text().await?)
}

fn log_failure<T>(method: &str, url: &str, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        error!("{} {} failed: {}", method, url, e);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    // Nothing listens on the discard port in test environments
    const UNREACHABLE: &str = "http://127.0.0.1:9";

    fn unreachable_client() -> CatalogClient {
        CatalogClient::with_timeout(UNREACHABLE, Duration::from_millis(500))
            .unwrap()
            .with_retry_config(RetryConfig::none())
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = CatalogClient::new("http://localhost:3000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.url(PRODUCTS_PATH), "http://localhost:3000/api/product");
    }

    #[test]
    fn test_favorite_url_encodes_id() {
        let client = CatalogClient::new("http://localhost:3000").unwrap();
        assert_eq!(
            client.favorite_url("a b/c"),
            "http://localhost:3000/api/favorite/a%20b%2Fc"
        );
    }

    #[test]
    fn test_retryable_errors() {
        let server_error = ApiError::RequestFailed {
            status: reqwest::StatusCode::BAD_GATEWAY,
            body: String::new(),
        };
        let client_error = ApiError::RequestFailed {
            status: reqwest::StatusCode::BAD_REQUEST,
            body: String::new(),
        };
        let parse_error = ApiError::from(serde_json::from_str::<u8>("nope").unwrap_err());

        assert!(server_error.is_retryable());
        assert!(ApiError::Timeout.is_retryable());
        assert!(!client_error.is_retryable());
        assert!(!parse_error.is_retryable());
    }

    #[tokio::test]
    async fn test_fetch_products_unreachable_fails() {
        let result = unreachable_client().fetch_products().await;

        let err = result.expect_err("no server is listening");
        assert!(matches!(err, ApiError::NetworkError(_) | ApiError::Timeout));
    }

    #[tokio::test]
    async fn test_add_favorite_unreachable_fails() {
        let favorite = FavoriteRecord {
            id: "1".to_string(),
            art_name: "Brush".to_string(),
            price: 2.5,
            description: String::new(),
            image: String::new(),
            brand: "Winsor".to_string(),
            limited_time_deal: 0.0,
        };

        let result = unreachable_client().add_favorite(&favorite).await;
        assert!(result.is_err());
    }
}
