use reqwest::{Client, Response, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use super::error::ApiError;
use super::request::{ApiRequest, RequestBody};

pub type ApiResult<T> = Result<T, ApiError>;

/// Production endpoint of the service.
pub const DEFAULT_BASE_URL: &str = "https://offcloud.com/api";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection context shared by every call: base URL, optional API key and
/// a pooled HTTP client.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl ApiClient {
    pub fn new(api_key: Option<String>) -> ApiResult<Self> {
        Self::with_options(
            DEFAULT_BASE_URL,
            api_key,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    pub fn with_options(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> ApiResult<Self> {
        let parsed =
            Url::parse(base_url).map_err(|_| ApiError::InvalidUrl(base_url.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Self {
            client,
            base_url: parsed,
            // An empty key authenticates nothing; treat it as absent.
            api_key: api_key.filter(|k| !k.is_empty()),
        })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Absolute URL for a request. Each segment is percent-encoded on its own.
    pub fn url_for(&self, request: &ApiRequest) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(&request.segments);
        Ok(url)
    }

    /// Send a request and return the parsed JSON body, or the error the
    /// response status maps to.
    pub async fn execute(&self, request: ApiRequest) -> ApiResult<Value> {
        let url = self.url_for(&request)?;
        debug!(method = %request.method, path = %request.path(), "Offcloud request");

        let mut builder = self.client.request(request.method, url);
        if let Some(key) = &self.api_key {
            builder = builder.query(&[("key", key)]);
        }
        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Form(fields) => builder.form(fields),
            RequestBody::Json(value) => builder.json(value),
        };

        let response = builder.send().await?;
        Self::handle_response(response).await
    }

    async fn handle_response(response: Response) -> ApiResult<Value> {
        let status = response.status();
        let text = response.text().await?;

        if let Some(error) = ApiError::from_status(status, &text) {
            debug!(status = status.as_u16(), "Offcloud request failed");
            return Err(error);
        }

        serde_json::from_str(&text).map_err(|e| {
            warn!(status = status.as_u16(), error = %e, "Failed to parse Offcloud response");
            ApiError::Decode {
                status_code: status.as_u16(),
                body: text,
                source: e,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_at(base: &str) -> ApiClient {
        ApiClient::with_options(base, Some("abc".to_string()), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_default_base_url() {
        let client = ApiClient::new(None).unwrap();
        assert_eq!(client.base_url().as_str(), DEFAULT_BASE_URL);
        assert_eq!(client.api_key(), None);
    }

    #[test]
    fn test_empty_key_is_treated_as_absent() {
        let client = ApiClient::new(Some(String::new())).unwrap();
        assert_eq!(client.api_key(), None);

        let client = ApiClient::new(Some("abc".to_string())).unwrap();
        assert_eq!(client.api_key(), Some("abc"));
    }

    #[test]
    fn test_url_for_appends_segments() {
        let client = client_at("https://offcloud.com/api");
        let url = client.url_for(&ApiRequest::post(&["cloud", "status"])).unwrap();
        assert_eq!(url.as_str(), "https://offcloud.com/api/cloud/status");
    }

    #[test]
    fn test_url_for_tolerates_trailing_slash_and_bare_host() {
        let client = client_at("https://offcloud.com/api/");
        let url = client.url_for(&ApiRequest::get(&["check"])).unwrap();
        assert_eq!(url.as_str(), "https://offcloud.com/api/check");

        let client = client_at("http://127.0.0.1:8080");
        let url = client.url_for(&ApiRequest::get(&["check"])).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/check");
    }

    #[test]
    fn test_url_for_encodes_request_id_as_one_segment() {
        let client = client_at("https://offcloud.com/api");
        let url = client
            .url_for(&ApiRequest::get(&["cloud", "list", "a/b c"]))
            .unwrap();
        assert_eq!(url.as_str(), "https://offcloud.com/api/cloud/list/a%2Fb%20c");
    }

    #[test]
    fn test_rejects_unusable_base_url() {
        let timeout = Duration::from_secs(5);
        assert!(matches!(
            ApiClient::with_options("not a url", None, timeout),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(matches!(
            ApiClient::with_options("mailto:someone@example.com", None, timeout),
            Err(ApiError::InvalidUrl(_))
        ));
    }
}
