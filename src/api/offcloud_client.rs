use serde_json::{json, Value};
use std::time::Duration;

use crate::config::OffcloudConfig;

use super::client::{ApiClient, ApiResult};
use super::request::ApiRequest;

/// Typed entry points for every Offcloud endpoint. Each call is independent;
/// the client only carries the API key and the pooled connection.
#[derive(Clone)]
pub struct OffcloudClient {
    client: ApiClient,
}

impl OffcloudClient {
    pub fn new(api_key: Option<String>) -> ApiResult<Self> {
        Ok(Self {
            client: ApiClient::new(api_key)?,
        })
    }

    pub fn from_config(config: &OffcloudConfig) -> ApiResult<Self> {
        Ok(Self {
            client: ApiClient::with_options(
                &config.base_url,
                config.api_key.clone(),
                Duration::from_secs(config.timeout_secs),
            )?,
        })
    }

    pub fn api(&self) -> &ApiClient {
        &self.client
    }

    // Authentication

    /// Log in with account credentials
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<Value> {
        self.client.execute(Self::login_request(username, password)).await
    }

    /// Fetch the API key of the logged-in account
    pub async fn get_api_key(&self) -> ApiResult<Value> {
        self.client.execute(ApiRequest::post(&["key"])).await
    }

    /// Check whether the current credentials are accepted
    pub async fn check_login(&self) -> ApiResult<Value> {
        self.client.execute(ApiRequest::get(&["check"])).await
    }

    // Download submissions

    /// Submit an instant download, optionally through a specific proxy
    pub async fn instant(&self, url: &str, proxy_id: Option<&str>) -> ApiResult<Value> {
        self.client.execute(Self::instant_request(url, proxy_id)).await
    }

    /// Submit a cloud download
    pub async fn cloud(&self, url: &str) -> ApiResult<Value> {
        self.client.execute(Self::cloud_request(url)).await
    }

    /// Submit a remote download to a configured remote account
    pub async fn remote(
        &self,
        url: &str,
        remote_option_id: Option<&str>,
        folder_id: Option<&str>,
    ) -> ApiResult<Value> {
        self.client
            .execute(Self::remote_request(url, remote_option_id, folder_id))
            .await
    }

    /// List proxies usable for instant downloads
    pub async fn get_proxies(&self) -> ApiResult<Value> {
        self.client.execute(ApiRequest::post(&["proxy"])).await
    }

    pub async fn cloud_status(&self, request_id: &str) -> ApiResult<Value> {
        self.client
            .execute(Self::status_request("cloud", request_id))
            .await
    }

    pub async fn remote_status(&self, request_id: &str) -> ApiResult<Value> {
        self.client
            .execute(Self::status_request("remote", request_id))
            .await
    }

    /// Look up content hashes in the service cache
    pub async fn cache_info<S: AsRef<str>>(&self, hashes: &[S]) -> ApiResult<Value> {
        self.client.execute(Self::cache_request(hashes)).await
    }

    /// Browse the files of a finished cloud download
    pub async fn explore_cloud(&self, request_id: &str) -> ApiResult<Value> {
        self.client
            .execute(ApiRequest::get(&["cloud", "explore", request_id]))
            .await
    }

    /// Direct links for the files of a cloud download
    pub async fn list_cloud(&self, request_id: &str) -> ApiResult<Value> {
        self.client
            .execute(ApiRequest::get(&["cloud", "list", request_id]))
            .await
    }

    pub async fn retry_cloud(&self, request_id: &str) -> ApiResult<Value> {
        self.client
            .execute(ApiRequest::get(&["cloud", "retry", request_id]))
            .await
    }

    pub async fn retry_remote(&self, request_id: &str) -> ApiResult<Value> {
        self.client
            .execute(ApiRequest::get(&["remote", "retry", request_id]))
            .await
    }

    fn login_request(username: &str, password: &str) -> ApiRequest {
        ApiRequest::post(&["login"])
            .field("username", username)
            .field("password", password)
    }

    fn instant_request(url: &str, proxy_id: Option<&str>) -> ApiRequest {
        ApiRequest::post(&["instant"])
            .field("url", url)
            .optional_field("proxyId", proxy_id)
    }

    fn cloud_request(url: &str) -> ApiRequest {
        ApiRequest::post(&["cloud"]).field("url", url)
    }

    fn remote_request(
        url: &str,
        remote_option_id: Option<&str>,
        folder_id: Option<&str>,
    ) -> ApiRequest {
        ApiRequest::post(&["remote"])
            .field("url", url)
            .optional_field("remoteOptionId", remote_option_id)
            .optional_field("folderId", folder_id)
    }

    fn status_request(mode: &str, request_id: &str) -> ApiRequest {
        ApiRequest::post(&[mode, "status"]).field("requestId", request_id)
    }

    fn cache_request<S: AsRef<str>>(hashes: &[S]) -> ApiRequest {
        let hashes: Vec<&str> = hashes.iter().map(|h| h.as_ref()).collect();
        ApiRequest::post(&["cache"]).json(json!({ "hashes": hashes }))
    }
}
