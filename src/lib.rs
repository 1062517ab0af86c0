//! Client for the Offcloud cloud-download API.
//!
//! Every endpoint is a method on [`OffcloudClient`] returning the decoded JSON
//! body, or an [`ApiError`] classified from the response status.
//!
//! ```no_run
//! # async fn demo() -> Result<(), offcloud::ApiError> {
//! let client = offcloud::OffcloudClient::new(Some("my-api-key".to_string()))?;
//! let submitted = client.cloud("http://example.com/file.zip").await?;
//! println!("{submitted}");
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;

pub use api::{ApiClient, ApiError, ApiRequest, ApiResult, OffcloudClient, RequestBody};
pub use config::OffcloudConfig;
