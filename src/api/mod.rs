pub mod client;
pub mod error;
pub mod offcloud_client;
pub mod request;

pub use client::{ApiClient, ApiResult};
pub use error::ApiError;
pub use offcloud_client::OffcloudClient;
pub use request::{ApiRequest, RequestBody};
