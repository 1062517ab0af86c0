use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// 401 from the service.
    #[error("HTTP {status_code}: {message}")]
    Auth { status_code: u16, message: String },

    /// 404 from the service.
    #[error("HTTP {status_code}: {message}")]
    NotFound { status_code: u16, message: String },

    /// 429 from the service.
    #[error("HTTP {status_code}: {message}")]
    RateLimit { status_code: u16, message: String },

    /// Any other 4xx/5xx.
    #[error("HTTP {status_code}: {message}")]
    Http { status_code: u16, message: String },

    /// The service answered with a success status but the body is not JSON.
    #[error("Invalid JSON in HTTP {status_code} response: {source}")]
    Decode {
        status_code: u16,
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Classify a non-success response. Success statuses return `None`.
    pub fn from_status(status: StatusCode, body: &str) -> Option<Self> {
        if !(status.is_client_error() || status.is_server_error()) {
            return None;
        }

        let status_code = status.as_u16();
        let message = body.to_string();
        Some(match status {
            StatusCode::UNAUTHORIZED => Self::Auth { status_code, message },
            StatusCode::NOT_FOUND => Self::NotFound { status_code, message },
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimit { status_code, message },
            _ => Self::Http { status_code, message },
        })
    }

    /// Status code carried by the error, if the service answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Auth { status_code, .. }
            | Self::NotFound { status_code, .. }
            | Self::RateLimit { status_code, .. }
            | Self::Http { status_code, .. }
            | Self::Decode { status_code, .. } => Some(*status_code),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            Self::InvalidUrl(_) => None,
        }
    }

    /// Raw response text for status failures.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Auth { message, .. }
            | Self::NotFound { message, .. }
            | Self::RateLimit { message, .. }
            | Self::Http { message, .. } => Some(message),
            Self::Decode { body, .. } => Some(body),
            Self::Network(_) | Self::InvalidUrl(_) => None,
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimit { .. })
    }
}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.to_string()
    }
}
