//! Configuration options for the admin API client

use std::time::Duration;

/// Environment variable that overrides the backend origin
pub const BASE_URL_ENV: &str = "COMMERCE_ADMIN_API_URL";

/// Fallback origin used when no environment override is set
pub const DEFAULT_BASE_URL: &str = "https://storelane-backend.onrender.com/api/v1";

/// Configuration options for the admin API client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Timeout applied to ordinary requests
    pub request_timeout: Duration,

    /// Timeout applied to multipart create/update and upload requests
    pub upload_timeout: Duration,

    /// Value sent as the `X-Client-Info` header on every request
    pub client_info: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            upload_timeout: Duration::from_secs(120),
            client_info: format!("commerce-admin-rust/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientOptions {
    /// Set the timeout for ordinary requests
    pub fn with_request_timeout(mut self, value: Duration) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the timeout for multipart and upload requests
    pub fn with_upload_timeout(mut self, value: Duration) -> Self {
        self.upload_timeout = value;
        self
    }

    /// Set the `X-Client-Info` header value
    pub fn with_client_info(mut self, value: &str) -> Self {
        self.client_info = value.to_string();
        self
    }
}
