//! Commerce Admin Rust Client Library
//!
//! A Rust client library for the e-commerce admin backend, providing
//! typed access to products, categories, deals, dashboard metrics and
//! file uploads, with one reconciliation rule for the backend's
//! inconsistently shaped response envelopes.

pub mod categories;
pub mod config;
pub mod dashboard;
pub mod deals;
pub mod envelope;
pub mod error;
pub mod fetch;
pub mod products;
pub mod query;
pub mod session;
pub mod upload;

use reqwest::Client;

use crate::categories::CategoriesClient;
use crate::config::ClientOptions;
use crate::dashboard::DashboardClient;
use crate::deals::DealsClient;
use crate::products::ProductsClient;
use crate::session::SessionStore;
use crate::upload::UploadClient;

/// The main entry point for the admin API client
pub struct AdminClient {
    /// The backend origin all resource paths hang off
    pub base_url: String,
    /// HTTP client used for requests
    pub http_client: Client,
    /// Session store shared by every resource client
    pub session: SessionStore,
    /// Client options
    pub options: ClientOptions,
}

impl AdminClient {
    /// Create a new admin API client
    ///
    /// # Arguments
    ///
    /// * `base_url` - The backend origin, e.g. `https://api.example.com/api/v1`
    ///
    /// # Example
    ///
    /// ```
    /// use commerce_admin_rust::AdminClient;
    ///
    /// let client = AdminClient::new("https://api.example.com/api/v1");
    /// ```
    pub fn new(base_url: &str) -> Self {
        Self::new_with_options(base_url, ClientOptions::default())
    }

    /// Create a new admin API client with custom options
    ///
    /// # Example
    ///
    /// ```
    /// use commerce_admin_rust::{AdminClient, config::ClientOptions};
    /// use std::time::Duration;
    ///
    /// let options = ClientOptions::default()
    ///     .with_request_timeout(Duration::from_secs(10));
    /// let client = AdminClient::new_with_options("https://api.example.com/api/v1", options);
    /// ```
    pub fn new_with_options(base_url: &str, options: ClientOptions) -> Self {
        let http_client = Client::new();

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
            session: SessionStore::new(),
            options,
        }
    }

    /// Create a client from the environment.
    ///
    /// Reads the origin from `COMMERCE_ADMIN_API_URL` and falls back to
    /// the deployed backend origin when unset.
    pub fn from_env() -> Self {
        let base_url = std::env::var(config::BASE_URL_ENV)
            .unwrap_or_else(|_| config::DEFAULT_BASE_URL.to_string());
        Self::new(&base_url)
    }

    /// Get a reference to the shared session store
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Get a client for product operations
    ///
    /// # Example
    ///
    /// ```
    /// use commerce_admin_rust::AdminClient;
    ///
    /// let client = AdminClient::new("https://api.example.com/api/v1");
    /// let products = client.products();
    /// ```
    pub fn products(&self) -> ProductsClient {
        ProductsClient::new(
            &self.base_url,
            self.http_client.clone(),
            self.session.clone(),
            self.options.clone(),
        )
    }

    /// Get a client for category operations
    pub fn categories(&self) -> CategoriesClient {
        CategoriesClient::new(
            &self.base_url,
            self.http_client.clone(),
            self.session.clone(),
            self.options.clone(),
        )
    }

    /// Get a client for deal operations
    pub fn deals(&self) -> DealsClient {
        DealsClient::new(
            &self.base_url,
            self.http_client.clone(),
            self.session.clone(),
            self.options.clone(),
        )
    }

    /// Get a client for dashboard metrics
    pub fn dashboard(&self) -> DashboardClient {
        DashboardClient::new(
            &self.base_url,
            self.http_client.clone(),
            self.session.clone(),
            self.options.clone(),
        )
    }

    /// Get a client for file uploads
    pub fn upload(&self) -> UploadClient {
        UploadClient::new(
            &self.base_url,
            self.http_client.clone(),
            self.session.clone(),
            self.options.clone(),
        )
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::config::ClientOptions;
    pub use crate::envelope::{Page, Pagination};
    pub use crate::error::Error;
    pub use crate::session::{Session, SessionStore};
    pub use crate::AdminClient;
}
