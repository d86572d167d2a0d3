//! Dashboard metrics, read-only
//!
//! Every endpoint goes through the same envelope reconciliation as the
//! CRUD resources; the series endpoints return their points nested under
//! the series name or as a bare array.

mod types;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::ClientOptions;
use crate::envelope::{extract_page, reconcile, Page};
use crate::error::Error;
use crate::fetch::{Fetch, FetchBuilder};
use crate::session::SessionStore;

pub use types::*;

/// Client for dashboard metrics
pub struct DashboardClient {
    /// The backend origin
    base_url: String,

    /// HTTP client used for requests
    client: Client,

    /// Shared session store
    session: SessionStore,

    /// Client options
    options: ClientOptions,
}

impl DashboardClient {
    /// Create a new DashboardClient
    pub(crate) fn new(
        base_url: &str,
        client: Client,
        session: SessionStore,
        options: ClientOptions,
    ) -> Self {
        Self {
            base_url: base_url.to_string(),
            client,
            session,
            options,
        }
    }

    /// Get the URL for a dashboard path
    fn get_url(&self, path: &str) -> String {
        format!("{}/dashboard{}", self.base_url, path)
    }

    fn prepare<'a>(&'a self, builder: FetchBuilder<'a>) -> FetchBuilder<'a> {
        builder
            .header("X-Client-Info", &self.options.client_info)
            .session(&self.session)
            .timeout(self.options.request_timeout)
    }

    /// Fetch a series endpoint, reconciled under its series name
    async fn series<T: DeserializeOwned>(
        &self,
        path: &str,
        resource: &str,
        range: Option<StatsRange>,
    ) -> Result<Vec<T>, Error> {
        let mut builder = self.prepare(Fetch::get(&self.client, &self.get_url(path)));
        if let Some(range) = range {
            builder = builder.query_pair("range", range.as_str());
        }

        let envelope = builder.execute_envelope().await?;
        reconcile(envelope.data.as_ref(), resource)
    }

    /// Headline figures for the dashboard cards
    pub async fn stats(&self) -> Result<DashboardStats, Error> {
        let envelope = self
            .prepare(Fetch::get(&self.client, &self.get_url("/stats")))
            .execute_envelope()
            .await?;

        reconcile(envelope.data.as_ref(), "stats")
    }

    /// Revenue chart series
    pub async fn revenue(&self, range: Option<StatsRange>) -> Result<Vec<RevenuePoint>, Error> {
        self.series("/revenue", "revenue", range).await
    }

    /// Customers chart series
    pub async fn customers(&self, range: Option<StatsRange>) -> Result<Vec<CustomerPoint>, Error> {
        self.series("/customers", "customers", range).await
    }

    /// Visitors chart series
    pub async fn visitors(&self, range: Option<StatsRange>) -> Result<Vec<VisitorPoint>, Error> {
        self.series("/visitors", "visitors", range).await
    }

    /// Recent transactions, paginated
    pub async fn transactions(&self, page: u32, limit: u32) -> Result<Page<Transaction>, Error> {
        let envelope = self
            .prepare(Fetch::get(&self.client, &self.get_url("/transactions")))
            .query_pair("page", &page.to_string())
            .query_pair("limit", &limit.to_string())
            .execute_envelope()
            .await?;

        extract_page(envelope, "transactions")
    }

    /// Recent orders, paginated
    pub async fn orders(&self, page: u32, limit: u32) -> Result<Page<OrderSummary>, Error> {
        let envelope = self
            .prepare(Fetch::get(&self.client, &self.get_url("/orders")))
            .query_pair("page", &page.to_string())
            .query_pair("limit", &limit.to_string())
            .execute_envelope()
            .await?;

        extract_page(envelope, "orders")
    }

    /// Best-selling products for the period
    pub async fn top_products(&self, limit: u32) -> Result<Vec<TopProduct>, Error> {
        let envelope = self
            .prepare(Fetch::get(&self.client, &self.get_url("/top-products")))
            .query_pair("limit", &limit.to_string())
            .execute_envelope()
            .await?;

        reconcile(envelope.data.as_ref(), "products")
    }

    /// Highest-spending customers for the period
    pub async fn top_customers(&self, limit: u32) -> Result<Vec<TopCustomer>, Error> {
        let envelope = self
            .prepare(Fetch::get(&self.client, &self.get_url("/top-customers")))
            .query_pair("limit", &limit.to_string())
            .execute_envelope()
            .await?;

        reconcile(envelope.data.as_ref(), "customers")
    }
}
