//! Deal operations
//!
//! Create and update accept either a JSON payload or a prebuilt
//! multipart form (deal banners upload inline), and multipart calls run
//! on the extended upload timeout.

mod types;

use reqwest::{multipart, Client};

use crate::config::ClientOptions;
use crate::envelope::{extract_page, reconcile, Page};
use crate::error::Error;
use crate::fetch::{Fetch, FetchBuilder};
use crate::session::SessionStore;

pub use types::*;

const RESOURCE: &str = "deal";
const RESOURCE_PLURAL: &str = "deals";

/// Client for deal operations
pub struct DealsClient {
    /// The backend origin
    base_url: String,

    /// HTTP client used for requests
    client: Client,

    /// Shared session store
    session: SessionStore,

    /// Client options
    options: ClientOptions,
}

impl DealsClient {
    /// Create a new DealsClient
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

    /// Get the URL for a deal path
    fn get_url(&self, path: &str) -> String {
        format!("{}/deals{}", self.base_url, path)
    }

    fn prepare<'a>(&'a self, builder: FetchBuilder<'a>) -> FetchBuilder<'a> {
        builder
            .header("X-Client-Info", &self.options.client_info)
            .session(&self.session)
            .timeout(self.options.request_timeout)
    }

    /// List deals, one page at a time
    pub async fn list(&self, page: u32, limit: u32) -> Result<Page<Deal>, Error> {
        let envelope = self
            .prepare(Fetch::get(&self.client, &self.get_url("")))
            .query_pair("page", &page.to_string())
            .query_pair("limit", &limit.to_string())
            .execute_envelope()
            .await?;

        extract_page::<RawDeal>(envelope, RESOURCE_PLURAL)?.map_items(RawDeal::normalize)
    }

    /// Fetch one deal by id
    pub async fn get(&self, id: &str) -> Result<Deal, Error> {
        let envelope = self
            .prepare(Fetch::get(&self.client, &self.get_url(&format!("/{}", id))))
            .execute_envelope()
            .await?;

        reconcile::<RawDeal>(envelope.data.as_ref(), RESOURCE)?.normalize()
    }

    /// Create a deal from a JSON payload
    pub async fn create(&self, payload: &DealPayload) -> Result<Deal, Error> {
        let envelope = self
            .prepare(Fetch::post(&self.client, &self.get_url("")))
            .json(payload)?
            .execute_envelope()
            .await?;

        reconcile::<RawDeal>(envelope.data.as_ref(), RESOURCE)?.normalize()
    }

    /// Create a deal from a prebuilt multipart form (banner images
    /// inline); runs on the extended upload timeout
    pub async fn create_multipart(&self, form: multipart::Form) -> Result<Deal, Error> {
        let envelope = self
            .prepare(Fetch::post(&self.client, &self.get_url("")))
            .timeout(self.options.upload_timeout)
            .multipart(form)
            .execute_envelope()
            .await?;

        reconcile::<RawDeal>(envelope.data.as_ref(), RESOURCE)?.normalize()
    }

    /// Update a deal from a JSON payload
    pub async fn update(&self, id: &str, payload: &DealPayload) -> Result<Deal, Error> {
        let envelope = self
            .prepare(Fetch::put(&self.client, &self.get_url(&format!("/{}", id))))
            .json(payload)?
            .execute_envelope()
            .await?;

        reconcile::<RawDeal>(envelope.data.as_ref(), RESOURCE)?.normalize()
    }

    /// Update a deal from a prebuilt multipart form; runs on the
    /// extended upload timeout
    pub async fn update_multipart(&self, id: &str, form: multipart::Form) -> Result<Deal, Error> {
        let envelope = self
            .prepare(Fetch::put(&self.client, &self.get_url(&format!("/{}", id))))
            .timeout(self.options.upload_timeout)
            .multipart(form)
            .execute_envelope()
            .await?;

        reconcile::<RawDeal>(envelope.data.as_ref(), RESOURCE)?.normalize()
    }

    /// Delete a deal; backend errors pass through untouched
    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        self.prepare(Fetch::delete(
            &self.client,
            &self.get_url(&format!("/{}", id)),
        ))
        .execute_raw()
        .await?;

        Ok(())
    }
}
