//! Category operations

mod types;

use reqwest::Client;

use crate::config::ClientOptions;
use crate::envelope::{extract_page, reconcile, Page};
use crate::error::Error;
use crate::fetch::{Fetch, FetchBuilder};
use crate::session::SessionStore;

pub use types::*;

const RESOURCE: &str = "category";
const RESOURCE_PLURAL: &str = "categories";

/// Client for category operations
pub struct CategoriesClient {
    /// The backend origin
    base_url: String,

    /// HTTP client used for requests
    client: Client,

    /// Shared session store
    session: SessionStore,

    /// Client options
    options: ClientOptions,
}

impl CategoriesClient {
    /// Create a new CategoriesClient
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

    /// Get the URL for a category path
    fn get_url(&self, path: &str) -> String {
        format!("{}/categories{}", self.base_url, path)
    }

    fn prepare<'a>(&'a self, builder: FetchBuilder<'a>) -> FetchBuilder<'a> {
        builder
            .header("X-Client-Info", &self.options.client_info)
            .session(&self.session)
            .timeout(self.options.request_timeout)
    }

    /// List categories, one page at a time
    pub async fn list(&self, page: u32, limit: u32) -> Result<Page<Category>, Error> {
        let envelope = self
            .prepare(Fetch::get(&self.client, &self.get_url("")))
            .query_pair("page", &page.to_string())
            .query_pair("limit", &limit.to_string())
            .execute_envelope()
            .await?;

        extract_page::<RawCategory>(envelope, RESOURCE_PLURAL)?.map_items(RawCategory::normalize)
    }

    /// Fetch one category by id
    pub async fn get(&self, id: &str) -> Result<Category, Error> {
        let envelope = self
            .prepare(Fetch::get(&self.client, &self.get_url(&format!("/{}", id))))
            .execute_envelope()
            .await?;

        reconcile::<RawCategory>(envelope.data.as_ref(), RESOURCE)?.normalize()
    }

    /// Create a category
    pub async fn create(&self, payload: &NewCategory) -> Result<Category, Error> {
        let envelope = self
            .prepare(Fetch::post(&self.client, &self.get_url("")))
            .json(payload)?
            .execute_envelope()
            .await?;

        reconcile::<RawCategory>(envelope.data.as_ref(), RESOURCE)?.normalize()
    }

    /// Update a category
    pub async fn update(&self, id: &str, payload: &CategoryPatch) -> Result<Category, Error> {
        let envelope = self
            .prepare(Fetch::put(&self.client, &self.get_url(&format!("/{}", id))))
            .json(payload)?
            .execute_envelope()
            .await?;

        reconcile::<RawCategory>(envelope.data.as_ref(), RESOURCE)?.normalize()
    }

    /// Delete a category; backend errors pass through untouched
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
