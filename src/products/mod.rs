//! Product catalog operations

mod types;

use reqwest::{multipart, Client};

use crate::config::ClientOptions;
use crate::envelope::{extract_page, reconcile, Page};
use crate::error::Error;
use crate::fetch::{Fetch, FetchBuilder};
use crate::session::SessionStore;

pub use types::*;

const RESOURCE: &str = "product";
const RESOURCE_PLURAL: &str = "products";

/// Client for product operations
pub struct ProductsClient {
    /// The backend origin
    base_url: String,

    /// HTTP client used for requests
    client: Client,

    /// Shared session store
    session: SessionStore,

    /// Client options
    options: ClientOptions,
}

impl ProductsClient {
    /// Create a new ProductsClient
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

    /// Get the URL for a product path
    fn get_url(&self, path: &str) -> String {
        format!("{}/products{}", self.base_url, path)
    }

    /// Apply the headers, session and default timeout every product
    /// request carries
    fn prepare<'a>(&'a self, builder: FetchBuilder<'a>) -> FetchBuilder<'a> {
        builder
            .header("X-Client-Info", &self.options.client_info)
            .session(&self.session)
            .timeout(self.options.request_timeout)
    }

    /// List products, one page at a time.
    ///
    /// The pagination block is returned exactly as the server sent it.
    pub async fn list(&self, page: u32, limit: u32) -> Result<Page<Product>, Error> {
        let envelope = self
            .prepare(Fetch::get(&self.client, &self.get_url("")))
            .query_pair("page", &page.to_string())
            .query_pair("limit", &limit.to_string())
            .execute_envelope()
            .await?;

        extract_page::<RawProduct>(envelope, RESOURCE_PLURAL)?.map_items(RawProduct::normalize)
    }

    /// Fetch one product by slug.
    ///
    /// The slug is the canonical address; the backend also accepts a raw
    /// id in the same position for older records, and the identifier is
    /// forwarded unmodified either way.
    pub async fn get(&self, slug: &str) -> Result<Product, Error> {
        let envelope = self
            .prepare(Fetch::get(&self.client, &self.get_url(&format!("/{}", slug))))
            .execute_envelope()
            .await?;

        reconcile::<RawProduct>(envelope.data.as_ref(), RESOURCE)?.normalize()
    }

    /// List products with an active sale
    pub async fn on_sale(
        &self,
        page: u32,
        limit: u32,
        filter: &ProductFilter,
    ) -> Result<Page<Product>, Error> {
        self.list_variant("/on-sale", page, limit, filter).await
    }

    /// List the best-selling products
    pub async fn top_sales(
        &self,
        page: u32,
        limit: u32,
        filter: &ProductFilter,
    ) -> Result<Page<Product>, Error> {
        self.list_variant("/top-sales", page, limit, filter).await
    }

    /// Shared implementation of the derived list endpoints; same
    /// reconciliation and pagination contract as [`ProductsClient::list`]
    async fn list_variant(
        &self,
        path: &str,
        page: u32,
        limit: u32,
        filter: &ProductFilter,
    ) -> Result<Page<Product>, Error> {
        let mut builder = self
            .prepare(Fetch::get(&self.client, &self.get_url(path)))
            .query_pair("page", &page.to_string())
            .query_pair("limit", &limit.to_string());

        if let Some(category) = &filter.category {
            builder = builder.query_pair("category", category);
        }
        if let Some(seller) = &filter.seller {
            builder = builder.query_pair("seller", seller);
        }

        let envelope = builder.execute_envelope().await?;
        extract_page::<RawProduct>(envelope, RESOURCE_PLURAL)?.map_items(RawProduct::normalize)
    }

    /// Create a product from a JSON payload
    pub async fn create(&self, payload: &NewProduct) -> Result<Product, Error> {
        let envelope = self
            .prepare(Fetch::post(&self.client, &self.get_url("")))
            .json(payload)?
            .execute_envelope()
            .await?;

        reconcile::<RawProduct>(envelope.data.as_ref(), RESOURCE)?.normalize()
    }

    /// Create a product from a prebuilt multipart form (image uploads).
    ///
    /// Uses the extended upload timeout and leaves the content type to
    /// the transport.
    pub async fn create_multipart(&self, form: multipart::Form) -> Result<Product, Error> {
        let envelope = self
            .prepare(Fetch::post(&self.client, &self.get_url("")))
            .timeout(self.options.upload_timeout)
            .multipart(form)
            .execute_envelope()
            .await?;

        reconcile::<RawProduct>(envelope.data.as_ref(), RESOURCE)?.normalize()
    }

    /// Update a product from a JSON patch
    pub async fn update(&self, id: &str, payload: &ProductPatch) -> Result<Product, Error> {
        let envelope = self
            .prepare(Fetch::put(&self.client, &self.get_url(&format!("/{}", id))))
            .json(payload)?
            .execute_envelope()
            .await?;

        reconcile::<RawProduct>(envelope.data.as_ref(), RESOURCE)?.normalize()
    }

    /// Update a product from a prebuilt multipart form
    pub async fn update_multipart(
        &self,
        id: &str,
        form: multipart::Form,
    ) -> Result<Product, Error> {
        let envelope = self
            .prepare(Fetch::put(&self.client, &self.get_url(&format!("/{}", id))))
            .timeout(self.options.upload_timeout)
            .multipart(form)
            .execute_envelope()
            .await?;

        reconcile::<RawProduct>(envelope.data.as_ref(), RESOURCE)?.normalize()
    }

    /// Delete a product.
    ///
    /// Deleting an already-deleted id surfaces whatever error the backend
    /// returns; nothing is suppressed here.
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
