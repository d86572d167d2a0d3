//! HTTP transport for the admin API
//!
//! One builder covers every request the resource clients make. The bearer
//! token is read from the shared [`SessionStore`] at send time, the JSON
//! content type is set only when a JSON body is attached (multipart
//! bodies must let reqwest supply the boundary), and a 401 clears the
//! stored session before the error is surfaced.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{multipart, Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use url::Url;

use crate::envelope::ApiEnvelope;
use crate::error::Error;
use crate::session::SessionStore;

/// Helper for building and executing HTTP requests
pub struct FetchBuilder<'a> {
    client: &'a Client,
    url: String,
    method: Method,
    headers: HeaderMap,
    query_params: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    form: Option<multipart::Form>,
    session: Option<SessionStore>,
    timeout: Option<Duration>,
}

impl<'a> FetchBuilder<'a> {
    /// Create a new FetchBuilder
    pub fn new(client: &'a Client, url: &str, method: Method) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Self {
            client,
            url: url.to_string(),
            method,
            headers,
            query_params: Vec::new(),
            body: None,
            form: None,
            session: None,
            timeout: None,
        }
    }

    /// Add a header to the request
    pub fn header(mut self, name: &str, value: &str) -> Self {
        if let Ok(value) = HeaderValue::from_str(value) {
            if let Ok(name) = reqwest::header::HeaderName::from_bytes(name.as_bytes()) {
                self.headers.insert(name, value);
            }
        }
        self
    }

    /// Attach the shared session store; a bearer token is added at send
    /// time iff one is present
    pub fn session(mut self, store: &SessionStore) -> Self {
        self.session = Some(store.clone());
        self
    }

    /// Append a query parameter
    pub fn query_pair(mut self, key: &str, value: &str) -> Self {
        self.query_params.push((key.to_string(), value.to_string()));
        self
    }

    /// Override the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Add a JSON body to the request.
    ///
    /// Sets `Content-Type: application/json`; mutually exclusive with
    /// [`FetchBuilder::multipart`].
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, Error> {
        let json = serde_json::to_vec(body)?;
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.body = Some(json);
        self.form = None;
        Ok(self)
    }

    /// Add a multipart body to the request.
    ///
    /// No explicit content type is set; reqwest supplies the
    /// `multipart/form-data` boundary.
    pub fn multipart(mut self, form: multipart::Form) -> Self {
        self.headers.remove(CONTENT_TYPE);
        self.form = Some(form);
        self.body = None;
        self
    }

    /// Build the request
    fn build(self) -> Result<(RequestBuilder, Option<SessionStore>), Error> {
        let mut url = Url::parse(&self.url)?;

        if !self.query_params.is_empty() {
            let mut query_pairs = url.query_pairs_mut();
            for (key, value) in &self.query_params {
                query_pairs.append_pair(key, value);
            }
        }

        let mut req = self.client.request(self.method, url.as_str());

        if let Some(store) = &self.session {
            if let Some(token) = store.token() {
                req = req.bearer_auth(token);
            }
        }

        req = req.headers(self.headers);

        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        if let Some(form) = self.form {
            req = req.multipart(form);
        } else if let Some(body) = self.body {
            req = req.body(body);
        }

        Ok((req, self.session))
    }

    /// Send the request and map non-2xx statuses into the error taxonomy.
    ///
    /// A 401 clears the stored session exactly once, then surfaces as
    /// [`Error::Auth`]; other non-2xx statuses carry the backend's
    /// envelope message in [`Error::Http`].
    async fn dispatch(self) -> Result<reqwest::Response, Error> {
        let url = self.url.clone();
        let method = self.method.clone();
        let (req, session) = self.build()?;

        tracing::debug!(%method, %url, "dispatching request");

        let response = req.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            if let Some(store) = &session {
                store.clear();
                tracing::warn!(%url, "unauthorized response, stored session cleared");
            }
            let message = response_message(response).await;
            return Err(Error::Auth(message));
        }

        if !status.is_success() {
            let message = response_message(response).await;
            tracing::debug!(%url, status = status.as_u16(), %message, "request failed");
            return Err(Error::Http {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    /// Execute the request and parse the response as JSON
    pub async fn execute<T: DeserializeOwned>(self) -> Result<T, Error> {
        let response = self.dispatch().await?;
        let bytes = response.bytes().await?;
        let result = serde_json::from_slice(&bytes)?;
        Ok(result)
    }

    /// Execute the request and parse the response as the standard
    /// `{status, message, data}` envelope
    pub async fn execute_envelope(self) -> Result<ApiEnvelope, Error> {
        self.execute::<ApiEnvelope>().await
    }

    /// Execute the request and return the raw response after status
    /// mapping
    pub async fn execute_raw(self) -> Result<reqwest::Response, Error> {
        self.dispatch().await
    }
}

/// Pull the backend's message out of a failed response, falling back to
/// the status line when the body is not an envelope
async fn response_message(response: reqwest::Response) -> String {
    let status = response.status();
    let fallback = || {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    };

    match response.json::<ApiEnvelope>().await {
        Ok(envelope) => envelope.message.unwrap_or_else(fallback),
        Err(_) => fallback(),
    }
}

/// Helper for creating HTTP requests
pub struct Fetch;

impl Fetch {
    /// Create a GET request
    pub fn get<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::GET)
    }

    /// Create a POST request
    pub fn post<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::POST)
    }

    /// Create a PUT request
    pub fn put<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::PUT)
    }

    /// Create a PATCH request
    pub fn patch<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::PATCH)
    }

    /// Create a DELETE request
    pub fn delete<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::DELETE)
    }
}
