//! File upload operations
//!
//! Files go up as multipart forms on the extended timeout; the backend
//! answers with the hosted URL. Inline base64 images are decoded by
//! [`parse_data_url`], which preserves the MIME type declared in the
//! data-URL header and fails on malformed input instead of defaulting.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::{multipart, Client};
use serde::Deserialize;
use serde_json::Value;

use crate::config::ClientOptions;
use crate::envelope::{extract_entity, Extracted};
use crate::error::Error;
use crate::fetch::{Fetch, FetchBuilder};
use crate::session::SessionStore;

/// A hosted file as the backend reports it
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    /// The hosted URL
    pub url: String,

    /// Stored file name
    pub name: Option<String>,

    /// Stored size in bytes
    pub size: Option<i64>,

    /// Stored MIME type
    pub mime_type: Option<String>,
}

/// A decoded `data:` URL: the declared MIME type plus the raw bytes
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedDataUrl {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Parse an inline base64 data-URL.
///
/// The MIME type is taken from the header verbatim. Anything malformed
/// (missing `data:` scheme, no payload separator, a non-base64 encoding
/// marker, an empty MIME type, an undecodable payload) fails with
/// [`Error::Upload`]; nothing is silently defaulted.
pub fn parse_data_url(data_url: &str) -> Result<DecodedDataUrl, Error> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or_else(|| Error::upload("data URL must start with \"data:\""))?;

    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| Error::upload("data URL has no payload separator"))?;

    let mime_type = header
        .strip_suffix(";base64")
        .ok_or_else(|| Error::upload("only base64 data URLs are supported"))?;

    if mime_type.is_empty() {
        return Err(Error::upload("data URL is missing a MIME type"));
    }

    let bytes = BASE64
        .decode(payload)
        .map_err(|e| Error::upload(format!("invalid base64 payload: {}", e)))?;

    Ok(DecodedDataUrl {
        mime_type: mime_type.to_string(),
        bytes,
    })
}

/// The backend sometimes answers with a bare URL string instead of a
/// file object
fn uploaded_from_value(value: Value) -> Result<UploadedFile, Error> {
    match value {
        Value::String(url) => Ok(UploadedFile {
            url,
            name: None,
            size: None,
            mime_type: None,
        }),
        other => Ok(serde_json::from_value(other)?),
    }
}

/// Client for file uploads
pub struct UploadClient {
    /// The backend origin
    base_url: String,

    /// HTTP client used for requests
    client: Client,

    /// Shared session store
    session: SessionStore,

    /// Client options
    options: ClientOptions,
}

impl UploadClient {
    /// Create a new UploadClient
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

    /// Get the URL for an upload path
    fn get_url(&self, path: &str) -> String {
        format!("{}/upload{}", self.base_url, path)
    }

    fn prepare<'a>(&'a self, builder: FetchBuilder<'a>) -> FetchBuilder<'a> {
        builder
            .header("X-Client-Info", &self.options.client_info)
            .session(&self.session)
            .timeout(self.options.upload_timeout)
    }

    /// Build the file part for a multipart form
    fn file_part(name: &str, bytes: Vec<u8>, mime_type: &str) -> Result<multipart::Part, Error> {
        multipart::Part::bytes(bytes)
            .file_name(name.to_string())
            .mime_str(mime_type)
            .map_err(|_| Error::upload(format!("unusable MIME type: {}", mime_type)))
    }

    /// Upload one file, optionally tagged with a folder name; returns
    /// the hosted URL
    pub async fn upload_file(
        &self,
        name: &str,
        bytes: Vec<u8>,
        mime_type: &str,
        folder: Option<&str>,
    ) -> Result<UploadedFile, Error> {
        let mut form = multipart::Form::new().part("file", Self::file_part(name, bytes, mime_type)?);
        if let Some(folder) = folder {
            form = form.text("folder", folder.to_string());
        }

        let envelope = self
            .prepare(Fetch::post(&self.client, &self.get_url("")))
            .multipart(form)
            .execute_envelope()
            .await?;

        match extract_entity(envelope.data.as_ref(), "file") {
            Extracted::Found(value) => uploaded_from_value(value),
            Extracted::Missing => Err(Error::shape("file not found in response")),
        }
    }

    /// Upload several files in one request
    pub async fn upload_files(
        &self,
        files: Vec<(String, Vec<u8>, String)>,
        folder: Option<&str>,
    ) -> Result<Vec<UploadedFile>, Error> {
        let mut form = multipart::Form::new();
        for (name, bytes, mime_type) in files {
            form = form.part("files", Self::file_part(&name, bytes, &mime_type)?);
        }
        if let Some(folder) = folder {
            form = form.text("folder", folder.to_string());
        }

        let envelope = self
            .prepare(Fetch::post(&self.client, &self.get_url("/multiple")))
            .multipart(form)
            .execute_envelope()
            .await?;

        match extract_entity(envelope.data.as_ref(), "files") {
            Extracted::Found(Value::Array(values)) => values
                .into_iter()
                .map(uploaded_from_value)
                .collect::<Result<Vec<_>, _>>(),
            Extracted::Found(_) | Extracted::Missing => {
                Err(Error::shape("files not found in response"))
            }
        }
    }

    /// Decode an inline base64 image and upload it under the given name.
    ///
    /// The uploaded file keeps the MIME type declared in the data-URL
    /// header; a malformed data-URL fails before any request is made.
    pub async fn upload_base64(
        &self,
        data_url: &str,
        name: &str,
        folder: Option<&str>,
    ) -> Result<UploadedFile, Error> {
        let decoded = parse_data_url(data_url)?;
        self.upload_file(name, decoded.bytes, &decoded.mime_type, folder)
            .await
    }
}
