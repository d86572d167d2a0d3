//! Response envelopes and shape reconciliation
//!
//! Every backend response arrives wrapped as `{status, message, data}`,
//! but the payload inside `data` is not shaped consistently: a single
//! entity may sit under its resource name (`data.product`) or directly in
//! `data`, and list pagination may sit beside the items or at the top of
//! the envelope. This module owns the one reconciliation rule the rest of
//! the crate relies on, so call sites never branch on shapes themselves.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

/// The `{status, message, data}` wrapper used by every backend response
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope {
    /// Outcome marker, usually `"success"` or `"error"`
    pub status: Option<String>,

    /// Human-readable message, set on errors and some writes
    pub message: Option<String>,

    /// The payload; absent on bare acknowledgements
    #[serde(default)]
    pub data: Option<Value>,

    /// Pagination block when the backend attaches it at the envelope level
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Pagination block accompanying every list response.
///
/// Fields are passed through verbatim from the server; nothing here is
/// recomputed client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Total number of matching records
    pub total: u64,

    /// Current page, 1-based
    pub page: u32,

    /// Total number of pages
    pub pages: u32,

    /// Page size the server applied
    pub limit: u32,
}

/// One page of a list endpoint
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// The records on this page
    pub items: Vec<T>,

    /// The server-provided pagination block, verbatim
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// Map the items while keeping the pagination block untouched
    pub fn map_items<U, E>(
        self,
        f: impl FnMut(T) -> Result<U, E>,
    ) -> Result<Page<U>, E> {
        let items = self.items.into_iter().map(f).collect::<Result<_, _>>()?;
        Ok(Page {
            items,
            pagination: self.pagination,
        })
    }
}

/// Result of applying the entity extraction strategies to a payload
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted {
    /// An entity value was located
    Found(Value),

    /// No strategy produced a non-null value
    Missing,
}

/// Extraction strategy: the entity sits under its resource name,
/// `data.product`
fn nested_by_name(data: &Value, resource: &str) -> Option<Value> {
    match data.get(resource) {
        Some(Value::Null) | None => None,
        Some(nested) => Some(nested.clone()),
    }
}

/// Extraction strategy: `data` itself is the entity.
///
/// An empty object is not an entity, and an object that carries the
/// resource key was meant to be the nested form (its inner value was null
/// or unusable), so neither qualifies.
fn flat(data: &Value, resource: &str) -> Option<Value> {
    match data {
        Value::Null => None,
        Value::Object(map) if map.is_empty() => None,
        Value::Object(map) if map.contains_key(resource) => None,
        other => Some(other.clone()),
    }
}

/// Extract a single entity from an inconsistently shaped `data` payload.
///
/// Strategies are tried in order: the nested-by-resource-name form first,
/// then the flat form. If neither yields a non-null value the result is
/// [`Extracted::Missing`].
pub fn extract_entity(data: Option<&Value>, resource: &str) -> Extracted {
    let Some(data) = data else {
        return Extracted::Missing;
    };

    let strategies: [fn(&Value, &str) -> Option<Value>; 2] = [nested_by_name, flat];
    for strategy in strategies {
        if let Some(value) = strategy(data, resource) {
            return Extracted::Found(value);
        }
    }

    Extracted::Missing
}

/// Reconcile and decode a single entity, failing with a shape error when
/// no strategy finds one
pub fn reconcile<T: DeserializeOwned>(
    data: Option<&Value>,
    resource: &str,
) -> Result<T, Error> {
    match extract_entity(data, resource) {
        Extracted::Found(value) => Ok(serde_json::from_value(value)?),
        Extracted::Missing => Err(Error::shape(format!(
            "{} not found in response",
            resource
        ))),
    }
}

/// Decode a list response into a [`Page`].
///
/// Items are accepted at `data.<plural>` or as a bare array in `data`;
/// the pagination block is accepted inside `data` (preferred) or at the
/// envelope level, and is returned exactly as the server sent it.
pub fn extract_page<T: DeserializeOwned>(
    envelope: ApiEnvelope,
    resource_plural: &str,
) -> Result<Page<T>, Error> {
    let ApiEnvelope {
        data, pagination, ..
    } = envelope;

    let data = data.ok_or_else(|| {
        Error::shape(format!("{} list missing from response", resource_plural))
    })?;

    let items_value = match data.get(resource_plural) {
        Some(value) if value.is_array() => value.clone(),
        _ if data.is_array() => data.clone(),
        _ => {
            return Err(Error::shape(format!(
                "{} list missing from response",
                resource_plural
            )))
        }
    };

    let pagination = match data.get("pagination") {
        Some(value) => serde_json::from_value(value.clone())?,
        None => pagination.ok_or_else(|| {
            Error::shape(format!(
                "pagination missing from {} response",
                resource_plural
            ))
        })?,
    };

    let items = serde_json::from_value(items_value)?;

    Ok(Page { items, pagination })
}
