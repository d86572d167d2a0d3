//! Cache keys, retry budget and mutation lifecycle contracts
//!
//! The UI layer wraps every resource operation in a hook; this module is
//! the client-side half of that contract. Reads go through an in-memory
//! cache keyed by resource and parameters and may retry once on a
//! transport failure. Mutations run a three-phase lifecycle and, on
//! success, invalidate the affected resource's cached pages. A failed or
//! abandoned operation never writes to the cache.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use crate::error::Error;

/// Cache key derived from a resource name plus canonicalized parameters
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    resource: String,
    params: String,
}

impl QueryKey {
    /// Build a key; parameter order does not matter
    pub fn new(resource: &str, params: &[(&str, &str)]) -> Self {
        let mut parts: Vec<String> = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        parts.sort();

        Self {
            resource: resource.to_string(),
            params: parts.join("&"),
        }
    }

    /// The resource this key belongs to
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Whether the key belongs to the given resource
    pub fn matches_resource(&self, resource: &str) -> bool {
        self.resource == resource
    }
}

/// In-memory response cache keyed by (resource, parameters)
#[derive(Clone, Default)]
pub struct QueryCache {
    entries: Arc<Mutex<HashMap<QueryKey, Value>>>,
}

impl QueryCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cached value
    pub fn get(&self, key: &QueryKey) -> Option<Value> {
        let entries = self.entries.lock().unwrap();
        entries.get(key).cloned()
    }

    /// Store a value
    pub fn put(&self, key: QueryKey, value: Value) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(key, value);
    }

    /// Drop one entry
    pub fn invalidate(&self, key: &QueryKey) {
        let mut entries = self.entries.lock().unwrap();
        entries.remove(key);
    }

    /// Drop every entry belonging to a resource
    pub fn invalidate_resource(&self, resource: &str) {
        let mut entries = self.entries.lock().unwrap();
        entries.retain(|key, _| !key.matches_resource(resource));
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        let entries = self.entries.lock().unwrap();
        entries.len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Retry budget for an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries allowed after the first attempt
    pub max_retries: u32,
}

impl RetryPolicy {
    /// Budget for read operations: at most one retry
    pub fn reads() -> Self {
        Self { max_retries: 1 }
    }

    /// Budget for mutations: never retried
    pub fn none() -> Self {
        Self { max_retries: 0 }
    }
}

/// Run a read through the cache.
///
/// A cache hit short-circuits the operation. On a miss the operation runs
/// with the given retry budget; only transport failures where no response
/// was reached are retried. The result is stored only after a fully
/// successful fetch, so an abandoned or failed read leaves the cache
/// exactly as it was.
pub async fn fetch_cached<F, Fut>(
    cache: &QueryCache,
    key: QueryKey,
    policy: RetryPolicy,
    op: F,
) -> Result<Value, Error>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<Value, Error>>,
{
    if let Some(hit) = cache.get(&key) {
        return Ok(hit);
    }

    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => {
                cache.put(key, value.clone());
                return Ok(value);
            }
            Err(err) if err.is_transient() && attempt < policy.max_retries => {
                attempt += 1;
                tracing::debug!(resource = key.resource(), attempt, "retrying read");
            }
            Err(err) => return Err(err),
        }
    }
}

/// Three-phase mutation lifecycle observer.
///
/// The UI implements this to drive pending markers and notifications;
/// every error is surfaced through `on_error`, never swallowed.
#[async_trait]
pub trait MutationObserver: Send + Sync {
    /// The mutation is about to run
    async fn on_begin(&self) {}

    /// The mutation succeeded and the resource's cache has been
    /// invalidated
    async fn on_success(&self) {}

    /// The mutation failed; cached data was left untouched
    async fn on_error(&self, _error: &Error) {}
}

/// A no-op observer for callers without a UI surface
pub struct NullObserver;

#[async_trait]
impl MutationObserver for NullObserver {}

/// Drive a mutation through its lifecycle.
///
/// On success the affected resource's cache keys are invalidated before
/// `on_success` fires; on failure the cache is untouched and the error is
/// both observed and returned.
pub async fn run_mutation<T, F, Fut, O>(
    cache: &QueryCache,
    resource: &str,
    observer: &O,
    op: F,
) -> Result<T, Error>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, Error>>,
    O: MutationObserver + ?Sized,
{
    observer.on_begin().await;

    match op().await {
        Ok(value) => {
            cache.invalidate_resource(resource);
            observer.on_success().await;
            Ok(value)
        }
        Err(err) => {
            observer.on_error(&err).await;
            Err(err)
        }
    }
}
