//! Typed, validated access to stored state.
//!
//! Stored bytes are untrusted: they may be from an older build, hand-edited or
//! truncated. Every read parses into the concrete type and then runs its
//! domain checks; anything that fails is treated as absent.

use serde::Serialize;
use serde::de::DeserializeOwned;

use storefront_catalog::FilterState;
use storefront_core::{DomainError, DomainResult};
use storefront_tasks::{Task, validate_tasks};

use crate::storage::{KeyValueStore, StorageError};

pub const FILTERS_KEY: &str = "filters";
pub const TASKS_KEY: &str = "tasks";

/// Domain checks that run after a successful parse.
pub trait Validate {
    fn validate(&self) -> DomainResult<()>;
}

impl Validate for FilterState {
    fn validate(&self) -> DomainResult<()> {
        FilterState::validate(self)
    }
}

impl Validate for Vec<Task> {
    fn validate(&self) -> DomainResult<()> {
        validate_tasks(self)
    }
}

/// Parse and validate a stored value.
///
/// Both syntax/shape errors and failed domain checks come back as
/// `DomainError::MalformedPersistedState`.
pub fn decode<T>(raw: &str) -> DomainResult<T>
where
    T: DeserializeOwned + Validate,
{
    let value: T = serde_json::from_str(raw).map_err(|e| DomainError::malformed(e.to_string()))?;
    value
        .validate()
        .map_err(|e| DomainError::malformed(e.to_string()))?;
    Ok(value)
}

/// Read `key`, falling back to `T::default()` when it is missing, unreadable or malformed.
///
/// Malformed entries are removed so the next read starts clean.
pub async fn load_or_default<T>(store: &dyn KeyValueStore, key: &str) -> T
where
    T: DeserializeOwned + Validate + Default,
{
    let raw = match store.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(err) => {
            tracing::error!(key, "failed to read persisted state: {err}");
            return T::default();
        }
    };

    match decode::<T>(&raw) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(key, "discarding persisted state: {err}");
            if let Err(err) = store.remove(key).await {
                tracing::error!(key, "failed to remove malformed persisted state: {err}");
            }
            T::default()
        }
    }
}

pub async fn save<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw).await
}
