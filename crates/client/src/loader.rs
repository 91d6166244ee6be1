//! Last-write-wins product loading.
//!
//! Rapid filter edits can start several loads before the first one resolves.
//! Each load takes a generation ticket up front; when its fetch resolves, the
//! result is adopted only if no newer load has started in the meantime.
//! Older results are discarded as `Superseded`.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::watch;

use storefront_catalog::{Catalog, Product};
use storefront_core::DomainError;

/// Where product collections come from.
#[async_trait]
pub trait ProductSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Product>, LoadError>;
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LoadError {
    #[error("product source failed: {0}")]
    Source(String),
    #[error("product source returned an invalid catalog: {0}")]
    InvalidCatalog(#[from] DomainError),
    #[error("product load was superseded by a newer load")]
    Superseded,
}

/// Observable loader status.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready { products: usize },
    Failed { message: String },
}

/// What happened to one `load()` call.
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    /// This load was the newest when it resolved; its catalog is current.
    Adopted(Arc<Catalog>),
    /// A newer load started while this one was in flight; its result was dropped.
    Superseded,
    /// This load was the newest and it failed.
    Failed(LoadError),
}

impl LoadOutcome {
    pub fn catalog(&self) -> Option<&Arc<Catalog>> {
        match self {
            LoadOutcome::Adopted(catalog) => Some(catalog),
            LoadOutcome::Superseded | LoadOutcome::Failed(_) => None,
        }
    }

    /// The adopted catalog, or why there is none.
    pub fn into_result(self) -> Result<Arc<Catalog>, LoadError> {
        match self {
            LoadOutcome::Adopted(catalog) => Ok(catalog),
            LoadOutcome::Superseded => Err(LoadError::Superseded),
            LoadOutcome::Failed(err) => Err(err),
        }
    }
}

pub struct ProductLoader {
    source: Arc<dyn ProductSource>,
    generation: AtomicU64,
    state: watch::Sender<LoadState>,
}

impl core::fmt::Debug for ProductLoader {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProductLoader")
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .field("state", &*self.state.borrow())
            .finish()
    }
}

impl ProductLoader {
    pub fn new(source: Arc<dyn ProductSource>) -> Self {
        let (state, _) = watch::channel(LoadState::Idle);
        Self {
            source,
            generation: AtomicU64::new(0),
            state,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state.borrow().clone()
    }

    pub fn watch(&self) -> watch::Receiver<LoadState> {
        self.state.subscribe()
    }

    /// Fetch, validate and (if still newest) adopt a catalog.
    pub async fn load(&self) -> LoadOutcome {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_replace(LoadState::Loading);
        tracing::debug!(ticket, "product load started");

        let result = self
            .source
            .fetch()
            .await
            .and_then(|products| Catalog::new(products).map_err(LoadError::from));

        let newest = self.generation.load(Ordering::SeqCst);
        if newest != ticket {
            tracing::debug!(ticket, newest, "discarding superseded product load");
            return LoadOutcome::Superseded;
        }

        match result {
            Ok(catalog) => {
                tracing::info!(ticket, products = catalog.len(), "product catalog loaded");
                self.state.send_replace(LoadState::Ready { products: catalog.len() });
                LoadOutcome::Adopted(Arc::new(catalog))
            }
            Err(err) => {
                tracing::warn!(ticket, "product load failed: {err}");
                self.state.send_replace(LoadState::Failed { message: err.to_string() });
                LoadOutcome::Failed(err)
            }
        }
    }
}

/// Fixed product list, optionally delayed to mimic network latency.
#[derive(Debug, Clone)]
pub struct StaticSource {
    products: Vec<Product>,
    latency: Duration,
}

impl StaticSource {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            latency: Duration::ZERO,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl ProductSource for StaticSource {
    async fn fetch(&self) -> Result<Vec<Product>, LoadError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(self.products.clone())
    }
}
