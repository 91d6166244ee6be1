//! Filter-State Store.
//!
//! Owns the current `FilterState` and page, and re-runs the pipeline on demand.
//! Nothing is cached between calls: every `current()` filters, sorts and pages
//! the catalog snapshot again.

use std::num::NonZeroUsize;
use std::sync::Arc;

use storefront_core::{DomainError, DomainResult};
use storefront_events::{EventBus, InMemoryEventBus, Subscription};

use crate::filter::FilterState;
use crate::paginate::{PageDescriptor, PageRequest, total_pages};
use crate::pipeline::{PipelineOutput, matching_products, run_pipeline};
use crate::product::Catalog;

/// Change notification published after every effective state change.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    FiltersChanged(FilterState),
    PageChanged { page: usize },
    Cleared,
    CatalogReplaced { products: usize },
}

#[derive(Debug)]
pub struct FilterStore {
    catalog: Arc<Catalog>,
    filters: FilterState,
    request: PageRequest,
    bus: InMemoryEventBus<StoreEvent>,
}

impl FilterStore {
    /// Create a store with default filters on page 1.
    pub fn new(catalog: Arc<Catalog>, page_size: usize) -> DomainResult<Self> {
        let size = NonZeroUsize::new(page_size).ok_or(DomainError::InvalidPageSize(page_size))?;
        Ok(Self {
            catalog,
            filters: FilterState::default(),
            request: PageRequest::first(size),
            bus: InMemoryEventBus::new(),
        })
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn page(&self) -> usize {
        self.request.page()
    }

    pub fn page_size(&self) -> usize {
        self.request.size()
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn subscribe(&self) -> Subscription<StoreEvent> {
        self.bus.subscribe()
    }

    /// Replace the filters wholesale and go back to page 1.
    pub fn set_filters(&mut self, filters: FilterState) {
        tracing::debug!(query = %filters.query, sort = %filters.sort_spec(), "filters replaced");
        self.filters = filters;
        self.reset_page();
        self.publish(StoreEvent::FiltersChanged(self.filters.clone()));
    }

    /// Edit a copy of the current filters, then apply it like [`Self::set_filters`].
    pub fn update_filters(&mut self, edit: impl FnOnce(&mut FilterState)) {
        let mut next = self.filters.clone();
        edit(&mut next);
        self.set_filters(next);
    }

    /// Move to page `page` if it exists in the current result.
    ///
    /// Out-of-range pages are ignored and `false` is returned.
    pub fn set_page(&mut self, page: usize) -> bool {
        let pages = self.total_pages();
        let target = match NonZeroUsize::new(page) {
            Some(target) if target.get() == 1 || target.get() <= pages => target,
            _ => {
                tracing::debug!(page, total_pages = pages, "ignoring out-of-range page");
                return false;
            }
        };

        if target.get() != self.page() {
            self.request = self.request.with_page(target);
            self.publish(StoreEvent::PageChanged { page });
        }
        true
    }

    /// Restore default filters and page 1.
    pub fn clear(&mut self) {
        self.filters = FilterState::default();
        self.reset_page();
        self.publish(StoreEvent::Cleared);
    }

    /// Swap in a new catalog snapshot; the page resets since old page numbers
    /// mean nothing against new data.
    pub fn replace_catalog(&mut self, catalog: Arc<Catalog>) {
        let products = catalog.len();
        self.catalog = catalog;
        self.reset_page();
        self.publish(StoreEvent::CatalogReplaced { products });
    }

    /// Run filter -> sort -> paginate against the current state.
    pub fn current(&self) -> PipelineOutput {
        run_pipeline(self.catalog.products(), &self.filters, self.request)
    }

    pub fn descriptor(&self) -> PageDescriptor {
        let matched = matching_products(self.catalog.products(), &self.filters).len();
        PageDescriptor::new(self.request, matched)
    }

    fn total_pages(&self) -> usize {
        let matched = matching_products(self.catalog.products(), &self.filters).len();
        total_pages(matched, self.request.size_nonzero())
    }

    fn reset_page(&mut self) {
        self.request = self.request.with_page(NonZeroUsize::MIN);
    }

    fn publish(&self, event: StoreEvent) {
        if let Err(err) = self.bus.publish(event) {
            tracing::warn!("failed to publish filter store event: {err}");
        }
    }
}
