//! Product catalog browsing core.
//!
//! Data flows one way:
//!
//! ```text
//! FilterStore (state) -> filter_products -> sort_products -> paginate -> PipelineOutput
//! ```
//!
//! Every stage is a pure function of its input and the current `FilterState`.
//! No stage mutates the caller's collection; stages hand back new vectors of
//! references, and only the final page is cloned into owned records.

pub mod filter;
pub mod fixtures;
pub mod format;
pub mod paginate;
pub mod pipeline;
pub mod product;
pub mod sort;
pub mod store;

pub use filter::{FilterState, PriceRange, SortDirection, SortField, SortSpec, filter_products};
pub use paginate::{DEFAULT_PAGE_SIZE, Page, PageDescriptor, PageRequest, page_of, paginate};
pub use pipeline::{PipelineOutput, matching_products, run_pipeline};
pub use product::{Catalog, Product, ProductCategory, Review};
pub use sort::{compare_names, sort_products};
pub use store::{FilterStore, StoreEvent};
