//! Filter -> Sort -> Paginate.

use serde::{Deserialize, Serialize};

use crate::filter::{FilterState, filter_products};
use crate::paginate::{PageDescriptor, PageRequest, page_of};
use crate::product::Product;
use crate::sort::sort_products;

/// A rendered page of products plus its position in the full result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineOutput {
    pub items: Vec<Product>,
    pub pagination: PageDescriptor,
}

/// Filter and sort, without paginating.
pub fn matching_products<'a>(products: &'a [Product], state: &FilterState) -> Vec<&'a Product> {
    let filtered = filter_products(products, state);
    sort_products(&filtered, state.sort_field, state.sort_direction)
}

/// Run the whole pipeline over an immutable snapshot.
pub fn run_pipeline(products: &[Product], state: &FilterState, request: PageRequest) -> PipelineOutput {
    let ordered = matching_products(products, state);
    let page = page_of(&ordered, request);

    tracing::debug!(
        total = products.len(),
        matched = ordered.len(),
        page = request.page(),
        returned = page.items.len(),
        sort = %state.sort_spec(),
        "catalog pipeline run"
    );

    PipelineOutput {
        items: page.items.into_iter().cloned().collect(),
        pagination: page.descriptor,
    }
}
