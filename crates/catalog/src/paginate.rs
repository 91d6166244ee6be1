//! Paginate Stage.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult};

/// Page size used by the browsing UI.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Validated 1-based page number plus page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: NonZeroUsize,
    size: NonZeroUsize,
}

impl PageRequest {
    /// Reject page numbers below 1 and a zero page size.
    pub fn new(page: usize, size: usize) -> DomainResult<Self> {
        let page = NonZeroUsize::new(page).ok_or(DomainError::InvalidPageNumber(page))?;
        let size = NonZeroUsize::new(size).ok_or(DomainError::InvalidPageSize(size))?;
        Ok(Self { page, size })
    }

    pub fn first(size: NonZeroUsize) -> Self {
        Self {
            page: NonZeroUsize::MIN,
            size,
        }
    }

    pub fn with_page(self, page: NonZeroUsize) -> Self {
        Self { page, ..self }
    }

    pub fn page(&self) -> usize {
        self.page.get()
    }

    pub fn size(&self) -> usize {
        self.size.get()
    }

    pub fn size_nonzero(&self) -> NonZeroUsize {
        self.size
    }

    fn offset(&self) -> usize {
        (self.page() - 1).saturating_mul(self.size())
    }
}

/// Where a page sits in the full result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDescriptor {
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl PageDescriptor {
    pub fn new(request: PageRequest, total: usize) -> Self {
        Self {
            page: request.page(),
            page_size: request.size(),
            total,
            total_pages: total_pages(total, request.size),
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Whether `page` addresses an existing page; page 1 always does.
    pub fn contains_page(&self, page: usize) -> bool {
        page == 1 || (1..=self.total_pages).contains(&page)
    }
}

/// `ceil(total / size)`.
pub fn total_pages(total: usize, size: NonZeroUsize) -> usize {
    total.div_ceil(size.get())
}

/// One slice of an ordered result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub descriptor: PageDescriptor,
}

/// Return `items[(page-1)*size .. page*size]`, clipped to the collection.
///
/// A page past the end is empty, not an error. Page 0 is
/// `DomainError::InvalidPageNumber`; size 0 is `DomainError::InvalidPageSize`.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> DomainResult<Page<T>> {
    let request = PageRequest::new(page, page_size)?;
    Ok(page_of(items, request))
}

/// Infallible form of [`paginate`] for an already-validated request.
pub fn page_of<T: Clone>(items: &[T], request: PageRequest) -> Page<T> {
    let start = request.offset().min(items.len());
    let end = start.saturating_add(request.size()).min(items.len());

    Page {
        items: items[start..end].to_vec(),
        descriptor: PageDescriptor::new(request, items.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_holds_everything_when_smaller_than_page_size() {
        let page = paginate(&[1, 2, 3], 1, 10).unwrap();
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.descriptor.total_pages, 1);
        assert!(!page.descriptor.has_next());
    }

    #[test]
    fn last_page_is_clipped() {
        let items: Vec<u32> = (1..=7).collect();
        let page = paginate(&items, 3, 3).unwrap();
        assert_eq!(page.items, vec![7]);
        assert_eq!(page.descriptor.total_pages, 3);
        assert!(page.descriptor.has_previous());
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let page = paginate(&[1, 2, 3], 2, 10).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.descriptor.total, 3);

        let far = paginate(&[1, 2, 3], usize::MAX, usize::MAX).unwrap();
        assert!(far.items.is_empty());
    }

    #[test]
    fn page_zero_is_rejected() {
        assert_eq!(paginate(&[1], 0, 10).unwrap_err(), DomainError::InvalidPageNumber(0));
    }

    #[test]
    fn page_size_zero_is_rejected() {
        assert_eq!(paginate(&[1], 1, 0).unwrap_err(), DomainError::InvalidPageSize(0));
    }

    #[test]
    fn empty_collection_has_zero_pages_but_page_one_is_addressable() {
        let page = paginate::<u8>(&[], 1, 10).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.descriptor.total_pages, 0);
        assert!(page.descriptor.contains_page(1));
        assert!(!page.descriptor.contains_page(2));
    }
}
