use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, Entity, ProductId, ReviewId, UserId, ensure_unique_ids};

/// Highest rating a product or review can carry.
pub const MAX_RATING: f64 = 5.0;

/// Fixed set of catalog categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Electronics,
    Clothing,
    Food,
    Books,
    Home,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 5] = [
        ProductCategory::Electronics,
        ProductCategory::Clothing,
        ProductCategory::Food,
        ProductCategory::Books,
        ProductCategory::Home,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Electronics => "electronics",
            ProductCategory::Clothing => "clothing",
            ProductCategory::Food => "food",
            ProductCategory::Books => "books",
            ProductCategory::Home => "home",
        }
    }
}

impl core::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for ProductCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProductCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown category: {s}")))
    }
}

/// A customer review attached to a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub user_id: UserId,
    pub rating: f64,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn validate(&self) -> DomainResult<()> {
        ensure_rating(self.rating, || format!("review {}", self.id))
    }
}

/// Catalog record.
///
/// Records are static once loaded; the browsing pipeline only ever reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: ProductCategory,
    pub in_stock: bool,
    pub tags: BTreeSet<String>,
    pub created_at: DateTime<Utc>,
    pub rating: f64,
    pub reviews: Vec<Review>,
}

impl Product {
    /// Check the numeric invariants: finite non-negative price, ratings in `[0, 5]`.
    pub fn validate(&self) -> DomainResult<()> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DomainError::validation(format!(
                "product {}: price must be a non-negative number, got {}",
                self.id, self.price
            )));
        }
        ensure_rating(self.rating, || format!("product {}", self.id))?;
        for review in &self.reviews {
            review.validate()?;
        }
        ensure_unique_ids(&self.reviews)
    }

    /// Mean review rating rounded to one decimal place (`0.0` without reviews).
    pub fn average_review_rating(&self) -> f64 {
        if self.reviews.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.reviews.iter().map(|r| r.rating).sum();
        let mean = sum / self.reviews.len() as f64;
        (mean * 10.0).round() / 10.0
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &ProductId {
        &self.id
    }
}

impl Entity for Review {
    type Id = ReviewId;

    fn id(&self) -> &ReviewId {
        &self.id
    }
}

fn ensure_rating(rating: f64, subject: impl FnOnce() -> String) -> DomainResult<()> {
    if (0.0..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(DomainError::validation(format!(
            "{}: rating must be within [0, {MAX_RATING}], got {rating}",
            subject()
        )))
    }
}

/// Validated, immutable product collection.
///
/// Construction checks every record and rejects duplicate identifiers, so the
/// pipeline can assume well-formed input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> DomainResult<Self> {
        for product in &products {
            product.validate()?;
        }
        ensure_unique_ids(&products)?;
        Ok(Self { products })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
