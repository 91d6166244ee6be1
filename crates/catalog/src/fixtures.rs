//! Reference catalog used by the demo binary, tests and benches.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};

use storefront_core::DomainResult;

use crate::product::{Catalog, Product, ProductCategory, Review};

/// The four seed products, in their canonical order.
pub fn seed_products() -> Vec<Product> {
    vec![
        product(
            "1",
            "Wireless Headphones",
            "High-quality wireless headphones with noise cancellation",
            199.99,
            ProductCategory::Electronics,
            true,
            &["audio", "wireless", "premium"],
            date(2024, 1, 15),
            4.5,
            vec![
                review("r1", "u1", 5.0, "Great sound!", date(2024, 2, 1)),
                review("r2", "u2", 4.0, "Good but pricey", date(2024, 2, 15)),
            ],
        ),
        product(
            "2",
            "Running Shoes",
            "Comfortable running shoes for daily training",
            89.99,
            ProductCategory::Clothing,
            true,
            &["sports", "footwear", "comfortable"],
            date(2024, 1, 20),
            4.2,
            vec![review("r3", "u3", 4.0, "Very comfortable", date(2024, 2, 10))],
        ),
        product(
            "3",
            "Coffee Maker",
            "Automatic drip coffee maker with timer",
            79.99,
            ProductCategory::Home,
            false,
            &["kitchen", "appliances", "coffee"],
            date(2024, 1, 25),
            4.0,
            Vec::new(),
        ),
        product(
            "4",
            "Programming Book",
            "Learn TypeScript and React patterns",
            49.99,
            ProductCategory::Books,
            true,
            &["education", "programming", "typescript"],
            date(2024, 2, 1),
            4.8,
            vec![
                review("r4", "u4", 5.0, "Excellent book!", date(2024, 2, 20)),
                review("r5", "u5", 5.0, "Very helpful", date(2024, 2, 25)),
            ],
        ),
    ]
}

pub fn seed_catalog() -> DomainResult<Catalog> {
    Catalog::new(seed_products())
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    description: &str,
    price: f64,
    category: ProductCategory,
    in_stock: bool,
    tags: &[&str],
    created_at: DateTime<Utc>,
    rating: f64,
    reviews: Vec<Review>,
) -> Product {
    Product {
        id: fixture_id(id),
        name: name.to_string(),
        description: description.to_string(),
        price,
        category,
        in_stock,
        tags: tags.iter().map(|t| t.to_string()).collect::<BTreeSet<_>>(),
        created_at,
        rating,
        reviews,
    }
}

fn review(id: &str, user: &str, rating: f64, comment: &str, created_at: DateTime<Utc>) -> Review {
    Review {
        id: fixture_id(id),
        user_id: fixture_id(user),
        rating,
        comment: comment.to_string(),
        created_at,
    }
}

/// Fixture identifiers are non-empty literals, so conversion cannot fail.
fn fixture_id<T: TryFrom<String>>(raw: &str) -> T
where
    T::Error: core::fmt::Debug,
{
    match T::try_from(raw.to_string()) {
        Ok(id) => id,
        Err(err) => unreachable!("fixture id {raw:?} rejected: {err:?}"),
    }
}

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}

