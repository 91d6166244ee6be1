//! Filter state and the Filter Stage.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, ValueObject};

use crate::product::{Product, ProductCategory};

/// Inclusive price bounds, serialized as a `[min, max]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    /// Every finite non-negative price.
    pub const FULL: PriceRange = PriceRange { min: 0.0, max: f64::MAX };

    /// Labeled buckets offered by price pickers.
    pub const PRESETS: [(&'static str, PriceRange); 4] = [
        ("Under $50", PriceRange { min: 0.0, max: 50.0 }),
        ("$50 - $100", PriceRange { min: 50.0, max: 100.0 }),
        ("$100 - $500", PriceRange { min: 100.0, max: 500.0 }),
        ("$500+", PriceRange { min: 500.0, max: 10_000.0 }),
    ];

    /// Build a range, rejecting `min > max`, negative or non-finite bounds.
    pub fn new(min: f64, max: f64) -> DomainResult<Self> {
        let range = Self { min, max };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> DomainResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(DomainError::validation("price range bounds must be finite"));
        }
        if self.min < 0.0 {
            return Err(DomainError::validation(format!(
                "price range minimum must be non-negative, got {}",
                self.min
            )));
        }
        if self.min > self.max {
            return Err(DomainError::validation(format!(
                "price range minimum {} exceeds maximum {}",
                self.min, self.max
            )));
        }
        Ok(())
    }

    /// `false` for an inverted range, so an inverted range matches nothing.
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::FULL
    }
}

impl From<(f64, f64)> for PriceRange {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}

impl From<PriceRange> for (f64, f64) {
    fn from(range: PriceRange) -> Self {
        (range.min, range.max)
    }
}

impl ValueObject for PriceRange {}

/// Field the Sort Stage orders by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Name,
    Price,
    Rating,
    /// Creation timestamp.
    Date,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Price => "price",
            SortField::Rating => "rating",
            SortField::Date => "date",
        }
    }
}

impl core::str::FromStr for SortField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortField::Name),
            "price" => Ok(SortField::Price),
            "rating" => Ok(SortField::Rating),
            "date" => Ok(SortField::Date),
            other => Err(DomainError::validation(format!("unknown sort field: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    /// Apply the direction to an ascending comparison result.
    pub fn apply(&self, ordering: core::cmp::Ordering) -> core::cmp::Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

impl core::str::FromStr for SortDirection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Ascending),
            "desc" => Ok(SortDirection::Descending),
            other => Err(DomainError::validation(format!("unknown sort direction: {other}"))),
        }
    }
}

/// Sort selection in its picker form, e.g. `"price-desc"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

impl core::fmt::Display for SortSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}-{}", self.field.as_str(), self.direction.as_str())
    }
}

impl core::str::FromStr for SortSpec {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = s
            .split_once('-')
            .ok_or_else(|| DomainError::validation(format!("sort must look like <field>-<asc|desc>, got {s}")))?;
        Ok(Self {
            field: field.parse()?,
            direction: direction.parse()?,
        })
    }
}

impl ValueObject for SortSpec {}

/// Current search/filter/sort selections.
///
/// Persisted as JSON, so the wire shape is strict: every field is required and
/// unknown fields are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FilterState {
    pub query: String,
    /// Empty means "any category".
    pub categories: BTreeSet<ProductCategory>,
    pub price_range: PriceRange,
    #[serde(rename = "inStock")]
    pub in_stock_only: bool,
    #[serde(rename = "sortBy")]
    pub sort_field: SortField,
    #[serde(rename = "sortOrder")]
    pub sort_direction: SortDirection,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            query: String::new(),
            categories: BTreeSet::new(),
            price_range: PriceRange::FULL,
            in_stock_only: false,
            sort_field: SortField::Name,
            sort_direction: SortDirection::Ascending,
        }
    }
}

impl FilterState {
    pub fn sort_spec(&self) -> SortSpec {
        SortSpec::new(self.sort_field, self.sort_direction)
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_categories(mut self, categories: impl IntoIterator<Item = ProductCategory>) -> Self {
        self.categories = categories.into_iter().collect();
        self
    }

    pub fn with_price_range(mut self, range: PriceRange) -> Self {
        self.price_range = range;
        self
    }

    pub fn with_in_stock_only(mut self, in_stock_only: bool) -> Self {
        self.in_stock_only = in_stock_only;
        self
    }

    pub fn with_sort(mut self, spec: SortSpec) -> Self {
        self.sort_field = spec.field;
        self.sort_direction = spec.direction;
        self
    }

    /// Add the category if absent, remove it if present.
    pub fn toggle_category(&mut self, category: ProductCategory) {
        if !self.categories.remove(&category) {
            self.categories.insert(category);
        }
    }

    /// Shape check for state coming back from storage.
    pub fn validate(&self) -> DomainResult<()> {
        self.price_range.validate()
    }

    /// The query lowercased as typed; `None` only when empty.
    fn normalized_query(&self) -> Option<String> {
        (!self.query.is_empty()).then(|| self.query.to_lowercase())
    }
}

impl ValueObject for FilterState {}

/// Filter Stage: keep products matching every active constraint, in input order.
///
/// Takes a shared slice, so the caller's collection is never touched.
pub fn filter_products<'a>(products: &'a [Product], state: &FilterState) -> Vec<&'a Product> {
    let query = state.normalized_query();

    products
        .iter()
        .filter(|p| match &query {
            Some(q) => p.name.to_lowercase().contains(q) || p.description.to_lowercase().contains(q),
            None => true,
        })
        .filter(|p| state.categories.is_empty() || state.categories.contains(&p.category))
        .filter(|p| !state.in_stock_only || p.in_stock)
        .filter(|p| state.price_range.contains(p.price))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::seed_products;

    fn names(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn default_state_keeps_everything_in_order() {
        let products = seed_products();
        let out = filter_products(&products, &FilterState::default());
        assert_eq!(out.len(), products.len());
        assert!(out.iter().zip(&products).all(|(a, b)| a.id == b.id));
    }

    #[test]
    fn query_matches_name_or_description_case_insensitively() {
        let products = seed_products();

        let by_name = filter_products(&products, &FilterState::default().with_query("COFFEE"));
        assert_eq!(names(&by_name), vec!["Coffee Maker"]);

        let by_description = filter_products(&products, &FilterState::default().with_query("typescript"));
        assert_eq!(names(&by_description), vec!["Programming Book"]);
    }

    #[test]
    fn only_the_empty_query_is_no_constraint() {
        let products = seed_products();
        assert_eq!(filter_products(&products, &FilterState::default().with_query("")).len(), 4);

        let spaced = filter_products(&products, &FilterState::default().with_query(" "));
        assert_eq!(
            names(&spaced),
            vec!["Wireless Headphones", "Running Shoes", "Coffee Maker", "Programming Book"]
        );
    }

    #[test]
    fn query_whitespace_is_matched_literally() {
        let products = seed_products();
        assert!(filter_products(&products, &FilterState::default().with_query("book ")).is_empty());
        assert_eq!(
            names(&filter_products(&products, &FilterState::default().with_query("coffee maker"))),
            vec!["Coffee Maker"]
        );
    }

    #[test]
    fn each_price_preset_selects_its_bucket() {
        let products = seed_products();
        let bucket = |label: &str| {
            let (_, range) = PriceRange::PRESETS
                .into_iter()
                .find(|(l, _)| *l == label)
                .unwrap();
            names(&filter_products(&products, &FilterState::default().with_price_range(range)))
        };

        assert_eq!(bucket("Under $50"), vec!["Programming Book"]);
        assert_eq!(bucket("$50 - $100"), vec!["Running Shoes", "Coffee Maker"]);
        assert_eq!(bucket("$100 - $500"), vec!["Wireless Headphones"]);
        assert!(bucket("$500+").is_empty());
        assert!(PriceRange::PRESETS.iter().all(|(_, r)| r.validate().is_ok()));
    }

    #[test]
    fn filtering_leaves_the_source_untouched() {
        let products = seed_products();
        let before = products.clone();
        let _ = filter_products(&products, &FilterState::default().with_query("shoes"));
        let _ = filter_products(&products, &FilterState::default().with_query("shoes"));
        assert_eq!(products, before);
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let products = seed_products();
        let state = FilterState::default().with_price_range(PriceRange::new(79.99, 89.99).unwrap());
        assert_eq!(names(&filter_products(&products, &state)), vec!["Running Shoes", "Coffee Maker"]);
    }

    #[test]
    fn inverted_price_range_matches_nothing() {
        let products = seed_products();
        let state = FilterState::default().with_price_range(PriceRange { min: 100.0, max: 10.0 });
        assert!(filter_products(&products, &state).is_empty());
    }

    #[test]
    fn constraints_combine_conjunctively() {
        let products = seed_products();
        let state = FilterState::default()
            .with_categories([ProductCategory::Home, ProductCategory::Books])
            .with_in_stock_only(true);
        assert_eq!(names(&filter_products(&products, &state)), vec!["Programming Book"]);
    }

    #[test]
    fn price_range_constructor_rejects_bad_bounds() {
        assert!(PriceRange::new(10.0, 5.0).is_err());
        assert!(PriceRange::new(-1.0, 5.0).is_err());
        assert!(PriceRange::new(0.0, f64::INFINITY).is_err());
        assert!(PriceRange::new(5.0, 5.0).is_ok());
    }

    #[test]
    fn toggle_category_adds_then_removes() {
        let mut state = FilterState::default();
        state.toggle_category(ProductCategory::Food);
        assert!(state.categories.contains(&ProductCategory::Food));
        state.toggle_category(ProductCategory::Food);
        assert!(state.categories.is_empty());
    }

    #[test]
    fn sort_spec_round_trips_through_picker_form() {
        let spec: SortSpec = "rating-desc".parse().unwrap();
        assert_eq!(spec, SortSpec::new(SortField::Rating, SortDirection::Descending));
        assert_eq!(spec.to_string(), "rating-desc");
    }

    #[test]
    fn malformed_sort_spec_is_rejected() {
        assert!("price".parse::<SortSpec>().is_err());
        assert!("price-sideways".parse::<SortSpec>().is_err());
        assert!("weight-asc".parse::<SortSpec>().is_err());
    }

    #[test]
    fn filter_state_wire_shape_matches_stored_form() {
        let state = FilterState::default()
            .with_query("book")
            .with_price_range(PriceRange::new(0.0, 1000.0).unwrap());
        let json = serde_json::to_value(&state).unwrap();

        assert_eq!(json["priceRange"], serde_json::json!([0.0, 1000.0]));
        assert_eq!(json["inStock"], false);
        assert_eq!(json["sortBy"], "name");
        assert_eq!(json["sortOrder"], "asc");

        let back: FilterState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn filter_state_rejects_unknown_or_missing_fields() {
        let missing = serde_json::json!({ "query": "x" });
        assert!(serde_json::from_value::<FilterState>(missing).is_err());

        let mut extra = serde_json::to_value(FilterState::default()).unwrap();
        extra["surprise"] = serde_json::json!(true);
        assert!(serde_json::from_value::<FilterState>(extra).is_err());
    }
}
