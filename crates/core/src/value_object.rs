//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**; they are defined entirely by their
//! attribute values. `PriceRange`, `FilterState` and `SortSpec` in the catalog
//! are value objects: editing a filter means building a new one.

/// Marker trait for value objects.
///
/// The trait requires:
/// - **Clone**: value objects are copied, never shared mutably
/// - **PartialEq**: compared by their attribute values
/// - **Debug**: visible in logs and test failures
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
