//! `storefront-core`: shared domain building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no async, no storage).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::{Entity, ensure_unique_ids};
pub use error::{DomainError, DomainResult};
pub use id::{ProductId, ReviewId, TaskId, UserId};
pub use value_object::ValueObject;
