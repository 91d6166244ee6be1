//! Entity trait: identity + continuity across state changes.

use std::collections::HashSet;

use crate::error::{DomainError, DomainResult};

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Reject a collection in which two entities share an identifier.
///
/// Returns the first duplicate found (in iteration order) as a `Conflict`.
pub fn ensure_unique_ids<'a, E, I>(entities: I) -> DomainResult<()>
where
    E: Entity + 'a,
    I: IntoIterator<Item = &'a E>,
{
    let mut seen = HashSet::new();
    for entity in entities {
        if !seen.insert(entity.id()) {
            return Err(DomainError::conflict(format!(
                "duplicate identifier: {}",
                entity.id()
            )));
        }
    }
    Ok(())
}
