//! Sort Stage.

use core::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;

use crate::filter::{SortDirection, SortField};
use crate::product::Product;

/// Order products by `field` in `direction`, returning a new vector.
///
/// The sort is stable: equal keys keep their input order in both directions.
pub fn sort_products<'a>(products: &[&'a Product], field: SortField, direction: SortDirection) -> Vec<&'a Product> {
    let mut sorted = products.to_vec();
    sorted.sort_by(|a, b| direction.apply(compare_by(a, b, field)));
    sorted
}

fn compare_by(a: &Product, b: &Product, field: SortField) -> Ordering {
    match field {
        SortField::Name => compare_names(&a.name, &b.name),
        SortField::Price => a.price.total_cmp(&b.price),
        SortField::Rating => a.rating.total_cmp(&b.rating),
        SortField::Date => a.created_at.cmp(&b.created_at),
    }
}

/// Collation for display names.
///
/// Primary key is the name lowercased, NFKC-normalized and stripped of
/// combining accents, so `Éclair` sorts between `Coffee` and `Programming`
/// and `apple` sits next to `Apple`. Names equal under that key fall back to a
/// case-folded code-point comparison, then lowercase-first at the first
/// differing character; only byte-identical names compare equal.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| {
            a.chars()
                .flat_map(char::to_lowercase)
                .cmp(b.chars().flat_map(char::to_lowercase))
        })
        .then_with(|| {
            a.chars()
                .zip(b.chars())
                .find(|(x, y)| x != y)
                .map(|(x, y)| match (x.is_lowercase(), y.is_lowercase()) {
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                    _ => x.cmp(&y),
                })
                .unwrap_or_else(|| a.len().cmp(&b.len()))
        })
}

fn collation_key(name: &str) -> String {
    let folded: String = name.to_lowercase().nfkc().collect();
    folded.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}
