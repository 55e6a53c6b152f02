//! Free-text filtering over the catalog

use crate::catalog::Catalog;
use crate::model::Product;

/// Case-insensitive substring match on name, or on description when present.
/// An empty query matches everything.
pub fn matches(product: &Product, query: &str) -> bool {
    matches_lowered(product, &query.to_lowercase())
}

/// Products matching `query`, in catalog order.
pub fn filter<'a>(catalog: &'a Catalog, query: &str) -> Vec<&'a Product> {
    let needle = query.to_lowercase();
    let result: Vec<&Product> = catalog
        .products()
        .iter()
        .filter(|p| matches_lowered(p, &needle))
        .collect();
    log::debug!(
        "Query {:?} matched {} of {} products",
        query,
        result.len(),
        catalog.len()
    );
    result
}

fn matches_lowered(product: &Product, needle: &str) -> bool {
    needle.is_empty()
        || product.name.to_lowercase().contains(needle)
        || product
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(needle))
}
