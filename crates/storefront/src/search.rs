//! Menu search.
//!
//! Plain case-insensitive substring matching over name, description and
//! category. No ranking and no fuzzy matching: results keep catalog order.

use serde::Serialize;

use crate::catalog::{Catalog, MenuItem};

/// Items whose name, description or category contain `query`.
///
/// A blank query returns the whole catalog.
#[must_use]
pub fn filter<'a>(query: &str, catalog: &'a Catalog) -> Vec<&'a MenuItem> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return catalog.items().iter().collect();
    }

    catalog
        .items()
        .iter()
        .filter(|item| matches(item, &query))
        .collect()
}

fn matches(item: &MenuItem, needle: &str) -> bool {
    item.name.to_lowercase().contains(needle)
        || item.description.to_lowercase().contains(needle)
        || item
            .category
            .as_ref()
            .is_some_and(|category| category.to_lowercase().contains(needle))
}

/// Filtered menu plus the summary line shown under the search box.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults<'a> {
    pub query: String,
    pub count: usize,
    /// `None` when no search is active.
    pub message: Option<String>,
    pub items: Vec<&'a MenuItem>,
}

impl<'a> SearchResults<'a> {
    /// Run `query` against `catalog`.
    #[must_use]
    pub fn new(query: &str, catalog: &'a Catalog) -> Self {
        let items = filter(query, catalog);
        let count = items.len();
        let message = (!query.trim().is_empty()).then(|| results_message(count));

        Self {
            query: query.trim().to_string(),
            count,
            message,
            items,
        }
    }
}

/// Human-readable result count.
#[must_use]
pub fn results_message(count: usize) -> String {
    match count {
        0 => "No dishes found".to_string(),
        1 => "Found 1 delicious dish".to_string(),
        n => format!("Found {n} delicious dishes"),
    }
}
