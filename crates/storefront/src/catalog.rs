//! Read-only menu catalog.
//!
//! The catalog is loaded once at startup from a JSON array and shared
//! (behind an `Arc`) by every checkout session. Lookups by id are O(1);
//! iteration follows file order, which is also the display order.

use std::collections::HashMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument};

use thai_orchid_core::MenuItemId;

/// Errors that can occur when loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The menu file could not be read.
    #[error("Failed to read menu file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The menu file is not valid JSON for a list of items.
    #[error("Invalid menu JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two items share an identifier.
    #[error("Duplicate menu item id: {0}")]
    DuplicateId(MenuItemId),

    /// An item has a negative price.
    #[error("Menu item {id} has a negative price: {price}")]
    NegativePrice { id: MenuItemId, price: Decimal },
}

/// A purchasable menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub description: String,
    /// Unit price in baht.
    pub price: Decimal,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
}

/// Immutable, ordered list of menu items with lookup by id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<MenuItem>,
    index: HashMap<MenuItemId, usize>,
}

impl Catalog {
    /// Build a catalog from items in display order.
    ///
    /// # Errors
    ///
    /// Returns an error if two items share an id or a price is negative.
    pub fn new(items: Vec<MenuItem>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            if item.price.is_sign_negative() && !item.price.is_zero() {
                return Err(CatalogError::NegativePrice {
                    id: item.id.clone(),
                    price: item.price,
                });
            }
            if index.insert(item.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateId(item.id.clone()));
            }
        }
        Ok(Self { items, index })
    }

    /// Parse a catalog from a JSON array of items.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the items are invalid.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let items: Vec<MenuItem> = serde_json::from_str(json)?;
        Self::new(items)
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        info!(items = catalog.len(), "Menu catalog loaded");
        Ok(catalog)
    }

    /// Look up an item by id.
    #[must_use]
    pub fn get(&self, id: &MenuItemId) -> Option<&MenuItem> {
        self.index.get(id).and_then(|&i| self.items.get(i))
    }

    /// All items in display order.
    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
