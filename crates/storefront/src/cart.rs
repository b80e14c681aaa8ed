//! In-session cart store.
//!
//! A cart is an insertion-ordered list of lines, one per menu item. Lines
//! carry a copy of the item's display fields taken when the item was last
//! added, so the cart renders the same even if the catalog changes.
//!
//! Totals are always recomputed from the current lines; nothing is cached.

use rust_decimal::Decimal;
use serde::Serialize;

use thai_orchid_core::MenuItemId;

use crate::catalog::MenuItem;

/// One distinct item in the cart with its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: MenuItemId,
    /// Always at least 1; a line that would reach 0 is removed instead.
    pub quantity: u32,
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub image: String,
    pub category: Option<String>,
}

impl CartLine {
    fn from_item(item: &MenuItem) -> Self {
        Self {
            id: item.id.clone(),
            quantity: 1,
            name: item.name.clone(),
            price: item.price,
            description: item.description.clone(),
            image: item.image.clone(),
            category: item.category.clone(),
        }
    }

    fn refresh_from(&mut self, item: &MenuItem) {
        self.name.clone_from(&item.name);
        self.price = item.price;
        self.description.clone_from(&item.description);
        self.image.clone_from(&item.image);
        self.category.clone_from(&item.category);
    }

    /// `price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Outcome of a successful cart mutation, reported to the customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    Added { item_name: String },
    Removed { item_name: String },
}

/// The cart store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `item`.
    ///
    /// An existing line is incremented in place and its display fields are
    /// refreshed from `item`; otherwise a new line is appended.
    pub fn add_item(&mut self, item: &MenuItem) -> CartEvent {
        if let Some(line) = self.lines.iter_mut().find(|line| line.id == item.id) {
            line.quantity += 1;
            line.refresh_from(item);
        } else {
            self.lines.push(CartLine::from_item(item));
        }

        CartEvent::Added {
            item_name: item.name.clone(),
        }
    }

    /// Remove one unit of the item with `id`.
    ///
    /// Returns `None` when the item is not in the cart.
    pub fn remove_one_unit(&mut self, id: &MenuItemId) -> Option<CartEvent> {
        let position = self.lines.iter().position(|line| &line.id == id)?;
        let line = self.lines.get_mut(position)?;
        let item_name = line.name.clone();

        if line.quantity > 1 {
            line.quantity -= 1;
        } else {
            self.lines.remove(position);
        }

        Some(CartEvent::Removed { item_name })
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn get(&self, id: &MenuItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.id == id)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Sum of `price × quantity` across all lines.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }
}
