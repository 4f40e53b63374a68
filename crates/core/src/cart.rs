//! The cart state machine.
//!
//! A [`Cart`] is an ordered list of [`LineItem`]s, first-added first. It
//! enforces two rules on every mutation:
//!
//! - at most one line item per [`ProductId`]
//! - no line item ever holds a quantity below one
//!
//! The cart does no I/O. Persisting and refreshing the page after a change is
//! the caller's job, driven by the returned [`CartChange`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

use crate::types::{LineItem, Price, ProductId, Quantity};

/// A command sent from the UI layer into the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartCommand {
    /// Add units of a product, creating the line item if needed.
    AddItem {
        id: ProductId,
        name: String,
        price: Price,
        image: String,
        quantity: Quantity,
    },
    /// Change a line item's quantity by a signed amount.
    ChangeQuantity { id: ProductId, delta: i64 },
    /// Drop a line item.
    Remove { id: ProductId },
}

impl CartCommand {
    /// The product this command targets.
    #[must_use]
    pub const fn product_id(&self) -> &ProductId {
        match self {
            Self::AddItem { id, .. } | Self::ChangeQuantity { id, .. } | Self::Remove { id } => id,
        }
    }
}

/// What a mutation did to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    /// A new line item was appended.
    Added,
    /// An existing line item gained units through an add.
    Incremented,
    /// A line item's quantity changed and it is still in the cart.
    QuantityChanged,
    /// A line item left the cart.
    Removed,
    /// Nothing happened (unknown product id).
    Unchanged,
}

impl CartChange {
    /// Whether the cart contents differ from before.
    #[must_use]
    pub const fn is_mutation(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Ordered collection of line items.
///
/// Serialized as a plain array of line items. Deserializing goes through
/// [`Cart::from_items`], so duplicate ids are merged on the way in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Serialize for Cart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl From<Vec<LineItem>> for Cart {
    fn from(items: Vec<LineItem>) -> Self {
        Self::from_items(items)
    }
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from stored line items.
    ///
    /// Duplicate ids are merged into the first occurrence so the one-line-
    /// per-product rule holds even for hand-edited storage.
    #[must_use]
    pub fn from_items(items: Vec<LineItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            match cart.position(&item.id) {
                Some(index) => {
                    if let Some(existing) = cart.items.get_mut(index) {
                        existing.quantity = existing.quantity.saturating_add(item.quantity);
                    }
                }
                None => cart.items.push(item),
            }
        }
        cart
    }

    /// Add `quantity` units of a product.
    ///
    /// If the product is already in the cart its quantity grows and its
    /// stored name, price, and image are left as they were.
    pub fn add(
        &mut self,
        id: ProductId,
        name: impl Into<String>,
        price: Price,
        image: impl Into<String>,
        quantity: Quantity,
    ) -> CartChange {
        if let Some(existing) = self.items.iter_mut().find(|item| item.id == id) {
            existing.quantity = existing.quantity.saturating_add(quantity);
            return CartChange::Incremented;
        }

        self.items.push(LineItem {
            id,
            name: name.into(),
            price,
            image: image.into(),
            quantity,
        });
        CartChange::Added
    }

    /// Change a line item's quantity by `delta`, removing it at zero or below.
    pub fn change_quantity(&mut self, id: &ProductId, delta: i64) -> CartChange {
        let Some(index) = self.position(id) else {
            return CartChange::Unchanged;
        };
        let Some(item) = self.items.get_mut(index) else {
            return CartChange::Unchanged;
        };

        match item.quantity.apply_delta(delta) {
            Some(quantity) => {
                item.quantity = quantity;
                CartChange::QuantityChanged
            }
            None => {
                self.items.remove(index);
                CartChange::Removed
            }
        }
    }

    /// Drop a line item. Removing an absent id is a no-op.
    pub fn remove(&mut self, id: &ProductId) -> CartChange {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        if self.items.len() == before {
            CartChange::Unchanged
        } else {
            CartChange::Removed
        }
    }

    /// Apply a UI command.
    pub fn apply(&mut self, command: CartCommand) -> CartChange {
        match command {
            CartCommand::AddItem {
                id,
                name,
                price,
                image,
                quantity,
            } => self.add(id, name, price, image, quantity),
            CartCommand::ChangeQuantity { id, delta } => self.change_quantity(&id, delta),
            CartCommand::Remove { id } => self.remove(&id),
        }
    }

    /// Sum of quantities across all line items.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum()
    }

    /// Sum of price times quantity across all line items.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.items.iter().fold(Decimal::ZERO, |total, item| {
            total.checked_add(item.line_total()).unwrap_or(Decimal::MAX)
        })
    }

    /// Look up a line item.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Line items in cart order.
    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    /// Line items as a slice.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
