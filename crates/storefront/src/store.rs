//! The cart store.
//!
//! [`CartStore`] is the only owner of the page's [`Cart`]. It is opened once
//! per page session from durable storage, applies [`CartCommand`]s, and
//! flushes the cart to storage after every mutation before returning.
//! Presenters read it through [`CartStore::cart`] and never mutate it.

use cartkeeper_core::{Cart, CartChange, CartCommand, Price, ProductId, Quantity};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::persistence::CartPersistence;
use crate::storage::KeyValueStore;

/// In-memory cart plus its persistence adapter.
#[derive(Debug)]
pub struct CartStore<S> {
    cart: Cart,
    persistence: CartPersistence<S>,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Load the cart from storage. Missing or corrupt data yields an empty cart.
    pub fn open(persistence: CartPersistence<S>) -> Self {
        let cart = persistence.load();
        debug!(items = cart.len(), count = cart.total_item_count(), "cart loaded");
        Self { cart, persistence }
    }

    /// Read-only view of the cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Borrow the persistence adapter.
    #[must_use]
    pub const fn persistence(&self) -> &CartPersistence<S> {
        &self.persistence
    }

    /// Give back the persistence adapter, e.g. to reopen the same storage.
    pub fn into_persistence(self) -> CartPersistence<S> {
        self.persistence
    }

    /// Add `quantity` units of a product.
    #[instrument(skip(self, name, image), fields(id = %id))]
    pub fn add_item(
        &mut self,
        id: ProductId,
        name: impl Into<String>,
        price: Price,
        image: impl Into<String>,
        quantity: Quantity,
    ) -> CartChange {
        let change = self.cart.add(id, name, price, image, quantity);
        self.commit(change);
        change
    }

    /// Change a line item's quantity, removing it at zero or below.
    #[instrument(skip(self), fields(id = %id))]
    pub fn change_quantity(&mut self, id: &ProductId, delta: i64) -> CartChange {
        let change = self.cart.change_quantity(id, delta);
        self.commit(change);
        change
    }

    /// Drop a line item.
    #[instrument(skip(self), fields(id = %id))]
    pub fn remove_item(&mut self, id: &ProductId) -> CartChange {
        let change = self.cart.remove(id);
        self.commit(change);
        change
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
            } => self.add_item(id, name, price, image, quantity),
            CartCommand::ChangeQuantity { id, delta } => self.change_quantity(&id, delta),
            CartCommand::Remove { id } => self.remove_item(&id),
        }
    }

    /// Sum of quantities.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.cart.total_item_count()
    }

    /// Sum of price times quantity.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.cart.total_price()
    }

    /// Persist after a mutation. A failed write keeps the in-memory cart.
    fn commit(&mut self, change: CartChange) {
        if !change.is_mutation() {
            debug!(?change, "cart unchanged");
            return;
        }
        if let Err(e) = self.persistence.save(&self.cart) {
            e.report("Failed to persist cart");
        }
        debug!(?change, count = self.cart.total_item_count(), "cart updated");
    }
}
