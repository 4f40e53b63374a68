//! Cart persistence adapter.
//!
//! Writes the whole cart as a JSON array of `{id, name, price, image,
//! quantity}` records under one storage key, and reads it back once at page
//! load. There is no versioning and no partial write: every save replaces
//! the previous value.

use cartkeeper_core::Cart;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::storage::KeyValueStore;

/// Reads and writes the cart's serialized form.
#[derive(Debug)]
pub struct CartPersistence<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStore> CartPersistence<S> {
    /// Create an adapter storing the cart under `key`.
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Storage key in use.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Give back the storage backend.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Serialize the full cart and overwrite the stored value.
    ///
    /// # Errors
    ///
    /// Returns `AppError` if serialization or the storage write fails.
    pub fn save(&mut self, cart: &Cart) -> Result<(), AppError> {
        let json = serde_json::to_string(cart.items())?;
        self.storage.set(&self.key, &json)?;
        debug!(key = %self.key, items = cart.len(), "cart saved");
        Ok(())
    }

    /// Load the stored cart, falling back to an empty cart.
    ///
    /// An absent key, an unreadable backend, or malformed content all yield
    /// an empty cart. Only the latter two are logged.
    pub fn load(&self) -> Cart {
        match self.try_load() {
            Ok(Some(cart)) => cart,
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!(key = %self.key, "Discarding stored cart: {e}");
                Cart::new()
            }
        }
    }

    /// Load the stored cart, reporting why it could not be read.
    ///
    /// # Errors
    ///
    /// Returns `AppError` if the backend fails or the content is malformed.
    pub fn try_load(&self) -> Result<Option<Cart>, AppError> {
        let Some(raw) = self.storage.get(&self.key)? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }
}
