//! Cart runtime configuration.
//!
//! Every setting has a default matching the shop's page markup and copy, so
//! `StorefrontConfig::default()` is a working configuration. Hosts that need
//! something else pass a JSON document to [`StorefrontConfig::from_json`];
//! missing fields fall back to their defaults.
//!
//! # Sections
//!
//! - `storage_key` - Durable storage key holding the cart (default: `cart`)
//! - `price_format` - Grouping, decimal separator, fraction digits, currency suffix
//! - `notifications` - Confirmation strategy (`dialog` or `toast`) and toast timing
//! - `messages` - User-facing copy
//! - `selectors` - Element ids and class names the host page provides

use std::time::Duration;

use cartkeeper_core::PriceFormat;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid setting {0}: {1}")]
    Invalid(&'static str, String),
}

/// Cart runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Durable storage key for the serialized cart
    pub storage_key: String,
    /// Price display format
    pub price_format: PriceFormat,
    /// Confirmation notification settings
    pub notifications: NotificationConfig,
    /// User-facing messages
    pub messages: MessagesConfig,
    /// Host page element ids and class names
    pub selectors: SelectorConfig,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage_key: "cart".to_string(),
            price_format: PriceFormat::default(),
            notifications: NotificationConfig::default(),
            messages: MessagesConfig::default(),
            selectors: SelectorConfig::default(),
        }
    }
}

/// How add-to-cart confirmations are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStrategy {
    /// Blocking host dialog (`alert`).
    Dialog,
    /// Self-removing toast message.
    #[default]
    Toast,
}

/// Confirmation notification settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Dialog or toast
    pub strategy: NotificationStrategy,
    /// How long a toast stays fully visible, in milliseconds
    pub display_duration_ms: u64,
    /// Length of the toast's exit animation, in milliseconds
    pub exit_animation_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            strategy: NotificationStrategy::Toast,
            display_duration_ms: 3_000,
            exit_animation_ms: 500,
        }
    }
}

impl NotificationConfig {
    /// Visible phase length.
    #[must_use]
    pub const fn display_duration(&self) -> Duration {
        Duration::from_millis(self.display_duration_ms)
    }

    /// Exit animation length.
    #[must_use]
    pub const fn exit_animation(&self) -> Duration {
        Duration::from_millis(self.exit_animation_ms)
    }
}

/// User-facing copy.
///
/// `{name}` and `{quantity}` are replaced in the confirmation templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagesConfig {
    /// Confirmation after adding one unit from a catalog card
    pub added: String,
    /// Confirmation after adding from a detail page
    pub added_with_quantity: String,
    /// Shown in place of line items when the cart is empty
    pub empty_cart: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            added: "{name} добавлен в корзину!".to_string(),
            added_with_quantity: "{name} ({quantity} шт.) добавлен в корзину!".to_string(),
            empty_cart: "Ваша корзина пуста.".to_string(),
        }
    }
}

impl MessagesConfig {
    /// Confirmation for a catalog add.
    #[must_use]
    pub fn added(&self, name: &str) -> String {
        self.added.replace("{name}", name)
    }

    /// Confirmation for a detail-page add.
    #[must_use]
    pub fn added_with_quantity(&self, name: &str, quantity: u32) -> String {
        self.added_with_quantity
            .replace("{name}", name)
            .replace("{quantity}", &quantity.to_string())
    }
}

/// Element ids and class names supplied by the host page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Id of the item-count badge
    pub cart_count: String,
    /// Id of the cart page's line-item container
    pub cart_items_container: String,
    /// Id of the cart page's total price display
    pub cart_total_price: String,
    /// Class of every add-to-cart control
    pub add_to_cart_button: String,
    /// Class marking a product detail page
    pub detail_page_marker: String,
    /// Class marking the cart page
    pub cart_page_marker: String,
    /// Id of the detail page's quantity display
    pub quantity_display: String,
    /// Id of the detail page's decrement control
    pub decrease_quantity: String,
    /// Id of the detail page's increment control
    pub increase_quantity: String,
    /// Id of the detail page's add-to-cart control
    pub add_to_cart_detail: String,
    /// Id given to the toast host container
    pub toast_container: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            cart_count: "cart-count".to_string(),
            cart_items_container: "cart-items-container".to_string(),
            cart_total_price: "cart-total-price".to_string(),
            add_to_cart_button: "add-to-cart-btn".to_string(),
            detail_page_marker: "product-detail-page-body".to_string(),
            cart_page_marker: "cart-page-body".to_string(),
            quantity_display: "product-quantity-display".to_string(),
            decrease_quantity: "decrease-quantity".to_string(),
            increase_quantity: "increase-quantity".to_string(),
            add_to_cart_detail: "add-to-cart-detail-btn".to_string(),
            toast_container: "toast-container".to_string(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the JSON is malformed or a setting fails
    /// validation.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check settings that would leave the runtime unusable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first bad setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "storage_key",
                "must not be empty".to_string(),
            ));
        }
        if self.price_format.max_fraction_digits > MAX_FRACTION_DIGITS {
            return Err(ConfigError::Invalid(
                "price_format.max_fraction_digits",
                format!(
                    "must be at most {MAX_FRACTION_DIGITS} (got {})",
                    self.price_format.max_fraction_digits
                ),
            ));
        }
        if self.notifications.strategy == NotificationStrategy::Toast
            && self.notifications.display_duration_ms == 0
        {
            return Err(ConfigError::Invalid(
                "notifications.display_duration_ms",
                "must be greater than zero for toasts".to_string(),
            ));
        }

        let selectors = [
            ("selectors.cart_count", &self.selectors.cart_count),
            (
                "selectors.cart_items_container",
                &self.selectors.cart_items_container,
            ),
            ("selectors.cart_total_price", &self.selectors.cart_total_price),
            (
                "selectors.add_to_cart_button",
                &self.selectors.add_to_cart_button,
            ),
            ("selectors.toast_container", &self.selectors.toast_container),
        ];
        for (name, value) in selectors {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(name, "must not be empty".to_string()));
            }
        }

        Ok(())
    }
}

/// Largest scale `rust_decimal` can represent.
const MAX_FRACTION_DIGITS: u32 = 28;
