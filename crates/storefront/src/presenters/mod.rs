//! Presenters that project the cart onto the host document.
//!
//! - [`badge`] - Item-count badge
//! - [`cart_view`] - Cart page line items, total, and delegated controls
//! - [`notification`] - Add-to-cart confirmations (dialog or toast)
//!
//! Presenters read the cart and write to the [`Document`](crate::dom::Document);
//! a missing element makes them a no-op.

pub mod badge;
pub mod cart_view;
pub mod notification;

pub use badge::refresh_badge;
pub use cart_view::{
    CartItemView, CartItemsTemplate, CartPageTargets, CartView, ITEM_REMOVE, PRODUCT_ID_ATTR,
    QUANTITY_MINUS, QUANTITY_PLUS, command_for_target, render_cart,
};
pub use notification::{NotificationTask, Notifier, ToastId, ToastPhase};
