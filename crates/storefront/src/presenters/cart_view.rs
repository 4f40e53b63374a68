//! Cart page rendering and delegated controls.
//!
//! The cart page has a line-item container and a total-price element. On
//! every render the container's content is rebuilt from the cart through an
//! Askama template. Row controls are plain buttons tagged with
//! `data-product-id`; one listener on the container maps a click to a
//! [`CartCommand`] through [`command_for_target`], so re-rendering never has
//! to attach or detach per-row listeners.

use askama::Template;
use cartkeeper_core::{Cart, CartCommand, LineItem, PriceFormat, ProductId};

use crate::dom::{Document, EventTarget};
use crate::error::Result;

/// Class of the per-row decrement button.
pub const QUANTITY_MINUS: &str = "quantity-minus";
/// Class of the per-row increment button.
pub const QUANTITY_PLUS: &str = "quantity-plus";
/// Class of the per-row remove button.
pub const ITEM_REMOVE: &str = "cart-item-remove";
/// Data attribute carrying the product id on row controls.
pub const PRODUCT_ID_ATTR: &str = "product-id";

/// Line item display data for templates.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
}

/// Cart display data for templates.
#[derive(Debug, Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
}

impl CartView {
    /// Build display data with prices formatted by `format`.
    #[must_use]
    pub fn from_cart(cart: &Cart, format: &PriceFormat) -> Self {
        Self {
            items: cart
                .iter()
                .map(|item| CartItemView::from_line(item, format))
                .collect(),
            total: format.format(cart.total_price()),
        }
    }
}

impl CartItemView {
    fn from_line(item: &LineItem, format: &PriceFormat) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            image: item.image.clone(),
            quantity: item.quantity.get(),
            price: format.format_price(item.price),
        }
    }
}

/// Cart line items fragment.
#[derive(Template)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate<'a> {
    pub cart: &'a CartView,
    pub empty_message: &'a str,
}

/// Element ids the renderer writes to.
#[derive(Debug, Clone, Copy)]
pub struct CartPageTargets<'a> {
    pub container_id: &'a str,
    pub total_id: &'a str,
}

/// Rebuild the cart page's line items and total.
///
/// Returns `Ok(false)` without touching the page unless both the container
/// and the total element exist.
///
/// # Errors
///
/// Returns `AppError::Render` if the template fails to render.
pub fn render_cart(
    document: &mut Document,
    targets: CartPageTargets<'_>,
    cart: &Cart,
    format: &PriceFormat,
    empty_message: &str,
) -> Result<bool> {
    let (Some(container), Some(total)) = (
        document.get_element_by_id(targets.container_id),
        document.get_element_by_id(targets.total_id),
    ) else {
        return Ok(false);
    };

    let view = CartView::from_cart(cart, format);
    let html = CartItemsTemplate {
        cart: &view,
        empty_message,
    }
    .render()?;

    document.set_inner_html(container, html);
    document.set_text(total, view.total);
    tracing::trace!(items = view.items.len(), "cart rendered");
    Ok(true)
}

/// Map a click inside the cart container to a cart command.
///
/// Clicks on anything other than a row control, or on a control without a
/// usable product id, yield `None`.
#[must_use]
pub fn command_for_target(target: &EventTarget) -> Option<CartCommand> {
    let id = ProductId::parse(target.data(PRODUCT_ID_ATTR)?).ok()?;

    if target.has_class(QUANTITY_MINUS) {
        Some(CartCommand::ChangeQuantity { id, delta: -1 })
    } else if target.has_class(QUANTITY_PLUS) {
        Some(CartCommand::ChangeQuantity { id, delta: 1 })
    } else if target.has_class(ITEM_REMOVE) {
        Some(CartCommand::Remove { id })
    } else {
        None
    }
}
