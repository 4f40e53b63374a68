//! Interaction controller.
//!
//! Binds the host page's controls once at load and turns clicks on them into
//! [`Interaction`]s for the page session:
//!
//! - every add-to-cart control (catalog cards) adds one unit
//! - on a product detail page, a quantity stepper (floored at one) and an
//!   add-to-cart control that adds the selected quantity
//!
//! Controls are read, never created. Product data comes from the control's
//! `data-product-id`, `data-product-name`, `data-product-price`, and
//! `data-product-image` attributes.

use cartkeeper_core::{CartCommand, Price, PriceError, ProductId, ProductIdError, Quantity};
use thiserror::Error;
use tracing::debug;

use crate::config::SelectorConfig;
use crate::dom::{Document, Element, NodeId};
use crate::error::AppError;

/// Errors reading product data from a control.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductDataError {
    #[error("missing data-{0} attribute")]
    MissingAttribute(&'static str),
    #[error("invalid product id: {0}")]
    InvalidId(#[from] ProductIdError),
    #[error("invalid product price: {0}")]
    InvalidPrice(#[from] PriceError),
}

/// Which control an add came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddSource {
    /// A catalog card's add-to-cart button (one unit).
    Catalog,
    /// The detail page's add-to-cart button (selected quantity).
    Detail,
}

/// What a click on a bound control means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    /// Add a product to the cart and confirm it.
    AddToCart {
        command: CartCommand,
        name: String,
        quantity: Quantity,
        source: AddSource,
    },
    /// The detail page's selected quantity changed.
    QuantitySelected(Quantity),
    /// A bound control carried unusable product data.
    Rejected(ProductDataError),
    /// The element is not a bound control.
    Unbound,
}

/// Result of a click, including what the host should do with the event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickOutcome {
    pub interaction: Interaction,
    /// The host should cancel the default action (e.g. following a link).
    pub default_prevented: bool,
    /// The host should not bubble the click further (e.g. to a card link).
    pub propagation_stopped: bool,
}

impl ClickOutcome {
    const fn passive(interaction: Interaction) -> Self {
        Self {
            interaction,
            default_prevented: false,
            propagation_stopped: false,
        }
    }
}

/// Page flavors, detected from marker classes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageKind {
    pub detail: bool,
    pub cart: bool,
}

impl PageKind {
    /// Detect the page kind from the document's marker classes.
    #[must_use]
    pub fn detect(document: &Document, selectors: &SelectorConfig) -> Self {
        Self {
            detail: document.contains_class(&selectors.detail_page_marker),
            cart: document.contains_class(&selectors.cart_page_marker),
        }
    }
}

#[derive(Debug, Clone)]
struct DetailControls {
    display: NodeId,
    decrease: NodeId,
    increase: NodeId,
    add: NodeId,
    quantity: Quantity,
}

/// Controls bound at page load.
#[derive(Debug, Clone)]
pub struct Controller {
    add_buttons: Vec<NodeId>,
    detail: Option<DetailControls>,
}

impl Controller {
    /// Discover and bind the page's controls.
    #[must_use]
    pub fn bind(document: &Document, selectors: &SelectorConfig, kind: PageKind) -> Self {
        let add_buttons = document.elements_by_class(&selectors.add_to_cart_button);
        let detail = if kind.detail {
            match bind_detail(document, selectors) {
                Ok(detail) => Some(detail),
                Err(e) => {
                    e.report("Detail page stepper not bound");
                    None
                }
            }
        } else {
            None
        };
        debug!(
            add_buttons = add_buttons.len(),
            detail = detail.is_some(),
            "controls bound"
        );
        Self {
            add_buttons,
            detail,
        }
    }

    /// Number of bound catalog add-to-cart controls.
    #[must_use]
    pub fn add_button_count(&self) -> usize {
        self.add_buttons.len()
    }

    /// The detail page's currently selected quantity.
    #[must_use]
    pub fn selected_quantity(&self) -> Option<Quantity> {
        self.detail.as_ref().map(|detail| detail.quantity)
    }

    /// Handle a click on `node`.
    ///
    /// Stepper clicks update the quantity display directly.
    pub fn click(&mut self, document: &mut Document, node: NodeId) -> ClickOutcome {
        if let Some(detail) = self.detail.as_mut() {
            if node == detail.decrease {
                detail.quantity = detail.quantity.decrement_floored();
                document.set_text(detail.display, detail.quantity.to_string());
                return ClickOutcome::passive(Interaction::QuantitySelected(detail.quantity));
            }
            if node == detail.increase {
                detail.quantity = detail.quantity.increment();
                document.set_text(detail.display, detail.quantity.to_string());
                return ClickOutcome::passive(Interaction::QuantitySelected(detail.quantity));
            }
            if node == detail.add {
                let quantity = detail.quantity;
                return ClickOutcome::passive(add_interaction(
                    document.get(node),
                    quantity,
                    AddSource::Detail,
                ));
            }
        }

        if self.add_buttons.contains(&node) {
            return ClickOutcome {
                interaction: add_interaction(document.get(node), Quantity::ONE, AddSource::Catalog),
                default_prevented: true,
                propagation_stopped: true,
            };
        }

        ClickOutcome::passive(Interaction::Unbound)
    }
}

fn bind_detail(document: &Document, selectors: &SelectorConfig) -> Result<DetailControls, AppError> {
    let find = |id: &str| {
        document
            .get_element_by_id(id)
            .ok_or_else(|| AppError::MissingElement(format!("#{id}")))
    };

    let display = find(&selectors.quantity_display)?;
    let decrease = find(&selectors.decrease_quantity)?;
    let increase = find(&selectors.increase_quantity)?;
    let add = find(&selectors.add_to_cart_detail)?;

    let quantity = document
        .get(display)
        .and_then(|el| el.text.trim().parse::<u32>().ok())
        .and_then(Quantity::new)
        .unwrap_or(Quantity::ONE);

    Ok(DetailControls {
        display,
        decrease,
        increase,
        add,
        quantity,
    })
}

fn add_interaction(element: Option<&Element>, quantity: Quantity, source: AddSource) -> Interaction {
    let Some(element) = element else {
        return Interaction::Unbound;
    };
    match read_product(element, quantity) {
        Ok((command, name)) => Interaction::AddToCart {
            command,
            name,
            quantity,
            source,
        },
        Err(e) => Interaction::Rejected(e),
    }
}

/// Build an add command from a control's data attributes.
///
/// The id and price are required; a missing name or image becomes empty.
///
/// # Errors
///
/// Returns `ProductDataError` if the id or price is missing or invalid.
pub fn read_product(
    element: &Element,
    quantity: Quantity,
) -> Result<(CartCommand, String), ProductDataError> {
    let id = element
        .data("product-id")
        .ok_or(ProductDataError::MissingAttribute("product-id"))?;
    let price = element
        .data("product-price")
        .ok_or(ProductDataError::MissingAttribute("product-price"))?;
    let name = element.data("product-name").unwrap_or_default().to_string();
    let image = element.data("product-image").unwrap_or_default().to_string();

    let command = CartCommand::AddItem {
        id: ProductId::parse(id)?,
        name: name.clone(),
        price: Price::parse(price)?,
        image,
        quantity,
    };
    Ok((command, name))
}
