//! End-to-end page scenarios for Cartkeeper.
//!
//! Builds host pages the way the shop's templates lay them out, so tests can
//! load a [`PageSession`](cartkeeper_storefront::PageSession) and click
//! through it.
//!
//! # Test Categories
//!
//! - `catalog_page` - Add-to-cart buttons on product cards
//! - `detail_page` - Quantity stepper and detail add-to-cart
//! - `cart_page` - Line item rendering and delegated controls
//! - `notifications` - Dialog and toast confirmations
//! - `persistence` - Cart survival across page loads

use cartkeeper_storefront::StorefrontConfig;
use cartkeeper_storefront::config::{NotificationConfig, NotificationStrategy};
use cartkeeper_storefront::dom::{Document, Element, NodeId};

/// A product as the page's markup describes it.
#[derive(Debug, Clone, Copy)]
pub struct Product<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub price: &'a str,
    pub image: &'a str,
}

pub const KETTLE: Product<'static> = Product {
    id: "p1",
    name: "Чайник",
    price: "1500",
    image: "/static/img/kettle.jpg",
};

pub const MUG: Product<'static> = Product {
    id: "p2",
    name: "Кружка",
    price: "349.5",
    image: "/static/img/mug.jpg",
};

pub const TEAPOT: Product<'static> = Product {
    id: "p3",
    name: "Заварник",
    price: "2490.99",
    image: "/static/img/teapot.jpg",
};

impl Product<'_> {
    /// Tag an element with this product's `data-*` attributes.
    #[must_use]
    pub fn tag(&self, element: Element) -> Element {
        element
            .with_data("product-id", self.id)
            .with_data("product-name", self.name)
            .with_data("product-price", self.price)
            .with_data("product-image", self.image)
    }
}

/// Header shared by every page: navigation with the cart badge.
#[derive(Debug)]
pub struct Header {
    pub badge: NodeId,
}

fn header(doc: &mut Document) -> Header {
    let nav = doc.append(Element::new("nav"));
    let link = doc.append_child(nav, Element::new("a").with_class("cart-link"));
    let badge = doc.append_child(link, Element::new("span").with_id("cart-count"));
    Header { badge }
}

/// Catalog page: a grid of linked product cards.
#[derive(Debug)]
pub struct CatalogPage {
    pub document: Document,
    pub header: Header,
    pub buttons: Vec<NodeId>,
}

/// Build a catalog page with one card per product.
#[must_use]
pub fn catalog_page(products: &[Product<'_>]) -> CatalogPage {
    let mut document = Document::new();
    let header = header(&mut document);
    let grid = document.append(Element::new("main").with_class("product-grid"));

    let buttons = products
        .iter()
        .map(|product| {
            let card = document.append_child(grid, Element::new("a").with_class("product-card"));
            document.append_child(card, Element::new("h3").with_text(product.name));
            document.append_child(
                card,
                product.tag(Element::new("button").with_class("add-to-cart-btn")),
            )
        })
        .collect();

    CatalogPage {
        document,
        header,
        buttons,
    }
}

/// Product detail page.
#[derive(Debug)]
pub struct DetailPage {
    pub document: Document,
    pub header: Header,
    pub display: NodeId,
    pub decrease: NodeId,
    pub increase: NodeId,
    pub add: NodeId,
}

/// Build a detail page for `product` with the display showing `initial`.
#[must_use]
pub fn detail_page(product: Product<'_>, initial: &str) -> DetailPage {
    let mut document = Document::new();
    let body = document.body();
    if let Some(el) = document.get_mut(body) {
        el.add_class("product-detail-page-body");
    }
    let header = header(&mut document);
    let stepper = document.append(Element::new("div").with_class("quantity-selector"));
    let decrease = document.append_child(stepper, Element::new("button").with_id("decrease-quantity"));
    let display = document.append_child(
        stepper,
        Element::new("span")
            .with_id("product-quantity-display")
            .with_text(initial),
    );
    let increase = document.append_child(stepper, Element::new("button").with_id("increase-quantity"));
    let add = document.append(product.tag(Element::new("button").with_id("add-to-cart-detail-btn")));

    DetailPage {
        document,
        header,
        display,
        decrease,
        increase,
        add,
    }
}

/// Cart page.
#[derive(Debug)]
pub struct CartPage {
    pub document: Document,
    pub header: Header,
    pub container: NodeId,
    pub total: NodeId,
}

/// Build an empty cart page.
#[must_use]
pub fn cart_page() -> CartPage {
    let mut document = Document::new();
    let body = document.body();
    if let Some(el) = document.get_mut(body) {
        el.add_class("cart-page-body");
    }
    let header = header(&mut document);
    let container = document.append(Element::new("div").with_id("cart-items-container"));
    let summary = document.append(Element::new("div").with_class("cart-summary"));
    let total = document.append_child(summary, Element::new("span").with_id("cart-total-price"));

    CartPage {
        document,
        header,
        container,
        total,
    }
}

/// Default configuration with blocking dialogs instead of toasts.
#[must_use]
pub fn dialog_config() -> StorefrontConfig {
    StorefrontConfig {
        notifications: NotificationConfig {
            strategy: NotificationStrategy::Dialog,
            ..NotificationConfig::default()
        },
        ..StorefrontConfig::default()
    }
}
