//! Property tests for saving and reloading carts through storage.

#![allow(clippy::unwrap_used)]

use cartkeeper_core::{Cart, CartCommand, Price, ProductId, Quantity};
use cartkeeper_storefront::persistence::CartPersistence;
use cartkeeper_storefront::storage::{FileStorage, MemoryStorage};
use proptest::prelude::*;
use rust_decimal::Decimal;

// =============================================================================
// Strategies
// =============================================================================

fn arb_price() -> impl Strategy<Value = Price> {
    (any::<u32>(), any::<u32>(), any::<u32>(), 0u32..=28)
        .prop_map(|(lo, mid, hi, scale)| Price::new(Decimal::from_parts(lo, mid, hi, false, scale)).unwrap())
}

fn arb_add() -> impl Strategy<Value = CartCommand> {
    ("[a-z0-9-]{1,8}", "\\PC{0,12}", arb_price(), 1u32..100).prop_map(|(id, name, price, quantity)| {
        CartCommand::AddItem {
            id: ProductId::parse(id).unwrap(),
            name,
            price,
            image: String::new(),
            quantity: Quantity::new(quantity).unwrap(),
        }
    })
}

fn arb_cart() -> impl Strategy<Value = Cart> {
    prop::collection::vec(arb_add(), 0..20).prop_map(|commands| {
        let mut cart = Cart::new();
        for command in commands {
            cart.apply(command);
        }
        cart
    })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn memory_reload_reproduces_cart(cart in arb_cart()) {
        let mut persistence = CartPersistence::new(MemoryStorage::new(), "cart");
        persistence.save(&cart).unwrap();

        let loaded = persistence.try_load().unwrap().unwrap();
        prop_assert_eq!(loaded.items(), cart.items());
    }

    #[test]
    fn file_reload_reproduces_cart(cart in arb_cart()) {
        let dir = tempfile::TempDir::new().unwrap();
        let storage = FileStorage::open(dir.path(), "https://shop.example").unwrap();
        let mut persistence = CartPersistence::new(storage, "cart");
        persistence.save(&cart).unwrap();

        let reopened = FileStorage::open(dir.path(), "https://shop.example").unwrap();
        let loaded = CartPersistence::new(reopened, "cart").load();
        prop_assert_eq!(loaded, cart);
    }
}
