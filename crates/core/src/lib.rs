//! Cartkeeper Core - Shared cart types library.
//!
//! This crate provides the types used by every Cartkeeper component:
//! - `storefront` - Page-side cart runtime (store, presenters, controller)
//! - `integration-tests` - Whole-page scenarios
//!
//! # Architecture
//!
//! The core crate contains only types and the cart state machine - no I/O,
//! no storage access, no document manipulation. This keeps it lightweight
//! and lets the cart rules be tested on their own.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, and quantities
//! - [`cart`] - The ordered line-item list and the commands that mutate it

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{Cart, CartChange, CartCommand};
pub use types::*;
