//! Cartkeeper storefront cart runtime.
//!
//! Everything a shop page needs to keep a cart: the [`store`] that owns it,
//! [`persistence`] over a [`storage`] backend, [`presenters`] that project it
//! onto the host [`dom`], the [`controller`] that binds page controls, and
//! the [`page`] session that wires them together on page load.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod controller;
pub mod dom;
pub mod error;
pub mod page;
pub mod persistence;
pub mod presenters;
pub mod storage;
pub mod store;
pub mod telemetry;

pub use config::StorefrontConfig;
pub use error::{AppError, Result};
pub use page::PageSession;
pub use store::CartStore;
