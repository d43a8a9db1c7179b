//! Flash-deal storefront library.
//!
//! Assembles a discounted-product feed from a remote catalog, attaches a
//! competitor comparison price to every product, and keeps the shopper's
//! selections in an in-memory cart behind a terminal UI.

pub mod cart;
pub mod config;
pub mod error;
pub mod feed;
pub mod market;
pub mod models;
pub mod tui;

pub use error::{MercaditoError, Result};
