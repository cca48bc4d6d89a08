//! Domain layer for the inventory system.
//!
//! This crate provides the workflows that sit between the HTTP surface and
//! the persistence gateway:
//! - [`ProductService`]: product creation, lookup, and manual stock decrements
//! - [`OrderService`]: order placement (check, conditional decrement, price
//!   snapshot, record) and order lookup
//! - [`DomainError`]: the error taxonomy every layer above the store sees

pub mod error;
pub mod order;
pub mod product;
mod validate;

pub use error::{DomainError, Result};
pub use order::{CreateOrder, OrderService};
pub use product::{CreateProduct, ProductService, UpdateStock};
