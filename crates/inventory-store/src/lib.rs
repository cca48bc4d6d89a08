//! Persistence gateway for the inventory system.
//!
//! Defines the repository capabilities ([`ProductRepository`],
//! [`OrderRepository`]) and two implementations: [`PostgresStore`] for
//! production and [`InMemoryStore`] for tests and local development.
//!
//! The stock decrement is the one operation with a concurrency contract: it
//! must be a single conditional write so that concurrent callers can never
//! drive stock below zero.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

pub use common::{Order, OrderId, Product, ProductId};
pub use error::{Result, StoreError};
pub use memory::InMemoryStore;
pub use postgres::PostgresStore;
pub use store::{InventoryStore, OrderRepository, ProductRepository};
