//! Shared identifiers and records used by every layer of the inventory system.

pub mod model;
pub mod types;

pub use model::{Order, Product};
pub use rust_decimal::Decimal;
pub use types::{OrderId, ProductId};
