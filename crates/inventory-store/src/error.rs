use thiserror::Error;

use crate::{OrderId, ProductId};

/// Errors that can occur when interacting with the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No product with the given identifier exists.
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    /// No order with the given identifier exists.
    #[error("order not found: {0}")]
    OrderNotFound(OrderId),

    /// The conditional decrement matched no row because the product holds
    /// less stock than requested.
    #[error("insufficient stock for product {product_id}: requested {requested}")]
    InsufficientStock {
        product_id: ProductId,
        requested: i32,
    },

    /// A product with this identifier already exists.
    #[error("product already exists: {0}")]
    DuplicateProduct(ProductId),

    /// An order with this identifier already exists.
    #[error("order already exists: {0}")]
    DuplicateOrder(OrderId),

    /// The store refused the operation without a database error.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
