//! Domain error types.

use common::ProductId;
use inventory_store::StoreError;
use thiserror::Error;

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The request was malformed or violated an input rule.
    #[error("{0}")]
    Validation(String),

    /// No matching product or order exists.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The product holds less stock than requested.
    #[error("insufficient stock for product {product_id}: requested {requested}")]
    InsufficientStock {
        product_id: ProductId,
        requested: i32,
    },

    /// An identifier collided with an existing record.
    #[error("{0}")]
    Conflict(String),

    /// The store failed for reasons unrelated to the request.
    #[error("storage error: {0}")]
    Storage(StoreError),
}

impl DomainError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation(message.into())
    }

    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::Validation(_) => "validation",
            DomainError::NotFound { .. } => "not_found",
            DomainError::InsufficientStock { .. } => "insufficient_stock",
            DomainError::Conflict(_) => "conflict",
            DomainError::Storage(_) => "storage",
        }
    }
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ProductNotFound(id) => DomainError::NotFound {
                entity: "product",
                id: id.to_string(),
            },
            StoreError::OrderNotFound(id) => DomainError::NotFound {
                entity: "order",
                id: id.to_string(),
            },
            StoreError::InsufficientStock {
                product_id,
                requested,
            } => DomainError::InsufficientStock {
                product_id,
                requested,
            },
            err @ (StoreError::DuplicateProduct(_) | StoreError::DuplicateOrder(_)) => {
                DomainError::Conflict(err.to_string())
            }
            other => DomainError::Storage(other),
        }
    }
}

/// Result type for domain operations.
pub type Result<T> = std::result::Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use common::OrderId;

    use super::*;

    #[test]
    fn store_not_found_maps_to_not_found() {
        let err: DomainError = StoreError::ProductNotFound(ProductId::new("prod-1")).into();
        assert!(matches!(
            err,
            DomainError::NotFound {
                entity: "product",
                ..
            }
        ));
        assert_eq!(err.to_string(), "product not found: prod-1");

        let err: DomainError = StoreError::OrderNotFound(OrderId::new("ord-1")).into();
        assert_eq!(err.to_string(), "order not found: ord-1");
    }

    #[test]
    fn store_insufficient_stock_is_preserved() {
        let err: DomainError = StoreError::InsufficientStock {
            product_id: ProductId::new("prod-1"),
            requested: 3,
        }
        .into();
        assert!(matches!(
            err,
            DomainError::InsufficientStock { requested: 3, .. }
        ));
        assert_eq!(err.kind(), "insufficient_stock");
    }

    #[test]
    fn duplicates_become_conflicts() {
        let err: DomainError = StoreError::DuplicateOrder(OrderId::new("ord-1")).into();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn other_store_errors_are_storage() {
        let err: DomainError = StoreError::Unavailable("down".to_string()).into();
        assert!(matches!(err, DomainError::Storage(_)));
        assert_eq!(err.to_string(), "storage error: store unavailable: down");
    }
}
