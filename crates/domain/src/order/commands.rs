//! Commands accepted by the order workflow.

use common::ProductId;

/// Places an order for `quantity` units of one product.
#[derive(Debug, Clone)]
pub struct CreateOrder {
    pub product_id: ProductId,
    pub quantity: i32,
}

impl CreateOrder {
    /// Creates a new CreateOrder command.
    pub fn new(product_id: impl Into<ProductId>, quantity: i32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}
