//! Commands accepted by the product workflow.

use common::{Decimal, ProductId};

/// Creates a new product. The identifier is assigned by the workflow.
#[derive(Debug, Clone)]
pub struct CreateProduct {
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
}

impl CreateProduct {
    /// Creates a new CreateProduct command.
    pub fn new(name: impl Into<String>, price: Decimal, stock: i32) -> Self {
        Self {
            name: name.into(),
            price,
            stock,
        }
    }
}

/// Removes `quantity` units from a product's stock.
#[derive(Debug, Clone)]
pub struct UpdateStock {
    pub product_id: ProductId,
    pub quantity: i32,
}

impl UpdateStock {
    /// Creates a new UpdateStock command.
    pub fn new(product_id: impl Into<ProductId>, quantity: i32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}
