//! Product and order records as stored and as exchanged over the API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{OrderId, ProductId};

/// A stocked product.
///
/// `stock` is never negative once persisted: it only changes through the
/// store's conditional decrement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price. Serialized as a JSON number.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock: i32,
}

/// A placed order for a single product.
///
/// `total_price` is the unit price observed when the order was placed times
/// `quantity`. It is never recomputed from the product's current price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub product_id: ProductId,
    pub quantity: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
}
