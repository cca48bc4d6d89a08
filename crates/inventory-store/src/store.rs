use async_trait::async_trait;

use crate::{Order, OrderId, Product, ProductId, Result};

/// Persistence capability for products.
///
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Inserts a new product.
    ///
    /// Fails with `DuplicateProduct` if the identifier is already taken.
    async fn save_product(&self, product: &Product) -> Result<()>;

    /// Retrieves a product, failing with `ProductNotFound` if absent.
    async fn find_product_by_id(&self, id: &ProductId) -> Result<Product>;

    /// Retrieves all products. Order is unspecified.
    async fn find_all_products(&self) -> Result<Vec<Product>>;

    /// Atomically subtracts `quantity` from the product's stock, only if the
    /// current stock is at least `quantity`, and returns the updated product.
    ///
    /// The check and the write are one indivisible operation: concurrent
    /// callers can never both observe sufficient stock and both succeed when
    /// only one should. Fails with `InsufficientStock` when the condition is
    /// not met (stock is left unchanged) or `ProductNotFound` when no such
    /// product exists.
    async fn update_stock(&self, id: &ProductId, quantity: i32) -> Result<Product>;
}

/// Persistence capability for orders.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Inserts a new order.
    ///
    /// Fails with `DuplicateOrder` if the identifier is already taken, or
    /// `ProductNotFound` if the referenced product does not exist.
    async fn save_order(&self, order: &Order) -> Result<()>;

    /// Retrieves an order, failing with `OrderNotFound` if absent.
    async fn find_order_by_id(&self, id: &OrderId) -> Result<Order>;

    /// Retrieves all orders. Order is unspecified.
    async fn find_all_orders(&self) -> Result<Vec<Order>>;
}

/// A store that persists both products and orders and can be shared
/// across request tasks by cloning.
pub trait InventoryStore: ProductRepository + OrderRepository + Clone + 'static {}

// Blanket implementation for every type providing both capabilities
impl<T> InventoryStore for T where T: ProductRepository + OrderRepository + Clone + 'static {}
