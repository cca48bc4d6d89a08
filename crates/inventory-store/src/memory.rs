use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    Order, OrderId, Product, ProductId, Result, StoreError,
    store::{OrderRepository, ProductRepository},
};

/// In-memory store implementation for testing and local development.
///
/// Provides the same contract as the PostgreSQL implementation: the stock
/// decrement checks and writes under a single write lock, and orders must
/// reference an existing product.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    products: Arc<RwLock<HashMap<ProductId, Product>>>,
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
    fail_on_save_order: Arc<AtomicBool>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures `save_order` to fail with `StoreError::Unavailable`.
    pub fn set_fail_on_save_order(&self, fail: bool) {
        self.fail_on_save_order.store(fail, Ordering::SeqCst);
    }

    /// Returns the number of stored products.
    pub async fn product_count(&self) -> usize {
        self.products.read().await.len()
    }

    /// Returns the number of stored orders.
    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }
}

#[async_trait]
impl ProductRepository for InMemoryStore {
    async fn save_product(&self, product: &Product) -> Result<()> {
        let mut products = self.products.write().await;
        match products.entry(product.id.clone()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateProduct(product.id.clone())),
            Entry::Vacant(slot) => {
                slot.insert(product.clone());
                Ok(())
            }
        }
    }

    async fn find_product_by_id(&self, id: &ProductId) -> Result<Product> {
        self.products
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::ProductNotFound(id.clone()))
    }

    async fn find_all_products(&self) -> Result<Vec<Product>> {
        Ok(self.products.read().await.values().cloned().collect())
    }

    async fn update_stock(&self, id: &ProductId, quantity: i32) -> Result<Product> {
        let mut products = self.products.write().await;
        let product = products
            .get_mut(id)
            .ok_or_else(|| StoreError::ProductNotFound(id.clone()))?;

        if product.stock < quantity {
            return Err(StoreError::InsufficientStock {
                product_id: id.clone(),
                requested: quantity,
            });
        }

        product.stock -= quantity;
        Ok(product.clone())
    }
}

#[async_trait]
impl OrderRepository for InMemoryStore {
    async fn save_order(&self, order: &Order) -> Result<()> {
        if self.fail_on_save_order.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "order table is not accepting writes".to_string(),
            ));
        }

        // Mirrors the foreign key on orders.product_id
        if !self.products.read().await.contains_key(&order.product_id) {
            return Err(StoreError::ProductNotFound(order.product_id.clone()));
        }

        let mut orders = self.orders.write().await;
        match orders.entry(order.id.clone()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateOrder(order.id.clone())),
            Entry::Vacant(slot) => {
                slot.insert(order.clone());
                Ok(())
            }
        }
    }

    async fn find_order_by_id(&self, id: &OrderId) -> Result<Order> {
        self.orders
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::OrderNotFound(id.clone()))
    }

    async fn find_all_orders(&self) -> Result<Vec<Order>> {
        Ok(self.orders.read().await.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use common::Decimal;

    use super::*;

    fn product(id: &str, stock: i32) -> Product {
        Product {
            id: ProductId::new(id),
            name: "Laptop".to_string(),
            price: Decimal::from(100),
            stock,
        }
    }

    #[tokio::test]
    async fn save_and_find_product() {
        let store = InMemoryStore::new();
        let saved = product("prod-1", 10);
        store.save_product(&saved).await.unwrap();

        let found = store.find_product_by_id(&saved.id).await.unwrap();
        assert_eq!(found, saved);
        assert_eq!(store.product_count().await, 1);
    }

    #[tokio::test]
    async fn duplicate_product_is_rejected() {
        let store = InMemoryStore::new();
        store.save_product(&product("prod-1", 10)).await.unwrap();

        let result = store.save_product(&product("prod-1", 3)).await;
        assert!(matches!(result, Err(StoreError::DuplicateProduct(_))));
        let kept = store
            .find_product_by_id(&ProductId::new("prod-1"))
            .await
            .unwrap();
        assert_eq!(kept.stock, 10);
    }

    #[tokio::test]
    async fn missing_product_is_not_found() {
        let store = InMemoryStore::new();
        let result = store.find_product_by_id(&ProductId::new("nope")).await;
        assert!(matches!(result, Err(StoreError::ProductNotFound(_))));
    }

    #[tokio::test]
    async fn update_stock_decrements_when_sufficient() {
        let store = InMemoryStore::new();
        store.save_product(&product("prod-1", 10)).await.unwrap();

        let updated = store
            .update_stock(&ProductId::new("prod-1"), 10)
            .await
            .unwrap();
        assert_eq!(updated.stock, 0);
    }

    #[tokio::test]
    async fn update_stock_leaves_stock_unchanged_when_insufficient() {
        let store = InMemoryStore::new();
        store.save_product(&product("prod-1", 1)).await.unwrap();

        let result = store.update_stock(&ProductId::new("prod-1"), 5).await;
        assert!(matches!(
            result,
            Err(StoreError::InsufficientStock { requested: 5, .. })
        ));

        let unchanged = store
            .find_product_by_id(&ProductId::new("prod-1"))
            .await
            .unwrap();
        assert_eq!(unchanged.stock, 1);
    }

    #[tokio::test]
    async fn update_stock_on_missing_product_is_not_found() {
        let store = InMemoryStore::new();
        let result = store.update_stock(&ProductId::new("ghost"), 1).await;
        assert!(matches!(result, Err(StoreError::ProductNotFound(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_decrements_never_oversell() {
        let store = InMemoryStore::new();
        store.save_product(&product("prod-1", 5)).await.unwrap();

        let handles: Vec<_> = (0..20)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.update_stock(&ProductId::new("prod-1"), 1).await })
            })
            .collect();

        let mut succeeded = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                succeeded += 1;
            }
        }

        assert_eq!(succeeded, 5);
        let product = store
            .find_product_by_id(&ProductId::new("prod-1"))
            .await
            .unwrap();
        assert_eq!(product.stock, 0);
    }

    #[tokio::test]
    async fn save_order_requires_existing_product() {
        let store = InMemoryStore::new();
        let order = Order {
            id: OrderId::new("ord-1"),
            product_id: ProductId::new("ghost"),
            quantity: 1,
            total_price: Decimal::from(10),
        };

        let result = store.save_order(&order).await;
        assert!(matches!(result, Err(StoreError::ProductNotFound(_))));
        assert_eq!(store.order_count().await, 0);
    }

    #[tokio::test]
    async fn save_and_find_order() {
        let store = InMemoryStore::new();
        store.save_product(&product("prod-1", 10)).await.unwrap();
        let order = Order {
            id: OrderId::new("ord-1"),
            product_id: ProductId::new("prod-1"),
            quantity: 2,
            total_price: Decimal::from(200),
        };

        store.save_order(&order).await.unwrap();

        assert_eq!(store.find_order_by_id(&order.id).await.unwrap(), order);
        assert_eq!(store.find_all_orders().await.unwrap(), vec![order]);
    }

    #[tokio::test]
    async fn injected_order_failure() {
        let store = InMemoryStore::new();
        store.save_product(&product("prod-1", 10)).await.unwrap();
        store.set_fail_on_save_order(true);

        let order = Order {
            id: OrderId::new("ord-1"),
            product_id: ProductId::new("prod-1"),
            quantity: 1,
            total_price: Decimal::from(100),
        };
        let result = store.save_order(&order).await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));

        store.set_fail_on_save_order(false);
        store.save_order(&order).await.unwrap();
        assert_eq!(store.order_count().await, 1);
    }
}
