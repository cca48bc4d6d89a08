//! Order service: order placement and lookup.

use std::time::Instant;

use common::{Decimal, Order, OrderId, ProductId};
use inventory_store::{OrderRepository, ProductRepository, StoreError};

use super::CreateOrder;
use crate::error::{DomainError, Result};
use crate::validate;

/// Service for placing and reading orders.
///
/// Placement is not one transaction. The product read, the stock decrement
/// and the order insert are separate store calls; only the decrement is
/// atomic. Two consequences callers must accept:
///
/// - A request can pass the stock pre-check and still lose the decrement to
///   a concurrent order. It then fails with `InsufficientStock`, which is a
///   normal outcome.
/// - If the order insert fails after the decrement committed, or the
///   placement future is dropped in between, the stock stays decremented
///   with no order recorded. Both are logged and counted in
///   `orders_unrecorded_total{cause}` for reconciliation; nothing is rolled
///   back.
pub struct OrderService<O: OrderRepository, P: ProductRepository> {
    orders: O,
    products: P,
}

impl<O: OrderRepository, P: ProductRepository> OrderService<O, P> {
    /// Creates a new order service.
    pub fn new(orders: O, products: P) -> Self {
        Self { orders, products }
    }

    /// Places an order, decrementing stock and snapshotting the total price.
    #[tracing::instrument(skip(self), fields(order_id))]
    pub async fn create_order(&self, cmd: CreateOrder) -> Result<Order> {
        let started = Instant::now();
        let result = self.place(cmd).await;

        match &result {
            Ok(order) => {
                tracing::Span::current().record("order_id", tracing::field::display(&order.id));
                metrics::counter!("orders_created_total").increment(1);
                metrics::histogram!("order_placement_duration_seconds")
                    .record(started.elapsed().as_secs_f64());
                tracing::info!(
                    order_id = %order.id,
                    product_id = %order.product_id,
                    quantity = order.quantity,
                    total_price = %order.total_price,
                    "order placed"
                );
            }
            Err(err) => {
                metrics::counter!("orders_rejected_total", "reason" => err.kind()).increment(1);
                tracing::warn!(error = %err, "order rejected");
            }
        }

        result
    }

    async fn place(&self, cmd: CreateOrder) -> Result<Order> {
        validate::non_blank_id("product", cmd.product_id.as_str())?;
        validate::positive_quantity(cmd.quantity)?;

        // 1. Observe the product; its price is the one the order is billed at
        let product = self.products.find_product_by_id(&cmd.product_id).await?;

        // 2. Cheap rejection before touching stock
        if product.stock < cmd.quantity {
            return Err(DomainError::InsufficientStock {
                product_id: product.id,
                requested: cmd.quantity,
            });
        }

        let total_price = product
            .price
            .checked_mul(Decimal::from(cmd.quantity))
            .ok_or_else(|| DomainError::validation("total price is out of range"))?;

        // 3. The atomic conditional decrement is what actually guards stock
        self.products
            .update_stock(&cmd.product_id, cmd.quantity)
            .await?;
        let guard = UnrecordedDecrement::arm(&cmd.product_id, cmd.quantity);

        let order = Order {
            id: OrderId::generate(),
            product_id: cmd.product_id,
            quantity: cmd.quantity,
            total_price,
        };

        // 4. Record. Stock is already gone if this fails or is cancelled.
        match self.orders.save_order(&order).await {
            Ok(()) => {
                guard.disarm();
                Ok(order)
            }
            Err(err) => {
                guard.save_failed(&err);
                Err(err.into())
            }
        }
    }

    /// Lists all orders.
    pub async fn find_all(&self) -> Result<Vec<Order>> {
        Ok(self.orders.find_all_orders().await?)
    }

    /// Loads an order by ID.
    #[tracing::instrument(skip(self))]
    pub async fn find_by_id(&self, id: &OrderId) -> Result<Order> {
        validate::non_blank_id("order", id.as_str())?;
        Ok(self.orders.find_order_by_id(id).await?)
    }
}

/// Reports a committed stock decrement that never got its order row.
///
/// Armed right after the decrement succeeds. Dropping it armed means the
/// placement future was cancelled (request timeout, client disconnect)
/// between the decrement and the order insert.
struct UnrecordedDecrement {
    product_id: ProductId,
    quantity: i32,
    armed: bool,
}

impl UnrecordedDecrement {
    fn arm(product_id: &ProductId, quantity: i32) -> Self {
        Self {
            product_id: product_id.clone(),
            quantity,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }

    fn save_failed(mut self, err: &StoreError) {
        self.armed = false;
        metrics::counter!("orders_unrecorded_total", "cause" => "save_failed").increment(1);
        tracing::error!(
            error = %err,
            product_id = %self.product_id,
            quantity = self.quantity,
            "stock decremented but order was not recorded"
        );
    }
}

impl Drop for UnrecordedDecrement {
    fn drop(&mut self) {
        if self.armed {
            metrics::counter!("orders_unrecorded_total", "cause" => "cancelled").increment(1);
            tracing::error!(
                product_id = %self.product_id,
                quantity = self.quantity,
                "order placement cancelled after stock was decremented"
            );
        }
    }
}
