use std::time::Duration;

use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgPoolOptions, postgres::PgRow};

use crate::{
    Order, OrderId, Product, ProductId, Result, StoreError,
    store::{OrderRepository, ProductRepository},
};

/// PostgreSQL-backed store implementation.
///
/// Cloning is cheap: clones share the same connection pool.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new PostgreSQL store over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects a new pool to `database_url`.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Closes the pool, waiting for checked-out connections to be returned.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    fn row_to_product(row: PgRow) -> Result<Product> {
        Ok(Product {
            id: ProductId::new(row.try_get::<String, _>("id")?),
            name: row.try_get("name")?,
            price: row.try_get("price")?,
            stock: row.try_get("stock")?,
        })
    }

    fn row_to_order(row: PgRow) -> Result<Order> {
        Ok(Order {
            id: OrderId::new(row.try_get::<String, _>("id")?),
            product_id: ProductId::new(row.try_get::<String, _>("product_id")?),
            quantity: row.try_get("quantity")?,
            total_price: row.try_get("total_price")?,
        })
    }

    async fn product_exists(&self, id: &ProductId) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
            .bind(id.as_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }
}

#[async_trait]
impl ProductRepository for PostgresStore {
    async fn save_product(&self, product: &Product) -> Result<()> {
        sqlx::query("INSERT INTO products (id, name, price, stock) VALUES ($1, $2, $3, $4)")
            .bind(product.id.as_str())
            .bind(&product.name)
            .bind(product.price)
            .bind(product.stock)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_unique_violation()
                {
                    return StoreError::DuplicateProduct(product.id.clone());
                }
                StoreError::Database(e)
            })?;

        Ok(())
    }

    async fn find_product_by_id(&self, id: &ProductId) -> Result<Product> {
        let row: Option<PgRow> =
            sqlx::query("SELECT id, name, price, stock FROM products WHERE id = $1")
                .bind(id.as_str())
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some(row) => Self::row_to_product(row),
            None => Err(StoreError::ProductNotFound(id.clone())),
        }
    }

    async fn find_all_products(&self) -> Result<Vec<Product>> {
        let rows = sqlx::query("SELECT id, name, price, stock FROM products")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Self::row_to_product).collect()
    }

    #[tracing::instrument(skip(self))]
    async fn update_stock(&self, id: &ProductId, quantity: i32) -> Result<Product> {
        // Check and write in one statement: no read-modify-write window
        let row: Option<PgRow> = sqlx::query(
            r#"
            UPDATE products
            SET stock = stock - $2
            WHERE id = $1 AND stock >= $2
            RETURNING id, name, price, stock
            "#,
        )
        .bind(id.as_str())
        .bind(quantity)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            return Self::row_to_product(row);
        }

        // Zero rows: the write already failed, this only picks the error
        if self.product_exists(id).await? {
            tracing::debug!(product_id = %id, quantity, "conditional decrement rejected");
            Err(StoreError::InsufficientStock {
                product_id: id.clone(),
                requested: quantity,
            })
        } else {
            Err(StoreError::ProductNotFound(id.clone()))
        }
    }
}

#[async_trait]
impl OrderRepository for PostgresStore {
    async fn save_order(&self, order: &Order) -> Result<()> {
        sqlx::query(
            "INSERT INTO orders (id, product_id, quantity, total_price) VALUES ($1, $2, $3, $4)",
        )
        .bind(order.id.as_str())
        .bind(order.product_id.as_str())
        .bind(order.quantity)
        .bind(order.total_price)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.is_unique_violation() {
                    return StoreError::DuplicateOrder(order.id.clone());
                }
                if db_err.is_foreign_key_violation() {
                    return StoreError::ProductNotFound(order.product_id.clone());
                }
            }
            StoreError::Database(e)
        })?;

        Ok(())
    }

    async fn find_order_by_id(&self, id: &OrderId) -> Result<Order> {
        let row: Option<PgRow> = sqlx::query(
            "SELECT id, product_id, quantity, total_price FROM orders WHERE id = $1",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Self::row_to_order(row),
            None => Err(StoreError::OrderNotFound(id.clone())),
        }
    }

    async fn find_all_orders(&self) -> Result<Vec<Order>> {
        let rows = sqlx::query("SELECT id, product_id, quantity, total_price FROM orders")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Self::row_to_order).collect()
    }
}
