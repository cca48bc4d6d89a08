//! Product service: creation, lookup, and manual stock decrements.

use common::{Decimal, Product, ProductId};
use inventory_store::ProductRepository;

use super::{CreateProduct, UpdateStock};
use crate::error::{DomainError, Result};
use crate::validate;

/// Service for managing products.
///
/// Stock can only be decremented: there is no replenishment operation.
pub struct ProductService<S: ProductRepository> {
    store: S,
}

impl<S: ProductRepository> ProductService<S> {
    /// Creates a new product service over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validates and persists a new product under a freshly generated ID.
    ///
    /// Stock must be at least 1 and the price must not be negative; invalid
    /// input never reaches the store.
    #[tracing::instrument(skip(self), fields(product_id))]
    pub async fn create_product(&self, cmd: CreateProduct) -> Result<Product> {
        if cmd.stock < 1 {
            return Err(DomainError::validation("stock must be greater than 0"));
        }
        if cmd.price < Decimal::ZERO {
            return Err(DomainError::validation("price must not be negative"));
        }

        let product = Product {
            id: ProductId::generate(),
            name: cmd.name,
            price: cmd.price,
            stock: cmd.stock,
        };
        tracing::Span::current().record("product_id", tracing::field::display(&product.id));

        self.store.save_product(&product).await?;
        tracing::info!(product_id = %product.id, stock = product.stock, "product created");
        Ok(product)
    }

    /// Loads a product by ID.
    #[tracing::instrument(skip(self))]
    pub async fn find_product_by_id(&self, id: &ProductId) -> Result<Product> {
        validate::non_blank_id("product", id.as_str())?;
        Ok(self.store.find_product_by_id(id).await?)
    }

    /// Lists all products.
    pub async fn find_all(&self) -> Result<Vec<Product>> {
        Ok(self.store.find_all_products().await?)
    }

    /// Decrements a product's stock through the store's atomic conditional
    /// decrement and returns the updated product.
    #[tracing::instrument(skip(self))]
    pub async fn update_stock(&self, cmd: UpdateStock) -> Result<Product> {
        validate::non_blank_id("product", cmd.product_id.as_str())?;
        validate::positive_quantity(cmd.quantity)?;

        match self.store.update_stock(&cmd.product_id, cmd.quantity).await {
            Ok(product) => {
                metrics::counter!("stock_updates_total", "outcome" => "applied").increment(1);
                Ok(product)
            }
            Err(err) => {
                let err = DomainError::from(err);
                metrics::counter!("stock_updates_total", "outcome" => err.kind()).increment(1);
                Err(err)
            }
        }
    }
}
