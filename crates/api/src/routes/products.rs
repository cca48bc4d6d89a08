//! Product endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::{Decimal, Product, ProductId};
use domain::{CreateProduct, UpdateStock};
use inventory_store::InventoryStore;
use serde::Deserialize;

use super::json_body;
use crate::AppState;
use crate::error::ApiError;

// -- Request types --

#[derive(Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock: i32,
}

#[derive(Deserialize)]
pub struct UpdateStockRequest {
    pub quantity: i32,
}

// -- Handlers --

/// POST /products — create a product with a generated ID.
#[tracing::instrument(skip(state, payload))]
pub async fn create<S: InventoryStore>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let req = json_body(payload)?;
    let product = state
        .products
        .create_product(CreateProduct::new(req.name, req.price, req.stock))
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /products — list all products.
#[tracing::instrument(skip(state))]
pub async fn list<S: InventoryStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.products.find_all().await?))
}

/// GET /products/{id} — load a product.
#[tracing::instrument(skip(state))]
pub async fn get<S: InventoryStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let product = state
        .products
        .find_product_by_id(&ProductId::new(id))
        .await?;
    Ok(Json(product))
}

/// PATCH /products/{id} — decrement a product's stock by `quantity`.
#[tracing::instrument(skip(state, payload))]
pub async fn update_stock<S: InventoryStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateStockRequest>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let req = json_body(payload)?;
    let product = state
        .products
        .update_stock(UpdateStock::new(id, req.quantity))
        .await?;
    Ok(Json(product))
}
