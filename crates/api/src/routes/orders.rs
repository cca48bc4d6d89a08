//! Order endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::{Order, OrderId, ProductId};
use domain::CreateOrder;
use inventory_store::InventoryStore;
use serde::Deserialize;

use super::json_body;
use crate::AppState;
use crate::error::ApiError;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub product_id: ProductId,
    pub quantity: i32,
}

/// POST /orders — place an order for one product.
#[tracing::instrument(skip(state, payload))]
pub async fn create<S: InventoryStore>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let req = json_body(payload)?;
    let order = state
        .orders
        .create_order(CreateOrder::new(req.product_id, req.quantity))
        .await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /orders — list all orders.
#[tracing::instrument(skip(state))]
pub async fn list<S: InventoryStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(state.orders.find_all().await?))
}

/// GET /orders/{id} — load an order.
#[tracing::instrument(skip(state))]
pub async fn get<S: InventoryStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    Ok(Json(state.orders.find_by_id(&OrderId::new(id)).await?))
}
