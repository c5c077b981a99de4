//! Product REST endpoints.
//!
//! Status mapping for domain failures is deliberately per endpoint to match
//! the existing API contract: `delete` reports its business-rule violation as
//! 404 while `decrease-stock` reports every failure (including an unknown id)
//! as 400, and `update`/`increase-stock` report validation failures as 404.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use stockly_core::domain::product::{Product, ProductDraft, ProductId};
use stockly_core::errors::ServiceError;

use crate::service::ProductService;

#[derive(Debug, Serialize)]
pub struct ApiError {
    error: String,
}

#[derive(Debug, Deserialize)]
struct StockAdjustment {
    amount: i64,
}

pub fn router(service: ProductService) -> Router {
    Router::new()
        .route("/api/products", post(create_product).get(list_products))
        .route("/api/products/inventory/value", get(get_inventory_value))
        .route(
            "/api/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/api/products/{id}/increase-stock", post(increase_stock))
        .route("/api/products/{id}/decrease-stock", post(decrease_stock))
        .with_state(service)
}

/// Domain failures map to the endpoint's blanket status; storage failures
/// are always 503.
fn respond(error: ServiceError, domain_status: StatusCode) -> (StatusCode, Json<ApiError>) {
    let status = match &error {
        ServiceError::Domain(_) => domain_status,
        ServiceError::Storage(_) => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status, Json(ApiError { error: error.to_string() }))
}

async fn create_product(
    State(service): State<ProductService>,
    Json(candidate): Json<ProductDraft>,
) -> Result<(StatusCode, Json<Product>), (StatusCode, Json<ApiError>)> {
    match service.create(candidate).await {
        Ok(product) => {
            info!(event_name = "products.created", product_id = ?product.id, "product created");
            Ok((StatusCode::CREATED, Json(product)))
        }
        Err(error) => Err(respond(error, StatusCode::BAD_REQUEST)),
    }
}

async fn list_products(
    State(service): State<ProductService>,
) -> Result<Json<Vec<Product>>, (StatusCode, Json<ApiError>)> {
    match service.list().await {
        Ok(products) => Ok(Json(products)),
        Err(error) => Err(respond(error, StatusCode::INTERNAL_SERVER_ERROR)),
    }
}

async fn get_product(
    Path(id): Path<i64>,
    State(service): State<ProductService>,
) -> Result<Json<Product>, (StatusCode, Json<ApiError>)> {
    match service.get(ProductId(id)).await {
        Ok(Some(product)) => Ok(Json(product)),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiError { error: format!("product {id} not found") }),
        )),
        Err(error) => Err(respond(error, StatusCode::NOT_FOUND)),
    }
}

async fn update_product(
    Path(id): Path<i64>,
    State(service): State<ProductService>,
    Json(details): Json<ProductDraft>,
) -> Result<Json<Product>, (StatusCode, Json<ApiError>)> {
    match service.update(ProductId(id), details).await {
        Ok(product) => {
            info!(event_name = "products.updated", product_id = id, "product updated");
            Ok(Json(product))
        }
        Err(error) => Err(respond(error, StatusCode::NOT_FOUND)),
    }
}

async fn delete_product(
    Path(id): Path<i64>,
    State(service): State<ProductService>,
) -> Result<StatusCode, (StatusCode, Json<ApiError>)> {
    match service.delete(ProductId(id)).await {
        Ok(()) => {
            info!(event_name = "products.deleted", product_id = id, "product deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(error) => Err(respond(error, StatusCode::NOT_FOUND)),
    }
}

async fn increase_stock(
    Path(id): Path<i64>,
    Query(adjustment): Query<StockAdjustment>,
    State(service): State<ProductService>,
) -> Result<Json<Product>, (StatusCode, Json<ApiError>)> {
    match service.increase_stock(ProductId(id), adjustment.amount).await {
        Ok(product) => Ok(Json(product)),
        Err(error) => Err(respond(error, StatusCode::NOT_FOUND)),
    }
}

async fn decrease_stock(
    Path(id): Path<i64>,
    Query(adjustment): Query<StockAdjustment>,
    State(service): State<ProductService>,
) -> Result<Json<Product>, (StatusCode, Json<ApiError>)> {
    match service.decrease_stock(ProductId(id), adjustment.amount).await {
        Ok(product) => Ok(Json(product)),
        Err(error) => Err(respond(error, StatusCode::BAD_REQUEST)),
    }
}

async fn get_inventory_value(
    State(service): State<ProductService>,
) -> Result<Json<Decimal>, (StatusCode, Json<ApiError>)> {
    match service.inventory_value().await {
        Ok(total) => Ok(Json(total)),
        Err(error) => Err(respond(error, StatusCode::INTERNAL_SERVER_ERROR)),
    }
}
