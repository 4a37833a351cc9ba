//! Product CRUD endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::api::middleware::CurrentUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::Product;
use crate::infrastructure::product::{CreateProductRequest, UpdateProductRequest};

use super::users::ListQuery;

const PRODUCTS_READ: &str = "products:read";
const PRODUCTS_WRITE: &str = "products:write";

/// Request to create a new product
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductApiRequest {
    pub name: String,
    pub sku: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price_cents: i64,
}

/// Request to partially update a product
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProductApiRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub is_active: Option<bool>,
}

/// Product response
#[derive(Debug, Clone, Serialize)]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub sku: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price_cents: i64,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id(),
            name: product.name().to_string(),
            sku: product.sku().to_string(),
            description: product.description().map(String::from),
            price_cents: product.price_cents(),
            is_active: product.is_active(),
            created_at: product.created_at().to_rfc3339(),
            updated_at: product.updated_at().to_rfc3339(),
        }
    }
}

/// List products response
#[derive(Debug, Clone, Serialize)]
pub struct ListProductsResponse {
    pub products: Vec<ProductResponse>,
    pub total: i64,
    pub offset: i64,
}

/// POST /api/v1/products
pub async fn create_product(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<CreateProductApiRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), ApiError> {
    user.require_all(&[PRODUCTS_WRITE])?;

    debug!(sku = %request.sku, "Creating product");

    let created = state
        .product_service
        .create(CreateProductRequest {
            name: request.name,
            sku: request.sku,
            description: request.description,
            price_cents: request.price_cents,
        })
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(ProductResponse::from(&created))))
}

/// GET /api/v1/products
pub async fn list_products(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListProductsResponse>, ApiError> {
    user.require_all(&[PRODUCTS_READ])?;

    debug!(offset = query.offset, "Listing products");

    let products = state
        .product_service
        .list(query.offset, query.limit)
        .await
        .map_err(ApiError::from)?;
    let total = state
        .product_service
        .count()
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ListProductsResponse {
        products: products.iter().map(ProductResponse::from).collect(),
        total,
        offset: query.offset,
    }))
}

/// GET /api/v1/products/{product_id}
pub async fn get_product(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(product_id): Path<Uuid>,
) -> Result<Json<ProductResponse>, ApiError> {
    user.require_all(&[PRODUCTS_READ])?;

    debug!(product_id = %product_id, "Getting product");

    let found = state
        .product_service
        .get(product_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found(format!("Product '{}' not found", product_id)))?;

    Ok(Json(ProductResponse::from(&found)))
}

/// PATCH /api/v1/products/{product_id}
pub async fn update_product(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(product_id): Path<Uuid>,
    Json(request): Json<UpdateProductApiRequest>,
) -> Result<Json<ProductResponse>, ApiError> {
    user.require_all(&[PRODUCTS_WRITE])?;

    debug!(product_id = %product_id, "Updating product");

    let updated = state
        .product_service
        .update(
            product_id,
            UpdateProductRequest {
                name: request.name,
                description: request.description,
                price_cents: request.price_cents,
                is_active: request.is_active,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ProductResponse::from(&updated)))
}

/// DELETE /api/v1/products/{product_id}
pub async fn delete_product(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(product_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    user.require_all(&[PRODUCTS_WRITE])?;

    debug!(product_id = %product_id, "Deleting product");

    let deleted = state
        .product_service
        .delete(product_id)
        .await
        .map_err(ApiError::from)?;

    if !deleted {
        return Err(ApiError::not_found(format!(
            "Product '{}' not found",
            product_id
        )));
    }

    Ok(Json(serde_json::json!({
        "deleted": true,
        "id": product_id
    })))
}
