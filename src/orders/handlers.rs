//! Order HTTP handlers

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::models::{
    BulkDeleteData, BulkDeleteRequest, ListParams, Order, OrderPage, PatchFields,
    SubmitOrderData, SubmitOrderRequest, SubmitOutcome,
};
use super::store::StoreError;
use crate::gateway::state::AppState;
use crate::gateway::types::{ApiError, ApiResponse, ApiResult, error_codes, ok};

/// Translate store failures into API errors
fn store_err(err: StoreError) -> ApiError {
    match err {
        StoreError::NotFound => ApiError::not_found("Order not found"),
        StoreError::InvalidField(field) => {
            ApiError::bad_request(format!("Invalid value for field '{}'", field))
        }
        StoreError::IqamaTaken => ApiError::new(
            StatusCode::CONFLICT,
            error_codes::DUPLICATE_IQAMA,
            "Another order already uses this iqama",
        ),
        StoreError::Database(e) => ApiError::internal(e),
    }
}

fn parse_order_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::bad_request(format!("Invalid order id: {}", id)))
}

/// Submit an order
///
/// POST /orders
#[utoipa::path(
    post,
    path = "/orders",
    request_body = SubmitOrderRequest,
    responses(
        (status = 200, description = "Order created or updated", body = ApiResponse<SubmitOrderData>),
        (status = 400, description = "Missing or malformed fields"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Orders"
)]
pub async fn submit_order(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubmitOrderRequest>,
) -> ApiResult<SubmitOrderData> {
    let iqama = req.iqama.clone();
    let (order_id, outcome) = state.orders.submit(req).await.map_err(store_err)?;

    match outcome {
        SubmitOutcome::Created => tracing::info!("Order {} created for iqama {}", order_id, iqama),
        SubmitOutcome::Updated => tracing::info!("Order {} updated for iqama {}", order_id, iqama),
    }
    ok(SubmitOrderData { order_id, outcome })
}

/// Patch arbitrary order fields
///
/// PATCH /order-update/{id}
#[utoipa::path(
    patch,
    path = "/order-update/{id}",
    params(("id" = String, Path, description = "Order UUID")),
    request_body(content = String, description = "Partial fields to merge (JSON object)", content_type = "application/json"),
    responses(
        (status = 200, description = "Order updated"),
        (status = 400, description = "Malformed id or field value"),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Iqama already used by another order"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Orders"
)]
pub async fn patch_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(fields): Json<Map<String, Value>>,
) -> ApiResult<()> {
    let order_id = parse_order_id(&id)?;
    let patch = PatchFields::from_map(fields).map_err(store_err)?;
    state.orders.patch(order_id, patch).await.map_err(store_err)?;
    ok(())
}

/// Patch order status/OTP lifecycle fields
///
/// PATCH /order-status/{id}
///
/// Same mechanics as the generic patch; kept as its own route because
/// clients treat status updates as a distinct operation.
#[utoipa::path(
    patch,
    path = "/order-status/{id}",
    params(("id" = String, Path, description = "Order UUID")),
    request_body(content = String, description = "Status fields to merge (JSON object)", content_type = "application/json"),
    responses(
        (status = 200, description = "Order updated"),
        (status = 400, description = "Malformed id or field value"),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Iqama already used by another order"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Orders"
)]
pub async fn patch_order_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(fields): Json<Map<String, Value>>,
) -> ApiResult<()> {
    let order_id = parse_order_id(&id)?;
    let patch = PatchFields::from_map(fields).map_err(store_err)?;
    state
        .orders
        .patch_status(order_id, patch)
        .await
        .map_err(store_err)?;
    ok(())
}

/// List orders, newest first
///
/// GET /orders?page=1&limit=10
#[utoipa::path(
    get,
    path = "/orders",
    params(ListParams),
    responses(
        (status = 200, description = "Paginated orders", body = ApiResponse<OrderPage>),
        (status = 400, description = "Out-of-range page or limit"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> ApiResult<OrderPage> {
    let (page, limit) = params.resolve().map_err(ApiError::bad_request)?;
    let page_data = state.orders.list(page, limit).await.map_err(store_err)?;
    ok(page_data)
}

/// Search the most recent order for an iqama
///
/// GET /orders/search?iqama=2345678901
#[utoipa::path(
    get,
    path = "/orders/search",
    params(("iqama" = String, Query, description = "Iqama number")),
    responses(
        (status = 200, description = "Most recent matching order", body = ApiResponse<Order>),
        (status = 400, description = "Missing iqama parameter"),
        (status = 404, description = "No orders for this iqama"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Orders"
)]
pub async fn search_by_iqama(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Order> {
    let iqama = params
        .get("iqama")
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request("Iqama number is required"))?;

    match state.orders.search_by_iqama(iqama).await.map_err(store_err)? {
        Some(order) => ok(order),
        None => ApiError::not_found("No orders found for this iqama number").into_err(),
    }
}

/// Look up the most recent order for a mobile number
///
/// GET /orderdPhone/{mobile}
///
/// The route name is a legacy client contract (typo included).
#[utoipa::path(
    get,
    path = "/orderdPhone/{mobile}",
    params(("mobile" = String, Path, description = "Mobile number")),
    responses(
        (status = 200, description = "Most recent matching order", body = ApiResponse<Order>),
        (status = 404, description = "No order for this mobile number"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Orders"
)]
pub async fn find_by_mobile(
    State(state): State<Arc<AppState>>,
    Path(mobile): Path<String>,
) -> ApiResult<Order> {
    match state.orders.find_by_mobile(&mobile).await.map_err(store_err)? {
        Some(order) => ok(order),
        None => ApiError::not_found("No order found for this mobile number").into_err(),
    }
}

/// Delete one order by id
///
/// DELETE /orders/{id}
#[utoipa::path(
    delete,
    path = "/orders/{id}",
    params(("id" = String, Path, description = "Order UUID")),
    responses(
        (status = 200, description = "Order deleted"),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Orders"
)]
pub async fn delete_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let order_id = parse_order_id(&id)?;
    state.orders.delete(order_id).await.map_err(store_err)?;
    tracing::info!("Order {} deleted", order_id);
    ok(())
}

/// Delete a batch of orders
///
/// DELETE /deleteOrder
///
/// Validation is all-or-nothing: every id must be a well-formed UUID before
/// any delete is issued, and the first malformed id fails the whole batch.
#[utoipa::path(
    delete,
    path = "/deleteOrder",
    request_body = BulkDeleteRequest,
    responses(
        (status = 200, description = "Count of orders removed", body = ApiResponse<BulkDeleteData>),
        (status = 400, description = "Empty batch or malformed id"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Orders"
)]
pub async fn delete_orders(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BulkDeleteRequest>,
) -> ApiResult<BulkDeleteData> {
    if req.ids.is_empty() {
        return ApiError::bad_request("ids must not be empty").into_err();
    }

    let mut ids = Vec::with_capacity(req.ids.len());
    for id in &req.ids {
        ids.push(parse_order_id(id)?);
    }

    let deleted = state.orders.delete_many(&ids).await.map_err(store_err)?;
    tracing::info!("Bulk delete removed {} of {} requested orders", deleted, ids.len());
    ok(BulkDeleteData { deleted })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_err_maps_iqama_conflict_to_409() {
        let err = store_err(StoreError::IqamaTaken);
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(err.code, error_codes::DUPLICATE_IQAMA);
    }

    #[test]
    fn test_store_err_hides_database_details() {
        let err = store_err(StoreError::Database(sqlx::Error::RowNotFound));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.msg, "Internal server error");
    }

    #[test]
    fn test_parse_order_id_rejects_garbage() {
        assert!(parse_order_id("not-a-uuid").is_err());
        assert!(parse_order_id("b7f9d1f2-3c44-4a55-9a66-77f8e9a0b1c2").is_ok());
    }
}
