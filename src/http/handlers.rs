use super::{ApiJson, AppState};
use crate::error::ServiceError;
use crate::model::{
    order_number, InventoryItem, InventoryItemCreate, InventoryItemUpdate, MenuItem, MenuItemCreate,
    MenuItemUpdate, Order, OrderRequest, PopularItem, TotalPrice,
};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

type ApiResult<T> = Result<T, ServiceError>;

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

pub(super) async fn create_inventory_item(
    State(st): State<AppState>,
    ApiJson(params): ApiJson<InventoryItemCreate>,
) -> ApiResult<(StatusCode, Json<InventoryItem>)> {
    let item = st.inventory.create_inventory_item(params).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub(super) async fn list_inventory_items(State(st): State<AppState>) -> ApiResult<Json<Vec<InventoryItem>>> {
    Ok(Json(st.inventory.list_inventory_items().await?))
}

pub(super) async fn get_inventory_item(
    State(st): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<InventoryItem>> {
    Ok(Json(st.inventory.get_inventory_item(id).await?))
}

pub(super) async fn update_inventory_item(
    State(st): State<AppState>,
    Path(id): Path<String>,
    ApiJson(update): ApiJson<InventoryItemUpdate>,
) -> ApiResult<Json<InventoryItem>> {
    Ok(Json(st.inventory.update_inventory_item(id, update).await?))
}

pub(super) async fn delete_inventory_item(
    State(st): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    st.inventory.delete_inventory_item(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Menu
// ---------------------------------------------------------------------------

pub(super) async fn create_menu_item(
    State(st): State<AppState>,
    ApiJson(params): ApiJson<MenuItemCreate>,
) -> ApiResult<(StatusCode, Json<MenuItem>)> {
    let item = st.menu.create_menu_item(params).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub(super) async fn list_menu_items(State(st): State<AppState>) -> ApiResult<Json<Vec<MenuItem>>> {
    Ok(Json(st.menu.list_menu_items().await?))
}

pub(super) async fn get_menu_item(State(st): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<MenuItem>> {
    Ok(Json(st.menu.get_menu_item(id).await?))
}

pub(super) async fn update_menu_item(
    State(st): State<AppState>,
    Path(id): Path<String>,
    ApiJson(update): ApiJson<MenuItemUpdate>,
) -> ApiResult<Json<MenuItem>> {
    Ok(Json(st.menu.update_menu_item(id, update).await?))
}

pub(super) async fn delete_menu_item(State(st): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    st.menu.delete_menu_item(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

/// Path IDs that are not `order<N>` never reach the order actor.
fn order_id(id: String) -> ApiResult<String> {
    match order_number(&id) {
        Some(_) => Ok(id),
        None => Err(ServiceError::NotFound(id)),
    }
}

pub(super) async fn create_order(
    State(st): State<AppState>,
    ApiJson(request): ApiJson<OrderRequest>,
) -> ApiResult<(StatusCode, Json<TotalPrice>)> {
    let (_, total) = st.orders.create_order(request).await?;
    Ok((StatusCode::CREATED, Json(total)))
}

pub(super) async fn list_orders(State(st): State<AppState>) -> ApiResult<Json<Vec<Order>>> {
    Ok(Json(st.orders.list_orders().await?))
}

pub(super) async fn get_order(State(st): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Order>> {
    Ok(Json(st.orders.get_order(order_id(id)?).await?))
}

pub(super) async fn update_order(
    State(st): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<OrderRequest>,
) -> ApiResult<Json<TotalPrice>> {
    let (_, total) = st.orders.update_order(order_id(id)?, request).await?;
    Ok(Json(total))
}

pub(super) async fn delete_order(State(st): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    st.orders.delete_order(order_id(id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(super) async fn close_order(State(st): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Order>> {
    Ok(Json(st.orders.close_order(order_id(id)?).await?))
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

pub(super) async fn total_sales(State(st): State<AppState>) -> ApiResult<Json<TotalPrice>> {
    Ok(Json(st.reports.total_sales().await?))
}

pub(super) async fn popular_items(State(st): State<AppState>) -> ApiResult<Json<Vec<PopularItem>>> {
    Ok(Json(st.reports.popular_items().await?))
}
