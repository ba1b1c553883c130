//! Thin JSON request layer over the actor clients.
//!
//! [`build_router`] is the single entry point; `main.rs` binds it to a socket and tests
//! drive it in-process with `tower::ServiceExt::oneshot`.

pub mod error;
mod extract;
mod handlers;

pub use error::{status_for, ErrorBody};
pub use extract::ApiJson;

use crate::clients::{InventoryClient, MenuClient, OrderClient};
use crate::lifecycle::CafeSystem;
use crate::reports::ReportService;
use axum::routing::{get, post};
use axum::Router;

/// Handles shared by all handlers. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub inventory: InventoryClient,
    pub menu: MenuClient,
    pub orders: OrderClient,
    pub reports: ReportService,
}

impl From<&CafeSystem> for AppState {
    fn from(system: &CafeSystem) -> Self {
        Self {
            inventory: system.inventory_client.clone(),
            menu: system.menu_client.clone(),
            orders: system.order_client.clone(),
            reports: system.reports.clone(),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/inventory",
            post(handlers::create_inventory_item).get(handlers::list_inventory_items),
        )
        .route(
            "/inventory/:id",
            get(handlers::get_inventory_item)
                .put(handlers::update_inventory_item)
                .delete(handlers::delete_inventory_item),
        )
        .route(
            "/menu",
            post(handlers::create_menu_item).get(handlers::list_menu_items),
        )
        .route(
            "/menu/:id",
            get(handlers::get_menu_item)
                .put(handlers::update_menu_item)
                .delete(handlers::delete_menu_item),
        )
        .route("/orders", post(handlers::create_order).get(handlers::list_orders))
        .route(
            "/orders/:id",
            get(handlers::get_order)
                .put(handlers::update_order)
                .delete(handlers::delete_order),
        )
        .route("/orders/:id/close", post(handlers::close_order))
        .route("/reports/total-sales", get(handlers::total_sales))
        .route("/reports/popular-items", get(handlers::popular_items))
        .with_state(state)
}
