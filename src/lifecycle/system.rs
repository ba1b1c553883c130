use crate::clients::{InventoryClient, MenuClient, OrderClient};
use crate::model::{InventoryItem, MenuItem, Order};
use crate::order_actor::OrderDeps;
use crate::reports::ReportService;
use crate::storage::{EntityStore, JsonFileStore};
use std::path::Path;
use std::sync::Arc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

pub const INVENTORY_FILE: &str = "inventory.json";
pub const MENU_FILE: &str = "menu_items.json";
pub const ORDERS_FILE: &str = "orders.json";

/// The main runtime orchestrator for the order backend.
///
/// `CafeSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping all actors in the system
/// - **Dependency Wiring**: Menu needs a view of inventory; Orders need a view of the menu
///   and a stock ledger backed by inventory
///
/// # Architecture
///
/// - **Inventory Actor**: Ingredient CRUD and atomic stock reservation (`Context = ()`)
/// - **Menu Actor**: Product CRUD, checks ingredient references against inventory
/// - **Order Actor**: The order engine; reserves stock and prices orders
///
/// # Example
///
/// ```ignore
/// let system = CafeSystem::open("./data");
/// let (id, total) = system.order_client.create_order(request).await?;
/// system.shutdown().await?;
/// ```
pub struct CafeSystem {
    pub inventory_client: InventoryClient,
    pub menu_client: MenuClient,
    pub order_client: OrderClient,
    pub reports: ReportService,

    /// Task handles for all running actors, in shutdown order.
    handles: Vec<JoinHandle<()>>,
}

impl CafeSystem {
    /// Starts the system with one JSON file per collection under `dir`.
    pub fn open(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        info!(dir = %dir.display(), "Opening data directory");
        Self::new(
            JsonFileStore::<InventoryItem>::new(dir.join(INVENTORY_FILE)),
            JsonFileStore::<MenuItem>::new(dir.join(MENU_FILE)),
            JsonFileStore::<Order>::new(dir.join(ORDERS_FILE)),
        )
    }

    /// Creates and starts all actors over the given stores.
    pub fn new(
        inventory_store: impl EntityStore<InventoryItem> + 'static,
        menu_store: impl EntityStore<MenuItem> + 'static,
        order_store: impl EntityStore<Order> + 'static,
    ) -> Self {
        // 1. Create actors (no dependencies yet)
        let (inventory_actor, inventory_client) = crate::inventory_actor::new(inventory_store);
        let (menu_actor, menu_client) = crate::menu_actor::new(menu_store);
        let (order_actor, order_client) = crate::order_actor::new(order_store);

        // 2. Start actors with injected context
        let inventory_handle = tokio::spawn(inventory_actor.run(()));
        let menu_handle = tokio::spawn(menu_actor.run(Arc::new(inventory_client.clone())));
        let order_handle = tokio::spawn(order_actor.run(OrderDeps {
            menu: Arc::new(menu_client.clone()),
            stock: Arc::new(inventory_client.clone()),
        }));

        let reports = ReportService::new(Arc::new(order_client.clone()), Arc::new(menu_client.clone()));

        Self {
            inventory_client,
            menu_client,
            order_client,
            reports,
            // Orders hold menu and inventory clients, menu holds an inventory client.
            handles: vec![order_handle, menu_handle, inventory_handle],
        }
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Dropping the clients closes the channels. Each actor drains its queue, exits its
    /// loop and drops its context, which in turn releases the actors it depends on.
    /// Every other clone (e.g. held by the request layer) must be dropped first.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        info!("Shutting down system...");

        drop(self.reports);
        drop(self.order_client);
        drop(self.menu_client);
        drop(self.inventory_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(e);
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
