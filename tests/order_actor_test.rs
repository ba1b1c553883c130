//! Real Order actor, mocked Menu and Inventory.
//!
//! The order engine's validation, pricing and compensation run for real; the
//! collaborators answer from pre-programmed expectations.

use cafe_orders::clients::{InventoryClient, MenuClient};
use cafe_orders::error::{ErrorKind, ServiceError};
use cafe_orders::framework::mock::{create_mock_client, expect_command, MockClient};
use cafe_orders::framework::ResourceActor;
use cafe_orders::inventory_actor::InventoryCommand;
use cafe_orders::model::{
    InventoryItem, MenuItem, MenuItemIngredient, Order, OrderItem, OrderRequest, OrderStatus,
};
use cafe_orders::order_actor::OrderDeps;
use cafe_orders::storage::MemoryStore;
use std::sync::Arc;

fn latte() -> MenuItem {
    MenuItem {
        id: "latte".into(),
        name: "Latte".into(),
        description: "Very tasty Latte".into(),
        price: 3.5,
        ingredients: vec![
            MenuItemIngredient {
                ingredient_id: "milk".into(),
                quantity: 200.0,
            },
            MenuItemIngredient {
                ingredient_id: "espresso".into(),
                quantity: 30.0,
            },
        ],
    }
}

fn two_lattes() -> OrderRequest {
    OrderRequest::new(
        "Alice",
        vec![OrderItem {
            product_id: "latte".into(),
            quantity: 2,
        }],
    )
}

fn spawn_orders(
    store: MemoryStore<Order>,
    menu: MenuClient,
    stock: InventoryClient,
) -> (cafe_orders::clients::OrderClient, tokio::task::JoinHandle<()>) {
    let (order_actor, order_client) = cafe_orders::order_actor::new(store);
    let handle = tokio::spawn(order_actor.run(OrderDeps {
        menu: Arc::new(menu),
        stock: Arc::new(stock),
    }));
    (order_client, handle)
}

#[tokio::test]
async fn test_order_actor_with_mocked_dependencies() {
    let mut menu_mock = MockClient::<MenuItem>::new();
    let mut inventory_mock = MockClient::<InventoryItem>::new();

    // Order::on_create lists the menu, then reserves stock with one command.
    menu_mock.expect_list().return_ok(vec![latte()]);
    inventory_mock.expect_command().return_ok(());

    let store = MemoryStore::new();
    let (order_client, handle) = spawn_orders(
        store.clone(),
        MenuClient::new(menu_mock.client()),
        InventoryClient::new(inventory_mock.client()),
    );

    let (id, total) = order_client.create_order(two_lattes()).await.unwrap();
    assert_eq!(id, "order1");
    assert_eq!(total.total_sales, 7.0);

    let order = order_client.get_order(id).await.unwrap();
    assert_eq!(order.customer_name, "Alice");
    assert_eq!(order.status, OrderStatus::Open);
    assert_eq!(store.contents().len(), 1);

    menu_mock.verify();
    inventory_mock.verify();

    drop(order_client);
    handle.await.unwrap();
}

#[tokio::test]
async fn rejected_reservation_stores_nothing() {
    let mut menu_mock = MockClient::<MenuItem>::new();
    let mut inventory_mock = MockClient::<InventoryItem>::new();

    menu_mock.expect_list().return_ok(vec![latte()]);
    inventory_mock
        .expect_command()
        .return_err(ServiceError::InsufficientStock {
            ingredient_id: "milk".into(),
            required: 400.0,
            available: 100.0,
        });

    let store = MemoryStore::new();
    let (order_client, _handle) = spawn_orders(
        store.clone(),
        MenuClient::new(menu_mock.client()),
        InventoryClient::new(inventory_mock.client()),
    );

    let err = order_client.create_order(two_lattes()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientStock);
    assert!(store.contents().is_empty());

    menu_mock.verify();
    inventory_mock.verify();
}

#[tokio::test]
async fn unknown_product_never_reaches_inventory() {
    let mut menu_mock = MockClient::<MenuItem>::new();
    let inventory_mock = MockClient::<InventoryItem>::new();

    menu_mock.expect_list().return_ok(vec![latte()]);

    let (order_client, _handle) = spawn_orders(
        MemoryStore::new(),
        MenuClient::new(menu_mock.client()),
        InventoryClient::new(inventory_mock.client()),
    );

    let request = OrderRequest::new(
        "Bob",
        vec![OrderItem {
            product_id: "mocha".into(),
            quantity: 1,
        }],
    );
    let err = order_client.create_order(request).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    menu_mock.verify();
    inventory_mock.verify();
}

#[tokio::test]
async fn failed_order_write_releases_the_reservation() {
    let mut menu_mock = MockClient::<MenuItem>::new();
    menu_mock.expect_list().return_ok(vec![latte()]);

    // Inventory answered by hand so the test can see each command.
    let (inventory, mut inventory_rx) = create_mock_client::<InventoryItem>(10);

    let store = MemoryStore::new();
    store.fail_next_writes(1);
    let (order_client, _handle) = spawn_orders(
        store.clone(),
        MenuClient::new(menu_mock.client()),
        InventoryClient::new(inventory),
    );

    let create = tokio::spawn(async move { order_client.create_order(two_lattes()).await });

    let (reserve, respond_to) = expect_command(&mut inventory_rx).await.unwrap();
    let reserved = match reserve {
        InventoryCommand::Reserve(needs) => needs,
        other => panic!("expected Reserve, got {other:?}"),
    };
    assert_eq!(reserved["milk"], 400.0);
    assert_eq!(reserved["espresso"], 60.0);
    respond_to.send(Ok(())).unwrap();

    let (release, respond_to) = expect_command(&mut inventory_rx).await.unwrap();
    match release {
        InventoryCommand::Release(needs) => assert_eq!(needs, reserved),
        other => panic!("expected Release, got {other:?}"),
    }
    respond_to.send(Ok(())).unwrap();

    let err = create.await.unwrap().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Storage);
    assert!(store.contents().is_empty());
}

#[tokio::test]
async fn closed_order_rejects_update_without_touching_inventory() {
    // No expectations: any menu or inventory request would panic the mock.
    let menu_mock = MockClient::<MenuItem>::new();
    let inventory_mock = MockClient::<InventoryItem>::new();

    let closed = Order {
        id: "order4".into(),
        customer_name: "Carol".into(),
        items: vec![],
        status: OrderStatus::Closed,
        created_at: "2024-05-01 09:00:00".into(),
    };
    let store = MemoryStore::with_items([closed.clone()]);
    let (order_client, _handle) = spawn_orders(
        store.clone(),
        MenuClient::new(menu_mock.client()),
        InventoryClient::new(inventory_mock.client()),
    );

    let err = order_client
        .update_order("order4".into(), two_lattes())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OrderClosed);

    let err = order_client.delete_order("order4".into()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OrderClosed);

    let err = order_client.close_order("order4".into()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OrderClosed);

    assert_eq!(store.contents()["order4"], closed);
}

#[tokio::test]
async fn corrupt_order_id_fails_creation() {
    let menu_mock = MockClient::<MenuItem>::new();
    let inventory_mock = MockClient::<InventoryItem>::new();

    let stray = Order {
        id: "legacy-7".into(),
        customer_name: "Dan".into(),
        items: vec![],
        status: OrderStatus::Open,
        created_at: "2024-05-01 09:00:00".into(),
    };
    let (actor, generic_client) = ResourceActor::new(8, MemoryStore::with_items([stray]));
    let order_client = cafe_orders::clients::OrderClient::new(generic_client);
    tokio::spawn(actor.run(OrderDeps {
        menu: Arc::new(MenuClient::new(menu_mock.client())),
        stock: Arc::new(InventoryClient::new(inventory_mock.client())),
    }));

    let err = order_client.create_order(two_lattes()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Storage);
}

#[tokio::test]
async fn exhausted_order_numbers_keep_the_actor_running() {
    let last = Order {
        id: format!("order{}", u64::MAX),
        customer_name: "Eve".into(),
        items: vec![],
        status: OrderStatus::Open,
        created_at: "2024-05-01 09:00:00".into(),
    };
    let store = MemoryStore::with_items([last.clone()]);
    let (order_client, handle) = spawn_orders(
        store.clone(),
        MenuClient::new(MockClient::<MenuItem>::new().client()),
        InventoryClient::new(MockClient::<InventoryItem>::new().client()),
    );

    let err = order_client
        .create_order(OrderRequest::new("Ann", vec![]))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Storage);

    // The actor is still serving and the store is untouched.
    assert_eq!(order_client.list_orders().await.unwrap(), vec![last]);
    assert_eq!(store.contents().len(), 1);

    drop(order_client);
    handle.await.expect("order actor panicked");
}
