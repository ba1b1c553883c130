//! # Cafe Orders
//!
//! > **An order-processing backend for a small coffee shop, built from resource-oriented actors.**
//!
//! The system tracks an ingredient inventory, a menu of products made from those
//! ingredients, and customer orders that consume stock and produce revenue.
//!
//! ## Design
//!
//! ### One actor per collection
//! Each collection (inventory, menu, orders) is owned by a generic
//! [`ResourceActor`](framework::ResourceActor) running in its own Tokio task. It processes
//! requests one at a time: load the collection from its [`EntityStore`](storage::EntityStore),
//! apply the entity hooks, write it back if it changed. Two requests against the same
//! collection can never interleave, so no locks are needed around read-modify-write.
//!
//! ### The order engine
//! Placing or extending an order is one critical section inside the order actor:
//! assign the ID, resolve products on the menu, aggregate ingredient needs, reserve them
//! from inventory (all or nothing, in one inventory command), price the order, write it.
//! If that final write fails the reservation is released again.
//!
//! ### Capabilities, not clients
//! Actors that need another collection depend on the narrowest capability:
//! [`CollectionView`](clients::CollectionView) for reading and
//! [`StockLedger`](clients::StockLedger) for moving stock. They are injected at `run()`
//! time ("late binding"), which also lets tests substitute fixed snapshots.
//!
//! ### Errors
//! Every operation returns [`ServiceError`](error::ServiceError), a closed set of kinds
//! callers match with [`kind()`](error::ServiceError::kind).
//!
//! ## Module Tour
//!
//! - [`framework`] - the generic actor, client and mocks
//! - [`storage`] - JSON-file and in-memory entity stores
//! - [`model`] - records and request DTOs
//! - [`inventory_actor`], [`menu_actor`], [`order_actor`] - the three `ActorEntity` impls
//! - [`clients`] - domain clients and capability traits
//! - [`reports`] - total sales and best-selling item
//! - [`lifecycle`] - [`CafeSystem`](lifecycle::CafeSystem) wiring, shutdown, tracing
//! - [`http`] - axum routes
//! - [`config`] - command-line flags

pub mod clients;
pub mod config;
pub mod error;
pub mod framework;
pub mod http;
pub mod inventory_actor;
pub mod lifecycle;
pub mod menu_actor;
pub mod model;
pub mod order_actor;
pub mod reports;
pub mod storage;
