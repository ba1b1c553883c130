//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//! Log levels come from the `RUST_LOG` environment variable.
//!
//! ```bash
//! RUST_LOG=info cargo run -- --dir ./data
//! RUST_LOG=debug cargo run     # full request payloads
//! ```
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: startup and shutdown per entity type
//! - **Entity Operations**: every request at `debug`, successful writes at `info` with the
//!   entity ID and collection size, rejected requests at `warn`
//! - **Client Calls**: `#[instrument]` spans around each client method
//! - **Compensation**: stock released after a failed order write, at `info`, or `error`
//!   when the release itself failed
//!
//! **With `RUST_LOG=info`**, placing an order looks like:
//!
//! ```text
//! INFO create_order: Sending create_order to actor
//! INFO Command ok entity_type="InventoryItem"
//! INFO Created entity_type="Order" id=order3 size=3
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type identifies the actor
        .compact()
        .init();
}
