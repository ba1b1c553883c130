//! Runtime orchestration and lifecycle management.
//!
//! # Main Components
//!
//! - [`CafeSystem`] - Spawns the three actors, wires their dependencies and shuts them down
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod system;
pub mod tracing;

pub use system::*;
pub use tracing::*;
