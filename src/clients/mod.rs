//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient), plus the
//! capability traits other actors depend on instead of concrete clients.

#[macro_use]
mod macros;

pub mod actor_client;
pub mod inventory_client;
pub mod menu_client;
pub mod order_client;
pub mod traits;

pub use actor_client::*;
pub use inventory_client::*;
pub use menu_client::*;
pub use order_client::*;
pub use traits::*;
