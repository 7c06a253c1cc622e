//! `ft-store` — persistence contract for assets, history, zones and events.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend        | Storage                                        |
//! |-----------|----------------|------------------------------------------------|
//! | *(none)*  | `MemoryStore`  | process memory, one `RwLock`                   |
//! | `sqlite`  | `SqliteStore`  | single SQLite file (or `:memory:`), WAL mode   |
//!
//! Both implement [`Store`], which is what `ft-tracker` is generic over.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ft_store::{MemoryStore, Store};
//!
//! let store = MemoryStore::new();
//! store.put_asset(&asset)?;
//! let history = store.list_locations(&asset.id, since)?;
//! ```

pub mod error;
pub mod memory;
pub mod store;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use store::Store;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
