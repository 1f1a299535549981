//! Persistent store for the weekly meal planner.
//!
//! [`MenuStore`] is the only owner of the menu document and the dish catalog.
//! It reads both records once in [`MenuStore::load`], keeps them in memory and
//! writes the affected record back through its [`StorageBackend`] after every
//! successful mutation.
//!
//! # Records
//!
//! | Key              | Contents                                   |
//! |------------------|--------------------------------------------|
//! | `weeklyMenuData` | `{ "YYYY-MM-DD": { "lunch": ["Суп"] } }`   |
//! | `dishCatalog`    | `["Плов", "Омлет"]`                        |
//!
//! Older versions stored a single string per meal. Those records are upgraded
//! to one-element lists on load and written back immediately.

mod backend;
mod error;
mod migrate;
mod store;

pub use backend::{CATALOG_KEY, FileBackend, MENU_DATA_KEY, MemoryBackend, StorageBackend};
pub use error::{Result, StorageError, StoreError};
pub use migrate::{decode_menu, migrate_legacy_schema};
pub use store::{LoadReport, MenuStore};
