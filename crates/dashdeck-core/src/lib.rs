//! Dashdeck Core Library
//!
//! Platform-agnostic data model, widget store and persistence for the
//! Dashdeck dashboard.

pub mod config;
pub mod kind;
pub mod model;
pub mod seed;
pub mod storage;
pub mod store;

pub use config::StoreConfig;
pub use kind::{RendererRegistry, WidgetKind, WidgetRenderer, CUSTOM_WIDGET_TYPE};
pub use model::{Category, DashboardState, Widget, WidgetDraft};
pub use seed::seed_state;
pub use storage::{
    create_default_storage, MemoryStorage, Persistence, PlatformStorage, Storage, StorageError,
    StorageResult, DEFAULT_STORAGE_KEY,
};
pub use store::{MembershipChange, WidgetStore};

/// Store over the platform's default storage backend.
pub type PlatformWidgetStore = WidgetStore<PlatformStorage>;

/// Open the store with the platform's default storage backend.
///
/// Storage setup failures are returned; load failures are not (the store
/// falls back to the seed dashboard, see [`WidgetStore::open`]).
pub fn open_platform_store(config: &StoreConfig) -> StorageResult<PlatformWidgetStore> {
    let storage = create_default_storage(config)?;
    Ok(WidgetStore::open(Persistence::new(
        storage,
        config.storage_key.clone(),
    )))
}
