//! Dashdeck application shell.
//!
//! Frontend-agnostic models for the dashboard: category grids, the
//! add-widget dialog, grouped search and toast notices.

mod app;
mod dialog;
mod grid;
mod notice;
mod search;

pub use app::{Dashboard, DashboardAction};
pub use dialog::{AddWidgetDialog, DialogTab, DEFAULT_CUSTOM_CONTENT};
pub use grid::{remove_from_grid, text_renderers, CategoryGrid, GridEntry};
pub use notice::{Notice, NoticeVariant};
pub use search::{group_by_category, SearchGroup};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::run_wasm;
