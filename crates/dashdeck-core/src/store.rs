//! The widget store: owner of the category/widget membership graph.

use crate::model::{Category, DashboardState, Widget, WidgetDraft};
use crate::seed::seed_state;
use crate::storage::{Persistence, Storage, StorageError, StorageResult};
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

/// Outcome of a membership mutation.
///
/// Unknown IDs are reported here instead of as errors; the caller decides
/// whether to tell the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipChange {
    /// The widget was added to the category.
    Added,
    /// The widget was removed from the category.
    Removed,
    /// Already in the requested state; nothing was written.
    Unchanged,
    /// No category with this ID.
    CategoryNotFound(String),
    /// No widget with this ID.
    WidgetNotFound(String),
}

impl MembershipChange {
    /// Whether state (and storage) changed.
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Added | Self::Removed)
    }

    /// Whether an ID did not resolve.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::CategoryNotFound(_) | Self::WidgetNotFound(_))
    }
}

/// Single source of truth for categories and widgets.
///
/// Reads borrow the current state; writes go through the mutation methods,
/// which keep `Category::widget_ids` and `Widget::category_ids` in sync and
/// persist the whole state after every change.
pub struct WidgetStore<S: Storage> {
    state: DashboardState,
    persistence: Persistence<S>,
    last_persist_error: Option<StorageError>,
    /// Set when an unreadable snapshot could not be moved aside. Saves are
    /// held back until [`flush`](Self::flush) or [`reset_to_seed`](Self::reset_to_seed).
    saves_held: bool,
}

impl<S: Storage> WidgetStore<S> {
    /// Open the store from storage, falling back to the seed dashboard.
    ///
    /// Load failures are logged and kept as [`last_persist_error`](Self::last_persist_error);
    /// they never prevent the store from opening. The unreadable snapshot is
    /// moved to a backup key so later saves cannot overwrite it.
    pub fn open(persistence: Persistence<S>) -> Self {
        let mut saves_held = false;
        let (state, error) = match persistence.load() {
            Ok(Some(mut state)) => {
                for warning in state.sanitize() {
                    log::warn!("{warning}");
                }
                log::info!(
                    "Restored dashboard: {} categories, {} widgets",
                    state.categories.len(),
                    state.widgets.len()
                );
                (state, None)
            }
            Ok(None) => {
                log::info!("No stored dashboard under '{}', using seed", persistence.key());
                (seed_state(), None)
            }
            Err(e) => {
                log::warn!("Failed to restore dashboard, using seed: {}", e);
                match persistence.move_aside() {
                    Ok(backup) => log::warn!("Unreadable dashboard kept under '{backup}'"),
                    Err(move_err) => {
                        log::error!(
                            "Could not move unreadable dashboard aside ({}); saves held until flush",
                            move_err
                        );
                        saves_held = true;
                    }
                }
                (seed_state(), Some(e))
            }
        };

        Self {
            state,
            persistence,
            last_persist_error: error,
            saves_held,
        }
    }

    /// Open the store over a storage backend using the default key.
    pub fn open_with_storage(storage: Arc<S>) -> Self {
        Self::open(Persistence::with_default_key(storage))
    }

    /// Create a store with the given state without reading storage.
    ///
    /// The state is sanitized so the membership invariant holds.
    pub fn with_state(mut state: DashboardState, persistence: Persistence<S>) -> Self {
        for warning in state.sanitize() {
            log::warn!("{warning}");
        }
        Self {
            state,
            persistence,
            last_persist_error: None,
            saves_held: false,
        }
    }

    // --- Queries ---

    /// The whole current state.
    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// All categories in display order.
    pub fn categories(&self) -> &[Category] {
        &self.state.categories
    }

    /// Look up a category. Absence is a normal outcome.
    pub fn category(&self, category_id: &str) -> Option<&Category> {
        self.state.category(category_id)
    }

    /// Look up a widget.
    pub fn widget(&self, widget_id: &str) -> Option<&Widget> {
        self.state.widget(widget_id)
    }

    /// All widgets in stored order.
    pub fn all_widgets(&self) -> &[Widget] {
        &self.state.widgets
    }

    /// Widgets of a category in the category's order.
    ///
    /// An unknown category yields an empty list.
    pub fn widgets_by_category(&self, category_id: &str) -> Vec<&Widget> {
        let Some(category) = self.state.category(category_id) else {
            return Vec::new();
        };
        category
            .widget_ids
            .iter()
            .filter_map(|id| self.state.widget(id))
            .collect()
    }

    /// Case-insensitive substring search over title, content and type.
    ///
    /// A blank query returns every widget in stored order.
    pub fn search_widgets(&self, query: &str) -> Vec<&Widget> {
        if query.trim().is_empty() {
            return self.state.widgets.iter().collect();
        }
        let needle = query.to_lowercase();
        self.state
            .widgets
            .iter()
            .filter(|w| w.matches_lowercase(&needle))
            .collect()
    }

    // --- Mutations ---

    /// Add a widget to a category, updating both sides.
    ///
    /// Adding an existing member is a no-op and does not touch storage.
    pub fn add_widget_to_category(&mut self, widget_id: &str, category_id: &str) -> MembershipChange {
        let Some(category) = self.state.category(category_id) else {
            log::warn!("Cannot add widget '{widget_id}': unknown category '{category_id}'");
            return MembershipChange::CategoryNotFound(category_id.to_string());
        };
        if category.contains(widget_id) {
            return MembershipChange::Unchanged;
        }
        let Some(widget) = self.state.widget_mut(widget_id) else {
            log::warn!("Cannot add unknown widget '{widget_id}' to '{category_id}'");
            return MembershipChange::WidgetNotFound(widget_id.to_string());
        };

        if !widget.in_category(category_id) {
            widget.category_ids.push(category_id.to_string());
        }
        if let Some(category) = self.state.category_mut(category_id) {
            category.widget_ids.push(widget_id.to_string());
        }

        log::debug!("Added widget '{widget_id}' to '{category_id}'");
        self.persist();
        MembershipChange::Added
    }

    /// Remove a widget from a category, updating both sides.
    ///
    /// The widget record itself is kept. Removing a non-member is a no-op.
    pub fn remove_widget_from_category(
        &mut self,
        widget_id: &str,
        category_id: &str,
    ) -> MembershipChange {
        let Some(category) = self.state.category_mut(category_id) else {
            return MembershipChange::CategoryNotFound(category_id.to_string());
        };
        let before = category.widget_ids.len();
        category.widget_ids.retain(|id| id != widget_id);
        let was_listed = category.widget_ids.len() != before;

        let recorded = match self.state.widget_mut(widget_id) {
            Some(widget) => {
                let before = widget.category_ids.len();
                widget.category_ids.retain(|id| id != category_id);
                widget.category_ids.len() != before
            }
            None if was_listed => true,
            None => return MembershipChange::WidgetNotFound(widget_id.to_string()),
        };

        if !(was_listed || recorded) {
            return MembershipChange::Unchanged;
        }

        log::debug!("Removed widget '{widget_id}' from '{category_id}'");
        self.persist();
        MembershipChange::Removed
    }

    /// Create a widget with a fresh ID and add it to the draft's categories.
    ///
    /// Unknown or repeated category IDs in the draft are dropped.
    pub fn create_widget(&mut self, draft: WidgetDraft) -> Widget {
        let id = Uuid::new_v4().to_string();
        let mut widget = draft.into_widget(id);

        let mut seen = HashSet::new();
        let requested = std::mem::take(&mut widget.category_ids);
        for category_id in requested {
            if !seen.insert(category_id.clone()) {
                continue;
            }
            match self.state.category_mut(&category_id) {
                Some(category) => {
                    category.widget_ids.push(widget.id.clone());
                    widget.category_ids.push(category_id);
                }
                None => {
                    log::warn!(
                        "New widget '{}' references unknown category '{}'; skipped",
                        widget.title,
                        category_id
                    );
                }
            }
        }

        self.state.widgets.push(widget.clone());
        log::info!("Created widget '{}' ({})", widget.title, widget.id);
        self.persist();
        widget
    }

    /// Replace the state with the seed dashboard and persist it.
    ///
    /// Overwrites the stored snapshot even when saves are held.
    pub fn reset_to_seed(&mut self) {
        self.state = seed_state();
        self.saves_held = false;
        log::info!("Dashboard reset to seed");
        self.persist();
    }

    // --- Persistence ---

    /// Save the current state, logging and recording failures.
    ///
    /// In-memory state is never rolled back.
    fn persist(&mut self) {
        if self.saves_held {
            log::warn!("Dashboard change kept in memory; stored snapshot is unreadable");
            self.persistence.mark_dirty();
            return;
        }
        match self.persistence.save(&self.state) {
            Ok(()) => self.last_persist_error = None,
            Err(e) => {
                log::error!("Failed to persist dashboard: {}", e);
                self.last_persist_error = Some(e);
            }
        }
    }

    /// Write pending changes. Does nothing when storage is up to date.
    ///
    /// Retries a failed save, and overwrites a held-back unreadable snapshot.
    pub fn flush(&mut self) -> StorageResult<()> {
        if !self.persistence.is_dirty() {
            return Ok(());
        }
        self.persistence.save(&self.state)?;
        self.saves_held = false;
        self.last_persist_error = None;
        Ok(())
    }

    /// Whether saves are held back because an unreadable snapshot could not
    /// be moved aside.
    pub fn saves_held(&self) -> bool {
        self.saves_held
    }

    /// The most recent load or save failure, cleared by the next successful save.
    pub fn last_persist_error(&self) -> Option<&StorageError> {
        self.last_persist_error.as_ref()
    }

    /// The persistence handle.
    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }
}
