//! Dashboard application state and action dispatch.

use crate::dialog::{AddWidgetDialog, DialogTab};
use crate::grid::{remove_from_grid, text_renderers, CategoryGrid};
use crate::notice::Notice;
use crate::search::{group_by_category, SearchGroup};
use dashdeck_core::{RendererRegistry, Storage, WidgetStore};

/// Actions the frontend sends after user input.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardAction {
    /// Update the dashboard search bar.
    SetSearch(String),
    /// Remove a widget from a category's grid.
    RemoveWidget { widget_id: String, category_id: String },
    /// Open the add-widget dialog, optionally scoped to a category.
    OpenAddWidget(Option<String>),
    /// Close the add-widget dialog without applying anything.
    CloseAddWidget,
    /// Switch the dialog tab.
    SetDialogTab(DialogTab),
    /// Update the dialog's search field.
    SetDialogSearch(String),
    /// Toggle a widget in the dialog's selection.
    ToggleWidget(String),
    /// Add the selected widgets and close the dialog.
    ConfirmSelection,
    /// Show the create-widget form.
    StartCreateWidget,
    /// Back from the create-widget form to the list.
    CancelCreateWidget,
    /// Update the create-widget form.
    SetNewWidget {
        name: String,
        content: String,
        category_id: String,
    },
    /// Create the widget from the form and close the dialog.
    CreateWidget,
    /// Discard all changes and restore the built-in dashboard.
    ResetDashboard,
}

/// Application state around the widget store.
pub struct Dashboard<S: Storage> {
    store: WidgetStore<S>,
    search_query: String,
    dialog: Option<AddWidgetDialog>,
    renderers: RendererRegistry<String>,
}

impl<S: Storage> Dashboard<S> {
    pub fn new(store: WidgetStore<S>) -> Self {
        Self {
            store,
            search_query: String::new(),
            dialog: None,
            renderers: text_renderers(),
        }
    }

    pub fn store(&self) -> &WidgetStore<S> {
        &self.store
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Whether the search view replaces the category grids.
    pub fn is_searching(&self) -> bool {
        !self.search_query.trim().is_empty()
    }

    /// Search hits grouped by category.
    pub fn search_results(&self) -> Vec<SearchGroup<'_>> {
        group_by_category(&self.store, &self.search_query)
    }

    /// Grid for one category.
    pub fn grid(&self, category_id: &str) -> CategoryGrid<'_> {
        CategoryGrid::new(&self.store, category_id)
    }

    /// The open add-widget dialog, if any.
    pub fn dialog(&self) -> Option<&AddWidgetDialog> {
        self.dialog.as_ref()
    }

    /// Text renderers used for summaries.
    pub fn renderers(&self) -> &RendererRegistry<String> {
        &self.renderers
    }

    /// One line per category and widget, for logs and headless frontends.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for category in self.store.categories() {
            lines.push(format!("[{}] {}", category.id, category.name));
            for entry in self.grid(&category.id).entries {
                lines.push(format!("  - {}", self.renderers.render(entry.widget)));
            }
        }
        lines
    }

    /// Apply an action. Returns a notice for the toast layer, if any.
    pub fn handle(&mut self, action: DashboardAction) -> Option<Notice> {
        match action {
            DashboardAction::SetSearch(query) => {
                self.search_query = query;
                None
            }
            DashboardAction::RemoveWidget {
                widget_id,
                category_id,
            } => remove_from_grid(&mut self.store, &widget_id, &category_id),
            DashboardAction::OpenAddWidget(category_id) => {
                self.dialog = Some(AddWidgetDialog::open(category_id.as_deref()));
                None
            }
            DashboardAction::CloseAddWidget => {
                self.dialog = None;
                None
            }
            DashboardAction::ResetDashboard => {
                self.store.reset_to_seed();
                self.dialog = None;
                Some(Notice::new(
                    "Dashboard reset",
                    "The dashboard has been restored to its default widgets.",
                ))
            }
            other => self.handle_dialog(other),
        }
    }

    fn handle_dialog(&mut self, action: DashboardAction) -> Option<Notice> {
        let Some(dialog) = self.dialog.as_mut() else {
            log::debug!("Ignoring {action:?}: add-widget dialog is closed");
            return None;
        };

        match action {
            DashboardAction::SetDialogTab(tab) => dialog.set_tab(tab),
            DashboardAction::SetDialogSearch(query) => dialog.set_search(query),
            DashboardAction::ToggleWidget(widget_id) => dialog.toggle(&widget_id),
            DashboardAction::StartCreateWidget => dialog.start_creating(),
            DashboardAction::CancelCreateWidget => dialog.cancel_creating(),
            DashboardAction::SetNewWidget {
                name,
                content,
                category_id,
            } => {
                dialog.set_new_name(name);
                dialog.set_new_content(content);
                dialog.set_new_category(category_id);
            }
            DashboardAction::ConfirmSelection => {
                let notice = dialog.confirm(&mut self.store);
                if dialog.selected().is_empty() && notice.is_some() {
                    self.dialog = None;
                }
                return notice;
            }
            DashboardAction::CreateWidget => {
                return match dialog.create(&mut self.store) {
                    Ok((_, notice)) => {
                        self.dialog = None;
                        Some(notice)
                    }
                    Err(notice) => Some(notice),
                };
            }
            other => log::debug!("Unhandled dialog action {other:?}"),
        }
        None
    }

    /// Retry any failed save; call before shutdown.
    pub fn flush(&mut self) {
        if let Err(e) = self.store.flush() {
            log::error!("Failed to save dashboard on exit: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashdeck_core::MemoryStorage;
    use std::sync::Arc;

    fn dashboard() -> Dashboard<MemoryStorage> {
        Dashboard::new(WidgetStore::open_with_storage(Arc::new(MemoryStorage::new())))
    }

    #[test]
    fn test_add_widgets_through_dialog() {
        let mut app = dashboard();
        app.handle(DashboardAction::OpenAddWidget(Some("cwpp".to_string())));
        assert_eq!(app.dialog().unwrap().active_tab(), DialogTab::Cwpp);

        app.handle(DashboardAction::SetDialogSearch("image".to_string()));
        app.handle(DashboardAction::ToggleWidget("image-risk".to_string()));
        let notice = app.handle(DashboardAction::ConfirmSelection).unwrap();

        assert_eq!(notice.title, "Widgets added");
        assert!(app.dialog().is_none());
        let cwpp: Vec<&str> = app
            .grid("cwpp")
            .entries
            .iter()
            .map(|e| e.widget.id.as_str())
            .collect();
        assert_eq!(cwpp, vec!["namespace-alerts", "workload-alerts", "image-risk"]);
    }

    #[test]
    fn test_create_widget_through_dialog() {
        let mut app = dashboard();
        app.handle(DashboardAction::OpenAddWidget(None));
        app.handle(DashboardAction::StartCreateWidget);
        app.handle(DashboardAction::SetNewWidget {
            name: "Spend".to_string(),
            content: String::new(),
            category_id: "cspm".to_string(),
        });

        let notice = app.handle(DashboardAction::CreateWidget).unwrap();

        assert_eq!(notice.title, "Widget created");
        assert!(app.dialog().is_none());
        assert_eq!(app.grid("cspm").entries.len(), 3);
    }

    #[test]
    fn test_invalid_create_keeps_dialog_open() {
        let mut app = dashboard();
        app.handle(DashboardAction::OpenAddWidget(None));
        app.handle(DashboardAction::StartCreateWidget);

        let notice = app.handle(DashboardAction::CreateWidget).unwrap();
        assert_eq!(notice.title, "Widget not created");
        assert!(app.dialog().unwrap().is_creating());
    }

    #[test]
    fn test_create_into_missing_category_keeps_dialog_open() {
        let mut app = dashboard();
        app.handle(DashboardAction::OpenAddWidget(None));
        app.handle(DashboardAction::StartCreateWidget);
        app.handle(DashboardAction::SetNewWidget {
            name: "Tickets".to_string(),
            content: String::new(),
            category_id: "ticket".to_string(),
        });

        let notice = app.handle(DashboardAction::CreateWidget).unwrap();

        assert_eq!(notice.title, "Widget not created");
        assert!(app.dialog().unwrap().is_creating());
        assert_eq!(app.store().all_widgets().len(), 6);
    }

    #[test]
    fn test_dialog_actions_ignored_when_closed() {
        let mut app = dashboard();
        assert!(app.handle(DashboardAction::ToggleWidget("x".to_string())).is_none());
        assert!(app.handle(DashboardAction::ConfirmSelection).is_none());
    }

    #[test]
    fn test_remove_and_search() {
        let mut app = dashboard();
        let notice = app.handle(DashboardAction::RemoveWidget {
            widget_id: "cloud-accounts".to_string(),
            category_id: "cspm".to_string(),
        });
        assert!(notice.is_some());

        app.handle(DashboardAction::SetSearch("cloud".to_string()));
        assert!(app.is_searching());
        let groups = app.search_results();
        // cloud-accounts no longer in any category
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].widgets[0].id, "risk-assessment");
    }

    #[test]
    fn test_summary_lines() {
        let app = dashboard();
        let lines = app.summary_lines();
        assert_eq!(lines[0], "[cspm] CSPM Executive Dashboard");
        assert_eq!(lines.len(), 3 + 6);
        assert!(lines.iter().any(|l| l.contains("No Graph data available!")));
    }

    #[test]
    fn test_reset_dashboard() {
        let mut app = dashboard();
        app.handle(DashboardAction::RemoveWidget {
            widget_id: "image-risk".to_string(),
            category_id: "registry".to_string(),
        });

        let notice = app.handle(DashboardAction::ResetDashboard).unwrap();

        assert_eq!(notice.title, "Dashboard reset");
        assert_eq!(app.grid("registry").entries.len(), 2);
    }
}
