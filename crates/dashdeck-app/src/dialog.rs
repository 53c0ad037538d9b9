//! Add-widget dialog state.
//!
//! Holds the tab, search, selection and create-widget form of the dialog.
//! Rendering is up to the frontend; this type decides what the list shows
//! and what confirming does to the store.

use crate::notice::Notice;
use dashdeck_core::{Storage, Widget, WidgetDraft, WidgetStore, CUSTOM_WIDGET_TYPE};

/// Content given to custom widgets created without one.
pub const DEFAULT_CUSTOM_CONTENT: &str = "Custom widget";

/// Tabs of the add-widget dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogTab {
    #[default]
    Cspm,
    Cwpp,
    Image,
    Ticket,
}

impl DialogTab {
    /// All tabs in display order.
    pub const ALL: [DialogTab; 4] = [Self::Cspm, Self::Cwpp, Self::Image, Self::Ticket];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Cspm => "CSPM",
            Self::Cwpp => "CWPP",
            Self::Image => "Image",
            Self::Ticket => "Ticket",
        }
    }

    /// Parse a tab label. Unknown labels are `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.label() == label)
    }

    /// Category that confirmed selections are added to.
    pub fn category_id(&self) -> &'static str {
        match self {
            Self::Cspm => "cspm",
            Self::Cwpp => "cwpp",
            Self::Image => "registry",
            Self::Ticket => "ticket",
        }
    }

    /// Tab that opens for a category. Unmapped categories open on CSPM.
    pub fn for_category(category_id: &str) -> Self {
        match category_id {
            "cwpp" => Self::Cwpp,
            "registry" => Self::Image,
            _ => Self::Cspm,
        }
    }

    /// Substring a widget's type must contain to be listed, if any.
    pub fn type_filter(&self) -> Option<&'static str> {
        match self {
            Self::Cspm => Some("cloud"),
            Self::Cwpp => Some("alerts"),
            Self::Image => Some("image"),
            Self::Ticket => None,
        }
    }

    fn accepts(&self, widget: &Widget) -> bool {
        self.type_filter()
            .is_none_or(|needle| widget.widget_type.contains(needle))
    }
}

/// Add-widget dialog model.
#[derive(Debug, Clone, Default)]
pub struct AddWidgetDialog {
    active_tab: DialogTab,
    search_query: String,
    selected: Vec<String>,
    /// Whether the create-widget form is showing instead of the list.
    creating: bool,
    new_name: String,
    new_content: String,
    new_category: String,
}

impl AddWidgetDialog {
    /// Open the dialog, optionally for a specific category.
    pub fn open(initial_category: Option<&str>) -> Self {
        Self {
            active_tab: initial_category.map(DialogTab::for_category).unwrap_or_default(),
            new_category: initial_category.unwrap_or_default().to_string(),
            ..Self::default()
        }
    }

    pub fn active_tab(&self) -> DialogTab {
        self.active_tab
    }

    /// Switch tabs. Clears the search.
    pub fn set_tab(&mut self, tab: DialogTab) {
        self.active_tab = tab;
        self.search_query.clear();
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Widgets the list shows: a store-wide search when a query is typed,
    /// otherwise every widget the active tab accepts.
    pub fn visible_widgets<'s, S: Storage>(&self, store: &'s WidgetStore<S>) -> Vec<&'s Widget> {
        if self.search_query.trim().is_empty() {
            store
                .all_widgets()
                .iter()
                .filter(|w| self.active_tab.accepts(w))
                .collect()
        } else {
            store.search_widgets(&self.search_query)
        }
    }

    /// Text shown when [`visible_widgets`](Self::visible_widgets) is empty.
    pub fn empty_message(&self) -> &'static str {
        if self.search_query.is_empty() {
            "No widgets available for this category"
        } else {
            "No widgets found matching your search"
        }
    }

    /// Select or deselect a widget.
    pub fn toggle(&mut self, widget_id: &str) {
        if let Some(pos) = self.selected.iter().position(|id| id == widget_id) {
            self.selected.remove(pos);
        } else {
            self.selected.push(widget_id.to_string());
        }
    }

    pub fn is_selected(&self, widget_id: &str) -> bool {
        self.selected.iter().any(|id| id == widget_id)
    }

    /// Selected widget IDs in selection order.
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn can_confirm(&self) -> bool {
        !self.selected.is_empty()
    }

    /// Add every selected widget to the active tab's category.
    ///
    /// Returns `None` when nothing is selected. Clears selection and search.
    pub fn confirm<S: Storage>(&mut self, store: &mut WidgetStore<S>) -> Option<Notice> {
        if self.selected.is_empty() {
            return None;
        }

        let category_id = self.active_tab.category_id();
        if store.category(category_id).is_none() {
            log::warn!("Add-widget dialog targets missing category '{category_id}'");
            return Some(Notice::destructive(
                "Widgets not added",
                format!("The {} section is not available.", self.active_tab.label()),
            ));
        }

        let count = self.selected.len();
        for widget_id in &self.selected {
            let change = store.add_widget_to_category(widget_id, category_id);
            if change.is_not_found() {
                log::warn!("Skipped widget '{widget_id}': {change:?}");
            }
        }

        self.selected.clear();
        self.search_query.clear();
        Some(Notice::new(
            "Widgets added",
            format!("{count} widget(s) have been added to the dashboard."),
        ))
    }

    // --- Create-widget form ---

    pub fn is_creating(&self) -> bool {
        self.creating
    }

    pub fn start_creating(&mut self) {
        self.creating = true;
    }

    pub fn cancel_creating(&mut self) {
        self.creating = false;
    }

    pub fn set_new_name(&mut self, name: impl Into<String>) {
        self.new_name = name.into();
    }

    pub fn set_new_content(&mut self, content: impl Into<String>) {
        self.new_content = content.into();
    }

    pub fn set_new_category(&mut self, category_id: impl Into<String>) {
        self.new_category = category_id.into();
    }

    /// A name and a category are required.
    pub fn can_create(&self) -> bool {
        !self.new_name.trim().is_empty() && !self.new_category.is_empty()
    }

    /// Create a custom widget from the form and reset the form.
    ///
    /// An incomplete form or a missing category leaves the form as it is and
    /// yields a destructive notice instead.
    pub fn create<S: Storage>(
        &mut self,
        store: &mut WidgetStore<S>,
    ) -> Result<(Widget, Notice), Notice> {
        if !self.can_create() {
            return Err(Notice::destructive(
                "Widget not created",
                "A widget name and a category are required.",
            ));
        }
        if store.category(&self.new_category).is_none() {
            log::warn!("Create-widget form targets missing category '{}'", self.new_category);
            return Err(Notice::destructive(
                "Widget not created",
                format!("The category '{}' is not available.", self.new_category),
            ));
        }

        let content = if self.new_content.is_empty() {
            DEFAULT_CUSTOM_CONTENT.to_string()
        } else {
            std::mem::take(&mut self.new_content)
        };
        let name = std::mem::take(&mut self.new_name);
        let draft = WidgetDraft::new(name.clone(), CUSTOM_WIDGET_TYPE)
            .with_content(content)
            .in_category(std::mem::take(&mut self.new_category));

        let widget = store.create_widget(draft);

        self.new_content.clear();
        self.creating = false;
        self.search_query.clear();
        let notice = Notice::new(
            "Widget created",
            format!("\"{name}\" has been added to the dashboard."),
        );
        Ok((widget, notice))
    }
}
