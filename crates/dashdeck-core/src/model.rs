//! Dashboard data model: categories, widgets and their membership graph.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A named dashboard section holding an ordered list of widget references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique category identifier.
    pub id: String,
    /// Display label.
    pub name: String,
    /// Member widget IDs in display order.
    #[serde(rename = "widgets", default)]
    pub widget_ids: Vec<String>,
}

impl Category {
    /// Create a category with no widgets.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            widget_ids: Vec::new(),
        }
    }

    /// Check whether a widget is listed in this category.
    pub fn contains(&self, widget_id: &str) -> bool {
        self.widget_ids.iter().any(|id| id == widget_id)
    }
}

/// A single visualization panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    /// Unique widget identifier, never reassigned.
    pub id: String,
    /// Display label.
    pub title: String,
    /// Optional description shown under the title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Type tag selecting the renderer. Opaque to the store.
    #[serde(rename = "type")]
    pub widget_type: String,
    /// Renderer-specific payload. Opaque to the store.
    #[serde(default)]
    pub data: serde_json::Value,
    /// IDs of the categories this widget belongs to.
    #[serde(rename = "categories", default)]
    pub category_ids: Vec<String>,
}

impl Widget {
    /// Check whether this widget records membership in a category.
    pub fn in_category(&self, category_id: &str) -> bool {
        self.category_ids.iter().any(|id| id == category_id)
    }

    /// Case-insensitive substring match against title, content and type.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self
                .content
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(needle))
            || self.widget_type.to_lowercase().contains(needle)
    }
}

/// Everything needed to create a widget except its ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetDraft {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(rename = "type")]
    pub widget_type: String,
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(rename = "categories", default)]
    pub category_ids: Vec<String>,
}

impl WidgetDraft {
    /// Start a draft with a title and type tag.
    pub fn new(title: impl Into<String>, widget_type: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: None,
            widget_type: widget_type.into(),
            data: serde_json::Value::Object(Default::default()),
            category_ids: Vec::new(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }

    pub fn in_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_ids.push(category_id.into());
        self
    }

    /// Turn the draft into a widget with the given ID.
    pub(crate) fn into_widget(self, id: String) -> Widget {
        Widget {
            id,
            title: self.title,
            content: self.content,
            widget_type: self.widget_type,
            data: self.data,
            category_ids: self.category_ids,
        }
    }
}

/// The complete dashboard state: all categories and all widgets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardState {
    pub categories: Vec<Category>,
    pub widgets: Vec<Widget>,
}

impl DashboardState {
    pub fn new(categories: Vec<Category>, widgets: Vec<Widget>) -> Self {
        Self { categories, widgets }
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub(crate) fn category_mut(&mut self, id: &str) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| c.id == id)
    }

    pub fn widget(&self, id: &str) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id == id)
    }

    pub(crate) fn widget_mut(&mut self, id: &str) -> Option<&mut Widget> {
        self.widgets.iter_mut().find(|w| w.id == id)
    }

    /// Check the bidirectional membership invariant.
    ///
    /// Returns the first violation found, described for logging.
    pub fn check_membership(&self) -> Result<(), String> {
        for category in &self.categories {
            let mut seen = HashSet::new();
            for widget_id in &category.widget_ids {
                if !seen.insert(widget_id.as_str()) {
                    return Err(format!(
                        "category '{}' lists widget '{}' twice",
                        category.id, widget_id
                    ));
                }
                match self.widget(widget_id) {
                    Some(w) if w.in_category(&category.id) => {}
                    Some(_) => {
                        return Err(format!(
                            "widget '{}' is listed in category '{}' but does not record it",
                            widget_id, category.id
                        ));
                    }
                    None => {
                        return Err(format!(
                            "category '{}' lists unknown widget '{}'",
                            category.id, widget_id
                        ));
                    }
                }
            }
        }
        for widget in &self.widgets {
            for category_id in &widget.category_ids {
                match self.category(category_id) {
                    Some(c) if c.contains(&widget.id) => {}
                    Some(_) => {
                        return Err(format!(
                            "widget '{}' records category '{}' which does not list it",
                            widget.id, category_id
                        ));
                    }
                    None => {
                        return Err(format!(
                            "widget '{}' records unknown category '{}'",
                            widget.id, category_id
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    /// Repair a state that may have been edited outside the store.
    ///
    /// Drops references to unknown IDs, removes duplicates and makes
    /// one-sided memberships symmetric. Returns a message per repair.
    pub fn sanitize(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();

        let widget_ids: HashSet<String> = self.widgets.iter().map(|w| w.id.clone()).collect();
        let category_ids: HashSet<String> =
            self.categories.iter().map(|c| c.id.clone()).collect();

        for category in &mut self.categories {
            let mut seen = HashSet::new();
            category.widget_ids.retain(|id| {
                if !widget_ids.contains(id) {
                    warnings.push(format!(
                        "category '{}' referenced unknown widget '{}'; dropped",
                        category.id, id
                    ));
                    return false;
                }
                if !seen.insert(id.clone()) {
                    warnings.push(format!(
                        "category '{}' listed widget '{}' more than once; deduplicated",
                        category.id, id
                    ));
                    return false;
                }
                true
            });
        }

        for widget in &mut self.widgets {
            let mut seen = HashSet::new();
            widget.category_ids.retain(|id| {
                if !category_ids.contains(id) {
                    warnings.push(format!(
                        "widget '{}' referenced unknown category '{}'; dropped",
                        widget.id, id
                    ));
                    return false;
                }
                seen.insert(id.clone())
            });
        }

        // Category side first: a category listing a widget wins.
        let mut missing_on_widget = Vec::new();
        for category in &self.categories {
            for widget_id in &category.widget_ids {
                let linked = self
                    .widget(widget_id)
                    .is_none_or(|w| w.in_category(&category.id));
                if !linked {
                    missing_on_widget.push((widget_id.clone(), category.id.clone()));
                }
            }
        }
        for (widget_id, category_id) in missing_on_widget {
            warnings.push(format!(
                "widget '{}' did not record category '{}'; linked",
                widget_id, category_id
            ));
            if let Some(widget) = self.widget_mut(&widget_id) {
                widget.category_ids.push(category_id);
            }
        }

        let mut missing_in_category = Vec::new();
        for widget in &self.widgets {
            for category_id in &widget.category_ids {
                let listed = self
                    .category(category_id)
                    .is_none_or(|c| c.contains(&widget.id));
                if !listed {
                    missing_in_category.push((widget.id.clone(), category_id.clone()));
                }
            }
        }
        for (widget_id, category_id) in missing_in_category {
            warnings.push(format!(
                "category '{}' did not list widget '{}'; appended",
                category_id, widget_id
            ));
            if let Some(category) = self.category_mut(&category_id) {
                category.widget_ids.push(widget_id);
            }
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn widget(id: &str, categories: &[&str]) -> Widget {
        Widget {
            id: id.to_string(),
            title: id.to_uppercase(),
            content: None,
            widget_type: "custom".to_string(),
            data: json!({}),
            category_ids: categories.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn category(id: &str, widgets: &[&str]) -> Category {
        let mut c = Category::new(id, id.to_uppercase());
        c.widget_ids = widgets.iter().map(|s| s.to_string()).collect();
        c
    }

    #[test]
    fn test_widget_serializes_with_wire_names() {
        let w = widget("w1", &["a"]);
        let value = serde_json::to_value(&w).unwrap();

        assert_eq!(value["type"], "custom");
        assert_eq!(value["categories"], json!(["a"]));
        assert!(value.get("content").is_none());
        assert!(value.get("widget_type").is_none());
    }

    #[test]
    fn test_category_serializes_widgets_field() {
        let c = category("a", &["w1", "w2"]);
        let value = serde_json::to_value(&c).unwrap();
        assert_eq!(value["widgets"], json!(["w1", "w2"]));
    }

    #[test]
    fn test_matches_lowercase_fields() {
        let mut w = widget("w1", &[]);
        w.title = "Cloud Accounts".to_string();
        w.content = Some("Shows Connected accounts".to_string());
        w.widget_type = "cloudAccounts".to_string();

        assert!(w.matches_lowercase("cloud"));
        assert!(w.matches_lowercase("connected"));
        assert!(w.matches_lowercase("accounts"));
        assert!(!w.matches_lowercase("image"));
    }

    #[test]
    fn test_check_membership_consistent() {
        let state = DashboardState::new(
            vec![category("a", &["w1"]), category("b", &[])],
            vec![widget("w1", &["a"]), widget("w2", &[])],
        );
        assert!(state.check_membership().is_ok());
    }

    #[test]
    fn test_check_membership_detects_one_sided_link() {
        let state = DashboardState::new(vec![category("a", &["w1"])], vec![widget("w1", &[])]);
        assert!(state.check_membership().is_err());

        let state = DashboardState::new(vec![category("a", &[])], vec![widget("w1", &["a"])]);
        assert!(state.check_membership().is_err());
    }

    #[test]
    fn test_sanitize_repairs_state() {
        let mut state = DashboardState::new(
            vec![
                category("a", &["w1", "w1", "ghost"]),
                category("b", &[]),
            ],
            vec![widget("w1", &[]), widget("w2", &["b", "nowhere"])],
        );

        let warnings = state.sanitize();

        assert!(!warnings.is_empty());
        assert!(state.check_membership().is_ok());
        assert_eq!(state.category("a").unwrap().widget_ids, vec!["w1"]);
        assert_eq!(state.category("b").unwrap().widget_ids, vec!["w2"]);
        assert_eq!(state.widget("w1").unwrap().category_ids, vec!["a"]);
        assert_eq!(state.widget("w2").unwrap().category_ids, vec!["b"]);
    }

    #[test]
    fn test_sanitize_clean_state_has_no_warnings() {
        let mut state = DashboardState::new(vec![category("a", &["w1"])], vec![widget("w1", &["a"])]);
        assert!(state.sanitize().is_empty());
    }
}
