//! Category grid: the widgets of one dashboard section.

use crate::notice::Notice;
use dashdeck_core::kind::{CloudAccountsData, ImageRiskData, RiskAssessmentData};
use dashdeck_core::{
    Category, MembershipChange, RendererRegistry, Storage, Widget, WidgetKind, WidgetStore,
};

/// One cell of the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridEntry<'s> {
    pub widget: &'s Widget,
    pub kind: WidgetKind,
}

/// View model for one category's grid.
#[derive(Debug, Clone)]
pub struct CategoryGrid<'s> {
    pub category: Option<&'s Category>,
    pub entries: Vec<GridEntry<'s>>,
}

impl<'s> CategoryGrid<'s> {
    /// Build the grid for a category. Unknown categories give an empty grid.
    pub fn new<S: Storage>(store: &'s WidgetStore<S>, category_id: &str) -> Self {
        let entries = store
            .widgets_by_category(category_id)
            .into_iter()
            .map(|widget| GridEntry {
                kind: WidgetKind::of(widget),
                widget,
            })
            .collect();
        Self {
            category: store.category(category_id),
            entries,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Remove a widget from a category on user request.
///
/// Returns a notice only when something was removed.
pub fn remove_from_grid<S: Storage>(
    store: &mut WidgetStore<S>,
    widget_id: &str,
    category_id: &str,
) -> Option<Notice> {
    match store.remove_widget_from_category(widget_id, category_id) {
        MembershipChange::Removed => Some(Notice::destructive(
            "Widget removed",
            "The widget has been removed from this category.",
        )),
        other => {
            log::debug!("Remove of '{widget_id}' from '{category_id}' ignored: {other:?}");
            None
        }
    }
}

fn generic_summary(widget: &Widget) -> String {
    match &widget.content {
        Some(content) => format!("{}: {}", widget.title, content),
        None => widget.title.clone(),
    }
}

fn cloud_accounts_summary(widget: &Widget) -> String {
    match CloudAccountsData::from_widget(widget) {
        Ok(data) => format!(
            "{}: {} total ({} connected, {} not connected)",
            widget.title, data.total, data.connected, data.not_connected
        ),
        Err(e) => {
            log::warn!("{e}");
            generic_summary(widget)
        }
    }
}

fn risk_assessment_summary(widget: &Widget) -> String {
    match RiskAssessmentData::from_widget(widget) {
        Ok(data) => {
            let legend: Vec<String> = data
                .segments()
                .iter()
                .map(|s| format!("{} ({})", s.label, s.value))
                .collect();
            format!("{}: {} total; {}", widget.title, data.total, legend.join(", "))
        }
        Err(e) => {
            log::warn!("{e}");
            generic_summary(widget)
        }
    }
}

fn image_risk_summary(widget: &Widget) -> String {
    match ImageRiskData::from_widget(widget) {
        Ok(data) => {
            let legend: Vec<String> = data
                .bars()
                .iter()
                .map(|b| format!("{} ({})", b.label, b.value))
                .collect();
            format!(
                "{}: {} total vulnerabilities; {}",
                widget.title,
                data.total,
                legend.join(", ")
            )
        }
        Err(e) => {
            log::warn!("{e}");
            generic_summary(widget)
        }
    }
}

fn alerts_summary(widget: &Widget) -> String {
    format!("{}: No Graph data available!", widget.title)
}

/// One-line text renderers for every built-in widget kind.
pub fn text_renderers() -> RendererRegistry<String> {
    let mut registry = RendererRegistry::new(generic_summary);
    registry.register(WidgetKind::CloudAccounts.type_tag(), cloud_accounts_summary);
    registry.register(WidgetKind::RiskAssessment.type_tag(), risk_assessment_summary);
    registry.register(WidgetKind::Alerts.type_tag(), alerts_summary);
    registry.register(WidgetKind::ImageRisk.type_tag(), image_risk_summary);
    registry.register(WidgetKind::ImageSecurity.type_tag(), image_risk_summary);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashdeck_core::{MemoryStorage, WidgetDraft};
    use serde_json::json;
    use std::sync::Arc;

    fn store() -> WidgetStore<MemoryStorage> {
        WidgetStore::open_with_storage(Arc::new(MemoryStorage::new()))
    }

    #[test]
    fn test_grid_entries_classified() {
        let store = store();
        let grid = CategoryGrid::new(&store, "cspm");

        assert_eq!(grid.category.map(|c| c.name.as_str()), Some("CSPM Executive Dashboard"));
        let kinds: Vec<&WidgetKind> = grid.entries.iter().map(|e| &e.kind).collect();
        assert_eq!(kinds, vec![&WidgetKind::CloudAccounts, &WidgetKind::RiskAssessment]);
    }

    #[test]
    fn test_unknown_category_grid_is_empty() {
        let store = store();
        let grid = CategoryGrid::new(&store, "missing");
        assert!(grid.category.is_none());
        assert!(grid.is_empty());
    }

    #[test]
    fn test_remove_from_grid() {
        let mut store = store();

        let notice = remove_from_grid(&mut store, "risk-assessment", "cspm").unwrap();
        assert_eq!(notice.title, "Widget removed");
        assert_eq!(notice.variant, crate::notice::NoticeVariant::Destructive);

        // Second removal is a no-op
        assert!(remove_from_grid(&mut store, "risk-assessment", "cspm").is_none());
        assert_eq!(CategoryGrid::new(&store, "cspm").entries.len(), 1);
    }

    #[test]
    fn test_text_renderers() {
        let mut store = store();
        let renderers = text_renderers();

        let cloud = store.widget("cloud-accounts").unwrap();
        assert_eq!(
            renderers.render(cloud),
            "Cloud Accounts: 2 total (1 connected, 1 not connected)"
        );

        let risk = store.widget("risk-assessment").unwrap();
        assert!(renderers.render(risk).contains("Failed (1689)"));

        let image = store.widget("image-security").unwrap();
        assert_eq!(
            renderers.render(image),
            "Image Security Issues: 2 total vulnerabilities; Critical (2), High (2)"
        );

        let alerts = store.widget("workload-alerts").unwrap();
        assert_eq!(renderers.render(alerts), "Workload Alerts: No Graph data available!");

        let custom = store.create_widget(
            WidgetDraft::new("Notes", "custom").with_content("Custom widget"),
        );
        assert_eq!(renderers.render(&custom), "Notes: Custom widget");
    }

    #[test]
    fn test_bad_payload_falls_back_to_generic() {
        let mut store = store();
        let widget = store.create_widget(
            WidgetDraft::new("Broken", "riskAssessment").with_data(json!({ "total": "many" })),
        );
        assert_eq!(text_renderers().render(&widget), "Broken");
    }
}
