//! Built-in dashboard used when nothing has been stored yet.

use crate::model::{Category, DashboardState, Widget};
use serde_json::json;

fn category(id: &str, name: &str, widgets: &[&str]) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        widget_ids: widgets.iter().map(|w| w.to_string()).collect(),
    }
}

fn widget(
    id: &str,
    title: &str,
    widget_type: &str,
    content: &str,
    data: serde_json::Value,
    category_id: &str,
) -> Widget {
    Widget {
        id: id.to_string(),
        title: title.to_string(),
        content: Some(content.to_string()),
        widget_type: widget_type.to_string(),
        data,
        category_ids: vec![category_id.to_string()],
    }
}

/// Seed categories in display order.
pub fn seed_categories() -> Vec<Category> {
    vec![
        category(
            "cspm",
            "CSPM Executive Dashboard",
            &["cloud-accounts", "risk-assessment"],
        ),
        category(
            "cwpp",
            "CWPP Dashboard",
            &["namespace-alerts", "workload-alerts"],
        ),
        category("registry", "Registry Scan", &["image-risk", "image-security"]),
    ]
}

/// Seed widgets in display order.
pub fn seed_widgets() -> Vec<Widget> {
    vec![
        widget(
            "cloud-accounts",
            "Cloud Accounts",
            "cloudAccounts",
            "Shows connected and disconnected cloud accounts",
            json!({ "total": 2, "connected": 1, "notConnected": 1 }),
            "cspm",
        ),
        widget(
            "risk-assessment",
            "Cloud Account Risk Assessment",
            "riskAssessment",
            "Displays risk assessment for cloud accounts",
            json!({
                "total": 9659,
                "failed": 1689,
                "warning": 681,
                "notAvailable": 36,
                "passed": 7253,
            }),
            "cspm",
        ),
        widget(
            "namespace-alerts",
            "Top 5 Namespace Specific Alerts",
            "alerts",
            "Shows top namespace alerts",
            json!({}),
            "cwpp",
        ),
        widget(
            "workload-alerts",
            "Workload Alerts",
            "alerts",
            "Displays workload alerts",
            json!({}),
            "cwpp",
        ),
        widget(
            "image-risk",
            "Image Risk Assessment",
            "imageRisk",
            "Shows risk assessment for images",
            json!({ "total": 1470, "critical": 9, "high": 150 }),
            "registry",
        ),
        widget(
            "image-security",
            "Image Security Issues",
            "imageSecurity",
            "Displays security issues for images",
            json!({ "total": 2, "critical": 2, "high": 2 }),
            "registry",
        ),
    ]
}

/// The full seed dashboard.
pub fn seed_state() -> DashboardState {
    DashboardState::new(seed_categories(), seed_widgets())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_consistent() {
        let state = seed_state();
        assert_eq!(state.categories.len(), 3);
        assert_eq!(state.widgets.len(), 6);
        assert!(state.check_membership().is_ok());
    }

    #[test]
    fn test_seed_cspm_order() {
        let state = seed_state();
        let cspm = state.category("cspm").unwrap();
        assert_eq!(cspm.widget_ids, vec!["cloud-accounts", "risk-assessment"]);
    }
}
