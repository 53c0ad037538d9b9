//! Widget kinds for renderers.
//!
//! The store keeps a widget's type tag as an opaque string. This module lets
//! consumers classify that tag and decode the matching payload:
//! - [`WidgetKind`] maps a tag to one of the built-in visualizations
//! - typed payloads decode `Widget::data` on demand
//! - [`RendererRegistry`] dispatches on the tag with a generic fallback

mod payload;
mod registry;

pub use payload::{
    BarSegment, CloudAccountsData, ImageRiskData, PayloadError, RiskAssessmentData, Segment,
};
pub use registry::{RendererRegistry, WidgetRenderer};

use crate::model::Widget;

/// Type tag for custom, user-authored widgets.
pub const CUSTOM_WIDGET_TYPE: &str = "custom";

/// Visualization selected by a widget's type tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    /// Connected vs. disconnected cloud accounts.
    CloudAccounts,
    /// Donut of failed/warning/not-available/passed checks.
    RiskAssessment,
    /// Alert panel (no graph data).
    Alerts,
    /// Severity bars for image risk.
    ImageRisk,
    /// Severity bars for image security issues.
    ImageSecurity,
    /// User-authored widget, rendered with the generic panel.
    Custom,
    /// Any other tag. Rendered with the generic panel.
    Unknown(String),
}

impl WidgetKind {
    /// Classify a type tag. Matching is exact, like the grid's dispatch.
    pub fn from_type_tag(tag: &str) -> Self {
        match tag {
            "cloudAccounts" => Self::CloudAccounts,
            "riskAssessment" => Self::RiskAssessment,
            "alerts" => Self::Alerts,
            "imageRisk" => Self::ImageRisk,
            "imageSecurity" => Self::ImageSecurity,
            CUSTOM_WIDGET_TYPE => Self::Custom,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Classify a widget by its type tag.
    pub fn of(widget: &Widget) -> Self {
        Self::from_type_tag(&widget.widget_type)
    }

    /// The canonical type tag for this kind.
    pub fn type_tag(&self) -> &str {
        match self {
            Self::CloudAccounts => "cloudAccounts",
            Self::RiskAssessment => "riskAssessment",
            Self::Alerts => "alerts",
            Self::ImageRisk => "imageRisk",
            Self::ImageSecurity => "imageSecurity",
            Self::Custom => CUSTOM_WIDGET_TYPE,
            Self::Unknown(tag) => tag,
        }
    }

    /// Whether this kind falls back to the generic panel.
    pub fn is_generic(&self) -> bool {
        matches!(self, Self::Custom | Self::Unknown(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tags_round_trip() {
        for tag in [
            "cloudAccounts",
            "riskAssessment",
            "alerts",
            "imageRisk",
            "imageSecurity",
            "custom",
        ] {
            let kind = WidgetKind::from_type_tag(tag);
            assert!(!matches!(kind, WidgetKind::Unknown(_)), "{tag}");
            assert_eq!(kind.type_tag(), tag);
        }
    }

    #[test]
    fn test_unknown_tag_is_generic() {
        let kind = WidgetKind::from_type_tag("heatmap");
        assert_eq!(kind, WidgetKind::Unknown("heatmap".to_string()));
        assert!(kind.is_generic());
        assert_eq!(kind.type_tag(), "heatmap");
    }

    #[test]
    fn test_tag_match_is_case_sensitive() {
        assert!(matches!(
            WidgetKind::from_type_tag("CloudAccounts"),
            WidgetKind::Unknown(_)
        ));
    }
}
