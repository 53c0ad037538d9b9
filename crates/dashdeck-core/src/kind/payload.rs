//! Typed views over widget payloads.

use crate::model::Widget;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Payload decoding errors.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("Widget '{widget}' payload does not match {expected}: {source}")]
    Mismatch {
        widget: String,
        expected: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

fn decode<T: DeserializeOwned>(widget: &Widget, expected: &'static str) -> Result<T, PayloadError> {
    serde_json::from_value(widget.data.clone()).map_err(|source| PayloadError::Mismatch {
        widget: widget.id.clone(),
        expected,
        source,
    })
}

/// One labelled slice of a donut chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub label: &'static str,
    pub value: u64,
    /// Hex colour, `#RRGGBB`.
    pub color: &'static str,
}

/// One labelled bar of a stacked severity bar.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSegment {
    pub label: &'static str,
    pub value: u64,
    /// Hex colour, `#RRGGBB`.
    pub color: &'static str,
    /// Width relative to the largest severity, in percent (0-100).
    pub width_percent: f64,
}

/// Payload of `cloudAccounts` widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudAccountsData {
    pub total: u64,
    pub connected: u64,
    pub not_connected: u64,
}

impl CloudAccountsData {
    pub fn from_widget(widget: &Widget) -> Result<Self, PayloadError> {
        decode(widget, "cloud accounts data")
    }

    pub fn segments(&self) -> [Segment; 2] {
        [
            Segment {
                label: "Connected",
                value: self.connected,
                color: "#3B82F6",
            },
            Segment {
                label: "Not Connected",
                value: self.not_connected,
                color: "#E5E7EB",
            },
        ]
    }
}

/// Payload of `riskAssessment` widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessmentData {
    pub total: u64,
    pub failed: u64,
    pub warning: u64,
    pub not_available: u64,
    pub passed: u64,
}

impl RiskAssessmentData {
    pub fn from_widget(widget: &Widget) -> Result<Self, PayloadError> {
        decode(widget, "risk assessment data")
    }

    /// Donut slices in legend order.
    pub fn segments(&self) -> [Segment; 4] {
        [
            Segment {
                label: "Failed",
                value: self.failed,
                color: "#DC2626",
            },
            Segment {
                label: "Warning",
                value: self.warning,
                color: "#F59E0B",
            },
            Segment {
                label: "Not available",
                value: self.not_available,
                color: "#E5E7EB",
            },
            Segment {
                label: "Passed",
                value: self.passed,
                color: "#10B981",
            },
        ]
    }
}

/// Payload of `imageRisk` and `imageSecurity` widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRiskData {
    pub total: u64,
    pub critical: u64,
    pub high: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<u64>,
}

impl ImageRiskData {
    pub fn from_widget(widget: &Widget) -> Result<Self, PayloadError> {
        decode(widget, "image risk data")
    }

    /// Severity bars. Medium and low are only shown when non-zero.
    pub fn bars(&self) -> Vec<BarSegment> {
        let medium = self.medium.filter(|&v| v > 0);
        let low = self.low.filter(|&v| v > 0);
        let max = self
            .critical
            .max(self.high)
            .max(medium.unwrap_or(0))
            .max(low.unwrap_or(0));

        let width = |value: u64| {
            if max == 0 {
                0.0
            } else {
                value as f64 / max as f64 * 100.0
            }
        };

        let mut bars = vec![
            BarSegment {
                label: "Critical",
                value: self.critical,
                color: "#DC2626",
                width_percent: width(self.critical),
            },
            BarSegment {
                label: "High",
                value: self.high,
                color: "#F97316",
                width_percent: width(self.high),
            },
        ];
        if let Some(value) = medium {
            bars.push(BarSegment {
                label: "Medium",
                value,
                color: "#FACC15",
                width_percent: width(value),
            });
        }
        if let Some(value) = low {
            bars.push(BarSegment {
                label: "Low",
                value,
                color: "#22C55E",
                width_percent: width(value),
            });
        }
        bars
    }
}
