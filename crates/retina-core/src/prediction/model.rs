//! Prediction service wire models.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Class labels in display order, indexed by severity value.
pub const CLASS_LABELS: [&str; 5] = ["No DR", "Mild", "Moderate", "Severe", "Proliferative DR"];

/// Diabetic retinopathy grade, least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub enum Severity {
    NoDr,
    Mild,
    Moderate,
    Severe,
    Proliferative,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Self::NoDr,
        Self::Mild,
        Self::Moderate,
        Self::Severe,
        Self::Proliferative,
    ];

    /// Numeric grade, 0 through 4.
    pub fn value(&self) -> u8 {
        match self {
            Self::NoDr => 0,
            Self::Mild => 1,
            Self::Moderate => 2,
            Self::Severe => 3,
            Self::Proliferative => 4,
        }
    }

    /// Parse a numeric grade; anything outside 0..=4 is `None`.
    pub fn from_value(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::NoDr),
            1 => Some(Self::Mild),
            2 => Some(Self::Moderate),
            3 => Some(Self::Severe),
            4 => Some(Self::Proliferative),
            _ => None,
        }
    }

    /// Canonical class label as used in the `probabilities` map.
    pub fn label(&self) -> &'static str {
        CLASS_LABELS[self.value() as usize]
    }

    /// Hex display color of this grade.
    pub fn color(&self) -> &'static str {
        match self {
            Self::NoDr => "#10b981",
            Self::Mild => "#3b82f6",
            Self::Moderate => "#f59e0b",
            Self::Severe => "#ef4444",
            Self::Proliferative => "#dc2626",
        }
    }
}

impl TryFrom<i64> for Severity {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_value(value)
            .ok_or_else(|| format!("severity_value must be between 0 and 4, got {}", value))
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity.value()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Clinical guidance attached to a grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityInfo {
    pub risk: String,
    pub description: String,
    pub recommendation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Successful response of `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub severity_value: Severity,
    pub severity_class: String,
    pub confidence: f64,
    #[serde(default)]
    pub probabilities: BTreeMap<String, f64>,
    pub info: SeverityInfo,
}

impl PredictionResult {
    /// Probability of a class, zero when the service omitted it.
    pub fn probability(&self, class: &str) -> f64 {
        self.probabilities.get(class).copied().unwrap_or(0.0)
    }
}

/// Response of `GET /health`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub model_loaded: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

impl HealthStatus {
    /// An absent flag counts as not loaded.
    pub fn is_model_loaded(&self) -> bool {
        self.model_loaded.unwrap_or(false)
    }
}

/// Response of `GET /classes`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassCatalog {
    pub classes: Vec<String>,
    #[serde(default)]
    pub info: Vec<SeverityInfo>,
}

/// Error body returned with non-success statuses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Extract the `error` message from a raw body, if there is one.
    pub fn message_from(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.trim().is_empty())
    }
}
