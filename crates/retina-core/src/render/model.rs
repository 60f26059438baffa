//! Display models.
//!
//! Everything a front-end needs to draw a result, with no knowledge of how
//! it gets drawn.

use serde::Serialize;

/// Colored text element (badge, diagnosis, risk).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColoredText {
    pub text: String,
    pub color: String,
}

/// Circular confidence gauge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidenceRing {
    /// Confidence as reported, 0–100.
    pub percent: f64,
    /// Filled share of the ring, clamped to 0..=1.
    pub fraction: f64,
    pub sweep_degrees: f64,
    pub radius: f64,
    pub circumference: f64,
    /// SVG stroke-dashoffset producing `fraction` of a full stroke.
    pub dash_offset: f64,
    pub color: String,
    pub label: String,
}

/// One per-class probability bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbabilityBar {
    pub label: String,
    pub value: f64,
    /// Bar width in percent of the track, clamped to 0..=100.
    pub width_percent: f64,
    pub color: String,
    pub value_label: String,
}

/// Complete render of one prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayModel {
    pub severity_value: u8,
    pub color: String,
    pub badge: ColoredText,
    pub diagnosis: ColoredText,
    pub risk: ColoredText,
    pub description: String,
    pub recommendation: String,
    pub ring: ConfidenceRing,
    pub bars: Vec<ProbabilityBar>,
}
