//! Result rendering.
//!
//! `render` is a pure derivation from a prediction to a `DisplayModel`;
//! front-ends apply the model to their own widgets and replace any earlier
//! one wholesale.

pub mod model;

use std::f64::consts::PI;

use crate::prediction::model::{PredictionResult, Severity, CLASS_LABELS};
use model::{ColoredText, ConfidenceRing, DisplayModel, ProbabilityBar};

/// Radius of the confidence ring, in SVG user units.
pub const RING_RADIUS: f64 = 90.0;

/// Derive the display model of a prediction.
pub fn render(result: &PredictionResult) -> DisplayModel {
    let severity = result.severity_value;
    let color = severity.color().to_string();

    let colored = |text: &str| ColoredText {
        text: text.to_string(),
        color: color.clone(),
    };

    DisplayModel {
        severity_value: severity.value(),
        badge: colored(&result.severity_class),
        diagnosis: colored(&result.severity_class),
        risk: colored(&result.info.risk),
        description: result.info.description.clone(),
        recommendation: result.info.recommendation.clone(),
        ring: confidence_ring(result.confidence, &color),
        bars: probability_bars(result),
        color,
    }
}

fn confidence_ring(confidence: f64, color: &str) -> ConfidenceRing {
    let fraction = clamp_percent(confidence) / 100.0;
    let circumference = 2.0 * PI * RING_RADIUS;

    ConfidenceRing {
        percent: confidence,
        fraction,
        sweep_degrees: fraction * 360.0,
        radius: RING_RADIUS,
        circumference,
        dash_offset: circumference - fraction * circumference,
        color: color.to_string(),
        label: format!("{}%", confidence),
    }
}

fn probability_bars(result: &PredictionResult) -> Vec<ProbabilityBar> {
    Severity::ALL
        .iter()
        .zip(CLASS_LABELS)
        .map(|(severity, label)| {
            let value = result.probability(label);
            ProbabilityBar {
                label: label.to_string(),
                value,
                width_percent: clamp_percent(value),
                color: severity.color().to_string(),
                value_label: format!("{:.1}%", value),
            }
        })
        .collect()
}

/// Clamp a 0–100 value, mapping non-finite input to zero.
fn clamp_percent(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Parse `#rrggbb` into its components.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::model::SeverityInfo;
    use std::collections::BTreeMap;

    fn prediction(severity: Severity, confidence: f64, probabilities: &[(&str, f64)]) -> PredictionResult {
        PredictionResult {
            severity_value: severity,
            severity_class: severity.label().to_string(),
            confidence,
            probabilities: probabilities
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect::<BTreeMap<_, _>>(),
            info: SeverityInfo {
                risk: "Medium".to_string(),
                description: "Moderate non-proliferative diabetic retinopathy detected.".to_string(),
                recommendation: "Consult with an ophthalmologist within 3-6 months.".to_string(),
                level: None,
                color: None,
            },
        }
    }

    #[test]
    fn test_moderate_render() {
        let result = prediction(
            Severity::Moderate,
            73.4,
            &[
                ("No DR", 5.0),
                ("Mild", 10.0),
                ("Moderate", 73.4),
                ("Severe", 8.0),
                ("Proliferative DR", 3.6),
            ],
        );
        let model = render(&result);

        assert_eq!(model.color, "#f59e0b");
        assert_eq!(model.badge.text, "Moderate");
        assert_eq!(model.badge.color, "#f59e0b");
        assert_eq!(model.risk.color, "#f59e0b");
        assert_eq!(model.ring.color, "#f59e0b");
        assert!((model.ring.fraction - 0.734).abs() < 1e-9);
        assert!((model.ring.sweep_degrees - 264.24).abs() < 1e-9);
        assert_eq!(model.ring.label, "73.4%");

        let widths: Vec<f64> = model.bars.iter().map(|b| b.width_percent).collect();
        assert_eq!(widths, vec![5.0, 10.0, 73.4, 8.0, 3.6]);
        let labels: Vec<&str> = model.bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, CLASS_LABELS.to_vec());
        assert_eq!(model.bars[4].value_label, "3.6%");
        assert_eq!(model.bars[0].value_label, "5.0%");
    }

    #[test]
    fn test_palette() {
        let colors: Vec<&str> = Severity::ALL.iter().map(|s| s.color()).collect();
        assert_eq!(colors, vec!["#10b981", "#3b82f6", "#f59e0b", "#ef4444", "#dc2626"]);
        for severity in Severity::ALL {
            let model = render(&prediction(severity, 50.0, &[]));
            assert_eq!(model.color, severity.color());
            assert_eq!(model.severity_value, severity.value());
        }
    }

    #[test]
    fn test_missing_probabilities_render_as_zero() {
        let model = render(&prediction(Severity::NoDr, 90.0, &[("No DR", 90.0)]));
        assert_eq!(model.bars.len(), 5);
        assert_eq!(model.bars[0].width_percent, 90.0);
        for bar in &model.bars[1..] {
            assert_eq!(bar.width_percent, 0.0);
            assert_eq!(bar.value_label, "0.0%");
        }
    }

    #[test]
    fn test_ring_geometry() {
        let full = render(&prediction(Severity::Severe, 100.0, &[]));
        assert!(full.ring.dash_offset.abs() < 1e-9);
        assert_eq!(full.ring.sweep_degrees, 360.0);
        assert_eq!(full.ring.label, "100%");

        let empty = render(&prediction(Severity::Severe, 0.0, &[]));
        assert!((empty.ring.dash_offset - 2.0 * PI * RING_RADIUS).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_range_values_clamped_for_drawing() {
        let model = render(&prediction(Severity::Mild, 140.0, &[("Mild", -3.0), ("Severe", 250.0)]));
        assert_eq!(model.ring.fraction, 1.0);
        assert_eq!(model.ring.label, "140%");
        assert_eq!(model.bars[1].width_percent, 0.0);
        assert_eq!(model.bars[3].width_percent, 100.0);

        let nan = render(&prediction(Severity::Mild, f64::NAN, &[]));
        assert_eq!(nan.ring.fraction, 0.0);
    }

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#f59e0b"), Some((0xf5, 0x9e, 0x0b)));
        assert_eq!(hex_to_rgb("f59e0b"), None);
        assert_eq!(hex_to_rgb("#fff"), None);
        assert_eq!(hex_to_rgb("#zzzzzz"), None);
    }
}
