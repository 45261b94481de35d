//! Type definitions for eye-shape analysis.
//!
//! `ShapeClassification` is what the vision model returns; `AnalysisResult`
//! is the composed record the views display and the share store persists.

use serde::{Deserialize, Serialize};

/// The closed set of shapes the model is asked to choose from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EyeShape {
    Almond,
    Round,
    Monolid,
    Hooded,
    Downturned,
    Upturned,
    WideSet,
    CloseSet,
    DeepSet,
}

impl EyeShape {
    pub const ALL: [EyeShape; 9] = [
        EyeShape::Almond,
        EyeShape::Round,
        EyeShape::Monolid,
        EyeShape::Hooded,
        EyeShape::Downturned,
        EyeShape::Upturned,
        EyeShape::WideSet,
        EyeShape::CloseSet,
        EyeShape::DeepSet,
    ];

    /// Label exactly as it appears in model output.
    pub fn label(self) -> &'static str {
        match self {
            EyeShape::Almond => "Almond",
            EyeShape::Round => "Round",
            EyeShape::Monolid => "Monolid",
            EyeShape::Hooded => "Hooded",
            EyeShape::Downturned => "Downturned",
            EyeShape::Upturned => "Upturned",
            EyeShape::WideSet => "Wide-set",
            EyeShape::CloseSet => "Close-set",
            EyeShape::DeepSet => "Deep-set",
        }
    }

    /// Exact-match lookup. Anything else is an unknown label.
    pub fn from_label(label: &str) -> Option<Self> {
        EyeShape::ALL.into_iter().find(|s| s.label() == label)
    }
}

/// Fields produced by the vision model. `shape` is kept as a raw label:
/// values outside [`EyeShape::ALL`] are accepted and resolve to default advice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeClassification {
    pub shape: String,
    pub confidence: f64,
    pub description: String,
    pub features: Vec<String>,
}

/// Composed analysis record. Built once per successful analysis and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub shape: String,
    pub confidence: f64,
    pub description: String,
    pub features: Vec<String>,
    pub makeup_tips: Vec<String>,
    pub eyewear_recommendations: Vec<String>,
}

impl AnalysisResult {
    /// Confidence as a percentage with one decimal, e.g. `87.0%`.
    pub fn confidence_percent(&self) -> String {
        format!("{:.1}%", self.confidence * 100.0)
    }

    /// Width for the confidence bar, clamped to 0..=100.
    pub fn confidence_bar_width(&self) -> f64 {
        (self.confidence * 100.0).clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result(confidence: f64) -> AnalysisResult {
        AnalysisResult {
            shape: "Round".to_string(),
            confidence,
            description: "Large and open".to_string(),
            features: vec!["Visible iris whites".to_string()],
            makeup_tips: vec!["Tip".to_string()],
            eyewear_recommendations: vec!["Frame".to_string()],
        }
    }

    #[test]
    fn test_labels_roundtrip() {
        for shape in EyeShape::ALL {
            assert_eq!(EyeShape::from_label(shape.label()), Some(shape));
        }
    }

    #[test]
    fn test_from_label_is_exact_match() {
        assert_eq!(EyeShape::from_label("round"), None);
        assert_eq!(EyeShape::from_label("Wide set"), None);
        assert_eq!(EyeShape::from_label("Oval"), None);
        assert_eq!(EyeShape::from_label(""), None);
    }

    #[test]
    fn test_confidence_percent_formatting() {
        assert_eq!(sample_result(0.87).confidence_percent(), "87.0%");
        assert_eq!(sample_result(0.9234).confidence_percent(), "92.3%");
        assert_eq!(sample_result(1.0).confidence_percent(), "100.0%");
    }

    #[test]
    fn test_confidence_bar_is_clamped() {
        assert_eq!(sample_result(1.4).confidence_bar_width(), 100.0);
        assert_eq!(sample_result(-0.2).confidence_bar_width(), 0.0);
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let json = serde_json::to_value(sample_result(0.5)).unwrap();
        assert!(json.get("makeupTips").is_some());
        assert!(json.get("eyewearRecommendations").is_some());
        assert!(json.get("makeup_tips").is_none());
    }

    #[test]
    fn test_classification_ignores_extra_fields() {
        let json = r#"{
            "shape": "Hooded",
            "confidence": 0.7,
            "description": "Fold over the crease",
            "features": ["Hidden crease"],
            "makeupTips": ["should be ignored"]
        }"#;
        let parsed: ShapeClassification = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.shape, "Hooded");
        assert_eq!(parsed.features, vec!["Hidden crease".to_string()]);
    }

    #[test]
    fn test_classification_requires_all_fields() {
        let json = r#"{"shape": "Round", "confidence": 0.7, "description": "x"}"#;
        assert!(serde_json::from_str::<ShapeClassification>(json).is_err());
    }
}
