//! Instructions and response schema for eye-shape classification calls.

use crate::analyzer::EyeShape;
use crate::language::Language;

pub const SYSTEM_INSTRUCTION: &str = "You are a professional makeup artist and facial anatomist. \
Your task is to accurately identify eye shapes from photos. Be encouraging and precise.";

/// Response schema in the service's OpenAPI-subset format.
///
/// Only the classification is requested; styling advice is resolved locally.
pub fn eye_shape_schema() -> serde_json::Value {
    let labels: Vec<&str> = EyeShape::ALL.iter().map(|s| s.label()).collect();

    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "shape": {
                "type": "STRING",
                "description": format!(
                    "The identified eye shape from the following list: {}.",
                    labels.join(", ")
                )
            },
            "confidence": {
                "type": "NUMBER",
                "description": "Confidence level of the analysis between 0 and 1."
            },
            "description": {
                "type": "STRING",
                "description": "A short explanation of why this eye shape fits, based on visible landmarks."
            },
            "features": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "maxItems": 3,
                "description": "Up to 3 short visual features observed, most relevant first (e.g. 'Visible crease', 'Outer corner lifts up')."
            }
        },
        "required": ["shape", "confidence", "description", "features"],
        "propertyOrdering": ["shape", "confidence", "description", "features"]
    })
}

/// Build the task instruction sent alongside the image.
pub fn build_classification_prompt(language: Language) -> String {
    let labels: Vec<&str> = EyeShape::ALL.iter().map(|s| s.label()).collect();

    let mut prompt = format!(
        r#"Analyze this image and identify the person's eye shape. Focus strictly on the eyes.
Classify it as exactly one of: {labels}.

Check these first:
- Corner height: compare the outer corner with the inner corner. Outer corner clearly higher means Upturned; clearly lower means Downturned.
- Crease: if no crease is visible on the lid, consider Monolid. If a crease exists but a fold of skin covers it with the eyes open, consider Hooded.

Return JSON only with the fields shape, confidence, description and features.
The shape value must be one of the labels above, written exactly as listed, in English."#,
        labels = labels.join(", ")
    );

    if language != Language::En {
        prompt.push_str(&format!(
            "\nWrite the description and features in {}.",
            language.english_name()
        ));
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_requires_exactly_four_fields() {
        let schema = eye_shape_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(required, vec!["shape", "confidence", "description", "features"]);

        let properties = schema["properties"].as_object().unwrap();
        assert_eq!(properties.len(), 4);
        assert!(!properties.contains_key("makeupTips"));
        assert!(!properties.contains_key("eyewearRecommendations"));
    }

    #[test]
    fn test_schema_types() {
        let schema = eye_shape_schema();
        assert_eq!(schema["type"], "OBJECT");
        assert_eq!(schema["properties"]["confidence"]["type"], "NUMBER");
        assert_eq!(schema["properties"]["features"]["items"]["type"], "STRING");
    }

    #[test]
    fn test_schema_lists_every_shape() {
        let schema = eye_shape_schema();
        let description = schema["properties"]["shape"]["description"].as_str().unwrap();
        for shape in EyeShape::ALL {
            assert!(description.contains(shape.label()));
        }
    }

    #[test]
    fn test_prompt_mentions_geometric_checks() {
        let prompt = build_classification_prompt(Language::En);
        assert!(prompt.contains("outer corner"));
        assert!(prompt.contains("Upturned"));
        assert!(prompt.contains("Downturned"));
        assert!(prompt.contains("crease"));
        assert!(prompt.contains("Monolid"));
        assert!(prompt.contains("Hooded"));
    }

    #[test]
    fn test_prompt_language_hint() {
        assert!(!build_classification_prompt(Language::En).contains("Write the description"));
        let thai = build_classification_prompt(Language::Th);
        assert!(thai.contains("Write the description and features in Thai."));
    }
}
