//! Merge model output with static advice into the final result record.

use crate::advice::AdviceEntry;
use crate::analyzer::{AnalysisResult, ShapeClassification};

/// Build the result. Tips and frames always come from `advice`.
pub fn compose(classification: ShapeClassification, advice: &AdviceEntry) -> AnalysisResult {
    let ShapeClassification {
        shape,
        confidence,
        description,
        features,
    } = classification;

    AnalysisResult {
        shape,
        confidence,
        description,
        features,
        makeup_tips: to_owned_list(advice.makeup_tips),
        eyewear_recommendations: to_owned_list(advice.eyewear_recommendations),
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
