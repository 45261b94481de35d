//! AI vision analysis for eye-shape classification.

pub mod prompts;
pub mod types;
pub mod vision;

pub use types::*;
pub use vision::{
    decode_classification, AnalysisRequest, AnalysisService, Analyzer, GeminiService,
};
