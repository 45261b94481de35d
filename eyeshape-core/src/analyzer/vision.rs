//! Vision API call for eye-shape classification.
//!
//! [`Analyzer`] builds one request per image, awaits one response and
//! decodes it against the classification schema. Any failure along the way
//! (transport, empty body, malformed JSON, missing fields) collapses into
//! `EyeShapeError::AnalysisFailed`. No retries happen here.

use std::time::Duration;

use tracing::{error, info};

use super::prompts::{build_classification_prompt, eye_shape_schema, SYSTEM_INSTRUCTION};
use super::types::{AnalysisResult, ShapeClassification};
use crate::advice;
use crate::capture::CapturedImage;
use crate::compose::compose;
use crate::config::AppConfig;
use crate::encoder::{encode, TransportPayload};
use crate::error::{EyeShapeError, Result};
use crate::language::Language;

/// One classification request, independent of transport.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub image: TransportPayload,
    pub instruction: String,
    pub system_instruction: String,
    pub response_schema: serde_json::Value,
}

impl AnalysisRequest {
    pub fn new(image: &CapturedImage, language: Language) -> Self {
        Self {
            image: encode(image),
            instruction: build_classification_prompt(language),
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            response_schema: eye_shape_schema(),
        }
    }
}

/// The external classification service.
#[allow(async_fn_in_trait)]
pub trait AnalysisService {
    /// Send the request and return the model's text, or `None` if the
    /// response carried no text.
    async fn generate(
        &self,
        request: &AnalysisRequest,
    ) -> std::result::Result<Option<String>, String>;
}

/// Gemini `generateContent` over HTTPS.
#[derive(Debug, Clone)]
pub struct GeminiService {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    endpoint: String,
    timeout: Duration,
}

impl GeminiService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| EyeShapeError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
            model: config.model.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.request_timeout_secs),
        })
    }

    /// The `generateContent` POST. The timeout is set per request so it
    /// also applies to the browser fetch backend.
    fn build_request(&self, request: &AnalysisRequest, api_key: &str) -> reqwest::RequestBuilder {
        self.client
            .post(self.url())
            .timeout(self.timeout)
            .header("x-goog-api-key", api_key)
            .header("content-type", "application/json")
            .json(&Self::request_body(request))
    }

    pub fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    /// Request body in the `generateContent` wire format.
    pub fn request_body(request: &AnalysisRequest) -> serde_json::Value {
        serde_json::json!({
            "systemInstruction": {
                "parts": [{ "text": request.system_instruction }]
            },
            "contents": [{
                "role": "user",
                "parts": [
                    {
                        "inlineData": {
                            "mimeType": request.image.mime_type,
                            "data": request.image.data
                        }
                    },
                    { "text": request.instruction }
                ]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": request.response_schema
            }
        })
    }
}

impl AnalysisService for GeminiService {
    async fn generate(
        &self,
        request: &AnalysisRequest,
    ) -> std::result::Result<Option<String>, String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| "API key not configured".to_string())?;

        let response = self
            .build_request(request, api_key)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    "Vision API request timed out".to_string()
                } else {
                    format!("Vision API request failed: {}", e)
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| format!("Failed to read vision API response body: {}", e))?;

        if !status.is_success() {
            return Err(format!(
                "Vision API error: {} - {}",
                status,
                truncate(&body, 512)
            ));
        }

        let json: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| format!("Failed to parse vision API response wrapper: {}", e))?;
        Ok(extract_text(&json))
    }
}

/// Concatenate the text parts of the first candidate.
pub fn extract_text(response: &serde_json::Value) -> Option<String> {
    let parts = response["candidates"][0]["content"]["parts"].as_array()?;
    let text: String = parts.iter().filter_map(|p| p["text"].as_str()).collect();
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Runs classification against a service and composes the result.
#[derive(Debug, Clone)]
pub struct Analyzer<S> {
    service: S,
}

impl<S: AnalysisService> Analyzer<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Classify one image. All-or-nothing: no partial result is ever returned.
    pub async fn analyze(&self, image: &CapturedImage, language: Language) -> Result<AnalysisResult> {
        info!(
            "Analyzing '{}' ({}, {} bytes)",
            image.file_name,
            image.mime_type,
            image.size_bytes()
        );
        let request = AnalysisRequest::new(image, language);

        let text = match self.service.generate(&request).await {
            Ok(Some(text)) => text,
            Ok(None) => {
                error!("Vision API returned no analysis text");
                return Err(EyeShapeError::AnalysisFailed(
                    "No analysis result returned from the model".to_string(),
                ));
            }
            Err(e) => {
                error!("{}", e);
                return Err(EyeShapeError::AnalysisFailed(e));
            }
        };

        let classification = decode_classification(&text)?;
        let entry = advice::resolve(&classification.shape);
        let result = compose(classification, entry);
        info!(
            "Analysis complete: shape={}, confidence={}",
            result.shape,
            result.confidence_percent()
        );
        Ok(result)
    }
}

/// Decode model text into the classification fields.
pub fn decode_classification(text: &str) -> Result<ShapeClassification> {
    let cleaned = strip_markdown_json(text);
    if cleaned.is_empty() {
        return Err(EyeShapeError::AnalysisFailed("Empty model response".to_string()));
    }

    let mut classification: ShapeClassification =
        serde_json::from_str(&cleaned).map_err(|e| {
            let msg = format!(
                "Model response does not match schema: {}. Raw response: {}",
                e,
                truncate(&cleaned, 300)
            );
            error!("{}", msg);
            EyeShapeError::AnalysisFailed(msg)
        })?;

    classification.shape = classification.shape.trim().to_string();
    if classification.description.trim().is_empty() {
        return Err(EyeShapeError::AnalysisFailed(
            "Model response has an empty description".to_string(),
        ));
    }
    classification
        .features
        .retain(|feature| !feature.trim().is_empty());

    Ok(classification)
}

/// Strip a surrounding Markdown code fence, if any.
fn strip_markdown_json(text: &str) -> String {
    let trimmed = text.trim();
    if let Some(rest) = trimmed.strip_prefix("```") {
        // Drop the whole opening line, whatever language tag it carries.
        let body = match rest.find('\n') {
            Some(pos) => &rest[pos + 1..],
            None => rest,
        };
        let body = body.trim_end();
        body.strip_suffix("```").unwrap_or(body).trim().to_string()
    } else {
        trimmed.to_string()
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
