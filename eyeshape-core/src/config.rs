//! Application configuration.
//!
//! Defaults live in `config/default.toml` (embedded at build time). The
//! process environment overrides them at startup. On wasm there is no
//! runtime environment, so the build environment is consulted instead.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{EyeShapeError, Result};
use crate::language::Language;

const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_API_KEY_FALLBACK: &str = "API_KEY";
pub const ENV_MODEL: &str = "EYESHAPE_MODEL";
pub const ENV_ENDPOINT: &str = "EYESHAPE_ENDPOINT";
pub const ENV_LANGUAGE: &str = "EYESHAPE_LANGUAGE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Credential for the analysis service. Absence is tolerated until a request is made.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub request_timeout_secs: u64,
    pub language: Language,
    pub share_ttl_hours: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-3-pro-preview".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            request_timeout_secs: 60,
            language: Language::En,
            share_ttl_hours: 168,
        }
    }
}

impl AppConfig {
    /// Parse a (possibly partial) TOML document; missing keys take defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| EyeShapeError::Config(e.to_string()))
    }

    /// Embedded defaults overlaid with environment overrides.
    pub fn load() -> Self {
        let mut config = Self::from_toml_str(DEFAULT_CONFIG).unwrap_or_else(|e| {
            warn!("Embedded config is invalid ({}), using built-in defaults", e);
            Self::default()
        });
        config.apply_overrides(lookup_env);

        info!(
            "Config loaded: model={}, language={}, api_key_set={}",
            config.model,
            config.language.code(),
            config.has_api_key()
        );
        config
    }

    /// Apply overrides from a key lookup. Blank values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(ENV_API_KEY).or_else(|| get(ENV_API_KEY_FALLBACK)) {
            self.api_key = Some(key.trim().to_string());
        }
        if let Some(model) = get(ENV_MODEL) {
            self.model = model.trim().to_string();
        }
        if let Some(endpoint) = get(ENV_ENDPOINT) {
            self.endpoint = endpoint.trim().trim_end_matches('/').to_string();
        }
        if let Some(code) = get(ENV_LANGUAGE) {
            match Language::from_code(&code) {
                Some(language) => self.language = language,
                None => warn!("Ignoring unknown {} value '{}'", ENV_LANGUAGE, code),
            }
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

fn lookup_env(key: &str) -> Option<String> {
    std::env::var(key).ok().or_else(|| build_env(key))
}

/// Values captured from the build environment.
fn build_env(key: &str) -> Option<String> {
    let value = match key {
        ENV_API_KEY => option_env!("GEMINI_API_KEY"),
        ENV_API_KEY_FALLBACK => option_env!("API_KEY"),
        ENV_MODEL => option_env!("EYESHAPE_MODEL"),
        ENV_ENDPOINT => option_env!("EYESHAPE_ENDPOINT"),
        ENV_LANGUAGE => option_env!("EYESHAPE_LANGUAGE"),
        _ => None,
    };
    value.map(str::to_string)
}
