//! Language selection carried into the analysis request.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
    Th,
    Zh,
    Vi,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::En,
        Language::Hi,
        Language::Th,
        Language::Zh,
        Language::Vi,
    ];

    /// ISO 639-1 code, also the serialized form.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Th => "th",
            Language::Zh => "zh",
            Language::Vi => "vi",
        }
    }

    /// English name used inside the model instruction.
    pub fn english_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "Hindi",
            Language::Th => "Thai",
            Language::Zh => "Simplified Chinese",
            Language::Vi => "Vietnamese",
        }
    }

    /// Label shown in the language picker.
    pub fn native_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "हिन्दी",
            Language::Th => "ไทย",
            Language::Zh => "中文",
            Language::Vi => "Tiếng Việt",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_lowercase();
        Language::ALL.into_iter().find(|l| l.code() == code)
    }
}
