use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EyeShapeError {
    #[error("Invalid media type: {0}")]
    InvalidMediaType(String),

    #[error("Camera unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl EyeShapeError {
    /// Short message suitable for the hero error banner.
    pub fn user_message(&self) -> &'static str {
        match self {
            EyeShapeError::InvalidMediaType(_) => "Please upload a valid image file.",
            EyeShapeError::DeviceUnavailable(_) => {
                "Unable to access camera. Please check permissions."
            }
            EyeShapeError::AnalysisFailed(_) => {
                "We couldn't analyze this photo. Please try again."
            }
            EyeShapeError::Encoding(_) => "This photo could not be processed. Try another one.",
            EyeShapeError::Storage(_) => "Could not save a share link in this browser.",
            EyeShapeError::Config(_) => "The app is misconfigured.",
        }
    }

    /// Whether the hero should offer a "Try Again" button for this error.
    pub fn is_retryable(&self) -> bool {
        matches!(self, EyeShapeError::AnalysisFailed(_))
    }
}

impl From<EyeShapeError> for String {
    fn from(err: EyeShapeError) -> Self {
        err.to_string()
    }
}

pub type Result<T> = std::result::Result<T, EyeShapeError>;
