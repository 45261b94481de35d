//! Core of EyeShapeAI: image capture, transport encoding, vision-model
//! classification, static styling advice and the view state machine.
//!
//! Nothing in here touches the DOM. Browser facilities (camera, object URLs,
//! local storage) are reached through the traits in [`capture`], [`state`]
//! and [`share`], so the whole flow runs natively under test.

pub mod advice;
pub mod analyzer;
pub mod capture;
pub mod compose;
pub mod config;
pub mod encoder;
pub mod error;
pub mod language;
pub mod share;
pub mod state;

pub use analyzer::{AnalysisResult, AnalysisService, Analyzer, EyeShape, GeminiService};
pub use capture::{CameraDevice, CameraTrack, CapturedImage, Frame, LiveSession};
pub use config::AppConfig;
pub use error::{EyeShapeError, Result};
pub use language::Language;
pub use share::{KeyValueStorage, ShareStore};
pub use state::{AnalysisOutcome, AnalysisTicket, AppState, PreviewRegistry, ScrollTarget, Section, ViewState};
