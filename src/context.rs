use eyeshape_core::state::{Section, ViewState};
use eyeshape_core::{AppState, Analyzer, EyeShapeError, GeminiService, ShareStore};
use leptos::prelude::*;

use crate::browser::{BrowserStorage, ObjectUrlPreviews};

pub type SharedAnalyzer = Result<Analyzer<GeminiService>, EyeShapeError>;

/// Handles every view reads application state through.
#[derive(Clone, Copy)]
pub struct AppContext {
    pub state: RwSignal<AppState>,
    pub analyzer: StoredValue<SharedAnalyzer, LocalStorage>,
    pub shares: StoredValue<ShareStore<BrowserStorage>, LocalStorage>,
}

impl AppContext {
    pub fn navigate(&self, view: ViewState, section: Option<Section>) {
        self.state.update(|s| s.navigate(view, section));
    }

    pub fn reset(&self) {
        self.state.update(|s| s.reset(&ObjectUrlPreviews));
    }
}

pub fn use_app() -> AppContext {
    expect_context::<AppContext>()
}
