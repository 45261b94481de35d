use eyeshape_core::Language;
use leptos::prelude::*;

/// Response language for analysis requests. Held in memory only.
#[derive(Clone, Copy)]
pub struct LanguageContext {
    pub language: ReadSignal<Language>,
    pub set_language: WriteSignal<Language>,
}

/// Set `lang` on `<html>`.
pub fn apply_language(language: Language) {
    if let Some(html) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    {
        let _ = html.set_attribute("lang", language.code());
    }
}
