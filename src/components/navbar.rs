use eyeshape_core::state::{Section, ViewState};
use eyeshape_core::Language;
use leptos::prelude::*;

use crate::context::use_app;
use crate::language::LanguageContext;

#[component]
pub fn Navbar() -> impl IntoView {
    let app = use_app();
    let (menu_open, set_menu_open) = signal(false);

    let go = move |section: Option<Section>| {
        set_menu_open.set(false);
        app.navigate(ViewState::Home, section);
    };

    view! {
        <nav class="navbar">
            <button class="navbar-brand" on:click=move |_| go(None)>
                <span class="brand-mark">"◉"</span>
                <span class="brand-name">"EyeShapeAI"</span>
            </button>

            <ul class="nav-list" class:nav-list-open=move || menu_open.get()>
                <li class="nav-item">
                    <button class="nav-link" on:click=move |_| go(None)>"Eye Shape Finder"</button>
                </li>
                <li class="nav-item">
                    <button class="nav-link" on:click=move |_| go(Some(Section::Shapes))>"Eye Shapes"</button>
                </li>
                <li class="nav-item">
                    <button class="nav-link" on:click=move |_| go(Some(Section::Faq))>"FAQ"</button>
                </li>
                <li class="nav-item">
                    <LanguageSelect />
                </li>
            </ul>

            <button
                class="nav-toggle"
                aria-label="Menu"
                on:click=move |_| set_menu_open.update(|open| *open = !*open)
            >
                {move || if menu_open.get() { "✕" } else { "☰" }}
            </button>
        </nav>
    }
}

/// Picks the language analysis text is written in.
#[component]
fn LanguageSelect() -> impl IntoView {
    let LanguageContext {
        language,
        set_language,
    } = expect_context::<LanguageContext>();

    view! {
        <select
            class="input language-select"
            aria-label="Result language"
            on:change=move |ev| {
                if let Some(choice) = Language::from_code(&event_target_value(&ev)) {
                    set_language.set(choice);
                }
            }
        >
            {Language::ALL
                .iter()
                .map(|&lang| {
                    view! {
                        <option value=lang.code() selected=move || language.get() == lang>
                            {lang.native_name()}
                        </option>
                    }
                })
                .collect::<Vec<_>>()}
        </select>
    }
}
