use eyeshape_core::state::{Section, ViewState};
use leptos::prelude::*;

use crate::context::use_app;

#[component]
pub fn Footer() -> impl IntoView {
    let app = use_app();
    let year = js_sys::Date::new_0().get_full_year();

    view! {
        <footer class="footer">
            <div class="footer-brand">
                <span class="brand-mark">"◉"</span>
                "EyeShapeAI"
                <span class="footer-rights">{format!("© {} All rights reserved.", year)}</span>
            </div>
            <div class="footer-links">
                <button class="footer-link" on:click=move |_| app.navigate(ViewState::Home, None)>
                    "Home"
                </button>
                <button
                    class="footer-link"
                    on:click=move |_| app.navigate(ViewState::Home, Some(Section::Shapes))
                >
                    "Eye Shapes"
                </button>
                <button
                    class="footer-link"
                    on:click=move |_| app.navigate(ViewState::Home, Some(Section::Faq))
                >
                    "FAQ"
                </button>
                <button
                    class="footer-link"
                    on:click=move |_| app.navigate(ViewState::PrivacyInfo, None)
                >
                    "Privacy Policy"
                </button>
                <a class="footer-link" href="mailto:support@eyeshapeai.com">"support@eyeshapeai.com"</a>
            </div>
        </footer>
    }
}
