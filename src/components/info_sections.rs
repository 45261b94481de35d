use eyeshape_core::state::ViewState;
use leptos::prelude::*;

use crate::context::use_app;

static FEATURES: [(&str, &str); 3] = [
    (
        "Master Your Makeup",
        "Learn the exact angles and techniques to make your specific eye shape pop.",
    ),
    (
        "Find Your Frames",
        "Discover glasses that balance your brow bone and highlight your best features.",
    ),
    (
        "Boost Confidence",
        "Embrace your unique look with architectural styling tips designed just for you.",
    ),
];

#[component]
pub fn InfoSections() -> impl IntoView {
    let app = use_app();

    view! {
        <section class="cta-section">
            <h2 class="section-title">"Ready To Find Your Eye Shape?"</h2>
            <p class="section-subtitle">
                "Stop guessing. Instantly identify your eye shape in seconds with AI."
            </p>
            <button class="btn btn-primary" on:click=move |_| app.navigate(ViewState::Home, None)>
                "Reveal My Shape"
            </button>
        </section>

        <section class="why-section">
            <h2 class="section-title">"Why It Matters"</h2>
            <p class="section-subtitle">
                "Your eye shape is the blueprint for your style. Unlock personalized makeup and eyewear potential."
            </p>
            <div class="card-grid">
                {FEATURES
                    .iter()
                    .map(|(title, description)| view! {
                        <div class="card">
                            <h3>{*title}</h3>
                            <p>{*description}</p>
                        </div>
                    })
                    .collect::<Vec<_>>()}
            </div>
        </section>
    }
}
