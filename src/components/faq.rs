use leptos::prelude::*;

static FAQS: [(&str, &str); 6] = [
    (
        "How exactly does the AI determine my eye shape?",
        "Our smart AI scans your photo for specific facial landmarks, like the visibility of your crease, the angle of your outer corners, and the amount of iris visible. It compares these measurements against expert definitions to pinpoint your unique shape instantly.",
    ),
    (
        "What are the main eye shape categories?",
        "We analyze for the major architectural types: Almond, Round, Monolid, Hooded, Upturned, Downturned, Wide-set, Close-set, and Deep-set. Keep in mind, many people are a beautiful blend of these traits (e.g., 'Hooded Almond')!",
    ),
    (
        "What is the difference between Hooded and Monolid eyes?",
        "It comes down to the crease! Hooded eyes have a visible crease that is tucked away under a fold of skin when looking straight ahead. Monolid eyes typically have a flat, smooth lid with no visible crease line. Both offer unique canvases for stunning makeup looks.",
    ),
    (
        "Why does shape matter for my makeup routine?",
        "Geometry is the secret to professional-looking makeup. Knowing your shape tells you exactly where to place your wing to 'lift' your face, or where to apply shadow to create depth. It stops you from fighting your features and starts helping you enhance them.",
    ),
    (
        "Can this result help me choose the perfect glasses?",
        "100%. Frame shopping becomes effortless when you know the rule of opposites. Round eyes often look best in angular, geometric frames, while sharper shapes shine in softer, curved glasses. Your result gives you the blueprint to balance your overall look.",
    ),
    (
        "Is my eye shape permanent?",
        "Mostly, yes. It's part of your DNA! However, time plays a role. As we age, skin elasticity changes, often making eyes appear more hooded or downturned over time. Re-checking your shape every few years ensures your styling strategy evolves with you.",
    ),
];

/// Accordion: at most one answer open at a time.
#[component]
pub fn Faq() -> impl IntoView {
    let (open_index, set_open_index) = signal::<Option<usize>>(None);

    view! {
        <section id="faq" class="faq-section">
            <h2 class="section-title">"Frequently Asked Questions"</h2>
            <div class="faq-list">
                {FAQS
                    .iter()
                    .enumerate()
                    .map(|(index, (question, answer))| {
                        let is_open = move || open_index.get() == Some(index);
                        view! {
                            <div class="faq-item" class:faq-item-open=is_open>
                                <button
                                    class="faq-question"
                                    on:click=move |_| set_open_index.update(|open| {
                                        *open = if *open == Some(index) { None } else { Some(index) };
                                    })
                                >
                                    <span>{*question}</span>
                                    <span class="faq-toggle">{move || if is_open() { "−" } else { "+" }}</span>
                                </button>
                                <Show when=is_open>
                                    <p class="faq-answer">{*answer}</p>
                                </Show>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()}
            </div>
        </section>
    }
}
