use eyeshape_core::EyeShape;
use leptos::prelude::*;

fn blurb(shape: EyeShape) -> (&'static str, &'static str) {
    match shape {
        EyeShape::Almond => (
            "The versatile shape. Oval with slightly pointed ends.",
            "Balanced & Classic",
        ),
        EyeShape::Round => (
            "Large and open. Whites clearly visible around the iris.",
            "Bright & Youthful",
        ),
        EyeShape::Upturned => (
            "Outer corners lift higher than inner corners.",
            "Feline & Lifted",
        ),
        EyeShape::Downturned => (
            "Outer corners dip slightly lower than inner corners.",
            "Soulful & Vintage",
        ),
        EyeShape::WideSet => (
            "Distance between eyes is greater than one eye width.",
            "Exotic & Broad",
        ),
        EyeShape::CloseSet => (
            "Distance between eyes is less than one eye width.",
            "Intense & Focused",
        ),
        EyeShape::Monolid => (
            "Smooth surface with no visible crease on the lid.",
            "Sleek & Modern",
        ),
        EyeShape::Hooded => (
            "A skin fold obscures the crease, making the lid look smaller.",
            "Deep & Mysterious",
        ),
        EyeShape::DeepSet => (
            "Set deeper into the skull, creating a prominent brow bone.",
            "Defined & Strong",
        ),
    }
}

/// The eye-shape library shown on the home view.
#[component]
pub fn ShapesList() -> impl IntoView {
    view! {
        <section id="shapes" class="shapes-section">
            <h2 class="section-title">"Eye Shape Library: Which One Am I?"</h2>
            <p class="section-subtitle">
                "Explore the traits that define different eye shapes. Find your unique look."
            </p>
            <div class="card-grid">
                {EyeShape::ALL
                    .iter()
                    .map(|&shape| {
                        let (description, vibe) = blurb(shape);
                        view! {
                            <div class="card shape-card">
                                <h3>{shape.label()}</h3>
                                <p>{description}</p>
                                <span class="shape-vibe">{vibe}</span>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()}
            </div>
        </section>
    }
}
