//! Result view: the composed analysis with its advice and actions.

use eyeshape_core::AnalysisResult;
use leptos::prelude::*;
use tracing::error;
use wasm_bindgen_futures::spawn_local;

use crate::browser;
use crate::context::use_app;

#[component]
pub fn ResultCard(result: AnalysisResult, preview: Option<String>) -> impl IntoView {
    let app = use_app();
    let (share_note, set_share_note) = signal::<Option<&'static str>>(None);

    let percent = result.confidence_percent();
    let bar_width = format!("{:.1}%", result.confidence_bar_width());

    let on_share = move |_| {
        let Some(result) = app.state.with_untracked(|s| s.result().cloned()) else {
            return;
        };
        match app.shares.with_value(|store| store.save(&result)) {
            Ok(id) => {
                let link = browser::share_link_for(&id);
                app.state.update(|s| s.mark_shared(id));
                spawn_local(async move {
                    let copied = match link {
                        Some(link) => browser::copy_to_clipboard(&link).await,
                        None => false,
                    };
                    set_share_note.set(Some(if copied {
                        "Link copied to clipboard"
                    } else {
                        "Share link is in the address bar"
                    }));
                });
            }
            Err(e) => {
                error!("Share failed: {}", e);
                set_share_note.set(Some(e.user_message()));
            }
        }
    };

    view! {
        <div class="result-layout">
            <style>{include_str!("result_card.css")}</style>

            <aside class="identity-card">
                <div class="identity-image">
                    {match preview {
                        Some(src) => view! {
                            <img src=src alt="Analyzed eye" />
                        }.into_any(),
                        None => view! {
                            <div class="identity-placeholder">"Image not saved"</div>
                        }.into_any(),
                    }}
                    <span class="match-badge">{format!("{} Match", percent)}</span>
                </div>

                <span class="result-kicker">"My Analysis"</span>
                <h2 class="result-shape">{format!("{} Eyes", result.shape)}</h2>

                <div class="confidence">
                    <div class="confidence-row">
                        <span class="confidence-label">"Confidence"</span>
                        <span class="confidence-value">{percent.clone()}</span>
                    </div>
                    <div class="confidence-track">
                        <div class="confidence-bar" style:width=bar_width></div>
                    </div>
                </div>

                <button class="btn btn-primary btn-block" on:click=move |_| app.reset()>
                    "Scan Another"
                </button>
                <button class="btn btn-secondary btn-block" on:click=on_share>
                    "Share"
                </button>
                {move || share_note.get().map(|note| view! { <p class="share-note">{note}</p> })}
            </aside>

            <div class="result-details">
                <div class="card">
                    <h3>"Why This Shape?"</h3>
                    <p class="result-description">{result.description.clone()}</p>
                </div>

                <div class="card">
                    <h3>"Key Features"</h3>
                    <ul class="feature-grid">
                        {result.features.iter().map(|feature| view! {
                            <li class="feature-item">{feature.clone()}</li>
                        }).collect::<Vec<_>>()}
                    </ul>
                </div>

                <div class="card">
                    <h3>"Recommended Frames"</h3>
                    <div class="frame-grid">
                        {result.eyewear_recommendations.iter().map(|frame| view! {
                            <div class="frame-item">{frame.clone()}</div>
                        }).collect::<Vec<_>>()}
                    </div>
                </div>

                <div class="card card-accent">
                    <h3>"Styling Strategy"</h3>
                    <ol class="tip-list">
                        {result.makeup_tips.iter().enumerate().map(|(i, tip)| view! {
                            <li class="tip-item">
                                <span class="tip-number">{i + 1}</span>
                                <p>{tip.clone()}</p>
                            </li>
                        }).collect::<Vec<_>>()}
                    </ol>
                </div>
            </div>
        </div>
    }
}
