//! Hero section: photo upload, camera entry point and the Analyze action.

use eyeshape_core::{CapturedImage, EyeShapeError};
use leptos::html::Input;
use leptos::prelude::*;
use tracing::{error, info};
use wasm_bindgen_futures::spawn_local;

use crate::browser::{self, ObjectUrlPreviews};
use crate::components::camera_view::CameraView;
use crate::context::use_app;
use crate::language::LanguageContext;

#[component]
pub fn Hero() -> impl IntoView {
    let app = use_app();
    let state = app.state;
    let language = expect_context::<LanguageContext>().language;
    let file_input = NodeRef::<Input>::new();
    let (is_reading, set_is_reading) = signal(false);
    let (is_over, set_is_over) = signal(false);

    let camera_open = Memo::new(move |_| state.with(|s| s.is_camera_open()));
    let analyzing = Memo::new(move |_| state.with(|s| s.is_analyzing()));
    let can_analyze = Memo::new(move |_| state.with(|s| s.can_analyze()));
    let selected_name =
        Memo::new(move |_| state.with(|s| s.selection().map(|img| img.file_name.clone())));
    let preview = Memo::new(move |_| state.with(|s| s.preview().map(str::to_string)));
    let current_error = Memo::new(move |_| state.with(|s| s.error().cloned()));

    let accept_file = move |file: web_sys::File| {
        // Reject by declared type before buffering the whole file
        if let Err(e) = CapturedImage::check_declared_type(&file.name(), &file.type_()) {
            state.update(|s| s.capture_rejected(e));
            return;
        }
        set_is_reading.set(true);
        spawn_local(async move {
            let outcome = match browser::read_file_bytes(&file).await {
                Ok(bytes) => CapturedImage::from_upload(file.name(), &file.type_(), bytes),
                Err(e) => Err(EyeShapeError::Encoding(e)),
            };
            match outcome {
                Ok(image) => state.update(|s| s.select_image(image, &ObjectUrlPreviews)),
                Err(e) => state.update(|s| s.capture_rejected(e)),
            }
            set_is_reading.set(false);
        });
    };

    let on_input_change = move |ev: web_sys::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            accept_file(file);
        }
        // Allow picking the same file again
        input.set_value("");
    };

    let on_drop = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        set_is_over.set(false);
        if let Some(file) = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|files| files.get(0))
        {
            accept_file(file);
        }
    };

    let browse = move || {
        if let Some(input) = file_input.get_untracked() {
            input.click();
        }
    };

    let analyze = move || {
        let mut ticket = None;
        state.update(|s| ticket = s.begin_analysis());
        let Some(ticket) = ticket else {
            return;
        };
        let language = language.get_untracked();
        let analyzer = app.analyzer.get_value();
        spawn_local(async move {
            let outcome = match analyzer {
                Ok(analyzer) => analyzer.analyze(&ticket.image, language).await,
                Err(e) => Err(e),
            };
            if let Err(e) = &outcome {
                error!("Analysis {} failed: {}", ticket.id(), e);
            }
            state.update(|s| {
                let applied = s.finish_analysis(ticket, outcome);
                info!("Analysis outcome: {:?}", applied);
            });
        });
    };

    let open_camera = move |_| {
        state.update(|s| {
            s.open_camera();
        });
    };

    view! {
        <section id="finder" class="hero">
            <style>{include_str!("hero.css")}</style>

            <Show
                when=move || camera_open.get()
                fallback=move || view! {
                    <h1 class="hero-title">
                        "AI Eye Shape Finder"
                        <span class="hero-subtitle">"What Is My Eye Shape?"</span>
                    </h1>
                    <p class="hero-desc">
                        "Instantly identify your eye shape with AI. Get personalized makeup tips & eyewear recommendations."
                    </p>

                    <div class="upload-bar">
                        <div
                            class="drop-zone"
                            class:drop-zone-active=move || is_over.get()
                            class:drop-zone-loading=move || is_reading.get()
                            on:click=move |_| browse()
                            on:dragover=move |ev: web_sys::DragEvent| {
                                ev.prevent_default();
                                set_is_over.set(true);
                            }
                            on:dragleave=move |_| set_is_over.set(false)
                            on:drop=on_drop
                        >
                            <span class="drop-icon">"⇪"</span>
                            <div class="drop-text">
                                <span class="drop-main">
                                    {move || selected_name.get().unwrap_or_else(|| "Upload photo...".to_string())}
                                </span>
                                <span class="drop-hint">
                                    {move || if selected_name.with(Option::is_some) {
                                        "Ready to analyze"
                                    } else {
                                        "JPG, PNG supported"
                                    }}
                                </span>
                            </div>
                        </div>

                        <div class="upload-actions">
                            <button
                                class="btn btn-primary btn-analyze"
                                disabled=move || !can_analyze.get()
                                on:click=move |_| analyze()
                            >
                                {move || if analyzing.get() {
                                    view! { <span class="spinner"></span> "Analyzing..." }.into_any()
                                } else {
                                    view! { "Analyze" }.into_any()
                                }}
                            </button>
                            <button
                                class="btn btn-primary btn-camera"
                                title="Take a Selfie"
                                disabled=move || analyzing.get()
                                on:click=open_camera
                            >
                                "📷"
                            </button>
                        </div>
                    </div>

                    <input
                        node_ref=file_input
                        type="file"
                        accept="image/*"
                        style="display: none"
                        on:change=on_input_change
                    />

                    <p class="hero-privacy">"100% Private. Photos are never stored."</p>

                    {move || preview.get().map(|src| view! {
                        <div class="hero-preview">
                            <img src=src class="preview-image" alt="Eye shape analysis preview" />
                            <div class="preview-actions">
                                <button
                                    class="btn btn-secondary"
                                    disabled=move || analyzing.get()
                                    on:click=move |_| browse()
                                >
                                    "Change Photo"
                                </button>
                                <button
                                    class="btn btn-danger"
                                    disabled=move || analyzing.get()
                                    on:click=move |_| state.update(|s| s.clear_selection(&ObjectUrlPreviews))
                                >
                                    "Remove"
                                </button>
                            </div>
                        </div>
                    })}
                }
            >
                <CameraView />
            </Show>

            {move || current_error.get().map(|err| {
                let retry = err.is_retryable() && selected_name.with(Option::is_some) && !camera_open.get();
                view! {
                    <div class="hero-error">
                        <span class="error-message">{err.user_message()}</span>
                        {retry.then(|| view! {
                            <button
                                class="btn btn-secondary"
                                disabled=move || analyzing.get()
                                on:click=move |_| analyze()
                            >
                                "Try Again"
                            </button>
                        })}
                        <button
                            class="error-dismiss"
                            aria-label="Dismiss"
                            on:click=move |_| state.update(|s| s.dismiss_message())
                        >
                            "✕"
                        </button>
                    </div>
                }
            })}
        </section>
    }
}
