//! Live selfie capture.
//!
//! Mounted only while the state machine is in camera mode. The open
//! [`LiveSession`] lives in this component's owner, so unmounting (close,
//! snapshot, navigation, reset) drops it and releases the camera.

use eyeshape_core::capture::{begin_live_capture, LiveSession};
use leptos::html::Video;
use leptos::prelude::*;
use tracing::warn;
use wasm_bindgen_futures::spawn_local;

use crate::browser::{self, BrowserCamera, ObjectUrlPreviews, WebTrack};
use crate::context::use_app;

#[component]
pub fn CameraView() -> impl IntoView {
    let state = use_app().state;
    let video_ref = NodeRef::<Video>::new();
    let session: StoredValue<Option<LiveSession<WebTrack>>, LocalStorage> =
        StoredValue::new_local(None);
    let (streaming, set_streaming) = signal(false);

    Effect::new(move |started: Option<bool>| {
        if started == Some(true) {
            return true;
        }
        let Some(video) = video_ref.get() else {
            return false;
        };
        spawn_local(async move {
            let camera = BrowserCamera::new(video);
            match begin_live_capture(&camera).await {
                Ok(live) => {
                    // Hands the session back if this view is already gone;
                    // dropping it releases the camera.
                    if session.try_set_value(Some(live)).is_none() {
                        set_streaming.set(true);
                    }
                }
                Err(e) => state.update(|s| s.camera_failed(e)),
            }
        });
        true
    });

    on_cleanup(move || {
        let _ = session.try_update_value(|s| s.take());
    });

    let capture = move |_| {
        let Some(video) = video_ref.get_untracked() else {
            return;
        };
        let frame = match browser::grab_frame(&video) {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Snapshot skipped: {}", e);
                return;
            }
        };
        let Some(live) = session.try_update_value(|s| s.take()).flatten() else {
            return;
        };
        match live.snapshot(&frame) {
            Ok(image) => state.update(|s| s.select_image(image, &ObjectUrlPreviews)),
            Err(e) => state.update(|s| {
                s.close_camera();
                s.capture_rejected(e);
            }),
        }
    };

    view! {
        <div class="camera-view">
            <div class="camera-frame">
                <video
                    node_ref=video_ref
                    class="camera-video"
                    autoplay=true
                    playsinline=true
                    prop:muted=true
                ></video>
                <button
                    class="camera-close"
                    aria-label="Close camera"
                    on:click=move |_| state.update(|s| s.close_camera())
                >
                    "✕"
                </button>
            </div>
            <button
                class="camera-shutter"
                aria-label="Take Photo"
                disabled=move || !streaming.get()
                on:click=capture
            >
                <span class="camera-shutter-inner"></span>
            </button>
            <p class="camera-tip">"Make sure your eyes are clearly visible"</p>
        </div>
    }
}
