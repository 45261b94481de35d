//! Browser implementations of the core's host traits, plus the small DOM
//! helpers the views need.

use eyeshape_core::capture::{CameraDevice, CameraTrack, Frame};
use eyeshape_core::share::{self, KeyValueStorage};
use eyeshape_core::state::{PreviewRegistry, ScrollTarget};
use eyeshape_core::CapturedImage;
use js_sys::{Array, Object, Reflect, Uint8Array};
use tracing::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Blob, BlobPropertyBag, CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement,
    MediaStream, MediaStreamConstraints, MediaStreamTrack, MediaStreamTrackState, ScrollBehavior,
    ScrollIntoViewOptions, ScrollToOptions, Url,
};

fn js_error(context: &str, value: JsValue) -> String {
    let detail = value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value));
    format!("{}: {}", context, detail)
}

/// `window.localStorage`, absent in private modes of some browsers.
#[derive(Clone)]
pub struct BrowserStorage {
    inner: Option<web_sys::Storage>,
}

impl BrowserStorage {
    pub fn new() -> Self {
        let inner = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if inner.is_none() {
            warn!("localStorage unavailable, sharing disabled");
        }
        Self { inner }
    }
}

impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.inner.as_ref()?.get_item(key).ok().flatten()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        let storage = self
            .inner
            .as_ref()
            .ok_or_else(|| "localStorage unavailable".to_string())?;
        storage
            .set_item(key, value)
            .map_err(|e| js_error("localStorage write failed", e))
    }

    fn remove_item(&self, key: &str) {
        if let Some(storage) = &self.inner {
            let _ = storage.remove_item(key);
        }
    }

    fn keys(&self) -> Vec<String> {
        let Some(storage) = &self.inner else {
            return Vec::new();
        };
        let len = storage.length().unwrap_or(0);
        (0..len)
            .filter_map(|i| storage.key(i).ok().flatten())
            .collect()
    }
}

/// Previews backed by `blob:` object URLs.
pub struct ObjectUrlPreviews;

impl PreviewRegistry for ObjectUrlPreviews {
    fn create(&self, image: &CapturedImage) -> Option<String> {
        let bytes = Uint8Array::from(image.bytes.as_slice());
        let parts = Array::of1(&bytes);
        let options = BlobPropertyBag::new();
        options.set_type(&image.mime_type);

        let url = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .and_then(|blob| Url::create_object_url_with_blob(&blob));
        match url {
            Ok(url) => {
                debug!("Created preview {}", url);
                Some(url)
            }
            Err(e) => {
                warn!("{}", js_error("Failed to create preview", e));
                None
            }
        }
    }

    fn revoke(&self, preview: &str) {
        debug!("Revoking preview {}", preview);
        let _ = Url::revoke_object_url(preview);
    }
}

pub struct WebTrack(MediaStreamTrack);

impl CameraTrack for WebTrack {
    fn stop(&self) {
        self.0.stop();
    }

    fn is_live(&self) -> bool {
        self.0.ready_state() == MediaStreamTrackState::Live
    }
}

/// The user-facing camera, shown in `video` while open.
pub struct BrowserCamera {
    video: HtmlVideoElement,
}

impl BrowserCamera {
    pub fn new(video: HtmlVideoElement) -> Self {
        Self { video }
    }
}

impl CameraDevice for BrowserCamera {
    type Track = WebTrack;

    async fn open_user_facing(&self) -> Result<Vec<WebTrack>, String> {
        let media_devices = web_sys::window()
            .ok_or_else(|| "no window".to_string())?
            .navigator()
            .media_devices()
            .map_err(|e| js_error("mediaDevices unavailable", e))?;

        let video = Object::new();
        Reflect::set(&video, &"facingMode".into(), &"user".into())
            .map_err(|e| js_error("Invalid constraints", e))?;
        let constraints = MediaStreamConstraints::new();
        constraints.set_video(&video);
        constraints.set_audio(&JsValue::FALSE);

        let promise = media_devices
            .get_user_media_with_constraints(&constraints)
            .map_err(|e| js_error("getUserMedia failed", e))?;
        let stream: MediaStream = JsFuture::from(promise)
            .await
            .map_err(|e| js_error("Camera access denied", e))?
            .dyn_into()
            .map_err(|_| "getUserMedia did not return a MediaStream".to_string())?;

        self.video.set_src_object(Some(&stream));

        Ok(stream
            .get_tracks()
            .iter()
            .filter_map(|t| t.dyn_into::<MediaStreamTrack>().ok())
            .map(WebTrack)
            .collect())
    }
}

/// Grab the current video frame at its native resolution.
pub fn grab_frame(video: &HtmlVideoElement) -> Result<Frame, String> {
    let (width, height) = (video.video_width(), video.video_height());
    if width == 0 || height == 0 {
        return Err("camera is not streaming yet".to_string());
    }

    let canvas: HtmlCanvasElement = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "no document".to_string())?
        .create_element("canvas")
        .map_err(|e| js_error("Failed to create canvas", e))?
        .dyn_into()
        .map_err(|_| "canvas element has the wrong type".to_string())?;
    canvas.set_width(width);
    canvas.set_height(height);

    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|e| js_error("Failed to get 2d context", e))?
        .ok_or_else(|| "2d context unavailable".to_string())?
        .dyn_into()
        .map_err(|_| "2d context has the wrong type".to_string())?;

    context
        .draw_image_with_html_video_element(video, 0.0, 0.0)
        .map_err(|e| js_error("Failed to draw video frame", e))?;
    let pixels = context
        .get_image_data(0.0, 0.0, width as f64, height as f64)
        .map_err(|e| js_error("Failed to read pixels", e))?;

    Ok(Frame::new(width, height, pixels.data().0))
}

/// Read a user-selected file fully into memory.
pub async fn read_file_bytes(file: &web_sys::File) -> Result<Vec<u8>, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| js_error("Failed to read file", e))?;
    Ok(Uint8Array::new(&buffer).to_vec())
}

/// Current `location.search`, including the leading `?`.
pub fn location_search() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

fn location_href() -> Option<String> {
    web_sys::window().and_then(|w| w.location().href().ok())
}

/// Link to the current page carrying `share_id`.
pub fn share_link_for(share_id: &str) -> Option<String> {
    location_href().and_then(|href| share::share_link(&href, share_id).ok())
}

/// Make the address bar reflect `share_id` without adding history entries.
pub fn sync_share_param(share_id: Option<&str>) {
    let Some(href) = location_href() else {
        return;
    };
    let target = match share_id {
        Some(id) => share::share_link(&href, id),
        None => share::strip_share_param(&href),
    };
    let target = match target {
        Ok(target) => target,
        Err(e) => {
            warn!("Cannot update address bar: {}", e);
            return;
        }
    };
    if target == href {
        return;
    }
    if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
        if let Err(e) = history.replace_state_with_url(&JsValue::NULL, "", Some(&target)) {
            warn!("{}", js_error("history.replaceState failed", e));
        }
    }
}

/// Best-effort clipboard write; resolves to whether the text was copied.
pub async fn copy_to_clipboard(text: &str) -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let clipboard = window.navigator().clipboard();
    JsFuture::from(clipboard.write_text(text)).await.is_ok()
}

pub fn scroll_to(target: ScrollTarget) {
    let Some(window) = web_sys::window() else {
        return;
    };
    match target {
        ScrollTarget::Top => {
            let options = ScrollToOptions::new();
            options.set_top(0.0);
            options.set_behavior(ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&options);
        }
        ScrollTarget::Section(section) => {
            let element = window
                .document()
                .and_then(|d| d.get_element_by_id(section.element_id()));
            match element {
                Some(element) => {
                    let options = ScrollIntoViewOptions::new();
                    options.set_behavior(ScrollBehavior::Smooth);
                    element.scroll_into_view_with_scroll_into_view_options(&options);
                }
                None => debug!("Section #{} not rendered", section.element_id()),
            }
        }
    }
}
