//! Top-level application state and its transitions.
//!
//! `AppState` is the single owner of the current result, the current image
//! selection and the current preview reference. Views read it; only the
//! methods here write it. Effects that need the host (creating or revoking
//! preview URLs) go through [`PreviewRegistry`]; scrolling is queued and
//! picked up by the host after the next render via
//! [`AppState::take_pending_scroll`].
//!
//! Invariant: `view() == ViewState::Result` implies `result().is_some()`.

use tracing::{debug, info, warn};

use crate::analyzer::AnalysisResult;
use crate::capture::CapturedImage;
use crate::error::{EyeShapeError, Result};
use crate::share::{share_id_from_query, KeyValueStorage, ShareStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Home,
    Result,
    PrivacyInfo,
}

/// Named anchors on the home view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Finder,
    Shapes,
    Faq,
}

impl Section {
    /// DOM id of the section element.
    pub fn element_id(self) -> &'static str {
        match self {
            Section::Finder => "finder",
            Section::Shapes => "shapes",
            Section::Faq => "faq",
        }
    }
}

/// Scroll requested for after the next render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTarget {
    Top,
    Section(Section),
}

/// Creates and releases preview references (object URLs in the browser).
pub trait PreviewRegistry {
    fn create(&self, image: &CapturedImage) -> Option<String>;
    fn revoke(&self, preview: &str);
}

/// Handle for one outstanding analysis request.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisTicket {
    id: u64,
    epoch: u64,
    pub image: CapturedImage,
}

impl AnalysisTicket {
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// What `finish_analysis` did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// Result installed and the view switched to `Result`.
    Shown,
    /// Failure surfaced on the home view; selection kept for retry.
    Failed,
    /// Response arrived after the user moved on; nothing applied.
    Discarded,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    view: ViewState,
    selection: Option<CapturedImage>,
    preview: Option<String>,
    result: Option<AnalysisResult>,
    error: Option<EyeShapeError>,
    camera_open: bool,
    in_flight: Option<u64>,
    next_ticket: u64,
    epoch: u64,
    pending_scroll: Option<ScrollTarget>,
    share_id: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn selection(&self) -> Option<&CapturedImage> {
        self.selection.as_ref()
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&EyeShapeError> {
        self.error.as_ref()
    }

    pub fn is_camera_open(&self) -> bool {
        self.camera_open
    }

    pub fn is_analyzing(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether the Analyze action should be enabled.
    pub fn can_analyze(&self) -> bool {
        self.view == ViewState::Home && self.selection.is_some() && !self.is_analyzing()
    }

    /// Identifier of the shared result currently in the address bar, if any.
    pub fn share_id(&self) -> Option<&str> {
        self.share_id.as_deref()
    }

    /// Install a newly captured or uploaded image.
    ///
    /// Drops any stale result, releasing the old preview before creating the
    /// new one.
    pub fn select_image<P: PreviewRegistry>(&mut self, image: CapturedImage, previews: &P) {
        self.release_preview(previews);
        self.preview = previews.create(&image);
        info!("Selected image '{}'", image.file_name);

        self.selection = Some(image);
        self.invalidate_result();
        self.error = None;
        self.camera_open = false;
    }

    /// Show a capture error (e.g. a non-image upload) without touching anything else.
    pub fn capture_rejected(&mut self, error: EyeShapeError) {
        warn!("Capture rejected: {}", error);
        self.error = Some(error);
    }

    /// Remove the current selection and any result computed from it.
    pub fn clear_selection<P: PreviewRegistry>(&mut self, previews: &P) {
        self.release_preview(previews);
        self.selection = None;
        self.invalidate_result();
        self.error = None;
    }

    /// Enter live-capture mode. Refused while an analysis is running.
    pub fn open_camera(&mut self) -> bool {
        if self.is_analyzing() || self.view != ViewState::Home {
            return false;
        }
        self.error = None;
        self.camera_open = true;
        true
    }

    pub fn camera_failed(&mut self, error: EyeShapeError) {
        warn!("Leaving camera mode: {}", error);
        self.camera_open = false;
        self.error = Some(error);
    }

    pub fn close_camera(&mut self) {
        self.camera_open = false;
    }

    /// Start an analysis of the current selection.
    ///
    /// Returns `None` (and issues nothing) if a request is already
    /// outstanding or there is nothing to analyze.
    pub fn begin_analysis(&mut self) -> Option<AnalysisTicket> {
        if let Some(id) = self.in_flight {
            debug!("Analysis {} still pending, ignoring request", id);
            return None;
        }
        if self.view != ViewState::Home {
            return None;
        }
        let image = match &self.selection {
            Some(image) => image.clone(),
            None => {
                self.error = Some(EyeShapeError::InvalidMediaType(
                    "no image selected".to_string(),
                ));
                return None;
            }
        };

        self.next_ticket += 1;
        let id = self.next_ticket;
        self.in_flight = Some(id);
        self.error = None;
        info!("Analysis {} started", id);

        Some(AnalysisTicket {
            id,
            epoch: self.epoch,
            image,
        })
    }

    /// Apply the response for `ticket`.
    ///
    /// Always frees the in-flight slot held by the ticket. The response is
    /// applied only if the user is still on the home view with the same
    /// selection; otherwise it is discarded.
    pub fn finish_analysis(
        &mut self,
        ticket: AnalysisTicket,
        outcome: Result<AnalysisResult>,
    ) -> AnalysisOutcome {
        if self.in_flight == Some(ticket.id) {
            self.in_flight = None;
        }

        if ticket.epoch != self.epoch || self.view != ViewState::Home {
            info!("Discarding late response for analysis {}", ticket.id);
            return AnalysisOutcome::Discarded;
        }

        match outcome {
            Ok(result) => {
                info!("Analysis {} shown: {}", ticket.id, result.shape);
                self.result = Some(result);
                self.share_id = None;
                self.view = ViewState::Result;
                self.pending_scroll = Some(ScrollTarget::Top);
                AnalysisOutcome::Shown
            }
            Err(error) => {
                warn!("Analysis {} failed: {}", ticket.id, error);
                self.error = Some(error);
                AnalysisOutcome::Failed
            }
        }
    }

    /// "Scan Another": back to an empty home view from anywhere.
    pub fn reset<P: PreviewRegistry>(&mut self, previews: &P) {
        self.release_preview(previews);
        self.selection = None;
        self.result = None;
        self.error = None;
        self.share_id = None;
        self.camera_open = false;
        self.epoch += 1;
        self.view = ViewState::Home;
        self.pending_scroll = Some(ScrollTarget::Top);
        info!("State reset");
    }

    /// Switch views, optionally scrolling to a home section after render.
    ///
    /// `Result` is only reachable while a result exists; otherwise this
    /// lands on `Home`.
    pub fn navigate(&mut self, target: ViewState, section: Option<Section>) {
        let target = match target {
            ViewState::Result if self.result.is_none() => ViewState::Home,
            other => other,
        };
        let target = if section.is_some() {
            ViewState::Home
        } else {
            target
        };

        if self.view == ViewState::Home && target != ViewState::Home {
            // Anything still in flight belongs to a view we are leaving.
            self.epoch += 1;
            self.camera_open = false;
        }

        debug!("Navigate {:?} -> {:?} ({:?})", self.view, target, section);
        self.view = target;
        self.pending_scroll = Some(match section {
            Some(section) => ScrollTarget::Section(section),
            None => ScrollTarget::Top,
        });
    }

    /// Restore a shared result named in the entry URL's query string.
    ///
    /// Best-effort: a missing or unreadable entry leaves the state untouched.
    pub fn restore_shared<S: KeyValueStorage>(
        &mut self,
        store: &ShareStore<S>,
        query: &str,
    ) -> bool {
        let Some(id) = share_id_from_query(query) else {
            return false;
        };
        match store.load(&id) {
            Some(result) => {
                info!("Restored shared result {} ({})", id, result.shape);
                self.result = Some(result);
                self.preview = None;
                self.selection = None;
                self.share_id = Some(id);
                self.view = ViewState::Result;
                true
            }
            None => {
                debug!("Shared result {} unavailable, staying home", id);
                false
            }
        }
    }

    /// Record that the current result was saved under `id`.
    pub fn mark_shared(&mut self, id: String) {
        if self.result.is_some() {
            self.share_id = Some(id);
        }
    }

    /// Post-render hook: the scroll queued by the last transition, once.
    pub fn take_pending_scroll(&mut self) -> Option<ScrollTarget> {
        self.pending_scroll.take()
    }

    pub fn dismiss_message(&mut self) {
        self.error = None;
    }

    fn release_preview<P: PreviewRegistry>(&mut self, previews: &P) {
        if let Some(old) = self.preview.take() {
            previews.revoke(&old);
        }
    }

    fn invalidate_result(&mut self) {
        self.epoch += 1;
        if self.result.take().is_some() {
            debug!("Cleared stale result");
        }
        self.share_id = None;
        if self.view == ViewState::Result {
            self.view = ViewState::Home;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::share::MemoryStorage;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingPreviews {
        log: RefCell<Vec<String>>,
        counter: RefCell<u32>,
    }

    impl PreviewRegistry for RecordingPreviews {
        fn create(&self, _image: &CapturedImage) -> Option<String> {
            *self.counter.borrow_mut() += 1;
            let url = format!("blob:{}", self.counter.borrow());
            self.log.borrow_mut().push(format!("create {}", url));
            Some(url)
        }

        fn revoke(&self, preview: &str) {
            self.log.borrow_mut().push(format!("revoke {}", preview));
        }
    }

    fn image(name: &str) -> CapturedImage {
        CapturedImage {
            file_name: name.to_string(),
            mime_type: "image/jpeg".to_string(),
            bytes: vec![1, 2, 3],
        }
    }

    fn result(shape: &str) -> AnalysisResult {
        AnalysisResult {
            shape: shape.to_string(),
            confidence: 0.8,
            description: "d".to_string(),
            features: vec![],
            makeup_tips: vec![],
            eyewear_recommendations: vec![],
        }
    }

    fn analyzed(previews: &RecordingPreviews) -> AppState {
        let mut state = AppState::new();
        state.select_image(image("a.jpg"), previews);
        let ticket = state.begin_analysis().unwrap();
        assert_eq!(
            state.finish_analysis(ticket, Ok(result("Round"))),
            AnalysisOutcome::Shown
        );
        state
    }

    #[test]
    fn test_starts_home_and_empty() {
        let state = AppState::new();
        assert_eq!(state.view(), ViewState::Home);
        assert!(state.result().is_none());
        assert!(!state.can_analyze());
    }

    #[test]
    fn test_replacing_preview_revokes_old_before_creating_new() {
        let previews = RecordingPreviews::default();
        let mut state = AppState::new();
        state.select_image(image("a.jpg"), &previews);
        state.select_image(image("b.jpg"), &previews);

        assert_eq!(
            *previews.log.borrow(),
            vec!["create blob:1", "revoke blob:1", "create blob:2"]
        );
        assert_eq!(state.preview(), Some("blob:2"));
        assert_eq!(state.selection().unwrap().file_name, "b.jpg");
    }

    #[test]
    fn test_success_moves_to_result_with_preview() {
        let previews = RecordingPreviews::default();
        let state = analyzed(&previews);
        assert_eq!(state.view(), ViewState::Result);
        assert_eq!(state.result().unwrap().shape, "Round");
        assert_eq!(state.preview(), Some("blob:1"));
        assert!(!state.is_analyzing());
    }

    #[test]
    fn test_second_begin_while_pending_is_refused() {
        let previews = RecordingPreviews::default();
        let mut state = AppState::new();
        state.select_image(image("a.jpg"), &previews);

        let first = state.begin_analysis();
        assert!(first.is_some());
        assert!(state.begin_analysis().is_none());
        assert!(!state.can_analyze());

        state.finish_analysis(first.unwrap(), Err(EyeShapeError::AnalysisFailed("x".into())));
        assert!(state.can_analyze());
        assert!(state.begin_analysis().is_some());
    }

    #[test]
    fn test_begin_without_selection_shows_error() {
        let mut state = AppState::new();
        assert!(state.begin_analysis().is_none());
        assert!(matches!(state.error(), Some(EyeShapeError::InvalidMediaType(_))));
        assert!(!state.is_analyzing());
    }

    #[test]
    fn test_failure_keeps_selection_and_home() {
        let previews = RecordingPreviews::default();
        let mut state = AppState::new();
        state.select_image(image("a.jpg"), &previews);
        let ticket = state.begin_analysis().unwrap();

        let outcome = state.finish_analysis(
            ticket,
            Err(EyeShapeError::AnalysisFailed("network".into())),
        );

        assert_eq!(outcome, AnalysisOutcome::Failed);
        assert_eq!(state.view(), ViewState::Home);
        assert_eq!(state.selection().unwrap().file_name, "a.jpg");
        assert_eq!(state.preview(), Some("blob:1"));
        assert!(state.error().unwrap().is_retryable());
    }

    #[test]
    fn test_selecting_new_image_invalidates_result() {
        let previews = RecordingPreviews::default();
        let mut state = analyzed(&previews);

        state.select_image(image("b.jpg"), &previews);

        assert!(state.result().is_none());
        assert_eq!(state.view(), ViewState::Home);
    }

    #[test]
    fn test_clear_selection_keeps_view_on_home() {
        let previews = RecordingPreviews::default();
        let mut state = AppState::new();
        state.select_image(image("a.jpg"), &previews);
        state.navigate(ViewState::Home, Some(Section::Faq));

        state.clear_selection(&previews);

        assert_eq!(state.view(), ViewState::Home);
        assert!(state.selection().is_none());
        assert!(state.preview().is_none());
        assert!(previews.log.borrow().contains(&"revoke blob:1".to_string()));
    }

    #[test]
    fn test_late_response_after_new_selection_is_discarded() {
        let previews = RecordingPreviews::default();
        let mut state = AppState::new();
        state.select_image(image("a.jpg"), &previews);
        let ticket = state.begin_analysis().unwrap();

        state.select_image(image("b.jpg"), &previews);
        let outcome = state.finish_analysis(ticket, Ok(result("Round")));

        assert_eq!(outcome, AnalysisOutcome::Discarded);
        assert!(state.result().is_none());
        assert!(!state.is_analyzing());
    }

    #[test]
    fn test_late_response_after_navigating_away_is_discarded() {
        let previews = RecordingPreviews::default();
        let mut state = AppState::new();
        state.select_image(image("a.jpg"), &previews);
        let ticket = state.begin_analysis().unwrap();

        state.navigate(ViewState::PrivacyInfo, None);
        state.navigate(ViewState::Home, None);
        let outcome = state.finish_analysis(ticket, Ok(result("Round")));

        assert_eq!(outcome, AnalysisOutcome::Discarded);
        assert_eq!(state.view(), ViewState::Home);
        assert!(state.result().is_none());
        assert!(state.can_analyze());
    }

    #[test]
    fn test_reset_from_every_view() {
        for start in [ViewState::Home, ViewState::Result, ViewState::PrivacyInfo] {
            let previews = RecordingPreviews::default();
            let mut state = analyzed(&previews);
            state.navigate(start, None);

            state.reset(&previews);

            assert_eq!(state.view(), ViewState::Home);
            assert!(state.result().is_none());
            assert!(state.preview().is_none());
            assert!(state.selection().is_none());
            assert!(previews.log.borrow().contains(&"revoke blob:1".to_string()));
        }
    }

    #[test]
    fn test_navigate_to_result_without_result_lands_home() {
        let mut state = AppState::new();
        state.navigate(ViewState::Result, None);
        assert_eq!(state.view(), ViewState::Home);
    }

    #[test]
    fn test_privacy_round_trip_keeps_result() {
        let previews = RecordingPreviews::default();
        let mut state = analyzed(&previews);
        state.navigate(ViewState::PrivacyInfo, None);
        assert_eq!(state.view(), ViewState::PrivacyInfo);
        state.navigate(ViewState::Result, None);
        assert_eq!(state.view(), ViewState::Result);
        assert_eq!(state.result().unwrap().shape, "Round");
    }

    #[test]
    fn test_section_navigation_goes_home_then_scrolls() {
        let previews = RecordingPreviews::default();
        let mut state = analyzed(&previews);
        state.take_pending_scroll();

        state.navigate(ViewState::Home, Some(Section::Shapes));

        assert_eq!(state.view(), ViewState::Home);
        assert_eq!(
            state.take_pending_scroll(),
            Some(ScrollTarget::Section(Section::Shapes))
        );
        assert_eq!(state.take_pending_scroll(), None);
    }

    #[test]
    fn test_camera_refused_while_analyzing() {
        let previews = RecordingPreviews::default();
        let mut state = AppState::new();
        state.select_image(image("a.jpg"), &previews);
        state.begin_analysis().unwrap();
        assert!(!state.open_camera());
        assert!(!state.is_camera_open());
    }

    #[test]
    fn test_camera_failure_shows_error_and_exits_mode() {
        let mut state = AppState::new();
        assert!(state.open_camera());
        state.camera_failed(EyeShapeError::DeviceUnavailable("denied".into()));
        assert!(!state.is_camera_open());
        assert!(matches!(state.error(), Some(EyeShapeError::DeviceUnavailable(_))));
    }

    #[test]
    fn test_leaving_home_closes_camera() {
        let mut state = AppState::new();
        state.open_camera();
        state.navigate(ViewState::PrivacyInfo, None);
        assert!(!state.is_camera_open());
    }

    #[test]
    fn test_rejected_upload_changes_nothing_else() {
        let previews = RecordingPreviews::default();
        let mut state = AppState::new();
        state.select_image(image("a.jpg"), &previews);
        let before_selection = state.selection().cloned();

        state.capture_rejected(EyeShapeError::InvalidMediaType("text/plain".into()));

        assert_eq!(state.selection().cloned(), before_selection);
        assert_eq!(state.preview(), Some("blob:1"));
        assert!(state.error().is_some());
    }

    #[test]
    fn test_restore_shared_result() {
        let store = ShareStore::new(MemoryStorage::new(), 24);
        let id = store.save(&result("Hooded")).unwrap();

        let mut state = AppState::new();
        assert!(state.restore_shared(&store, &format!("?share={}", id)));

        assert_eq!(state.view(), ViewState::Result);
        assert_eq!(state.result(), Some(&result("Hooded")));
        assert!(state.preview().is_none());
        assert_eq!(state.share_id(), Some(id.as_str()));
    }

    #[test]
    fn test_restore_missing_or_corrupt_stays_home() {
        let store = ShareStore::new(MemoryStorage::new(), 24);
        store
            .storage()
            .set_item("eyeshape:share:broken", "[]")
            .unwrap();

        let mut state = AppState::new();
        assert!(!state.restore_shared(&store, "?share=missing"));
        assert!(!state.restore_shared(&store, "?share=broken"));
        assert!(!state.restore_shared(&store, ""));

        assert_eq!(state.view(), ViewState::Home);
        assert!(state.error().is_none());
    }

    #[test]
    fn test_reset_clears_share_id() {
        let store = ShareStore::new(MemoryStorage::new(), 24);
        let id = store.save(&result("Round")).unwrap();
        let previews = RecordingPreviews::default();

        let mut state = AppState::new();
        state.restore_shared(&store, &format!("share={}", id));
        state.reset(&previews);

        assert!(state.share_id().is_none());
        assert_eq!(state.view(), ViewState::Home);
    }

    #[test]
    fn test_mark_shared_requires_result() {
        let mut state = AppState::new();
        state.mark_shared("abc".to_string());
        assert!(state.share_id().is_none());

        let previews = RecordingPreviews::default();
        let mut state = analyzed(&previews);
        state.mark_shared("abc".to_string());
        assert_eq!(state.share_id(), Some("abc"));
    }
}
