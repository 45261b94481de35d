use eyeshape_core::state::ViewState;
use eyeshape_core::{AppConfig, AppState, Analyzer, GeminiService, ShareStore};
use leptos::prelude::*;
use tracing::{error, info, warn};

use crate::browser::{self, BrowserStorage};
use crate::components::footer::Footer;
use crate::components::navbar::Navbar;
use crate::context::AppContext;
use crate::language::{apply_language, LanguageContext};
use crate::pages::home::HomePage;
use crate::pages::privacy::PrivacyPage;
use crate::pages::result::ResultPage;

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::load();
    if !config.has_api_key() {
        warn!("No API key configured; analysis requests will fail");
    }

    let storage = BrowserStorage::new();
    let (language, set_language) = signal(config.language);
    provide_context(LanguageContext {
        language,
        set_language,
    });

    let analyzer = GeminiService::new(&config).map(Analyzer::new);
    if let Err(e) = &analyzer {
        error!("Analysis unavailable: {}", e);
    }

    let shares = ShareStore::new(storage, config.share_ttl_hours);
    shares.purge_expired();
    let mut initial = AppState::new();
    if initial.restore_shared(&shares, &browser::location_search()) {
        info!("Opened shared result");
    }

    let ctx = AppContext {
        state: RwSignal::new(initial),
        analyzer: StoredValue::new_local(analyzer),
        shares: StoredValue::new_local(shares),
    };
    provide_context(ctx);

    // Apply language to the DOM whenever the signal changes
    Effect::new(move |_| {
        apply_language(language.get());
    });

    // Keep ?share= in the address bar in step with the shown result
    let share_id = Memo::new(move |_| ctx.state.with(|s| s.share_id().map(str::to_string)));
    Effect::new(move |_| {
        browser::sync_share_param(share_id.get().as_deref());
    });

    // Scroll requested by the last transition, once the new view is in the DOM
    Effect::new(move |_| {
        ctx.state.track();
        let mut target = None;
        ctx.state.update_untracked(|s| target = s.take_pending_scroll());
        if let Some(target) = target {
            request_animation_frame(move || browser::scroll_to(target));
        }
    });

    let view_state = Memo::new(move |_| ctx.state.with(|s| s.view()));

    view! {
        <div class="app-layout">
            <Navbar />
            <main class="content">
                {move || match view_state.get() {
                    ViewState::Home => view! { <HomePage /> }.into_any(),
                    ViewState::Result => view! { <ResultPage /> }.into_any(),
                    ViewState::PrivacyInfo => view! { <PrivacyPage /> }.into_any(),
                }}
            </main>
            <Footer />
        </div>
    }
}
