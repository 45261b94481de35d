use leptos::prelude::*;

use crate::components::result_card::ResultCard;
use crate::context::use_app;

#[component]
pub fn ResultPage() -> impl IntoView {
    let state = use_app().state;
    // Snapshot on mount: a result is immutable while this view is shown.
    let shown = state.with_untracked(|s| {
        s.result()
            .cloned()
            .map(|result| (result, s.preview().map(str::to_string)))
    });

    view! {
        <div class="page result-page">
            {shown.map(|(result, preview)| view! { <ResultCard result=result preview=preview /> })}
        </div>
    }
}
