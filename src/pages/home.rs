use leptos::prelude::*;

use crate::components::faq::Faq;
use crate::components::hero::Hero;
use crate::components::info_sections::InfoSections;
use crate::components::shapes_list::ShapesList;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="page home-page">
            <Hero />
            <ShapesList />
            <InfoSections />
            <Faq />
        </div>
    }
}
