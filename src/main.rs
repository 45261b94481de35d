mod app;
mod browser;
mod components;
mod context;
mod language;
mod logging;
mod pages;

use app::App;

fn main() {
    logging::init();
    leptos::mount::mount_to_body(App);
}
