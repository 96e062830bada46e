use components::Navbar;
use dioxus::prelude::*;
use dioxus_logger::tracing::{debug, Level};
use model::{globals::BaseUrl, BrowserSession, SongsApi};
use views::{Login, Songs};

mod components;
mod model;
mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Navbar)]
    #[route("/")]
    Songs {},
    #[end_layout]
    #[route("/login")]
    Login {},
}

const MAIN_CSS: Asset = asset!("/assets/styling/main.css");

fn main() {
    dioxus_logger::init(Level::DEBUG).expect("failed to init logger");
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let base_url = use_context_provider(BaseUrl::detect);
    use_context_provider(|| BrowserSession);
    use_context_provider(move || {
        debug!("songs resource at {}", *base_url);
        SongsApi::new(base_url.as_str(), BrowserSession).expect("unusable BACKEND_URL")
    });

    rsx! {
        document::Stylesheet { href: MAIN_CSS }

        div { class: "app-wrapper", Router::<Route> {} }
    }
}
