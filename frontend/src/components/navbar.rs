use dioxus::prelude::*;
use dioxus_logger::tracing::debug;
use songdesk_core::SessionProvider;

use crate::{model::BrowserSession, Route};

#[component]
pub fn Navbar() -> Element {
    let session = use_context::<BrowserSession>();
    let nav = navigator();

    rsx! {
        nav { class: "navbar",
            Link { to: Route::Songs {}, class: "navbar-title", "Song catalog" }
            button {
                class: "btn",
                onclick: move |_ev| {
                    debug!("sign out");
                    session.logout();
                    // no matter what logout did
                    nav.replace(Route::Login {});
                },
                "Sign out"
            }
        }

        Outlet::<Route> {}
    }
}
