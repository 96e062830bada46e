mod songs;
use dioxus::prelude::*;
pub use songs::Songs;

use crate::Route;

// signing in happens elsewhere, this is only where unauthenticated visitors land
#[component]
pub fn Login() -> Element {
    rsx! {
        div { class: "login",
            h1 { "Signed out" }
            p { "Sign in to manage the song catalog." }
            Link { to: Route::Songs {}, "Back to the catalog" }
        }
    }
}
