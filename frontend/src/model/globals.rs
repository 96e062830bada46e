use dioxus_logger::tracing::error;
use shrinkwraprs::Shrinkwrap;

/// Path of the songs resource below the backend root.
pub const SONGS_PATH: &str = "/api/songs";

/// Full URL of the songs resource.
#[derive(Clone, Shrinkwrap)]
pub struct BaseUrl(pub String);

impl BaseUrl {
    /// `BACKEND_URL` at build time, otherwise whatever origin served the page.
    pub fn detect() -> Self {
        let root = option_env!("BACKEND_URL")
            .map(|e| e.to_string())
            .unwrap_or_else(|| {
                gloo::utils::window()
                    .location()
                    .origin()
                    .inspect_err(|e| error!("base_url: {e:?}"))
                    .ok()
                    .expect("could not determine origin URL")
            });

        let root = root.strip_suffix('/').unwrap_or(&root);
        BaseUrl(format!("{root}{SONGS_PATH}"))
    }
}
