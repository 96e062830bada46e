use dioxus_logger::tracing::error;
use gloo::storage::{LocalStorage, Storage};
use songdesk_core::{HttpSongApi, SessionProvider, TOKEN_KEY};

pub mod globals;

pub type SongsApi = HttpSongApi<BrowserSession>;

/// Session backed by `localStorage`. The token is stored as a plain string
/// by whatever signed the user in, so it is read raw rather than as JSON.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserSession;

impl SessionProvider for BrowserSession {
    fn current_token(&self) -> Option<String> {
        LocalStorage::raw()
            .get_item(TOKEN_KEY)
            .inspect_err(|e| error!("localStorage: {e:?}"))
            .ok()
            .flatten()
    }

    fn logout(&self) {
        LocalStorage::delete(TOKEN_KEY);
    }
}
