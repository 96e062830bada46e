use std::{
    rc::Rc,
    sync::{Arc, Mutex},
};

/// Key the session token is persisted under, in whatever key-value store
/// backs the session.
pub const TOKEN_KEY: &str = "token";

/// Where the page gets its credentials from.
///
/// Implementations must read the backing store on every call: a token
/// refreshed elsewhere has to be picked up without restarting anything.
pub trait SessionProvider {
    fn current_token(&self) -> Option<String>;

    fn is_authenticated(&self) -> bool {
        self.current_token().is_some_and(|token| !token.is_empty())
    }

    fn logout(&self);
}

impl<S: SessionProvider + ?Sized> SessionProvider for &S {
    fn current_token(&self) -> Option<String> {
        (**self).current_token()
    }
    fn is_authenticated(&self) -> bool {
        (**self).is_authenticated()
    }
    fn logout(&self) {
        (**self).logout()
    }
}

impl<S: SessionProvider + ?Sized> SessionProvider for Rc<S> {
    fn current_token(&self) -> Option<String> {
        (**self).current_token()
    }
    fn is_authenticated(&self) -> bool {
        (**self).is_authenticated()
    }
    fn logout(&self) {
        (**self).logout()
    }
}

impl<S: SessionProvider + ?Sized> SessionProvider for Arc<S> {
    fn current_token(&self) -> Option<String> {
        (**self).current_token()
    }
    fn is_authenticated(&self) -> bool {
        (**self).is_authenticated()
    }
    fn logout(&self) {
        (**self).logout()
    }
}

/// Session held in process memory.
#[derive(Debug, Default)]
pub struct MemorySession {
    token: Mutex<Option<String>>,
}

impl MemorySession {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn set_token(&self, token: Option<String>) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = token;
        }
    }
}

impl SessionProvider for MemorySession {
    fn current_token(&self) -> Option<String> {
        self.token.lock().ok().and_then(|token| token.clone())
    }

    fn logout(&self) {
        self.set_token(None);
    }
}
