use std::{collections::BTreeMap, fs, io};

use camino::{Utf8Path, Utf8PathBuf};
use songdesk_core::SessionProvider;
use tracing::{debug, error};

type Store = BTreeMap<String, String>;

/// Session token kept in a small JSON key-value file, the command line
/// counterpart of the browser's `localStorage`.
///
/// The file is read on every lookup, so a token written by another tool is
/// used right away.
#[derive(Debug, Clone)]
pub struct FileSession {
    path: Utf8PathBuf,
    key: String,
}

impl FileSession {
    pub fn new(path: impl Into<Utf8PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn load(&self) -> io::Result<Store> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Store::new()),
            Err(e) => return Err(e),
        };
        serde_json::from_str(&data).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn save(&self, store: &Store) -> io::Result<()> {
        let data = serde_json::to_string_pretty(store)?;
        fs::write(&self.path, data)
    }
}

impl SessionProvider for FileSession {
    fn current_token(&self) -> Option<String> {
        self.load()
            .inspect_err(|e| debug!("session store {}: {e}", self.path))
            .ok()
            .and_then(|mut store| store.remove(&self.key))
    }

    fn logout(&self) {
        let Ok(mut store) = self
            .load()
            .inspect_err(|e| error!("session store {}: {e}", self.path))
        else {
            return;
        };
        if store.remove(&self.key).is_some() {
            self.save(&store)
                .inspect_err(|e| error!("could not write {}: {e}", self.path))
                .ok();
        }
    }
}
