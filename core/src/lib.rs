// shared by the web page and the command line client, so nothing in here may
// assume a threaded runtime
pub mod admin;

pub mod api;

pub mod board;

pub mod model;

pub mod session;

pub use admin::{AdminError, Navigation, SongAdmin};
pub use api::{ApiError, HttpSongApi, SongApi};
pub use board::{EditState, SongBoard};
pub use model::{Song, SongDraft, SongField, ValidationError};
pub use session::{MemorySession, SessionProvider, TOKEN_KEY};
