mod navbar;
pub use navbar::Navbar;

mod song_form;
pub use song_form::{FieldInput, SongForm};

mod song_row;
pub use song_row::SongRow;
