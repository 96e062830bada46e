use tracing::{debug, warn};

use crate::{
    api::ApiError,
    model::{Song, SongDraft, SongField, ValidationError},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    /// Full copy of the song being edited; the list entry itself stays untouched
    /// until the server confirms the update.
    Editing(Song),
}

/// Everything the admin page shows: the cached list, the create form and the
/// edit-in-place buffer.
///
/// The list is a cache of whatever the server last confirmed. It is only
/// touched by the transitions below, which all expect a server-confirmed
/// record, and it is never refetched after a write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongBoard {
    songs: Vec<Song>,
    draft: SongDraft,
    edit: EditState,
}

impl SongBoard {
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn song(&self, id: &str) -> Option<&Song> {
        self.songs.iter().find(|song| song.id() == id)
    }

    pub fn draft(&self) -> &SongDraft {
        &self.draft
    }

    pub fn set_draft_field(&mut self, field: SongField, value: impl Into<String>) {
        field.set(&mut self.draft, value);
    }

    pub fn edit(&self) -> &EditState {
        &self.edit
    }

    pub fn editing(&self) -> Option<&Song> {
        match &self.edit {
            EditState::Editing(song) => Some(song),
            EditState::Idle => None,
        }
    }

    pub fn is_editing(&self, id: &str) -> bool {
        self.editing().is_some_and(|song| song.id() == id)
    }

    /// Ignored when nothing is being edited.
    pub fn set_edit_field(&mut self, field: SongField, value: impl Into<String>) {
        if let EditState::Editing(song) = &mut self.edit {
            field.set(song, value);
        }
    }

    pub fn loaded(&mut self, songs: Vec<Song>) {
        self.songs = songs;
    }

    pub fn created(&mut self, song: Song) {
        self.songs.push(song);
        self.draft = SongDraft::default();
    }

    /// Starts editing a copy of the song with `id`, dropping any unsaved edit.
    /// Returns false (and changes nothing) if the id is not in the list.
    pub fn begin_edit(&mut self, id: &str) -> bool {
        match self.song(id).cloned() {
            Some(song) => {
                self.edit = EditState::Editing(song);
                true
            }
            None => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.edit = EditState::Idle;
    }

    /// Swaps in the server's version of an edited song and leaves edit mode.
    pub fn updated(&mut self, song: Song) {
        if let Some(slot) = self.songs.iter_mut().find(|s| s.id() == song.id()) {
            *slot = song;
        }
        self.edit = EditState::Idle;
    }

    pub fn deleted(&mut self, id: &str) {
        self.songs.retain(|song| song.id() != id);
    }

    /// The draft to send on create, or why it may not be sent yet.
    pub fn submission(&self) -> Result<SongDraft, ValidationError> {
        self.draft.validate().inspect_err(|e| warn!("add: {e}"))?;
        Ok(self.draft.clone())
    }

    // The settle_* methods apply a finished request to the board. A failure is
    // logged and handed back with the board left as it was.

    pub fn settle_list(&mut self, res: Result<Vec<Song>, ApiError>) -> Result<(), ApiError> {
        let songs = res.inspect_err(|e| e.log("list"))?;
        debug!("loaded {} songs", songs.len());
        self.loaded(songs);
        Ok(())
    }

    pub fn settle_create(&mut self, res: Result<Song, ApiError>) -> Result<(), ApiError> {
        let song = res.inspect_err(|e| e.log("create"))?;
        debug!("created {}", song.id());
        self.created(song);
        Ok(())
    }

    pub fn settle_update(&mut self, res: Result<Song, ApiError>) -> Result<(), ApiError> {
        let song = res.inspect_err(|e| e.log("update"))?;
        debug!("updated {}", song.id());
        self.updated(song);
        Ok(())
    }

    pub fn settle_delete(&mut self, id: &str, res: Result<(), ApiError>) -> Result<(), ApiError> {
        res.inspect_err(|e| e.log("delete"))?;
        debug!("deleted {id}");
        self.deleted(id);
        Ok(())
    }
}
