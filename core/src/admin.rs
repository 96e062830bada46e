use tracing::warn;

use crate::{
    api::{ApiError, SongApi},
    board::SongBoard,
    model::ValidationError,
    session::SessionProvider,
};

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("no song is being edited")]
    NotEditing,
    #[error("song {0} is not in the list")]
    UnknownSong(String),
}

/// Where the page should go after an operation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    Login,
}

impl Navigation {
    /// Where a freshly mounted page belongs. Nothing may be fetched unless
    /// this says [`Navigation::Stay`].
    pub fn on_mount(session: &impl SessionProvider) -> Self {
        if session.is_authenticated() {
            Navigation::Stay
        } else {
            warn!("not signed in, redirecting to login");
            Navigation::Login
        }
    }
}

/// The admin page minus the rendering.
///
/// Every remote failure is logged here and handed back to the caller; the
/// board is only changed once the server has confirmed a write.
pub struct SongAdmin<A, S> {
    api: A,
    session: S,
    board: SongBoard,
}

impl<A: SongApi, S: SessionProvider> SongAdmin<A, S> {
    pub fn new(api: A, session: S) -> Self {
        Self {
            api,
            session,
            board: SongBoard::default(),
        }
    }

    pub fn board(&self) -> &SongBoard {
        &self.board
    }

    /// Form input goes straight into the board.
    pub fn board_mut(&mut self) -> &mut SongBoard {
        &mut self.board
    }

    /// Loads the list, unless there is no session, in which case nothing is
    /// requested and the caller is sent to the login page.
    ///
    /// A failed fetch leaves the list empty; the page stays usable.
    pub async fn mount(&mut self) -> Result<Navigation, AdminError> {
        if Navigation::on_mount(&self.session) == Navigation::Login {
            return Ok(Navigation::Login);
        }
        let res = self.api.list().await;
        self.board.settle_list(res)?;
        Ok(Navigation::Stay)
    }

    pub async fn add(&mut self) -> Result<(), AdminError> {
        let draft = self.board.submission()?;
        let res = self.api.create(&draft).await;
        self.board.settle_create(res)?;
        Ok(())
    }

    pub fn begin_edit(&mut self, id: &str) -> Result<(), AdminError> {
        if self.board.begin_edit(id) {
            Ok(())
        } else {
            Err(AdminError::UnknownSong(id.to_string()))
        }
    }

    pub async fn save_edit(&mut self) -> Result<(), AdminError> {
        let song = self.board.editing().cloned().ok_or(AdminError::NotEditing)?;
        let res = self.api.update(&song).await;
        self.board.settle_update(res)?;
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.board.cancel_edit();
    }

    pub async fn delete(&mut self, id: &str) -> Result<(), AdminError> {
        let res = self.api.delete(id).await;
        self.board.settle_delete(id, res)?;
        Ok(())
    }

    /// Always ends up on the login page, whatever logout did.
    pub fn logout(&mut self) -> Navigation {
        self.session.logout();
        Navigation::Login
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::{
        board::EditState,
        model::{Song, SongDraft, SongField},
        session::MemorySession,
    };

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        List,
        Create(SongDraft),
        Update(Song),
        Delete(String),
    }

    #[derive(Default)]
    struct FakeApi {
        songs: RefCell<Vec<Song>>,
        calls: RefCell<Vec<Call>>,
        next_id: RefCell<u32>,
        failing: RefCell<bool>,
    }

    impl FakeApi {
        fn with(songs: Vec<Song>) -> Self {
            let api = Self::default();
            *api.next_id.borrow_mut() = songs.len() as u32;
            *api.songs.borrow_mut() = songs;
            api
        }

        fn fail(&self, failing: bool) {
            *self.failing.borrow_mut() = failing;
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        fn outcome(&self) -> Result<(), ApiError> {
            if *self.failing.borrow() {
                Err(ApiError::Status {
                    status: 500,
                    payload: Some(serde_json::json!({"message": "boom"})),
                })
            } else {
                Ok(())
            }
        }
    }

    impl SongApi for FakeApi {
        async fn list(&self) -> Result<Vec<Song>, ApiError> {
            self.calls.borrow_mut().push(Call::List);
            self.outcome()?;
            Ok(self.songs.borrow().clone())
        }

        async fn create(&self, draft: &SongDraft) -> Result<Song, ApiError> {
            self.calls.borrow_mut().push(Call::Create(draft.clone()));
            self.outcome()?;
            let mut next = self.next_id.borrow_mut();
            *next += 1;
            let song = Song::new(next.to_string(), draft.clone());
            self.songs.borrow_mut().push(song.clone());
            Ok(song)
        }

        async fn update(&self, song: &Song) -> Result<Song, ApiError> {
            self.calls.borrow_mut().push(Call::Update(song.clone()));
            self.outcome()?;
            // servers may normalize what they store
            let mut stored = song.clone();
            stored.duration = format!("{} (checked)", song.duration);
            Ok(stored)
        }

        async fn delete(&self, id: &str) -> Result<(), ApiError> {
            self.calls.borrow_mut().push(Call::Delete(id.to_string()));
            self.outcome()?;
            self.songs.borrow_mut().retain(|s| s.id() != id);
            Ok(())
        }
    }

    fn song(id: &str, name: &str) -> Song {
        Song::new(
            id,
            SongDraft {
                name: name.into(),
                singer: "someone".into(),
                audio_file: format!("http://cdn/{id}.mp3"),
                avatar: format!("http://cdn/{id}.png"),
                ..Default::default()
            },
        )
    }

    fn fill_minimal(admin: &mut SongAdmin<&FakeApi, MemorySession>) {
        let board = admin.board_mut();
        board.set_draft_field(SongField::Name, "A");
        board.set_draft_field(SongField::Singer, "B");
        board.set_draft_field(SongField::AudioFile, "u1");
        board.set_draft_field(SongField::Avatar, "a1");
    }

    async fn mounted(api: &FakeApi) -> SongAdmin<&FakeApi, MemorySession> {
        let mut admin = SongAdmin::new(api, MemorySession::new("secret"));
        assert_eq!(admin.mount().await.unwrap(), Navigation::Stay);
        admin
    }

    #[tokio::test]
    async fn mount_without_session_redirects_and_fetches_nothing() {
        let api = FakeApi::with(vec![song("1", "one")]);
        let mut admin = SongAdmin::new(&api, MemorySession::anonymous());
        assert_eq!(admin.mount().await.unwrap(), Navigation::Login);
        assert!(api.calls().is_empty());
        assert!(admin.board().songs().is_empty());
    }

    #[tokio::test]
    async fn mount_loads_the_list() {
        let api = FakeApi::with(vec![song("1", "one"), song("2", "two")]);
        let admin = mounted(&api).await;
        assert_eq!(api.calls(), vec![Call::List]);
        assert_eq!(admin.board().songs().len(), 2);
    }

    #[tokio::test]
    async fn failed_mount_leaves_list_empty() {
        let api = FakeApi::with(vec![song("1", "one")]);
        api.fail(true);
        let mut admin = SongAdmin::new(&api, MemorySession::new("secret"));
        assert!(matches!(admin.mount().await, Err(AdminError::Api(_))));
        assert!(admin.board().songs().is_empty());
    }

    #[tokio::test]
    async fn incomplete_drafts_never_reach_the_server() {
        let api = FakeApi::with(vec![song("1", "one")]);
        let mut admin = mounted(&api).await;
        for field in SongField::REQUIRED {
            fill_minimal(&mut admin);
            admin.board_mut().set_draft_field(field, "");
            let err = admin.add().await.unwrap_err();
            assert!(matches!(err, AdminError::Validation(ref v) if v.missing == vec![field]));
        }
        assert_eq!(api.calls(), vec![Call::List]);
        assert_eq!(admin.board().songs(), &[song("1", "one")]);
    }

    #[tokio::test]
    async fn add_with_only_required_fields() {
        let api = FakeApi::with(vec![song("1", "one")]);
        let mut admin = mounted(&api).await;
        fill_minimal(&mut admin);
        let sent = admin.board().draft().clone();

        admin.add().await.unwrap();

        assert_eq!(api.calls()[1], Call::Create(sent.clone()));
        let songs = admin.board().songs();
        assert_eq!(songs.len(), 2);
        assert_eq!(songs[1], Song::new("2", sent));
        assert_eq!(admin.board().draft(), &SongDraft::default());
    }

    #[tokio::test]
    async fn failed_add_keeps_draft_and_list() {
        let api = FakeApi::with(vec![song("1", "one")]);
        let mut admin = mounted(&api).await;
        fill_minimal(&mut admin);
        let before = admin.board().clone();
        api.fail(true);

        let err = admin.add().await.unwrap_err();
        assert!(matches!(err, AdminError::Api(ref e) if e.payload().is_some()));
        assert_eq!(admin.board(), &before);
    }

    #[tokio::test]
    async fn save_edit_trusts_the_server_record() {
        let api = FakeApi::with(vec![song("1", "one"), song("2", "two"), song("3", "three")]);
        let mut admin = mounted(&api).await;
        admin.begin_edit("2").unwrap();
        admin.board_mut().set_edit_field(SongField::Duration, "3:00");

        admin.save_edit().await.unwrap();

        let board = admin.board();
        assert_eq!(board.edit(), &EditState::Idle);
        let matching: Vec<_> = board.songs().iter().filter(|s| s.id() == "2").collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].duration, "3:00 (checked)");
        assert_eq!(board.songs()[0], song("1", "one"));
        assert_eq!(board.songs()[2], song("3", "three"));
    }

    #[tokio::test]
    async fn failed_save_stays_in_edit_mode() {
        let api = FakeApi::with(vec![song("1", "one")]);
        let mut admin = mounted(&api).await;
        admin.begin_edit("1").unwrap();
        admin.board_mut().set_edit_field(SongField::Name, "uno");
        api.fail(true);

        assert!(admin.save_edit().await.is_err());
        assert_eq!(admin.board().editing().unwrap().name, "uno");
        assert_eq!(admin.board().songs(), &[song("1", "one")]);
    }

    #[tokio::test]
    async fn save_without_edit_sends_nothing() {
        let api = FakeApi::with(vec![song("1", "one")]);
        let mut admin = mounted(&api).await;
        assert!(matches!(admin.save_edit().await, Err(AdminError::NotEditing)));
        assert!(matches!(admin.begin_edit("9"), Err(AdminError::UnknownSong(_))));
        assert_eq!(api.calls(), vec![Call::List]);
    }

    #[tokio::test]
    async fn cancel_is_local_only() {
        let api = FakeApi::with(vec![song("1", "one")]);
        let mut admin = mounted(&api).await;
        admin.begin_edit("1").unwrap();
        admin.board_mut().set_edit_field(SongField::Name, "uno");
        admin.cancel_edit();
        assert_eq!(api.calls(), vec![Call::List]);
        assert_eq!(admin.board().songs(), &[song("1", "one")]);
        assert_eq!(admin.board().edit(), &EditState::Idle);
    }

    #[tokio::test]
    async fn delete_filters_by_id_and_tolerates_repeats() {
        let api = FakeApi::with(vec![song("1", "one"), song("2", "two")]);
        let mut admin = mounted(&api).await;

        admin.delete("1").await.unwrap();
        assert_eq!(admin.board().songs(), &[song("2", "two")]);

        admin.delete("1").await.unwrap();
        assert_eq!(admin.board().songs(), &[song("2", "two")]);
        assert_eq!(
            api.calls(),
            vec![Call::List, Call::Delete("1".into()), Call::Delete("1".into())]
        );
    }

    #[tokio::test]
    async fn failed_delete_keeps_the_entry() {
        let api = FakeApi::with(vec![song("1", "one")]);
        let mut admin = mounted(&api).await;
        api.fail(true);
        assert!(admin.delete("1").await.is_err());
        assert_eq!(admin.board().songs(), &[song("1", "one")]);
    }

    #[test]
    fn mount_gate_follows_the_session() {
        let session = MemorySession::new("secret");
        assert_eq!(Navigation::on_mount(&session), Navigation::Stay);
        session.set_token(Some(String::new()));
        assert_eq!(Navigation::on_mount(&session), Navigation::Login);
        assert_eq!(
            Navigation::on_mount(&MemorySession::anonymous()),
            Navigation::Login
        );
    }

    #[tokio::test]
    async fn logout_clears_session_and_redirects() {
        let api = FakeApi::default();
        let session = Rc::new(MemorySession::new("secret"));
        let mut admin = SongAdmin::new(&api, Rc::clone(&session));
        assert_eq!(admin.logout(), Navigation::Login);
        assert!(!session.is_authenticated());
        assert_eq!(admin.mount().await.unwrap(), Navigation::Login);
        assert!(api.calls().is_empty());
    }
}
