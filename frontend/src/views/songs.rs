use dioxus::prelude::*;
use songdesk_core::{Navigation, SongApi, SongBoard, SongField};

use crate::{
    components::{SongForm, SongRow},
    model::{BrowserSession, SongsApi},
    Route,
};

/// The admin page.
///
/// Every remote call runs in its own task so the page stays usable while it
/// is pending. The board is only written once a response is in, and failures
/// are logged and otherwise leave the page as it was.
#[component]
pub fn Songs() -> Element {
    let api = use_context::<SongsApi>();
    let session = use_context::<BrowserSession>();
    let nav = navigator();
    let mut board = use_signal(SongBoard::default);

    let load_api = api.clone();
    use_effect(move || {
        if Navigation::on_mount(&session) == Navigation::Login {
            nav.replace(Route::Login {});
            return;
        }
        let api = load_api.clone();
        spawn(async move {
            let res = api.list().await;
            board.write().settle_list(res).ok();
        });
    });

    let create_api = api.clone();
    let add = use_callback(move |()| {
        let draft = match board.read().submission() {
            Ok(draft) => draft,
            Err(e) => {
                gloo::dialogs::alert(&format!("Please fill in all required fields ({e})"));
                return;
            }
        };
        let api = create_api.clone();
        spawn(async move {
            let res = api.create(&draft).await;
            board.write().settle_create(res).ok();
        });
    });

    let update_api = api.clone();
    let save = use_callback(move |()| {
        let Some(song) = board.read().editing().cloned() else {
            return;
        };
        let api = update_api.clone();
        spawn(async move {
            let res = api.update(&song).await;
            board.write().settle_update(res).ok();
        });
    });

    let delete = use_callback(move |id: String| {
        let api = api.clone();
        spawn(async move {
            let res = api.delete(&id).await;
            board.write().settle_delete(&id, res).ok();
        });
    });

    let songs: Vec<_> = board
        .read()
        .songs()
        .iter()
        .map(|song| (song.id().to_string(), song.clone()))
        .collect();
    let editing = board.read().editing().cloned();
    let draft = board.read().draft().clone();

    rsx! {
        div { class: "songs",
            SongForm {
                draft,
                oninput: move |(field, value): (SongField, String)| {
                    board.write().set_draft_field(field, value);
                },
                onsubmit: add,
            }

            ul { class: "song-list",
                for (id , song) in songs {
                    SongRow {
                        key: "{id}",
                        edit: editing.clone().filter(|edit| edit.id() == id),
                        song,
                        onedit: move |id: String| {
                            board.write().begin_edit(&id);
                        },
                        ondelete: delete,
                        onsave: save,
                        oncancel: move |_| board.write().cancel_edit(),
                        oninput: move |(field, value): (SongField, String)| {
                            board.write().set_edit_field(field, value);
                        },
                    }
                }
            }
        }
    }
}
