use dioxus::prelude::*;
use songdesk_core::{Song, SongField};

use super::FieldInput;

/// One list entry. With `edit` set the row turns into an inline form over the
/// edit buffer; the song itself is only shown, never modified here.
#[component]
pub fn SongRow(
    song: Song,
    edit: Option<Song>,
    onedit: EventHandler<String>,
    ondelete: EventHandler<String>,
    onsave: EventHandler,
    oncancel: EventHandler,
    oninput: EventHandler<(SongField, String)>,
) -> Element {
    let id = song.id().to_string();

    match edit {
        Some(buffer) => rsx! {
            li { class: "song editing",
                for field in SongField::ALL {
                    FieldInput { key: "{field}", field, value: field.get(&buffer).to_string(), oninput }
                }
                button { class: "btn", onclick: move |_ev| onsave.call(()), "Save" }
                button { class: "btn", onclick: move |_ev| oncancel.call(()), "Cancel" }
            }
        },
        None => {
            let delete_id = id.clone();
            rsx! {
                li { class: "song",
                    img { class: "avatar", src: "{song.avatar}", alt: "{song.name}" }
                    div { class: "details",
                        span { class: "name", "{song.name}" }
                        span { class: "singer", "{song.singer}" }
                        if !song.album.is_empty() {
                            span { class: "album", "{song.album} ({song.album_artist})" }
                        }
                        if !song.duration.is_empty() {
                            span { class: "duration", "{song.duration}" }
                        }
                    }
                    audio { controls: true, src: "{song.audio_file}" }
                    button { class: "btn", onclick: move |_ev| onedit.call(id.clone()), "Edit" }
                    button {
                        class: "btn danger",
                        onclick: move |_ev| ondelete.call(delete_id.clone()),
                        "Delete"
                    }
                }
            }
        }
    }
}
