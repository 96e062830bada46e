use dioxus::prelude::*;
use songdesk_core::{SongDraft, SongField};

/// Text input for one song field; lyrics get a textarea.
#[component]
pub fn FieldInput(field: SongField, value: String, oninput: EventHandler<(SongField, String)>) -> Element {
    let label = field.label();
    if field == SongField::Lyrics {
        rsx! {
            textarea {
                placeholder: label,
                value: "{value}",
                oninput: move |ev| oninput.call((field, ev.value())),
            }
        }
    } else {
        rsx! {
            input {
                r#type: "text",
                placeholder: label,
                value: "{value}",
                oninput: move |ev| oninput.call((field, ev.value())),
            }
        }
    }
}

#[component]
pub fn SongForm(
    draft: SongDraft,
    oninput: EventHandler<(SongField, String)>,
    onsubmit: EventHandler,
) -> Element {
    rsx! {
        div { class: "song-form",
            h2 { "New song" }
            for field in SongField::ALL {
                label { key: "{field}",
                    span {
                        {field.label()}
                        if field.is_required() {
                            " *"
                        }
                    }
                    FieldInput { field, value: field.get(&draft).to_string(), oninput }
                }
            }
            button { class: "btn", onclick: move |_ev| onsubmit.call(()), "Add song" }
        }
    }
}
