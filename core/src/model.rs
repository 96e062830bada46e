use std::{
    fmt,
    ops::{Deref, DerefMut},
};

use serde::{Deserialize, Deserializer, Serialize};

/// The editable part of a song. This is also what gets POSTed on create,
/// which is why it carries no id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SongDraft {
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub singer: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub album: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub album_artist: String,
    // free text, e.g. "3:41"
    #[serde(deserialize_with = "null_as_empty")]
    pub duration: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub lyrics: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub audio_file: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub avatar: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(de)?.unwrap_or_default())
}

/// A song as the server knows it.
///
/// The id is assigned remotely and cannot be changed afterwards; everything
/// else is reachable (and mutable) through `Deref` to [`SongDraft`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    // MongoDB backends key their documents by `_id`
    #[serde(alias = "_id", deserialize_with = "id_from_any")]
    id: String,
    #[serde(flatten)]
    fields: SongDraft,
}

impl Deref for Song {
    type Target = SongDraft;

    fn deref(&self) -> &SongDraft {
        &self.fields
    }
}

impl DerefMut for Song {
    fn deref_mut(&mut self) -> &mut SongDraft {
        &mut self.fields
    }
}

impl Song {
    pub fn new(id: impl Into<String>, fields: SongDraft) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

// some backends hand out integer keys
fn id_from_any<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(de)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SongField {
    Name,
    Singer,
    Album,
    AlbumArtist,
    Duration,
    Lyrics,
    AudioFile,
    Avatar,
}

impl SongField {
    pub const ALL: [SongField; 8] = [
        SongField::Name,
        SongField::Singer,
        SongField::Album,
        SongField::AlbumArtist,
        SongField::Duration,
        SongField::Lyrics,
        SongField::AudioFile,
        SongField::Avatar,
    ];

    pub const REQUIRED: [SongField; 4] = [
        SongField::Name,
        SongField::Singer,
        SongField::AudioFile,
        SongField::Avatar,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SongField::Name => "Name",
            SongField::Singer => "Singer",
            SongField::Album => "Album",
            SongField::AlbumArtist => "Album artist",
            SongField::Duration => "Duration",
            SongField::Lyrics => "Lyrics",
            SongField::AudioFile => "Audio file URL",
            SongField::Avatar => "Avatar URL",
        }
    }

    /// Key used on the wire.
    pub fn key(self) -> &'static str {
        match self {
            SongField::Name => "name",
            SongField::Singer => "singer",
            SongField::Album => "album",
            SongField::AlbumArtist => "albumArtist",
            SongField::Duration => "duration",
            SongField::Lyrics => "lyrics",
            SongField::AudioFile => "audioFile",
            SongField::Avatar => "avatar",
        }
    }

    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }

    pub fn get(self, draft: &SongDraft) -> &str {
        match self {
            SongField::Name => &draft.name,
            SongField::Singer => &draft.singer,
            SongField::Album => &draft.album,
            SongField::AlbumArtist => &draft.album_artist,
            SongField::Duration => &draft.duration,
            SongField::Lyrics => &draft.lyrics,
            SongField::AudioFile => &draft.audio_file,
            SongField::Avatar => &draft.avatar,
        }
    }

    pub fn set(self, draft: &mut SongDraft, value: impl Into<String>) {
        let slot = match self {
            SongField::Name => &mut draft.name,
            SongField::Singer => &mut draft.singer,
            SongField::Album => &mut draft.album,
            SongField::AlbumArtist => &mut draft.album_artist,
            SongField::Duration => &mut draft.duration,
            SongField::Lyrics => &mut draft.lyrics,
            SongField::AudioFile => &mut draft.audio_file,
            SongField::Avatar => &mut draft.avatar,
        };
        *slot = value.into();
    }
}

impl fmt::Display for SongField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub missing: Vec<SongField>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<_> = self.missing.iter().map(|field| field.key()).collect();
        write!(f, "missing required fields: {}", keys.join(", "))
    }
}

impl std::error::Error for ValidationError {}

impl SongDraft {
    pub fn missing_required(&self) -> Vec<SongField> {
        SongField::REQUIRED
            .into_iter()
            .filter(|field| field.get(self).is_empty())
            .collect()
    }

    /// Only checks presence of the required fields, nothing else.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing = self.missing_required();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { missing })
        }
    }
}
