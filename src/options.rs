use clap::{Args as ClapArgs, Parser, Subcommand};
use songdesk_core::SongField;

/// Manage the song catalog of a songdesk server
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the config file (default: `songdesk.toml`)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Songs resource URL, overrides `api.base_url`
    #[arg(short, long)]
    pub base_url: Option<String>,

    /// Print songs as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all songs
    List,
    /// Create a song; name, singer, audio file and avatar are required
    Add(Fields),
    /// Edit a song in place, only the given fields change
    Edit {
        id: String,
        #[command(flatten)]
        fields: Fields,
    },
    /// Delete a song
    Delete { id: String },
    /// Forget the stored session token
    Logout,
}

#[derive(ClapArgs, Debug, Default)]
pub struct Fields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub singer: Option<String>,
    #[arg(long)]
    pub album: Option<String>,
    #[arg(long)]
    pub album_artist: Option<String>,
    #[arg(long)]
    pub duration: Option<String>,
    #[arg(long)]
    pub lyrics: Option<String>,
    #[arg(long)]
    pub audio_file: Option<String>,
    #[arg(long)]
    pub avatar: Option<String>,
}

impl Fields {
    /// The fields that were actually passed on the command line.
    pub fn given(&self) -> impl Iterator<Item = (SongField, &str)> {
        [
            (SongField::Name, &self.name),
            (SongField::Singer, &self.singer),
            (SongField::Album, &self.album),
            (SongField::AlbumArtist, &self.album_artist),
            (SongField::Duration, &self.duration),
            (SongField::Lyrics, &self.lyrics),
            (SongField::AudioFile, &self.audio_file),
            (SongField::Avatar, &self.avatar),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_only_touches_given_fields() {
        let args = Args::parse_from([
            "songdesk",
            "edit",
            "17",
            "--album-artist",
            "Various",
            "--duration",
            "4:01",
        ]);
        let Command::Edit { id, fields } = args.command else {
            panic!("expected edit");
        };
        assert_eq!(id, "17");

        let given: Vec<_> = fields.given().collect();
        assert_eq!(
            given,
            vec![
                (SongField::AlbumArtist, "Various"),
                (SongField::Duration, "4:01")
            ]
        );
    }

    #[test]
    fn global_flags() {
        let args = Args::parse_from(["songdesk", "--json", "-b", "http://x/api/songs", "list"]);
        assert!(args.json);
        assert_eq!(args.base_url.as_deref(), Some("http://x/api/songs"));
        assert!(matches!(args.command, Command::List));
    }
}
