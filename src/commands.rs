use std::io::Write;

use anyhow::{bail, Context};
use songdesk_core::{HttpSongApi, Navigation, SessionProvider, Song, SongAdmin, SongApi};
use tracing::info;

use crate::{
    config::Config,
    options::{Args, Command},
    session::FileSession,
};

async fn mount<A: SongApi, S: SessionProvider>(admin: &mut SongAdmin<A, S>) -> anyhow::Result<()> {
    if admin.mount().await? == Navigation::Login {
        bail!("not signed in, put a session token into the session store first");
    }
    Ok(())
}

/// Runs one command against a fresh, not yet mounted admin page and prints
/// the resulting list.
///
/// Remote failures are already logged by the admin page; they still end the
/// command with an error so scripts notice.
pub async fn run<A, S>(
    admin: &mut SongAdmin<A, S>,
    command: &Command,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<()>
where
    A: SongApi,
    S: SessionProvider,
{
    match command {
        Command::List => mount(admin).await?,
        Command::Add(fields) => {
            mount(admin).await?;
            let board = admin.board_mut();
            for (field, value) in fields.given() {
                board.set_draft_field(field, value);
            }
            admin.add().await.context("cannot add song")?;
        }
        Command::Edit { id, fields } => {
            mount(admin).await?;
            admin.begin_edit(id)?;
            let board = admin.board_mut();
            for (field, value) in fields.given() {
                board.set_edit_field(field, value);
            }
            admin.save_edit().await.context("cannot save song")?;
        }
        Command::Delete { id } => {
            mount(admin).await?;
            admin.delete(id).await.context("cannot delete song")?;
        }
        Command::Logout => {
            admin.logout();
            info!("signed out");
            return Ok(());
        }
    }

    print_songs(admin.board().songs(), json, out)
}

fn print_songs(songs: &[Song], json: bool, out: &mut impl Write) -> anyhow::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, songs)?;
        writeln!(out)?;
        return Ok(());
    }
    for song in songs {
        writeln!(out, "{:>6}  {} - {}", song.id(), song.singer, song.name)?;
        if !song.album.is_empty() {
            writeln!(out, "        {} ({})", song.album, song.album_artist)?;
        }
    }
    Ok(())
}

/// Wires config, session store and HTTP client together and runs `args`.
pub async fn execute(args: Args) -> anyhow::Result<()> {
    let config = Config::new(args.config.clone())?;
    let base_url = args.base_url.as_deref().unwrap_or(&config.api.base_url);
    let session = FileSession::new(config.session.store.clone(), config.session.key.clone());

    let api = HttpSongApi::new(base_url, session.clone())
        .with_context(|| format!("bad songs URL {base_url}"))?;
    let mut admin = SongAdmin::new(api, session);

    run(&mut admin, &args.command, args.json, &mut std::io::stdout().lock()).await
}
