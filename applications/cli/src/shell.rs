//! Line-oriented command shell over an [`AppContext`]

use anyhow::{bail, Context};
use cadenza_core::{PlaylistId, TrackId};
use cadenza_playback::{format_time, MediaEvent, SkipDirection};
use cadenza_session::{AppContext, MediaEventSender};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

// Used when a track carries no duration of its own
const FALLBACK_DURATION_SECS: f64 = 180.0;

const HELP: &str = "\
Commands:
  login <username> <password>        Sign in
  register <username> <email> <pw>   Create an account and sign in
  logout                             Sign out and stop playback
  whoami                             Show the signed-in user
  tracks                             List the catalog
  search <query>                     Search the catalog
  playlists                          List your playlists
  show <playlist-id>                 Show a playlist with its tracks
  create <name>                      Create an empty playlist
  add <playlist-id> <track-id>       Append a track to a playlist
  delete <playlist-id>               Delete a playlist
  play <track-id>                    Play a track (again to pause/resume)
  toggle | next | prev               Transport
  seek <0.0-1.0>                     Jump to a fraction of the track
  volume <0.0-1.0>                   Set volume
  tick <seconds>                     Advance simulated playback
  end                                Simulate the end of the current track
  status                             Show what is playing
  health                             Probe the backend
  quit                               Exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Login { username: String, password: String },
    Register { username: String, email: String, password: String },
    Logout,
    WhoAmI,
    Tracks,
    Search(String),
    Playlists,
    Show(PlaylistId),
    Create(String),
    Add { playlist_id: PlaylistId, track_id: TrackId },
    Delete(PlaylistId),
    Play(TrackId),
    Toggle,
    Skip(SkipDirection),
    Seek(f64),
    Volume(f64),
    Tick(f64),
    End,
    Status,
    Health,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> anyhow::Result<Option<Self>> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match (name, args.as_slice()) {
            ("", _) => return Ok(None),
            ("help" | "?", _) => Command::Help,
            ("login", [username, password]) => Command::Login {
                username: (*username).to_string(),
                password: (*password).to_string(),
            },
            ("register", [username, email, password]) => Command::Register {
                username: (*username).to_string(),
                email: (*email).to_string(),
                password: (*password).to_string(),
            },
            ("logout", []) => Command::Logout,
            ("whoami", []) => Command::WhoAmI,
            ("tracks", []) => Command::Tracks,
            // Queries keep their inner spacing; an empty query is valid
            ("search", _) => Command::Search(rest.to_string()),
            ("playlists", []) => Command::Playlists,
            ("show", [id]) => Command::Show(PlaylistId::new(*id)),
            ("create", _) => Command::Create(rest.to_string()),
            ("add", [playlist_id, track_id]) => Command::Add {
                playlist_id: PlaylistId::new(*playlist_id),
                track_id: TrackId::new(*track_id),
            },
            ("delete", [id]) => Command::Delete(PlaylistId::new(*id)),
            ("play", [id]) => Command::Play(TrackId::new(*id)),
            ("toggle", []) => Command::Toggle,
            ("next", []) => Command::Skip(SkipDirection::Next),
            ("prev", []) => Command::Skip(SkipDirection::Prev),
            ("seek", [value]) => Command::Seek(parse_number(value)?),
            ("volume", [value]) => Command::Volume(parse_number(value)?),
            ("tick", [value]) => Command::Tick(parse_number(value)?),
            ("end", []) => Command::End,
            ("status", []) => Command::Status,
            ("health", []) => Command::Health,
            ("quit" | "exit", []) => Command::Quit,
            (name, _) => bail!("unknown command or wrong arguments: {name} (try `help`)"),
        };

        Ok(Some(command))
    }
}

fn parse_number(value: &str) -> anyhow::Result<f64> {
    value
        .parse()
        .with_context(|| format!("not a number: {value}"))
}

/// Read commands from stdin until `quit` or end of input
pub async fn run(context: Arc<AppContext>, media: MediaEventSender) -> anyhow::Result<()> {
    println!("Cadenza. Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        if command == Command::Quit {
            break;
        }

        if let Err(e) = execute(&context, &media, command).await {
            println!("Error: {e}");
        }

        for event in context.drain_playback_events().await {
            debug!(?event, "Playback event");
        }
    }

    Ok(())
}

async fn execute(
    context: &AppContext,
    media: &MediaEventSender,
    command: Command,
) -> anyhow::Result<()> {
    match command {
        Command::Help => println!("{HELP}"),
        Command::Login { username, password } => {
            let user = context.login(&username, &password).await?;
            println!("Signed in as {}", user.username);
        }
        Command::Register {
            username,
            email,
            password,
        } => {
            let user = context.register(&username, &email, &password).await?;
            println!("Welcome, {}", user.username);
        }
        Command::Logout => {
            context.logout().await;
            println!("Signed out");
        }
        Command::WhoAmI => match context.user().await {
            Some(user) => println!("{} ({:?})", user.username, context.status().await),
            None => println!("Not signed in ({:?})", context.status().await),
        },
        Command::Tracks => {
            context.load_tracks().await;
            print_tracks(&context.tracks().await);
        }
        Command::Search(query) => print_tracks(&context.search(&query).await),
        Command::Playlists => {
            context.load_playlists().await;
            for playlist in context.playlists().await {
                println!(
                    "{:>6}  {} ({} tracks)",
                    playlist.id,
                    playlist.name,
                    playlist.track_ids.len()
                );
            }
        }
        Command::Show(playlist_id) => {
            let details = context.playlist_details(&playlist_id).await?;
            println!("{}", details.playlist.name);
            if !details.playlist.description.is_empty() {
                println!("{}", details.playlist.description);
            }
            print_tracks(&details.tracks);
        }
        Command::Create(name) => {
            if context.create_playlist(&name).await? {
                println!("Created playlist {name}");
            } else {
                println!("Playlist name cannot be blank");
            }
        }
        Command::Add {
            playlist_id,
            track_id,
        } => {
            context.add_track_to_playlist(&playlist_id, &track_id).await?;
            println!("Added {track_id} to {playlist_id}");
        }
        Command::Delete(playlist_id) => {
            context.delete_playlist(&playlist_id).await?;
            println!("Deleted {playlist_id}");
        }
        Command::Play(track_id) => {
            let before = context.playback_state().await;
            if !context.select_track_by_id(&track_id).await {
                bail!("no track {track_id} in the catalog or search results");
            }

            let switched = before
                .current_track
                .as_ref()
                .map_or(true, |track| track.id != track_id);
            if switched {
                report_metadata(context).await;
            }
            print_status(context).await;
        }
        Command::Toggle => {
            context.toggle_play().await?;
            print_status(context).await;
        }
        Command::Skip(direction) => {
            context.skip(direction).await?;
            report_metadata(context).await;
            print_status(context).await;
        }
        Command::Seek(fraction) => {
            context.seek(fraction).await?;
            print_status(context).await;
        }
        Command::Volume(volume) => {
            context.set_volume(volume).await;
            println!("Volume {:.0}%", context.playback_state().await.volume * 100.0);
        }
        // Progress goes through the channel like a real element's would
        Command::Tick(seconds) => {
            let state = context.playback_state().await;
            if state.current_track.is_none() || !state.is_playing {
                bail!("nothing is playing");
            }

            let position = state.current_time + seconds.max(0.0);
            if state.duration > 0.0 && position >= state.duration {
                send(media, MediaEvent::TimeUpdated(state.duration));
                send(media, MediaEvent::Ended);
            } else {
                send(media, MediaEvent::TimeUpdated(position));
            }
        }
        Command::End => send(media, MediaEvent::Ended),
        Command::Status => print_status(context).await,
        Command::Health => {
            let health = context.session().client().health().await?;
            println!(
                "Backend {} ({})",
                health.status,
                health.timestamp.as_deref().unwrap_or("no timestamp")
            );
        }
        Command::Quit => {}
    }

    Ok(())
}

/// Stand in for the element reporting metadata right after a load
///
/// Applied directly rather than through the media channel so that a command
/// typed next (`seek`) already sees the duration.
async fn report_metadata(context: &AppContext) {
    if let Some(track) = context.playback_state().await.current_track {
        let duration = track.duration.map_or(FALLBACK_DURATION_SECS, f64::from);
        context
            .handle_media_event(MediaEvent::MetadataLoaded(duration))
            .await;
    }
}

fn send(media: &MediaEventSender, event: MediaEvent) {
    if media.send(event).is_err() {
        warn!(?event, "Media event channel closed");
    }
}

fn print_tracks(tracks: &[cadenza_core::Track]) {
    if tracks.is_empty() {
        println!("(no tracks)");
        return;
    }
    for track in tracks {
        let length = track
            .duration
            .map(|secs| format_time(f64::from(secs)))
            .unwrap_or_default();
        println!(
            "{:>6}  {} - {} {}",
            track.id, track.artist, track.title, length
        );
    }
}

async fn print_status(context: &AppContext) {
    let state = context.playback_state().await;
    match &state.current_track {
        Some(track) => println!(
            "{} {} - {}  {} / {}  vol {:.0}%",
            if state.is_playing { ">" } else { "||" },
            track.artist,
            track.title,
            format_time(state.current_time),
            format_time(state.duration),
            state.volume * 100.0
        ),
        None => println!("Nothing playing"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::SimulatedMediaElement;
    use cadenza_core::Track;
    use cadenza_playback::PlaybackConfig;
    use cadenza_server_client::{CadenzaClient, MemoryTokenStore, ServerConfig};

    fn offline_context() -> AppContext {
        let tokens = Arc::new(MemoryTokenStore::new());
        let client =
            CadenzaClient::new(ServerConfig::new("http://127.0.0.1:1"), tokens.clone()).unwrap();
        AppContext::new(
            client,
            tokens,
            Box::new(SimulatedMediaElement::new()),
            PlaybackConfig::default(),
        )
    }

    #[tokio::test]
    async fn seek_right_after_play_uses_reported_duration() {
        let context = offline_context();
        let mut track = Track::new("1", "Song", "Artist", "https://cdn.example.com/1.mp3");
        track.duration = Some(200);

        context.select_track(track).await;
        report_metadata(&context).await;
        context.seek(0.5).await.unwrap();

        let state = context.playback_state().await;
        assert_eq!(state.duration, 200.0);
        assert_eq!(state.current_time, 100.0);
    }

    #[tokio::test]
    async fn track_without_duration_gets_fallback() {
        let context = offline_context();
        context
            .select_track(Track::new("1", "Song", "Artist", "https://cdn.example.com/1.mp3"))
            .await;
        report_metadata(&context).await;

        assert_eq!(context.playback_state().await.duration, FALLBACK_DURATION_SECS);
    }

    #[test]
    fn parses_transport_commands() {
        assert_eq!(Command::parse("next").unwrap(), Some(Command::Skip(SkipDirection::Next)));
        assert_eq!(Command::parse("  prev  ").unwrap(), Some(Command::Skip(SkipDirection::Prev)));
        assert_eq!(Command::parse("seek 0.25").unwrap(), Some(Command::Seek(0.25)));
        assert_eq!(
            Command::parse("play 42").unwrap(),
            Some(Command::Play(TrackId::new("42")))
        );
    }

    #[test]
    fn search_and_create_keep_the_rest_of_the_line() {
        assert_eq!(
            Command::parse("search lofi  hip hop").unwrap(),
            Some(Command::Search("lofi  hip hop".to_string()))
        );
        assert_eq!(Command::parse("search").unwrap(), Some(Command::Search(String::new())));
        assert_eq!(
            Command::parse("create Road Trip").unwrap(),
            Some(Command::Create("Road Trip".to_string()))
        );
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse("   ").unwrap(), None);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(Command::parse("login alice").is_err());
        assert!(Command::parse("seek half").is_err());
        assert!(Command::parse("dance").is_err());
    }
}
