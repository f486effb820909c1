pub mod args;
pub mod class;
pub mod command;
pub mod error;
pub mod lobby;
pub mod state;
pub mod team;

pub use crate::{
    class::{Class, ClassSlotGroup},
    error::{CommandError, LobbyError},
    lobby::{ChatMessage, GameMode, Lobby, LobbyId, LobbySnapshot, PlayerId, PlayerStatus},
    state::{LobbyManager, SharedLobby},
    team::{Team, TeamSide, HIGHLANDER_CLASS_COUNTS, SIXES_CLASS_COUNTS},
};

use crate::args::Args;
use tokio::io::{AsyncBufRead, BufReader};
use tracing::info;
use tracing_subscriber::prelude::*;

pub fn setup_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pug_lobby=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .with_file(false)
                .with_target(false),
        )
        .init();
}

/// Creates the lobby described by `args` and feeds it commands until the
/// input runs out.
pub async fn run(args: Args) -> anyhow::Result<()> {
    let mode: GameMode = args.mode.parse()?;
    let mut manager = LobbyManager::new();
    let lobby = manager.create_lobby(mode, args.name.as_str(), args.private);

    let input: Box<dyn AsyncBufRead + Unpin + Send> = match &args.script {
        Some(path) => {
            info!(script = %path.display(), "reading commands from script");
            Box::new(BufReader::new(tokio::fs::File::open(path).await?))
        }
        None => Box::new(BufReader::new(tokio::io::stdin())),
    };

    let handled = command::run_session(&lobby, input, tokio::io::stdout()).await?;
    info!(lobby_id = %lobby.id(), commands = handled, "session finished");

    if args.dump_json {
        println!("{}", serde_json::to_string_pretty(&lobby.snapshot())?);
    }
    manager.close_lobby(&lobby.id())?;
    Ok(())
}
