use crate::class::Class;
use crate::lobby::{LobbyId, PlayerId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LobbyError {
    #[error("unknown class {0:?}")]
    UnknownRole(String),
    #[error("no free {0} slot")]
    SlotFull(Class),
    #[error("unknown team {0:?}")]
    UnknownTeam(String),
    #[error("invalid lobby mode {0:?}")]
    InvalidMode(String),
    #[error("player {0} is listed in more than one place")]
    DuplicatePlayer(PlayerId),
    #[error("lobby {0} not found")]
    LobbyNotFound(LobbyId),
}

/// Errors from the line based front end.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command {0:?}")]
    UnknownCommand(String),
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),
    #[error(transparent)]
    Lobby(#[from] LobbyError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
