//! Line based commands for driving a lobby from a terminal or a script.
//!
//! ```text
//! add alice
//! join alice red medic
//! say alice hi all
//! status alice
//! leave alice
//! remove alice
//! roster
//! ```

use crate::class::Class;
use crate::error::CommandError;
use crate::lobby::{Lobby, PlayerId, PlayerStatus};
use crate::state::SharedLobby;
use crate::team::{Team, TeamSide};
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(PlayerId),
    Join {
        player: PlayerId,
        side: TeamSide,
        class: Class,
    },
    Leave(PlayerId),
    Remove(PlayerId),
    Say {
        player: PlayerId,
        message: String,
    },
    Status(PlayerId),
    Roster,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or(CommandError::Empty)?;
        let command = match verb.to_ascii_lowercase().as_str() {
            "add" => Command::Add(next_arg(&mut words, "player")?.to_string()),
            "leave" => Command::Leave(next_arg(&mut words, "player")?.to_string()),
            "remove" => Command::Remove(next_arg(&mut words, "player")?.to_string()),
            "status" => Command::Status(next_arg(&mut words, "player")?.to_string()),
            "roster" => Command::Roster,
            "join" => {
                let player = next_arg(&mut words, "player")?.to_string();
                let side = next_arg(&mut words, "team")?;
                let class = next_arg(&mut words, "class")?;
                Command::Join {
                    player,
                    side: side.parse()?,
                    class: class.parse()?,
                }
            }
            "say" => {
                let player = next_arg(&mut words, "player")?.to_string();
                let message = words.collect::<Vec<_>>().join(" ");
                if message.is_empty() {
                    return Err(CommandError::MissingArgument("message"));
                }
                Command::Say { player, message }
            }
            other => return Err(CommandError::UnknownCommand(other.to_string())),
        };
        Ok(command)
    }
}

fn next_arg<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    name: &'static str,
) -> Result<&'a str, CommandError> {
    words.next().ok_or(CommandError::MissingArgument(name))
}

impl Command {
    /// Applies the command and returns the line to show the caller.
    pub fn apply(self, lobby: &SharedLobby) -> Result<String, CommandError> {
        let reply = match self {
            Command::Add(player) => {
                lobby.add_player(&player);
                format!("{player} is idle")
            }
            Command::Join {
                player,
                side,
                class,
            } => {
                lobby.join_team(&player, side, class)?;
                format!("{player} joined {side} as {class}")
            }
            Command::Leave(player) => {
                if lobby.leave_team(&player) {
                    format!("{player} is idle")
                } else {
                    format!("{player} is not in the lobby")
                }
            }
            Command::Remove(player) => {
                if lobby.remove_player(&player) {
                    format!("{player} left the lobby")
                } else {
                    format!("{player} is not in the lobby")
                }
            }
            Command::Say { player, message } => {
                lobby.append_message(&player, message.as_str(), None);
                format!("<{player}> {message}")
            }
            Command::Status(player) => describe_status(&player, lobby.status(&player)),
            Command::Roster => describe_roster(&lobby.read()),
        };
        Ok(reply)
    }
}

fn describe_status(player: &PlayerId, status: Option<PlayerStatus>) -> String {
    match status {
        None => format!("{player} is not in the lobby"),
        Some(PlayerStatus::Idle { .. }) => format!("{player} is idle"),
        Some(PlayerStatus::JoinedTeam { team, class, .. }) => {
            format!("{player} plays {class} on {team}")
        }
    }
}

fn describe_team(side: TeamSide, team: &Team) -> String {
    let slots: Vec<String> = team
        .groups()
        .map(|group| {
            let players = if group.players().is_empty() {
                "-".to_string()
            } else {
                group.players().join(",")
            };
            format!("{}[{}/{}]={}", group.class(), group.size(), group.capacity(), players)
        })
        .collect();
    format!("{side}: {}", slots.join(" "))
}

pub fn describe_roster(lobby: &Lobby) -> String {
    let idle = lobby.idle_players();
    [
        format!(
            "{} ({}) {}/{}",
            lobby.name(),
            lobby.mode(),
            lobby.num_players(),
            lobby.max_players()
        ),
        describe_team(TeamSide::Red, lobby.team(TeamSide::Red)),
        describe_team(TeamSide::Blu, lobby.team(TeamSide::Blu)),
        format!(
            "idle: {}",
            if idle.is_empty() {
                "-".to_string()
            } else {
                idle.join(",")
            }
        ),
    ]
    .join("\n")
}

/// Reads commands line by line and writes one reply per command. Blank
/// lines and `#` comments are skipped; a failed command is reported and
/// the session carries on.
pub async fn run_session<R, W>(
    lobby: &SharedLobby,
    reader: R,
    mut writer: W,
) -> Result<usize, CommandError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut handled = 0;
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        debug!(command = %line, "handling command");
        let reply = match line.parse::<Command>().and_then(|cmd| cmd.apply(lobby)) {
            Ok(reply) => reply,
            Err(err) => format!("error: {err}"),
        };
        writer.write_all(reply.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        handled += 1;
    }
    writer.flush().await?;
    Ok(handled)
}
