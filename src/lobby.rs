use crate::class::Class;
use crate::error::LobbyError;
use crate::team::{Team, TeamSide};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub type PlayerId = String;
pub type LobbyId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    #[serde(rename = "6v6")]
    Sixes,
    #[serde(rename = "HL")]
    Highlander,
}

impl GameMode {
    fn build_team(self) -> Team {
        match self {
            GameMode::Sixes => Team::sixes(),
            GameMode::Highlander => Team::highlander(),
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::Sixes => f.write_str("6v6"),
            GameMode::Highlander => f.write_str("HL"),
        }
    }
}

impl FromStr for GameMode {
    type Err = LobbyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "6v6" | "sixes" => Ok(GameMode::Sixes),
            "hl" | "highlander" => Ok(GameMode::Highlander),
            _ => Err(LobbyError::InvalidMode(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub player: PlayerId,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Where a player currently is within a lobby. Derived on demand from the
/// lobby's occupancy and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlayerStatus {
    Idle {
        lobby: LobbyId,
    },
    JoinedTeam {
        lobby: LobbyId,
        team: TeamSide,
        class: Class,
    },
}

/// Plain data copy of a lobby, for whoever needs to store it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LobbySnapshot {
    pub id: LobbyId,
    pub mode: GameMode,
    pub name: String,
    pub is_private: bool,
    pub idle_players: Vec<PlayerId>,
    pub red: BTreeMap<Class, Vec<PlayerId>>,
    pub blu: BTreeMap<Class, Vec<PlayerId>>,
    pub chat_history: Vec<ChatMessage>,
}

/// A lobby with two teams, an idle pool and a chat log.
///
/// Every player known to the lobby is in exactly one place: the idle pool,
/// or one class slot on one of the two teams. Every mutation starts with
/// `vacate`, which clears the player out of every location, and
/// then seats them in at most one place.
#[derive(Debug, Clone)]
pub struct Lobby {
    id: LobbyId,
    mode: GameMode,
    name: String,
    is_private: bool,
    idle_players: HashSet<PlayerId>,
    red_team: Team,
    blu_team: Team,
    chat_history: Vec<ChatMessage>,
}

impl Lobby {
    pub fn new(mode: GameMode, name: impl Into<String>, is_private: bool) -> Self {
        Self::with_id(Uuid::new_v4(), mode, name, is_private)
    }

    pub fn with_id(id: LobbyId, mode: GameMode, name: impl Into<String>, is_private: bool) -> Self {
        let lobby = Self::empty(id, mode, name.into(), is_private);
        info!(lobby_id = %lobby.id, mode = %mode, name = %lobby.name, "created lobby");
        lobby
    }

    fn empty(id: LobbyId, mode: GameMode, name: String, is_private: bool) -> Self {
        Self {
            id,
            mode,
            name,
            is_private,
            idle_players: HashSet::new(),
            red_team: mode.build_team(),
            blu_team: mode.build_team(),
            chat_history: Vec::new(),
        }
    }

    /// Builds a lobby from a mode name such as `"6v6"` or `"HL"`.
    pub fn from_mode_name(
        mode: &str,
        name: impl Into<String>,
        is_private: bool,
    ) -> Result<Self, LobbyError> {
        Ok(Self::new(mode.parse()?, name, is_private))
    }

    pub fn id(&self) -> LobbyId {
        self.id
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_private(&self) -> bool {
        self.is_private
    }

    /// Puts the player in the idle pool, taking them off any team first.
    pub fn add_player(&mut self, player: &PlayerId) {
        self.seat_idle(player);
    }

    /// Seats the player on `side` as `class`, leaving any previous team or
    /// class. A rejected join sends the player to the idle pool.
    pub fn join_team(
        &mut self,
        player: &PlayerId,
        side: TeamSide,
        class: Class,
    ) -> Result<(), LobbyError> {
        self.vacate(player);
        if let Err(err) = self.team_mut(side).add_player(player, class) {
            self.idle_players.insert(player.clone());
            warn!(lobby_id = %self.id, player = %player, team = %side, class = %class, error = %err, "join rejected, player is idle");
            return Err(err);
        }
        debug!(lobby_id = %self.id, player = %player, team = %side, class = %class, "player joined team");
        Ok(())
    }

    /// Takes the player off their team and back to the idle pool. Players
    /// not in the lobby are left alone; returns whether the player was known.
    pub fn leave_team(&mut self, player: &PlayerId) -> bool {
        self.contains(player) && self.seat_idle(player)
    }

    /// Removes the player from the lobby entirely.
    pub fn remove_player(&mut self, player: &PlayerId) -> bool {
        let was_present = self.vacate(player);
        if was_present {
            debug!(lobby_id = %self.id, player = %player, "player left lobby");
        }
        was_present
    }

    pub fn append_message(
        &mut self,
        player: &PlayerId,
        message: impl Into<String>,
        timestamp: Option<DateTime<Utc>>,
    ) {
        self.chat_history.push(ChatMessage {
            player: player.clone(),
            message: message.into(),
            timestamp: timestamp.unwrap_or_else(Utc::now),
        });
    }

    /// Clears the player out of the idle pool and both teams. Returns
    /// whether the player was in the lobby beforehand.
    fn vacate(&mut self, player: &PlayerId) -> bool {
        self.idle_players.remove(player)
            | self.red_team.remove_player(player)
            | self.blu_team.remove_player(player)
    }

    /// Moves the player to the idle pool. Returns whether the player was in
    /// the lobby beforehand.
    fn seat_idle(&mut self, player: &PlayerId) -> bool {
        let was_present = self.vacate(player);
        self.idle_players.insert(player.clone());
        debug!(lobby_id = %self.id, player = %player, "player is idle");
        was_present
    }

    fn team_mut(&mut self, side: TeamSide) -> &mut Team {
        match side {
            TeamSide::Red => &mut self.red_team,
            TeamSide::Blu => &mut self.blu_team,
        }
    }

    pub fn team(&self, side: TeamSide) -> &Team {
        match side {
            TeamSide::Red => &self.red_team,
            TeamSide::Blu => &self.blu_team,
        }
    }

    pub fn player_status(&self, player: &PlayerId) -> Option<PlayerStatus> {
        if self.idle_players.contains(player) {
            return Some(PlayerStatus::Idle { lobby: self.id });
        }
        [TeamSide::Red, TeamSide::Blu].into_iter().find_map(|side| {
            self.team(side)
                .class_of(player)
                .map(|class| PlayerStatus::JoinedTeam {
                    lobby: self.id,
                    team: side,
                    class,
                })
        })
    }

    pub fn contains(&self, player: &PlayerId) -> bool {
        self.idle_players.contains(player)
            || self.red_team.contains(player)
            || self.blu_team.contains(player)
    }

    /// Idle players, sorted.
    pub fn idle_players(&self) -> Vec<PlayerId> {
        let mut idle: Vec<PlayerId> = self.idle_players.iter().cloned().collect();
        idle.sort();
        idle
    }

    pub fn chat_history(&self) -> &[ChatMessage] {
        &self.chat_history
    }

    /// The number of players on either team. Idle players are not counted.
    pub fn num_players(&self) -> usize {
        self.red_team.num_players() + self.blu_team.num_players()
    }

    pub fn max_players(&self) -> usize {
        self.red_team.capacity() + self.blu_team.capacity()
    }

    pub fn snapshot(&self) -> LobbySnapshot {
        let roster = |team: &Team| {
            team.groups()
                .map(|group| (group.class(), group.players().to_vec()))
                .collect()
        };
        LobbySnapshot {
            id: self.id,
            mode: self.mode,
            name: self.name.clone(),
            is_private: self.is_private,
            idle_players: self.idle_players(),
            red: roster(&self.red_team),
            blu: roster(&self.blu_team),
            chat_history: self.chat_history.clone(),
        }
    }

    /// Rebuilds a lobby from a snapshot. Occupancy is replayed through the
    /// normal transitions, so a snapshot that breaks capacity, lists a class
    /// the mode lacks, or puts one player in two places is rejected.
    pub fn from_snapshot(snapshot: LobbySnapshot) -> Result<Self, LobbyError> {
        let mut seen = HashSet::new();
        let listed = snapshot
            .idle_players
            .iter()
            .chain(snapshot.red.values().flatten())
            .chain(snapshot.blu.values().flatten());
        for player in listed {
            if !seen.insert(player) {
                return Err(LobbyError::DuplicatePlayer(player.clone()));
            }
        }

        let mut lobby = Self::empty(
            snapshot.id,
            snapshot.mode,
            snapshot.name,
            snapshot.is_private,
        );
        for player in &snapshot.idle_players {
            lobby.add_player(player);
        }
        for (side, roster) in [(TeamSide::Red, &snapshot.red), (TeamSide::Blu, &snapshot.blu)] {
            for (&class, players) in roster {
                for player in players {
                    lobby.join_team(player, side, class)?;
                }
            }
        }
        lobby.chat_history = snapshot.chat_history;
        info!(lobby_id = %lobby.id, mode = %lobby.mode, name = %lobby.name, "restored lobby");
        Ok(lobby)
    }
}
