use crate::class::Class;
use crate::error::LobbyError;
use crate::lobby::{ChatMessage, GameMode, Lobby, LobbyId, LobbySnapshot, PlayerId, PlayerStatus};
use crate::team::TeamSide;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::info;

/// A lobby behind a single lock. Each mutation holds the write lock for the
/// whole transition, so readers never see a player halfway between two
/// places.
#[derive(Debug, Clone)]
pub struct SharedLobby {
    inner: Arc<RwLock<Lobby>>,
}

impl SharedLobby {
    pub fn new(lobby: Lobby) -> Self {
        Self {
            inner: Arc::new(RwLock::new(lobby)),
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Lobby> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Lobby> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn id(&self) -> LobbyId {
        self.read().id()
    }

    pub fn add_player(&self, player: &PlayerId) {
        self.write().add_player(player)
    }

    pub fn join_team(
        &self,
        player: &PlayerId,
        side: TeamSide,
        class: Class,
    ) -> Result<(), LobbyError> {
        self.write().join_team(player, side, class)
    }

    pub fn leave_team(&self, player: &PlayerId) -> bool {
        self.write().leave_team(player)
    }

    pub fn remove_player(&self, player: &PlayerId) -> bool {
        self.write().remove_player(player)
    }

    pub fn append_message(
        &self,
        player: &PlayerId,
        message: impl Into<String>,
        timestamp: Option<DateTime<Utc>>,
    ) {
        self.write().append_message(player, message, timestamp)
    }

    pub fn status(&self, player: &PlayerId) -> Option<PlayerStatus> {
        self.read().player_status(player)
    }

    pub fn chat_history(&self) -> Vec<ChatMessage> {
        self.read().chat_history().to_vec()
    }

    pub fn snapshot(&self) -> LobbySnapshot {
        self.read().snapshot()
    }
}

#[derive(Default, Debug, Clone)]
pub struct LobbyManager {
    lobbies: HashMap<LobbyId, SharedLobby>,
}

impl LobbyManager {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn create_lobby(
        &mut self,
        mode: GameMode,
        name: impl Into<String>,
        is_private: bool,
    ) -> SharedLobby {
        self.insert(Lobby::new(mode, name, is_private))
    }

    pub fn insert(&mut self, lobby: Lobby) -> SharedLobby {
        let shared = SharedLobby::new(lobby);
        self.lobbies.insert(shared.id(), shared.clone());
        shared
    }

    pub fn get_lobby(&self, id: &LobbyId) -> Result<SharedLobby, LobbyError> {
        self.lobbies
            .get(id)
            .cloned()
            .ok_or(LobbyError::LobbyNotFound(*id))
    }

    pub fn get_public_lobbies(&self) -> Vec<SharedLobby> {
        self.lobbies
            .values()
            .filter(|lobby| !lobby.read().is_private())
            .cloned()
            .collect()
    }

    pub fn close_lobby(&mut self, id: &LobbyId) -> Result<SharedLobby, LobbyError> {
        let lobby = self
            .lobbies
            .remove(id)
            .ok_or(LobbyError::LobbyNotFound(*id))?;
        info!(lobby_id = %id, "closed lobby");
        Ok(lobby)
    }

    /// Finds the first lobby that knows about `player`.
    pub fn find_player(&self, player: &PlayerId) -> Option<PlayerStatus> {
        self.lobbies
            .values()
            .find_map(|lobby| lobby.status(player))
    }

    pub fn len(&self) -> usize {
        self.lobbies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lobbies.is_empty()
    }
}
