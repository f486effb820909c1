use crate::error::LobbyError;
use crate::lobby::PlayerId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Class {
    Scout,
    Soldier,
    Pyro,
    Demoman,
    Heavy,
    Engineer,
    Medic,
    Sniper,
    Spy,
}

impl Class {
    pub const ALL: [Class; 9] = [
        Class::Scout,
        Class::Soldier,
        Class::Pyro,
        Class::Demoman,
        Class::Heavy,
        Class::Engineer,
        Class::Medic,
        Class::Sniper,
        Class::Spy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Class::Scout => "scout",
            Class::Soldier => "soldier",
            Class::Pyro => "pyro",
            Class::Demoman => "demoman",
            Class::Heavy => "heavy",
            Class::Engineer => "engineer",
            Class::Medic => "medic",
            Class::Sniper => "sniper",
            Class::Spy => "spy",
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Class {
    type Err = LobbyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Class::ALL
            .into_iter()
            .find(|class| class.as_str() == lowered)
            .ok_or_else(|| LobbyError::UnknownRole(s.to_string()))
    }
}

/// The players playing one class on a team.
///
/// Adding a player that is already present and removing one that is absent
/// are both no-ops, so callers can clear a player out before placing them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSlotGroup {
    class: Class,
    capacity: usize,
    players: Vec<PlayerId>,
}

impl ClassSlotGroup {
    pub fn new(class: Class, capacity: usize) -> Self {
        Self {
            class,
            capacity,
            players: Vec::with_capacity(capacity),
        }
    }

    pub fn class(&self) -> Class {
        self.class
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn add_player(&mut self, player: &PlayerId) -> Result<(), LobbyError> {
        if self.contains(player) {
            return Ok(());
        }
        if self.is_full() {
            return Err(LobbyError::SlotFull(self.class));
        }
        self.players.push(player.clone());
        Ok(())
    }

    /// Returns whether the player was holding a slot.
    pub fn remove_player(&mut self, player: &PlayerId) -> bool {
        let before = self.players.len();
        self.players.retain(|p| p != player);
        self.players.len() != before
    }

    pub fn contains(&self, player: &PlayerId) -> bool {
        self.players.iter().any(|p| p == player)
    }

    pub fn size(&self) -> usize {
        self.players.len()
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= self.capacity
    }

    /// Occupants in the order they took their slot.
    pub fn players(&self) -> &[PlayerId] {
        &self.players
    }
}
