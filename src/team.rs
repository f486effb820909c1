use crate::class::{Class, ClassSlotGroup};
use crate::error::LobbyError;
use crate::lobby::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Class counts for sixes.
pub const SIXES_CLASS_COUNTS: &[(Class, usize)] = &[
    (Class::Medic, 1),
    (Class::Demoman, 1),
    (Class::Soldier, 2),
    (Class::Scout, 2),
];

/// Class counts for Highlander: one of everything.
pub const HIGHLANDER_CLASS_COUNTS: &[(Class, usize)] = &[
    (Class::Pyro, 1),
    (Class::Medic, 1),
    (Class::Engineer, 1),
    (Class::Spy, 1),
    (Class::Heavy, 1),
    (Class::Sniper, 1),
    (Class::Scout, 1),
    (Class::Soldier, 1),
    (Class::Demoman, 1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamSide {
    Red,
    Blu,
}

impl fmt::Display for TeamSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamSide::Red => f.write_str("red"),
            TeamSide::Blu => f.write_str("blu"),
        }
    }
}

impl FromStr for TeamSide {
    type Err = LobbyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" => Ok(TeamSide::Red),
            "blu" | "blue" => Ok(TeamSide::Blu),
            _ => Err(LobbyError::UnknownTeam(s.to_string())),
        }
    }
}

/// The players on one team, grouped by class.
///
/// The set of classes and their capacities is fixed when the team is built;
/// only occupancy changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    groups: BTreeMap<Class, ClassSlotGroup>,
    capacity: usize,
}

impl Team {
    pub fn new(class_counts: &[(Class, usize)]) -> Self {
        let groups: BTreeMap<Class, ClassSlotGroup> = class_counts
            .iter()
            .map(|&(class, count)| (class, ClassSlotGroup::new(class, count)))
            .collect();
        let capacity = groups.values().map(ClassSlotGroup::capacity).sum();
        Self { groups, capacity }
    }

    pub fn sixes() -> Self {
        Self::new(SIXES_CLASS_COUNTS)
    }

    pub fn highlander() -> Self {
        Self::new(HIGHLANDER_CLASS_COUNTS)
    }

    /// Seats `player` as `class`, dropping whatever class they held before.
    ///
    /// The old slot is released even when the new one is rejected, so on
    /// error the player holds no slot on this team.
    pub fn add_player(&mut self, player: &PlayerId, class: Class) -> Result<(), LobbyError> {
        self.remove_player(player);
        let group = self
            .groups
            .get_mut(&class)
            .ok_or_else(|| LobbyError::UnknownRole(class.to_string()))?;
        group.add_player(player)
    }

    pub fn remove_player(&mut self, player: &PlayerId) -> bool {
        self.groups
            .values_mut()
            .any(|group| group.remove_player(player))
    }

    pub fn class_of(&self, player: &PlayerId) -> Option<Class> {
        self.groups
            .values()
            .find(|group| group.contains(player))
            .map(ClassSlotGroup::class)
    }

    pub fn contains(&self, player: &PlayerId) -> bool {
        self.class_of(player).is_some()
    }

    pub fn players_in(&self, class: Class) -> &[PlayerId] {
        self.groups
            .get(&class)
            .map(ClassSlotGroup::players)
            .unwrap_or(&[])
    }

    pub fn classes(&self) -> impl Iterator<Item = Class> + '_ {
        self.groups.keys().copied()
    }

    pub fn groups(&self) -> impl Iterator<Item = &ClassSlotGroup> {
        self.groups.values()
    }

    pub fn num_players(&self) -> usize {
        self.groups.values().map(ClassSlotGroup::size).sum()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> PlayerId {
        name.to_string()
    }

    #[test]
    fn presets_have_expected_capacity() {
        assert_eq!(Team::sixes().capacity(), 6);
        assert_eq!(Team::highlander().capacity(), 9);
        assert_eq!(Team::highlander().classes().count(), 9);
    }

    #[test]
    fn switching_class_keeps_one_slot() {
        let mut team = Team::sixes();
        team.add_player(&id("a"), Class::Scout).unwrap();
        team.add_player(&id("a"), Class::Medic).unwrap();
        assert_eq!(team.class_of(&id("a")), Some(Class::Medic));
        assert!(team.players_in(Class::Scout).is_empty());
        assert_eq!(team.num_players(), 1);
    }

    #[test]
    fn rejected_switch_leaves_player_unseated() {
        let mut team = Team::sixes();
        team.add_player(&id("a"), Class::Medic).unwrap();
        team.add_player(&id("b"), Class::Scout).unwrap();

        assert_eq!(
            team.add_player(&id("b"), Class::Medic),
            Err(LobbyError::SlotFull(Class::Medic))
        );
        assert!(!team.contains(&id("b")));

        assert_eq!(
            team.add_player(&id("a"), Class::Pyro),
            Err(LobbyError::UnknownRole("pyro".to_string()))
        );
        assert!(!team.contains(&id("a")));
        assert_eq!(team.num_players(), 0);
    }

    #[test]
    fn remove_reports_whether_anything_changed() {
        let mut team = Team::highlander();
        assert!(!team.remove_player(&id("a")));
        team.add_player(&id("a"), Class::Spy).unwrap();
        assert!(team.remove_player(&id("a")));
        assert!(!team.contains(&id("a")));
    }

    #[test]
    fn parses_team_sides() {
        assert_eq!("red".parse::<TeamSide>(), Ok(TeamSide::Red));
        assert_eq!("BLU".parse::<TeamSide>(), Ok(TeamSide::Blu));
        assert_eq!("blue".parse::<TeamSide>(), Ok(TeamSide::Blu));
        assert_eq!(
            "green".parse::<TeamSide>(),
            Err(LobbyError::UnknownTeam("green".to_string()))
        );
    }
}
