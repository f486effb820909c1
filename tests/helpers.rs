#![allow(dead_code)]

use pug_lobby::{Class, Lobby, PlayerId, TeamSide};

pub fn player(name: &str) -> PlayerId {
    name.to_string()
}

/// Counts how many places `player` occupies: the idle pool plus every class
/// slot on both teams.
pub fn locations(lobby: &Lobby, player: &PlayerId) -> usize {
    let idle = usize::from(lobby.idle_players().contains(player));
    let seated: usize = [TeamSide::Red, TeamSide::Blu]
        .into_iter()
        .flat_map(|side| lobby.team(side).groups())
        .filter(|group| group.contains(player))
        .count();
    idle + seated
}

pub fn assert_single_location(lobby: &Lobby, players: &[PlayerId]) {
    for p in players {
        assert_eq!(locations(lobby, p), 1, "{p} should be in exactly one place");
    }
}

pub fn assert_within_capacity(lobby: &Lobby) {
    for side in [TeamSide::Red, TeamSide::Blu] {
        for group in lobby.team(side).groups() {
            assert!(
                group.size() <= group.capacity(),
                "{side} {} over capacity",
                group.class()
            );
        }
    }
}

pub fn seated(lobby: &Lobby, side: TeamSide, class: Class) -> Vec<PlayerId> {
    lobby.team(side).players_in(class).to_vec()
}
