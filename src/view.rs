use serde::{Deserialize, Serialize};
use crate::player::Player;
use crate::state::StateName;
use crate::Character;

/// What everyone at the table can see about one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub name: String,
    pub coins: u32,
    pub influence: usize,
    pub revealed: Vec<Character>,
}

impl From<&Player> for PlayerView {
    fn from(player: &Player) -> Self {
        Self {
            name: player.name.clone(),
            coins: player.coins,
            influence: player.influence(),
            revealed: player.revealed(),
        }
    }
}

/// Public snapshot of a session. Face-down cards never appear here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: StateName,
    pub turn: usize,
    pub current_player: String,
    pub winner: Option<String>,
    pub players: Vec<PlayerView>,
}

/// Result of a successful move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub state: StateName,
    pub players: Vec<PlayerView>,
}
