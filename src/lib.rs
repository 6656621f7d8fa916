//! Rules engine for Coup: validates moves against the turn state machine and resolves
//! actions, blocks and challenges against a seeded deck.

pub mod action;
pub mod card;
pub mod coup;
pub mod deck;
pub mod error;
pub mod graph;
pub mod player;
pub mod rotation;
pub mod script;
pub mod state;
pub mod view;

pub use action::{MoveArgs, Trigger};
pub use card::{Card, Character, CHARACTER_VARIANTS};
pub use coup::{Coup, PlayerSetup, Setup};
pub use error::CoupError;
pub use graph::transitions;
pub use script::{read_script, ScriptError};
pub use state::StateName;
pub use view::{MoveOutcome, PlayerView, Snapshot};
