use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use crate::Character;

/// Where the turn is. The pending contest lives in the payload so a new contest can
/// never pick up a stale target or blocker from an earlier one.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum State {
    AwaitingPrimaryAction,

    AwaitingForeignAidBlock,
    AwaitingForeignAidBlockChallenge { blocker: usize },

    // the action claim can be challenged here too
    AwaitingAssassinateBlock { target: usize },
    AwaitingAssassinateBlockChallenge { target: usize },

    AwaitingStealBlock { target: usize },
    AwaitingStealBlockChallenge { target: usize, claim: Character },

    AwaitingTaxChallenge,
    AwaitingExchangeChallenge,
    AwaitingExchangeReturn,

    GameOver { winner: usize },
}

impl State {
    pub fn name(&self) -> StateName {
        match self {
            State::AwaitingPrimaryAction => StateName::AwaitingPrimaryAction,
            State::AwaitingForeignAidBlock => StateName::AwaitingForeignAidBlock,
            State::AwaitingForeignAidBlockChallenge { .. } => StateName::AwaitingForeignAidBlockChallenge,
            State::AwaitingAssassinateBlock { .. } => StateName::AwaitingAssassinateBlock,
            State::AwaitingAssassinateBlockChallenge { .. } => StateName::AwaitingAssassinateBlockChallenge,
            State::AwaitingStealBlock { .. } => StateName::AwaitingStealBlock,
            State::AwaitingStealBlockChallenge { .. } => StateName::AwaitingStealBlockChallenge,
            State::AwaitingTaxChallenge => StateName::AwaitingTaxChallenge,
            State::AwaitingExchangeChallenge => StateName::AwaitingExchangeChallenge,
            State::AwaitingExchangeReturn => StateName::AwaitingExchangeReturn,
            State::GameOver { .. } => StateName::GameOver,
        }
    }
}

/// Payload-free state identity, the part of the state that is safe to show anyone.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateName {
    AwaitingPrimaryAction,
    AwaitingForeignAidBlock,
    AwaitingForeignAidBlockChallenge,
    AwaitingAssassinateBlock,
    AwaitingAssassinateBlockChallenge,
    AwaitingStealBlock,
    AwaitingStealBlockChallenge,
    AwaitingTaxChallenge,
    AwaitingExchangeChallenge,
    AwaitingExchangeReturn,
    GameOver,
}

pub static STATE_VARIANTS: [StateName; 11] = [
    StateName::AwaitingPrimaryAction,
    StateName::AwaitingForeignAidBlock,
    StateName::AwaitingForeignAidBlockChallenge,
    StateName::AwaitingAssassinateBlock,
    StateName::AwaitingAssassinateBlockChallenge,
    StateName::AwaitingStealBlock,
    StateName::AwaitingStealBlockChallenge,
    StateName::AwaitingTaxChallenge,
    StateName::AwaitingExchangeChallenge,
    StateName::AwaitingExchangeReturn,
    StateName::GameOver,
];

impl StateName {
    pub fn name(&self) -> &'static str {
        match self {
            StateName::AwaitingPrimaryAction => "awaiting_primary_action",
            StateName::AwaitingForeignAidBlock => "awaiting_foreign_aid_block",
            StateName::AwaitingForeignAidBlockChallenge => "awaiting_foreign_aid_block_challenge",
            StateName::AwaitingAssassinateBlock => "awaiting_assassinate_block",
            StateName::AwaitingAssassinateBlockChallenge => "awaiting_assassinate_block_challenge",
            StateName::AwaitingStealBlock => "awaiting_steal_block",
            StateName::AwaitingStealBlockChallenge => "awaiting_steal_block_challenge",
            StateName::AwaitingTaxChallenge => "awaiting_tax_challenge",
            StateName::AwaitingExchangeChallenge => "awaiting_exchange_challenge",
            StateName::AwaitingExchangeReturn => "awaiting_exchange_return",
            StateName::GameOver => "game_over",
        }
    }
}

impl Display for StateName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What happens once a contest settles in the actor's favour. Carried as a value into
/// challenge resolution instead of a callback.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    ForeignAid,
    Tax,
    Assassinate { target: usize },
    Steal { target: usize },
    Exchange,
    // a block held, the action is cancelled
    Cancel,
}
