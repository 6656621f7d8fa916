use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::Character;
use crate::Character::{Ambassador, Assassin, Captain, Contessa, Duke};

pub const STARTING_COINS: u32 = 2;
pub const HAND_SIZE: usize = 2;
pub const COPIES_PER_CHARACTER: usize = 3;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 6;
pub const COUP_COST: u32 = 7;
pub const ASSASSINATE_COST: u32 = 3;
pub const FORCED_COUP_COINS: u32 = 10;
pub const STEAL_AMOUNT: u32 = 2;
pub const EXCHANGE_DRAW: usize = 2;

/// Every move a driver can ask the engine to make.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    Income,
    ForeignAid,
    Coup,
    Tax,
    Assassinate,
    Steal,
    Exchange,

    BlockForeignAid,
    DeclineBlockForeignAid,
    ChallengeBlockForeignAid,
    DeclineChallengeBlockForeignAid,

    ChallengeDuke,
    DeclineChallengeDuke,

    ChallengeAssassin,
    BlockAssassinate,
    DeclineBlockAssassinate,
    ChallengeBlockAssassinate,
    DeclineChallengeBlockAssassinate,

    ChallengeCaptain,
    BlockSteal,
    DeclineBlockSteal,
    ChallengeBlockSteal,
    DeclineChallengeBlockSteal,

    ChallengeAmbassador,
    DeclineChallengeAmbassador,
    ReturnCards,
}

pub static TRIGGER_VARIANTS: [Trigger; 26] = [
    Trigger::Income,
    Trigger::ForeignAid,
    Trigger::Coup,
    Trigger::Tax,
    Trigger::Assassinate,
    Trigger::Steal,
    Trigger::Exchange,
    Trigger::BlockForeignAid,
    Trigger::DeclineBlockForeignAid,
    Trigger::ChallengeBlockForeignAid,
    Trigger::DeclineChallengeBlockForeignAid,
    Trigger::ChallengeDuke,
    Trigger::DeclineChallengeDuke,
    Trigger::ChallengeAssassin,
    Trigger::BlockAssassinate,
    Trigger::DeclineBlockAssassinate,
    Trigger::ChallengeBlockAssassinate,
    Trigger::DeclineChallengeBlockAssassinate,
    Trigger::ChallengeCaptain,
    Trigger::BlockSteal,
    Trigger::DeclineBlockSteal,
    Trigger::ChallengeBlockSteal,
    Trigger::DeclineChallengeBlockSteal,
    Trigger::ChallengeAmbassador,
    Trigger::DeclineChallengeAmbassador,
    Trigger::ReturnCards,
];

impl Trigger {
    pub fn name(&self) -> &'static str {
        match self {
            Trigger::Income => "income",
            Trigger::ForeignAid => "foreign_aid",
            Trigger::Coup => "coup",
            Trigger::Tax => "tax",
            Trigger::Assassinate => "assassinate",
            Trigger::Steal => "steal",
            Trigger::Exchange => "exchange",
            Trigger::BlockForeignAid => "block_foreign_aid",
            Trigger::DeclineBlockForeignAid => "decline_block_foreign_aid",
            Trigger::ChallengeBlockForeignAid => "challenge_block_foreign_aid",
            Trigger::DeclineChallengeBlockForeignAid => "decline_challenge_block_foreign_aid",
            Trigger::ChallengeDuke => "challenge_duke",
            Trigger::DeclineChallengeDuke => "decline_challenge_duke",
            Trigger::ChallengeAssassin => "challenge_assassin",
            Trigger::BlockAssassinate => "block_assassinate",
            Trigger::DeclineBlockAssassinate => "decline_block_assassinate",
            Trigger::ChallengeBlockAssassinate => "challenge_block_assassinate",
            Trigger::DeclineChallengeBlockAssassinate => "decline_challenge_block_assassinate",
            Trigger::ChallengeCaptain => "challenge_captain",
            Trigger::BlockSteal => "block_steal",
            Trigger::DeclineBlockSteal => "decline_block_steal",
            Trigger::ChallengeBlockSteal => "challenge_block_steal",
            Trigger::DeclineChallengeBlockSteal => "decline_challenge_block_steal",
            Trigger::ChallengeAmbassador => "challenge_ambassador",
            Trigger::DeclineChallengeAmbassador => "decline_challenge_ambassador",
            Trigger::ReturnCards => "return_cards",
        }
    }

    /// The catalog entry for primary actions, `None` for responses.
    pub fn primary(&self) -> Option<&'static PrimaryAction> {
        ACTION_CATALOG.iter().find(|action| action.trigger == *self)
    }
}

impl Display for Trigger {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Debug for Trigger {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("Trigger({})", self.name()))
    }
}

impl FromStr for Trigger {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TRIGGER_VARIANTS
            .iter()
            .find(|trigger| trigger.name() == s.trim())
            .copied()
            .ok_or_else(|| format!("unknown trigger {s:?}"))
    }
}

/// One row of the action table.
#[derive(Debug, PartialEq, Eq)]
pub struct PrimaryAction {
    pub trigger: Trigger,
    pub cost: u32,
    pub claim: Option<Character>,
    pub blockable_by: &'static [Character],
    pub challengeable: bool,
    pub targeted: bool,
}

pub static ACTION_CATALOG: [PrimaryAction; 7] = [
    PrimaryAction { trigger: Trigger::Income, cost: 0, claim: None, blockable_by: &[], challengeable: false, targeted: false },
    PrimaryAction { trigger: Trigger::ForeignAid, cost: 0, claim: None, blockable_by: &[Duke], challengeable: false, targeted: false },
    PrimaryAction { trigger: Trigger::Coup, cost: COUP_COST, claim: None, blockable_by: &[], challengeable: false, targeted: true },
    PrimaryAction { trigger: Trigger::Tax, cost: 0, claim: Some(Duke), blockable_by: &[], challengeable: true, targeted: false },
    PrimaryAction { trigger: Trigger::Assassinate, cost: ASSASSINATE_COST, claim: Some(Assassin), blockable_by: &[Contessa], challengeable: true, targeted: true },
    PrimaryAction { trigger: Trigger::Steal, cost: 0, claim: Some(Captain), blockable_by: &[Captain, Ambassador], challengeable: true, targeted: true },
    PrimaryAction { trigger: Trigger::Exchange, cost: 0, claim: Some(Ambassador), blockable_by: &[], challengeable: true, targeted: false },
];

/// Arguments that ride along with a trigger. Players are named, not indexed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveArgs {
    pub target: Option<String>,
    pub blocker: Option<String>,
    pub challenger: Option<String>,
    // character claimed by a steal block
    pub claim: Option<Character>,
    // which card the challenger gives up if they lose
    pub reveal: Option<Character>,
    // cards put back at the end of an exchange
    #[serde(default)]
    pub cards: Vec<Character>,
}

impl MoveArgs {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn target(name: impl Into<String>) -> Self {
        Self { target: Some(name.into()), ..Self::default() }
    }

    pub fn blocker(name: impl Into<String>) -> Self {
        Self { blocker: Some(name.into()), ..Self::default() }
    }

    pub fn challenger(name: impl Into<String>) -> Self {
        Self { challenger: Some(name.into()), ..Self::default() }
    }

    pub fn cards(cards: impl IntoIterator<Item = Character>) -> Self {
        Self { cards: cards.into_iter().collect(), ..Self::default() }
    }

    pub fn with_claim(mut self, claim: Character) -> Self {
        self.claim = Some(claim);
        self
    }

    pub fn with_reveal(mut self, reveal: Character) -> Self {
        self.reveal = Some(reveal);
        self
    }
}
