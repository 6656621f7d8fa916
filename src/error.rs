use thiserror::Error;
use crate::action::Trigger;
use crate::state::StateName;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoupError {
    #[error("invalid setup: {0}")]
    InvalidSetup(String),

    #[error("{trigger} is not a legal move from {state}")]
    IllegalMove { trigger: Trigger, state: StateName },

    #[error("precondition failed: {0}")]
    PreconditionFailed(String),

    #[error("unknown player {0:?}")]
    UnknownPlayer(String),

    // consistency faults, these mean the engine itself is broken
    #[error("{0} has no influence remaining")]
    NoInfluenceRemaining(String),

    #[error("the deck is exhausted")]
    DeckExhausted,

    #[error("the turn rotation is empty")]
    RotationEmpty,

    #[error("session was faulted by an earlier consistency error")]
    Faulted,
}

impl CoupError {
    pub(crate) fn precondition(reason: impl Into<String>) -> Self {
        CoupError::PreconditionFailed(reason.into())
    }

    /// Faults that leave the session unusable rather than rejecting a single move.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CoupError::NoInfluenceRemaining(_)
                | CoupError::DeckExhausted
                | CoupError::RotationEmpty
                | CoupError::Faulted
        )
    }
}
