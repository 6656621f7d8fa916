use std::fmt::{Display, Formatter};
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::Character::{Ambassador, Assassin, Captain, Contessa, Duke};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Character {
    Duke,
    Assassin,
    Captain,
    Ambassador,
    Contessa,
}

pub static CHARACTER_VARIANTS: [Character; 5] = [
    Duke,
    Assassin,
    Captain,
    Ambassador,
    Contessa,
];

impl Character {
    pub fn name(&self) -> &'static str {
        match self {
            Duke => "duke",
            Assassin => "assassin",
            Captain => "captain",
            Ambassador => "ambassador",
            Contessa => "contessa",
        }
    }
}

impl Display for Character {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Character {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CHARACTER_VARIANTS
            .iter()
            .find(|character| character.name().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("unknown character {s:?}"))
    }
}

/// A role card held in a hand. Two cards of the same character are interchangeable,
/// so equality ignores whether the card has been turned face-up.
#[derive(Copy, Clone, Debug, Eq, Serialize, Deserialize)]
pub struct Card {
    pub character: Character,
    pub revealed: bool,
}

impl Card {
    pub fn new(character: Character) -> Self {
        Self { character, revealed: false }
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.character == other.character
    }
}

impl From<Character> for Card {
    fn from(character: Character) -> Self {
        Card::new(character)
    }
}

#[cfg(test)]
mod tests {
    use crate::card::Card;
    use crate::Character;
    use crate::Character::{Ambassador, Duke};

    #[test]
    fn parse_names() {
        assert_eq!("duke".parse::<Character>(), Ok(Duke));
        assert_eq!(" Ambassador ".parse::<Character>(), Ok(Ambassador));
        assert!("jester".parse::<Character>().is_err());
    }

    #[test]
    fn equality_is_by_character() {
        let mut revealed = Card::new(Duke);
        revealed.revealed = true;
        assert_eq!(revealed, Card::new(Duke));
        assert_ne!(Card::new(Duke), Card::new(Ambassador));
    }
}
