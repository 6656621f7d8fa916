use crate::card::Card;
use crate::{Character, CoupError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub(crate) name: String,
    pub(crate) coins: u32,
    pub(crate) cards: Vec<Card>, // hand order is insertion order
}

impl Player {
    pub fn new(name: impl Into<String>, coins: u32) -> Self {
        Self {
            name: name.into(),
            coins,
            cards: Vec::with_capacity(4),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    pub fn draw_card(&mut self, character: Character) {
        self.cards.push(Card::new(character));
    }

    /// Turns one face-down card face-up. The preferred character is used when the player
    /// holds it face-down, otherwise the first face-down card in hand order is revealed.
    pub fn reveal_card(&mut self, preferred: Option<Character>) -> Result<Character, CoupError> {
        let idx = preferred
            .and_then(|character| self.hidden_position(character))
            .or_else(|| self.cards.iter().position(|card| !card.revealed))
            .ok_or_else(|| CoupError::NoInfluenceRemaining(self.name.clone()))?;

        self.cards[idx].revealed = true;
        Ok(self.cards[idx].character)
    }

    /// Proves a claim: removes the first face-down card of the character from the hand.
    /// `None` means the claim was a bluff.
    pub fn show(&mut self, character: Character) -> Option<Card> {
        self.hidden_position(character).map(|idx| self.cards.remove(idx))
    }

    pub fn influence(&self) -> usize {
        self.cards.iter().filter(|card| !card.revealed).count()
    }

    pub fn is_eliminated(&self) -> bool {
        self.influence() == 0
    }

    pub fn revealed(&self) -> Vec<Character> {
        self.cards
            .iter()
            .filter(|card| card.revealed)
            .map(|card| card.character)
            .collect()
    }

    pub(crate) fn hidden(&self) -> impl Iterator<Item = Character> + '_ {
        self.cards.iter().filter(|card| !card.revealed).map(|card| card.character)
    }

    pub(crate) fn count(&self, character: Character) -> usize {
        self.cards.iter().filter(|card| card.character == character).count()
    }

    fn hidden_position(&self, character: Character) -> Option<usize> {
        // not revealed and is the claimed character
        self.cards
            .iter()
            .position(|card| !card.revealed && card.character == character)
    }
}
