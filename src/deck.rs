use rand::seq::SliceRandom;
use rand_pcg::Pcg64;
use crate::{Character, CoupError, CHARACTER_VARIANTS};
use crate::action::COPIES_PER_CHARACTER;

/// The undealt pile. The last element is the top of the deck.
#[derive(Clone)]
pub struct Deck {
    cards: Vec<Character>,
    rng: Pcg64,
}

impl Deck {
    /// Builds the full pool minus the cards that are already in someone's hand, then shuffles.
    pub fn new(excluded: &[Character], rng: Pcg64) -> Result<Self, CoupError> {
        let mut cards = Vec::with_capacity(CHARACTER_VARIANTS.len() * COPIES_PER_CHARACTER);

        for &character in CHARACTER_VARIANTS.iter() {
            let taken = excluded.iter().filter(|&&c| c == character).count();
            if taken > COPIES_PER_CHARACTER {
                return Err(CoupError::InvalidSetup(format!(
                    "{taken} copies of {character} were dealt but only {COPIES_PER_CHARACTER} exist"
                )));
            }
            cards.extend(std::iter::repeat(character).take(COPIES_PER_CHARACTER - taken));
        }

        let mut deck = Self { cards, rng };
        deck.shuffle();
        Ok(deck)
    }

    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut self.rng);
        log::trace!("deck shuffled, {} cards", self.cards.len());
    }

    pub fn draw(&mut self) -> Result<Character, CoupError> {
        let card = self.cards.pop().ok_or(CoupError::DeckExhausted)?;
        log::trace!("drew {card}, {} cards left", self.cards.len());
        Ok(card)
    }

    pub fn return_to_deck(&mut self, card: Character) {
        self.cards.push(card);
        self.shuffle();
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn count(&self, character: Character) -> usize {
        self.cards.iter().filter(|&&c| c == character).count()
    }

    #[cfg(test)]
    pub(crate) fn cards(&self) -> &[Character] {
        &self.cards
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64;
    use crate::deck::Deck;
    use crate::{CoupError, CHARACTER_VARIANTS};
    use crate::Character::{Contessa, Duke};

    fn rng() -> Pcg64 {
        Pcg64::seed_from_u64(7)
    }

    #[test]
    fn full_deck() {
        let deck = Deck::new(&[], rng()).unwrap();
        assert_eq!(deck.len(), 15);
        for character in CHARACTER_VARIANTS {
            assert_eq!(deck.count(character), 3);
        }
    }

    #[test]
    fn pre_dealt_cards_are_excluded() {
        let deck = Deck::new(&[Duke], rng()).unwrap();
        assert_eq!(deck.len(), 14);
        assert_eq!(deck.count(Duke), 2);

        let deck = Deck::new(&[Duke, Duke, Duke], rng()).unwrap();
        assert_eq!(deck.count(Duke), 0);
    }

    #[test]
    fn too_many_copies() {
        let result = Deck::new(&[Contessa; 4], rng());
        assert!(matches!(result, Err(CoupError::InvalidSetup(_))));
    }

    #[test]
    fn draw_until_exhausted() {
        let mut deck = Deck::new(&[], rng()).unwrap();
        for _ in 0..15 {
            deck.draw().unwrap();
        }
        assert!(deck.is_empty());
        assert_eq!(deck.draw(), Err(CoupError::DeckExhausted));
    }

    #[test]
    fn return_puts_card_back() {
        let mut deck = Deck::new(&[], rng()).unwrap();
        let card = deck.draw().unwrap();
        assert_eq!(deck.count(card), 2);
        deck.return_to_deck(card);
        assert_eq!(deck.len(), 15);
        assert_eq!(deck.count(card), 3);
    }

    #[test]
    fn same_seed_same_order() {
        let mut a = Deck::new(&[], rng()).unwrap();
        let mut b = Deck::new(&[], rng()).unwrap();
        for _ in 0..15 {
            assert_eq!(a.draw(), b.draw());
        }
    }
}
