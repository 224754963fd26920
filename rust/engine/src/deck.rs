use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};

/// The round's draw pile. Cards are drawn from the top (end of the vec);
/// rejected cards go back to the bottom so they cannot come straight back.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            rng,
        }
    }

    /// Rebuild the full 52-card deck and shuffle it for a new round.
    pub fn shuffle(&mut self) {
        self.cards = full_deck();
        self.cards.shuffle(&mut self.rng);
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Draw the next number card, scanning down from the top. The rest of
    /// the deck keeps its order; only the drawn card is removed.
    pub fn draw_number(&mut self) -> Option<Card> {
        let idx = self.cards.iter().rposition(|c| c.is_number())?;
        Some(self.cards.remove(idx))
    }

    /// Return a rejected card to the bottom of the pile.
    pub fn return_to_bottom(&mut self, card: Card) {
        self.cards.insert(0, card);
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}
