use serde::{Deserialize, Serialize};

use crate::cards::{Card, Op, Suit};

/// Default starting stack for every seat, in chips.
pub const STARTING_CHIPS: u32 = 500;
/// Forced ante and raise quantum.
pub const MIN_BET: u32 = 10;

/// A player's showdown choice of which target their equation is judged
/// against. SWING must win both sides to win anything.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Declaration {
    Low,
    High,
    Swing,
}

/// AI temperament knobs, both centered on the neutral 0.5 and sampled in
/// [0.4, 0.6]. `risk` shifts action thresholds, `carelessness` scales the
/// evaluation noise when AI mistakes are enabled.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Personality {
    pub risk: f64,
    pub carelessness: f64,
}

impl Personality {
    pub fn neutral() -> Self {
        Self {
            risk: 0.5,
            carelessness: 0.5,
        }
    }
}

/// One seat at the table. Chips, name, and elimination survive across
/// rounds; everything else is reset by [`Player::reset_for_round`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: usize,
    pub name: String,
    pub is_human: bool,
    pub chips: u32,
    pub hand: Vec<Card>,
    /// Operator rack, always exactly 3 entries, at most one `×`.
    pub ops: Vec<Op>,
    pub folded: bool,
    pub eliminated: bool,
    pub all_in: bool,
    /// Wagered in the current betting round.
    pub current_bet: u32,
    /// Wagered across the whole round (ante included); bounded by the cap.
    pub total_wagered: u32,
    pub has_raised_this_round: bool,
    pub declaration: Option<Declaration>,
    pub final_result: Option<f64>,
    pub low_result: Option<f64>,
    pub high_result: Option<f64>,
    pub equation: Option<String>,
    pub last_action: Option<String>,
    pub personality: Option<Personality>,
}

impl Player {
    pub fn new(id: usize, name: &str, is_human: bool) -> Self {
        Self {
            id,
            name: name.to_string(),
            is_human,
            chips: STARTING_CHIPS,
            hand: Vec::new(),
            ops: starting_ops(),
            folded: false,
            eliminated: false,
            all_in: false,
            current_bet: 0,
            total_wagered: 0,
            has_raised_this_round: false,
            declaration: None,
            final_result: None,
            low_result: None,
            high_result: None,
            equation: None,
            last_action: None,
            personality: None,
        }
    }

    /// Clear per-round state. Eliminated players start folded so the turn
    /// loop and showdown never consider them.
    pub fn reset_for_round(&mut self) {
        self.hand.clear();
        self.ops = starting_ops();
        self.folded = self.eliminated;
        self.all_in = false;
        self.current_bet = 0;
        self.total_wagered = 0;
        self.has_raised_this_round = false;
        self.declaration = None;
        self.final_result = None;
        self.low_result = None;
        self.high_result = None;
        self.equation = None;
        self.last_action = None;
    }

    /// Values of the number cards in hand, in draw order.
    pub fn number_values(&self) -> Vec<u8> {
        self.hand
            .iter()
            .filter_map(|c| c.number_value())
            .map(|(v, _)| v)
            .collect()
    }

    /// Number cards with suits, for showdown tiebreaks.
    pub fn number_cards(&self) -> Vec<(u8, Suit)> {
        self.hand.iter().filter_map(|c| c.number_value()).collect()
    }

    pub fn sqrt_count(&self) -> usize {
        self.hand
            .iter()
            .filter(|c| matches!(c.kind, crate::cards::CardKind::Sqrt))
            .count()
    }

    pub fn holds_multiply(&self) -> bool {
        self.ops.contains(&Op::Mul)
            || self
                .hand
                .iter()
                .any(|c| matches!(c.kind, crate::cards::CardKind::Multiply))
    }

    /// Swap one `+` or `-` for `×`. Returns false if the operator is not
    /// in the rack (or is not discardable).
    pub fn discard_for_multiply(&mut self, discard: Op) -> bool {
        if !matches!(discard, Op::Add | Op::Sub) {
            return false;
        }
        match self.ops.iter().position(|&o| o == discard) {
            Some(idx) => {
                self.ops[idx] = Op::Mul;
                true
            }
            None => false,
        }
    }
}

pub fn starting_ops() -> Vec<Op> {
    vec![Op::Add, Op::Sub, Op::Div]
}
