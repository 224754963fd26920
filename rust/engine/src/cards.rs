use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents one of the four suits in the Equation Hi-Lo deck.
/// Suit order matters only for tiebreaks at showdown; see [`crate::showdown`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    /// Gold suit (highest priority on the HIGH side)
    Gold,
    /// Silver suit
    Silver,
    /// Bronze suit
    Bronze,
    /// Black suit (highest priority on the LOW side)
    Black,
}

/// An arithmetic operator slot. Every player starts a round with
/// `[+, -, ÷]`; drawing a multiply card swaps a `+` or `-` for `×`
/// (at most once per round).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    pub fn symbol(self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
            Op::Mul => '×',
            Op::Div => '÷',
        }
    }

    pub fn from_symbol(c: char) -> Option<Op> {
        match c {
            '+' => Some(Op::Add),
            '-' => Some(Op::Sub),
            '×' | '*' | 'x' => Some(Op::Mul),
            '÷' | '/' => Some(Op::Div),
            _ => None,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// What a card is: a valued number card, or one of the two specials.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CardKind {
    /// Number card, value 0..=10 with a suit.
    Number { value: u8, suit: Suit },
    /// Multiply card: consumed into the operator rack as `×`.
    Multiply,
    /// Square-root card: grants one `√` modifier for the equation.
    Sqrt,
}

/// A single card. Immutable once drawn except for `face_down`, which the
/// dealer sets on the first card of each hand.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub kind: CardKind,
    pub face_down: bool,
}

impl Card {
    pub fn number(value: u8, suit: Suit) -> Card {
        Card {
            kind: CardKind::Number { value, suit },
            face_down: false,
        }
    }

    pub fn multiply() -> Card {
        Card {
            kind: CardKind::Multiply,
            face_down: false,
        }
    }

    pub fn sqrt() -> Card {
        Card {
            kind: CardKind::Sqrt,
            face_down: false,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self.kind, CardKind::Number { .. })
    }

    /// Value and suit for number cards, `None` for specials.
    pub fn number_value(&self) -> Option<(u8, Suit)> {
        match self.kind {
            CardKind::Number { value, suit } => Some((value, suit)),
            _ => None,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            CardKind::Number { value, suit } => write!(f, "{}{:?}", value, suit),
            CardKind::Multiply => write!(f, "×"),
            CardKind::Sqrt => write!(f, "√"),
        }
    }
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Gold, Suit::Silver, Suit::Bronze, Suit::Black]
}

/// Build the full 52-card deck: values 0..=10 in each of the four suits
/// (44 number cards), plus 4 multiply and 4 sqrt cards.
pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(52);
    for value in 0..=10u8 {
        for &suit in &all_suits() {
            v.push(Card::number(value, suit));
        }
    }
    for _ in 0..4 {
        v.push(Card::multiply());
    }
    for _ in 0..4 {
        v.push(Card::sqrt());
    }
    v
}
