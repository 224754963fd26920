//! Card, hand, and action formatters for terminal display.
//!
//! Pure functions for rendering game elements as text. Operator and
//! sqrt symbols use Unicode with an ASCII fallback for terminals that
//! cannot render them.
//!
//! ## Example
//!
//! ```rust
//! use hilo_engine::cards::{Card, Suit};
//! use hilo_cli::formatters::format_card;
//!
//! let nine = Card::number(9, Suit::Gold);
//! assert_eq!(format_card(&nine), "9G");
//! ```

use hilo_engine::cards::{Card, CardKind, Op, Suit};
use hilo_engine::game::CardView;
use hilo_engine::policy::BetAction;

/// Check whether the terminal can render Unicode operator symbols.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern
/// terminals (TERM_PROGRAM), or VS Code (VSCODE_INJECTION). On
/// Unix-like systems, assumes Unicode support.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

/// Format a suit as its single-letter tag (G, S, B, K).
pub fn format_suit(suit: &Suit) -> String {
    match suit {
        Suit::Gold => "G",
        Suit::Silver => "S",
        Suit::Bronze => "B",
        Suit::Black => "K",
    }
    .to_string()
}

/// Format an operator using Unicode symbols with ASCII fallback.
pub fn format_op(op: &Op) -> String {
    if supports_unicode() {
        op.symbol().to_string()
    } else {
        match op {
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "*",
            Op::Div => "/",
        }
        .to_string()
    }
}

/// Format a card as value plus suit tag, or a special marker.
///
/// Number cards render as e.g. "9G"; specials render as "[x]" and
/// "[sqrt]" (or their Unicode forms).
pub fn format_card(card: &Card) -> String {
    format_kind(&card.kind)
}

fn format_kind(kind: &CardKind) -> String {
    match kind {
        CardKind::Number { value, suit } => format!("{}{}", value, format_suit(suit)),
        CardKind::Multiply => {
            if supports_unicode() {
                "[×]".to_string()
            } else {
                "[x]".to_string()
            }
        }
        CardKind::Sqrt => {
            if supports_unicode() {
                "[√]".to_string()
            } else {
                "[sqrt]".to_string()
            }
        }
    }
}

/// Format a hand view in bracket notation, masking face-down cards.
///
/// Hidden cards render as "??".
pub fn format_hand(cards: &[CardView]) -> String {
    if cards.is_empty() {
        "[]".to_string()
    } else {
        let formatted: Vec<String> = cards
            .iter()
            .map(|view| match &view.kind {
                Some(kind) => format_kind(kind),
                None => "??".to_string(),
            })
            .collect();
        format!("[{}]", formatted.join(" "))
    }
}

/// Format an operator rack like "+ - ÷".
pub fn format_ops(ops: &[Op]) -> String {
    let formatted: Vec<String> = ops.iter().map(format_op).collect();
    formatted.join(" ")
}

/// Format a betting action as a human-readable string.
pub fn format_action(action: &BetAction) -> String {
    match action {
        BetAction::Fold => "fold".to_string(),
        BetAction::Check => "check".to_string(),
        BetAction::Call => "call".to_string(),
        BetAction::Raise(amount) => format!("raise {}", amount),
    }
}
