//! Showdown resolver: computes LOW/HIGH winners with card tiebreaks,
//! applies the all-or-nothing SWING rule, and splits the pot.
//!
//! Pure with respect to game state: takes the players and the pot, returns
//! a [`Settlement`] the state machine applies.

use crate::cards::Suit;
use crate::player::{Declaration, Player};

/// Results on either side closer than this are treated as tied and sent
/// to the card tiebreak.
const TIE_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Low,
    High,
}

impl Side {
    fn target(self) -> f64 {
        match self {
            Side::Low => crate::solver::LOW_TARGET,
            Side::High => crate::solver::HIGH_TARGET,
        }
    }
}

/// Outcome of a showdown. Payouts are `(player_id, amount)`; `burned` is
/// the odd chip dropped on a split (or the whole pot when no declaration
/// survives).
#[derive(Debug, Clone, Default)]
pub struct Settlement {
    pub low_winner: Option<usize>,
    pub high_winner: Option<usize>,
    /// Set when a SWING declarer won both sides and takes everything.
    pub swing_winner: Option<usize>,
    pub payouts: Vec<(usize, u32)>,
    pub burned: u32,
    pub low_tiebreak: String,
    pub high_tiebreak: String,
}

fn high_suit_priority(suit: Suit) -> u8 {
    match suit {
        Suit::Gold => 4,
        Suit::Silver => 3,
        Suit::Bronze => 2,
        Suit::Black => 1,
    }
}

fn low_suit_priority(suit: Suit) -> u8 {
    match suit {
        Suit::Black => 4,
        Suit::Bronze => 3,
        Suit::Silver => 2,
        Suit::Gold => 1,
    }
}

/// The card a player brings to the tiebreak: highest-value number card for
/// HIGH, lowest for LOW, suit priority breaking value ties.
fn tiebreak_card(player: &Player, side: Side) -> Option<(u8, Suit)> {
    let cards = player.number_cards();
    match side {
        Side::High => cards
            .into_iter()
            .max_by_key(|&(v, s)| (v, high_suit_priority(s))),
        Side::Low => cards
            .into_iter()
            .min_by_key(|&(v, s)| (v, std::cmp::Reverse(low_suit_priority(s)))),
    }
}

/// Decide a tie between two players. Returns the winner's id and an
/// explanation string for the results surface.
fn tiebreak(a: &Player, b: &Player, side: Side) -> (usize, String) {
    let ca = tiebreak_card(a, side);
    let cb = tiebreak_card(b, side);
    let (ca, cb) = match (ca, cb) {
        (Some(ca), Some(cb)) => (ca, cb),
        // A hand with no number cards cannot occur in play; fall back to
        // seat order rather than guess.
        (Some(_), None) => return (a.id, String::new()),
        _ => return (b.id, String::new()),
    };

    if ca.0 != cb.0 {
        let a_wins = match side {
            Side::High => ca.0 > cb.0,
            Side::Low => ca.0 < cb.0,
        };
        let (winner, card) = if a_wins { (a, ca) } else { (b, cb) };
        let label = match side {
            Side::High => "highest",
            Side::Low => "lowest",
        };
        return (
            winner.id,
            format!("Tiebreaker: {} card {} ({:?})", label, card.0, card.1),
        );
    }

    let priority = match side {
        Side::High => high_suit_priority,
        Side::Low => low_suit_priority,
    };
    let a_wins = priority(ca.1) > priority(cb.1);
    let (winner, card) = if a_wins { (a, ca) } else { (b, cb) };
    (
        winner.id,
        format!("Tiebreaker: same value {}, suit {:?} wins", card.0, card.1),
    )
}

/// A player's result judged on `side`, if they declared that side (SWING
/// declarers contest both sides with their per-side results).
fn side_result(player: &Player, side: Side) -> Option<f64> {
    match (player.declaration?, side) {
        (Declaration::Swing, Side::Low) => player.low_result,
        (Declaration::Swing, Side::High) => player.high_result,
        (Declaration::Low, Side::Low) | (Declaration::High, Side::High) => player.final_result,
        _ => None,
    }
}

/// Winner of one side among non-folded players, excluding `exclude`
/// (a failed SWING declarer being recomputed around).
fn side_winner(
    players: &[Player],
    side: Side,
    exclude: Option<usize>,
) -> (Option<usize>, String) {
    let mut best: Option<(usize, f64)> = None;
    let mut explanation = String::new();

    for p in players.iter().filter(|p| !p.folded) {
        if exclude == Some(p.id) {
            continue;
        }
        let result = match side_result(p, side) {
            Some(r) => r,
            None => continue,
        };
        let diff = (result - side.target()).abs();
        match best {
            None => best = Some((p.id, diff)),
            Some((best_id, best_diff)) => {
                if diff < best_diff - TIE_EPSILON {
                    best = Some((p.id, diff));
                    explanation.clear();
                } else if (diff - best_diff).abs() < TIE_EPSILON {
                    let holder = players.iter().find(|q| q.id == best_id);
                    if let Some(holder) = holder {
                        let (winner, text) = tiebreak(holder, p, side);
                        best = Some((winner, best_diff.min(diff)));
                        explanation = text;
                    }
                }
            }
        }
    }

    (best.map(|(id, _)| id), explanation)
}

/// Resolve the showdown among non-folded players and split `pot`.
pub fn resolve(players: &[Player], pot: u32) -> Settlement {
    let (mut low_winner, low_tiebreak) = side_winner(players, Side::Low, None);
    let (mut high_winner, high_tiebreak) = side_winner(players, Side::High, None);
    let mut settlement = Settlement {
        low_tiebreak,
        high_tiebreak,
        ..Settlement::default()
    };

    // SWING is all-or-nothing: win both sides and take everything, or be
    // removed from whichever side was won and recompute its winner.
    let swing_ids: Vec<usize> = players
        .iter()
        .filter(|p| !p.folded && p.declaration == Some(Declaration::Swing))
        .map(|p| p.id)
        .collect();

    for sp in swing_ids {
        let won_low = low_winner == Some(sp);
        let won_high = high_winner == Some(sp);

        if won_low && won_high {
            settlement.swing_winner = Some(sp);
            settlement.low_winner = Some(sp);
            settlement.high_winner = Some(sp);
            settlement.payouts = vec![(sp, pot)];
            return settlement;
        }
        if won_low {
            let (recomputed, explanation) = side_winner(players, Side::Low, Some(sp));
            low_winner = recomputed;
            settlement.low_tiebreak = explanation;
        }
        if won_high {
            let (recomputed, explanation) = side_winner(players, Side::High, Some(sp));
            high_winner = recomputed;
            settlement.high_tiebreak = explanation;
        }
    }

    settlement.low_winner = low_winner;
    settlement.high_winner = high_winner;

    match (low_winner, high_winner) {
        (Some(low), Some(high)) => {
            let half = pot / 2;
            settlement.payouts = vec![(low, half), (high, half)];
            settlement.burned = pot - half * 2;
        }
        (Some(low), None) => settlement.payouts = vec![(low, pot)],
        (None, Some(high)) => settlement.payouts = vec![(high, pot)],
        (None, None) => settlement.burned = pot,
    }

    settlement
}
