//! Exhaustive hand solver: finds the equations closest to the LOW target
//! (1) and the HIGH target (20) buildable from a hand.
//!
//! The search space is tiny by construction (at most 4 number cards and 3
//! operators), so brute force over every card ordering, operator
//! selection, and √ placement is the intended design; no pruning.

use crate::cards::Op;
use crate::eval::{evaluate, Token};

pub const LOW_TARGET: f64 = 1.0;
pub const HIGH_TARGET: f64 = 20.0;

/// Best equation found for one side.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub result: f64,
    /// Absolute distance from the side's target.
    pub diff: f64,
    /// Display string, e.g. `√9 + 3 × 2`. Round-trips through
    /// [`crate::eval::parse_equation`].
    pub equation: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HandSolution {
    pub low: Solution,
    pub high: Solution,
}

fn permutations(values: &[u8]) -> Vec<Vec<u8>> {
    if values.len() <= 1 {
        return vec![values.to_vec()];
    }
    let mut out = Vec::new();
    for i in 0..values.len() {
        let mut rest = values.to_vec();
        let current = rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, current);
            out.push(tail);
        }
    }
    out
}

/// Ordered selections of exactly `k` operators from the rack. A 3-card
/// hand uses only 2 of the player's 3 operators, so this is a
/// k-permutation, not a full permutation.
fn k_permutations(ops: &[Op], k: usize) -> Vec<Vec<Op>> {
    if k == 0 {
        return vec![Vec::new()];
    }
    if k > ops.len() {
        return Vec::new();
    }
    let mut out = Vec::new();
    for i in 0..ops.len() {
        let mut rest = ops.to_vec();
        let current = rest.remove(i);
        for mut tail in k_permutations(&rest, k - 1) {
            tail.insert(0, current);
            out.push(tail);
        }
    }
    out
}

/// All ways to place exactly `count` √ modifiers on `n` distinct
/// positions. Every drawn √ card goes into the equation; `count > n`
/// yields no placements.
fn sqrt_assignments(n: usize, count: usize) -> Vec<Vec<bool>> {
    fn choose(start: usize, remaining: usize, current: &mut Vec<bool>, out: &mut Vec<Vec<bool>>) {
        if remaining == 0 {
            out.push(current.clone());
            return;
        }
        for i in start..current.len() {
            current[i] = true;
            choose(i + 1, remaining - 1, current, out);
            current[i] = false;
        }
    }
    let mut out = Vec::new();
    let mut current = vec![false; n];
    choose(0, count, &mut current, &mut out);
    out
}

/// Solve a hand: `numbers` are the values of the player's number cards,
/// `ops` the 3-slot operator rack, `sqrt_count` how many √ cards were
/// drawn (all of them are placed). Returns `None` when no arrangement
/// evaluates, or when there are more √ cards than number positions.
pub fn solve_hand(numbers: &[u8], ops: &[Op], sqrt_count: usize) -> Option<HandSolution> {
    if numbers.is_empty() {
        return None;
    }

    let needed_ops = numbers.len() - 1;
    let num_perms = permutations(numbers);
    let op_perms = k_permutations(ops, needed_ops);
    let assignments = sqrt_assignments(numbers.len(), sqrt_count);

    let mut best_low: Option<Solution> = None;
    let mut best_high: Option<Solution> = None;

    let mut tokens: Vec<Token> = Vec::with_capacity(numbers.len() * 3);
    for nums in &num_perms {
        for op_pick in &op_perms {
            for flags in &assignments {
                tokens.clear();
                let mut display = String::new();
                for (i, &value) in nums.iter().enumerate() {
                    if flags[i] {
                        tokens.push(Token::Sqrt);
                        display.push('√');
                    }
                    tokens.push(Token::Number(value as f64));
                    display.push_str(&value.to_string());
                    if i < op_pick.len() {
                        tokens.push(Token::Op(op_pick[i]));
                        display.push(' ');
                        display.push(op_pick[i].symbol());
                        display.push(' ');
                    }
                }

                let result = match evaluate(&tokens) {
                    Ok(r) => r,
                    Err(_) => continue,
                };

                let low_diff = (result - LOW_TARGET).abs();
                if best_low.as_ref().is_none_or(|b| low_diff < b.diff) {
                    best_low = Some(Solution {
                        result,
                        diff: low_diff,
                        equation: display.clone(),
                    });
                }
                let high_diff = (result - HIGH_TARGET).abs();
                if best_high.as_ref().is_none_or(|b| high_diff < b.diff) {
                    best_high = Some(Solution {
                        result,
                        diff: high_diff,
                        equation: display,
                    });
                }
            }
        }
    }

    Some(HandSolution {
        low: best_low?,
        high: best_high?,
    })
}
