//! Solve command handler.
//!
//! Runs the exhaustive hand solver over a hand given on the command
//! line and prints the best LOW and HIGH equations with their distance
//! from each target.

use crate::error::CliError;
use crate::formatters::format_ops;
use hilo_engine::cards::Op;
use hilo_engine::player::starting_ops;
use hilo_engine::solver::{solve_hand, HIGH_TARGET, LOW_TARGET};
use std::io::Write;

/// Handle the solve command.
///
/// # Arguments
///
/// * `cards` - Comma-separated number card values, e.g. "9,3,2"
/// * `ops` - Optional comma-separated operators; defaults to the
///   starting rack (`+ - ÷`)
/// * `sqrt` - Number of √ cards to apply (each one must be used)
/// * `out` - Output stream for results
///
/// # Errors
///
/// Returns `CliError::InvalidInput` for unparseable cards or operators,
/// card values outside 0..=10, hand sizes outside 3..=4, or a rack with
/// more than one `×`.
pub fn handle_solve_command(
    cards: &str,
    ops: Option<&str>,
    sqrt: usize,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let numbers = parse_cards(cards)?;
    let rack = match ops {
        Some(s) => parse_ops(s)?,
        None => starting_ops(),
    };

    if rack.iter().filter(|&&o| o == Op::Mul).count() > 1 {
        return Err(CliError::InvalidInput(
            "at most one × operator per rack".to_string(),
        ));
    }

    writeln!(
        out,
        "Hand: {}  Ops: {}  Sqrt: {}",
        cards.trim(),
        format_ops(&rack),
        sqrt
    )?;

    match solve_hand(&numbers, &rack, sqrt) {
        Some(solution) => {
            writeln!(
                out,
                "LOW  (target {}): {} = {} (off by {})",
                LOW_TARGET, solution.low.equation, solution.low.result, solution.low.diff
            )?;
            writeln!(
                out,
                "HIGH (target {}): {} = {} (off by {})",
                HIGH_TARGET, solution.high.equation, solution.high.result, solution.high.diff
            )?;
        }
        None => {
            writeln!(out, "No evaluable equation for this hand.")?;
        }
    }
    Ok(())
}

fn parse_cards(cards: &str) -> Result<Vec<u8>, CliError> {
    let numbers: Vec<u8> = cards
        .split(',')
        .map(|s| s.trim().parse::<u8>())
        .collect::<Result<_, _>>()
        .map_err(|_| CliError::InvalidInput(format!("invalid cards: {}", cards)))?;
    if !(3..=4).contains(&numbers.len()) {
        return Err(CliError::InvalidInput(
            "a hand holds 3 or 4 number cards".to_string(),
        ));
    }
    if let Some(bad) = numbers.iter().find(|&&v| v > 10) {
        return Err(CliError::InvalidInput(format!(
            "card value {} out of range 0..=10",
            bad
        )));
    }
    Ok(numbers)
}

fn parse_ops(ops: &str) -> Result<Vec<Op>, CliError> {
    let rack: Vec<Op> = ops
        .split(',')
        .map(|s| {
            let mut chars = s.trim().chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Op::from_symbol(c),
                _ => None,
            }
        })
        .collect::<Option<_>>()
        .ok_or_else(|| CliError::InvalidInput(format!("invalid operators: {}", ops)))?;
    if rack.len() != 3 {
        return Err(CliError::InvalidInput(
            "an operator rack holds exactly 3 operators".to_string(),
        ));
    }
    Ok(rack)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solve_prints_both_sides() {
        let mut out = Vec::new();
        let result = handle_solve_command("9,3,2", None, 0, &mut out);
        assert!(result.is_ok());
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("LOW"));
        assert!(output.contains("HIGH"));
    }

    #[test]
    fn solve_accepts_explicit_ops_and_sqrt() {
        let mut out = Vec::new();
        let result = handle_solve_command("9,3,2", Some("+,×,÷"), 1, &mut out);
        assert!(result.is_ok());
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Sqrt: 1"));
    }

    #[test]
    fn solve_accepts_ascii_operator_aliases() {
        let mut out = Vec::new();
        let result = handle_solve_command("5,5,5", Some("+,x,/"), 0, &mut out);
        assert!(result.is_ok());
    }

    #[test]
    fn solve_rejects_bad_cards() {
        let mut out = Vec::new();
        assert!(handle_solve_command("9,banana", None, 0, &mut out).is_err());
        assert!(handle_solve_command("9,3", None, 0, &mut out).is_err());
        assert!(handle_solve_command("9,3,11", None, 0, &mut out).is_err());
    }

    #[test]
    fn solve_rejects_double_multiply() {
        let mut out = Vec::new();
        let result = handle_solve_command("9,3,2", Some("×,×,+"), 0, &mut out);
        assert!(result.is_err());
    }
}
