//! Equation evaluator: turns a flat token sequence into a numeric result
//! with standard operator precedence and exact failure semantics.
//!
//! The evaluator is pure and deterministic; it is used both by the hand
//! solver and as the correctness oracle for human-built equations.

use crate::cards::Op;
use thiserror::Error;

/// Divisors with absolute value below this are treated as zero, absorbing
/// floating-point residue from earlier operations.
pub const DIV_ZERO_EPSILON: f64 = 1e-12;

/// A single equation token. Valid sequences alternate numbers and binary
/// operators, with an optional `√` immediately before any number.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Op(Op),
    Sqrt,
}

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum EvalError {
    #[error("SYNTAX")]
    Syntax,
    #[error("DIV_ZERO")]
    DivZero,
}

fn apply_top(values: &mut Vec<f64>, operators: &mut Vec<Op>) -> Result<(), EvalError> {
    if values.len() < 2 || operators.is_empty() {
        return Err(EvalError::Syntax);
    }
    let right = values.pop().ok_or(EvalError::Syntax)?;
    let left = values.pop().ok_or(EvalError::Syntax)?;
    let op = operators.pop().ok_or(EvalError::Syntax)?;

    let next = match op {
        Op::Add => left + right,
        Op::Sub => left - right,
        Op::Mul => left * right,
        Op::Div => {
            if right.abs() < DIV_ZERO_EPSILON {
                return Err(EvalError::DivZero);
            }
            left / right
        }
    };

    if !next.is_finite() {
        return Err(match op {
            Op::Div => EvalError::DivZero,
            _ => EvalError::Syntax,
        });
    }
    values.push(next);
    Ok(())
}

fn precedence(op: Op) -> u8 {
    match op {
        Op::Add | Op::Sub => 1,
        Op::Mul | Op::Div => 2,
    }
}

/// Evaluate a token sequence. `×`/`÷` bind tighter than `+`/`-`,
/// left-associative within equal precedence; `√` applies to the single
/// following number only and rejects negative operands.
pub fn evaluate(tokens: &[Token]) -> Result<f64, EvalError> {
    if tokens.is_empty() {
        return Err(EvalError::Syntax);
    }

    let mut values: Vec<f64> = Vec::new();
    let mut operators: Vec<Op> = Vec::new();
    let mut expect_operand = true;
    let mut pending_sqrt = false;

    for &token in tokens {
        if expect_operand {
            match token {
                Token::Sqrt => {
                    if pending_sqrt {
                        return Err(EvalError::Syntax);
                    }
                    pending_sqrt = true;
                }
                Token::Number(raw) => {
                    if !raw.is_finite() {
                        return Err(EvalError::Syntax);
                    }
                    let value = if pending_sqrt {
                        if raw < 0.0 {
                            return Err(EvalError::Syntax);
                        }
                        pending_sqrt = false;
                        raw.sqrt()
                    } else {
                        raw
                    };
                    values.push(value);
                    expect_operand = false;
                }
                Token::Op(_) => return Err(EvalError::Syntax),
            }
            continue;
        }

        let op = match token {
            Token::Op(op) => op,
            _ => return Err(EvalError::Syntax),
        };

        while operators
            .last()
            .is_some_and(|&top| precedence(top) >= precedence(op))
        {
            apply_top(&mut values, &mut operators)?;
        }
        operators.push(op);
        expect_operand = true;
    }

    if expect_operand || pending_sqrt {
        return Err(EvalError::Syntax);
    }

    while !operators.is_empty() {
        apply_top(&mut values, &mut operators)?;
    }

    match values.as_slice() {
        [single] if single.is_finite() => Ok(*single),
        _ => Err(EvalError::Syntax),
    }
}

/// Parse the display format produced by the solver (`√9 + 3 × 2`) back
/// into tokens. Whitespace separates every token; a `√` prefix fuses with
/// the number that follows it.
pub fn parse_equation(input: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    for part in input.split_whitespace() {
        if part.chars().count() == 1 {
            if let Some(op) = Op::from_symbol(part.chars().next().ok_or(EvalError::Syntax)?) {
                tokens.push(Token::Op(op));
                continue;
            }
        }
        let rest = match part.strip_prefix('√') {
            Some(rest) => {
                tokens.push(Token::Sqrt);
                rest
            }
            None => part,
        };
        let value: f64 = rest.parse().map_err(|_| EvalError::Syntax)?;
        tokens.push(Token::Number(value));
    }
    Ok(tokens)
}
