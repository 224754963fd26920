use hilo_engine::cards::Op;
use hilo_engine::eval::{evaluate, parse_equation, EvalError, Token};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn num(v: f64) -> Token {
    Token::Number(v)
}

fn op(o: Op) -> Token {
    Token::Op(o)
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let tokens = [num(2.0), op(Op::Add), num(3.0), op(Op::Mul), num(4.0)];
    assert_eq!(evaluate(&tokens), Ok(14.0));
}

#[test]
fn equal_precedence_is_left_associative() {
    let tokens = [num(8.0), op(Op::Div), num(4.0), op(Op::Mul), num(2.0)];
    assert_eq!(evaluate(&tokens), Ok(4.0), "8 ÷ 4 × 2 must be (8÷4)×2");

    let tokens = [num(10.0), op(Op::Sub), num(3.0), op(Op::Sub), num(2.0)];
    assert_eq!(evaluate(&tokens), Ok(5.0), "10 - 3 - 2 must be (10-3)-2");
}

#[test]
fn sqrt_applies_to_the_following_number_only() {
    let tokens = [Token::Sqrt, num(9.0), op(Op::Add), num(1.0)];
    assert_eq!(evaluate(&tokens), Ok(4.0));

    // √ does not distribute over the rest of the expression
    let tokens = [Token::Sqrt, num(4.0), op(Op::Mul), num(4.0)];
    assert_eq!(evaluate(&tokens), Ok(8.0));
}

#[test]
fn division_by_zero_is_div_zero() {
    let tokens = [num(5.0), op(Op::Div), num(0.0)];
    assert_eq!(evaluate(&tokens), Err(EvalError::DivZero));

    // √0 is still zero on the right of ÷
    let tokens = [num(5.0), op(Op::Div), Token::Sqrt, num(0.0)];
    assert_eq!(evaluate(&tokens), Err(EvalError::DivZero));
}

#[test]
fn malformed_sequences_are_syntax_errors() {
    let cases: &[&[Token]] = &[
        &[],
        &[op(Op::Add)],
        &[num(1.0), op(Op::Add)],
        &[op(Op::Add), num(1.0)],
        &[num(1.0), num(2.0)],
        &[num(1.0), op(Op::Add), op(Op::Sub), num(2.0)],
        &[Token::Sqrt],
        &[num(1.0), Token::Sqrt],
        &[Token::Sqrt, Token::Sqrt, num(4.0)],
    ];
    for tokens in cases {
        assert_eq!(
            evaluate(tokens),
            Err(EvalError::Syntax),
            "expected SYNTAX for {:?}",
            tokens
        );
    }
}

#[test]
fn sqrt_of_negative_is_syntax() {
    let tokens = [Token::Sqrt, num(-4.0)];
    assert_eq!(evaluate(&tokens), Err(EvalError::Syntax));
}

#[test]
fn parse_round_trips_solver_display_format() {
    let tokens = parse_equation("√9 + 3 × 2").unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::Sqrt,
            num(9.0),
            op(Op::Add),
            num(3.0),
            op(Op::Mul),
            num(2.0)
        ]
    );
    assert_eq!(evaluate(&tokens), Ok(9.0));
}

#[test]
fn parse_accepts_ascii_operator_aliases() {
    let unicode = parse_equation("9 ÷ 3 × 2").unwrap();
    let ascii = parse_equation("9 / 3 x 2").unwrap();
    assert_eq!(unicode, ascii);
}

#[test]
fn parse_rejects_garbage() {
    assert_eq!(parse_equation("9 ++ 3"), Err(EvalError::Syntax));
    assert_eq!(parse_equation("nine + 3"), Err(EvalError::Syntax));
    assert_eq!(parse_equation("9 + √"), Err(EvalError::Syntax));
}

/// Reference evaluation: one pass resolving × and ÷, a second pass for
/// + and -. Used as an independent oracle for the stack evaluator.
fn reference_eval(numbers: &[f64], ops: &[Op]) -> Result<f64, EvalError> {
    assert_eq!(numbers.len(), ops.len() + 1);
    let mut values = vec![numbers[0]];
    let mut pending: Vec<Op> = Vec::new();
    for (i, &o) in ops.iter().enumerate() {
        let right = numbers[i + 1];
        match o {
            Op::Mul => {
                let left = values.pop().unwrap();
                values.push(left * right);
            }
            Op::Div => {
                if right.abs() < 1e-12 {
                    return Err(EvalError::DivZero);
                }
                let left = values.pop().unwrap();
                values.push(left / right);
            }
            other => {
                pending.push(other);
                values.push(right);
            }
        }
    }
    let mut acc = values[0];
    for (i, &o) in pending.iter().enumerate() {
        match o {
            Op::Add => acc += values[i + 1],
            Op::Sub => acc -= values[i + 1],
            _ => unreachable!(),
        }
    }
    Ok(acc)
}

#[test]
fn evaluator_agrees_with_reference_on_random_expressions() {
    let mut rng = ChaCha20Rng::seed_from_u64(2024);
    let all_ops = [Op::Add, Op::Sub, Op::Mul, Op::Div];

    for _ in 0..500 {
        let n = rng.random_range(2..=4usize);
        let numbers: Vec<f64> = (0..n).map(|_| f64::from(rng.random_range(0..=10u8))).collect();
        let ops: Vec<Op> = (0..n - 1)
            .map(|_| all_ops[rng.random_range(0..all_ops.len())])
            .collect();

        let mut tokens = vec![num(numbers[0])];
        for (i, &o) in ops.iter().enumerate() {
            tokens.push(op(o));
            tokens.push(num(numbers[i + 1]));
        }

        let expected = reference_eval(&numbers, &ops);
        let actual = evaluate(&tokens);
        match (expected, actual) {
            (Ok(a), Ok(b)) => assert!(
                (a - b).abs() < 1e-9,
                "mismatch for {:?} {:?}: {} vs {}",
                numbers,
                ops,
                a,
                b
            ),
            (Err(ea), Err(eb)) => assert_eq!(ea, eb, "error mismatch for {:?} {:?}", numbers, ops),
            (e, a) => panic!("divergence for {:?} {:?}: {:?} vs {:?}", numbers, ops, e, a),
        }
    }
}
