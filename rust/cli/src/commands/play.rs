//! # Play Command
//!
//! Interactive Equation Hi-Lo gameplay against AI opponents.
//!
//! The engine state machine suspends whenever the human seat must act;
//! this module owns the prompt loop that reads the matching input from
//! stdin and feeds it back in. Three kinds of prompt exist:
//!
//! - Betting actions during the two wagering rounds
//! - The `+`/`-` discard choice after drawing a `×` card
//! - The showdown declaration plus equation entry
//!
//! A `q` (or EOF) at any prompt abandons the game gracefully.

use crate::config;
use crate::error::CliError;
use crate::formatters::{format_action, format_hand, format_ops};
use crate::io_utils::read_stdin_line;
use crate::ui;
use hilo_ai::create_policy;
use hilo_engine::cards::Op;
use hilo_engine::eval::{evaluate, parse_equation, Token};
use hilo_engine::game::{Game, GameConfig, Phase};
use hilo_engine::player::{Declaration, Player};
use hilo_engine::policy::BetAction;
use std::io::{BufRead, Write};

/// What the prompt loop should do next.
enum Flow {
    Continue,
    Quit,
}

/// Handle the play command: interactive gameplay against AI seats.
///
/// # Arguments
///
/// * `ai` - Number of AI opponents (1..=6)
/// * `rounds` - Round limit (0 = play until elimination)
/// * `seed` - RNG seed for reproducibility (default: config, then random)
/// * `no_mistakes` - Disable AI evaluation noise for this session
/// * `out` - Output stream for game display
/// * `err` - Error stream for warnings and errors
/// * `stdin` - Input stream for player actions
///
/// # Errors
///
/// Returns `CliError::InvalidInput` if `ai` is out of range, and
/// propagates engine or I/O failures.
pub fn handle_play_command(
    ai: usize,
    rounds: u32,
    seed: Option<u64>,
    no_mistakes: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    if !(1..=6).contains(&ai) {
        ui::write_error(err, "ai must be in 1..=6")?;
        return Err(CliError::InvalidInput("ai must be in 1..=6".to_string()));
    }

    let file_cfg = config::load_or_default();
    let seed = seed.or(file_cfg.seed).unwrap_or_else(rand::random);

    let cfg = GameConfig {
        ai_count: ai,
        max_rounds: rounds,
        ai_mistakes: file_cfg.ai_mistakes && !no_mistakes,
        starting_chips: file_cfg.starting_chips,
        min_bet: file_cfg.min_bet,
        seed,
    };

    writeln!(out, "play: ai={} rounds={} seed={}", ai, rounds, seed)?;

    let mut game = Game::new(cfg, create_policy("tier", seed));
    game.init_game();
    game.start_round()?;

    loop {
        match game.phase() {
            Phase::GameOver => {
                if let Some(msg) = game.winner_msg() {
                    writeln!(out, "{}", msg)?;
                }
                display_standings(&game, out)?;
                return Ok(());
            }
            Phase::End => {
                display_round_end(&game, out)?;
                write!(out, "Press Enter for the next round (q to quit): ")?;
                out.flush()?;
                match read_stdin_line(stdin) {
                    Some(line) if is_quit(&line) => return quit(out),
                    Some(_) => game.complete_round_and_start_next()?,
                    None => return quit(out),
                }
            }
            Phase::Dealing | Phase::Deal4 if game.pending_discard().is_some() => {
                match prompt_discard(&mut game, out, err, stdin)? {
                    Flow::Continue => {}
                    Flow::Quit => return quit(out),
                }
            }
            Phase::Round1 | Phase::Round2 if game.awaiting_human_bet() => {
                match prompt_bet(&mut game, out, err, stdin)? {
                    Flow::Continue => {}
                    Flow::Quit => return quit(out),
                }
            }
            Phase::Showdown => match prompt_declaration(&mut game, out, err, stdin)? {
                Flow::Continue => {}
                Flow::Quit => return quit(out),
            },
            phase => {
                // The machine only hands control back at a prompt point.
                ui::write_error(err, &format!("unexpected phase {:?}", phase))?;
                return Err(CliError::Engine(format!("unexpected phase {:?}", phase)));
            }
        }
    }
}

fn quit(out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(out, "Goodbye.")?;
    Ok(())
}

fn is_quit(line: &str) -> bool {
    matches!(line.trim(), "q" | "quit")
}

fn human_seat(game: &Game) -> usize {
    game.players()
        .iter()
        .position(|p| p.is_human)
        .unwrap_or(0)
}

// ---- display ------------------------------------------------------------

fn display_table(game: &Game, out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(
        out,
        "\nRound {}  Pot: {}  Cap: {}",
        game.round_number(),
        game.pot(),
        game.betting_cap()
    )?;
    for (i, p) in game.players().iter().enumerate() {
        if p.eliminated {
            continue;
        }
        let hand = format_hand(&game.visible_hand(i, p.is_human));
        let status = if p.folded {
            " (folded)".to_string()
        } else {
            p.last_action
                .as_ref()
                .map(|a| format!(" [{}]", a))
                .unwrap_or_default()
        };
        writeln!(
            out,
            "  {:<8} chips={:<5} {} ops: {}{}",
            p.name,
            p.chips,
            hand,
            format_ops(&p.ops),
            status
        )?;
    }
    Ok(())
}

fn display_round_end(game: &Game, out: &mut dyn Write) -> Result<(), CliError> {
    if let Some(summary) = game.showdown_summary() {
        writeln!(out, "\n--- Showdown ---")?;
        for entry in &summary.entries {
            let decl = entry
                .declaration
                .map(declaration_label)
                .unwrap_or("-");
            let eq = entry.equation.as_deref().unwrap_or("-");
            let result = entry
                .result
                .map(|r| format!("{:.2}", r))
                .unwrap_or_else(|| "-".to_string());
            let mut marks = String::new();
            if entry.is_low_winner {
                marks.push_str(" *LOW*");
            }
            if entry.is_high_winner {
                marks.push_str(" *HIGH*");
            }
            writeln!(
                out,
                "  {:<8} {:<5} {} = {}{}",
                entry.name, decl, eq, result, marks
            )?;
        }
        if !summary.low_tiebreak.is_empty() {
            writeln!(out, "  Low tiebreak: {}", summary.low_tiebreak)?;
        }
        if !summary.high_tiebreak.is_empty() {
            writeln!(out, "  High tiebreak: {}", summary.high_tiebreak)?;
        }
    }
    if let Some(msg) = game.winner_msg() {
        writeln!(out, "{}", msg)?;
    }
    display_standings(game, out)?;
    Ok(())
}

fn display_standings(game: &Game, out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(out, "Standings:")?;
    for p in game.players() {
        let tag = if p.eliminated { " (out)" } else { "" };
        writeln!(out, "  {:<8} {}{}", p.name, p.chips, tag)?;
    }
    Ok(())
}

fn declaration_label(d: Declaration) -> &'static str {
    match d {
        Declaration::Low => "LOW",
        Declaration::High => "HIGH",
        Declaration::Swing => "SWING",
    }
}

// ---- prompts ------------------------------------------------------------

fn prompt_discard(
    game: &mut Game,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<Flow, CliError> {
    let idx = human_seat(game);
    writeln!(
        out,
        "\nYou drew ×! Your hand: {}",
        format_hand(&game.visible_hand(idx, true))
    )?;
    loop {
        write!(out, "Discard which operator for × (+ or -): ")?;
        out.flush()?;
        let Some(line) = read_stdin_line(stdin) else {
            return Ok(Flow::Quit);
        };
        if is_quit(&line) {
            return Ok(Flow::Quit);
        }
        let op = match line.trim() {
            "+" => Op::Add,
            "-" => Op::Sub,
            other => {
                ui::write_error(err, &format!("enter + or -, got '{}'", other))?;
                continue;
            }
        };
        match game.resolve_discard(op) {
            Ok(()) => return Ok(Flow::Continue),
            Err(e) => {
                ui::write_error(err, &format!("cannot discard: {}", e))?;
            }
        }
    }
}

fn prompt_bet(
    game: &mut Game,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<Flow, CliError> {
    display_table(game, out)?;
    let idx = human_seat(game);
    loop {
        let to_call = game.to_call(idx);
        write!(
            out,
            "Your turn. To call: {}. Enter action (check/call/raise N/fold/q): ",
            to_call
        )?;
        out.flush()?;
        let Some(line) = read_stdin_line(stdin) else {
            return Ok(Flow::Quit);
        };
        if is_quit(&line) {
            return Ok(Flow::Quit);
        }
        let action = match parse_bet_input(&line, to_call) {
            Ok(a) => a,
            Err(msg) => {
                ui::write_error(err, &msg)?;
                continue;
            }
        };
        let result = match action {
            BetAction::Fold => game.human_fold(),
            other => game.human_bet(other),
        };
        match result {
            Ok(()) => {
                writeln!(out, "You {}.", format_action(&action))?;
                return Ok(Flow::Continue);
            }
            Err(e) => {
                ui::write_error(err, &format!("invalid action: {}", e))?;
            }
        }
    }
}

fn parse_bet_input(line: &str, to_call: u32) -> Result<BetAction, String> {
    let mut parts = line.split_whitespace();
    match parts.next() {
        Some("check") => {
            if to_call > 0 {
                Err(format!("cannot check, {} to call", to_call))
            } else {
                Ok(BetAction::Check)
            }
        }
        Some("call") | Some("c") => Ok(BetAction::Call),
        Some("fold") | Some("f") => Ok(BetAction::Fold),
        Some("raise") | Some("r") => {
            let amount: u32 = parts
                .next()
                .ok_or_else(|| "raise needs an amount, e.g. 'raise 20'".to_string())?
                .parse()
                .map_err(|_| "raise amount must be a number".to_string())?;
            if amount == 0 {
                return Err("raise amount must be positive".to_string());
            }
            Ok(BetAction::Raise(amount))
        }
        _ => Err(format!("unrecognized action '{}'", line.trim())),
    }
}

fn prompt_declaration(
    game: &mut Game,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<Flow, CliError> {
    let idx = human_seat(game);
    writeln!(
        out,
        "\n--- Showdown ---\nYour hand: {}  ops: {}",
        format_hand(&game.visible_hand(idx, true)),
        format_ops(&game.players()[idx].ops)
    )?;

    loop {
        write!(out, "Declare (low/high/swing/q): ")?;
        out.flush()?;
        let Some(line) = read_stdin_line(stdin) else {
            return Ok(Flow::Quit);
        };
        if is_quit(&line) {
            return Ok(Flow::Quit);
        }
        let declaration = match line.trim() {
            "low" | "l" => Declaration::Low,
            "high" | "h" => Declaration::High,
            "swing" | "s" => Declaration::Swing,
            other => {
                ui::write_error(err, &format!("enter low, high, or swing, got '{}'", other))?;
                continue;
            }
        };

        let (result, high_result, equation) = match declaration {
            Declaration::Swing => {
                let Some((low, low_eq)) = prompt_equation(game, idx, "LOW", out, err, stdin)?
                else {
                    return Ok(Flow::Quit);
                };
                let Some((high, high_eq)) = prompt_equation(game, idx, "HIGH", out, err, stdin)?
                else {
                    return Ok(Flow::Quit);
                };
                (low, Some(high), format!("{} | {}", low_eq, high_eq))
            }
            _ => {
                let Some((result, eq)) =
                    prompt_equation(game, idx, declaration_label(declaration), out, err, stdin)?
                else {
                    return Ok(Flow::Quit);
                };
                (result, None, eq)
            }
        };

        let player_id = game.players()[idx].id;
        match game.submit_equation(player_id, declaration, result, high_result, Some(equation)) {
            Ok(()) => return Ok(Flow::Continue),
            Err(e) => {
                ui::write_error(err, &format!("declaration rejected: {}", e))?;
            }
        }
    }
}

/// Read and validate one equation; returns the evaluated result and the
/// normalized display string, or `None` when the user quits.
fn prompt_equation(
    game: &Game,
    idx: usize,
    side: &str,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<Option<(f64, String)>, CliError> {
    loop {
        write!(out, "Enter your {} equation (e.g. '√9 + 3 ÷ 2'): ", side)?;
        out.flush()?;
        let Some(line) = read_stdin_line(stdin) else {
            return Ok(None);
        };
        if is_quit(&line) {
            return Ok(None);
        }
        let tokens = match parse_equation(&line) {
            Ok(t) => t,
            Err(e) => {
                ui::write_error(err, &format!("bad equation: {}", e))?;
                continue;
            }
        };
        if let Err(msg) = check_uses_hand(&tokens, &game.players()[idx]) {
            ui::write_error(err, &msg)?;
            continue;
        }
        match evaluate(&tokens) {
            Ok(result) => return Ok(Some((result, line.trim().to_string()))),
            Err(e) => {
                ui::write_error(err, &format!("equation does not evaluate: {}", e))?;
            }
        }
    }
}

/// An equation must spend every number card exactly once, draw its
/// operators from the rack, and apply every √ card the hand holds.
fn check_uses_hand(tokens: &[Token], player: &Player) -> Result<(), String> {
    let mut needed = player.number_values();
    let mut rack = player.ops.clone();
    let mut sqrt_left = player.sqrt_count();

    for token in tokens {
        match token {
            Token::Number(v) => {
                let v = *v;
                match needed
                    .iter()
                    .position(|&n| (f64::from(n) - v).abs() < f64::EPSILON)
                {
                    Some(i) => {
                        needed.remove(i);
                    }
                    None => return Err(format!("{} is not among your cards", v)),
                }
            }
            Token::Op(op) => match rack.iter().position(|&o| o == *op) {
                Some(i) => {
                    rack.remove(i);
                }
                None => return Err(format!("{} is not in your operator rack", op)),
            },
            Token::Sqrt => {
                if sqrt_left == 0 {
                    return Err("no √ card available".to_string());
                }
                sqrt_left -= 1;
            }
        }
    }
    if !needed.is_empty() {
        return Err(format!(
            "every number card must be used (missing: {:?})",
            needed
        ));
    }
    if sqrt_left > 0 {
        return Err(format!("every √ card must be used ({} unused)", sqrt_left));
    }
    Ok(())
}
