//! Simulation command handler.
//!
//! Runs headless AI-only games: the human seat is driven by a second,
//! independently seeded policy instance, so no prompt ever fires. Each
//! finished round is optionally appended to a JSONL history via
//! [`RoundLogger`], one [`RoundRecord`] per line.

use crate::error::CliError;
use crate::ui;
use hilo_ai::create_policy;
use hilo_engine::game::{Game, GameConfig, Phase};
use hilo_engine::logger::{PlayerOutcome, RoundLogger, RoundRecord};
use hilo_engine::policy::{BetAction, BetContext, DeclareContext, DecisionPolicy};
use hilo_engine::player::Personality;
use hilo_engine::solver::solve_hand;
use std::io::Write;

/// Hard ceiling on state-machine steps per game, against a stall.
const MAX_STEPS_PER_GAME: u32 = 10_000;

/// Handle the sim command: run headless games and record round history.
///
/// # Arguments
///
/// * `games` - Number of games to run (must be >= 1)
/// * `seed` - Seed of the first game; game `g` uses `seed + g`
/// * `out_path` - Optional JSONL path for round records
/// * `out` - Output stream for the per-game summary
/// * `err` - Error stream for warnings
pub fn handle_sim_command(
    games: u32,
    seed: Option<u64>,
    out_path: Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if games == 0 {
        ui::write_error(err, "games must be >= 1")?;
        return Err(CliError::InvalidInput("games must be >= 1".to_string()));
    }

    let base_seed = seed.unwrap_or_else(rand::random);
    let mut logger = match out_path {
        Some(path) => match RoundLogger::create(&path) {
            Ok(l) => Some(l),
            Err(e) => {
                ui::write_error(err, &format!("cannot open {}: {}", path, e))?;
                return Err(CliError::Io(e));
            }
        },
        None => None,
    };

    // Test hook simulating an interrupt partway through a batch.
    let break_after = std::env::var("HILO_SIM_BREAK_AFTER")
        .ok()
        .and_then(|v| v.parse::<u32>().ok());

    writeln!(out, "sim: games={} seed={}", games, base_seed)?;

    for g in 0..games {
        let game_seed = base_seed.wrapping_add(u64::from(g));
        let summary = run_one_game(game_seed, logger.as_mut())?;
        writeln!(
            out,
            "game {}: rounds={} winner={}",
            g + 1,
            summary.rounds,
            summary.winner.as_deref().unwrap_or("-")
        )?;

        if break_after == Some(g + 1) && g + 1 < games {
            writeln!(out, "Interrupted: saved {}/{}", g + 1, games)?;
            return Err(CliError::Interrupted(format!(
                "Interrupted: saved {}/{}",
                g + 1,
                games
            )));
        }
    }
    writeln!(out, "Simulated {} game(s).", games)?;
    Ok(())
}

struct GameSummary {
    rounds: u32,
    winner: Option<String>,
}

fn run_one_game(
    game_seed: u64,
    mut logger: Option<&mut RoundLogger>,
) -> Result<GameSummary, CliError> {
    let cfg = GameConfig {
        seed: game_seed,
        ..GameConfig::default()
    };
    let mut game = Game::new(cfg, create_policy("tier", game_seed));
    // The human seat gets its own policy, seeded apart from the table's.
    let mut driver = create_policy("tier", game_seed.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    game.init_game();
    game.start_round()?;

    // A round in flight but not yet written to the history. Elimination
    // can jump a settled round straight to GameOver, so the record for
    // it is flushed there too.
    let mut in_round = !matches!(game.phase(), Phase::GameOver);
    let mut rounds: u32 = 0;
    for _ in 0..MAX_STEPS_PER_GAME {
        match game.phase() {
            Phase::GameOver => {
                if in_round {
                    rounds += 1;
                    if let Some(logger) = logger.as_deref_mut() {
                        logger.write(&round_record(&game, game_seed))?;
                    }
                }
                break;
            }
            Phase::End => {
                rounds += 1;
                if let Some(logger) = logger.as_deref_mut() {
                    logger.write(&round_record(&game, game_seed))?;
                }
                game.complete_round_and_start_next()?;
                in_round = !matches!(game.phase(), Phase::GameOver);
            }
            Phase::Dealing | Phase::Deal4 if game.pending_discard().is_some() => {
                auto_discard(&mut game)?;
            }
            Phase::Round1 | Phase::Round2 if game.awaiting_human_bet() => {
                drive_bet(&mut game, driver.as_mut())?;
            }
            Phase::Showdown => {
                drive_declaration(&mut game, driver.as_mut())?;
            }
            phase => {
                return Err(CliError::Engine(format!("sim stalled in phase {:?}", phase)));
            }
        }
    }

    let winner = game
        .players()
        .iter()
        .filter(|p| !p.eliminated)
        .max_by_key(|p| p.chips)
        .map(|p| p.name.clone());
    Ok(GameSummary { rounds, winner })
}

/// The driven seat discards the way AI seats do: `+` first.
fn auto_discard(game: &mut Game) -> Result<(), CliError> {
    use hilo_engine::cards::Op;
    let idx = human_seat(game);
    let op = if game.players()[idx].ops.contains(&Op::Add) {
        Op::Add
    } else {
        Op::Sub
    };
    game.resolve_discard(op)?;
    Ok(())
}

fn drive_bet(game: &mut Game, driver: &mut dyn DecisionPolicy) -> Result<(), CliError> {
    let idx = human_seat(game);
    let p = &game.players()[idx];
    let solution = solve_hand(&p.number_values(), &p.ops, p.sqrt_count());
    let ctx = BetContext {
        phase: game.phase(),
        pot: game.pot(),
        to_call: game.to_call(idx),
        chips: p.chips,
        total_wagered: p.total_wagered,
        betting_cap: game.betting_cap(),
        min_bet: game.config().min_bet,
        has_raised_this_round: p.has_raised_this_round,
        active_opponents: game.players().iter().filter(|p| !p.folded).count() - 1,
        personality: p.personality.unwrap_or_else(Personality::neutral),
        mistakes_enabled: game.config().ai_mistakes,
    };
    let action = match solution {
        Some(sol) => driver.choose_action(&ctx, &sol),
        None if ctx.to_call == 0 => BetAction::Check,
        None => BetAction::Fold,
    };
    match action {
        BetAction::Fold => game.human_fold()?,
        other => game.human_bet(other)?,
    }
    Ok(())
}

fn drive_declaration(game: &mut Game, driver: &mut dyn DecisionPolicy) -> Result<(), CliError> {
    let idx = human_seat(game);
    let p = &game.players()[idx];
    let Some(sol) = solve_hand(&p.number_values(), &p.ops, p.sqrt_count()) else {
        return Err(CliError::Engine(
            "driven seat holds no evaluable hand at showdown".to_string(),
        ));
    };
    let ctx = DeclareContext {
        pot: game.pot(),
        active_opponents: game.players().iter().filter(|p| !p.folded).count() - 1,
        personality: p.personality.unwrap_or_else(Personality::neutral),
        mistakes_enabled: game.config().ai_mistakes,
    };
    let choice = driver.choose_declaration(&ctx, &sol);
    let player_id = p.id;
    game.submit_equation(
        player_id,
        choice.declaration,
        choice.result,
        choice.high_result,
        Some(choice.equation),
    )?;
    Ok(())
}

fn human_seat(game: &Game) -> usize {
    game.players()
        .iter()
        .position(|p| p.is_human)
        .unwrap_or(0)
}

fn round_record(game: &Game, seed: u64) -> RoundRecord {
    let settlement = game.settlement();
    // Wager conservation: the settled pot equals the round's total
    // wagers, fold-wins included (where no settlement exists).
    let pot = game.players().iter().map(|p| p.total_wagered).sum();
    RoundRecord {
        round: game.round_number(),
        pot,
        seed: Some(seed),
        outcomes: game
            .players()
            .iter()
            .map(|p| PlayerOutcome {
                player_id: p.id,
                name: p.name.clone(),
                chips_after: p.chips,
                folded: p.folded,
                declaration: p.declaration,
                result: p.final_result,
                equation: p.equation.clone(),
            })
            .collect(),
        low_winner: settlement.and_then(|s| s.low_winner),
        high_winner: settlement.and_then(|s| s.high_winner),
        swing_winner: settlement.and_then(|s| s.swing_winner),
        ts: None,
    }
}
