//! Round state machine for Equation Hi-Lo.
//!
//! Drives the round lifecycle (ante, deal, two betting rounds, showdown,
//! settlement), the draw protocol, turn order, fold-wins, eliminations,
//! and dealer rotation. Everything is synchronous: AI turns are computed
//! inline through the injected [`DecisionPolicy`]; a human turn or a
//! pending multiply-discard choice simply suspends the machine until the
//! matching entry point is called.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::cards::{CardKind, Op};
use crate::deck::Deck;
use crate::errors::GameError;
use crate::ledger::Ledger;
use crate::logger::ActionLog;
use crate::player::{Declaration, Personality, Player, MIN_BET, STARTING_CHIPS};
use crate::policy::{BetAction, BetContext, DecisionPolicy, DeclareContext};
use crate::showdown::{self, Settlement};
use crate::solver::{solve_hand, HandSolution};

const AI_NAMES: [&str; 6] = ["Luna", "Archie", "Sage", "Nova", "Felix", "Iris"];

/// Round lifecycle phases. Strictly linear except for the fold-win and
/// all-in short-circuit early exits.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Lobby,
    Ante,
    Dealing,
    Round1,
    Deal4,
    Round2,
    Showdown,
    End,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub ai_count: usize,
    /// 0 = unlimited (elimination only).
    pub max_rounds: u32,
    pub ai_mistakes: bool,
    pub starting_chips: u32,
    pub min_bet: u32,
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            ai_count: 3,
            max_rounds: 10,
            ai_mistakes: true,
            starting_chips: STARTING_CHIPS,
            min_bet: MIN_BET,
            seed: 0xA1A2_A3A4,
        }
    }
}

/// A human multiply draw waiting on the choice of `+` or `-` to discard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDiscard {
    pub player_id: usize,
}

/// One player's line in the showdown results surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowdownEntry {
    pub player_id: usize,
    pub name: String,
    pub declaration: Option<Declaration>,
    pub result: Option<f64>,
    pub low_result: Option<f64>,
    pub high_result: Option<f64>,
    pub equation: Option<String>,
    pub is_low_winner: bool,
    pub is_high_winner: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShowdownSummary {
    pub entries: Vec<ShowdownEntry>,
    pub low_tiebreak: String,
    pub high_tiebreak: String,
}

/// A card as one viewer may see it: hidden cards expose no kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardView {
    pub kind: Option<CardKind>,
    pub face_down: bool,
}

/// The whole game: seats, deck, ledger, and phase bookkeeping. One
/// instance per process run; rounds are superseded in place.
pub struct Game {
    config: GameConfig,
    players: Vec<Player>,
    deck: Deck,
    ledger: Ledger,
    phase: Phase,
    dealer_index: usize,
    current_turn: usize,
    round_number: u32,
    last_aggressor: Option<usize>,
    acted: HashSet<usize>,
    pending_discard: Option<PendingDiscard>,
    winner_msg: Option<String>,
    showdown: Option<ShowdownSummary>,
    last_settlement: Option<Settlement>,
    log: ActionLog,
    rng: ChaCha20Rng,
    policy: Box<dyn DecisionPolicy>,
}

impl Game {
    pub fn new(config: GameConfig, policy: Box<dyn DecisionPolicy>) -> Self {
        let deck = Deck::new_with_seed(config.seed);
        let rng = ChaCha20Rng::seed_from_u64(config.seed ^ 0x5DEE_CE66_D1CE_5EED);
        Self {
            config,
            players: Vec::new(),
            deck,
            ledger: Ledger::default(),
            phase: Phase::Lobby,
            dealer_index: 0,
            current_turn: 0,
            round_number: 0,
            last_aggressor: None,
            acted: HashSet::new(),
            pending_discard: None,
            winner_msg: None,
            showdown: None,
            last_settlement: None,
            log: ActionLog::new(),
            rng,
            policy,
        }
    }

    /// Seat 1 human + N AI players with fresh stacks and sampled
    /// personalities. Resets the log and the round counter.
    pub fn init_game(&mut self) {
        self.round_number = 0;
        self.log.clear();
        self.phase = Phase::Lobby;
        self.winner_msg = None;
        self.showdown = None;
        self.pending_discard = None;

        let mut names = AI_NAMES.to_vec();
        names.shuffle(&mut self.rng);

        self.players.clear();
        let mut human = Player::new(0, "You", true);
        human.chips = self.config.starting_chips;
        self.players.push(human);
        for i in 0..self.config.ai_count {
            let mut ai = Player::new(i + 1, names[i % names.len()], false);
            ai.chips = self.config.starting_chips;
            ai.personality = Some(Personality {
                risk: 0.4 + self.rng.random::<f64>() * 0.2,
                carelessness: 0.4 + self.rng.random::<f64>() * 0.2,
            });
            self.players.push(ai);
        }
        self.dealer_index %= self.players.len();
    }

    // ---- round lifecycle -------------------------------------------------

    pub fn start_round(&mut self) -> Result<(), GameError> {
        let alive: Vec<usize> = self.alive_indices();
        if alive.len() <= 1 {
            self.phase = Phase::GameOver;
            self.winner_msg = match alive.first() {
                Some(&i) => Some(format!("{} wins the game!", self.players[i].name)),
                None => Some("Game Over!".to_string()),
            };
            self.log.push("Game Over!");
            return Ok(());
        }

        self.round_number += 1;
        if self.config.max_rounds > 0 && self.round_number > self.config.max_rounds {
            let richest = alive
                .iter()
                .copied()
                .max_by_key(|&i| self.players[i].chips)
                .ok_or(GameError::UnknownPlayer(0))?;
            self.phase = Phase::GameOver;
            let p = &self.players[richest];
            self.winner_msg = Some(format!(
                "{} wins with {} chips after {} rounds!",
                p.name, p.chips, self.config.max_rounds
            ));
            self.log
                .push(format!("Game Over! {} wins with ${}!", p.name, p.chips));
            return Ok(());
        }

        self.phase = Phase::Ante;
        self.log.push(format!("Round {}", self.round_number));
        self.winner_msg = None;
        self.showdown = None;
        self.last_settlement = None;
        self.pending_discard = None;

        // Betting cap = smallest alive stack BEFORE antes are deducted.
        let cap = alive
            .iter()
            .map(|&i| self.players[i].chips)
            .min()
            .unwrap_or(0);
        self.ledger = Ledger::open(cap);

        for p in &mut self.players {
            p.reset_for_round();
        }

        self.deck.shuffle();

        let min_bet = self.config.min_bet;
        for i in 0..self.players.len() {
            if self.players[i].eliminated || self.players[i].folded {
                continue;
            }
            self.ledger.place_bet(&mut self.players[i], min_bet);
        }

        self.deal_initial_cards()
    }

    fn deal_initial_cards(&mut self) -> Result<(), GameError> {
        self.phase = Phase::Dealing;
        for i in 0..self.players.len() {
            if self.players[i].eliminated {
                continue;
            }
            self.draw_card(i, true)?; // card 1 (hidden)
            self.draw_card(i, false)?;
            self.draw_card(i, false)?;
        }
        self.log.push("Turn 1: Deal & Betting.");

        // Pause for a human operator discard before betting opens.
        if self.pending_discard.is_some() {
            return Ok(());
        }
        self.start_betting(Phase::Round1)
    }

    fn deal_fourth(&mut self) -> Result<(), GameError> {
        self.phase = Phase::Deal4;
        self.log.push("Turn 2: Dealt 4th card.");
        for i in 0..self.players.len() {
            if !self.players[i].folded {
                self.draw_card(i, false)?;
            }
        }
        if self.pending_discard.is_some() {
            return Ok(());
        }
        self.start_betting(Phase::Round2)
    }

    // ---- draw protocol ---------------------------------------------------

    /// Draw for one seat until a number card lands. A player's first card
    /// must be a number; a multiply already held (or unusable) goes back
    /// to the bottom of the deck; accepted specials grant a bonus draw,
    /// which is simply the next turn of this loop.
    fn draw_card(&mut self, idx: usize, face_down: bool) -> Result<(), GameError> {
        let mut fd = face_down;
        // One pass through the deck is more than enough to find a number.
        for _ in 0..=52 {
            let mut card = if self.players[idx].hand.is_empty() {
                match self.deck.draw() {
                    Some(c) if c.is_number() => c,
                    Some(c) => {
                        self.deck.return_to_bottom(c);
                        self.deck.draw_number().ok_or(GameError::DeckExhausted)?
                    }
                    None => return Err(GameError::DeckExhausted),
                }
            } else {
                self.deck.draw().ok_or(GameError::DeckExhausted)?
            };

            match card.kind {
                CardKind::Number { .. } => {
                    card.face_down = fd;
                    self.players[idx].hand.push(card);
                    return Ok(());
                }
                CardKind::Multiply => {
                    let p = &self.players[idx];
                    let has_plus = p.ops.contains(&Op::Add);
                    let has_minus = p.ops.contains(&Op::Sub);
                    if p.holds_multiply() || (!has_plus && !has_minus) {
                        self.deck.return_to_bottom(card);
                        continue;
                    }
                    self.players[idx].hand.push(card);
                    if self.players[idx].is_human && has_plus && has_minus {
                        self.pending_discard = Some(PendingDiscard { player_id: idx });
                    } else if has_plus {
                        self.players[idx].discard_for_multiply(Op::Add);
                    } else {
                        self.players[idx].discard_for_multiply(Op::Sub);
                    }
                    fd = false;
                    // fall through to the bonus number draw
                }
                CardKind::Sqrt => {
                    self.players[idx].hand.push(card);
                    fd = false;
                }
            }
        }
        Err(GameError::DeckExhausted)
    }

    /// Resolve a pending human multiply discard and resume the machine.
    pub fn resolve_discard(&mut self, discard: Op) -> Result<(), GameError> {
        let pending = self.pending_discard.ok_or(GameError::NoPendingDiscard)?;
        if !self.players[pending.player_id].discard_for_multiply(discard) {
            return Err(GameError::InvalidDiscard(discard));
        }
        self.pending_discard = None;
        match self.phase {
            Phase::Dealing => self.start_betting(Phase::Round1),
            Phase::Deal4 => self.start_betting(Phase::Round2),
            _ => Ok(()),
        }
    }

    // ---- betting rounds --------------------------------------------------

    fn start_betting(&mut self, phase: Phase) -> Result<(), GameError> {
        self.phase = phase;
        for p in &mut self.players {
            p.current_bet = 0;
            p.has_raised_this_round = false;
        }

        // All-in short-circuit: nothing left to wager, skip straight on.
        let cap = self.ledger.cap();
        let all_at_cap = self
            .players
            .iter()
            .filter(|p| !p.folded)
            .all(|p| p.total_wagered >= cap || p.chips == 0);
        if all_at_cap {
            self.log.push("Betting cap reached — skipping betting.");
            return self.advance_after_betting();
        }

        self.current_turn = self.next_active_seat(self.dealer_index);
        self.last_aggressor = None;
        self.acted.clear();
        self.run_pending_turns()
    }

    /// Advance AI turns until the betting round completes, a fold-win
    /// ends the round, or a human turn suspends the machine.
    fn run_pending_turns(&mut self) -> Result<(), GameError> {
        loop {
            let active: Vec<usize> = self.active_indices();
            if active.len() == 1 {
                return self.end_round_fold(active[0]);
            }
            if self.betting_round_complete() {
                return self.advance_after_betting();
            }

            let idx = self.current_turn;
            let capped = self.ledger.headroom(&self.players[idx]) == 0;
            if self.players[idx].folded || self.players[idx].chips == 0 || capped {
                // All-in seats (and seats out of cap room) are exempt
                // from matching and cannot act.
                self.acted.insert(idx);
                self.current_turn = self.next_active_seat(idx);
                continue;
            }

            if self.players[idx].is_human {
                return Ok(()); // suspended: waiting for human input
            }

            let action = self.ai_action(idx);
            self.apply_bet_action(idx, action);
            self.current_turn = self.next_active_seat(self.current_turn);
        }
    }

    fn ai_action(&mut self, idx: usize) -> BetAction {
        let solution = self.solve_for(idx);
        let p = &self.players[idx];
        let ctx = BetContext {
            phase: self.phase,
            pot: self.ledger.pot(),
            to_call: self.to_call(idx),
            chips: p.chips,
            total_wagered: p.total_wagered,
            betting_cap: self.ledger.cap(),
            min_bet: self.config.min_bet,
            has_raised_this_round: p.has_raised_this_round,
            active_opponents: self.active_indices().len().saturating_sub(1),
            personality: p.personality.unwrap_or_else(Personality::neutral),
            mistakes_enabled: self.config.ai_mistakes,
        };
        match solution {
            Some(sol) => self.policy.choose_action(&ctx, &sol),
            // A hand with no evaluable equation cannot contest the pot.
            None if ctx.to_call == 0 => BetAction::Check,
            None => BetAction::Fold,
        }
    }

    fn apply_bet_action(&mut self, idx: usize, action: BetAction) {
        let to_call = self.to_call(idx);
        let name = self.players[idx].name.clone();
        match action {
            BetAction::Fold => {
                self.players[idx].folded = true;
                self.players[idx].last_action = Some("Fold".to_string());
                self.log.push(format!("{} folded.", name));
            }
            BetAction::Check | BetAction::Call => {
                let placed = self.ledger.place_bet(&mut self.players[idx], to_call);
                self.players[idx].last_action = Some(if to_call == 0 {
                    "Check".to_string()
                } else {
                    format!("Call ${}", placed)
                });
                if placed > 0 {
                    self.log.push(format!("{} bets {}", name, placed));
                }
            }
            BetAction::Raise(amount) => {
                let placed = self
                    .ledger
                    .place_bet(&mut self.players[idx], to_call.saturating_add(amount));
                if placed > to_call {
                    // A real raise resets the acted set to just the raiser.
                    self.players[idx].has_raised_this_round = true;
                    self.last_aggressor = Some(idx);
                    self.acted.clear();
                    self.players[idx].last_action =
                        Some(format!("Raise ${}", placed - to_call));
                } else {
                    self.players[idx].last_action = Some(if to_call == 0 {
                        "Check".to_string()
                    } else {
                        format!("Call ${}", placed)
                    });
                }
                if placed > 0 {
                    self.log.push(format!("{} bets {}", name, placed));
                }
            }
        }
        self.acted.insert(idx);
    }

    fn betting_round_complete(&self) -> bool {
        let max_bet = self
            .players
            .iter()
            .map(|p| p.current_bet)
            .max()
            .unwrap_or(0);
        let active: Vec<&Player> = self.players.iter().filter(|p| !p.folded).collect();
        let all_matched = active
            .iter()
            .all(|p| p.current_bet == max_bet || p.chips == 0 || self.ledger.headroom(p) == 0);
        let everyone_acted = active
            .iter()
            .filter(|p| p.chips > 0 && self.ledger.headroom(p) > 0)
            .all(|p| self.acted.contains(&p.id));
        all_matched && everyone_acted
    }

    fn advance_after_betting(&mut self) -> Result<(), GameError> {
        match self.phase {
            Phase::Round1 => self.deal_fourth(),
            _ => self.enter_showdown(),
        }
    }

    // ---- human entry points ----------------------------------------------

    pub fn human_fold(&mut self) -> Result<(), GameError> {
        let idx = self.require_human_turn()?;
        self.apply_bet_action(idx, BetAction::Fold);
        self.current_turn = self.next_active_seat(self.current_turn);
        self.run_pending_turns()
    }

    pub fn human_bet(&mut self, action: BetAction) -> Result<(), GameError> {
        let idx = self.require_human_turn()?;
        self.apply_bet_action(idx, action);
        self.current_turn = self.next_active_seat(self.current_turn);
        self.run_pending_turns()
    }

    fn require_human_turn(&self) -> Result<usize, GameError> {
        if !matches!(self.phase, Phase::Round1 | Phase::Round2) {
            return Err(GameError::WrongPhase { phase: self.phase });
        }
        if self.pending_discard.is_some() {
            return Err(GameError::PendingDiscard);
        }
        let idx = self.current_turn;
        let p = self
            .players
            .get(idx)
            .ok_or(GameError::UnknownPlayer(idx))?;
        if !p.is_human {
            return Err(GameError::NotPlayersTurn {
                expected: idx,
                actual: self.human_index().unwrap_or(0),
            });
        }
        if p.folded {
            return Err(GameError::AlreadyFolded);
        }
        Ok(idx)
    }

    // ---- showdown --------------------------------------------------------

    fn enter_showdown(&mut self) -> Result<(), GameError> {
        // AI declarations are locked in before the human declares, so no
        // choice can be informed by another's.
        for i in 0..self.players.len() {
            if self.players[i].is_human || self.players[i].folded {
                continue;
            }
            let solution = self.solve_for(i);
            if let Some(sol) = solution {
                let ctx = DeclareContext {
                    pot: self.ledger.pot(),
                    active_opponents: self.active_indices().len().saturating_sub(1),
                    personality: self.players[i]
                        .personality
                        .unwrap_or_else(Personality::neutral),
                    mistakes_enabled: self.config.ai_mistakes,
                };
                let choice = self.policy.choose_declaration(&ctx, &sol);
                let p = &mut self.players[i];
                p.declaration = Some(choice.declaration);
                p.final_result = Some(choice.result);
                p.low_result = choice.low_result;
                p.high_result = choice.high_result;
                p.equation = Some(choice.equation);
            }
        }

        self.phase = Phase::Showdown;
        self.log.push("Showdown!");

        let human_out = self
            .human_index()
            .map(|i| self.players[i].folded)
            .unwrap_or(true);
        if human_out {
            self.evaluate_showdown();
        }
        Ok(())
    }

    /// Record the human declaration and settle. `result` is judged against
    /// the declared side; SWING additionally needs `high_result`.
    pub fn submit_equation(
        &mut self,
        player_id: usize,
        declaration: Declaration,
        result: f64,
        high_result: Option<f64>,
        equation: Option<String>,
    ) -> Result<(), GameError> {
        if self.phase != Phase::Showdown {
            return Err(GameError::WrongPhase { phase: self.phase });
        }
        let p = self
            .players
            .iter_mut()
            .find(|p| p.id == player_id)
            .ok_or(GameError::UnknownPlayer(player_id))?;
        if p.folded {
            return Err(GameError::AlreadyFolded);
        }
        if declaration == Declaration::Swing && high_result.is_none() {
            return Err(GameError::IncompleteSwing);
        }
        p.declaration = Some(declaration);
        p.equation = equation;
        match (declaration, high_result) {
            (Declaration::Swing, Some(high)) => {
                p.low_result = Some(result);
                p.high_result = Some(high);
                p.final_result = Some(result);
            }
            _ => p.final_result = Some(result),
        }
        self.evaluate_showdown();
        Ok(())
    }

    /// Settle the round. The resolver itself is pure; any surprise here
    /// degrades to a generic game error rather than tearing the game down.
    fn evaluate_showdown(&mut self) {
        let settlement = showdown::resolve(&self.players, self.ledger.pot());

        for &(id, amount) in &settlement.payouts {
            if let Some(i) = self.players.iter().position(|p| p.id == id) {
                self.ledger.award(&mut self.players[i], amount);
            }
        }
        self.ledger.burn_remainder();

        self.showdown = Some(self.build_summary(&settlement));
        self.winner_msg = Some(self.settlement_message(&settlement));
        if let Some(msg) = &self.winner_msg {
            self.log.push(msg.clone());
        }
        self.last_settlement = Some(settlement);

        self.phase = Phase::End;
        self.advance_dealer();
        self.check_eliminations();
    }

    fn settlement_message(&self, s: &Settlement) -> String {
        let name = |id: Option<usize>| -> String {
            id.and_then(|id| self.players.iter().find(|p| p.id == id))
                .map(|p| p.name.clone())
                .unwrap_or_default()
        };
        if let Some(sp) = s.swing_winner {
            return format!(
                "SWING! {} wins both sides and takes the entire pot!",
                name(Some(sp))
            );
        }
        match (s.low_winner, s.high_winner) {
            (Some(l), Some(h)) => {
                let mut msg = format!("Low: {}. High: {}.", name(Some(l)), name(Some(h)));
                if s.burned > 0 {
                    msg.push_str(" (1 chip removed)");
                }
                msg
            }
            (Some(l), None) => format!("Low: {} wins entire pot!", name(Some(l))),
            (None, Some(h)) => format!("High: {} wins entire pot!", name(Some(h))),
            (None, None) => "No winners found (draw/error)".to_string(),
        }
    }

    fn build_summary(&self, s: &Settlement) -> ShowdownSummary {
        let entries = self
            .players
            .iter()
            .filter(|p| !p.folded)
            .map(|p| ShowdownEntry {
                player_id: p.id,
                name: p.name.clone(),
                declaration: p.declaration,
                result: p.final_result,
                low_result: p.low_result,
                high_result: p.high_result,
                equation: p.equation.clone(),
                is_low_winner: s.low_winner == Some(p.id),
                is_high_winner: s.high_winner == Some(p.id),
            })
            .collect();
        ShowdownSummary {
            entries,
            low_tiebreak: s.low_tiebreak.clone(),
            high_tiebreak: s.high_tiebreak.clone(),
        }
    }

    // ---- round end / bookkeeping -----------------------------------------

    fn end_round_fold(&mut self, winner_idx: usize) -> Result<(), GameError> {
        self.phase = Phase::End;
        let pot = self.ledger.pot();
        self.ledger.award(&mut self.players[winner_idx], pot);
        let name = self.players[winner_idx].name.clone();
        self.winner_msg = Some(format!("{} wins {} (Others folded)", name, pot));
        self.log.push(format!("{} wins {} (others folded)", name, pot));
        self.advance_dealer();
        self.check_eliminations();
        Ok(())
    }

    fn check_eliminations(&mut self) {
        let mut eliminated: Vec<String> = Vec::new();
        for p in &mut self.players {
            if !p.eliminated && p.chips == 0 {
                p.eliminated = true;
                eliminated.push(p.name.clone());
            }
        }
        if !eliminated.is_empty() {
            let suffix = format!(" | Eliminated: {}", eliminated.join(", "));
            match &mut self.winner_msg {
                Some(msg) => msg.push_str(&suffix),
                None => self.winner_msg = Some(suffix),
            }
        }
        let alive = self.alive_indices();
        if alive.len() <= 1 {
            self.phase = Phase::GameOver;
            self.winner_msg = match alive.first() {
                Some(&i) => Some(format!("{} wins the game!", self.players[i].name)),
                None => Some("Game Over!".to_string()),
            };
        }
    }

    fn advance_dealer(&mut self) {
        let n = self.players.len();
        let mut next = (self.dealer_index + 1) % n;
        let mut safety = 0;
        while self.players[next].eliminated && safety < n {
            next = (next + 1) % n;
            safety += 1;
        }
        self.dealer_index = next;
    }

    pub fn complete_round_and_start_next(&mut self) -> Result<(), GameError> {
        self.showdown = None;
        self.winner_msg = None;
        self.start_round()
    }

    /// Abandon the game at a phase boundary, discarding all round state.
    pub fn reset_to_lobby(&mut self) {
        self.phase = Phase::Lobby;
        self.winner_msg = None;
        self.showdown = None;
        self.last_settlement = None;
        self.pending_discard = None;
        self.ledger = Ledger::default();
        self.log.clear();
        self.players.clear();
        self.round_number = 0;
    }

    // ---- helpers ---------------------------------------------------------

    fn solve_for(&self, idx: usize) -> Option<HandSolution> {
        let p = &self.players[idx];
        solve_hand(&p.number_values(), &p.ops, p.sqrt_count())
    }

    fn alive_indices(&self) -> Vec<usize> {
        (0..self.players.len())
            .filter(|&i| !self.players[i].eliminated)
            .collect()
    }

    fn active_indices(&self) -> Vec<usize> {
        (0..self.players.len())
            .filter(|&i| !self.players[i].folded)
            .collect()
    }

    fn next_active_seat(&self, from: usize) -> usize {
        let n = self.players.len();
        let mut next = (from + 1) % n;
        let mut safety = 0;
        while self.players[next].folded && safety < n {
            next = (next + 1) % n;
            safety += 1;
        }
        next
    }

    fn human_index(&self) -> Option<usize> {
        self.players.iter().position(|p| p.is_human)
    }

    // ---- read-only surface -----------------------------------------------

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn pot(&self) -> u32 {
        self.ledger.pot()
    }

    pub fn betting_cap(&self) -> u32 {
        self.ledger.cap()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn dealer_index(&self) -> usize {
        self.dealer_index
    }

    pub fn current_turn(&self) -> usize {
        self.current_turn
    }

    pub fn pending_discard(&self) -> Option<PendingDiscard> {
        self.pending_discard
    }

    pub fn winner_msg(&self) -> Option<&str> {
        self.winner_msg.as_deref()
    }

    pub fn showdown_summary(&self) -> Option<&ShowdownSummary> {
        self.showdown.as_ref()
    }

    pub fn settlement(&self) -> Option<&Settlement> {
        self.last_settlement.as_ref()
    }

    pub fn log(&self) -> &ActionLog {
        &self.log
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Amount seat `idx` must add to match the table's highest bet.
    pub fn to_call(&self, idx: usize) -> u32 {
        let max_bet = self
            .players
            .iter()
            .map(|p| p.current_bet)
            .max()
            .unwrap_or(0);
        max_bet.saturating_sub(self.players[idx].current_bet)
    }

    /// One seat's hand as a given viewer may see it: hidden cards expose
    /// only their face-down state unless the viewer owns them.
    pub fn visible_hand(&self, idx: usize, for_owner: bool) -> Vec<CardView> {
        self.players[idx]
            .hand
            .iter()
            .map(|c| CardView {
                kind: if c.face_down && !for_owner {
                    None
                } else {
                    Some(c.kind)
                },
                face_down: c.face_down,
            })
            .collect()
    }

    /// True while the machine is suspended waiting for the human to act
    /// in a betting round.
    pub fn awaiting_human_bet(&self) -> bool {
        matches!(self.phase, Phase::Round1 | Phase::Round2)
            && self.pending_discard.is_none()
            && self
                .players
                .get(self.current_turn)
                .map(|p| p.is_human && !p.folded)
                .unwrap_or(false)
    }
}
