//! Seam between the round state machine and the AI wagering policy.
//!
//! The machine drives AI turns and precomputes showdown declarations
//! internally, so the trait lives here; implementations (see the
//! `hilo-ai` crate) depend on the engine, never the reverse.

use crate::game::Phase;
use crate::player::{Declaration, Personality};
use crate::solver::HandSolution;

/// A betting action chosen by a policy. `Raise` is the additional amount
/// on top of the call; the ledger clamps whatever cannot be afforded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetAction {
    Fold,
    Check,
    Call,
    Raise(u32),
}

/// Public table state visible to one AI seat when it acts.
#[derive(Debug, Clone, Copy)]
pub struct BetContext {
    pub phase: Phase,
    pub pot: u32,
    /// Amount needed to match the table's highest current bet.
    pub to_call: u32,
    pub chips: u32,
    pub total_wagered: u32,
    pub betting_cap: u32,
    pub min_bet: u32,
    pub has_raised_this_round: bool,
    /// Non-folded opponents still contesting the pot.
    pub active_opponents: usize,
    pub personality: Personality,
    /// When false, the policy must act without evaluation noise.
    pub mistakes_enabled: bool,
}

/// Context for the showdown declaration. Declaring is free, so there is
/// no call cost here.
#[derive(Debug, Clone, Copy)]
pub struct DeclareContext {
    pub pot: u32,
    pub active_opponents: usize,
    pub personality: Personality,
    pub mistakes_enabled: bool,
}

/// A policy's showdown declaration plus the equation(s) backing it.
#[derive(Debug, Clone)]
pub struct DeclarationChoice {
    pub declaration: Declaration,
    /// Result judged against the declared side (LOW result for SWING).
    pub result: f64,
    pub low_result: Option<f64>,
    pub high_result: Option<f64>,
    pub equation: String,
}

/// Decision-making interface for AI seats. One policy instance serves
/// every AI player; per-seat temperament arrives via the context.
pub trait DecisionPolicy: Send {
    fn choose_action(&mut self, ctx: &BetContext, hand: &HandSolution) -> BetAction;

    fn choose_declaration(&mut self, ctx: &DeclareContext, hand: &HandSolution)
        -> DeclarationChoice;

    fn name(&self) -> &str;
}
