//! Tier/EV wagering policy.
//!
//! Classifies each side of a solved hand into quality tiers, estimates
//! win probability from the tier and the field, compares expected value
//! across declarable sides, and picks an action from a tier-keyed table.
//! Personality knobs shift the thresholds (`risk`) and scale evaluation
//! noise (`carelessness`); all randomness comes from an injected seeded
//! RNG so games replay exactly.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use hilo_engine::game::Phase;
use hilo_engine::player::Declaration;
use hilo_engine::policy::{
    BetAction, BetContext, DecisionPolicy, DeclarationChoice, DeclareContext,
};
use hilo_engine::solver::HandSolution;

/// Hand-quality bucket for one side, from distance to that side's target.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum Tier {
    Junk,
    Weak,
    Decent,
    Strong,
    Elite,
}

/// LOW-side tier thresholds: elite / strong / decent / weak. LOW (target
/// 1) is easier to hit precisely, so these are tight; HIGH thresholds are
/// the same values scaled by [`HIGH_LENIENCY_FACTOR`].
const LOW_THRESHOLDS: [f64; 4] = [0.05, 0.17, 0.5, 1.0];
/// HIGH's achievable range is much wider than LOW's.
pub const HIGH_LENIENCY_FACTOR: f64 = 4.0;

/// Hard cap on any estimated win probability.
const MAX_WIN_PROBABILITY: f64 = 0.95;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Side {
    Low,
    High,
}

/// Classify a (possibly noise-perturbed) distance-to-target into a tier.
pub fn classify(diff: f64, leniency: f64) -> Tier {
    if diff <= LOW_THRESHOLDS[0] * leniency {
        Tier::Elite
    } else if diff <= LOW_THRESHOLDS[1] * leniency {
        Tier::Strong
    } else if diff <= LOW_THRESHOLDS[2] * leniency {
        Tier::Decent
    } else if diff <= LOW_THRESHOLDS[3] * leniency {
        Tier::Weak
    } else {
        Tier::Junk
    }
}

fn tier_base_probability(tier: Tier) -> f64 {
    match tier {
        Tier::Elite => 0.85,
        Tier::Strong => 0.65,
        Tier::Decent => 0.45,
        Tier::Weak => 0.25,
        Tier::Junk => 0.10,
    }
}

/// Win probability for one side. Half of the remaining opponents (rounded
/// up, minimum one) are assumed to contest each side; every contestant
/// beyond the first multiplies the tier's base probability by 0.75.
/// An uncontested side is worth 0.95.
pub fn win_probability(tier: Tier, active_opponents: usize) -> f64 {
    if active_opponents == 0 {
        return MAX_WIN_PROBABILITY;
    }
    let contesting = (active_opponents.div_ceil(2)).max(1);
    let p = tier_base_probability(tier) * 0.75f64.powi(contesting as i32 - 1);
    p.clamp(0.0, MAX_WIN_PROBABILITY)
}

/// Expected value of contesting for `pot_share` at probability `p`
/// against `cost` to call. Inputs are pre-clamped so this cannot produce
/// NaN.
fn expected_value(p: f64, pot_share: f64, cost: f64) -> f64 {
    p * pot_share - (1.0 - p) * cost
}

/// Tier/EV decision policy with an injected RNG. One instance serves all
/// AI seats; per-seat temperament arrives via the context.
pub struct TierPolicy {
    rng: ChaCha20Rng,
}

impl TierPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Multiplicative evaluation noise: carelessness 0.4..0.6 scales the
    /// amplitude, so a careless seat misjudges its hand by up to ~24%.
    fn perturb_diff(&mut self, diff: f64, carelessness: f64, enabled: bool) -> f64 {
        if !enabled {
            return diff;
        }
        let amplitude = carelessness * 0.4;
        let factor = 1.0 + (self.rng.random::<f64>() * 2.0 - 1.0) * amplitude;
        (diff * factor).max(0.0)
    }

    fn roll(&mut self, carelessness: f64, enabled: bool) -> f64 {
        let r = self.rng.random::<f64>();
        if !enabled {
            return r;
        }
        let skew = (self.rng.random::<f64>() - 0.5) * carelessness * 0.2;
        (r + skew).clamp(0.0, 1.0)
    }

    /// Tier-dependent raise size: a fraction of the pot, quantized to the
    /// min bet, bounded by the stack and the room left under the cap.
    /// Returns `None` when no legal raise fits (degrade to call).
    fn size_raise(tier: Tier, ctx: &BetContext) -> Option<u32> {
        let fraction = match tier {
            Tier::Elite => 0.5,
            _ => 0.25,
        };
        let raw = (ctx.pot as f64 * fraction) as u32;
        let raise = (raw / ctx.min_bet).max(1) * ctx.min_bet;
        let headroom = ctx.betting_cap.saturating_sub(ctx.total_wagered);
        if ctx.chips >= ctx.to_call + raise && ctx.to_call + raise <= headroom {
            Some(raise)
        } else {
            None
        }
    }

    fn classify_sides(
        &mut self,
        hand: &HandSolution,
        carelessness: f64,
        enabled: bool,
    ) -> (Tier, Tier) {
        let low_diff = self.perturb_diff(hand.low.diff, carelessness, enabled);
        let high_diff = self.perturb_diff(hand.high.diff, carelessness, enabled);
        (
            classify(low_diff, 1.0),
            classify(high_diff, HIGH_LENIENCY_FACTOR),
        )
    }
}

impl DecisionPolicy for TierPolicy {
    fn choose_action(&mut self, ctx: &BetContext, hand: &HandSolution) -> BetAction {
        let personality = ctx.personality;
        let (low_tier, high_tier) =
            self.classify_sides(hand, personality.carelessness, ctx.mistakes_enabled);

        let opponents = ctx.active_opponents;
        let p_low = win_probability(low_tier, opponents);
        let p_high = win_probability(high_tier, opponents);
        let cost = ctx.to_call as f64;
        let half_pot = ctx.pot as f64 / 2.0;
        let ev_low = expected_value(p_low, half_pot, cost);
        let ev_high = expected_value(p_high, half_pot, cost);

        let (tier, ev) = if ev_low >= ev_high {
            (low_tier, ev_low)
        } else {
            (high_tier, ev_high)
        };

        let to_call = ctx.to_call;
        let cost_ratio = cost / (ctx.chips as f64 + 0.1);
        let speculative = ctx.phase == Phase::Round1;
        // risk 0.4..0.6 shifts the randomness thresholds around neutral
        let shift = personality.risk - 0.5;
        let roll = self.roll(personality.carelessness, ctx.mistakes_enabled);

        let raise = |policy_roll: f64, threshold: f64| -> Option<BetAction> {
            if !ctx.has_raised_this_round && policy_roll > threshold - shift {
                Self::size_raise(tier, ctx).map(BetAction::Raise)
            } else {
                None
            }
        };

        match tier {
            Tier::Elite => {
                if let Some(action) = raise(roll, 0.3) {
                    return action;
                }
                BetAction::Call
            }
            Tier::Strong => {
                if let Some(action) = raise(roll, 0.9) {
                    return action;
                }
                if to_call == 0 {
                    BetAction::Check
                } else if cost_ratio < 0.15 {
                    BetAction::Call
                } else if cost_ratio < 0.3 {
                    if roll > 0.2 - shift {
                        BetAction::Call
                    } else {
                        BetAction::Fold
                    }
                } else if ev > 0.0 && roll > 0.5 - shift {
                    BetAction::Call
                } else {
                    BetAction::Fold
                }
            }
            Tier::Decent => {
                if to_call == 0 {
                    BetAction::Check
                } else if speculative && cost_ratio < 0.15 {
                    // Round 1: the 4th card can still improve the hand.
                    BetAction::Call
                } else if !speculative && cost_ratio < 0.08 {
                    BetAction::Call
                } else if ev > 0.0 && cost_ratio < 0.2 {
                    BetAction::Call
                } else {
                    BetAction::Fold
                }
            }
            Tier::Weak => {
                if to_call == 0 {
                    BetAction::Check
                } else if roll > 0.95 - shift && cost_ratio < 0.05 {
                    BetAction::Call
                } else {
                    BetAction::Fold
                }
            }
            Tier::Junk => {
                if to_call == 0 {
                    BetAction::Check
                } else {
                    BetAction::Fold
                }
            }
        }
    }

    fn choose_declaration(
        &mut self,
        ctx: &DeclareContext,
        hand: &HandSolution,
    ) -> DeclarationChoice {
        let personality = ctx.personality;
        let (low_tier, high_tier) =
            self.classify_sides(hand, personality.carelessness, ctx.mistakes_enabled);

        let p_low = win_probability(low_tier, ctx.active_opponents);
        let p_high = win_probability(high_tier, ctx.active_opponents);
        let half_pot = ctx.pot as f64 / 2.0;
        // Declaring is free: no call cost enters the EV.
        let ev_low = expected_value(p_low, half_pot, 0.0);
        let ev_high = expected_value(p_high, half_pot, 0.0);

        // SWING must win both sides; both must be at least Strong even
        // when the joint EV looks good.
        let swing_ok = low_tier >= Tier::Strong && high_tier >= Tier::Strong;
        let ev_swing = if swing_ok {
            expected_value((p_low * p_high).clamp(0.0, MAX_WIN_PROBABILITY), ctx.pot as f64, 0.0)
        } else {
            f64::NEG_INFINITY
        };

        if swing_ok && ev_swing > ev_low && ev_swing > ev_high {
            return DeclarationChoice {
                declaration: Declaration::Swing,
                result: hand.low.result,
                low_result: Some(hand.low.result),
                high_result: Some(hand.high.result),
                equation: format!("{} | {}", hand.low.equation, hand.high.equation),
            };
        }

        if ev_low >= ev_high {
            DeclarationChoice {
                declaration: Declaration::Low,
                result: hand.low.result,
                low_result: None,
                high_result: None,
                equation: hand.low.equation.clone(),
            }
        } else {
            DeclarationChoice {
                declaration: Declaration::High,
                result: hand.high.result,
                low_result: None,
                high_result: None,
                equation: hand.high.equation.clone(),
            }
        }
    }

    fn name(&self) -> &str {
        "TierPolicy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hilo_engine::player::Personality;
    use hilo_engine::solver::Solution;

    fn solution(low_diff: f64, high_diff: f64) -> HandSolution {
        HandSolution {
            low: Solution {
                result: 1.0 + low_diff,
                diff: low_diff,
                equation: "1 + 0".to_string(),
            },
            high: Solution {
                result: 20.0 - high_diff,
                diff: high_diff,
                equation: "10 + 10".to_string(),
            },
        }
    }

    fn bet_ctx(to_call: u32, pot: u32) -> BetContext {
        BetContext {
            phase: Phase::Round2,
            pot,
            to_call,
            chips: 500,
            total_wagered: 10,
            betting_cap: 500,
            min_bet: 10,
            has_raised_this_round: false,
            active_opponents: 2,
            personality: Personality::neutral(),
            mistakes_enabled: false,
        }
    }

    #[test]
    fn tiers_follow_thresholds() {
        assert_eq!(classify(0.04, 1.0), Tier::Elite);
        assert_eq!(classify(0.1, 1.0), Tier::Strong);
        assert_eq!(classify(0.3, 1.0), Tier::Decent);
        assert_eq!(classify(0.8, 1.0), Tier::Weak);
        assert_eq!(classify(1.5, 1.0), Tier::Junk);
        // HIGH is 4x more lenient
        assert_eq!(classify(0.19, HIGH_LENIENCY_FACTOR), Tier::Elite);
        assert_eq!(classify(1.9, HIGH_LENIENCY_FACTOR), Tier::Decent);
    }

    #[test]
    fn win_probability_is_clamped_and_decays_with_field() {
        assert_eq!(win_probability(Tier::Elite, 0), 0.95);
        let heads_up = win_probability(Tier::Elite, 1);
        let crowded = win_probability(Tier::Elite, 6);
        assert!(heads_up <= 0.95);
        assert!(crowded < heads_up);
        assert!(win_probability(Tier::Junk, 8) >= 0.0);
    }

    #[test]
    fn junk_checks_free_and_folds_to_bets() {
        let mut policy = TierPolicy::new(7);
        let junk = solution(5.0, 30.0);
        assert_eq!(policy.choose_action(&bet_ctx(0, 40), &junk), BetAction::Check);
        assert_eq!(policy.choose_action(&bet_ctx(20, 40), &junk), BetAction::Fold);
    }

    #[test]
    fn elite_never_folds() {
        let mut policy = TierPolicy::new(11);
        let elite = solution(0.0, 0.1);
        for _ in 0..50 {
            let action = policy.choose_action(&bet_ctx(30, 100), &elite);
            assert!(
                !matches!(action, BetAction::Fold),
                "elite hand folded: {:?}",
                action
            );
        }
    }

    #[test]
    fn raises_stay_under_stack_and_cap() {
        let mut policy = TierPolicy::new(3);
        let elite = solution(0.0, 0.1);
        let mut ctx = bet_ctx(0, 400);
        ctx.chips = 60;
        ctx.total_wagered = 460;
        ctx.betting_cap = 500;
        for _ in 0..50 {
            match policy.choose_action(&ctx, &elite) {
                BetAction::Raise(amount) => {
                    assert!(amount <= ctx.chips);
                    assert!(ctx.to_call + amount <= ctx.betting_cap - ctx.total_wagered);
                }
                BetAction::Call | BetAction::Check => {}
                other => panic!("unexpected action {:?}", other),
            }
        }
    }

    #[test]
    fn swing_requires_both_sides_strong() {
        let mut policy = TierPolicy::new(5);
        let ctx = DeclareContext {
            pot: 200,
            active_opponents: 1,
            personality: Personality::neutral(),
            mistakes_enabled: false,
        };
        // LOW elite, HIGH junk: swing must not be declared
        let lopsided = solution(0.0, 30.0);
        let choice = policy.choose_declaration(&ctx, &lopsided);
        assert_eq!(choice.declaration, Declaration::Low);

        // both sides elite: swing is the +EV play
        let monster = solution(0.0, 0.0);
        let choice = policy.choose_declaration(&ctx, &monster);
        assert_eq!(choice.declaration, Declaration::Swing);
        assert!(choice.low_result.is_some() && choice.high_result.is_some());
    }

    #[test]
    fn declaration_prefers_the_closer_side() {
        let mut policy = TierPolicy::new(9);
        let ctx = DeclareContext {
            pot: 100,
            active_opponents: 2,
            personality: Personality::neutral(),
            mistakes_enabled: false,
        };
        let high_leaning = solution(2.0, 0.1);
        let choice = policy.choose_declaration(&ctx, &high_leaning);
        assert_eq!(choice.declaration, Declaration::High);
        assert!((choice.result - 19.9).abs() < 1e-9);
    }
}
