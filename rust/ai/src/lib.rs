//! # hilo-ai: AI Opponent Policies for Equation Hi-Lo
//!
//! Implementations of the engine's [`DecisionPolicy`] seam: wagering
//! decisions during the two betting rounds and LOW/HIGH/SWING
//! declarations at showdown.
//!
//! ## Core Components
//!
//! - [`policy::TierPolicy`] - Tier/expected-value policy with personality noise
//! - [`create_policy`] - Factory function for policies by name
//!
//! ## Quick Start
//!
//! ```rust
//! use hilo_ai::create_policy;
//! use hilo_engine::game::{Game, GameConfig};
//!
//! let policy = create_policy("tier", 42);
//! let mut game = Game::new(GameConfig::default(), policy);
//! game.init_game();
//! game.start_round().expect("round starts");
//! ```
//!
//! ## Policy Types
//!
//! Currently supported:
//! - `"tier"` - Hand-tier classification with expected-value action selection

pub use hilo_engine::policy::DecisionPolicy;

pub mod policy;

/// Create a policy by type string, seeded for reproducible rolls.
///
/// # Panics
///
/// Panics if an unknown policy type is requested. Currently only "tier"
/// is supported.
pub fn create_policy(kind: &str, seed: u64) -> Box<dyn DecisionPolicy> {
    match kind {
        "tier" => Box::new(policy::TierPolicy::new(seed)),
        _ => panic!("Unknown policy type: {}", kind),
    }
}
