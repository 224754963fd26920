//! # hilo-engine: Equation Hi-Lo Rules Engine
//!
//! A deterministic rules engine for the four-phase Equation Hi-Lo card
//! game: players build arithmetic equations from dealt cards targeting a
//! result close to 1 (LOW) or 20 (HIGH), while an ante, two betting
//! rounds, and a showdown decide who contests the pot. One human plays
//! against simulated opponents in a single process; all state is
//! in-memory and every shuffle and AI roll runs off seeded ChaCha20 RNG
//! for reproducible games.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, CardKind, Op) and deck construction
//! - [`deck`] - Deterministic draw pile with ChaCha20 shuffling
//! - [`eval`] - Equation evaluator with precedence and SYNTAX/DIV_ZERO semantics
//! - [`solver`] - Exhaustive best-LOW/best-HIGH hand solver
//! - [`ledger`] - Betting cap enforcement and pot accounting
//! - [`game`] - Round state machine, draw protocol, and turn order
//! - [`showdown`] - LOW/HIGH winners, tiebreaks, SWING resolution, pot split
//! - [`policy`] - Decision-policy seam the AI crate implements
//! - [`player`] - Player state, operator rack, and declarations
//! - [`logger`] - Action log and JSONL round records
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use hilo_engine::cards::Op;
//! use hilo_engine::solver::solve_hand;
//!
//! // Solve a 3-card hand with the starting operator rack
//! let solution = solve_hand(&[9, 3, 2], &[Op::Add, Op::Sub, Op::Div], 0).unwrap();
//! assert!(solution.low.diff <= 1.0);
//! println!("best LOW: {} = {}", solution.low.equation, solution.low.result);
//! ```
//!
//! ## Deterministic Gameplay
//!
//! ```rust
//! use hilo_engine::deck::Deck;
//!
//! // Same seed produces same shuffle
//! let mut deck1 = Deck::new_with_seed(42);
//! let mut deck2 = Deck::new_with_seed(42);
//! deck1.shuffle();
//! deck2.shuffle();
//! assert_eq!(deck1.draw(), deck2.draw());
//! ```

pub mod cards;
pub mod deck;
pub mod errors;
pub mod eval;
pub mod game;
pub mod ledger;
pub mod logger;
pub mod player;
pub mod policy;
pub mod showdown;
pub mod solver;
