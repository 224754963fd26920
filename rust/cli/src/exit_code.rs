//! Process exit codes shared by every `hilo` subcommand.
//!
//! `run` maps command results onto these three values; nothing else
//! should call `process::exit` directly.

/// Clean completion.
pub const SUCCESS: i32 = 0;

/// Bad arguments, bad config, or a command failure.
pub const ERROR: i32 = 2;

/// Run cut short before finishing (128 + SIGINT).
pub const INTERRUPTED: i32 = 130;
