//! # Hi-Lo CLI Library
//!
//! Command-line interface for the Equation Hi-Lo engine. Exposes
//! subcommands for playing interactive games, running headless
//! simulations, solving hands, and inspecting configuration.
//!
//! The primary entry point is the [`run`] function, which parses
//! command-line arguments and executes the appropriate subcommand.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["hilo", "solve", "--cards", "9,3,2"];
//! let code = hilo_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```

use std::io::Write;

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod ui;

use cli::{HiloCli, Commands};
use clap::Parser;
use commands::{handle_cfg_command, handle_play_command, handle_sim_command, handle_solve_command};

pub use error::CliError;

/// Main entry point for the CLI application.
///
/// Parses command-line arguments and dispatches to the appropriate
/// subcommand handler.
///
/// # Arguments
///
/// * `args` - Iterator over command-line arguments (typically `std::env::args()`)
/// * `out` - Output stream for normal output (typically `stdout`)
/// * `err` - Output stream for error messages (typically `stderr`)
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` for interruptions
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    const COMMANDS: &[&str] = &["play", "sim", "solve", "cfg"];
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let parsed = HiloCli::try_parse_from(&argv);
    match parsed {
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    if writeln!(err, "{}", e).is_err()
                        || writeln!(err).is_err()
                        || writeln!(err, "Equation Hi-Lo CLI").is_err()
                        || writeln!(err, "Usage: hilo <command> [options]\n").is_err()
                        || writeln!(err, "Commands:").is_err()
                    {
                        return exit_code::ERROR;
                    }
                    for c in COMMANDS {
                        if writeln!(err, "  {}", c).is_err() {
                            return exit_code::ERROR;
                        }
                    }
                    if writeln!(err, "\nFor full help, run: hilo --help").is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::ERROR
                }
            }
        }
        Ok(cli) => match cli.cmd {
            Commands::Cfg => match handle_cfg_command(out, err) {
                Ok(()) => exit_code::SUCCESS,
                Err(e) => {
                    if writeln!(err, "Error: {}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::ERROR
                }
            },
            Commands::Play {
                ai,
                rounds,
                seed,
                no_mistakes,
            } => {
                // Use stdin for real input (supports both TTY and piped stdin)
                let stdin = std::io::stdin();
                let mut stdin_lock = stdin.lock();
                match handle_play_command(ai, rounds, seed, no_mistakes, out, err, &mut stdin_lock)
                {
                    Ok(()) => exit_code::SUCCESS,
                    Err(CliError::Interrupted(_)) => exit_code::INTERRUPTED,
                    Err(e) => {
                        if writeln!(err, "Error: {}", e).is_err() {
                            return exit_code::ERROR;
                        }
                        exit_code::ERROR
                    }
                }
            }
            Commands::Sim { games, seed, out: output } => {
                match handle_sim_command(games, seed, output, out, err) {
                    Ok(()) => exit_code::SUCCESS,
                    Err(CliError::Interrupted(_)) => exit_code::INTERRUPTED,
                    Err(e) => {
                        if writeln!(err, "Error: {}", e).is_err() {
                            return exit_code::ERROR;
                        }
                        exit_code::ERROR
                    }
                }
            }
            Commands::Solve { cards, ops, sqrt } => {
                match handle_solve_command(&cards, ops.as_deref(), sqrt, out) {
                    Ok(()) => exit_code::SUCCESS,
                    Err(e) => {
                        if writeln!(err, "Error: {}", e).is_err() {
                            return exit_code::ERROR;
                        }
                        exit_code::ERROR
                    }
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_all_subcommands() {
        let commands = vec![
            vec!["hilo", "cfg"],
            vec!["hilo", "play", "--ai", "2", "--seed", "7"],
            vec!["hilo", "sim", "--games", "3"],
            vec!["hilo", "solve", "--cards", "9,3,2", "--sqrt", "1"],
        ];
        for cmd_args in commands {
            let result = HiloCli::try_parse_from(&cmd_args);
            assert!(result.is_ok(), "Failed to parse: {:?}", cmd_args);
        }
    }

    #[test]
    fn unknown_subcommand_exits_with_error() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(vec!["hilo", "frobnicate"], &mut out, &mut err);
        assert_eq!(code, exit_code::ERROR);
        let msg = String::from_utf8(err).unwrap();
        assert!(msg.contains("Usage: hilo"));
    }

    #[test]
    fn help_prints_to_stdout_and_exits_zero() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(vec!["hilo", "--help"], &mut out, &mut err);
        assert_eq!(code, exit_code::SUCCESS);
        assert!(!out.is_empty());
    }

    #[test]
    fn solve_command_dispatch() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(
            vec!["hilo", "solve", "--cards", "9,3,2"],
            &mut out,
            &mut err,
        );
        assert_eq!(code, exit_code::SUCCESS);
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("LOW"));
        assert!(output.contains("HIGH"));
    }
}
