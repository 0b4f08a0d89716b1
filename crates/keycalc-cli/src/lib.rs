//! keycalc CLI library
//!
//! Terminal shell for the keycalc keypad calculator.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

mod commands;
mod config;
mod error;
pub mod logging;
mod output;
pub mod runner;

pub use commands::{Cli, ColorArg, Commands, EvalArgs, KeysArgs, ReplArgs, VariantArg};
pub use config::{load_calc_config, CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::Printer;
pub use runner::{run_eval, run_keys, run_repl};
