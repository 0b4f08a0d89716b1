//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use keycalc::config::Variant;
use std::path::PathBuf;

/// keycalc: keypad calculator for the terminal
#[derive(Parser, Debug)]
#[command(name = "keycalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (only errors are logged)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Keypad variant
    #[arg(long, global = true)]
    pub variant: Option<VariantArg>,

    /// Decimal places for non-integer results (0-15)
    #[arg(long, global = true)]
    pub precision: Option<usize>,

    /// JSON calculator configuration file
    #[arg(long, global = true, env = "KEYCALC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate an expression and print the result
    Eval(EvalArgs),

    /// Feed a key sequence to the keypad and print the display
    Keys(KeysArgs),

    /// Read key sequences from stdin, one per line
    Repl(ReplArgs),
}

/// Arguments for the eval command
#[derive(Parser, Debug)]
pub struct EvalArgs {
    /// Expression, e.g. "2 + 3 × 4"
    pub expression: String,
}

/// Arguments for the keys command
#[derive(Parser, Debug)]
pub struct KeysArgs {
    /// Key sequence, e.g. "12+3=" (c clear, e CE, n ±, r √)
    pub sequence: String,

    /// Print the display as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the repl command
#[derive(Parser, Debug)]
pub struct ReplArgs {
    /// Prompt shown before each line when stdin is a terminal
    #[arg(long, default_value = "> ")]
    pub prompt: String,
}

/// Keypad variant argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VariantArg {
    /// Digits, + − × ÷, =, C, CE, ±
    Basic,
    /// Adds %, parentheses, backspace and √
    #[default]
    Extended,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Basic => Self::Basic,
            VariantArg::Extended => Self::Extended,
        }
    }
}

/// Color output argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
