//! keycalc: keypad calculator for the terminal
//!
//! ## Usage
//!
//! ```bash
//! keycalc eval "2 + 3 × 4"          # Evaluate an expression
//! keycalc keys "12+3=" --json       # Replay key presses
//! keycalc --variant basic repl      # Interactive keypad on stdin
//! ```

use clap::Parser;
use keycalc::prelude::{CalcConfig, Calculator};
use keycalc_cli::{
    load_calc_config, logging, run_eval, run_keys, run_repl, Cli, CliConfig, CliResult,
    ColorChoice, Commands, Printer, Verbosity,
};
use std::io::IsTerminal;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    // Build configuration from CLI args
    let config = build_config(&cli)?;
    logging::init(config.verbosity);

    let use_color = config.color.should_color();
    console::set_colors_enabled(use_color);
    let printer = Printer::new(use_color);

    let mut calc = Calculator::new(config.calc);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Eval(args) => run_eval(&calc, &args.expression, &printer, &mut out),
        Commands::Keys(args) => run_keys(&mut calc, &args.sequence, args.json, &printer, &mut out),
        Commands::Repl(args) => {
            let stdin = std::io::stdin();
            let prompt = stdin.is_terminal().then_some(args.prompt.as_str());
            run_repl(&mut calc, stdin.lock(), prompt, &printer, &mut out)
        }
    }
}

fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    let color: ColorChoice = cli.color.into();

    let mut calc = match &cli.config {
        Some(path) => load_calc_config(path)?,
        None => CalcConfig::default(),
    };
    if let Some(variant) = cli.variant {
        calc = calc.with_variant(variant.into());
    }
    if let Some(precision) = cli.precision {
        calc = calc.with_precision(precision);
    }

    Ok(CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(color)
        .with_calc(calc))
}
