//! Subcommand implementations
//!
//! Each runner writes to a caller-supplied writer so the shell can be
//! exercised without a terminal.

use std::io::{BufRead, Write};

use keycalc::prelude::*;
use tracing::{debug, info};

use crate::error::{CliError, CliResult};
use crate::output::Printer;

/// Evaluates one expression and prints the formatted result
pub fn run_eval<W: Write>(
    calc: &Calculator,
    expression: &str,
    printer: &Printer,
    out: &mut W,
) -> CliResult<()> {
    debug!(%expression, "eval");
    let result = calc.evaluate_expression(expression)?;
    writeln!(out, "{}", printer.result(&result))?;
    Ok(())
}

/// Feeds a key sequence and prints the resulting display
///
/// An error raised by the sequence is returned after the display is
/// printed.
pub fn run_keys<W: Write>(
    calc: &mut Calculator,
    sequence: &str,
    json: bool,
    printer: &Printer,
    out: &mut W,
) -> CliResult<()> {
    let outcome = calc.type_keys(sequence);
    if json {
        serde_json::to_writer(&mut *out, &outcome.display)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", printer.display(&outcome.display))?;
    }
    match outcome.error {
        Some(e) => Err(CliError::Calc(e)),
        None => Ok(()),
    }
}

/// Reads key sequences line by line until EOF or `:q`
///
/// Errors are shown as their modal message and do not end the session.
pub fn run_repl<R: BufRead, W: Write>(
    calc: &mut Calculator,
    input: R,
    prompt: Option<&str>,
    printer: &Printer,
    out: &mut W,
) -> CliResult<()> {
    info!(variant = %calc.config().variant, "repl started");
    write_prompt(prompt, out)?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        match line {
            ":q" | ":quit" => break,
            ":help" => writeln!(out, "{}", help_text())?,
            "" => {}
            _ => {
                let outcome = calc.type_keys(line);
                if let Some(message) = outcome.message() {
                    writeln!(out, "{}", printer.error(message))?;
                }
                writeln!(out, "{}", printer.display(&outcome.display))?;
            }
        }
        write_prompt(prompt, out)?;
    }

    out.flush()?;
    Ok(())
}

fn write_prompt<W: Write>(prompt: Option<&str>, out: &mut W) -> CliResult<()> {
    if let Some(prompt) = prompt {
        write!(out, "{prompt}")?;
        out.flush()?;
    }
    Ok(())
}

fn help_text() -> &'static str {
    "keys: 0-9 . + - * / % ( ) =  c clear  e CE  n ±  r √  backspace/DEL ⌫\n\
     commands: :help  :q"
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use keycalc::config::Variant;

    fn plain() -> Printer {
        Printer::new(false)
    }

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    // ===== eval =====

    #[test]
    fn test_eval_prints_result() {
        let mut out = Vec::new();
        run_eval(&Calculator::default(), "2 + 3 × 4", &plain(), &mut out).unwrap();
        assert_eq!(output(out), "14\n");
    }

    #[test]
    fn test_eval_error() {
        let mut out = Vec::new();
        let err = run_eval(&Calculator::default(), "1/0", &plain(), &mut out).unwrap_err();
        assert_eq!(err.to_string(), "Cannot divide by zero!");
        assert!(out.is_empty());
    }

    #[test]
    fn test_eval_precision() {
        let calc = Calculator::new(CalcConfig::new().with_precision(2));
        let mut out = Vec::new();
        run_eval(&calc, "2/3", &plain(), &mut out).unwrap();
        assert_eq!(output(out), "0.67\n");
    }

    // ===== keys =====

    #[test]
    fn test_keys_prints_display() {
        let mut out = Vec::new();
        run_keys(&mut Calculator::default(), "12+3", false, &plain(), &mut out).unwrap();
        assert_eq!(output(out), "12 + 3\n3\n");
    }

    #[test]
    fn test_keys_json() {
        let mut out = Vec::new();
        run_keys(&mut Calculator::default(), "6*7=", true, &plain(), &mut out).unwrap();
        let display: DisplayState = serde_json::from_str(output(out).trim()).unwrap();
        assert_eq!(display.main_text, "42");
    }

    #[test]
    fn test_keys_error_after_display() {
        let mut out = Vec::new();
        let err = run_keys(&mut Calculator::default(), "1nr", false, &plain(), &mut out)
            .unwrap_err();
        assert!(matches!(err, CliError::Calc(CalcError::DomainError(_))));
        assert_eq!(output(out), "Error\n");
    }

    // ===== repl =====

    #[test]
    fn test_repl_lines_share_state() {
        let mut calc = Calculator::default();
        let mut out = Vec::new();
        run_repl(&mut calc, "2+\n3=\n".as_bytes(), None, &plain(), &mut out).unwrap();
        assert_eq!(output(out), "2 +\n2\n5\n5\n");
    }

    #[test]
    fn test_repl_reports_errors_and_continues() {
        let mut calc = Calculator::default();
        let mut out = Vec::new();
        run_repl(&mut calc, "5/0=\n4\n".as_bytes(), None, &plain(), &mut out).unwrap();
        let text = output(out);
        assert!(text.contains("! Cannot divide by zero!\nError\n"));
        assert!(text.ends_with("4\n4\n"));
    }

    #[test]
    fn test_repl_quit_and_prompt() {
        let mut calc = Calculator::default();
        let mut out = Vec::new();
        run_repl(&mut calc, ":q\n9\n".as_bytes(), Some("> "), &plain(), &mut out).unwrap();
        assert_eq!(output(out), "> ");
        assert_eq!(calc.display().main_text, "0");
    }

    #[test]
    fn test_repl_help() {
        let mut out = Vec::new();
        run_repl(
            &mut Calculator::default(),
            ":help\n".as_bytes(),
            None,
            &plain(),
            &mut out,
        )
        .unwrap();
        assert!(output(out).contains(":q"));
    }

    #[test]
    fn test_repl_basic_variant() {
        let mut calc = Calculator::new(CalcConfig::new().with_variant(Variant::Basic));
        let mut out = Vec::new();
        run_repl(&mut calc, "9r\n".as_bytes(), None, &plain(), &mut out).unwrap();
        assert_eq!(output(out), "9\n9\n");
    }
}
