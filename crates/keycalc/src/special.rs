//! Single-operand functions applied to the entry

use crate::core::check_finite;
use crate::core::{CalcError, CalcResult};

/// Square root of `value`
///
/// Negative inputs are rejected instead of producing NaN.
pub fn sqrt(value: f64) -> CalcResult<f64> {
    if value < 0.0 {
        return Err(CalcError::DomainError(value));
    }
    check_finite(value.sqrt())
}

/// Square root of the entry text (`"16"`, `"0."`, `"-2.5"`)
pub fn apply_sqrt(entry: &str) -> CalcResult<f64> {
    let value: f64 = entry
        .trim_end_matches('.')
        .parse()
        .map_err(|_| CalcError::syntax(format!("Invalid number: '{entry}'")))?;
    sqrt(value)
}
