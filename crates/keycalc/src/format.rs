//! Operator glyphs for the expression line and result formatting

use crate::core::Operation;

/// Decimal places results are rounded to unless configured otherwise
pub const DEFAULT_PRECISION: usize = 8;

/// Largest precision accepted by [`format_number`]
pub const MAX_PRECISION: usize = 15;

/// Replaces canonical operators (`* / -`) with display glyphs (`× ÷ −`)
#[must_use]
pub fn to_display(canonical: &str) -> String {
    canonical
        .chars()
        .map(|c| Operation::from_char(c).map_or(c, |op| op.glyph()))
        .collect()
}

/// Formats a result for display
///
/// Integer-valued results lose their decimal point, everything else is
/// rounded to `precision` places with insignificant zeros trimmed.
#[must_use]
pub fn format_number(value: f64, precision: usize) -> String {
    let formatted = if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        let rounded = format!("{:.*}", precision.min(MAX_PRECISION), value);
        if rounded.contains('.') {
            rounded
                .trim_end_matches('0')
                .trim_end_matches('.')
                .to_string()
        } else {
            rounded
        }
    };

    // -0.0 and tiny negatives rounded away
    if formatted == "-0" {
        "0".to_string()
    } else {
        formatted
    }
}

/// Formats a result with [`DEFAULT_PRECISION`]
#[must_use]
pub fn format_result(value: f64) -> String {
    format_number(value, DEFAULT_PRECISION)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== Glyph tests =====

    #[test]
    fn test_to_display() {
        assert_eq!(to_display("2*3/4-1+5%2"), "2×3÷4−1+5%2");
    }

    #[test]
    fn test_to_display_keeps_digits_and_parens() {
        assert_eq!(to_display("(12.5+3)"), "(12.5+3)");
        assert_eq!(to_display(""), "");
    }

    // ===== Number formatting tests =====

    #[test]
    fn test_integer_collapse() {
        assert_eq!(format_result(6.0), "6");
        assert_eq!(format_result(-42.0), "-42");
        assert_eq!(format_result(1e20), "100000000000000000000");
    }

    #[test]
    fn test_negative_zero() {
        assert_eq!(format_result(-0.0), "0");
        assert_eq!(format_result(-0.000_000_000_1), "0");
    }

    #[test]
    fn test_rounding_to_eight_places() {
        assert_eq!(format_result(1.0 / 3.0), "0.33333333");
        assert_eq!(format_result(2.0 / 3.0), "0.66666667");
        assert_eq!(format_result(0.1 + 0.2), "0.3");
    }

    #[test]
    fn test_trailing_zeros_trimmed() {
        assert_eq!(format_result(2.5), "2.5");
        assert_eq!(format_result(-0.125), "-0.125");
    }

    #[test]
    fn test_rounds_up_to_integer() {
        assert_eq!(format_result(1.999_999_999_9), "2");
    }

    #[test]
    fn test_custom_precision() {
        assert_eq!(format_number(1.0 / 3.0, 2), "0.33");
        assert_eq!(format_number(2.4, 0), "2");
        assert_eq!(format_number(0.123_456_789_012_345_67, 40), "0.123456789012346");
    }
}
