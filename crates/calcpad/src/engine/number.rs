//! Operand parsing, result rounding and result formatting
//!
//! Operands travel as text. These helpers are the only place where text
//! becomes an `f64` and back.

use super::{CalcError, CalcResult};

/// Decimal places kept when rounding a computed result
pub const DEFAULT_PRECISION: u32 = 8;

/// Largest precision accepted by [`round_to`] callers
pub const MAX_PRECISION: u32 = 15;

/// Parses operand text into a number.
///
/// Surrounding whitespace and a dangling exponent marker (`e`, `e+`, `e-`)
/// are ignored, which keeps half-deleted results such as `1.5e+` usable.
/// Empty text, stray letters and `NaN` are rejected.
pub fn parse_operand(text: &str) -> CalcResult<f64> {
    let invalid = || CalcError::InvalidOperand(text.to_string());

    let mut candidate = text.trim();
    if let Some(rest) = candidate.strip_suffix(['+', '-']) {
        if rest.ends_with(['e', 'E']) {
            candidate = rest;
        }
    }
    if !matches!(candidate, "Infinity" | "+Infinity" | "-Infinity") {
        candidate = candidate.strip_suffix(['e', 'E']).unwrap_or(candidate);
        if candidate
            .chars()
            .any(|c| c.is_alphabetic() && !matches!(c, 'e' | 'E'))
        {
            return Err(invalid());
        }
    }

    match candidate.parse::<f64>() {
        Ok(value) if !value.is_nan() => Ok(value),
        _ => Err(invalid()),
    }
}

/// Rounds to `places` decimal places.
///
/// Scales by `10^places`, rounds to the nearest integer with ties toward
/// positive infinity, then scales back. Non-finite values pass through.
#[must_use]
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return scaled / factor;
    }
    let floor = scaled.floor();
    let rounded = if scaled - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    };
    rounded / factor
}

/// Renders a number as its canonical shortest decimal text.
///
/// Integers carry no fractional part, negative zero renders as `0`, and
/// magnitudes at or above `1e21` or below `1e-6` use exponent form with an
/// explicit sign (`1e+21`, `5e-7`).
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{value}");
    }

    let exp = format!("{value:e}");
    match exp.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => exp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ===== parse_operand =====

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_operand("42"), Ok(42.0));
        assert_eq!(parse_operand("0.25"), Ok(0.25));
        assert_eq!(parse_operand("-7"), Ok(-7.0));
    }

    #[test]
    fn test_parse_trailing_decimal_point() {
        assert_eq!(parse_operand("5."), Ok(5.0));
        assert_eq!(parse_operand("0."), Ok(0.0));
    }

    #[test]
    fn test_parse_exponent_forms() {
        assert_eq!(parse_operand("1e+21"), Ok(1e21));
        assert_eq!(parse_operand("5e-7"), Ok(5e-7));
        assert_eq!(parse_operand("1.5e+"), Ok(1.5));
        assert_eq!(parse_operand("1.5e"), Ok(1.5));
    }

    #[test]
    fn test_parse_infinity() {
        assert_eq!(parse_operand("Infinity"), Ok(f64::INFINITY));
        assert_eq!(parse_operand("-Infinity"), Ok(f64::NEG_INFINITY));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(parse_operand(""), Err(CalcError::InvalidOperand(_))));
        assert!(parse_operand("-").is_err());
        assert!(parse_operand("NaN").is_err());
        assert!(parse_operand("Error").is_err());
        assert!(parse_operand("Infinit").is_err());
        assert!(parse_operand("inf").is_err());
    }

    #[test]
    fn test_parse_error_carries_text() {
        assert_eq!(
            parse_operand("abc"),
            Err(CalcError::InvalidOperand("abc".to_string()))
        );
    }

    // ===== round_to =====

    #[test]
    fn test_round_removes_binary_noise() {
        assert_eq!(round_to(0.1 + 0.2, DEFAULT_PRECISION), 0.3);
        assert_eq!(round_to(10.0 / 3.0, DEFAULT_PRECISION), 3.333_333_33);
    }

    #[test]
    fn test_round_ties_toward_positive_infinity() {
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-2.5, 0), -2.0);
        assert_eq!(round_to(-2.6, 0), -3.0);
    }

    #[test]
    fn test_round_tiny_values_vanish() {
        assert_eq!(round_to(1e-12, DEFAULT_PRECISION), 0.0);
    }

    #[test]
    fn test_round_passes_through_non_finite() {
        assert_eq!(round_to(f64::INFINITY, DEFAULT_PRECISION), f64::INFINITY);
        assert!(round_to(f64::NAN, DEFAULT_PRECISION).is_nan());
        assert_eq!(round_to(1e305, DEFAULT_PRECISION), f64::INFINITY);
    }

    // ===== format_number =====

    #[test]
    fn test_format_integers() {
        assert_eq!(format_number(8.0), "8");
        assert_eq!(format_number(-20.0), "-20");
        assert_eq!(format_number(1e20), "100000000000000000000");
    }

    #[test]
    fn test_format_fractions() {
        assert_eq!(format_number(0.3), "0.3");
        assert_eq!(format_number(3.333_333_33), "3.33333333");
        assert_eq!(format_number(0.000_001), "0.000001");
    }

    #[test]
    fn test_format_negative_zero() {
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_format_exponent_forms() {
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1.5e22), "1.5e+22");
        assert_eq!(format_number(5e-7), "5e-7");
        assert_eq!(format_number(-2e-8), "-2e-8");
    }

    #[test]
    fn test_format_special_values() {
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    proptest! {
        #[test]
        fn prop_formatted_integers_parse_back(n in -1_000_000_000i64..1_000_000_000) {
            let text = format_number(n as f64);
            prop_assert_eq!(parse_operand(&text), Ok(n as f64));
        }

        #[test]
        fn prop_rounding_is_idempotent(x in -1e6f64..1e6) {
            let once = round_to(x, DEFAULT_PRECISION);
            prop_assert_eq!(round_to(once, DEFAULT_PRECISION), once);
        }
    }
}
