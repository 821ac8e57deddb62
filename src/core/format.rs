//! Number formatting and lenient input parsing
//!
//! Results show roughly four significant digits: fixed notation for normal
//! magnitudes, scientific notation below 1e-4 or from 1e6 upward.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};

/// Display text when a conversion cannot be performed
pub const NOT_AVAILABLE: &str = "N/A";

const SIGNIFICANT_DIGITS: i32 = 4;
const SCIENTIFIC_BELOW: f64 = 1e-4;
const SCIENTIFIC_FROM: f64 = 1e6;
// Decimal keeps 28 fractional digits; below this too few significant ones survive
const DECIMAL_MIN_EXPONENT: i32 = -18;

// Leading numeric prefix, same acceptance as a lax float parse:
// "12abc" -> 12, " -3.5e2 kg" -> -350, ".5" -> 0.5
static NUMERIC_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)")
        .expect("Failed to compile numeric prefix pattern")
});

/// Format a conversion result for display.
///
/// ```
/// use convertly::core::format::format_number;
/// assert_eq!(format_number(1234.5678), "1235");
/// assert_eq!(format_number(0.00005), "5.0000e-5");
/// assert_eq!(format_number(0.0), "0");
/// ```
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() { "Infinity".to_string() } else { "-Infinity".to_string() };
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude < SCIENTIFIC_BELOW || magnitude >= SCIENTIFIC_FROM {
        return format_scientific(value);
    }

    let exponent = magnitude.log10().floor() as i32;
    let decimal_places = (SIGNIFICANT_DIGITS - exponent - 1).max(0) as u32;

    match Decimal::from_f64_retain(value) {
        Some(exact) => {
            let rounded = exact
                .round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero)
                .normalize();
            if rounded.is_zero() { "0".to_string() } else { rounded.to_string() }
        }
        None => format_fixed_lossy(value, decimal_places as usize),
    }
}

// Plain f64 rounding, only reached when the value doesn't fit a Decimal
fn format_fixed_lossy(value: f64, decimal_places: usize) -> String {
    let fixed = format!("{:.*}", decimal_places, value);

    // Reparse to drop trailing zeros ("12.50" -> "12.5", "3.000" -> "3")
    match fixed.parse::<f64>() {
        Ok(rounded) if rounded == 0.0 => "0".to_string(),
        Ok(rounded) => rounded.to_string(),
        Err(_) => fixed,
    }
}

// Four mantissa decimals with an explicitly signed exponent: "1.2346e+6", "5.0000e-5".
// Exact halves round away from zero.
fn format_scientific(value: f64) -> String {
    match decimal_scientific(value) {
        Some((mantissa, exponent)) => with_signed_exponent(&format!("{:.4}", mantissa), exponent),
        None => {
            let raw = format!("{:.4e}", value);
            let parsed = raw
                .split_once('e')
                .and_then(|(mantissa, exponent)| Some((mantissa, exponent.parse::<i32>().ok()?)));
            match parsed {
                Some((mantissa, exponent)) => with_signed_exponent(mantissa, exponent),
                None => raw.clone(),
            }
        }
    }
}

fn decimal_scientific(value: f64) -> Option<(Decimal, i32)> {
    let mut exponent = value.abs().log10().floor() as i32;
    if exponent < DECIMAL_MIN_EXPONENT {
        return None;
    }
    let exact = Decimal::from_f64_retain(value)?;
    let mut mantissa = shift_point_left(exact, exponent)?;

    // log10 can land one off next to powers of ten
    if mantissa.abs() >= Decimal::TEN {
        mantissa = shift_point_left(mantissa, 1)?;
        exponent += 1;
    } else if mantissa.abs() < Decimal::ONE {
        mantissa = shift_point_left(mantissa, -1)?;
        exponent -= 1;
    }

    let mut rounded = mantissa.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero);
    if rounded.abs() >= Decimal::TEN {
        rounded = shift_point_left(rounded, 1)?;
        exponent += 1;
    }
    Some((rounded, exponent))
}

/// Divide by 10^places without going through binary floating point
fn shift_point_left(value: Decimal, places: i32) -> Option<Decimal> {
    let scale = value.scale() as i32 + places;
    if scale >= 0 {
        Decimal::try_from_i128_with_scale(value.mantissa(), scale as u32).ok()
    } else {
        let factor = 10i128.checked_pow(scale.unsigned_abs())?;
        Decimal::try_from_i128_with_scale(value.mantissa().checked_mul(factor)?, 0).ok()
    }
}

fn with_signed_exponent(mantissa: &str, exponent: i32) -> String {
    if exponent >= 0 {
        format!("{}e+{}", mantissa, exponent)
    } else {
        format!("{}e{}", mantissa, exponent)
    }
}

/// Parse raw input text; empty or non-numeric text reads as 0.
pub fn parse_input(raw: &str) -> f64 {
    let trimmed = raw.trim_start();
    let value = NUMERIC_PREFIX
        .find(trimmed)
        .and_then(|m| parse_prefix(m.as_str()))
        .unwrap_or(0.0);

    if value.is_nan() { 0.0 } else { value }
}

fn parse_prefix(text: &str) -> Option<f64> {
    match text {
        "Infinity" | "+Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        _ => text.parse::<f64>().ok(),
    }
}
