//! Human-readable diagnostics formatting.
//!
//! Values print with three significant digits per component:
//!
//! ```text
//! [ 1.00, 0.00, 2.00
//!   0.00, 1.00, 3.00
//!   0.00, 0.00, 1.00 ]
//! ```
//!
//! Matrices are listed row by row even though they are stored by column.
//! This form is for logs and test output only, never a machine format.

use std::fmt;

/// Significant digits used by every `Display` impl in this crate.
pub const DISPLAY_DIGITS: usize = 3;

/// Formats `value` with `digits` significant digits.
///
/// Switches to exponent notation (`1.23e+5`) when the decimal exponent is
/// below -6 or not smaller than `digits`, otherwise prints fixed-point with
/// trailing zeros kept. Ties round away from zero (`1.125` -> `1.13`).
///
/// # Example
///
/// ```rust
/// use glmat::to_precision;
///
/// assert_eq!(to_precision(1.0, 3), "1.00");
/// assert_eq!(to_precision(0.000123456, 3), "0.000123");
/// assert_eq!(to_precision(123456.0, 3), "1.23e+5");
/// ```
pub fn to_precision(value: f32, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let digits = digits.max(1);
    if value == 0.0 {
        return format!("{:.*}", digits - 1, 0.0f32);
    }

    let (kept, exp) = round_significant(value.abs(), digits);
    let sign = if value < 0.0 { "-" } else { "" };

    if exp < -6 || exp >= digits as i32 {
        let exp_sign = if exp < 0 { '-' } else { '+' };
        let (lead, rest) = kept.split_at(1);
        let point = if rest.is_empty() { "" } else { "." };
        format!("{sign}{lead}{point}{rest}e{exp_sign}{}", exp.unsigned_abs())
    } else if exp < 0 {
        let zeros = "0".repeat(exp.unsigned_abs() as usize - 1);
        format!("{sign}0.{zeros}{kept}")
    } else {
        let (int, frac) = kept.split_at(exp as usize + 1);
        let point = if frac.is_empty() { "" } else { "." };
        format!("{sign}{int}{point}{frac}")
    }
}

/// Enough fraction digits to print any finite `f32` exactly.
const EXACT_DIGITS: usize = 120;

/// Rounds a positive `value` to `digits` significant digits, ties away
/// from zero. Returns the digit string and the decimal exponent of its
/// first digit.
fn round_significant(value: f32, digits: usize) -> (String, i32) {
    let exact = format!("{:.*e}", EXACT_DIGITS, value);
    let (mantissa, mut exp) = match exact.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (exact.as_str(), 0),
    };

    let all: Vec<u8> = mantissa.bytes().filter(u8::is_ascii_digit).collect();
    let mut kept = all[..digits.min(all.len())].to_vec();
    kept.resize(digits, b'0');

    if all.get(digits).is_some_and(|&d| d >= b'5') {
        // Carry through trailing nines; 9.996 -> 10.0 shifts the exponent.
        match kept.iter().rposition(|&d| d != b'9') {
            Some(i) => {
                kept[i] += 1;
                kept[i + 1..].fill(b'0');
            }
            None => {
                kept.fill(b'0');
                kept[0] = b'1';
                exp += 1;
            }
        }
    }

    (String::from_utf8_lossy(&kept).into_owned(), exp)
}

/// Writes `[ a, b, c ]`.
pub(crate) fn write_vector(f: &mut fmt::Formatter<'_>, values: &[f32]) -> fmt::Result {
    f.write_str("[")?;
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, " {}", to_precision(*v, DISPLAY_DIGITS))?;
    }
    f.write_str(" ]")
}

/// Writes an `n x n` column-major matrix row by row.
pub(crate) fn write_matrix(f: &mut fmt::Formatter<'_>, n: usize, values: &[f32]) -> fmt::Result {
    f.write_str("[")?;
    for row in 0..n {
        if row > 0 {
            f.write_str("\n ")?;
        }
        for col in 0..n {
            if col > 0 {
                f.write_str(",")?;
            }
            write!(f, " {}", to_precision(values[row + col * n], DISPLAY_DIGITS))?;
        }
    }
    f.write_str(" ]")
}
