//! Fixed-point number formatting for display.

/// Formats `value` with exactly `digits` decimals, rounding the exact binary
/// value to the nearest representation and ties away from zero.
///
/// `format!("{:.N}")` already rounds the exact value correctly but breaks
/// ties to even, so 0.125 would print as "0.12" rather than "0.13".
pub fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    // The exact decimal expansion of a binary fraction with k fractional bits
    // has exactly k decimal places, so a tie needs at most digits + 1 bits.
    let scaled = value.abs() * 2f64.powi(digits as i32 + 1);
    let extended = format!("{:.*}", digits + 1, value.abs());
    let is_tie = scaled.fract() == 0.0 && extended.ends_with('5');
    if !is_tie {
        return format!("{value:.digits$}");
    }

    let truncated = extended[..extended.len() - 1].trim_end_matches('.');
    let rounded = increment_last_digit(truncated);
    if value.is_sign_negative() {
        format!("-{rounded}")
    } else {
        rounded
    }
}

fn increment_last_digit(number: &str) -> String {
    let mut bytes = number.as_bytes().to_vec();
    let mut carry = true;
    for byte in bytes.iter_mut().rev() {
        if !carry {
            break;
        }
        match *byte {
            b'9' => *byte = b'0',
            b'0'..=b'8' => {
                *byte += 1;
                carry = false;
            }
            _ => {}
        }
    }

    let mut out = String::with_capacity(bytes.len() + 1);
    if carry {
        out.push('1');
    }
    out.extend(bytes.into_iter().map(char::from));
    out
}

/// Rounds to `digits` decimals the same way `to_fixed` displays it.
pub fn round_fixed(value: f64, digits: usize) -> f64 {
    to_fixed(value, digits).parse().unwrap_or(value)
}
