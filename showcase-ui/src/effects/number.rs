//! Number formatting for style values
//!
//! Style strings are consumed by CSS-like renderers, so numbers are written
//! the way a browser script would write them.

/// Format `value` with `digits` significant digits.
///
/// Mirrors `Number.prototype.toPrecision`: fixed notation while the decimal
/// exponent is in `-6..digits`, exponential (`1.5e+2`) otherwise. Ties round
/// away from zero on the exact binary value, so 22.5 gives `23` and 0.125
/// gives `0.13`. Zero of either sign prints as `0.0` for two digits.
pub fn to_precision(value: f64, digits: usize) -> String {
    let digits = digits.max(1);

    if !value.is_finite() {
        return js_number(value);
    }

    if value == 0.0 {
        return if digits == 1 {
            "0".to_string()
        } else {
            format!("0.{}", "0".repeat(digits - 1))
        };
    }

    let (kept, exponent) = round_significant(value.abs(), digits);
    let sign = if value < 0.0 { "-" } else { "" };

    if exponent < -6 || exponent >= digits as i32 {
        let (first, rest) = kept.split_at(1);
        let exponent_sign = if exponent < 0 { '-' } else { '+' };
        if rest.is_empty() {
            format!("{}{}e{}{}", sign, first, exponent_sign, exponent.abs())
        } else {
            format!("{}{}.{}e{}{}", sign, first, rest, exponent_sign, exponent.abs())
        }
    } else if exponent >= 0 {
        let (int, frac) = kept.split_at(exponent as usize + 1);
        if frac.is_empty() {
            format!("{}{}", sign, int)
        } else {
            format!("{}{}.{}", sign, int, frac)
        }
    } else {
        let zeros = "0".repeat((-exponent - 1) as usize);
        format!("{}0.{}{}", sign, zeros, kept)
    }
}

/// Leading `digits` significant digits of a positive finite `value`, rounded
/// half up, with the decimal exponent of the first digit.
fn round_significant(value: f64, digits: usize) -> (String, i32) {
    // Every f64 has an exact decimal expansion of at most 767 significant
    // digits, so this rendering is not rounded.
    let exact = format!("{:.766e}", value);
    let (mantissa, exponent) = match exact.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (exact.as_str(), 0),
    };
    let all: Vec<u8> = mantissa.bytes().filter(u8::is_ascii_digit).collect();

    let mut kept = all[..digits.min(all.len())].to_vec();
    let mut exponent = exponent;
    if all.get(digits).is_some_and(|d| *d >= b'5') {
        let mut carry = true;
        for d in kept.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            // 9.96 -> 10: one more integer digit
            kept.insert(0, b'1');
            kept.truncate(digits);
            exponent += 1;
        }
    }

    (String::from_utf8_lossy(&kept).into_owned(), exponent)
}

/// Format `value` the way a script's default number conversion does.
///
/// Shortest round-trip digits, switching to exponential form
/// (`4.999999997368221e-7`, `1e+21`) below `1e-6` and from `1e21` up. Negative
/// zero keeps its sign (`-0`).
pub fn js_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let shortest = format!("{:e}", value);
    match shortest.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exponent) if exponent < -6 || exponent >= 21 => {
                let sign = if exponent < 0 { '-' } else { '+' };
                format!("{}e{}{}", mantissa, sign, exponent.abs())
            }
            _ => value.to_string(),
        },
        None => value.to_string(),
    }
}
