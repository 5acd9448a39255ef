/// Largest magnitude below which every `f64` with a zero fractional part is
/// an exact integer distinct from its neighbours (`2^53`).
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Decodes an integer literal in decimal, hexadecimal (`0x`), octal (`0o`)
/// or binary (`0b`) notation. Underscores between digits are ignored.
///
/// Decimal literals with a leading zero (`017`) are rejected, except for
/// literals made only of zeros. Values too large for `f64` come back as
/// infinity; the caller decides whether that is acceptable.
///
/// ## Returns
/// - `Some(f64)`: The value of the literal.
/// - `None`: The text is not a valid integer literal.
///
/// ## Example
/// ```
/// use safecalc::util::num::parse_integer_literal;
///
/// assert_eq!(parse_integer_literal("1_000"), Some(1000.0));
/// assert_eq!(parse_integer_literal("0xff"), Some(255.0));
/// assert_eq!(parse_integer_literal("0b101"), Some(5.0));
/// assert_eq!(parse_integer_literal("017"), None);
/// ```
#[must_use]
pub fn parse_integer_literal(text: &str) -> Option<f64> {
    let radix = match text.get(..2) {
        Some("0x" | "0X") => 16,
        Some("0o" | "0O") => 8,
        Some("0b" | "0B") => 2,
        _ => 10,
    };

    if radix == 10 {
        let digits = strip_separators(text, 10)?;
        if digits.len() > 1 && digits.starts_with('0') && digits.bytes().any(|b| b != b'0') {
            return None;
        }
        return digits.parse().ok();
    }

    let digits = text[2..].strip_prefix('_').unwrap_or(&text[2..]);
    let digits = strip_separators(digits, radix)?;
    let mut value = 0.0_f64;
    for c in digits.chars() {
        value = value.mul_add(f64::from(radix), f64::from(c.to_digit(radix)?));
    }
    Some(value)
}

/// Decodes a floating-point literal such as `3.14`, `.5`, `1.` or `2e-10`.
/// Underscores between digits are ignored.
///
/// ## Example
/// ```
/// use safecalc::util::num::parse_float_literal;
///
/// assert_eq!(parse_float_literal("2.5e3"), Some(2500.0));
/// assert_eq!(parse_float_literal("1_0.5"), Some(10.5));
/// ```
#[must_use]
pub fn parse_float_literal(text: &str) -> Option<f64> {
    let digits = strip_separators(text, 10)?;
    // Rust's parser accepts "1." and ".5" but not a bare exponent after the dot.
    let digits = digits.replace(".e", ".0e").replace(".E", ".0E");
    digits.parse().ok()
}

/// Returns `true` if `value` has no fractional part.
///
/// ## Example
/// ```
/// use safecalc::util::num::is_integral;
///
/// assert!(is_integral(-3.0));
/// assert!(!is_integral(0.5));
/// assert!(!is_integral(f64::NAN));
/// ```
#[must_use]
pub fn is_integral(value: f64) -> bool {
    value.is_finite() && (value.abs() >= MAX_SAFE_INTEGER || value.fract() == 0.0)
}

/// Removes digit separators, rejecting a separator that is not between two
/// digits of `radix`.
fn strip_separators(text: &str, radix: u32) -> Option<String> {
    let is_digit = |b: &u8| char::from(*b).is_digit(radix);
    let bytes = text.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b == b'_' {
            let before = i.checked_sub(1).and_then(|j| bytes.get(j));
            let after = bytes.get(i + 1);
            if !before.is_some_and(is_digit) || !after.is_some_and(is_digit) {
                return None;
            }
        }
    }
    Some(text.replace('_', ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn misplaced_separators_are_rejected() {
        assert_eq!(parse_integer_literal("1__0"), None);
        assert_eq!(parse_integer_literal("10_"), None);
        assert_eq!(parse_float_literal("1_.5"), None);
        assert_eq!(parse_integer_literal("0x_ff"), Some(255.0));
    }

    #[test]
    fn separators_need_digits_on_both_sides() {
        assert_eq!(parse_float_literal("1_e5"), None);
        assert_eq!(parse_float_literal("1e_5"), None);
        assert_eq!(parse_float_literal("1._5"), None);
        assert_eq!(parse_float_literal("1_0e1_0"), Some(1e11));
        assert_eq!(parse_integer_literal("0xf_f"), Some(255.0));
        assert_eq!(parse_integer_literal("0b1_0"), Some(2.0));
        assert_eq!(parse_integer_literal("0o7_8"), None);
    }

    #[test]
    fn zeros_and_radix_digits() {
        assert_eq!(parse_integer_literal("000"), Some(0.0));
        assert_eq!(parse_integer_literal("0o17"), Some(15.0));
        assert_eq!(parse_integer_literal("0b102"), None);
    }

    #[test]
    fn float_forms() {
        assert_eq!(parse_float_literal("1."), Some(1.0));
        assert_eq!(parse_float_literal(".5"), Some(0.5));
        assert_eq!(parse_float_literal("1.e2"), Some(100.0));
        assert_eq!(parse_float_literal("1e400"), Some(f64::INFINITY));
    }
}
