/// A number read out of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    /// Text without a decimal point.
    Numbr(i64),
    /// Text with a decimal point.
    Numbar(f64),
}

/// Parses the numeric content of a yarn.
///
/// Surrounding whitespace is ignored. A leading sign is allowed, and the text
/// is a numbar exactly when it contains a decimal point. Exponents, `inf` and
/// `NaN` are not numbers in this language.
///
/// ## Example
/// ```
/// use lolz::util::num::{Numeric, parse_numeric};
///
/// assert_eq!(parse_numeric(" -42 "), Some(Numeric::Numbr(-42)));
/// assert_eq!(parse_numeric("3.25"), Some(Numeric::Numbar(3.25)));
/// assert_eq!(parse_numeric("1e5"), None);
/// assert_eq!(parse_numeric("inf"), None);
/// assert_eq!(parse_numeric(""), None);
/// ```
#[must_use]
pub fn parse_numeric(text: &str) -> Option<Numeric> {
    let text = text.trim();
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);

    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits, None),
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) || !fraction.is_none_or(all_digits) {
        return None;
    }

    match fraction {
        None if !whole.is_empty() => text.parse().ok().map(Numeric::Numbr),
        Some(fraction) if !whole.is_empty() || !fraction.is_empty() => {
            text.parse().ok().map(Numeric::Numbar)
        },
        _ => None,
    }
}

/// Converts an `i64` to the nearest `f64`.
///
/// Magnitudes past 2^53 round, the same way arithmetic promotes a numbr that
/// meets a numbar.
///
/// ## Example
/// ```
/// use lolz::util::num::i64_to_f64;
///
/// assert_eq!(i64_to_f64(42), 42.0);
/// assert_eq!(i64_to_f64(9_007_199_254_740_993), 9_007_199_254_740_992.0);
/// ```
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn i64_to_f64(value: i64) -> f64 {
    value as f64
}

/// Converts a whole `f64` to `i64`, returning `None` for non-finite,
/// fractional or out-of-range values.
///
/// ## Example
/// ```
/// use lolz::util::num::f64_to_i64_checked;
///
/// assert_eq!(f64_to_i64_checked(-7.0), Some(-7));
/// assert_eq!(f64_to_i64_checked(1.5), None);
/// assert_eq!(f64_to_i64_checked(1e20), None);
/// assert_eq!(f64_to_i64_checked(f64::NAN), None);
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn f64_to_i64_checked(value: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    if !value.is_finite() || value.fract() != 0.0 || value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return None;
    }
    Some(value as i64)
}

/// Formats a numbar for output.
///
/// Whole values keep a single decimal place so they still read as numbars.
///
/// ## Example
/// ```
/// use lolz::util::num::format_numbar;
///
/// assert_eq!(format_numbar(5.0), "5.0");
/// assert_eq!(format_numbar(5.5), "5.5");
/// assert_eq!(format_numbar(-0.25), "-0.25");
/// ```
#[must_use]
pub fn format_numbar(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
