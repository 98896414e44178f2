//! Engineering value parsing with SI metric suffixes.

/// Parse a component value with an optional single-character SI suffix.
///
/// Suffixes are case-sensitive:
/// - k (kilo, 1e3)
/// - M (mega, 1e6)
/// - G (giga, 1e9)
/// - T (tera, 1e12)
/// - P (peta, 1e15)
/// - m (milli, 1e-3)
/// - u (micro, 1e-6)
/// - n (nano, 1e-9)
/// - p (pico, 1e-12)
/// - f (femto, 1e-15)
///
/// Returns `None` for an unrecognized suffix or an unparsable numeral.
pub fn parse_value(s: &str) -> Option<f64> {
    let s = s.trim();

    // Plain number first
    if let Ok(v) = s.parse::<f64>() {
        return Some(v);
    }

    // Otherwise the last character must be a suffix and the head a number.
    let suffix = s.chars().next_back()?;
    let head = &s[..s.len() - suffix.len_utf8()];
    let value: f64 = head.parse().ok()?;

    let multiplier = match suffix {
        'k' => 1e3,
        'M' => 1e6,
        'G' => 1e9,
        'T' => 1e12,
        'P' => 1e15,
        'm' => 1e-3,
        'u' => 1e-6,
        'n' => 1e-9,
        'p' => 1e-12,
        'f' => 1e-15,
        _ => return None,
    };

    Some(value * multiplier)
}
