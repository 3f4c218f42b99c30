//! Display-count parsing for engagement metrics.
//!
//! Listing pages render counts the way a human reads them: `"450"`,
//! `"1,234"`, `"12.3K"`, `"3M"`. [`parse_metric`] turns those into integers
//! and degrades to `0` on anything it cannot read, so a malformed count
//! looks like "no engagement" rather than an error.

/// Parses a display-formatted count into an integer.
///
/// Thousands separators are stripped. A trailing `K` or `M` (either case)
/// scales the numeric prefix by 1,000 or 1,000,000 and truncates any
/// remaining fraction. Anything else must be a plain non-negative integer.
/// Malformed input yields `0`.
#[must_use]
pub fn parse_metric(text: &str) -> u64 {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();

    let (number, multiplier) = match cleaned.chars().last() {
        Some('k' | 'K') => (&cleaned[..cleaned.len() - 1], 1_000),
        Some('m' | 'M') => (&cleaned[..cleaned.len() - 1], 1_000_000),
        _ => (cleaned.as_str(), 1),
    };

    if multiplier == 1 {
        return number.parse::<u64>().unwrap_or(0);
    }

    scale_decimal(number.trim(), multiplier).unwrap_or(0)
}

/// Multiplies a decimal string by `multiplier` using integer arithmetic and
/// truncates toward zero. `"1.25"` × 1,000 is exactly `1250`; float
/// multiplication would occasionally land a hair under and truncate to 1249.
fn scale_decimal(number: &str, multiplier: u64) -> Option<u64> {
    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));

    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let whole_value = if whole.is_empty() {
        0
    } else {
        whole.parse::<u64>().ok()?
    };

    // Only as many fractional digits as the multiplier can represent matter;
    // the rest are truncated away.
    let scale_digits = multiplier.ilog10() as usize;
    let mut fraction_value = 0u64;
    let mut place = multiplier;
    for digit in fraction.bytes().take(scale_digits) {
        place /= 10;
        fraction_value += u64::from(digit - b'0') * place;
    }

    whole_value
        .checked_mul(multiplier)?
        .checked_add(fraction_value)
}

#[cfg(test)]
#[path = "metrics_test.rs"]
mod tests;
