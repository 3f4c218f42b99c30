use super::*;

// -----------------------------------------------------------------------
// suffixed values
// -----------------------------------------------------------------------

#[test]
fn thousands_suffix_with_decimal() {
    assert_eq!(parse_metric("1.2K"), 1_200);
}

#[test]
fn thousands_suffix_lowercase() {
    assert_eq!(parse_metric("12.3k"), 12_300);
}

#[test]
fn millions_suffix_whole() {
    assert_eq!(parse_metric("3M"), 3_000_000);
}

#[test]
fn millions_suffix_with_decimal() {
    assert_eq!(parse_metric("4.56M"), 4_560_000);
}

#[test]
fn suffix_truncates_excess_precision() {
    assert_eq!(parse_metric("1.2345K"), 1_234);
}

#[test]
fn suffix_avoids_float_rounding_loss() {
    // 0.57 * 1000 in binary floating point is 569.999...
    assert_eq!(parse_metric("0.57K"), 570);
}

#[test]
fn leading_dot_is_accepted() {
    assert_eq!(parse_metric(".5K"), 500);
}

#[test]
fn suffix_with_surrounding_whitespace() {
    assert_eq!(parse_metric("  7K \n"), 7_000);
}

// -----------------------------------------------------------------------
// plain values
// -----------------------------------------------------------------------

#[test]
fn plain_integer() {
    assert_eq!(parse_metric("450"), 450);
}

#[test]
fn thousands_separator_is_stripped() {
    assert_eq!(parse_metric("1,234"), 1_234);
}

#[test]
fn separators_with_suffix() {
    assert_eq!(parse_metric("1,200K"), 1_200_000);
}

#[test]
fn zero_is_zero() {
    assert_eq!(parse_metric("0"), 0);
}

// -----------------------------------------------------------------------
// malformed values degrade to zero
// -----------------------------------------------------------------------

#[test]
fn garbage_is_zero() {
    assert_eq!(parse_metric("garbage"), 0);
}

#[test]
fn empty_is_zero() {
    assert_eq!(parse_metric(""), 0);
}

#[test]
fn bare_suffix_is_zero() {
    assert_eq!(parse_metric("K"), 0);
}

#[test]
fn negative_is_zero() {
    assert_eq!(parse_metric("-5"), 0);
    assert_eq!(parse_metric("-1.2K"), 0);
}

#[test]
fn plain_decimal_without_suffix_is_zero() {
    assert_eq!(parse_metric("12.5"), 0);
}

#[test]
fn multiple_dots_is_zero() {
    assert_eq!(parse_metric("1.2.3K"), 0);
}

#[test]
fn overflow_is_zero() {
    assert_eq!(parse_metric("99999999999999999999M"), 0);
}
