//! Best-effort conversion of CSV cell text into column types.
//!
//! Numeric and boolean cells never fail: unparseable input falls back to a
//! default. Dates are strict.

use chrono::NaiveDate;

/// Date format used by the export, e.g. `2020-01-31`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// `true` for `true`, `1`, `yes` or `y` in any case, `false` otherwise.
pub fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "y"
    )
}

/// Parse as a float and truncate toward zero, so `"12.9"` becomes 12.
///
/// Non-numeric, non-finite or out-of-range input yields 0.
pub fn parse_int(value: &str) -> i64 {
    match value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() && n.trunc() >= i64::MIN as f64 && n.trunc() <= i64::MAX as f64 => {
            n.trunc() as i64
        }
        _ => 0,
    }
}

/// [`parse_int`] narrowed to `i32`; values outside the range yield 0.
pub fn parse_int32(value: &str) -> i32 {
    i32::try_from(parse_int(value)).unwrap_or(0)
}

/// Parse a float, 0.0 on failure.
pub fn parse_float(value: &str) -> f64 {
    value.trim().parse::<f64>().unwrap_or(0.0)
}

pub fn parse_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthy_tokens() {
        for v in ["true", "TRUE", " 1 ", "yes", "Y"] {
            assert!(parse_bool(v), "{v:?}");
        }
        for v in ["false", "0", "no", "", "t", "2"] {
            assert!(!parse_bool(v), "{v:?}");
        }
    }

    #[test]
    fn ints_truncate_via_float() {
        assert_eq!(parse_int("42"), 42);
        assert_eq!(parse_int("12.9"), 12);
        assert_eq!(parse_int("-3.7"), -3);
        assert_eq!(parse_int("1e3"), 1000);
        assert_eq!(parse_int(" 7 "), 7);
    }

    #[test]
    fn ints_default_to_zero() {
        assert_eq!(parse_int(""), 0);
        assert_eq!(parse_int("abc"), 0);
        assert_eq!(parse_int("nan"), 0);
        assert_eq!(parse_int("inf"), 0);
        assert_eq!(parse_int32("5000000000"), 0);
        assert_eq!(parse_int32("88.0"), 88);
    }

    #[test]
    fn floats_default_to_zero() {
        assert_eq!(parse_float("3.25"), 3.25);
        assert_eq!(parse_float(""), 0.0);
        assert_eq!(parse_float("three"), 0.0);
    }

    #[test]
    fn dates_are_strict() {
        assert_eq!(
            parse_date(" 2020-01-31 ").unwrap(),
            NaiveDate::from_ymd_opt(2020, 1, 31).unwrap()
        );
        assert!(parse_date("2020").is_err());
        assert!(parse_date("31/01/2020").is_err());
        assert!(parse_date("").is_err());
    }
}
