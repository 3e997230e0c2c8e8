//! Small extension traits for strings and integers

use chrono::TimeDelta;
use std::str::FromStr;

use crate::wildcard;

/// Convenience checks and conversions on string slices
pub trait StrExt {
    /// Compare ignoring case
    fn equals_ignore_case(&self, other: &str) -> bool;

    /// Match against a wildcard pattern, see [`wildcard::matches`]
    fn matches_wildcard(&self, pattern: &str, case_insensitive: bool) -> bool;

    /// True when the text parses as a 32-bit integer
    fn is_integer(&self) -> bool;

    /// True when the text parses as a decimal number
    fn is_decimal(&self) -> bool;

    /// Parse the text, falling back to `default` when it does not parse
    fn parse_or<T: FromStr>(&self, default: T) -> T;
}

impl StrExt for str {
    fn equals_ignore_case(&self, other: &str) -> bool {
        self.chars()
            .flat_map(char::to_lowercase)
            .eq(other.chars().flat_map(char::to_lowercase))
    }

    fn matches_wildcard(&self, pattern: &str, case_insensitive: bool) -> bool {
        wildcard::matches(self, pattern, case_insensitive)
    }

    fn is_integer(&self) -> bool {
        self.parse::<i32>().is_ok()
    }

    fn is_decimal(&self) -> bool {
        self.parse::<f64>().is_ok_and(f64::is_finite)
    }

    fn parse_or<T: FromStr>(&self, default: T) -> T {
        self.parse().unwrap_or(default)
    }
}

/// Build time spans from integer counts, e.g. `5i64.minutes()`
///
/// Out-of-range counts panic, as the matching `TimeDelta` constructors do.
pub trait TimeDeltaExt {
    fn milliseconds(self) -> TimeDelta;
    fn seconds(self) -> TimeDelta;
    fn minutes(self) -> TimeDelta;
    fn hours(self) -> TimeDelta;
    fn days(self) -> TimeDelta;
}

impl TimeDeltaExt for i64 {
    fn milliseconds(self) -> TimeDelta {
        TimeDelta::milliseconds(self)
    }

    fn seconds(self) -> TimeDelta {
        TimeDelta::seconds(self)
    }

    fn minutes(self) -> TimeDelta {
        TimeDelta::minutes(self)
    }

    fn hours(self) -> TimeDelta {
        TimeDelta::hours(self)
    }

    fn days(self) -> TimeDelta {
        TimeDelta::days(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equals_ignore_case() {
        assert!("Hello World!".equals_ignore_case("Hello World!"));
        assert!("Hello world!".equals_ignore_case("hello world!"));
        assert!(!"Hello world!".equals_ignore_case("abc"));
        assert!("STRASSE".equals_ignore_case("strasse"));
        assert!(!"ab".equals_ignore_case("abc"));
    }

    #[test]
    fn test_numeric_checks() {
        assert!("123".is_integer());
        assert!("-42".is_integer());
        assert!(!"123.45".is_integer());
        assert!(!"abc".is_integer());
        assert!(!"99999999999".is_integer());

        assert!("123".is_decimal());
        assert!("123.45".is_decimal());
        assert!(!"abc".is_decimal());
        assert!(!"inf".is_decimal());
        assert!(!"NaN".is_decimal());
    }

    #[test]
    fn test_parse_or() {
        assert_eq!("123".parse_or(0), 123);
        assert_eq!("123.45".parse_or(0), 0);
        assert_eq!("abc".parse_or(0), 0);
        assert_eq!("123.45".parse_or(0.0), 123.45);
        assert_eq!("abc".parse_or(7.5), 7.5);
    }

    #[test]
    fn test_matches_wildcard() {
        assert!("Abc".matches_wildcard("A*", true));
        assert!("Abc".matches_wildcard("a*", true));
        assert!(!"Abc".matches_wildcard("a*", false));
        assert!("Abc".matches_wildcard("A*c", true));
        assert!("Abc".matches_wildcard("Ab*", true));
        assert!("Abc".matches_wildcard("*bc", true));
    }

    #[test]
    fn test_time_delta_ext() {
        assert_eq!(30i64.milliseconds().num_milliseconds(), 30);
        assert_eq!(30i64.seconds().num_seconds(), 30);
        assert_eq!(30i64.minutes().num_minutes(), 30);
        assert_eq!(30i64.hours().num_hours(), 30);
        assert_eq!(30i64.days().num_days(), 30);
        assert_eq!(2i64.minutes() + 30i64.seconds(), 150i64.seconds());
    }
}
