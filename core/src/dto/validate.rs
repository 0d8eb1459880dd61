//! Field-level predicates shared by the request DTOs.
//!
//! Each `is_*` function answers one yes/no question about a string. The
//! `check_*` helpers wrap them into `ValidationError`s carrying the field
//! name, and skip absent or empty optional values.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::ValidationError;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~.-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("EMAIL_REGEX should compile")
});

static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\-()\s]+$").expect("PHONE_REGEX should compile"));

static STATE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z]{2}$").expect("STATE_REGEX should compile"));

static ISO_DATE_SHAPE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("ISO_DATE_SHAPE_REGEX should compile"));

const ERA_DATE_FORMAT: &str = "%m-%d-%Y";

pub fn is_valid_email(value: &str) -> bool {
    if value.len() > 254 || !EMAIL_REGEX.is_match(value) {
        return false;
    }
    let local = value.split('@').next().unwrap_or_default();
    local.len() <= 64 && !local.starts_with('.') && !local.ends_with('.') && !local.contains("..")
}

/// Digits, dashes, parentheses and whitespace, with an optional leading `+`.
pub fn is_valid_phone(value: &str) -> bool {
    PHONE_REGEX.is_match(value)
}

/// Two upper-case ASCII letters.
pub fn is_state_code(value: &str) -> bool {
    STATE_REGEX.is_match(value)
}

/// A real calendar date written exactly as `mm-dd-yyyy`.
pub fn is_mm_dd_yyyy(value: &str) -> bool {
    NaiveDate::parse_from_str(value, ERA_DATE_FORMAT)
        .map(|date| date.format(ERA_DATE_FORMAT).to_string() == value)
        .unwrap_or(false)
}

/// `mm-dd-yyyy`, or `today` / `yesterday` in any case.
pub fn is_mm_dd_yyyy_or_relative(value: &str) -> bool {
    value.eq_ignore_ascii_case("today") || value.eq_ignore_ascii_case("yesterday") || is_mm_dd_yyyy(value)
}

/// Exactly eight ASCII digits. No calendar check.
pub fn is_yyyymmdd(value: &str) -> bool {
    value.len() == 8 && value.bytes().all(|b| b.is_ascii_digit())
}

/// `dddd-dd-dd` shape. No calendar check.
pub fn is_yyyy_mm_dd(value: &str) -> bool {
    ISO_DATE_SHAPE_REGEX.is_match(value)
}

pub fn is_one_of(value: &str, allowed: &[&str]) -> bool {
    allowed.contains(&value)
}

pub(crate) fn require(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(())
}

/// Run `predicate` on `value` when it is present and non-empty.
pub(crate) fn check_optional(
    field: &str,
    value: Option<&str>,
    predicate: impl Fn(&str) -> bool,
    reason: &str,
) -> Result<(), ValidationError> {
    match value {
        Some(v) if !v.is_empty() && !predicate(v) => Err(ValidationError::invalid(field, reason)),
        _ => Ok(()),
    }
}

pub(crate) fn check_one_of(field: &str, value: &str, allowed: &[&str]) -> Result<(), ValidationError> {
    if is_one_of(value, allowed) {
        return Ok(());
    }
    Err(ValidationError::invalid(
        field,
        format!("must be one of: {}", allowed.join(", ")),
    ))
}

pub(crate) fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, str::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_grammar() {
        for ok in ["billing@clinic.org", "a.b+c@sub.example.co", "x_y@d-1.io"] {
            assert!(is_valid_email(ok), "{ok}");
        }
        for bad in ["", "plain", "@example.com", "a@", "a@b", "a..b@example.com", ".a@example.com", "a b@example.com", "a@-x.com"] {
            assert!(!is_valid_email(bad), "{bad}");
        }
    }

    #[test]
    fn phone_grammar() {
        for ok in ["555-0123", "+1 (555) 010-2030", "5550102030"] {
            assert!(is_valid_phone(ok), "{ok}");
        }
        for bad in ["", "+", "555.0123", "call me", "1+555"] {
            assert!(!is_valid_phone(bad), "{bad}");
        }
    }

    #[test]
    fn plus_alone_is_not_a_phone() {
        // The character class needs at least one digit, dash, paren or space.
        assert!(!is_valid_phone("+"));
        assert!(is_valid_phone("+ "));
    }

    #[test]
    fn state_code_is_two_upper_letters() {
        assert!(is_state_code("CA"));
        assert!(!is_state_code("ca"));
        assert!(!is_state_code("CAL"));
        assert!(!is_state_code("C1"));
    }

    #[test]
    fn mm_dd_yyyy_requires_real_dates() {
        assert!(is_mm_dd_yyyy("01-15-2024"));
        assert!(is_mm_dd_yyyy("02-29-2024"));
        assert!(!is_mm_dd_yyyy("02-29-2023"));
        assert!(!is_mm_dd_yyyy("02-30-2024"));
        assert!(!is_mm_dd_yyyy("13-01-2024"));
        assert!(!is_mm_dd_yyyy("1-15-2024"));
        assert!(!is_mm_dd_yyyy("2024-01-15"));
        assert!(!is_mm_dd_yyyy("today"));
    }

    #[test]
    fn relative_dates_are_case_insensitive() {
        assert!(is_mm_dd_yyyy_or_relative("today"));
        assert!(is_mm_dd_yyyy_or_relative("TODAY"));
        assert!(is_mm_dd_yyyy_or_relative("Yesterday"));
        assert!(is_mm_dd_yyyy_or_relative("12-31-2023"));
        assert!(!is_mm_dd_yyyy_or_relative("tomorrow"));
    }

    #[test]
    fn yyyymmdd_counts_digits_only() {
        assert!(is_yyyymmdd("20240115"));
        assert!(is_yyyymmdd("20241399"));
        assert!(!is_yyyymmdd("2024-01-15"));
        assert!(!is_yyyymmdd("2024011"));
        assert!(!is_yyyymmdd("202401155"));
    }

    #[test]
    fn yyyy_mm_dd_shape() {
        assert!(is_yyyy_mm_dd("2024-01-15"));
        assert!(!is_yyyy_mm_dd("01-15-2024"));
        assert!(!is_yyyy_mm_dd("20240115"));
    }

    #[test]
    fn optional_checks_skip_empty_values() {
        assert!(check_optional("contact_state", None, is_state_code, "bad").is_ok());
        assert!(check_optional("contact_state", Some(""), is_state_code, "bad").is_ok());
        let err = check_optional("contact_state", Some("ca"), is_state_code, "bad").unwrap_err();
        assert_eq!(err, ValidationError::invalid("contact_state", "bad"));
    }

    #[test]
    fn one_of_lists_allowed_values() {
        let err = check_one_of("ins_sex", "X", &["M", "F"]).unwrap_err();
        assert_eq!(err.to_string(), "ins_sex must be one of: M, F");
        assert!(check_one_of("ins_sex", "F", &["M", "F"]).is_ok());
    }
}
