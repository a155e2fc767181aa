//! Custom field validators for `#[validate(custom(function = ...))]`.
//!
//! Each takes the trimmed field value. The error code names the rule; the
//! user-facing message comes from the field's attribute. Character-class
//! checks accept the empty string, so pair them with `length(min = 1)` where
//! the field is required.

use validator::ValidationError;

/// Minimum length of an account password.
pub const PASSWORD_MIN_LENGTH: usize = 12;

fn verdict(ok: bool, code: &'static str) -> Result<(), ValidationError> {
    if ok {
        Ok(())
    } else {
        Err(ValidationError::new(code))
    }
}

fn unsigned_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Digits only, small enough for an `i32` column (ids, mileage).
pub fn whole_number(value: &str) -> Result<(), ValidationError> {
    verdict(
        unsigned_digits(value) && value.parse::<i32>().is_ok(),
        "whole_number",
    )
}

/// Digits only, small enough for the `BIGINT` price column.
pub fn price(value: &str) -> Result<(), ValidationError> {
    verdict(
        unsigned_digits(value) && value.parse::<i64>().is_ok(),
        "price",
    )
}

/// Exactly four ASCII digits.
pub fn four_digit_year(value: &str) -> Result<(), ValidationError> {
    verdict(value.len() == 4 && unsigned_digits(value), "year")
}

/// Letters only.
pub fn letters(value: &str) -> Result<(), ValidationError> {
    verdict(value.chars().all(char::is_alphabetic), "letters")
}

/// ASCII letters and digits only, no spaces.
pub fn letters_and_digits(value: &str) -> Result<(), ValidationError> {
    verdict(
        value.bytes().all(|b| b.is_ascii_alphanumeric()),
        "letters_and_digits",
    )
}

/// At least 12 characters with an uppercase letter, a digit and a character
/// that is neither letter nor digit.
pub fn strong_password(value: &str) -> Result<(), ValidationError> {
    verdict(
        value.chars().count() >= PASSWORD_MIN_LENGTH
            && value.chars().any(char::is_uppercase)
            && value.chars().any(|c| c.is_ascii_digit())
            && value.chars().any(|c| !c.is_alphanumeric() && !c.is_whitespace()),
        "strong_password",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_digits_rejects_spaces_and_symbols() {
        assert!(letters_and_digits("Truck2").is_ok());
        assert!(letters_and_digits("Sport Utility").is_err());
        assert!(letters_and_digits("SUV!").is_err());
        assert!(letters_and_digits("").is_ok());
    }

    #[test]
    fn year_requires_exactly_four_digits() {
        assert!(four_digit_year("2019").is_ok());
        assert!(four_digit_year("19").is_err());
        assert!(four_digit_year("20a9").is_err());
        assert!(four_digit_year("20190").is_err());
    }

    #[test]
    fn whole_number_rejects_signs_and_overflow() {
        assert!(whole_number("28045").is_ok());
        assert!(whole_number("+5").is_err());
        assert!(whole_number("12.5").is_err());
        assert!(whole_number("99999999999").is_err());
    }

    #[test]
    fn price_accepts_values_beyond_i32() {
        assert!(price("3000000000").is_ok());
        assert!(price("28045").is_ok());
        assert!(price("-1").is_err());
        assert!(price("99999999999999999999").is_err());
    }

    #[test]
    fn letters_accepts_letters_only() {
        assert!(letters("Yellow").is_ok());
        assert!(letters("Dark Blue").is_err());
        assert!(letters("Red1").is_err());
    }

    #[test]
    fn strong_password_needs_every_class() {
        assert!(strong_password("I@mABadPassw0rd").is_ok());
        assert!(strong_password("Sh0rt!").is_err());
        assert!(strong_password("nouppercase1!xx").is_err());
        assert!(strong_password("NoDigitsHere!!").is_err());
        assert!(strong_password("NoSpecial12345").is_err());
    }

    #[test]
    fn error_code_names_the_rule() {
        let error = four_digit_year("19").unwrap_err();
        assert_eq!(error.code, "year");
    }
}
