//! Superficial form checks: required fields and numeric parsing.
//!
//! Everything semantic (balances, limits, eligibility) is left to the backends,
//! whose rejection messages are surfaced verbatim.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("{field} must be a positive number, got '{value}'")]
    InvalidAmount { field: &'static str, value: String },

    #[error("{field} must be a whole number, got '{value}'")]
    InvalidInteger { field: &'static str, value: String },

    #[error("'{value}' is not a valid {field}")]
    InvalidChoice { field: &'static str, value: String },

    #[error("Passwords do not match")]
    PasswordMismatch,
}

impl ValidationError {
    /// Name of the offending field, when the error is about one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::MissingField { field }
            | ValidationError::InvalidAmount { field, .. }
            | ValidationError::InvalidInteger { field, .. }
            | ValidationError::InvalidChoice { field, .. } => Some(field),
            ValidationError::PasswordMismatch => None,
        }
    }
}

impl From<ValidationError> for crate::Error {
    fn from(err: ValidationError) -> Self {
        crate::Error::Validation(err)
    }
}

/// Trimmed value of a required field.
pub fn require<'a>(field: &'static str, value: &'a str) -> crate::Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::MissingField { field }.into())
    } else {
        Ok(trimmed)
    }
}

/// Trimmed value of an optional field, `None` when blank.
pub fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// A required value that must be one of `choices`.
pub fn choice<'a>(field: &'static str, value: &'a str, choices: &[&str]) -> crate::Result<&'a str> {
    let value = require(field, value)?;
    if choices.contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::InvalidChoice {
            field,
            value: value.to_string(),
        }
        .into())
    }
}

/// Parse a required, strictly positive monetary amount.
pub fn parse_amount(field: &'static str, value: &str) -> crate::Result<f64> {
    let raw = require(field, value)?;
    match raw.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        _ => Err(ValidationError::InvalidAmount {
            field,
            value: raw.to_string(),
        }
        .into()),
    }
}

/// Parse an optional non-negative amount; blank means `None`.
pub fn parse_optional_amount(field: &'static str, value: Option<&str>) -> crate::Result<Option<f64>> {
    match optional(value) {
        None => Ok(None),
        Some(raw) => match raw.parse::<f64>() {
            Ok(amount) if amount.is_finite() && amount >= 0.0 => Ok(Some(amount)),
            _ => Err(ValidationError::InvalidAmount { field, value: raw }.into()),
        },
    }
}

/// Parse a required non-negative whole number.
pub fn parse_count(field: &'static str, value: &str) -> crate::Result<u32> {
    let raw = require(field, value)?;
    raw.parse::<u32>().map_err(|_| {
        ValidationError::InvalidInteger {
            field,
            value: raw.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_fields() {
        assert_eq!(require("username", "  alice ").unwrap(), "alice");
        let err = require("username", "   ").unwrap_err();
        assert!(err.is_validation_error());
        assert_eq!(err.to_string(), "username is required");
    }

    #[test]
    fn amounts_must_be_positive_numbers() {
        assert_eq!(parse_amount("amount", "125.50").unwrap(), 125.5);
        assert!(parse_amount("amount", "0").is_err());
        assert!(parse_amount("amount", "-3").is_err());
        assert!(parse_amount("amount", "ten").is_err());
        assert!(parse_amount("amount", "NaN").is_err());
        assert!(parse_amount("amount", "").is_err());
    }

    #[test]
    fn optional_amounts() {
        assert_eq!(parse_optional_amount("income", None).unwrap(), None);
        assert_eq!(parse_optional_amount("income", Some(" ")).unwrap(), None);
        assert_eq!(parse_optional_amount("income", Some("0")).unwrap(), Some(0.0));
        assert!(parse_optional_amount("income", Some("lots")).is_err());
    }

    #[test]
    fn choices_must_be_listed() {
        let sizes = ["SMALL", "LARGE"];
        assert_eq!(choice("lockerSize", " LARGE", &sizes).unwrap(), "LARGE");
        let err = choice("lockerSize", "HUGE", &sizes).unwrap_err();
        assert_eq!(err.to_string(), "'HUGE' is not a valid lockerSize");
    }

    #[test]
    fn counts() {
        assert_eq!(parse_count("tenureMonths", "36").unwrap(), 36);
        assert!(parse_count("tenureMonths", "3.5").is_err());
    }
}
