//! Input validation for user-supplied contact fields.

use std::fmt;

/// Validation error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Invalid phone number format.
    InvalidPhone(String),
    /// Value too long.
    TooLong { field: String, max: usize, actual: usize },
    /// Empty value where one is required.
    Empty(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidPhone(msg) => write!(f, "Invalid phone: {}", msg),
            ValidationError::TooLong { field, max, actual } => {
                write!(f, "{} is too long ({} chars, max {})", field, actual, max)
            }
            ValidationError::Empty(field) => write!(f, "{} cannot be empty", field),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Maximum allowed length for a phone number as typed by the user.
pub const MAX_PHONE_LENGTH: usize = 32;

/// Minimum number of digits a phone number must contain.
pub const MIN_PHONE_DIGITS: usize = 7;

/// Maximum allowed length for lead notes.
pub const MAX_NOTES_LENGTH: usize = 2000;

/// Validate a phone number and return it trimmed.
///
/// Accepts digits with an optional leading `+` and the separators users
/// commonly type (spaces, dashes, dots, parentheses).
pub fn validate_phone(phone: &str) -> Result<&str, ValidationError> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Empty("phone".to_string()));
    }

    if phone.len() > MAX_PHONE_LENGTH {
        return Err(ValidationError::TooLong {
            field: "phone".to_string(),
            max: MAX_PHONE_LENGTH,
            actual: phone.len(),
        });
    }

    let body = phone.strip_prefix('+').unwrap_or(phone);
    if let Some(c) = body
        .chars()
        .find(|c| !c.is_ascii_digit() && !matches!(c, ' ' | '-' | '.' | '(' | ')'))
    {
        return Err(ValidationError::InvalidPhone(format!(
            "unexpected character '{}'",
            c
        )));
    }

    if body.chars().filter(|c| c.is_ascii_digit()).count() < MIN_PHONE_DIGITS {
        return Err(ValidationError::InvalidPhone(format!(
            "must contain at least {} digits",
            MIN_PHONE_DIGITS
        )));
    }

    Ok(phone)
}

/// Validate free-form lead notes length.
pub fn validate_notes(notes: &str) -> Result<(), ValidationError> {
    let len = notes.chars().count();
    if len > MAX_NOTES_LENGTH {
        return Err(ValidationError::TooLong {
            field: "notes".to_string(),
            max: MAX_NOTES_LENGTH,
            actual: len,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_phone_valid() {
        assert_eq!(validate_phone("+502 5555-1234"), Ok("+502 5555-1234"));
        assert_eq!(validate_phone(" 55551234 "), Ok("55551234"));
        assert!(validate_phone("(502) 5555.1234").is_ok());
    }

    #[test]
    fn test_validate_phone_invalid() {
        assert!(matches!(validate_phone("  "), Err(ValidationError::Empty(_))));
        assert!(matches!(
            validate_phone("555-abc-1234"),
            Err(ValidationError::InvalidPhone(_))
        ));
        assert!(matches!(
            validate_phone("12345"),
            Err(ValidationError::InvalidPhone(_))
        ));
        assert!(matches!(
            validate_phone("1+5551234567"),
            Err(ValidationError::InvalidPhone(_))
        ));
        let long = "1".repeat(MAX_PHONE_LENGTH + 1);
        assert!(matches!(
            validate_phone(&long),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn test_validate_notes_length() {
        assert!(validate_notes("Interesado en ósmosis inversa").is_ok());
        let long = "a".repeat(MAX_NOTES_LENGTH + 1);
        assert!(validate_notes(&long).is_err());
    }
}
