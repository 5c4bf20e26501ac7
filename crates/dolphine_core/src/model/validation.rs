//! Write-path validation errors shared by all storefront records.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failure raised before any SQL mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text field is empty after trim.
    BlankField(&'static str),
    /// Email address is not `local@domain` shaped.
    InvalidEmail(String),
    /// Cart quantity is outside `1..=MAX_QUANTITY_PER_ITEM`.
    QuantityOutOfRange(i64),
    /// Text value does not name a known enum variant.
    UnknownValue { field: &'static str, value: String },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "`{field}` must not be blank"),
            Self::InvalidEmail(value) => write!(f, "invalid email address `{value}`"),
            Self::QuantityOutOfRange(value) => {
                write!(f, "quantity {value} is outside the allowed range")
            }
            Self::UnknownValue { field, value } => {
                write!(f, "unknown {field} value `{value}`")
            }
        }
    }
}

impl Error for ValidationError {}

/// Rejects values that are empty or whitespace-only.
pub fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    Ok(())
}

/// Checks that an email has non-empty text on both sides of one `@`.
pub fn require_email(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    match trimmed.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
        {
            Ok(())
        }
        _ if trimmed.is_empty() => Err(ValidationError::BlankField("email")),
        _ => Err(ValidationError::InvalidEmail(trimmed.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::{require_email, require_text, ValidationError};

    #[test]
    fn require_text_rejects_whitespace() {
        assert_eq!(
            require_text("name", "  \t"),
            Err(ValidationError::BlankField("name"))
        );
        assert!(require_text("name", "Planer").is_ok());
    }

    #[test]
    fn require_email_checks_both_sides() {
        assert!(require_email("buyer@mill.example").is_ok());
        assert_eq!(
            require_email(""),
            Err(ValidationError::BlankField("email"))
        );
        assert!(matches!(
            require_email("@mill.example"),
            Err(ValidationError::InvalidEmail(_))
        ));
        assert!(matches!(
            require_email("a@b@c"),
            Err(ValidationError::InvalidEmail(_))
        ));
    }
}
