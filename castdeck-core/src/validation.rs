//! Input validation for operator and viewer supplied text
//!
//! Every text field that reaches a session goes through [`TextValidator`]:
//! surrounding whitespace is trimmed, blank values are rejected and an
//! optional character limit is applied.

use crate::Error;

/// Minimum number of options a poll may carry
pub const POLL_OPTIONS_MIN: usize = 2;
/// Maximum number of options a poll may carry
pub const POLL_OPTIONS_MAX: usize = 4;

/// Maximum length of short labels (poll options, giveaway titles, usernames)
pub const LABEL_MAX: usize = 200;

/// Validation error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} may not be empty")]
    Blank { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("Invalid {field}: {message}")]
    Field { field: String, message: String },
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

/// Validation result
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validator for a single named text field
pub struct TextValidator {
    field: &'static str,
    max_length: Option<usize>,
}

impl TextValidator {
    #[must_use]
    pub const fn new(field: &'static str) -> Self {
        Self {
            field,
            max_length: None,
        }
    }

    #[must_use]
    pub const fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Returns the trimmed value
    pub fn validate(&self, value: &str) -> ValidationResult<String> {
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Blank {
                field: self.field.to_string(),
            });
        }

        if let Some(max) = self.max_length {
            if trimmed.chars().count() > max {
                return Err(ValidationError::TooLong {
                    field: self.field.to_string(),
                    max,
                });
            }
        }

        Ok(trimmed.to_string())
    }
}

/// Check that a poll has an acceptable number of options
pub fn validate_option_count(count: usize) -> ValidationResult<()> {
    if !(POLL_OPTIONS_MIN..=POLL_OPTIONS_MAX).contains(&count) {
        return Err(ValidationError::Field {
            field: "options".to_string(),
            message: format!(
                "a poll needs between {POLL_OPTIONS_MIN} and {POLL_OPTIONS_MAX} options, got {count}"
            ),
        });
    }
    Ok(())
}
