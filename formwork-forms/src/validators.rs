//! Runtime validators assembled from declarative validation rules.
//!
//! A validator checks one submitted `serde_json::Value`. Length and format
//! validators skip empty values — `Required` is the only rule that rejects
//! absence, so optional fields validate only when filled in.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;

/// RFC-light `local@domain.tld` matcher.
pub const EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";

/// URL matcher with optional scheme.
pub const URL_PATTERN: &str = r"^(https?://)?([\da-z.-]+)\.([a-z.]{2,6})([/\w .-]*)*/?$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"));
static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(URL_PATTERN).expect("url pattern compiles"));

/// A single runtime validation rule attached to a control.
#[derive(Debug, Clone)]
pub enum Validator {
    /// Value must be present: not null, not an empty string or array.
    Required,
    MinLength(usize),
    MaxLength(usize),
    /// User-configured regex, compiled at form-compile time.
    Pattern(Regex),
    Email,
    Url,
    /// Numeric lower bound, inclusive.
    Min(f64),
    /// Numeric upper bound, inclusive.
    Max(f64),
}

/// A violated validation rule, carrying the control key.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("'{key}' is required")]
    Missing { key: String },

    #[error("'{key}' must be at least {min_length} characters long (got: {actual_length})")]
    TooShort {
        key: String,
        min_length: usize,
        actual_length: usize,
    },

    #[error("'{key}' must be at most {max_length} characters long (got: {actual_length})")]
    TooLong {
        key: String,
        max_length: usize,
        actual_length: usize,
    },

    #[error("'{key}' value '{value}' does not match required pattern '{pattern}'")]
    PatternMismatch {
        key: String,
        value: String,
        pattern: String,
    },

    #[error("'{key}' value '{value}' is not a valid email address")]
    InvalidEmail { key: String, value: String },

    #[error("'{key}' value '{value}' is not a valid URL")]
    InvalidUrl { key: String, value: String },

    #[error("'{key}' value {value} is out of range [{min:?}, {max:?}]")]
    OutOfRange {
        key: String,
        value: f64,
        min: Option<f64>,
        max: Option<f64>,
    },
}

/// Absent from the form's perspective: null, empty string, or empty array.
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Numeric reading of a value; numeric strings count.
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl Validator {
    /// Check one submitted value, reporting the violation under `key`.
    pub fn check(&self, key: &str, value: &Value) -> Result<(), ValidationError> {
        match self {
            Self::Required => {
                if is_empty_value(value) {
                    return Err(ValidationError::Missing {
                        key: key.to_string(),
                    });
                }
            }
            Self::MinLength(min_length) => {
                if let Some(s) = value.as_str() {
                    let actual_length = s.chars().count();
                    if !s.is_empty() && actual_length < *min_length {
                        return Err(ValidationError::TooShort {
                            key: key.to_string(),
                            min_length: *min_length,
                            actual_length,
                        });
                    }
                }
            }
            Self::MaxLength(max_length) => {
                if let Some(s) = value.as_str() {
                    let actual_length = s.chars().count();
                    if actual_length > *max_length {
                        return Err(ValidationError::TooLong {
                            key: key.to_string(),
                            max_length: *max_length,
                            actual_length,
                        });
                    }
                }
            }
            Self::Pattern(regex) => {
                if let Some(s) = non_empty_str(value) {
                    if !regex.is_match(s) {
                        return Err(ValidationError::PatternMismatch {
                            key: key.to_string(),
                            value: s.to_string(),
                            pattern: regex.as_str().to_string(),
                        });
                    }
                }
            }
            Self::Email => {
                if let Some(s) = non_empty_str(value) {
                    if !EMAIL_RE.is_match(s) {
                        return Err(ValidationError::InvalidEmail {
                            key: key.to_string(),
                            value: s.to_string(),
                        });
                    }
                }
            }
            Self::Url => {
                if let Some(s) = non_empty_str(value) {
                    if !URL_RE.is_match(s) {
                        return Err(ValidationError::InvalidUrl {
                            key: key.to_string(),
                            value: s.to_string(),
                        });
                    }
                }
            }
            Self::Min(min) => {
                if let Some(n) = as_number(value) {
                    if n < *min {
                        return Err(ValidationError::OutOfRange {
                            key: key.to_string(),
                            value: n,
                            min: Some(*min),
                            max: None,
                        });
                    }
                }
            }
            Self::Max(max) => {
                if let Some(n) = as_number(value) {
                    if n > *max {
                        return Err(ValidationError::OutOfRange {
                            key: key.to_string(),
                            value: n,
                            min: None,
                            max: Some(*max),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}
