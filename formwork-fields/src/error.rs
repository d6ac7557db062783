//! Error types for catalog operations

use thiserror::Error;

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Errors that can occur in field catalog operations
#[derive(Debug, Error)]
pub enum FieldsError {
    /// Field not found by id
    #[error("field not found: {id}")]
    FieldNotFound { id: String },

    /// Duplicate field name within one catalog
    #[error("duplicate field name: {name}")]
    DuplicateFieldName { name: String },

    /// Attempt to change name, type, or required-ness of a system field
    #[error("system field '{name}' cannot change name, type, or required-ness")]
    SystemFieldImmutable { name: String },

    /// Attempt to delete a system field
    #[error("system field '{name}' cannot be deleted")]
    SystemFieldProtected { name: String },
}

impl FieldsError {
    /// Create a not-found error from any id-like value
    pub fn not_found(id: impl ToString) -> Self {
        Self::FieldNotFound {
            id: id.to_string(),
        }
    }
}
