//! Error types for tagsql

use thiserror::Error;

use crate::value::FieldKind;

/// Result type alias for tagsql operations
pub type OrmResult<T> = Result<T, OrmError>;

/// Errors raised while describing, encoding or binding a model.
///
/// All of these are schema/programmer mismatches rather than transient failures,
/// so nothing in the crate retries on them.
#[derive(Debug, Error)]
pub enum OrmError {
    /// The input is not a struct (or a reference/box around one)
    #[error("Expected a struct, got `{type_name}`")]
    NotAStruct { type_name: &'static str },

    /// The field's type has no SQL literal rule
    #[error("Unsupported field type: field '{field}' has kind {kind}")]
    UnsupportedFieldType { field: String, kind: FieldKind },

    /// A named-field lookup found nothing
    #[error("Model does not have a field named {0}")]
    MissingField(String),

    /// Two fields resolved to the same column name
    #[error("Duplicate column '{column}' in `{type_name}`")]
    DuplicateColumn {
        type_name: &'static str,
        column: String,
    },

    /// The statement would have an empty column list
    #[error("`{type_name}` has no columns to render")]
    NoColumns { type_name: &'static str },

    /// A row does not have one value per scan target
    #[error("Row has {actual} values but the model binds {expected} columns")]
    ColumnCount { expected: usize, actual: usize },

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },
}

impl OrmError {
    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(name: impl Into<String>) -> Self {
        Self::MissingField(name.into())
    }

    /// Create an unsupported field type error
    pub fn unsupported(field: impl Into<String>, kind: FieldKind) -> Self {
        Self::UnsupportedFieldType {
            field: field.into(),
            kind,
        }
    }

    /// Check if this is a missing field error
    pub fn is_missing_field(&self) -> bool {
        matches!(self, Self::MissingField(_))
    }

    /// Check if this is an unsupported field type error
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedFieldType { .. })
    }

    /// Check if this is a not-a-struct error
    pub fn is_not_a_struct(&self) -> bool {
        matches!(self, Self::NotAStruct { .. })
    }
}
