//! Error types for code generation.

use thiserror::Error;

/// Error type for configuration and generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Manifest or type expression parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] vantype_schema::ParseError),

    /// Manifest validation error.
    #[error("schema error: {0}")]
    Schema(#[from] vantype_schema::SchemaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A registration call named a type the provider cannot describe.
    #[error("cannot register '{type_name}': {message}")]
    InvalidRegistration {
        /// Registered type expression.
        type_name: String,
        /// Why the registration was rejected.
        message: String,
    },

    /// A type mapping entry is malformed.
    #[error("invalid mapping for '{type_name}': {message}")]
    InvalidMapping {
        /// Mapped source type.
        type_name: String,
        /// Why the mapping was rejected.
        message: String,
    },

    /// A name transform returned an empty or blank name.
    #[error("the {kind} name transform returned an empty name for '{name}'")]
    InvalidTransform {
        /// Which transform failed (`class` or `property`).
        kind: String,
        /// Name the transform was applied to.
        name: String,
    },

    /// Unknown enum conversion mode.
    #[error("unsupported enum conversion: '{value}'")]
    UnsupportedEnumConversion {
        /// Rejected mode name.
        value: String,
    },
}

impl CodegenError {
    /// Creates an invalid registration error.
    pub fn registration(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRegistration {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid mapping error.
    pub fn mapping(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidMapping {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid transform error.
    pub fn transform(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::InvalidTransform {
            kind: kind.into(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_display() {
        let err = CodegenError::transform("class", "Product");
        assert_eq!(
            err.to_string(),
            "the class name transform returned an empty name for 'Product'"
        );
    }

    #[test]
    fn test_from_parse_error() {
        let parse = vantype_schema::ParseError::missing_attr("module", "name");
        let err: CodegenError = parse.into();
        assert!(matches!(err, CodegenError::Parse(_)));
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: CodegenError = io.into();
        assert!(err.to_string().starts_with("IO error"));
    }
}
