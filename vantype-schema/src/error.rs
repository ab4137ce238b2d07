//! Error types for manifest parsing and validation.

use thiserror::Error;

/// Error type for manifest and type-expression parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    /// XML parsing error.
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed XML escape sequence in an attribute value.
    #[error("XML escape error: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    /// Missing required attribute.
    #[error("missing required attribute '{attribute}' on element '{element}'")]
    MissingAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
    },

    /// Invalid attribute value.
    #[error("invalid value '{value}' for attribute '{attribute}' on element '{element}'")]
    InvalidAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
        /// Invalid value.
        value: String,
    },

    /// Unknown element encountered.
    #[error("unknown element '{element}' in context '{context}'")]
    UnknownElement {
        /// Element name.
        element: String,
        /// Parent context.
        context: String,
    },

    /// Malformed type expression.
    #[error("invalid type expression '{expression}': {message}")]
    InvalidTypeExpression {
        /// The offending expression.
        expression: String,
        /// What went wrong.
        message: String,
    },

    /// Duplicate definition.
    #[error("duplicate {kind} definition: '{name}'")]
    DuplicateDefinition {
        /// Kind of definition (type, property, etc.).
        kind: String,
        /// Name of the duplicate.
        name: String,
    },

    /// Invalid manifest structure.
    #[error("invalid manifest structure: {message}")]
    InvalidStructure {
        /// Error message.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Error type for manifest validation.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Referenced type not found.
    #[error("type '{name}' referenced by '{context}' not found")]
    TypeNotFound {
        /// Type name.
        name: String,
        /// Where the reference was made.
        context: String,
    },

    /// Duplicate definition.
    #[error("duplicate {kind} '{name}' in '{owner}'")]
    Duplicate {
        /// Kind of definition (type, property, member, ...).
        kind: String,
        /// Duplicated name.
        name: String,
        /// Owning type or module.
        owner: String,
    },

    /// Circular inheritance.
    #[error("circular inheritance detected: {path}")]
    CircularInheritance {
        /// Inheritance path that loops.
        path: String,
    },

    /// Generic argument count does not match the definition.
    #[error("type '{name}' expects {expected} generic argument(s), found {found} in '{context}'")]
    GenericArity {
        /// Generic definition name.
        name: String,
        /// Declared parameter count.
        expected: usize,
        /// Supplied argument count.
        found: usize,
        /// Where the reference was made.
        context: String,
    },

    /// Validation error.
    #[error("validation error: {message}")]
    Validation {
        /// Error message.
        message: String,
    },
}

impl ParseError {
    /// Creates a missing attribute error.
    pub fn missing_attr(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// Creates an invalid attribute error.
    pub fn invalid_attr(
        element: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidAttribute {
            element: element.into(),
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Creates an unknown element error.
    pub fn unknown_element(element: impl Into<String>, context: impl Into<String>) -> Self {
        Self::UnknownElement {
            element: element.into(),
            context: context.into(),
        }
    }

    /// Creates an invalid type expression error.
    pub fn type_expr(expression: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTypeExpression {
            expression: expression.into(),
            message: message.into(),
        }
    }

    /// Creates a duplicate definition error.
    pub fn duplicate(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateDefinition {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Creates an error for input that ends inside an open element.
    pub fn unexpected_eof(element: &str, name: &str) -> Self {
        Self::InvalidStructure {
            message: format!("unexpected end of input inside <{} name=\"{}\">", element, name),
        }
    }
}

impl SchemaError {
    /// Creates a duplicate definition error.
    pub fn duplicate(
        kind: impl Into<String>,
        name: impl Into<String>,
        owner: impl Into<String>,
    ) -> Self {
        Self::Duplicate {
            kind: kind.into(),
            name: name.into(),
            owner: owner.into(),
        }
    }

    /// Creates a generic validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
