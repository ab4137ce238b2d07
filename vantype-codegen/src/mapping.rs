//! Type mapping table.
//!
//! Maps source types to a TypeScript type name, a default value literal used
//! by class declarations, and a nullability flag.

use crate::error::CodegenError;
use indexmap::IndexMap;
use vantype_schema::{Builtin, TypeRef};

/// Numeric built-ins, all rendered as `number`.
const NUMERIC_TYPES: &[Builtin] = &[
    Builtin::Byte,
    Builtin::SByte,
    Builtin::Decimal,
    Builtin::Double,
    Builtin::Single,
    Builtin::Int32,
    Builtin::UInt32,
    Builtin::Int64,
    Builtin::UInt64,
    Builtin::Int16,
    Builtin::UInt16,
];

/// A single source-to-TypeScript mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMapping {
    /// Source type.
    pub source: TypeRef,
    /// TypeScript type name.
    pub script_type: String,
    /// Default value literal.
    pub default_value: String,
    /// Whether the rendered type is a union with `null`.
    pub is_nullable: bool,
}

impl TypeMapping {
    /// Creates a new mapping.
    ///
    /// # Errors
    /// Returns `CodegenError::InvalidMapping` if the script type or the default
    /// value is empty or whitespace.
    pub fn new(
        source: TypeRef,
        script_type: impl Into<String>,
        default_value: impl Into<String>,
        is_nullable: bool,
    ) -> Result<Self, CodegenError> {
        let script_type = script_type.into();
        let default_value = default_value.into();

        if script_type.trim().is_empty() {
            return Err(CodegenError::mapping(
                source.to_string(),
                "script type cannot be empty",
            ));
        }
        if default_value.trim().is_empty() {
            return Err(CodegenError::mapping(
                source.to_string(),
                "default value cannot be empty",
            ));
        }

        Ok(Self {
            source,
            script_type,
            default_value,
            is_nullable,
        })
    }

    /// Renders the scalar form, with `| null` when nullable.
    #[must_use]
    pub fn generate_type(&self) -> String {
        if self.is_nullable {
            format!("{} | null", self.script_type)
        } else {
            self.script_type.clone()
        }
    }

    /// Renders the array form.
    #[must_use]
    pub fn generate_array_type(&self) -> String {
        format!("{}[]", self.script_type)
    }

    /// Built-in mapping; the literals are known to be valid.
    fn seed(source: TypeRef, script_type: &str, default_value: &str, is_nullable: bool) -> Self {
        Self {
            source,
            script_type: script_type.to_string(),
            default_value: default_value.to_string(),
            is_nullable,
        }
    }
}

/// Mapping table keyed by source type.
#[derive(Debug, Clone)]
pub struct TypeConverter {
    mappings: IndexMap<TypeRef, TypeMapping>,
}

impl TypeConverter {
    /// Creates a converter pre-seeded with the built-in mappings.
    #[must_use]
    pub fn new() -> Self {
        let mut mappings = IndexMap::new();
        for mapping in Self::seed_mappings() {
            mappings.insert(mapping.source.clone(), mapping);
        }
        Self { mappings }
    }

    fn seed_mappings() -> Vec<TypeMapping> {
        let nullable = |b: Builtin| TypeRef::nullable(b.into());
        let mut seed = vec![
            TypeMapping::seed(Builtin::String.into(), "string", "''", true),
            TypeMapping::seed(Builtin::Object.into(), "object", "null", true),
            TypeMapping::seed(Builtin::DateTime.into(), "Date", "new Date()", false),
            TypeMapping::seed(nullable(Builtin::DateTime), "Date", "null", true),
            TypeMapping::seed(
                Builtin::Guid.into(),
                "string",
                "'00000000-0000-0000-0000-000000000000'",
                false,
            ),
            TypeMapping::seed(nullable(Builtin::Guid), "string", "null", true),
            TypeMapping::seed(Builtin::Boolean.into(), "boolean", "false", false),
            TypeMapping::seed(nullable(Builtin::Boolean), "boolean", "null", true),
        ];
        for &numeric in NUMERIC_TYPES {
            seed.push(TypeMapping::seed(numeric.into(), "number", "0", false));
            seed.push(TypeMapping::seed(nullable(numeric), "number", "null", true));
        }
        seed
    }

    /// Adds a mapping, replacing any existing mapping for the same source type
    /// in place.
    ///
    /// # Errors
    /// Returns `CodegenError::InvalidMapping` if the mapping is malformed; the
    /// table is left unchanged.
    pub fn add_or_replace_mapping(
        &mut self,
        source: TypeRef,
        script_type: impl Into<String>,
        default_value: impl Into<String>,
        is_nullable: bool,
    ) -> Result<(), CodegenError> {
        let mapping = TypeMapping::new(source, script_type, default_value, is_nullable)?;
        tracing::debug!(
            "Mapping {} to {}",
            mapping.source,
            mapping.generate_type()
        );
        self.mappings.insert(mapping.source.clone(), mapping);
        Ok(())
    }

    /// Looks up the mapping for a source type.
    #[must_use]
    pub fn get_mapping(&self, source: &TypeRef) -> Option<&TypeMapping> {
        self.mappings.get(source)
    }

    /// Returns the number of mappings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    /// Returns true if the table has no mapping.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Iterates over mappings in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeMapping> {
        self.mappings.values()
    }
}

impl Default for TypeConverter {
    fn default() -> Self {
        Self::new()
    }
}
