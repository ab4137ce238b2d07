//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use vantype::prelude::*;
//! ```

// Type model
pub use vantype_schema::{
    Builtin, EnumMember, Module, PropertyDef, TypeDef, TypeKind, TypeProvider, TypeRef,
};
pub use vantype_schema::{ParseError, SchemaError};
pub use vantype_schema::{parse_module, parse_module_file, parse_type_ref, validate_module};

// Generation
pub use vantype_codegen::{CodegenError, DeclarationKind, EnumConversion, Options, TypeScript};
pub use vantype_codegen::{generate_from_file, generate_from_xml, write_to_file};
