//! # VanType Schema
//!
//! Type model and manifest parser for TypeScript declaration generation.
//!
//! This crate provides:
//! - The source type model: type references, definitions, properties, enum members
//! - XML type manifest parsing
//! - A reflection layer over any [`TypeProvider`]
//! - Module validation

pub mod error;
pub mod module;
pub mod parser;
pub mod reflect;
pub mod type_expr;
pub mod types;
pub mod validation;

pub use error::{ParseError, SchemaError};
pub use module::Module;
pub use parser::{parse_module, parse_module_file};
pub use reflect::{Reflector, TypeProvider, TypeShape};
pub use type_expr::{parse_type_ref, parse_type_ref_in};
pub use types::{Builtin, EnumMember, PropertyDef, TypeDef, TypeKind, TypeRef};
pub use validation::validate_module;
