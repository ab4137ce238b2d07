//! # VanType
//!
//! Generate TypeScript declarations from C#-style type models.
//!
//! VanType keeps client-side TypeScript definitions in sync with server-side
//! data models: it reads a static description of classes, interfaces and
//! enumerations and renders matching `interface`, `class` and `enum`
//! declarations.
//!
//! ## Features
//!
//! - **Type mapping** - Built-in mappings for strings, numbers, dates, GUIDs and booleans,
//!   overridable per type
//! - **Generics** - Open definitions render with their parameters, instantiations with
//!   resolved arguments
//! - **Inheritance** - Flattened properties or `extends` clauses with declared properties only
//! - **Enum discovery** - Enums referenced by properties are emitted automatically
//! - **Naming policies** - Prefixes, camel-cased properties and custom name transforms
//!
//! ## Quick Start
//!
//! ```ignore
//! use vantype::prelude::*;
//!
//! let module = parse_module(xml)?;
//! let output = TypeScript::config(&module)
//!     .add_type("ProductModel")?
//!     .preserve_inheritance(true)
//!     .generate_interfaces()?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Type model, XML manifest parsing, reflection and validation
//! - [`codegen`] - Type mapping, name and type resolution, declaration generation

pub mod prelude;

/// Type model, manifest parsing and validation.
pub mod schema {
    pub use vantype_schema::*;
}

/// TypeScript declaration generation.
pub mod codegen {
    pub use vantype_codegen::*;
}

// Re-export commonly used items at the crate root
pub use vantype_codegen::{
    CodegenError, DeclarationKind, EnumConversion, TypeScript, generate_from_file,
    generate_from_xml, write_to_file,
};
pub use vantype_schema::{Module, TypeProvider, parse_module, parse_module_file};
