//! # VanType Codegen
//!
//! TypeScript declaration generation from VanType type models.
//!
//! This crate provides:
//! - The type mapping table with the built-in source-to-TypeScript mappings
//! - The [`TypeScript`] configuration builder
//! - Type and property name resolution
//! - Interface, class and enum declaration generation
//! - Convenience entry points for XML manifests

pub mod builder;
pub mod config;
pub mod error;
pub mod generator;
pub mod mapping;
pub mod naming;
pub mod resolver;
pub mod typescript;

pub use builder::TypeScript;
pub use config::{DeclarationKind, EnumConversion, Options, Registrations};
pub use error::CodegenError;
pub use generator::Generator;
pub use mapping::{TypeConverter, TypeMapping};
pub use naming::{NameResolver, NameTransform};
pub use resolver::TypeResolver;

use std::path::Path;

/// Generates TypeScript interfaces from an XML type manifest string.
///
/// Every concrete class of the manifest is registered with the default
/// options.
///
/// # Arguments
/// * `xml` - XML manifest content
///
/// # Returns
/// Generated TypeScript declarations as a string.
///
/// # Errors
/// Returns `CodegenError` if parsing, validation, or generation fails.
pub fn generate_from_xml(xml: &str) -> Result<String, CodegenError> {
    let module = vantype_schema::parse_module(xml)?;
    vantype_schema::validate_module(&module)?;
    tracing::info!(
        "Generating declarations for module {} ({} types)",
        module.name,
        module.types.len()
    );
    TypeScript::config(&module).add_module().generate_interfaces()
}

/// Generates TypeScript interfaces from an XML type manifest file.
///
/// # Arguments
/// * `path` - Path to the XML manifest file
///
/// # Returns
/// Generated TypeScript declarations as a string.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, validation, or generation fails.
pub fn generate_from_file(path: &Path) -> Result<String, CodegenError> {
    let xml = std::fs::read_to_string(path)?;
    generate_from_xml(&xml)
}

/// Generates declarations with the given configuration and writes them to
/// `path`.
///
/// # Errors
/// Returns `CodegenError` if generation or writing fails; nothing is written
/// when generation fails.
pub fn write_to_file(
    config: &mut TypeScript<'_>,
    kind: DeclarationKind,
    path: &Path,
) -> Result<(), CodegenError> {
    let output = config.generate(kind)?;
    std::fs::write(path, &output)?;
    tracing::info!("Wrote {} bytes to {}", output.len(), path.display());
    Ok(())
}
