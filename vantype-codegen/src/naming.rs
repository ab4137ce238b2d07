//! Type and property naming.

use crate::config::Options;
use crate::error::CodegenError;
use vantype_schema::{TypeDef, TypeRef};

/// User-supplied name post-processing hook.
pub type NameTransform = Box<dyn Fn(&str) -> String>;

/// Prefix marker prepended by the prefix policies.
const PREFIX: &str = "I";

/// Computes emitted names for types and properties.
#[derive(Clone, Copy)]
pub struct NameResolver<'a> {
    options: &'a Options,
    class_transform: Option<&'a dyn Fn(&str) -> String>,
    property_transform: Option<&'a dyn Fn(&str) -> String>,
}

impl<'a> NameResolver<'a> {
    /// Creates a new name resolver.
    #[must_use]
    pub fn new(
        options: &'a Options,
        class_transform: Option<&'a dyn Fn(&str) -> String>,
        property_transform: Option<&'a dyn Fn(&str) -> String>,
    ) -> Self {
        Self {
            options,
            class_transform,
            property_transform,
        }
    }

    /// Returns the emitted name of a class or interface.
    ///
    /// Generic definitions render with their raw parameter names.
    ///
    /// # Errors
    /// Returns `CodegenError::InvalidTransform` if the class name transform
    /// yields a blank name.
    pub fn type_name(&self, def: &TypeDef) -> Result<String, CodegenError> {
        let base = self.prefixed(def);
        let name = if def.is_generic_definition() {
            format!("{}<{}>", base, def.generic_params.join(", "))
        } else {
            base
        };
        self.transform_class(name)
    }

    /// Returns the emitted name of a closed generic instantiation, given its
    /// already resolved arguments.
    ///
    /// # Errors
    /// Returns `CodegenError::InvalidTransform` if the class name transform
    /// yields a blank name.
    pub fn instance_name(&self, def: &TypeDef, args: &[String]) -> Result<String, CodegenError> {
        let name = format!("{}<{}>", self.prefixed(def), args.join(", "));
        self.transform_class(name)
    }

    /// Returns the emitted name of an enumeration. Enums are never prefixed
    /// or transformed.
    #[must_use]
    pub fn enum_name(&self, def: &TypeDef) -> String {
        def.name.clone()
    }

    /// Returns the emitted name of a type the provider does not describe:
    /// its source spelling, passed through the class name transform.
    ///
    /// # Errors
    /// Returns `CodegenError::InvalidTransform` if the class name transform
    /// yields a blank name.
    pub fn external_name(&self, ty: &TypeRef) -> Result<String, CodegenError> {
        self.transform_class(ty.to_string())
    }

    /// Returns the emitted name of a property: first character lower-cased,
    /// then the property name transform.
    ///
    /// # Errors
    /// Returns `CodegenError::InvalidTransform` if the property name transform
    /// yields a blank name.
    pub fn property_name(&self, name: &str) -> Result<String, CodegenError> {
        let mut chars = name.chars();
        let camel = match chars.next() {
            Some(first) => first.to_lowercase().chain(chars).collect(),
            None => String::new(),
        };

        match self.property_transform {
            Some(transform) => {
                let transformed = transform(&camel);
                if transformed.trim().is_empty() {
                    return Err(CodegenError::transform("property", camel));
                }
                Ok(transformed)
            }
            None => Ok(camel),
        }
    }

    fn prefixed(&self, def: &TypeDef) -> String {
        let prefix = if def.is_interface() {
            self.options.prefix_interfaces
        } else {
            self.options.prefix_classes
        };
        if prefix {
            format!("{}{}", PREFIX, def.name)
        } else {
            def.name.clone()
        }
    }

    fn transform_class(&self, name: String) -> Result<String, CodegenError> {
        match self.class_transform {
            Some(transform) => {
                let transformed = transform(&name);
                if transformed.trim().is_empty() {
                    return Err(CodegenError::transform("class", name));
                }
                Ok(transformed)
            }
            None => Ok(name),
        }
    }
}
