//! Interface declaration generation.

use crate::config::{DeclarationKind, Options};
use crate::error::CodegenError;
use crate::resolver::TypeResolver;
use crate::typescript::properties::PropertyGenerator;
use indexmap::IndexSet;
use vantype_schema::{TypeDef, TypeRef};

/// Generator for interface declarations.
pub struct InterfaceGenerator<'a> {
    resolver: &'a TypeResolver<'a>,
    properties: &'a PropertyGenerator<'a>,
    options: &'a Options,
}

impl<'a> InterfaceGenerator<'a> {
    /// Creates a new interface generator.
    #[must_use]
    pub fn new(
        resolver: &'a TypeResolver<'a>,
        properties: &'a PropertyGenerator<'a>,
        options: &'a Options,
    ) -> Self {
        Self {
            resolver,
            properties,
            options,
        }
    }

    /// Generates an interface declaration.
    ///
    /// # Errors
    /// Returns `CodegenError::InvalidTransform` if a name transform yields a
    /// blank name.
    pub fn generate(
        &self,
        def: &TypeDef,
        enums: &mut IndexSet<TypeRef>,
    ) -> Result<String, CodegenError> {
        let mut output = String::new();
        let name = self.resolver.names().type_name(def)?;

        output.push_str(&format!("export interface {}", name));
        if self.options.preserve_inheritance
            && let Some(base) = self.resolver.base_name(def)?
        {
            output.push_str(&format!(" extends {}", base));
        }
        output.push('\n');
        output.push_str("{\n");
        output.push_str(
            &self
                .properties
                .generate(def, DeclarationKind::Interface, enums)?,
        );
        output.push_str("}\n");

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Registrations;
    use crate::mapping::TypeConverter;
    use crate::naming::NameResolver;
    use vantype_schema::{Module, PropertyDef, Reflector, parse_type_ref};

    fn shop() -> Module {
        Module::new("Shop")
            .with_type(
                TypeDef::class("Entity")
                    .with_property(PropertyDef::new("Id", parse_type_ref("int").unwrap())),
            )
            .with_type(
                TypeDef::class("Tag")
                    .with_base(TypeRef::named("Entity"))
                    .with_property(PropertyDef::new("Name", parse_type_ref("string").unwrap())),
            )
            .with_type(
                TypeDef::class("Lookup")
                    .with_param("T")
                    .with_property(PropertyDef::new("Id", TypeRef::parameter("T")))
                    .with_property(PropertyDef::new("Name", parse_type_ref("string").unwrap())),
            )
    }

    fn generate(module: &Module, options: &Options, name: &str) -> String {
        let converter = TypeConverter::new();
        let registrations = Registrations::default();
        let resolver = TypeResolver::new(
            Reflector::new(module),
            &converter,
            NameResolver::new(options, None, None),
            options,
        );
        let properties = PropertyGenerator::new(&resolver, options, &registrations);
        let mut enums = IndexSet::new();
        InterfaceGenerator::new(&resolver, &properties, options)
            .generate(module.get_type(name).unwrap(), &mut enums)
            .unwrap()
    }

    #[test]
    fn test_flattened_interface() {
        let module = shop();
        let output = generate(&module, &Options::default(), "Tag");
        assert_eq!(
            output,
            "export interface Tag\n{\n    id: number;\n    name: string | null;\n}\n"
        );
    }

    #[test]
    fn test_interface_with_extends() {
        let module = shop();
        let options = Options {
            preserve_inheritance: true,
            ..Options::default()
        };
        let output = generate(&module, &options, "Tag");
        assert_eq!(
            output,
            "export interface Tag extends Entity\n{\n    name: string | null;\n}\n"
        );
    }

    #[test]
    fn test_generic_definition_interface() {
        let module = shop();
        let output = generate(&module, &Options::default(), "Lookup");
        assert_eq!(
            output,
            "export interface Lookup<T>\n{\n    id: T | null;\n    name: string | null;\n}\n"
        );
    }
}
