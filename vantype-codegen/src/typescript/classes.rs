//! Class declaration generation.

use crate::config::{DeclarationKind, Options};
use crate::error::CodegenError;
use crate::resolver::TypeResolver;
use crate::typescript::properties::PropertyGenerator;
use indexmap::IndexSet;
use vantype_schema::{TypeDef, TypeRef};

/// Generator for class declarations.
pub struct ClassGenerator<'a> {
    resolver: &'a TypeResolver<'a>,
    properties: &'a PropertyGenerator<'a>,
    options: &'a Options,
}

impl<'a> ClassGenerator<'a> {
    /// Creates a new class generator.
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

    /// Generates a class declaration with an initializing constructor.
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
        let base = if self.options.preserve_inheritance {
            self.resolver.base_name(def)?
        } else {
            None
        };

        output.push_str(&format!("export class {}", name));
        if let Some(base) = &base {
            output.push_str(&format!(" extends {}", base));
        }
        output.push('\n');
        output.push_str("{\n");

        output.push_str(&format!("    constructor(init?: Partial<{}>) {{\n", name));
        if base.is_some() {
            output.push_str("        super();\n");
        }
        output.push_str("        Object.assign(this, init);\n");
        output.push_str("    }\n");

        output.push_str(
            &self
                .properties
                .generate(def, DeclarationKind::Class, enums)?,
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
                TypeDef::class("Tag")
                    .with_property(PropertyDef::new("Id", parse_type_ref("int").unwrap()))
                    .with_property(PropertyDef::new("Name", parse_type_ref("string").unwrap())),
            )
            .with_type(
                TypeDef::class("SpecialTag")
                    .with_base(TypeRef::named("Tag"))
                    .with_property(PropertyDef::new("Color", parse_type_ref("string").unwrap())),
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
        ClassGenerator::new(&resolver, &properties, options)
            .generate(module.get_type(name).unwrap(), &mut enums)
            .unwrap()
    }

    #[test]
    fn test_class_with_constructor_and_defaults() {
        let module = shop();
        let output = generate(&module, &Options::default(), "Tag");
        assert_eq!(
            output,
            "export class Tag\n{\n    constructor(init?: Partial<Tag>) {\n        Object.assign(this, init);\n    }\n    id: number = 0;\n    name: string | null = '';\n}\n"
        );
    }

    #[test]
    fn test_derived_class_calls_super() {
        let module = shop();
        let options = Options {
            preserve_inheritance: true,
            ..Options::default()
        };
        let output = generate(&module, &options, "SpecialTag");

        assert!(output.starts_with("export class SpecialTag extends Tag\n{\n"));
        assert!(output.contains("        super();\n        Object.assign(this, init);\n"));
        assert!(output.contains("    color: string | null = '';\n"));
        assert!(!output.contains("    id:"));
    }

    #[test]
    fn test_prefixed_class_name_in_constructor() {
        let module = shop();
        let options = Options {
            prefix_classes: true,
            ..Options::default()
        };
        let output = generate(&module, &options, "Tag");
        assert!(output.starts_with("export class ITag\n"));
        assert!(output.contains("constructor(init?: Partial<ITag>)"));
    }
}
