//! Property line generation, shared by interface and class declarations.

use crate::config::{DeclarationKind, Options, Registrations};
use crate::error::CodegenError;
use crate::resolver::TypeResolver;
use indexmap::IndexSet;
use vantype_schema::{PropertyDef, TypeDef, TypeRef};

/// Generator for the property lines of a declaration.
pub struct PropertyGenerator<'a> {
    resolver: &'a TypeResolver<'a>,
    options: &'a Options,
    registrations: &'a Registrations,
}

impl<'a> PropertyGenerator<'a> {
    /// Creates a new property generator.
    #[must_use]
    pub fn new(
        resolver: &'a TypeResolver<'a>,
        options: &'a Options,
        registrations: &'a Registrations,
    ) -> Self {
        Self {
            resolver,
            options,
            registrations,
        }
    }

    /// Generates the property lines of a type.
    ///
    /// Enums referenced by the emitted properties are added to `enums` when
    /// enum discovery is enabled.
    ///
    /// # Errors
    /// Returns `CodegenError::InvalidTransform` if a name transform yields a
    /// blank name.
    pub fn generate(
        &self,
        def: &TypeDef,
        kind: DeclarationKind,
        enums: &mut IndexSet<TypeRef>,
    ) -> Result<String, CodegenError> {
        let mut output = String::new();

        for (name, property) in self.properties(def)? {
            self.discover_enum(def, &property, enums);

            let ty = self.resolver.property_type(&property)?;
            match kind {
                DeclarationKind::Interface => {
                    output.push_str(&format!("    {}: {};\n", name, ty));
                }
                DeclarationKind::Class => {
                    let default_value = self.resolver.default_value(&property.ty);
                    output.push_str(&format!("    {}: {} = {};\n", name, ty, default_value));
                }
            }
        }

        Ok(output)
    }

    /// Returns the emitted properties with their emitted names, in output order.
    fn properties(&self, def: &TypeDef) -> Result<Vec<(String, PropertyDef)>, CodegenError> {
        let owner = def.type_ref();
        let reflector = self.resolver.reflector();
        let mut properties = Vec::new();

        for property in reflector.properties(def, self.options.preserve_inheritance) {
            if self.registrations.is_property_excluded(&owner, &property.name) {
                tracing::debug!("Excluding property {}.{}", def.name, property.name);
                continue;
            }
            let name = self.resolver.names().property_name(&property.name)?;
            properties.push((name, property));
        }

        if self.options.order_properties_by_name {
            properties.sort_by(|a, b| a.0.cmp(&b.0));
        }

        Ok(properties)
    }

    fn discover_enum(
        &self,
        def: &TypeDef,
        property: &PropertyDef,
        enums: &mut IndexSet<TypeRef>,
    ) {
        if !self.options.include_enums {
            return;
        }
        if let Some(enum_def) = self.resolver.reflector().enum_definition(&property.ty)
            && enums.insert(enum_def.type_ref())
        {
            tracing::debug!(
                "Discovered enum {} through {}.{}",
                enum_def.name,
                def.name,
                property.name
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::TypeConverter;
    use crate::naming::NameResolver;
    use vantype_schema::{Module, Reflector, parse_type_ref};

    fn shop() -> Module {
        Module::new("Shop")
            .with_type(
                TypeDef::enumeration("Status")
                    .with_member("InStock", 0)
                    .with_member("OutOfStock", 1),
            )
            .with_type(TypeDef::class("Tag"))
            .with_type(
                TypeDef::class("Entity")
                    .with_property(PropertyDef::new("Id", parse_type_ref("Guid").unwrap())),
            )
            .with_type(
                TypeDef::class("Product")
                    .with_base(TypeRef::named("Entity"))
                    .with_property(PropertyDef::new("Status", TypeRef::named("Status")))
                    .with_property(PropertyDef::new("Price", parse_type_ref("decimal").unwrap()))
                    .with_property(PropertyDef::new(
                        "Tags",
                        parse_type_ref("IEnumerable<Tag>").unwrap(),
                    ))
                    .with_property(PropertyDef::new("Main", TypeRef::named("Tag"))),
            )
    }

    fn generate(
        module: &Module,
        options: &Options,
        registrations: &Registrations,
        kind: DeclarationKind,
        enums: &mut IndexSet<TypeRef>,
    ) -> String {
        let converter = TypeConverter::new();
        let resolver = TypeResolver::new(
            Reflector::new(module),
            &converter,
            NameResolver::new(options, None, None),
            options,
        );
        let product = module.get_type("Product").unwrap();
        PropertyGenerator::new(&resolver, options, registrations)
            .generate(product, kind, enums)
            .unwrap()
    }

    #[test]
    fn test_interface_properties_sorted() {
        let module = shop();
        let options = Options::default();
        let mut enums = IndexSet::new();
        let output = generate(
            &module,
            &options,
            &Registrations::default(),
            DeclarationKind::Interface,
            &mut enums,
        );

        assert_eq!(
            output,
            "    id: string;\n    main: Tag | null;\n    price: number;\n    status: Status;\n    tags: Tag[];\n"
        );
        assert!(enums.contains(&TypeRef::named("Status")));
    }

    #[test]
    fn test_declaration_order_and_declared_only() {
        let module = shop();
        let options = Options {
            order_properties_by_name: false,
            preserve_inheritance: true,
            ..Options::default()
        };
        let mut enums = IndexSet::new();
        let output = generate(
            &module,
            &options,
            &Registrations::default(),
            DeclarationKind::Interface,
            &mut enums,
        );

        assert_eq!(
            output,
            "    status: Status;\n    price: number;\n    tags: Tag[];\n    main: Tag | null;\n"
        );
    }

    #[test]
    fn test_class_properties_with_defaults() {
        let module = shop();
        let options = Options::default();
        let mut enums = IndexSet::new();
        let output = generate(
            &module,
            &options,
            &Registrations::default(),
            DeclarationKind::Class,
            &mut enums,
        );

        assert!(output.contains("    id: string = '00000000-0000-0000-0000-000000000000';\n"));
        assert!(output.contains("    main: Tag | null = null;\n"));
        assert!(output.contains("    price: number = 0;\n"));
        assert!(output.contains("    status: Status = Status.InStock;\n"));
        assert!(output.contains("    tags: Tag[] = [];\n"));
    }

    #[test]
    fn test_excluded_property() {
        let module = shop();
        let options = Options::default();
        let mut registrations = Registrations::default();
        registrations
            .excluded_properties
            .insert((TypeRef::named("Product"), "Status".to_string()));
        let mut enums = IndexSet::new();
        let output = generate(
            &module,
            &options,
            &registrations,
            DeclarationKind::Interface,
            &mut enums,
        );

        assert!(!output.contains("status"));
        assert!(enums.is_empty());
    }

    #[test]
    fn test_enum_discovery_disabled() {
        let module = shop();
        let options = Options {
            include_enums: false,
            ..Options::default()
        };
        let mut enums = IndexSet::new();
        generate(
            &module,
            &options,
            &Registrations::default(),
            DeclarationKind::Interface,
            &mut enums,
        );
        assert!(enums.is_empty());
    }
}
