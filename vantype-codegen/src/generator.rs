//! Main code generator.
//!
//! Output layout: import lines, then the root type declarations ordered by
//! inheritance depth and name, then the enum declarations.

use crate::config::{DeclarationKind, Options, Registrations};
use crate::error::CodegenError;
use crate::resolver::TypeResolver;
use crate::typescript::{ClassGenerator, EnumGenerator, InterfaceGenerator, PropertyGenerator};
use indexmap::IndexSet;
use vantype_schema::{TypeDef, TypeRef};

/// Generator producing the complete TypeScript output.
pub struct Generator<'a> {
    resolver: TypeResolver<'a>,
    options: &'a Options,
    registrations: &'a Registrations,
}

impl<'a> Generator<'a> {
    /// Creates a new generator.
    #[must_use]
    pub fn new(
        resolver: TypeResolver<'a>,
        options: &'a Options,
        registrations: &'a Registrations,
    ) -> Self {
        Self {
            resolver,
            options,
            registrations,
        }
    }

    /// Generates the complete output.
    ///
    /// `enums` starts as the registered enums; enums discovered while
    /// rendering properties are appended to it.
    ///
    /// # Errors
    /// Returns `CodegenError::InvalidTransform` if a name transform yields a
    /// blank name.
    pub fn generate(
        &self,
        kind: DeclarationKind,
        enums: &mut IndexSet<TypeRef>,
    ) -> Result<String, CodegenError> {
        let mut output = String::new();

        output.push_str(&self.generate_imports()?);
        output.push_str(&self.generate_types(kind, enums)?);
        output.push_str(&self.generate_enums(enums));

        Ok(output)
    }

    /// Generates one import line per registered import.
    fn generate_imports(&self) -> Result<String, CodegenError> {
        let mut output = String::new();

        for (ty, path) in &self.registrations.imports {
            let name = self.resolver.import_name(ty)?;
            output.push_str(&format!("import {{ {} }} from '{}';\n", name, path));
        }
        if !self.registrations.imports.is_empty() {
            output.push('\n');
        }

        Ok(output)
    }

    /// Generates the root type declarations.
    fn generate_types(
        &self,
        kind: DeclarationKind,
        enums: &mut IndexSet<TypeRef>,
    ) -> Result<String, CodegenError> {
        let properties = PropertyGenerator::new(&self.resolver, self.options, self.registrations);
        let interfaces = InterfaceGenerator::new(&self.resolver, &properties, self.options);
        let classes = ClassGenerator::new(&self.resolver, &properties, self.options);
        let enum_generator =
            EnumGenerator::new(self.resolver.names(), self.options.enum_conversion);

        let mut output = String::new();
        for def in self.root_types() {
            let declaration = if def.is_enum() {
                enum_generator.generate(def)
            } else {
                match kind {
                    DeclarationKind::Interface => interfaces.generate(def, enums)?,
                    DeclarationKind::Class => classes.generate(def, enums)?,
                }
            };
            output.push_str(&declaration);
            output.push('\n');
        }

        Ok(output)
    }

    /// Generates the enum declarations, in first-seen order.
    fn generate_enums(&self, enums: &IndexSet<TypeRef>) -> String {
        let reflector = self.resolver.reflector();
        let generator = EnumGenerator::new(self.resolver.names(), self.options.enum_conversion);

        let mut output = String::new();
        for ty in enums {
            let Some(def) = reflector.definition(ty).filter(|def| def.is_enum()) else {
                tracing::debug!("Skipping enum {}: not described by the provider", ty);
                continue;
            };
            if self.registrations.is_excluded(ty, &def.name) {
                tracing::debug!("Skipping excluded enum {}", ty);
                continue;
            }
            output.push_str(&generator.generate(def));
            output.push('\n');
        }

        output
    }

    /// Returns the root types to declare, bases before derived types.
    ///
    /// Nested types, closed generic instantiations and excluded types are
    /// skipped.
    fn root_types(&self) -> Vec<&'a TypeDef> {
        let reflector = self.resolver.reflector();
        let mut roots = Vec::new();

        for ty in &self.registrations.types {
            let Some(def) = reflector.definition(ty) else {
                tracing::debug!("Skipping {}: not described by the provider", ty);
                continue;
            };
            if def.is_nested() {
                tracing::debug!("Skipping nested type {}", ty);
                continue;
            }
            if matches!(ty, TypeRef::Generic { .. }) {
                tracing::debug!("Skipping closed generic type {}", ty);
                continue;
            }
            if self.registrations.is_excluded(ty, &def.name) {
                tracing::debug!("Skipping excluded type {}", ty);
                continue;
            }
            roots.push((reflector.inheritance_depth(ty), def));
        }

        roots.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.name.cmp(&b.1.name)));
        roots.into_iter().map(|(_, def)| def).collect()
    }
}
