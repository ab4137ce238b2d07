//! TypeScript generation configuration builder.
//!
//! ```ignore
//! let module = vantype_schema::parse_module(xml)?;
//! let output = TypeScript::config(&module)
//!     .add_type("ProductModel")?
//!     .import_type("Tag", "../tag")?
//!     .preserve_inheritance(true)
//!     .generate_interfaces()?;
//! ```

use crate::config::{DeclarationKind, EnumConversion, Options, Registrations};
use crate::error::CodegenError;
use crate::generator::Generator;
use crate::mapping::TypeConverter;
use crate::naming::{NameResolver, NameTransform};
use crate::resolver::TypeResolver;
use vantype_schema::{Reflector, TypeProvider, TypeRef, parse_type_ref};

/// Configuration of a TypeScript generation run.
///
/// Switches take and return the builder; registrations that validate their
/// input return `Result<Self, CodegenError>`, so a rejected call leaves no
/// trace in the configuration.
pub struct TypeScript<'a> {
    provider: &'a dyn TypeProvider,
    converter: TypeConverter,
    options: Options,
    registrations: Registrations,
    class_transform: Option<NameTransform>,
    property_transform: Option<NameTransform>,
}

impl<'a> TypeScript<'a> {
    /// Creates a configuration with default options and the built-in type
    /// mappings.
    #[must_use]
    pub fn config(provider: &'a dyn TypeProvider) -> Self {
        Self {
            provider,
            converter: TypeConverter::new(),
            options: Options::default(),
            registrations: Registrations::default(),
            class_transform: None,
            property_transform: None,
        }
    }

    /// Registers a root type given as a type expression.
    ///
    /// Enumerations go to the enum section instead of the root types.
    ///
    /// # Errors
    /// Returns `CodegenError::Parse` for a malformed expression and
    /// `CodegenError::InvalidRegistration` if the provider does not describe
    /// the type.
    pub fn add_type(self, expr: &str) -> Result<Self, CodegenError> {
        let ty = parse_type_ref(expr)?;
        self.add_type_ref(ty)
    }

    /// Registers a root type.
    ///
    /// # Errors
    /// Returns `CodegenError::InvalidRegistration` if the reference is not a
    /// user-defined type described by the provider.
    pub fn add_type_ref(mut self, ty: TypeRef) -> Result<Self, CodegenError> {
        if !matches!(ty, TypeRef::Named(_) | TypeRef::Generic { .. }) {
            return Err(CodegenError::registration(
                ty.to_string(),
                "only user-defined types can be registered",
            ));
        }
        let Some(def) = Reflector::new(self.provider).definition(&ty) else {
            return Err(CodegenError::registration(
                ty.to_string(),
                "type is not described by the provider",
            ));
        };

        let added = if def.is_enum() {
            self.registrations.add_enum(ty.clone())
        } else {
            self.registrations.add_type(ty.clone())
        };
        if added {
            tracing::debug!("Registered {:?} {}", def.kind, ty);
        }
        Ok(self)
    }

    /// Registers every concrete class of the provider, in declaration order.
    #[must_use]
    pub fn add_module(mut self) -> Self {
        for def in self.provider.type_defs() {
            if def.is_class() && !def.is_abstract && self.registrations.add_type(def.type_ref()) {
                tracing::debug!("Registered {:?} {}", def.kind, def.name);
            }
        }
        self
    }

    /// Adds or replaces the mapping of a source type.
    ///
    /// # Errors
    /// Returns `CodegenError::Parse` for a malformed expression and
    /// `CodegenError::InvalidMapping` for a blank script type or default value.
    pub fn add_type_converter(
        mut self,
        expr: &str,
        script_type: &str,
        default_value: &str,
        is_nullable: bool,
    ) -> Result<Self, CodegenError> {
        let ty = parse_type_ref(expr)?;
        self.converter
            .add_or_replace_mapping(ty, script_type, default_value, is_nullable)?;
        Ok(self)
    }

    /// Excludes a type by identity.
    ///
    /// # Errors
    /// Returns `CodegenError::Parse` for a malformed expression.
    pub fn exclude_type(mut self, expr: &str) -> Result<Self, CodegenError> {
        let ty = parse_type_ref(expr)?;
        tracing::debug!("Excluding type {}", ty);
        self.registrations.excluded_types.insert(ty);
        Ok(self)
    }

    /// Excludes every type with the given raw name.
    #[must_use]
    pub fn exclude_type_name(mut self, name: impl Into<String>) -> Self {
        self.registrations.excluded_names.insert(name.into());
        self
    }

    /// Excludes a property of one type.
    ///
    /// # Errors
    /// Returns `CodegenError::Parse` for a malformed expression.
    pub fn exclude_property(
        mut self,
        expr: &str,
        property: impl Into<String>,
    ) -> Result<Self, CodegenError> {
        let ty = parse_type_ref(expr)?;
        self.registrations
            .excluded_properties
            .insert((ty, property.into()));
        Ok(self)
    }

    /// Records an import line for a type declared elsewhere. Later imports of
    /// the same type are ignored.
    ///
    /// # Errors
    /// Returns `CodegenError::Parse` for a malformed expression.
    pub fn import_type(
        mut self,
        expr: &str,
        relative_path: impl Into<String>,
    ) -> Result<Self, CodegenError> {
        let ty = parse_type_ref(expr)?;
        self.registrations.add_import(ty, relative_path);
        Ok(self)
    }

    /// Adds enums referenced by properties to the output.
    #[must_use]
    pub fn include_enums(mut self, value: bool) -> Self {
        self.options.include_enums = value;
        self
    }

    /// Renders user-defined property types as `| null` unions.
    #[must_use]
    pub fn make_all_properties_nullable(mut self, value: bool) -> Self {
        self.options.make_all_properties_nullable = value;
        self
    }

    /// Sorts properties by emitted name.
    #[must_use]
    pub fn order_properties_by_name(mut self, value: bool) -> Self {
        self.options.order_properties_by_name = value;
        self
    }

    /// Prefixes class names with `I`.
    #[must_use]
    pub fn prefix_classes(mut self, value: bool) -> Self {
        self.options.prefix_classes = value;
        self
    }

    /// Prefixes interface names with `I`.
    #[must_use]
    pub fn prefix_interfaces(mut self, value: bool) -> Self {
        self.options.prefix_interfaces = value;
        self
    }

    /// Renders `extends` clauses and only declared properties.
    #[must_use]
    pub fn preserve_inheritance(mut self, value: bool) -> Self {
        self.options.preserve_inheritance = value;
        self
    }

    /// Selects the enum member rendering.
    #[must_use]
    pub fn use_enum_conversion(mut self, conversion: EnumConversion) -> Self {
        self.options.enum_conversion = conversion;
        self
    }

    /// Post-processes class and interface names. A blank result fails
    /// generation.
    #[must_use]
    pub fn transform_class_name(mut self, transform: impl Fn(&str) -> String + 'static) -> Self {
        self.class_transform = Some(Box::new(transform));
        self
    }

    /// Post-processes property names. A blank result fails generation.
    #[must_use]
    pub fn transform_property_name(
        mut self,
        transform: impl Fn(&str) -> String + 'static,
    ) -> Self {
        self.property_transform = Some(Box::new(transform));
        self
    }

    /// Returns the current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Returns the current registrations.
    #[must_use]
    pub fn registrations(&self) -> &Registrations {
        &self.registrations
    }

    /// Returns the type mapping table.
    #[must_use]
    pub fn converter(&self) -> &TypeConverter {
        &self.converter
    }

    /// Generates interface declarations.
    ///
    /// # Errors
    /// See [`TypeScript::generate`].
    pub fn generate_interfaces(&mut self) -> Result<String, CodegenError> {
        self.generate(DeclarationKind::Interface)
    }

    /// Generates class declarations.
    ///
    /// # Errors
    /// See [`TypeScript::generate`].
    pub fn generate_classes(&mut self) -> Result<String, CodegenError> {
        self.generate(DeclarationKind::Class)
    }

    /// Generates the complete output.
    ///
    /// Enums discovered through properties are remembered, so a later call
    /// emits at least the enums of an earlier one. A failed call remembers
    /// nothing.
    ///
    /// # Errors
    /// Returns `CodegenError::InvalidTransform` if a name transform yields a
    /// blank name; no output is produced.
    pub fn generate(&mut self, kind: DeclarationKind) -> Result<String, CodegenError> {
        tracing::debug!(
            "Generating {:?} declarations for {} types",
            kind,
            self.registrations.types.len()
        );

        let mut enums = self.registrations.enums.clone();
        let output = {
            let names = NameResolver::new(
                &self.options,
                self.class_transform.as_deref(),
                self.property_transform.as_deref(),
            );
            let resolver = TypeResolver::new(
                Reflector::new(self.provider),
                &self.converter,
                names,
                &self.options,
            );
            Generator::new(resolver, &self.options, &self.registrations).generate(kind, &mut enums)?
        };

        self.registrations.enums = enums;
        Ok(output)
    }
}
