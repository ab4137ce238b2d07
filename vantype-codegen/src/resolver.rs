//! Type resolution.
//!
//! Turns source type references into TypeScript type expressions, in this
//! order of precedence:
//!
//! 1. a mapping registered for the exact reference
//! 2. `T?` without a mapping resolves as `T`
//! 3. enumerations resolve to their name
//! 4. iterables resolve to `Element[]` (`any[]` when the element is unknown)
//! 5. generic definitions resolve to `Name<T>`, instantiations to
//!    `Name<ResolvedArg>`
//! 6. classes resolve to their emitted name, interfaces to their bare name,
//!    generic parameters to the parameter name
//! 7. anything else is `any`

use crate::config::Options;
use crate::error::CodegenError;
use crate::mapping::TypeConverter;
use crate::naming::NameResolver;
use vantype_schema::{PropertyDef, Reflector, TypeDef, TypeRef, TypeShape};

/// Untyped expression.
const ANY: &str = "any";
/// Nullable union suffix.
const NULL_UNION: &str = " | null";

/// Resolves type references to TypeScript type expressions.
#[derive(Clone, Copy)]
pub struct TypeResolver<'a> {
    reflector: Reflector<'a>,
    converter: &'a TypeConverter,
    names: NameResolver<'a>,
    options: &'a Options,
}

impl<'a> TypeResolver<'a> {
    /// Creates a new type resolver.
    #[must_use]
    pub fn new(
        reflector: Reflector<'a>,
        converter: &'a TypeConverter,
        names: NameResolver<'a>,
        options: &'a Options,
    ) -> Self {
        Self {
            reflector,
            converter,
            names,
            options,
        }
    }

    /// Returns the reflector.
    #[must_use]
    pub fn reflector(&self) -> Reflector<'a> {
        self.reflector
    }

    /// Returns the name resolver.
    #[must_use]
    pub fn names(&self) -> &NameResolver<'a> {
        &self.names
    }

    /// Resolves a type reference to a TypeScript type expression.
    ///
    /// # Errors
    /// Returns `CodegenError::InvalidTransform` if a name transform yields a
    /// blank name for a type mentioned by the reference.
    pub fn resolve(&self, ty: &TypeRef) -> Result<String, CodegenError> {
        if let Some(mapping) = self.converter.get_mapping(ty) {
            return Ok(mapping.generate_type());
        }
        if let TypeRef::Nullable(inner) = ty {
            return self.resolve(inner);
        }

        let resolved = match self.reflector.classify(ty) {
            TypeShape::Enum(def) => self.names.enum_name(def),
            TypeShape::Iterable(Some(element)) => match self.converter.get_mapping(&element) {
                Some(mapping) => mapping.generate_array_type(),
                None => format!("{}[]", self.resolve(&element)?),
            },
            TypeShape::Iterable(None) => format!("{}[]", ANY),
            TypeShape::GenericDefinition(def) | TypeShape::Class(def) => {
                self.names.type_name(def)?
            }
            TypeShape::GenericInstance(def, args) => {
                let args = self.resolve_all(args)?;
                self.names.instance_name(def, &args)?
            }
            TypeShape::Parameter(name) => name.to_string(),
            TypeShape::Interface(def) => def.name.clone(),
            TypeShape::Builtin(_) | TypeShape::Unknown => ANY.to_string(),
        };

        tracing::trace!("Resolved {} to {}", ty, resolved);
        Ok(resolved)
    }

    fn resolve_all(&self, types: &[TypeRef]) -> Result<Vec<String>, CodegenError> {
        types.iter().map(|ty| self.resolve(ty)).collect()
    }

    /// Resolves the type of a property, adding `| null` where the property
    /// is nullable.
    ///
    /// Mapped types carry their own nullability. Nullable enums are always
    /// nullable and plain enums never are. Other user-defined types are
    /// nullable when the property is declared nullable or every property is
    /// made nullable, unless the expression already is an array or a union
    /// with `null`.
    ///
    /// # Errors
    /// Returns `CodegenError::InvalidTransform` if a name transform yields a
    /// blank name.
    pub fn property_type(&self, property: &PropertyDef) -> Result<String, CodegenError> {
        let resolved = self.resolve(&property.ty)?;
        if self.converter.get_mapping(&property.ty).is_some() {
            return Ok(resolved);
        }

        let nullable = match self.reflector.classify(&property.ty) {
            TypeShape::Enum(_) => property.ty.is_nullable(),
            TypeShape::Class(_)
            | TypeShape::Interface(_)
            | TypeShape::GenericDefinition(_)
            | TypeShape::GenericInstance(..)
            | TypeShape::Parameter(_)
            | TypeShape::Unknown => {
                property.nullable || self.options.make_all_properties_nullable
            }
            TypeShape::Builtin(_) | TypeShape::Iterable(_) => false,
        };

        Ok(with_null(resolved, nullable))
    }

    /// Returns the default value literal of a property type, used by class
    /// declarations.
    #[must_use]
    pub fn default_value(&self, ty: &TypeRef) -> String {
        if let Some(mapping) = self.converter.get_mapping(ty) {
            return mapping.default_value.clone();
        }

        match self.reflector.classify(ty) {
            TypeShape::Enum(def) if !ty.is_nullable() => match def.members.first() {
                Some(first) => format!("{}.{}", self.names.enum_name(def), first.name),
                None => "null".to_string(),
            },
            TypeShape::Iterable(_) => "[]".to_string(),
            _ => "null".to_string(),
        }
    }

    /// Returns the name rendered after `extends`, if the type has a
    /// user-defined base.
    ///
    /// # Errors
    /// Returns `CodegenError::InvalidTransform` if a name transform yields a
    /// blank name.
    pub fn base_name(&self, def: &TypeDef) -> Result<Option<String>, CodegenError> {
        let Some(base) = &def.base else {
            return Ok(None);
        };
        match (self.reflector.definition(base), base) {
            (Some(base_def), _) if base_def.is_enum() => Ok(None),
            (Some(base_def), TypeRef::Generic { args, .. }) => {
                let args = self.resolve_all(args)?;
                Ok(Some(self.names.instance_name(base_def, &args)?))
            }
            (Some(base_def), _) => Ok(Some(self.names.type_name(base_def)?)),
            (None, _) => Ok(None),
        }
    }

    /// Returns the name an import line refers to.
    ///
    /// # Errors
    /// Returns `CodegenError::InvalidTransform` if a name transform yields a
    /// blank name.
    pub fn import_name(&self, ty: &TypeRef) -> Result<String, CodegenError> {
        match (self.reflector.definition(ty), ty) {
            (Some(def), _) if def.is_enum() => Ok(self.names.enum_name(def)),
            (Some(def), TypeRef::Generic { args, .. }) => {
                let args = self.resolve_all(args)?;
                self.names.instance_name(def, &args)
            }
            (Some(def), _) => self.names.type_name(def),
            (None, _) => self.names.external_name(ty),
        }
    }
}

/// Appends the `null` union unless the expression is an array or already
/// nullable.
fn with_null(resolved: String, nullable: bool) -> String {
    if nullable && !resolved.ends_with("[]") && !resolved.ends_with(NULL_UNION) {
        format!("{}{}", resolved, NULL_UNION)
    } else {
        resolved
    }
}
