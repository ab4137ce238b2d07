//! Generation options and registration state.

use crate::error::CodegenError;
use indexmap::{IndexMap, IndexSet};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use vantype_schema::TypeRef;

/// How enumeration members are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EnumConversion {
    /// `Member = 0,`
    #[default]
    Numeric,
    /// `Member = 'Member',`
    String,
}

impl FromStr for EnumConversion {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "numeric" | "number" => Ok(Self::Numeric),
            "string" => Ok(Self::String),
            _ => Err(CodegenError::UnsupportedEnumConversion {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for EnumConversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric => f.write_str("numeric"),
            Self::String => f.write_str("string"),
        }
    }
}

/// Kind of declaration emitted for root types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    /// `export interface`
    Interface,
    /// `export class` with constructor and default values.
    Class,
}

/// Policy switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Add enums referenced by properties to the output.
    pub include_enums: bool,
    /// Render user-defined property types as `| null` unions.
    pub make_all_properties_nullable: bool,
    /// Sort properties by emitted name.
    pub order_properties_by_name: bool,
    /// Prefix class names with `I`.
    pub prefix_classes: bool,
    /// Prefix interface names with `I`.
    pub prefix_interfaces: bool,
    /// Render `extends` and emit declared properties only.
    pub preserve_inheritance: bool,
    /// Enum member rendering.
    pub enum_conversion: EnumConversion,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            include_enums: true,
            make_all_properties_nullable: true,
            order_properties_by_name: true,
            prefix_classes: false,
            prefix_interfaces: false,
            preserve_inheritance: false,
            enum_conversion: EnumConversion::Numeric,
        }
    }
}

/// Registered types, exclusions and imports.
#[derive(Debug, Clone, Default)]
pub struct Registrations {
    /// Root types, in registration order.
    pub types: IndexSet<TypeRef>,
    /// Enumerations, registered or discovered, in first-seen order.
    pub enums: IndexSet<TypeRef>,
    /// Types excluded by identity.
    pub excluded_types: HashSet<TypeRef>,
    /// Types excluded by raw name.
    pub excluded_names: HashSet<String>,
    /// Properties excluded per owning type.
    pub excluded_properties: HashSet<(TypeRef, String)>,
    /// Import paths, first registration wins.
    pub imports: IndexMap<TypeRef, String>,
}

impl Registrations {
    /// Adds a root type. Returns false if it was already registered.
    pub fn add_type(&mut self, ty: TypeRef) -> bool {
        self.types.insert(ty)
    }

    /// Adds an enumeration. Returns false if it was already present.
    pub fn add_enum(&mut self, ty: TypeRef) -> bool {
        self.enums.insert(ty)
    }

    /// Records an import unless one exists for the type.
    pub fn add_import(&mut self, ty: TypeRef, path: impl Into<String>) -> bool {
        if self.imports.contains_key(&ty) {
            return false;
        }
        self.imports.insert(ty, path.into());
        true
    }

    /// Returns true if the type is excluded by identity or by name.
    #[must_use]
    pub fn is_excluded(&self, ty: &TypeRef, name: &str) -> bool {
        self.excluded_types.contains(ty) || self.excluded_names.contains(name)
    }

    /// Returns true if the property is excluded for the owning type.
    #[must_use]
    pub fn is_property_excluded(&self, owner: &TypeRef, property: &str) -> bool {
        self.excluded_properties
            .contains(&(owner.clone(), property.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = Options::default();
        assert!(options.include_enums);
        assert!(options.make_all_properties_nullable);
        assert!(options.order_properties_by_name);
        assert!(!options.prefix_classes);
        assert!(!options.prefix_interfaces);
        assert!(!options.preserve_inheritance);
        assert_eq!(options.enum_conversion, EnumConversion::Numeric);
    }

    #[test]
    fn test_enum_conversion_from_str() {
        assert_eq!(
            "numeric".parse::<EnumConversion>().unwrap(),
            EnumConversion::Numeric
        );
        assert_eq!(
            " String ".parse::<EnumConversion>().unwrap(),
            EnumConversion::String
        );
        assert!(matches!(
            "hex".parse::<EnumConversion>(),
            Err(CodegenError::UnsupportedEnumConversion { .. })
        ));
    }

    #[test]
    fn test_enum_conversion_display() {
        assert_eq!(EnumConversion::String.to_string(), "string");
        assert_eq!(
            EnumConversion::Numeric
                .to_string()
                .parse::<EnumConversion>()
                .unwrap(),
            EnumConversion::Numeric
        );
    }

    #[test]
    fn test_registration_order_and_duplicates() {
        let mut registrations = Registrations::default();
        assert!(registrations.add_type(TypeRef::named("B")));
        assert!(registrations.add_type(TypeRef::named("A")));
        assert!(!registrations.add_type(TypeRef::named("B")));

        let names: Vec<_> = registrations.types.iter().map(TypeRef::name).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_first_import_wins() {
        let mut registrations = Registrations::default();
        assert!(registrations.add_import(TypeRef::named("Tag"), "./tag"));
        assert!(!registrations.add_import(TypeRef::named("Tag"), "./other"));
        assert_eq!(
            registrations.imports.get(&TypeRef::named("Tag")).map(String::as_str),
            Some("./tag")
        );
    }

    #[test]
    fn test_exclusions() {
        let mut registrations = Registrations::default();
        registrations.excluded_types.insert(TypeRef::named("Audit"));
        registrations.excluded_names.insert("Secret".to_string());
        registrations
            .excluded_properties
            .insert((TypeRef::named("Product"), "Price".to_string()));

        assert!(registrations.is_excluded(&TypeRef::named("Audit"), "Audit"));
        assert!(registrations.is_excluded(&TypeRef::named("Secret"), "Secret"));
        assert!(!registrations.is_excluded(&TypeRef::named("Tag"), "Tag"));
        assert!(registrations.is_property_excluded(&TypeRef::named("Product"), "Price"));
        assert!(!registrations.is_property_excluded(&TypeRef::named("Tag"), "Price"));
    }
}
