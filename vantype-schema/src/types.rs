//! Type reference model.
//!
//! This module contains the data structures describing source types: type
//! references (which double as type identities), type definitions, their
//! properties, and enumeration members.

use std::collections::HashMap;
use std::fmt;

/// Well-known generic collection names whose single argument is the element type.
pub const GENERIC_COLLECTIONS: &[&str] = &[
    "IEnumerable",
    "ICollection",
    "IList",
    "IReadOnlyCollection",
    "IReadOnlyList",
    "List",
    "HashSet",
    "ISet",
    "SortedSet",
    "Collection",
    "ReadOnlyCollection",
    "ObservableCollection",
    "LinkedList",
    "Queue",
    "Stack",
];

/// Returns true if `name` is a well-known generic collection.
#[must_use]
pub fn is_collection_name(name: &str) -> bool {
    let short = name.rsplit('.').next().unwrap_or(name);
    GENERIC_COLLECTIONS.contains(&short)
}

/// Built-in source types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    /// Boolean.
    Boolean,
    /// Unsigned 8-bit integer.
    Byte,
    /// Signed 8-bit integer.
    SByte,
    /// Signed 16-bit integer.
    Int16,
    /// Unsigned 16-bit integer.
    UInt16,
    /// Signed 32-bit integer.
    Int32,
    /// Unsigned 32-bit integer.
    UInt32,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 64-bit integer.
    UInt64,
    /// 32-bit floating point.
    Single,
    /// 64-bit floating point.
    Double,
    /// 128-bit decimal.
    Decimal,
    /// UTF-16 character.
    Char,
    /// String.
    String,
    /// Universal root object.
    Object,
    /// Date and time.
    DateTime,
    /// Date and time with offset.
    DateTimeOffset,
    /// Time interval.
    TimeSpan,
    /// Globally unique identifier.
    Guid,
    /// Non-generic enumerable with no known element type.
    Enumerable,
}

impl Builtin {
    /// Parses a built-in type from a keyword alias, framework name, or
    /// namespace-qualified name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let short = name.strip_prefix("System.").unwrap_or(name);
        let short = short.strip_prefix("Collections.").unwrap_or(short);
        match short {
            "bool" | "Boolean" => Some(Self::Boolean),
            "byte" | "Byte" => Some(Self::Byte),
            "sbyte" | "SByte" => Some(Self::SByte),
            "short" | "Int16" => Some(Self::Int16),
            "ushort" | "UInt16" => Some(Self::UInt16),
            "int" | "Int32" => Some(Self::Int32),
            "uint" | "UInt32" => Some(Self::UInt32),
            "long" | "Int64" => Some(Self::Int64),
            "ulong" | "UInt64" => Some(Self::UInt64),
            "float" | "Single" => Some(Self::Single),
            "double" | "Double" => Some(Self::Double),
            "decimal" | "Decimal" => Some(Self::Decimal),
            "char" | "Char" => Some(Self::Char),
            "string" | "String" => Some(Self::String),
            "object" | "Object" => Some(Self::Object),
            "DateTime" => Some(Self::DateTime),
            "DateTimeOffset" => Some(Self::DateTimeOffset),
            "TimeSpan" => Some(Self::TimeSpan),
            "Guid" => Some(Self::Guid),
            "IEnumerable" | "ICollection" | "IList" | "ArrayList" => Some(Self::Enumerable),
            _ => None,
        }
    }

    /// Returns the canonical source name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Boolean => "bool",
            Self::Byte => "byte",
            Self::SByte => "sbyte",
            Self::Int16 => "short",
            Self::UInt16 => "ushort",
            Self::Int32 => "int",
            Self::UInt32 => "uint",
            Self::Int64 => "long",
            Self::UInt64 => "ulong",
            Self::Single => "float",
            Self::Double => "double",
            Self::Decimal => "decimal",
            Self::Char => "char",
            Self::String => "string",
            Self::Object => "object",
            Self::DateTime => "DateTime",
            Self::DateTimeOffset => "DateTimeOffset",
            Self::TimeSpan => "TimeSpan",
            Self::Guid => "Guid",
            Self::Enumerable => "IEnumerable",
        }
    }

    /// Returns true for value types, which have a distinct nullable identity.
    #[must_use]
    pub const fn is_value_type(&self) -> bool {
        !matches!(self, Self::String | Self::Object | Self::Enumerable)
    }

    /// Returns true for the numeric family.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Byte
                | Self::SByte
                | Self::Int16
                | Self::UInt16
                | Self::Int32
                | Self::UInt32
                | Self::Int64
                | Self::UInt64
                | Self::Single
                | Self::Double
                | Self::Decimal
        )
    }
}

/// A reference to a source type.
///
/// Type references compare structurally and are used as type identities:
/// `Lookup<int>` and `Lookup<string>` are distinct, and both differ from the
/// open definition `Lookup`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// Built-in type.
    Builtin(Builtin),
    /// User-defined type (class, interface, enum), possibly a generic definition.
    Named(String),
    /// Generic type parameter used as a type.
    Parameter(String),
    /// Nullable form of the inner type (`T?`).
    Nullable(Box<TypeRef>),
    /// Array of the inner type (`T[]`).
    Array(Box<TypeRef>),
    /// Generic instantiation (`Name<Arg, ...>`).
    Generic {
        /// Definition name.
        name: String,
        /// Type arguments.
        args: Vec<TypeRef>,
    },
}

impl TypeRef {
    /// Creates a reference to a named user type.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Creates a generic parameter reference.
    #[must_use]
    pub fn parameter(name: impl Into<String>) -> Self {
        Self::Parameter(name.into())
    }

    /// Wraps a reference as nullable.
    #[must_use]
    pub fn nullable(inner: TypeRef) -> Self {
        Self::Nullable(Box::new(inner))
    }

    /// Wraps a reference as an array element.
    #[must_use]
    pub fn array(element: TypeRef) -> Self {
        Self::Array(Box::new(element))
    }

    /// Creates a generic instantiation.
    #[must_use]
    pub fn generic(name: impl Into<String>, args: Vec<TypeRef>) -> Self {
        Self::Generic {
            name: name.into(),
            args,
        }
    }

    /// Returns the raw name of the referenced type, ignoring arguments and
    /// nullable or array wrappers.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Builtin(b) => b.name(),
            Self::Named(name) | Self::Parameter(name) => name,
            Self::Generic { name, .. } => name,
            Self::Nullable(inner) | Self::Array(inner) => inner.name(),
        }
    }

    /// Returns true if this is a `T?` reference.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        matches!(self, Self::Nullable(_))
    }

    /// Strips one nullable wrapper, if present.
    #[must_use]
    pub fn without_nullable(&self) -> &TypeRef {
        match self {
            Self::Nullable(inner) => inner,
            other => other,
        }
    }

    /// Replaces generic parameters by the bound arguments.
    #[must_use]
    pub fn substitute(&self, bindings: &HashMap<String, TypeRef>) -> TypeRef {
        if bindings.is_empty() {
            return self.clone();
        }
        match self {
            Self::Parameter(name) => bindings
                .get(name)
                .cloned()
                .unwrap_or_else(|| self.clone()),
            Self::Nullable(inner) => Self::nullable(inner.substitute(bindings)),
            Self::Array(inner) => Self::array(inner.substitute(bindings)),
            Self::Generic { name, args } => Self::Generic {
                name: name.clone(),
                args: args.iter().map(|a| a.substitute(bindings)).collect(),
            },
            Self::Builtin(_) | Self::Named(_) => self.clone(),
        }
    }
}

impl From<Builtin> for TypeRef {
    fn from(builtin: Builtin) -> Self {
        Self::Builtin(builtin)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(b) => f.write_str(b.name()),
            Self::Named(name) | Self::Parameter(name) => f.write_str(name),
            Self::Nullable(inner) => write!(f, "{}?", inner),
            Self::Array(inner) => write!(f, "{}[]", inner),
            Self::Generic { name, args } => {
                write!(f, "{}<", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(">")
            }
        }
    }
}

/// Kind of a user-defined type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Class.
    Class,
    /// Interface.
    Interface,
    /// Enumeration.
    Enum,
}

/// User-defined type definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDef {
    /// Type name (without generic parameters).
    pub name: String,
    /// Type kind.
    pub kind: TypeKind,
    /// Base type, if any.
    pub base: Option<TypeRef>,
    /// Generic parameter names, in declaration order.
    pub generic_params: Vec<String>,
    /// Declared properties, in declaration order.
    pub properties: Vec<PropertyDef>,
    /// Enumeration members, in declaration order.
    pub members: Vec<EnumMember>,
    /// Whether the type is abstract.
    pub is_abstract: bool,
    /// Declaring type for nested types.
    pub declaring_type: Option<String>,
    /// Description.
    pub description: Option<String>,
}

impl TypeDef {
    /// Creates a new type definition.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            base: None,
            generic_params: Vec::new(),
            properties: Vec::new(),
            members: Vec::new(),
            is_abstract: false,
            declaring_type: None,
            description: None,
        }
    }

    /// Creates a new class definition.
    #[must_use]
    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Class)
    }

    /// Creates a new interface definition.
    #[must_use]
    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Interface)
    }

    /// Creates a new enumeration definition.
    #[must_use]
    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Enum)
    }

    /// Sets the base type.
    #[must_use]
    pub fn with_base(mut self, base: TypeRef) -> Self {
        self.base = Some(base);
        self
    }

    /// Adds a generic parameter.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>) -> Self {
        self.generic_params.push(name.into());
        self
    }

    /// Adds a property.
    #[must_use]
    pub fn with_property(mut self, property: PropertyDef) -> Self {
        self.properties.push(property);
        self
    }

    /// Adds an enumeration member.
    #[must_use]
    pub fn with_member(mut self, name: impl Into<String>, value: i64) -> Self {
        self.members.push(EnumMember::new(name, value));
        self
    }

    /// Adds a property.
    pub fn add_property(&mut self, property: PropertyDef) {
        self.properties.push(property);
    }

    /// Adds an enumeration member.
    pub fn add_member(&mut self, member: EnumMember) {
        self.members.push(member);
    }

    /// Returns the identity of this definition.
    #[must_use]
    pub fn type_ref(&self) -> TypeRef {
        TypeRef::Named(self.name.clone())
    }

    /// Looks up a declared property by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Returns true if this is an unbound generic definition.
    #[must_use]
    pub fn is_generic_definition(&self) -> bool {
        !self.generic_params.is_empty()
    }

    /// Returns true if this type is declared inside another type.
    #[must_use]
    pub fn is_nested(&self) -> bool {
        self.declaring_type.is_some()
    }

    /// Returns true if this is a class.
    #[must_use]
    pub fn is_class(&self) -> bool {
        self.kind == TypeKind::Class
    }

    /// Returns true if this is an interface.
    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    /// Returns true if this is an enumeration.
    #[must_use]
    pub fn is_enum(&self) -> bool {
        self.kind == TypeKind::Enum
    }

    /// Returns the display name of an enumeration value: the first declared
    /// member carrying it.
    #[must_use]
    pub fn member_display_name(&self, value: i64) -> Option<&str> {
        self.members
            .iter()
            .find(|m| m.value == value)
            .map(|m| m.name.as_str())
    }
}

/// Property of a user-defined type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDef {
    /// Declared property name.
    pub name: String,
    /// Declared type.
    pub ty: TypeRef,
    /// Declared-nullable annotation.
    pub nullable: bool,
    /// Description.
    pub description: Option<String>,
}

impl PropertyDef {
    /// Creates a new property.
    ///
    /// A `T?` type marks the property as declared-nullable.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        let nullable = ty.is_nullable();
        Self {
            name: name.into(),
            ty,
            nullable,
            description: None,
        }
    }

    /// Sets the declared-nullable annotation.
    #[must_use]
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = self.nullable || nullable;
        self
    }
}

/// Enumeration member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
    /// Member name.
    pub name: String,
    /// Integer value.
    pub value: i64,
    /// Description.
    pub description: Option<String>,
}

impl EnumMember {
    /// Creates a new enumeration member.
    #[must_use]
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
            description: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_aliases() {
        assert_eq!(Builtin::from_name("int"), Some(Builtin::Int32));
        assert_eq!(Builtin::from_name("Int32"), Some(Builtin::Int32));
        assert_eq!(Builtin::from_name("System.Int32"), Some(Builtin::Int32));
        assert_eq!(Builtin::from_name("System.Guid"), Some(Builtin::Guid));
        assert_eq!(
            Builtin::from_name("System.Collections.ArrayList"),
            Some(Builtin::Enumerable)
        );
        assert_eq!(Builtin::from_name("Tag"), None);
    }

    #[test]
    fn test_builtin_value_types() {
        assert!(Builtin::Int32.is_value_type());
        assert!(Builtin::Guid.is_value_type());
        assert!(!Builtin::String.is_value_type());
        assert!(!Builtin::Object.is_value_type());
        assert!(Builtin::Decimal.is_numeric());
        assert!(!Builtin::Boolean.is_numeric());
    }

    #[test]
    fn test_is_collection_name() {
        assert!(is_collection_name("List"));
        assert!(is_collection_name("System.Collections.Generic.IEnumerable"));
        assert!(!is_collection_name("Lookup"));
    }

    #[test]
    fn test_type_ref_display() {
        let ty = TypeRef::generic(
            "Lookup",
            vec![TypeRef::array(TypeRef::nullable(Builtin::Int32.into()))],
        );
        assert_eq!(ty.to_string(), "Lookup<int?[]>");
    }

    #[test]
    fn test_generic_identity_is_structural() {
        let a = TypeRef::generic("Box", vec![Builtin::Int32.into()]);
        let b = TypeRef::generic("Box", vec![Builtin::String.into()]);
        assert_ne!(a, b);
        assert_ne!(a, TypeRef::named("Box"));
        assert_eq!(a, TypeRef::generic("Box", vec![Builtin::Int32.into()]));
    }

    #[test]
    fn test_substitute() {
        let mut bindings = HashMap::new();
        bindings.insert("T".to_string(), TypeRef::Builtin(Builtin::Int32));

        let ty = TypeRef::array(TypeRef::parameter("T"));
        assert_eq!(
            ty.substitute(&bindings),
            TypeRef::array(TypeRef::Builtin(Builtin::Int32))
        );
        assert_eq!(
            TypeRef::parameter("U").substitute(&bindings),
            TypeRef::parameter("U")
        );
    }

    #[test]
    fn test_property_nullable_from_type() {
        let prop = PropertyDef::new("Slogan", TypeRef::nullable(Builtin::String.into()));
        assert!(prop.nullable);

        let prop = PropertyDef::new("Name", Builtin::String.into());
        assert!(!prop.nullable);
        assert!(prop.with_nullable(true).nullable);
    }

    #[test]
    fn test_member_display_name_collapses_aliases() {
        let def = TypeDef::enumeration("Color")
            .with_member("Red", 1)
            .with_member("Crimson", 1)
            .with_member("Blue", 2);
        assert_eq!(def.member_display_name(1), Some("Red"));
        assert_eq!(def.member_display_name(2), Some("Blue"));
        assert_eq!(def.member_display_name(3), None);
    }

    #[test]
    fn test_type_def_flags() {
        let def = TypeDef::class("Lookup").with_param("T");
        assert!(def.is_generic_definition());
        assert!(def.is_class());
        assert!(!def.is_nested());
        assert_eq!(def.type_ref(), TypeRef::named("Lookup"));
    }
}
