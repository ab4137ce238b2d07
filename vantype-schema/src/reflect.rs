//! Reflection over type models.
//!
//! [`TypeProvider`] is the capability the generator needs from whatever
//! describes the source types. [`Reflector`] layers structural queries on top
//! of any provider: classification, element types, inheritance depth and
//! property views.

use crate::module::Module;
use crate::types::{Builtin, PropertyDef, TypeDef, TypeRef, is_collection_name};
use std::collections::{HashMap, HashSet};

/// Source of type definitions.
pub trait TypeProvider {
    /// Looks up a user-defined type by name.
    fn get_type(&self, name: &str) -> Option<&TypeDef>;

    /// Returns every type definition, in declaration order.
    fn type_defs(&self) -> Vec<&TypeDef>;
}

impl TypeProvider for Module {
    fn get_type(&self, name: &str) -> Option<&TypeDef> {
        Module::get_type(self, name)
    }

    fn type_defs(&self) -> Vec<&TypeDef> {
        self.types.iter().collect()
    }
}

/// Structural classification of a type reference.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeShape<'a> {
    /// Built-in scalar type.
    Builtin(Builtin),
    /// Enumeration.
    Enum(&'a TypeDef),
    /// Iterable with its element type, when one can be determined.
    Iterable(Option<TypeRef>),
    /// Unbound generic definition.
    GenericDefinition(&'a TypeDef),
    /// Closed generic instantiation of a user type.
    GenericInstance(&'a TypeDef, &'a [TypeRef]),
    /// Non-generic class.
    Class(&'a TypeDef),
    /// Non-generic interface.
    Interface(&'a TypeDef),
    /// Generic parameter used as a type.
    Parameter(&'a str),
    /// Anything the provider cannot describe.
    Unknown,
}

/// Structural queries over a [`TypeProvider`].
#[derive(Clone, Copy)]
pub struct Reflector<'a> {
    provider: &'a dyn TypeProvider,
}

impl<'a> Reflector<'a> {
    /// Creates a reflector over the given provider.
    #[must_use]
    pub fn new(provider: &'a dyn TypeProvider) -> Self {
        Self { provider }
    }

    /// Looks up the definition a reference points at, if it is user-defined.
    ///
    /// Nullable and array wrappers are not looked through.
    #[must_use]
    pub fn definition(&self, ty: &TypeRef) -> Option<&'a TypeDef> {
        match ty {
            TypeRef::Named(name) | TypeRef::Generic { name, .. } => self.provider.get_type(name),
            _ => None,
        }
    }

    /// Classifies a type reference.
    ///
    /// `T?` classifies as `T`.
    #[must_use]
    pub fn classify<'t>(&self, ty: &'t TypeRef) -> TypeShape<'t>
    where
        'a: 't,
    {
        match ty {
            TypeRef::Builtin(Builtin::Enumerable) => TypeShape::Iterable(None),
            TypeRef::Builtin(b) => TypeShape::Builtin(*b),
            TypeRef::Parameter(name) => TypeShape::Parameter(name),
            TypeRef::Nullable(inner) => self.classify(inner),
            TypeRef::Array(element) => TypeShape::Iterable(Some((**element).clone())),
            TypeRef::Generic { name, args } if is_collection_name(name) => {
                TypeShape::Iterable(if args.len() == 1 {
                    Some(args[0].clone())
                } else {
                    None
                })
            }
            TypeRef::Generic { name, args } => match self.provider.get_type(name) {
                Some(_) if self.is_iterable(ty) => TypeShape::Iterable(self.element_type(ty)),
                Some(def) => TypeShape::GenericInstance(def, args),
                None => TypeShape::Unknown,
            },
            TypeRef::Named(name) => match self.provider.get_type(name) {
                None => TypeShape::Unknown,
                Some(def) if def.is_enum() => TypeShape::Enum(def),
                Some(_) if self.is_iterable(ty) => TypeShape::Iterable(self.element_type(ty)),
                Some(def) if def.is_generic_definition() => TypeShape::GenericDefinition(def),
                Some(def) if def.is_interface() => TypeShape::Interface(def),
                Some(def) => TypeShape::Class(def),
            },
        }
    }

    /// Returns true if the reference is an enumeration or a nullable one.
    #[must_use]
    pub fn is_enum(&self, ty: &TypeRef) -> bool {
        self.enum_definition(ty).is_some()
    }

    /// Returns the enumeration behind `E` or `E?`.
    #[must_use]
    pub fn enum_definition(&self, ty: &TypeRef) -> Option<&'a TypeDef> {
        self.definition(ty.without_nullable())
            .filter(|def| def.is_enum() && matches!(ty.without_nullable(), TypeRef::Named(_)))
    }

    /// Returns true if the reference denotes something iterable.
    #[must_use]
    pub fn is_iterable(&self, ty: &TypeRef) -> bool {
        let mut visited = HashSet::new();
        self.is_iterable_inner(ty, &mut visited)
    }

    fn is_iterable_inner(&self, ty: &TypeRef, visited: &mut HashSet<String>) -> bool {
        match ty {
            TypeRef::Builtin(b) => *b == Builtin::Enumerable,
            TypeRef::Array(_) => true,
            TypeRef::Parameter(_) | TypeRef::Nullable(_) => false,
            TypeRef::Generic { name, .. } if is_collection_name(name) => true,
            TypeRef::Generic { name, .. } | TypeRef::Named(name) => {
                if !visited.insert(name.clone()) {
                    return false;
                }
                match self.provider.get_type(name) {
                    Some(def) if !def.is_enum() => def
                        .base
                        .as_ref()
                        .is_some_and(|base| self.is_iterable_inner(base, visited)),
                    _ => false,
                }
            }
        }
    }

    /// Determines the element type of an iterable reference.
    ///
    /// Arrays yield their element, generic collections their single argument;
    /// user types inherit the element type of their base, with generic
    /// arguments substituted along the way.
    #[must_use]
    pub fn element_type(&self, ty: &TypeRef) -> Option<TypeRef> {
        let mut visited = HashSet::new();
        self.element_type_inner(ty, &mut visited)
    }

    fn element_type_inner(&self, ty: &TypeRef, visited: &mut HashSet<String>) -> Option<TypeRef> {
        match ty {
            TypeRef::Array(element) => Some((**element).clone()),
            TypeRef::Generic { name, args } if is_collection_name(name) => {
                if args.len() == 1 {
                    Some(args[0].clone())
                } else {
                    None
                }
            }
            TypeRef::Generic { name, .. } | TypeRef::Named(name) => {
                if !visited.insert(name.clone()) {
                    return None;
                }
                let def = self.provider.get_type(name)?;
                let base = def.base.as_ref()?;
                let bindings = self.bindings(def, ty);
                self.element_type_inner(&base.substitute(&bindings), visited)
            }
            _ => None,
        }
    }

    /// Maps the generic parameters of `def` to the arguments of `ty`.
    #[must_use]
    pub fn bindings(&self, def: &TypeDef, ty: &TypeRef) -> HashMap<String, TypeRef> {
        match ty {
            TypeRef::Generic { args, .. } => def
                .generic_params
                .iter()
                .cloned()
                .zip(args.iter().cloned())
                .collect(),
            _ => HashMap::new(),
        }
    }

    /// Counts the inheritance chain of a type: the type itself plus every
    /// ancestor. A built-in or unknown base ends the chain and counts once.
    #[must_use]
    pub fn inheritance_depth(&self, ty: &TypeRef) -> usize {
        let mut depth = 1;
        let mut visited = HashSet::new();
        let mut current = self.definition(ty);

        while let Some(def) = current {
            if !visited.insert(def.name.as_str()) {
                break;
            }
            match &def.base {
                Some(base) => {
                    depth += 1;
                    current = self.definition(base);
                }
                None => break,
            }
        }

        depth
    }

    /// Returns the properties of a type.
    ///
    /// With `declared_only`, only the type's own properties are returned.
    /// Otherwise ancestors' properties follow the type's own, generic
    /// parameters of generic ancestors are substituted, and a name already
    /// seen hides later ones.
    #[must_use]
    pub fn properties(&self, def: &TypeDef, declared_only: bool) -> Vec<PropertyDef> {
        let mut properties = def.properties.clone();
        if declared_only {
            return properties;
        }

        let mut seen: HashSet<String> = properties.iter().map(|p| p.name.clone()).collect();
        let mut visited = HashSet::new();
        visited.insert(def.name.clone());
        let mut current = def.base.clone();

        while let Some(base_ref) = current.take() {
            let Some(base_def) = self.definition(&base_ref) else {
                break;
            };
            if !visited.insert(base_def.name.clone()) {
                break;
            }
            let bindings = self.bindings(base_def, &base_ref);
            for property in &base_def.properties {
                if seen.insert(property.name.clone()) {
                    let mut inherited = property.clone();
                    inherited.ty = property.ty.substitute(&bindings);
                    properties.push(inherited);
                }
            }
            current = base_def.base.as_ref().map(|b| b.substitute(&bindings));
        }

        properties
    }
}
