//! Type modules.
//!
//! A [`Module`] is a static description of a set of source types, the
//! equivalent of an assembly whose types have been introspected ahead of time.

use crate::types::TypeDef;
use std::collections::HashMap;

/// Collection of type definitions.
#[derive(Debug, Clone, Default)]
pub struct Module {
    /// Module name (namespace or assembly name).
    pub name: String,
    /// Module description.
    pub description: Option<String>,
    /// Type definitions in declaration order.
    pub types: Vec<TypeDef>,
    /// Type lookup map (built during parsing).
    type_map: HashMap<String, usize>,
}

impl Module {
    /// Creates a new empty module.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            types: Vec::new(),
            type_map: HashMap::new(),
        }
    }

    /// Adds a type definition to the module.
    ///
    /// A later definition with the same name shadows the earlier one for
    /// lookups; validation reports the duplicate.
    pub fn add_type(&mut self, type_def: TypeDef) {
        let name = type_def.name.clone();
        let index = self.types.len();
        self.types.push(type_def);
        self.type_map.insert(name, index);
    }

    /// Adds a type definition, builder style.
    #[must_use]
    pub fn with_type(mut self, type_def: TypeDef) -> Self {
        self.add_type(type_def);
        self
    }

    /// Looks up a type by name.
    #[must_use]
    pub fn get_type(&self, name: &str) -> Option<&TypeDef> {
        self.type_map.get(name).map(|&idx| &self.types[idx])
    }

    /// Returns true if a type with the given name exists.
    #[must_use]
    pub fn has_type(&self, name: &str) -> bool {
        self.type_map.contains_key(name)
    }
}
