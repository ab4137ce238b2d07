//! Enum declaration generation.

use crate::config::EnumConversion;
use crate::naming::NameResolver;
use vantype_schema::TypeDef;

/// Generator for enum declarations.
pub struct EnumGenerator<'a> {
    names: &'a NameResolver<'a>,
    conversion: EnumConversion,
}

impl<'a> EnumGenerator<'a> {
    /// Creates a new enum generator.
    #[must_use]
    pub fn new(names: &'a NameResolver<'a>, conversion: EnumConversion) -> Self {
        Self { names, conversion }
    }

    /// Generates an enum declaration.
    ///
    /// Members sharing a value are emitted once, under the name of the first
    /// member declared with that value.
    #[must_use]
    pub fn generate(&self, def: &TypeDef) -> String {
        let mut output = String::new();
        output.push_str(&format!("export enum {}\n", self.names.enum_name(def)));
        output.push_str("{\n");

        let mut emitted: Vec<&str> = Vec::new();
        for member in &def.members {
            let name = def
                .member_display_name(member.value)
                .unwrap_or(member.name.as_str());
            if emitted.contains(&name) {
                continue;
            }
            emitted.push(name);

            match self.conversion {
                EnumConversion::Numeric => {
                    output.push_str(&format!("    {} = {},\n", name, member.value));
                }
                EnumConversion::String => {
                    output.push_str(&format!("    {} = '{}',\n", name, name));
                }
            }
        }

        output.push_str("}\n");
        output
    }
}
