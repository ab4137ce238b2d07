//! Synthetic type graph generation.

use vantype_schema::{Builtin, Module, PropertyDef, TypeDef, TypeRef};

/// Shape of a synthetic module.
#[derive(Debug, Clone, Copy)]
pub struct ModelShape {
    /// Number of classes.
    pub classes: usize,
    /// Number of enums referenced by the classes.
    pub enums: usize,
    /// Properties per class.
    pub properties: usize,
    /// Length of each inheritance chain.
    pub chain_length: usize,
}

impl Default for ModelShape {
    fn default() -> Self {
        Self {
            classes: 100,
            enums: 10,
            properties: 10,
            chain_length: 4,
        }
    }
}

const SCALARS: &[&str] = &["int", "string", "decimal", "DateTime?", "Guid", "bool"];

fn class_name(index: usize) -> String {
    format!("Model{}", index)
}

fn enum_name(index: usize) -> String {
    format!("Kind{}", index)
}

/// Property type expression of property `p` of class `c`.
fn property_type(shape: &ModelShape, c: usize, p: usize) -> String {
    match p % 4 {
        0 if shape.enums > 0 => enum_name((c + p) % shape.enums),
        1 if c > 0 => format!("List<{}>", class_name(c - 1)),
        2 if c > 0 => class_name((c + p) % c),
        _ => SCALARS[(c + p) % SCALARS.len()].to_string(),
    }
}

fn base_index(shape: &ModelShape, c: usize) -> Option<usize> {
    (shape.chain_length > 1 && c % shape.chain_length != 0).then(|| c - 1)
}

/// Builds a module with the given shape.
#[must_use]
pub fn synthetic_module(shape: &ModelShape) -> Module {
    let mut module = Module::new("Bench.Models");

    for e in 0..shape.enums {
        let mut def = TypeDef::enumeration(enum_name(e));
        for m in 0..4 {
            def = def.with_member(format!("Value{}", m), m);
        }
        module.add_type(def);
    }

    for c in 0..shape.classes {
        let mut def = TypeDef::class(class_name(c));
        if let Some(base) = base_index(shape, c) {
            def = def.with_base(TypeRef::named(class_name(base)));
        }
        for p in 0..shape.properties {
            let ty = vantype_schema::parse_type_ref(&property_type(shape, c, p))
                .unwrap_or(TypeRef::Builtin(Builtin::Object));
            def = def.with_property(PropertyDef::new(format!("Field{}", p), ty));
        }
        module.add_type(def);
    }

    module
}

/// Renders the same module as an XML manifest.
#[must_use]
pub fn synthetic_manifest(shape: &ModelShape) -> String {
    let mut xml = String::from("<module name=\"Bench.Models\">\n");

    for e in 0..shape.enums {
        xml.push_str(&format!("    <enum name=\"{}\">\n", enum_name(e)));
        for m in 0..4 {
            xml.push_str(&format!("        <value name=\"Value{}\">{}</value>\n", m, m));
        }
        xml.push_str("    </enum>\n");
    }

    for c in 0..shape.classes {
        match base_index(shape, c) {
            Some(base) => xml.push_str(&format!(
                "    <class name=\"{}\" base=\"{}\">\n",
                class_name(c),
                class_name(base)
            )),
            None => xml.push_str(&format!("    <class name=\"{}\">\n", class_name(c))),
        }
        for p in 0..shape.properties {
            let ty = property_type(shape, c, p)
                .replace('<', "&lt;")
                .replace('>', "&gt;");
            xml.push_str(&format!(
                "        <property name=\"Field{}\" type=\"{}\"/>\n",
                p, ty
            ));
        }
        xml.push_str("    </class>\n");
    }

    xml.push_str("</module>\n");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_module_shape() {
        let shape = ModelShape::default();
        let module = synthetic_module(&shape);

        assert_eq!(module.types.len(), shape.classes + shape.enums);
        assert!(vantype_schema::validate_module(&module).is_ok());
    }

    #[test]
    fn test_manifest_matches_module() {
        let shape = ModelShape {
            classes: 12,
            enums: 3,
            properties: 5,
            chain_length: 3,
        };
        let parsed = vantype_schema::parse_module(&synthetic_manifest(&shape))
            .expect("Failed to parse manifest");
        let built = synthetic_module(&shape);

        assert_eq!(parsed.types, built.types);
    }
}
