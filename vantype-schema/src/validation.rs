//! Module validation utilities.
//!
//! This module provides validation functions for type modules to ensure
//! correctness and consistency before generation.
//!
//! References to types the module does not define are not errors: they stand
//! for external types and are emitted as `any`.

use crate::error::SchemaError;
use crate::module::Module;
use crate::types::{TypeDef, TypeRef};
use std::collections::HashSet;

/// Validates a module for correctness.
///
/// # Arguments
/// * `module` - The module to validate
///
/// # Returns
/// Ok(()) if valid, or SchemaError describing the issue.
///
/// # Errors
/// Returns `SchemaError` if validation fails.
pub fn validate_module(module: &Module) -> Result<(), SchemaError> {
    validate_type_names(module)?;
    for type_def in &module.types {
        if type_def.is_enum() {
            validate_enum(type_def)?;
        } else {
            validate_type(module, type_def)?;
        }
    }
    validate_inheritance(module)?;
    Ok(())
}

/// Validates type names are present and unique.
fn validate_type_names(module: &Module) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for type_def in &module.types {
        if type_def.name.trim().is_empty() {
            return Err(SchemaError::validation(format!(
                "type with empty name in module '{}'",
                module.name
            )));
        }
        if !seen.insert(type_def.name.as_str()) {
            return Err(SchemaError::duplicate(
                "type",
                type_def.name.as_str(),
                module.name.as_str(),
            ));
        }
        if let Some(declaring) = &type_def.declaring_type
            && !module.has_type(declaring)
        {
            return Err(SchemaError::TypeNotFound {
                name: declaring.clone(),
                context: type_def.name.clone(),
            });
        }
    }
    Ok(())
}

/// Validates an enumeration definition.
fn validate_enum(enum_def: &TypeDef) -> Result<(), SchemaError> {
    if enum_def.base.is_some() || !enum_def.properties.is_empty() {
        return Err(SchemaError::validation(format!(
            "enum '{}' cannot declare a base type or properties",
            enum_def.name
        )));
    }
    if enum_def.is_generic_definition() {
        return Err(SchemaError::validation(format!(
            "enum '{}' cannot declare generic parameters",
            enum_def.name
        )));
    }

    let mut seen_names = HashSet::new();
    for member in &enum_def.members {
        if member.name.trim().is_empty() {
            return Err(SchemaError::validation(format!(
                "enum '{}' has a member with an empty name",
                enum_def.name
            )));
        }
        if !seen_names.insert(member.name.as_str()) {
            return Err(SchemaError::duplicate(
                "enum member",
                member.name.as_str(),
                enum_def.name.as_str(),
            ));
        }
    }
    Ok(())
}

/// Validates a class or interface definition.
fn validate_type(module: &Module, type_def: &TypeDef) -> Result<(), SchemaError> {
    if !type_def.members.is_empty() {
        return Err(SchemaError::validation(format!(
            "'{}' is not an enum and cannot declare members",
            type_def.name
        )));
    }

    let mut seen_params = HashSet::new();
    for param in &type_def.generic_params {
        if !seen_params.insert(param.as_str()) {
            return Err(SchemaError::duplicate(
                "generic parameter",
                param.as_str(),
                type_def.name.as_str(),
            ));
        }
    }

    if let Some(base) = &type_def.base {
        let context = format!("{} (base)", type_def.name);
        validate_reference(module, base, &context)?;
        if matches!(base, TypeRef::Nullable(_) | TypeRef::Array(_)) {
            return Err(SchemaError::validation(format!(
                "base type '{}' of '{}' must be a plain type",
                base, type_def.name
            )));
        }
        if module.get_type(base.name()).is_some_and(TypeDef::is_enum) {
            return Err(SchemaError::validation(format!(
                "'{}' cannot derive from enum '{}'",
                type_def.name,
                base.name()
            )));
        }
    }

    let mut seen_properties = HashSet::new();
    for property in &type_def.properties {
        if property.name.trim().is_empty() {
            return Err(SchemaError::validation(format!(
                "'{}' has a property with an empty name",
                type_def.name
            )));
        }
        if !seen_properties.insert(property.name.as_str()) {
            return Err(SchemaError::duplicate(
                "property",
                property.name.as_str(),
                type_def.name.as_str(),
            ));
        }
        let context = format!("{}.{}", type_def.name, property.name);
        validate_reference(module, &property.ty, &context)?;
    }

    Ok(())
}

/// Validates generic arity of every user-defined type a reference mentions.
fn validate_reference(module: &Module, ty: &TypeRef, context: &str) -> Result<(), SchemaError> {
    match ty {
        TypeRef::Builtin(_) | TypeRef::Parameter(_) => Ok(()),
        TypeRef::Nullable(inner) | TypeRef::Array(inner) => {
            validate_reference(module, inner, context)
        }
        TypeRef::Named(name) => {
            // A bare generic definition is allowed: it renders with its parameters.
            if !module.has_type(name) {
                tracing::trace!("'{}' references external type '{}'", context, name);
            }
            Ok(())
        }
        TypeRef::Generic { name, args } => {
            if let Some(def) = module.get_type(name)
                && def.generic_params.len() != args.len()
            {
                return Err(arity_error(def, args.len(), context));
            }
            for arg in args {
                validate_reference(module, arg, context)?;
            }
            Ok(())
        }
    }
}

fn arity_error(def: &TypeDef, found: usize, context: &str) -> SchemaError {
    SchemaError::GenericArity {
        name: def.name.clone(),
        expected: def.generic_params.len(),
        found,
        context: context.to_string(),
    }
}

/// Validates that no inheritance chain loops back on itself.
fn validate_inheritance(module: &Module) -> Result<(), SchemaError> {
    for type_def in &module.types {
        let mut path = vec![type_def.name.as_str()];
        let mut current = type_def.base.as_ref();

        while let Some(base) = current {
            let Some(base_def) = module.get_type(base.name()) else {
                break;
            };
            path.push(base_def.name.as_str());
            if base_def.name == type_def.name {
                return Err(SchemaError::CircularInheritance {
                    path: path.join(" -> "),
                });
            }
            if path[..path.len() - 1].contains(&base_def.name.as_str()) {
                // Loop further up the chain; reported when its own type is checked.
                break;
            }
            current = base_def.base.as_ref();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_module;
    use crate::types::{Builtin, PropertyDef};

    #[test]
    fn test_valid_module() {
        let xml = r#"<module name="Shop">
    <enum name="Status"><value name="Active"/></enum>
    <class name="Lookup">
        <typeParam name="T"/>
        <property name="Id" type="T"/>
    </class>
    <class name="Product">
        <property name="Status" type="Status?"/>
        <property name="Ref" type="Lookup&lt;int&gt;"/>
        <property name="External" type="Money"/>
    </class>
</module>"#;
        let module = parse_module(xml).expect("Failed to parse manifest");
        assert!(validate_module(&module).is_ok());
    }

    #[test]
    fn test_generic_arity_mismatch() {
        let module = Module::new("Shop")
            .with_type(TypeDef::class("Lookup").with_param("T"))
            .with_type(TypeDef::class("Product").with_property(PropertyDef::new(
                "Ref",
                TypeRef::generic(
                    "Lookup",
                    vec![Builtin::Int32.into(), Builtin::String.into()],
                ),
            )));

        let err = validate_module(&module).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::GenericArity {
                expected: 1,
                found: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_circular_inheritance() {
        let module = Module::new("Shop")
            .with_type(TypeDef::class("A").with_base(TypeRef::named("B")))
            .with_type(TypeDef::class("B").with_base(TypeRef::named("A")));

        let err = validate_module(&module).unwrap_err();
        match err {
            SchemaError::CircularInheritance { path } => assert_eq!(path, "A -> B -> A"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_self_inheritance() {
        let module =
            Module::new("Shop").with_type(TypeDef::class("A").with_base(TypeRef::named("A")));
        assert!(matches!(
            validate_module(&module),
            Err(SchemaError::CircularInheritance { .. })
        ));
    }

    #[test]
    fn test_duplicate_enum_member() {
        let module = Module::new("Shop").with_type(
            TypeDef::enumeration("Status")
                .with_member("Active", 0)
                .with_member("Active", 1),
        );
        assert!(matches!(
            validate_module(&module),
            Err(SchemaError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_enum_aliases_are_valid() {
        let module = Module::new("Shop").with_type(
            TypeDef::enumeration("Status")
                .with_member("Active", 0)
                .with_member("Enabled", 0),
        );
        assert!(validate_module(&module).is_ok());
    }

    #[test]
    fn test_duplicate_type() {
        let mut module = Module::new("Shop");
        module.add_type(TypeDef::class("Tag"));
        module.add_type(TypeDef::interface("Tag"));
        assert!(matches!(
            validate_module(&module),
            Err(SchemaError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_derive_from_enum_rejected() {
        let module = Module::new("Shop")
            .with_type(TypeDef::enumeration("Status"))
            .with_type(TypeDef::class("Product").with_base(TypeRef::named("Status")));
        assert!(matches!(
            validate_module(&module),
            Err(SchemaError::Validation { .. })
        ));
    }

    #[test]
    fn test_unknown_declaring_type() {
        let mut nested = TypeDef::class("Audit");
        nested.declaring_type = Some("Missing".to_string());
        let module = Module::new("Shop").with_type(nested);
        assert!(matches!(
            validate_module(&module),
            Err(SchemaError::TypeNotFound { .. })
        ));
    }
}
