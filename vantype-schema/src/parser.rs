//! Type manifest parser.
//!
//! This module parses XML type manifests into a [`Module`]. A manifest is the
//! static stand-in for runtime reflection: it lists classes, interfaces and
//! enumerations with their bases, generic parameters and properties.
//!
//! ```xml
//! <module name="Shop.Models">
//!     <enum name="ProductStatus">
//!         <value name="InStock">0</value>
//!         <value name="OutOfStock">1</value>
//!     </enum>
//!     <class name="Lookup">
//!         <typeParam name="T"/>
//!         <property name="Id" type="T"/>
//!     </class>
//!     <class name="Product" base="Entity">
//!         <property name="Tags" type="IEnumerable&lt;Tag&gt;"/>
//!     </class>
//! </module>
//! ```

use crate::error::ParseError;
use crate::module::Module;
use crate::type_expr::parse_type_ref_in;
use crate::types::{EnumMember, PropertyDef, TypeDef, TypeKind};
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};

/// Parses an XML type manifest from a string.
///
/// # Arguments
/// * `xml` - XML manifest content
///
/// # Returns
/// Parsed module or parse error.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed or contains invalid manifest elements.
pub fn parse_module(xml: &str) -> Result<Module, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut module: Option<Module> = None;
    let mut closed = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_bytes)?;
                match (name, module.as_mut()) {
                    ("module", None) => module = Some(parse_module_attrs(e)?),
                    ("class", Some(m)) => {
                        let defs = parse_type(&mut reader, e, TypeKind::Class, None)?;
                        add_types(m, defs)?;
                    }
                    ("interface", Some(m)) => {
                        let defs = parse_type(&mut reader, e, TypeKind::Interface, None)?;
                        add_types(m, defs)?;
                    }
                    ("enum", Some(m)) => {
                        let def = parse_enum(&mut reader, e, None)?;
                        add_types(m, vec![def])?;
                    }
                    (other, Some(_)) => return Err(ParseError::unknown_element(other, "module")),
                    (other, None) => return Err(ParseError::unknown_element(other, "document")),
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_bytes)?;
                match (name, module.as_mut()) {
                    ("module", None) => {
                        module = Some(parse_module_attrs(e)?);
                        closed = true;
                    }
                    ("class", Some(m)) => {
                        let def = parse_type_attrs(e, TypeKind::Class, None)?.finish()?;
                        add_types(m, vec![def])?;
                    }
                    ("interface", Some(m)) => {
                        let def = parse_type_attrs(e, TypeKind::Interface, None)?.finish()?;
                        add_types(m, vec![def])?;
                    }
                    ("enum", Some(m)) => {
                        let def = parse_enum_attrs(e, None)?;
                        add_types(m, vec![def])?;
                    }
                    (other, Some(_)) => return Err(ParseError::unknown_element(other, "module")),
                    (other, None) => return Err(ParseError::unknown_element(other, "document")),
                }
            }
            Ok(Event::End(_)) if module.is_some() => closed = true,
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    match module {
        Some(m) if closed => Ok(m),
        Some(m) => Err(ParseError::unexpected_eof("module", &m.name)),
        None => Err(ParseError::InvalidStructure {
            message: "No module element found".to_string(),
        }),
    }
}

/// Parses a manifest file from disk.
///
/// # Errors
/// Returns `ParseError` if the file cannot be read or parsed.
pub fn parse_module_file(path: &std::path::Path) -> Result<Module, ParseError> {
    let xml = std::fs::read_to_string(path)?;
    parse_module(&xml)
}

fn add_types(module: &mut Module, defs: Vec<TypeDef>) -> Result<(), ParseError> {
    for def in defs {
        if module.has_type(&def.name) {
            return Err(ParseError::duplicate("type", def.name));
        }
        tracing::trace!("Parsed {:?} {}", def.kind, def.name);
        module.add_type(def);
    }
    Ok(())
}

/// Reads every attribute of an element as unescaped `(key, value)` pairs.
fn attributes(e: &BytesStart<'_>) -> Result<Vec<(String, String)>, ParseError> {
    let mut attrs = Vec::new();
    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;
        attrs.push((key.to_string(), unescape(value)?.into_owned()));
    }
    Ok(attrs)
}

fn parse_bool(element: &str, attribute: &str, value: &str) -> Result<bool, ParseError> {
    match value {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ParseError::invalid_attr(element, attribute, value)),
    }
}

/// Parses the module element attributes.
fn parse_module_attrs(e: &BytesStart<'_>) -> Result<Module, ParseError> {
    let mut name = String::new();
    let mut description = None;

    for (key, value) in attributes(e)? {
        match key.as_str() {
            "name" => name = value,
            "description" => description = Some(value),
            _ => {}
        }
    }

    let mut module = Module::new(name);
    module.description = description;
    Ok(module)
}

/// Class or interface whose type expressions are parsed once all generic
/// parameters are known.
struct PendingType {
    def: TypeDef,
    base: Option<String>,
    properties: Vec<PendingProperty>,
}

struct PendingProperty {
    name: String,
    type_expr: String,
    nullable: bool,
    description: Option<String>,
}

impl PendingType {
    fn finish(self) -> Result<TypeDef, ParseError> {
        let mut def = self.def;
        if let Some(base) = self.base {
            def.base = Some(parse_type_ref_in(&base, &def.generic_params)?);
        }
        for pending in self.properties {
            if def.property(&pending.name).is_some() {
                return Err(ParseError::duplicate(
                    "property",
                    format!("{}.{}", def.name, pending.name),
                ));
            }
            let ty = parse_type_ref_in(&pending.type_expr, &def.generic_params)?;
            let mut property = PropertyDef::new(pending.name, ty).with_nullable(pending.nullable);
            property.description = pending.description;
            def.add_property(property);
        }
        Ok(def)
    }
}

/// Parses class or interface attributes.
fn parse_type_attrs(
    e: &BytesStart<'_>,
    kind: TypeKind,
    declaring_type: Option<&str>,
) -> Result<PendingType, ParseError> {
    let element = if kind == TypeKind::Interface {
        "interface"
    } else {
        "class"
    };
    let mut name = None;
    let mut base = None;
    let mut is_abstract = false;
    let mut declaring = declaring_type.map(str::to_string);
    let mut description = None;

    for (key, value) in attributes(e)? {
        match key.as_str() {
            "name" => name = Some(value),
            "base" => base = Some(value),
            "abstract" => is_abstract = parse_bool(element, "abstract", &value)?,
            "declaringType" => declaring = Some(value),
            "description" => description = Some(value),
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr(element, "name"))?;
    let mut def = TypeDef::new(name, kind);
    def.is_abstract = is_abstract;
    def.declaring_type = declaring;
    def.description = description;

    Ok(PendingType {
        def,
        base,
        properties: Vec::new(),
    })
}

/// Parses a class or interface definition, including any nested types.
///
/// The nested types follow the enclosing type in the returned list.
fn parse_type(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    kind: TypeKind,
    declaring_type: Option<&str>,
) -> Result<Vec<TypeDef>, ParseError> {
    let mut pending = parse_type_attrs(e, kind, declaring_type)?;
    let owner = pending.def.name.clone();
    let mut nested = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let tag_name = std::str::from_utf8(&name_bytes)?;
                match tag_name {
                    "class" => {
                        nested.extend(parse_type(reader, e, TypeKind::Class, Some(&owner))?);
                    }
                    "interface" => {
                        nested.extend(parse_type(reader, e, TypeKind::Interface, Some(&owner))?);
                    }
                    "enum" => nested.push(parse_enum(reader, e, Some(&owner))?),
                    other => return Err(ParseError::unknown_element(other, owner)),
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let tag_name = std::str::from_utf8(&name_bytes)?;
                match tag_name {
                    "typeParam" => pending.def.generic_params.push(parse_type_param(e)?),
                    "property" => pending.properties.push(parse_property(e)?),
                    "class" => nested.push(
                        parse_type_attrs(e, TypeKind::Class, Some(&owner))?.finish()?,
                    ),
                    "interface" => nested.push(
                        parse_type_attrs(e, TypeKind::Interface, Some(&owner))?.finish()?,
                    ),
                    "enum" => nested.push(parse_enum_attrs(e, Some(&owner))?),
                    other => return Err(ParseError::unknown_element(other, owner)),
                }
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => {
                let element = if kind == TypeKind::Interface {
                    "interface"
                } else {
                    "class"
                };
                return Err(ParseError::unexpected_eof(element, &owner));
            }
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    let mut defs = vec![pending.finish()?];
    defs.append(&mut nested);
    Ok(defs)
}

/// Parses a generic parameter declaration.
fn parse_type_param(e: &BytesStart<'_>) -> Result<String, ParseError> {
    attributes(e)?
        .into_iter()
        .find(|(key, _)| key == "name")
        .map(|(_, value)| value)
        .ok_or_else(|| ParseError::missing_attr("typeParam", "name"))
}

/// Parses a property declaration.
fn parse_property(e: &BytesStart<'_>) -> Result<PendingProperty, ParseError> {
    let mut name = None;
    let mut type_expr = None;
    let mut nullable = false;
    let mut description = None;

    for (key, value) in attributes(e)? {
        match key.as_str() {
            "name" => name = Some(value),
            "type" => type_expr = Some(value),
            "nullable" => nullable = parse_bool("property", "nullable", &value)?,
            "description" => description = Some(value),
            _ => {}
        }
    }

    Ok(PendingProperty {
        name: name.ok_or_else(|| ParseError::missing_attr("property", "name"))?,
        type_expr: type_expr.ok_or_else(|| ParseError::missing_attr("property", "type"))?,
        nullable,
        description,
    })
}

/// Parses enumeration attributes.
fn parse_enum_attrs(
    e: &BytesStart<'_>,
    declaring_type: Option<&str>,
) -> Result<TypeDef, ParseError> {
    let mut name = None;
    let mut declaring = declaring_type.map(str::to_string);
    let mut description = None;

    for (key, value) in attributes(e)? {
        match key.as_str() {
            "name" => name = Some(value),
            "declaringType" => declaring = Some(value),
            "description" => description = Some(value),
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("enum", "name"))?;
    let mut def = TypeDef::enumeration(name);
    def.declaring_type = declaring;
    def.description = description;
    Ok(def)
}

/// Parses an enumeration definition.
fn parse_enum(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    declaring_type: Option<&str>,
) -> Result<TypeDef, ParseError> {
    let mut def = parse_enum_attrs(e, declaring_type)?;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                expect_value_element(e, &def)?;
                let mut member = parse_enum_value_attrs(e, next_enum_value(&def))?;
                if let Some(text) = read_text(reader, &member.name)? {
                    member.value = text
                        .parse()
                        .map_err(|_| ParseError::invalid_attr("value", "value", text.as_str()))?;
                }
                def.add_member(member);
            }
            Ok(Event::Empty(ref e)) => {
                expect_value_element(e, &def)?;
                let member = parse_enum_value_attrs(e, next_enum_value(&def))?;
                def.add_member(member);
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => return Err(ParseError::unexpected_eof("enum", &def.name)),
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(def)
}

fn expect_value_element(e: &BytesStart<'_>, def: &TypeDef) -> Result<(), ParseError> {
    let name_bytes = e.name().as_ref().to_vec();
    let tag_name = std::str::from_utf8(&name_bytes)?;
    if tag_name == "value" {
        Ok(())
    } else {
        Err(ParseError::unknown_element(tag_name, def.name.as_str()))
    }
}

/// Value an enumeration member takes when none is given: one past the
/// previous member, starting at zero.
fn next_enum_value(def: &TypeDef) -> i64 {
    def.members.last().map_or(0, |m| m.value.saturating_add(1))
}

/// Parses the attributes of an enumeration member.
fn parse_enum_value_attrs(
    e: &BytesStart<'_>,
    default_value: i64,
) -> Result<EnumMember, ParseError> {
    let mut name = None;
    let mut value = default_value;
    let mut description = None;

    for (key, raw) in attributes(e)? {
        match key.as_str() {
            "name" => name = Some(raw),
            "value" => {
                value = raw
                    .parse()
                    .map_err(|_| ParseError::invalid_attr("value", "value", raw.as_str()))?
            }
            "description" => description = Some(raw),
            _ => {}
        }
    }

    let mut member = EnumMember::new(
        name.ok_or_else(|| ParseError::missing_attr("value", "name"))?,
        value,
    );
    member.description = description;
    Ok(member)
}

/// Reads the text content of the enumeration member `member` up to its end
/// tag.
fn read_text(reader: &mut Reader<&[u8]>, member: &str) -> Result<Option<String>, ParseError> {
    let mut buf = Vec::new();
    let mut text = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Text(ref t)) => {
                let value = std::str::from_utf8(t.as_ref())?.trim();
                if !value.is_empty() {
                    text = Some(value.to_string());
                }
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => return Err(ParseError::unexpected_eof("value", member)),
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Builtin, TypeRef};

    const SHOP_MANIFEST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<module name="Shop.Models" description="Shop models">
    <enum name="ProductStatus">
        <value name="InStock">0</value>
        <value name="OutOfStock">1</value>
        <value name="Discontinued"/>
    </enum>
    <class name="ProductBase" abstract="true">
        <property name="Id" type="Guid"/>
        <property name="Name" type="string" nullable="true"/>
    </class>
    <class name="Product" base="ProductBase">
        <property name="Price" type="decimal"/>
        <property name="Status" type="ProductStatus"/>
        <property name="Tags" type="IEnumerable&lt;Tag&gt;"/>
        <property name="LastUpdated" type="DateTime?"/>
        <class name="Audit">
            <property name="By" type="string"/>
        </class>
    </class>
    <class name="Tag">
        <property name="Id" type="int"/>
    </class>
    <class name="Lookup">
        <typeParam name="T"/>
        <property name="Id" type="T"/>
        <property name="Name" type="string"/>
    </class>
    <interface name="IEntity"/>
</module>"#;

    #[test]
    fn test_parse_module_attributes() {
        let module = parse_module(SHOP_MANIFEST).expect("Failed to parse manifest");

        assert_eq!(module.name, "Shop.Models");
        assert_eq!(module.description.as_deref(), Some("Shop models"));
        assert_eq!(module.types.len(), 7);
    }

    #[test]
    fn test_parse_enum() {
        let module = parse_module(SHOP_MANIFEST).expect("Failed to parse manifest");
        let status = module.get_type("ProductStatus").unwrap();

        assert!(status.is_enum());
        let members: Vec<_> = status
            .members
            .iter()
            .map(|m| (m.name.as_str(), m.value))
            .collect();
        assert_eq!(
            members,
            vec![("InStock", 0), ("OutOfStock", 1), ("Discontinued", 2)]
        );
    }

    #[test]
    fn test_parse_class_with_base_and_properties() {
        let module = parse_module(SHOP_MANIFEST).expect("Failed to parse manifest");
        let product = module.get_type("Product").unwrap();

        assert_eq!(product.base, Some(TypeRef::named("ProductBase")));
        assert_eq!(product.properties.len(), 4);
        assert_eq!(
            product.property("Tags").unwrap().ty,
            TypeRef::generic("IEnumerable", vec![TypeRef::named("Tag")])
        );

        let updated = product.property("LastUpdated").unwrap();
        assert!(updated.nullable);
        assert_eq!(
            updated.ty,
            TypeRef::nullable(TypeRef::Builtin(Builtin::DateTime))
        );
    }

    #[test]
    fn test_parse_abstract_and_nullable_flags() {
        let module = parse_module(SHOP_MANIFEST).expect("Failed to parse manifest");
        let base = module.get_type("ProductBase").unwrap();

        assert!(base.is_abstract);
        assert!(base.property("Name").unwrap().nullable);
        assert!(!base.property("Id").unwrap().nullable);
    }

    #[test]
    fn test_parse_nested_type() {
        let module = parse_module(SHOP_MANIFEST).expect("Failed to parse manifest");
        let audit = module.get_type("Audit").unwrap();

        assert!(audit.is_nested());
        assert_eq!(audit.declaring_type.as_deref(), Some("Product"));
    }

    #[test]
    fn test_parse_generic_definition() {
        let module = parse_module(SHOP_MANIFEST).expect("Failed to parse manifest");
        let lookup = module.get_type("Lookup").unwrap();

        assert_eq!(lookup.generic_params, vec!["T".to_string()]);
        assert_eq!(lookup.property("Id").unwrap().ty, TypeRef::parameter("T"));
    }

    #[test]
    fn test_parse_empty_interface() {
        let module = parse_module(SHOP_MANIFEST).expect("Failed to parse manifest");
        assert!(module.get_type("IEntity").unwrap().is_interface());
    }

    #[test]
    fn test_missing_module_element() {
        let result = parse_module("<?xml version=\"1.0\"?><types/>");
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_type_rejected() {
        let xml = r#"<module name="M"><class name="A"/><class name="A"/></module>"#;
        assert!(matches!(
            parse_module(xml),
            Err(ParseError::DuplicateDefinition { .. })
        ));
    }

    #[test]
    fn test_duplicate_property_rejected() {
        let xml = r#"<module name="M">
    <class name="A">
        <property name="X" type="int"/>
        <property name="X" type="string"/>
    </class>
</module>"#;
        assert!(matches!(
            parse_module(xml),
            Err(ParseError::DuplicateDefinition { .. })
        ));
    }

    #[test]
    fn test_missing_property_type() {
        let xml = r#"<module name="M"><class name="A"><property name="X"/></class></module>"#;
        assert!(matches!(
            parse_module(xml),
            Err(ParseError::MissingAttribute { .. })
        ));
    }

    #[test]
    fn test_unknown_element_rejected() {
        let xml = r#"<module name="M"><class name="A"><field name="X"/></class></module>"#;
        assert!(matches!(
            parse_module(xml),
            Err(ParseError::UnknownElement { .. })
        ));
    }

    #[test]
    fn test_invalid_enum_value() {
        let xml = r#"<module name="M"><enum name="E"><value name="A">abc</value></enum></module>"#;
        assert!(matches!(
            parse_module(xml),
            Err(ParseError::InvalidAttribute { .. })
        ));
    }

    #[test]
    fn test_parse_module_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SHOP_MANIFEST.as_bytes()).unwrap();

        let module = parse_module_file(file.path()).expect("Failed to parse manifest file");
        assert_eq!(module.name, "Shop.Models");

        let missing = file.path().with_extension("missing");
        assert!(matches!(
            parse_module_file(&missing),
            Err(ParseError::Io(_))
        ));
    }

    #[test]
    fn test_truncated_manifest_rejected() {
        let truncated = [
            (r#"<module name="M"><class name="A"><property name="X" type="int"/>"#, "class"),
            (r#"<module name="M"><interface name="IA">"#, "interface"),
            (r#"<module name="M"><enum name="E"><value name="A">1"#, "value"),
            (r#"<module name="M"><enum name="E"><value name="A"/>"#, "enum"),
            (r#"<module name="M"><class name="A"/>"#, "module"),
        ];

        for (xml, element) in truncated {
            match parse_module(xml) {
                Err(ParseError::InvalidStructure { message }) => {
                    assert!(message.contains(&format!("<{} name=", element)), "{}", message);
                }
                other => panic!("expected truncation error for {}, got {:?}", xml, other),
            }
        }
    }

    #[test]
    fn test_empty_module_element() {
        let module = parse_module(r#"<module name="M"/>"#).expect("Failed to parse manifest");
        assert_eq!(module.name, "M");
        assert!(module.types.is_empty());
    }
}
