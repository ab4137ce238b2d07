//! Example generating TypeScript declarations from a type manifest.
//!
//! Run with: `cargo run --example generate [manifest.xml] [output.d.ts]`
//!
//! Without arguments a built-in manifest is used and the output is printed.

use std::path::PathBuf;
use vantype::prelude::*;

const SHOP_MANIFEST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<module name="Shop.Models">
    <enum name="ProductStatus">
        <value name="InStock">0</value>
        <value name="OutOfStock">1</value>
    </enum>
    <class name="ProductBase" abstract="true">
        <property name="Id" type="Guid"/>
        <property name="Name" type="string"/>
    </class>
    <class name="ProductModel" base="ProductBase">
        <property name="Price" type="decimal"/>
        <property name="IsVisible" type="bool"/>
        <property name="Status" type="ProductStatus"/>
        <property name="Tags" type="IEnumerable&lt;Tag&gt;"/>
        <property name="LastUpdated" type="DateTime"/>
        <property name="KeyWords" type="string[]"/>
    </class>
    <class name="Tag">
        <property name="Id" type="int"/>
        <property name="Name" type="string"/>
    </class>
    <class name="Lookup">
        <typeParam name="T"/>
        <property name="Id" type="T"/>
        <property name="Name" type="string"/>
    </class>
</module>"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let module = match args.next() {
        Some(path) => parse_module_file(&PathBuf::from(path))?,
        None => parse_module(SHOP_MANIFEST)?,
    };
    validate_module(&module)?;

    println!("Loaded module {} with {} types", module.name, module.types.len());

    let mut config = TypeScript::config(&module)
        .add_module()
        .preserve_inheritance(true)
        .use_enum_conversion(EnumConversion::String);

    match args.next() {
        Some(output) => {
            let path = PathBuf::from(output);
            write_to_file(&mut config, DeclarationKind::Class, &path)?;
            println!("Wrote classes to {}", path.display());
        }
        None => {
            println!("\n// Interfaces\n");
            print!("{}", config.generate_interfaces()?);
            println!("// Classes\n");
            print!("{}", config.generate_classes()?);
        }
    }

    Ok(())
}
