//! TypeScript declaration generators.

pub mod classes;
pub mod enums;
pub mod interfaces;
pub mod properties;

pub use classes::ClassGenerator;
pub use enums::EnumGenerator;
pub use interfaces::InterfaceGenerator;
pub use properties::PropertyGenerator;
