//! Conversions from proto field and oneof names to the C# member names
//! emitted for them.
//!
//! Private storage members take an underscore suffix, which keeps them clear
//! of every C# keyword and of the Pascal-case property sharing their name.
//! The suffix is applied by the binding table, not here.

use heck::{ToLowerCamelCase, ToUpperCamelCase};

/// The Pascal-case name used for properties, case members and extension
/// declarations.
pub fn property_name(proto_name: &str) -> String {
    proto_name.to_upper_camel_case()
}

/// The camel-case base name used for private storage members.
pub fn camel_name(proto_name: &str) -> String {
    proto_name.to_lower_camel_case()
}
