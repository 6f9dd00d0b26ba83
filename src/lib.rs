#![doc(html_root_url = "https://docs.rs/sharpgen/0.1.0")]

//! `sharpgen` emits C# source for Protocol Buffers message and group fields.
//!
//! Given a resolved field descriptor, [`new_field_generator`] selects a
//! generator that knows the field's storage shape and presence discipline,
//! and each generator method prints one surface of the field into the caller's
//! output: member declarations, wire codec fragments, merge and clone bodies,
//! equality, hashing and text rendering, and extension declarations. The
//! fragments target the `Google.Protobuf` runtime.
//!
//! Generators are constructed fallibly; descriptors whose nullability
//! contradicts their value or reference nature, or whose oneof membership is
//! malformed, are rejected up front. Once built, emission cannot fail.

pub mod descriptor;
pub mod field;
pub mod ident;
pub mod options;
pub mod printer;
pub mod wire;

pub use crate::descriptor::{FieldDescriptor, FieldType, Label, OneofDescriptor, ValueKind};
pub use crate::field::{
    new_field_generator, FieldGenerator, MessageField, MessageOneofField, Storage,
};
pub use crate::options::{AccessLevel, Options};
pub use crate::printer::{Printer, Vars};
