//! Resolved descriptions of the fields this crate emits code for.
//!
//! Descriptor loading, option parsing and type name resolution happen
//! upstream; the types here carry the already resolved facts a field
//! generator needs and nothing else.

use crate::wire::WireType;

/// Declared type of a field, which fixes its wire encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldType {
    /// Length-delimited encoding (wire type 2).
    Message,
    /// Legacy group encoding bracketed by start and end tags (wire types 3
    /// and 4).
    Group,
}

/// Syntax-level cardinality of a singular field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Label {
    /// Explicit presence: proto2 or proto3 `optional`, or a plain proto3
    /// singular field.
    Optional,
    /// proto2 `required`.
    Required,
}

/// How instances of the field's message type are stored in C#.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    /// Reference type (class); absence is represented by `null`.
    Reference,
    /// Value type (struct) embedded directly as a bare public member.
    Inline,
    /// Value type (struct) stored privately and exposed through a
    /// `ref readonly` accessor.
    InlineByRef,
}

/// The oneof group a field belongs to. The case identifier is derived from
/// the member field itself: its Pascal-case name and its wire number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OneofDescriptor {
    /// Proto name of the group, e.g. `"result"`.
    pub name: String,
}

/// A fully resolved singular message or group field.
#[derive(Clone, Debug)]
pub struct FieldDescriptor {
    /// Proto field name as written in the source file.
    pub name: String,
    /// Field number on the wire.
    pub number: u32,
    pub field_type: FieldType,
    /// Fully qualified C# name of the field's message type.
    pub type_name: String,
    pub label: Label,
    pub value_kind: ValueKind,
    /// Whether absence is represented by a null storage slot. Must agree
    /// with `value_kind`; generator construction rejects contradictions.
    pub nullable: bool,
    pub oneof: Option<OneofDescriptor>,
    /// For extension fields, the fully qualified C# name of the extended
    /// message.
    pub extendee: Option<String>,
    pub deprecated: bool,
    /// Leading comment from the source file, if any.
    pub comment: Option<String>,
}

impl FieldDescriptor {
    /// The wire type of the field's start key.
    pub fn wire_type(&self) -> WireType {
        match self.field_type {
            FieldType::Message => WireType::LengthDelimited,
            FieldType::Group => WireType::StartGroup,
        }
    }

    pub fn is_group(&self) -> bool {
        self.field_type == FieldType::Group
    }

    pub fn is_extension(&self) -> bool {
        self.extendee.is_some()
    }

    /// Whether the field's storage is a C# value type.
    pub fn is_value_type(&self) -> bool {
        matches!(self.value_kind, ValueKind::Inline | ValueKind::InlineByRef)
    }
}
