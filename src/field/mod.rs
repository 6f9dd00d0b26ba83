//! Per-field code generators for emitted C# message classes.
//!
//! One generator is constructed per field and invoked once per emission
//! surface while the surrounding class is printed. Each operation appends a
//! self-contained fragment; ordering across fields belongs to the caller.
//! [`new_field_generator`] selects the variant matching the descriptor.

mod message;

pub use message::{MessageField, MessageOneofField};

use anyhow::{bail, Error};
use itertools::Itertools;

use crate::descriptor::{FieldDescriptor, OneofDescriptor, ValueKind};
use crate::ident;
use crate::options::Options;
use crate::printer::{Printer, Vars};
use crate::wire::{self, WireType};

/// The emission surfaces every field kind provides.
///
/// Generators are stateless beyond their binding table, so the operations
/// may be called in any order and any number of times, from any thread.
pub trait FieldGenerator: std::fmt::Debug + Send + Sync {
    /// Storage declaration and accessor members.
    fn generate_members(&self, printer: &mut Printer<'_>);
    /// Body of the clone constructor; the emitted code reads a `deep`
    /// parameter selecting recursive duplication over structural sharing.
    fn generate_cloning_code(&self, printer: &mut Printer<'_>);
    /// Contribution to `MergeFrom(other)`.
    fn generate_merging_code(&self, printer: &mut Printer<'_>);
    /// Case body run when this field's tag is read from the input stream.
    fn generate_parsing_code(&self, printer: &mut Printer<'_>);
    /// Tag and payload writes for `WriteTo`.
    fn generate_serialization_code(&self, printer: &mut Printer<'_>);
    /// Contribution to `CalculateSize`.
    fn generate_serialized_size_code(&self, printer: &mut Printer<'_>);
    /// The `pb::FieldCodec` expression for this field's payload.
    fn generate_codec_code(&self, printer: &mut Printer<'_>);
    /// Static extension member declaration for extension fields.
    fn generate_extension_code(&self, printer: &mut Printer<'_>);
    /// Field initialization inside a struct message constructor.
    fn generate_struct_constructor_code(&self, printer: &mut Printer<'_>);
    /// Contribution to `GetHashCode`.
    fn write_hash(&self, printer: &mut Printer<'_>);
    /// Contribution to `Equals(other)`.
    fn write_equals(&self, printer: &mut Printer<'_>);
    /// Contribution to the `ToString` rendering path.
    fn write_to_string(&self, printer: &mut Printer<'_>);
}

/// Builds the generator variant matching `descriptor`.
pub fn new_field_generator(
    descriptor: &FieldDescriptor,
    options: &Options,
) -> Result<Box<dyn FieldGenerator>, Error> {
    if descriptor.oneof.is_some() {
        Ok(Box::new(MessageOneofField::new(descriptor, options)?))
    } else {
        Ok(Box::new(MessageField::new(descriptor, options)?))
    }
}

/// Storage shape selected for a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Storage {
    /// Value type embedded directly as a bare public member.
    Bare,
    /// Value type stored privately behind a `ref readonly` accessor.
    ReadOnlyRef,
    /// Private storage behind a get/init property.
    Property,
}

impl Storage {
    /// Classifies a field, checking the descriptor's nullability claim
    /// against its value or reference nature. Oneof members always take the
    /// property shape layered on the group's shared slot.
    pub(crate) fn classify(descriptor: &FieldDescriptor) -> Result<Storage, Error> {
        match descriptor.value_kind {
            ValueKind::Reference if !descriptor.nullable => bail!(
                "message field {} is a reference type and must be nullable",
                descriptor.name
            ),
            ValueKind::Inline | ValueKind::InlineByRef if descriptor.nullable => bail!(
                "message field {} is a value type and cannot be nullable",
                descriptor.name
            ),
            _ => {}
        }
        if descriptor.oneof.is_some() {
            return Ok(Storage::Property);
        }
        Ok(match descriptor.value_kind {
            ValueKind::Inline => Storage::Bare,
            ValueKind::InlineByRef => Storage::ReadOnlyRef,
            ValueKind::Reference => Storage::Property,
        })
    }
}

/// Binds the variables shared by every emission surface of a field.
///
/// `storage_name` is the member holding the existing instance, used where
/// emitted code merges or reads in place. `reading_member` and
/// `writing_member` are the read and commit paths; they coincide for plain
/// fields and diverge for oneof members, whose bindings are rebound by
/// [`set_common_oneof_field_variables`].
pub(crate) fn set_common_field_variables(
    descriptor: &FieldDescriptor,
    options: &Options,
    storage: Storage,
    vars: &mut Vars,
) {
    let name = ident::camel_name(&descriptor.name);
    let property_name = ident::property_name(&descriptor.name);

    let tag = wire::make_tag(descriptor.number, descriptor.wire_type());
    vars.set("tag", tag.to_string());
    vars.set("tag_bytes", tag_bytes(tag));
    let mut tag_size = wire::tag_len(descriptor.number);
    if descriptor.is_group() {
        let end_tag = wire::make_tag(descriptor.number, WireType::EndGroup);
        vars.set("end_tag", end_tag.to_string());
        vars.set("end_tag_bytes", tag_bytes(end_tag));
        // A group is bracketed by its start and end tags; size code must
        // count both.
        tag_size *= 2;
    }
    vars.set("tag_size", tag_size.to_string());

    vars.set("access_level", options.access_level.modifier());
    vars.set("descriptor_name", descriptor.name.clone());
    vars.set("type_name", descriptor.type_name.clone());
    vars.set("type_at_rest", descriptor.type_name.clone());
    vars.set("number", descriptor.number.to_string());
    vars.set(
        "default_value",
        if descriptor.is_value_type() { "default" } else { "null" },
    );

    if let Some(extendee) = &descriptor.extendee {
        vars.set("extended_type", extendee.clone());
    }

    let member = match storage {
        Storage::Bare => property_name.clone(),
        Storage::ReadOnlyRef | Storage::Property => format!("{name}_"),
    };
    vars.set("storage_name", member.clone());
    vars.set("reading_member", member.clone());
    vars.set("writing_member", member);

    if descriptor.nullable {
        vars.set("has_property_check", format!("{name}_ != null"));
        vars.set("has_property_check_internal", format!("{name}_ != null"));
        vars.set("other_has_property_check", format!("other.{name}_ != null"));
    }
    if let Some(oneof) = &descriptor.oneof {
        set_common_oneof_field_variables(descriptor, oneof, vars);
    }

    vars.set("name", name);
    vars.set("property_name", property_name);
}

/// Rebinds presence and member variables for a oneof member. The value slot
/// and case discriminant live on the owning group; the member only compares
/// and writes its own case.
pub(crate) fn set_common_oneof_field_variables(
    descriptor: &FieldDescriptor,
    oneof: &OneofDescriptor,
    vars: &mut Vars,
) {
    let oneof_name = ident::camel_name(&oneof.name);
    let oneof_property_name = ident::property_name(&oneof.name);
    let property_name = ident::property_name(&descriptor.name);

    let check = format!("{oneof_name}Case_ == {oneof_property_name}OneofCase.{property_name}");
    vars.set("other_has_property_check", format!("other.{check}"));
    vars.set("has_property_check", check.clone());
    vars.set("has_property_check_internal", check);

    // Equality and hashing read through the nullable public property.
    vars.set("type_at_rest", format!("{}?", descriptor.type_name));
    vars.set("reading_member", property_name.clone());
    vars.set("writing_member", format!("{property_name}_Internal"));

    vars.set("oneof_name", oneof_name);
    vars.set("oneof_property_name", oneof_property_name);
    vars.set("oneof_case_name", property_name);
}

fn tag_bytes(tag: u32) -> String {
    wire::varint_bytes(u64::from(tag)).iter().join(", ")
}

/// Writes the XML doc comment for a member generated from `descriptor`.
pub(crate) fn write_property_doc_comment(printer: &mut Printer<'_>, descriptor: &FieldDescriptor) {
    let comment = match &descriptor.comment {
        Some(comment) => comment,
        None => return,
    };
    printer.raw("/// <summary>\n");
    for line in comment.lines() {
        printer.raw("/// ");
        printer.raw(&xml_escape(line));
        printer.raw("\n");
    }
    printer.raw("/// </summary>\n");
}

pub(crate) fn add_deprecated_flag(printer: &mut Printer<'_>, descriptor: &FieldDescriptor) {
    if descriptor.deprecated {
        printer.raw("[global::System.ObsoleteAttribute]\n");
    }
}

/// Attributes carried by the accessor members generated for a field.
pub(crate) fn add_public_member_attributes(
    printer: &mut Printer<'_>,
    descriptor: &FieldDescriptor,
) {
    add_deprecated_flag(printer, descriptor);
    printer.raw("[global::System.Diagnostics.DebuggerNonUserCodeAttribute]\n");
    printer.raw("[global::System.CodeDom.Compiler.GeneratedCode(\"protoc\", null)]\n");
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;")
}
