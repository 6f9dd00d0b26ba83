//! Generators for singular message and group fields.
//!
//! The emitted fragments target the `Google.Protobuf` C# runtime; `pb::` and
//! `scg::` are the namespace aliases every generated file declares.

use anyhow::{bail, Error};
use log::debug;

use crate::descriptor::{FieldDescriptor, FieldType, Label};
use crate::field::{
    add_deprecated_flag, add_public_member_attributes, set_common_field_variables,
    write_property_doc_comment, FieldGenerator, Storage,
};
use crate::options::Options;
use crate::printer::{Printer, Vars};

/// Generator for a message or group field declared outside any oneof. Also
/// the substrate that [`MessageOneofField`] layers its overrides on.
#[derive(Debug)]
pub struct MessageField {
    descriptor: FieldDescriptor,
    options: Options,
    storage: Storage,
    vars: Vars,
}

impl MessageField {
    pub fn new(descriptor: &FieldDescriptor, options: &Options) -> Result<MessageField, Error> {
        if descriptor.label == Label::Required && descriptor.oneof.is_some() {
            bail!(
                "message field {} cannot be required inside a oneof",
                descriptor.name
            );
        }
        if descriptor.is_extension() && descriptor.oneof.is_some() {
            bail!(
                "extension field {} cannot be a member of a oneof",
                descriptor.name
            );
        }
        let storage = Storage::classify(descriptor)?;
        let mut vars = Vars::new();
        set_common_field_variables(descriptor, options, storage, &mut vars);
        debug!(
            "field {}: {:?} wire shape, {:?} storage",
            descriptor.name, descriptor.field_type, storage
        );
        Ok(MessageField {
            descriptor: descriptor.clone(),
            options: *options,
            storage,
            vars,
        })
    }

    fn is_message(&self) -> bool {
        self.descriptor.field_type == FieldType::Message
    }

    /// Whether emitted wire, hash and rendering paths test presence before
    /// touching the value. Value-type plain fields are always present and
    /// take the unconditional forms.
    fn guarded(&self) -> bool {
        self.descriptor.nullable || self.descriptor.oneof.is_some()
    }

    fn supports_presence_api(&self) -> bool {
        self.options.presence_api && self.guarded()
    }
}

impl FieldGenerator for MessageField {
    fn generate_members(&self, printer: &mut Printer<'_>) {
        match self.storage {
            Storage::Bare => {
                write_property_doc_comment(printer, &self.descriptor);
                printer.print(&self.vars, "public $type_at_rest$ $property_name$;\n");
            }
            Storage::ReadOnlyRef => {
                printer.print(&self.vars, "private $type_at_rest$ $name$_;\n");
                write_property_doc_comment(printer, &self.descriptor);
                add_public_member_attributes(printer, &self.descriptor);
                printer.print(
                    &self.vars,
                    r#"$access_level$ ref readonly $type_at_rest$ $property_name$ {
  get { return ref $name$_; }
}
"#,
                );
                printer.print(
                    &self.vars,
                    r#"$access_level$ $type_at_rest$ $property_name$ {
  init { $name$_ = value; }
}
"#,
                );
            }
            Storage::Property => {
                printer.print(&self.vars, "private $type_at_rest$ $name$_;\n");
                write_property_doc_comment(printer, &self.descriptor);
                add_public_member_attributes(printer, &self.descriptor);
                printer.print(
                    &self.vars,
                    r#"$access_level$ $type_at_rest$ $property_name$ {
  get { return $name$_; }
  init {
    $name$_ = value;
  }
}
"#,
                );
                if self.supports_presence_api() {
                    printer.print(
                        &self.vars,
                        "/// <summary>Gets whether the $descriptor_name$ field is set</summary>\n",
                    );
                    add_public_member_attributes(printer, &self.descriptor);
                    printer.print(
                        &self.vars,
                        r#"$access_level$ bool Has$property_name$ {
  get { return $has_property_check_internal$; }
}
"#,
                    );
                    printer.print(
                        &self.vars,
                        "/// <summary>Clears the value of the $descriptor_name$ field</summary>\n",
                    );
                    add_public_member_attributes(printer, &self.descriptor);
                    printer.print(
                        &self.vars,
                        r#"private void Clear$property_name$() {
  $name$_ = default;
}
"#,
                    );
                }
            }
        }
    }

    fn generate_cloning_code(&self, printer: &mut Printer<'_>) {
        if self.storage == Storage::Bare {
            printer.print(
                &self.vars,
                "$property_name$ = deep ? other.$property_name$.DeepClone() : other.$property_name$;\n",
            );
        } else if self.descriptor.nullable {
            printer.print(
                &self.vars,
                "$writing_member$ = $other_has_property_check$ ? (deep ? other.$reading_member$.DeepClone() : other.$reading_member$) : null;\n",
            );
        } else {
            printer.print(
                &self.vars,
                "$writing_member$ = deep ? other.$reading_member$.DeepClone() : other.$reading_member$;\n",
            );
        }
    }

    fn generate_merging_code(&self, printer: &mut Printer<'_>) {
        if !self.descriptor.nullable {
            printer.print(
                &self.vars,
                "$storage_name$.MergeFrom(other.$storage_name$);\n",
            );
        } else {
            printer.print(
                &self.vars,
                r#"if ($other_has_property_check$) {
  $type_name$ merged = $has_property_check$ ? new $type_name$($reading_member$) : new $type_name$();
  merged.MergeFrom(other.$reading_member$);
  $writing_member$ = merged;
}
"#,
            );
        }
    }

    fn generate_parsing_code(&self, printer: &mut Printer<'_>) {
        if self.descriptor.nullable {
            printer.print(
                &self.vars,
                r#"if (!($has_property_check$)) {
  $storage_name$ = new $type_name$();
}
"#,
            );
        }
        if self.descriptor.is_value_type() {
            // Value types read through the direct buffer entry point and are
            // written back by cast.
            if self.is_message() {
                printer.print(
                    &self.vars,
                    "pb::IBufferMessage bufferMessage = $storage_name$; input.ReadMessage(bufferMessage);\n",
                );
            } else {
                printer.print(
                    &self.vars,
                    "pb::IBufferMessage bufferMessage = $storage_name$; input.ReadGroup(bufferMessage);\n",
                );
            }
            printer.print(&self.vars, "$writing_member$ = ($type_at_rest$)bufferMessage;\n");
        } else {
            if self.is_message() {
                printer.print(&self.vars, "input.ReadMessage($storage_name$);\n");
            } else {
                printer.print(&self.vars, "input.ReadGroup($storage_name$);\n");
            }
            printer.print(&self.vars, "$writing_member$ = $storage_name$;\n");
        }
    }

    fn generate_serialization_code(&self, printer: &mut Printer<'_>) {
        match (self.is_message(), self.guarded()) {
            (true, true) => printer.print(
                &self.vars,
                r#"if ($has_property_check$) {
  output.WriteRawTag($tag_bytes$);
  output.WriteMessage($reading_member$);
}
"#,
            ),
            (true, false) => printer.print(
                &self.vars,
                "output.WriteRawTag($tag_bytes$);\noutput.WriteMessage($reading_member$);\n",
            ),
            (false, true) => printer.print(
                &self.vars,
                r#"if ($has_property_check$) {
  output.WriteRawTag($tag_bytes$);
  output.WriteGroup($reading_member$);
  output.WriteRawTag($end_tag_bytes$);
}
"#,
            ),
            (false, false) => printer.print(
                &self.vars,
                "output.WriteRawTag($tag_bytes$);\noutput.WriteGroup($reading_member$);\noutput.WriteRawTag($end_tag_bytes$);\n",
            ),
        }
    }

    fn generate_serialized_size_code(&self, printer: &mut Printer<'_>) {
        match (self.is_message(), self.guarded()) {
            (true, true) => printer.print(
                &self.vars,
                r#"if ($has_property_check$) {
  size += $tag_size$ + pb::CodedOutputStream.ComputeMessageSize($reading_member$);
}
"#,
            ),
            (true, false) => printer.print(
                &self.vars,
                "size += $tag_size$ + pb::CodedOutputStream.ComputeMessageSize($reading_member$);\n",
            ),
            (false, true) => printer.print(
                &self.vars,
                r#"if ($has_property_check$) {
  size += $tag_size$ + pb::CodedOutputStream.ComputeGroupSize($reading_member$);
}
"#,
            ),
            (false, false) => printer.print(
                &self.vars,
                "size += $tag_size$ + pb::CodedOutputStream.ComputeGroupSize($reading_member$);\n",
            ),
        }
    }

    fn generate_codec_code(&self, printer: &mut Printer<'_>) {
        if self.is_message() {
            printer.print(
                &self.vars,
                "pb::FieldCodec.ForMessage($tag$, $type_name$.Parser)",
            );
        } else {
            printer.print(
                &self.vars,
                "pb::FieldCodec.ForGroup($tag$, $end_tag$, $type_name$.Parser)",
            );
        }
    }

    fn generate_extension_code(&self, printer: &mut Printer<'_>) {
        write_property_doc_comment(printer, &self.descriptor);
        add_deprecated_flag(printer, &self.descriptor);
        printer.print(
            &self.vars,
            "$access_level$ static readonly pb::Extension<$extended_type$, $type_name$> $property_name$ =\n  new pb::Extension<$extended_type$, $type_name$>($number$, ",
        );
        self.generate_codec_code(printer);
        printer.raw(");\n");
    }

    fn generate_struct_constructor_code(&self, printer: &mut Printer<'_>) {
        printer.print(&self.vars, "$writing_member$ = default;\n");
    }

    fn write_hash(&self, printer: &mut Printer<'_>) {
        if self.guarded() {
            printer.print(
                &self.vars,
                "if ($has_property_check$) hash ^= $reading_member$.GetHashCode();\n",
            );
        } else {
            printer.print(&self.vars, "hash ^= $reading_member$.GetHashCode();\n");
        }
    }

    fn write_equals(&self, printer: &mut Printer<'_>) {
        if self.descriptor.is_value_type() && !self.guarded() {
            printer.print(
                &self.vars,
                "if (!$reading_member$.Equals(other.$reading_member$)) return false;\n",
            );
        } else {
            printer.print(
                &self.vars,
                "if (!scg::EqualityComparer<$type_at_rest$>.Default.Equals($reading_member$, other.$reading_member$)) return false;\n",
            );
        }
    }

    fn write_to_string(&self, printer: &mut Printer<'_>) {
        if self.guarded() {
            printer.print(
                &self.vars,
                "PrintField(\"$descriptor_name$\", $has_property_check$, $reading_member$, writer);\n",
            );
        } else {
            printer.print(
                &self.vars,
                "PrintField(\"$descriptor_name$\", true, $reading_member$, writer);\n",
            );
        }
    }
}

/// Generator for a message or group field resident in a oneof. Wraps the
/// plain generator, swapping the independent presence flag for the group's
/// shared case and rerouting reads and writes through the case-aware
/// accessor pair.
#[derive(Debug)]
pub struct MessageOneofField {
    inner: MessageField,
}

impl MessageOneofField {
    pub fn new(
        descriptor: &FieldDescriptor,
        options: &Options,
    ) -> Result<MessageOneofField, Error> {
        if descriptor.oneof.is_none() {
            bail!("field {} is not a member of a oneof", descriptor.name);
        }
        let inner = MessageField::new(descriptor, options)?;
        Ok(MessageOneofField { inner })
    }
}

impl FieldGenerator for MessageOneofField {
    fn generate_members(&self, printer: &mut Printer<'_>) {
        write_property_doc_comment(printer, &self.inner.descriptor);
        add_public_member_attributes(printer, &self.inner.descriptor);
        printer.print(
            &self.inner.vars,
            r#"$access_level$ $type_name$? $property_name$ {
  get { return $property_name$_Internal; }
  init {
    $property_name$_Internal = value;
  }
}
"#,
        );
        printer.print(
            &self.inner.vars,
            r#"private $type_name$? $property_name$_Internal {
  get { return $has_property_check_internal$ && $oneof_name$_ is $type_name$ value ? value : null; }
  set {
    $oneof_name$_ = value;
    $oneof_name$Case_ = value == null ? $oneof_property_name$OneofCase.None : $oneof_property_name$OneofCase.$oneof_case_name$;
  }
}
"#,
        );
        if self.inner.supports_presence_api() {
            printer.print(
                &self.inner.vars,
                "/// <summary>Gets whether the \"$descriptor_name$\" field is set</summary>\n",
            );
            add_public_member_attributes(printer, &self.inner.descriptor);
            printer.print(
                &self.inner.vars,
                r#"$access_level$ bool Has$property_name$ {
  get { return $has_property_check$; }
}
"#,
            );
            printer.print(
                &self.inner.vars,
                "/// <summary>Clears the value of the oneof if it's currently set to \"$descriptor_name$\"</summary>\n",
            );
            add_public_member_attributes(printer, &self.inner.descriptor);
            printer.print(
                &self.inner.vars,
                r#"private void Clear$property_name$() {
  if ($has_property_check$) {
    Clear$oneof_property_name$();
  }
}
"#,
            );
        }
    }

    fn generate_cloning_code(&self, printer: &mut Printer<'_>) {
        printer.print(
            &self.inner.vars,
            "$property_name$_Internal = deep ? other.$property_name$?.DeepClone() : other.$property_name$;\n",
        );
    }

    fn generate_merging_code(&self, printer: &mut Printer<'_>) {
        // The caller's case switch already guarantees other's case is active.
        printer.print(
            &self.inner.vars,
            r#"$type_name$ merged = $has_property_check$ ? new $type_name$($property_name$) : new $type_name$();
merged.MergeFrom(other.$property_name$);
$property_name$_Internal = merged;
"#,
        );
    }

    fn generate_parsing_code(&self, printer: &mut Printer<'_>) {
        printer.print(
            &self.inner.vars,
            r#"$type_name$ subBuilder = new $type_name$();
if ($has_property_check$) {
  subBuilder.MergeFrom($property_name$);
}
"#,
        );
        if self.inner.is_message() {
            printer.raw("input.ReadMessage(subBuilder);\n");
        } else {
            printer.raw("input.ReadGroup(subBuilder);\n");
        }
        printer.print(&self.inner.vars, "$property_name$_Internal = subBuilder;\n");
    }

    fn generate_serialization_code(&self, printer: &mut Printer<'_>) {
        self.inner.generate_serialization_code(printer);
    }

    fn generate_serialized_size_code(&self, printer: &mut Printer<'_>) {
        self.inner.generate_serialized_size_code(printer);
    }

    fn generate_codec_code(&self, printer: &mut Printer<'_>) {
        self.inner.generate_codec_code(printer);
    }

    fn generate_extension_code(&self, printer: &mut Printer<'_>) {
        self.inner.generate_extension_code(printer);
    }

    fn generate_struct_constructor_code(&self, _printer: &mut Printer<'_>) {
        // The shared slot and case are initialized by the owning group.
    }

    fn write_hash(&self, printer: &mut Printer<'_>) {
        self.inner.write_hash(printer);
    }

    fn write_equals(&self, printer: &mut Printer<'_>) {
        self.inner.write_equals(printer);
    }

    fn write_to_string(&self, printer: &mut Printer<'_>) {
        printer.print(
            &self.inner.vars,
            "PrintField(\"$descriptor_name$\", $has_property_check$, $oneof_name$_, writer);\n",
        );
    }
}
