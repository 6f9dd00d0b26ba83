//! Emission tests for message and group fields resident in a oneof.

use sharpgen::{
    new_field_generator, FieldDescriptor, FieldGenerator, FieldType, Label, MessageOneofField,
    OneofDescriptor, Options, Printer, ValueKind,
};

/// A reference-type message member of the `result` oneof.
fn result_member(name: &str, number: u32) -> FieldDescriptor {
    FieldDescriptor {
        name: name.to_owned(),
        number,
        field_type: FieldType::Message,
        type_name: "global::Acme.Payload".to_owned(),
        label: Label::Optional,
        value_kind: ValueKind::Reference,
        nullable: true,
        oneof: Some(OneofDescriptor {
            name: "result".to_owned(),
        }),
        extendee: None,
        deprecated: false,
        comment: None,
    }
}

fn render(
    descriptor: &FieldDescriptor,
    options: &Options,
    emit: impl Fn(&dyn FieldGenerator, &mut Printer<'_>),
) -> String {
    let generator = new_field_generator(descriptor, options).expect("descriptor was rejected");
    let mut out = String::new();
    emit(generator.as_ref(), &mut Printer::new(&mut out));
    out
}

#[test]
fn members_route_through_the_shared_slot() {
    let _ = env_logger::try_init();
    let field = result_member("first", 1);
    let members = render(&field, &Options::default(), |g, p| g.generate_members(p));
    assert_eq!(
        members,
        "[global::System.Diagnostics.DebuggerNonUserCodeAttribute]\n\
         [global::System.CodeDom.Compiler.GeneratedCode(\"protoc\", null)]\n\
         public global::Acme.Payload? First {\n\
         \x20 get { return First_Internal; }\n\
         \x20 init {\n\
         \x20   First_Internal = value;\n\
         \x20 }\n\
         }\n\
         private global::Acme.Payload? First_Internal {\n\
         \x20 get { return resultCase_ == ResultOneofCase.First && result_ is global::Acme.Payload value ? value : null; }\n\
         \x20 set {\n\
         \x20   result_ = value;\n\
         \x20   resultCase_ = value == null ? ResultOneofCase.None : ResultOneofCase.First;\n\
         \x20 }\n\
         }\n\
         /// <summary>Gets whether the \"first\" field is set</summary>\n\
         [global::System.Diagnostics.DebuggerNonUserCodeAttribute]\n\
         [global::System.CodeDom.Compiler.GeneratedCode(\"protoc\", null)]\n\
         public bool HasFirst {\n\
         \x20 get { return resultCase_ == ResultOneofCase.First; }\n\
         }\n\
         /// <summary>Clears the value of the oneof if it's currently set to \"first\"</summary>\n\
         [global::System.Diagnostics.DebuggerNonUserCodeAttribute]\n\
         [global::System.CodeDom.Compiler.GeneratedCode(\"protoc\", null)]\n\
         private void ClearFirst() {\n\
         \x20 if (resultCase_ == ResultOneofCase.First) {\n\
         \x20   ClearResult();\n\
         \x20 }\n\
         }\n"
    );
}

#[test]
fn two_members_share_slot_and_case_field_with_distinct_cases() {
    let first = render(&result_member("first", 1), &Options::default(), |g, p| {
        g.generate_members(p)
    });
    let second = render(&result_member("second", 2), &Options::default(), |g, p| {
        g.generate_members(p)
    });
    for members in [&first, &second] {
        assert!(members.contains("result_ = value;"));
        assert!(members.contains("resultCase_ = value == null ?"));
    }
    assert!(first.contains("ResultOneofCase.First"));
    assert!(!first.contains("ResultOneofCase.Second"));
    assert!(second.contains("ResultOneofCase.Second"));
    assert!(!second.contains("ResultOneofCase.First"));
}

#[test]
fn parsing_merges_into_a_sub_builder() {
    let field = result_member("first", 1);
    let code = render(&field, &Options::default(), |g, p| g.generate_parsing_code(p));
    assert_eq!(
        code,
        "global::Acme.Payload subBuilder = new global::Acme.Payload();\n\
         if (resultCase_ == ResultOneofCase.First) {\n\
         \x20 subBuilder.MergeFrom(First);\n\
         }\n\
         input.ReadMessage(subBuilder);\n\
         First_Internal = subBuilder;\n"
    );
}

#[test]
fn parsing_a_group_member_uses_the_group_reader() {
    let field = FieldDescriptor {
        field_type: FieldType::Group,
        ..result_member("first", 3)
    };
    let code = render(&field, &Options::default(), |g, p| g.generate_parsing_code(p));
    assert!(code.contains("input.ReadGroup(subBuilder);\n"));
    assert!(code.ends_with("First_Internal = subBuilder;\n"));
}

#[test]
fn merging_commits_a_merged_copy_through_the_internal_property() {
    let field = result_member("first", 1);
    let code = render(&field, &Options::default(), |g, p| g.generate_merging_code(p));
    assert_eq!(
        code,
        "global::Acme.Payload merged = resultCase_ == ResultOneofCase.First ? new global::Acme.Payload(First) : new global::Acme.Payload();\n\
         merged.MergeFrom(other.First);\n\
         First_Internal = merged;\n"
    );
}

#[test]
fn cloning_uses_conditional_deep_clone() {
    let field = result_member("first", 1);
    let code = render(&field, &Options::default(), |g, p| g.generate_cloning_code(p));
    assert_eq!(
        code,
        "First_Internal = deep ? other.First?.DeepClone() : other.First;\n"
    );
}

#[test]
fn serialization_guards_on_the_case() {
    let field = result_member("first", 1);
    let code = render(&field, &Options::default(), |g, p| {
        g.generate_serialization_code(p)
    });
    assert_eq!(
        code,
        "if (resultCase_ == ResultOneofCase.First) {\n\
         \x20 output.WriteRawTag(10);\n\
         \x20 output.WriteMessage(First);\n\
         }\n"
    );
}

#[test]
fn group_member_serialization_brackets_with_end_tag() {
    let field = FieldDescriptor {
        field_type: FieldType::Group,
        ..result_member("first", 3)
    };
    let code = render(&field, &Options::default(), |g, p| {
        g.generate_serialization_code(p)
    });
    assert_eq!(
        code,
        "if (resultCase_ == ResultOneofCase.First) {\n\
         \x20 output.WriteRawTag(27);\n\
         \x20 output.WriteGroup(First);\n\
         \x20 output.WriteRawTag(28);\n\
         }\n"
    );
    let size = render(&field, &Options::default(), |g, p| {
        g.generate_serialized_size_code(p)
    });
    assert_eq!(
        size,
        "if (resultCase_ == ResultOneofCase.First) {\n\
         \x20 size += 2 + pb::CodedOutputStream.ComputeGroupSize(First);\n\
         }\n"
    );
}

#[test]
fn hash_guards_on_the_case() {
    let field = result_member("first", 1);
    let code = render(&field, &Options::default(), |g, p| g.write_hash(p));
    assert_eq!(
        code,
        "if (resultCase_ == ResultOneofCase.First) hash ^= First.GetHashCode();\n"
    );
}

#[test]
fn equality_compares_through_the_nullable_property() {
    let field = result_member("first", 1);
    let code = render(&field, &Options::default(), |g, p| g.write_equals(p));
    assert_eq!(
        code,
        "if (!scg::EqualityComparer<global::Acme.Payload?>.Default.Equals(First, other.First)) return false;\n"
    );
}

#[test]
fn value_type_member_still_guards_on_the_case() {
    let field = FieldDescriptor {
        value_kind: ValueKind::Inline,
        nullable: false,
        type_name: "global::Acme.Vector3".to_owned(),
        ..result_member("first", 1)
    };
    let code = render(&field, &Options::default(), |g, p| {
        g.generate_serialization_code(p)
    });
    assert_eq!(
        code,
        "if (resultCase_ == ResultOneofCase.First) {\n\
         \x20 output.WriteRawTag(10);\n\
         \x20 output.WriteMessage(First);\n\
         }\n"
    );
    let equals = render(&field, &Options::default(), |g, p| g.write_equals(p));
    assert_eq!(
        equals,
        "if (!scg::EqualityComparer<global::Acme.Vector3?>.Default.Equals(First, other.First)) return false;\n"
    );
}

#[test]
fn rendering_reads_the_shared_slot() {
    let field = result_member("first", 1);
    let code = render(&field, &Options::default(), |g, p| g.write_to_string(p));
    assert_eq!(
        code,
        "PrintField(\"first\", resultCase_ == ResultOneofCase.First, result_, writer);\n"
    );
}

#[test]
fn struct_constructor_leaves_the_shared_slot_alone() {
    let field = result_member("first", 1);
    let code = render(&field, &Options::default(), |g, p| {
        g.generate_struct_constructor_code(p)
    });
    assert_eq!(code, "");
}

#[test]
fn presence_api_can_be_disabled() {
    let field = result_member("first", 1);
    let options = Options {
        presence_api: false,
        ..Options::default()
    };
    let members = render(&field, &options, |g, p| g.generate_members(p));
    assert!(!members.contains("HasFirst"));
    assert!(!members.contains("ClearFirst"));
    assert!(members.contains("private global::Acme.Payload? First_Internal {"));
}

#[test]
fn rejects_a_field_outside_any_oneof() {
    let field = FieldDescriptor {
        oneof: None,
        ..result_member("first", 1)
    };
    assert_eq!(
        MessageOneofField::new(&field, &Options::default())
            .expect_err("accepted a field with no oneof")
            .to_string(),
        "field first is not a member of a oneof"
    );
}
