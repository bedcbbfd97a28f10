//! Hand-built descriptor sets shared by the integration tests.
//!
//! They mirror what `protoc --include_imports --descriptor_set_out` emits for a small service
//! tree, without requiring `protoc` at test time.
#![allow(dead_code)]

use prost::Message;
use prost_types::{
    DescriptorProto, EnumDescriptorProto, EnumValueDescriptorProto, FieldDescriptorProto,
    FileDescriptorProto, FileDescriptorSet, MethodDescriptorProto, ServiceDescriptorProto,
    descriptor_proto::ExtensionRange,
    field_descriptor_proto::{Label, Type},
};

pub const DESCRIPTOR_PROTO: &str = "google/protobuf/descriptor.proto";
pub const OPTIONS_PROTO: &str = "options/v1/options.proto";
pub const BASIC_PROTO: &str = "basic/v1/basic.proto";
pub const CHAT_PROTO: &str = "chat/v1/chat.proto";

pub fn field(name: &str, number: i32, ty: Type, type_name: Option<&str>) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_string()),
        number: Some(number),
        label: Some(Label::Optional as i32),
        r#type: Some(ty as i32),
        type_name: type_name.map(str::to_string),
        ..Default::default()
    }
}

pub fn extension(name: &str, number: i32, ty: Type, extendee: &str) -> FieldDescriptorProto {
    FieldDescriptorProto {
        extendee: Some(extendee.to_string()),
        ..field(name, number, ty, None)
    }
}

pub fn message(name: &str) -> DescriptorProto {
    DescriptorProto {
        name: Some(name.to_string()),
        ..Default::default()
    }
}

pub fn extendable(name: &str, start: i32, end: i32) -> DescriptorProto {
    DescriptorProto {
        extension_range: vec![ExtensionRange {
            start: Some(start),
            end: Some(end),
            options: None,
        }],
        ..message(name)
    }
}

pub fn enumeration(name: &str, values: &[&str]) -> EnumDescriptorProto {
    EnumDescriptorProto {
        name: Some(name.to_string()),
        value: values
            .iter()
            .zip(0..)
            .map(|(value, number)| EnumValueDescriptorProto {
                name: Some(value.to_string()),
                number: Some(number),
                options: None,
            })
            .collect(),
        ..Default::default()
    }
}

pub fn service(name: &str, methods: &[(&str, &str, &str)]) -> ServiceDescriptorProto {
    ServiceDescriptorProto {
        name: Some(name.to_string()),
        method: methods
            .iter()
            .map(|(method, input, output)| MethodDescriptorProto {
                name: Some(method.to_string()),
                input_type: Some(input.to_string()),
                output_type: Some(output.to_string()),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}

pub fn file(name: &str, package: &str, dependencies: &[&str]) -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some(name.to_string()),
        package: Some(package.to_string()),
        dependency: dependencies.iter().map(|d| d.to_string()).collect(),
        ..Default::default()
    }
}

/// The two-file set `a.proto` / `b.proto`:
///
/// ```proto
/// // a.proto
/// package pkg;
/// message A { extensions 100 to max; }
///
/// // b.proto
/// package pkg;
/// import "a.proto";
/// message B { extend A { optional int32 b_ext = 100; } }
/// ```
pub fn two_files() -> FileDescriptorSet {
    let a = FileDescriptorProto {
        message_type: vec![extendable("A", 100, 536_870_912)],
        ..file("a.proto", "pkg", &[])
    };

    let b = FileDescriptorProto {
        message_type: vec![DescriptorProto {
            extension: vec![extension("b_ext", 100, Type::Int32, ".pkg.A")],
            ..message("B")
        }],
        ..file("b.proto", "pkg", &["a.proto"])
    };

    FileDescriptorSet { file: vec![a, b] }
}

/// A small service tree:
///
/// * `chat/v1/chat.proto` imports `basic/v1/basic.proto`
/// * `basic/v1/basic.proto` imports `options/v1/options.proto`
/// * `options/v1/options.proto` imports `google/protobuf/descriptor.proto`
///
/// Files are deliberately listed dependents first, so any dependency-first output is the
/// resolver's doing and not an artifact of the set order.
pub fn service_tree() -> FileDescriptorSet {
    let descriptor = FileDescriptorProto {
        message_type: vec![
            extendable("FieldOptions", 1000, 536_870_912),
            extendable("MessageOptions", 1000, 536_870_912),
        ],
        ..file(DESCRIPTOR_PROTO, "google.protobuf", &[])
    };

    let options = FileDescriptorProto {
        extension: vec![extension(
            "label",
            50001,
            Type::String,
            ".google.protobuf.FieldOptions",
        )],
        message_type: vec![DescriptorProto {
            extension: vec![extension(
                "hidden",
                50002,
                Type::Bool,
                ".google.protobuf.MessageOptions",
            )],
            ..message("Scoped")
        }],
        ..file(OPTIONS_PROTO, "options.v1", &[DESCRIPTOR_PROTO])
    };

    let meta = DescriptorProto {
        field: vec![field(
            "level",
            1,
            Type::Enum,
            Some(".basic.v1.EchoRequest.Meta.Level"),
        )],
        enum_type: vec![enumeration("Level", &["LOW", "HIGH"])],
        ..message("Meta")
    };

    let echo_request = DescriptorProto {
        field: vec![
            field("message", 1, Type::String, None),
            field("meta", 2, Type::Message, Some(".basic.v1.EchoRequest.Meta")),
        ],
        nested_type: vec![meta],
        ..message("EchoRequest")
    };

    let echo_response = DescriptorProto {
        field: vec![
            field("message", 1, Type::String, None),
            field("status", 2, Type::Enum, Some(".basic.v1.Status")),
        ],
        ..message("EchoResponse")
    };

    let basic = FileDescriptorProto {
        message_type: vec![echo_request, echo_response, extendable("Extendable", 100, 200)],
        enum_type: vec![enumeration("Status", &["UNKNOWN", "OK"])],
        service: vec![service(
            "BasicService",
            &[
                ("Echo", ".basic.v1.EchoRequest", ".basic.v1.EchoResponse"),
                ("Ping", ".basic.v1.EchoRequest", ".basic.v1.EchoResponse"),
            ],
        )],
        ..file(BASIC_PROTO, "basic.v1", &[OPTIONS_PROTO])
    };

    let talk_request = DescriptorProto {
        field: vec![field(
            "request",
            1,
            Type::Message,
            Some(".basic.v1.EchoRequest"),
        )],
        ..message("TalkRequest")
    };

    let chat = FileDescriptorProto {
        message_type: vec![talk_request],
        extension: vec![
            extension("priority", 150, Type::Int32, ".basic.v1.Extendable"),
            extension("weight", 120, Type::Int32, ".basic.v1.Extendable"),
        ],
        service: vec![service(
            "ChatService",
            &[("Talk", ".chat.v1.TalkRequest", ".basic.v1.EchoResponse")],
        )],
        ..file(CHAT_PROTO, "chat.v1", &[BASIC_PROTO])
    };

    FileDescriptorSet {
        file: vec![chat, basic, options, descriptor],
    }
}

pub fn encode(set: &FileDescriptorSet) -> Vec<u8> {
    set.encode_to_vec()
}

/// Decodes the file names of encoded `FileDescriptorProto`s, keeping their order.
pub fn file_names(files: &[Vec<u8>]) -> Vec<String> {
    files
        .iter()
        .map(|bytes| {
            FileDescriptorProto::decode(bytes.as_slice())
                .expect("Failed to decode FileDescriptorProto")
                .name()
                .to_string()
        })
        .collect()
}
