//! Protocol field kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The declared kind of a protocol message field.
///
/// Discriminants match the field type numbers of the protobuf descriptor
/// format. Several kinds are encoding variants of the same value (`Int32`,
/// `Sint32` and `Sfixed32` all carry an `i32`); the difference only matters to
/// the wire codec.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Double = 1,
    Float = 2,
    Int64 = 3,
    Uint64 = 4,
    Int32 = 5,
    Fixed64 = 6,
    Fixed32 = 7,
    Bool = 8,
    String = 9,
    Group = 10,
    Message = 11,
    Bytes = 12,
    Uint32 = 13,
    Enum = 14,
    Sfixed32 = 15,
    Sfixed64 = 16,
    Sint32 = 17,
    Sint64 = 18,
}

impl Kind {
    /// Every kind, in field type number order.
    pub const ALL: [Kind; 18] = [
        Kind::Double,
        Kind::Float,
        Kind::Int64,
        Kind::Uint64,
        Kind::Int32,
        Kind::Fixed64,
        Kind::Fixed32,
        Kind::Bool,
        Kind::String,
        Kind::Group,
        Kind::Message,
        Kind::Bytes,
        Kind::Uint32,
        Kind::Enum,
        Kind::Sfixed32,
        Kind::Sfixed64,
        Kind::Sint32,
        Kind::Sint64,
    ];

    /// The descriptor field type number.
    pub const fn number(self) -> i32 {
        self as i32
    }

    /// The lowercase name used in `.proto` files.
    pub const fn as_str(self) -> &'static str {
        match self {
            Kind::Double => "double",
            Kind::Float => "float",
            Kind::Int64 => "int64",
            Kind::Uint64 => "uint64",
            Kind::Int32 => "int32",
            Kind::Fixed64 => "fixed64",
            Kind::Fixed32 => "fixed32",
            Kind::Bool => "bool",
            Kind::String => "string",
            Kind::Group => "group",
            Kind::Message => "message",
            Kind::Bytes => "bytes",
            Kind::Uint32 => "uint32",
            Kind::Enum => "enum",
            Kind::Sfixed32 => "sfixed32",
            Kind::Sfixed64 => "sfixed64",
            Kind::Sint32 => "sint32",
            Kind::Sint64 => "sint64",
        }
    }

    /// Check if values of this kind are messages (`Message` or `Group`).
    pub fn is_message(self) -> bool {
        matches!(self, Kind::Message | Kind::Group)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a field type number names no kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnknownKind(pub i32);

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown field kind number: {}", self.0)
    }
}

impl std::error::Error for UnknownKind {}

impl TryFrom<i32> for Kind {
    type Error = UnknownKind;

    fn try_from(number: i32) -> Result<Self, Self::Error> {
        Kind::ALL
            .iter()
            .copied()
            .find(|k| k.number() == number)
            .ok_or(UnknownKind(number))
    }
}
