//! Native type descriptors and dynamically typed native values.
//!
//! A [`NativeType`] describes the shape of a host type once: its primitive
//! kind, whether it is a user-declared (named) type, and which reflection
//! capabilities it has. Converters classify on the descriptor alone and only
//! ever see actual values through [`NativeValue`].

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::{EnumTypeRef, LegacyProtoMessage, MessageTypeRef, ProtoEnum, ProtoMessage};

/// The primitive shape of a native type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NativeKind {
    Bool,
    Int32,
    Int64,
    Uint32,
    Uint64,
    Float32,
    Float64,
    /// UTF-8 text.
    String,
    /// A byte sequence.
    Bytes,
    /// A plain aggregate held by value.
    Struct,
    /// A shared pointer to an aggregate.
    Pointer,
}

impl NativeKind {
    /// Name of the builtin Rust type with this shape.
    pub const fn builtin_name(self) -> &'static str {
        match self {
            NativeKind::Bool => "bool",
            NativeKind::Int32 => "i32",
            NativeKind::Int64 => "i64",
            NativeKind::Uint32 => "u32",
            NativeKind::Uint64 => "u64",
            NativeKind::Float32 => "f32",
            NativeKind::Float64 => "f64",
            NativeKind::String => "String",
            NativeKind::Bytes => "Vec<u8>",
            NativeKind::Struct => "struct",
            NativeKind::Pointer => "pointer",
        }
    }
}

/// Descriptor of a native type.
///
/// Identity covers the name, the shape, whether the type is named and its
/// capabilities. Enum and message types are compared by full name, so two
/// handles to the same protocol type are interchangeable.
#[derive(Clone)]
pub struct NativeType {
    name: Cow<'static, str>,
    kind: NativeKind,
    named: bool,
    enum_type: Option<EnumTypeRef>,
    message_type: Option<MessageTypeRef>,
    legacy_message: bool,
}

impl NativeType {
    const fn builtin(kind: NativeKind) -> Self {
        Self {
            name: Cow::Borrowed(kind.builtin_name()),
            kind,
            named: false,
            enum_type: None,
            message_type: None,
            legacy_message: false,
        }
    }

    pub const fn bool() -> Self {
        Self::builtin(NativeKind::Bool)
    }

    pub const fn int32() -> Self {
        Self::builtin(NativeKind::Int32)
    }

    pub const fn int64() -> Self {
        Self::builtin(NativeKind::Int64)
    }

    pub const fn uint32() -> Self {
        Self::builtin(NativeKind::Uint32)
    }

    pub const fn uint64() -> Self {
        Self::builtin(NativeKind::Uint64)
    }

    pub const fn float32() -> Self {
        Self::builtin(NativeKind::Float32)
    }

    pub const fn float64() -> Self {
        Self::builtin(NativeKind::Float64)
    }

    pub const fn string() -> Self {
        Self::builtin(NativeKind::String)
    }

    pub const fn bytes() -> Self {
        Self::builtin(NativeKind::Bytes)
    }

    /// A user-declared type with the given shape and no capabilities.
    pub fn named(name: impl Into<Cow<'static, str>>, kind: NativeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            named: true,
            enum_type: None,
            message_type: None,
            legacy_message: false,
        }
    }

    /// A generated enum that describes itself.
    pub fn proto_enum(name: impl Into<Cow<'static, str>>, enum_type: EnumTypeRef) -> Self {
        Self::named(name, NativeKind::Int32).with_enum_type(enum_type)
    }

    /// A pointer to a generated message that describes itself.
    pub fn proto_message(name: impl Into<Cow<'static, str>>, message_type: MessageTypeRef) -> Self {
        Self::named(name, NativeKind::Pointer).with_message_type(message_type)
    }

    /// An enum from the older API: just a named `i32`.
    pub fn legacy_enum(name: impl Into<Cow<'static, str>>) -> Self {
        Self::named(name, NativeKind::Int32)
    }

    /// A pointer to a message from the older API.
    pub fn legacy_message(name: impl Into<Cow<'static, str>>) -> Self {
        Self::named(name, NativeKind::Pointer).with_legacy_message()
    }

    /// Mark the type as a self-describing enum of `enum_type`.
    pub fn with_enum_type(mut self, enum_type: EnumTypeRef) -> Self {
        self.enum_type = Some(enum_type);
        self
    }

    /// Mark the type as a self-describing message of `message_type`.
    pub fn with_message_type(mut self, message_type: MessageTypeRef) -> Self {
        self.message_type = Some(message_type);
        self
    }

    /// Mark the type as implementing the legacy message API.
    pub fn with_legacy_message(mut self) -> Self {
        self.legacy_message = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NativeKind {
        self.kind
    }

    /// Check if this is a user-declared type rather than a builtin.
    pub fn is_named(&self) -> bool {
        self.named
    }

    pub fn is_pointer(&self) -> bool {
        self.kind == NativeKind::Pointer
    }

    /// The enum type, if the type describes itself as an enum.
    pub fn enum_type(&self) -> Option<&EnumTypeRef> {
        self.enum_type.as_ref()
    }

    /// The message type, if the type describes itself as a message.
    pub fn message_type(&self) -> Option<&MessageTypeRef> {
        self.message_type.as_ref()
    }

    pub fn is_legacy_message(&self) -> bool {
        self.legacy_message
    }

    /// The name followed by the capabilities, e.g.
    /// `example::User [message example.User]`.
    ///
    /// Tells apart types that share a name in diagnostics.
    pub fn describe(&self) -> String {
        let mut out = self.name.to_string();
        if let Some(name) = self.enum_type_name() {
            out.push_str(&format!(" [enum {}]", name));
        }
        if let Some(name) = self.message_type_name() {
            out.push_str(&format!(" [message {}]", name));
        }
        if self.legacy_message {
            out.push_str(" [legacy message]");
        }
        out
    }

    fn enum_type_name(&self) -> Option<&str> {
        self.enum_type.as_ref().map(|t| t.full_name())
    }

    fn message_type_name(&self) -> Option<&str> {
        self.message_type.as_ref().map(|t| t.full_name())
    }
}

impl PartialEq for NativeType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.kind == other.kind
            && self.named == other.named
            && self.enum_type_name() == other.enum_type_name()
            && self.message_type_name() == other.message_type_name()
            && self.legacy_message == other.legacy_message
    }
}

impl Eq for NativeType {}

impl Hash for NativeType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.kind.hash(state);
        self.named.hash(state);
        self.enum_type_name().hash(state);
        self.message_type_name().hash(state);
        self.legacy_message.hash(state);
    }
}

impl fmt::Debug for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeType")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("named", &self.named)
            .field("enum_type", &self.enum_type_name())
            .field("message_type", &self.message_type_name())
            .field("legacy_message", &self.legacy_message)
            .finish()
    }
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// The payload of a native value.
#[derive(Clone, Debug)]
pub enum NativeData {
    Bool(bool),
    Int32(i32),
    Int64(i64),
    Uint32(u32),
    Uint64(u64),
    Float32(f32),
    Float64(f64),
    String(String),
    Bytes(Vec<u8>),
    /// A self-describing enum value.
    Enum(Arc<dyn ProtoEnum>),
    /// A self-describing message pointer.
    Message(Arc<dyn ProtoMessage>),
    /// A message pointer from the older API.
    LegacyMessage(Arc<dyn LegacyProtoMessage>),
}

impl NativeData {
    /// Short description of the payload shape, for diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            NativeData::Bool(_) => "bool",
            NativeData::Int32(_) => "i32",
            NativeData::Int64(_) => "i64",
            NativeData::Uint32(_) => "u32",
            NativeData::Uint64(_) => "u64",
            NativeData::Float32(_) => "f32",
            NativeData::Float64(_) => "f64",
            NativeData::String(_) => "String",
            NativeData::Bytes(_) => "Vec<u8>",
            NativeData::Enum(_) => "enum value",
            NativeData::Message(_) => "message pointer",
            NativeData::LegacyMessage(_) => "legacy message pointer",
        }
    }
}

impl PartialEq for NativeData {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (NativeData::Bool(a), NativeData::Bool(b)) => a == b,
            (NativeData::Int32(a), NativeData::Int32(b)) => a == b,
            (NativeData::Int64(a), NativeData::Int64(b)) => a == b,
            (NativeData::Uint32(a), NativeData::Uint32(b)) => a == b,
            (NativeData::Uint64(a), NativeData::Uint64(b)) => a == b,
            (NativeData::Float32(a), NativeData::Float32(b)) => a == b,
            (NativeData::Float64(a), NativeData::Float64(b)) => a == b,
            (NativeData::String(a), NativeData::String(b)) => a == b,
            (NativeData::Bytes(a), NativeData::Bytes(b)) => a == b,
            (NativeData::Enum(a), NativeData::Enum(b)) => {
                let (a, b) = (a.proto_reflect(), b.proto_reflect());
                a.number() == b.number() && a.enum_type().full_name() == b.enum_type().full_name()
            }
            // Pointers are equal only when they are the same pointer.
            (NativeData::Message(a), NativeData::Message(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            (NativeData::LegacyMessage(a), NativeData::LegacyMessage(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            _ => false,
        }
    }
}

/// A native value tagged with its native type.
#[derive(Clone, Debug, PartialEq)]
pub struct NativeValue {
    ty: NativeType,
    data: NativeData,
}

impl NativeValue {
    /// Tag `data` with `ty`.
    ///
    /// The pairing is not validated here; converters reject values whose
    /// payload does not fit their type.
    pub fn new(ty: NativeType, data: NativeData) -> Self {
        Self { ty, data }
    }

    pub fn native_type(&self) -> &NativeType {
        &self.ty
    }

    pub fn data(&self) -> &NativeData {
        &self.data
    }

    pub fn into_data(self) -> NativeData {
        self.data
    }

    pub fn into_parts(self) -> (NativeType, NativeData) {
        (self.ty, self.data)
    }
}

// Builtin values

impl From<bool> for NativeValue {
    fn from(v: bool) -> Self {
        NativeValue::new(NativeType::bool(), NativeData::Bool(v))
    }
}

impl From<i32> for NativeValue {
    fn from(v: i32) -> Self {
        NativeValue::new(NativeType::int32(), NativeData::Int32(v))
    }
}

impl From<i64> for NativeValue {
    fn from(v: i64) -> Self {
        NativeValue::new(NativeType::int64(), NativeData::Int64(v))
    }
}

impl From<u32> for NativeValue {
    fn from(v: u32) -> Self {
        NativeValue::new(NativeType::uint32(), NativeData::Uint32(v))
    }
}

impl From<u64> for NativeValue {
    fn from(v: u64) -> Self {
        NativeValue::new(NativeType::uint64(), NativeData::Uint64(v))
    }
}

impl From<f32> for NativeValue {
    fn from(v: f32) -> Self {
        NativeValue::new(NativeType::float32(), NativeData::Float32(v))
    }
}

impl From<f64> for NativeValue {
    fn from(v: f64) -> Self {
        NativeValue::new(NativeType::float64(), NativeData::Float64(v))
    }
}

impl From<String> for NativeValue {
    fn from(v: String) -> Self {
        NativeValue::new(NativeType::string(), NativeData::String(v))
    }
}

impl From<&str> for NativeValue {
    fn from(v: &str) -> Self {
        NativeValue::from(v.to_string())
    }
}

impl From<Vec<u8>> for NativeValue {
    fn from(v: Vec<u8>) -> Self {
        NativeValue::new(NativeType::bytes(), NativeData::Bytes(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EnumNumber, EnumType};
    use std::any::Any;
    use std::collections::HashSet;

    #[derive(Debug)]
    struct OldUser;

    impl LegacyProtoMessage for OldUser {
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn builtin_names() {
        assert_eq!(NativeType::int32().name(), "i32");
        assert_eq!(NativeType::bytes().name(), "Vec<u8>");
        assert_eq!(NativeType::string().to_string(), "String");
        assert!(!NativeType::float64().is_named());
    }

    #[derive(Debug)]
    struct ColorType(&'static str);

    impl EnumType for ColorType {
        fn full_name(&self) -> &str {
            self.0
        }

        fn from_number(&self, number: EnumNumber) -> NativeValue {
            NativeValue::from(number)
        }
    }

    #[test]
    fn identity_includes_capabilities() {
        let plain = NativeType::named("example.Old", NativeKind::Pointer);
        let legacy = NativeType::legacy_message("example.Old");
        assert_ne!(plain, legacy);
        assert_eq!(legacy, NativeType::legacy_message("example.Old"));

        let int = NativeType::named("example.Color", NativeKind::Int32);
        let color = NativeType::proto_enum("example.Color", Arc::new(ColorType("example.Color")));
        let other = NativeType::proto_enum("example.Color", Arc::new(ColorType("other.Color")));
        assert_ne!(int, color);
        assert_ne!(color, other);
        // Separate handles to the same protocol type.
        assert_eq!(
            color,
            NativeType::proto_enum("example.Color", Arc::new(ColorType("example.Color")))
        );
    }

    #[test]
    fn describe_lists_capabilities() {
        assert_eq!(NativeType::int32().describe(), "i32");
        assert_eq!(
            NativeType::legacy_message("example.Old").describe(),
            "example.Old [legacy message]"
        );
        let color = NativeType::proto_enum("example.Color", Arc::new(ColorType("example.Color")));
        assert_eq!(color.describe(), "example.Color [enum example.Color]");
    }

    #[test]
    fn named_types_differ_from_builtins() {
        let user_id = NativeType::named("UserId", NativeKind::Int64);
        assert_ne!(user_id, NativeType::int64());
        assert_ne!(
            NativeType::named("i64", NativeKind::Int64),
            NativeType::int64()
        );
        assert_eq!(user_id.kind(), NativeKind::Int64);
    }

    #[test]
    fn hash_follows_identity() {
        let mut set = HashSet::new();
        set.insert(NativeType::int32());
        set.insert(NativeType::int32());
        set.insert(NativeType::legacy_enum("example.Color"));
        set.insert(NativeType::legacy_message("example.Color"));
        set.insert(NativeType::named("example.Color", NativeKind::Pointer));
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn from_builtins() {
        let v = NativeValue::from(7u64);
        assert_eq!(v.native_type(), &NativeType::uint64());
        assert_eq!(v.data(), &NativeData::Uint64(7));

        let v = NativeValue::from("hi");
        assert_eq!(v.into_data(), NativeData::String("hi".to_string()));
    }

    #[test]
    fn pointer_equality_is_identity() {
        let a: Arc<dyn LegacyProtoMessage> = Arc::new(OldUser);
        let b: Arc<dyn LegacyProtoMessage> = Arc::new(OldUser);
        let ty = NativeType::legacy_message("example.OldUser");

        let va = NativeValue::new(ty.clone(), NativeData::LegacyMessage(a.clone()));
        assert_eq!(
            va,
            NativeValue::new(ty.clone(), NativeData::LegacyMessage(a))
        );
        assert_ne!(va, NativeValue::new(ty, NativeData::LegacyMessage(b)));
    }

    #[test]
    fn describe_payloads() {
        assert_eq!(NativeData::Int64(1).describe(), "i64");
        assert_eq!(NativeData::Bytes(Vec::new()).describe(), "Vec<u8>");
        assert_eq!(
            NativeData::LegacyMessage(Arc::new(OldUser)).describe(),
            "legacy message pointer"
        );
    }

    #[test]
    fn debug_shows_capabilities() {
        let debug = format!("{:?}", NativeType::legacy_message("example.OldUser"));
        assert!(debug.contains("example.OldUser"));
        assert!(debug.contains("legacy_message: true"));
    }
}
