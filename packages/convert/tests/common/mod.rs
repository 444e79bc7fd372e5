//! Generated-code stand-ins shared by the integration tests.

#![allow(dead_code)]

use std::any::Any;
use std::sync::Arc;

use protovalue_convert::{LegacyEnum, LegacyWrapper};
use protovalue_reflect::{
    Enum, EnumNumber, EnumType, EnumTypeRef, LegacyProtoMessage, Message, MessageRef,
    MessageType, MessageTypeRef, NativeData, NativeType, NativeValue, ProtoEnum, ProtoMessage,
    Unwrapper,
};

// Current-style enum

#[derive(Debug)]
pub struct ColorType;

impl EnumType for ColorType {
    fn full_name(&self) -> &str {
        "example.Color"
    }

    fn from_number(&self, number: EnumNumber) -> NativeValue {
        Color(number).into_native()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub i32);

impl Color {
    pub const RED: Color = Color(0);
    pub const GREEN: Color = Color(1);
    pub const BLUE: Color = Color(2);

    pub fn native_type() -> NativeType {
        NativeType::proto_enum("example::Color", Arc::new(ColorType))
    }

    pub fn into_native(self) -> NativeValue {
        NativeValue::new(Self::native_type(), NativeData::Enum(Arc::new(self)))
    }
}

impl Enum for Color {
    fn enum_type(&self) -> EnumTypeRef {
        Arc::new(ColorType)
    }

    fn number(&self) -> EnumNumber {
        self.0
    }
}

impl ProtoEnum for Color {
    fn proto_reflect(&self) -> &dyn Enum {
        self
    }
}

/// An enum type whose values come back as plain `i32`s.
#[derive(Debug)]
pub struct MislabeledColorType;

impl EnumType for MislabeledColorType {
    fn full_name(&self) -> &str {
        "example.Color"
    }

    fn from_number(&self, number: EnumNumber) -> NativeValue {
        NativeValue::from(number)
    }
}

// Current-style message

#[derive(Debug)]
pub struct UserType;

impl MessageType for UserType {
    fn full_name(&self) -> &str {
        "example.User"
    }
}

#[derive(Debug)]
pub struct User {
    pub name: String,
}

impl User {
    pub fn native_type() -> NativeType {
        NativeType::proto_message("example::User", Arc::new(UserType))
    }

    pub fn new_native(name: &str) -> (Arc<User>, NativeValue) {
        let user = Arc::new(User {
            name: name.to_string(),
        });
        let native = NativeValue::new(Self::native_type(), NativeData::Message(user.clone()));
        (user, native)
    }
}

impl Message for User {
    fn message_type(&self) -> MessageTypeRef {
        Arc::new(UserType)
    }

    fn interface(self: Arc<Self>) -> NativeValue {
        NativeValue::new(User::native_type(), NativeData::Message(self))
    }
}

impl ProtoMessage for User {
    fn proto_reflect(self: Arc<Self>) -> MessageRef {
        self
    }
}

// Legacy enum and message, plus the wrapper that bridges them

pub fn old_color_type() -> NativeType {
    NativeType::legacy_enum("example::OldColor")
}

pub fn old_color(number: i32) -> NativeValue {
    NativeValue::new(old_color_type(), NativeData::Int32(number))
}

#[derive(Debug)]
pub struct OldColorType;

impl EnumType for OldColorType {
    fn full_name(&self) -> &str {
        "example.OldColor"
    }

    fn from_number(&self, number: EnumNumber) -> NativeValue {
        old_color(number)
    }
}

#[derive(Debug)]
pub struct OldUser {
    pub name: String,
}

impl OldUser {
    pub fn native_type() -> NativeType {
        NativeType::legacy_message("example::OldUser")
    }

    pub fn new_native(name: &str) -> (Arc<OldUser>, NativeValue) {
        let user = Arc::new(OldUser {
            name: name.to_string(),
        });
        let native = NativeValue::new(
            Self::native_type(),
            NativeData::LegacyMessage(user.clone()),
        );
        (user, native)
    }
}

impl LegacyProtoMessage for OldUser {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
pub struct OldUserType;

impl MessageType for OldUserType {
    fn full_name(&self) -> &str {
        "example.OldUser"
    }
}

#[derive(Debug)]
pub struct WrappedEnum {
    inner: NativeValue,
    number: EnumNumber,
}

impl Enum for WrappedEnum {
    fn enum_type(&self) -> EnumTypeRef {
        Arc::new(OldColorType)
    }

    fn number(&self) -> EnumNumber {
        self.number
    }
}

impl Unwrapper for WrappedEnum {
    fn proto_unwrap(&self) -> NativeValue {
        self.inner.clone()
    }
}

#[derive(Debug)]
pub struct WrappedMessage {
    inner: NativeValue,
}

impl Message for WrappedMessage {
    fn message_type(&self) -> MessageTypeRef {
        Arc::new(OldUserType)
    }

    fn interface(self: Arc<Self>) -> NativeValue {
        self.inner.clone()
    }

    fn as_unwrapper(&self) -> Option<&dyn Unwrapper> {
        Some(self)
    }
}

impl Unwrapper for WrappedMessage {
    fn proto_unwrap(&self) -> NativeValue {
        self.inner.clone()
    }
}

pub struct TestWrapper;

impl LegacyWrapper for TestWrapper {
    fn enum_of(&self, value: NativeValue) -> Arc<dyn LegacyEnum> {
        let number = match value.data() {
            NativeData::Int32(n) => *n,
            _ => 0,
        };
        Arc::new(WrappedEnum {
            inner: value,
            number,
        })
    }

    fn enum_type_of(&self, _native_type: &NativeType) -> EnumTypeRef {
        Arc::new(OldColorType)
    }

    fn message_of(&self, value: NativeValue) -> MessageRef {
        Arc::new(WrappedMessage { inner: value })
    }

    fn message_type_of(&self, _native_type: &NativeType) -> MessageTypeRef {
        Arc::new(OldUserType)
    }
}

pub fn wrapper() -> Arc<dyn LegacyWrapper> {
    Arc::new(TestWrapper)
}
