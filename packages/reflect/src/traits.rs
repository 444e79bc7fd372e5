//! Reflection capabilities: enum and message types, and the self-describing
//! values generated code hands to the converter layer.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::{EnumNumber, NativeValue};

/// Shared handle to an enum type.
pub type EnumTypeRef = Arc<dyn EnumType>;

/// Shared handle to a message type.
pub type MessageTypeRef = Arc<dyn MessageType>;

/// Shared handle to a reflective message.
pub type MessageRef = Arc<dyn Message>;

/// Type metadata for a protocol enum.
///
/// Owned by the type registry; the converter layer only reads it.
pub trait EnumType: Send + Sync + fmt::Debug {
    /// Fully-qualified protocol name (e.g. `"example.Color"`).
    fn full_name(&self) -> &str;

    /// Build the native value for an enum number.
    ///
    /// Unknown numbers must still produce a value: open enums keep them.
    fn from_number(&self, number: EnumNumber) -> NativeValue;
}

/// Type metadata for a protocol message.
pub trait MessageType: Send + Sync + fmt::Debug {
    /// Fully-qualified protocol name (e.g. `"example.User"`).
    fn full_name(&self) -> &str;
}

/// Reflective view of an enum value.
pub trait Enum: Send + Sync + fmt::Debug {
    fn enum_type(&self) -> EnumTypeRef;
    fn number(&self) -> EnumNumber;
}

/// A native enum value that describes itself.
///
/// Generated enums usually implement both this and [`Enum`], returning
/// `self` from `proto_reflect`.
pub trait ProtoEnum: Send + Sync + fmt::Debug {
    fn proto_reflect(&self) -> &dyn Enum;
}

/// Reflective view of a message.
pub trait Message: Send + Sync + fmt::Debug {
    fn message_type(&self) -> MessageTypeRef;

    /// The native value this message reflects.
    ///
    /// For a self-describing message this is the very pointer that produced
    /// the reflective view.
    fn interface(self: Arc<Self>) -> NativeValue;

    /// Access to the original legacy value, for messages that wrap one.
    fn as_unwrapper(&self) -> Option<&dyn Unwrapper> {
        None
    }
}

/// A native message pointer that describes itself.
pub trait ProtoMessage: Send + Sync + fmt::Debug {
    fn proto_reflect(self: Arc<Self>) -> MessageRef;
}

/// A message generated under the older API.
///
/// Legacy messages carry no reflection of their own. A legacy wrapper
/// inspects them through `as_any`.
pub trait LegacyProtoMessage: Send + Sync + fmt::Debug {
    fn as_any(&self) -> &dyn Any;
}

/// Implemented by wrappers to hand back the value they wrap.
pub trait Unwrapper {
    fn proto_unwrap(&self) -> NativeValue;
}
