//! The legacy wrapping capability.
//!
//! Messages and enums generated under the older API do not describe
//! themselves. A [`LegacyWrapper`] supplied by the caller bridges them into
//! the reflective interfaces; this crate never implements one.

use std::sync::Arc;

use protovalue_reflect::{
    Enum, EnumTypeRef, MessageRef, MessageTypeRef, NativeType, NativeValue, Unwrapper,
};

/// A legacy enum value wrapped to look like a current one.
pub trait LegacyEnum: Enum + Unwrapper {}

impl<T: Enum + Unwrapper + ?Sized> LegacyEnum for T {}

/// Wraps legacy enum and message values so they can be used through the
/// reflective interfaces.
///
/// Messages returned by [`message_of`](LegacyWrapper::message_of) must expose
/// an [`Unwrapper`] through `Message::as_unwrapper`, handing back the value
/// that was wrapped.
pub trait LegacyWrapper: Send + Sync {
    /// Wrap a legacy enum value.
    fn enum_of(&self, value: NativeValue) -> Arc<dyn LegacyEnum>;

    /// Enum type metadata for a legacy enum type.
    fn enum_type_of(&self, native_type: &NativeType) -> EnumTypeRef;

    /// Wrap a legacy message pointer.
    fn message_of(&self, value: NativeValue) -> MessageRef;

    /// Message type metadata for a legacy message type.
    fn message_type_of(&self, native_type: &NativeType) -> MessageTypeRef;
}
