//! Protovalue reflection model
//!
//! The object model the conversion layer talks to:
//! - `Kind`: the declared kind of a protocol field
//! - `Value`: the abstract, kind-tagged protocol value
//! - `NativeType` / `NativeValue`: the host program's types and values
//! - Capability traits: self-describing enums and messages, their type
//!   metadata, and legacy messages that need wrapping
//!
//! Nothing here converts between the two worlds; see `protovalue-convert`.
//!
//! # Example
//!
//! ```rust
//! use protovalue_reflect::{Kind, NativeKind, NativeType, NativeValue, NativeData};
//!
//! let user_id = NativeType::named("UserId", NativeKind::Int64);
//! let value = NativeValue::new(user_id.clone(), NativeData::Int64(42));
//! assert_eq!(value.native_type(), &user_id);
//! assert_eq!(Kind::Sint64.to_string(), "sint64");
//! ```

pub use bytes::Bytes;

mod kind;
mod native;
mod traits;
mod value;

pub use kind::{Kind, UnknownKind};
pub use native::{NativeData, NativeKind, NativeType, NativeValue};
pub use traits::{
    Enum, EnumType, EnumTypeRef, LegacyProtoMessage, Message, MessageRef, MessageType,
    MessageTypeRef, ProtoEnum, ProtoMessage, Unwrapper,
};
pub use value::{EnumNumber, Value, ValueType};
