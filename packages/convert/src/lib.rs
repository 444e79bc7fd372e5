//! Protovalue conversion layer
//!
//! Bridges native field values and abstract protocol values:
//! - `new_converter` / `new_legacy_converter`: classify a native type against
//!   a protocol field kind and build a `Converter`
//! - `Converter`: the bidirectional function pair, plus enum/message type
//!   metadata for those kinds
//! - `LegacyWrapper`: caller-supplied strategy that lets enums and messages
//!   from the older generated API pass through the same interface
//! - `ConverterCache`: one converter per (native type, kind), built on demand
//!
//! Every failure is a caller contract violation and is returned as an
//! [`Error`]; nothing is recovered or defaulted.
//!
//! # Example
//!
//! ```rust
//! use protovalue_convert::new_converter;
//! use protovalue_reflect::{Bytes, Kind, NativeType, NativeValue, Value};
//!
//! let conv = new_converter(&NativeType::string(), Kind::Bytes).unwrap();
//!
//! let value = conv.to_protocol_value(NativeValue::from("")).unwrap();
//! assert_eq!(value, Value::Bytes(Bytes::new()));
//!
//! let back = conv.to_native_value(value).unwrap();
//! assert_eq!(back, NativeValue::from(""));
//! ```

mod cache;
mod converter;
mod error;
mod factory;
mod legacy;
mod scalar;

pub use cache::ConverterCache;
pub use converter::Converter;
pub use error::{Error, Result};
pub use factory::{new_converter, new_legacy_converter, ConverterFactory};
pub use legacy::{LegacyEnum, LegacyWrapper};

// Re-export the reflection model for convenience
pub use protovalue_reflect::{Kind, NativeType, NativeValue, Value};
