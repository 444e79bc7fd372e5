//! Error types for the conversion layer.
//!
//! Every error here is a contract violation by the caller: either a field was
//! registered with a native type that cannot represent its kind, or a
//! converter was handed a value of a type it was not built for.

use std::fmt;

use protovalue_reflect::{Kind, NativeType};

/// Errors raised while building or invoking a converter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// No conversion exists between the native type and the protocol kind.
    ///
    /// Also raised when only a legacy rule would match and no legacy
    /// wrapper was supplied.
    #[error("invalid native type {native_type} for protobuf kind {kind}")]
    UnsupportedMapping { native_type: String, kind: Kind },

    /// A converter was invoked with a value of the wrong type.
    #[error("invalid type: got {got}, want {want}")]
    TypeMismatch { got: String, want: String },

    /// Bytes that had to become text were not valid UTF-8.
    #[error("invalid UTF-8 in {native_type} value")]
    InvalidUtf8 { native_type: String },
}

impl Error {
    pub(crate) fn unsupported(native_type: &NativeType, kind: Kind) -> Self {
        Error::UnsupportedMapping {
            native_type: native_type.name().to_string(),
            kind,
        }
    }

    pub(crate) fn mismatch(got: impl fmt::Display, want: impl fmt::Display) -> Self {
        Error::TypeMismatch {
            got: got.to_string(),
            want: want.to_string(),
        }
    }

    pub(crate) fn invalid_utf8(native_type: &NativeType) -> Self {
        Error::InvalidUtf8 {
            native_type: native_type.name().to_string(),
        }
    }
}

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;
