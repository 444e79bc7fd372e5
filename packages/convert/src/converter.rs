//! The converter value produced by the factory.

use std::fmt;
use std::sync::Arc;

use protovalue_reflect::{EnumTypeRef, MessageTypeRef, NativeType, NativeValue, Value};

use crate::{Error, Result};

type ToProtocolFn = dyn Fn(NativeValue) -> Result<Value> + Send + Sync;
type ToNativeFn = dyn Fn(Value) -> Result<NativeValue> + Send + Sync;

/// Converts between one native type and the protocol value of one field kind.
///
/// Converters are immutable and cheap to clone. They are built once per field
/// at registration time and may be shared between threads.
#[derive(Clone)]
pub struct Converter {
    to_protocol: Arc<ToProtocolFn>,
    to_native: Arc<ToNativeFn>,
    enum_type: Option<EnumTypeRef>,
    message_type: Option<MessageTypeRef>,
    legacy: bool,
}

impl Converter {
    pub(crate) fn new<P, N>(to_protocol: P, to_native: N) -> Self
    where
        P: Fn(NativeValue) -> Result<Value> + Send + Sync + 'static,
        N: Fn(Value) -> Result<NativeValue> + Send + Sync + 'static,
    {
        Self {
            to_protocol: Arc::new(to_protocol),
            to_native: Arc::new(to_native),
            enum_type: None,
            message_type: None,
            legacy: false,
        }
    }

    pub(crate) fn with_enum_type(mut self, enum_type: EnumTypeRef) -> Self {
        self.enum_type = Some(enum_type);
        self
    }

    pub(crate) fn with_message_type(mut self, message_type: MessageTypeRef) -> Self {
        self.message_type = Some(message_type);
        self
    }

    pub(crate) fn legacy(mut self) -> Self {
        self.legacy = true;
        self
    }

    /// Convert a native value into a protocol value.
    ///
    /// # Errors
    ///
    /// `Error::TypeMismatch` if `value` is not of the native type this
    /// converter was built for. `Error::InvalidUtf8` if bytes must become a
    /// protocol string and are not UTF-8.
    pub fn to_protocol_value(&self, value: NativeValue) -> Result<Value> {
        (self.to_protocol)(value)
    }

    /// Convert a protocol value back into a native value.
    ///
    /// # Errors
    ///
    /// `Error::TypeMismatch` if `value` is not the protocol representation
    /// this converter expects, or if the native value rebuilt from it is not
    /// of the converter's native type.
    pub fn to_native_value(&self, value: Value) -> Result<NativeValue> {
        (self.to_native)(value)
    }

    /// Enum type metadata; set only for enum fields.
    pub fn enum_type(&self) -> Option<&EnumTypeRef> {
        self.enum_type.as_ref()
    }

    /// Message type metadata; set only for message and group fields.
    pub fn message_type(&self) -> Option<&MessageTypeRef> {
        self.message_type.as_ref()
    }

    /// Check if this converter bridges a legacy native representation.
    pub fn is_legacy(&self) -> bool {
        self.legacy
    }

    /// Check if both converters share the same conversion functions.
    pub fn ptr_eq(&self, other: &Converter) -> bool {
        Arc::ptr_eq(&self.to_protocol, &other.to_protocol)
            && Arc::ptr_eq(&self.to_native, &other.to_native)
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter")
            .field("enum_type", &self.enum_type.as_ref().map(|t| t.full_name()))
            .field(
                "message_type",
                &self.message_type.as_ref().map(|t| t.full_name()),
            )
            .field("legacy", &self.legacy)
            .finish_non_exhaustive()
    }
}

/// Reject values whose native type is not the one a converter was built for.
pub(crate) fn check_native_type(got: &NativeType, want: &NativeType) -> Result<()> {
    if got == want {
        return Ok(());
    }
    // Same name, different capabilities.
    if got.name() == want.name() {
        return Err(Error::mismatch(got.describe(), want.describe()));
    }
    Err(Error::mismatch(got, want))
}

#[cfg(test)]
mod tests {
    use super::*;
    use protovalue_reflect::NativeKind;

    #[test]
    fn same_type_passes() {
        let ty = NativeType::legacy_message("example.Old");
        assert!(check_native_type(&ty, &NativeType::legacy_message("example.Old")).is_ok());
    }

    #[test]
    fn different_names_report_names() {
        let err = check_native_type(&NativeType::int64(), &NativeType::int32()).unwrap_err();
        assert_eq!(err, Error::mismatch("i64", "i32"));
    }

    #[test]
    fn same_name_reports_capabilities() {
        let plain = NativeType::named("example.Old", NativeKind::Pointer);
        let legacy = NativeType::legacy_message("example.Old");
        let err = check_native_type(&plain, &legacy).unwrap_err();
        assert_eq!(
            err,
            Error::mismatch("example.Old", "example.Old [legacy message]")
        );
    }
}
