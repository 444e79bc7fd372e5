//! Classification of (native type, protocol kind) pairs into converters.

use std::fmt;
use std::sync::Arc;

use protovalue_reflect::{
    EnumTypeRef, Kind, MessageTypeRef, NativeData, NativeKind, NativeType, NativeValue, Value,
    ValueType,
};

use crate::converter::{check_native_type, Converter};
use crate::legacy::LegacyWrapper;
use crate::scalar::scalar_converter;
use crate::{Error, Result};

/// Build a converter between `native_type` and fields of `kind`.
///
/// Only current-style (self-describing) enums and messages are accepted. Use
/// [`new_legacy_converter`] to also accept legacy ones.
///
/// # Errors
///
/// `Error::UnsupportedMapping` if the native type cannot represent the kind.
pub fn new_converter(native_type: &NativeType, kind: Kind) -> Result<Converter> {
    new_legacy_converter(native_type, kind, None)
}

/// Build a converter between `native_type` and fields of `kind`, using
/// `wrapper` to bridge legacy enums and messages.
///
/// Matching is on the shape of the native type, so named types over a scalar
/// (e.g. a declared `UserId` over `i64`) are accepted like the builtin.
///
/// # Errors
///
/// `Error::UnsupportedMapping` if no rule matches, including when only a
/// legacy rule would match and `wrapper` is `None`.
pub fn new_legacy_converter(
    native_type: &NativeType,
    kind: Kind,
    wrapper: Option<&Arc<dyn LegacyWrapper>>,
) -> Result<Converter> {
    let result = classify(native_type, kind, wrapper);
    match &result {
        Ok(converter) => tracing::debug!(
            native_type = %native_type,
            kind = %kind,
            legacy = converter.is_legacy(),
            "built converter"
        ),
        Err(e) => tracing::debug!(
            native_type = %native_type,
            kind = %kind,
            error = %e,
            "rejected native type"
        ),
    }
    result
}

fn classify(
    native_type: &NativeType,
    kind: Kind,
    wrapper: Option<&Arc<dyn LegacyWrapper>>,
) -> Result<Converter> {
    let scalar = |protocol: ValueType| -> Result<Converter> {
        Ok(scalar_converter(native_type.clone(), protocol))
    };
    match (kind, native_type.kind()) {
        (Kind::Bool, NativeKind::Bool) => scalar(ValueType::Bool),
        (Kind::Int32 | Kind::Sint32 | Kind::Sfixed32, NativeKind::Int32) => {
            scalar(ValueType::Int32)
        }
        (Kind::Int64 | Kind::Sint64 | Kind::Sfixed64, NativeKind::Int64) => {
            scalar(ValueType::Int64)
        }
        (Kind::Uint32 | Kind::Fixed32, NativeKind::Uint32) => scalar(ValueType::Uint32),
        (Kind::Uint64 | Kind::Fixed64, NativeKind::Uint64) => scalar(ValueType::Uint64),
        (Kind::Float, NativeKind::Float32) => scalar(ValueType::Float32),
        (Kind::Double, NativeKind::Float64) => scalar(ValueType::Float64),
        (Kind::String, NativeKind::String | NativeKind::Bytes) => scalar(ValueType::String),
        (Kind::Bytes, NativeKind::String | NativeKind::Bytes) => scalar(ValueType::Bytes),
        (Kind::Enum, _) => enum_converter(native_type, kind, wrapper),
        (Kind::Message | Kind::Group, _) => message_converter(native_type, kind, wrapper),
        _ => Err(Error::unsupported(native_type, kind)),
    }
}

fn enum_converter(
    native_type: &NativeType,
    kind: Kind,
    wrapper: Option<&Arc<dyn LegacyWrapper>>,
) -> Result<Converter> {
    if !native_type.is_pointer() {
        if let Some(enum_type) = native_type.enum_type() {
            return Ok(current_enum(native_type, enum_type.clone()));
        }
    }

    // Legacy enums are simply named i32 types.
    if let Some(wrapper) = wrapper {
        if native_type.is_named() && native_type.kind() == NativeKind::Int32 {
            let enum_type = wrapper.enum_type_of(native_type);
            return Ok(legacy_enum(native_type, enum_type));
        }
    }

    Err(Error::unsupported(native_type, kind))
}

fn current_enum(native_type: &NativeType, enum_type: EnumTypeRef) -> Converter {
    let want = native_type.clone();
    let to_protocol = move |value: NativeValue| -> Result<Value> {
        check_native_type(value.native_type(), &want)?;
        match value.data() {
            NativeData::Enum(e) => Ok(Value::Enum(e.proto_reflect().number())),
            other => Err(Error::mismatch(other.describe(), &want)),
        }
    };

    let want = native_type.clone();
    let rebuild = enum_type.clone();
    let to_native = move |value: Value| -> Result<NativeValue> {
        let number = value
            .as_enum()
            .ok_or_else(|| Error::mismatch(value.value_type(), ValueType::Enum))?;
        let native = rebuild.from_number(number);
        check_native_type(native.native_type(), &want)?;
        Ok(native)
    };

    Converter::new(to_protocol, to_native).with_enum_type(enum_type)
}

fn legacy_enum(native_type: &NativeType, enum_type: EnumTypeRef) -> Converter {
    let want = native_type.clone();
    let to_protocol = move |value: NativeValue| -> Result<Value> {
        check_native_type(value.native_type(), &want)?;
        match value.data() {
            NativeData::Int32(n) => Ok(Value::Enum(*n)),
            other => Err(Error::mismatch(other.describe(), &want)),
        }
    };

    let target = native_type.clone();
    let to_native = move |value: Value| -> Result<NativeValue> {
        let number = value
            .as_enum()
            .ok_or_else(|| Error::mismatch(value.value_type(), ValueType::Enum))?;
        Ok(NativeValue::new(target.clone(), NativeData::Int32(number)))
    };

    Converter::new(to_protocol, to_native)
        .with_enum_type(enum_type)
        .legacy()
}

fn message_converter(
    native_type: &NativeType,
    kind: Kind,
    wrapper: Option<&Arc<dyn LegacyWrapper>>,
) -> Result<Converter> {
    if native_type.is_pointer() {
        if let Some(message_type) = native_type.message_type() {
            return Ok(current_message(native_type, message_type.clone()));
        }
    }

    if let Some(wrapper) = wrapper {
        if native_type.is_pointer() && native_type.is_legacy_message() {
            return Ok(legacy_message(native_type, Arc::clone(wrapper)));
        }
    }

    Err(Error::unsupported(native_type, kind))
}

fn current_message(native_type: &NativeType, message_type: MessageTypeRef) -> Converter {
    let want = native_type.clone();
    let to_protocol = move |value: NativeValue| -> Result<Value> {
        check_native_type(value.native_type(), &want)?;
        match value.into_data() {
            NativeData::Message(m) => Ok(Value::Message(m.proto_reflect())),
            other => Err(Error::mismatch(other.describe(), &want)),
        }
    };

    let want = native_type.clone();
    let to_native = move |value: Value| -> Result<NativeValue> {
        match value {
            Value::Message(m) => {
                let native = m.interface();
                check_native_type(native.native_type(), &want)?;
                Ok(native)
            }
            other => Err(Error::mismatch(other.value_type(), ValueType::Message)),
        }
    };

    Converter::new(to_protocol, to_native).with_message_type(message_type)
}

fn legacy_message(native_type: &NativeType, wrapper: Arc<dyn LegacyWrapper>) -> Converter {
    let message_type = wrapper.message_type_of(native_type);

    let want = native_type.clone();
    let to_protocol = move |value: NativeValue| -> Result<Value> {
        check_native_type(value.native_type(), &want)?;
        if !matches!(value.data(), NativeData::LegacyMessage(_)) {
            return Err(Error::mismatch(value.data().describe(), &want));
        }
        Ok(Value::Message(wrapper.message_of(value)))
    };

    let want = native_type.clone();
    let to_native = move |value: Value| -> Result<NativeValue> {
        match value {
            Value::Message(m) => {
                let unwrapper = m
                    .as_unwrapper()
                    .ok_or_else(|| Error::mismatch(m.message_type().full_name(), &want))?;
                let native = unwrapper.proto_unwrap();
                check_native_type(native.native_type(), &want)?;
                Ok(native)
            }
            other => Err(Error::mismatch(other.value_type(), ValueType::Message)),
        }
    };

    Converter::new(to_protocol, to_native)
        .with_message_type(message_type)
        .legacy()
}

/// Builds converters, optionally bridging legacy types.
///
/// # Example
///
/// ```rust
/// use protovalue_convert::ConverterFactory;
/// use protovalue_reflect::{Kind, NativeType, NativeValue, Value};
///
/// let factory = ConverterFactory::new();
/// let conv = factory.build(&NativeType::int32(), Kind::Sfixed32).unwrap();
/// let value = conv.to_protocol_value(NativeValue::from(-7i32)).unwrap();
/// assert_eq!(value, Value::Int32(-7));
/// ```
#[derive(Clone, Default)]
pub struct ConverterFactory {
    wrapper: Option<Arc<dyn LegacyWrapper>>,
}

impl ConverterFactory {
    /// A factory that accepts only current-style enums and messages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept legacy enums and messages, bridged through `wrapper`.
    pub fn with_legacy_wrapper(mut self, wrapper: Arc<dyn LegacyWrapper>) -> Self {
        self.wrapper = Some(wrapper);
        self
    }

    /// The wrapper used for legacy types, if any.
    pub fn legacy_wrapper(&self) -> Option<&Arc<dyn LegacyWrapper>> {
        self.wrapper.as_ref()
    }

    /// Build a converter; see [`new_legacy_converter`].
    pub fn build(&self, native_type: &NativeType, kind: Kind) -> Result<Converter> {
        new_legacy_converter(native_type, kind, self.wrapper.as_ref())
    }
}

impl fmt::Debug for ConverterFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterFactory")
            .field("legacy", &self.wrapper.is_some())
            .finish()
    }
}
