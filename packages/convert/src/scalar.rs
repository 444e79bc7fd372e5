//! Passthrough conversion between native scalars and protocol scalars.

use bytes::Bytes;
use protovalue_reflect::{NativeData, NativeKind, NativeType, NativeValue, Value, ValueType};

use crate::converter::{check_native_type, Converter};
use crate::{Error, Result};

/// Build the converter between `native_type` and the protocol representation
/// `protocol`.
///
/// The caller has already checked that the shapes are compatible.
pub(crate) fn scalar_converter(native_type: NativeType, protocol: ValueType) -> Converter {
    let want = native_type.clone();
    let to_protocol = move |value: NativeValue| -> Result<Value> {
        check_native_type(value.native_type(), &want)?;
        to_protocol_scalar(&want, protocol, value.into_data())
    };
    let to_native = move |value: Value| -> Result<NativeValue> {
        if value.value_type() != protocol {
            return Err(Error::mismatch(value.value_type(), protocol));
        }
        to_native_scalar(&native_type, value)
    };
    Converter::new(to_protocol, to_native)
}

fn to_protocol_scalar(
    native_type: &NativeType,
    protocol: ValueType,
    data: NativeData,
) -> Result<Value> {
    let value = match (protocol, data) {
        (ValueType::Bool, NativeData::Bool(v)) => Value::Bool(v),
        (ValueType::Int32, NativeData::Int32(v)) => Value::Int32(v),
        (ValueType::Int64, NativeData::Int64(v)) => Value::Int64(v),
        (ValueType::Uint32, NativeData::Uint32(v)) => Value::Uint32(v),
        (ValueType::Uint64, NativeData::Uint64(v)) => Value::Uint64(v),
        (ValueType::Float32, NativeData::Float32(v)) => Value::Float32(v),
        (ValueType::Float64, NativeData::Float64(v)) => Value::Float64(v),
        (ValueType::String, NativeData::String(s)) => Value::String(s),
        (ValueType::String, NativeData::Bytes(b)) => {
            Value::String(String::from_utf8(b).map_err(|_| Error::invalid_utf8(native_type))?)
        }
        // Empty text is always the storage-less empty byte sequence.
        (ValueType::Bytes, NativeData::String(s)) if s.is_empty() => Value::Bytes(Bytes::new()),
        (ValueType::Bytes, NativeData::String(s)) => Value::Bytes(Bytes::from(s.into_bytes())),
        (ValueType::Bytes, NativeData::Bytes(b)) => Value::Bytes(Bytes::from(b)),
        (_, data) => return Err(Error::mismatch(data.describe(), native_type)),
    };
    Ok(value)
}

fn to_native_scalar(native_type: &NativeType, value: Value) -> Result<NativeValue> {
    let data = match (native_type.kind(), value) {
        (NativeKind::Bool, Value::Bool(v)) => NativeData::Bool(v),
        (NativeKind::Int32, Value::Int32(v)) => NativeData::Int32(v),
        (NativeKind::Int64, Value::Int64(v)) => NativeData::Int64(v),
        (NativeKind::Uint32, Value::Uint32(v)) => NativeData::Uint32(v),
        (NativeKind::Uint64, Value::Uint64(v)) => NativeData::Uint64(v),
        (NativeKind::Float32, Value::Float32(v)) => NativeData::Float32(v),
        (NativeKind::Float64, Value::Float64(v)) => NativeData::Float64(v),
        (NativeKind::String, Value::String(s)) => NativeData::String(s),
        (NativeKind::String, Value::Bytes(b)) => NativeData::String(
            std::str::from_utf8(&b)
                .map_err(|_| Error::invalid_utf8(native_type))?
                .to_owned(),
        ),
        // Empty text becomes the zero value, never an allocated empty buffer.
        (NativeKind::Bytes, Value::String(s)) if s.is_empty() => NativeData::Bytes(Vec::new()),
        (NativeKind::Bytes, Value::String(s)) => NativeData::Bytes(s.into_bytes()),
        (NativeKind::Bytes, Value::Bytes(b)) => NativeData::Bytes(b.to_vec()),
        (_, value) => return Err(Error::mismatch(value.value_type(), native_type)),
    };
    Ok(NativeValue::new(native_type.clone(), data))
}
