//! Registration-time cache of converters.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use protovalue_reflect::{Kind, NativeType};

use crate::{Converter, ConverterFactory, Result};

/// Caches one converter per (native type, field kind) pair.
///
/// Converters are built on first request. Failed builds are returned to the
/// caller and not remembered, so asking again fails again the same way.
#[derive(Debug, Default)]
pub struct ConverterCache {
    factory: ConverterFactory,
    converters: RwLock<HashMap<(NativeType, Kind), Converter>>,
}

impl ConverterCache {
    pub fn new(factory: ConverterFactory) -> Self {
        Self {
            factory,
            converters: RwLock::new(HashMap::new()),
        }
    }

    pub fn factory(&self) -> &ConverterFactory {
        &self.factory
    }

    /// The cached converter, if one was already built.
    pub fn get(&self, native_type: &NativeType, kind: Kind) -> Option<Converter> {
        let converters = self
            .converters
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        converters.get(&(native_type.clone(), kind)).cloned()
    }

    /// The cached converter, building and caching it on first use.
    ///
    /// If two threads race on the same key, both build and the first insert
    /// wins; both callers receive that converter.
    pub fn get_or_build(&self, native_type: &NativeType, kind: Kind) -> Result<Converter> {
        if let Some(converter) = self.get(native_type, kind) {
            tracing::trace!(native_type = %native_type, kind = %kind, "converter cache hit");
            return Ok(converter);
        }

        let built = self.factory.build(native_type, kind)?;
        let mut converters = self
            .converters
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let converter = converters
            .entry((native_type.clone(), kind))
            .or_insert(built);
        Ok(converter.clone())
    }

    /// Number of cached converters.
    pub fn len(&self) -> usize {
        self.converters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
