mod common;

use std::sync::Arc;

use common::{wrapper, Color, ColorType, OldUser};
use protovalue_convert::{new_legacy_converter, ConverterCache, ConverterFactory, Error};
use protovalue_reflect::{Kind, NativeKind, NativeType};

fn legacy_cache() -> ConverterCache {
    ConverterCache::new(ConverterFactory::new().with_legacy_wrapper(wrapper()))
}

#[test]
fn capabilities_are_part_of_the_key() {
    let cache = legacy_cache();
    let legacy = NativeType::named("example::Color", NativeKind::Int32);
    let current = NativeType::named("example::Color", NativeKind::Int32)
        .with_enum_type(Arc::new(ColorType));

    assert!(cache.get_or_build(&legacy, Kind::Enum).unwrap().is_legacy());
    assert!(cache.get(&current, Kind::Enum).is_none());

    let conv = cache.get_or_build(&current, Kind::Enum).unwrap();
    assert!(!conv.is_legacy());
    assert_eq!(conv.enum_type().unwrap().full_name(), "example.Color");
    assert_eq!(cache.len(), 2);

    // Same answer as asking the factory directly, whatever the order.
    let w = wrapper();
    for ty in [&legacy, &current] {
        let direct = new_legacy_converter(ty, Kind::Enum, Some(&w)).unwrap();
        let cached = cache.get_or_build(ty, Kind::Enum).unwrap();
        assert_eq!(direct.is_legacy(), cached.is_legacy(), "{:?}", ty);
    }

    let color = cache.get_or_build(&Color::native_type(), Kind::Enum).unwrap();
    assert!(!color.is_legacy());
}

#[test]
fn rejected_type_stays_rejected_after_a_namesake_is_cached() {
    let cache = legacy_cache();
    cache
        .get_or_build(&OldUser::native_type(), Kind::Message)
        .unwrap();

    let plain = NativeType::named("example::OldUser", NativeKind::Pointer);
    let err = cache.get_or_build(&plain, Kind::Message).unwrap_err();
    assert_eq!(
        err,
        Error::UnsupportedMapping {
            native_type: "example::OldUser".to_string(),
            kind: Kind::Message,
        }
    );
    assert_eq!(cache.len(), 1);
}
