//! Store 통합 테스트 - 권한 판정 + path 탐색
//!
//! `cargo test -p pathstore-core --test store_test -- --nocapture`

use pathstore_core::{
    Capability, Error, PermissionLevel, PermissionRegistry, Store, StoreSchema, Value,
};
use serde_json::json;
use std::sync::{Arc, Once};

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

fn store_with(declarations: &[(&str, PermissionLevel)]) -> Store {
    init_tracing();
    let registry = Arc::new(PermissionRegistry::new());
    for (property, level) in declarations {
        registry.declare("Fixture", *property, *level).unwrap();
    }
    Store::with_registry("Fixture", registry)
}

#[test]
fn test_undeclared_keys_follow_default_policy() {
    let mut store = store_with(&[]);
    assert_eq!(store.default_policy, PermissionLevel::ReadWrite);

    store.default_policy = PermissionLevel::Read;
    assert!(store.allowed_to_read("free").unwrap());
    assert!(!store.allowed_to_write("free").unwrap());
    assert!(matches!(
        store.write("free", 1),
        Err(Error::AccessDenied { capability: Capability::Write, .. })
    ));
}

#[test]
fn test_declared_levels_override_default() {
    let mut store = store_with(&[
        ("none", PermissionLevel::None),
        ("r", PermissionLevel::Read),
        ("w", PermissionLevel::Write),
        ("rw", PermissionLevel::ReadWrite),
    ]);

    for default_policy in [PermissionLevel::None, PermissionLevel::ReadWrite] {
        store.default_policy = default_policy;
        for key in ["none", "r", "w", "rw"] {
            assert_eq!(store.allowed_to_read(key).unwrap(), key.contains('r'), "{key}");
            assert_eq!(store.allowed_to_write(key).unwrap(), key.contains('w'), "{key}");
        }
    }
}

#[test]
fn test_round_trip_single_segment() {
    let mut store = store_with(&[]);
    let values = [
        json!(null),
        json!(true),
        json!(42),
        json!(-1.25),
        json!("text"),
        json!([1, "two", [3]]),
        json!({ "nested": { "list": [] } }),
    ];

    for (i, value) in values.iter().enumerate() {
        let key = format!("k{i}");
        store.write(&key, value.clone()).unwrap();
        assert_eq!(store.read(&key).unwrap(), &Value::from(value.clone()));
        assert_eq!(store.read(&key).unwrap().to_json().unwrap(), *value);
    }
}

#[test]
fn test_nested_creation() {
    let mut store = store_with(&[]);
    store.write("a:b:c", "deep").unwrap();

    assert_eq!(store.read("a:b:c").unwrap().as_str(), Some("deep"));
    assert!(store.read("a").unwrap().as_object().is_some());
    assert!(store.read("a:b").unwrap().as_object().is_some());
    assert_eq!(store.to_json().unwrap(), json!({ "a": { "b": { "c": "deep" } } }));
}

#[test]
fn test_structural_conflict_on_scalar() {
    let mut store = store_with(&[]);
    store.write("a", 1).unwrap();

    let err = store.write("a:b", "v").unwrap_err();
    assert!(matches!(err, Error::StructuralConflict { ref key } if key == "a"));
    assert_eq!(
        err.to_string(),
        "Cannot create nested property under non-object key: a"
    );
    assert_eq!(store.read("a").unwrap().as_i64(), Some(1));
}

#[test]
fn test_write_only_secret() {
    let mut store = store_with(&[("secret", PermissionLevel::Write)]);

    store.write("secret", "hunter2").unwrap();
    let err = store.read("secret").unwrap_err();
    assert!(matches!(
        err,
        Error::AccessDenied { ref key, capability: Capability::Read } if key == "secret"
    ));
    assert_eq!(err.to_string(), "Reading access denied for key: secret");

    // nested paths are gated by the same first segment
    assert!(matches!(
        store.write("secret:inner", 1),
        Err(Error::StructuralConflict { .. })
    ));
    assert!(matches!(
        store.read("secret:inner"),
        Err(Error::AccessDenied { .. })
    ));
}

#[test]
fn test_entries_filters_unreadable() {
    let mut store = store_with(&[("secret", PermissionLevel::Write)]);
    store.write("secret", "hidden").unwrap();
    store.write("profile:address:city", "Seoul").unwrap();
    store.write("count", 3).unwrap();

    let entries = store.entries().unwrap();
    let keys: Vec<_> = entries.keys().copied().collect();
    assert_eq!(keys, vec!["profile", "count"]);
    assert!(entries["profile"].child("address").is_some());
}

#[test]
fn test_write_entries_applies_in_order() {
    let mut store = store_with(&[]);
    store.write_entries([("x", 1), ("y", 2)]).unwrap();

    assert_eq!(store.read("x").unwrap().as_i64(), Some(1));
    assert_eq!(store.read("y").unwrap().as_i64(), Some(2));
}

#[test]
fn test_write_entries_partial_application() {
    let mut store = store_with(&[("y", PermissionLevel::Read)]);
    let batch = json!({ "x": 1, "y": 2, "z": 3 });

    let err = store
        .write_json(batch.as_object().unwrap())
        .unwrap_err();
    assert!(matches!(
        err,
        Error::AccessDenied { ref key, capability: Capability::Write } if key == "y"
    ));

    // x stays applied, z was never attempted
    assert_eq!(store.read("x").unwrap().as_i64(), Some(1));
    assert!(matches!(store.read("y"), Err(Error::LookupFailure { .. })));
    assert!(matches!(store.read("z"), Err(Error::LookupFailure { .. })));
}

#[test]
fn test_write_json_follows_document_order() {
    let mut store = store_with(&[]);
    let batch = json!({ "zz": 1, "aa:x": 2, "mm": 3 });
    store.write_json(batch.as_object().unwrap()).unwrap();

    let keys: Vec<_> = store.entries().unwrap().keys().copied().collect();
    assert_eq!(keys, vec!["zz", "aa", "mm"]);
    assert_eq!(
        serde_json::to_string(&store.to_json().unwrap()).unwrap(),
        r#"{"zz":1,"aa":{"x":2},"mm":3}"#
    );
}

#[test]
fn test_write_json_stops_at_first_denied_key_in_document_order() {
    let mut store = store_with(&[("b", PermissionLevel::Read)]);
    let batch: serde_json::Value = serde_json::from_str(r#"{"c": 1, "b": 2, "a": 3}"#).unwrap();

    let err = store.write_json(batch.as_object().unwrap()).unwrap_err();
    assert!(matches!(err, Error::AccessDenied { ref key, .. } if key == "b"));
    assert_eq!(store.read("c").unwrap().as_i64(), Some(1));
    assert!(matches!(store.read("a"), Err(Error::LookupFailure { .. })));
}

#[test]
fn test_poisoned_registry_surfaces_internal_fault() {
    init_tracing();
    let registry = Arc::new(PermissionRegistry::new());
    let mut store = Store::with_registry("Fixture", Arc::clone(&registry));
    store.write("name", "ada").unwrap();

    // a declaration source that panics mid-definition leaves the lock poisoned
    let poisoner = Arc::clone(&registry);
    let _ = std::thread::spawn(move || {
        let broken = (0..1).map(|_| -> (&'static str, PermissionLevel) {
            panic!("declaration source failed")
        });
        let _ = poisoner.define("Broken", broken);
    })
    .join();

    for result in [store.allowed_to_read("name"), store.allowed_to_write("name")] {
        let err = result.unwrap_err();
        assert!(matches!(err, Error::InternalFault));
        assert_eq!(err.to_string(), "Internal Server Error");
    }

    let err = store.read("name").unwrap_err();
    assert!(matches!(err, Error::InternalFault));
    assert_eq!(err.to_string(), "Internal Server Error");
    assert!(!err.is_user_facing());
    assert!(matches!(store.write("name", "bob"), Err(Error::InternalFault)));
    assert!(matches!(store.entries(), Err(Error::InternalFault)));
}

#[test]
fn test_schema_store_through_global_registry() {
    struct Profile;

    impl StoreSchema for Profile {
        const TYPE_NAME: &'static str = "store_test.Profile";

        fn permissions() -> Vec<(&'static str, PermissionLevel)> {
            vec![("password", PermissionLevel::Write), ("id", PermissionLevel::Read)]
        }
    }

    init_tracing();
    let mut profile = Store::of::<Profile>().unwrap();
    profile.write("password", "pw").unwrap();
    profile.write("name", "ada").unwrap();
    assert!(matches!(
        profile.write("id", 7),
        Err(Error::AccessDenied { .. })
    ));

    assert_eq!(profile.to_json().unwrap(), json!({ "name": "ada" }));

    let other = Store::of::<Profile>().unwrap();
    assert!(!other.allowed_to_read("password").unwrap());
}
