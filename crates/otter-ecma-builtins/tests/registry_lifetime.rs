//! Builtin singletons: creation on demand, identity and release

use otter_ecma_builtins::{BuiltinId, BuiltinRegistry, Engine, EngineConfig};
use otter_ecma_core::{JsString, ObjectRef, Value};

#[test]
fn builtins_are_created_on_demand() {
    let registry = BuiltinRegistry::new();
    assert_eq!(registry.instantiated_count(), 0);

    let math = registry.get(BuiltinId::Math);
    assert!(registry.is_instantiated(BuiltinId::Math));
    // Math inherits from Object.prototype, which comes along.
    assert!(registry.is_instantiated(BuiltinId::ObjectPrototype));
    assert!(!registry.is_instantiated(BuiltinId::Array));
    assert!(registry.is(&math, BuiltinId::Math));
}

#[test]
fn repeated_get_returns_the_same_singleton() {
    let registry = BuiltinRegistry::new();
    let first = registry.get(BuiltinId::ArrayPrototype);
    let second = registry.get(BuiltinId::ArrayPrototype);

    assert!(ObjectRef::ptr_eq(&first, &second));
    // Registry slot plus the two handles above.
    assert_eq!(ObjectRef::strong_count(&first), 3);
    drop(second);
    assert_eq!(ObjectRef::strong_count(&first), 2);
}

#[test]
fn every_builtin_prototype_chain_resolves() {
    let registry = BuiltinRegistry::new();
    for id in BuiltinId::ALL {
        let object = registry.get(id);
        match id.descriptor().prototype {
            Some(proto) => assert!(ObjectRef::ptr_eq(
                object.prototype().unwrap(),
                &registry.get(proto)
            )),
            None => assert!(object.prototype().is_none(), "{id}"),
        }
    }
    assert_eq!(registry.instantiated_count(), BuiltinId::COUNT);
}

#[test]
fn teardown_releases_singletons() {
    let registry = BuiltinRegistry::new();
    let weak = ObjectRef::downgrade(&registry.get(BuiltinId::Global));
    assert!(weak.is_alive());

    registry.teardown();
    assert!(!weak.is_alive());
    assert_eq!(registry.instantiated_count(), 0);
}

#[test]
fn teardown_breaks_constructor_cycles() {
    let engine = Engine::new(EngineConfig::default());
    let prototype = engine.registry().get(BuiltinId::ObjectPrototype);
    // Object.prototype.constructor.prototype === Object.prototype
    engine
        .get(&prototype, &JsString::new("constructor"))
        .unwrap();
    let constructor = ObjectRef::downgrade(&engine.registry().get(BuiltinId::Object));
    let weak = ObjectRef::downgrade(&prototype);
    drop(prototype);

    engine.teardown();
    assert!(!weak.is_alive());
    assert!(!constructor.is_alive());
}

#[test]
fn engine_recreates_builtins_after_teardown() {
    let engine = Engine::new(EngineConfig::default());
    let old = engine.global();
    engine.teardown();

    let new = engine.global();
    assert!(!ObjectRef::ptr_eq(&old, &new));
    // The old handle is still valid, just empty and no longer a builtin.
    assert!(engine.get(&old, &JsString::new("NaN")).unwrap().is_undefined());
    assert_eq!(old.property_count(), 0);
    assert!(!old.is_builtin());

    let nan = engine.get(&new, &JsString::new("NaN")).unwrap();
    assert!(nan.is_nan());
    assert_ne!(nan, Value::number(0.0));
}
