//! `Object` and `Object.prototype` (ES5 §15.2)

use otter_ecma_core::{
    Abrupt, CompletionValue, InternalProperty, InternalValue, JsObject, MagicStringId,
    ObjectKind, ObjectRef, Value,
};

use super::error::NativeErrorKind;
use super::{arg, unknown_property, unknown_routine};
use crate::engine::Engine;
use crate::id::BuiltinId;
use crate::lazy::BuiltinProperty;

use MagicStringId as M;

pub(crate) const CONSTRUCTOR_PROPERTIES: &[MagicStringId] = &[
    M::Length,
    M::Prototype,
    M::GetPrototypeOf,
    M::Keys,
    M::Create,
    M::IsExtensible,
    M::PreventExtensions,
];

pub(crate) const PROTOTYPE_PROPERTIES: &[MagicStringId] = &[
    M::Constructor,
    M::ToString,
    M::ToLocaleString,
    M::ValueOf,
    M::HasOwnProperty,
    M::IsPrototypeOf,
    M::PropertyIsEnumerable,
];

pub(crate) fn instantiate_constructor(engine: &Engine, name: MagicStringId) -> BuiltinProperty {
    match name {
        M::Length => BuiltinProperty::constant(Value::number(1.0)),
        M::Prototype => BuiltinProperty::frozen_builtin(engine, BuiltinId::ObjectPrototype),
        M::GetPrototypeOf | M::Keys | M::IsExtensible | M::PreventExtensions => {
            BuiltinProperty::routine(1)
        }
        M::Create => BuiltinProperty::routine(2),
        other => unknown_property(BuiltinId::Object, other),
    }
}

pub(crate) fn instantiate_prototype(engine: &Engine, name: MagicStringId) -> BuiltinProperty {
    match name {
        M::Constructor => BuiltinProperty::builtin(engine, BuiltinId::Object),
        M::ToString | M::ToLocaleString | M::ValueOf => BuiltinProperty::routine(0),
        M::HasOwnProperty | M::IsPrototypeOf | M::PropertyIsEnumerable => {
            BuiltinProperty::routine(1)
        }
        other => unknown_property(BuiltinId::ObjectPrototype, other),
    }
}

/// `Object(value)`
pub(crate) fn call(engine: &Engine, args: &[Value]) -> CompletionValue {
    construct(engine, args)
}

/// `new Object(value)`
pub(crate) fn construct(engine: &Engine, args: &[Value]) -> CompletionValue {
    let value = arg(args, 0);
    if value.is_nullish() {
        return Ok(Value::object(engine.new_object()));
    }
    Ok(Value::object(engine.to_object(value)?))
}

pub(crate) fn dispatch_constructor_routine(
    engine: &Engine,
    routine: MagicStringId,
    args: &[Value],
) -> CompletionValue {
    let target = arg(args, 0);

    match routine {
        M::GetPrototypeOf => {
            let object = require_object(engine, target, "Object.getPrototypeOf")?;
            Ok(object
                .prototype()
                .map_or(Value::null(), |proto| Value::object(proto.clone())))
        }
        M::Keys => {
            let object = require_object(engine, target, "Object.keys")?;
            let keys = object
                .own_keys()
                .into_iter()
                .filter(|key| {
                    object
                        .find_own_property(key)
                        .is_some_and(|desc| desc.is_enumerable())
                })
                .map(Value::String);
            Ok(Value::object(engine.new_array(keys)))
        }
        M::Create => create(engine, target, arg(args, 1)),
        M::IsExtensible => {
            let object = require_object(engine, target, "Object.isExtensible")?;
            Ok(Value::boolean(object.is_extensible()))
        }
        M::PreventExtensions => {
            let object = require_object(engine, target, "Object.preventExtensions")?;
            object.prevent_extensions();
            Ok(target.clone())
        }
        other => unknown_routine(BuiltinId::Object, other),
    }
}

/// `Object.create(proto, properties)`
fn create(engine: &Engine, proto: &Value, properties: &Value) -> CompletionValue {
    let prototype = match proto {
        Value::Object(object) => Some(object.clone()),
        Value::Null => None,
        _ => {
            return Err(engine.throw_error(
                NativeErrorKind::Type,
                "Object prototype may only be an Object or null",
            ));
        }
    };
    if !properties.is_undefined() {
        return Err(engine.throw_unimplemented("Object.create with property descriptors"));
    }

    let object = JsObject::new(prototype, ObjectKind::Ordinary);
    object.set_internal(
        InternalProperty::Class,
        InternalValue::Magic(MagicStringId::Object),
    );
    Ok(Value::object(object))
}

pub(crate) fn dispatch_prototype_routine(
    engine: &Engine,
    routine: MagicStringId,
    this: &Value,
    args: &[Value],
) -> CompletionValue {
    match routine {
        M::ToString => to_string(engine, this),
        M::ToLocaleString => {
            let object = engine.to_object(this)?;
            let to_string = engine.get_magic(&object, M::ToString)?;
            if !to_string.is_callable() {
                return Err(engine.not_callable("toString"));
            }
            engine.call(&to_string, this, &[])
        }
        M::ValueOf => Ok(Value::object(engine.to_object(this)?)),
        M::HasOwnProperty => {
            let name = engine.to_string(arg(args, 0))?;
            let object = engine.to_object(this)?;
            Ok(Value::boolean(engine.get_own_property(&object, &name).is_some()))
        }
        M::IsPrototypeOf => {
            let Value::Object(value) = arg(args, 0) else {
                return Ok(Value::boolean(false));
            };
            let object = engine.to_object(this)?;
            let mut current = value.prototype().cloned();
            while let Some(proto) = current {
                if ObjectRef::ptr_eq(&proto, &object) {
                    return Ok(Value::boolean(true));
                }
                current = proto.prototype().cloned();
            }
            Ok(Value::boolean(false))
        }
        M::PropertyIsEnumerable => {
            let name = engine.to_string(arg(args, 0))?;
            let object = engine.to_object(this)?;
            let enumerable = engine
                .get_own_property(&object, &name)
                .is_some_and(|desc| desc.is_enumerable());
            Ok(Value::boolean(enumerable))
        }
        other => unknown_routine(BuiltinId::ObjectPrototype, other),
    }
}

/// `Object.prototype.toString`: `"[object " + [[Class]] + "]"`
pub(crate) fn to_string(engine: &Engine, this: &Value) -> CompletionValue {
    let class = match this {
        Value::Undefined => "Undefined",
        Value::Null => "Null",
        other => engine.to_object(other)?.class().as_str(),
    };
    Ok(Value::string(format!("[object {class}]")))
}

fn require_object(engine: &Engine, value: &Value, routine: &str) -> Result<ObjectRef, Abrupt> {
    match value {
        Value::Object(object) => Ok(object.clone()),
        _ => Err(engine.throw_error(
            NativeErrorKind::Type,
            &format!("{routine} called on non-object"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BuiltinProfile, EngineConfig};
    use otter_ecma_core::JsString;

    fn engine() -> Engine {
        Engine::new(EngineConfig::with_profile(BuiltinProfile::Full))
    }

    fn text(value: CompletionValue) -> String {
        value.unwrap().as_string().unwrap().as_str().to_string()
    }

    #[test]
    fn test_to_string_uses_class() {
        let e = engine();
        let ts = |this: Value| text(dispatch_prototype_routine(&e, M::ToString, &this, &[]));
        assert_eq!(ts(Value::undefined()), "[object Undefined]");
        assert_eq!(ts(Value::null()), "[object Null]");
        assert_eq!(ts(Value::number(1.0)), "[object Number]");
        assert_eq!(ts(Value::object(e.new_array([]))), "[object Array]");
        assert_eq!(
            ts(Value::object(e.registry().get(BuiltinId::Math))),
            "[object Math]"
        );
        assert_eq!(ts(Value::object(e.global())), "[object Object]");
        assert_eq!(
            ts(Value::object(e.registry().get(BuiltinId::Function))),
            "[object Function]"
        );
    }

    #[test]
    fn test_call_and_construct() {
        let e = engine();
        let fresh = call(&e, &[]).unwrap();
        assert_eq!(fresh.as_object().unwrap().class(), M::Object);

        let existing = Value::object(e.new_object());
        assert_eq!(construct(&e, &[existing.clone()]).unwrap(), existing);

        let boxed = call(&e, &[Value::boolean(true)]).unwrap();
        assert_eq!(boxed.as_object().unwrap().class(), M::Boolean);
    }

    #[test]
    fn test_get_prototype_of() {
        let e = engine();
        let object = Value::object(e.new_object());
        let proto = dispatch_constructor_routine(&e, M::GetPrototypeOf, &[object]).unwrap();
        assert!(e.registry().is(proto.as_object().unwrap(), BuiltinId::ObjectPrototype));

        let root = Value::object(e.registry().get(BuiltinId::ObjectPrototype));
        assert!(
            dispatch_constructor_routine(&e, M::GetPrototypeOf, &[root])
                .unwrap()
                .is_null()
        );
        assert!(dispatch_constructor_routine(&e, M::GetPrototypeOf, &[Value::number(1.0)]).is_err());
    }

    #[test]
    fn test_keys_lists_enumerable_own_properties() {
        let e = engine();
        let object = e.new_object();
        e.define_data(&object, "a", Value::number(1.0));
        e.define_data(&object, "b", Value::number(2.0));
        let keys = dispatch_constructor_routine(&e, M::Keys, &[Value::object(object)]).unwrap();
        let keys = keys.as_object().unwrap();
        assert_eq!(e.get_magic(keys, M::Length).unwrap(), Value::number(2.0));
        assert_eq!(e.get(keys, &JsString::new("1")).unwrap(), Value::string("b"));
    }

    #[test]
    fn test_create_and_extensibility() {
        let e = engine();
        let created = dispatch_constructor_routine(&e, M::Create, &[Value::null()]).unwrap();
        let created = created.as_object().unwrap();
        assert!(created.prototype().is_none());

        let result =
            dispatch_constructor_routine(&e, M::IsExtensible, &[Value::object(created.clone())]);
        assert_eq!(result.unwrap(), Value::boolean(true));
        dispatch_constructor_routine(&e, M::PreventExtensions, &[Value::object(created.clone())])
            .unwrap();
        assert!(!created.is_extensible());

        assert!(dispatch_constructor_routine(&e, M::Create, &[Value::number(1.0)]).is_err());
        let with_props = [Value::null(), Value::object(e.new_object())];
        assert!(dispatch_constructor_routine(&e, M::Create, &with_props).is_err());
    }

    #[test]
    fn test_has_own_property_sees_lazy_builtins() {
        let e = engine();
        let math = Value::object(e.registry().get(BuiltinId::Math));
        let has = |name: &str| {
            dispatch_prototype_routine(&e, M::HasOwnProperty, &math, &[Value::string(name)])
                .unwrap()
        };
        assert_eq!(has("PI"), Value::boolean(true));
        assert_eq!(has("nope"), Value::boolean(false));
        assert_eq!(
            dispatch_prototype_routine(&e, M::PropertyIsEnumerable, &math, &[Value::string("PI")])
                .unwrap(),
            Value::boolean(false)
        );
    }

    #[test]
    fn test_is_prototype_of() {
        let e = engine();
        let proto = Value::object(e.registry().get(BuiltinId::ObjectPrototype));
        let array = Value::object(e.new_array([]));
        assert_eq!(
            dispatch_prototype_routine(&e, M::IsPrototypeOf, &proto, &[array.clone()]).unwrap(),
            Value::boolean(true)
        );
        assert_eq!(
            dispatch_prototype_routine(&e, M::IsPrototypeOf, &array, &[proto]).unwrap(),
            Value::boolean(false)
        );
    }
}
