//! `Array` and `Array.prototype` (ES5 §15.4)
//!
//! Arrays are ordinary objects with class `Array`, index-named properties and
//! an own `length`. The prototype methods are generic: they work on any
//! object through `[[Get]]`/`[[Put]]` of `length` and index names.

use otter_ecma_core::{
    Abrupt, CompletionValue, JsString, MagicStringId, ObjectRef, PropertyAttributes,
    PropertyDescriptor, Value,
};

use super::error::NativeErrorKind;
use super::{arg, object, unknown_property, unknown_routine};
use crate::engine::Engine;
use crate::id::BuiltinId;
use crate::lazy::BuiltinProperty;

use MagicStringId as M;

pub(crate) const CONSTRUCTOR_PROPERTIES: &[MagicStringId] = &[M::Length, M::Prototype, M::IsArray];

pub(crate) const PROTOTYPE_PROPERTIES: &[MagicStringId] = &[
    M::Length,
    M::Constructor,
    M::ToString,
    M::Join,
    M::Push,
    M::Pop,
];

pub(crate) fn instantiate_constructor(engine: &Engine, name: MagicStringId) -> BuiltinProperty {
    match name {
        M::Length => BuiltinProperty::constant(Value::number(1.0)),
        M::Prototype => BuiltinProperty::frozen_builtin(engine, BuiltinId::ArrayPrototype),
        M::IsArray => BuiltinProperty::routine(1),
        other => unknown_property(BuiltinId::Array, other),
    }
}

pub(crate) fn instantiate_prototype(engine: &Engine, name: MagicStringId) -> BuiltinProperty {
    match name {
        M::Length => BuiltinProperty::Data {
            value: Value::number(0.0),
            attributes: PropertyAttributes::new(true, false, false),
        },
        M::Constructor => BuiltinProperty::builtin(engine, BuiltinId::Array),
        M::ToString | M::Pop => BuiltinProperty::routine(0),
        M::Join | M::Push => BuiltinProperty::routine(1),
        other => unknown_property(BuiltinId::ArrayPrototype, other),
    }
}

/// `Array(...items)` behaves like `new Array(...items)`
pub(crate) fn call(engine: &Engine, args: &[Value]) -> CompletionValue {
    construct(engine, args)
}

pub(crate) fn construct(engine: &Engine, args: &[Value]) -> CompletionValue {
    let [Value::Number(len)] = args else {
        return Ok(Value::object(engine.new_array(args.iter().cloned())));
    };

    let length = otter_ecma_core::number::to_uint32(*len);
    if f64::from(length) != *len {
        return Err(engine.throw_error(NativeErrorKind::Range, "Invalid array length"));
    }

    let array = engine.new_array([]);
    array.create_property(
        JsString::magic(M::Length),
        PropertyDescriptor::data_with_attrs(
            Value::number(*len),
            PropertyAttributes::new(true, false, false),
        ),
    );
    Ok(Value::object(array))
}

pub(crate) fn dispatch_constructor_routine(
    _engine: &Engine,
    routine: MagicStringId,
    args: &[Value],
) -> CompletionValue {
    match routine {
        M::IsArray => Ok(Value::boolean(
            arg(args, 0)
                .as_object()
                .is_some_and(|object| object.class() == M::Array),
        )),
        other => unknown_routine(BuiltinId::Array, other),
    }
}

pub(crate) fn dispatch_prototype_routine(
    engine: &Engine,
    routine: MagicStringId,
    this: &Value,
    args: &[Value],
) -> CompletionValue {
    let object = engine.to_object(this)?;

    match routine {
        M::ToString => {
            let join = engine.get_magic(&object, M::Join)?;
            if join.is_callable() {
                engine.call(&join, &Value::object(object), &[])
            } else {
                object::to_string(engine, &Value::object(object))
            }
        }
        M::Join => join(engine, &object, arg(args, 0)),
        M::Push => {
            let mut length = length_of(engine, &object)?;
            for item in args {
                engine.put(&object, &index_name(length), item.clone(), true)?;
                length += 1.0;
            }
            engine.put(&object, &JsString::magic(M::Length), Value::number(length), true)?;
            Ok(Value::number(length))
        }
        M::Pop => {
            let length = length_of(engine, &object)?;
            let length_name = JsString::magic(M::Length);
            if length == 0.0 {
                engine.put(&object, &length_name, Value::number(0.0), true)?;
                return Ok(Value::undefined());
            }

            let last = length - 1.0;
            let name = index_name(last);
            let element = engine.get(&object, &name)?;
            if !object.delete(&name) {
                return Err(engine.throw_error(
                    NativeErrorKind::Type,
                    &format!("Cannot delete property '{name}'"),
                ));
            }
            engine.put(&object, &length_name, Value::number(last), true)?;
            Ok(element)
        }
        other => unknown_routine(BuiltinId::ArrayPrototype, other),
    }
}

fn join(engine: &Engine, object: &ObjectRef, separator: &Value) -> CompletionValue {
    let length = length_of(engine, object)?;
    let separator = if separator.is_undefined() {
        JsString::new(",")
    } else {
        engine.to_string(separator)?
    };

    let mut out = String::new();
    let mut index = 0.0;
    while index < length {
        if index > 0.0 {
            out.push_str(separator.as_str());
        }
        let element = engine.get(object, &index_name(index))?;
        if !element.is_nullish() {
            out.push_str(engine.to_string(&element)?.as_str());
        }
        index += 1.0;
    }
    Ok(Value::string(out))
}

fn length_of(engine: &Engine, object: &ObjectRef) -> Result<f64, Abrupt> {
    let length = engine.get_magic(object, M::Length)?;
    Ok(f64::from(engine.to_uint32(&length)?))
}

fn index_name(index: f64) -> JsString {
    JsString::new(&otter_ecma_core::number::number_to_string(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BuiltinProfile, EngineConfig};

    fn engine() -> Engine {
        Engine::new(EngineConfig::with_profile(BuiltinProfile::Full))
    }

    fn n(v: f64) -> Value {
        Value::number(v)
    }

    #[test]
    fn test_construct_from_items_and_length() {
        let e = engine();
        let items = construct(&e, &[n(1.0), n(2.0), n(3.0)]).unwrap();
        let items = items.as_object().unwrap();
        assert_eq!(e.get_magic(items, M::Length).unwrap(), n(3.0));

        let sized = call(&e, &[n(5.0)]).unwrap();
        let sized = sized.as_object().unwrap();
        assert_eq!(e.get_magic(sized, M::Length).unwrap(), n(5.0));
        assert!(e.get(sized, &JsString::new("0")).unwrap().is_undefined());

        assert!(construct(&e, &[n(-1.0)]).is_err());
        assert!(construct(&e, &[n(1.5)]).is_err());
    }

    #[test]
    fn test_is_array() {
        let e = engine();
        let array = Value::object(e.new_array([]));
        let object = Value::object(e.new_object());
        assert_eq!(dispatch_constructor_routine(&e, M::IsArray, &[array]).unwrap(), Value::boolean(true));
        assert_eq!(dispatch_constructor_routine(&e, M::IsArray, &[object]).unwrap(), Value::boolean(false));
        assert_eq!(dispatch_constructor_routine(&e, M::IsArray, &[]).unwrap(), Value::boolean(false));
    }

    #[test]
    fn test_join_and_to_string() {
        let e = engine();
        let array = Value::object(e.new_array([n(1.0), Value::null(), Value::string("x")]));
        let joined = dispatch_prototype_routine(&e, M::Join, &array, &[Value::string("-")]).unwrap();
        assert_eq!(joined, Value::string("1--x"));
        let text = dispatch_prototype_routine(&e, M::ToString, &array, &[]).unwrap();
        assert_eq!(text, Value::string("1,,x"));
    }

    #[test]
    fn test_push_pop() {
        let e = engine();
        let array = e.new_array([n(1.0)]);
        let this = Value::object(array.clone());

        let length = dispatch_prototype_routine(&e, M::Push, &this, &[n(2.0), n(3.0)]).unwrap();
        assert_eq!(length, n(3.0));
        assert_eq!(dispatch_prototype_routine(&e, M::Pop, &this, &[]).unwrap(), n(3.0));
        assert_eq!(e.get_magic(&array, M::Length).unwrap(), n(2.0));
        assert!(!array.has_own_property(&JsString::new("2")));

        let empty = Value::object(e.new_array([]));
        assert!(dispatch_prototype_routine(&e, M::Pop, &empty, &[]).unwrap().is_undefined());
    }

    #[test]
    fn test_push_is_generic() {
        let e = engine();
        let object = e.new_object();
        let this = Value::object(object.clone());
        dispatch_prototype_routine(&e, M::Push, &this, &[Value::string("a")]).unwrap();
        assert_eq!(e.get_magic(&object, M::Length).unwrap(), n(1.0));
        assert_eq!(e.get(&object, &JsString::new("0")).unwrap(), Value::string("a"));
    }
}
