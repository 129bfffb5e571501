//! `String` and `String.prototype` (ES5 §15.5)

use otter_ecma_core::number::to_uint16;
use otter_ecma_core::{Abrupt, CompletionValue, JsString, MagicStringId, Value};

use super::error::NativeErrorKind;
use super::{arg, unknown_property, unknown_routine};
use crate::conversion::primitive_value_of;
use crate::engine::Engine;
use crate::id::BuiltinId;
use crate::lazy::BuiltinProperty;

use MagicStringId as M;

pub(crate) const CONSTRUCTOR_PROPERTIES: &[MagicStringId] =
    &[M::Length, M::Prototype, M::FromCharCode];

pub(crate) const PROTOTYPE_PROPERTIES: &[MagicStringId] = &[
    M::Length,
    M::Constructor,
    M::ToString,
    M::ValueOf,
    M::CharAt,
    M::CharCodeAt,
];

pub(crate) fn instantiate_constructor(engine: &Engine, name: MagicStringId) -> BuiltinProperty {
    match name {
        M::Length => BuiltinProperty::constant(Value::number(1.0)),
        M::Prototype => BuiltinProperty::frozen_builtin(engine, BuiltinId::StringPrototype),
        M::FromCharCode => BuiltinProperty::routine(1),
        other => unknown_property(BuiltinId::String, other),
    }
}

pub(crate) fn instantiate_prototype(engine: &Engine, name: MagicStringId) -> BuiltinProperty {
    match name {
        M::Length => BuiltinProperty::constant(Value::number(0.0)),
        M::Constructor => BuiltinProperty::builtin(engine, BuiltinId::String),
        M::ToString | M::ValueOf => BuiltinProperty::routine(0),
        M::CharAt | M::CharCodeAt => BuiltinProperty::routine(1),
        other => unknown_property(BuiltinId::StringPrototype, other),
    }
}

fn string_argument(engine: &Engine, args: &[Value]) -> Result<JsString, Abrupt> {
    match args.first() {
        Some(value) => engine.to_string(value),
        None => Ok(JsString::magic(M::Empty)),
    }
}

/// `String(value)`
pub(crate) fn call(engine: &Engine, args: &[Value]) -> CompletionValue {
    Ok(Value::String(string_argument(engine, args)?))
}

/// `new String(value)`
pub(crate) fn construct(engine: &Engine, args: &[Value]) -> CompletionValue {
    let primitive = string_argument(engine, args)?;
    Ok(Value::object(engine.new_wrapper(Value::String(primitive))))
}

pub(crate) fn dispatch_constructor_routine(
    engine: &Engine,
    routine: MagicStringId,
    args: &[Value],
) -> CompletionValue {
    match routine {
        M::FromCharCode => {
            let units = args
                .iter()
                .map(|value| engine.to_number(value).map(to_uint16))
                .collect::<Result<Vec<u16>, Abrupt>>()?;
            Ok(Value::String(JsString::from_utf16(&units)))
        }
        other => unknown_routine(BuiltinId::String, other),
    }
}

pub(crate) fn dispatch_prototype_routine(
    engine: &Engine,
    routine: MagicStringId,
    this: &Value,
    args: &[Value],
) -> CompletionValue {
    match routine {
        M::ToString | M::ValueOf => this_string_value(engine, this, routine),
        M::CharAt => {
            let unit = code_unit_at(engine, this, arg(args, 0))?;
            Ok(match unit {
                Some(unit) => Value::String(JsString::from_utf16(&[unit])),
                None => Value::magic(M::Empty),
            })
        }
        M::CharCodeAt => {
            let unit = code_unit_at(engine, this, arg(args, 0))?;
            Ok(Value::number(unit.map_or(f64::NAN, f64::from)))
        }
        other => unknown_routine(BuiltinId::StringPrototype, other),
    }
}

/// `this` as a string primitive for the non-generic `toString`/`valueOf`
fn this_string_value(engine: &Engine, this: &Value, routine: MagicStringId) -> CompletionValue {
    match this {
        Value::String(_) => Ok(this.clone()),
        Value::Object(object) if object.class() == M::String => primitive_value_of(object)
            .ok_or_else(|| {
                engine.throw_error(NativeErrorKind::Type, "String wrapper without a value")
            }),
        _ => Err(engine.throw_error(
            NativeErrorKind::Type,
            &format!("String.prototype.{routine} requires that 'this' be a String"),
        )),
    }
}

/// UTF-16 code unit of `this` at `position`, or `None` if out of range
fn code_unit_at(engine: &Engine, this: &Value, position: &Value) -> Result<Option<u16>, Abrupt> {
    if this.is_nullish() {
        return Err(engine.throw_error(
            NativeErrorKind::Type,
            "String.prototype method called on null or undefined",
        ));
    }
    let text = engine.to_string(this)?;
    let position = engine.to_integer(position)?;
    if position < 0.0 {
        return Ok(None);
    }
    Ok(text.to_utf16().get(position as usize).copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BuiltinProfile, EngineConfig};

    fn engine() -> Engine {
        Engine::new(EngineConfig::with_profile(BuiltinProfile::Full))
    }

    #[test]
    fn test_call_converts() {
        let e = engine();
        assert_eq!(call(&e, &[]).unwrap(), Value::string(""));
        assert_eq!(call(&e, &[Value::number(12.5)]).unwrap(), Value::string("12.5"));
        assert_eq!(call(&e, &[Value::undefined()]).unwrap(), Value::string("undefined"));
    }

    #[test]
    fn test_construct_wraps() {
        let e = engine();
        let wrapper = construct(&e, &[Value::string("héllo")]).unwrap();
        let wrapper = wrapper.as_object().unwrap();
        assert_eq!(wrapper.class(), M::String);
        assert_eq!(e.get_magic(wrapper, M::Length).unwrap(), Value::number(5.0));
        let value =
            dispatch_prototype_routine(&e, M::ValueOf, &Value::object(wrapper.clone()), &[]);
        assert_eq!(value.unwrap(), Value::string("héllo"));
    }

    #[test]
    fn test_from_char_code() {
        let e = engine();
        let args = [Value::number(72.0), Value::number(65641.0), Value::string("105")];
        let result = dispatch_constructor_routine(&e, M::FromCharCode, &args).unwrap();
        assert_eq!(result, Value::string("Hii"));
    }

    #[test]
    fn test_char_at_and_code() {
        let e = engine();
        let this = Value::string("abc");
        let at = |pos: f64| {
            dispatch_prototype_routine(&e, M::CharAt, &this, &[Value::number(pos)]).unwrap()
        };
        assert_eq!(at(1.0), Value::string("b"));
        assert_eq!(at(3.0), Value::string(""));
        assert_eq!(at(-1.0), Value::string(""));

        let code = dispatch_prototype_routine(&e, M::CharCodeAt, &this, &[]).unwrap();
        assert_eq!(code, Value::number(97.0));
        let code = dispatch_prototype_routine(&e, M::CharCodeAt, &this, &[Value::number(9.0)]);
        assert!(code.unwrap().is_nan());

        assert!(dispatch_prototype_routine(&e, M::CharAt, &Value::null(), &[]).is_err());
    }

    #[test]
    fn test_lone_surrogates_become_replacement_characters() {
        let e = engine();
        let emoji = Value::string("\u{1F600}");

        let code = dispatch_prototype_routine(&e, M::CharCodeAt, &emoji, &[]).unwrap();
        assert_eq!(code, Value::number(f64::from(0xD83Du16)));

        let high = dispatch_prototype_routine(&e, M::CharAt, &emoji, &[]).unwrap();
        assert_eq!(high, Value::string("\u{FFFD}"));
        let code = dispatch_prototype_routine(&e, M::CharCodeAt, &high, &[]).unwrap();
        assert_eq!(code, Value::number(f64::from(0xFFFDu16)));

        let lone = [Value::number(f64::from(0xD800u16))];
        let result = dispatch_constructor_routine(&e, M::FromCharCode, &lone).unwrap();
        assert_eq!(result, Value::string("\u{FFFD}"));

        // A complete pair survives.
        let pair = [
            Value::number(f64::from(0xD83Du16)),
            Value::number(f64::from(0xDE00u16)),
        ];
        let result = dispatch_constructor_routine(&e, M::FromCharCode, &pair).unwrap();
        assert_eq!(result, Value::string("\u{1F600}"));
    }

    #[test]
    fn test_to_string_is_not_generic() {
        let e = engine();
        let proto = Value::object(e.registry().get(BuiltinId::StringPrototype));
        assert_eq!(
            dispatch_prototype_routine(&e, M::ToString, &proto, &[]).unwrap(),
            Value::string("")
        );
        let object = Value::object(e.new_object());
        assert!(dispatch_prototype_routine(&e, M::ToString, &object, &[]).is_err());
    }
}
