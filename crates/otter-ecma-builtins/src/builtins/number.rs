//! `Number` and `Number.prototype` (ES5 §15.7)

use otter_ecma_core::number::number_to_radix_string;
use otter_ecma_core::{Abrupt, CompletionValue, MagicStringId, Value};

use super::error::NativeErrorKind;
use super::{arg, unknown_property, unknown_routine};
use crate::conversion::primitive_value_of;
use crate::engine::Engine;
use crate::id::BuiltinId;
use crate::lazy::BuiltinProperty;

use MagicStringId as M;

pub(crate) const CONSTRUCTOR_PROPERTIES: &[MagicStringId] = &[
    M::NaN,
    M::Length,
    M::Prototype,
    M::MaxValue,
    M::MinValue,
    M::NegativeInfinity,
    M::PositiveInfinity,
];

pub(crate) const PROTOTYPE_PROPERTIES: &[MagicStringId] = &[M::Constructor, M::ToString, M::ValueOf];

pub(crate) fn instantiate_constructor(engine: &Engine, name: MagicStringId) -> BuiltinProperty {
    let constant = |n: f64| BuiltinProperty::constant(Value::number(n));
    match name {
        M::NaN => constant(f64::NAN),
        M::Length => constant(1.0),
        M::Prototype => BuiltinProperty::frozen_builtin(engine, BuiltinId::NumberPrototype),
        M::MaxValue => constant(f64::MAX),
        // Smallest positive denormal
        M::MinValue => constant(f64::from_bits(1)),
        M::NegativeInfinity => constant(f64::NEG_INFINITY),
        M::PositiveInfinity => constant(f64::INFINITY),
        other => unknown_property(BuiltinId::Number, other),
    }
}

pub(crate) fn instantiate_prototype(engine: &Engine, name: MagicStringId) -> BuiltinProperty {
    match name {
        M::Constructor => BuiltinProperty::builtin(engine, BuiltinId::Number),
        M::ToString => BuiltinProperty::routine(1),
        M::ValueOf => BuiltinProperty::routine(0),
        other => unknown_property(BuiltinId::NumberPrototype, other),
    }
}

fn number_argument(engine: &Engine, args: &[Value]) -> Result<f64, Abrupt> {
    match args.first() {
        Some(value) => engine.to_number(value),
        None => Ok(0.0),
    }
}

pub(crate) fn call(engine: &Engine, args: &[Value]) -> CompletionValue {
    Ok(Value::number(number_argument(engine, args)?))
}

pub(crate) fn construct(engine: &Engine, args: &[Value]) -> CompletionValue {
    let primitive = Value::number(number_argument(engine, args)?);
    Ok(Value::object(engine.new_wrapper(primitive)))
}

pub(crate) fn dispatch_prototype_routine(
    engine: &Engine,
    routine: MagicStringId,
    this: &Value,
    args: &[Value],
) -> CompletionValue {
    let value = this_number_value(engine, this)?;
    match routine {
        M::ToString => {
            let radix = match arg(args, 0) {
                Value::Undefined => 10.0,
                other => engine.to_integer(other)?,
            };
            if !(2.0..=36.0).contains(&radix) {
                return Err(engine.throw_error(
                    NativeErrorKind::Range,
                    "toString() radix must be between 2 and 36",
                ));
            }
            Ok(Value::string(number_to_radix_string(value, radix as u32)))
        }
        M::ValueOf => Ok(Value::number(value)),
        other => unknown_routine(BuiltinId::NumberPrototype, other),
    }
}

fn this_number_value(engine: &Engine, this: &Value) -> Result<f64, Abrupt> {
    let value = match this {
        Value::Object(object) if object.class() == M::Number => primitive_value_of(object),
        other => Some(other.clone()),
    };
    value.and_then(|v| v.as_number()).ok_or_else(|| {
        engine.throw_error(
            NativeErrorKind::Type,
            "Number.prototype method called on incompatible receiver",
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BuiltinProfile, EngineConfig};

    fn engine() -> Engine {
        Engine::new(EngineConfig::with_profile(BuiltinProfile::Full))
    }

    #[test]
    fn test_call_and_construct() {
        let e = engine();
        assert_eq!(call(&e, &[]).unwrap(), Value::number(0.0));
        assert_eq!(call(&e, &[Value::string(" 0x10 ")]).unwrap(), Value::number(16.0));
        let wrapper = construct(&e, &[Value::boolean(true)]).unwrap();
        assert_eq!(
            dispatch_prototype_routine(&e, M::ValueOf, &wrapper, &[]).unwrap(),
            Value::number(1.0)
        );
    }

    #[test]
    fn test_to_string_radix() {
        let e = engine();
        let ts = |n: f64, radix: Value| {
            dispatch_prototype_routine(&e, M::ToString, &Value::number(n), &[radix])
        };
        assert_eq!(ts(255.0, Value::number(16.0)).unwrap(), Value::string("ff"));
        assert_eq!(ts(-5.0, Value::number(2.0)).unwrap(), Value::string("-101"));
        assert_eq!(ts(0.5, Value::undefined()).unwrap(), Value::string("0.5"));
        assert!(ts(1.0, Value::number(1.0)).is_err());
        assert!(ts(1.0, Value::number(37.0)).is_err());
    }

    #[test]
    fn test_constants() {
        let e = engine();
        match instantiate_constructor(&e, M::MinValue) {
            BuiltinProperty::Data { value, .. } => assert_eq!(value, Value::number(5e-324)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_incompatible_receiver() {
        let e = engine();
        let this = Value::string("1");
        assert!(dispatch_prototype_routine(&e, M::ValueOf, &this, &[]).is_err());
    }
}
