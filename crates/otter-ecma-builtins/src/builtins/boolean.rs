//! `Boolean` and `Boolean.prototype` (ES5 §15.6)

use otter_ecma_core::{Abrupt, CompletionValue, MagicStringId, Value};

use super::error::NativeErrorKind;
use super::{arg, unknown_property, unknown_routine};
use crate::conversion::primitive_value_of;
use crate::engine::Engine;
use crate::id::BuiltinId;
use crate::lazy::BuiltinProperty;

use MagicStringId as M;

pub(crate) const CONSTRUCTOR_PROPERTIES: &[MagicStringId] = &[M::Length, M::Prototype];

pub(crate) const PROTOTYPE_PROPERTIES: &[MagicStringId] = &[M::Constructor, M::ToString, M::ValueOf];

pub(crate) fn instantiate_constructor(engine: &Engine, name: MagicStringId) -> BuiltinProperty {
    match name {
        M::Length => BuiltinProperty::constant(Value::number(1.0)),
        M::Prototype => BuiltinProperty::frozen_builtin(engine, BuiltinId::BooleanPrototype),
        other => unknown_property(BuiltinId::Boolean, other),
    }
}

pub(crate) fn instantiate_prototype(engine: &Engine, name: MagicStringId) -> BuiltinProperty {
    match name {
        M::Constructor => BuiltinProperty::builtin(engine, BuiltinId::Boolean),
        M::ToString | M::ValueOf => BuiltinProperty::routine(0),
        other => unknown_property(BuiltinId::BooleanPrototype, other),
    }
}

pub(crate) fn call(engine: &Engine, args: &[Value]) -> CompletionValue {
    Ok(Value::boolean(engine.to_boolean(arg(args, 0))))
}

pub(crate) fn construct(engine: &Engine, args: &[Value]) -> CompletionValue {
    let primitive = Value::boolean(engine.to_boolean(arg(args, 0)));
    Ok(Value::object(engine.new_wrapper(primitive)))
}

pub(crate) fn dispatch_prototype_routine(
    engine: &Engine,
    routine: MagicStringId,
    this: &Value,
) -> CompletionValue {
    let value = this_boolean_value(engine, this)?;
    match routine {
        M::ToString => Ok(Value::magic(if value { M::True } else { M::False })),
        M::ValueOf => Ok(Value::boolean(value)),
        other => unknown_routine(BuiltinId::BooleanPrototype, other),
    }
}

fn this_boolean_value(engine: &Engine, this: &Value) -> Result<bool, Abrupt> {
    let value = match this {
        Value::Object(object) if object.class() == M::Boolean => primitive_value_of(object),
        other => Some(other.clone()),
    };
    value.and_then(|v| v.as_boolean()).ok_or_else(|| {
        engine.throw_error(NativeErrorKind::Type, "Boolean.prototype method called on incompatible receiver")
    })
}
