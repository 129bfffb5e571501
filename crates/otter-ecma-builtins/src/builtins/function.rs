//! `Function` and `Function.prototype` (ES5 §15.3)

use otter_ecma_core::{Abrupt, CompletionValue, JsString, MagicStringId, Value};

use super::error::NativeErrorKind;
use super::{arg, unknown_property, unknown_routine};
use crate::engine::Engine;
use crate::id::BuiltinId;
use crate::lazy::BuiltinProperty;

use MagicStringId as M;

pub(crate) const CONSTRUCTOR_PROPERTIES: &[MagicStringId] = &[M::Length, M::Prototype];

pub(crate) const PROTOTYPE_PROPERTIES: &[MagicStringId] =
    &[M::Length, M::Constructor, M::ToString, M::Call, M::Apply];

pub(crate) fn instantiate_constructor(engine: &Engine, name: MagicStringId) -> BuiltinProperty {
    match name {
        M::Length => BuiltinProperty::constant(Value::number(1.0)),
        M::Prototype => BuiltinProperty::frozen_builtin(engine, BuiltinId::FunctionPrototype),
        other => unknown_property(BuiltinId::Function, other),
    }
}

pub(crate) fn instantiate_prototype(engine: &Engine, name: MagicStringId) -> BuiltinProperty {
    match name {
        M::Length => BuiltinProperty::constant(Value::number(0.0)),
        M::Constructor => BuiltinProperty::builtin(engine, BuiltinId::Function),
        M::ToString => BuiltinProperty::routine(0),
        M::Call => BuiltinProperty::routine(1),
        M::Apply => BuiltinProperty::routine(2),
        other => unknown_property(BuiltinId::FunctionPrototype, other),
    }
}

/// `Function(...)` compiles source text and needs a parser.
pub(crate) fn call(engine: &Engine, args: &[Value]) -> CompletionValue {
    construct(engine, args)
}

pub(crate) fn construct(engine: &Engine, _args: &[Value]) -> CompletionValue {
    Err(engine.throw_unimplemented("Function constructor"))
}

pub(crate) fn dispatch_prototype_routine(
    engine: &Engine,
    routine: MagicStringId,
    this: &Value,
    args: &[Value],
) -> CompletionValue {
    if !this.is_callable() {
        return Err(engine.throw_error(
            NativeErrorKind::Type,
            &format!("Function.prototype.{routine} called on incompatible receiver"),
        ));
    }

    match routine {
        M::ToString => Ok(Value::string("function () { [native code] }")),
        M::Call => {
            let rest = args.get(1..).unwrap_or_default();
            engine.call(this, arg(args, 0), rest)
        }
        M::Apply => {
            let call_args = list_from_array_like(engine, arg(args, 1))?;
            engine.call(this, arg(args, 0), &call_args)
        }
        other => unknown_routine(BuiltinId::FunctionPrototype, other),
    }
}

/// CreateListFromArrayLike as used by `apply`
fn list_from_array_like(engine: &Engine, value: &Value) -> Result<Vec<Value>, Abrupt> {
    let object = match value {
        Value::Undefined | Value::Null => return Ok(Vec::new()),
        Value::Object(object) => object,
        _ => {
            return Err(engine.throw_error(
                NativeErrorKind::Type,
                "CreateListFromArrayLike called on non-object",
            ));
        }
    };

    let length = engine.to_uint32(&engine.get_magic(object, M::Length)?)?;
    (0..length)
        .map(|index| engine.get(object, &JsString::new(&index.to_string())))
        .collect()
}
