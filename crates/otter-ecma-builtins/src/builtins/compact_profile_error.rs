//! `CompactProfileError`
//!
//! A function object that throws itself when called or constructed. The
//! compact profile installs it as getter and setter of Global properties
//! whose builtins the profile leaves out.

use otter_ecma_core::{CompletionValue, MagicStringId, Value};

use super::unknown_property;
use crate::engine::Engine;
use crate::id::BuiltinId;
use crate::lazy::BuiltinProperty;

pub(crate) const PROPERTIES: &[MagicStringId] = &[MagicStringId::Length];

pub(crate) fn instantiate(_engine: &Engine, name: MagicStringId) -> BuiltinProperty {
    match name {
        MagicStringId::Length => BuiltinProperty::constant(Value::number(0.0)),
        other => unknown_property(BuiltinId::CompactProfileError, other),
    }
}

pub(crate) fn call(engine: &Engine, _this: &Value, _args: &[Value]) -> CompletionValue {
    Err(engine.throw_compact_profile_error())
}

pub(crate) fn construct(engine: &Engine, _args: &[Value]) -> CompletionValue {
    Err(engine.throw_compact_profile_error())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BuiltinProfile, EngineConfig};

    #[test]
    fn test_throws_itself() {
        let engine = Engine::new(EngineConfig::with_profile(BuiltinProfile::Compact));
        let thrower = engine.registry().get(BuiltinId::CompactProfileError);
        let callee = Value::object(thrower.clone());

        let thrown = engine.call(&callee, &Value::undefined(), &[]).unwrap_err();
        assert_eq!(thrown.value(), &callee);

        let thrown = engine.construct(&callee, &[]).unwrap_err();
        assert_eq!(thrown.into_value(), callee);
    }
}
