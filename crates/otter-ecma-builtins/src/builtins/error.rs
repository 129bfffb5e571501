//! `Error` and the native error types (ES5 §15.11)

use otter_ecma_core::{CompletionValue, JsString, MagicStringId, Value};

use super::{arg, unknown_property, unknown_routine};
use crate::engine::Engine;
use crate::id::BuiltinId;
use crate::lazy::BuiltinProperty;

use MagicStringId as M;

/// Kind of error object, one per error constructor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NativeErrorKind {
    /// `Error`
    Error,
    /// `EvalError`
    Eval,
    /// `RangeError`
    Range,
    /// `ReferenceError`
    Reference,
    /// `SyntaxError`
    Syntax,
    /// `TypeError`
    Type,
    /// `URIError`
    Uri,
}

impl NativeErrorKind {
    /// Every kind
    pub const ALL: [NativeErrorKind; 7] = [
        Self::Error,
        Self::Eval,
        Self::Range,
        Self::Reference,
        Self::Syntax,
        Self::Type,
        Self::Uri,
    ];

    /// Builtin id of the kind's constructor
    pub const fn constructor_id(self) -> BuiltinId {
        match self {
            Self::Error => BuiltinId::Error,
            Self::Eval => BuiltinId::EvalError,
            Self::Range => BuiltinId::RangeError,
            Self::Reference => BuiltinId::ReferenceError,
            Self::Syntax => BuiltinId::SyntaxError,
            Self::Type => BuiltinId::TypeError,
            Self::Uri => BuiltinId::UriError,
        }
    }

    /// Builtin id of the kind's prototype
    pub const fn prototype_id(self) -> BuiltinId {
        match self {
            Self::Error => BuiltinId::ErrorPrototype,
            Self::Eval => BuiltinId::EvalErrorPrototype,
            Self::Range => BuiltinId::RangeErrorPrototype,
            Self::Reference => BuiltinId::ReferenceErrorPrototype,
            Self::Syntax => BuiltinId::SyntaxErrorPrototype,
            Self::Type => BuiltinId::TypeErrorPrototype,
            Self::Uri => BuiltinId::UriErrorPrototype,
        }
    }

    /// Value of `name` on the kind's prototype
    pub const fn name(self) -> MagicStringId {
        match self {
            Self::Error => M::Error,
            Self::Eval => M::EvalError,
            Self::Range => M::RangeError,
            Self::Reference => M::ReferenceError,
            Self::Syntax => M::SyntaxError,
            Self::Type => M::TypeError,
            Self::Uri => M::UriError,
        }
    }

    fn of_constructor(id: BuiltinId) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.constructor_id() == id)
    }

    fn of_prototype(id: BuiltinId) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.prototype_id() == id)
    }
}

pub(crate) const CONSTRUCTOR_PROPERTIES: &[MagicStringId] = &[M::Length, M::Prototype];

pub(crate) const ERROR_PROTOTYPE_PROPERTIES: &[MagicStringId] =
    &[M::Constructor, M::Name, M::Message, M::ToString];

pub(crate) const NATIVE_ERROR_PROTOTYPE_PROPERTIES: &[MagicStringId] =
    &[M::Constructor, M::Name, M::Message];

pub(crate) fn instantiate_constructor(
    engine: &Engine,
    id: BuiltinId,
    name: MagicStringId,
) -> BuiltinProperty {
    let kind = NativeErrorKind::of_constructor(id)
        .unwrap_or_else(|| panic!("builtin {id} is not an error constructor"));
    match name {
        M::Length => BuiltinProperty::constant(Value::number(1.0)),
        M::Prototype => BuiltinProperty::frozen_builtin(engine, kind.prototype_id()),
        other => unknown_property(id, other),
    }
}

pub(crate) fn instantiate_prototype(
    engine: &Engine,
    id: BuiltinId,
    name: MagicStringId,
) -> BuiltinProperty {
    let kind = NativeErrorKind::of_prototype(id)
        .unwrap_or_else(|| panic!("builtin {id} is not an error prototype"));
    match name {
        M::Constructor => BuiltinProperty::builtin(engine, kind.constructor_id()),
        M::Name => BuiltinProperty::value(Value::magic(kind.name())),
        M::Message => BuiltinProperty::value(Value::magic(M::Empty)),
        M::ToString if kind == NativeErrorKind::Error => BuiltinProperty::routine(0),
        other => unknown_property(id, other),
    }
}

/// `Error(message)` behaves like `new Error(message)`
pub(crate) fn call(engine: &Engine, kind: NativeErrorKind, args: &[Value]) -> CompletionValue {
    construct(engine, kind, args)
}

pub(crate) fn construct(engine: &Engine, kind: NativeErrorKind, args: &[Value]) -> CompletionValue {
    let message = match arg(args, 0) {
        Value::Undefined => None,
        other => Some(engine.to_string(other)?),
    };
    let error = engine.new_error(kind, message.as_ref().map(JsString::as_str));
    Ok(Value::object(error))
}

pub(crate) fn dispatch_prototype_routine(
    engine: &Engine,
    routine: MagicStringId,
    this: &Value,
) -> CompletionValue {
    match routine {
        M::ToString => to_string(engine, this),
        other => unknown_routine(BuiltinId::ErrorPrototype, other),
    }
}

/// `Error.prototype.toString` (ES5 §15.11.4.4)
fn to_string(engine: &Engine, this: &Value) -> CompletionValue {
    let Value::Object(object) = this else {
        return Err(engine.throw_error(
            NativeErrorKind::Type,
            "Error.prototype.toString called on non-object",
        ));
    };

    let name = match engine.get_magic(object, M::Name)? {
        Value::Undefined => JsString::magic(M::Error),
        other => engine.to_string(&other)?,
    };
    let message = match engine.get_magic(object, M::Message)? {
        Value::Undefined => JsString::magic(M::Empty),
        other => engine.to_string(&other)?,
    };

    Ok(match (name.is_empty(), message.is_empty()) {
        (true, _) => Value::String(message),
        (false, true) => Value::String(name),
        (false, false) => Value::string(format!("{name}: {message}")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BuiltinProfile, EngineConfig};
    use otter_ecma_core::ObjectRef;

    fn engine() -> Engine {
        Engine::new(EngineConfig::with_profile(BuiltinProfile::Full))
    }

    #[test]
    fn test_kind_ids_are_consistent() {
        for kind in NativeErrorKind::ALL {
            assert_eq!(NativeErrorKind::of_constructor(kind.constructor_id()), Some(kind));
            assert_eq!(NativeErrorKind::of_prototype(kind.prototype_id()), Some(kind));
        }
    }

    #[test]
    fn test_construct_sets_prototype_and_message() {
        let e = engine();
        for kind in NativeErrorKind::ALL {
            let error = construct(&e, kind, &[Value::string("boom")]).unwrap();
            let error = error.as_object().unwrap();
            assert!(ObjectRef::ptr_eq(
                error.prototype().unwrap(),
                &e.registry().get(kind.prototype_id())
            ));
            assert_eq!(e.get_magic(error, M::Message).unwrap(), Value::string("boom"));
            assert_eq!(e.get_magic(error, M::Name).unwrap(), Value::magic(kind.name()));
        }
    }

    #[test]
    fn test_missing_message_is_inherited() {
        let e = engine();
        let error = call(&e, NativeErrorKind::Type, &[]).unwrap();
        let error = error.as_object().unwrap();
        assert!(!error.has_own_property(&JsString::magic(M::Message)));
        assert_eq!(e.get_magic(error, M::Message).unwrap(), Value::string(""));
    }

    #[test]
    fn test_to_string() {
        let e = engine();
        let error = construct(&e, NativeErrorKind::Range, &[Value::string("bad")]).unwrap();
        let text = dispatch_prototype_routine(&e, M::ToString, &error).unwrap();
        assert_eq!(text, Value::string("RangeError: bad"));

        let bare = construct(&e, NativeErrorKind::Error, &[]).unwrap();
        let text = dispatch_prototype_routine(&e, M::ToString, &bare).unwrap();
        assert_eq!(text, Value::string("Error"));

        assert!(dispatch_prototype_routine(&e, M::ToString, &Value::number(1.0)).is_err());
    }

    #[test]
    fn test_native_prototypes_inherit_to_string() {
        let e = engine();
        let error = construct(&e, NativeErrorKind::Syntax, &[Value::string("x")]).unwrap();
        let to_string = e.get_magic(error.as_object().unwrap(), M::ToString).unwrap();
        let text = e.call(&to_string, &error, &[]).unwrap();
        assert_eq!(text, Value::string("SyntaxError: x"));
    }
}
