//! Builtin objects
//!
//! One module per builtin family. Each module declares the sorted property
//! table of its objects, how each table entry is materialized, and the
//! native bodies of its routines and constructors. The functions in this
//! module route a builtin id to its family; every match is exhaustive over
//! [`BuiltinId`].

pub mod array;
pub mod boolean;
pub mod compact_profile_error;
pub mod error;
pub mod function;
pub mod global;
pub mod math;
pub mod number;
pub mod object;
pub mod string;

use otter_ecma_core::{CompletionValue, MagicStringId, Value};

use crate::config::BuiltinProfile;
use crate::engine::Engine;
use crate::id::BuiltinId;
use crate::lazy::BuiltinProperty;

use self::error::NativeErrorKind;

static UNDEFINED: Value = Value::Undefined;

/// Argument `index`, or `undefined` if it was not passed
#[inline]
pub(crate) fn arg(args: &[Value], index: usize) -> &Value {
    args.get(index).unwrap_or(&UNDEFINED)
}

/// Sorted property table of builtin `id` under `profile`
pub(crate) fn property_names(id: BuiltinId, profile: BuiltinProfile) -> &'static [MagicStringId] {
    use BuiltinId as B;

    match id {
        B::Global => global::property_names(profile),
        B::ObjectPrototype => object::PROTOTYPE_PROPERTIES,
        B::Object => object::CONSTRUCTOR_PROPERTIES,
        B::FunctionPrototype => function::PROTOTYPE_PROPERTIES,
        B::Function => function::CONSTRUCTOR_PROPERTIES,
        B::ArrayPrototype => array::PROTOTYPE_PROPERTIES,
        B::Array => array::CONSTRUCTOR_PROPERTIES,
        B::StringPrototype => string::PROTOTYPE_PROPERTIES,
        B::String => string::CONSTRUCTOR_PROPERTIES,
        B::BooleanPrototype => boolean::PROTOTYPE_PROPERTIES,
        B::Boolean => boolean::CONSTRUCTOR_PROPERTIES,
        B::NumberPrototype => number::PROTOTYPE_PROPERTIES,
        B::Number => number::CONSTRUCTOR_PROPERTIES,
        B::Math => math::PROPERTIES,
        B::ErrorPrototype => error::ERROR_PROTOTYPE_PROPERTIES,
        B::EvalErrorPrototype
        | B::RangeErrorPrototype
        | B::ReferenceErrorPrototype
        | B::SyntaxErrorPrototype
        | B::TypeErrorPrototype
        | B::UriErrorPrototype => error::NATIVE_ERROR_PROTOTYPE_PROPERTIES,
        B::Error
        | B::EvalError
        | B::RangeError
        | B::ReferenceError
        | B::SyntaxError
        | B::TypeError
        | B::UriError => error::CONSTRUCTOR_PROPERTIES,
        B::CompactProfileError => compact_profile_error::PROPERTIES,
    }
}

/// Materialization of table entry `name` of builtin `id`.
///
/// # Panics
/// If `name` is not in the table of `id`.
pub(crate) fn instantiate_property(
    engine: &Engine,
    id: BuiltinId,
    name: MagicStringId,
) -> BuiltinProperty {
    use BuiltinId as B;

    match id {
        B::Global => global::instantiate(engine, name),
        B::ObjectPrototype => object::instantiate_prototype(engine, name),
        B::Object => object::instantiate_constructor(engine, name),
        B::FunctionPrototype => function::instantiate_prototype(engine, name),
        B::Function => function::instantiate_constructor(engine, name),
        B::ArrayPrototype => array::instantiate_prototype(engine, name),
        B::Array => array::instantiate_constructor(engine, name),
        B::StringPrototype => string::instantiate_prototype(engine, name),
        B::String => string::instantiate_constructor(engine, name),
        B::BooleanPrototype => boolean::instantiate_prototype(engine, name),
        B::Boolean => boolean::instantiate_constructor(engine, name),
        B::NumberPrototype => number::instantiate_prototype(engine, name),
        B::Number => number::instantiate_constructor(engine, name),
        B::Math => math::instantiate(name),
        B::ErrorPrototype
        | B::EvalErrorPrototype
        | B::RangeErrorPrototype
        | B::ReferenceErrorPrototype
        | B::SyntaxErrorPrototype
        | B::TypeErrorPrototype
        | B::UriErrorPrototype => error::instantiate_prototype(engine, id, name),
        B::Error
        | B::EvalError
        | B::RangeError
        | B::ReferenceError
        | B::SyntaxError
        | B::TypeError
        | B::UriError => error::instantiate_constructor(engine, id, name),
        B::CompactProfileError => compact_profile_error::instantiate(engine, name),
    }
}

/// Body of routine `routine` declared by builtin `owner`.
///
/// # Panics
/// If `owner` declares no such routine.
pub(crate) fn dispatch_routine(
    engine: &Engine,
    owner: BuiltinId,
    routine: MagicStringId,
    this: &Value,
    args: &[Value],
) -> CompletionValue {
    use BuiltinId as B;

    match owner {
        B::Global => global::dispatch_routine(engine, routine, args),
        B::ObjectPrototype => object::dispatch_prototype_routine(engine, routine, this, args),
        B::Object => object::dispatch_constructor_routine(engine, routine, args),
        B::FunctionPrototype => function::dispatch_prototype_routine(engine, routine, this, args),
        B::ArrayPrototype => array::dispatch_prototype_routine(engine, routine, this, args),
        B::Array => array::dispatch_constructor_routine(engine, routine, args),
        B::StringPrototype => string::dispatch_prototype_routine(engine, routine, this, args),
        B::String => string::dispatch_constructor_routine(engine, routine, args),
        B::BooleanPrototype => boolean::dispatch_prototype_routine(engine, routine, this),
        B::NumberPrototype => number::dispatch_prototype_routine(engine, routine, this, args),
        B::Math => math::dispatch_routine(engine, routine, args),
        B::ErrorPrototype => error::dispatch_prototype_routine(engine, routine, this),
        B::Function
        | B::Boolean
        | B::Number
        | B::EvalErrorPrototype
        | B::RangeErrorPrototype
        | B::ReferenceErrorPrototype
        | B::SyntaxErrorPrototype
        | B::TypeErrorPrototype
        | B::UriErrorPrototype
        | B::Error
        | B::EvalError
        | B::RangeError
        | B::ReferenceError
        | B::SyntaxError
        | B::TypeError
        | B::UriError
        | B::CompactProfileError => unknown_routine(owner, routine),
    }
}

/// `[[Call]]` of the builtin function `id`.
///
/// # Panics
/// If `id` is not callable.
pub(crate) fn dispatch_call(
    engine: &Engine,
    id: BuiltinId,
    this: &Value,
    args: &[Value],
) -> CompletionValue {
    use BuiltinId as B;

    match id {
        B::Object => object::call(engine, args),
        B::FunctionPrototype => Ok(Value::undefined()),
        B::Function => function::call(engine, args),
        B::Array => array::call(engine, args),
        B::String => string::call(engine, args),
        B::Boolean => boolean::call(engine, args),
        B::Number => number::call(engine, args),
        B::Error => error::call(engine, NativeErrorKind::Error, args),
        B::EvalError => error::call(engine, NativeErrorKind::Eval, args),
        B::RangeError => error::call(engine, NativeErrorKind::Range, args),
        B::ReferenceError => error::call(engine, NativeErrorKind::Reference, args),
        B::SyntaxError => error::call(engine, NativeErrorKind::Syntax, args),
        B::TypeError => error::call(engine, NativeErrorKind::Type, args),
        B::UriError => error::call(engine, NativeErrorKind::Uri, args),
        B::CompactProfileError => compact_profile_error::call(engine, this, args),
        B::Global
        | B::ObjectPrototype
        | B::ArrayPrototype
        | B::StringPrototype
        | B::BooleanPrototype
        | B::NumberPrototype
        | B::Math
        | B::ErrorPrototype
        | B::EvalErrorPrototype
        | B::RangeErrorPrototype
        | B::ReferenceErrorPrototype
        | B::SyntaxErrorPrototype
        | B::TypeErrorPrototype
        | B::UriErrorPrototype => panic!("builtin {id} has no [[Call]]"),
    }
}

/// `[[Construct]]` of the builtin constructor `id`.
///
/// # Panics
/// If `id` is not a constructor.
pub(crate) fn dispatch_construct(engine: &Engine, id: BuiltinId, args: &[Value]) -> CompletionValue {
    use BuiltinId as B;

    match id {
        B::Object => object::construct(engine, args),
        B::Function => function::construct(engine, args),
        B::Array => array::construct(engine, args),
        B::String => string::construct(engine, args),
        B::Boolean => boolean::construct(engine, args),
        B::Number => number::construct(engine, args),
        B::Error => error::construct(engine, NativeErrorKind::Error, args),
        B::EvalError => error::construct(engine, NativeErrorKind::Eval, args),
        B::RangeError => error::construct(engine, NativeErrorKind::Range, args),
        B::ReferenceError => error::construct(engine, NativeErrorKind::Reference, args),
        B::SyntaxError => error::construct(engine, NativeErrorKind::Syntax, args),
        B::TypeError => error::construct(engine, NativeErrorKind::Type, args),
        B::UriError => error::construct(engine, NativeErrorKind::Uri, args),
        B::CompactProfileError => compact_profile_error::construct(engine, args),
        B::Global
        | B::ObjectPrototype
        | B::FunctionPrototype
        | B::ArrayPrototype
        | B::StringPrototype
        | B::BooleanPrototype
        | B::NumberPrototype
        | B::Math
        | B::ErrorPrototype
        | B::EvalErrorPrototype
        | B::RangeErrorPrototype
        | B::ReferenceErrorPrototype
        | B::SyntaxErrorPrototype
        | B::TypeErrorPrototype
        | B::UriErrorPrototype => panic!("builtin {id} has no [[Construct]]"),
    }
}

/// Routine dispatch reached a name its owner never declared
pub(crate) fn unknown_routine(owner: BuiltinId, routine: MagicStringId) -> ! {
    panic!("builtin {owner} has no routine {routine}")
}

/// Table lookup reached a name the builtin never declared
pub(crate) fn unknown_property(owner: BuiltinId, name: MagicStringId) -> ! {
    panic!("builtin {owner} has no property {name}")
}
