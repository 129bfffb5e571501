//! `[[Call]]` and `[[Construct]]` dispatch
//!
//! A builtin singleton is dispatched by its builtin id; a native routine
//! function by the `(owner, routine)` pair packed on it. Dispatch on an
//! object that cannot handle the request is an engine bug and panics; the
//! script-facing entry points ([`Engine::call`], [`Engine::construct`])
//! throw a TypeError before it gets that far.

use otter_ecma_core::{Abrupt, CompletionValue, ObjectKind, ObjectRef, Value};

use crate::builtins::{self, error::NativeErrorKind};
use crate::engine::Engine;
use crate::registry::builtin_id_of;
use crate::routine::routine_id_of;

impl Engine {
    /// Call `callee` with `this` and `args`
    pub fn call(&self, callee: &Value, this: &Value, args: &[Value]) -> CompletionValue {
        match callee {
            Value::Object(object) => self.call_object(object, this, args),
            other => Err(self.throw_error(
                NativeErrorKind::Type,
                &format!("{} is not a function", other.type_of()),
            )),
        }
    }

    pub(crate) fn call_object(
        &self,
        callee: &ObjectRef,
        this: &Value,
        args: &[Value],
    ) -> CompletionValue {
        if !callee.is_callable() || !callee.is_builtin() {
            return Err(self.throw_error(NativeErrorKind::Type, "object is not a function"));
        }
        self.dispatch_call(callee, this, args)
    }

    /// `new callee(...args)`
    pub fn construct(&self, callee: &Value, args: &[Value]) -> CompletionValue {
        let constructible = callee
            .as_object()
            .filter(|object| object.is_builtin())
            .and_then(|object| builtin_id_of(object).map(|id| (object, id)))
            .filter(|(_, id)| id.descriptor().constructible);

        match constructible {
            Some((object, _)) => self.dispatch_construct(object, args),
            None => Err(self.throw_error(NativeErrorKind::Type, "not a constructor")),
        }
    }

    /// Run the native `[[Call]]` behavior of the builtin function `callee`.
    ///
    /// # Panics
    /// If `callee` is not a builtin function object.
    pub fn dispatch_call(&self, callee: &ObjectRef, this: &Value, args: &[Value]) -> CompletionValue {
        assert!(callee.is_builtin(), "[[Call]] dispatched to a non-builtin object");

        match callee.kind() {
            ObjectKind::BuiltinFunction => {
                let routine = routine_id_of(callee)
                    .unwrap_or_else(|| panic!("builtin routine {callee:?} has no routine id"));
                tracing::trace!(owner = %routine.owner, routine = %routine.routine, "dispatching routine");
                builtins::dispatch_routine(self, routine.owner, routine.routine, this, args)
            }
            ObjectKind::Function => {
                let id = builtin_id_of(callee)
                    .unwrap_or_else(|| panic!("builtin function {callee:?} has no builtin id"));
                debug_assert!(self.registry().is(callee, id));
                builtins::dispatch_call(self, id, this, args)
            }
            ObjectKind::Ordinary => panic!("[[Call]] dispatched to non-callable {callee:?}"),
        }
    }

    /// Run the native `[[Construct]]` behavior of the builtin `callee`.
    ///
    /// # Panics
    /// If `callee` is not a builtin constructor.
    pub fn dispatch_construct(&self, callee: &ObjectRef, args: &[Value]) -> CompletionValue {
        assert!(callee.is_builtin(), "[[Construct]] dispatched to a non-builtin object");
        assert!(
            callee.kind() == ObjectKind::Function,
            "[[Construct]] dispatched to {callee:?}"
        );

        let id = builtin_id_of(callee)
            .unwrap_or_else(|| panic!("builtin function {callee:?} has no builtin id"));
        debug_assert!(self.registry().is(callee, id));
        builtins::dispatch_construct(self, id, args)
    }

    /// Throw completion for a value that is not callable
    pub(crate) fn not_callable(&self, what: &str) -> Abrupt {
        self.throw_error(NativeErrorKind::Type, &format!("{what} is not a function"))
    }
}
