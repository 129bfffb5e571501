//! Engine context
//!
//! [`Engine`] owns the configuration and the builtin registry. It is the
//! receiver of every builtin operation: property access with lazy
//! instantiation, `[[Call]]`/`[[Construct]]` dispatch, conversions and the
//! object factories routines use to build their results.

use otter_ecma_core::{
    Abrupt, InternalProperty, InternalValue, JsObject, JsString, MagicStringId, ObjectKind,
    ObjectRef, PropertyAttributes, PropertyDescriptor, Value,
};

use crate::builtins::error::NativeErrorKind;
use crate::config::{BuiltinProfile, EngineConfig};
use crate::id::BuiltinId;
use crate::registry::BuiltinRegistry;

/// Builtin subsystem of one engine instance
pub struct Engine {
    config: EngineConfig,
    registry: BuiltinRegistry,
}

impl Engine {
    /// Create an engine with an empty (not yet instantiated) registry
    pub fn new(config: EngineConfig) -> Self {
        tracing::debug!(profile = ?config.profile, "creating builtin engine");
        let registry = BuiltinRegistry::new();
        registry.init();
        Self { config, registry }
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Selected builtin profile
    pub fn profile(&self) -> BuiltinProfile {
        self.config.profile
    }

    /// Builtin registry
    pub fn registry(&self) -> &BuiltinRegistry {
        &self.registry
    }

    /// The Global object
    pub fn global(&self) -> ObjectRef {
        self.registry.get(BuiltinId::Global)
    }

    /// Release every builtin singleton.
    ///
    /// Outstanding references stay valid as plain, empty objects that no
    /// longer materialize builtin properties. The engine can keep being
    /// used; builtins are recreated on demand.
    pub fn teardown(&self) {
        self.registry.teardown();
        self.registry.init();
    }

    // ---------------------------------------------------------------------
    // Property access
    // ---------------------------------------------------------------------

    /// Own property `name` of `object`, materializing it first if it is a
    /// not yet instantiated builtin property.
    pub fn get_own_property(
        &self,
        object: &ObjectRef,
        name: &JsString,
    ) -> Option<PropertyDescriptor> {
        if let Some(desc) = object.find_own_property(name) {
            return Some(desc);
        }
        if object.is_builtin() {
            return self.try_instantiate_property(object, name);
        }
        None
    }

    /// Property `name` of `object` or of the first prototype that has it
    pub fn get_property(&self, object: &ObjectRef, name: &JsString) -> Option<PropertyDescriptor> {
        let mut current = object.clone();
        loop {
            if let Some(desc) = self.get_own_property(&current, name) {
                return Some(desc);
            }
            current = current.prototype()?.clone();
        }
    }

    /// `[[Get]]`: value of property `name`, running getters with `object` as
    /// `this`.
    pub fn get(&self, object: &ObjectRef, name: &JsString) -> Result<Value, Abrupt> {
        match self.get_property(object, name) {
            Some(PropertyDescriptor::Data { value, .. }) => Ok(value),
            Some(PropertyDescriptor::Accessor { get: Some(getter), .. }) => {
                self.call_object(&getter, &Value::object(object.clone()), &[])
            }
            Some(PropertyDescriptor::Accessor { get: None, .. }) | None => Ok(Value::undefined()),
        }
    }

    /// [`Engine::get`] for a magic-string name
    pub fn get_magic(&self, object: &ObjectRef, name: MagicStringId) -> Result<Value, Abrupt> {
        self.get(object, &JsString::magic(name))
    }

    /// `[[Get]]` on an arbitrary value: primitives are boxed first
    pub fn get_value(&self, base: &Value, name: &JsString) -> Result<Value, Abrupt> {
        let object = self.to_object(base)?;
        match self.get_property(&object, name) {
            Some(PropertyDescriptor::Data { value, .. }) => Ok(value),
            Some(PropertyDescriptor::Accessor { get: Some(getter), .. }) => {
                self.call_object(&getter, base, &[])
            }
            Some(PropertyDescriptor::Accessor { get: None, .. }) | None => Ok(Value::undefined()),
        }
    }

    /// `[[Put]]`: assign `value` to property `name`.
    ///
    /// A rejected assignment throws a TypeError when `throw` is set and is
    /// silently ignored otherwise.
    pub fn put(
        &self,
        object: &ObjectRef,
        name: &JsString,
        value: Value,
        throw: bool,
    ) -> Result<(), Abrupt> {
        let accepted = match self.get_property(object, name) {
            Some(PropertyDescriptor::Accessor { set: Some(setter), .. }) => {
                self.call_object(&setter, &Value::object(object.clone()), &[value])?;
                true
            }
            Some(PropertyDescriptor::Accessor { set: None, .. }) => false,
            Some(PropertyDescriptor::Data { attributes, .. }) if !attributes.writable => false,
            Some(PropertyDescriptor::Data { .. }) if object.has_own_property(name) => {
                object.set_own_value(name, value)
            }
            _ => object.define_property(name.clone(), PropertyDescriptor::data(value)),
        };

        if !accepted && throw {
            return Err(self.throw_error(
                NativeErrorKind::Type,
                &format!("Cannot assign to read only property '{}'", name),
            ));
        }
        Ok(())
    }

    /// Define (or overwrite) a plain data property, ignoring extensibility
    pub fn define_data(&self, object: &ObjectRef, name: &str, value: Value) {
        object.create_property(JsString::new(name), PropertyDescriptor::data(value));
    }

    // ---------------------------------------------------------------------
    // Object factories
    // ---------------------------------------------------------------------

    /// New `{}` inheriting from `Object.prototype`
    pub fn new_object(&self) -> ObjectRef {
        let object = JsObject::new(
            Some(self.registry.get(BuiltinId::ObjectPrototype)),
            ObjectKind::Ordinary,
        );
        object.set_internal(
            InternalProperty::Class,
            InternalValue::Magic(MagicStringId::Object),
        );
        object
    }

    /// New array holding `elements`
    pub fn new_array(&self, elements: impl IntoIterator<Item = Value>) -> ObjectRef {
        let array = JsObject::new(
            Some(self.registry.get(BuiltinId::ArrayPrototype)),
            ObjectKind::Ordinary,
        );
        array.set_internal(
            InternalProperty::Class,
            InternalValue::Magic(MagicStringId::Array),
        );

        let mut length = 0u32;
        for element in elements {
            array.create_property(
                JsString::new(&length.to_string()),
                PropertyDescriptor::data(element),
            );
            length += 1;
        }
        array.create_property(
            JsString::magic(MagicStringId::Length),
            PropertyDescriptor::data_with_attrs(
                Value::number(f64::from(length)),
                PropertyAttributes::new(true, false, false),
            ),
        );
        array
    }

    /// New String, Number or Boolean wrapper for `primitive`
    pub(crate) fn new_wrapper(&self, primitive: Value) -> ObjectRef {
        let (prototype, class) = match &primitive {
            Value::String(_) => (BuiltinId::StringPrototype, MagicStringId::String),
            Value::Number(_) => (BuiltinId::NumberPrototype, MagicStringId::Number),
            Value::Boolean(_) => (BuiltinId::BooleanPrototype, MagicStringId::Boolean),
            other => unreachable!("no wrapper object for {}", other.type_of()),
        };

        let wrapper = JsObject::new(Some(self.registry.get(prototype)), ObjectKind::Ordinary);
        wrapper.set_internal(InternalProperty::Class, InternalValue::Magic(class));
        if let Value::String(text) = &primitive {
            wrapper.create_property(
                JsString::magic(MagicStringId::Length),
                PropertyDescriptor::data_with_attrs(
                    Value::number(text.utf16_len() as f64),
                    PropertyAttributes::frozen(),
                ),
            );
        }
        wrapper.set_internal(
            InternalProperty::PrimitiveValue,
            InternalValue::Value(primitive),
        );
        wrapper
    }

    /// New error instance of `kind` with an optional own `message`
    pub fn new_error(&self, kind: NativeErrorKind, message: Option<&str>) -> ObjectRef {
        let error = JsObject::new(
            Some(self.registry.get(kind.prototype_id())),
            ObjectKind::Ordinary,
        );
        error.set_internal(
            InternalProperty::Class,
            InternalValue::Magic(MagicStringId::Error),
        );
        if let Some(message) = message {
            error.create_property(
                JsString::magic(MagicStringId::Message),
                PropertyDescriptor::data_with_attrs(
                    Value::string(message),
                    PropertyAttributes::builtin(),
                ),
            );
        }
        error
    }

    /// Throw completion carrying a new error of `kind`.
    ///
    /// Under the compact profile the Error hierarchy is not exposed to
    /// scripts, so the `CompactProfileError` object is thrown instead.
    pub fn throw_error(&self, kind: NativeErrorKind, message: &str) -> Abrupt {
        if self.config.is_compact() {
            return self.throw_compact_profile_error();
        }
        Abrupt::throw(self.new_error(kind, Some(message)))
    }

    /// Throw completion for a routine path this engine does not implement
    pub fn throw_unimplemented(&self, what: &str) -> Abrupt {
        tracing::debug!(routine = what, "unimplemented builtin path");
        self.throw_error(NativeErrorKind::Type, &format!("{what} is not supported"))
    }

    /// Throw completion carrying the `CompactProfileError` object
    pub fn throw_compact_profile_error(&self) -> Abrupt {
        Abrupt::throw(self.registry.get(BuiltinId::CompactProfileError))
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("instantiated", &self.registry.instantiated_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> Engine {
        Engine::new(EngineConfig::with_profile(BuiltinProfile::Full))
    }

    #[test]
    fn test_new_engine_instantiates_nothing() {
        let engine = full();
        assert_eq!(engine.registry().instantiated_count(), 0);
    }

    #[test]
    fn test_get_walks_prototype_chain() {
        let engine = full();
        let object = engine.new_object();
        let to_string = engine.get_magic(&object, MagicStringId::ToString).unwrap();
        assert!(to_string.is_callable());
        assert!(!object.has_own_property(&JsString::magic(MagicStringId::ToString)));
    }

    #[test]
    fn test_put_respects_read_only() {
        let engine = full();
        let math = engine.registry().get(BuiltinId::Math);
        let pi = JsString::magic(MagicStringId::Pi);

        engine.put(&math, &pi, Value::number(3.0), false).unwrap();
        assert_eq!(
            engine.get(&math, &pi).unwrap(),
            Value::number(std::f64::consts::PI)
        );

        let err = engine.put(&math, &pi, Value::number(3.0), true).unwrap_err();
        let thrown = err.value().as_object().unwrap().clone();
        assert!(ObjectRef::ptr_eq(
            thrown.prototype().unwrap(),
            &engine.registry().get(BuiltinId::TypeErrorPrototype)
        ));
    }

    #[test]
    fn test_put_creates_and_updates() {
        let engine = full();
        let object = engine.new_object();
        let name = JsString::new("answer");
        engine.put(&object, &name, Value::number(41.0), true).unwrap();
        engine.put(&object, &name, Value::number(42.0), true).unwrap();
        assert_eq!(engine.get(&object, &name).unwrap(), Value::number(42.0));
    }

    #[test]
    fn test_put_rejected_on_non_extensible() {
        let engine = full();
        let object = engine.new_object();
        object.prevent_extensions();
        let name = JsString::new("x");
        engine.put(&object, &name, Value::number(1.0), false).unwrap();
        assert!(!object.has_own_property(&name));
        assert!(engine.put(&object, &name, Value::number(1.0), true).is_err());
    }

    #[test]
    fn test_new_array_shape() {
        let engine = full();
        let array = engine.new_array([Value::number(1.0), Value::string("b")]);
        assert_eq!(array.class(), MagicStringId::Array);
        assert_eq!(
            engine.get_magic(&array, MagicStringId::Length).unwrap(),
            Value::number(2.0)
        );
        assert_eq!(
            engine.get(&array, &JsString::new("1")).unwrap(),
            Value::string("b")
        );
    }

    #[test]
    fn test_new_error_has_message() {
        let engine = full();
        let error = engine.new_error(NativeErrorKind::Range, Some("too big"));
        assert_eq!(error.class(), MagicStringId::Error);
        assert_eq!(
            engine.get_magic(&error, MagicStringId::Message).unwrap(),
            Value::string("too big")
        );
        assert_eq!(
            engine.get_magic(&error, MagicStringId::Name).unwrap(),
            Value::string("RangeError")
        );
    }

    #[test]
    fn test_compact_profile_throws_profile_error() {
        let engine = Engine::new(EngineConfig::with_profile(BuiltinProfile::Compact));
        let thrown = engine.throw_error(NativeErrorKind::Type, "ignored").into_value();
        assert!(engine.registry().is(
            thrown.as_object().unwrap(),
            BuiltinId::CompactProfileError
        ));
    }

    #[test]
    fn test_teardown_allows_reuse() {
        let engine = full();
        let before = engine.global();
        engine.teardown();
        let after = engine.global();
        assert!(!ObjectRef::ptr_eq(&before, &after));
        assert_eq!(before.property_count(), 0);

        let nan = JsString::magic(MagicStringId::NaN);
        assert!(engine.get_own_property(&before, &nan).is_none());
        assert!(engine.get(&before, &nan).unwrap().is_undefined());
        assert!(engine.get(&after, &nan).unwrap().is_nan());
    }
}
