//! JavaScript objects
//!
//! Objects keep their own named properties in insertion order and a small
//! set of internal properties that script code can never observe. Handles
//! are reference counted: cloning an [`ObjectRef`] takes one more owning
//! reference, dropping it releases one.

use indexmap::IndexMap;
use parking_lot::RwLock;
use rustc_hash::{FxBuildHasher, FxHashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use crate::magic::MagicStringId;
use crate::string::JsString;
use crate::value::Value;

/// Property attributes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PropertyAttributes {
    /// Property is writable (ignored for accessors)
    pub writable: bool,
    /// Property is enumerable
    pub enumerable: bool,
    /// Property is configurable
    pub configurable: bool,
}

impl PropertyAttributes {
    /// Explicit attributes
    pub const fn new(writable: bool, enumerable: bool, configurable: bool) -> Self {
        Self {
            writable,
            enumerable,
            configurable,
        }
    }

    /// Default data property attributes
    pub const fn data() -> Self {
        Self::new(true, true, true)
    }

    /// Writable, non-enumerable, configurable (builtin methods and namespaces)
    pub const fn builtin() -> Self {
        Self::new(true, false, true)
    }

    /// Non-writable, non-enumerable, non-configurable
    pub const fn frozen() -> Self {
        Self::new(false, false, false)
    }
}

/// Property descriptor
#[derive(Clone, Debug)]
pub enum PropertyDescriptor {
    /// Data property
    Data {
        /// The value
        value: Value,
        /// Attributes
        attributes: PropertyAttributes,
    },
    /// Accessor property
    Accessor {
        /// Getter function
        get: Option<ObjectRef>,
        /// Setter function
        set: Option<ObjectRef>,
        /// Attributes
        attributes: PropertyAttributes,
    },
}

impl PropertyDescriptor {
    /// Create a data property with default attributes
    pub fn data(value: Value) -> Self {
        Self::Data {
            value,
            attributes: PropertyAttributes::data(),
        }
    }

    /// Create a data property with specific attributes
    pub fn data_with_attrs(value: Value, attributes: PropertyAttributes) -> Self {
        Self::Data { value, attributes }
    }

    /// Get the value (for data properties)
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Data { value, .. } => Some(value),
            Self::Accessor { .. } => None,
        }
    }

    /// Get the attributes
    pub fn attributes(&self) -> PropertyAttributes {
        match self {
            Self::Data { attributes, .. } | Self::Accessor { attributes, .. } => *attributes,
        }
    }

    /// Check if this is an accessor property
    pub fn is_accessor(&self) -> bool {
        matches!(self, Self::Accessor { .. })
    }

    /// Check if writable
    pub fn is_writable(&self) -> bool {
        match self {
            Self::Data { attributes, .. } => attributes.writable,
            Self::Accessor { .. } => false,
        }
    }

    /// Check if enumerable
    pub fn is_enumerable(&self) -> bool {
        self.attributes().enumerable
    }

    /// Check if configurable
    pub fn is_configurable(&self) -> bool {
        self.attributes().configurable
    }
}

/// Shape of an object as far as `[[Call]]` is concerned
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectKind {
    /// Plain object
    Ordinary,
    /// Function object dispatched by its builtin id
    Function,
    /// Native routine function object, dispatched by its packed routine id
    BuiltinFunction,
}

/// Internal property identifiers (never visible to script code)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InternalProperty {
    /// `[[Class]]`
    Class,
    /// Builtin id of a builtin singleton
    BuiltinId,
    /// Packed (owner, routine) id of a native routine function
    BuiltinRoutineId,
    /// Lazy-instantiation bitmask of table properties 0..=31
    NonInstantiatedMask,
    /// `[[PrimitiveValue]]` of wrapper objects
    PrimitiveValue,
}

/// Payload of an internal property
#[derive(Clone, Debug, PartialEq)]
pub enum InternalValue {
    /// Raw integer payload
    Integer(u32),
    /// Magic string payload
    Magic(MagicStringId),
    /// Language value payload
    Value(Value),
}

impl InternalValue {
    /// Integer payload, if any
    pub fn as_integer(&self) -> Option<u32> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Magic payload, if any
    pub fn as_magic(&self) -> Option<MagicStringId> {
        match self {
            Self::Magic(id) => Some(*id),
            _ => None,
        }
    }

    /// Value payload, if any
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }
}

type PropertyMap = IndexMap<JsString, PropertyDescriptor, FxBuildHasher>;

/// Internal property storage, handed out by [`JsObject::update_internal`]
pub type InternalMap = FxHashMap<InternalProperty, InternalValue>;

/// A JavaScript object
///
/// Thread-safe with interior mutability.
pub struct JsObject {
    /// Prototype (None for Object.prototype)
    prototype: Option<ObjectRef>,
    /// Call shape
    kind: ObjectKind,
    /// Set once for builtin singletons and native routines
    builtin: AtomicBool,
    /// Is extensible
    extensible: AtomicBool,
    /// Own named properties, in creation order
    properties: RwLock<PropertyMap>,
    /// Internal properties
    internal: RwLock<InternalMap>,
}

impl JsObject {
    /// Create a new empty object
    pub fn new(prototype: Option<ObjectRef>, kind: ObjectKind) -> ObjectRef {
        ObjectRef(Arc::new(Self {
            prototype,
            kind,
            builtin: AtomicBool::new(false),
            extensible: AtomicBool::new(true),
            properties: RwLock::new(PropertyMap::default()),
            internal: RwLock::new(InternalMap::default()),
        }))
    }

    /// Get prototype
    pub fn prototype(&self) -> Option<&ObjectRef> {
        self.prototype.as_ref()
    }

    /// Call shape of the object
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// Check if the object implements `[[Call]]`
    pub fn is_callable(&self) -> bool {
        matches!(self.kind, ObjectKind::Function | ObjectKind::BuiltinFunction)
    }

    /// Check if the object is a builtin (lazy properties may be pending)
    pub fn is_builtin(&self) -> bool {
        self.builtin.load(Ordering::Acquire)
    }

    /// Mark the object as a builtin
    pub fn set_builtin(&self, builtin: bool) {
        self.builtin.store(builtin, Ordering::Release);
    }

    /// Check if new properties may be added
    pub fn is_extensible(&self) -> bool {
        self.extensible.load(Ordering::Acquire)
    }

    /// Forbid adding new properties
    pub fn prevent_extensions(&self) {
        self.extensible.store(false, Ordering::Release);
    }

    /// `[[Class]]` of the object
    pub fn class(&self) -> MagicStringId {
        self.internal(InternalProperty::Class)
            .and_then(|v| v.as_magic())
            .unwrap_or(if self.is_callable() {
                MagicStringId::Function
            } else {
                MagicStringId::Object
            })
    }

    // ------------------------------------------------------------------
    // Named properties
    // ------------------------------------------------------------------

    /// Find an own property that already exists on the object
    pub fn find_own_property(&self, name: &JsString) -> Option<PropertyDescriptor> {
        self.properties.read().get(name).cloned()
    }

    /// Check if an own property already exists on the object
    pub fn has_own_property(&self, name: &JsString) -> bool {
        self.properties.read().contains_key(name)
    }

    /// Create (or replace) an own property regardless of extensibility
    pub fn create_property(&self, name: JsString, desc: PropertyDescriptor) {
        self.properties.write().insert(name, desc);
    }

    /// Define an own property, failing on non-extensible objects
    pub fn define_property(&self, name: JsString, desc: PropertyDescriptor) -> bool {
        let mut props = self.properties.write();
        if !props.contains_key(&name) && !self.is_extensible() {
            return false;
        }
        props.insert(name, desc);
        true
    }

    /// Overwrite the value of an existing writable own data property
    pub fn set_own_value(&self, name: &JsString, value: Value) -> bool {
        let mut props = self.properties.write();
        match props.get_mut(name) {
            Some(PropertyDescriptor::Data {
                value: slot,
                attributes,
            }) if attributes.writable => {
                *slot = value;
                true
            }
            _ => false,
        }
    }

    /// Delete an own property; fails for non-configurable properties
    pub fn delete(&self, name: &JsString) -> bool {
        let mut props = self.properties.write();
        match props.get(name) {
            Some(desc) if !desc.is_configurable() => false,
            Some(_) => {
                props.shift_remove(name);
                true
            }
            None => true,
        }
    }

    /// Own property names, in creation order
    pub fn own_keys(&self) -> Vec<JsString> {
        self.properties.read().keys().cloned().collect()
    }

    /// Number of own properties that currently exist
    pub fn property_count(&self) -> usize {
        self.properties.read().len()
    }

    /// Drop every own property
    pub fn clear_properties(&self) {
        let drained = std::mem::take(&mut *self.properties.write());
        drop(drained);
    }

    // ------------------------------------------------------------------
    // Internal properties
    // ------------------------------------------------------------------

    /// Read an internal property
    pub fn internal(&self, prop: InternalProperty) -> Option<InternalValue> {
        self.internal.read().get(&prop).cloned()
    }

    /// Write an internal property
    pub fn set_internal(&self, prop: InternalProperty, value: InternalValue) {
        self.internal.write().insert(prop, value);
    }

    /// Run `f` with exclusive access to the internal properties
    pub fn update_internal<R>(&self, f: impl FnOnce(&mut InternalMap) -> R) -> R {
        f(&mut self.internal.write())
    }
}

impl std::fmt::Debug for JsObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsObject")
            .field("class", &self.class())
            .field("kind", &self.kind)
            .field("builtin", &self.is_builtin())
            .field("properties", &self.property_count())
            .finish()
    }
}

/// Owning, reference-counted handle to an object
///
/// Equality is object identity.
#[derive(Clone)]
pub struct ObjectRef(Arc<JsObject>);

impl ObjectRef {
    /// Check if two handles refer to the same object
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    /// Number of owning references currently alive
    pub fn strong_count(this: &Self) -> usize {
        Arc::strong_count(&this.0)
    }

    /// Non-owning handle
    pub fn downgrade(this: &Self) -> WeakObjectRef {
        WeakObjectRef(Arc::downgrade(&this.0))
    }

    /// Address of the object, for diagnostics
    pub fn as_ptr(&self) -> *const JsObject {
        Arc::as_ptr(&self.0)
    }
}

impl std::ops::Deref for ObjectRef {
    type Target = JsObject;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other)
    }
}

impl Eq for ObjectRef {}

impl std::fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[object {}]@{:p}", self.class(), self.as_ptr())
    }
}

/// Non-owning handle to an object
#[derive(Clone, Debug)]
pub struct WeakObjectRef(Weak<JsObject>);

impl WeakObjectRef {
    /// Take an owning reference if the object is still alive
    pub fn upgrade(&self) -> Option<ObjectRef> {
        self.0.upgrade().map(ObjectRef)
    }

    /// Check if the object is still alive
    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> JsString {
        JsString::new(s)
    }

    #[test]
    fn test_object_define_find() {
        let obj = JsObject::new(None, ObjectKind::Ordinary);
        assert!(obj.define_property(name("foo"), PropertyDescriptor::data(Value::number(42.0))));
        let desc = obj.find_own_property(&name("foo")).unwrap();
        assert_eq!(desc.value(), Some(&Value::number(42.0)));
        assert!(obj.find_own_property(&name("bar")).is_none());
    }

    #[test]
    fn test_non_extensible_rejects_new_properties() {
        let obj = JsObject::new(None, ObjectKind::Ordinary);
        obj.prevent_extensions();
        assert!(!obj.define_property(name("foo"), PropertyDescriptor::data(Value::null())));
        obj.create_property(name("bar"), PropertyDescriptor::data(Value::null()));
        assert!(obj.has_own_property(&name("bar")));
    }

    #[test]
    fn test_frozen_property_is_not_writable_or_deletable() {
        let obj = JsObject::new(None, ObjectKind::Ordinary);
        obj.create_property(
            name("k"),
            PropertyDescriptor::data_with_attrs(Value::number(1.0), PropertyAttributes::frozen()),
        );
        assert!(!obj.set_own_value(&name("k"), Value::number(2.0)));
        assert!(!obj.delete(&name("k")));
        assert_eq!(
            obj.find_own_property(&name("k")).unwrap().value(),
            Some(&Value::number(1.0))
        );
    }

    #[test]
    fn test_own_keys_keep_creation_order() {
        let obj = JsObject::new(None, ObjectKind::Ordinary);
        for key in ["b", "a", "c"] {
            obj.define_property(name(key), PropertyDescriptor::data(Value::null()));
        }
        let keys: Vec<_> = obj.own_keys().iter().map(|k| k.to_string()).collect();
        assert_eq!(keys, ["b", "a", "c"]);
    }

    #[test]
    fn test_class_defaults_by_kind() {
        assert_eq!(
            JsObject::new(None, ObjectKind::Ordinary).class(),
            MagicStringId::Object
        );
        let func = JsObject::new(None, ObjectKind::BuiltinFunction);
        assert_eq!(func.class(), MagicStringId::Function);
        func.set_internal(InternalProperty::Class, InternalValue::Magic(MagicStringId::Math));
        assert_eq!(func.class(), MagicStringId::Math);
    }

    #[test]
    fn test_handles_count_references() {
        let obj = JsObject::new(None, ObjectKind::Ordinary);
        let weak = ObjectRef::downgrade(&obj);
        let second = obj.clone();
        assert_eq!(ObjectRef::strong_count(&obj), 2);
        drop(second);
        assert_eq!(ObjectRef::strong_count(&obj), 1);
        drop(obj);
        assert!(!weak.is_alive());
    }

    #[test]
    fn test_object_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<JsObject>();
        assert_send_sync::<ObjectRef>();
    }
}
