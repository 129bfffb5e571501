//! Registry of builtin singletons
//!
//! One slot per [`BuiltinId`]. A slot is filled the first time the builtin
//! is requested, after its prototype has been instantiated. Each `get`
//! hands out one additional owning reference; the registry itself keeps one
//! per instantiated singleton until [`BuiltinRegistry::teardown`].

use parking_lot::RwLock;

use otter_ecma_core::{
    InternalProperty, InternalValue, JsObject, JsString, ObjectRef, Value,
};

use crate::id::BuiltinId;

/// Engine-scoped table of builtin singletons
pub struct BuiltinRegistry {
    slots: RwLock<[Option<ObjectRef>; BuiltinId::COUNT]>,
}

impl BuiltinRegistry {
    /// Create a registry with every slot empty
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(std::array::from_fn(|_| None)),
        }
    }

    /// Reset every slot to empty.
    ///
    /// Must only be called on a fresh or torn-down registry.
    pub fn init(&self) {
        let mut slots = self.slots.write();
        debug_assert!(
            slots.iter().all(Option::is_none),
            "builtin registry initialized twice without teardown"
        );
        *slots = std::array::from_fn(|_| None);
    }

    /// Check if `object` is the singleton for `id`.
    ///
    /// Instantiates the singleton if needed: identity cannot be decided
    /// against an object that does not exist yet.
    pub fn is(&self, object: &ObjectRef, id: BuiltinId) -> bool {
        ObjectRef::ptr_eq(object, &self.get(id))
    }

    /// New owning reference to the singleton for `id`.
    pub fn get(&self, id: BuiltinId) -> ObjectRef {
        if let Some(object) = self.slots.read()[id.index()].clone() {
            return object;
        }
        self.instantiate(id)
    }

    /// Check whether the slot for `id` is filled, without instantiating it
    pub fn is_instantiated(&self, id: BuiltinId) -> bool {
        self.slots.read()[id.index()].is_some()
    }

    /// Number of filled slots
    pub fn instantiated_count(&self) -> usize {
        self.slots.read().iter().filter(|slot| slot.is_some()).count()
    }

    fn instantiate(&self, id: BuiltinId) -> ObjectRef {
        let descriptor = id.descriptor();

        // The descriptor table is acyclic, so this recursion terminates.
        let prototype = descriptor.prototype.map(|proto_id| self.get(proto_id));

        let object = init_object(id, prototype);

        let mut slots = self.slots.write();
        if let Some(existing) = &slots[id.index()] {
            return existing.clone();
        }
        tracing::debug!(builtin = %id, "instantiated builtin object");
        slots[id.index()] = Some(object.clone());
        object
    }

    /// Release every instantiated singleton.
    ///
    /// Own properties of released singletons are cleared as well, so cycles
    /// such as `Object.prototype.constructor.prototype` do not keep them
    /// alive. Handles still held elsewhere become plain, empty objects. The
    /// registry is empty afterwards and may be used again.
    pub fn teardown(&self) {
        let released: Vec<ObjectRef> = {
            let mut slots = self.slots.write();
            slots.iter_mut().filter_map(Option::take).collect()
        };

        if !released.is_empty() {
            tracing::debug!(count = released.len(), "releasing builtin objects");
        }

        for object in &released {
            object.clear_properties();
            object.set_builtin(false);
            object.update_internal(|internal| {
                internal.remove(&InternalProperty::BuiltinId);
                internal.remove(&InternalProperty::NonInstantiatedMask);
            });
        }
    }
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for BuiltinRegistry {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Create the object for builtin `id`.
fn init_object(id: BuiltinId, prototype: Option<ObjectRef>) -> ObjectRef {
    let descriptor = id.descriptor();
    let object = JsObject::new(prototype, descriptor.kind);

    object.set_internal(
        InternalProperty::Class,
        InternalValue::Magic(descriptor.class),
    );
    object.set_internal(
        InternalProperty::BuiltinId,
        InternalValue::Integer(id.index() as u32),
    );
    object.set_builtin(true);

    // [[PrimitiveValue]] of the wrapper prototypes
    let primitive = match id {
        BuiltinId::StringPrototype => Some(Value::string(JsString::new(""))),
        BuiltinId::NumberPrototype => Some(Value::number(0.0)),
        BuiltinId::BooleanPrototype => Some(Value::boolean(false)),
        _ => None,
    };
    if let Some(primitive) = primitive {
        object.set_internal(InternalProperty::PrimitiveValue, InternalValue::Value(primitive));
    }

    object
}

/// Builtin id recorded on a builtin singleton.
pub fn builtin_id_of(object: &JsObject) -> Option<BuiltinId> {
    object
        .internal(InternalProperty::BuiltinId)
        .and_then(|payload| payload.as_integer())
        .and_then(|index| BuiltinId::from_index(index as usize))
}
