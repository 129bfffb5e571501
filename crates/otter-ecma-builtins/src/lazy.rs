//! Lazy instantiation of builtin own properties
//!
//! Builtin objects are created empty. When an own-property search on a
//! builtin misses, [`Engine::try_instantiate_property`] checks the
//! variant's sorted property table and, if the name is listed and has not
//! been materialized yet, creates the property with its fixed attributes.
//! A 32-bit mask stored on the object records which table entries were
//! materialized, so each one is created at most once.

use otter_ecma_core::{
    InternalProperty, InternalValue, JsString, MagicStringId, ObjectRef, PropertyAttributes,
    PropertyDescriptor, Value,
};

use crate::builtins;
use crate::engine::Engine;
use crate::id::BuiltinId;
use crate::lookup;
use crate::registry::builtin_id_of;
use crate::routine::make_routine_function;

/// Largest property table a builtin may declare (one mask bit per entry).
pub const MAX_TABLE_LEN: usize = u32::BITS as usize;

/// How a table property is materialized
#[derive(Debug)]
pub(crate) enum BuiltinProperty {
    /// Native routine with the given `length`
    Routine { length: u8 },
    /// Data property
    Data {
        value: Value,
        attributes: PropertyAttributes,
    },
    /// Accessor whose getter and setter both throw `CompactProfileError`
    ProfileThrower,
}

impl BuiltinProperty {
    pub(crate) fn routine(length: u8) -> Self {
        Self::Routine { length }
    }

    /// Non-writable, non-enumerable, non-configurable value
    pub(crate) fn constant(value: Value) -> Self {
        Self::Data {
            value,
            attributes: PropertyAttributes::frozen(),
        }
    }

    /// Reference to another builtin (namespaces, constructors, `constructor`)
    pub(crate) fn builtin(engine: &Engine, id: BuiltinId) -> Self {
        Self::Data {
            value: Value::object(engine.registry().get(id)),
            attributes: PropertyAttributes::builtin(),
        }
    }

    /// Frozen reference to another builtin (`prototype` of constructors)
    pub(crate) fn frozen_builtin(engine: &Engine, id: BuiltinId) -> Self {
        Self::constant(Value::object(engine.registry().get(id)))
    }

    /// Writable, non-enumerable, configurable value
    pub(crate) fn value(value: Value) -> Self {
        Self::Data {
            value,
            attributes: PropertyAttributes::builtin(),
        }
    }
}

/// Mask bit for the table entry at `index`
fn mask_bit(index: usize) -> u32 {
    assert!(
        index < MAX_TABLE_LEN,
        "builtin property table entry {index} does not fit the instantiation mask"
    );
    1u32 << index
}

impl Engine {
    /// Materialize `name` on the builtin `object` if it is one of the
    /// builtin's lazily instantiated properties and has not been created yet.
    ///
    /// Returns the created property, or `None` if nothing was created.
    /// Repeated calls for the same name create nothing after the first.
    pub fn try_instantiate_property(
        &self,
        object: &ObjectRef,
        name: &JsString,
    ) -> Option<PropertyDescriptor> {
        if !object.is_builtin() || object.has_own_property(name) {
            return None;
        }

        // Native routine functions carry no property table.
        let id = builtin_id_of(object)?;
        debug_assert!(self.registry().is(object, id));

        let magic = name.magic_id()?;
        let table = builtins::property_names(id, self.config().profile);
        let index = lookup::find(table, magic)?;
        let bit = mask_bit(index);

        let first_time = object.update_internal(|internal| {
            let mask = internal
                .entry(InternalProperty::NonInstantiatedMask)
                .or_insert(InternalValue::Integer(0));
            let current = mask.as_integer().unwrap_or(0);
            if current & bit != 0 {
                return false;
            }
            *mask = InternalValue::Integer(current | bit);
            true
        });
        if !first_time {
            return None;
        }

        let descriptor = match builtins::instantiate_property(self, id, magic) {
            BuiltinProperty::Routine { length } => PropertyDescriptor::data_with_attrs(
                Value::object(make_routine_function(self.registry(), id, magic, length)),
                PropertyAttributes::builtin(),
            ),
            BuiltinProperty::Data { value, attributes } => {
                PropertyDescriptor::data_with_attrs(value, attributes)
            }
            BuiltinProperty::ProfileThrower => {
                let thrower = self.registry().get(BuiltinId::CompactProfileError);
                PropertyDescriptor::Accessor {
                    get: Some(thrower.clone()),
                    set: Some(thrower),
                    attributes: PropertyAttributes::new(false, true, false),
                }
            }
        };

        tracing::trace!(builtin = %id, property = %magic, "materialized builtin property");

        object.create_property(JsString::magic(magic), descriptor.clone());
        Some(descriptor)
    }

    /// Lazily instantiable property names of builtin `id`, in table order
    pub fn builtin_property_names(&self, id: BuiltinId) -> &'static [MagicStringId] {
        builtins::property_names(id, self.config().profile)
    }

    /// Check whether table entry `name` of `object` was already materialized
    pub fn is_property_instantiated(&self, object: &ObjectRef, name: MagicStringId) -> bool {
        let Some(id) = builtin_id_of(object) else {
            return false;
        };
        let table = builtins::property_names(id, self.config().profile);
        let Some(index) = lookup::find(table, name) else {
            return false;
        };
        instantiation_mask(object) & mask_bit(index) != 0
    }
}

/// Current lazy-instantiation mask of `object` (0 if none was created)
pub fn instantiation_mask(object: &ObjectRef) -> u32 {
    object
        .internal(InternalProperty::NonInstantiatedMask)
        .and_then(|mask| mask.as_integer())
        .unwrap_or(0)
}
