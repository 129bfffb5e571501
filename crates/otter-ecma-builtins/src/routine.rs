//! Native routine function objects
//!
//! A builtin routine (`parseInt`, `Math.abs`, ...) is represented by a
//! function object carrying nothing but a packed `(owner, routine)` id in an
//! internal property. The body is found at call time by decoding that id, so
//! every routine function object has the same shape and size.

use otter_ecma_core::{
    InternalProperty, InternalValue, JsObject, JsString, MagicStringId, ObjectKind, ObjectRef,
    PropertyAttributes, PropertyDescriptor, Value,
};

use crate::id::BuiltinId;
use crate::registry::BuiltinRegistry;

/// Bit position of the owning builtin id.
pub const OWNER_ID_POS: u32 = 0;
/// Bit width of the owning builtin id.
pub const OWNER_ID_WIDTH: u32 = 8;
/// Bit position of the routine's magic-string id.
pub const ROUTINE_ID_POS: u32 = OWNER_ID_POS + OWNER_ID_WIDTH;
/// Bit width of the routine's magic-string id.
pub const ROUTINE_ID_WIDTH: u32 = 16;

const _: () = assert!(ROUTINE_ID_POS + ROUTINE_ID_WIDTH <= u32::BITS);
const _: () = assert!(BuiltinId::COUNT <= 1 << OWNER_ID_WIDTH);
const _: () = assert!(MagicStringId::COUNT <= 1 << ROUTINE_ID_WIDTH);

const fn field_mask(width: u32) -> u32 {
    if width >= u32::BITS {
        u32::MAX
    } else {
        (1 << width) - 1
    }
}

/// Owning builtin and routine name of a native routine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RoutineId {
    /// Builtin whose property table declares the routine
    pub owner: BuiltinId,
    /// Routine's property name
    pub routine: MagicStringId,
}

impl RoutineId {
    /// Pair an owner with one of its routines
    pub const fn new(owner: BuiltinId, routine: MagicStringId) -> Self {
        Self { owner, routine }
    }

    /// Pack into the internal-property payload
    pub const fn pack(self) -> u32 {
        ((self.owner as u32 & field_mask(OWNER_ID_WIDTH)) << OWNER_ID_POS)
            | ((self.routine as u32 & field_mask(ROUTINE_ID_WIDTH)) << ROUTINE_ID_POS)
    }

    /// Unpack an internal-property payload
    ///
    /// # Panics
    /// If either field is out of range; a packed id is only ever produced by
    /// [`RoutineId::pack`].
    pub fn unpack(packed: u32) -> Self {
        let owner = (packed >> OWNER_ID_POS) & field_mask(OWNER_ID_WIDTH);
        let routine = (packed >> ROUTINE_ID_POS) & field_mask(ROUTINE_ID_WIDTH);

        let owner = BuiltinId::from_index(owner as usize)
            .unwrap_or_else(|| panic!("corrupt routine id: builtin {owner} out of range"));
        let routine = MagicStringId::from_u16(routine as u16)
            .unwrap_or_else(|| panic!("corrupt routine id: magic string {routine} out of range"));

        Self { owner, routine }
    }
}

/// Create the function object for routine `routine` of builtin `owner`.
///
/// The object inherits from `Function.prototype`, is marked builtin and has
/// a frozen `length` equal to `length`.
pub fn make_routine_function(
    registry: &BuiltinRegistry,
    owner: BuiltinId,
    routine: MagicStringId,
    length: u8,
) -> ObjectRef {
    let function_prototype = registry.get(BuiltinId::FunctionPrototype);
    let func = JsObject::new(Some(function_prototype), ObjectKind::BuiltinFunction);
    func.set_builtin(true);

    func.set_internal(
        InternalProperty::BuiltinRoutineId,
        InternalValue::Integer(RoutineId::new(owner, routine).pack()),
    );

    func.create_property(
        JsString::magic(MagicStringId::Length),
        PropertyDescriptor::data_with_attrs(
            Value::number(f64::from(length)),
            PropertyAttributes::frozen(),
        ),
    );

    func
}

/// Decode the routine id stored on a native routine function object.
pub fn routine_id_of(func: &JsObject) -> Option<RoutineId> {
    func.internal(InternalProperty::BuiltinRoutineId)
        .and_then(|payload| payload.as_integer())
        .map(RoutineId::unpack)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_pair_round_trips() {
        for owner in BuiltinId::ALL {
            for &routine in MagicStringId::ALL {
                let id = RoutineId::new(owner, routine);
                assert_eq!(RoutineId::unpack(id.pack()), id);
            }
        }
    }

    #[test]
    fn test_fields_do_not_overlap() {
        let packed = RoutineId::new(BuiltinId::CompactProfileError, MagicStringId::Tan).pack();
        assert_eq!(packed & 0xFF, BuiltinId::CompactProfileError as u32);
        assert_eq!(packed >> ROUTINE_ID_POS, MagicStringId::Tan as u32);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_corrupt_owner_is_fatal() {
        RoutineId::unpack(0xFF);
    }

    #[test]
    fn test_routine_function_shape() {
        let registry = BuiltinRegistry::new();
        let func = make_routine_function(&registry, BuiltinId::Math, MagicStringId::Max, 2);

        assert_eq!(func.kind(), ObjectKind::BuiltinFunction);
        assert!(func.is_builtin());
        assert!(ObjectRef::ptr_eq(
            func.prototype().unwrap(),
            &registry.get(BuiltinId::FunctionPrototype)
        ));
        assert_eq!(
            routine_id_of(&func),
            Some(RoutineId::new(BuiltinId::Math, MagicStringId::Max))
        );

        let length = func
            .find_own_property(&JsString::magic(MagicStringId::Length))
            .unwrap();
        assert_eq!(length.value(), Some(&Value::number(2.0)));
        assert_eq!(length.attributes(), PropertyAttributes::frozen());
        assert_eq!(func.property_count(), 1);
    }
}
