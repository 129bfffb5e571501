//! Builtin identifiers and their static descriptors
//!
//! `BuiltinId` is the closed set of standard singletons. The descriptor
//! table below fixes, per id, the object kind, `[[Class]]`, prototype and
//! whether `[[Construct]]` is implemented. The prototype graph it induces is
//! acyclic; instantiation relies on that instead of detecting cycles.

use otter_ecma_core::{MagicStringId, ObjectKind};

/// Identifier of a builtin singleton object
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BuiltinId {
    /// The Global object
    Global,
    /// `Object.prototype`
    ObjectPrototype,
    /// `Object`
    Object,
    /// `Function.prototype`
    FunctionPrototype,
    /// `Function`
    Function,
    /// `Array.prototype`
    ArrayPrototype,
    /// `Array`
    Array,
    /// `String.prototype`
    StringPrototype,
    /// `String`
    String,
    /// `Boolean.prototype`
    BooleanPrototype,
    /// `Boolean`
    Boolean,
    /// `Number.prototype`
    NumberPrototype,
    /// `Number`
    Number,
    /// `Math`
    Math,
    /// `Error.prototype`
    ErrorPrototype,
    /// `Error`
    Error,
    /// `EvalError.prototype`
    EvalErrorPrototype,
    /// `EvalError`
    EvalError,
    /// `RangeError.prototype`
    RangeErrorPrototype,
    /// `RangeError`
    RangeError,
    /// `ReferenceError.prototype`
    ReferenceErrorPrototype,
    /// `ReferenceError`
    ReferenceError,
    /// `SyntaxError.prototype`
    SyntaxErrorPrototype,
    /// `SyntaxError`
    SyntaxError,
    /// `TypeError.prototype`
    TypeErrorPrototype,
    /// `TypeError`
    TypeError,
    /// `URIError.prototype`
    UriErrorPrototype,
    /// `URIError`
    UriError,
    /// Thrower used by the compact profile in place of missing builtins
    CompactProfileError,
}

impl BuiltinId {
    /// Every builtin id, in index order.
    pub const ALL: [BuiltinId; 29] = [
        Self::Global,
        Self::ObjectPrototype,
        Self::Object,
        Self::FunctionPrototype,
        Self::Function,
        Self::ArrayPrototype,
        Self::Array,
        Self::StringPrototype,
        Self::String,
        Self::BooleanPrototype,
        Self::Boolean,
        Self::NumberPrototype,
        Self::Number,
        Self::Math,
        Self::ErrorPrototype,
        Self::Error,
        Self::EvalErrorPrototype,
        Self::EvalError,
        Self::RangeErrorPrototype,
        Self::RangeError,
        Self::ReferenceErrorPrototype,
        Self::ReferenceError,
        Self::SyntaxErrorPrototype,
        Self::SyntaxError,
        Self::TypeErrorPrototype,
        Self::TypeError,
        Self::UriErrorPrototype,
        Self::UriError,
        Self::CompactProfileError,
    ];

    /// Number of builtin ids.
    pub const COUNT: usize = Self::ALL.len();

    /// Slot index of the id.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Id from a slot index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Static descriptor of the id.
    pub const fn descriptor(self) -> BuiltinDescriptor {
        use BuiltinId as B;
        use MagicStringId as M;

        match self {
            B::Global => BuiltinDescriptor::object("global", M::Object, Some(B::ObjectPrototype)),
            B::ObjectPrototype => BuiltinDescriptor::object("object_prototype", M::Object, None),
            B::Object => BuiltinDescriptor::constructor("object"),
            B::FunctionPrototype => BuiltinDescriptor {
                name: "function_prototype",
                kind: ObjectKind::Function,
                class: M::Function,
                prototype: Some(B::ObjectPrototype),
                constructible: false,
            },
            B::Function => BuiltinDescriptor::constructor("function"),
            B::ArrayPrototype => {
                BuiltinDescriptor::object("array_prototype", M::Array, Some(B::ObjectPrototype))
            }
            B::Array => BuiltinDescriptor::constructor("array"),
            B::StringPrototype => {
                BuiltinDescriptor::object("string_prototype", M::String, Some(B::ObjectPrototype))
            }
            B::String => BuiltinDescriptor::constructor("string"),
            B::BooleanPrototype => {
                BuiltinDescriptor::object("boolean_prototype", M::Boolean, Some(B::ObjectPrototype))
            }
            B::Boolean => BuiltinDescriptor::constructor("boolean"),
            B::NumberPrototype => {
                BuiltinDescriptor::object("number_prototype", M::Number, Some(B::ObjectPrototype))
            }
            B::Number => BuiltinDescriptor::constructor("number"),
            B::Math => BuiltinDescriptor::object("math", M::Math, Some(B::ObjectPrototype)),
            B::ErrorPrototype => {
                BuiltinDescriptor::object("error_prototype", M::Error, Some(B::ObjectPrototype))
            }
            B::Error => BuiltinDescriptor::constructor("error"),
            B::EvalErrorPrototype => BuiltinDescriptor::native_error_prototype("eval_error_prototype"),
            B::EvalError => BuiltinDescriptor::constructor("eval_error"),
            B::RangeErrorPrototype => {
                BuiltinDescriptor::native_error_prototype("range_error_prototype")
            }
            B::RangeError => BuiltinDescriptor::constructor("range_error"),
            B::ReferenceErrorPrototype => {
                BuiltinDescriptor::native_error_prototype("reference_error_prototype")
            }
            B::ReferenceError => BuiltinDescriptor::constructor("reference_error"),
            B::SyntaxErrorPrototype => {
                BuiltinDescriptor::native_error_prototype("syntax_error_prototype")
            }
            B::SyntaxError => BuiltinDescriptor::constructor("syntax_error"),
            B::TypeErrorPrototype => BuiltinDescriptor::native_error_prototype("type_error_prototype"),
            B::TypeError => BuiltinDescriptor::constructor("type_error"),
            B::UriErrorPrototype => BuiltinDescriptor::native_error_prototype("uri_error_prototype"),
            B::UriError => BuiltinDescriptor::constructor("uri_error"),
            B::CompactProfileError => BuiltinDescriptor::constructor("compact_profile_error"),
        }
    }
}

impl std::fmt::Display for BuiltinId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.descriptor().name)
    }
}

/// Static description of a builtin singleton
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuiltinDescriptor {
    /// Lowercase tag, used in diagnostics
    pub name: &'static str,
    /// Object kind of the singleton
    pub kind: ObjectKind,
    /// `[[Class]]`
    pub class: MagicStringId,
    /// Builtin that serves as `[[Prototype]]`, if any
    pub prototype: Option<BuiltinId>,
    /// Whether `[[Construct]]` is implemented
    pub constructible: bool,
}

impl BuiltinDescriptor {
    const fn object(
        name: &'static str,
        class: MagicStringId,
        prototype: Option<BuiltinId>,
    ) -> Self {
        Self {
            name,
            kind: ObjectKind::Ordinary,
            class,
            prototype,
            constructible: false,
        }
    }

    const fn constructor(name: &'static str) -> Self {
        Self {
            name,
            kind: ObjectKind::Function,
            class: MagicStringId::Function,
            prototype: Some(BuiltinId::FunctionPrototype),
            constructible: true,
        }
    }

    const fn native_error_prototype(name: &'static str) -> Self {
        Self::object(name, MagicStringId::Error, Some(BuiltinId::ErrorPrototype))
    }

    /// Check if the builtin implements `[[Call]]`
    pub const fn callable(&self) -> bool {
        matches!(self.kind, ObjectKind::Function)
    }
}
