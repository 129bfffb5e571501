//! Magic strings
//!
//! Engine-interned names identified by a small integer id. Ids are totally
//! ordered by declaration order, which is what the builtin property tables
//! are sorted by. Comparing two magic ids is an integer comparison.

use rustc_hash::FxHashMap;
use std::sync::LazyLock;

macro_rules! magic_strings {
    ($($variant:ident => $text:literal,)*) => {
        /// Identifier of an engine-interned string.
        #[repr(u16)]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum MagicStringId {
            $(
                #[doc = concat!("`\"", $text, "\"`")]
                $variant,
            )*
        }

        impl MagicStringId {
            /// Every magic string, in id order.
            pub const ALL: &'static [MagicStringId] = &[$(MagicStringId::$variant,)*];

            /// Number of magic strings.
            pub const COUNT: usize = Self::ALL.len();

            /// The interned text.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(MagicStringId::$variant => $text,)*
                }
            }
        }
    };
}

magic_strings! {
    Empty => "",
    Undefined => "undefined",
    Null => "null",
    True => "true",
    False => "false",
    Eval => "eval",
    NaN => "NaN",
    Infinity => "Infinity",
    Object => "Object",
    Function => "Function",
    Array => "Array",
    String => "String",
    Boolean => "Boolean",
    Number => "Number",
    Date => "Date",
    RegExp => "RegExp",
    Error => "Error",
    EvalError => "EvalError",
    RangeError => "RangeError",
    ReferenceError => "ReferenceError",
    SyntaxError => "SyntaxError",
    TypeError => "TypeError",
    UriError => "URIError",
    Math => "Math",
    Json => "JSON",
    ParseInt => "parseInt",
    ParseFloat => "parseFloat",
    IsNaN => "isNaN",
    IsFinite => "isFinite",
    DecodeUri => "decodeURI",
    DecodeUriComponent => "decodeURIComponent",
    EncodeUri => "encodeURI",
    EncodeUriComponent => "encodeURIComponent",
    CompactProfileError => "CompactProfileError",
    Length => "length",
    Prototype => "prototype",
    Constructor => "constructor",
    Name => "name",
    Message => "message",
    ToString => "toString",
    ToLocaleString => "toLocaleString",
    ValueOf => "valueOf",
    HasOwnProperty => "hasOwnProperty",
    IsPrototypeOf => "isPrototypeOf",
    PropertyIsEnumerable => "propertyIsEnumerable",
    GetPrototypeOf => "getPrototypeOf",
    Keys => "keys",
    Create => "create",
    IsExtensible => "isExtensible",
    PreventExtensions => "preventExtensions",
    Call => "call",
    Apply => "apply",
    IsArray => "isArray",
    Join => "join",
    Push => "push",
    Pop => "pop",
    CharAt => "charAt",
    CharCodeAt => "charCodeAt",
    FromCharCode => "fromCharCode",
    MaxValue => "MAX_VALUE",
    MinValue => "MIN_VALUE",
    NegativeInfinity => "NEGATIVE_INFINITY",
    PositiveInfinity => "POSITIVE_INFINITY",
    E => "E",
    Ln10 => "LN10",
    Ln2 => "LN2",
    Log2E => "LOG2E",
    Log10E => "LOG10E",
    Pi => "PI",
    Sqrt1_2 => "SQRT1_2",
    Sqrt2 => "SQRT2",
    Abs => "abs",
    Acos => "acos",
    Asin => "asin",
    Atan => "atan",
    Atan2 => "atan2",
    Ceil => "ceil",
    Cos => "cos",
    Exp => "exp",
    Floor => "floor",
    Log => "log",
    Max => "max",
    Min => "min",
    Pow => "pow",
    Random => "random",
    Round => "round",
    Sin => "sin",
    Sqrt => "sqrt",
    Tan => "tan",
}

static MAGIC_TABLE: LazyLock<FxHashMap<&'static str, MagicStringId>> = LazyLock::new(|| {
    MagicStringId::ALL
        .iter()
        .map(|&id| (id.as_str(), id))
        .collect()
});

impl MagicStringId {
    /// Find the magic id of `text`, if it is one of the engine's names.
    pub fn lookup(text: &str) -> Option<Self> {
        MAGIC_TABLE.get(text).copied()
    }

    /// Numeric value of the id.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Id from its numeric value.
    pub fn from_u16(raw: u16) -> Option<Self> {
        Self::ALL.get(raw as usize).copied()
    }
}

impl std::fmt::Display for MagicStringId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
