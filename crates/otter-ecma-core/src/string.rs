//! Immutable JavaScript strings
//!
//! A `JsString` remembers whether its text is one of the engine's magic
//! strings. The builtin subsystem relies on that to decide, without any text
//! comparison, whether a property name can possibly name a lazy builtin
//! property.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::magic::MagicStringId;

/// An immutable, cheaply clonable JavaScript string
#[derive(Clone)]
pub struct JsString {
    text: Arc<str>,
    magic: Option<MagicStringId>,
}

impl JsString {
    /// Create a string, resolving its magic id if it has one.
    pub fn new(text: &str) -> Self {
        Self {
            text: Arc::from(text),
            magic: MagicStringId::lookup(text),
        }
    }

    /// The string for a magic id.
    pub fn magic(id: MagicStringId) -> Self {
        Self {
            text: Arc::from(id.as_str()),
            magic: Some(id),
        }
    }

    /// Create from UTF-16 code units (lone surrogates are replaced).
    pub fn from_utf16(units: &[u16]) -> Self {
        Self::new(&String::from_utf16_lossy(units))
    }

    /// The string's text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Magic id of this string, if it is an engine-interned name.
    pub fn magic_id(&self) -> Option<MagicStringId> {
        self.magic
    }

    /// UTF-16 code units, as script code observes them.
    pub fn to_utf16(&self) -> Vec<u16> {
        self.text.encode_utf16().collect()
    }

    /// Length in UTF-16 code units.
    pub fn utf16_len(&self) -> usize {
        self.text.encode_utf16().count()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl PartialEq for JsString {
    fn eq(&self, other: &Self) -> bool {
        match (self.magic, other.magic) {
            (Some(a), Some(b)) => a == b,
            _ => self.text == other.text,
        }
    }
}

impl Eq for JsString {}

impl Hash for JsString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl From<&str> for JsString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for JsString {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}

impl From<MagicStringId> for JsString {
    fn from(id: MagicStringId) -> Self {
        Self::magic(id)
    }
}

impl std::fmt::Debug for JsString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", &*self.text)
    }
}

impl std::fmt::Display for JsString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
