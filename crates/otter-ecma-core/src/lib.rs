//! # Otter ECMA Core
//!
//! The object layer consumed by the builtin subsystem: values, interned
//! (magic) strings, reference-counted objects with own and internal
//! properties, and the completion-value discipline.
//!
//! ## Design Principles
//!
//! - **Thread-safe**: Values and objects are `Send + Sync`
//! - **Identity handles**: `ObjectRef` compares by identity, never structurally
//! - **Closed name space**: magic strings form a totally ordered id space

#![warn(clippy::all)]
#![warn(missing_docs)]

pub mod completion;
pub mod magic;
pub mod number;
pub mod object;
pub mod string;
pub mod value;

pub use completion::{Abrupt, CompletionValue};
pub use magic::MagicStringId;
pub use object::{
    InternalProperty, InternalValue, JsObject, ObjectKind, ObjectRef, PropertyAttributes,
    PropertyDescriptor,
};
pub use string::JsString;
pub use value::Value;
