//! Completion values
//!
//! Every operation that can throw returns a [`CompletionValue`]. The normal
//! completion is `Ok(value)`; the throw completion is `Err(Abrupt::Throw)`.
//! Callers propagate throws unchanged with `?` and own the unwrapped value
//! from then on.

use thiserror::Error;

use crate::value::Value;

/// Abrupt (non-normal) completion
#[derive(Debug, Clone, Error)]
pub enum Abrupt {
    /// A thrown script value
    #[error("Uncaught exception: {0:?}")]
    Throw(Value),
}

impl Abrupt {
    /// Create a throw completion
    pub fn throw(value: impl Into<Value>) -> Self {
        Self::Throw(value.into())
    }

    /// The thrown value
    pub fn value(&self) -> &Value {
        match self {
            Self::Throw(value) => value,
        }
    }

    /// Consume the completion, yielding the thrown value
    pub fn into_value(self) -> Value {
        match self {
            Self::Throw(value) => value,
        }
    }
}

/// Result of an operation following the abrupt-completion model
pub type CompletionValue = Result<Value, Abrupt>;
