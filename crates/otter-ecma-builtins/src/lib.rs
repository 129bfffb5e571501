//! # Otter ECMA Builtins
//!
//! The builtin object subsystem: how standard-library objects (Global,
//! Object, Array, String, Math, the constructors and their prototypes) are
//! represented, brought into existence on first use, and invoked.
//!
//! ## Design Principles
//!
//! - **Lazy**: builtin singletons are created on first request, and their
//!   own properties are materialized on first lookup
//! - **Closed**: builtins are a fixed enum; every per-builtin operation is an
//!   exhaustive `match`
//! - **Compact dispatch**: routine functions carry one packed `u32` and no
//!   code pointer
//!
//! ## Example
//!
//! ```
//! use otter_ecma_builtins::{Engine, EngineConfig};
//! use otter_ecma_core::{JsString, Value};
//!
//! let engine = Engine::new(EngineConfig::default());
//! let global = engine.global();
//! let parse_int = engine.get(&global, &JsString::new("parseInt")).unwrap();
//! let n = engine
//!     .call(&parse_int, &Value::undefined(), &[Value::string("ff"), Value::number(16.0)])
//!     .unwrap();
//! assert_eq!(n, Value::number(255.0));
//! ```

#![warn(clippy::all)]
#![warn(missing_docs)]

pub mod builtins;
pub mod config;
pub mod conversion;
pub mod dispatch;
pub mod engine;
pub mod id;
pub mod lazy;
pub mod lookup;
pub mod registry;
pub mod routine;

pub use builtins::error::NativeErrorKind;
pub use config::{BuiltinProfile, ConfigError, EngineConfig};
pub use conversion::PreferredType;
pub use engine::Engine;
pub use id::{BuiltinDescriptor, BuiltinId};
pub use registry::BuiltinRegistry;
pub use routine::RoutineId;
