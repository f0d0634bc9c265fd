//! Reference evaluator for rewritten modules.
//!
//! Runs the parsed language subset so that synthesized members can be
//! exercised end to end. Instances live on a [`Heap`] for the lifetime of the
//! [`Interpreter`]; `Object.freeze` marks an object read-only.

pub mod class_registry;
pub mod error;
pub mod interpreter;
pub mod object;
pub mod value;

pub use class_registry::{ClassRegistry, InstanceField, RuntimeClass};
pub use error::EvalError;
pub use interpreter::{Interpreter, MAX_CALL_DEPTH};
pub use object::{Heap, Object, ObjectKind};
pub use value::{Builtin, ClassId, FunctionRef, ObjectId, Value};
