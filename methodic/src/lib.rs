//! Runtime generic-function dispatch.
//!
//! An operation is a name with several type-specific implementations. Invoking
//! it on a value selects the implementation registered for the value's runtime
//! type, falling back through the type's ancestors to a universal default.
//!
//! # Overview
//!
//! - [`DispatchTable`] - implementations of one operation, ancestor
//!   resolution and its cache
//! - [`Namespace`] - operation tables by name, `define` and `derive_from`
//! - [`Bindings`] / [`bind!`] - callable handles to operations
//! - [`TypeObject`] / [`Value`] - the runtime type model dispatch works on
//!
//! # Example
//!
//! ```
//! use methodic::{Namespace, PrimitiveKind, TypeKey, Value};
//! use serde_json::json;
//!
//! let ns = Namespace::new("demo");
//! ns.define("reverse", PrimitiveKind::String, |recv, _| {
//!     Ok(Value::from(recv.as_str().unwrap_or_default().chars().rev().collect::<String>()))
//! });
//! ns.define("reverse", TypeKey::Default, |_, _| Ok(Value::from("default")));
//!
//! assert_eq!(ns.invoke("reverse", &Value::from("abc"), &[])?, Value::from("cba"));
//! assert_eq!(ns.invoke("reverse", &Value::from(json!({})), &[])?, Value::from("default"));
//! # Ok::<(), methodic::DispatchError>(())
//! ```

pub mod bindings;
pub mod builtins;
pub mod config;
pub mod error;
pub mod namespace;
pub mod table;
pub mod types;
pub mod value;

pub use bindings::{Binding, Bindings};
pub use config::NamespaceConfig;
pub use error::{ConfigError, DispatchError, DispatchResult};
pub use namespace::Namespace;
pub use table::DispatchTable;
pub use types::{
    Ancestors, ImplFn, Implementation, Member, PrimitiveKind, TypeBuilder, TypeId, TypeKey,
    TypeObject, TypeRef, CONSTRUCTOR,
};
pub use value::{Classification, Function, Object, Payload, Value};
