//! Call bindings for namespace operations.
//!
//! A [`Binding`] forwards calls to one operation's table and keeps that table
//! reachable, so an operation can be bound before it has any implementation:
//!
//! ```
//! use methodic::{bind, Namespace, PrimitiveKind, Value};
//!
//! let ns = Namespace::new("cheese");
//! bind!(ns => foo);
//! assert!(foo.call(&Value::from(2), &[]).is_err());
//!
//! foo.method().implement(PrimitiveKind::Number, |recv, _| {
//!     let n = recv.as_number().unwrap_or_default() as usize;
//!     Ok(Value::from(format!("ch{}se", "e".repeat(n))))
//! });
//! assert_eq!(foo.call(&Value::from(2), &[]).unwrap(), Value::from("cheese"));
//! ```

use std::sync::Arc;

use crate::error::DispatchResult;
use crate::namespace::Namespace;
use crate::table::DispatchTable;
use crate::value::Value;

/// Produces a [`Binding`] for any operation name of a namespace.
#[derive(Debug, Clone, Copy)]
pub struct Bindings<'a> {
    namespace: &'a Namespace,
}

impl<'a> Bindings<'a> {
    pub(crate) fn new(namespace: &'a Namespace) -> Self {
        Self { namespace }
    }

    /// Bind operation `name`, creating it if it does not exist yet.
    pub fn get(&self, name: &str) -> Binding {
        Binding {
            table: self.namespace.operation(name),
        }
    }
}

/// A callable handle to one operation.
#[derive(Debug, Clone)]
pub struct Binding {
    table: Arc<DispatchTable>,
}

impl Binding {
    /// Invoke the operation.
    pub fn call(&self, receiver: &Value, args: &[Value]) -> DispatchResult<Value> {
        self.table.invoke(receiver, args)
    }

    /// The table backing this operation.
    pub fn method(&self) -> &Arc<DispatchTable> {
        &self.table
    }

    pub fn name(&self) -> &str {
        self.table.name()
    }
}

/// Bind operations of a namespace to local variables of the same name.
///
/// `bind!(ns => reverse, len)` expands to
/// `let reverse = ns.bindings().get("reverse");` and so on.
#[macro_export]
macro_rules! bind {
    ($namespace:expr => $($name:ident),+ $(,)?) => {
        let __bindings = $namespace.bindings();
        $(
            let $name = __bindings.get(stringify!($name));
        )+
    };
}
