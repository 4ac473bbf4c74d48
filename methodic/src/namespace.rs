//! Operation namespaces.
//!
//! A [`Namespace`] owns one [`DispatchTable`] per operation name. Tables are
//! created on first reference and live as long as the namespace.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::bindings::Bindings;
use crate::config::NamespaceConfig;
use crate::error::DispatchResult;
use crate::table::DispatchTable;
use crate::types::{TypeKey, TypeRef};
use crate::value::Value;

/// A named group of dispatchable operations.
#[derive(Debug)]
pub struct Namespace {
    config: NamespaceConfig,
    operations: RwLock<FxHashMap<String, Arc<DispatchTable>>>,
}

impl Namespace {
    /// Create an empty namespace with default options.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(NamespaceConfig::named(name))
    }

    pub fn with_config(config: NamespaceConfig) -> Self {
        Self {
            config,
            operations: RwLock::new(FxHashMap::default()),
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &NamespaceConfig {
        &self.config
    }

    /// The table backing `name`, created empty on first use.
    ///
    /// Every call with the same name returns the same table.
    pub fn operation(&self, name: &str) -> Arc<DispatchTable> {
        if let Some(table) = self.operations.read().get(name) {
            return Arc::clone(table);
        }

        let mut operations = self.operations.write();
        let table = operations.entry(name.to_string()).or_insert_with(|| {
            debug!(namespace = %self.config.name, operation = name, "created operation");
            Arc::new(DispatchTable::with_config(name, &self.config))
        });
        Arc::clone(table)
    }

    /// Register `f` as the implementation of operation `name` for `key`.
    pub fn define<F>(&self, name: &str, key: impl Into<TypeKey>, f: F)
    where
        F: Fn(&Value, &[Value]) -> DispatchResult<Value> + Send + Sync + 'static,
    {
        self.operation(name).implement(key, f);
    }

    /// Invoke operation `name` on `receiver`.
    pub fn invoke(&self, name: &str, receiver: &Value, args: &[Value]) -> DispatchResult<Value> {
        self.operation(name).invoke(receiver, args)
    }

    /// Lift every own method of `ty` into an operation of the same name,
    /// keyed by `ty`. Constructors, attributes and inherited members are
    /// skipped.
    ///
    /// Returns the number of operations defined.
    pub fn derive_from(&self, ty: &TypeRef) -> usize {
        let mut derived = 0;
        for (name, method) in ty.own_methods() {
            debug!(
                namespace = %self.config.name,
                operation = name,
                ty = ty.name(),
                "derived operation"
            );
            self.operation(name).implement_shared(ty, Arc::clone(method));
            derived += 1;
        }
        derived
    }

    /// Check whether operation `name` has been referenced.
    pub fn contains(&self, name: &str) -> bool {
        self.operations.read().contains_key(name)
    }

    /// Names of all referenced operations, sorted.
    pub fn operation_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.operations.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Call-binding facade over this namespace.
    pub fn bindings(&self) -> Bindings<'_> {
        Bindings::new(self)
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self::with_config(NamespaceConfig::default())
    }
}
