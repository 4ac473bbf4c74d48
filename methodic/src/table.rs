//! Dispatch tables.
//!
//! A [`DispatchTable`] backs one named operation. It maps [`TypeKey`]s to
//! implementations and selects one for each receiver:
//!
//! 1. **Typed objects**: direct entry for the runtime type, otherwise the
//!    nearest ancestor with an entry, otherwise the universal default
//! 2. **Null**: the null entry, otherwise the universal default
//! 3. **Primitives**: the kind's entry only, unless
//!    [`NamespaceConfig::primitive_default`] enables the universal default
//!
//! Ancestor resolution memoizes its answer. Every type visited before the
//! matching ancestor receives a direct entry, so the next dispatch on the
//! same type is a single map lookup. The matching ancestor's own entry is
//! left as it was.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::config::NamespaceConfig;
use crate::error::{DispatchError, DispatchResult};
use crate::types::{Implementation, TypeKey, TypeObject};
use crate::value::{Classification, Value};

/// Type-keyed implementations of a single operation.
pub struct DispatchTable {
    name: String,
    primitive_default: bool,
    entries: RwLock<FxHashMap<TypeKey, Implementation>>,
}

impl DispatchTable {
    /// Create an empty table with default options.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, &NamespaceConfig::default())
    }

    /// Create an empty table using the options of `config`.
    pub fn with_config(name: impl Into<String>, config: &NamespaceConfig) -> Self {
        Self {
            name: name.into(),
            primitive_default: config.primitive_default,
            entries: RwLock::new(FxHashMap::default()),
        }
    }

    /// The operation's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register `f` for `key`, replacing any existing entry.
    pub fn implement<F>(&self, key: impl Into<TypeKey>, f: F)
    where
        F: Fn(&Value, &[Value]) -> DispatchResult<Value> + Send + Sync + 'static,
    {
        self.implement_shared(key, Arc::new(f));
    }

    /// Register an already shared implementation for `key`.
    pub fn implement_shared(&self, key: impl Into<TypeKey>, implementation: Implementation) {
        self.entries.write().insert(key.into(), implementation);
    }

    /// Direct entry for `key`. Never walks ancestors.
    pub fn lookup(&self, key: impl Into<TypeKey>) -> Option<Implementation> {
        self.entries.read().get(&key.into()).cloned()
    }

    /// Check whether `key` has a direct entry.
    pub fn contains(&self, key: impl Into<TypeKey>) -> bool {
        self.entries.read().contains_key(&key.into())
    }

    /// Remove the direct entry for `key`.
    ///
    /// Entries cached from it on descendant types are kept.
    pub fn remove(&self, key: impl Into<TypeKey>) -> Option<Implementation> {
        self.entries.write().remove(&key.into())
    }

    /// Number of direct entries, cached ones included.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Select the implementation for `receiver` without calling it.
    pub fn resolve(&self, receiver: &Value) -> Option<Implementation> {
        let class = receiver.classify();
        if let Some(found) = self.lookup(class.key()) {
            return Some(found);
        }
        match class {
            Classification::Typed(ty) => self.resolve_ancestors(ty),
            Classification::Null => self.lookup(TypeKey::Default),
            Classification::Primitive(_) if self.primitive_default => {
                self.lookup(TypeKey::Default)
            }
            Classification::Primitive(_) => None,
        }
    }

    /// Call the implementation selected for `receiver`.
    ///
    /// The implementation runs without any lock held, so it may invoke this
    /// table again.
    pub fn invoke(&self, receiver: &Value, args: &[Value]) -> DispatchResult<Value> {
        let implementation =
            self.resolve(receiver)
                .ok_or_else(|| DispatchError::NoImplementationFound {
                    operation: self.name.clone(),
                    receiver: receiver.type_name(),
                })?;
        implementation(receiver, args)
    }

    /// Walk `ty`'s ancestor chain for the nearest entry, caching the result on
    /// every type visited before it.
    fn resolve_ancestors(&self, ty: &TypeObject) -> Option<Implementation> {
        let mut entries = self.entries.write();
        let mut pending = Vec::new();

        for ancestor in ty.ancestors() {
            let key = ancestor.key();
            if let Some(found) = entries.get(&key).cloned() {
                trace!(
                    operation = %self.name,
                    ty = ty.name(),
                    via = ancestor.name(),
                    cached = pending.len(),
                    "resolved inherited implementation"
                );
                for visited in pending {
                    entries.insert(visited, Arc::clone(&found));
                }
                return Some(found);
            }
            pending.push(key);
        }

        let fallback = entries.get(&TypeKey::Default).cloned();
        trace!(
            operation = %self.name,
            ty = ty.name(),
            found = fallback.is_some(),
            "no ancestor implementation, falling back to default"
        );
        fallback
    }
}

impl fmt::Debug for DispatchTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchTable")
            .field("name", &self.name)
            .field("primitive_default", &self.primitive_default)
            .field("entries", &self.len())
            .finish()
    }
}
