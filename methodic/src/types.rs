//! Type descriptors and dispatch keys.
//!
//! A [`TypeObject`] describes a runtime type: its identity, an optional base
//! type and the members it declares itself. Dispatch tables never look at
//! descriptors directly; they key on [`TypeKey`], which also covers primitive
//! kinds, the null value and the universal default.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::DispatchResult;
use crate::value::Value;

/// A callable bound into a dispatch table: receiver first, then the remaining
/// arguments.
pub type ImplFn = dyn Fn(&Value, &[Value]) -> DispatchResult<Value> + Send + Sync;

/// Shared handle to an implementation.
pub type Implementation = Arc<ImplFn>;

/// Shared handle to a type descriptor.
pub type TypeRef = Arc<TypeObject>;

/// Unique identity of a type descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    fn fresh() -> Self {
        static NEXT_ID: AtomicU32 = AtomicU32::new(1);
        TypeId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Kinds of values that carry no type descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Number,
    String,
    Function,
}

impl PrimitiveKind {
    /// The kind's name as reported in errors.
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Number => "number",
            PrimitiveKind::String => "string",
            PrimitiveKind::Function => "function",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Key of a dispatch table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKey {
    /// A concrete type descriptor.
    Type(TypeId),
    /// A primitive kind tag.
    Primitive(PrimitiveKind),
    /// The null value.
    Null,
    /// The universal default, root ancestor of every key.
    Default,
}

impl From<&TypeObject> for TypeKey {
    fn from(ty: &TypeObject) -> Self {
        TypeKey::Type(ty.id)
    }
}

impl From<&TypeRef> for TypeKey {
    fn from(ty: &TypeRef) -> Self {
        TypeKey::Type(ty.id)
    }
}

impl From<PrimitiveKind> for TypeKey {
    fn from(kind: PrimitiveKind) -> Self {
        TypeKey::Primitive(kind)
    }
}

/// Name reserved for a type's initializer. Members under this name are never
/// lifted into a namespace.
pub const CONSTRUCTOR: &str = "constructor";

/// A member declared directly on a type.
#[derive(Clone)]
pub enum Member {
    /// A callable taking the instance as receiver.
    Method(Implementation),
    /// A plain, non-callable value.
    Attribute(Value),
}

impl fmt::Debug for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Member::Method(_) => f.write_str("Method"),
            Member::Attribute(value) => f.debug_tuple("Attribute").field(value).finish(),
        }
    }
}

/// Runtime type descriptor.
pub struct TypeObject {
    id: TypeId,
    name: String,
    base: Option<TypeRef>,
    constructor: Option<Implementation>,
    members: IndexMap<String, Member>,
}

impl TypeObject {
    /// Start describing a new type.
    pub fn builder(name: impl Into<String>) -> TypeBuilder {
        TypeBuilder {
            name: name.into(),
            base: None,
            constructor: None,
            members: IndexMap::new(),
        }
    }

    /// A type with no base and no members.
    pub fn new(name: impl Into<String>) -> TypeRef {
        Self::builder(name).build()
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn key(&self) -> TypeKey {
        TypeKey::Type(self.id)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base(&self) -> Option<&TypeRef> {
        self.base.as_ref()
    }

    /// The ancestor chain, starting with this type and ending at the root,
    /// most specific first.
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors { next: Some(self) }
    }

    /// Look up a member declared directly on this type.
    pub fn own_member(&self, name: &str) -> Option<&Member> {
        self.members.get(name)
    }

    /// Members declared directly on this type, in declaration order. The
    /// constructor is not a member.
    pub fn own_members(&self) -> impl Iterator<Item = (&str, &Member)> {
        self.members.iter().map(|(name, member)| (name.as_str(), member))
    }

    /// Callable members declared directly on this type. Anything named
    /// [`CONSTRUCTOR`] is skipped.
    pub fn own_methods(&self) -> impl Iterator<Item = (&str, &Implementation)> {
        self.own_members().filter_map(|(name, member)| match member {
            Member::Method(method) if name != CONSTRUCTOR => Some((name, method)),
            Member::Method(_) | Member::Attribute(_) => None,
        })
    }

    /// The constructor declared on this type, if any.
    pub fn constructor(&self) -> Option<&Implementation> {
        self.constructor.as_ref()
    }
}

impl fmt::Debug for TypeObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeObject")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("base", &self.base.as_ref().map(|base| base.name()))
            .field("constructor", &self.constructor.is_some())
            .field("members", &self.members)
            .finish()
    }
}

impl fmt::Display for TypeObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Iterator over a type's ancestor chain.
pub struct Ancestors<'a> {
    next: Option<&'a TypeObject>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a TypeObject;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.base.as_deref();
        Some(current)
    }
}

/// Builder for [`TypeObject`].
pub struct TypeBuilder {
    name: String,
    base: Option<TypeRef>,
    constructor: Option<Implementation>,
    members: IndexMap<String, Member>,
}

impl TypeBuilder {
    /// Set the base type.
    pub fn extends(mut self, base: &TypeRef) -> Self {
        self.base = Some(Arc::clone(base));
        self
    }

    /// Declare the constructor. It is kept apart from the members.
    pub fn constructor<F>(mut self, ctor: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> DispatchResult<Value> + Send + Sync + 'static,
    {
        self.constructor = Some(Arc::new(ctor));
        self
    }

    /// Declare a method. Redeclaring a name replaces the earlier member.
    pub fn method<F>(mut self, name: impl Into<String>, method: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> DispatchResult<Value> + Send + Sync + 'static,
    {
        self.members.insert(name.into(), Member::Method(Arc::new(method)));
        self
    }

    /// Declare a non-callable attribute.
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.members.insert(name.into(), Member::Attribute(value.into()));
        self
    }

    pub fn build(self) -> TypeRef {
        Arc::new(TypeObject {
            id: TypeId::fresh(),
            name: self.name,
            base: self.base,
            constructor: self.constructor,
            members: self.members,
        })
    }
}
