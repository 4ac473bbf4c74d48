//! Dynamic values and receiver classification.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::builtins;
use crate::error::DispatchResult;
use crate::types::{PrimitiveKind, TypeKey, TypeRef};

/// A dynamically typed value.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    Function(Function),
    Object(Object),
}

/// How a receiver takes part in dispatch.
#[derive(Debug, Clone, Copy)]
pub enum Classification<'a> {
    /// An object with a runtime type descriptor.
    Typed(&'a TypeRef),
    /// The null value.
    Null,
    /// A value of a primitive kind.
    Primitive(PrimitiveKind),
}

impl Classification<'_> {
    /// The key a direct lookup uses for this receiver.
    pub fn key(&self) -> TypeKey {
        match self {
            Classification::Typed(ty) => ty.key(),
            Classification::Null => TypeKey::Null,
            Classification::Primitive(kind) => TypeKey::Primitive(*kind),
        }
    }
}

impl fmt::Display for Classification<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Typed(ty) => f.write_str(ty.name()),
            Classification::Null => f.write_str("null"),
            Classification::Primitive(kind) => f.write_str(kind.name()),
        }
    }
}

impl Value {
    /// Classify this value for dispatch.
    pub fn classify(&self) -> Classification<'_> {
        match self {
            Value::Null => Classification::Null,
            Value::Bool(_) => Classification::Primitive(PrimitiveKind::Boolean),
            Value::Number(_) => Classification::Primitive(PrimitiveKind::Number),
            Value::Str(_) => Classification::Primitive(PrimitiveKind::String),
            Value::Function(_) => Classification::Primitive(PrimitiveKind::Function),
            Value::Object(obj) => Classification::Typed(obj.class()),
        }
    }

    /// Human-readable type or kind of this value.
    pub fn type_name(&self) -> String {
        self.classify().to_string()
    }

    /// A `list` holding `elements`.
    pub fn list(elements: impl IntoIterator<Item = Value>) -> Self {
        Value::Object(Object::list(elements.into_iter().collect()))
    }

    /// An empty plain `object`.
    pub fn object() -> Self {
        Value::Object(Object::new(builtins::object_type()))
    }

    /// A field-less instance of `class`.
    pub fn instance(class: &TypeRef) -> Self {
        Value::Object(Object::new(class))
    }

    /// A native function value.
    pub fn function<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[Value]) -> DispatchResult<Value> + Send + Sync + 'static,
    {
        Value::Function(Function::new(name, f))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(func) => Some(func),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// The elements of a list-shaped object.
    pub fn as_list(&self) -> Option<&[Value]> {
        self.as_object().and_then(Object::elements)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Value::Function(func) => write!(f, "Function({})", func.name()),
            Value::Object(obj) => fmt::Debug::fmt(obj, f),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Object> for Value {
    fn from(obj: Object) -> Self {
        Value::Object(obj)
    }
}

impl From<Vec<Value>> for Value {
    fn from(elements: Vec<Value>) -> Self {
        Value::Object(Object::list(elements))
    }
}

/// JSON arrays become `list` objects and JSON objects become plain `object`
/// instances.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => Value::list(items.into_iter().map(Value::from)),
            serde_json::Value::Object(map) => {
                let fields = map.into_iter().map(|(k, v)| (k, Value::from(v))).collect();
                Value::Object(Object::with_fields(builtins::object_type(), fields))
            }
        }
    }
}

/// Native callable value.
#[derive(Clone)]
pub struct Function {
    name: Arc<str>,
    f: Arc<dyn Fn(&[Value]) -> DispatchResult<Value> + Send + Sync>,
}

impl Function {
    pub fn new<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[Value]) -> DispatchResult<Value> + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name.into()),
            f: Arc::new(f),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, args: &[Value]) -> DispatchResult<Value> {
        (self.f)(args)
    }

    /// Check whether both handles share the same callable.
    pub fn ptr_eq(&self, other: &Function) -> bool {
        Arc::ptr_eq(&self.f, &other.f)
    }
}

/// Contents of an object.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Named fields.
    Fields(IndexMap<String, Value>),
    /// Ordered elements (lists).
    Elements(Vec<Value>),
}

/// An instance of a type descriptor. Cheap to clone; contents are immutable.
#[derive(Clone)]
pub struct Object(Arc<ObjectData>);

struct ObjectData {
    class: TypeRef,
    payload: Payload,
}

impl Object {
    /// An instance of `class` with no fields.
    pub fn new(class: &TypeRef) -> Self {
        Self::with_fields(class, IndexMap::new())
    }

    pub fn with_fields(class: &TypeRef, fields: IndexMap<String, Value>) -> Self {
        Self::with_payload(class, Payload::Fields(fields))
    }

    /// An instance of the built-in `list` type.
    pub fn list(elements: Vec<Value>) -> Self {
        Self::with_payload(builtins::list_type(), Payload::Elements(elements))
    }

    pub fn with_payload(class: &TypeRef, payload: Payload) -> Self {
        Object(Arc::new(ObjectData {
            class: Arc::clone(class),
            payload,
        }))
    }

    /// The object's runtime type.
    pub fn class(&self) -> &TypeRef {
        &self.0.class
    }

    pub fn payload(&self) -> &Payload {
        &self.0.payload
    }

    pub fn elements(&self) -> Option<&[Value]> {
        match &self.0.payload {
            Payload::Elements(elements) => Some(elements),
            Payload::Fields(_) => None,
        }
    }

    pub fn fields(&self) -> Option<&IndexMap<String, Value>> {
        match &self.0.payload {
            Payload::Fields(fields) => Some(fields),
            Payload::Elements(_) => None,
        }
    }

    /// Read a field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields().and_then(|fields| fields.get(field))
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.0.class.id() == other.0.class.id() && self.0.payload == other.0.payload)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.payload {
            Payload::Elements(elements) => f.debug_list().entries(elements).finish(),
            Payload::Fields(fields) => {
                write!(f, "{} ", self.0.class.name())?;
                f.debug_map().entries(fields).finish()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_primitives() {
        assert_eq!(Value::from(2).classify().key(), TypeKey::Primitive(PrimitiveKind::Number));
        assert_eq!(Value::from("abc").classify().key(), TypeKey::Primitive(PrimitiveKind::String));
        assert_eq!(Value::from(true).classify().key(), TypeKey::Primitive(PrimitiveKind::Boolean));
        assert_eq!(Value::Null.classify().key(), TypeKey::Null);
    }

    #[test]
    fn test_classify_objects_by_runtime_type() {
        let list = Value::list([Value::from(1)]);
        assert_eq!(list.classify().key(), builtins::list_type().key());
        assert_eq!(Value::object().classify().key(), builtins::object_type().key());
        assert_eq!(list.type_name(), "list");
        assert_eq!(Value::Null.type_name(), "null");
    }

    #[test]
    fn test_from_json() {
        let value = Value::from(json!({ "xs": [1, 2], "name": "p" }));
        let obj = value.as_object().unwrap();
        assert_eq!(obj.class().name(), "object");
        assert_eq!(obj.get("name"), Some(&Value::from("p")));
        assert_eq!(
            obj.get("xs").and_then(Value::as_list),
            Some(&[Value::from(1), Value::from(2)][..])
        );
    }

    #[test]
    fn test_function_equality_is_identity() {
        let f = Value::function("id", |args| Ok(args[0].clone()));
        let g = Value::function("id", |args| Ok(args[0].clone()));
        assert_eq!(f, f.clone());
        assert_ne!(f, g);
    }
}
