//! Built-in type descriptors.
//!
//! `object` is the root type of plain objects. `list` extends it and declares
//! its operations as own methods, so a namespace can lift them with
//! [`Namespace::derive_from`](crate::Namespace::derive_from).

use std::slice;
use std::sync::OnceLock;

use crate::error::{DispatchError, DispatchResult};
use crate::types::{TypeObject, TypeRef};
use crate::value::{Function, Value};

/// The `object` type.
pub fn object_type() -> &'static TypeRef {
    static OBJECT: OnceLock<TypeRef> = OnceLock::new();
    OBJECT.get_or_init(|| TypeObject::new("object"))
}

/// The `list` type.
pub fn list_type() -> &'static TypeRef {
    static LIST: OnceLock<TypeRef> = OnceLock::new();
    LIST.get_or_init(|| {
        TypeObject::builder("list")
            .extends(object_type())
            .constructor(|_, args| Ok(Value::list(args.iter().cloned())))
            .method("map", list_map)
            .method("reduce", list_reduce)
            .method("reverse", list_reverse)
            .method("len", list_len)
            .method("concat", list_concat)
            .build()
    })
}

fn elements<'a>(receiver: &'a Value, method: &str) -> DispatchResult<&'a [Value]> {
    receiver.as_list().ok_or_else(|| {
        DispatchError::raised(format!(
            "list.{method} called on a value of type {}",
            receiver.type_name()
        ))
    })
}

fn callback<'a>(args: &'a [Value], method: &str) -> DispatchResult<&'a Function> {
    match args.first() {
        Some(Value::Function(f)) => Ok(f),
        Some(other) => Err(DispatchError::raised(format!(
            "list.{method} expects a function, got {}",
            other.type_name()
        ))),
        None => Err(DispatchError::raised(format!(
            "list.{method} expects a function argument"
        ))),
    }
}

fn list_map(receiver: &Value, args: &[Value]) -> DispatchResult<Value> {
    let items = elements(receiver, "map")?;
    let f = callback(args, "map")?;
    let mapped = items
        .iter()
        .map(|item| f.call(slice::from_ref(item)))
        .collect::<DispatchResult<Vec<_>>>()?;
    Ok(Value::list(mapped))
}

fn list_reduce(receiver: &Value, args: &[Value]) -> DispatchResult<Value> {
    let items = elements(receiver, "reduce")?;
    let f = callback(args, "reduce")?;

    let mut rest = items.iter();
    let mut acc = match args.get(1) {
        Some(init) => init.clone(),
        None => rest
            .next()
            .cloned()
            .ok_or_else(|| DispatchError::raised("reduce of empty list with no initial value"))?,
    };
    for item in rest {
        acc = f.call(&[acc, item.clone()])?;
    }
    Ok(acc)
}

fn list_reverse(receiver: &Value, _args: &[Value]) -> DispatchResult<Value> {
    let items = elements(receiver, "reverse")?;
    Ok(Value::list(items.iter().rev().cloned()))
}

fn list_len(receiver: &Value, _args: &[Value]) -> DispatchResult<Value> {
    let items = elements(receiver, "len")?;
    Ok(Value::Number(items.len() as f64))
}

fn list_concat(receiver: &Value, args: &[Value]) -> DispatchResult<Value> {
    let items = elements(receiver, "concat")?;
    let other: &[Value] = match args.first() {
        Some(value) => elements(value, "concat")?,
        None => &[],
    };
    Ok(Value::list(items.iter().chain(other).cloned()))
}
