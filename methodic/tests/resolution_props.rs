//! Property tests for ancestor resolution and its cache.

use std::sync::Arc;

use methodic::{DispatchTable, Implementation, TypeKey, TypeObject, TypeRef, Value};
use proptest::prelude::*;

/// Build a linear hierarchy; index 0 is the root, the last type is the most
/// derived.
fn hierarchy(depth: usize) -> Vec<TypeRef> {
    let mut types: Vec<TypeRef> = Vec::with_capacity(depth);
    for level in 0..depth {
        let builder = TypeObject::builder(format!("T{level}"));
        let ty = match types.last() {
            Some(base) => builder.extends(base).build(),
            None => builder.build(),
        };
        types.push(ty);
    }
    types
}

fn tagged(level: usize) -> Implementation {
    Arc::new(move |_: &Value, _: &[Value]| Ok(Value::Number(level as f64)))
}

proptest! {
    #[test]
    fn resolves_nearest_registered_ancestor(
        registered in prop::collection::vec(any::<bool>(), 1..12),
        with_default in any::<bool>(),
    ) {
        let types = hierarchy(registered.len());
        let table = DispatchTable::new("probe");
        for (level, on) in registered.iter().enumerate() {
            if *on {
                table.implement_shared(&types[level], tagged(level));
            }
        }
        if with_default {
            table.implement(TypeKey::Default, |_, _| Ok(Value::from("default")));
        }

        let leaf = types.last().unwrap();
        let nearest = registered.iter().rposition(|on| *on);
        let result = table.invoke(&Value::instance(leaf), &[]);

        match nearest {
            Some(level) => {
                prop_assert_eq!(result.unwrap(), Value::Number(level as f64));
                // Everything from the leaf down to the match is now direct.
                for ty in &types[level..] {
                    prop_assert!(table.contains(ty));
                }
                // Nothing above the match was touched.
                for (above, on) in types[..level].iter().zip(&registered) {
                    prop_assert_eq!(table.contains(above), *on);
                }
            }
            None if with_default => {
                prop_assert_eq!(result.unwrap(), Value::from("default"));
                prop_assert_eq!(table.len(), 1);
            }
            None => prop_assert!(result.is_err()),
        }
    }

    #[test]
    fn cached_dispatch_matches_first_dispatch(depth in 1usize..10, root_only in any::<bool>()) {
        let types = hierarchy(depth);
        let table = DispatchTable::new("probe");
        let target = if root_only { 0 } else { depth / 2 };
        table.implement_shared(&types[target], tagged(target));

        let leaf = Value::instance(types.last().unwrap());
        let first = table.invoke(&leaf, &[]).unwrap();
        table.remove(&types[target]);
        let second = table.invoke(&leaf, &[]);

        if target == depth - 1 {
            // The leaf itself was the registered type, so nothing was cached.
            prop_assert!(second.is_err());
        } else {
            prop_assert_eq!(second.unwrap(), first);
        }
    }
}
