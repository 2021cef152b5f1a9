//! Field path resolution against parsed JSON bodies.
//!
//! Paths use dotted or bracketed segments, so `user.password`,
//! `user[password]` and `users[0].name` are all accepted.

use serde_json::Value;

/// Resolves `path` against `root` and returns the value found there.
///
/// Returns `None` when the path is empty, `root` is not an object or array,
/// a segment is absent, or the walk ends on an object, array or `null`.
///
/// A scalar met before the last segment is returned as-is and the rest of
/// the path is ignored: `lookup({"user": "jane"}, "user.name")` yields
/// `"jane"`.
pub fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() || !is_container(root) {
        return None;
    }

    let path = path.replace(']', "");
    let mut current = root;
    for segment in path.split(['[', '.']) {
        let prop = child(current, segment)?;
        match prop {
            Value::Object(_) | Value::Array(_) => current = prop,
            Value::Null => return None,
            scalar => return Some(scalar),
        }
    }
    None
}

fn is_container(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

fn child<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment
            .parse::<usize>()
            .ok()
            // "01" is a distinct property name, not index 1.
            .filter(|index| index.to_string() == segment)
            .and_then(|index| items.get(index)),
        _ => None,
    }
}
