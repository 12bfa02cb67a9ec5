//! Dotted-path resolution over a JSON context.
//!
//! A context is any [`serde_json::Value`]; templates address into it with
//! dot-separated paths (`user.profile.email`). Resolution is a safe-navigation
//! walk: the moment a segment is absent, or the current value is something a
//! segment cannot index into, the whole path resolves to "missing" and the
//! caller leaves the token alone.
//!
//! Missing is distinct from falsy. An empty string, `0`, `false` and even a
//! JSON `null` are present values and substitute normally; only a path that
//! does not exist keeps its token.

use serde_json::Value;

/// Resolves a dotted path against a JSON context.
///
/// Path segments index objects by key and arrays by decimal position. Any
/// failure along the way yields `None`.
///
/// # Example
///
/// ```rust
/// use overlay_render::resolve_path;
/// use serde_json::json;
///
/// let context = json!({"user": {"links": [{"label": "blog"}]}});
///
/// let label = resolve_path(&context, "user.links.0.label");
/// assert_eq!(label, Some(&json!("blog")));
///
/// assert_eq!(resolve_path(&context, "user.links.7"), None);
/// assert_eq!(resolve_path(&context, "user.name"), None);
/// ```
pub fn resolve_path<'a>(context: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = context;

    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => {
                let index: usize = segment.parse().ok()?;
                items.get(index)?
            }
            _ => return None,
        };
    }

    Some(current)
}

/// Coerces a resolved value to the text that replaces its token.
///
/// Strings pass through verbatim, numbers render as decimal text, booleans as
/// their literal words. A `null` is a present value and renders as the word
/// `null`. Arrays and objects render as compact JSON; templates are not
/// expected to point at composites, so the form is unhelpful on purpose.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
