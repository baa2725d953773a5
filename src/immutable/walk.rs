//! Lockstep structural diff over external JSON values
//!
//! The walker descends two same-typed value trees depth-first in declaration
//! order, guided by the type's [`PolicyNode`] tree. It unwinds immediately
//! with the first violation found; sibling fields are never inspected once
//! one violation exists, which keeps the reported target deterministic for
//! identical inputs.

use serde_json::{Map, Value};

use super::policy::{MutabilityPolicy, PolicyNode};

/// First detected change to a non-mutable field
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Violation {
    /// External (lower-camel) path of the offending field
    pub target: String,
}

impl Violation {
    fn at(path: &str) -> Self {
        Self {
            target: path.to_string(),
        }
    }
}

/// Compare `desired` against `current` under `policy`, guided by `node`
///
/// `None` and JSON null are both treated as absence. Returns the first
/// violation in depth-first declaration order, or `None` when no non-mutable
/// field changed.
pub(crate) fn walk(
    path: &str,
    policy: MutabilityPolicy,
    desired: Option<&Value>,
    current: Option<&Value>,
    node: &PolicyNode,
) -> Option<Violation> {
    if policy.is_mutable() {
        return None;
    }

    let desired = desired.filter(|v| !v.is_null());
    let current = current.filter(|v| !v.is_null());

    match (desired, current) {
        (None, None) => None,
        // Presence mismatch. An empty container on one side and absence on
        // the other carry the same information and must not be flagged.
        (Some(only), None) | (None, Some(only)) => {
            if is_empty_container(only) {
                None
            } else {
                Some(Violation::at(path))
            }
        }
        (Some(d), Some(c)) => match (d, c) {
            (Value::Object(d_obj), Value::Object(c_obj)) => {
                walk_object(path, policy, d_obj, c_obj, node)
            }
            (Value::Array(d_arr), Value::Array(c_arr)) => {
                reconcile(path, policy, d_arr, c_arr, node)
            }
            (d, c) => {
                if leaf_equal(policy, d, c) {
                    None
                } else {
                    Some(Violation::at(path))
                }
            }
        },
    }
}

/// Struct and map descent
///
/// Structs iterate desired's entries in declaration order (the serializer
/// preserves field order), resolving each field's tag against the tree;
/// fields present only in current are then checked for removal. Map-typed
/// fields follow the keyed-collection rule instead: entries match by key,
/// and additions/removals are not per-entry violations.
fn walk_object(
    path: &str,
    policy: MutabilityPolicy,
    d_obj: &Map<String, Value>,
    c_obj: &Map<String, Value>,
    node: &PolicyNode,
) -> Option<Violation> {
    if node.is_map() {
        for (key, d_val) in d_obj {
            if let Some(c_val) = c_obj.get(key) {
                let entry_path = format!("{path}['{key}']");
                let v = walk(&entry_path, policy, Some(d_val), Some(c_val), node.element());
                if v.is_some() {
                    return v;
                }
            }
        }
        return None;
    }

    for (name, d_val) in d_obj {
        let (tag_policy, child_node) = node.field_policy(name);
        let child_policy = policy.descend(tag_policy);
        if child_policy.is_mutable() {
            continue;
        }
        let child_path = join(path, name);
        let v = walk(
            &child_path,
            child_policy,
            Some(d_val),
            c_obj.get(name),
            child_node,
        );
        if v.is_some() {
            return v;
        }
    }

    // Fields the desired document dropped entirely.
    for (name, c_val) in c_obj {
        if d_obj.contains_key(name) {
            continue;
        }
        let (tag_policy, child_node) = node.field_policy(name);
        let child_policy = policy.descend(tag_policy);
        if child_policy.is_mutable() {
            continue;
        }
        let child_path = join(path, name);
        let v = walk(&child_path, child_policy, None, Some(c_val), child_node);
        if v.is_some() {
            return v;
        }
    }

    None
}

/// Slice reconciliation
///
/// When every element on both sides is an object exposing a string under the
/// node's key attribute, elements match by key in desired's iteration order:
/// additions and removals are not violations (whole-collection mutability
/// belongs to the collection field's own tag), and matched pairs recurse with
/// the literal key in the path. Otherwise elements compare positionally, and
/// a length mismatch is a violation at the collection path itself.
fn reconcile(
    path: &str,
    policy: MutabilityPolicy,
    desired: &[Value],
    current: &[Value],
    node: &PolicyNode,
) -> Option<Violation> {
    let key_attr = node.key_attribute();

    if let (Some(d_keys), Some(c_keys)) = (element_keys(desired, key_attr), element_keys(current, key_attr)) {
        // Last occurrence wins when one side carries duplicate keys; the
        // request-shape validator has already rejected duplicates upstream.
        let mut index = std::collections::HashMap::with_capacity(current.len());
        for (key, element) in c_keys.iter().zip(current) {
            index.insert(key.as_str(), element);
        }

        for (key, d_element) in d_keys.iter().zip(desired) {
            if let Some(&c_element) = index.get(key.as_str()) {
                let element_path = format!("{path}['{key}']");
                let v = walk(
                    &element_path,
                    policy,
                    Some(d_element),
                    Some(c_element),
                    node.element(),
                );
                if v.is_some() {
                    return v;
                }
            }
        }
        return None;
    }

    if desired.len() != current.len() {
        return Some(Violation::at(path));
    }
    for (i, (d_element, c_element)) in desired.iter().zip(current).enumerate() {
        let element_path = format!("{path}[{i}]");
        let v = walk(
            &element_path,
            policy,
            Some(d_element),
            Some(c_element),
            node.element(),
        );
        if v.is_some() {
            return v;
        }
    }
    None
}

/// Keys of every element, or `None` if any element lacks a string key
fn element_keys(elements: &[Value], key_attr: &str) -> Option<Vec<String>> {
    elements
        .iter()
        .map(|e| e.get(key_attr).and_then(Value::as_str).map(str::to_owned))
        .collect()
}

/// Leaf equality under the resolved policy
///
/// Strict policy is deep value equality for every leaf kind. The
/// case-insensitive policy folds string pairs before comparing and falls
/// back to strict equality for non-string leaves, where case has no meaning.
fn leaf_equal(policy: MutabilityPolicy, a: &Value, b: &Value) -> bool {
    if a == b {
        return true;
    }
    if policy == MutabilityPolicy::ImmutableCaseInsensitive {
        if let (Value::String(a), Value::String(b)) = (a, b) {
            return a.to_lowercase() == b.to_lowercase();
        }
    }
    false
}

fn is_empty_container(v: &Value) -> bool {
    match v {
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    }
}

fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}
