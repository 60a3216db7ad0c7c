//! Ignore rules: a pure pre-processing rewrite applied to both inputs before
//! comparison.
//!
//! Rules mirror the shape of the value. At an object node each entry names a
//! key and how to treat it:
//!
//! - `"*"` — drop the key entirely.
//! - `{"_values": [...]}` — drop the key when its value is listed.
//! - `{"_list": rule}` — the key holds an array; apply `rule` to every
//!   element.
//! - any other object — recurse into the key.
//!
//! The output always has the same shape as the input or a subset of it.
//! Unknown rule shapes leave the value untouched; an empty rule set is the
//! identity transform.

use std::collections::BTreeMap;

use crate::value::Value;

/// Applies `rules` to `value`, returning the rewritten copy the comparison
/// will see.
pub fn transform(value: Value, rules: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let Some(rule_map) = rules.as_object() else {
                return Value::Object(map);
            };
            Value::Object(transform_object(map, rule_map))
        }
        Value::Array(items) => match rules.get("_list") {
            Some(element_rule) => Value::Array(
                items
                    .into_iter()
                    .map(|item| transform(item, element_rule))
                    .collect(),
            ),
            None => Value::Array(items),
        },
        scalar @ (Value::Null
        | Value::Bool(_)
        | Value::Int(_)
        | Value::Float(_)
        | Value::String(_)) => scalar,
    }
}

fn transform_object(
    map: BTreeMap<String, Value>,
    rules: &BTreeMap<String, Value>,
) -> BTreeMap<String, Value> {
    let mut out = BTreeMap::new();
    for (key, child) in map {
        match rules.get(&key) {
            None => {
                out.insert(key, child);
            }
            Some(rule) => {
                if rule.as_str() == Some("*") {
                    continue;
                }
                if let Some(dropped) = rule.get("_values").and_then(Value::as_array) {
                    if dropped.contains(&child) {
                        continue;
                    }
                    out.insert(key, child);
                    continue;
                }
                out.insert(key, transform(child, rule));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    fn v(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    #[test]
    fn empty_rules_are_the_identity() {
        let value = v(serde_json::json!({"a": 1, "b": [2, {"c": 3}]}));
        assert_eq!(transform(value.clone(), &v(serde_json::json!({}))), value);
    }

    #[test]
    fn wildcard_drops_the_key() {
        let out = transform(
            v(serde_json::json!({"keep": 1, "drop": 2})),
            &v(serde_json::json!({"drop": "*"})),
        );
        assert_eq!(out, v(serde_json::json!({"keep": 1})));
    }

    #[test]
    fn values_rule_drops_only_listed_values() {
        let rules = v(serde_json::json!({"status": {"_values": ["skipped", "n/a"]}}));
        let out = transform(v(serde_json::json!({"status": "skipped"})), &rules);
        assert_eq!(out, v(serde_json::json!({})));

        let out = transform(v(serde_json::json!({"status": "done"})), &rules);
        assert_eq!(out, v(serde_json::json!({"status": "done"})));
    }

    #[test]
    fn nested_rules_recurse() {
        let out = transform(
            v(serde_json::json!({"outer": {"drop": 1, "keep": 2}})),
            &v(serde_json::json!({"outer": {"drop": "*"}})),
        );
        assert_eq!(out, v(serde_json::json!({"outer": {"keep": 2}})));
    }

    #[test]
    fn list_rule_applies_to_every_element() {
        let rules = v(serde_json::json!({"items": {"_list": {"noise": "*"}}}));
        let out = transform(
            v(serde_json::json!({"items": [{"id": 1, "noise": "x"}, {"id": 2}]})),
            &rules,
        );
        assert_eq!(out, v(serde_json::json!({"items": [{"id": 1}, {"id": 2}]})));
    }

    #[test]
    fn rules_on_absent_keys_are_harmless() {
        let out = transform(
            v(serde_json::json!({"a": 1})),
            &v(serde_json::json!({"missing": "*"})),
        );
        assert_eq!(out, v(serde_json::json!({"a": 1})));
    }

    #[test]
    fn scalars_pass_through_any_rules() {
        let value = v(serde_json::json!(42));
        assert_eq!(
            transform(value.clone(), &v(serde_json::json!({"a": "*"}))),
            value
        );
    }
}
