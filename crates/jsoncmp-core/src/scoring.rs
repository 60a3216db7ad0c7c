//! Count and weight propagation over a value tree.
//!
//! [`attribute_count`] is the denominator of the unweighted score: one per
//! scalar leaf. [`weighted_attribute_count`] is the weighted denominator: the
//! multiplicative weight that would apply to an error at each scalar leaf,
//! summed over the tree. Keeping both in one place guarantees the comparator
//! and the result model agree on how weights propagate.

use crate::value::Value;
use crate::weights::WeightSpec;

/// Counts the scalar leaves of `value`. Empty arrays and objects contribute
/// nothing.
pub fn attribute_count(value: &Value) -> u64 {
    match value {
        Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::String(_) => 1,
        Value::Array(items) => items.iter().map(attribute_count).sum(),
        Value::Object(map) => map.values().map(attribute_count).sum(),
    }
}

/// Sums, over every scalar leaf of `value`, the multiplicative weight
/// accumulated on the path to it.
///
/// Object keys multiply by the spec's per-key weight and descend with the
/// key's nested spec; array elements all descend with `_content` (per-index
/// array weighting is not supported).
pub fn weighted_attribute_count(value: &Value, weight: f64, spec: &WeightSpec) -> f64 {
    match value {
        Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::String(_) => weight,
        Value::Array(items) => {
            let (mult, content) = spec.content();
            items
                .iter()
                .map(|item| weighted_attribute_count(item, weight * mult, content))
                .sum()
        }
        Value::Object(map) => map
            .iter()
            .map(|(key, child)| {
                let (mult, nested) = spec.child(key);
                weighted_attribute_count(child, weight * mult, nested)
            })
            .sum(),
    }
}
