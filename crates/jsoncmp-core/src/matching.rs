//! List matching: pairing the elements of two arrays before diffing them.
//!
//! Array comparison must tolerate reordering and partial mismatches, so
//! element pairing is a global optimization, not a greedy scan: a locally
//! good pair can block a better overall pairing when several elements are
//! structurally similar. The matcher builds a pairwise similarity matrix,
//! solves the rectangular assignment problem over it, discards pairs below
//! the spec's `_pairing_threshold`, and classifies everything left over as
//! missing (expected side) or extra (actual side).

use crate::assignment::max_sum_assignment;
use crate::compare::Compare;
use crate::diff::{DiffKey, DiffNode, ErrorKind, ErrorRecord};
use crate::scoring::weighted_attribute_count;
use crate::value::Value;
use crate::weights::WeightSpec;

/// Pairs the elements of `expected` and `actual` and produces the diff
/// entries for an array comparison, in ascending expected-index order
/// followed by ascending extra order.
///
/// Matched pairs recurse into the comparator under the `_content` spec; a
/// non-empty result lands at the expected element's index. Unmatched
/// expected elements emit `MissingListItem` at their index; unmatched actual
/// elements emit `ExtraListItem` at `extra_<index>`.
pub fn match_content(
    cmp: &Compare,
    expected: &[Value],
    actual: &[Value],
    weight: f64,
    spec: &WeightSpec,
    suppressed: bool,
) -> Vec<(DiffKey, DiffNode)> {
    let (content_mult, content) = spec.content();
    let elem_weight = weight * content_mult;
    let elem_suppressed = suppressed || content.suppress();

    let mut entries: Vec<(DiffKey, DiffNode)> = Vec::new();

    // With an empty side there is nothing to pair against; every element of
    // the other side is unmatched.
    if expected.is_empty() || actual.is_empty() {
        for (i, item) in expected.iter().enumerate() {
            entries.push((
                DiffKey::Index(i),
                missing_item(item, weight, spec, content, elem_suppressed),
            ));
        }
        for (j, item) in actual.iter().enumerate() {
            entries.push((
                DiffKey::Extra(j),
                extra_item(item, weight, spec, content, elem_suppressed),
            ));
        }
        return entries;
    }

    // Similarity matrix: elements of different variants can never pair.
    let scores: Vec<Vec<f64>> = expected
        .iter()
        .map(|e| {
            actual
                .iter()
                .map(|a| {
                    if e.kind() == a.kind() {
                        pair_similarity(cmp, e, a, elem_weight, content)
                    } else {
                        0.0
                    }
                })
                .collect()
        })
        .collect();

    let threshold = spec.pairing_threshold();
    let mut col_for_row: Vec<Option<usize>> = vec![None; expected.len()];
    let mut col_matched = vec![false; actual.len()];
    for (i, j) in max_sum_assignment(&scores) {
        // A pair below the threshold counts as unmatched on both sides.
        if scores[i][j] >= threshold {
            col_for_row[i] = Some(j);
            col_matched[j] = true;
        }
    }

    for (i, item) in expected.iter().enumerate() {
        match col_for_row[i] {
            Some(j) => {
                let diff = cmp.diff_value(item, &actual[j], elem_weight, content, elem_suppressed);
                if !diff.is_empty() {
                    entries.push((DiffKey::Index(i), diff));
                }
            }
            None => entries.push((
                DiffKey::Index(i),
                missing_item(item, weight, spec, content, elem_suppressed),
            )),
        }
    }

    for (j, item) in actual.iter().enumerate() {
        if !col_matched[j] {
            entries.push((
                DiffKey::Extra(j),
                extra_item(item, weight, spec, content, elem_suppressed),
            ));
        }
    }

    entries
}

/// Similarity of a candidate pair: `1 - weighted_failed / weighted_count`,
/// clamped to `[0, 1]`. Exactly 1.0 for an exact match (including elements
/// with no scalar leaves, where the weighted count is zero).
fn pair_similarity(cmp: &Compare, e: &Value, a: &Value, weight: f64, spec: &WeightSpec) -> f64 {
    let diff = cmp.diff_value(e, a, weight, spec, false);
    if diff.is_empty() {
        return 1.0;
    }
    let weighted_count = weighted_attribute_count(e, weight, spec);
    if weighted_count <= 0.0 {
        return 0.0;
    }
    ((weighted_count - diff.weighted_error_count()) / weighted_count).clamp(0.0, 1.0)
}

fn missing_item(
    item: &Value,
    weight: f64,
    spec: &WeightSpec,
    content: &WeightSpec,
    suppressed: bool,
) -> DiffNode {
    let boost = if spec.boost_missing() {
        weighted_attribute_count(item, 1.0, content)
    } else {
        1.0
    };
    DiffNode::Leaf(ErrorRecord::new(
        ErrorKind::MissingListItem,
        Some(scalar_or_type_name(item)),
        None,
        weight * spec.missing_weight() * boost,
        suppressed,
    ))
}

fn extra_item(
    item: &Value,
    weight: f64,
    spec: &WeightSpec,
    content: &WeightSpec,
    suppressed: bool,
) -> DiffNode {
    let boost = if spec.boost_extra() {
        weighted_attribute_count(item, 1.0, content)
    } else {
        1.0
    };
    DiffNode::Leaf(ErrorRecord::new(
        ErrorKind::ExtraListItem,
        None,
        Some(scalar_or_type_name(item)),
        weight * spec.extra_weight() * boost,
        suppressed,
    ))
}

/// Records a scalar verbatim; composites are recorded by type name, since an
/// error record carries scalars only.
fn scalar_or_type_name(value: &Value) -> Value {
    if value.is_scalar() {
        value.clone()
    } else {
        Value::String(value.type_name().to_owned())
    }
}
