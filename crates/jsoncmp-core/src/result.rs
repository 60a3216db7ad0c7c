//! Aggregation of a diff tree into a scored report.
//!
//! A [`DiffReport`] is built once per comparison from the raw diff tree, the
//! expected value, and the weight specification, and is immutable thereafter.
//!
//! Suppression semantics: `failed` and `weighted_failed` are computed from
//! the diff *before* suppression filtering, so a `_suppress` node hides its
//! errors from the stored tree without changing the score. Grading stays
//! stable whether or not a subtree is hushed.

use crate::diff::DiffNode;
use crate::scoring::{attribute_count, weighted_attribute_count};
use crate::value::Value;
use crate::weights::WeightSpec;

/// The outcome of one comparison: the (suppression-filtered) diff tree and
/// the aggregate metrics derived from the raw tree.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffReport {
    /// The diff tree with suppressed leaves removed and emptied composites
    /// pruned.
    pub diff: DiffNode,
    /// Number of scalar leaves in the expected value.
    pub count: u64,
    /// Weighted number of scalar leaves in the expected value.
    pub weighted_count: f64,
    /// Number of error leaves, including suppressed ones.
    pub failed: u64,
    /// Sum of error-leaf weights, including suppressed ones.
    pub weighted_failed: f64,
    /// `max(0, (weighted_count - weighted_failed) / weighted_count)`, or 0
    /// when the expected value has no scalar leaves. Always within `[0, 1]`.
    pub similarity: f64,
    /// Non-fatal diagnostics, e.g. data keys colliding with reserved
    /// weight-specification keys.
    pub warnings: Vec<String>,
}

impl DiffReport {
    /// Builds a report from a raw diff tree.
    ///
    /// `weight` and `spec` must be the root weight and specification the
    /// diff was produced with, so that the weighted count and the weighted
    /// failures are measured on the same scale.
    pub fn build(
        diff: DiffNode,
        expected: &Value,
        weight: f64,
        spec: &WeightSpec,
        warnings: Vec<String>,
    ) -> Self {
        let count = attribute_count(expected);
        let weighted_count = weighted_attribute_count(expected, weight, spec);
        let failed = diff.error_count();
        let weighted_failed = diff.weighted_error_count();

        // Boosted missing/extra penalties can exceed the nominal weighted
        // count, so the ratio is clamped at zero.
        let similarity = if weighted_count == 0.0 {
            0.0
        } else {
            ((weighted_count - weighted_failed) / weighted_count).max(0.0)
        };

        Self {
            diff: diff.filter_suppressed(),
            count,
            weighted_count,
            failed,
            weighted_failed,
            similarity,
            warnings,
        }
    }

    /// Returns `true` when the comparison found no mismatches, suppressed
    /// ones included.
    pub fn is_match(&self) -> bool {
        self.failed == 0
    }
}
