//! The diff tree: the recursive result of a comparison.
//!
//! An empty composite means "no difference"; a non-empty tree nests
//! [`ErrorRecord`] leaves under object-key and array-index paths. Emptiness is
//! a structural check ([`DiffNode::is_empty`]), not comparison against a
//! shared sentinel, and composites keep insertion order so the tree iterates
//! the way it was built (expected keys first, then actual-only keys; array
//! entries in ascending index order, then extras).

use std::fmt;

use crate::value::Value;

/// The mismatch taxonomy. Every comparison outcome is one of these kinds
/// attached to a leaf; there is no error control flow for mismatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The two values have different variants.
    TypesNotEqual,
    /// Same variant, different scalar values.
    ValuesNotEqual,
    /// An expected object key is absent from the actual object.
    KeyNotExist,
    /// The actual object carries a key the expected object lacks.
    UnexpectedKey,
    /// The two arrays differ in length.
    LengthsNotEqual,
    /// An expected array element found no acceptable pairing.
    MissingListItem,
    /// An actual array element found no acceptable pairing.
    ExtraListItem,
}

impl ErrorKind {
    /// Returns the kind's name as used in serialized reports.
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::TypesNotEqual => "TypesNotEqual",
            ErrorKind::ValuesNotEqual => "ValuesNotEqual",
            ErrorKind::KeyNotExist => "KeyNotExist",
            ErrorKind::UnexpectedKey => "UnexpectedKey",
            ErrorKind::LengthsNotEqual => "LengthsNotEqual",
            ErrorKind::MissingListItem => "MissingListItem",
            ErrorKind::ExtraListItem => "ExtraListItem",
        }
    }
}

/// A single mismatch found at some path of the comparison.
///
/// `expected`/`received` carry scalars verbatim; composites and type
/// mismatches are recorded by type name. Absence of a record at a path means
/// the subtree matches exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorRecord {
    /// What went wrong.
    pub kind: ErrorKind,
    /// The expected side of the mismatch, when meaningful.
    pub expected: Option<Value>,
    /// The received side of the mismatch, when meaningful.
    pub received: Option<Value>,
    /// The multiplicative weight accumulated on the path to this leaf,
    /// including missing/extra multipliers and boosts.
    pub weight: f64,
    /// Whether a `_suppress` node on the path hides this record from the
    /// reported diff tree.
    pub suppressed: bool,
}

impl ErrorRecord {
    /// Creates a record for the given kind and sides.
    pub fn new(
        kind: ErrorKind,
        expected: Option<Value>,
        received: Option<Value>,
        weight: f64,
        suppressed: bool,
    ) -> Self {
        Self {
            kind,
            expected,
            received,
            weight,
            suppressed,
        }
    }

    /// Renders the record's human-readable message.
    pub fn message(&self) -> String {
        let e = DisplayOpt(self.expected.as_ref());
        let r = DisplayOpt(self.received.as_ref());
        match self.kind {
            ErrorKind::TypesNotEqual => {
                format!("Types not equal. Expected: <{e}>, received: <{r}>")
            }
            ErrorKind::ValuesNotEqual => {
                format!("Values not equal. Expected: <{e}>, received: <{r}>")
            }
            ErrorKind::KeyNotExist => format!("Key does not exist. Expected: <{e}>"),
            ErrorKind::UnexpectedKey => format!("Unexpected key. Received: <{r}>"),
            ErrorKind::LengthsNotEqual => {
                format!("Lengths not equal. Expected <{e}>, received: <{r}>")
            }
            ErrorKind::MissingListItem => format!("List item not found. Expected: <{e}>"),
            ErrorKind::ExtraListItem => format!("Unexpected list item. Received: <{r}>"),
        }
    }
}

/// Displays an optional value, rendering `None` as `null` like the report
/// serialization does.
struct DisplayOpt<'a>(Option<&'a Value>);

impl fmt::Display for DisplayOpt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{v}"),
            None => write!(f, "null"),
        }
    }
}

/// A key in a diff composite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffKey {
    /// An object field name.
    Key(String),
    /// A matched or unmatched expected array index.
    Index(usize),
    /// An unmatched actual array index, rendered `extra_<n>`.
    Extra(usize),
    /// The array length-mismatch marker, rendered `_length`.
    Length,
}

impl fmt::Display for DiffKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffKey::Key(s) => write!(f, "{s}"),
            DiffKey::Index(i) => write!(f, "{i}"),
            DiffKey::Extra(i) => write!(f, "extra_{i}"),
            DiffKey::Length => write!(f, "_length"),
        }
    }
}

impl From<&str> for DiffKey {
    fn from(s: &str) -> Self {
        DiffKey::Key(s.to_owned())
    }
}

impl From<usize> for DiffKey {
    fn from(i: usize) -> Self {
        DiffKey::Index(i)
    }
}

/// A node of the diff tree: an error leaf, or a composite of keyed children
/// in insertion order. `Branch(vec![])` is the "no difference" value.
#[derive(Debug, Clone, PartialEq)]
pub enum DiffNode {
    /// A composite of keyed children.
    Branch(Vec<(DiffKey, DiffNode)>),
    /// A single mismatch.
    Leaf(ErrorRecord),
}

impl Default for DiffNode {
    fn default() -> Self {
        DiffNode::empty()
    }
}

impl DiffNode {
    /// Returns the empty composite ("no difference").
    pub fn empty() -> Self {
        DiffNode::Branch(Vec::new())
    }

    /// Returns `true` if this node records no difference.
    pub fn is_empty(&self) -> bool {
        match self {
            DiffNode::Branch(children) => children.is_empty(),
            DiffNode::Leaf(_) => false,
        }
    }

    /// Returns the child at `key`, for branch nodes.
    pub fn get(&self, key: &DiffKey) -> Option<&DiffNode> {
        match self {
            DiffNode::Branch(children) => {
                children.iter().find(|(k, _)| k == key).map(|(_, v)| v)
            }
            DiffNode::Leaf(_) => None,
        }
    }

    /// Counts the error leaves in this tree.
    pub fn error_count(&self) -> u64 {
        match self {
            DiffNode::Leaf(_) => 1,
            DiffNode::Branch(children) => children.iter().map(|(_, c)| c.error_count()).sum(),
        }
    }

    /// Sums the weights of the error leaves in this tree.
    pub fn weighted_error_count(&self) -> f64 {
        match self {
            DiffNode::Leaf(record) => record.weight,
            DiffNode::Branch(children) => {
                children.iter().map(|(_, c)| c.weighted_error_count()).sum()
            }
        }
    }

    /// Returns a copy of this tree with suppressed leaves removed and
    /// now-empty composites pruned.
    pub fn filter_suppressed(&self) -> DiffNode {
        self.prune_suppressed().unwrap_or_else(DiffNode::empty)
    }

    fn prune_suppressed(&self) -> Option<DiffNode> {
        match self {
            DiffNode::Leaf(record) => {
                if record.suppressed {
                    None
                } else {
                    Some(DiffNode::Leaf(record.clone()))
                }
            }
            DiffNode::Branch(children) => {
                let kept: Vec<(DiffKey, DiffNode)> = children
                    .iter()
                    .filter_map(|(k, c)| c.prune_suppressed().map(|c| (k.clone(), c)))
                    .collect();
                if kept.is_empty() && !children.is_empty() {
                    None
                } else {
                    Some(DiffNode::Branch(kept))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    fn leaf(kind: ErrorKind, weight: f64, suppressed: bool) -> DiffNode {
        DiffNode::Leaf(ErrorRecord::new(
            kind,
            Some(Value::Int(1)),
            Some(Value::Int(2)),
            weight,
            suppressed,
        ))
    }

    #[test]
    fn empty_branch_records_no_difference() {
        assert!(DiffNode::empty().is_empty());
        assert!(!leaf(ErrorKind::ValuesNotEqual, 1.0, false).is_empty());
        assert!(!DiffNode::Branch(vec![("k".into(), DiffNode::empty())]).is_empty());
    }

    #[test]
    fn counts_sum_over_nested_leaves() {
        let tree = DiffNode::Branch(vec![
            ("a".into(), leaf(ErrorKind::ValuesNotEqual, 3.0, false)),
            (
                "b".into(),
                DiffNode::Branch(vec![
                    (DiffKey::Index(0), leaf(ErrorKind::MissingListItem, 2.0, false)),
                    (DiffKey::Length, leaf(ErrorKind::LengthsNotEqual, 0.5, false)),
                ]),
            ),
        ]);
        assert_eq!(tree.error_count(), 3);
        assert!((tree.weighted_error_count() - 5.5).abs() < 1e-12);
    }

    #[test]
    fn filter_removes_suppressed_leaves_and_prunes_empties() {
        let tree = DiffNode::Branch(vec![
            ("kept".into(), leaf(ErrorKind::ValuesNotEqual, 1.0, false)),
            (
                "gone".into(),
                DiffNode::Branch(vec![(
                    "inner".into(),
                    leaf(ErrorKind::ValuesNotEqual, 1.0, true),
                )]),
            ),
        ]);
        let filtered = tree.filter_suppressed();
        assert!(filtered.get(&"kept".into()).is_some());
        assert!(filtered.get(&"gone".into()).is_none(), "empty composite must be pruned");
        // Metrics on the unfiltered tree still see both leaves.
        assert_eq!(tree.error_count(), 2);
    }

    #[test]
    fn fully_suppressed_tree_filters_to_empty() {
        let tree = DiffNode::Branch(vec![(
            "a".into(),
            leaf(ErrorKind::ValuesNotEqual, 1.0, true),
        )]);
        assert!(tree.filter_suppressed().is_empty());
        // A suppressed root leaf filters to the empty composite as well.
        assert!(leaf(ErrorKind::ValuesNotEqual, 1.0, true)
            .filter_suppressed()
            .is_empty());
    }

    #[test]
    fn diff_keys_render_like_the_report() {
        assert_eq!(DiffKey::Key("name".to_owned()).to_string(), "name");
        assert_eq!(DiffKey::Index(3).to_string(), "3");
        assert_eq!(DiffKey::Extra(4).to_string(), "extra_4");
        assert_eq!(DiffKey::Length.to_string(), "_length");
    }

    #[test]
    fn messages_follow_the_report_templates() {
        let record = ErrorRecord::new(
            ErrorKind::ValuesNotEqual,
            Some(Value::Int(1)),
            Some(Value::Int(2)),
            1.0,
            false,
        );
        assert_eq!(record.message(), "Values not equal. Expected: <1>, received: <2>");

        let record = ErrorRecord::new(
            ErrorKind::KeyNotExist,
            Some(Value::String("bool".to_owned())),
            None,
            1.0,
            false,
        );
        assert_eq!(record.message(), "Key does not exist. Expected: <bool>");

        let record = ErrorRecord::new(
            ErrorKind::TypesNotEqual,
            Some(Value::String("float".to_owned())),
            Some(Value::String("int".to_owned())),
            1.0,
            false,
        );
        assert_eq!(
            record.message(),
            "Types not equal. Expected: <float>, received: <int>"
        );
    }
}
