//! Weight specifications: the parallel sparse tree of importance multipliers
//! and structural control flags threaded through a comparison.
//!
//! A specification mirrors the shape of the expected value. At any object or
//! array node the reserved leading-underscore keys control scoring:
//!
//! - `_weight` — multiplier for this node and everything beneath it.
//! - `_content` — spec applied uniformly to every array element.
//! - `_length` — multiplier for the array length-mismatch penalty.
//! - `_missing` / `_extra` — multipliers for unmatched-expected and
//!   unmatched-actual penalties.
//! - `_boost_missing` / `_boost_extra` — scale the missing/extra penalty by
//!   the structural weight total of the unmatched subtree instead of a flat
//!   multiplier.
//! - `_pairing_threshold` — minimum similarity for two array elements to pair.
//! - `_suppress` — hide this subtree's errors from the reported diff tree.
//!
//! Any other key is a per-key entry: a bare number (shorthand for
//! `{"_weight": n}`) or a nested specification.
//!
//! # Descent contract
//!
//! A spec's own `_weight` is applied by whoever descends into it:
//! [`WeightSpec::child`] and [`WeightSpec::content`] return the multiplier
//! together with the nested spec, and the comparison entry points apply the
//! root's multiplier once. This keeps the multiplicative propagation in one
//! place and lets the spec be shared by reference for the whole comparison.

use std::collections::BTreeMap;
use std::fmt;

use crate::value::Value;

/// Reserved control keys. A data object key equal to one of these cannot be
/// addressed by a weight specification; see [`reserved_key_warnings`].
pub const RESERVED_KEYS: [&str; 9] = [
    "_weight",
    "_content",
    "_length",
    "_missing",
    "_extra",
    "_boost_missing",
    "_boost_extra",
    "_pairing_threshold",
    "_suppress",
];

/// A weight specification node: a bare number (uniform weight for every key)
/// or a tree of control fields and per-key entries.
///
/// Shared by reference and never mutated during a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum WeightSpec {
    /// Uniform shorthand: this number is the weight for every key beneath
    /// this node.
    Number(f64),
    /// A structured specification node.
    Tree(WeightTree),
}

/// The structured form of a [`WeightSpec`] node.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTree {
    /// `_weight`: multiplier applied by whoever descends into this node.
    pub weight: f64,
    /// `_length`: multiplier for the array length-mismatch penalty.
    pub length: f64,
    /// `_missing`: multiplier for unmatched-expected penalties.
    pub missing: f64,
    /// `_extra`: multiplier for unmatched-actual penalties.
    pub extra: f64,
    /// `_boost_missing`: scale missing penalties by the unmatched subtree's
    /// weighted attribute count.
    pub boost_missing: bool,
    /// `_boost_extra`: scale extra penalties by the unmatched subtree's
    /// weighted attribute count.
    pub boost_extra: bool,
    /// `_pairing_threshold`: minimum similarity in `[0, 1]` for an
    /// assignment-problem pair to count as a match.
    pub pairing_threshold: f64,
    /// `_suppress`: mark this subtree's errors as suppressed.
    pub suppress: bool,
    /// `_content`: spec applied uniformly to every array element.
    pub content: Option<Box<WeightSpec>>,
    /// Per-key entries for object children.
    pub children: BTreeMap<String, WeightSpec>,
}

impl Default for WeightTree {
    fn default() -> Self {
        Self {
            weight: 1.0,
            length: 1.0,
            missing: 1.0,
            extra: 1.0,
            boost_missing: false,
            boost_extra: false,
            pairing_threshold: 0.0,
            suppress: false,
            content: None,
            children: BTreeMap::new(),
        }
    }
}

impl Default for WeightSpec {
    fn default() -> Self {
        WeightSpec::EMPTY
    }
}

/// The neutral specification, usable wherever a `&WeightSpec` outlives a
/// local scope.
static EMPTY: WeightSpec = WeightSpec::Number(1.0);

impl WeightSpec {
    /// The neutral specification: weight 1 everywhere, no flags. The typed
    /// replacement for a mutable "no rules" sentinel.
    pub const EMPTY: WeightSpec = WeightSpec::Number(1.0);

    /// Returns the multiplier the comparison entry points apply once for the
    /// root node (`_weight` for a tree; 1 for the bare-number shorthand,
    /// whose number is a per-key weight, not a node weight).
    pub fn self_weight(&self) -> f64 {
        match self {
            WeightSpec::Number(_) => 1.0,
            WeightSpec::Tree(t) => t.weight,
        }
    }

    /// Returns the weight multiplier for `key` without descending: the bare
    /// number, the nested `_weight`, or 1 when the key has no entry.
    pub fn get_weight(&self, key: &str) -> f64 {
        self.child(key).0
    }

    /// Returns the `(multiplier, nested spec)` pair for descending into
    /// object key `key`.
    ///
    /// A bare-number entry contributes its number and an empty nested spec;
    /// a tree entry contributes its `_weight` and itself. A bare-number
    /// *parent* spec weights every key uniformly.
    pub fn child(&self, key: &str) -> (f64, &WeightSpec) {
        match self {
            WeightSpec::Number(n) => (*n, &EMPTY),
            WeightSpec::Tree(t) => match t.children.get(key) {
                Some(WeightSpec::Number(n)) => (*n, &EMPTY),
                Some(nested @ WeightSpec::Tree(inner)) => (inner.weight, nested),
                None => (1.0, &EMPTY),
            },
        }
    }

    /// Returns the `(multiplier, nested spec)` pair for descending into array
    /// elements (`_content`). All elements share the same weight; per-index
    /// weighting is not supported.
    pub fn content(&self) -> (f64, &WeightSpec) {
        match self {
            WeightSpec::Number(_) => (1.0, &EMPTY),
            WeightSpec::Tree(t) => match t.content.as_deref() {
                Some(WeightSpec::Number(n)) => (*n, &EMPTY),
                Some(nested @ WeightSpec::Tree(inner)) => (inner.weight, nested),
                None => (1.0, &EMPTY),
            },
        }
    }

    /// Returns the `_length` multiplier.
    pub fn length_weight(&self) -> f64 {
        match self {
            WeightSpec::Number(_) => 1.0,
            WeightSpec::Tree(t) => t.length,
        }
    }

    /// Returns the `_missing` multiplier.
    pub fn missing_weight(&self) -> f64 {
        match self {
            WeightSpec::Number(_) => 1.0,
            WeightSpec::Tree(t) => t.missing,
        }
    }

    /// Returns the `_extra` multiplier.
    pub fn extra_weight(&self) -> f64 {
        match self {
            WeightSpec::Number(_) => 1.0,
            WeightSpec::Tree(t) => t.extra,
        }
    }

    /// Returns the `_boost_missing` flag.
    pub fn boost_missing(&self) -> bool {
        match self {
            WeightSpec::Number(_) => false,
            WeightSpec::Tree(t) => t.boost_missing,
        }
    }

    /// Returns the `_boost_extra` flag.
    pub fn boost_extra(&self) -> bool {
        match self {
            WeightSpec::Number(_) => false,
            WeightSpec::Tree(t) => t.boost_extra,
        }
    }

    /// Returns the `_pairing_threshold` value.
    pub fn pairing_threshold(&self) -> f64 {
        match self {
            WeightSpec::Number(_) => 0.0,
            WeightSpec::Tree(t) => t.pairing_threshold,
        }
    }

    /// Returns the `_suppress` flag.
    pub fn suppress(&self) -> bool {
        match self {
            WeightSpec::Number(_) => false,
            WeightSpec::Tree(t) => t.suppress,
        }
    }

    /// Builds a specification from a JSON-like value.
    ///
    /// # Errors
    ///
    /// [`WeightSpecError::InvalidEntry`] when a per-key entry is neither a
    /// number nor a nested specification; [`WeightSpecError::InvalidControl`]
    /// when a control key has the wrong type.
    pub fn from_value(value: &Value) -> Result<Self, WeightSpecError> {
        match value {
            Value::Int(n) => Ok(WeightSpec::Number(*n as f64)),
            Value::Float(n) => Ok(WeightSpec::Number(*n)),
            Value::Object(map) => parse_tree(map).map(WeightSpec::Tree),
            Value::Null | Value::Bool(_) | Value::String(_) | Value::Array(_) => {
                Err(WeightSpecError::InvalidEntry {
                    key: "<root>".to_owned(),
                    found: value.type_name(),
                })
            }
        }
    }
}

impl TryFrom<&Value> for WeightSpec {
    type Error = WeightSpecError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        WeightSpec::from_value(value)
    }
}

fn parse_number(key: &str, value: &Value) -> Result<f64, WeightSpecError> {
    match value {
        Value::Int(n) => Ok(*n as f64),
        Value::Float(n) => Ok(*n),
        Value::Null | Value::Bool(_) | Value::String(_) | Value::Array(_) | Value::Object(_) => {
            Err(WeightSpecError::InvalidControl {
                key: key.to_owned(),
                expected: "number",
                found: value.type_name(),
            })
        }
    }
}

fn parse_bool(key: &str, value: &Value) -> Result<bool, WeightSpecError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Null | Value::Int(_) | Value::Float(_) | Value::String(_) | Value::Array(_)
        | Value::Object(_) => Err(WeightSpecError::InvalidControl {
            key: key.to_owned(),
            expected: "bool",
            found: value.type_name(),
        }),
    }
}

fn parse_tree(map: &BTreeMap<String, Value>) -> Result<WeightTree, WeightSpecError> {
    let mut tree = WeightTree::default();
    for (key, entry) in map {
        match key.as_str() {
            "_weight" => tree.weight = parse_number(key, entry)?,
            "_length" => tree.length = parse_number(key, entry)?,
            "_missing" => tree.missing = parse_number(key, entry)?,
            "_extra" => tree.extra = parse_number(key, entry)?,
            "_pairing_threshold" => tree.pairing_threshold = parse_number(key, entry)?,
            "_boost_missing" => tree.boost_missing = parse_bool(key, entry)?,
            "_boost_extra" => tree.boost_extra = parse_bool(key, entry)?,
            "_suppress" => tree.suppress = parse_bool(key, entry)?,
            "_content" => {
                let spec = match entry {
                    Value::Int(n) => WeightSpec::Number(*n as f64),
                    Value::Float(n) => WeightSpec::Number(*n),
                    Value::Object(m) => WeightSpec::Tree(parse_tree(m)?),
                    Value::Null | Value::Bool(_) | Value::String(_) | Value::Array(_) => {
                        return Err(WeightSpecError::InvalidControl {
                            key: key.to_owned(),
                            expected: "number or object",
                            found: entry.type_name(),
                        });
                    }
                };
                tree.content = Some(Box::new(spec));
            }
            _ => {
                let spec = match entry {
                    Value::Int(n) => WeightSpec::Number(*n as f64),
                    Value::Float(n) => WeightSpec::Number(*n),
                    Value::Object(m) => WeightSpec::Tree(parse_tree(m)?),
                    Value::Null | Value::Bool(_) | Value::String(_) | Value::Array(_) => {
                        return Err(WeightSpecError::InvalidEntry {
                            key: key.clone(),
                            found: entry.type_name(),
                        });
                    }
                };
                tree.children.insert(key.clone(), spec);
            }
        }
    }
    Ok(tree)
}

/// Error produced when a weight specification is malformed.
///
/// This is the only hard failure in the library: two well-formed inputs always
/// produce a result, but a spec entry that can be neither a weight nor a
/// nested spec must fail fast rather than be silently ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeightSpecError {
    /// A per-key entry is neither a number nor a nested specification.
    InvalidEntry {
        /// The offending key.
        key: String,
        /// Type name of the value that was found.
        found: &'static str,
    },
    /// A reserved control key holds a value of the wrong type.
    InvalidControl {
        /// The offending control key.
        key: String,
        /// The type the control key requires.
        expected: &'static str,
        /// Type name of the value that was found.
        found: &'static str,
    },
}

impl fmt::Display for WeightSpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightSpecError::InvalidEntry { key, found } => write!(
                f,
                "invalid weight specification entry at key `{key}`: \
                 expected a number or a nested specification, found {found}"
            ),
            WeightSpecError::InvalidControl {
                key,
                expected,
                found,
            } => write!(
                f,
                "invalid weight specification control key `{key}`: \
                 expected {expected}, found {found}"
            ),
        }
    }
}

impl std::error::Error for WeightSpecError {}

/// Scans a data value for object keys that collide with reserved control
/// keys and appends a warning per collision.
///
/// A colliding data key still compares normally, but it cannot be addressed
/// by a weight specification; the warning makes the ambiguity visible instead
/// of silently misinterpreting the spec.
pub fn reserved_key_warnings(value: &Value, out: &mut Vec<String>) {
    scan_reserved(value, "$", out);
}

fn scan_reserved(value: &Value, path: &str, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if RESERVED_KEYS.contains(&key.as_str()) {
                    out.push(format!(
                        "data key `{key}` at `{path}` collides with a reserved \
                         weight-specification key and cannot be weighted individually"
                    ));
                }
                scan_reserved(child, &format!("{path}.{key}"), out);
            }
        }
        Value::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                scan_reserved(child, &format!("{path}[{i}]"), out);
            }
        }
        Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::String(_) => {}
    }
}
