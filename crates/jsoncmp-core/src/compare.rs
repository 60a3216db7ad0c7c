//! The recursive comparison engine.
//!
//! [`Compare`] holds the configuration, the ignore rules, and the weight
//! specification for a sequence of comparisons. Each call is a pure,
//! synchronous recursion over immutable inputs: both sides are first passed
//! through the ignore transform, then diffed by variant dispatch. Mismatches
//! become error leaves in the returned tree; there is no failure path for
//! well-formed inputs.
//!
//! Dispatch rules:
//!
//! - Different variants produce a `TypesNotEqual` leaf recording both type
//!   names. `1` and `1.0` are different types.
//! - Bool, int, and string compare exactly.
//! - Unequal floats are rounded to the configured precision and retried; the
//!   rounded values are what the error records when rounding was attempted.
//! - Objects reconcile the union of keys: expected-only keys become
//!   `KeyNotExist`, actual-only keys become `UnexpectedKey`, shared keys
//!   recurse with the key's weight and nested spec.
//! - Arrays get an optional `_length` entry plus the list matcher's output.

use crate::config::Config;
use crate::diff::{DiffKey, DiffNode, ErrorKind, ErrorRecord};
use crate::ignore;
use crate::matching;
use crate::result::DiffReport;
use crate::scoring::weighted_attribute_count;
use crate::value::{Value, ValueMap};
use crate::weights::{WeightSpec, reserved_key_warnings};

/// The comparison engine: configuration, ignore rules, and weights for a
/// sequence of comparisons.
#[derive(Debug, Clone, Default)]
pub struct Compare {
    config: Config,
    rules: Value,
    weights: WeightSpec,
}

impl Compare {
    /// Creates an engine with the default configuration, no ignore rules,
    /// and neutral weights.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with the given configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Sets the ignore rules applied to both sides before comparison.
    #[must_use]
    pub fn rules(mut self, rules: Value) -> Self {
        self.rules = rules;
        self
    }

    /// Sets the weight specification.
    #[must_use]
    pub fn weights(mut self, weights: WeightSpec) -> Self {
        self.weights = weights;
        self
    }

    /// Returns the engine's configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Applies the ignore rules to a value, returning the rewritten copy
    /// that the comparison actually sees.
    pub fn prepare(&self, value: &Value) -> Value {
        ignore::transform(value.clone(), &self.rules)
    }

    /// Compares `actual` against `expected` and returns the raw diff tree.
    pub fn check(&self, expected: &Value, actual: &Value) -> DiffNode {
        let expected = self.prepare(expected);
        let actual = self.prepare(actual);
        self.diff_value(
            &expected,
            &actual,
            self.weights.self_weight(),
            &self.weights,
            self.weights.suppress(),
        )
    }

    /// Compares `actual` against `expected` and reduces the diff to a scored
    /// report.
    pub fn score(&self, expected: &Value, actual: &Value) -> DiffReport {
        let expected = self.prepare(expected);
        let actual = self.prepare(actual);
        let weight = self.weights.self_weight();
        let diff = self.diff_value(
            &expected,
            &actual,
            weight,
            &self.weights,
            self.weights.suppress(),
        );

        let mut warnings = Vec::new();
        reserved_key_warnings(&expected, &mut warnings);
        reserved_key_warnings(&actual, &mut warnings);

        DiffReport::build(diff, &expected, weight, &self.weights, warnings)
    }

    /// The recursive diff dispatch. `weight` is the multiplicative weight
    /// accumulated on the path to this node; `spec` is the node's weight
    /// spec; `suppressed` marks every error produced beneath a `_suppress`
    /// node.
    pub(crate) fn diff_value(
        &self,
        expected: &Value,
        actual: &Value,
        weight: f64,
        spec: &WeightSpec,
        suppressed: bool,
    ) -> DiffNode {
        if expected.kind() != actual.kind() {
            return DiffNode::Leaf(ErrorRecord::new(
                ErrorKind::TypesNotEqual,
                Some(Value::String(expected.type_name().to_owned())),
                Some(Value::String(actual.type_name().to_owned())),
                weight,
                suppressed,
            ));
        }

        match expected {
            Value::Null => DiffNode::empty(),
            Value::Bool(e) => {
                let Some(a) = actual.as_bool() else {
                    return DiffNode::empty();
                };
                if *e == a {
                    DiffNode::empty()
                } else {
                    values_not_equal(Value::Bool(*e), Value::Bool(a), weight, suppressed)
                }
            }
            Value::Int(e) => {
                let Some(a) = actual.as_i64() else {
                    return DiffNode::empty();
                };
                if *e == a {
                    DiffNode::empty()
                } else {
                    values_not_equal(Value::Int(*e), Value::Int(a), weight, suppressed)
                }
            }
            Value::String(e) => {
                let Some(a) = actual.as_str() else {
                    return DiffNode::empty();
                };
                if e == a {
                    DiffNode::empty()
                } else {
                    values_not_equal(
                        Value::String(e.clone()),
                        Value::String(a.to_owned()),
                        weight,
                        suppressed,
                    )
                }
            }
            Value::Float(e) => {
                let Some(a) = actual.as_f64() else {
                    return DiffNode::empty();
                };
                self.float_diff(*e, a, weight, suppressed)
            }
            Value::Array(e) => {
                let Some(a) = actual.as_array() else {
                    return DiffNode::empty();
                };
                self.array_diff(e, a, weight, spec, suppressed)
            }
            Value::Object(e) => {
                let Some(a) = actual.as_object() else {
                    return DiffNode::empty();
                };
                self.object_diff(e, a, weight, spec, suppressed)
            }
        }
    }

    /// Floats that differ raw are rounded to the configured precision and
    /// retried; the error then records the rounded values.
    fn float_diff(&self, e: f64, a: f64, weight: f64, suppressed: bool) -> DiffNode {
        // Bit equality keeps NaN reflexive; `==` additionally accepts 0.0 == -0.0.
        if e == a || e.to_bits() == a.to_bits() {
            return DiffNode::empty();
        }
        if let Some(places) = self.config.float.allow_round {
            let re = round_to(e, places);
            let ra = round_to(a, places);
            if re == ra {
                return DiffNode::empty();
            }
            return values_not_equal(Value::Float(re), Value::Float(ra), weight, suppressed);
        }
        values_not_equal(Value::Float(e), Value::Float(a), weight, suppressed)
    }

    /// Reconciles the union of keys of two objects: expected keys in map
    /// order first, then actual-only keys.
    fn object_diff(
        &self,
        expected: &ValueMap,
        actual: &ValueMap,
        weight: f64,
        spec: &WeightSpec,
        suppressed: bool,
    ) -> DiffNode {
        let mut entries: Vec<(DiffKey, DiffNode)> = Vec::new();

        for (key, expected_child) in expected {
            let (mult, nested) = spec.child(key);
            let child_suppressed = suppressed || nested.suppress();
            match actual.get(key) {
                Some(actual_child) => {
                    let diff = self.diff_value(
                        expected_child,
                        actual_child,
                        weight * mult,
                        nested,
                        child_suppressed,
                    );
                    if !diff.is_empty() {
                        entries.push((DiffKey::Key(key.clone()), diff));
                    }
                }
                None => {
                    let boost = if spec.boost_missing() {
                        weighted_attribute_count(expected_child, 1.0, nested)
                    } else {
                        1.0
                    };
                    entries.push((
                        DiffKey::Key(key.clone()),
                        DiffNode::Leaf(ErrorRecord::new(
                            ErrorKind::KeyNotExist,
                            Some(Value::String(key.clone())),
                            None,
                            weight * mult * spec.missing_weight() * boost,
                            child_suppressed,
                        )),
                    ));
                }
            }
        }

        for (key, actual_child) in actual {
            if expected.contains_key(key) {
                continue;
            }
            let (mult, nested) = spec.child(key);
            let boost = if spec.boost_extra() {
                weighted_attribute_count(actual_child, 1.0, nested)
            } else {
                1.0
            };
            entries.push((
                DiffKey::Key(key.clone()),
                DiffNode::Leaf(ErrorRecord::new(
                    ErrorKind::UnexpectedKey,
                    None,
                    Some(Value::String(key.clone())),
                    weight * mult * spec.extra_weight() * boost,
                    suppressed || nested.suppress(),
                )),
            ));
        }

        DiffNode::Branch(entries)
    }

    /// Array comparison: an optional `_length` entry followed by the list
    /// matcher's pairing output.
    fn array_diff(
        &self,
        expected: &[Value],
        actual: &[Value],
        weight: f64,
        spec: &WeightSpec,
        suppressed: bool,
    ) -> DiffNode {
        let mut entries: Vec<(DiffKey, DiffNode)> = Vec::new();

        if self.config.list.check_length && expected.len() != actual.len() {
            let mut length_weight = weight * spec.length_weight();
            if self.config.list.length_diff_penalty {
                length_weight *= expected.len().abs_diff(actual.len()) as f64;
            }
            entries.push((
                DiffKey::Length,
                DiffNode::Leaf(ErrorRecord::new(
                    ErrorKind::LengthsNotEqual,
                    Some(Value::Int(expected.len() as i64)),
                    Some(Value::Int(actual.len() as i64)),
                    length_weight,
                    suppressed,
                )),
            ));
        }

        entries.extend(matching::match_content(
            self, expected, actual, weight, spec, suppressed,
        ));
        DiffNode::Branch(entries)
    }
}

fn values_not_equal(expected: Value, received: Value, weight: f64, suppressed: bool) -> DiffNode {
    DiffNode::Leaf(ErrorRecord::new(
        ErrorKind::ValuesNotEqual,
        Some(expected),
        Some(received),
        weight,
        suppressed,
    ))
}

fn round_to(x: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (x * factor).round() / factor
}
