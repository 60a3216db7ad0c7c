#![deny(clippy::print_stdout, clippy::print_stderr)]

//! Weighted structural comparison of JSON-like values.
//!
//! An "actual" document is graded against an "expected" reference: the
//! recursive comparator produces a diff tree of error leaves, array elements
//! are paired by solving the rectangular assignment problem over a pairwise
//! similarity matrix, and the result model reduces the tree to a similarity
//! ratio in `[0, 1]` under caller-supplied per-field importance weights.

pub mod assignment;
pub mod compare;
pub mod config;
pub mod diff;
pub mod ignore;
pub mod matching;
pub mod report;
pub mod result;
pub mod scoring;
pub mod value;
pub mod weights;

pub use assignment::max_sum_assignment;
pub use compare::Compare;
pub use config::{Config, FileOutput, FloatConfig, ListConfig, OutputConfig};
pub use diff::{DiffKey, DiffNode, ErrorKind, ErrorRecord};
pub use ignore::transform;
pub use matching::match_content;
pub use report::{ReportError, diff_to_json, render, write_file};
pub use result::DiffReport;
pub use scoring::{attribute_count, weighted_attribute_count};
pub use value::{Value, ValueKind, ValueMap};
pub use weights::{RESERVED_KEYS, WeightSpec, WeightSpecError, WeightTree, reserved_key_warnings};

/// Returns the version of this crate.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
