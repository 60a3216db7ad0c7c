//! Rendering a diff tree for consumption outside the library.
//!
//! The reporter is a pure consumer of the diff tree: it serializes error
//! leaves the way the original report format did (`_error`, `_message`,
//! `_expected`, `_received`, `_weight` objects) and writes the rendered JSON
//! to a file when the output configuration asks for one. Console output is
//! the caller's job; this crate never prints.

use serde::Serialize;

use crate::config::FileOutput;
use crate::diff::DiffNode;

/// Serializes a diff tree to a JSON value.
///
/// Branches become objects keyed by the rendered [`crate::diff::DiffKey`];
/// leaves become error objects. The rendering is deterministic for a given
/// tree.
pub fn diff_to_json(diff: &DiffNode) -> serde_json::Value {
    match diff {
        DiffNode::Leaf(record) => {
            let expected = record
                .expected
                .clone()
                .map_or(serde_json::Value::Null, serde_json::Value::from);
            let received = record
                .received
                .clone()
                .map_or(serde_json::Value::Null, serde_json::Value::from);
            serde_json::json!({
                "_error": record.kind.name(),
                "_message": record.message(),
                "_expected": expected,
                "_received": received,
                "_weight": record.weight,
            })
        }
        DiffNode::Branch(children) => {
            let mut map = serde_json::Map::new();
            for (key, child) in children {
                map.insert(key.to_string(), diff_to_json(child));
            }
            serde_json::Value::Object(map)
        }
    }
}

/// Renders a diff tree as pretty-printed JSON with the given indent width.
pub fn render(diff: &DiffNode, indent: u16) -> String {
    let value = diff_to_json(diff);
    let indent_bytes = vec![b' '; usize::from(indent)];
    let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent_bytes);
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    if value.serialize(&mut ser).is_err() {
        // Pretty formatting of an in-memory value cannot fail in practice;
        // fall back to the compact form rather than propagate.
        return value.to_string();
    }
    String::from_utf8(buf).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

/// Writes the rendered diff to the configured file, if one is configured.
///
/// Returns `Ok(true)` when a file was written, `Ok(false)` when no file name
/// is configured.
///
/// # Errors
///
/// [`ReportError::Io`] when the file cannot be written.
pub fn write_file(diff: &DiffNode, output: &FileOutput) -> Result<bool, ReportError> {
    let Some(name) = output.name.as_deref() else {
        return Ok(false);
    };
    let rendered = render(diff, output.indent);
    std::fs::write(name, rendered).map_err(|e| ReportError::Io {
        path: name.to_owned(),
        detail: e.to_string(),
    })?;
    Ok(true)
}

/// Error produced by report writing.
#[derive(Debug)]
pub enum ReportError {
    /// Writing the report file failed.
    Io {
        /// The path that could not be written.
        path: String,
        /// The underlying I/O error message.
        detail: String,
    },
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::Io { path, detail } => {
                write!(f, "cannot write report to `{path}`: {detail}")
            }
        }
    }
}

impl std::error::Error for ReportError {}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use crate::compare::Compare;
    use crate::value::Value;

    fn diff_of(expected: serde_json::Value, actual: serde_json::Value) -> DiffNode {
        Compare::new().check(&Value::from(expected), &Value::from(actual))
    }

    #[test]
    fn empty_diff_renders_as_empty_object() {
        let diff = diff_of(serde_json::json!({"a": 1}), serde_json::json!({"a": 1}));
        assert_eq!(diff_to_json(&diff), serde_json::json!({}));
    }

    #[test]
    fn leaves_render_like_the_original_report() {
        let diff = diff_of(serde_json::json!({"int": 1}), serde_json::json!({"int": 2}));
        assert_eq!(
            diff_to_json(&diff),
            serde_json::json!({
                "int": {
                    "_error": "ValuesNotEqual",
                    "_message": "Values not equal. Expected: <1>, received: <2>",
                    "_expected": 1,
                    "_received": 2,
                    "_weight": 1.0,
                }
            })
        );
    }

    #[test]
    fn array_entries_render_under_index_and_extra_keys() {
        let diff = diff_of(serde_json::json!([1, 2]), serde_json::json!([2, 3, 9]));
        let json = diff_to_json(&diff);
        let object = json.as_object().expect("object rendering");
        assert!(object.contains_key("_length"));
        assert!(object.contains_key("extra_2") || object.contains_key("0"), "rendered: {json}");
    }

    #[test]
    fn render_honors_the_indent_width() {
        let diff = diff_of(serde_json::json!({"a": 1}), serde_json::json!({"a": 2}));
        let rendered = render(&diff, 4);
        assert!(rendered.contains("\n    \"a\""), "rendered: {rendered}");
        let rendered = render(&diff, 2);
        assert!(rendered.contains("\n  \"a\""), "rendered: {rendered}");
    }

    #[test]
    fn write_file_is_a_no_op_without_a_name() {
        let diff = diff_of(serde_json::json!(1), serde_json::json!(2));
        let written = write_file(&diff, &FileOutput::default()).expect("no-op write");
        assert!(!written);
    }

    #[test]
    fn write_file_writes_the_rendered_tree() {
        let dir = std::env::temp_dir().join("jsoncmp-report-test");
        std::fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join("diff.json");
        let output = FileOutput {
            name: Some(path.to_string_lossy().into_owned()),
            indent: 2,
        };

        let diff = diff_of(serde_json::json!({"a": 1}), serde_json::json!({"a": 2}));
        let written = write_file(&diff, &output).expect("write report");
        assert!(written);

        let contents = std::fs::read_to_string(&path).expect("read back");
        let parsed: serde_json::Value = serde_json::from_str(&contents).expect("valid JSON");
        assert_eq!(parsed["a"]["_error"], "ValuesNotEqual");
        std::fs::remove_file(&path).expect("cleanup");
    }
}
