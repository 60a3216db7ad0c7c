//! Comparison configuration: float rounding, list length checks, and report
//! output options.
//!
//! Configuration is loaded leniently: a missing or wrong-typed entry degrades
//! to the default for that entry instead of failing the whole load. Disabling
//! a feature (e.g. float rounding) is expressed by giving its entry an
//! unusable value, which mirrors how the original configuration format
//! behaved.

use crate::value::Value;

/// Float comparison options.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatConfig {
    /// Decimal places to round both sides to before retrying an unequal
    /// float comparison. `None` disables rounding.
    pub allow_round: Option<i32>,
}

impl Default for FloatConfig {
    fn default() -> Self {
        Self {
            allow_round: Some(2),
        }
    }
}

/// List comparison options.
#[derive(Debug, Clone, PartialEq)]
pub struct ListConfig {
    /// Emit a `LengthsNotEqual` entry when the two arrays differ in length.
    pub check_length: bool,
    /// Scale the length-mismatch weight by `abs(len_expected - len_actual)`.
    pub length_diff_penalty: bool,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            check_length: true,
            length_diff_penalty: true,
        }
    }
}

/// Report output options, consumed by value by the reporter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutputConfig {
    /// Print the diff tree to the console (handled by the CLI; the core
    /// library never prints).
    pub console: bool,
    /// File output options.
    pub file: FileOutput,
}

/// File output options for the reporter.
#[derive(Debug, Clone, PartialEq)]
pub struct FileOutput {
    /// Path to write the rendered diff to; `None` disables file output.
    pub name: Option<String>,
    /// Indentation width for the rendered JSON.
    pub indent: u16,
}

impl Default for FileOutput {
    fn default() -> Self {
        Self {
            name: None,
            indent: 4,
        }
    }
}

/// Top-level comparison configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    /// Float comparison options.
    pub float: FloatConfig,
    /// List comparison options.
    pub list: ListConfig,
    /// Report output options.
    pub output: OutputConfig,
}

impl Config {
    /// Loads a configuration from a JSON-like value.
    ///
    /// Recognized paths: `float.allow_round`, `list.check_length`,
    /// `list.length_diff_penalty`, `output.console`, `output.file.name`,
    /// `output.file.indent`. A missing section keeps its defaults; a
    /// wrong-typed entry degrades to the entry's default, except
    /// `float.allow_round`, where any non-integer value disables rounding.
    pub fn from_value(value: &Value) -> Config {
        let mut config = Config::default();

        if let Some(float) = value.get("float") {
            // A present-but-unusable allow_round means "no rounding", not
            // "default rounding".
            config.float.allow_round = float
                .get("allow_round")
                .and_then(Value::as_i64)
                .and_then(|n| i32::try_from(n).ok());
        }

        if let Some(list) = value.get("list") {
            if let Some(flag) = list.get("check_length").and_then(Value::as_bool) {
                config.list.check_length = flag;
            }
            if let Some(flag) = list.get("length_diff_penalty").and_then(Value::as_bool) {
                config.list.length_diff_penalty = flag;
            }
        }

        if let Some(output) = value.get("output") {
            if let Some(flag) = output.get("console").and_then(Value::as_bool) {
                config.output.console = flag;
            }
            if let Some(file) = output.get("file") {
                config.output.file.name = file
                    .get("name")
                    .and_then(Value::as_str)
                    .map(str::to_owned);
                if let Some(indent) = file.get("indent").and_then(Value::as_i64) {
                    if let Ok(indent) = u16::try_from(indent) {
                        config.output.file.indent = indent;
                    }
                }
            }
        }

        config
    }
}
