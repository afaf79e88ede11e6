//! Call argument normalization
//!
//! A log call carries a list of message parts and, optionally, options that
//! override the level's default tags and the part separator. Options can be
//! given explicitly or, following the variadic convention, as a trailing JSON
//! object with a `tags` and/or `sep` key.
//!
//! ```
//! use chibilog::core::{LogArgs, Tag};
//! use serde_json::json;
//!
//! let call = LogArgs::from_values(vec![json!("a"), json!("b"), json!({"tags": ["X"], "sep": "-"})])
//!     .normalize(&[Tag::Warn]);
//! assert_eq!(call.message, "a-b");
//! assert_eq!(call.tags, vec![Tag::new("X")]);
//! ```

use super::tag::Tag;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_SEPARATOR: &str = " ";

/// Explicit per-call overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogOptions {
    /// Replaces the default tags; `None` means no tags at all
    pub tags: Option<Vec<Tag>>,
    /// Replaces the default separator; `None` means a single space
    pub sep: Option<String>,
}

impl LogOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Tag>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn sep(mut self, sep: impl Into<String>) -> Self {
        self.sep = Some(sep.into());
        self
    }

    /// Read an inline options object. Returns `None` unless `value` is an
    /// object holding a `tags` or `sep` key.
    fn from_inline(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        if !object.contains_key("tags") && !object.contains_key("sep") {
            return None;
        }

        let tags = object.get("tags").map(|tags| match tags {
            Value::Array(items) => items.iter().map(|item| Tag::new(display(item))).collect(),
            Value::Null => Vec::new(),
            single => vec![Tag::new(display(single))],
        });
        let sep = object.get("sep").and_then(|sep| match sep {
            Value::Null => None,
            other => Some(display(other)),
        });

        Some(Self { tags, sep })
    }
}

/// Message parts of a call plus its explicit options, if any
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogArgs {
    pub parts: Vec<Value>,
    pub options: Option<LogOptions>,
}

/// Outcome of normalization: what the logger actually records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedCall {
    pub message: String,
    pub tags: Vec<Tag>,
    pub separator: String,
}

impl LogArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parts following the variadic convention: a trailing object with a
    /// `tags` or `sep` key is read as options when normalizing.
    pub fn from_values(parts: Vec<Value>) -> Self {
        Self {
            parts,
            options: None,
        }
    }

    #[must_use]
    pub fn part(mut self, part: impl Into<Value>) -> Self {
        self.parts.push(part.into());
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: LogOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Join the message and resolve tags and separator against `default_tags`.
    pub fn normalize(self, default_tags: &[Tag]) -> NormalizedCall {
        let LogArgs { mut parts, options } = self;

        let options = match options {
            Some(options) => Some(options),
            None => match parts.last().and_then(LogOptions::from_inline) {
                Some(inline) => {
                    parts.pop();
                    Some(inline)
                }
                None => None,
            },
        };

        let (tags, separator) = match options {
            Some(options) => (
                options.tags.unwrap_or_default(),
                options.sep.unwrap_or_else(|| DEFAULT_SEPARATOR.to_string()),
            ),
            None => (default_tags.to_vec(), DEFAULT_SEPARATOR.to_string()),
        };

        let message = parts.iter().map(display).collect::<Vec<_>>().join(&separator);

        NormalizedCall {
            message,
            tags,
            separator,
        }
    }
}

/// Display form of a part: strings verbatim, everything else as compact JSON
pub fn display(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

impl From<&str> for LogArgs {
    fn from(message: &str) -> Self {
        LogArgs::new().part(message)
    }
}

impl From<String> for LogArgs {
    fn from(message: String) -> Self {
        LogArgs::new().part(message)
    }
}

impl From<Vec<Value>> for LogArgs {
    fn from(parts: Vec<Value>) -> Self {
        LogArgs::from_values(parts)
    }
}

impl From<(Vec<Value>, LogOptions)> for LogArgs {
    fn from((parts, options): (Vec<Value>, LogOptions)) -> Self {
        LogArgs::from_values(parts).with_options(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_inline_options_override_defaults() {
        let call = LogArgs::from_values(vec![json!("a"), json!("b"), json!({"tags": ["X"], "sep": "-"})])
            .normalize(&[Tag::Warn]);
        assert_eq!(call.message, "a-b");
        assert_eq!(call.tags, vec![Tag::new("X")]);
        assert_eq!(call.separator, "-");
    }

    #[test]
    fn test_defaults_apply_without_options() {
        let call = LogArgs::from_values(vec![json!("a"), json!("b")]).normalize(&[Tag::Warn]);
        assert_eq!(call.message, "a b");
        assert_eq!(call.tags, vec![Tag::Warn]);
        assert_eq!(call.separator, " ");
    }

    #[test]
    fn test_inline_sep_only_clears_tags() {
        let call = LogArgs::from_values(vec![json!(1), json!(2), json!({"sep": ", "})])
            .normalize(&[Tag::Error]);
        assert_eq!(call.message, "1, 2");
        assert!(call.tags.is_empty());
    }

    #[test]
    fn test_inline_tags_only_uses_space() {
        let call = LogArgs::from_values(vec![json!("x"), json!("y"), json!({"tags": ["AUDIT"]})])
            .normalize(&[]);
        assert_eq!(call.message, "x y");
        assert_eq!(call.tags, vec![Tag::Audit]);
    }

    #[test]
    fn test_trailing_object_without_option_keys_is_message() {
        let call = LogArgs::from_values(vec![json!("user"), json!({"name": "ana"})])
            .normalize(&[Tag::Debug]);
        assert_eq!(call.message, r#"user {"name":"ana"}"#);
        assert_eq!(call.tags, vec![Tag::Debug]);
    }

    #[test]
    fn test_null_trailing_value_is_message() {
        let call = LogArgs::from_values(vec![json!("value:"), Value::Null]).normalize(&[]);
        assert_eq!(call.message, "value: null");
    }

    #[test]
    fn test_zero_parts_is_empty_message() {
        let call = LogArgs::new().normalize(&[Tag::Warn]);
        assert_eq!(call.message, "");
        assert_eq!(call.tags, vec![Tag::Warn]);

        let call = LogArgs::from_values(vec![json!({"tags": []})]).normalize(&[Tag::Warn]);
        assert_eq!(call.message, "");
        assert!(call.tags.is_empty());
    }

    #[test]
    fn test_explicit_options_win_over_trailing_object() {
        let call = LogArgs::from_values(vec![json!("a"), json!({"sep": "-"})])
            .with_options(LogOptions::new().tags(["NOTICE"]))
            .normalize(&[Tag::Warn]);
        assert_eq!(call.message, r#"a {"sep":"-"}"#);
        assert_eq!(call.tags, vec![Tag::Notice]);
    }

    #[test]
    fn test_duplicate_tags_are_kept_in_order() {
        let call = LogArgs::from("x")
            .with_options(LogOptions::new().tags(["AUDIT", "db", "AUDIT"]))
            .normalize(&[]);
        assert_eq!(call.tags, vec![Tag::Audit, Tag::new("db"), Tag::Audit]);
    }

    #[test]
    fn test_non_string_parts_display_as_json() {
        let call = LogArgs::from_values(vec![json!(42), json!(true), json!([1, 2]), json!(0.5)])
            .normalize(&[]);
        assert_eq!(call.message, "42 true [1,2] 0.5");
    }
}
