//! Semantic tags attached to log events

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A tag is either one of the catalog tags, which carry a color, or an
/// arbitrary user string rendered without style.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    Success,
    Notice,
    Verbose,
    Print,
    Audit,
    Debug,
    Warn,
    Error,
    Custom(String),
}

impl Tag {
    /// Catalog tags, in declaration order
    pub const CATALOG: [Tag; 8] = [
        Tag::Success,
        Tag::Notice,
        Tag::Verbose,
        Tag::Print,
        Tag::Audit,
        Tag::Debug,
        Tag::Warn,
        Tag::Error,
    ];

    /// Build a tag from a string, recognising catalog names case-insensitively.
    pub fn new(name: impl AsRef<str>) -> Self {
        let name = name.as_ref();
        match name.to_uppercase().as_str() {
            "SUCCESS" => Tag::Success,
            "NOTICE" => Tag::Notice,
            "VERBOSE" => Tag::Verbose,
            "PRINT" => Tag::Print,
            "AUDIT" => Tag::Audit,
            "DEBUG" => Tag::Debug,
            "WARN" => Tag::Warn,
            "ERROR" => Tag::Error,
            _ => Tag::Custom(name.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Tag::Success => "SUCCESS",
            Tag::Notice => "NOTICE",
            Tag::Verbose => "VERBOSE",
            Tag::Print => "PRINT",
            Tag::Audit => "AUDIT",
            Tag::Debug => "DEBUG",
            Tag::Warn => "WARN",
            Tag::Error => "ERROR",
            Tag::Custom(name) => name,
        }
    }

    pub fn is_catalog(&self) -> bool {
        !matches!(self, Tag::Custom(_))
    }

    /// Rendering hint for catalog tags; `None` for custom tags.
    pub fn color_code(&self) -> Option<colored::Color> {
        use colored::Color::*;
        match self {
            Tag::Success => Some(BrightGreen),
            Tag::Notice => Some(BrightBlue),
            Tag::Verbose => Some(BrightBlack),
            Tag::Print => Some(White),
            Tag::Audit => Some(BrightMagenta),
            Tag::Debug => Some(BrightCyan),
            Tag::Warn => Some(Yellow),
            Tag::Error => Some(BrightRed),
            Tag::Custom(_) => None,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tag {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Tag::new(s))
    }
}

impl From<&str> for Tag {
    fn from(name: &str) -> Self {
        Tag::new(name)
    }
}

impl From<String> for Tag {
    fn from(name: String) -> Self {
        Tag::new(name)
    }
}

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Tag::new(name))
    }
}
