//! Terminal styling helpers
//!
//! Maps semantic tokens to decorated text with `colored`, and removes ANSI
//! escape sequences again for sinks that want plain text.

use super::log_level::LogLevel;
use super::tag::Tag;
use colored::{Color, ColoredString, Colorize};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static ANSI_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\x1B(?:[@-Z\\-_]|\[[0-?]*[ -/]*[@-~])").expect("ANSI pattern is valid")
});

static JSON_TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?P<str>"(?:\\.|[^"\\])*")(?P<colon>\s*:)?|(?P<num>\b\d+\.?\d*\b)|(?P<bool>\b(?:true|false)\b)|(?P<null>\bnull\b)"#,
    )
    .expect("JSON token pattern is valid")
});

/// Semantic token understood by [`style`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleToken {
    /// Rendered timestamp
    Time,
    /// Severity name
    Level(LogLevel),
    /// Tag name; custom tags are bold but uncolored
    Tag(Tag),
    /// Generic emphasis
    Emphasis,
}

/// Decorate `text` according to `token`.
pub fn style(token: &StyleToken, text: &str) -> String {
    paint(token, text).to_string()
}

fn paint(token: &StyleToken, text: &str) -> ColoredString {
    match token {
        StyleToken::Time => text.color(Color::BrightBlack),
        StyleToken::Level(level) => {
            let painted = text.color(level.color_code());
            match level.background_code() {
                Some(background) => painted.on_color(background),
                None => painted,
            }
        }
        StyleToken::Tag(tag) => match tag.color_code() {
            Some(color) => text.color(color).bold(),
            None => text.bold(),
        },
        StyleToken::Emphasis => text.bold(),
    }
}

/// Remove every ANSI escape sequence from `text`.
///
/// Matches `ESC` followed by a single byte in `@`..=`Z` or `\`..=`_`, or a
/// CSI sequence: `[`, parameter bytes, intermediate bytes, final byte.
pub fn strip_ansi(text: &str) -> String {
    ANSI_PATTERN.replace_all(text, "").into_owned()
}

/// Returns true if `text` carries at least one ANSI escape sequence
pub fn has_ansi(text: &str) -> bool {
    ANSI_PATTERN.is_match(text)
}

/// Syntax-highlight a JSON document for terminal display.
///
/// Keys are yellow, string values green, numbers cyan, booleans magenta and
/// `null` red. Input that is not valid JSON is highlighted token by token
/// all the same.
pub fn colorize_json(json: &str) -> String {
    JSON_TOKEN_PATTERN
        .replace_all(json, |caps: &Captures<'_>| {
            if let Some(string) = caps.name("str") {
                match caps.name("colon") {
                    Some(colon) => format!("{}{}", string.as_str().yellow(), colon.as_str()),
                    None => string.as_str().green().to_string(),
                }
            } else if let Some(num) = caps.name("num") {
                num.as_str().cyan().to_string()
            } else if let Some(boolean) = caps.name("bool") {
                boolean.as_str().magenta().to_string()
            } else if let Some(null) = caps.name("null") {
                null.as_str().red().to_string()
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}
