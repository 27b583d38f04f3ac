//! Cell value types and the engine's tagged value format

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A typed, non-empty cell value as reported by the engine
///
/// Empty cells are represented by `Option::None` wherever a cell may be absent.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "value"))]
pub enum CellValue {
    /// Signed integer, `Int(5)` on the wire
    Integer(i64),

    /// Floating-point number, `Real(3.5)` on the wire
    Real(f64),

    /// Text, `Text("hi")` on the wire
    Text(String),
}

impl CellValue {
    /// Decode the engine's `Tag(payload)` representation
    ///
    /// `Int` and `Real` payloads must parse as numbers. Any other tag is read as text:
    /// one pair of enclosing double quotes is removed and the escapes inside them are
    /// resolved, so `Text("hi")` and `Formula("=A1")` both become text.
    ///
    /// # Examples
    /// ```
    /// use rust_sheet_core::CellValue;
    ///
    /// assert_eq!(CellValue::decode("Int(5)").unwrap(), CellValue::Integer(5));
    /// assert_eq!(CellValue::decode("Text(\"hi\")").unwrap(), CellValue::Text("hi".into()));
    /// assert!(CellValue::decode("garbage").is_err());
    /// ```
    pub fn decode(text: &str) -> Result<Self> {
        let text = text.trim();

        let (tag, rest) = text
            .split_once('(')
            .ok_or_else(|| Error::cell_value(format!("expected Tag(payload), got '{}'", text)))?;
        let payload = rest
            .strip_suffix(')')
            .ok_or_else(|| Error::cell_value(format!("unterminated payload in '{}'", text)))?;

        if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(Error::cell_value(format!("invalid tag in '{}'", text)));
        }

        match tag {
            "Int" => payload
                .trim()
                .parse()
                .map(CellValue::Integer)
                .map_err(|_| Error::cell_value(format!("invalid integer in '{}'", text))),
            "Real" => payload
                .trim()
                .parse()
                .map(CellValue::Real)
                .map_err(|_| Error::cell_value(format!("invalid real in '{}'", text))),
            _ => Ok(CellValue::Text(unquote(payload))),
        }
    }

    /// Get the type name for messages and structured output
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Integer(_) => "integer",
            CellValue::Real(_) => "real",
            CellValue::Text(_) => "text",
        }
    }

    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Integer(n) => Some(*n as f64),
            CellValue::Real(n) => Some(*n),
            CellValue::Text(_) => None,
        }
    }

    /// Try to get the value as text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Renders the decoded payload without its tag
///
/// Reals keep the engine's own formatting, so `Real(3.0)` renders as `3.0`.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Integer(n) => write!(f, "{}", n),
            CellValue::Real(n) => write!(f, "{:?}", n),
            CellValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl FromStr for CellValue {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

/// Prepare user-entered text for a `write_cell` argument
///
/// The text is passed through unchanged: the engine decides the type of what it is
/// given, this side never re-types it.
pub fn encode_for_write(user_text: &str) -> String {
    user_text.to_string()
}

fn unquote(payload: &str) -> String {
    match payload
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
    {
        Some(inner) => unescape(inner),
        None => payload.to_string(),
    }
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some('u') => {
                let rest = chars.as_str();
                let decoded = rest
                    .strip_prefix('{')
                    .and_then(|r| r.split_once('}'))
                    .and_then(|(hex, tail)| {
                        u32::from_str_radix(hex, 16)
                            .ok()
                            .and_then(char::from_u32)
                            .map(|ch| (ch, tail))
                    });
                match decoded {
                    Some((ch, tail)) => {
                        out.push(ch);
                        chars = tail.chars();
                    }
                    None => out.push_str("\\u"),
                }
            }
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}
