//! Coordinate frame declared by a track graphic

use serde::{Deserialize, Serialize};
use std::fmt;

/// The `viewBox` rectangle of a vector graphic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct ViewFrame {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewFrame {
    /// Frame declared by the first `viewBox` attribute in `source`.
    ///
    /// Returns `None` when there is no such attribute or its value is
    /// malformed. Later `viewBox` attributes are not consulted.
    pub fn from_svg(source: &str) -> Option<Self> {
        let value = first_attribute_value(source, "viewBox")?;
        Self::parse(value)
    }

    /// Parse a `viewBox` value: exactly four whitespace-separated finite
    /// numbers, with positive width and height.
    pub fn parse(value: &str) -> Option<Self> {
        let mut numbers = value.split_whitespace().map(|part| part.parse::<f64>().ok());
        let (Some(Some(min_x)), Some(Some(min_y)), Some(Some(width)), Some(Some(height)), None) = (
            numbers.next(),
            numbers.next(),
            numbers.next(),
            numbers.next(),
            numbers.next(),
        ) else {
            return None;
        };

        let frame = Self { min_x, min_y, width, height };
        let finite = [min_x, min_y, width, height].iter().all(|n| n.is_finite());
        (finite && width > 0.0 && height > 0.0).then_some(frame)
    }

    pub fn smaller_dimension(&self) -> f64 {
        self.width.min(self.height)
    }
}

impl fmt::Display for ViewFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.min_x, self.min_y, self.width, self.height)
    }
}

/// Value of the first syntactically complete `name="..."` or `name='...'`
/// attribute in `source`. The name must not be the tail of a longer name.
fn first_attribute_value<'a>(source: &'a str, name: &str) -> Option<&'a str> {
    let bytes = source.as_bytes();
    let mut search_from = 0;

    while let Some(offset) = source[search_from..].find(name) {
        let start = search_from + offset;
        let mut cursor = start + name.len();
        search_from = cursor;

        let standalone = start == 0 || bytes[start - 1].is_ascii_whitespace();
        if !standalone {
            continue;
        }

        cursor = skip_whitespace(bytes, cursor);
        if bytes.get(cursor) != Some(&b'=') {
            continue;
        }
        cursor = skip_whitespace(bytes, cursor + 1);

        let quote = match bytes.get(cursor) {
            Some(&q @ (b'"' | b'\'')) => q,
            _ => continue,
        };
        let value_start = cursor + 1;
        let Some(length) = bytes[value_start..].iter().position(|&b| b == quote) else {
            continue;
        };
        return Some(&source[value_start..value_start + length]);
    }

    None
}

fn skip_whitespace(bytes: &[u8], mut cursor: usize) -> usize {
    while bytes.get(cursor).is_some_and(|b| b.is_ascii_whitespace()) {
        cursor += 1;
    }
    cursor
}
