//! Root `<svg>` sizing rewrite
//!
//! Track graphics are authored with fixed pixel sizes. The root element's
//! `width`, `height` and `preserveAspectRatio` are replaced so the graphic fills
//! its container, keeps its aspect ratio and stays centred. Every other
//! attribute and all child content is left byte-for-byte intact.

use std::ops::Range;

/// Sizing attributes written onto the root element, in order.
pub const RESPONSIVE_ATTRIBUTES: [(&str, &str); 3] =
    [("width", "100%"), ("height", "100%"), ("preserveAspectRatio", "xMidYMid meet")];

/// Rewrite the root `<svg>` start tag of `source` to fill its container.
///
/// Text without an `<svg` start tag is returned unchanged.
pub fn make_responsive(source: &str) -> String {
    let Some(tag) = root_tag(source) else {
        return source.to_string();
    };

    let mut attributes = source[tag.attributes.clone()].to_string();
    for (name, value) in RESPONSIVE_ATTRIBUTES {
        attributes = set_attribute(&attributes, name, value);
    }

    let mut output = String::with_capacity(source.len() + 64);
    output.push_str(&source[..tag.attributes.start]);
    output.push_str(&attributes);
    output.push_str(&source[tag.attributes.end..]);
    output
}

/// Byte ranges of the root start tag.
struct RootTag {
    /// Between `<svg` and the closing `>` (or `/>`)
    attributes: Range<usize>,
}

fn root_tag(source: &str) -> Option<RootTag> {
    let bytes = source.as_bytes();
    let mut from = 0;

    loop {
        let start = from + find_ignore_case(&source[from..], "<svg")?;
        let after_name = start + 4;
        from = after_name;

        // `<svgfoo>` is a different element.
        match bytes.get(after_name) {
            Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/' => {}
            _ => continue,
        }

        let close = after_name + tag_end(&bytes[after_name..])?;
        let end = if close > after_name && bytes[close - 1] == b'/' { close - 1 } else { close };
        return Some(RootTag { attributes: after_name..end });
    }
}

/// Offset of the `>` closing a start tag, skipping quoted values.
fn tag_end(bytes: &[u8]) -> Option<usize> {
    let mut quote = None;
    for (index, &byte) in bytes.iter().enumerate() {
        match (quote, byte) {
            (Some(q), b) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') => quote = Some(byte),
            (None, b'>') => return Some(index),
            (None, _) => {}
        }
    }
    None
}

fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
}

/// One attribute inside a start tag.
#[derive(Debug, PartialEq)]
struct AttributeSpan {
    name: Range<usize>,
    /// Name through the end of the value (or the name alone when valueless)
    whole: Range<usize>,
}

fn attribute_spans(attributes: &str) -> Vec<AttributeSpan> {
    let bytes = attributes.as_bytes();
    let mut spans = Vec::new();
    let mut cursor = 0;

    while cursor < bytes.len() {
        while cursor < bytes.len() && (bytes[cursor].is_ascii_whitespace() || bytes[cursor] == b'/') {
            cursor += 1;
        }
        if cursor >= bytes.len() {
            break;
        }

        let name_start = cursor;
        while cursor < bytes.len()
            && !bytes[cursor].is_ascii_whitespace()
            && !matches!(bytes[cursor], b'=' | b'/')
        {
            cursor += 1;
        }
        let name = name_start..cursor;
        let mut end = cursor;

        let mut probe = cursor;
        while probe < bytes.len() && bytes[probe].is_ascii_whitespace() {
            probe += 1;
        }
        if bytes.get(probe) == Some(&b'=') {
            probe += 1;
            while probe < bytes.len() && bytes[probe].is_ascii_whitespace() {
                probe += 1;
            }
            match bytes.get(probe) {
                Some(&q @ (b'"' | b'\'')) => {
                    let closing = bytes[probe + 1..].iter().position(|&b| b == q);
                    end = closing.map_or(bytes.len(), |offset| probe + 1 + offset + 1);
                }
                Some(_) => {
                    end = probe;
                    while end < bytes.len() && !bytes[end].is_ascii_whitespace() {
                        end += 1;
                    }
                }
                None => end = probe,
            }
            cursor = end;
        }

        if name.is_empty() {
            if cursor == name_start {
                cursor += 1;
            }
            continue;
        }
        spans.push(AttributeSpan { name: name.clone(), whole: name.start..end });
    }

    spans
}

/// Replace attribute `name` (case-insensitive) with `name="value"`, or append
/// it when absent.
fn set_attribute(attributes: &str, name: &str, value: &str) -> String {
    let replacement = format!("{name}=\"{value}\"");
    let existing = attribute_spans(attributes)
        .into_iter()
        .find(|span| attributes[span.name.clone()].eq_ignore_ascii_case(name));

    match existing {
        Some(span) => {
            let mut output = String::with_capacity(attributes.len() + replacement.len());
            output.push_str(&attributes[..span.whole.start]);
            output.push_str(&replacement);
            output.push_str(&attributes[span.whole.end..]);
            output
        }
        None => {
            let trimmed = attributes.trim_end();
            format!("{trimmed} {replacement}{}", &attributes[trimmed.len()..])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_fixed_size_and_adds_aspect_ratio() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="1000" height="500" viewBox="0 0 1000 500"><path d="M0 0"/></svg>"#;
        let out = make_responsive(svg);
        assert_eq!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="100%" height="100%" viewBox="0 0 1000 500" preserveAspectRatio="xMidYMid meet"><path d="M0 0"/></svg>"#
        );
    }

    #[test]
    fn similar_attribute_names_are_untouched() {
        let svg = r#"<svg stroke-width="4" data-height='9' viewBox="0 0 10 10">"#;
        let out = make_responsive(svg);
        assert!(out.contains(r#"stroke-width="4""#));
        assert!(out.contains("data-height='9'"));
        assert!(out.contains(r#"width="100%""#));
        assert!(out.contains(r#"height="100%""#));
    }

    #[test]
    fn existing_aspect_ratio_is_replaced_once() {
        let svg = r#"<SVG preserveAspectRatio="none" WIDTH=640>"#;
        let out = make_responsive(svg);
        assert_eq!(out.matches("preserveAspectRatio").count(), 1);
        assert!(out.contains(r#"preserveAspectRatio="xMidYMid meet""#));
        assert!(out.contains(r#"width="100%""#));
        assert!(!out.contains("640"));
    }

    #[test]
    fn self_closing_root_keeps_its_slash() {
        let out = make_responsive(r#"<svg width="5"/>"#);
        assert_eq!(out, r#"<svg width="100%" height="100%" preserveAspectRatio="xMidYMid meet"/>"#);
    }

    #[test]
    fn only_root_tag_is_rewritten() {
        let svg = r#"<?xml version="1.0"?><svg width="10"><svg width="3"/></svg>"#;
        let out = make_responsive(svg);
        assert!(out.starts_with(r#"<?xml version="1.0"?><svg width="100%""#));
        assert!(out.contains(r#"<svg width="3"/>"#));
    }

    #[test]
    fn quoted_angle_bracket_does_not_end_tag() {
        let svg = r#"<svg aria-label="a > b" width="1"><g/></svg>"#;
        let out = make_responsive(svg);
        assert!(out.contains(r#"aria-label="a > b""#));
        assert!(out.ends_with("<g/></svg>"));
    }

    #[test]
    fn non_svg_text_is_unchanged() {
        assert_eq!(make_responsive("not a graphic"), "not a graphic");
        assert_eq!(make_responsive("<svgish width=\"1\">"), "<svgish width=\"1\">");
    }
}
