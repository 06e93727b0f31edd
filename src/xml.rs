//! Flat tag scanner for PISA XML exports.
//!
//! PISA writes every value as a leaf element (`<INTERFACEAREA>812.4</INTERFACEAREA>`)
//! nested in a handful of container elements. Instead of building a document tree,
//! the exports are read as a stream of [`Event`]s in document order.

use crate::error::{PisaError, Result};
use std::path::Path;
use std::str::FromStr;

/// A single item of the scanned document.
#[derive(Debug, Clone, PartialEq)]
pub enum Event<'a> {
    /// Opening tag of a container element
    Open(&'a str),
    /// Closing tag of a container element
    Close(&'a str),
    /// Element holding only text, value trimmed and unescaped
    Leaf {
        /// Element name
        name: &'a str,
        /// Text content
        value: String,
    },
}

/// Scan `text` into a list of [`Event`]s.
///
/// Declarations, comments and doctypes are skipped. A self-closing tag yields an
/// `Open` immediately followed by a `Close`.
pub fn scan(text: &str) -> Result<Vec<Event<'_>>> {
    let mut events = Vec::new();
    // Last opening tag not yet known to be a container
    let mut pending: Option<&str> = None;
    let mut pos = 0;

    while let Some(rel) = text[pos..].find('<') {
        let start = pos + rel;
        let between = &text[pos..start];

        if text[start..].starts_with("<!--") {
            let end = text[start..]
                .find("-->")
                .ok_or_else(|| PisaError::MalformedXml {
                    offset: start,
                    message: "unterminated comment".to_string(),
                })?;
            pos = start + end + 3;
            continue;
        }

        let end = text[start..]
            .find('>')
            .map(|e| start + e)
            .ok_or_else(|| PisaError::MalformedXml {
                offset: start,
                message: "unterminated tag".to_string(),
            })?;
        let tag = &text[start + 1..end];
        pos = end + 1;

        if tag.starts_with('?') || tag.starts_with('!') {
            continue;
        }

        if let Some(name) = tag.strip_prefix('/') {
            let name = name.trim();
            match pending.take() {
                Some(open) if open == name => events.push(Event::Leaf {
                    name,
                    value: unescape(between.trim()),
                }),
                Some(open) => {
                    events.push(Event::Open(open));
                    events.push(Event::Close(name));
                }
                None => events.push(Event::Close(name)),
            }
            continue;
        }

        if let Some(open) = pending.take() {
            events.push(Event::Open(open));
        }
        let self_closing = tag.ends_with('/');
        let name = tag
            .trim_end_matches('/')
            .split_whitespace()
            .next()
            .ok_or_else(|| PisaError::MalformedXml {
                offset: start,
                message: "empty tag".to_string(),
            })?;
        if self_closing {
            events.push(Event::Open(name));
            events.push(Event::Close(name));
        } else {
            pending = Some(name);
        }
    }

    if let Some(open) = pending {
        events.push(Event::Open(open));
    }
    Ok(events)
}

/// Every value of the leaf element `name`, in document order.
pub fn leaf_values(text: &str, name: &str) -> Result<Vec<String>> {
    Ok(scan(text)?
        .into_iter()
        .filter_map(|e| match e {
            Event::Leaf { name: n, value } if n == name => Some(value),
            _ => None,
        })
        .collect())
}

/// Parse a numeric leaf value. Empty values are treated as absent.
pub(crate) fn parse_value<T: FromStr>(tag: &str, value: &str) -> Result<Option<T>> {
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<T>()
        .map(Some)
        .map_err(|_| PisaError::InvalidValue {
            tag: tag.to_string(),
            value: value.to_string(),
        })
}

/// Read an XML export into memory.
pub(crate) fn read_xml(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| PisaError::io(path, e))
}

fn unescape(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_and_containers() {
        let text = "<?xml version=\"1.0\"?>\n<PISA>\n<STATUS>Ok</STATUS>\n<INTERFACE>\n<INTERFACEAREA> 812.4 </INTERFACEAREA>\n</INTERFACE>\n</PISA>\n";
        let events = scan(text).unwrap();
        assert_eq!(
            events,
            vec![
                Event::Open("PISA"),
                Event::Leaf {
                    name: "STATUS",
                    value: "Ok".to_string()
                },
                Event::Open("INTERFACE"),
                Event::Leaf {
                    name: "INTERFACEAREA",
                    value: "812.4".to_string()
                },
                Event::Close("INTERFACE"),
                Event::Close("PISA"),
            ]
        );
    }

    #[test]
    fn single_line_documents() {
        let text = "<A><B>1</B><B>2</B></A>";
        assert_eq!(leaf_values(text, "B").unwrap(), vec!["1", "2"]);
    }

    #[test]
    fn comments_entities_and_self_closing() {
        let text = "<!-- header --><R><E/><S>A:ARG 45 &amp; more</S></R>";
        let events = scan(text).unwrap();
        assert_eq!(events[0], Event::Open("R"));
        assert_eq!(events[1], Event::Open("E"));
        assert_eq!(events[2], Event::Close("E"));
        assert_eq!(
            events[3],
            Event::Leaf {
                name: "S",
                value: "A:ARG 45 & more".to_string()
            }
        );
    }

    #[test]
    fn unterminated_tag_is_an_error() {
        let err = scan("<A><B>1</B").unwrap_err();
        assert!(matches!(err, PisaError::MalformedXml { offset: 7, .. }));
    }

    #[test]
    fn numeric_values() {
        assert_eq!(parse_value::<f64>("X", "1.5").unwrap(), Some(1.5));
        assert_eq!(parse_value::<i64>("X", "").unwrap(), None);
        assert!(parse_value::<i64>("X", "abc").is_err());
    }
}
