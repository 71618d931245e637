//! Small string helpers shared by the data loaders and the batch reader.

use regex::Regex;
use std::borrow::Cow;
use std::io::{self, BufRead};
use std::sync::LazyLock;
use tracing::warn;

static UNICODE_ESCAPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\u([0-9A-Fa-f]{4})|\\U([0-9A-Fa-f]{8})").unwrap());

/// Returns the value of `::slot value` in a double-colon delimited line.
///
/// The value runs up to the next ` ::` marker or the end of the line.
pub(crate) fn slot_value_in_double_colon_del_list<'a>(line: &'a str, slot: &str) -> Option<&'a str> {
    let marker = format!("::{slot}");
    let mut search_from = 0;

    while let Some(found) = line[search_from..].find(&marker) {
        let start = search_from + found + marker.len();
        let rest = &line[start..];

        // `::case` must not match `::cases`.
        match rest.chars().next() {
            None => return Some(""),
            Some(c) if c.is_whitespace() => {
                let end = rest.find(" ::").unwrap_or(rest.len());
                return Some(rest[..end].trim());
            }
            Some(_) => search_from = start,
        }
    }

    None
}

/// Strips one pair of matching surrounding quotes, if present.
pub(crate) fn dequote_string(s: &str) -> &str {
    let s = s.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = s.strip_prefix(quote).and_then(|t| t.strip_suffix(quote)) {
            return inner;
        }
    }
    s
}

/// Decodes `\uXXXX` and `\UXXXXXXXX` escapes, leaving invalid code points untouched.
pub(crate) fn decode_unicode_escapes(s: &str) -> String {
    UNICODE_ESCAPE_RE
        .replace_all(s, |caps: &regex::Captures| {
            let hex = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
            u32::from_str_radix(hex, 16)
                .ok()
                .and_then(char::from_u32)
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Lines of a reader with invalid UTF-8 replaced by U+FFFD instead of failing.
///
/// Line terminators (`\n`, `\r\n`) are stripped.
pub(crate) struct LossyLines<R> {
    reader: R,
    buffer: Vec<u8>,
    line_number: usize,
    non_utf8_lines: usize,
}

impl<R: BufRead> LossyLines<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: vec![],
            line_number: 0,
            non_utf8_lines: 0,
        }
    }

    /// Lines read so far.
    pub(crate) fn line_number(&self) -> usize {
        self.line_number
    }

    pub(crate) fn non_utf8_lines(&self) -> usize {
        self.non_utf8_lines
    }
}

impl<R: BufRead> Iterator for LossyLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.clear();
        match self.reader.read_until(b'\n', &mut self.buffer) {
            Ok(0) => None,
            Ok(_) => {
                self.line_number += 1;
                let line = String::from_utf8_lossy(&self.buffer);
                if matches!(line, Cow::Owned(_)) {
                    self.non_utf8_lines += 1;
                    warn!(line = self.line_number, "non-UTF-8 characters were replaced");
                }
                Some(Ok(line.trim_end_matches(['\n', '\r']).to_string()))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_slot_values() {
        let line = "::gender f ::number plural ::case oblique ::endings ātim,ētim,ītim";
        assert_eq!(slot_value_in_double_colon_del_list(line, "gender"), Some("f"));
        assert_eq!(slot_value_in_double_colon_del_list(line, "case"), Some("oblique"));
        assert_eq!(
            slot_value_in_double_colon_del_list(line, "endings"),
            Some("ātim,ētim,ītim")
        );
        assert_eq!(slot_value_in_double_colon_del_list(line, "ending"), None);
        assert_eq!(slot_value_in_double_colon_del_list(line, "mood"), None);
    }

    #[test]
    fn dequotes() {
        assert_eq!(dequote_string("\"ātum\""), "ātum");
        assert_eq!(dequote_string("'um'"), "um");
        assert_eq!(dequote_string("um"), "um");
    }

    #[test]
    fn decodes_escapes() {
        assert_eq!(decode_unicode_escapes(r"bal\u0101\u1E6D\u012B"), "balāṭī");
        assert_eq!(decode_unicode_escapes(r"\uD800x"), r"\uD800x");
        assert_eq!(decode_unicode_escapes("šarrum"), "šarrum");
    }

    #[test]
    fn lossy_lines_replace_invalid_bytes() {
        let input: &[u8] = b"ilum\r\nzi\xffkarum\nkalbum";
        let mut lines = LossyLines::new(input);
        let read: Vec<String> = lines.by_ref().collect::<Result<_, _>>().unwrap();
        assert_eq!(read, ["ilum", "zi\u{FFFD}karum", "kalbum"]);
        assert_eq!(lines.line_number(), 3);
        assert_eq!(lines.non_utf8_lines(), 1);
    }

    #[test]
    fn lossy_lines_stop_at_limit() {
        let input: &[u8] = b"a\nb\nc\n";
        let mut lines = LossyLines::new(input);
        assert_eq!(lines.by_ref().take(0).count(), 0);
        assert_eq!(lines.line_number(), 0);
        assert_eq!(lines.by_ref().take(2).count(), 2);
        assert_eq!(lines.line_number(), 2);
    }
}
