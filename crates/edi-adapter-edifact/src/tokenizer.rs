//! Escape-aware scanners
//!
//! Both scanners are single left-to-right passes over the characters with
//! two states. A release character switches to [`ScanState::Released`]; the
//! next character is then payload no matter what it is. Release pairs are
//! kept verbatim in scanner output so that a nested split still sees them,
//! and only [`unescape`] removes them from final component values.
//!
//! Line breaks are layout. The segment scanner drops a released line break
//! together with its release, so the escape is spent on the break and the
//! character after it keeps its control meaning.

use std::str::Chars;

/// Scanner state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Normal,
    Released,
}

/// Iterator over the raw segment strings of an interchange.
///
/// Yields trimmed, non-empty segment bodies with the terminator stripped.
/// An unterminated trailing segment is yielded too.
pub struct SegmentScanner<'a> {
    chars: Chars<'a>,
    terminator: char,
    release: char,
}

impl<'a> SegmentScanner<'a> {
    pub fn new(text: &'a str, terminator: char, release: char) -> Self {
        Self {
            chars: text.chars(),
            terminator,
            release,
        }
    }
}

impl Iterator for SegmentScanner<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            let mut buffer = String::new();
            let mut state = ScanState::Normal;
            let mut terminated = false;

            for c in self.chars.by_ref() {
                match state {
                    ScanState::Released if is_line_break(c) => state = ScanState::Normal,
                    ScanState::Released => {
                        buffer.push(self.release);
                        buffer.push(c);
                        state = ScanState::Normal;
                    }
                    ScanState::Normal if c == self.release => state = ScanState::Released,
                    ScanState::Normal if c == self.terminator => {
                        terminated = true;
                        break;
                    }
                    ScanState::Normal => buffer.push(c),
                }
            }

            if state == ScanState::Released {
                buffer.push(self.release);
            }

            let segment = buffer.trim();
            if !segment.is_empty() {
                return Some(segment.to_string());
            }
            if !terminated {
                return None;
            }
        }
    }
}

fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

/// Cut `text` into raw segment strings at unescaped terminators
#[must_use]
pub fn tokenize_segments(text: &str, terminator: char, release: char) -> Vec<String> {
    SegmentScanner::new(text, terminator, release).collect()
}

/// Split `body` at every unescaped `sep`.
///
/// A trailing token is always emitted, so `A++B` yields `["A", "", "B"]`
/// and an empty body yields `[""]`.
#[must_use]
pub fn split_top_level(body: &str, sep: char, release: char) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut state = ScanState::Normal;

    for c in body.chars() {
        match state {
            ScanState::Released => {
                current.push(release);
                current.push(c);
                state = ScanState::Normal;
            }
            ScanState::Normal if c == release => state = ScanState::Released,
            ScanState::Normal if c == sep => tokens.push(std::mem::take(&mut current)),
            ScanState::Normal => current.push(c),
        }
    }

    if state == ScanState::Released {
        current.push(release);
    }
    tokens.push(current);
    tokens
}

/// Resolve release pairs into their literal characters.
///
/// `??` becomes `?`, `?'` becomes `'`. A dangling release at the end is kept.
#[must_use]
pub fn unescape(value: &str, release: char) -> String {
    let mut out = String::with_capacity(value.len());
    let mut state = ScanState::Normal;

    for c in value.chars() {
        match state {
            ScanState::Released => {
                out.push(c);
                state = ScanState::Normal;
            }
            ScanState::Normal if c == release => state = ScanState::Released,
            ScanState::Normal => out.push(c),
        }
    }

    if state == ScanState::Released {
        out.push(release);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_split_at_terminator() {
        let segments = tokenize_segments("UNH+1+ORDERS'BGM+220'UNT+3+1'", '\'', '?');
        assert_eq!(segments, vec!["UNH+1+ORDERS", "BGM+220", "UNT+3+1"]);
    }

    #[test]
    fn test_escaped_terminator_does_not_split() {
        let segments = tokenize_segments("FTX+AAA+A?'B'UNT+2+1'", '\'', '?');
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], "FTX+AAA+A?'B");
    }

    #[test]
    fn test_blank_segments_are_skipped() {
        let segments = tokenize_segments("BGM+220'\n'  '\nDTM+137'\n", '\'', '?');
        assert_eq!(segments, vec!["BGM+220", "DTM+137"]);
    }

    #[test]
    fn test_unterminated_trailing_segment_is_kept() {
        let segments = tokenize_segments("BGM+220'UNT+2+1", '\'', '?');
        assert_eq!(segments, vec!["BGM+220", "UNT+2+1"]);
    }

    #[test]
    fn test_segment_count_survives_rejoin() {
        let text = "UNB+UNOC:3+S+R'UNH+1+APERAK'BGM+312'UNT+3+1'UNZ+1+REF'";
        let segments = tokenize_segments(text, '\'', '?');
        let rejoined = format!("{}'", segments.join("'"));
        assert_eq!(tokenize_segments(&rejoined, '\'', '?').len(), segments.len());
    }

    #[test]
    fn test_released_line_break_is_dropped_with_its_release() {
        let segments = tokenize_segments("FTX+AAA+A?\n+B'FTX+C?\r\n'", '\'', '?');
        assert_eq!(segments, vec!["FTX+AAA+A+B", "FTX+C"]);
    }

    #[test]
    fn test_custom_terminator_and_release() {
        let segments = tokenize_segments("BGM=220#~X~DTM=137~", '~', '#');
        assert_eq!(segments, vec!["BGM=220#~X", "DTM=137"]);
    }

    #[test]
    fn test_split_keeps_empty_placeholders() {
        assert_eq!(split_top_level("A++B", '+', '?'), vec!["A", "", "B"]);
        assert_eq!(split_top_level("A+", '+', '?'), vec!["A", ""]);
        assert_eq!(split_top_level("", '+', '?'), vec![""]);
    }

    #[test]
    fn test_split_honors_release() {
        assert_eq!(split_top_level("ABC?+DEF+GHI", '+', '?'), vec!["ABC?+DEF", "GHI"]);
        assert_eq!(split_top_level("A?:B:C", ':', '?'), vec!["A?:B", "C"]);
    }

    #[test]
    fn test_double_release_is_literal_release() {
        // ?? is a literal ?, so the following + still separates
        assert_eq!(split_top_level("ABC??+DEF", '+', '?'), vec!["ABC??", "DEF"]);
        assert_eq!(unescape("ABC??", '?'), "ABC?");
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape("A?'B", '?'), "A'B");
        assert_eq!(unescape("PO?+1?:2", '?'), "PO+1:2");
        assert_eq!(unescape("plain", '?'), "plain");
        assert_eq!(unescape("dangling?", '?'), "dangling?");
    }
}
