//! Structural mutations
//!
//! Both mutations are plain text rewrites driven by the sample's own
//! delimiters, so a sample declaring a custom UNA is corrupted in its own
//! syntax.

use crate::Result;
use edi_adapter_edifact::resolve;
use edi_ir::DelimiterSet;
use regex::{Captures, NoExpand, Regex};

/// Tag the header mutation targets
const MESSAGE_HEADER: &str = "UNH";

/// Rewrite every empty-placeholder pair of data separators so that a
/// release character sits between them: `++` becomes `+?++`.
///
/// A parser that ignores release characters sees one element fewer and
/// falls out of step with the rest of the segment.
///
/// # Errors
///
/// Returns [`crate::Error::Pattern`] if the search pattern cannot be built.
pub fn escape_empty_placeholders(text: &str, delimiters: &DelimiterSet) -> Result<String> {
    let data = delimiters.data_sep();
    let pair = Regex::new(&regex::escape(&format!("{data}{data}")))?;
    let injected = format!("{data}{}{data}{data}", delimiters.release_char());

    Ok(pair.replace_all(text, NoExpand(&injected)).into_owned())
}

/// Replace the `UNH` tag with `replacement` wherever a segment starts.
///
/// A segment starts at the beginning of the text, after a line break, or
/// after a segment terminator, with any whitespace in between.
///
/// # Errors
///
/// Returns [`crate::Error::Pattern`] if the search pattern cannot be built.
pub fn corrupt_message_headers(
    text: &str,
    delimiters: &DelimiterSet,
    replacement: &str,
) -> Result<String> {
    let terminator = regex::escape(&delimiters.segment_terminator().to_string());
    let header = Regex::new(&format!(
        r"((?:^|[\r\n]|{terminator})\s*)(?i:{MESSAGE_HEADER})"
    ))?;

    Ok(header
        .replace_all(text, |caps: &Captures<'_>| format!("{}{replacement}", &caps[1]))
        .into_owned())
}

/// Apply both mutations with the delimiters resolved from `text`
///
/// # Errors
///
/// Returns [`crate::Error::Pattern`] if a search pattern cannot be built.
pub fn mutate(text: &str, replacement: &str) -> Result<String> {
    let delimiters = resolve(text);
    let escaped = escape_empty_placeholders(text, &delimiters)?;
    corrupt_message_headers(&escaped, &delimiters, replacement)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_injected_between_empty_placeholders() {
        let delimiters = DelimiterSet::default();
        let mutated = escape_empty_placeholders("NAD+BY++123'FTX+AAI+++X'", &delimiters).unwrap();
        assert_eq!(mutated, "NAD+BY+?++123'FTX+AAI+?+++X'");
    }

    #[test]
    fn test_single_separators_untouched() {
        let delimiters = DelimiterSet::default();
        let text = "BGM+220+PO1+9'";
        assert_eq!(escape_empty_placeholders(text, &delimiters).unwrap(), text);
    }

    #[test]
    fn test_header_corrupted_at_every_segment_start() {
        let delimiters = DelimiterSet::default();
        let text = "UNH+1+ORDERS'BGM+220'UNT+2+1'\nUNH+2+ORDERS' UNH+3+ORDERS'";
        let mutated = corrupt_message_headers(text, &delimiters, "UXH").unwrap();
        assert_eq!(
            mutated,
            "UXH+1+ORDERS'BGM+220'UNT+2+1'\nUXH+2+ORDERS' UXH+3+ORDERS'"
        );
    }

    #[test]
    fn test_header_tag_inside_data_is_kept() {
        let delimiters = DelimiterSet::default();
        let text = "FTX+AAI+UNH is a tag'";
        assert_eq!(
            corrupt_message_headers(text, &delimiters, "UXH").unwrap(),
            text
        );
    }

    #[test]
    fn test_mutate_uses_declared_delimiters() {
        let text = "UNA*=.# ~UNB=UNOC*3=S=R~UNH=1=ORDERS~NAD=BY==1~";
        let mutated = mutate(text, "UXH").unwrap();
        assert_eq!(mutated, "UNA*=.# ~UNB=UNOC*3=S=R~UXH=1=ORDERS~NAD=BY=#==1~");
    }

    #[test]
    fn test_mutate_default_delimiters() {
        let text = "UNB+UNOC:3+S:R+R:S+250101:0101+REF'UNH+1+APERAK:D:07B:UN:2.1i'";
        let mutated = mutate(text, "UXH").unwrap();
        assert!(mutated.contains("'UXH+1+APERAK"));
        assert!(!mutated.contains("UNH"));
    }
}
