//! Mnemonic marker scanning for menu item text.
//!
//! Item text may carry `&` markers in the native convention: the character
//! after the first unescaped `&` is the item's mnemonic, and `&&` stands for
//! a literal ampersand. The server uses [`scan`] both to produce the display
//! text exposed as an item's accessible name and to answer keyboard-shortcut
//! queries.
//!
//! ```
//! use menu_access::mnemonic::scan;
//!
//! let parsed = scan("Save &As");
//! assert_eq!(parsed.display_text, "Save As");
//! assert_eq!(parsed.mnemonic, Some('a'));
//! ```

/// The marker character introducing a mnemonic.
const MARKER: char = '&';

/// Result of scanning item text for a mnemonic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MnemonicText {
    /// The text with markers removed and `&&` collapsed to `&`.
    pub display_text: String,
    /// The mnemonic character (ASCII-lowercased), if any.
    pub mnemonic: Option<char>,
    /// Character index of the mnemonic within `display_text`.
    pub mnemonic_index: Option<usize>,
}

/// Scan text for an optional mnemonic marker.
///
/// Only the first unescaped marker designates a mnemonic; later markers are
/// still stripped from the display text. A trailing lone marker is dropped.
pub fn scan(text: &str) -> MnemonicText {
    let mut display_text = String::with_capacity(text.len());
    let mut display_len = 0usize;
    let mut mnemonic = None;
    let mut mnemonic_index = None;

    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != MARKER {
            display_text.push(ch);
            display_len += 1;
            continue;
        }
        match chars.next() {
            // Doubled marker is a literal ampersand.
            Some(MARKER) => {
                display_text.push(MARKER);
                display_len += 1;
            }
            Some(designated) => {
                if mnemonic.is_none() {
                    mnemonic = Some(designated.to_ascii_lowercase());
                    mnemonic_index = Some(display_len);
                }
                display_text.push(designated);
                display_len += 1;
            }
            None => {}
        }
    }

    MnemonicText {
        display_text,
        mnemonic,
        mnemonic_index,
    }
}

/// Strip mnemonic markup, keeping only the display text.
pub fn strip_markers(text: &str) -> String {
    scan(text).display_text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_leading_marker() {
        let parsed = scan("&Open");
        assert_eq!(parsed.display_text, "Open");
        assert_eq!(parsed.mnemonic, Some('o'));
        assert_eq!(parsed.mnemonic_index, Some(0));
    }

    #[test]
    fn test_scan_middle_marker() {
        let parsed = scan("Save &As");
        assert_eq!(parsed.display_text, "Save As");
        assert_eq!(parsed.mnemonic, Some('a'));
        assert_eq!(parsed.mnemonic_index, Some(5));
    }

    #[test]
    fn test_scan_escaped_marker() {
        let parsed = scan("Fish && Chips");
        assert_eq!(parsed.display_text, "Fish & Chips");
        assert_eq!(parsed.mnemonic, None);
        assert_eq!(parsed.mnemonic_index, None);
    }

    #[test]
    fn test_scan_escape_then_mnemonic() {
        let parsed = scan("&& &Quit");
        assert_eq!(parsed.display_text, "& Quit");
        assert_eq!(parsed.mnemonic, Some('q'));
        assert_eq!(parsed.mnemonic_index, Some(2));
    }

    #[test]
    fn test_scan_only_first_marker_designates() {
        let parsed = scan("&File &Edit");
        assert_eq!(parsed.display_text, "File Edit");
        assert_eq!(parsed.mnemonic, Some('f'));
        assert_eq!(parsed.mnemonic_index, Some(0));
    }

    #[test]
    fn test_scan_digit_mnemonic() {
        let parsed = scan("Item &1");
        assert_eq!(parsed.display_text, "Item 1");
        assert_eq!(parsed.mnemonic, Some('1'));
        assert_eq!(parsed.mnemonic_index, Some(5));
    }

    #[test]
    fn test_scan_trailing_marker_dropped() {
        let parsed = scan("Oddball&");
        assert_eq!(parsed.display_text, "Oddball");
        assert_eq!(parsed.mnemonic, None);
    }

    #[test]
    fn test_scan_plain_text() {
        let parsed = scan("Paste");
        assert_eq!(parsed.display_text, "Paste");
        assert_eq!(parsed.mnemonic, None);
        assert_eq!(parsed.mnemonic_index, None);
    }

    #[test]
    fn test_strip_markers() {
        assert_eq!(strip_markers("E&xit"), "Exit");
        assert_eq!(strip_markers("A && B"), "A & B");
    }
}
