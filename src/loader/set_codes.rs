//! Set code resolution
//!
//! Maps the short set abbreviations printed in deck exports ("SVI", "BRS")
//! to the set identifiers used by the card database ("sv01", "swsh9").

use rustc_hash::FxHashMap;
use std::sync::OnceLock;

/// Short code -> database set id
const SET_CODES: &[(&str, &str)] = &[
    ("SVI", "sv01"),
    ("PAL", "sv02"),
    ("OBF", "sv03"),
    ("MEW", "sv03.5"),
    ("PAR", "sv04"),
    ("PAF", "sv04.5"),
    ("TEF", "sv05"),
    ("TWM", "sv06"),
    ("SFA", "sv06.5"),
    ("SCR", "sv07"),
    ("SSH", "swsh1"),
    ("RCL", "swsh2"),
    ("DAA", "swsh3"),
    ("CPA", "swsh3.5"),
    ("VIV", "swsh4"),
    ("SHF", "swsh4.5"),
    ("BST", "swsh5"),
    ("CRE", "swsh6"),
    ("EVS", "swsh7"),
    ("FST", "swsh8"),
    ("BRS", "swsh9"),
    ("ASR", "swsh10"),
    ("PGO", "swsh10.5"),
    ("LOR", "swsh11"),
    ("SIT", "swsh12"),
    ("CRZ", "swsh12.5"),
    ("PR", "swshp"),
    ("CEL", "cel25"),
    ("CES", "sm7"),
    ("FFI", "xy3"),
];

/// Set id prefixes whose card numbers are zero-padded to three digits
const THREE_DIGIT_PREFIXES: &[&str] = &[
    "sv", "swsh9", "swsh10", "swsh10.5", "swsh11", "swsh12", "swsh12.5",
];

/// Read-only lookup table from short set codes to database set ids
#[derive(Debug)]
pub struct SetCodeTable {
    codes: FxHashMap<&'static str, &'static str>,
}

impl SetCodeTable {
    /// Build the table of known sets
    pub fn new() -> Self {
        SetCodeTable {
            codes: SET_CODES.iter().copied().collect(),
        }
    }

    /// Shared table, built on first use
    pub fn global() -> &'static SetCodeTable {
        static TABLE: OnceLock<SetCodeTable> = OnceLock::new();
        TABLE.get_or_init(SetCodeTable::new)
    }

    /// Resolve a short code ("SVI") to its set id ("sv01")
    pub fn resolve(&self, short_code: &str) -> Option<&'static str> {
        self.codes.get(short_code).copied()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl Default for SetCodeTable {
    fn default() -> Self {
        Self::new()
    }
}

/// True when card numbers in this set are written with three digits
///
/// Prefix match: "swsh1" is not padded, but "swsh10" and "swsh12.5" are.
pub fn needs_three_digit_padding(set_id: &str) -> bool {
    THREE_DIGIT_PREFIXES
        .iter()
        .any(|prefix| set_id.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_codes() {
        let table = SetCodeTable::new();
        assert_eq!(table.len(), SET_CODES.len());
        assert_eq!(table.resolve("SVI"), Some("sv01"));
        assert_eq!(table.resolve("MEW"), Some("sv03.5"));
        assert_eq!(table.resolve("SSH"), Some("swsh1"));
        assert_eq!(table.resolve("PR"), Some("swshp"));
        assert_eq!(table.resolve("FFI"), Some("xy3"));
    }

    #[test]
    fn test_resolve_unknown_codes() {
        let table = SetCodeTable::global();
        assert_eq!(table.resolve("XXX"), None);
        // Codes are case sensitive
        assert_eq!(table.resolve("svi"), None);
        assert_eq!(table.resolve(""), None);
    }

    #[test]
    fn test_three_digit_padding() {
        assert!(needs_three_digit_padding("sv01"));
        assert!(needs_three_digit_padding("sv03.5"));
        assert!(needs_three_digit_padding("swsh9"));
        assert!(needs_three_digit_padding("swsh10.5"));
        assert!(needs_three_digit_padding("swsh12.5"));

        assert!(!needs_three_digit_padding("swsh1"));
        assert!(!needs_three_digit_padding("swsh4.5"));
        assert!(!needs_three_digit_padding("swshp"));
        assert!(!needs_three_digit_padding("cel25"));
        assert!(!needs_three_digit_padding("sm7"));
        assert!(!needs_three_digit_padding(""));
    }
}
