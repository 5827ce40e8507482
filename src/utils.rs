use std::fmt;
use std::ops::Deref;

use serde::Serialize;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;


/// Lowercase, accent-free, single-spaced text.
///
/// Only [`normalize_text`] builds one, so holding a `NormalizedText` means the
/// value has already gone through case folding, diacritic removal and
/// whitespace collapsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for NormalizedText {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for NormalizedText {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NormalizedText {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}


/// Lowercases, strips diacritics (NFD then drop combining marks, recomposed as
/// NFC) and collapses whitespace runs into single spaces.
pub fn normalize_text(text: &str) -> NormalizedText {
    let lowered = text.to_lowercase();
    let stripped: String = lowered
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .nfc()
        .collect();

    let mut collapsed = String::with_capacity(stripped.len());
    for word in stripped.split_whitespace() {
        if !collapsed.is_empty() {
            collapsed.push(' ');
        }
        collapsed.push_str(word);
    }

    NormalizedText(collapsed)
}


/// Char-safe truncation for putting user input into log lines.
#[inline]
pub fn truncate_for_log(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        format!("{}...", s.chars().take(max_chars).collect::<String>())
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_accents_and_case() {
        assert_eq!(normalize_text("Jardín"), "jardin");
        assert_eq!(normalize_text("TÉCNICA"), "tecnica");
        assert_eq!(normalize_text("Formación Profesional"), "formacion profesional");
        assert_eq!(normalize_text("Ñandú"), "nandu");
    }

    #[test]
    fn test_decomposed_input() {
        // "e" followed by U+0301 COMBINING ACUTE ACCENT
        assert_eq!(normalize_text("te\u{0301}cnica"), "tecnica");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize_text("a    b"), "a b");
        assert_eq!(normalize_text("  escuela\t\n  primaria  "), "escuela primaria");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("   \t "), "");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "Jardín de Infantes N° 903",
            "  E.E.S.  Nº 8 \"Martín Güemes\" ",
            "İstanbul",
            "CENS 451",
            "",
        ];
        for sample in samples {
            let once = normalize_text(sample);
            let twice = normalize_text(&once);
            assert_eq!(once, twice, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_keeps_digits_and_punctuation() {
        assert_eq!(normalize_text("E.P. N° 12"), "e.p. n° 12");
    }

    #[test]
    fn test_truncate_for_log() {
        assert_eq!(truncate_for_log("secundaria 8", 4), "secu...");
        assert_eq!(truncate_for_log("ep", 10), "ep");
        assert_eq!(truncate_for_log("jardín", 6), "jardín");
    }
}
