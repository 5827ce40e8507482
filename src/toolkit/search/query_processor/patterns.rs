use lazy_static::lazy_static;
use regex::Regex;

// ASCII digits only: `\d` in the regex crate also accepts other Unicode digits.

lazy_static! {
    pub static ref EXACT_CODE_PATTERN: Regex =
        Regex::new(r"(?i)^(jr|jd)[0-9]+$").expect("exact code pattern");

    pub static ref ALL_DIGITS_PATTERN: Regex =
        Regex::new(r"^[0-9]+$").expect("all digits pattern");

    /// Level words with singular/plural and accent variants, an optional
    /// "n", "n°" or "°" marker, then the school number.
    pub static ref LEVEL_AND_NUMBER_PATTERN: Regex = Regex::new(
        r"(?i)^(primaria?|secundaria?|inicial|jard[ií]n|t[eé]cnica?|especial|adultos?|superior|formaci[oó]n\s+profesional)\s+n?[°º]?\s*([0-9]{1,4})$"
    )
    .expect("level and number pattern");

    pub static ref TYPE_AND_NUMBER_PATTERN: Regex = Regex::new(
        r"(?i)^(secundaria|primaria|t[eé]cnica|jard[ií]n|infantes|especial|adultos|cfp|centro|ep|ees|ji|eee|cea|cens|tec)\s+([0-9]{1,4})$"
    )
    .expect("type and number pattern");

    pub static ref TYPE_ONLY_PATTERN: Regex = Regex::new(
        r"(?i)^(secundaria|primaria|t[eé]cnica|jard[ií]n|infantes|especial|adultos|cfp|centro|ep|ees|ji|eee|cea|cens|tec)$"
    )
    .expect("type only pattern");
}


/// Pattern matching `number` as a standalone numeric token: start/end of
/// text or a non-digit on each side.
///
/// `"8"` gives `(^|[^0-9])8([^0-9]|$)`.
pub fn build_number_token_regex(number: &str) -> String {
    format!("(^|[^0-9]){}([^0-9]|$)", regex::escape(number))
}


/// Compiled form of [`build_number_token_regex`].
#[derive(Debug, Clone)]
pub struct NumberTokenMatcher {
    number: String,
    regex: Regex,
}

impl NumberTokenMatcher {
    pub fn new(number: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            number: number.to_string(),
            regex: Regex::new(&build_number_token_regex(number))?,
        })
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}
