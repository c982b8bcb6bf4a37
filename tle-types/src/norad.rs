use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Letters usable as the leading character of an alpha-5 catalog number.
/// 'I' and 'O' are excluded from the scheme.
const ALPHA5_LETTERS: &str = "ABCDEFGHJKLMNPQRSTUVWXYZ";

/// Catalog number as printed in columns 3-7 of both element lines.
///
/// Kept textually: numbers above 99999 use the alpha-5 extension, where
/// the first column is a letter standing for 10-33. Both lines of a
/// record must carry the same catalog number.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display, Serialize, Deserialize)]
pub struct NoradId(String);

impl NoradId {
    /// Validate a catalog-number column span: up to five digits, or an
    /// alpha-5 letter followed by exactly four digits.
    pub fn parse(span: &str) -> Option<Self> {
        let text = span.trim();
        if text.is_empty() || text.len() > 5 {
            return None;
        }
        let all_digits = text.chars().all(|c| c.is_ascii_digit());
        let alpha5 = text.len() == 5
            && text.starts_with(|c| ALPHA5_LETTERS.contains(c))
            && text[1..].chars().all(|c| c.is_ascii_digit());
        (all_digits || alpha5).then(|| Self(text.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric catalog number; alpha-5 letters map to 10-33.
    pub fn as_number(&self) -> u32 {
        fn digits(text: &str) -> u32 {
            text.chars()
                .fold(0, |n, c| n * 10 + c.to_digit(10).unwrap_or(0))
        }
        match self.0.chars().next() {
            Some(letter) if letter.is_ascii_alphabetic() => {
                let head = ALPHA5_LETTERS.find(letter).unwrap_or(0) as u32 + 10;
                head * 10_000 + digits(&self.0[1..])
            }
            _ => digits(&self.0),
        }
    }
}
