//! Mod-10 line checksum: digits count at face value, '-' counts as one,
//! everything else as zero.

use crate::parser::{LineNumber, TleError};
use crate::LINE_LEN;

/// Checksum of the 68 data columns of a line.
pub fn compute(line: &str) -> u8 {
    let sum: u32 = line
        .bytes()
        .take(LINE_LEN - 1)
        .map(|b| match b {
            b'0'..=b'9' => (b - b'0') as u32,
            b'-' => 1,
            _ => 0,
        })
        .sum();
    (sum % 10) as u8
}

/// Compare the computed checksum against the declared column-69 digit.
pub fn verify(line: &str, number: LineNumber, declared: u8) -> Result<(), TleError> {
    let computed = compute(line);
    if computed == declared {
        Ok(())
    } else {
        Err(TleError::ChecksumMismatch {
            line: number,
            computed,
            declared,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE1: &str = "1 25544U 98067A   19249.04864348  .00001909  00000-0  40858-4 0  9990";

    #[test]
    fn digits_and_minus_signs() {
        // The digit 1 plus three '-' at one apiece
        assert_eq!(compute("1 ---"), 4);
        assert_eq!(compute("ABC DEF"), 0);
        assert_eq!(compute("12345"), 5);
    }

    #[test]
    fn real_line() {
        // Hand-summed over the 68 data columns
        assert_eq!(compute(LINE1), 0);
        assert!(verify(LINE1, LineNumber::One, 0).is_ok());
    }

    #[test]
    fn mismatch_reports_both_values() {
        assert_eq!(
            verify(LINE1, LineNumber::One, 3),
            Err(TleError::ChecksumMismatch {
                line: LineNumber::One,
                computed: 0,
                declared: 3,
            })
        );
    }
}
