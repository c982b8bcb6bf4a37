//! Decoders and byte-exact encoders for the fixed-column field formats.
//!
//! Each decoder takes the raw column span plus the field name it should
//! blame on failure; decoders are pure and never look outside the span.

use crate::parser::TleError;
use crate::EPOCH_PIVOT_YEAR;

fn bad(field: &'static str, span: &str) -> TleError {
    TleError::FieldFormat {
        field,
        text: span.to_owned(),
    }
}

/// Base-10 integer; surrounding blanks are stripped. An all-blank span
/// is an error.
pub fn integer(field: &'static str, span: &str) -> Result<u32, TleError> {
    span.trim().parse().map_err(|_| bad(field, span))
}

/// Decimal number with an explicit decimal point present in the text.
pub fn fixed_point(field: &'static str, span: &str) -> Result<f64, TleError> {
    let text = span.trim();
    if !text.contains('.') {
        return Err(bad(field, span));
    }
    text.parse().map_err(|_| bad(field, span))
}

/// Digits with an implied leading "0." (eccentricity): the value is the
/// digits read as an integer, divided by 10^(digit count).
pub fn implied_decimal(field: &'static str, span: &str) -> Result<f64, TleError> {
    let digits = span.trim();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(bad(field, span));
    }
    let value: u64 = digits.parse().map_err(|_| bad(field, span))?;
    Ok(value as f64 / 10f64.powi(digits.len() as i32))
}

/// Compact exponential: `[sign]DDDDD[sign]E`, no decimal point in the
/// text, an implied leading "0." on the mantissa and a single signed
/// exponent digit. An all-zero mantissa decodes to exactly 0.0 whatever
/// the exponent says.
pub fn exponential(field: &'static str, span: &str) -> Result<f64, TleError> {
    let text = span.trim();
    if !text.is_ascii() || text.len() < 3 {
        return Err(bad(field, span));
    }
    let (mantissa, exponent) = text.split_at(text.len() - 2);

    let mut exp_chars = exponent.chars();
    let exp_sign = match exp_chars.next() {
        Some('+') => 1,
        Some('-') => -1,
        _ => return Err(bad(field, span)),
    };
    let exp_digit = match exp_chars.next().and_then(|c| c.to_digit(10)) {
        Some(d) => d as i32,
        None => return Err(bad(field, span)),
    };

    let (sign, digits) = match mantissa.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, mantissa.strip_prefix('+').unwrap_or(mantissa)),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(bad(field, span));
    }
    let value: u64 = digits.parse().map_err(|_| bad(field, span))?;

    let mantissa = value as f64 / 10f64.powi(digits.len() as i32);
    Ok(sign * mantissa * 10f64.powi(exp_sign * exp_digit))
}

/// Two-digit epoch year resolved against the Sputnik-era pivot.
pub fn epoch_year(field: &'static str, span: &str) -> Result<i32, TleError> {
    let year = integer(field, span)? as i32;
    if year > 99 {
        return Err(bad(field, span));
    }
    if year < EPOCH_PIVOT_YEAR {
        Ok(2000 + year)
    } else {
        Ok(1900 + year)
    }
}

/// Epoch-day column text: day of year zero-padded to three digits, then
/// eight fractional digits.
pub fn encode_epoch_day(day: f64) -> String {
    format!("{day:012.8}")
}

/// Right-aligned angle column, four fractional digits.
pub fn encode_angle(value: f64) -> String {
    format!("{value:8.4}")
}

/// Eccentricity digits with the leading "0." dropped.
pub fn encode_implied_decimal(value: f64) -> String {
    format!("{:07}", (value * 1e7).round() as u32)
}

/// Canonical compact exponential: blank positive sign, five mantissa
/// digits, signed single-digit exponent. Exact zero is ` 00000-0`, the
/// convention real catalogs follow.
pub fn encode_exponential(value: f64) -> String {
    if value == 0.0 {
        return " 00000-0".to_owned();
    }
    let sign = if value < 0.0 { '-' } else { ' ' };
    let magnitude = value.abs();
    let mut exp = magnitude.log10().floor() as i32 + 1;
    let mut digits = (magnitude / 10f64.powi(exp) * 100_000.0).round() as i64;
    if digits == 100_000 {
        digits = 10_000;
        exp += 1;
    }
    let exp_sign = if exp < 0 { '-' } else { '+' };
    format!("{sign}{digits:05}{exp_sign}{}", exp.abs())
}

/// Blank-or-minus sign followed by the fraction with its leading zero
/// dropped (mean-motion first derivative).
pub fn encode_signed_fraction(value: f64) -> String {
    let sign = if value < 0.0 { '-' } else { ' ' };
    let magnitude = format!("{:.8}", value.abs());
    format!("{sign}{}", &magnitude[1..])
}

/// 11-wide mean-motion column, eight fractional digits.
pub fn encode_mean_motion(value: f64) -> String {
    format!("{value:11.8}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn integers_strip_blanks() {
        assert_eq!(integer("set", " 999"), Ok(999));
        assert_eq!(integer("rev", "18780"), Ok(18780));
        assert!(integer("set", "    ").is_err());
        assert!(integer("set", "9a9").is_err());
    }

    #[test]
    fn fixed_point_needs_a_decimal_point() {
        assert_relative_eq!(fixed_point("inc", " 51.6464").unwrap(), 51.6464);
        assert_relative_eq!(fixed_point("ndot", " -.00000009").unwrap(), -9e-8);
        assert!(fixed_point("inc", "     516464").is_err());
        assert!(fixed_point("inc", "        ").is_err());
    }

    #[test]
    fn eccentricity_digits() {
        assert_relative_eq!(implied_decimal("ecc", "0007999").unwrap(), 0.0007999);
        assert_relative_eq!(implied_decimal("ecc", "0000000").unwrap(), 0.0);
        assert!(implied_decimal("ecc", "00.7999").is_err());
        assert!(implied_decimal("ecc", "").is_err());
    }

    #[test]
    fn compact_exponential() {
        assert_relative_eq!(exponential("bstar", " 40858-4").unwrap(), 4.0858e-5);
        assert_relative_eq!(exponential("bstar", "-11606-4").unwrap(), -1.1606e-5);
        assert_relative_eq!(exponential("bstar", "+12345-3").unwrap(), 1.2345e-4);
        assert_relative_eq!(exponential("ddot", " 12345+2").unwrap(), 12.345);
    }

    #[test]
    fn all_zero_mantissa_is_zero() {
        assert_eq!(exponential("ddot", "00000-0").unwrap(), 0.0);
        assert_eq!(exponential("ddot", " 00000+0").unwrap(), 0.0);
        assert_eq!(exponential("bstar", " 00000-3").unwrap(), 0.0);
    }

    #[test]
    fn exponential_rejects_junk() {
        assert!(exponential("bstar", "        ").is_err());
        assert!(exponential("bstar", "4085e-45").is_err());
        assert!(exponential("bstar", "40858").is_err());
        assert!(exponential("bstar", "-4").is_err());
    }

    #[test]
    fn epoch_year_pivot() {
        assert_eq!(epoch_year("year", "19"), Ok(2019));
        assert_eq!(epoch_year("year", "56"), Ok(2056));
        assert_eq!(epoch_year("year", "57"), Ok(1957));
        assert_eq!(epoch_year("year", "00"), Ok(2000));
        assert_eq!(epoch_year("year", "99"), Ok(1999));
    }

    #[test]
    fn errors_carry_field_and_span() {
        let err = implied_decimal("eccentricity", "00x7999").unwrap_err();
        assert_eq!(
            err,
            TleError::FieldFormat {
                field: "eccentricity",
                text: "00x7999".to_owned(),
            }
        );
    }

    #[test]
    fn encoders_reproduce_column_text() {
        assert_eq!(encode_epoch_day(249.04864348), "249.04864348");
        assert_eq!(encode_epoch_day(19.5), "019.50000000");
        assert_eq!(encode_angle(51.6464), " 51.6464");
        assert_eq!(encode_angle(2.3847), "  2.3847");
        assert_eq!(encode_angle(320.1755), "320.1755");
        assert_eq!(encode_implied_decimal(0.0007999), "0007999");
        assert_eq!(encode_exponential(4.0858e-5), " 40858-4");
        assert_eq!(encode_exponential(-1.2353e-4), "-12353-3");
        assert_eq!(encode_exponential(0.0), " 00000-0");
        assert_eq!(encode_signed_fraction(1.909e-5), " .00001909");
        assert_eq!(encode_signed_fraction(-9e-8), "-.00000009");
        assert_eq!(encode_mean_motion(15.50437522), "15.50437522");
        assert_eq!(encode_mean_motion(1.00272292), " 1.00272292");
    }
}
