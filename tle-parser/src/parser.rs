//! Record-level parsing: one element line at a time, then assembly of a
//! line pair (plus optional name) into a [`Tle`].

use std::fmt;

use tle_types::prelude::*;

use crate::{checksum, fields, LINE1_MARKER, LINE2_MARKER, LINE_LEN};

/// Which physical element line a value or error refers to.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum LineNumber {
    One,
    Two,
}

impl LineNumber {
    pub const fn marker(self) -> &'static str {
        match self {
            LineNumber::One => LINE1_MARKER,
            LineNumber::Two => LINE2_MARKER,
        }
    }
}

impl fmt::Display for LineNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineNumber::One => write!(f, "1"),
            LineNumber::Two => write!(f, "2"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TleError {
    /// Wrong length or wrong line-start marker.
    #[error("malformed line (expected element line {expected}): {found:?}")]
    MalformedLine { expected: LineNumber, found: String },

    /// A column span that does not have the field's shape.
    #[error("bad {field} field: {text:?}")]
    FieldFormat { field: &'static str, text: String },

    #[error("line {line} checksum is {declared}, computed {computed}")]
    ChecksumMismatch {
        line: LineNumber,
        computed: u8,
        declared: u8,
    },

    /// The two element lines name different objects.
    #[error("catalog number differs between lines: {line1} vs {line2}")]
    IdentifierMismatch { line1: NoradId, line2: NoradId },

    /// An element line 1 with no line 2 after it.
    #[error("line {index}: element line 1 without a line 2: {line1:?}")]
    TruncatedRecord { index: usize, line1: String },

    /// Stray content attributable to no record.
    #[error("line {index}: unexpected content: {text:?}")]
    UnexpectedLine { index: usize, text: String },
}

/// Record-level parsing knobs.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct ParseConfig {
    /// Reject lines whose computed mod-10 checksum disagrees with the
    /// declared column-69 digit. Disable for catalogs damaged in
    /// transit; decoded field values are identical either way.
    pub verify_checksums: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            verify_checksums: true,
        }
    }
}

/// Fixed column spans of the NORAD layout (0-based, end-exclusive).
///
/// This table is the bit-exact contract with external tooling; every
/// line decoder and encoder goes through it.
pub(crate) mod layout {
    pub const CHECKSUM: usize = 68;

    pub mod line1 {
        use std::ops::Range;

        pub const NORAD_ID: Range<usize> = 2..7;
        pub const CLASSIFICATION: usize = 7;
        pub const INTL_DESIGNATOR: Range<usize> = 9..17;
        pub const EPOCH_YEAR: Range<usize> = 18..20;
        pub const EPOCH_DAY: Range<usize> = 20..32;
        pub const MEAN_MOTION_DOT: Range<usize> = 33..43;
        pub const MEAN_MOTION_DDOT: Range<usize> = 44..52;
        pub const BSTAR: Range<usize> = 53..61;
        pub const EPHEMERIS_TYPE: usize = 62;
        pub const SET_NUMBER: Range<usize> = 64..68;
    }

    pub mod line2 {
        use std::ops::Range;

        pub const NORAD_ID: Range<usize> = 2..7;
        pub const INCLINATION: Range<usize> = 8..16;
        pub const RAAN: Range<usize> = 17..25;
        pub const ECCENTRICITY: Range<usize> = 26..33;
        pub const ARG_OF_PERIGEE: Range<usize> = 34..42;
        pub const MEAN_ANOMALY: Range<usize> = 43..51;
        pub const MEAN_MOTION: Range<usize> = 52..63;
        pub const REV_NUMBER: Range<usize> = 63..68;
    }
}

/// Everything decoded from element line 1.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Line1Fields {
    pub norad_id: NoradId,
    pub classification: Classification,
    pub international_designator: String,
    pub epoch_year: i32,
    pub epoch_day: f64,
    pub mean_motion_dot: f64,
    pub mean_motion_ddot: f64,
    pub bstar: f64,
    pub ephemeris_type: char,
    pub set_number: u32,
    pub checksum: u8,
}

/// Everything decoded from element line 2.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Line2Fields {
    pub norad_id: NoradId,
    pub inclination: f64,
    pub raan: f64,
    pub eccentricity: f64,
    pub argument_of_perigee: f64,
    pub mean_anomaly: f64,
    pub mean_motion: f64,
    pub revolution_number: u32,
    pub checksum: u8,
}

fn field_err(field: &'static str, text: &str) -> TleError {
    TleError::FieldFormat {
        field,
        text: text.to_owned(),
    }
}

/// Strip trailing padding, then demand exactly 69 ASCII columns opening
/// with the expected marker.
fn prepare(line: &str, expected: LineNumber) -> Result<&str, TleError> {
    let line = line.trim_end();
    if line.len() != LINE_LEN || !line.is_ascii() || !line.starts_with(expected.marker()) {
        return Err(TleError::MalformedLine {
            expected,
            found: line.to_owned(),
        });
    }
    Ok(line)
}

fn declared_checksum(line: &str) -> Result<u8, TleError> {
    match line.as_bytes()[layout::CHECKSUM] {
        digit @ b'0'..=b'9' => Ok(digit - b'0'),
        other => Err(field_err("checksum", &(other as char).to_string())),
    }
}

pub(crate) fn parse_line1(line: &str, config: ParseConfig) -> Result<Line1Fields, TleError> {
    use layout::line1::*;

    let line = prepare(line, LineNumber::One)?;
    let declared = declared_checksum(line)?;
    if config.verify_checksums {
        checksum::verify(line, LineNumber::One, declared)?;
    }

    let norad_id = NoradId::parse(&line[NORAD_ID])
        .ok_or_else(|| field_err("catalog number", &line[NORAD_ID]))?;
    let class_char = line.as_bytes()[CLASSIFICATION] as char;
    let classification = Classification::try_from(class_char)
        .map_err(|c| field_err("classification", &c.to_string()))?;

    let epoch_day = fields::fixed_point("epoch day", &line[EPOCH_DAY])?;
    if !(1.0..367.0).contains(&epoch_day) {
        return Err(field_err("epoch day", &line[EPOCH_DAY]));
    }

    Ok(Line1Fields {
        norad_id,
        classification,
        international_designator: line[INTL_DESIGNATOR].trim().to_owned(),
        epoch_year: fields::epoch_year("epoch year", &line[EPOCH_YEAR])?,
        epoch_day,
        mean_motion_dot: fields::fixed_point(
            "mean motion first derivative",
            &line[MEAN_MOTION_DOT],
        )?,
        mean_motion_ddot: fields::exponential(
            "mean motion second derivative",
            &line[MEAN_MOTION_DDOT],
        )?,
        bstar: fields::exponential("bstar", &line[BSTAR])?,
        ephemeris_type: line.as_bytes()[EPHEMERIS_TYPE] as char,
        set_number: fields::integer("element set number", &line[SET_NUMBER])?,
        checksum: declared,
    })
}

pub(crate) fn parse_line2(line: &str, config: ParseConfig) -> Result<Line2Fields, TleError> {
    use layout::line2::*;

    let line = prepare(line, LineNumber::Two)?;
    let declared = declared_checksum(line)?;
    if config.verify_checksums {
        checksum::verify(line, LineNumber::Two, declared)?;
    }

    let norad_id = NoradId::parse(&line[NORAD_ID])
        .ok_or_else(|| field_err("catalog number", &line[NORAD_ID]))?;

    let inclination = fields::fixed_point("inclination", &line[INCLINATION])?;
    if !(0.0..=180.0).contains(&inclination) {
        return Err(field_err("inclination", &line[INCLINATION]));
    }
    let raan = fields::fixed_point("raan", &line[RAAN])?;
    if !(0.0..360.0).contains(&raan) {
        return Err(field_err("raan", &line[RAAN]));
    }
    let argument_of_perigee = fields::fixed_point("argument of perigee", &line[ARG_OF_PERIGEE])?;
    if !(0.0..360.0).contains(&argument_of_perigee) {
        return Err(field_err("argument of perigee", &line[ARG_OF_PERIGEE]));
    }
    let mean_anomaly = fields::fixed_point("mean anomaly", &line[MEAN_ANOMALY])?;
    if !(0.0..360.0).contains(&mean_anomaly) {
        return Err(field_err("mean anomaly", &line[MEAN_ANOMALY]));
    }

    Ok(Line2Fields {
        norad_id,
        inclination,
        raan,
        // Always in [0, 1): the columns carry fraction digits only
        eccentricity: fields::implied_decimal("eccentricity", &line[ECCENTRICITY])?,
        argument_of_perigee,
        mean_anomaly,
        mean_motion: fields::fixed_point("mean motion", &line[MEAN_MOTION])?,
        revolution_number: fields::integer("revolution number", &line[REV_NUMBER])?,
        checksum: declared,
    })
}

/// Parse one record with the default configuration.
pub fn parse_tle(name: Option<&str>, line1: &str, line2: &str) -> Result<Tle, TleError> {
    parse_tle_with(name, line1, line2, ParseConfig::default())
}

/// Parse one record: an optional name line plus both element lines.
///
/// Either a complete, validated record comes back or the first error
/// encountered does; nothing partial is ever produced.
pub fn parse_tle_with(
    name: Option<&str>,
    line1: &str,
    line2: &str,
    config: ParseConfig,
) -> Result<Tle, TleError> {
    let l1 = parse_line1(line1, config)?;
    let l2 = parse_line2(line2, config)?;

    if l1.norad_id != l2.norad_id {
        return Err(TleError::IdentifierMismatch {
            line1: l1.norad_id,
            line2: l2.norad_id,
        });
    }

    Ok(Tle {
        name: name
            .map(|n| n.trim().to_owned())
            .filter(|n| !n.is_empty()),
        norad_id: l1.norad_id,
        classification: l1.classification,
        international_designator: l1.international_designator,
        epoch_year: l1.epoch_year,
        epoch_day: l1.epoch_day,
        mean_motion_dot: l1.mean_motion_dot,
        mean_motion_ddot: l1.mean_motion_ddot,
        bstar: l1.bstar,
        ephemeris_type: l1.ephemeris_type,
        set_number: l1.set_number,
        inclination: l2.inclination,
        raan: l2.raan,
        eccentricity: l2.eccentricity,
        argument_of_perigee: l2.argument_of_perigee,
        mean_anomaly: l2.mean_anomaly,
        mean_motion: l2.mean_motion,
        revolution_number: l2.revolution_number,
        line1_checksum: l1.checksum,
        line2_checksum: l2.checksum,
    })
}
