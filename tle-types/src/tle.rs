use chrono::{Duration, NaiveDate};
use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::classification::Classification;
use crate::norad::NoradId;
use crate::time::UtcTimestamp;

/// One fully decoded two-line element set.
///
/// Values stay in the units the format itself uses (degrees, revolutions
/// per day, inverse Earth radii); attaching physical units or converting
/// to a propagator state is a job for downstream consumers. A record is
/// only ever produced by a successful parse of a complete, validated
/// line group and is not meant to be modified afterwards.
#[derive(Clone, PartialEq, Debug, Display, Serialize, Deserialize)]
#[display(
    fmt = "{{norad: {}, epoch: {}/{:.8}, n: {} rev/day}}",
    "norad_id",
    "epoch_year",
    "epoch_day",
    "mean_motion"
)]
pub struct Tle {
    /// Free-text object name from the optional name line, trimmed.
    pub name: Option<String>,

    /// Catalog number, identical on both element lines.
    pub norad_id: NoradId,

    pub classification: Classification,

    /// Launch year + launch number + piece, e.g. "98067A". No numeric
    /// semantics.
    pub international_designator: String,

    /// Four-digit epoch year (two-digit years are pivot-resolved by the
    /// parser).
    pub epoch_year: i32,
    /// Fractional day of year; 1.0 is January 1st 00:00:00.
    pub epoch_day: f64,

    /// First derivative of mean motion [rev/day^2]
    pub mean_motion_dot: f64,
    /// Second derivative of mean motion [rev/day^3]
    pub mean_motion_ddot: f64,
    /// SGP4 drag term [1/Earth radii]
    pub bstar: f64,

    /// Column 63 of line 1, carried through unvalidated.
    pub ephemeris_type: char,
    /// Element set sequence number.
    pub set_number: u32,

    /// Inclination [deg]
    pub inclination: f64,
    /// Right ascension of the ascending node [deg]
    pub raan: f64,
    /// Eccentricity, dimensionless, always in [0, 1).
    pub eccentricity: f64,
    /// Argument of perigee [deg]
    pub argument_of_perigee: f64,
    /// Mean anomaly [deg]
    pub mean_anomaly: f64,
    /// Mean motion [rev/day]
    pub mean_motion: f64,
    /// Orbit count at epoch.
    pub revolution_number: u32,

    /// Declared mod-10 checksum digits, column 69 of each line.
    pub line1_checksum: u8,
    pub line2_checksum: u8,
}

impl Tle {
    /// Absolute epoch timestamp, microsecond resolution.
    ///
    /// Combines the epoch year with the fractional day of year; day 1.0
    /// is January 1st 00:00:00 of that year.
    pub fn epoch(&self) -> UtcTimestamp {
        let jan1 = NaiveDate::from_yo_opt(self.epoch_year, 1)
            .expect("epoch year is pivot-bounded")
            .and_hms_opt(0, 0, 0)
            .expect("midnight")
            .and_utc();
        let micros = ((self.epoch_day - 1.0) * 86_400e6).round() as i64;
        jan1 + Duration::microseconds(micros)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(epoch_year: i32, epoch_day: f64) -> Tle {
        Tle {
            name: Some("ISS (ZARYA)".to_owned()),
            norad_id: NoradId::parse("25544").unwrap(),
            classification: Classification::Unclassified,
            international_designator: "98067A".to_owned(),
            epoch_year,
            epoch_day,
            mean_motion_dot: 1.909e-5,
            mean_motion_ddot: 0.0,
            bstar: 4.0858e-5,
            ephemeris_type: '0',
            set_number: 999,
            inclination: 51.6464,
            raan: 320.1755,
            eccentricity: 0.0007999,
            argument_of_perigee: 10.9066,
            mean_anomaly: 53.2893,
            mean_motion: 15.50437522,
            revolution_number: 18780,
            line1_checksum: 0,
            line2_checksum: 5,
        }
    }

    #[test]
    fn epoch_resolves_fractional_day() {
        let tle = record(2019, 249.04864348);
        let expected: UtcTimestamp = "2019-09-06T01:10:02.796672Z".parse().unwrap();
        assert_eq!(tle.epoch(), expected);
    }

    #[test]
    fn epoch_day_one_is_new_year_midnight() {
        let tle = record(2024, 1.0);
        let expected: UtcTimestamp = "2024-01-01T00:00:00Z".parse().unwrap();
        assert_eq!(tle.epoch(), expected);
    }

    #[test]
    fn epoch_spans_a_leap_day() {
        // 2020 is a leap year: day 61 is March 1st
        let tle = record(2020, 61.5);
        let expected: UtcTimestamp = "2020-03-01T12:00:00Z".parse().unwrap();
        assert_eq!(tle.epoch(), expected);
    }
}
