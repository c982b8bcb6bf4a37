//! Rendering a record back into its two 69-column lines.

use tle_types::prelude::*;

use crate::{checksum, fields, LINE_LEN};

/// Format both element lines of a record, checksums recomputed over the
/// rendered data columns.
///
/// Field formats are canonical (blank positive signs, ` 00000-0` for an
/// exact exponential zero), so a line decoded from those conventions
/// comes back byte-for-byte.
pub fn write_lines(tle: &Tle) -> (String, String) {
    let line1 = format!(
        "1 {:>5}{} {:<8} {:02}{} {} {} {} {} {:>4}",
        tle.norad_id.as_str(),
        char::from(tle.classification),
        tle.international_designator,
        tle.epoch_year.rem_euclid(100),
        fields::encode_epoch_day(tle.epoch_day),
        fields::encode_signed_fraction(tle.mean_motion_dot),
        fields::encode_exponential(tle.mean_motion_ddot),
        fields::encode_exponential(tle.bstar),
        tle.ephemeris_type,
        tle.set_number,
    );
    let line2 = format!(
        "2 {:>5} {} {} {} {} {} {}{:>5}",
        tle.norad_id.as_str(),
        fields::encode_angle(tle.inclination),
        fields::encode_angle(tle.raan),
        fields::encode_implied_decimal(tle.eccentricity),
        fields::encode_angle(tle.argument_of_perigee),
        fields::encode_angle(tle.mean_anomaly),
        fields::encode_mean_motion(tle.mean_motion),
        tle.revolution_number,
    );
    (finish(line1), finish(line2))
}

fn finish(mut line: String) -> String {
    debug_assert_eq!(line.len(), LINE_LEN - 1);
    let digit = checksum::compute(&line);
    line.push(char::from(b'0' + digit));
    line
}
