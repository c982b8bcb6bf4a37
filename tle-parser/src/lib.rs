//! Parser for NORAD two-line element sets: single records and whole
//! catalog files, with checksum and field validation.

pub use crate::catalog::{
    parse_catalog, parse_catalog_strict, partition_catalog, CatalogEntry, LineGroup, Partitioner,
};
pub use crate::parser::{parse_tle, parse_tle_with, LineNumber, ParseConfig, TleError};
pub use crate::writer::write_lines;

pub mod catalog;
pub mod checksum;
pub mod fields;
pub mod parser;
pub mod writer;

/// Physical length of both element lines, checksum column included.
pub const LINE_LEN: usize = 69;
/// Start marker of the first element line.
pub const LINE1_MARKER: &str = "1 ";
/// Start marker of the second element line.
pub const LINE2_MARKER: &str = "2 ";
/// Two-digit epoch years below this resolve to 20xx, the rest to 19xx
/// (no object predates Sputnik, 1957).
pub const EPOCH_PIVOT_YEAR: i32 = 57;
