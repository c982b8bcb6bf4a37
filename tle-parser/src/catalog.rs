//! Catalog partitioning: splitting a multi-record line stream into 2- or
//! 3-line groups by the "1 "/"2 " start markers, then scanning whole
//! catalogs record by record.

use std::iter::Peekable;
use std::ops::Range;

use tle_types::prelude::*;
use tracing::debug;

use crate::parser::{parse_tle_with, ParseConfig, TleError};
use crate::{LINE1_MARKER, LINE2_MARKER};

/// The raw lines of one record, before any field decoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineGroup<'a> {
    /// Free-text line immediately before the pair, if any.
    pub name: Option<&'a str>,
    pub line1: &'a str,
    pub line2: &'a str,
    /// Source line indices the group covers, name line included.
    pub lines: Range<usize>,
}

/// Marker-based splitter over `(line index, line)` pairs.
///
/// Boundary detection looks only at the first two characters of each
/// line, so one record with rotten field contents never desynchronizes
/// the records around it. The partitioner keeps no state across
/// invocations; feed it a fresh line sequence to restart.
pub struct Partitioner<'a, I: Iterator<Item = (usize, &'a str)>> {
    lines: Peekable<I>,
    /// Candidate name line waiting for a "1 " line to claim it.
    pending: Option<(usize, &'a str)>,
    /// A marker line displaced while an error for an earlier line was
    /// reported; consumed before the underlying iterator.
    carry: Option<(usize, &'a str)>,
    seen_record: bool,
}

impl<'a, I: Iterator<Item = (usize, &'a str)>> Partitioner<'a, I> {
    pub fn new(lines: I) -> Self {
        Self {
            lines: lines.peekable(),
            pending: None,
            carry: None,
            seen_record: false,
        }
    }

    fn pull(&mut self) -> Option<(usize, &'a str)> {
        self.carry.take().or_else(|| self.lines.next())
    }
}

impl<'a, I: Iterator<Item = (usize, &'a str)>> Iterator for Partitioner<'a, I> {
    type Item = Result<LineGroup<'a>, TleError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (index, line) = match self.pull() {
                Some(entry) => entry,
                None => {
                    // Trailing name candidate with nothing to attach to
                    let (index, text) = self.pending.take()?;
                    if self.seen_record {
                        return Some(Err(TleError::UnexpectedLine {
                            index,
                            text: text.to_owned(),
                        }));
                    }
                    debug!(line = text, "Ignoring catalog preamble line");
                    return None;
                }
            };

            if line.starts_with(LINE1_MARKER) {
                let name = self.pending.take();
                self.seen_record = true;

                let has_line2 = self
                    .lines
                    .peek()
                    .map_or(false, |(_, next)| next.starts_with(LINE2_MARKER));
                if !has_line2 {
                    return Some(Err(TleError::TruncatedRecord {
                        index,
                        line1: line.to_owned(),
                    }));
                }
                let (line2_index, line2) = self.lines.next()?;

                let start = name.map_or(index, |(name_index, _)| name_index);
                return Some(Ok(LineGroup {
                    name: name.map(|(_, text)| text),
                    line1: line,
                    line2,
                    lines: start..line2_index + 1,
                }));
            }

            if line.starts_with(LINE2_MARKER) {
                // A dangling line 2 can open nothing
                if let Some((pending_index, pending_text)) = self.pending.take() {
                    if self.seen_record {
                        self.carry = Some((index, line));
                        return Some(Err(TleError::UnexpectedLine {
                            index: pending_index,
                            text: pending_text.to_owned(),
                        }));
                    }
                    debug!(line = pending_text, "Ignoring catalog preamble line");
                }
                return Some(Err(TleError::UnexpectedLine {
                    index,
                    text: line.to_owned(),
                }));
            }

            // Non-marker line: new name candidate; an unclaimed older one
            // is preamble or stray content
            if let Some((pending_index, pending_text)) = self.pending.replace((index, line)) {
                if self.seen_record {
                    return Some(Err(TleError::UnexpectedLine {
                        index: pending_index,
                        text: pending_text.to_owned(),
                    }));
                }
                debug!(line = pending_text, "Ignoring catalog preamble line");
            }
        }
    }
}

/// Partition raw catalog text: lines are trimmed of trailing whitespace,
/// blank lines dropped, and source line indices preserved.
pub fn partition_catalog<'a>(
    text: &'a str,
) -> Partitioner<'a, impl Iterator<Item = (usize, &'a str)>> {
    Partitioner::new(
        text.lines()
            .map(str::trim_end)
            .enumerate()
            .filter(|(_, line)| !line.is_empty()),
    )
}

/// Outcome of one record-sized chunk of a catalog scan.
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogEntry {
    /// Source line range the outcome covers.
    pub lines: Range<usize>,
    pub result: Result<Tle, TleError>,
}

/// Scan a whole catalog, yielding one outcome per record in input order.
///
/// A bad record never aborts the scan; each entry carries either the
/// parsed record or the error with its originating line range, and the
/// caller decides what to skip or report.
pub fn parse_catalog<'a>(
    text: &'a str,
    config: ParseConfig,
) -> impl Iterator<Item = CatalogEntry> + 'a {
    partition_catalog(text).map(move |item| match item {
        Ok(group) => CatalogEntry {
            lines: group.lines.clone(),
            result: parse_tle_with(group.name, group.line1, group.line2, config),
        },
        Err(err) => CatalogEntry {
            lines: error_lines(&err),
            result: Err(err),
        },
    })
}

fn error_lines(err: &TleError) -> Range<usize> {
    match err {
        TleError::TruncatedRecord { index, .. } | TleError::UnexpectedLine { index, .. } => {
            *index..index + 1
        }
        _ => 0..0,
    }
}

/// Scan a catalog and fail on the first bad record.
pub fn parse_catalog_strict(text: &str, config: ParseConfig) -> Result<Vec<Tle>, TleError> {
    parse_catalog(text, config).map(|entry| entry.result).collect()
}
