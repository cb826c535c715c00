//! Line-range arithmetic over excluded regions.
//!
//! Two range flavors live here. [`ExcludedRange`] is what the directive
//! scanner produces: 0-indexed, inclusive, relative to nothing (absolute file
//! positions). [`FormatRange`] is what the formatter consumes through
//! `--lines`: 1-indexed, inclusive. Keeping them as separate types keeps the
//! index base visible at every call site.

use std::fmt;

use crate::error::{Error, Result};

/// A region excluded from formatting: absolute, inclusive, 0-indexed bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExcludedRange {
    pub start: usize,
    pub end: usize,
}

impl ExcludedRange {
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// A region handed to the formatter: absolute, inclusive, 1-indexed bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatRange {
    pub start: usize,
    pub end: usize,
}

impl fmt::Display for FormatRange {
    /// Renders as the `start:end` argument form `--lines` expects.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

/// Sort excluded ranges by start line and reject conflicting neighbors.
///
/// Two ranges conflict when they overlap or merely touch: after sorting,
/// every consecutive pair must satisfy `prev.end < next.start`. Directives
/// that produce touching ranges almost certainly disagree about the same
/// lines, so they are rejected rather than merged.
pub fn sort_and_validate(mut ranges: Vec<ExcludedRange>) -> Result<Vec<ExcludedRange>> {
    ranges.sort_by_key(|range| range.start);
    for pair in ranges.windows(2) {
        if pair[0].end >= pair[1].start {
            return Err(Error::overlap(
                (pair[0].start, pair[0].end),
                (pair[1].start, pair[1].end),
            ));
        }
    }
    Ok(ranges)
}

/// Compute the 1-indexed spans covering every line outside the exclusions.
///
/// `excluded` must already be sorted and validated, with every bound inside
/// `0..line_count`. The returned spans and the excluded ranges partition the
/// file: each line falls in exactly one of them. Zero-length gaps between
/// adjacent exclusions produce no span.
#[must_use]
pub fn complement_ranges(line_count: usize, excluded: &[ExcludedRange]) -> Vec<FormatRange> {
    let mut spans = Vec::new();
    // Next 0-indexed line not yet assigned to any span or exclusion.
    let mut cursor = 0;
    for range in excluded {
        if cursor < range.start {
            spans.push(FormatRange {
                start: cursor + 1,
                end: range.start,
            });
        }
        cursor = range.end + 1;
    }
    if cursor < line_count {
        spans.push(FormatRange {
            start: cursor + 1,
            end: line_count,
        });
    }
    spans
}
