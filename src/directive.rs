//! Directive scanning for `// NOFORMAT` comments.
//!
//! Supports excluding lines from formatting via special comments:
//! - `// NOFORMAT` excludes the line carrying it
//! - `// NOFORMAT(-2:)` excludes from two lines above through this line
//! - `// NOFORMAT(1:3)` excludes the next three lines
//! - `// NOFORMAT(0,2:3)` takes a comma-separated list of specs
//!
//! Offsets are relative to the directive's own line; `a:` and `:b` leave the
//! missing bound at 0 (the directive line itself). Matching happens on a
//! compacted form of the line: trimmed, with every space removed (tabs are
//! left alone), so `//  NO FORMAT` variants collapse predictably.

use regex::Regex;

use crate::error::{Error, Result};
use crate::ranges::ExcludedRange;

/// Scans source lines for one configured exclusion token.
///
/// The match pattern is built once from the token, with the token text taken
/// literally (regex metacharacters escaped).
#[derive(Debug)]
pub struct DirectiveScanner {
    /// Bare comment form, e.g. `//NOFORMAT`
    token: String,
    /// Parenthesized form, e.g. `//NOFORMAT(-2:)`
    pattern: Regex,
}

impl DirectiveScanner {
    pub fn new(flag: &str) -> Result<Self> {
        let escaped = regex::escape(flag);
        let pattern = Regex::new(&format!(r"//{escaped}\(([^)]+)\)"))
            .map_err(|err| Error::config(format!("unusable directive flag `{flag}`: {err}")))?;
        Ok(Self {
            token: format!("//{flag}"),
            pattern,
        })
    }

    /// Scan all lines and collect excluded ranges in encounter order.
    ///
    /// Ranges are not yet sorted or checked against each other; that is the
    /// validator's job. Each range is bounds-checked against `lines` here, so
    /// downstream arithmetic can rely on indices being inside the file.
    pub fn scan(&self, lines: &[String]) -> Result<Vec<ExcludedRange>> {
        let mut ranges = Vec::new();
        for (index, line) in lines.iter().enumerate() {
            self.scan_line(index, line, lines.len(), &mut ranges)?;
        }
        Ok(ranges)
    }

    fn scan_line(
        &self,
        index: usize,
        line: &str,
        line_count: usize,
        ranges: &mut Vec<ExcludedRange>,
    ) -> Result<()> {
        let compact = compact_line(line);
        if let Some(captures) = self.pattern.captures(&compact) {
            for spec in captures[1].split(',') {
                ranges.push(resolve_spec(index, spec, &compact, line_count)?);
            }
        } else if compact.contains(&self.token) {
            // Bare token: the directive line itself is excluded. This is a
            // plain substring check, so the token also matches inside a
            // longer word.
            ranges.push(ExcludedRange::new(index, index));
        }
        Ok(())
    }
}

/// Trim the line, then drop every space character. Tabs survive.
fn compact_line(line: &str) -> String {
    line.trim().replace(' ', "")
}

/// Resolve one relative spec (`k`, `a:b`, `:b`, `a:`) against the line that
/// carries the directive.
fn resolve_spec(
    line_index: usize,
    spec: &str,
    directive: &str,
    line_count: usize,
) -> Result<ExcludedRange> {
    let (rel_start, rel_end) = parse_offsets(spec)
        .ok_or_else(|| Error::malformed(line_index, directive, format!("bad range `{spec}`")))?;
    if rel_start > rel_end {
        return Err(Error::malformed(
            line_index,
            directive,
            format!("inverted range `{spec}`"),
        ));
    }
    let Some(start) = resolve_bound(line_index, rel_start) else {
        return Err(Error::malformed(
            line_index,
            directive,
            format!("range `{spec}` starts before the first line"),
        ));
    };
    let Some(end) = resolve_bound(line_index, rel_end) else {
        return Err(Error::malformed(
            line_index,
            directive,
            format!("range `{spec}` leaves the file"),
        ));
    };
    if end >= line_count {
        return Err(Error::malformed(
            line_index,
            directive,
            format!("range `{spec}` extends past the last line"),
        ));
    }
    Ok(ExcludedRange::new(start, end))
}

/// Parse a spec into signed (start, end) offsets. A lone `k` means `k:k`;
/// an empty side of `:` means 0.
fn parse_offsets(spec: &str) -> Option<(i64, i64)> {
    match spec.split_once(':') {
        None => {
            let offset = spec.parse().ok()?;
            Some((offset, offset))
        }
        Some((start, end)) => {
            let start = if start.is_empty() {
                0
            } else {
                start.parse().ok()?
            };
            let end = if end.is_empty() { 0 } else { end.parse().ok()? };
            Some((start, end))
        }
    }
}

/// Apply a signed offset to a 0-indexed line, refusing to leave the file's
/// front. The past-the-end check needs the line count and happens separately.
fn resolve_bound(line_index: usize, offset: i64) -> Option<usize> {
    let base = i64::try_from(line_index).ok()?;
    usize::try_from(base.checked_add(offset)?).ok()
}
