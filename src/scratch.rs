//! Scratch-file generation.
//!
//! Next to every processed file the tool leaves a hidden annotated copy that
//! shows which regions the directives carved out: each excluded range is
//! bracketed by `// clang-format off` and `// clang-format on` marker lines.
//! The copy exists purely for inspection; the formatter never reads it.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::ranges::ExcludedRange;

/// Marker line content placed before an excluded range.
pub const FORMAT_OFF: &str = "// clang-format off";
/// Marker line content placed after an excluded range.
pub const FORMAT_ON: &str = "// clang-format on";
/// Extension of the hidden annotated copy.
pub const SCRATCH_SUFFIX: &str = "4cf";

/// Bracket every excluded range with suppression markers.
///
/// Lines keep their terminators and are emitted verbatim. Each marker copies
/// the literal leading whitespace of the boundary line it attaches to: the
/// range's first line for the opening marker, its last line for the closing
/// one. `excluded` must be sorted, non-overlapping, and inside `lines`.
///
/// The output is a pure function of the inputs, so repeated runs over the
/// same file produce byte-identical scratch copies.
#[must_use]
pub fn annotate_lines(lines: &[String], excluded: &[ExcludedRange]) -> Vec<String> {
    let mut annotated = Vec::with_capacity(lines.len() + 2 * excluded.len());
    let mut cursor = 0;
    for range in excluded {
        annotated.extend(lines[cursor..range.start].iter().cloned());

        let head = leading_whitespace(&lines[range.start]);
        annotated.push(format!("{head}{FORMAT_OFF}\n"));

        annotated.extend(lines[range.start..=range.end].iter().cloned());

        // A final line without a terminator would glue itself to the
        // closing marker; give the marker its own line.
        let unterminated = annotated.last().is_some_and(|line| !line.ends_with('\n'));
        if unterminated {
            annotated.push("\n".to_string());
        }
        let tail = leading_whitespace(&lines[range.end]);
        annotated.push(format!("{tail}{FORMAT_ON}\n"));

        cursor = range.end + 1;
    }
    annotated.extend(lines[cursor..].iter().cloned());
    annotated
}

/// Path of the hidden annotated copy: same directory, original file name
/// prefixed with a dot and suffixed with `.4cf`.
#[must_use]
pub fn scratch_path(source: &Path) -> PathBuf {
    let name = source
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    source.with_file_name(format!(".{name}.{SCRATCH_SUFFIX}"))
}

/// Write the annotated copy next to `source`, overwriting a previous one.
pub fn write_scratch(source: &Path, annotated: &[String]) -> Result<PathBuf> {
    let path = scratch_path(source);
    fs::write(&path, annotated.concat()).map_err(|err| Error::write(&path, &err))?;
    Ok(path)
}

/// Leading run of spaces and tabs, excluding the line terminator.
fn leading_whitespace(line: &str) -> &str {
    let trimmed = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - trimmed.len()]
}
