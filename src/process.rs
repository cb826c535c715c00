//! Per-file processing pipeline.
//!
//! This module orchestrates one file's pass through the tool:
//!
//! 1. Read the file into memory as terminator-preserving lines
//! 2. Scan for directives and resolve them to excluded ranges
//! 3. Sort the ranges and reject conflicts
//! 4. Write the annotated scratch copy next to the file
//! 5. Compute the complement spans and run the formatter over them
//!
//! Every step before the scratch write is pure computation, so a directive
//! error aborts the run before anything on disk has changed. Files are
//! processed strictly in sequence by the caller; the first error stops the
//! whole batch.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::directive::DirectiveScanner;
use crate::error::{Error, Result};
use crate::invoke::FormatterCommand;
use crate::ranges::{complement_ranges, sort_and_validate};
use crate::scratch::{annotate_lines, write_scratch};

/// Flags controlling a run, separate from formatting configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Compute and print everything, but write nothing and spawn nothing
    pub dry_run: bool,
    /// Verbose diagnostics on stderr
    pub debug: bool,
}

/// Verify every input path exists before any file is touched.
pub fn check_inputs(paths: &[PathBuf]) -> Result<()> {
    for path in paths {
        if !path.exists() {
            return Err(Error::missing_file(path));
        }
    }
    Ok(())
}

/// Run the whole pipeline for one file.
pub fn process_file(
    path: &Path,
    scanner: &DirectiveScanner,
    config: &Config,
    options: RunOptions,
) -> Result<()> {
    let contents = fs::read_to_string(path).map_err(|err| Error::read(path, &err))?;
    let lines = split_lines(&contents);

    let found = scanner.scan(&lines)?;
    let excluded = sort_and_validate(found)?;
    if options.debug {
        eprintln!(
            "[DEBUG] {}: {} excluded range(s)",
            path.display(),
            excluded.len()
        );
        for range in &excluded {
            eprintln!("[DEBUG]   lines {}:{}", range.start + 1, range.end + 1);
        }
    }

    let annotated = annotate_lines(&lines, &excluded);
    if options.dry_run {
        if options.debug {
            eprintln!("[DEBUG] dry run: skipping scratch copy for {}", path.display());
        }
    } else {
        let scratch = write_scratch(path, &annotated)?;
        if options.debug {
            eprintln!("[DEBUG] wrote {}", scratch.display());
        }
    }

    let spans = complement_ranges(lines.len(), &excluded);
    if spans.is_empty() {
        // Without any selector the formatter would format the whole file,
        // which is exactly what the directives forbid.
        eprintln!("Nothing to format in {} (every line excluded)", path.display());
        return Ok(());
    }

    let command = FormatterCommand::new(config, path, &spans);
    println!("{}", command.rendered());
    if options.dry_run {
        return Ok(());
    }
    let status = command.run()?;
    if !status.success() {
        eprintln!(
            "Warning: formatter exited with {status} on {}",
            path.display()
        );
    }
    Ok(())
}

/// Split text into lines, each keeping its terminator. The final line may
/// lack one; a trailing newline does not produce a phantom empty line.
#[must_use]
pub fn split_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_string).collect()
}
