//! nofmt - clang-format driver with NOFORMAT exclusion directives
//!
//! nofmt scans C/C++ sources for `// NOFORMAT` comment directives, resolves
//! the line ranges they exclude, and runs clang-format restricted to the
//! complement of those ranges so the marked lines keep their hand-made
//! layout. A hidden annotated copy of each file (`.name.ext.4cf`) shows the
//! excluded regions bracketed by `// clang-format off` / `// clang-format on`
//! markers.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod cli;
pub mod config;
pub mod directive;
pub mod error;
pub mod invoke;
pub mod process;
pub mod ranges;
pub mod scratch;

// Flat re-exports of the pipeline's building blocks
pub use cli::{CliArgs, build_cli, parse_args, parse_args_from};
pub use config::Config;
pub use directive::DirectiveScanner;
pub use error::{Error, Result};
pub use invoke::FormatterCommand;
pub use ranges::{ExcludedRange, FormatRange, complement_ranges, sort_and_validate};
pub use scratch::{annotate_lines, scratch_path, write_scratch};
