//! Construction and execution of the external formatter command.
//!
//! One invocation per file:
//!
//! ```text
//! clang-format -i --lines 2:10 --lines 14:30 --sort-includes --style=file src/foo.cpp
//! ```
//!
//! The argument vector and its printable rendering are built without touching
//! the system, so tests can assert on the exact command; only [`FormatterCommand::run`]
//! spawns a process. The child inherits stdout and stderr, and its exit
//! status is returned to the caller rather than interpreted here.

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, ExitStatus};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::ranges::FormatRange;

/// A fully assembled formatter invocation for one file.
#[derive(Debug, Clone)]
pub struct FormatterCommand {
    program: String,
    args: Vec<OsString>,
}

impl FormatterCommand {
    /// Assemble the argument vector: in-place edit, one `--lines` selector
    /// per span, include sorting, the configured style, then the target.
    #[must_use]
    pub fn new(config: &Config, target: &Path, spans: &[FormatRange]) -> Self {
        let mut args: Vec<OsString> = vec!["-i".into()];
        for span in spans {
            args.push("--lines".into());
            args.push(span.to_string().into());
        }
        if config.sort_includes {
            args.push("--sort-includes".into());
        }
        args.push(format!("--style={}", config.style).into());
        args.push(target.as_os_str().to_os_string());
        Self {
            program: config.formatter.clone(),
            args,
        }
    }

    /// The command as a single printable line.
    #[must_use]
    pub fn rendered(&self) -> String {
        let mut pieces = vec![self.program.clone()];
        pieces.extend(self.args.iter().map(|arg| arg.to_string_lossy().into_owned()));
        pieces.join(" ")
    }

    /// Spawn the formatter and wait for it, inheriting stdout and stderr.
    pub fn run(&self) -> Result<ExitStatus> {
        Command::new(&self.program)
            .args(&self.args)
            .status()
            .map_err(|err| Error::formatter(&self.program, &err))
    }
}
