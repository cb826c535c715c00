//! Command-line surface of nofmt, built with the clap builder API.

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};

/// Parsed command line. `None` in an override field means the value from
/// the config layer (or its default) stands.
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Source files to format
    pub inputs: Vec<PathBuf>,

    /// Directive token override
    pub flag: Option<String>,

    /// Formatter executable override
    pub formatter: Option<String>,

    /// Style name override
    pub style: Option<String>,

    /// Do not pass --sort-includes to the formatter
    pub no_sort_includes: bool,

    /// Explicit config file, replacing auto-discovery
    pub config: Option<PathBuf>,

    /// Print commands without writing or formatting anything
    pub dry_run: bool,

    /// Verbose diagnostics on stderr
    pub debug: bool,
}

/// The clap command definition.
#[must_use]
pub fn build_cli() -> Command {
    Command::new("nofmt")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Run clang-format while honoring NOFORMAT line-range directives")
        .arg(
            Arg::new("inputs")
                .help("Source files to format")
                .value_name("FILE")
                .num_args(1..)
                .required(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("flag")
                .long("flag")
                .help("Directive token that marks excluded lines [default: NOFORMAT]")
                .value_name("TOKEN"),
        )
        .arg(
            Arg::new("formatter")
                .long("formatter")
                .help("Formatter executable to invoke [default: clang-format]")
                .value_name("BIN"),
        )
        .arg(
            Arg::new("style")
                .long("style")
                .help("Style name passed to the formatter [default: file]")
                .value_name("STYLE"),
        )
        .arg(
            Arg::new("no-sort-includes")
                .long("no-sort-includes")
                .help("Do not pass --sort-includes to the formatter")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Configuration file to use instead of auto-discovery")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("dry-run")
                .short('n')
                .long("dry-run")
                .help("Print formatter commands without writing or running anything")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("debug")
                .short('D')
                .long("debug")
                .help("Enable debug output (shows config and resolved ranges)")
                .action(ArgAction::SetTrue),
        )
}

/// Parse the process's own command line.
#[must_use]
pub fn parse_args() -> CliArgs {
    args_from_matches(&build_cli().get_matches())
}

/// Parse an explicit argument list; tests go through this.
#[must_use]
pub fn parse_args_from<I, T>(args: I) -> CliArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    args_from_matches(&build_cli().get_matches_from(args))
}

/// Lift clap's dynamic matches into the typed struct.
fn args_from_matches(matches: &clap::ArgMatches) -> CliArgs {
    CliArgs {
        inputs: matches
            .get_many::<PathBuf>("inputs")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        flag: matches.get_one::<String>("flag").cloned(),
        formatter: matches.get_one::<String>("formatter").cloned(),
        style: matches.get_one::<String>("style").cloned(),
        no_sort_includes: matches.get_flag("no-sort-includes"),
        config: matches.get_one::<PathBuf>("config").cloned(),
        dry_run: matches.get_flag("dry-run"),
        debug: matches.get_flag("debug"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_definition_builds() {
        let cmd = build_cli();
        assert_eq!(cmd.get_name(), "nofmt");
    }

    #[test]
    fn test_inputs_are_required() {
        let cmd = build_cli();
        assert!(cmd.try_get_matches_from(vec!["nofmt"]).is_err());
    }

    #[test]
    fn test_single_input() {
        let args = parse_args_from(vec!["nofmt", "file.cpp"]);
        assert_eq!(args.inputs, vec![PathBuf::from("file.cpp")]);
        assert_eq!(args.flag, None);
        assert!(!args.dry_run);
        assert!(!args.debug);
        assert!(!args.no_sort_includes);
    }

    #[test]
    fn test_multiple_inputs_keep_order() {
        let args = parse_args_from(vec!["nofmt", "b.cpp", "a.cpp", "c.h"]);
        assert_eq!(
            args.inputs,
            vec![
                PathBuf::from("b.cpp"),
                PathBuf::from("a.cpp"),
                PathBuf::from("c.h")
            ]
        );
    }

    #[test]
    fn test_flag_override() {
        let args = parse_args_from(vec!["nofmt", "--flag", "KEEPRAW", "file.cpp"]);
        assert_eq!(args.flag.as_deref(), Some("KEEPRAW"));
    }

    #[test]
    fn test_formatter_and_style_overrides() {
        let args = parse_args_from(vec![
            "nofmt",
            "--formatter",
            "clang-format-17",
            "--style",
            "LLVM",
            "file.cpp",
        ]);
        assert_eq!(args.formatter.as_deref(), Some("clang-format-17"));
        assert_eq!(args.style.as_deref(), Some("LLVM"));
    }

    #[test]
    fn test_no_sort_includes() {
        let args = parse_args_from(vec!["nofmt", "--no-sort-includes", "file.cpp"]);
        assert!(args.no_sort_includes);
    }

    #[test]
    fn test_config_path() {
        let args = parse_args_from(vec!["nofmt", "-c", "tools/nofmt.toml", "file.cpp"]);
        assert_eq!(args.config, Some(PathBuf::from("tools/nofmt.toml")));
    }

    #[test]
    fn test_dry_run_short_flag() {
        let args = parse_args_from(vec!["nofmt", "-n", "file.cpp"]);
        assert!(args.dry_run);
    }

    #[test]
    fn test_debug_short_and_long_flags() {
        assert!(parse_args_from(vec!["nofmt", "-D", "file.cpp"]).debug);
        assert!(parse_args_from(vec!["nofmt", "--debug", "file.cpp"]).debug);
    }
}
