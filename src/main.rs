//! nofmt - clang-format driver with NOFORMAT exclusion directives

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use anyhow::Context;
use nofmt::process::{RunOptions, check_inputs, process_file};
use nofmt::{CliArgs, Config, DirectiveScanner, parse_args};

fn main() -> anyhow::Result<()> {
    let args = parse_args();
    let config = build_config(&args)?;
    let options = RunOptions {
        dry_run: args.dry_run,
        debug: args.debug,
    };

    // Check the whole batch up front so a typo in the last argument cannot
    // leave earlier files already rewritten.
    check_inputs(&args.inputs)?;

    let scanner = DirectiveScanner::new(&config.flag)?;
    for path in &args.inputs {
        process_file(path, &scanner, &config, options)
            .with_context(|| format!("failed to process {}", path.display()))?;
    }

    println!("Done!");
    Ok(())
}

/// Assemble the effective configuration: an explicit `--config` file, or
/// auto-discovery from the working directory, then CLI overrides on top.
fn build_config(args: &CliArgs) -> anyhow::Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        if args.debug {
            eprintln!("[DEBUG] Explicit config file: {}", config_path.display());
        }
        Config::from_toml_file(config_path)?
    } else {
        let cwd = std::env::current_dir().unwrap_or_default();
        if args.debug {
            let discovered = Config::discover_config_files(&cwd);
            if discovered.is_empty() {
                eprintln!("[DEBUG] No config files discovered");
            } else {
                eprintln!("[DEBUG] Config files, most general first:");
                for f in &discovered {
                    eprintln!("[DEBUG]   {}", f.display());
                }
            }
        }
        Config::from_discovered_files(&cwd)
    };

    if let Some(flag) = &args.flag {
        config.flag = flag.clone();
    }
    if let Some(formatter) = &args.formatter {
        config.formatter = formatter.clone();
    }
    if let Some(style) = &args.style {
        config.style = style.clone();
    }
    if args.no_sort_includes {
        config.sort_includes = false;
    }

    if args.debug {
        print_config_debug(&config);
    }

    if let Some(error) = config.validate() {
        anyhow::bail!("invalid configuration: {error}");
    }

    Ok(config)
}

/// Dump the effective configuration to stderr.
fn print_config_debug(config: &Config) {
    eprintln!("[DEBUG] Configuration:");
    eprintln!("[DEBUG]   flag: {}", config.flag);
    eprintln!("[DEBUG]   formatter: {}", config.formatter);
    eprintln!("[DEBUG]   style: {}", config.style);
    eprintln!("[DEBUG]   sort_includes: {}", config.sort_includes);
}
