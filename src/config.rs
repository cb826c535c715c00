//! Configuration for nofmt.
//!
//! [`Config`] holds the directive token and the knobs of the formatter
//! invocation. Values come from `nofmt.toml` files and from CLI flags, with
//! the flags winning. TOML files are auto-discovered: the user's home
//! directory plus every ancestor of the working directory, merged from most
//! general to nearest.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// File names that count as configuration during discovery
const CONFIG_FILE_NAMES: &[&str] = &["nofmt.toml"];

/// Home directory, via HOME with a USERPROFILE fallback for Windows
fn dirs_home() -> Option<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home));
    }
    if let Ok(userprofile) = std::env::var("USERPROFILE") {
        return Some(PathBuf::from(userprofile));
    }
    None
}

// Defaults for serde
fn default_flag() -> String {
    "NOFORMAT".to_string()
}
fn default_formatter() -> String {
    "clang-format".to_string()
}
fn default_style() -> String {
    "file".to_string()
}
fn default_true() -> bool {
    true
}

/// Main configuration struct for nofmt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directive token that marks excluded lines (default: NOFORMAT)
    #[serde(default = "default_flag")]
    pub flag: String,

    /// Formatter executable to invoke (default: clang-format)
    #[serde(default = "default_formatter")]
    pub formatter: String,

    /// Style name passed to the formatter via `--style=` (default: file)
    #[serde(default = "default_style")]
    pub style: String,

    /// Pass `--sort-includes` to the formatter (default: true)
    #[serde(default = "default_true")]
    pub sort_includes: bool,
}

/// What one TOML file contributes. Every field is an `Option` so a file
/// that leaves a key out does not clobber values from earlier layers.
#[derive(Debug, Clone, Default, Deserialize)]
struct PartialConfig {
    pub flag: Option<String>,
    pub formatter: Option<String>,
    pub style: Option<String>,
    pub sort_includes: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            flag: "NOFORMAT".to_string(),
            formatter: "clang-format".to_string(),
            style: "file".to_string(),
            sort_includes: true,
        }
    }
}

impl Config {
    /// Check the assembled configuration, returning a message describing the
    /// first unusable value, or `None` when everything is fine.
    #[must_use]
    pub fn validate(&self) -> Option<String> {
        if self.flag.is_empty() {
            return Some("flag must not be empty".to_string());
        }
        if self.flag.chars().any(char::is_whitespace) {
            // Directive matching strips spaces from each line first, so a
            // token containing whitespace could never match anything.
            return Some(format!("flag `{}` must not contain whitespace", self.flag));
        }
        if self.formatter.trim().is_empty() {
            return Some("formatter must not be empty".to_string());
        }
        if self.style.trim().is_empty() {
            return Some("style must not be empty".to_string());
        }
        None
    }

    /// Load one TOML file on top of the defaults.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|err| Error::read(path, &err))?;
        let partial: PartialConfig = toml::from_str(&contents)
            .map_err(|err| Error::config(format!("{}: {err}", path.display())))?;
        let mut config = Self::default();
        config.apply_partial(&partial);
        Ok(config)
    }

    /// Merge one file's values; keys the file left out stay untouched.
    fn apply_partial(&mut self, partial: &PartialConfig) {
        if let Some(v) = &partial.flag {
            self.flag = v.clone();
        }
        if let Some(v) = &partial.formatter {
            self.formatter = v.clone();
        }
        if let Some(v) = &partial.style {
            self.style = v.clone();
        }
        if let Some(v) = partial.sort_includes {
            self.sort_includes = v;
        }
    }

    /// Find every config file that applies at `start_path`, most general
    /// first: the home directory, then each ancestor from the filesystem
    /// root down to `start_path` itself. Merging in this order lets the
    /// nearest file win.
    #[must_use]
    pub fn discover_config_files(start_path: &Path) -> Vec<PathBuf> {
        let mut config_files = Vec::new();

        if let Some(home) = dirs_home() {
            for config_name in CONFIG_FILE_NAMES {
                let home_config = home.join(config_name);
                if home_config.is_file() {
                    config_files.push(home_config);
                }
            }
        }

        // A file path contributes its parent directory's chain
        let start_dir = if start_path.is_file() {
            start_path.parent().map(Path::to_path_buf)
        } else if start_path.is_dir() {
            Some(start_path.to_path_buf())
        } else {
            std::env::current_dir().ok()
        };

        if let Some(dir) = start_dir {
            // ancestors() walks upward; flip it so the nearest directory
            // lands last
            let mut ancestors: Vec<PathBuf> = dir.ancestors().map(Path::to_path_buf).collect();
            ancestors.reverse();

            for ancestor in ancestors {
                for config_name in CONFIG_FILE_NAMES {
                    let config_path = ancestor.join(config_name);
                    if config_path.is_file() && !config_files.contains(&config_path) {
                        config_files.push(config_path);
                    }
                }
            }
        }

        config_files
    }

    /// Discover and merge every applicable config file, nearest file last.
    /// A file that cannot be read or parsed earns a stderr warning and is
    /// skipped; with no files at all the defaults stand.
    #[must_use]
    pub fn from_discovered_files(start_path: &Path) -> Self {
        let config_files = Self::discover_config_files(start_path);

        if config_files.is_empty() {
            return Self::default();
        }

        let mut config = Self::default();
        for path in &config_files {
            match std::fs::read_to_string(path) {
                Ok(contents) => match toml::from_str::<PartialConfig>(&contents) {
                    Ok(partial) => config.apply_partial(&partial),
                    Err(e) => eprintln!("Warning: failed to parse {}: {e}", path.display()),
                },
                Err(e) => eprintln!("Warning: failed to read {}: {e}", path.display()),
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_defaults() {
        let config = Config::default();
        assert_eq!(config.flag, "NOFORMAT");
        assert_eq!(config.formatter, "clang-format");
        assert_eq!(config.style, "file");
        assert!(config.sort_includes);
    }

    #[test]
    fn test_partial_merge_overrides_set_keys() {
        let mut base = Config::default();

        let partial = PartialConfig {
            flag: Some("KEEPRAW".to_string()),
            style: Some("Google".to_string()),
            ..Default::default()
        };

        base.apply_partial(&partial);
        assert_eq!(base.flag, "KEEPRAW");
        assert_eq!(base.style, "Google");
        // Keys the partial left out stay at their defaults
        assert_eq!(base.formatter, "clang-format");
        assert!(base.sort_includes);
    }

    #[test]
    fn test_partial_merge_keeps_unset_keys() {
        let mut base = Config::default();
        base.formatter = "clang-format-17".to_string();

        let partial = PartialConfig {
            sort_includes: Some(false),
            ..Default::default()
        };

        base.apply_partial(&partial);
        // A later layer without `formatter` must not reset the earlier value
        assert_eq!(base.formatter, "clang-format-17");
        assert!(!base.sort_includes);
    }

    #[test]
    fn test_partial_config_from_toml() {
        let partial: PartialConfig =
            toml::from_str("flag = \"RAW\"\nsort_includes = false").unwrap();
        assert_eq!(partial.flag.as_deref(), Some("RAW"));
        assert_eq!(partial.sort_includes, Some(false));
        assert!(partial.formatter.is_none());
        assert!(partial.style.is_none());
    }

    #[test]
    fn test_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nofmt.toml");
        std::fs::write(&path, "formatter = \"clang-format-17\"\nstyle = \"LLVM\"\n").unwrap();

        let config = Config::from_toml_file(&path).unwrap();
        assert_eq!(config.formatter, "clang-format-17");
        assert_eq!(config.style, "LLVM");
        assert_eq!(config.flag, "NOFORMAT");
    }

    #[test]
    fn test_from_toml_file_missing() {
        let err = Config::from_toml_file(Path::new("/nonexistent/nofmt.toml")).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }

    #[test]
    fn test_from_toml_file_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nofmt.toml");
        std::fs::write(&path, "flag = [this is not toml").unwrap();

        let err = Config::from_toml_file(&path).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_discovery_tolerates_missing_start_path() {
        let path = PathBuf::from("/nonexistent/path/file.cpp");
        let _files = Config::discover_config_files(&path);
    }

    #[test]
    fn test_no_discovered_files_yields_defaults() {
        let path = PathBuf::from("/nonexistent/unique/path/file.cpp");
        let config = Config::from_discovered_files(&path);
        assert_eq!(config.flag, "NOFORMAT");
        assert_eq!(config.formatter, "clang-format");
    }

    #[test]
    fn test_discover_finds_nearest_last() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("project/src");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("project/nofmt.toml"), "flag = \"OUTER\"\n").unwrap();
        std::fs::write(nested.join("nofmt.toml"), "flag = \"INNER\"\n").unwrap();

        let files = Config::discover_config_files(&nested);
        let positions: Vec<usize> = ["project/nofmt.toml", "project/src/nofmt.toml"]
            .iter()
            .map(|suffix| {
                files
                    .iter()
                    .position(|f| f.ends_with(suffix))
                    .unwrap_or_else(|| panic!("{suffix} not discovered"))
            })
            .collect();
        assert!(positions[0] < positions[1], "outer must come before inner");

        // Nearest file wins after merging
        let config = Config::from_discovered_files(&nested);
        assert_eq!(config.flag, "INNER");
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_none());
    }

    #[test]
    fn test_validate_empty_flag() {
        let config = Config {
            flag: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_some());
        assert!(config.validate().unwrap().contains("flag"));
    }

    #[test]
    fn test_validate_flag_with_whitespace() {
        let config = Config {
            flag: "NO FORMAT".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_some());
    }

    #[test]
    fn test_validate_empty_formatter() {
        let config = Config {
            formatter: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_some());
        assert!(config.validate().unwrap().contains("formatter"));
    }

    #[test]
    fn test_validate_empty_style() {
        let config = Config {
            style: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_some());
    }
}
