//! Startup defaults read from flag files.
//!
//! A config file holds the same flags as the command line, one or more per
//! line, with `#` comments. The global file is merged with a local
//! `.texeditrc`, and command-line flags are applied last. Files are only read;
//! nothing here writes preferences back.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub case_sensitive: bool,
    pub no_icon: bool,
    pub force_half_cell: bool,
    pub icon: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge two flag sets; switches from either side stay on and
    /// `other`'s values win for options.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            case_sensitive: self.case_sensitive || other.case_sensitive,
            no_icon: self.no_icon || other.no_icon,
            force_half_cell: self.force_half_cell || other.force_half_cell,
            icon: other.icon.clone().or_else(|| self.icon.clone()),
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("texedit").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("texedit")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("texedit").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("texedit")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".texeditrc")
}

/// Read flags from a config file. A missing file yields the defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// Pick known flags out of a token list; anything else is ignored.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--case-sensitive" {
            flags.case_sensitive = true;
        } else if token == "--no-icon" {
            flags.no_icon = true;
        } else if token == "--force-half-cell" {
            flags.force_half_cell = true;
        } else if token == "--icon" {
            if let Some(next) = tokens.get(i + 1) {
                flags.icon = Some(PathBuf::from(next));
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--icon=") {
            flags.icon = Some(PathBuf::from(value));
        } else if token == "--log-file" {
            if let Some(next) = tokens.get(i + 1) {
                flags.log_file = Some(PathBuf::from(next));
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--log-file=") {
            flags.log_file = Some(PathBuf::from(value));
        }
        i += 1;
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let args = tokens(&[
            "texedit",
            "--case-sensitive",
            "--icon",
            "logo.png",
            "--log-file=texedit.log",
            "--force-half-cell",
            "notes.txt",
        ]);
        let flags = parse_flag_tokens(&args);
        assert!(flags.case_sensitive);
        assert!(flags.force_half_cell);
        assert!(!flags.no_icon);
        assert_eq!(flags.icon, Some(PathBuf::from("logo.png")));
        assert_eq!(flags.log_file, Some(PathBuf::from("texedit.log")));
    }

    #[test]
    fn test_option_without_value_is_ignored() {
        let flags = parse_flag_tokens(&tokens(&["--icon"]));
        assert_eq!(flags.icon, None);
    }

    #[test]
    fn test_config_union_merges_cli_over_file_for_options() {
        let file = ConfigFlags {
            case_sensitive: true,
            icon: Some(PathBuf::from("file.png")),
            log_file: Some(PathBuf::from("file.log")),
            ..ConfigFlags::default()
        };
        let cli = ConfigFlags {
            no_icon: true,
            icon: Some(PathBuf::from("cli.png")),
            ..ConfigFlags::default()
        };
        let merged = file.union(&cli);
        assert!(merged.case_sensitive);
        assert!(merged.no_icon);
        assert_eq!(merged.icon, Some(PathBuf::from("cli.png")));
        assert_eq!(merged.log_file, Some(PathBuf::from("file.log")));
    }

    #[test]
    fn test_missing_config_file_is_default() {
        let dir = tempdir().unwrap();
        let flags = load_config_flags(&dir.path().join(".texeditrc")).unwrap();
        assert_eq!(flags, ConfigFlags::default());
    }

    #[test]
    fn test_local_override_is_dotfile() {
        assert_eq!(local_override_path(), PathBuf::from(".texeditrc"));
    }
}
