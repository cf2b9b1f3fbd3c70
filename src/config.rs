use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::ThemeName;

// ── Paths ─────────────────────────────────────────────────────────────────────

pub fn default_log_file() -> PathBuf {
    std::env::temp_dir().join("snack_menu.log")
}

// ── JSON helpers ──────────────────────────────────────────────────────────────

pub fn load_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

// ── Settings ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(default)]
    pub theme: ThemeName,
    #[serde(default = "default_confirm_clear")]
    pub confirm_clear: bool,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

const fn default_confirm_clear() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: ThemeName::default(),
            confirm_clear: default_confirm_clear(),
            log_file: None,
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Reads settings from `path`, falling back to defaults when the file
    /// is missing or malformed. The error is returned alongside so the
    /// caller can log it once logging is up.
    pub fn load_or_default(path: Option<&Path>) -> (Self, Option<anyhow::Error>) {
        match path {
            None => (Self::default(), None),
            Some(p) => match load_json(p) {
                Ok(s) => (s, None),
                Err(err) => (Self::default(), Some(err)),
            },
        }
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(default_log_file)
    }
}

/// Command-line values that take precedence over the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub theme: Option<ThemeName>,
    pub no_confirm_clear: bool,
    pub log_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl Overrides {
    pub fn apply(self, settings: &mut Settings) {
        if let Some(theme) = self.theme {
            settings.theme = theme;
        }
        if self.no_confirm_clear {
            settings.confirm_clear = false;
        }
        if self.log_file.is_some() {
            settings.log_file = self.log_file;
        }
        if let Some(level) = self.log_level {
            settings.log_level = level;
        }
    }
}

// ── Header ────────────────────────────────────────────────────────────────────

pub const HEADER_LINES: &[&str] = &["SNACK BAR", "FRESH SNACKS - COLD DRINKS"];

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_field_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "theme": "Light" }}"#).unwrap();
        let (settings, err) = Settings::load_or_default(Some(file.path()));
        assert!(err.is_none());
        assert_eq!(settings.theme, ThemeName::Light);
        assert!(settings.confirm_clear);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn malformed_file_falls_back_with_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ theme: ").unwrap();
        let (settings, err) = Settings::load_or_default(Some(file.path()));
        assert_eq!(settings, Settings::default());
        assert!(err.is_some());
    }

    #[test]
    fn unknown_theme_in_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "theme": "Neon" }}"#).unwrap();
        let (settings, err) = Settings::load_or_default(Some(file.path()));
        assert_eq!(settings.theme, ThemeName::Dark);
        assert!(err.is_some());
    }

    #[test]
    fn overrides_win_over_file_values() {
        let mut settings = Settings::default();
        Overrides {
            theme: Some(ThemeName::Light),
            no_confirm_clear: true,
            log_file: Some(PathBuf::from("/tmp/x.log")),
            log_level: Some("debug".into()),
        }
        .apply(&mut settings);
        assert_eq!(settings.theme, ThemeName::Light);
        assert!(!settings.confirm_clear);
        assert_eq!(settings.log_path(), PathBuf::from("/tmp/x.log"));
        assert_eq!(settings.log_level, "debug");
    }
}
