//! Alert-rule and ignore-list configuration
//!
//! Both files are line oriented. Blank lines and lines starting with `#`
//! are skipped; there is no quoting or escaping.
//!
//! ```text
//! # mod_alerts.txt
//! Metadata/Monsters/Goatman;unused;32,32
//!
//! # ignored_entities.txt
//! Metadata/Monsters/Totems
//! ```
//!
//! Loads never fail outright. Problems are returned as diagnostics next to
//! whatever could be loaded, and the [`ConfigStore`] publishes each reload
//! as one immutable snapshot.

mod alert_rules;
mod error;
mod ignore_list;
mod settings;
mod store;

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub use alert_rules::{AlertRules, IconSize, load_alert_rules, parse_alert_rules};
pub use error::{ConfigError, LineError, SettingsError};
pub use ignore_list::{IgnoreList, load_ignore_patterns, parse_ignore_patterns};
pub use settings::{default_config_dir, load_settings};
pub use store::{ConfigPaths, ConfigSnapshot, ConfigStore, ReloadReport};

/// A loaded value plus the diagnostics raised while loading it
#[derive(Debug)]
pub struct Loaded<T> {
    pub value: T,
    pub diagnostics: Vec<ConfigError>,
}

impl<T: Default> Loaded<T> {
    fn failed(error: ConfigError) -> Self {
        Self {
            value: T::default(),
            diagnostics: vec![error],
        }
    }
}

impl<T> Loaded<T> {
    /// True when nothing was skipped or missing
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Iterate the meaningful lines of a config file as `(line_number, text)`.
fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines().enumerate().filter_map(|(idx, raw)| {
        let line = raw.trim_start_matches('\u{feff}').trim();
        if line.is_empty() || line.starts_with('#') {
            None
        } else {
            Some((idx + 1, line))
        }
    })
}

fn read_config_file(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ConfigError::FileMissing {
            path: path.to_path_buf(),
        },
        _ => ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        },
    })
}

fn log_diagnostics(diagnostics: &[ConfigError]) {
    for diagnostic in diagnostics {
        tracing::warn!(error = %diagnostic, "Config diagnostic");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_lines_skip_comments_and_blanks() {
        let text = "# header\n\nfirst\n   \n  # indented comment\nsecond\r\n";
        let lines: Vec<_> = content_lines(text).collect();
        assert_eq!(lines, vec![(3, "first"), (6, "second")]);
    }

    #[test]
    fn content_lines_strip_bom() {
        let text = "\u{feff}Metadata/Monsters\n";
        let lines: Vec<_> = content_lines(text).collect();
        assert_eq!(lines, vec![(1, "Metadata/Monsters")]);
    }
}
