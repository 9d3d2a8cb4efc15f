//! Settings file loading

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use waymark_types::IconsSettings;

use super::SettingsError;

/// Default config directory (`<platform config dir>/waymark`)
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("waymark"))
}

/// Load settings from a TOML file. A missing file yields the defaults.
pub fn load_settings(path: &Path) -> Result<IconsSettings, SettingsError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "No settings file, using defaults");
            return Ok(IconsSettings::default());
        }
        Err(source) => {
            return Err(SettingsError::ReadFile {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let settings: IconsSettings =
        toml::from_str(&contents).map_err(|source| SettingsError::ParseToml {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(settings.sanitized())
}
