//! Alert-rule table: path fragment -> icon size override

use std::path::Path;

use hashbrown::HashMap;

use super::{ConfigError, LineError, Loaded, content_lines, log_diagnostics, read_config_file};

/// Icon dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconSize {
    pub width: u32,
    pub height: u32,
}

impl IconSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Size overrides keyed by metadata path fragment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertRules {
    rules: HashMap<String, IconSize>,
}

impl AlertRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a rule, returning the size it replaced
    pub fn insert(&mut self, fragment: impl Into<String>, size: IconSize) -> Option<IconSize> {
        self.rules.insert(fragment.into(), size)
    }

    /// Rule stored under exactly this fragment
    #[inline]
    pub fn get(&self, fragment: &str) -> Option<IconSize> {
        self.rules.get(fragment).copied()
    }

    /// Resolve the size override for an entity path.
    ///
    /// An exact key wins; otherwise the longest fragment contained in `path`,
    /// with ties going to the lexicographically smallest fragment.
    pub fn size_for(&self, path: &str) -> Option<IconSize> {
        if let Some(size) = self.get(path) {
            return Some(size);
        }

        self.rules
            .iter()
            .filter(|(fragment, _)| path.contains(fragment.as_str()))
            .max_by(|(a, _), (b, _)| a.len().cmp(&b.len()).then_with(|| b.cmp(a)))
            .map(|(_, size)| *size)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, IconSize)> {
        self.rules.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl FromIterator<(String, IconSize)> for AlertRules {
    fn from_iter<I: IntoIterator<Item = (String, IconSize)>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

/// Load the alert-rule file.
///
/// A missing or unreadable file yields an empty table, so no entity gets a
/// size override.
pub fn load_alert_rules(path: &Path) -> Loaded<AlertRules> {
    let loaded = match read_config_file(path) {
        Ok(text) => parse_alert_rules(&text, path),
        Err(e) => Loaded::failed(e),
    };
    log_diagnostics(&loaded.diagnostics);
    loaded
}

/// Parse alert-rule text. `source` is only used in diagnostics.
///
/// Format: `<path-fragment>;<unused>;<width>,<height>`
pub fn parse_alert_rules(text: &str, source: &Path) -> Loaded<AlertRules> {
    let mut rules = AlertRules::new();
    let mut diagnostics = Vec::new();

    for (line_number, line) in content_lines(text) {
        match parse_rule_line(line) {
            Ok((fragment, size)) => {
                if let Some(previous) = rules.insert(fragment, size) {
                    tracing::debug!(
                        path = %source.display(),
                        line = line_number,
                        ?previous,
                        "Duplicate alert rule, keeping the later one"
                    );
                }
            }
            Err(kind) => diagnostics.push(ConfigError::LineParse {
                path: source.to_path_buf(),
                line: line_number,
                kind,
            }),
        }
    }

    Loaded {
        value: rules,
        diagnostics,
    }
}

fn parse_rule_line(line: &str) -> Result<(&str, IconSize), LineError> {
    let fields: Vec<&str> = line.split(';').collect();
    let &[fragment, _, dimensions] = fields.as_slice() else {
        return Err(LineError::FieldCount {
            found: fields.len(),
        });
    };

    let fragment = fragment.trim();
    if fragment.is_empty() {
        return Err(LineError::EmptyKey);
    }

    let dimensions = dimensions.trim();
    let Some((width, height)) = dimensions.split_once(',') else {
        return Err(LineError::DimensionFormat {
            value: dimensions.to_string(),
        });
    };

    Ok((
        fragment,
        IconSize::new(parse_dimension(width)?, parse_dimension(height)?),
    ))
}

fn parse_dimension(value: &str) -> Result<u32, LineError> {
    let value = value.trim();
    value.parse::<u32>().map_err(|_| LineError::InvalidDimension {
        value: value.to_string(),
    })
}
