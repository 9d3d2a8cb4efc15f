//! Atomically published configuration snapshots

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;
use waymark_types::IconsSettings;

use super::{AlertRules, ConfigError, IgnoreList, load_alert_rules, load_ignore_patterns};

/// Locations of the two config files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    pub alert_file: PathBuf,
    pub ignore_file: PathBuf,
}

impl ConfigPaths {
    /// Resolve the file names from `settings` inside `dir`
    pub fn in_dir(dir: &Path, settings: &IconsSettings) -> Self {
        Self {
            alert_file: dir.join(&settings.alert_file),
            ignore_file: dir.join(&settings.ignore_file),
        }
    }
}

/// One complete, immutable view of the configuration
#[derive(Debug, Clone, Default)]
pub struct ConfigSnapshot {
    pub alert_rules: AlertRules,
    pub ignore_list: IgnoreList,
    /// Incremented on every publish; 0 is the empty startup snapshot
    pub generation: u64,
}

/// Summary of a reload
#[derive(Debug)]
pub struct ReloadReport {
    pub generation: u64,
    pub alert_rules: usize,
    pub ignore_patterns: usize,
    pub diagnostics: Vec<ConfigError>,
}

impl ReloadReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Holds the current alert rules and ignore list.
///
/// Readers take an `Arc` snapshot and keep it for the whole drain, so a
/// reload published mid-drain is only seen by the next one.
pub struct ConfigStore {
    paths: ConfigPaths,
    current: ArcSwap<ConfigSnapshot>,
}

impl ConfigStore {
    /// Create a store with an empty snapshot; call [`reload`](Self::reload)
    /// to read the files.
    pub fn new(paths: ConfigPaths) -> Self {
        Self {
            paths,
            current: ArcSwap::from_pointee(ConfigSnapshot::default()),
        }
    }

    pub fn paths(&self) -> &ConfigPaths {
        &self.paths
    }

    /// Current snapshot
    #[inline]
    pub fn snapshot(&self) -> Arc<ConfigSnapshot> {
        self.current.load_full()
    }

    /// Re-read both files and publish the result as one snapshot.
    ///
    /// Previous contents are replaced, never merged.
    pub fn reload(&self) -> ReloadReport {
        let alerts = load_alert_rules(&self.paths.alert_file);
        let ignores = load_ignore_patterns(&self.paths.ignore_file);

        let mut diagnostics = alerts.diagnostics;
        diagnostics.extend(ignores.diagnostics);

        let alert_rules = alerts.value.len();
        let ignore_patterns = ignores.value.len();
        let generation = self.replace(alerts.value, ignores.value);

        tracing::info!(
            generation,
            alert_rules,
            ignore_patterns,
            diagnostics = diagnostics.len(),
            "Icon config reloaded"
        );

        ReloadReport {
            generation,
            alert_rules,
            ignore_patterns,
            diagnostics,
        }
    }

    /// Publish new tables, returning the new generation.
    ///
    /// Only the host thread publishes, so read-then-store cannot lose a
    /// generation.
    pub fn replace(&self, alert_rules: AlertRules, ignore_list: IgnoreList) -> u64 {
        let generation = self.current.load().generation + 1;
        self.current.store(Arc::new(ConfigSnapshot {
            alert_rules,
            ignore_list,
            generation,
        }));
        generation
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::config::IconSize;

    fn write_config(dir: &Path, alerts: &str, ignores: &str) -> ConfigPaths {
        let paths = ConfigPaths::in_dir(dir, &IconsSettings::default());
        fs::write(&paths.alert_file, alerts).unwrap();
        fs::write(&paths.ignore_file, ignores).unwrap();
        paths
    }

    #[test]
    fn starts_empty_until_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_config(dir.path(), "frag;x;1,1\n", "Totems\n");
        let store = ConfigStore::new(paths);

        assert_eq!(store.snapshot().generation, 0);
        assert!(store.snapshot().alert_rules.is_empty());

        let report = store.reload();
        assert!(report.is_clean());
        assert_eq!(report.generation, 1);
        assert_eq!(report.alert_rules, 1);
        assert_eq!(report.ignore_patterns, 1);
    }

    #[test]
    fn reload_replaces_instead_of_merging() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_config(dir.path(), "old;x;1,1\n", "OldIgnore\n");
        let store = ConfigStore::new(paths.clone());
        store.reload();

        fs::write(&paths.alert_file, "new;x;2,2\n").unwrap();
        fs::write(&paths.ignore_file, "NewIgnore\n").unwrap();
        store.reload();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.generation, 2);
        assert_eq!(snapshot.alert_rules.get("old"), None);
        assert_eq!(snapshot.alert_rules.get("new"), Some(IconSize::new(2, 2)));
        assert!(!snapshot.ignore_list.matches("OldIgnore"));
        assert!(snapshot.ignore_list.matches("NewIgnore"));
    }

    #[test]
    fn held_snapshot_is_unaffected_by_reload() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_config(dir.path(), "a;x;1,1\n", "");
        let store = ConfigStore::new(paths.clone());
        store.reload();

        let held = store.snapshot();
        fs::write(&paths.alert_file, "b;x;2,2\n").unwrap();
        store.reload();

        assert_eq!(held.alert_rules.get("a"), Some(IconSize::new(1, 1)));
        assert_eq!(held.alert_rules.get("b"), None);
        assert_eq!(store.snapshot().alert_rules.get("b"), Some(IconSize::new(2, 2)));
    }

    #[test]
    fn missing_files_publish_empty_tables_with_diagnostics() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ConfigPaths::in_dir(dir.path(), &IconsSettings::default());
        let store = ConfigStore::new(paths);

        let report = store.reload();
        assert_eq!(report.diagnostics.len(), 2);
        assert_eq!(report.generation, 1);
        assert!(store.snapshot().ignore_list.is_empty());
    }
}
