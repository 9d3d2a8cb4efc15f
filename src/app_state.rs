use std::path::{Path, PathBuf};
use std::sync::Arc;

use waymark_core::config::{ReloadReport, load_settings};
use waymark_core::{IconsPlugin, IconsSettings};

use crate::sim_host::SimHost;

pub const SETTINGS_FILE: &str = "settings.toml";

pub struct AppState {
    pub plugin: IconsPlugin<SimHost>,
    pub config_dir: PathBuf,
    pub area: Option<String>,
}

impl AppState {
    /// Read settings from `config_dir` and load both icon config files
    pub fn new(config_dir: PathBuf) -> Result<Self, String> {
        let settings = read_settings(&config_dir)?;
        let plugin = IconsPlugin::new(Arc::new(SimHost::new()), settings, &config_dir);
        report_reload(&plugin.initialise());

        Ok(Self {
            plugin,
            config_dir,
            area: None,
        })
    }

    pub fn host(&self) -> &Arc<SimHost> {
        self.plugin.host()
    }

    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE)
    }
}

pub fn read_settings(config_dir: &Path) -> Result<IconsSettings, String> {
    load_settings(&config_dir.join(SETTINGS_FILE)).map_err(|e| e.to_string())
}

/// Print a one-line summary plus any diagnostics
pub fn report_reload(report: &ReloadReport) {
    println!(
        "config generation {}: {} alert rules, {} ignore patterns",
        report.generation, report.alert_rules, report.ignore_patterns
    );
    for diagnostic in &report.diagnostics {
        println!("  warning: {diagnostic}");
    }
}
