//! Shared settings types for waymark
//!
//! This crate contains the serializable settings shared between the
//! icon pipeline (waymark-core) and the host simulator binary.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Defaults
// ─────────────────────────────────────────────────────────────────────────────

/// Name of the alert-rule file inside the config directory
pub const DEFAULT_ALERT_FILE: &str = "mod_alerts.txt";
/// Name of the ignore-list file inside the config directory
pub const DEFAULT_IGNORE_FILE: &str = "ignored_entities.txt";

fn default_true() -> bool {
    true
}
fn default_run_every_x_ticks() -> u32 {
    1
}
fn default_entity_threshold() -> usize {
    100
}
fn default_queue_warn_threshold() -> usize {
    10_000
}
fn default_alert_file() -> String {
    DEFAULT_ALERT_FILE.to_string()
}
fn default_ignore_file() -> String {
    DEFAULT_IGNORE_FILE.to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Icon Pipeline Settings
// ─────────────────────────────────────────────────────────────────────────────

/// User-facing switches for the icon pipeline.
///
/// Every field has a serde default so partial TOML files load cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconsSettings {
    /// Master switch. When off, discovered entities are not buffered and
    /// ticks do nothing.
    #[serde(default = "default_true")]
    pub enable: bool,

    /// Drain once every N host frames (1 = every frame)
    #[serde(default = "default_run_every_x_ticks")]
    pub run_every_x_ticks: u32,

    /// Allow large drains to run on the background worker
    #[serde(default)]
    pub multithreading: bool,

    /// Queue length above which a drain is offloaded (when multithreading is on)
    #[serde(default = "default_entity_threshold")]
    pub multithreading_entity_threshold: usize,

    /// Queue length that triggers a growth warning
    #[serde(default = "default_queue_warn_threshold")]
    pub queue_warn_threshold: usize,

    /// Alert-rule file name, relative to the config directory
    #[serde(default = "default_alert_file")]
    pub alert_file: String,

    /// Ignore-list file name, relative to the config directory
    #[serde(default = "default_ignore_file")]
    pub ignore_file: String,
}

impl Default for IconsSettings {
    fn default() -> Self {
        Self {
            enable: true,
            run_every_x_ticks: 1,
            multithreading: false,
            multithreading_entity_threshold: 100,
            queue_warn_threshold: 10_000,
            alert_file: default_alert_file(),
            ignore_file: default_ignore_file(),
        }
    }
}

impl IconsSettings {
    /// Tick divisor, never zero
    #[inline]
    pub fn tick_divisor(&self) -> u32 {
        self.run_every_x_ticks.max(1)
    }

    /// Clamp out-of-range values coming from hand-edited files.
    pub fn sanitized(mut self) -> Self {
        self.run_every_x_ticks = self.tick_divisor();
        self
    }

    /// Whether a queue of `pending` entities should be drained off-thread
    pub fn should_offload(&self, pending: usize) -> bool {
        self.multithreading && pending > self.multithreading_entity_threshold
    }
}
