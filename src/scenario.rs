//! Scenario files: entities to feed the pipeline, written in TOML
//!
//! ```toml
//! local_player = { id = 1, render_name = "Exile" }
//!
//! [[entity]]
//! id = 0x10
//! type = "Monster"
//! path = "Metadata/Monsters/Goatman/GoatmanShaman"
//! ```

use std::path::Path;

use serde::Deserialize;
use waymark_core::{EntitySnapshot, LocalPlayer};

#[derive(Debug, Default, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub local_player: Option<LocalPlayer>,
    #[serde(default, rename = "entity")]
    pub entities: Vec<EntitySnapshot>,
}

pub fn parse_scenario(text: &str) -> Result<Scenario, toml::de::Error> {
    toml::from_str(text)
}

pub fn load_scenario(path: &Path) -> Result<Scenario, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read scenario {}: {e}", path.display()))?;
    parse_scenario(&text).map_err(|e| format!("failed to parse scenario {}: {e}", path.display()))
}
