//! Component capabilities
//!
//! Names match the host's component names exactly (case-sensitive).

use std::fmt;

use phf::phf_map;
use serde::{Deserialize, Serialize};

/// A component kind an entity may carry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Capability {
    Shrine,
    Transitionable,
    MinimapIcon,
    Targetable,
    /// Any component name without a dedicated variant
    Other(String),
}

/// Lookup table from host component name to capability
static KNOWN_CAPABILITIES: phf::Map<&'static str, Capability> = phf_map! {
    "Shrine" => Capability::Shrine,
    "Transitionable" => Capability::Transitionable,
    "MinimapIcon" => Capability::MinimapIcon,
    "Targetable" => Capability::Targetable,
};

impl Capability {
    /// Parse a host component name
    pub fn parse(name: &str) -> Self {
        KNOWN_CAPABILITIES
            .get(name)
            .cloned()
            .unwrap_or_else(|| Capability::Other(name.to_string()))
    }

    /// Host component name
    pub fn name(&self) -> &str {
        match self {
            Self::Shrine => "Shrine",
            Self::Transitionable => "Transitionable",
            Self::MinimapIcon => "MinimapIcon",
            Self::Targetable => "Targetable",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for Capability {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl From<&str> for Capability {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl From<Capability> for String {
    fn from(capability: Capability) -> Self {
        capability.name().to_string()
    }
}

/// Read-only view of a component's fields
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CapabilityView {
    /// Display name exposed by the component (minimap icons carry one)
    pub display_name: Option<String>,
}

impl CapabilityView {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            display_name: Some(name.into()),
        }
    }

    #[inline]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_parse_to_variants() {
        assert_eq!(Capability::parse("Shrine"), Capability::Shrine);
        assert_eq!(Capability::parse("MinimapIcon"), Capability::MinimapIcon);
        assert_eq!(Capability::parse("Targetable").name(), "Targetable");
    }

    #[test]
    fn names_are_case_sensitive() {
        assert_eq!(
            Capability::parse("shrine"),
            Capability::Other("shrine".to_string())
        );
    }

    #[test]
    fn unknown_names_keep_their_text() {
        let cap = Capability::parse("HarvestSeed");
        assert_eq!(cap.name(), "HarvestSeed");
        assert_eq!(String::from(cap), "HarvestSeed");
    }
}
