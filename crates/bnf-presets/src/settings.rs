//! Aggregation settings file.

use std::path::Path;

use bnf_model::{AggregationOptions, CostOverride};
use serde::{Deserialize, Serialize};

use crate::embedded;
use crate::error::{PresetError, Result};

/// Settings loaded from TOML.
///
/// ```toml
/// providers = ["84H00", "00P00"]
///
/// [cost_override]
/// enabled = false
/// [cost_override.multipliers]
/// "Short-acting beta2 agonists" = 2
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Provider allow-list. `None` keeps the built-in reference list.
    #[serde(default)]
    pub providers: Option<Vec<String>>,
    #[serde(default)]
    pub cost_override: CostOverride,
}

impl Settings {
    /// The bundled reference settings.
    pub fn reference() -> Result<Self> {
        Self::from_toml_str(embedded::REFERENCE_SETTINGS, "reference settings")
    }

    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self> {
        toml::from_str(content).map_err(|source| PresetError::Toml {
            origin: origin.to_string(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| PresetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// Builds engine options. `force_cost_override` enables the multipliers
    /// regardless of the file's `enabled` flag.
    pub fn to_options(&self, force_cost_override: bool) -> AggregationOptions {
        let mut options = AggregationOptions::new();
        if let Some(providers) = &self.providers {
            options = options.with_provider_allow_list(providers.iter().map(|p| p.trim().to_string()));
        }
        let enabled = self.cost_override.enabled || force_cost_override;
        options.with_cost_override(self.cost_override.clone().with_enabled(enabled))
    }
}
