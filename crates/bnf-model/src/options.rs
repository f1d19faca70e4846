//! Configuration options for an aggregation run.

use std::collections::BTreeMap;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Provider codes whose prescribing data is in scope by default.
pub const DEFAULT_PROVIDER_ALLOW_LIST: [&str; 8] = [
    "84H00", "00P00", "00L00", "01H00", "13T00", "16C00", "99C00", "00N00",
];

/// Per-category replacement of summed cost by `items × multiplier`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostOverride {
    /// Whether the multipliers are applied at all.
    #[serde(default)]
    pub enabled: bool,
    /// Category name -> multiplier. Categories not listed keep their summed cost.
    #[serde(default)]
    pub multipliers: BTreeMap<String, NonZeroU32>,
}

impl CostOverride {
    pub fn new(multipliers: BTreeMap<String, NonZeroU32>) -> Self {
        Self {
            enabled: false,
            multipliers,
        }
    }

    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Returns the multiplier in effect for `category`, if the override is active.
    pub fn multiplier_for(&self, category: &str) -> Option<NonZeroU32> {
        if !self.enabled {
            return None;
        }
        self.multipliers.get(category).copied()
    }
}

/// Options controlling one engine invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationOptions {
    /// Provider codes kept by the record filter.
    pub provider_allow_list: Vec<String>,
    /// Cost override rules.
    pub cost_override: CostOverride,
}

impl Default for AggregationOptions {
    fn default() -> Self {
        Self {
            provider_allow_list: DEFAULT_PROVIDER_ALLOW_LIST
                .iter()
                .map(ToString::to_string)
                .collect(),
            cost_override: CostOverride::default(),
        }
    }
}

impl AggregationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_provider_allow_list<I, S>(mut self, providers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.provider_allow_list = providers.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_cost_override(mut self, cost_override: CostOverride) -> Self {
        self.cost_override = cost_override;
        self
    }
}
