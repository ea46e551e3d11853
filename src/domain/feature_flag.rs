//! Feature flag models

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Flag that unlocks the task queue admin page
pub const QSTASH_FLAG: &str = "upstash_qstash";

/// Feature flag as managed on the admin page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFlag {
    pub name: String,
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Flag name to enabled state. Unknown flags read as disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureFlagSet(BTreeMap<String, bool>);

impl FeatureFlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.0.get(name).copied().unwrap_or(false)
    }

    pub fn set(&mut self, name: impl Into<String>, enabled: bool) {
        self.0.insert(name.into(), enabled);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for FeatureFlagSet {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        FeatureFlagSet(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl From<Vec<FeatureFlag>> for FeatureFlagSet {
    fn from(flags: Vec<FeatureFlag>) -> Self {
        flags.into_iter().map(|f| (f.name, f.enabled)).collect()
    }
}
