use serde::{Deserialize, Serialize};

use crate::core::CouplingKind;
use crate::metrics::ignore::{default_rules, IgnoreRule};

/// Root configuration structure for couplingmap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CouplingConfig {
    /// Which names belong to the analyzed project
    #[serde(default)]
    pub scope: ScopeConfig,

    /// Coupling kinds to extract per representation
    #[serde(default)]
    pub metrics: MetricsConfig,

    /// Call targets and supertypes left out of the graphs
    #[serde(default)]
    pub ignore: IgnoreConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeConfig {
    /// Packages or type names that are always in scope
    #[serde(default)]
    pub whitelist: Vec<String>,

    #[serde(default = "default_true")]
    pub count_self_connections: bool,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            whitelist: Vec::new(),
            count_self_connections: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "all_kinds")]
    pub compiled: Vec<CouplingKind>,

    #[serde(default = "all_kinds")]
    pub source: Vec<CouplingKind>,

    /// Register package coupling automatically when structural debt is requested
    #[serde(default = "default_true")]
    pub derive_package_for_debt: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            compiled: all_kinds(),
            source: all_kinds(),
            derive_package_for_debt: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoreConfig {
    /// Supertypes every type inherits from implicitly
    #[serde(default = "default_root_types")]
    pub root_types: Vec<String>,

    #[serde(default = "default_rules")]
    pub rules: Vec<IgnoreRule>,
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        Self {
            root_types: default_root_types(),
            rules: default_rules(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn all_kinds() -> Vec<CouplingKind> {
    CouplingKind::ALL.to_vec()
}

fn default_root_types() -> Vec<String> {
    vec!["java.lang.Object".to_string()]
}
