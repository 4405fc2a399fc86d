//! Runtime-internal call targets that carry no structural meaning.

use crate::namespace::Namespace;
use serde::{Deserialize, Serialize};

/// One ignore criterion. Every field that is set must match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoreRule {
    /// Exact owner type, dotted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_prefix: Option<String>,
    /// Only match owners that are not project entities
    #[serde(default, skip_serializing_if = "is_false")]
    pub unless_registered: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl IgnoreRule {
    pub fn owner(owner: &str) -> Self {
        Self {
            owner: Some(owner.to_string()),
            ..Self::default()
        }
    }

    pub fn method(method: &str) -> Self {
        Self {
            method: Some(method.to_string()),
            ..Self::default()
        }
    }

    /// A rule without any criterion would swallow every call.
    pub fn is_unconstrained(&self) -> bool {
        self.owner.is_none()
            && self.owner_prefix.is_none()
            && self.method.is_none()
            && self.method_prefix.is_none()
    }

    pub fn matches(&self, owner: &str, method: &str, namespace: &Namespace) -> bool {
        if self.is_unconstrained() {
            return false;
        }
        self.owner.as_deref().is_none_or(|expected| expected == owner)
            && self
                .owner_prefix
                .as_deref()
                .is_none_or(|prefix| owner.starts_with(prefix))
            && self.method.as_deref().is_none_or(|expected| expected == method)
            && self
                .method_prefix
                .as_deref()
                .is_none_or(|prefix| method.starts_with(prefix))
            && !(self.unless_registered && namespace.is_registered(owner))
    }
}

/// Rules for compiler-generated and runtime-internal helpers.
pub fn default_rules() -> Vec<IgnoreRule> {
    vec![
        IgnoreRule::owner("java.lang.StringBuilder"),
        IgnoreRule::owner("java.util.Iterator"),
        IgnoreRule {
            owner_prefix: Some("java.lang".into()),
            method: Some("valueOf".into()),
            ..IgnoreRule::default()
        },
        IgnoreRule {
            method: Some("ordinal".into()),
            unless_registered: true,
            ..IgnoreRule::default()
        },
        IgnoreRule {
            owner: Some("java.lang.Throwable".into()),
            method: Some("addSuppressed".into()),
            ..IgnoreRule::default()
        },
        IgnoreRule {
            method_prefix: Some("$SWITCH_TABLE".into()),
            ..IgnoreRule::default()
        },
    ]
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreList {
    rules: Vec<IgnoreRule>,
}

impl IgnoreList {
    pub fn new(rules: Vec<IgnoreRule>) -> Self {
        Self { rules }
    }

    pub fn is_ignored(&self, owner: &str, method: &str, namespace: &Namespace) -> bool {
        let owner = owner.replace('/', ".");
        self.rules
            .iter()
            .any(|rule| rule.matches(&owner, method, namespace))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
