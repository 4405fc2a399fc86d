//! State shared by the drivers of one analysis pass, and the flags an
//! observer thread uses to follow a run.

use crate::classifier::EdgeClassifier;
use crate::config::{IgnoreConfig, ScopeConfig};
use crate::metrics::ignore::IgnoreList;
use crate::namespace::Namespace;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Scope and filtering rules of one pass.
///
/// Built fresh for every representation so that entities discovered in one
/// representation never leak into the other.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub namespace: Namespace,
    pub ignore: IgnoreList,
    root_types: Vec<String>,
    count_self_connections: bool,
}

impl RunContext {
    pub fn new(scope: &ScopeConfig, ignore: &IgnoreConfig) -> Self {
        Self {
            namespace: Namespace::with_whitelist(scope.whitelist.iter().cloned()),
            ignore: IgnoreList::new(ignore.rules.clone()),
            root_types: ignore.root_types.clone(),
            count_self_connections: scope.count_self_connections,
        }
    }

    pub fn classifier(&self) -> EdgeClassifier<'_> {
        EdgeClassifier::new(&self.namespace, self.count_self_connections)
    }

    /// Implicit supertypes such as `java.lang.Object`.
    pub fn is_root_type(&self, name: &str) -> bool {
        self.root_types.iter().any(|root| root == name)
    }
}

/// Set once a run has finished. Cloning shares the flag.
#[derive(Debug, Clone, Default)]
pub struct CompletionFlag(Arc<AtomicBool>);

impl CompletionFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_finished(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub(crate) fn mark_finished(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub(crate) fn reset(&self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Cooperative cancellation, honored between drivers only.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn clear(&self) {
        self.0.store(false, Ordering::Release);
    }
}
