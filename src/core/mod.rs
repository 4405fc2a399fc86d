pub mod errors;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use errors::{Error, Result, ResultExt};

/// The kinds of structural dependency the analyzer measures.
///
/// Ordinary kinds are extracted directly from declared facts. `Package` is
/// derived from call facts and `StructuralDebt` is derived from the package
/// graph, so both run after every ordinary kind has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CouplingKind {
    #[serde(alias = "method_to_method")]
    Call,
    Field,
    Import,
    Inheritance,
    Package,
    StructuralDebt,
}

impl CouplingKind {
    pub const ALL: [CouplingKind; 6] = [
        CouplingKind::Call,
        CouplingKind::Field,
        CouplingKind::Import,
        CouplingKind::Inheritance,
        CouplingKind::Package,
        CouplingKind::StructuralDebt,
    ];

    /// Lower priorities run first.
    pub fn priority(self) -> u8 {
        match self {
            CouplingKind::Call
            | CouplingKind::Field
            | CouplingKind::Import
            | CouplingKind::Inheritance => 0,
            CouplingKind::Package => 1,
            CouplingKind::StructuralDebt => 2,
        }
    }

    pub fn is_derived(self) -> bool {
        self.priority() > 0
    }

    pub fn label(self) -> &'static str {
        match self {
            CouplingKind::Call => "call",
            CouplingKind::Field => "field",
            CouplingKind::Import => "import",
            CouplingKind::Inheritance => "inheritance",
            CouplingKind::Package => "package",
            CouplingKind::StructuralDebt => "structural_debt",
        }
    }
}

impl fmt::Display for CouplingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The two parallel views of the analyzed program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Representation {
    Compiled,
    Source,
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Representation::Compiled => f.write_str("compiled"),
            Representation::Source => f.write_str("source"),
        }
    }
}

/// Outcome a metric driver attaches to every emitted dependency fact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Target resolved symbolically; scope is decided by the classifier
    Resolved,
    /// Target lies outside the analyzed project
    NotProjectPart,
    /// Structurally uninteresting, e.g. runtime-internal helpers
    Ignored,
    SelfConnection,
    /// Target could not be resolved; carries the reason
    Error(String),
}

impl Resolution {
    pub fn error(reason: impl Into<String>) -> Self {
        Resolution::Error(reason.into())
    }

    /// Tag used in edge-level log lines.
    pub fn tag(&self) -> &'static str {
        match self {
            Resolution::Resolved => "RESOLVED",
            Resolution::NotProjectPart => "NOT_PROJECT_PART",
            Resolution::Ignored => "IGNORED",
            Resolution::SelfConnection => "SELF_CONNECTION",
            Resolution::Error(_) => "ERROR",
        }
    }
}

/// Kind of a declared type, as reported by the fact producers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    #[default]
    Class,
    Interface,
    Enum,
    Annotation,
}

impl DeclarationKind {
    /// Interfaces take part in scope but are never visited by drivers.
    pub fn is_registered(self) -> bool {
        matches!(self, DeclarationKind::Class | DeclarationKind::Interface)
    }

    pub fn is_visited(self) -> bool {
        matches!(self, DeclarationKind::Class)
    }
}
