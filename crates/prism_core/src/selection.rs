//! Backend selection outcomes

use crate::{BackendFeature, BackendId, FeatureStatus};

/// Parity verdict for one profile feature against the capability report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParityEntry {
    pub feature: BackendFeature,
    pub reported: FeatureStatus,
    /// True only when the report says [`FeatureStatus::Supported`];
    /// emulated features deliberately fail strict validation.
    pub satisfied: bool,
}

/// Per-profile diagnostic detail from parity validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParityMatrix {
    pub entries: Vec<ParityEntry>,
}

impl ParityMatrix {
    pub fn all_satisfied(&self) -> bool {
        self.entries.iter().all(|e| e.satisfied)
    }

    /// Features that failed validation.
    pub fn unsatisfied(&self) -> impl Iterator<Item = BackendFeature> + '_ {
        self.entries.iter().filter(|e| !e.satisfied).map(|e| e.feature)
    }
}

/// Outcome of one negotiation attempt. Created once, immutable.
///
/// The failed case structurally carries a message and no backend id, so the
/// "FAILED must have an error and no backend" invariant cannot be violated.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendSelection {
    /// The report's preferred backend validated against the report.
    Preferred { backend: BackendId, parity: ParityMatrix },
    /// A lower-priority profile validated after the preference failed
    /// or was absent.
    Fallback { backend: BackendId, parity: ParityMatrix },
    /// No profile validated. Expected, recoverable: callers branch on this
    /// rather than catching an error.
    Failed { message: String },
}

impl BackendSelection {
    /// The chosen backend, if any.
    pub fn backend(&self) -> Option<BackendId> {
        match self {
            Self::Preferred { backend, .. } | Self::Fallback { backend, .. } => Some(*backend),
            Self::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}
