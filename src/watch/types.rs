use std::path::PathBuf;

/// What happened to a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ChangeKind {
    Created,
    Modified,
    Removed,
}

impl ChangeKind {
    pub(super) fn label(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Modified => "modified",
            Self::Removed => "removed",
        }
    }
}

/// Work derived from one debounced batch of changes.
///
/// Paths are relative to the source root.
#[derive(Debug, Default, PartialEq, Eq)]
pub(super) struct WatchPlan {
    /// Run a full pass (documents added/removed, or the entry changed)
    pub(super) rebuild: bool,
    /// Documents to re-convert on their own
    pub(super) convert: Vec<PathBuf>,
    /// Assets to copy again
    pub(super) copy: Vec<PathBuf>,
    /// Assets whose copies should be deleted
    pub(super) remove: Vec<PathBuf>,
    /// Removed documents whose generated modules should be deleted
    pub(super) stale: Vec<PathBuf>,
}

impl WatchPlan {
    pub(super) fn is_empty(&self) -> bool {
        !self.rebuild && self.convert.is_empty() && self.copy.is_empty() && self.remove.is_empty()
    }
}
