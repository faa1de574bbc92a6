use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use super::types::{ChangeKind, WatchPlan};
use crate::config::Config;
use crate::core::FileCategory;
use crate::project::assets::is_ignored;

/// Turns raw debounced changes into a [`WatchPlan`].
pub(super) struct EventClassifier;

impl EventClassifier {
    pub(super) fn classify(
        raw: FxHashMap<PathBuf, ChangeKind>,
        config: &Config,
    ) -> Option<WatchPlan> {
        let mut changes = raw;
        Self::correct_by_existence(&mut changes);

        // Sorted for a stable processing order
        let mut changes: Vec<_> = changes.into_iter().collect();
        changes.sort_by(|a, b| a.0.cmp(&b.0));

        let mut plan = WatchPlan::default();
        for (path, kind) in changes {
            let Some(relative) = config.source_relative(&path) else {
                continue;
            };
            if is_ignored(&relative) || (kind != ChangeKind::Removed && !path.is_file()) {
                continue;
            }
            Self::plan_change(&mut plan, relative, kind, config.entry());
        }

        if plan.rebuild {
            // A full pass converts and copies everything anyway
            plan.convert.clear();
            plan.copy.clear();
        }

        (!plan.is_empty()).then_some(plan)
    }

    fn plan_change(plan: &mut WatchPlan, relative: PathBuf, kind: ChangeKind, entry: &Path) {
        match (FileCategory::from_path(&relative), kind) {
            (FileCategory::Document, ChangeKind::Modified) if relative != entry => {
                plan.convert.push(relative);
            }
            (FileCategory::Document, ChangeKind::Removed) => {
                plan.rebuild = true;
                plan.stale.push(relative);
            }
            (FileCategory::Document, _) => plan.rebuild = true,
            (FileCategory::Asset, ChangeKind::Removed) => plan.remove.push(relative),
            (FileCategory::Asset, _) => plan.copy.push(relative),
        }
    }

    /// Reconcile event kinds with actual filesystem state.
    ///
    /// The watcher may report stale events (Created for a file already gone,
    /// Removed for a file that still exists after an atomic save).
    fn correct_by_existence(changes: &mut FxHashMap<PathBuf, ChangeKind>) {
        let paths: Vec<_> = changes.keys().cloned().collect();
        for path in paths {
            let kind = changes[&path];
            let exists = path.exists();
            match kind {
                ChangeKind::Created if !exists => {
                    crate::debug!("watch"; "discard created (gone): {}", path.display());
                    changes.remove(&path);
                }
                ChangeKind::Modified if !exists => {
                    changes.insert(path, ChangeKind::Removed);
                }
                ChangeKind::Removed if exists => {
                    changes.insert(path, ChangeKind::Modified);
                }
                _ => {}
            }
        }
    }
}
