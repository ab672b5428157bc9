use crate::document::BlockKey;
use crate::store::PluginStore;
use log::debug;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Store key under which the latest [`SelectionSnapshot`] is published.
pub const SELECTION_KEY: &str = "selection";

/// Read-only view of the document selection, owned by the external document
/// model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSnapshot {
    /// True when anchor and focus coincide (a caret, not a range).
    pub collapsed: bool,
    /// True when the selection lives in the focused editor.
    pub has_focus: bool,
    pub anchor_key: Option<BlockKey>,
    pub anchor_offset: usize,
    pub focus_key: Option<BlockKey>,
    pub focus_offset: usize,
}

impl Default for SelectionSnapshot {
    fn default() -> Self {
        Self {
            collapsed: true,
            has_focus: false,
            anchor_key: None,
            anchor_offset: 0,
            focus_key: None,
            focus_offset: 0,
        }
    }
}

impl SelectionSnapshot {
    /// A caret selection at `offset` inside `key`, in a focused editor.
    pub fn caret(key: BlockKey, offset: usize) -> Self {
        Self {
            collapsed: true,
            has_focus: true,
            anchor_key: Some(key.clone()),
            anchor_offset: offset,
            focus_key: Some(key),
            focus_offset: offset,
        }
    }

    /// A range selection inside a single block, in a focused editor.
    pub fn range(key: BlockKey, anchor_offset: usize, focus_offset: usize) -> Self {
        Self {
            collapsed: anchor_offset == focus_offset,
            has_focus: true,
            anchor_key: Some(key.clone()),
            anchor_offset,
            focus_key: Some(key),
            focus_offset,
        }
    }
}

/// Whether the floating toolbar should be visible for `selection`.
///
/// Visible exactly when the selection is a real range inside a focused
/// editor; every other combination hides the toolbar.
pub fn toolbar_visible(selection: &SelectionSnapshot) -> bool {
    !selection.collapsed && selection.has_focus
}

/// Publishes selection changes into the store, once per document-state
/// change.
///
/// A fresh snapshot is published under [`SELECTION_KEY`] only when it differs
/// from the last published one, so downstream subscribers see one
/// notification per real change. [`suppress_next`](Self::suppress_next) arms
/// a one-shot flag consumed by the following update: the update triggered by
/// a programmatic focus event must not flash the toolbar, because focus
/// restoration is not a user selection change.
pub struct SelectionMonitor {
    last: Mutex<Option<Arc<SelectionSnapshot>>>,
    suppress_next: AtomicBool,
}

impl SelectionMonitor {
    pub fn new() -> Self {
        Self {
            last: Mutex::new(None),
            suppress_next: AtomicBool::new(false),
        }
    }

    /// Swallow the next [`on_change`](Self::on_change) call. The flag resets
    /// after being consumed exactly once.
    pub fn suppress_next(&self) {
        self.suppress_next.store(true, Ordering::SeqCst);
    }

    /// Feed the monitor the latest snapshot; publishes to `store` when the
    /// snapshot actually changed and no suppression is pending.
    pub fn on_change(&self, store: &PluginStore, snapshot: SelectionSnapshot) {
        if self.suppress_next.swap(false, Ordering::SeqCst) {
            debug!("selection update suppressed (programmatic focus)");
            return;
        }

        let mut last = self.last.lock();
        if last.as_deref() == Some(&snapshot) {
            return;
        }
        let snapshot = Arc::new(snapshot);
        *last = Some(snapshot.clone());
        drop(last);

        store.set(SELECTION_KEY, snapshot);
    }
}

impl Default for SelectionMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caret_is_collapsed_and_range_is_not() {
        let key = BlockKey::new("b");
        assert!(SelectionSnapshot::caret(key.clone(), 3).collapsed);
        assert!(!SelectionSnapshot::range(key.clone(), 1, 5).collapsed);
        assert!(SelectionSnapshot::range(key, 4, 4).collapsed);
    }
}
