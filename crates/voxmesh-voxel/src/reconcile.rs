//! Identity-keyed diff between two chunk id lists.
//!
//! A rendering host that mirrors one visual node per chunk calls [`reconcile`]
//! with the ids it currently displays and the container's current ids, then
//! creates, updates and deletes nodes accordingly. Matching is by id, never by
//! list position, so reordering chunks does not recreate their nodes.

use std::hash::Hash;

use rustc_hash::FxHashSet;

/// Result of [`reconcile`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reconciliation<K> {
    /// Ids present only in the current list, in current order.
    pub create: Vec<K>,
    /// Ids present in both lists, in current order.
    pub update: Vec<K>,
    /// Ids present only in the previous list, in previous order.
    pub delete: Vec<K>,
}

impl<K> Reconciliation<K> {
    /// Returns `true` if nothing needs to be created or deleted.
    pub fn is_stable(&self) -> bool {
        self.create.is_empty() && self.delete.is_empty()
    }
}

/// Computes which ids to create, update and delete.
///
/// Duplicate ids within one list are reported once.
pub fn reconcile<K: Copy + Eq + Hash>(previous: &[K], current: &[K]) -> Reconciliation<K> {
    let previous_set: FxHashSet<K> = previous.iter().copied().collect();
    let current_set: FxHashSet<K> = current.iter().copied().collect();

    let mut result = Reconciliation {
        create: Vec::new(),
        update: Vec::new(),
        delete: Vec::new(),
    };

    let mut seen = FxHashSet::default();
    for &id in current {
        if !seen.insert(id) {
            continue;
        }
        if previous_set.contains(&id) {
            result.update.push(id);
        } else {
            result.create.push(id);
        }
    }

    seen.clear();
    for &id in previous {
        if seen.insert(id) && !current_set.contains(&id) {
            result.delete.push(id);
        }
    }

    result
}
