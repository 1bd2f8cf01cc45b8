//! The reconciliation core.
//!
//! `reconcile` computes the minimal delta turning a displayed section into
//! what a fresh snapshot says it should be, without touching either input.
//! Identity is preserved: an entry present on both sides is updated in place
//! (never removed and re-added), so focus and relative order survive the
//! pass. Applying the delta is [`crate::section::Section::apply`]'s job.

use std::collections::{HashMap, HashSet};

use tracing::{trace, warn};

use crate::entry::{Entry, EntryKey};
use crate::section::Section;
use crate::snapshot::Snapshot;

/// Delta between a displayed section and a snapshot.
#[derive(Debug, Clone, Default)]
pub struct ReconcileResult {
    /// New entries, in snapshot enumeration order. Pinned-last entries sort
    /// to the end when applied.
    pub additions: Vec<Entry>,
    /// Keys of displayed entries absent from the snapshot and not protected.
    pub removals: Vec<EntryKey>,
    /// Replacement values for displayed entries whose fields changed.
    pub updates: Vec<Entry>,
}

impl ReconcileResult {
    /// True when applying this result would change nothing.
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty() && self.updates.is_empty()
    }
}

/// Compute the delta between `section` and `snapshot`.
///
/// Pure over its inputs. Duplicate keys in the snapshot should not happen
/// under correct input; when they do, the later entry wins and a warning is
/// logged.
pub fn reconcile(section: &Section, snapshot: &Snapshot) -> ReconcileResult {
    // Last-write-wins lookup over the snapshot.
    let mut lookup: HashMap<&EntryKey, &Entry> = HashMap::with_capacity(snapshot.entries.len());
    for entry in &snapshot.entries {
        if lookup.insert(&entry.key, entry).is_some() {
            warn!("duplicate snapshot key {}, later entry wins", entry.key);
        }
    }

    let mut result = ReconcileResult::default();
    let mut touched: HashSet<&EntryKey> = HashSet::with_capacity(lookup.len());

    // Sweep the displayed list in order: update survivors, remove the rest
    // unless the snapshot's keep policy protects them.
    for existing in section.entries() {
        match lookup.get(&existing.key) {
            Some(wanted) => {
                touched.insert(&existing.key);
                if existing.differs_from(wanted) {
                    result.updates.push((*wanted).clone());
                }
            }
            None => {
                if snapshot.keep.retains(existing) {
                    trace!("retaining protected entry {}", existing.key);
                } else {
                    result.removals.push(existing.key.clone());
                }
            }
        }
    }

    // Untouched snapshot keys become additions, first occurrence fixing the
    // enumeration position, the winning duplicate fixing the fields.
    let mut added: HashSet<&EntryKey> = HashSet::new();
    for entry in &snapshot.entries {
        if touched.contains(&entry.key) || !added.insert(&entry.key) {
            continue;
        }
        result.additions.push(lookup[&entry.key].clone());
    }

    result
}
