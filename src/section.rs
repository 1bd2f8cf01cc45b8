//! Displayed sections and the registry owning them.
//!
//! A [`Section`] is one ordered grouping of entries (accounts, accessories,
//! ...). The [`SectionSet`] registry is created once per screen
//! initialization and lives for the screen's lifetime; entries inside it are
//! created, mutated and destroyed purely by repeated reconciliation passes.

use std::fmt;

use tracing::{debug, trace};

use crate::entry::{Entry, EntryKey, Placement};
use crate::reconcile::ReconcileResult;

/// Identifier of one section ("accounts", "accessories", ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SectionId(String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        SectionId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One ordered grouping of displayed entries.
#[derive(Debug, Clone)]
pub struct Section {
    id: SectionId,
    title: String,
    entries: Vec<Entry>,
}

impl Section {
    pub fn new(id: SectionId, title: impl Into<String>) -> Self {
        Section {
            id,
            title: title.into(),
            entries: Vec::new(),
        }
    }

    pub fn id(&self) -> &SectionId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &EntryKey) -> Option<&Entry> {
        self.entries.iter().find(|e| &e.key == key)
    }

    pub fn position(&self, key: &EntryKey) -> Option<usize> {
        self.entries.iter().position(|e| &e.key == key)
    }

    /// Append an entry, replacing any resident with the same key so that key
    /// uniqueness holds at all times.
    pub fn push(&mut self, entry: Entry) {
        if let Some(i) = self.position(&entry.key) {
            debug!("section {}: replacing resident {}", self.id, entry.key);
            self.entries[i] = entry;
        } else {
            self.entries.push(entry);
        }
        self.enforce_placement();
    }

    /// In-place single-item refresh (icon/title/visibility flips that do not
    /// change list membership). Returns false when the key is absent.
    pub fn update_in_place(&mut self, key: &EntryKey, f: impl FnOnce(&mut Entry)) -> bool {
        match self.entries.iter_mut().find(|e| &e.key == key) {
            Some(entry) => {
                f(entry);
                true
            }
            None => false,
        }
    }

    /// Apply a reconciliation delta: removals by key, in-place field updates
    /// preserving position, additions appended with pinned-last entries kept
    /// at the extreme.
    pub fn apply(&mut self, result: &ReconcileResult) {
        for key in &result.removals {
            trace!("section {}: removing {}", self.id, key);
            self.entries.retain(|e| &e.key != key);
        }
        for update in &result.updates {
            if let Some(i) = self.position(&update.key) {
                self.entries[i] = update.clone();
            } else {
                debug!("section {}: update for absent key {}", self.id, update.key);
            }
        }
        for addition in &result.additions {
            self.push(addition.clone());
        }
        self.enforce_placement();
    }

    /// Stable partition: normal entries first, pinned-last entries at the
    /// end. Relative order within each group is untouched.
    fn enforce_placement(&mut self) {
        self.entries
            .sort_by_key(|e| matches!(e.placement, Placement::Last));
    }
}

/// The ordered set of sections one screen owns.
#[derive(Debug, Clone, Default)]
pub struct SectionSet {
    sections: Vec<Section>,
}

impl SectionSet {
    pub fn new() -> Self {
        SectionSet::default()
    }

    pub fn insert(&mut self, section: Section) {
        self.sections.push(section);
    }

    pub fn get(&self, id: &SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| s.id() == id)
    }

    pub fn get_mut(&mut self, id: &SectionId) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Find the section containing a key, with the entry's position.
    pub fn locate(&self, key: &EntryKey) -> Option<(&SectionId, usize)> {
        self.sections
            .iter()
            .find_map(|s| s.position(key).map(|i| (s.id(), i)))
    }
}
