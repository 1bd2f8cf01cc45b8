//! Point-in-time reads of platform state.
//!
//! A [`Snapshot`] is what a section *should* contain right now, plus the
//! policy describing which already-displayed entries survive even when the
//! snapshot no longer lists them. [`SnapshotSource`] builds snapshots from
//! the platform collaborators; it never touches displayed state.

use std::collections::HashSet;

use tracing::{debug, error};

use crate::entry::{Entry, EntryKey, IconRef, Intent};
use crate::platform::Platform;

/// Which section residents are retained across reconciliation even when the
/// snapshot no longer contains them.
///
/// The legacy browse screen protects a small allow-list of titles; the
/// modern fragment screen protects pinned action keys.
#[derive(Debug, Clone, Default)]
pub enum KeepPolicy {
    #[default]
    None,
    Keys(HashSet<EntryKey>),
    Titles(HashSet<String>),
}

impl KeepPolicy {
    pub fn keys<I: IntoIterator<Item = EntryKey>>(keys: I) -> Self {
        KeepPolicy::Keys(keys.into_iter().collect())
    }

    pub fn titles<I: IntoIterator<Item = String>>(titles: I) -> Self {
        KeepPolicy::Titles(titles.into_iter().collect())
    }

    /// Whether an already-displayed entry is protected from removal.
    pub fn retains(&self, entry: &Entry) -> bool {
        match self {
            KeepPolicy::None => false,
            KeepPolicy::Keys(keys) => keys.contains(&entry.key),
            KeepPolicy::Titles(titles) => titles.contains(&entry.title),
        }
    }
}

/// The entries a section should display, read at one point in time.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub entries: Vec<Entry>,
    pub keep: KeepPolicy,
}

impl Snapshot {
    pub fn new(entries: Vec<Entry>, keep: KeepPolicy) -> Self {
        Snapshot { entries, keep }
    }
}

/// Account snapshot plus the authenticator types still eligible for
/// "add new account".
#[derive(Debug, Clone)]
pub struct AccountsSnapshot {
    pub snapshot: Snapshot,
    pub allowable_types: Vec<String>,
}

/// Intent actions for the entries this source synthesizes.
pub const ACTION_ACCOUNT_SYNC: &str = "tvhome.ACCOUNT_SYNC";
pub const ACTION_ACCESSORY: &str = "tvhome.ACCESSORY";

/// Builds snapshots from platform state.
///
/// Policy knobs (primary account type, connected-marker text) come from the
/// configuration; everything else is read through the [`Platform`] trait.
pub struct SnapshotSource<'a, P: Platform> {
    platform: &'a P,
    primary_account_type: &'a str,
    connected_marker: &'a str,
}

impl<'a, P: Platform> SnapshotSource<'a, P> {
    pub fn new(platform: &'a P, primary_account_type: &'a str, connected_marker: &'a str) -> Self {
        SnapshotSource {
            platform,
            primary_account_type,
            connected_marker,
        }
    }

    /// One entry per (authenticator type x installed account).
    ///
    /// Title is the authenticator label when it has one, else the raw
    /// account name; when the label is used the account name becomes the
    /// description. A branding failure skips that one authenticator.
    pub fn account_entries(&self, keep: KeepPolicy) -> AccountsSnapshot {
        let mut entries = Vec::new();
        let mut allowable_types = Vec::new();
        let mut primary_account_seen = false;

        for desc in self.platform.authenticator_types() {
            let branding = match self.platform.load_branding(&desc) {
                Ok(branding) => branding,
                Err(e) => {
                    error!("skipping authenticator {}: {}", desc.account_type, e);
                    continue;
                }
            };

            // Empty labels are treated as missing, as the originals do.
            let label = branding.label.filter(|l| !l.is_empty());

            // Authenticators with neither a label nor an icon aren't meant to
            // be user-facing; keep them out of the add-account flow.
            if label.is_some() || branding.icon.is_some() {
                allowable_types.push(desc.account_type.clone());
            }

            let accounts = self.platform.accounts_of_type(&desc.account_type);
            if accounts.is_empty() {
                continue;
            }
            if desc.account_type == self.primary_account_type {
                primary_account_seen = true;
            }

            let icon = branding.icon.clone().unwrap_or_default();
            for account in accounts {
                let intent = Intent::new(ACTION_ACCOUNT_SYNC)
                    .with_extra("account", account.name.clone())
                    .with_extra("account_type", account.account_type.clone());
                let (title, description) = match &label {
                    Some(label) => (label.clone(), Some(account.name.clone())),
                    None => (account.name.clone(), None),
                };
                entries.push(
                    Entry::new(
                        EntryKey::for_account(&account.account_type, &account.name),
                        title,
                        icon.clone(),
                        intent,
                    )
                    .with_description(description),
                );
            }
        }

        // Single account of the primary type: once one exists, adding a
        // second is disallowed.
        if primary_account_seen {
            allowable_types.retain(|t| t != self.primary_account_type);
            debug!(
                "primary account present, {} types remain add-eligible",
                allowable_types.len()
            );
        }

        AccountsSnapshot {
            snapshot: Snapshot::new(entries, keep),
            allowable_types,
        }
    }

    /// One entry per bonded device; connected devices carry the marker text
    /// as their description.
    pub fn accessory_entries(&self, keep: KeepPolicy) -> Snapshot {
        let connected = self.platform.connected_addresses();
        let entries = self
            .platform
            .bonded_devices()
            .into_iter()
            .map(|device| {
                let description = connected
                    .contains(&device.address)
                    .then(|| self.connected_marker.to_string());
                let intent = Intent::new(ACTION_ACCESSORY)
                    .with_extra("address", device.address.clone())
                    .with_extra("name", device.name.clone());
                Entry::new(
                    EntryKey::for_device(&device.address),
                    device.name.clone(),
                    device.device_class.icon(),
                    intent,
                )
                .with_description(description)
            })
            .collect();
        Snapshot::new(entries, keep)
    }

    /// Whether a system-level handler exists for an entry's intent.
    pub fn is_entry_actionable(&self, intent: &Intent) -> bool {
        self.platform.resolve_system_handler(intent).is_some()
    }

    /// Default icon used when an authenticator exposes none.
    pub fn default_account_icon() -> IconRef {
        IconRef::default()
    }
}
