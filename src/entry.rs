use std::collections::BTreeMap;
use std::fmt;

/// Stable identity of an entry within a section.
///
/// Keys are derived from a type tag plus a natural key so that repeated
/// snapshot passes address the same displayed row: `account:<type>:<name>`
/// for installed accounts, `device:<address>` for bonded accessories, and
/// `static:<menu key>` for entries declared in the menu definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryKey(String);

impl EntryKey {
    pub fn for_account(account_type: &str, name: &str) -> Self {
        EntryKey(format!("account:{}:{}", account_type, name))
    }

    pub fn for_device(address: &str) -> Self {
        EntryKey(format!("device:{}", address))
    }

    pub fn for_static(menu_key: &str) -> Self {
        EntryKey(format!("static:{}", menu_key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque reference to an icon resource, by name.
///
/// The core never interprets icon names; the rendering layer maps the ones it
/// knows to glyphs and falls back to the default for the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconRef(String);

impl IconRef {
    pub const DEFAULT: &'static str = "settings_default";

    pub fn new(name: impl Into<String>) -> Self {
        IconRef(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn is_default(&self) -> bool {
        self.0 == Self::DEFAULT
    }
}

impl Default for IconRef {
    fn default() -> Self {
        IconRef(Self::DEFAULT.to_string())
    }
}

/// Opaque navigation/launch target carried by an entry.
///
/// The core only forwards intents; the sole query it performs is whether a
/// system-level handler exists for one (single-item visibility).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Intent {
    pub action: String,
    pub package: Option<String>,
    pub extras: BTreeMap<String, String>,
}

impl Intent {
    pub fn new(action: impl Into<String>) -> Self {
        Intent {
            action: action.into(),
            package: None,
            extras: BTreeMap::new(),
        }
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }
}

/// Where an entry sits relative to its section peers.
///
/// `Normal` entries keep snapshot enumeration order; `Last` entries are
/// forced to the end of the section regardless of when they were inserted
/// (the persistent "add account" / "add accessory" actions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    #[default]
    Normal,
    Last,
}

/// One displayable/actionable row within a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: EntryKey,
    pub title: String,
    pub description: Option<String>,
    pub icon: IconRef,
    pub intent: Intent,
    pub placement: Placement,
    pub visible: bool,
}

impl Entry {
    /// Plain visible entry with natural placement.
    pub fn new(key: EntryKey, title: impl Into<String>, icon: IconRef, intent: Intent) -> Self {
        Entry {
            key,
            title: title.into(),
            description: None,
            icon,
            intent,
            placement: Placement::Normal,
            visible: true,
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn pinned_last(mut self) -> Self {
        self.placement = Placement::Last;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// True when any displayed field differs, i.e. an in-place update is due.
    pub fn differs_from(&self, other: &Entry) -> bool {
        self.title != other.title
            || self.description != other.description
            || self.icon != other.icon
            || self.intent != other.intent
            || self.placement != other.placement
            || self.visible != other.visible
    }
}
