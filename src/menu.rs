//! Declarative root menu definition.
//!
//! The browse-root layout (sections, their static entries, which entries are
//! dynamic) is data, not code, shipped embedded as TOML. A document without a
//! `[[section]]` root is a fatal startup error: no partial home screen is
//! safe to display.

use serde::Deserialize;
use thiserror::Error;

use crate::entry::{Entry, EntryKey, IconRef, Intent, Placement};

/// The built-in menu, mirroring the stock home screen.
const DEFAULT_MENU: &str = r#"
[[section]]
id = "quick"
title = "Quick settings"

[[section.entry]]
key = "home"
title = "Home screen"
icon = "ic_home"
kind = "system_shortcut"
action = "vendor.HOME"

[[section.entry]]
key = "cast"
title = "Cast"
icon = "ic_cast"
kind = "system_shortcut"
action = "vendor.CAST"

[[section.entry]]
key = "search"
title = "Search"
icon = "ic_search"
kind = "system_shortcut"
action = "vendor.SEARCH"

[[section.entry]]
key = "speech"
title = "Speech"
icon = "ic_speech"
kind = "system_shortcut"
action = "vendor.SPEECH"

[[section.entry]]
key = "vendor_settings"
title = "Vendor settings"
icon = "ic_vendor"
kind = "vendor_shortcut"
action = "vendor.SETTINGS"

[[section]]
id = "device"
title = "Device"

[[section.entry]]
key = "network"
title = "Wi-Fi"
icon = "ic_network"
kind = "network"
action = "tvhome.NETWORK"

[[section.entry]]
key = "sound"
title = "Sound"
icon = "ic_volume_up"
kind = "sound"
action = "tvhome.SOUND"

[[section.entry]]
key = "developer"
title = "Developer options"
icon = "ic_developer"
kind = "developer"
action = "tvhome.DEVELOPER"

[[section]]
id = "accounts"
title = "Accounts"
role = "accounts"

[[section.entry]]
key = "location"
title = "Location"
icon = "ic_location"
action = "tvhome.LOCATION"

[[section.entry]]
key = "security"
title = "Security & restrictions"
icon = "ic_security"
action = "tvhome.SECURITY"

[[section.entry]]
key = "diagnostics"
title = "Usage & diagnostics"
icon = "ic_usage"
action = "tvhome.DIAGNOSTICS"

[[section.entry]]
key = "add_account"
title = "Add account"
icon = "ic_settings_add"
kind = "add_account"
action = "tvhome.ADD_ACCOUNT"

[[section]]
id = "accessories"
title = "Remotes & accessories"
role = "accessories"

[[section.entry]]
key = "add_accessory"
title = "Add accessory"
icon = "ic_settings_bluetooth"
kind = "add_accessory"
action = "tvhome.ADD_ACCESSORY"
"#;

/// Menu definition errors. All fatal: a malformed root means no safe layout.
#[derive(Error, Debug)]
pub enum MenuError {
    #[error("menu definition is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("menu definition has no [[section]] root")]
    NoSections,
}

/// What a declared entry contributes beyond a static row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Static row, always shown.
    #[default]
    Plain,
    /// Title flips between "Network" and "Wi-Fi" with wired availability.
    Network,
    /// Icon flips with the persisted sound-effects setting.
    Sound,
    /// Hidden until the developer flag is first observed true.
    Developer,
    /// Visible iff a privileged system handler resolves the intent.
    SystemShortcut,
    /// Like `SystemShortcut`, but title and icon come from the handler.
    VendorShortcut,
    /// Pinned-last "add account" action, protected across reconciliation.
    AddAccount,
    /// Pinned-last "add accessory" action, protected across reconciliation.
    AddAccessory,
}

/// Which dynamic population a section hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionRole {
    #[default]
    General,
    Accounts,
    Accessories,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EntryDef {
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub kind: EntryKind,
    pub action: String,
    #[serde(default)]
    pub package: Option<String>,
}

impl EntryDef {
    /// Materialize the declared entry. Pinned actions sort last; developer
    /// entries start hidden.
    pub fn to_entry(&self) -> Entry {
        let icon = self
            .icon
            .as_deref()
            .map(IconRef::new)
            .unwrap_or_default();
        let mut intent = Intent::new(self.action.clone());
        if let Some(package) = &self.package {
            intent = intent.with_package(package.clone());
        }
        let mut entry = Entry::new(EntryKey::for_static(&self.key), self.title.clone(), icon, intent);
        match self.kind {
            EntryKind::AddAccount | EntryKind::AddAccessory => {
                entry.placement = Placement::Last;
            }
            EntryKind::Developer => {
                entry.visible = false;
            }
            _ => {}
        }
        entry
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SectionDef {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub role: SectionRole,
    #[serde(default, rename = "entry")]
    pub entries: Vec<EntryDef>,
}

#[derive(Debug, Deserialize)]
struct MenuDoc {
    #[serde(default, rename = "section")]
    sections: Vec<SectionDef>,
}

/// Parsed root menu.
#[derive(Debug, Clone)]
pub struct Menu {
    pub sections: Vec<SectionDef>,
}

impl Menu {
    /// Parse a menu document. Fatal when the root is absent or malformed.
    pub fn parse(text: &str) -> Result<Menu, MenuError> {
        let doc: MenuDoc = toml::from_str(text)?;
        if doc.sections.is_empty() {
            return Err(MenuError::NoSections);
        }
        Ok(Menu {
            sections: doc.sections,
        })
    }

    /// The built-in menu. Restricted profiles never see account sections.
    pub fn builtin(restricted: bool) -> Result<Menu, MenuError> {
        let mut menu = Menu::parse(DEFAULT_MENU)?;
        if restricted {
            menu.sections.retain(|s| s.role != SectionRole::Accounts);
        }
        Ok(menu)
    }

    pub fn section(&self, id: &str) -> Option<&SectionDef> {
        self.sections.iter().find(|s| s.id == id)
    }
}
