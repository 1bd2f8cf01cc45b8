//! Screen controllers: the two renderings of the settings home screen.
//!
//! [`BrowseScreen`] reproduces the legacy header/row generation,
//! [`FragmentScreen`] the modern preference-list generation. Both own a
//! [`SectionSet`] registry created at construction and mutate it only from
//! [`dispatch`](FragmentScreen::dispatch), which serializes passes on one
//! coarse mutex: overlapping triggers queue behind each other and every pass
//! runs to completion.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::config::Config;
use crate::entry::{Entry, EntryKey, IconRef};
use crate::events::HomeEvent;
use crate::menu::{EntryKind, Menu, MenuError, SectionDef, SectionRole};
use crate::platform::Platform;
use crate::reconcile::reconcile;
use crate::section::{Section, SectionId, SectionSet};
use crate::snapshot::{KeepPolicy, SnapshotSource};

/// Extra carrying the add-eligible account types on the add-account intent.
pub const EXTRA_ALLOWABLE_TYPES: &str = "allowable_types";

const ICON_VOLUME_ON: &str = "ic_volume_up";
const ICON_VOLUME_OFF: &str = "ic_volume_off";
const TITLE_NETWORK_WIRED: &str = "Network";
const TITLE_NETWORK_WIRELESS: &str = "Wi-Fi";

struct ScreenState {
    sections: SectionSet,
    /// Latched once the developer flag is first observed true; the entry is
    /// never re-hidden afterwards.
    developer_shown: bool,
}

/// State and helpers shared by both screen generations.
struct ScreenCore<P> {
    platform: Arc<P>,
    menu: Menu,
    config: Config,
    state: Mutex<ScreenState>,
}

impl<P: Platform> ScreenCore<P> {
    fn new(platform: Arc<P>, config: Config) -> Result<Self, MenuError> {
        let menu = Menu::builtin(config.restricted_profile)?;
        let mut sections = SectionSet::new();
        for def in &menu.sections {
            let mut section = Section::new(SectionId::new(&def.id), &def.title);
            for entry in &def.entries {
                section.push(entry.to_entry());
            }
            sections.insert(section);
        }
        Ok(ScreenCore {
            platform,
            menu,
            config,
            state: Mutex::new(ScreenState {
                sections,
                developer_shown: false,
            }),
        })
    }

    /// The coarse pass guard: one reconciliation pass at a time per screen.
    fn lock(&self) -> MutexGuard<'_, ScreenState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn source(&self) -> SnapshotSource<'_, P> {
        SnapshotSource::new(
            self.platform.as_ref(),
            &self.config.primary_account_type,
            &self.config.connected_marker,
        )
    }

    fn section_def(&self, role: SectionRole) -> Option<&SectionDef> {
        self.menu.sections.iter().find(|s| s.role == role)
    }

    fn entry_defs_of_kind(&self, kind: EntryKind) -> impl Iterator<Item = (&SectionDef, &crate::menu::EntryDef)> {
        self.menu
            .sections
            .iter()
            .flat_map(|s| s.entries.iter().map(move |e| (s, e)))
            .filter(move |(_, e)| e.kind == kind)
    }

    /// Network entry title follows wired availability.
    fn update_network(&self, state: &mut ScreenState) {
        let title = if self.platform.ethernet_available() {
            TITLE_NETWORK_WIRED
        } else {
            TITLE_NETWORK_WIRELESS
        };
        for (section_def, entry_def) in self.entry_defs_of_kind(EntryKind::Network) {
            let id = SectionId::new(&section_def.id);
            let key = EntryKey::for_static(&entry_def.key);
            if let Some(section) = state.sections.get_mut(&id) {
                section.update_in_place(&key, |e| e.title = title.to_string());
            }
        }
    }

    /// Sound entry icon follows the persisted sound-effects setting.
    fn update_sound(&self, state: &mut ScreenState) {
        let icon = if self.platform.sound_effects_enabled() {
            IconRef::new(ICON_VOLUME_ON)
        } else {
            IconRef::new(ICON_VOLUME_OFF)
        };
        for (section_def, entry_def) in self.entry_defs_of_kind(EntryKind::Sound) {
            let id = SectionId::new(&section_def.id);
            let key = EntryKey::for_static(&entry_def.key);
            if let Some(section) = state.sections.get_mut(&id) {
                section.update_in_place(&key, |e| e.icon = icon.clone());
            }
        }
    }

    /// Developer entry: hidden until the flag is first seen true, then
    /// visible for the life of the screen.
    fn update_developer(&self, state: &mut ScreenState) {
        if state.developer_shown || !self.platform.developer_mode_enabled() {
            return;
        }
        state.developer_shown = true;
        debug!("developer flag observed, revealing developer entry");
        for (section_def, entry_def) in self.entry_defs_of_kind(EntryKind::Developer) {
            let id = SectionId::new(&section_def.id);
            let key = EntryKey::for_static(&entry_def.key);
            if let Some(section) = state.sections.get_mut(&id) {
                section.update_in_place(&key, |e| e.visible = true);
            }
        }
    }

    /// Shortcut entries are visible iff a system handler resolves them;
    /// vendor shortcuts additionally take the handler's own icon (and, on
    /// the legacy screen, its label).
    fn update_shortcuts(&self, state: &mut ScreenState, take_handler_label: bool) {
        for (section_def, entry_def) in self
            .menu
            .sections
            .iter()
            .flat_map(|s| s.entries.iter().map(move |e| (s, e)))
            .filter(|(_, e)| {
                matches!(e.kind, EntryKind::SystemShortcut | EntryKind::VendorShortcut)
            })
        {
            let id = SectionId::new(&section_def.id);
            let key = EntryKey::for_static(&entry_def.key);
            let Some(section) = state.sections.get_mut(&id) else {
                continue;
            };
            let Some(current) = section.get(&key) else {
                continue;
            };
            let handler = self.platform.resolve_system_handler(&current.intent);
            let visible = handler.is_some();
            let vendor = entry_def.kind == EntryKind::VendorShortcut;
            section.update_in_place(&key, |e| {
                e.visible = visible;
                if let (true, Some(info)) = (vendor, handler) {
                    e.icon = info.icon;
                    if take_handler_label {
                        e.title = info.label;
                    }
                }
            });
        }
    }

    /// Clone of the displayed sections, for rendering.
    fn sections(&self) -> SectionSet {
        self.lock().sections.clone()
    }

    fn add_account_entry(&self, allowable_types: &[String]) -> Option<Entry> {
        let def = self
            .entry_defs_of_kind(EntryKind::AddAccount)
            .map(|(_, e)| e)
            .next()?;
        let mut entry = def.to_entry();
        let intent = std::mem::take(&mut entry.intent)
            .with_extra(EXTRA_ALLOWABLE_TYPES, allowable_types.join(","));
        entry.intent = intent;
        Some(entry)
    }
}

/// The modern preference-list generation.
///
/// Accounts and accessories reconcile against key-protected pinned actions;
/// singles (shortcuts, developer, sound) are visibility and field flips on
/// resident entries.
pub struct FragmentScreen<P> {
    core: ScreenCore<P>,
}

impl<P: Platform> FragmentScreen<P> {
    pub fn new(platform: Arc<P>, config: Config) -> Result<Self, MenuError> {
        Ok(FragmentScreen {
            core: ScreenCore::new(platform, config)?,
        })
    }

    /// Single dispatch point. Runs the passes the event calls for, start to
    /// finish, under the pass guard.
    pub fn dispatch(&self, event: HomeEvent) {
        debug!("fragment screen: {}", event.describe());
        let mut state = self.core.lock();
        match event {
            HomeEvent::Resume => {
                self.update_accounts(&mut state);
                self.update_accessories(&mut state);
                self.core.update_developer(&mut state);
                self.core.update_sound(&mut state);
                self.core.update_network(&mut state);
                self.core.update_shortcuts(&mut state, false);
            }
            HomeEvent::AccountsChanged => self.update_accounts(&mut state),
            HomeEvent::BluetoothChanged => self.update_accessories(&mut state),
            HomeEvent::ConnectivityChanged => self.core.update_network(&mut state),
            HomeEvent::DeveloperFlagChanged => self.core.update_developer(&mut state),
            HomeEvent::SoundSettingChanged => self.core.update_sound(&mut state),
        }
    }

    pub fn sections(&self) -> SectionSet {
        self.core.sections()
    }

    fn update_accounts(&self, state: &mut ScreenState) {
        let Some(def) = self.core.section_def(SectionRole::Accounts) else {
            return; // Restricted profiles have no accounts section.
        };
        let id = SectionId::new(&def.id);

        // Every menu-declared resident (location, security, the pinned add
        // action) is protected; only account entries come and go.
        let keep = KeepPolicy::keys(def.entries.iter().map(|e| EntryKey::for_static(&e.key)));
        let accounts = self.core.source().account_entries(keep);

        let Some(section) = state.sections.get_mut(&id) else {
            return;
        };
        section.apply(&reconcile(section, &accounts.snapshot));

        // The add action stays resident; eligibility drives its visibility
        // and the allowed-type extra on its intent.
        if let Some(add) = self.core.add_account_entry(&accounts.allowable_types) {
            let visible = !accounts.allowable_types.is_empty();
            let key = add.key.clone();
            section.update_in_place(&key, |e| {
                e.visible = visible;
                e.intent = add.intent;
            });
        }
    }

    fn update_accessories(&self, state: &mut ScreenState) {
        let Some(def) = self.core.section_def(SectionRole::Accessories) else {
            return;
        };
        let id = SectionId::new(&def.id);
        let keep = KeepPolicy::keys(def.entries.iter().map(|e| EntryKey::for_static(&e.key)));
        let snapshot = self.core.source().accessory_entries(keep);
        if let Some(section) = state.sections.get_mut(&id) {
            section.apply(&reconcile(section, &snapshot));
        }
    }
}

/// The legacy header/row generation.
///
/// Account rows protect a small allow-list of *titles* from removal and the
/// add-account action is rebuilt into each snapshot instead of kept
/// resident; vendor shortcuts take the handler's label as well as its icon.
pub struct BrowseScreen<P> {
    core: ScreenCore<P>,
}

impl<P: Platform> BrowseScreen<P> {
    pub fn new(platform: Arc<P>, config: Config) -> Result<Self, MenuError> {
        Ok(BrowseScreen {
            core: ScreenCore::new(platform, config)?,
        })
    }

    pub fn dispatch(&self, event: HomeEvent) {
        debug!("browse screen: {}", event.describe());
        let mut state = self.core.lock();
        match event {
            HomeEvent::Resume => {
                self.update_accounts(&mut state);
                self.update_accessories(&mut state);
                self.core.update_developer(&mut state);
                self.core.update_sound(&mut state);
                self.core.update_network(&mut state);
                self.core.update_shortcuts(&mut state, true);
            }
            HomeEvent::AccountsChanged => self.update_accounts(&mut state),
            HomeEvent::BluetoothChanged => self.update_accessories(&mut state),
            HomeEvent::ConnectivityChanged => self.core.update_network(&mut state),
            HomeEvent::DeveloperFlagChanged => self.core.update_developer(&mut state),
            HomeEvent::SoundSettingChanged => self.core.update_sound(&mut state),
        }
    }

    pub fn sections(&self) -> SectionSet {
        self.core.sections()
    }

    fn update_accounts(&self, state: &mut ScreenState) {
        let Some(def) = self.core.section_def(SectionRole::Accounts) else {
            return;
        };
        let id = SectionId::new(&def.id);

        // Legacy protection vocabulary: an allow-list of displayed titles.
        let keep = KeepPolicy::titles(
            def.entries
                .iter()
                .filter(|e| e.kind == EntryKind::Plain)
                .map(|e| e.title.clone()),
        );
        let mut accounts = self.core.source().account_entries(keep);

        // The add button is rebuilt into every snapshot while any type is
        // still add-eligible.
        if !accounts.allowable_types.is_empty() {
            if let Some(add) = self.core.add_account_entry(&accounts.allowable_types) {
                accounts.snapshot.entries.push(add);
            }
        }

        if let Some(section) = state.sections.get_mut(&id) {
            section.apply(&reconcile(section, &accounts.snapshot));
        }
    }

    fn update_accessories(&self, state: &mut ScreenState) {
        let Some(def) = self.core.section_def(SectionRole::Accessories) else {
            return;
        };
        let id = SectionId::new(&def.id);
        let mut snapshot = self.core.source().accessory_entries(KeepPolicy::None);

        // The add-accessory action is part of every legacy snapshot.
        for (_, entry_def) in self.core.entry_defs_of_kind(EntryKind::AddAccessory) {
            snapshot.entries.push(entry_def.to_entry());
        }

        if let Some(section) = state.sections.get_mut(&id) {
            section.apply(&reconcile(section, &snapshot));
        }
    }
}

/// Which generation of the home screen to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    Legacy,
    Modern,
}

impl ScreenKind {
    pub fn label(self) -> &'static str {
        match self {
            ScreenKind::Legacy => "browse (legacy)",
            ScreenKind::Modern => "fragment (modern)",
        }
    }
}

/// Either generation behind one dispatch/render surface.
pub enum HomeScreen<P> {
    Legacy(BrowseScreen<P>),
    Modern(FragmentScreen<P>),
}

impl<P: Platform> HomeScreen<P> {
    pub fn new(kind: ScreenKind, platform: Arc<P>, config: Config) -> Result<Self, MenuError> {
        Ok(match kind {
            ScreenKind::Legacy => HomeScreen::Legacy(BrowseScreen::new(platform, config)?),
            ScreenKind::Modern => HomeScreen::Modern(FragmentScreen::new(platform, config)?),
        })
    }

    pub fn kind(&self) -> ScreenKind {
        match self {
            HomeScreen::Legacy(_) => ScreenKind::Legacy,
            HomeScreen::Modern(_) => ScreenKind::Modern,
        }
    }

    pub fn dispatch(&self, event: HomeEvent) {
        match self {
            HomeScreen::Legacy(screen) => screen.dispatch(event),
            HomeScreen::Modern(screen) => screen.dispatch(event),
        }
    }

    pub fn sections(&self) -> SectionSet {
        match self {
            HomeScreen::Legacy(screen) => screen.sections(),
            HomeScreen::Modern(screen) => screen.sections(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::SimPlatform;
    use crate::platform::DeviceClass;

    fn fragment(platform: Arc<SimPlatform>) -> FragmentScreen<SimPlatform> {
        FragmentScreen::new(platform, Config::default()).unwrap()
    }

    fn browse(platform: Arc<SimPlatform>) -> BrowseScreen<SimPlatform> {
        BrowseScreen::new(platform, Config::default()).unwrap()
    }

    fn keys_of(sections: &SectionSet, id: &str) -> Vec<String> {
        sections
            .get(&SectionId::new(id))
            .unwrap()
            .entries()
            .map(|e| e.key.as_str().to_string())
            .collect()
    }

    #[test]
    fn test_fragment_accounts_reconcile_and_add_visibility() {
        let platform = Arc::new(SimPlatform::new());
        platform.install_authenticator("google", "vendor.google", Some("Google"), Some("ic_g"));
        platform.add_account("google", "alice@example.com");
        let screen = fragment(Arc::clone(&platform));

        screen.dispatch(HomeEvent::AccountsChanged);
        let sections = screen.sections();
        let accounts = sections.get(&SectionId::new("accounts")).unwrap();
        assert!(accounts
            .get(&EntryKey::for_account("google", "alice@example.com"))
            .is_some());
        // Static residents survive; the pinned add action is last.
        assert_eq!(
            accounts.entries().last().unwrap().key,
            EntryKey::for_static("add_account")
        );
        // Only the primary type exists and it already has an account, so the
        // add action hides.
        assert!(!accounts.get(&EntryKey::for_static("add_account")).unwrap().visible);

        // Removing the account makes the type eligible again.
        platform.remove_account("google", "alice@example.com");
        screen.dispatch(HomeEvent::AccountsChanged);
        let sections = screen.sections();
        let accounts = sections.get(&SectionId::new("accounts")).unwrap();
        assert!(accounts
            .get(&EntryKey::for_account("google", "alice@example.com"))
            .is_none());
        let add = accounts.get(&EntryKey::for_static("add_account")).unwrap();
        assert!(add.visible);
        assert_eq!(
            add.intent.extras.get(EXTRA_ALLOWABLE_TYPES).map(String::as_str),
            Some("google")
        );
    }

    #[test]
    fn test_fragment_account_position_stable_across_updates() {
        let platform = Arc::new(SimPlatform::new());
        platform.install_authenticator("corp", "vendor.corp", None, Some("ic_corp"));
        platform.add_account("corp", "a@corp.example");
        platform.add_account("corp", "b@corp.example");
        let screen = fragment(Arc::clone(&platform));
        screen.dispatch(HomeEvent::AccountsChanged);

        let before = keys_of(&screen.sections(), "accounts");
        // Second pass with identical platform state changes nothing.
        screen.dispatch(HomeEvent::AccountsChanged);
        assert_eq!(keys_of(&screen.sections(), "accounts"), before);
    }

    #[test]
    fn test_fragment_accessories_connected_marker_flip() {
        let platform = Arc::new(SimPlatform::new());
        platform.bond_device("AA:BB", "Remote", DeviceClass::Remote);
        let screen = fragment(Arc::clone(&platform));

        screen.dispatch(HomeEvent::BluetoothChanged);
        let sections = screen.sections();
        let device = sections
            .get(&SectionId::new("accessories"))
            .unwrap()
            .get(&EntryKey::for_device("AA:BB"))
            .unwrap()
            .clone();
        assert_eq!(device.description, None);

        platform.connect_device("AA:BB");
        screen.dispatch(HomeEvent::BluetoothChanged);
        let sections = screen.sections();
        let accessories = sections.get(&SectionId::new("accessories")).unwrap();
        let device_after = accessories.get(&EntryKey::for_device("AA:BB")).unwrap();
        assert_eq!(device_after.description.as_deref(), Some("Connected"));
        // Identity preserved: same position, pinned add action still last.
        assert_eq!(accessories.position(&EntryKey::for_device("AA:BB")), Some(0));
        assert_eq!(
            accessories.entries().last().unwrap().key,
            EntryKey::for_static("add_accessory")
        );
    }

    #[test]
    fn test_fragment_unbond_removes_entry_but_keeps_add_action() {
        let platform = Arc::new(SimPlatform::new());
        platform.bond_device("AA:BB", "Remote", DeviceClass::Remote);
        let screen = fragment(Arc::clone(&platform));
        screen.dispatch(HomeEvent::BluetoothChanged);

        platform.unbond_device("AA:BB");
        screen.dispatch(HomeEvent::BluetoothChanged);
        assert_eq!(
            keys_of(&screen.sections(), "accessories"),
            vec!["static:add_accessory".to_string()]
        );
    }

    #[test]
    fn test_developer_entry_latches_visible() {
        let platform = Arc::new(SimPlatform::new());
        let screen = fragment(Arc::clone(&platform));
        let dev_key = EntryKey::for_static("developer");
        let device_id = SectionId::new("device");

        screen.dispatch(HomeEvent::DeveloperFlagChanged);
        assert!(!screen.sections().get(&device_id).unwrap().get(&dev_key).unwrap().visible);

        platform.set_developer_mode(true);
        screen.dispatch(HomeEvent::DeveloperFlagChanged);
        assert!(screen.sections().get(&device_id).unwrap().get(&dev_key).unwrap().visible);

        // Flag reverting does not re-hide the entry.
        platform.set_developer_mode(false);
        screen.dispatch(HomeEvent::DeveloperFlagChanged);
        screen.dispatch(HomeEvent::Resume);
        assert!(screen.sections().get(&device_id).unwrap().get(&dev_key).unwrap().visible);
    }

    #[test]
    fn test_sound_icon_and_network_title_flips() {
        let platform = Arc::new(SimPlatform::new());
        platform.set_sound_effects(true);
        let screen = fragment(Arc::clone(&platform));
        let device_id = SectionId::new("device");

        screen.dispatch(HomeEvent::Resume);
        let sections = screen.sections();
        let device = sections.get(&device_id).unwrap();
        assert_eq!(device.get(&EntryKey::for_static("sound")).unwrap().icon.name(), "ic_volume_up");
        assert_eq!(device.get(&EntryKey::for_static("network")).unwrap().title, "Wi-Fi");

        platform.set_sound_effects(false);
        platform.set_ethernet(true);
        screen.dispatch(HomeEvent::SoundSettingChanged);
        screen.dispatch(HomeEvent::ConnectivityChanged);
        let sections = screen.sections();
        let device = sections.get(&device_id).unwrap();
        assert_eq!(device.get(&EntryKey::for_static("sound")).unwrap().icon.name(), "ic_volume_off");
        assert_eq!(device.get(&EntryKey::for_static("network")).unwrap().title, "Network");
    }

    #[test]
    fn test_fragment_shortcut_visibility_follows_handlers() {
        let platform = Arc::new(SimPlatform::new());
        platform.register_handler("vendor.HOME", "Home screen", "ic_home");
        platform.register_handler("vendor.SETTINGS", "Acme settings", "ic_acme");
        let screen = fragment(Arc::clone(&platform));

        screen.dispatch(HomeEvent::Resume);
        let sections = screen.sections();
        let quick = sections.get(&SectionId::new("quick")).unwrap();
        assert!(quick.get(&EntryKey::for_static("home")).unwrap().visible);
        assert!(!quick.get(&EntryKey::for_static("cast")).unwrap().visible);

        // Vendor shortcut refreshes its icon from the handler, keeps its own
        // title on the modern screen.
        let vendor = quick.get(&EntryKey::for_static("vendor_settings")).unwrap();
        assert!(vendor.visible);
        assert_eq!(vendor.icon.name(), "ic_acme");
        assert_eq!(vendor.title, "Vendor settings");
    }

    #[test]
    fn test_browse_vendor_shortcut_takes_handler_label() {
        let platform = Arc::new(SimPlatform::new());
        platform.register_handler("vendor.SETTINGS", "Acme settings", "ic_acme");
        let screen = browse(Arc::clone(&platform));

        screen.dispatch(HomeEvent::Resume);
        let sections = screen.sections();
        let vendor = sections
            .get(&SectionId::new("quick"))
            .unwrap()
            .get(&EntryKey::for_static("vendor_settings"))
            .unwrap()
            .clone();
        assert_eq!(vendor.title, "Acme settings");
        assert_eq!(vendor.icon.name(), "ic_acme");
    }

    #[test]
    fn test_browse_accounts_title_allowlist_protection() {
        let platform = Arc::new(SimPlatform::new());
        platform.install_authenticator("google", "vendor.google", Some("Google"), Some("ic_g"));
        platform.add_account("google", "alice@example.com");
        let screen = browse(Arc::clone(&platform));
        screen.dispatch(HomeEvent::AccountsChanged);

        let sections = screen.sections();
        let accounts = sections.get(&SectionId::new("accounts")).unwrap();
        // Allow-listed titles survive even though the snapshot never lists
        // them.
        assert!(accounts.get(&EntryKey::for_static("location")).is_some());
        assert!(accounts.get(&EntryKey::for_static("security")).is_some());
        assert!(accounts.get(&EntryKey::for_static("diagnostics")).is_some());
        assert!(accounts
            .get(&EntryKey::for_account("google", "alice@example.com"))
            .is_some());
        // The primary type is taken, no other types exist: no add button.
        assert!(accounts.get(&EntryKey::for_static("add_account")).is_none());
    }

    #[test]
    fn test_browse_add_button_appears_when_types_eligible() {
        let platform = Arc::new(SimPlatform::new());
        platform.install_authenticator("corp", "vendor.corp", Some("Corp"), None);
        let screen = browse(Arc::clone(&platform));
        screen.dispatch(HomeEvent::AccountsChanged);

        let sections = screen.sections();
        let accounts = sections.get(&SectionId::new("accounts")).unwrap();
        let add = accounts.get(&EntryKey::for_static("add_account")).unwrap();
        assert_eq!(
            add.intent.extras.get(EXTRA_ALLOWABLE_TYPES).map(String::as_str),
            Some("corp")
        );
        assert_eq!(accounts.entries().last().unwrap().key, add.key);
    }

    #[test]
    fn test_restricted_profile_has_no_accounts_section() {
        let platform = Arc::new(SimPlatform::new());
        let config = Config {
            restricted_profile: true,
            ..Config::default()
        };
        let screen = FragmentScreen::new(Arc::clone(&platform), config).unwrap();
        screen.dispatch(HomeEvent::Resume);
        assert!(screen.sections().get(&SectionId::new("accounts")).is_none());
        assert!(screen.sections().get(&SectionId::new("accessories")).is_some());
    }

    #[test]
    fn test_concurrent_dispatch_serializes() {
        let platform = Arc::new(SimPlatform::demo());
        let screen = Arc::new(fragment(Arc::clone(&platform)));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let screen = Arc::clone(&screen);
                std::thread::spawn(move || {
                    let event = if i % 2 == 0 {
                        HomeEvent::Resume
                    } else {
                        HomeEvent::BluetoothChanged
                    };
                    screen.dispatch(event);
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // All passes ran to completion; the registry is consistent.
        let sections = screen.sections();
        let accessories = sections.get(&SectionId::new("accessories")).unwrap();
        assert_eq!(accessories.len(), 3);
        assert_eq!(
            accessories.entries().last().unwrap().key,
            EntryKey::for_static("add_accessory")
        );
    }

    #[test]
    fn test_resume_is_idempotent() {
        let platform = Arc::new(SimPlatform::demo());
        let screen = fragment(Arc::clone(&platform));
        screen.dispatch(HomeEvent::Resume);
        let first = screen.sections();
        screen.dispatch(HomeEvent::Resume);
        let second = screen.sections();

        for section in first.iter() {
            let after = second.get(section.id()).unwrap();
            let a: Vec<_> = section.entries().collect();
            let b: Vec<_> = after.entries().collect();
            assert_eq!(a, b, "section {} changed on idempotent resume", section.id());
        }
    }
}
