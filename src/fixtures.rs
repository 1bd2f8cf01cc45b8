//! Simulated platform used by tests, the demo TUI and benchmarks.
//!
//! `SimPlatform` keeps the whole platform surface (authenticators, accounts,
//! bonded devices, connection set, intent handlers, persisted flags) behind
//! one mutex and exposes mutators so every reconciliation path can be
//! exercised deterministically.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::entry::{IconRef, Intent};
use crate::platform::{
    Account, AuthenticatorDesc, BondedDevice, Branding, DeviceClass, HandlerInfo, Platform,
    PlatformError,
};

#[derive(Default)]
struct SimState {
    authenticators: Vec<SimAuthenticator>,
    accounts: Vec<Account>,
    broken_packages: HashSet<String>,
    bonded: Vec<BondedDevice>,
    connected: HashSet<String>,
    handlers: HashMap<String, HandlerInfo>,
    developer_mode: bool,
    sound_effects: bool,
    ethernet: bool,
}

struct SimAuthenticator {
    desc: AuthenticatorDesc,
    branding: Branding,
}

/// Deterministic in-memory platform.
#[derive(Default)]
pub struct SimPlatform {
    state: Mutex<SimState>,
}

impl SimPlatform {
    pub fn new() -> Self {
        SimPlatform::default()
    }

    /// A populated platform for the demo TUI: a primary account, a couple of
    /// accessories and the vendor shortcuts the default menu references.
    pub fn demo() -> Self {
        let sim = SimPlatform::new();
        sim.install_authenticator("google", "vendor.google", Some("Google"), Some("ic_google"));
        sim.install_authenticator("corp", "vendor.corp", Some("Corp Mail"), None);
        sim.add_account("google", "alice@example.com");
        sim.bond_device("AA:11:22:33:44:55", "TV Remote", DeviceClass::Remote);
        sim.bond_device("BB:66:77:88:99:00", "Gamepad", DeviceClass::Gamepad);
        sim.connect_device("AA:11:22:33:44:55");
        sim.register_handler("vendor.HOME", "Home screen", "ic_home");
        sim.register_handler("vendor.CAST", "Cast", "ic_cast");
        sim.register_handler("vendor.SETTINGS", "Vendor settings", "ic_vendor");
        sim.set_sound_effects(true);
        sim
    }

    pub fn install_authenticator(
        &self,
        account_type: &str,
        package: &str,
        label: Option<&str>,
        icon: Option<&str>,
    ) {
        let mut state = self.lock();
        state.authenticators.push(SimAuthenticator {
            desc: AuthenticatorDesc {
                account_type: account_type.to_string(),
                package: package.to_string(),
            },
            branding: Branding {
                label: label.map(str::to_string),
                icon: icon.map(IconRef::new),
            },
        });
    }

    /// Make branding loads for a package fail, simulating unreadable
    /// resources.
    pub fn break_package(&self, package: &str) {
        self.lock().broken_packages.insert(package.to_string());
    }

    pub fn add_account(&self, account_type: &str, name: &str) {
        self.lock().accounts.push(Account {
            name: name.to_string(),
            account_type: account_type.to_string(),
        });
    }

    pub fn remove_account(&self, account_type: &str, name: &str) {
        self.lock()
            .accounts
            .retain(|a| !(a.account_type == account_type && a.name == name));
    }

    pub fn bond_device(&self, address: &str, name: &str, device_class: DeviceClass) {
        self.lock().bonded.push(BondedDevice {
            address: address.to_string(),
            name: name.to_string(),
            device_class,
        });
    }

    pub fn unbond_device(&self, address: &str) {
        let mut state = self.lock();
        state.bonded.retain(|d| d.address != address);
        state.connected.remove(address);
    }

    pub fn connect_device(&self, address: &str) {
        self.lock().connected.insert(address.to_string());
    }

    pub fn disconnect_device(&self, address: &str) {
        self.lock().connected.remove(address);
    }

    pub fn register_handler(&self, action: &str, label: &str, icon: &str) {
        self.lock().handlers.insert(
            action.to_string(),
            HandlerInfo {
                label: label.to_string(),
                icon: IconRef::new(icon),
            },
        );
    }

    pub fn unregister_handler(&self, action: &str) {
        self.lock().handlers.remove(action);
    }

    pub fn set_developer_mode(&self, enabled: bool) {
        self.lock().developer_mode = enabled;
    }

    pub fn set_sound_effects(&self, enabled: bool) {
        self.lock().sound_effects = enabled;
    }

    pub fn set_ethernet(&self, available: bool) {
        self.lock().ethernet = available;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SimState> {
        // A poisoned sim only happens when a test already panicked.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Platform for SimPlatform {
    fn authenticator_types(&self) -> Vec<AuthenticatorDesc> {
        self.lock().authenticators.iter().map(|a| a.desc.clone()).collect()
    }

    fn load_branding(&self, desc: &AuthenticatorDesc) -> Result<Branding, PlatformError> {
        let state = self.lock();
        if state.broken_packages.contains(&desc.package) {
            return Err(PlatformError::BadResources(desc.package.clone()));
        }
        state
            .authenticators
            .iter()
            .find(|a| a.desc == *desc)
            .map(|a| a.branding.clone())
            .ok_or_else(|| PlatformError::PackageNotFound(desc.package.clone()))
    }

    fn accounts_of_type(&self, account_type: &str) -> Vec<Account> {
        self.lock()
            .accounts
            .iter()
            .filter(|a| a.account_type == account_type)
            .cloned()
            .collect()
    }

    fn bonded_devices(&self) -> Vec<BondedDevice> {
        self.lock().bonded.clone()
    }

    fn connected_addresses(&self) -> HashSet<String> {
        self.lock().connected.clone()
    }

    fn resolve_system_handler(&self, intent: &Intent) -> Option<HandlerInfo> {
        self.lock().handlers.get(&intent.action).cloned()
    }

    fn developer_mode_enabled(&self) -> bool {
        self.lock().developer_mode
    }

    fn sound_effects_enabled(&self) -> bool {
        self.lock().sound_effects
    }

    fn ethernet_available(&self) -> bool {
        self.lock().ethernet
    }
}
