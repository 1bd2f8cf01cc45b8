//! Collaborator boundary for everything the home screen queries.
//!
//! The reconciliation core treats the account registry, the accessory
//! registry, handler resolution and the persisted flags as black boxes
//! behind this trait. All calls are synchronous and assumed low-latency;
//! a failing per-item lookup degrades that one entry only.

use std::collections::HashSet;

use thiserror::Error;

use crate::entry::{IconRef, Intent};

/// Platform lookup errors.
#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("no package installed for {0}")]
    PackageNotFound(String),

    #[error("unreadable resources in package {0}")]
    BadResources(String),
}

/// One installed account authenticator, by type and owning package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatorDesc {
    pub account_type: String,
    pub package: String,
}

/// User-facing label and icon an authenticator exposes, if any.
///
/// Authenticators exposing neither are not intended to be user-facing and
/// are excluded from the "add account" flow.
#[derive(Debug, Clone, Default)]
pub struct Branding {
    pub label: Option<String>,
    pub icon: Option<IconRef>,
}

/// One installed account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub name: String,
    pub account_type: String,
}

/// One paired (bonded) accessory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BondedDevice {
    pub address: String,
    pub name: String,
    pub device_class: DeviceClass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Remote,
    Gamepad,
    Headset,
    Other,
}

impl DeviceClass {
    /// Icon resource name for a device of this class.
    pub fn icon(self) -> IconRef {
        match self {
            DeviceClass::Remote => IconRef::new("ic_accessory_remote"),
            DeviceClass::Gamepad => IconRef::new("ic_accessory_gamepad"),
            DeviceClass::Headset => IconRef::new("ic_accessory_headset"),
            DeviceClass::Other => IconRef::new("ic_settings_bluetooth"),
        }
    }
}

/// The privileged handler an intent resolves to, when one exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerInfo {
    pub label: String,
    pub icon: IconRef,
}

/// Everything the home screen reads from the platform.
///
/// Implemented by [`crate::fixtures::SimPlatform`] for the demo TUI, the CLI
/// and tests; a real port would back this with the native registries.
pub trait Platform {
    /// Installed account authenticators.
    fn authenticator_types(&self) -> Vec<AuthenticatorDesc>;

    /// Label/icon for one authenticator. Fails per item when the owning
    /// package is missing or its resources are unreadable.
    fn load_branding(&self, desc: &AuthenticatorDesc) -> Result<Branding, PlatformError>;

    /// Installed accounts of one authenticator type.
    fn accounts_of_type(&self, account_type: &str) -> Vec<Account>;

    /// Currently paired accessories.
    fn bonded_devices(&self) -> Vec<BondedDevice>;

    /// Addresses of accessories with a live connection.
    fn connected_addresses(&self) -> HashSet<String>;

    /// The privileged system handler for an intent, if one exists.
    fn resolve_system_handler(&self, intent: &Intent) -> Option<HandlerInfo>;

    /// Persisted developer-mode flag.
    fn developer_mode_enabled(&self) -> bool;

    /// Persisted sound-effects setting.
    fn sound_effects_enabled(&self) -> bool;

    /// Whether wired networking is available (flips the network entry title).
    fn ethernet_available(&self) -> bool;
}
