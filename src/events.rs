//! Trigger events delivered to a screen's single dispatch point.
//!
//! These replace the original's broadcast receivers and listener interfaces:
//! every external cause of a reconciliation pass is one explicit value, and
//! the screen serializes passes so concurrent triggers queue instead of
//! interleaving.

/// One external cause of a reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeEvent {
    /// Screen brought to the foreground (or periodic poll): refresh
    /// everything.
    Resume,
    /// Account registry contents changed.
    AccountsChanged,
    /// Bluetooth bond or connection state changed.
    BluetoothChanged,
    /// Wired/wireless availability changed.
    ConnectivityChanged,
    /// Persisted developer flag changed.
    DeveloperFlagChanged,
    /// Persisted sound setting changed.
    SoundSettingChanged,
}

impl HomeEvent {
    pub fn describe(self) -> &'static str {
        match self {
            HomeEvent::Resume => "resume",
            HomeEvent::AccountsChanged => "accounts changed",
            HomeEvent::BluetoothChanged => "bluetooth changed",
            HomeEvent::ConnectivityChanged => "connectivity changed",
            HomeEvent::DeveloperFlagChanged => "developer flag changed",
            HomeEvent::SoundSettingChanged => "sound setting changed",
        }
    }
}
