//! Key handling for the demo TUI.
//!
//! Mutating keys change the simulated platform first, then queue the event
//! the real system would broadcast for that change. The screen itself only
//! ever sees events.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc;

use crate::events::HomeEvent;
use crate::fixtures::SimPlatform;
use crate::platform::{DeviceClass, Platform};
use crate::section::SectionSet;

use super::view;
use super::TuiState;

const DEMO_ACCOUNT_TYPE: &str = "google";
const DEMO_HANDLER_ACTION: &str = "vendor.SETTINGS";

pub enum KeyOutcome {
    Continue,
    Exit,
}

pub fn handle_key(
    key: KeyEvent,
    platform: &Arc<SimPlatform>,
    event_tx: &mpsc::UnboundedSender<HomeEvent>,
    state: &mut TuiState,
    visible: usize,
    sections: &SectionSet,
) -> KeyOutcome {
    let mut queue = |event: HomeEvent| {
        state.status = format!("Simulated: {}", event.describe());
        let _ = event_tx.send(event);
    };

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return KeyOutcome::Exit,
        KeyCode::Up => {
            state.selected = state.selected.saturating_sub(1);
        }
        KeyCode::Down => {
            if state.selected + 1 < visible {
                state.selected += 1;
            }
        }
        KeyCode::Enter => {
            state.status = match view::nth_visible(sections, state.selected) {
                Some(entry) => format!("Would launch {}", entry.intent.action),
                None => "Nothing selected".to_string(),
            };
        }
        KeyCode::Char('a') => {
            let n = platform.accounts_of_type(DEMO_ACCOUNT_TYPE).len();
            platform.add_account(DEMO_ACCOUNT_TYPE, &format!("user{}@example.com", n + 1));
            queue(HomeEvent::AccountsChanged);
        }
        KeyCode::Char('A') => {
            if let Some(account) = platform.accounts_of_type(DEMO_ACCOUNT_TYPE).pop() {
                platform.remove_account(DEMO_ACCOUNT_TYPE, &account.name);
                queue(HomeEvent::AccountsChanged);
            } else {
                state.status = "No account to remove".to_string();
            }
        }
        KeyCode::Char('b') => {
            let n = platform.bonded_devices().len();
            platform.bond_device(
                &format!("CC:00:00:00:00:{:02X}", n),
                &format!("Headset {}", n + 1),
                DeviceClass::Headset,
            );
            queue(HomeEvent::BluetoothChanged);
        }
        KeyCode::Char('B') => {
            if let Some(device) = platform.bonded_devices().pop() {
                platform.unbond_device(&device.address);
                queue(HomeEvent::BluetoothChanged);
            } else {
                state.status = "No device to unbond".to_string();
            }
        }
        KeyCode::Char('c') => {
            if let Some(device) = platform.bonded_devices().first() {
                if platform.connected_addresses().contains(&device.address) {
                    platform.disconnect_device(&device.address);
                } else {
                    platform.connect_device(&device.address);
                }
                queue(HomeEvent::BluetoothChanged);
            } else {
                state.status = "No device to connect".to_string();
            }
        }
        KeyCode::Char('d') => {
            platform.set_developer_mode(!platform.developer_mode_enabled());
            queue(HomeEvent::DeveloperFlagChanged);
        }
        KeyCode::Char('s') => {
            platform.set_sound_effects(!platform.sound_effects_enabled());
            queue(HomeEvent::SoundSettingChanged);
        }
        KeyCode::Char('e') => {
            platform.set_ethernet(!platform.ethernet_available());
            queue(HomeEvent::ConnectivityChanged);
        }
        KeyCode::Char('h') => {
            use crate::entry::Intent;
            let probe = Intent::new(DEMO_HANDLER_ACTION);
            if platform.resolve_system_handler(&probe).is_some() {
                platform.unregister_handler(DEMO_HANDLER_ACTION);
            } else {
                platform.register_handler(DEMO_HANDLER_ACTION, "Vendor settings", "ic_vendor");
            }
            queue(HomeEvent::Resume);
        }
        KeyCode::Char('r') => {
            queue(HomeEvent::Resume);
        }
        _ => {}
    }

    KeyOutcome::Continue
}
