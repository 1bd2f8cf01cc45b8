pub mod commands;
pub mod config;
pub mod entry;
pub mod events;
pub mod fixtures;
pub mod menu;
pub mod platform;
pub mod reconcile;
pub mod screen;
pub mod section;
pub mod snapshot;
pub mod tui;
