//! Interactive demo surface.
//!
//! Renders the home screen sections against the simulated platform and maps
//! keys to platform mutations plus the trigger event a real system would
//! broadcast for them. Events (key-triggered and the periodic resume tick)
//! funnel through one channel into the screen's dispatch point, so passes
//! stay serialized.

mod keys;
mod view;

pub use keys::{handle_key, KeyOutcome};

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use crate::config::Config;
use crate::events::HomeEvent;
use crate::fixtures::SimPlatform;
use crate::screen::{HomeScreen, ScreenKind};

/// Mutable bits of TUI state outside the screen itself.
pub struct TuiState {
    pub selected: usize,
    pub status: String,
}

impl TuiState {
    fn new() -> Self {
        TuiState {
            selected: 0,
            status: "Keys: ↑↓ move | enter launch | a/A accounts | b/B bond | c connect | \
                     d dev | s sound | e ethernet | h handler | r resume | q quit"
                .to_string(),
        }
    }

    /// Keep the selection on an existing row after a pass shrinks the
    /// visible entry count.
    fn clamp_selection(&mut self, visible: usize) {
        if self.selected >= visible {
            self.selected = visible.saturating_sub(1);
        }
    }
}

/// Main entry point for TUI mode.
pub async fn run(config: Config, kind: ScreenKind) -> anyhow::Result<()> {
    let platform = Arc::new(SimPlatform::demo());
    let screen = HomeScreen::new(kind, Arc::clone(&platform), config.clone())?;

    // Periodic resume tick, the stand-in for the original's onResume plus
    // polling broadcasts.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<HomeEvent>();
    let tick_tx = event_tx.clone();
    let interval = u64::from(config.refresh_interval.max(1));
    tokio::spawn(async move {
        let mut timer = tokio::time::interval(Duration::from_secs(interval));
        timer.tick().await; // First tick completes immediately
        loop {
            timer.tick().await;
            if tick_tx.send(HomeEvent::Resume).is_err() {
                break;
            }
        }
    });

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    screen.dispatch(HomeEvent::Resume);
    let mut state = TuiState::new();

    loop {
        // Drain queued trigger events; the single consumer is what keeps
        // passes serialized rather than dropped.
        while let Ok(home_event) = event_rx.try_recv() {
            screen.dispatch(home_event);
        }

        let sections = screen.sections();
        let visible = view::visible_len(&sections);
        state.clamp_selection(visible);
        terminal.draw(|f| view::render(f, &sections, screen.kind(), &state))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match handle_key(key, &platform, &event_tx, &mut state, visible, &sections) {
                    KeyOutcome::Exit => break,
                    KeyOutcome::Continue => {}
                }
            }
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_selection_after_shrink() {
        let mut state = TuiState::new();
        state.selected = 5;
        state.clamp_selection(3);
        assert_eq!(state.selected, 2);
    }

    #[test]
    fn test_clamp_selection_handles_empty_list() {
        let mut state = TuiState::new();
        state.selected = 1;
        state.clamp_selection(0);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_clamp_selection_leaves_valid_selection() {
        let mut state = TuiState::new();
        state.selected = 1;
        state.clamp_selection(3);
        assert_eq!(state.selected, 1);
    }
}
