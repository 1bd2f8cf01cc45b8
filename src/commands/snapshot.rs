//! `snapshot` subcommand: run one resume pass against the simulated
//! platform and print the resulting sections.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::events::HomeEvent;
use crate::fixtures::SimPlatform;
use crate::screen::{HomeScreen, ScreenKind};
use crate::section::SectionSet;

pub fn format_sections(sections: &SectionSet) -> String {
    let mut output = String::new();
    for section in sections.iter() {
        output.push_str(&format!("\n{} [{}]\n", section.title(), section.id()));
        output.push_str(&format!("{}\n", "═".repeat(40)));
        let mut shown = 0;
        for entry in section.entries() {
            if !entry.visible {
                continue;
            }
            shown += 1;
            match &entry.description {
                Some(desc) => output.push_str(&format!("  {}  ({})\n", entry.title, desc)),
                None => output.push_str(&format!("  {}\n", entry.title)),
            }
        }
        if shown == 0 {
            output.push_str("  (empty)\n");
        }
    }
    output
}

pub fn run(kind: ScreenKind, config: Config) -> Result<()> {
    let platform = Arc::new(SimPlatform::demo());
    let screen =
        HomeScreen::new(kind, platform, config).context("Failed to load the menu definition")?;
    screen.dispatch(HomeEvent::Resume);

    println!("Home screen: {}", screen.kind().label());
    print!("{}", format_sections(&screen.sections()));
    Ok(())
}
