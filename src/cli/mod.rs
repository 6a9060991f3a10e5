//! Terminal front end

pub mod menu;
pub mod terminal;

pub use menu::{Menu, MenuAction};
pub use terminal::{TerminalDependencyPrompt, TerminalReporter};

use crate::downloader::{DownloadOrchestrator, ProgressReporter};
use crate::utils::config::Settings;
use anyhow::Result;
use console::style;
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::error;

/// How the interactive menu ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuExit {
    Quit,
    /// Open the desktop window with the current settings
    LaunchGui(Settings),
}

/// Run the menu loop until the user exits or asks for the GUI.
///
/// Download failures are shown and the menu is offered again.
pub async fn run_menu<R: BufRead, W: Write>(
    menu: &mut Menu<R, W>,
    mut orchestrator: DownloadOrchestrator,
    settings_path: &Path,
    reporter: &dyn ProgressReporter,
) -> Result<MenuExit> {
    menu.show_banner()?;

    loop {
        match menu.next_action(orchestrator.settings())? {
            MenuAction::Download(request) => {
                if let Err(e) = orchestrator.download(&request, reporter).await {
                    error!("Download failed: {:#}", e);
                    menu.say(format!("{}", style(format!("[-] Error: {}", e)).red()))?;
                }
            }
            MenuAction::ConfigureSettings => {
                let settings = menu.read_settings()?;
                match settings.save(settings_path) {
                    Ok(()) => menu.say(format!("{}", style("Settings saved!").green()))?,
                    Err(e) => {
                        menu.say(format!("{}", style(format!("[-] Error: {}", e)).red()))?
                    }
                }
                orchestrator = orchestrator.with_settings(settings);
            }
            MenuAction::LaunchGui => {
                return Ok(MenuExit::LaunchGui(orchestrator.settings().clone()));
            }
            MenuAction::Exit => {
                menu.say(format!("{}", style("Goodbye!").green()))?;
                return Ok(MenuExit::Quit);
            }
            MenuAction::Invalid(_) => {}
        }
    }
}
