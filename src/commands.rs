/// Popup commands and their dispatch onto the engine
use crate::engine::SaveTabs;
use crate::error::Result;
use crate::host::{KeyValueStore, TabHost};
use log::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupCommand {
    SaveCurrentTab,
    SaveAllTabs,
    LoadTabs,
    DeleteTabs,
}

impl PopupCommand {
    /// Display order in the popup.
    pub const ALL: [PopupCommand; 4] = [
        PopupCommand::SaveCurrentTab,
        PopupCommand::SaveAllTabs,
        PopupCommand::LoadTabs,
        PopupCommand::DeleteTabs,
    ];

    /// Element id and i18n key of the popup entry.
    pub fn id(self) -> &'static str {
        match self {
            PopupCommand::SaveCurrentTab => "saveCurrentTab",
            PopupCommand::SaveAllTabs => "saveAllTabs",
            PopupCommand::LoadTabs => "loadSavedTabs",
            PopupCommand::DeleteTabs => "deleteSavedTabs",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            PopupCommand::SaveCurrentTab => "save-current.svg",
            PopupCommand::SaveAllTabs => "save-all.svg",
            PopupCommand::LoadTabs => "load.svg",
            PopupCommand::DeleteTabs => "delete.svg",
        }
    }

    pub async fn run<S: KeyValueStore, T: TabHost>(self, engine: &SaveTabs<S, T>) -> Result<()> {
        match self {
            PopupCommand::SaveCurrentTab => engine.save_current_tab().await.map(drop),
            PopupCommand::SaveAllTabs => engine.save_all_tabs().await.map(drop),
            PopupCommand::LoadTabs => engine.load_tabs().await.map(drop),
            PopupCommand::DeleteTabs => engine.delete_tabs().await,
        }
    }
}

/// Run a command and log the outcome. Failures stop here.
pub async fn dispatch<S: KeyValueStore, T: TabHost>(command: PopupCommand, engine: &SaveTabs<S, T>) -> bool {
    match command.run(engine).await {
        Ok(()) => {
            info!("{:?} done", command);
            true
        }
        Err(e) => {
            error!("Error in SaveTabs: {}", e);
            false
        }
    }
}
