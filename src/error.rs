/// Error types for Save Tabs
use thiserror::Error;

/// Errors raised by the save/load/delete operations and the options page.
#[derive(Debug, Error)]
pub enum SaveTabsError {
    /// A save found no tab worth persisting.
    #[error("No tabs selected for saving")]
    NoTabsSelected,

    /// Nothing (or something that is not a URL list) is stored for the group.
    #[error("No saved tabs")]
    NoSavedTabs,

    /// `browser.storage.local` rejected a get/set/remove.
    #[error("Storage error: {0}")]
    Storage(String),

    /// `browser.tabs` rejected a query or create.
    #[error("Tabs error: {0}")]
    Tabs(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Group(#[from] GroupError),
}

/// Validation failures from editing the tab group list.
///
/// These come straight from user input on the options page and are shown
/// inline instead of only being logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupError {
    #[error("Enter a name for the tab group")]
    EmptyName,

    #[error("Group already exists: {0}")]
    AlreadyExists(String),

    #[error("You cannot remove the last tab group")]
    LastGroup,

    #[error("You cannot remove the default tab group: {0}")]
    DefaultGroup(String),

    #[error("Unknown tab group: {0}")]
    UnknownGroup(String),
}

impl GroupError {
    /// i18n message key for the inline error on the options page.
    pub fn message_key(&self) -> &'static str {
        match self {
            GroupError::EmptyName => "enterTabGroupName",
            GroupError::AlreadyExists(_) => "tabGroupExists",
            GroupError::LastGroup => "cannotRemoveLastTabGroup",
            GroupError::DefaultGroup(_) => "cannotRemoveDefaultTabGroup",
            GroupError::UnknownGroup(_) => "noGroupSelected",
        }
    }
}

impl SaveTabsError {
    /// i18n message key for showing the error on the options page.
    pub fn message_key(&self) -> &'static str {
        match self {
            SaveTabsError::Group(e) => e.message_key(),
            _ => "settingsNotStored",
        }
    }
}

pub type Result<T> = std::result::Result<T, SaveTabsError>;
