/// Storage keys and the tab group key resolver
use crate::settings::Settings;

/// Saved URL list; ungrouped before storage version 2, prefix of group keys after.
pub const SAVED_TABS_KEY: &str = "savedTabs";
pub const SETTINGS_KEY: &str = "settings";
pub const STORAGE_VERSION_KEY: &str = "storageVersion";
pub const CURRENT_STORAGE_VERSION: u64 = 2;

/// Key holding the saved URLs of one tab group.
pub fn group_key(group: &str) -> String {
    format!("{}-{}", SAVED_TABS_KEY, group)
}

/// Key of the saved URL list the current settings point at.
///
/// The selected group wins, then the first configured group. With neither
/// (pre-migration or damaged settings) the bare legacy key is used.
pub fn storage_key_for(settings: &Settings) -> String {
    settings
        .selected_or_first()
        .map(group_key)
        .unwrap_or_else(|| SAVED_TABS_KEY.to_string())
}
