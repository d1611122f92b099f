/// Options page operations
///
/// Storage failures in `restore` and `update` are logged and swallowed:
/// `restore` yields `None` and `update` reports `false`. Tab group edits
/// return both validation and storage errors so the page can show them inline
/// instead of a group list that was never stored.
use crate::error;
use crate::host::KeyValueStore;
use crate::keys::group_key;
use crate::settings::{self, Settings};
use log::{debug, error};

/// The yes/no settings shown as radio pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    SingleTabOverwrite,
    MultiTabOverwrite,
    SkipUnknownProtocols,
}

impl Toggle {
    pub fn get(self, settings: &Settings) -> bool {
        match self {
            Toggle::SingleTabOverwrite => settings.single_tab_overwrite,
            Toggle::MultiTabOverwrite => settings.multi_tab_overwrite,
            Toggle::SkipUnknownProtocols => settings.skip_unknown_protocols,
        }
    }

    pub fn apply(self, mut settings: Settings, value: bool) -> Settings {
        match self {
            Toggle::SingleTabOverwrite => settings.single_tab_overwrite = value,
            Toggle::MultiTabOverwrite => settings.multi_tab_overwrite = value,
            Toggle::SkipUnknownProtocols => settings.skip_unknown_protocols = value,
        }
        settings
    }
}

/// Edits to the tab group list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupAction {
    Add(String),
    Remove(String),
    SetDefault(String),
}

pub struct Options<S> {
    store: S,
}

impl<S: KeyValueStore> Options<S> {
    pub fn new(store: S) -> Self {
        Options { store }
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load the settings to show on the page.
    pub async fn restore(&self) -> Option<Settings> {
        match settings::load(&self.store).await {
            Ok(settings) => Some(settings),
            Err(e) => {
                error!("Error loading settings: {}", e);
                None
            }
        }
    }

    /// Store the settings as edited on the page.
    pub async fn update(&self, settings: &Settings) -> bool {
        self.persist(settings).await.is_ok()
    }

    pub async fn apply(&self, settings: Settings, action: GroupAction) -> error::Result<Settings> {
        match action {
            GroupAction::Add(name) => self.add_tab_group(settings, &name).await,
            GroupAction::Remove(name) => self.remove_tab_group(settings, &name).await,
            GroupAction::SetDefault(name) => self.set_default_tab_group(settings, &name).await,
        }
    }

    pub async fn add_tab_group(&self, settings: Settings, name: &str) -> error::Result<Settings> {
        let settings = settings.with_tab_group_added(name)?;
        self.persist(&settings).await?;
        Ok(settings)
    }

    /// Remove a group together with the tabs saved for it.
    pub async fn remove_tab_group(&self, settings: Settings, name: &str) -> error::Result<Settings> {
        let settings = settings.with_tab_group_removed(name)?;
        self.persist(&settings).await?;
        self.remove_stored_tab_group_data(name).await;
        Ok(settings)
    }

    pub async fn set_default_tab_group(&self, settings: Settings, name: &str) -> error::Result<Settings> {
        let settings = settings.with_default_tab_group(name)?;
        self.persist(&settings).await?;
        Ok(settings)
    }

    async fn persist(&self, settings: &Settings) -> error::Result<()> {
        settings::save(&self.store, settings)
            .await
            .inspect_err(|e| error!("Error storing settings: {}", e))
    }

    async fn remove_stored_tab_group_data(&self, group: &str) {
        if group.is_empty() {
            return;
        }
        let key = group_key(group);
        match self.store.remove(&[key.as_str()]).await {
            Ok(()) => debug!("Removed saved tabs of group {}", group),
            Err(e) => error!("Error removing saved tabs of group {}: {}", group, e),
        }
    }
}
