/// Saving, restoring and deleting the tab list of the active tab group
use crate::error::{GroupError, Result, SaveTabsError};
use crate::host::{KeyValueStore, TabHost};
use crate::keys::storage_key_for;
use crate::migration::migrate_if_needed;
use crate::operations::{make_urls_unique, merge_urls, overwrites, urls_to_open};
use crate::saveable::collect_urls;
use crate::settings::{self, Settings};
use crate::tab_data::TabQuery;
use futures_util::future::try_join_all;
use log::{debug, info};
use serde_json::Value;

/// Which tabs a save picks up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveScope {
    AllTabs,
    CurrentTab,
}

impl SaveScope {
    fn query(self) -> TabQuery {
        match self {
            SaveScope::AllTabs => TabQuery::current_window(),
            SaveScope::CurrentTab => TabQuery::active_tab(),
        }
    }
}

/// Stored value as a URL list; `None` when absent or not a list of strings.
fn url_list(value: Option<Value>) -> Option<Vec<String>> {
    value.and_then(|value| serde_json::from_value(value).ok())
}

/// Tab persistence over a storage area and a tab host.
///
/// Settings are read fresh at the start of every operation and passed along
/// as a value; nothing is cached between calls. Each operation is a plain
/// read-modify-write with no guard against overlapping calls.
pub struct SaveTabs<S, T> {
    store: S,
    tabs: T,
    installation_id: String,
}

impl<S: KeyValueStore, T: TabHost> SaveTabs<S, T> {
    pub fn new(store: S, tabs: T, installation_id: impl Into<String>) -> Self {
        SaveTabs {
            store,
            tabs,
            installation_id: installation_id.into(),
        }
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[cfg(test)]
    pub fn tabs(&self) -> &T {
        &self.tabs
    }

    /// Save all tabs in the current window.
    pub async fn save_all_tabs(&self) -> Result<Vec<String>> {
        info!("Saving tabs");
        self.save_tabs(SaveScope::AllTabs).await
    }

    /// Save the currently active tab.
    pub async fn save_current_tab(&self) -> Result<Vec<String>> {
        info!("Saving current tab");
        self.save_tabs(SaveScope::CurrentTab).await
    }

    /// Save the saveable tabs in `scope` to the active group and return the
    /// list as stored.
    pub async fn save_tabs(&self, scope: SaveScope) -> Result<Vec<String>> {
        let settings = self.prepare().await?;
        let tabs = self.tabs.query(scope.query()).await?;
        let candidates = collect_urls(&tabs, &settings);
        if candidates.is_empty() {
            return Err(SaveTabsError::NoTabsSelected);
        }

        let key = storage_key_for(&settings);
        let urls = if overwrites(&settings, candidates.len()) {
            make_urls_unique(candidates)
        } else {
            let stored = url_list(self.store.get_value(&key).await?).unwrap_or_default();
            merge_urls(stored, candidates)
        };

        self.store
            .set_value(&key, Value::from(urls.clone()))
            .await?;
        info!("Tabs saved: {} under {}", urls.len(), key);
        Ok(urls)
    }

    /// Open every saved URL of the active group that is not open already.
    ///
    /// Returns the URLs for which a tab was requested. Completes once the
    /// browser acknowledged all requests, not when the pages finished loading.
    pub async fn load_tabs(&self) -> Result<Vec<String>> {
        info!("Loading tabs");
        let settings = self.prepare().await?;
        let key = storage_key_for(&settings);
        let saved =
            url_list(self.store.get_value(&key).await?).ok_or(SaveTabsError::NoSavedTabs)?;

        let open_tabs = self.tabs.query(TabQuery::current_window()).await?;
        let missing = urls_to_open(&saved, &open_tabs);
        try_join_all(missing.iter().map(|url| self.tabs.open(url))).await?;

        info!("Tabs restored: {} of {}", missing.len(), saved.len());
        Ok(missing.into_iter().map(str::to_string).collect())
    }

    /// Forget the saved tabs of the active group.
    pub async fn delete_tabs(&self) -> Result<()> {
        info!("Deleting tabs");
        let settings = self.prepare().await?;
        let key = storage_key_for(&settings);
        self.store.remove(&[key.as_str()]).await?;
        info!("Tabs deleted: {}", key);
        Ok(())
    }

    pub async fn get_tab_groups(&self) -> Result<Vec<String>> {
        Ok(settings::load(&self.store).await?.tab_groups)
    }

    /// The selected group, or the first configured one if none is selected.
    pub async fn get_selected_tab_group(&self) -> Result<Option<String>> {
        let settings = settings::load(&self.store).await?;
        Ok(settings.selected_or_first().map(str::to_string))
    }

    pub async fn set_selected_tab_group(&self, group: &str) -> Result<Settings> {
        let settings = settings::load(&self.store).await?;
        if !settings.tab_groups.iter().any(|name| name == group) {
            return Err(GroupError::UnknownGroup(group.to_string()).into());
        }
        let settings = settings.with_selected_tab_group(group);
        settings::save(&self.store, &settings).await?;
        debug!("Selected tab group: {}", group);
        Ok(settings)
    }

    /// Migrate storage if it predates tab groups, then read the settings.
    async fn prepare(&self) -> Result<Settings> {
        migrate_if_needed(&self.store, &self.installation_id).await?;
        settings::load(&self.store).await
    }
}
