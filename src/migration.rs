/// Storage format migrations
///
/// Version 1 kept a single ungrouped URL list under `savedTabs`. Version 2
/// keeps one list per tab group under `savedTabs-<group>`. A missing
/// `storageVersion` marker means version 1.
///
/// Each step rewrites the full storage document in memory. The result is then
/// written back in one `set` (which carries the new version marker) followed
/// by a `remove` of the legacy key. Storage offers no transaction across the
/// two calls.
use crate::error::Result;
use crate::host::KeyValueStore;
use crate::keys::{
    CURRENT_STORAGE_VERSION, SAVED_TABS_KEY, SETTINGS_KEY, STORAGE_VERSION_KEY, group_key,
};
use crate::settings::DEFAULT_TAB_GROUP;
use log::{debug, info, warn};
use serde_json::{Map, Value};

const LEGACY_STORAGE_VERSION: u64 = 1;
const MIGRATION_GROUP_PREFIX: &str = "Migration-";

/// One upgrade of the storage document from `from` to `to`.
pub struct MigrationStep {
    pub from: u64,
    pub to: u64,
    pub description: &'static str,
    apply: fn(&mut Map<String, Value>, &str),
}

impl MigrationStep {
    /// Apply the step; `installation_id` seeds names that must not collide.
    pub fn apply(&self, document: &mut Map<String, Value>, installation_id: &str) {
        (self.apply)(document, installation_id);
    }
}

/// All steps, oldest first.
pub const MIGRATIONS: &[MigrationStep] = &[MigrationStep {
    from: 1,
    to: 2,
    description: "move ungrouped saved tabs into the first tab group",
    apply: group_legacy_saved_tabs,
}];

/// Steps still needed to bring a document at `version` up to date.
pub fn pending_steps(version: u64) -> impl Iterator<Item = &'static MigrationStep> {
    MIGRATIONS
        .iter()
        .filter(move |step| step.from >= version && step.to <= CURRENT_STORAGE_VERSION)
}

/// Storage version recorded in the marker value.
pub fn stored_version(marker: Option<&Value>) -> u64 {
    marker
        .and_then(Value::as_u64)
        .unwrap_or(LEGACY_STORAGE_VERSION)
}

/// Run every pending step on a full storage document and stamp the version.
pub fn migrate_document(
    mut document: Map<String, Value>,
    installation_id: &str,
) -> Map<String, Value> {
    let version = stored_version(document.get(STORAGE_VERSION_KEY));
    for step in pending_steps(version) {
        debug!(
            "Storage migration {} -> {}: {}",
            step.from, step.to, step.description
        );
        step.apply(&mut document, installation_id);
    }
    document.insert(
        STORAGE_VERSION_KEY.to_string(),
        Value::from(CURRENT_STORAGE_VERSION),
    );
    document
}

/// Bring storage up to the current version. Returns whether anything ran.
pub async fn migrate_if_needed<S: KeyValueStore>(store: &S, installation_id: &str) -> Result<bool> {
    let marker = store.get_value(STORAGE_VERSION_KEY).await?;
    let version = stored_version(marker.as_ref());
    if version == CURRENT_STORAGE_VERSION {
        return Ok(false);
    }
    if version > CURRENT_STORAGE_VERSION {
        warn!(
            "Storage version {} is newer than supported version {}",
            version, CURRENT_STORAGE_VERSION
        );
        return Ok(false);
    }

    info!("Migrating storage from version {}", version);
    let document = migrate_document(store.get_all().await?, installation_id);
    store.set(document).await?;
    store.remove(&[SAVED_TABS_KEY]).await?;
    info!("Migration completed");
    Ok(true)
}

fn group_legacy_saved_tabs(document: &mut Map<String, Value>, installation_id: &str) {
    let saved_tabs = match document.remove(SAVED_TABS_KEY) {
        Some(Value::Null) | None => return,
        Some(saved_tabs) => saved_tabs,
    };

    let settings = document
        .entry(SETTINGS_KEY)
        .or_insert_with(|| Value::Object(Map::new()));
    if !settings.is_object() {
        *settings = Value::Object(Map::new());
    }
    let Some(settings) = settings.as_object_mut() else {
        return;
    };

    let first_group = settings
        .get("tabGroups")
        .and_then(Value::as_array)
        .and_then(|groups| groups.first())
        .and_then(Value::as_str)
        .map(str::to_string);
    let mut group = match first_group {
        Some(group) => group,
        None => {
            settings.insert("tabGroups".to_string(), Value::from(vec![DEFAULT_TAB_GROUP]));
            DEFAULT_TAB_GROUP.to_string()
        }
    };

    if document.contains_key(&group_key(&group)) {
        group = format!("{}{}", MIGRATION_GROUP_PREFIX, installation_id);
        if let Some(groups) = document
            .get_mut(SETTINGS_KEY)
            .and_then(|settings| settings.get_mut("tabGroups"))
            .and_then(Value::as_array_mut)
        {
            groups.push(Value::from(group.clone()));
        }
    }

    document.insert(group_key(&group), saved_tabs);
}
