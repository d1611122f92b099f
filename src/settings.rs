/// Settings document: defaults, default-filling, persistence and tab group editing
use crate::error::{self, GroupError};
use crate::host::KeyValueStore;
use crate::keys::SETTINGS_KEY;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_TAB_GROUP: &str = "Default";

const TAB_GROUPS: &str = "tabGroups";
const TAB_GROUPS_DEFAULT: &str = "tabGroupsDefault";
const SELECTED_TAB_GROUP: &str = "selectedTabGroup";

/// The persisted `settings` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub single_tab_overwrite: bool,
    pub multi_tab_overwrite: bool,
    pub skip_unknown_protocols: bool,
    pub tab_groups: Vec<String>,
    pub tab_groups_default: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_tab_group: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            single_tab_overwrite: true,
            multi_tab_overwrite: true,
            skip_unknown_protocols: true,
            tab_groups: vec![DEFAULT_TAB_GROUP.to_string()],
            tab_groups_default: DEFAULT_TAB_GROUP.to_string(),
            selected_tab_group: None,
        }
    }
}

impl Settings {
    /// Build settings from whatever is stored under the settings key.
    ///
    /// Missing keys are filled from the defaults, keys already present are
    /// kept as they are. A key holding the wrong kind of value counts as
    /// missing, as does anything under the settings key that is not an object.
    pub fn from_stored(stored: Option<Value>) -> serde_json::Result<Settings> {
        let mut document = match stored {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };
        fill_defaults(&mut document);
        serde_json::from_value(Value::Object(document))
    }

    /// The explicitly selected group, if it names something.
    pub fn selected(&self) -> Option<&str> {
        self.selected_tab_group
            .as_deref()
            .filter(|group| !group.is_empty())
    }

    /// The selected group, falling back to the first configured group.
    pub fn selected_or_first(&self) -> Option<&str> {
        self.selected()
            .or_else(|| self.tab_groups.first().map(String::as_str))
    }

    pub fn with_selected_tab_group(mut self, group: &str) -> Settings {
        self.selected_tab_group = Some(group.to_string());
        self
    }

    /// Append a new group. The name is trimmed and must be unique.
    pub fn with_tab_group_added(mut self, name: &str) -> Result<Settings, GroupError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GroupError::EmptyName);
        }
        if self.tab_groups.iter().any(|group| group == name) {
            return Err(GroupError::AlreadyExists(name.to_string()));
        }
        self.tab_groups.push(name.to_string());
        Ok(self)
    }

    /// Drop a group. Neither the last group nor the default group can go.
    pub fn with_tab_group_removed(mut self, name: &str) -> Result<Settings, GroupError> {
        if self.tab_groups.len() <= 1 {
            return Err(GroupError::LastGroup);
        }
        if self.tab_groups_default == name {
            return Err(GroupError::DefaultGroup(name.to_string()));
        }
        if !self.tab_groups.iter().any(|group| group == name) {
            return Err(GroupError::UnknownGroup(name.to_string()));
        }
        self.tab_groups.retain(|group| group != name);
        if self.selected() == Some(name) {
            self.selected_tab_group = None;
        }
        Ok(self)
    }

    pub fn with_default_tab_group(mut self, name: &str) -> Result<Settings, GroupError> {
        if !self.tab_groups.iter().any(|group| group == name) {
            return Err(GroupError::UnknownGroup(name.to_string()));
        }
        self.tab_groups_default = name.to_string();
        Ok(self)
    }
}

/// Insert every default key the document lacks (union merge).
///
/// A missing `tabGroupsDefault` becomes the first stored group so the default
/// is always one of `tabGroups`.
pub fn fill_defaults(document: &mut Map<String, Value>) {
    drop_mistyped(document);

    let first_group = document
        .get(TAB_GROUPS)
        .and_then(Value::as_array)
        .and_then(|groups| groups.first())
        .cloned();
    if let Some(first_group) = first_group {
        document
            .entry(TAB_GROUPS_DEFAULT)
            .or_insert(first_group);
    }

    if let Ok(Value::Object(defaults)) = serde_json::to_value(Settings::default()) {
        for (key, value) in defaults {
            document.entry(key).or_insert(value);
        }
    }
}

/// Remove keys whose value cannot be read as the declared field type, and an
/// empty group list.
fn drop_mistyped(document: &mut Map<String, Value>) {
    document.retain(|key, value| {
        let fits = match key.as_str() {
            "singleTabOverwrite" | "multiTabOverwrite" | "skipUnknownProtocols" => value.is_boolean(),
            TAB_GROUPS => value
                .as_array()
                .is_some_and(|groups| !groups.is_empty() && groups.iter().all(Value::is_string)),
            TAB_GROUPS_DEFAULT => value.is_string(),
            SELECTED_TAB_GROUP => value.is_string() || value.is_null(),
            _ => true,
        };
        if !fits {
            warn!("Ignoring stored setting {}: {}", key, value);
        }
        fits
    });
}

/// Read the settings document, default-filling whatever is missing.
pub async fn load<S: KeyValueStore>(store: &S) -> error::Result<Settings> {
    let stored = store.get_value(SETTINGS_KEY).await?;
    Ok(Settings::from_stored(stored)?)
}

/// Replace the stored settings document.
///
/// Only the declared fields are written, so anything a UI binding attached
/// to the value never reaches storage.
pub async fn save<S: KeyValueStore>(store: &S, settings: &Settings) -> error::Result<()> {
    store
        .set_value(SETTINGS_KEY, serde_json::to_value(settings)?)
        .await?;
    debug!("Settings saved");
    Ok(())
}
