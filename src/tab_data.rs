/// Data structures exchanged with the browser tabs API
use serde::{Deserialize, Serialize};

/// Information about a browser tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabInfo {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub active: bool,
}

impl TabInfo {
    pub fn new(url: &str, pinned: bool) -> TabInfo {
        TabInfo {
            url: url.to_string(),
            pinned,
            active: false,
        }
    }

    pub fn activated(mut self) -> TabInfo {
        self.active = true;
        self
    }
}

/// Filter handed to `tabs.query()`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_window: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl TabQuery {
    /// Every tab in the current window
    pub fn current_window() -> TabQuery {
        TabQuery {
            current_window: Some(true),
            active: None,
        }
    }

    /// The active tab of the current window
    pub fn active_tab() -> TabQuery {
        TabQuery {
            current_window: Some(true),
            active: Some(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_info_creation() {
        let tab = TabInfo::new("https://google.com", true);

        assert_eq!(tab.url, "https://google.com");
        assert!(tab.pinned);
        assert!(!tab.active);
        assert!(tab.activated().active);
    }

    #[test]
    fn test_tab_info_ignores_extra_fields() {
        let json = r#"{"id": 4, "url": "https://github.com", "title": "GitHub", "pinned": false, "active": true, "index": 2}"#;
        let tab: TabInfo = serde_json::from_str(json).unwrap();

        assert_eq!(tab, TabInfo::new("https://github.com", false).activated());
    }

    #[test]
    fn test_tab_query_serialization() {
        let json = serde_json::to_value(TabQuery::current_window()).unwrap();
        assert_eq!(json, serde_json::json!({ "currentWindow": true }));

        let json = serde_json::to_value(TabQuery::active_tab()).unwrap();
        assert_eq!(json, serde_json::json!({ "currentWindow": true, "active": true }));
    }
}
