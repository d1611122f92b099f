/// Decides which open tabs may be persisted
use crate::settings::Settings;
use crate::tab_data::TabInfo;

/// Privileged URLs that `tabs.create()` refuses to open.
pub const NON_SAVEABLE_URLS: [&str; 6] = [
    "about:config",
    "about:addons",
    "about:debugging",
    "about:reader",
    "about:downloads",
    "about:blank",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Protocol {
    Safe,
    Unsaveable,
    Unknown,
}

fn classify(url: &str) -> Protocol {
    // No colon means no scheme at all.
    let scheme = url.split_once(':').map_or("", |(scheme, _)| scheme);
    match scheme {
        "http" | "https" | "ftp" | "about" => Protocol::Safe,
        "chrome" | "javascript" | "data" | "file" | "" => Protocol::Unsaveable,
        _ => Protocol::Unknown,
    }
}

/// Check if a tab can be saved and reopened later.
pub fn is_saveable(tab: &TabInfo, settings: &Settings) -> bool {
    if tab.pinned {
        return false;
    }
    if NON_SAVEABLE_URLS.contains(&tab.url.as_str()) {
        return false;
    }
    match classify(&tab.url) {
        Protocol::Safe => true,
        Protocol::Unsaveable => false,
        Protocol::Unknown => !settings.skip_unknown_protocols,
    }
}

/// URLs of the saveable tabs, in tab order.
pub fn collect_urls(tabs: &[TabInfo], settings: &Settings) -> Vec<String> {
    tabs.iter()
        .filter(|tab| is_saveable(tab, settings))
        .map(|tab| tab.url.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(skip_unknown_protocols: bool) -> Settings {
        Settings {
            skip_unknown_protocols,
            ..Settings::default()
        }
    }

    #[test]
    fn test_pinned_tab_never_saveable() {
        let tab = TabInfo::new("https://example.com", true);
        assert!(!is_saveable(&tab, &settings(true)));
        assert!(!is_saveable(&tab, &settings(false)));
    }

    #[test]
    fn test_safe_protocols() {
        for url in ["http://a.example", "https://a.example", "ftp://a.example", "about:robots"] {
            assert!(is_saveable(&TabInfo::new(url, false), &settings(true)), "{}", url);
        }
    }

    #[test]
    fn test_privileged_urls() {
        for url in NON_SAVEABLE_URLS {
            assert!(!is_saveable(&TabInfo::new(url, false), &settings(false)), "{}", url);
        }
    }

    #[test]
    fn test_unsaveable_protocols() {
        for url in ["chrome://foo", "javascript:void(0)", "data:text/plain,hi", "file:///etc/hosts", "", "no-colon"] {
            assert!(!is_saveable(&TabInfo::new(url, false), &settings(false)), "{:?}", url);
        }
    }

    #[test]
    fn test_unknown_protocol_follows_setting() {
        let tab = TabInfo::new("xyz://foo", false);
        assert!(!is_saveable(&tab, &settings(true)));
        assert!(is_saveable(&tab, &settings(false)));
    }

    #[test]
    fn test_collect_urls() {
        let tabs = vec![
            TabInfo::new("https://a.example", false),
            TabInfo::new("https://pinned.example", true),
            TabInfo::new("about:blank", false),
            TabInfo::new("https://b.example", false),
        ];

        assert_eq!(
            collect_urls(&tabs, &Settings::default()),
            vec!["https://a.example", "https://b.example"]
        );
    }
}
