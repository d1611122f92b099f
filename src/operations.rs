/// URL list operations: uniqueness, overwrite policy, load diff
use crate::settings::Settings;
use crate::tab_data::TabInfo;
use std::collections::HashSet;

/// Make URLs unique (keep first occurrence, preserve order)
pub fn make_urls_unique(urls: Vec<String>) -> Vec<String> {
    let mut seen_urls = HashSet::new();
    urls.into_iter()
        .filter(|url| seen_urls.insert(url.clone()))
        .collect()
}

/// Whether a save of `count` URLs replaces the stored list instead of appending.
pub fn overwrites(settings: &Settings, count: usize) -> bool {
    match count {
        0 => false,
        1 => settings.single_tab_overwrite,
        _ => settings.multi_tab_overwrite,
    }
}

/// Stored URLs followed by the new ones, without duplicates.
pub fn merge_urls(stored: Vec<String>, new_urls: Vec<String>) -> Vec<String> {
    make_urls_unique(stored.into_iter().chain(new_urls).collect())
}

/// Saved URLs that no open tab currently shows, in saved order.
pub fn urls_to_open<'a>(saved: &'a [String], open_tabs: &[TabInfo]) -> Vec<&'a str> {
    let open_urls: HashSet<&str> = open_tabs.iter().map(|tab| tab.url.as_str()).collect();
    saved
        .iter()
        .map(String::as_str)
        .filter(|url| !open_urls.contains(url))
        .collect()
}
