/// Host capabilities the extension runs against: key-value storage and tabs
///
/// The browser bridge implements these over `browser.storage.local` and
/// `browser.tabs`; the in-memory versions back the unit tests.
use crate::error::Result;
use crate::tab_data::{TabInfo, TabQuery};
use serde_json::{Map, Value};

#[cfg(test)]
pub use memory::{MemoryStore, MemoryTabs, StoreWrite};

/// Asynchronous JSON key-value storage (`storage.local`).
#[allow(async_fn_in_trait)]
pub trait KeyValueStore {
    async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>>;

    /// The whole storage area.
    async fn get_all(&self) -> Result<Map<String, Value>>;

    async fn set(&self, items: Map<String, Value>) -> Result<()>;

    async fn remove(&self, keys: &[&str]) -> Result<()>;

    async fn get_value(&self, key: &str) -> Result<Option<Value>> {
        let mut items = self.get(&[key]).await?;
        Ok(items.remove(key))
    }

    async fn set_value(&self, key: &str, value: Value) -> Result<()> {
        let mut items = Map::new();
        items.insert(key.to_string(), value);
        self.set(items).await
    }
}

/// Tab enumeration and creation (`tabs.query` / `tabs.create`).
#[allow(async_fn_in_trait)]
pub trait TabHost {
    async fn query(&self, query: TabQuery) -> Result<Vec<TabInfo>>;

    /// Resolves once the browser acknowledged the new tab, not once it loaded.
    async fn open(&self, url: &str) -> Result<()>;
}

/// In-memory hosts that record what the code under test did.
#[cfg(test)]
mod memory {
    use super::{KeyValueStore, TabHost};
    use crate::error::{Result, SaveTabsError};
    use crate::tab_data::{TabInfo, TabQuery};
    use serde_json::{Map, Value};
    use std::cell::{Cell, RefCell};

    /// A write observed by [`MemoryStore`], in call order.
    #[derive(Debug, Clone, PartialEq)]
    pub enum StoreWrite {
        Set(Vec<String>),
        Remove(Vec<String>),
    }

    /// In-memory storage area.
    #[derive(Debug, Default)]
    pub struct MemoryStore {
        items: RefCell<Map<String, Value>>,
        writes: RefCell<Vec<StoreWrite>>,
        failing: Cell<bool>,
    }

    impl MemoryStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_items(items: Value) -> Self {
            let store = Self::new();
            if let Value::Object(map) = items {
                *store.items.borrow_mut() = map;
            }
            store
        }

        /// Make every following call fail as if the browser rejected it.
        pub fn set_failing(&self, failing: bool) {
            self.failing.set(failing);
        }

        pub fn snapshot(&self) -> Value {
            Value::Object(self.items.borrow().clone())
        }

        pub fn writes(&self) -> Vec<StoreWrite> {
            self.writes.borrow().clone()
        }

        fn check(&self) -> Result<()> {
            if self.failing.get() {
                Err(SaveTabsError::Storage("storage unavailable".to_string()))
            } else {
                Ok(())
            }
        }
    }

    impl KeyValueStore for MemoryStore {
        async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>> {
            self.check()?;
            let items = self.items.borrow();
            Ok(keys
                .iter()
                .filter_map(|key| items.get(*key).map(|value| (key.to_string(), value.clone())))
                .collect())
        }

        async fn get_all(&self) -> Result<Map<String, Value>> {
            self.check()?;
            Ok(self.items.borrow().clone())
        }

        async fn set(&self, items: Map<String, Value>) -> Result<()> {
            self.check()?;
            let mut keys: Vec<String> = items.keys().cloned().collect();
            keys.sort();
            self.items.borrow_mut().extend(items);
            self.writes.borrow_mut().push(StoreWrite::Set(keys));
            Ok(())
        }

        async fn remove(&self, keys: &[&str]) -> Result<()> {
            self.check()?;
            let mut items = self.items.borrow_mut();
            for key in keys {
                items.remove(*key);
            }
            self.writes
                .borrow_mut()
                .push(StoreWrite::Remove(keys.iter().map(|key| key.to_string()).collect()));
            Ok(())
        }
    }

    /// In-memory window of tabs. Opened URLs are appended as new inactive tabs.
    #[derive(Debug, Default)]
    pub struct MemoryTabs {
        tabs: RefCell<Vec<TabInfo>>,
        opened: RefCell<Vec<String>>,
        failing_url: RefCell<Option<String>>,
        failing: Cell<bool>,
    }

    impl MemoryTabs {
        pub fn new(tabs: Vec<TabInfo>) -> Self {
            MemoryTabs {
                tabs: RefCell::new(tabs),
                ..Self::default()
            }
        }

        pub fn opened(&self) -> Vec<String> {
            self.opened.borrow().clone()
        }

        /// Make every following query and open fail.
        pub fn set_failing(&self, failing: bool) {
            self.failing.set(failing);
        }

        /// Make opening `url` fail; other URLs still open.
        pub fn fail_on(&self, url: &str) {
            *self.failing_url.borrow_mut() = Some(url.to_string());
        }

        fn check(&self) -> Result<()> {
            if self.failing.get() {
                Err(SaveTabsError::Tabs("tabs unavailable".to_string()))
            } else {
                Ok(())
            }
        }
    }

    impl TabHost for MemoryTabs {
        async fn query(&self, query: TabQuery) -> Result<Vec<TabInfo>> {
            self.check()?;
            Ok(self
                .tabs
                .borrow()
                .iter()
                .filter(|tab| query.active.is_none_or(|active| tab.active == active))
                .cloned()
                .collect())
        }

        async fn open(&self, url: &str) -> Result<()> {
            self.check()?;
            if self.failing_url.borrow().as_deref() == Some(url) {
                return Err(SaveTabsError::Tabs(format!("cannot open {}", url)));
            }
            self.tabs.borrow_mut().push(TabInfo::new(url, false));
            self.opened.borrow_mut().push(url.to_string());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SaveTabsError;
    use pollster::block_on;
    use serde_json::json;

    #[test]
    fn test_memory_store_get_set_remove() {
        let store = MemoryStore::with_items(json!({ "a": 1, "b": [2] }));

        let items = block_on(store.get(&["a", "missing"])).unwrap();
        assert_eq!(Value::Object(items), json!({ "a": 1 }));

        block_on(store.set_value("c", json!("three"))).unwrap();
        block_on(store.remove(&["a"])).unwrap();

        assert_eq!(store.snapshot(), json!({ "b": [2], "c": "three" }));
        assert_eq!(
            store.writes(),
            vec![
                StoreWrite::Set(vec!["c".to_string()]),
                StoreWrite::Remove(vec!["a".to_string()]),
            ]
        );
    }

    #[test]
    fn test_memory_store_failing() {
        let store = MemoryStore::new();
        store.set_failing(true);

        let result = block_on(store.get_value("a"));
        assert!(matches!(result, Err(SaveTabsError::Storage(_))));
    }

    #[test]
    fn test_memory_tabs_failing() {
        let tabs = MemoryTabs::new(vec![TabInfo::new("https://a.example", false)]);
        tabs.fail_on("https://b.example");

        assert!(block_on(tabs.open("https://c.example")).is_ok());
        assert!(matches!(
            block_on(tabs.open("https://b.example")),
            Err(SaveTabsError::Tabs(_))
        ));

        tabs.set_failing(true);
        assert!(matches!(
            block_on(tabs.query(TabQuery::current_window())),
            Err(SaveTabsError::Tabs(_))
        ));
        assert_eq!(tabs.opened(), vec!["https://c.example"]);
    }

    #[test]
    fn test_memory_tabs_query_active() {
        let tabs = MemoryTabs::new(vec![
            TabInfo::new("https://a.example", false),
            TabInfo::new("https://b.example", false).activated(),
        ]);

        let all = block_on(tabs.query(TabQuery::current_window())).unwrap();
        let active = block_on(tabs.query(TabQuery::active_tab())).unwrap();

        assert_eq!(all.len(), 2);
        assert_eq!(active, vec![TabInfo::new("https://b.example", false).activated()]);
    }
}
