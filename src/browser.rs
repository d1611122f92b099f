/// Bridge to the WebExtension APIs via /bridge.js
use crate::error::{self, SaveTabsError};
use crate::host::{KeyValueStore, TabHost};
use crate::tab_data::{TabInfo, TabQuery};
use serde::Serialize;
use serde_json::{Map, Value};
use wasm_bindgen::prelude::*;

// Import JS bridge functions
#[wasm_bindgen(module = "/bridge.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn storageGet(keys: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn storageSet(items: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn storageRemove(keys: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn queryTabs(query: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn createTab(url: &str) -> Result<JsValue, JsValue>;

    fn getMessage(key: &str) -> String;

    fn extensionId() -> String;

    fn openOptionsPage();
}

/// Plain JS objects, not `Map`s, so `storage.local` accepts them.
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, String> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| format!("Failed to serialize: {:?}", e))
}

fn storage_error(e: JsValue) -> SaveTabsError {
    SaveTabsError::Storage(format!("{:?}", e))
}

fn tabs_error(e: JsValue) -> SaveTabsError {
    SaveTabsError::Tabs(format!("{:?}", e))
}

/// `browser.storage.local`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BrowserStorage;

impl BrowserStorage {
    async fn fetch(&self, keys: JsValue) -> error::Result<Map<String, Value>> {
        let items_js = storageGet(keys).await.map_err(storage_error)?;
        parse_items(items_js)
    }
}

/// Items returned by `storage.local.get`; nothing at all reads as empty.
fn parse_items(items_js: JsValue) -> error::Result<Map<String, Value>> {
    if items_js.is_null() || items_js.is_undefined() {
        return Ok(Map::new());
    }
    serde_wasm_bindgen::from_value(items_js)
        .map_err(|e| SaveTabsError::Storage(format!("Failed to parse storage: {:?}", e)))
}

impl KeyValueStore for BrowserStorage {
    async fn get(&self, keys: &[&str]) -> error::Result<Map<String, Value>> {
        self.fetch(to_js(keys).map_err(SaveTabsError::Storage)?).await
    }

    async fn get_all(&self) -> error::Result<Map<String, Value>> {
        self.fetch(JsValue::NULL).await
    }

    async fn set(&self, items: Map<String, Value>) -> error::Result<()> {
        let items_js = to_js(&items).map_err(SaveTabsError::Storage)?;
        storageSet(items_js).await.map_err(storage_error)?;
        Ok(())
    }

    async fn remove(&self, keys: &[&str]) -> error::Result<()> {
        let keys_js = to_js(keys).map_err(SaveTabsError::Storage)?;
        storageRemove(keys_js).await.map_err(storage_error)?;
        Ok(())
    }
}

/// `browser.tabs`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BrowserTabs;

impl TabHost for BrowserTabs {
    async fn query(&self, query: TabQuery) -> error::Result<Vec<TabInfo>> {
        let query_js = to_js(&query).map_err(SaveTabsError::Tabs)?;
        let tabs_js = queryTabs(query_js).await.map_err(tabs_error)?;
        serde_wasm_bindgen::from_value(tabs_js)
            .map_err(|e| SaveTabsError::Tabs(format!("Failed to parse tabs: {:?}", e)))
    }

    async fn open(&self, url: &str) -> error::Result<()> {
        createTab(url).await.map_err(tabs_error)?;
        Ok(())
    }
}

/// Localized message for `key`, or the key itself when there is none.
pub fn message(key: &str) -> String {
    let text = getMessage(key);
    if text.is_empty() { key.to_string() } else { text }
}

/// Stable per-installation identifier (`runtime.id`).
pub fn installation_id() -> String {
    extensionId()
}

pub fn open_options() {
    openOptionsPage();
}

/// Close the popup.
pub fn close_window() {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.close() {
            log::warn!("Failed to close window: {:?}", e);
        }
    }
}
