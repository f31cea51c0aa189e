use leptos::prelude::Effect;
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

use crate::layout::tabs::tab_label_for_key;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub key: String,
    pub title: String,
}

/// Open tabs in strip order plus the active key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabList {
    tabs: Vec<Tab>,
    active: Option<String>,
}

impl TabList {
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn is_active(&self, key: &str) -> bool {
        self.active() == Some(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.tabs.iter().any(|t| t.key == key)
    }

    /// Open `key` (or focus it when already open). Returns true if a tab was added.
    pub fn open(&mut self, key: &str, title: &str) -> bool {
        let added = !self.contains(key);
        if added {
            self.tabs.push(Tab {
                key: key.to_string(),
                title: title.to_string(),
            });
        }
        self.active = Some(key.to_string());
        added
    }

    pub fn activate(&mut self, key: &str) -> bool {
        if !self.contains(key) {
            return false;
        }
        self.active = Some(key.to_string());
        true
    }

    /// Closing the active tab focuses the last remaining one.
    pub fn close(&mut self, key: &str) {
        self.tabs.retain(|t| t.key != key);
        if self.is_active(key) {
            self.active = self.tabs.last().map(|t| t.key.clone());
        }
    }

    pub fn set_title(&mut self, key: &str, title: &str) -> bool {
        match self.tabs.iter_mut().find(|t| t.key == key) {
            Some(tab) if tab.title != title => {
                tab.title = title.to_string();
                true
            }
            _ => false,
        }
    }

    pub fn active_title(&self) -> Option<&str> {
        let active = self.active()?;
        self.tabs
            .iter()
            .find(|t| t.key == active)
            .map(|t| t.title.as_str())
    }
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub tabs: RwSignal<TabList>,
    pub left_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            tabs: RwSignal::new(TabList::default()),
            left_open: RwSignal::new(true),
        }
    }

    /// Restore the tab named in `?active=` and keep the query in sync.
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let params: HashMap<String, String> =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
        if let Some(active_key) = params.get("active") {
            match tab_label_for_key(active_key) {
                Some(title) => self.open_tab(active_key, &title),
                None => log::warn!("Ignoring unknown tab in URL: {}", active_key),
            }
        }

        let this = *self;
        Effect::new(move |_| {
            let Some(active_key) = this.tabs.with(|t| t.active().map(str::to_string)) else {
                return;
            };
            let query = serde_qs::to_string(&HashMap::from([("active", active_key)])).unwrap_or_default();
            let new_url = format!("?{}", query);
            let current = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();
            if current != new_url {
                if let Some(history) = window().and_then(|w| w.history().ok()) {
                    let _ = history.replace_state_with_url(
                        &wasm_bindgen::JsValue::NULL,
                        "",
                        Some(&new_url),
                    );
                }
            }
        });
    }

    pub fn open_tab(&self, key: &str, title: &str) {
        let mut added = false;
        self.tabs.update(|t| added = t.open(key, title));
        log::debug!("open_tab '{}' (new: {})", key, added);
    }

    pub fn activate_tab(&self, key: &str) {
        self.tabs.update(|t| {
            t.activate(key);
        });
    }

    pub fn update_tab_title(&self, key: &str, title: &str) {
        let changed = self.tabs.with_untracked(|t| {
            t.tabs().iter().any(|tab| tab.key == key && tab.title != title)
        });
        if changed {
            self.tabs.update(|t| {
                t.set_title(key, title);
            });
        }
    }

    pub fn close_tab(&self, key: &str) {
        log::debug!("close_tab '{}'", key);
        self.tabs.update(|t| t.close(key));
    }

    pub fn close_all(&self) {
        self.tabs.set(TabList::default());
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_tabs() -> AppGlobalContext {
    use_context::<AppGlobalContext>().expect("AppGlobalContext not provided in context")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(list: &TabList) -> Vec<&str> {
        list.tabs().iter().map(|t| t.key.as_str()).collect()
    }

    #[test]
    fn test_open_is_idempotent() {
        let mut list = TabList::default();
        assert!(list.open("a001_unit", "Units"));
        assert!(list.open("a007_product", "Products"));
        assert!(!list.open("a001_unit", "Units"));
        assert_eq!(keys(&list), vec!["a001_unit", "a007_product"]);
        assert_eq!(list.active(), Some("a001_unit"));
    }

    #[test]
    fn test_close_active_focuses_last() {
        let mut list = TabList::default();
        list.open("a", "A");
        list.open("b", "B");
        list.open("c", "C");
        list.activate("b");
        list.close("b");
        assert_eq!(keys(&list), vec!["a", "c"]);
        assert_eq!(list.active(), Some("c"));

        list.close("a");
        assert_eq!(list.active(), Some("c"));
        list.close("c");
        assert_eq!(list.active(), None);
    }

    #[test]
    fn test_activate_unknown_is_ignored() {
        let mut list = TabList::default();
        list.open("a", "A");
        assert!(!list.activate("zzz"));
        assert_eq!(list.active(), Some("a"));
    }

    #[test]
    fn test_set_title() {
        let mut list = TabList::default();
        list.open("a008_sale_new", "New sale");
        assert!(list.set_title("a008_sale_new", "Sale INV-7"));
        assert!(!list.set_title("a008_sale_new", "Sale INV-7"));
        assert!(!list.set_title("missing", "x"));
        assert_eq!(list.active_title(), Some("Sale INV-7"));
    }
}
