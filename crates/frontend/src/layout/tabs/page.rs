//! One open tab: its content, kept mounted while hidden.

use leptos::prelude::*;

use super::registry::render_tab_content;
use crate::layout::global_context::{AppGlobalContext, Tab};
use crate::shared::page_context::PageContext;

/// Renders the tab's screen under its own `PageContext` and hides it with a
/// class while another tab is active. Titles the page sets flow back to the
/// tab strip.
#[component]
pub fn TabPage(tab: Tab, tabs_store: AppGlobalContext) -> impl IntoView {
    let tab_key = tab.key.clone();
    let page_ctx = PageContext::new();
    page_ctx.title.set(tab.title.clone());
    provide_context(page_ctx);

    let key_for_active = tab_key.clone();
    let is_active = move || tabs_store.tabs.with(|t| t.is_active(&key_for_active));

    let key_for_title = tab_key.clone();
    Effect::new(move |_| {
        let title = page_ctx.title.get();
        if !title.trim().is_empty() {
            tabs_store.update_tab_title(&key_for_title, &title);
        }
    });

    log::debug!("TabPage mounted: '{}'", tab_key);
    let key_for_cleanup = tab_key.clone();
    on_cleanup(move || log::debug!("TabPage dropped: '{}'", key_for_cleanup));

    let content = render_tab_content(&tab_key, tabs_store);

    view! {
        <div
            class="tabs__item"
            class:tabs__item--hidden=move || !is_active()
            data-tab-key=tab_key
        >
            {content}
        </div>
    }
}
