use leptos::ev;
use leptos::prelude::*;

use crate::layout::global_context::{use_tabs, Tab};
use crate::shared::icons::icon;

#[component]
pub fn TabButton(tab: Tab) -> impl IntoView {
    let tabs_store = use_tabs();

    let key = StoredValue::new(tab.key.clone());
    let is_active = Memo::new(move |_| key.with_value(|k| tabs_store.tabs.with(|t| t.is_active(k))));

    let on_click = move |_| key.with_value(|k| tabs_store.activate_tab(k));
    let on_close = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
        key.with_value(|k| tabs_store.close_tab(k));
    };

    view! {
        <div class="tab" class:active=is_active role="tab" on:click=on_click>
            <span class="tab__title">{tab.title}</span>
            <button class="tab-close" title="Close" on:click=on_close>{icon("x")}</button>
        </div>
    }
}
