pub mod tabs;

use leptos::prelude::*;

use crate::layout::global_context::use_tabs;
use crate::layout::tabs::TabPage;
use tabs::TabStrip;

/// Tab strip above the mounted tab pages.
#[component]
pub fn Center() -> impl IntoView {
    let tabs_store = use_tabs();

    view! {
        <div data-zone="center" class="app-tabs">
            <TabStrip />
            <div class="app-tabs__content">
                {move || {
                    tabs_store.tabs.with(|t| t.tabs().is_empty()).then(|| view! {
                        <div class="app-tabs__empty">"Pick a section from the menu to get started."</div>
                    })
                }}
                <For
                    each=move || tabs_store.tabs.with(|t| t.tabs().to_vec())
                    key=|tab| tab.key.clone()
                    children=move |tab| view! { <TabPage tab=tab tabs_store=tabs_store /> }
                />
            </div>
        </div>
    }
}
