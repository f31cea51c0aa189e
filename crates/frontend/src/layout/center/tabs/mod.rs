pub mod tab;

use leptos::prelude::*;

use crate::layout::global_context::use_tabs;
use tab::TabButton;

#[component]
pub fn TabStrip() -> impl IntoView {
    let tabs_store = use_tabs();

    view! {
        <div class="tabs-bar" role="tablist">
            <For
                each=move || tabs_store.tabs.with(|t| t.tabs().to_vec())
                key=|tab| (tab.key.clone(), tab.title.clone())
                children=move |tab| view! { <TabButton tab=tab /> }
            />
        </div>
    }
}
