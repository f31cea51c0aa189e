//! Standard root wrapper for every page.
//!
//! Puts `id="{entity}--{category}"` and `data-page-category` on the root
//! element and picks the BEM modifier class from the category.

use super::page_standard::*;
use leptos::prelude::*;

#[component]
pub fn PageFrame(
    /// HTML id in format `{entity}--{category}`, e.g. `"a001_unit--list"`
    #[prop(into)]
    page_id: String,
    /// One of the PAGE_CAT_* constants from `page_standard`
    category: &'static str,
    children: Children,
) -> impl IntoView {
    if !is_valid_page_id(&page_id) {
        log::warn!("Page id '{}' does not follow {{entity}}--{{category}}", page_id);
    }
    let class = match category {
        PAGE_CAT_DETAIL => "page page--detail",
        PAGE_CAT_REPORT => "page page--report",
        _ => "page",
    };

    view! {
        <div id=page_id class=class data-page-category=category>
            {children()}
        </div>
    }
}
