//! Top bar: menu toggle, active page title, signed-in role and logout.

use contracts::system::auth::ROLE_ADMIN;
use leptos::prelude::*;

use crate::layout::global_context::use_tabs;
use crate::shared::icons::icon;
use crate::system::auth::context::do_logout;
use crate::system::auth::{use_api, use_auth};

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_tabs();
    let (auth_state, set_auth_state) = use_auth();
    let client = StoredValue::new(use_api());

    let logout = move |_| {
        client.with_value(|client| do_logout(client, set_auth_state));
        ctx.close_all();
    };

    let role_label = move || {
        auth_state.with(|state| {
            if state.has_role(ROLE_ADMIN) {
                "Administrator"
            } else {
                "Staff"
            }
        })
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if ctx.left_open.get() { "Hide navigation" } else { "Show navigation" }
                >
                    {icon("menu")}
                </button>
                <span class="top-header__title">"Rapid Global"</span>
                <span class="top-header__page">
                    {move || ctx.tabs.with(|t| t.active_title().map(str::to_string))}
                </span>
            </div>

            <div class="top-header__actions">
                <div class="top-header__user">{role_label}</div>
                <button class="top-header__icon-btn" on:click=logout title="Log out">
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}
