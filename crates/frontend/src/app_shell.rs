//! Auth gate: the login page until a session exists, then the main layout.

use leptos::prelude::*;

use crate::layout::center::Center;
use crate::layout::global_context::use_tabs;
use crate::layout::left::Sidebar;
use crate::layout::Shell;
use crate::system::auth::use_auth;
use crate::system::pages::login::LoginPage;

#[component]
fn MainLayout() -> impl IntoView {
    let tabs_store = use_tabs();
    // Restores the tab named in the URL, then keeps the URL in sync
    tabs_store.init_router_integration();

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=|| view! { <Center /> }.into_any()
        />
    }
}

#[component]
pub fn AppShell() -> impl IntoView {
    let (auth_state, _) = use_auth();
    let tabs_store = use_tabs();

    // Tabs belong to one login
    Effect::new(move |_| {
        if !auth_state.with(|s| s.is_authenticated()) {
            tabs_store.close_all();
        }
    });

    view! {
        <Show
            when=move || auth_state.with(|s| s.is_authenticated())
            fallback=|| view! { <LoginPage /> }
        >
            <MainLayout />
        </Show>
    }
}
