use leptos::prelude::*;

use crate::app_shell::AppShell;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::config::AppConfig;
use crate::shared::modal::{ModalHost, ModalService};
use crate::shared::page_context::PageContext;
use crate::shared::toast::{ToastHost, ToastService};
use crate::system::auth::AuthProvider;

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::get();

    // Toasts first: the auth provider reports session expiry through them
    provide_context(ToastService::new(config.toast.duration_ms));
    provide_context(ModalService::new());
    provide_context(AppGlobalContext::new());
    // Fallback for views outside any tab; each tab provides its own
    provide_context(PageContext::new());

    view! {
        <AuthProvider>
            <AppShell />
            <ModalHost />
            <ToastHost />
        </AuthProvider>
    }
}
